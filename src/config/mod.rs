pub mod load;
pub mod types;

pub use load::SETTINGS_FILE_NAME;
pub use types::{Config, UserSettings};
