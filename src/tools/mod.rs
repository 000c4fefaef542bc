mod cpu_monitor;
mod path_validator;
mod unique_path;

pub use cpu_monitor::logical_cpu_count;
pub use path_validator::{recreate_directory, validate_file_exists};
pub use unique_path::UniquePathResolver;
