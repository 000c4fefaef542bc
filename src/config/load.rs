use crate::config::types::{Config, UserSettings};
use anyhow::{Context, Result};
use log::{debug, warn};
use std::fs;
use std::path::Path;

/// 設定檔名稱，從目前工作目錄讀取
pub const SETTINGS_FILE_NAME: &str = "settings.json";

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::load_from(Path::new(SETTINGS_FILE_NAME))
    }

    /// 讀取指定路徑的設定檔，檔案不存在或無法解析時使用預設值
    #[must_use]
    pub fn load_from(path: &Path) -> Self {
        let settings = match Self::load_settings(path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("無法載入設定檔，改用預設值: {e:#}");
                UserSettings::default()
            }
        };
        debug!("使用設定: {settings:?}");

        Self { settings }
    }

    fn load_settings(path: &Path) -> Result<UserSettings> {
        if !path.exists() {
            return Ok(UserSettings::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings from {}", path.display()))
    }
}
