use serde::{Deserialize, Serialize};

/// 使用者設定（settings.json），缺少的欄位使用預設值
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    /// ffmpeg 執行檔路徑
    pub ffmpeg_path: String,
    /// 音訊編碼器
    pub audio_codec: String,
    /// 編碼品質參數（傳給 `-q`）
    pub quality: u8,
    /// 輸出檔案副檔名（不含前導點）
    pub output_extension: String,
    /// 工作執行緒數量，未設定時使用邏輯 CPU 數量
    pub worker_count: Option<usize>,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            ffmpeg_path: "ffmpeg".to_string(),
            audio_codec: "libmp3lame".to_string(),
            quality: 9,
            output_extension: "mp3".to_string(),
            worker_count: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub settings: UserSettings,
}
