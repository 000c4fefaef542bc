use super::task_scheduler::{ClipExtractor, ClipJob};
use crate::config::UserSettings;
use anyhow::{Context, Result, bail};
use log::debug;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// 單一片段的 ffmpeg 擷取指令
pub struct FfmpegCommand {
    program: String,
    input_path: PathBuf,
    output_path: PathBuf,
    start: f64,
    end: f64,
    audio_codec: String,
    quality: u8,
}

impl FfmpegCommand {
    #[must_use]
    pub fn new(settings: &UserSettings, job: &ClipJob) -> Self {
        Self {
            program: settings.ffmpeg_path.clone(),
            input_path: job.input_path.to_path_buf(),
            output_path: job.output_path.clone(),
            start: job.clip.start,
            end: job.clip.end,
            audio_codec: settings.audio_codec.clone(),
            quality: settings.quality,
        }
    }

    #[must_use]
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    #[must_use]
    pub fn args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = ["-nostats", "-nostdin", "-y", "-i"]
            .into_iter()
            .map(OsString::from)
            .collect();
        args.push(self.input_path.clone().into_os_string());
        args.extend(
            [
                "-ss".to_string(),
                format_seconds(self.start),
                "-to".to_string(),
                format_seconds(self.end),
                "-c:a".to_string(),
                self.audio_codec.clone(),
                "-q".to_string(),
                self.quality.to_string(),
                "-v".to_string(),
                "error".to_string(),
            ]
            .map(OsString::from),
        );
        args.push(self.output_path.clone().into_os_string());
        args
    }

    #[must_use]
    pub fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(self.args());
        cmd.stdin(Stdio::null());
        cmd
    }

    /// 執行 ffmpeg，非零結束碼視為失敗並附上完整輸出
    pub fn run(&self) -> Result<()> {
        debug!("執行: {} {:?}", self.program, self.args());

        let output = self
            .build_command()
            .output()
            .with_context(|| format!("無法執行 {}", self.program))?;

        if !output.status.success() {
            let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
            combined.push_str(&String::from_utf8_lossy(&output.stderr));
            bail!(
                "執行 ffmpeg 失敗 ({}): {}\n\n指令輸出如下\n\n---------\n{}\n---------\n",
                self.output_path().display(),
                output.status,
                combined.trim_end()
            );
        }

        Ok(())
    }
}

/// 秒數以一般十進位表示（不使用科學記號）
fn format_seconds(seconds: f64) -> String {
    format!("{seconds}")
}

/// 以 ffmpeg 擷取片段
pub struct FfmpegExtractor {
    settings: UserSettings,
}

impl FfmpegExtractor {
    #[must_use]
    pub const fn new(settings: UserSettings) -> Self {
        Self { settings }
    }
}

impl ClipExtractor for FfmpegExtractor {
    fn extract(&self, job: &ClipJob) -> Result<()> {
        let command = FfmpegCommand::new(&self.settings, job);
        debug!("ffmpeg 輸出檔: {}", command.output_path().display());
        command.run()
    }
}
