use super::ffmpeg_command::FfmpegExtractor;
use super::filename_sanitizer::sanitize_name;
use super::manifest_parser::{Clip, parse_manifest};
use super::task_scheduler::{ClipExtractor, ClipJob, DispatchSummary, TaskScheduler};
use crate::config::Config;
use crate::tools::{
    UniquePathResolver, logical_cpu_count, recreate_directory, validate_file_exists,
};
use anyhow::{Result, bail};
use log::info;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// 名稱清理後為空字串時使用的檔名
const FALLBACK_CLIP_NAME: &str = "clip";

/// 一次切割的結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitReport {
    pub output_dir: PathBuf,
    pub dispatch: DispatchSummary,
}

pub struct ClipSplitter {
    config: Config,
}

impl ClipSplitter {
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn run(&self, manifest_path: &Path, input_path: &Path) -> Result<SplitReport> {
        let extractor = FfmpegExtractor::new(self.config.settings.clone());
        self.run_with(manifest_path, input_path, &extractor)
    }

    /// 準備輸出資料夾、解析清單、分配檔名，最後派送所有擷取工作
    pub fn run_with<E: ClipExtractor>(
        &self,
        manifest_path: &Path,
        input_path: &Path,
        extractor: &E,
    ) -> Result<SplitReport> {
        validate_file_exists(input_path)?;
        let output_dir = output_directory_for(manifest_path)?;

        recreate_directory(&output_dir)?;
        info!("輸出資料夾已就緒: {}", output_dir.display());

        let clips = parse_manifest(manifest_path)?;
        info!(
            "從 {} 讀取到 {} 個片段",
            manifest_path.display(),
            clips.len()
        );

        let jobs = self.build_jobs(clips, &output_dir, input_path)?;
        let scheduler = TaskScheduler::new(self.worker_count());
        let dispatch = scheduler.run(jobs, extractor)?;

        Ok(SplitReport {
            output_dir,
            dispatch,
        })
    }

    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.config
            .settings
            .worker_count
            .unwrap_or_else(logical_cpu_count)
            .max(1)
    }

    /// 依清單順序為每個片段決定不重複的輸出路徑
    pub fn build_jobs(
        &self,
        clips: Vec<Clip>,
        output_dir: &Path,
        input_path: &Path,
    ) -> Result<Vec<ClipJob>> {
        let input_path: Arc<Path> = Arc::from(input_path);
        let extension = &self.config.settings.output_extension;
        let mut resolver = UniquePathResolver::new();

        clips
            .into_iter()
            .map(|clip| -> Result<ClipJob> {
                let file_name = format!("{}.{extension}", output_file_stem(&clip.name));
                let output_path = resolver.resolve(&output_dir.join(file_name))?;
                Ok(ClipJob {
                    input_path: Arc::clone(&input_path),
                    clip,
                    output_path,
                })
            })
            .collect()
    }
}

/// 清理後的名稱作為檔名主體
///
/// 名稱清理後為空時改用 `clip`，避免產生只有副檔名的 `.mp3` 隱藏檔；
/// 這是本工具額外的規則，並非清單格式的一部分。
fn output_file_stem(name: &str) -> String {
    let sanitized = sanitize_name(name);
    if sanitized.is_empty() {
        FALLBACK_CLIP_NAME.to_string()
    } else {
        sanitized
    }
}

/// 輸出資料夾為清單路徑去掉 `.txt` 副檔名
pub fn output_directory_for(manifest_path: &Path) -> Result<PathBuf> {
    if manifest_path.extension().is_none_or(|ext| ext != "txt") {
        bail!(
            "片段清單檔名必須以 .txt 結尾，才能決定輸出資料夾: {}",
            manifest_path.display()
        );
    }
    Ok(manifest_path.with_extension(""))
}
