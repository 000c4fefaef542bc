//! 音訊片段切割元件
//!
//! 依照片段清單，使用 ffmpeg 將一個長音訊檔切割為多個具名片段

mod ffmpeg_command;
mod filename_sanitizer;
mod main;
mod manifest_parser;
mod task_scheduler;
mod timestamp_parser;

pub use ffmpeg_command::{FfmpegCommand, FfmpegExtractor};
pub use filename_sanitizer::sanitize_name;
pub use main::{ClipSplitter, SplitReport, output_directory_for};
pub use manifest_parser::{Clip, parse_clip, parse_manifest, read_manifest};
pub use task_scheduler::{ClipExtractor, ClipJob, DispatchSummary, TaskScheduler};
pub use timestamp_parser::parse_timestamp;
