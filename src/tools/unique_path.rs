//! 輸出檔名衝突處理
//!
//! 依序嘗試 `name.ext`、`name2.ext`、`name3.ext`……直到找到未被佔用的路徑。
//! 檢查只針對當下的檔案系統狀態與本次執行已分配的路徑，並非原子操作；
//! 若有其他程序同時寫入同一資料夾，仍可能發生衝突。

use anyhow::{Context, Result};
use log::debug;
use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct UniquePathResolver {
    claimed: HashSet<PathBuf>,
}

impl UniquePathResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 找出下一個可用路徑，並記錄為已分配
    pub fn resolve(&mut self, desired: &Path) -> Result<PathBuf> {
        debug!("尋找可用檔名: {}", desired.display());

        let mut count: u64 = 1;
        let mut candidate = desired.to_path_buf();

        loop {
            debug!("嘗試 {}", candidate.display());
            if !self.claimed.contains(&candidate) && !path_exists(&candidate)? {
                debug!("使用 {}", candidate.display());
                self.claimed.insert(candidate.clone());
                return Ok(candidate);
            }

            count += 1;
            candidate = numbered_variant(desired, count);
        }
    }
}

fn path_exists(path: &Path) -> Result<bool> {
    match fs::symlink_metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e).with_context(|| format!("無法檢查路徑: {}", path.display())),
    }
}

/// `dir/name.ext` -> `dir/name{count}.ext`
fn numbered_variant(path: &Path, count: u64) -> PathBuf {
    let mut name: OsString = path.with_extension("").into_os_string();
    name.push(count.to_string());
    if let Some(extension) = path.extension() {
        name.push(".");
        name.push(extension);
    }
    PathBuf::from(name)
}
