use anyhow::{Context, Result, bail};
use log::debug;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

pub fn validate_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("檔案不存在: {}", path.display());
    }
    if !path.is_file() {
        bail!("路徑不是檔案: {}", path.display());
    }
    Ok(())
}

/// 刪除既有的資料夾（或同名檔案）後重新建立空資料夾
pub fn recreate_directory(path: &Path) -> Result<()> {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.is_dir() => {
            debug!("刪除既有資料夾: {}", path.display());
            fs::remove_dir_all(path)
                .with_context(|| format!("無法刪除既有資料夾: {}", path.display()))?;
        }
        Ok(_) => {
            debug!("刪除同名檔案: {}", path.display());
            fs::remove_file(path)
                .with_context(|| format!("無法刪除同名檔案: {}", path.display()))?;
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => {
            return Err(e).with_context(|| format!("無法檢查路徑: {}", path.display()));
        }
    }

    fs::create_dir_all(path).with_context(|| format!("無法建立資料夾: {}", path.display()))?;

    let mut entries =
        fs::read_dir(path).with_context(|| format!("無法讀取資料夾: {}", path.display()))?;
    if entries.next().is_some() {
        bail!("資料夾建立後不是空的: {}", path.display());
    }

    Ok(())
}
