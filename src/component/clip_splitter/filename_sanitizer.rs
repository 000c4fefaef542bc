//! 檔名清理模組
//!
//! 將片段名稱中的空白與檔案系統保留字元替換為底線

use regex::Regex;
use std::sync::LazyLock;

static REGEX_UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[\s<>:"/\\|*?]"#).expect("Invalid regex"));

/// 清理片段名稱，使其可作為檔名使用
///
/// 其他字元（包含非 ASCII 與其餘標點）保持不變
#[must_use]
pub fn sanitize_name(name: &str) -> String {
    REGEX_UNSAFE_CHARS.replace_all(name, "_").into_owned()
}
