//! 片段清單解析
//!
//! 清單為逐行文字檔，第一行為標題（忽略），其餘每行為 `開始,結束,名稱`。
//! 名稱欄位可以包含逗號，只有前兩個逗號用來分隔欄位。

use super::timestamp_parser::parse_timestamp;
use anyhow::{Context, Result, bail};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// 單一片段
#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    /// 開始時間（秒）
    pub start: f64,
    /// 結束時間（秒），必定不小於 `start`
    pub end: f64,
    /// 清單中的名稱，作為輸出檔名的基礎
    pub name: String,
}

impl Clip {
    /// 結束時間早於開始時間時，結束時間改為開始時間加一秒
    #[must_use]
    pub fn new(start: f64, end: f64, name: impl Into<String>) -> Self {
        let end = if end < start { start + 1.0 } else { end };
        Self {
            start,
            end,
            name: name.into(),
        }
    }
}

impl fmt::Display for Clip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}s - {}s]", self.name, self.start, self.end)
    }
}

/// 解析單行內容
pub fn parse_clip(line: &str) -> Result<Clip> {
    let fields: Vec<&str> = line.splitn(3, ',').collect();
    let [start, end, name] = fields.as_slice() else {
        bail!(
            "需要 3 個以逗號分隔的欄位（開始,結束,名稱），但只有 {} 個",
            fields.len()
        );
    };

    let start = parse_timestamp(start).context("開始時間格式錯誤")?;
    let end = parse_timestamp(end).context("結束時間格式錯誤")?;

    Ok(Clip::new(start, end, *name))
}

/// 讀取片段清單檔案
pub fn parse_manifest(path: &Path) -> Result<Vec<Clip>> {
    let file = File::open(path)
        .with_context(|| format!("無法開啟片段清單檔案: {}", path.display()))?;
    read_manifest(BufReader::new(file))
        .with_context(|| format!("片段清單格式錯誤: {}", path.display()))
}

/// 從任意來源讀取片段清單，行號從標題之後的第一行起算為 1
pub fn read_manifest<R: BufRead>(reader: R) -> Result<Vec<Clip>> {
    let mut clips = Vec::new();

    for (index, line) in reader.lines().enumerate().skip(1) {
        let line_number = index;
        let line = line.with_context(|| format!("無法讀取第 {line_number} 行"))?;

        if line.trim().is_empty() {
            continue;
        }

        let clip =
            parse_clip(&line).with_context(|| format!("無法解析第 {line_number} 行: {line}"))?;
        clips.push(clip);
    }

    Ok(clips)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn read(content: &str) -> Result<Vec<Clip>> {
        read_manifest(Cursor::new(content.as_bytes()))
    }

    #[test]
    fn test_header_is_ignored() {
        let clips = read("start,end,name\n0,10,intro\n15,20,outro").unwrap();
        assert_eq!(
            clips,
            vec![Clip::new(0.0, 10.0, "intro"), Clip::new(15.0, 20.0, "outro")]
        );
    }

    #[test]
    fn test_header_only_and_empty_manifest() {
        assert!(read("").unwrap().is_empty());
        assert!(read("0,10,would-be-clip").unwrap().is_empty());
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let clips = read("header\n\n   \n0,10,a\n\t\n1:00,1:30,b\n").unwrap();
        assert_eq!(clips.len(), 2);
        assert_eq!(clips[1], Clip::new(60.0, 90.0, "b"));
    }

    #[test]
    fn test_name_may_contain_commas() {
        let clips = read("header\n0,5,Hello, World, again").unwrap();
        assert_eq!(clips[0].name, "Hello, World, again");
    }

    #[test]
    fn test_crlf_line_endings() {
        let clips = read("header\r\n0,5,intro\r\n5,9,outro\r\n").unwrap();
        assert_eq!(clips[0].name, "intro");
        assert_eq!(clips[1].name, "outro");
    }

    #[test]
    fn test_end_before_start_is_coerced() {
        let clips = read("header\n30,10,backwards").unwrap();
        assert_eq!(clips[0].start, 30.0);
        assert_eq!(clips[0].end, 31.0);

        let clip = Clip::new(2.5, 0.0, "x");
        assert_eq!(clip.end, 3.5);
    }

    #[test]
    fn test_equal_start_and_end_are_kept() {
        let clip = Clip::new(4.0, 4.0, "x");
        assert_eq!(clip.end, 4.0);
    }

    #[test]
    fn test_empty_timestamps_are_zero() {
        let clips = read("header\n,,silence").unwrap();
        assert_eq!(clips[0], Clip::new(0.0, 0.0, "silence"));
    }

    #[test]
    fn test_too_few_fields_reports_line_number() {
        let err = read("header\n0,10,ok\n\n0,10\n").unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("第 3 行"), "message: {message}");
        assert!(message.contains("0,10"), "message: {message}");
    }

    #[test]
    fn test_single_field_line_is_an_error() {
        let err = read("header\nintro").unwrap_err();
        assert!(format!("{err:#}").contains("第 1 行"));
    }

    #[test]
    fn test_malformed_timestamp_reports_line_number() {
        let err = read("header\n0,1,a\n1:2:3,5,clip").unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("第 2 行"), "message: {message}");
        assert!(message.contains("1:2:3"), "message: {message}");
    }

    #[test]
    fn test_invalid_utf8_is_a_read_error() {
        let mut bytes = b"header\n0,1,a\n".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe, b'\n']);

        let err = read_manifest(Cursor::new(bytes)).unwrap_err();
        assert!(format!("{err:#}").contains("無法讀取第 2 行"));
    }

    #[test]
    fn test_parse_manifest_missing_file() {
        let dir = tempdir().unwrap();
        let err = parse_manifest(&dir.path().join("missing.txt")).unwrap_err();
        assert!(err.to_string().contains("無法開啟片段清單檔案"));
    }

    #[test]
    fn test_parse_manifest_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("clips.txt");
        std::fs::write(&path, "start,end,name\n0:05,0:10,first\n12,11,second\n").unwrap();

        let clips = parse_manifest(&path).unwrap();
        assert_eq!(
            clips,
            vec![Clip::new(5.0, 10.0, "first"), Clip::new(12.0, 13.0, "second")]
        );
    }
}
