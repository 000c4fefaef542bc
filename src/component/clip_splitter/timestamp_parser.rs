use anyhow::{Result, bail};

/// 將時間戳記轉換為秒數
///
/// 接受的格式：
/// - 空字串：0
/// - `SS` 或 `SS.frac`：秒數
/// - `MM:SS` 或 `MM:SS.frac`：分鐘與秒數
///
/// 字串中的空白會先被移除。無法解析的數值欄位視為 0，
/// 只有三個以上以冒號分隔的欄位會回傳錯誤。
pub fn parse_timestamp(raw: &str) -> Result<f64> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Ok(0.0);
    }

    let fields: Vec<&str> = compact.split(':').collect();
    match fields.as_slice() {
        [seconds] => Ok(parse_field(seconds)),
        [minutes, seconds] => Ok(parse_field(minutes) * 60.0 + parse_field(seconds)),
        _ => bail!(
            "無效的時間戳記 '{compact}': 應為 SS 或 MM:SS，但有 {} 個以冒號分隔的欄位",
            fields.len()
        ),
    }
}

/// 負數、無限大與 NaN 一律視為 0
fn parse_field(field: &str) -> f64 {
    field
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && value.is_sign_positive())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_timestamp_is_zero() {
        assert_eq!(parse_timestamp("").unwrap(), 0.0);
        assert_eq!(parse_timestamp("   ").unwrap(), 0.0);
    }

    #[test]
    fn test_plain_seconds() {
        assert_eq!(parse_timestamp("15").unwrap(), 15.0);
        assert_eq!(parse_timestamp("2.5").unwrap(), 2.5);
    }

    #[test]
    fn test_minutes_and_seconds() {
        assert_eq!(parse_timestamp("1:30").unwrap(), 90.0);
        assert_eq!(parse_timestamp("01:30.5").unwrap(), 90.5);
        assert_eq!(parse_timestamp("10:00").unwrap(), 600.0);

        for minutes in 0..120u32 {
            for seconds in [0u32, 1, 29, 59] {
                let text = format!("{minutes}:{seconds:02}");
                assert_eq!(
                    parse_timestamp(&text).unwrap(),
                    f64::from(minutes * 60 + seconds),
                    "input: {text}"
                );
            }
        }
    }

    #[test]
    fn test_embedded_whitespace_is_ignored() {
        assert_eq!(parse_timestamp(" 1 : 3 0 ").unwrap(), 90.0);
        assert_eq!(parse_timestamp("\t12\t").unwrap(), 12.0);
    }

    #[test]
    fn test_unparseable_fields_default_to_zero() {
        assert_eq!(parse_timestamp("abc").unwrap(), 0.0);
        assert_eq!(parse_timestamp("abc:30").unwrap(), 30.0);
        assert_eq!(parse_timestamp("2:xx").unwrap(), 120.0);
        assert_eq!(parse_timestamp(":").unwrap(), 0.0);
    }

    #[test]
    fn test_negative_and_non_finite_default_to_zero() {
        assert_eq!(parse_timestamp("-5").unwrap(), 0.0);
        assert_eq!(parse_timestamp("-0").unwrap().to_string(), "0");
        assert_eq!(parse_timestamp("inf").unwrap(), 0.0);
        assert_eq!(parse_timestamp("NaN").unwrap(), 0.0);
    }

    #[test]
    fn test_three_or_more_fields_is_an_error() {
        assert!(parse_timestamp("1:2:3").is_err());
        assert!(parse_timestamp("::").is_err());
        assert!(parse_timestamp("1:2:3:4").is_err());

        let message = parse_timestamp("1:2:3").unwrap_err().to_string();
        assert!(message.contains("1:2:3"), "message: {message}");
    }
}
