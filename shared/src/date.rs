//! 日期显示模块
//!
//! 服务端的时间字段是 ISO 8601 字符串，可能带时区（RFC 3339），
//! 也可能是不带时区的 `datetime.isoformat()` 输出。这里统一解析为日期。

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DISPLAY_FORMAT: &str = "%Y-%m-%d";

/// 解析 ISO 8601 字符串中的日期部分
///
/// 返回 None 如果三种格式都无法解析
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(s, DISPLAY_FORMAT).ok()
}

/// 用于界面显示的日期，无法解析时原样返回
pub fn display_date(s: &str) -> String {
    match parse_date(s) {
        Some(date) => date.format(DISPLAY_FORMAT).to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_naive_isoformat() {
        let date = parse_date("2025-09-01T10:15:30.123456").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
    }

    #[test]
    fn test_parse_rfc3339() {
        let date = parse_date("2025-09-01T23:59:59+00:00").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
    }

    #[test]
    fn test_display_falls_back_to_raw() {
        assert_eq!(display_date("2025-09-01"), "2025-09-01");
        assert_eq!(display_date("not a date"), "not a date");
    }
}
