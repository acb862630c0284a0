//! 차트 라벨 포맷
//!
//! 샘플 시각을 "Mon DD, YYYY" 형태로, 마지막 샘플은 생성 시각으로 표시

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// 일반 샘플 라벨 형식
pub const DATE_FORMAT: &str = "%b %d, %Y";

/// 마지막(진행 중) 샘플 라벨 형식
pub const DATETIME_FORMAT: &str = "%b %d, %Y, %I:%M %p";

/// 단일 시각의 날짜 라벨
pub fn format_date(timestamp: DateTime<Utc>, tz: Tz) -> String {
  timestamp.with_timezone(&tz).format(DATE_FORMAT).to_string()
}

/// 생성 시각 라벨 (시:분 AM/PM 포함)
pub fn format_generated_at(now: DateTime<Utc>, tz: Tz) -> String {
  now.with_timezone(&tz).format(DATETIME_FORMAT).to_string()
}

/// 각 샘플의 라벨을 만든다. 마지막 라벨은 샘플 시각이 아니라 `now` 기준.
pub fn format_labels(timestamps: &[DateTime<Utc>], now: DateTime<Utc>, tz: Tz) -> Vec<String> {
  let mut labels: Vec<String> = timestamps.iter().map(|ts| format_date(*ts, tz)).collect();
  
  if let Some(last) = labels.last_mut() {
    *last = format_generated_at(now, tz);
  }
  
  labels
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;
  use chrono_tz::America::New_York;
  
  #[test]
  fn test_labels_use_sample_time_except_last() {
    let timestamps = vec![
      Utc.with_ymd_and_hms(2024, 3, 4, 15, 0, 0).unwrap(),
      Utc.with_ymd_and_hms(2024, 3, 5, 15, 0, 0).unwrap(),
      Utc.with_ymd_and_hms(2024, 3, 6, 15, 0, 0).unwrap(),
    ];
    // 2024-03-08 20:07 UTC = 15:07 EST
    let now = Utc.with_ymd_and_hms(2024, 3, 8, 20, 7, 0).unwrap();
    
    let labels = format_labels(&timestamps, now, New_York);
    assert_eq!(labels, vec![
      "Mar 04, 2024".to_string(),
      "Mar 05, 2024".to_string(),
      "Mar 08, 2024, 03:07 PM".to_string(),
    ]);
  }
  
  #[test]
  fn test_daylight_saving_offset_applied() {
    // 2024-07-01 13:30 UTC = 09:30 EDT
    let now = Utc.with_ymd_and_hms(2024, 7, 1, 13, 30, 0).unwrap();
    assert_eq!(format_generated_at(now, New_York), "Jul 01, 2024, 09:30 AM");
  }
  
  #[test]
  fn test_date_uses_reference_timezone() {
    // 03:00 UTC는 뉴욕에서는 전날 밤
    let ts = Utc.with_ymd_and_hms(2024, 1, 10, 3, 0, 0).unwrap();
    assert_eq!(format_date(ts, New_York), "Jan 09, 2024");
  }
  
  #[test]
  fn test_single_sample_gets_generated_label() {
    let ts = Utc.with_ymd_and_hms(2024, 1, 10, 15, 0, 0).unwrap();
    let now = Utc.with_ymd_and_hms(2024, 1, 11, 17, 0, 0).unwrap();
    assert_eq!(format_labels(&[ts], now, New_York), vec!["Jan 11, 2024, 12:00 PM".to_string()]);
  }
  
  #[test]
  fn test_empty_timestamps() {
    assert!(format_labels(&[], Utc::now(), New_York).is_empty());
  }
}
