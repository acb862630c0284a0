/**
* filename : change_summary
* author : HAMA
* date: 2025. 5. 11.
* description: 
**/

use serde::{Deserialize, Serialize};

use crate::utils::math::calculate_return;

/// 기준가 선택 방식 (설정용)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceMode {
  /// 같은 시계열의 직전 샘플 종가
  PreviousSample,
  /// 더 긴 주기(일봉) 시계열의 직전 완료 구간 종가
  PreviousPeriodClose,
}

/// 실행 시점의 기준가 선택 정책
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReferencePolicy<'a> {
  PreviousSample,
  PreviousPeriodClose(&'a [f64]),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChangeSummary {
  pub current_price: f64,
  pub reference_price: f64,
  pub absolute_change: f64,
  /// 기준가가 0이면 None
  pub percent_change: Option<f64>,
  pub is_positive: bool,
}

/// 기준가를 고른다. 샘플이 하나뿐이면 그 샘플 종가로 대체한다.
pub fn select_reference(closes: &[f64], policy: ReferencePolicy<'_>) -> Option<f64> {
  let fallback = *closes.first()?;
  
  let reference = match policy {
    ReferencePolicy::PreviousSample => second_to_last(closes),
    ReferencePolicy::PreviousPeriodClose(coarse) => second_to_last(coarse),
  };
  
  Some(reference.unwrap_or(fallback))
}

fn second_to_last(values: &[f64]) -> Option<f64> {
  if values.len() >= 2 {
    Some(values[values.len() - 2])
  } else {
    None
  }
}

/// 종가 시계열로 변동 요약 계산. 빈 시계열이면 None.
pub fn build_change_summary(closes: &[f64], policy: ReferencePolicy<'_>) -> Option<ChangeSummary> {
  let current_price = *closes.last()?;
  let reference_price = select_reference(closes, policy)?;
  let absolute_change = current_price - reference_price;
  
  // 기준가 0이면 나누지 않음
  let percent_change = if reference_price == 0.0 {
    None
  } else {
    Some(calculate_return(reference_price, current_price))
  };
  
  Some(ChangeSummary {
    current_price,
    reference_price,
    absolute_change,
    percent_change,
    // 변동 0도 상승으로 취급
    is_positive: current_price >= reference_price,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use rstest::rstest;
  
  #[test]
  fn test_two_samples_previous_row() {
    let summary = build_change_summary(&[100.0, 105.0], ReferencePolicy::PreviousSample).unwrap();
    
    assert_eq!(summary.reference_price, 100.0);
    assert_eq!(summary.current_price, 105.0);
    assert_eq!(summary.absolute_change, 5.0);
    assert_eq!(summary.percent_change, Some(5.0));
    assert!(summary.is_positive);
  }
  
  #[test]
  fn test_single_sample_falls_back_to_itself() {
    let summary = build_change_summary(&[50.0], ReferencePolicy::PreviousSample).unwrap();
    
    assert_eq!(summary.reference_price, 50.0);
    assert_eq!(summary.absolute_change, 0.0);
    assert_eq!(summary.percent_change, Some(0.0));
    assert!(summary.is_positive);
  }
  
  #[test]
  fn test_previous_period_close_uses_coarse_series() {
    let daily = [90.0, 95.0, 99.0];
    let summary = build_change_summary(&[97.0, 98.0, 94.05], ReferencePolicy::PreviousPeriodClose(&daily)).unwrap();
    
    assert_eq!(summary.reference_price, 95.0);
    assert!((summary.absolute_change - (-0.95)).abs() < 1e-9);
    assert!((summary.percent_change.unwrap() - (-1.0)).abs() < 1e-9);
    assert!(!summary.is_positive);
  }
  
  #[rstest]
  #[case(&[])]
  #[case(&[42.0])]
  fn test_short_coarse_series_falls_back_to_first_fine_sample(#[case] daily: &[f64]) {
    let summary = build_change_summary(&[40.0, 41.0, 44.0], ReferencePolicy::PreviousPeriodClose(daily)).unwrap();
    
    assert_eq!(summary.reference_price, 40.0);
    assert_eq!(summary.absolute_change, 4.0);
  }
  
  #[test]
  fn test_zero_reference_has_no_percent() {
    let summary = build_change_summary(&[0.0, 3.0], ReferencePolicy::PreviousSample).unwrap();
    
    assert_eq!(summary.absolute_change, 3.0);
    assert_eq!(summary.percent_change, None);
    assert!(summary.is_positive);
  }
  
  #[test]
  fn test_empty_series_has_no_summary() {
    assert!(build_change_summary(&[], ReferencePolicy::PreviousSample).is_none());
  }
}
