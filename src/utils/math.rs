//! 수학 관련 유틸리티
//!
//! 반올림, 수익률 계산 함수 제공

/// 소수점 `decimals` 자리로 반올림 (출력 직전에만 사용)
pub fn round_to(value: f64, decimals: u32) -> f64 {
  let factor = 10f64.powi(decimals as i32);
  (value * factor).round() / factor
}

/// 가격 표시용 2자리 반올림
pub fn round2(value: f64) -> f64 {
  round_to(value, 2)
}

/// 평균 계산
pub fn average(values: &[f64]) -> Option<f64> {
  if values.is_empty() {
    return None;
  }
  
  Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// 수익률 계산 (백분율). 호출 측에서 entry_price != 0 보장
pub fn calculate_return(entry_price: f64, exit_price: f64) -> f64 {
  (exit_price - entry_price) / entry_price * 100.0
}

#[cfg(test)]
mod tests {
  use super::*;
  
  #[test]
  fn test_round_to() {
    assert_eq!(round2(1.23456), 1.23);
    assert_eq!(round2(1.235001), 1.24);
    assert_eq!(round2(-0.954), -0.95);
    assert_eq!(round_to(50123.456, 1), 50123.5);
    assert_eq!(round2(100.0), 100.0);
  }
  
  #[test]
  fn test_average() {
    assert_eq!(average(&[]), None);
    assert_eq!(average(&[1.0, 2.0, 3.0]), Some(2.0));
  }
  
  #[test]
  fn test_calculate_return() {
    assert_eq!(calculate_return(100.0, 105.0), 5.0);
    assert!((calculate_return(50.0, 45.0) + 10.0).abs() < 1e-9);
  }
}
