/**
* filename : crossover
* author : HAMA
* date: 2025. 5. 11.
* description: 
**/

use std::fmt;
use serde::{Deserialize, Serialize};

use crate::indicators::ComputedIndicators;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrossoverKind {
  Bullish,  // 골든 크로스
  Bearish,  // 데드 크로스
}

impl CrossoverKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      CrossoverKind::Bullish => "bullish",
      CrossoverKind::Bearish => "bearish",
    }
  }
}

impl fmt::Display for CrossoverKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// 교차를 검사할 (빠른선, 느린선) 지표 이름 쌍
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossoverPair {
  pub fast: String,
  pub slow: String,
}

impl CrossoverPair {
  pub fn new(fast: impl Into<String>, slow: impl Into<String>) -> Self {
    CrossoverPair {
      fast: fast.into(),
      slow: slow.into(),
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CrossoverEvent {
  pub kind: CrossoverKind,
  pub fast_name: String,
  pub slow_name: String,
  pub fast_value: f64,
  pub slow_value: f64,
}

// 유효값(None 제외) 중 마지막 두 개
fn last_two_valid(series: &[Option<f64>]) -> Option<(f64, f64)> {
  let mut valid = series.iter().rev().filter_map(|v| *v);
  let current = valid.next()?;
  let previous = valid.next()?;
  Some((previous, current))
}

/// 두 선의 마지막 두 유효값 사이에서 부호가 엄격히 바뀌었는지 검사.
/// 유효값이 2개 미만이거나 동률이면 이벤트 없음.
pub fn detect_crossover(
  fast: &[Option<f64>],
  slow: &[Option<f64>],
  fast_name: &str,
  slow_name: &str,
) -> Option<CrossoverEvent> {
  let (prev_fast, cur_fast) = last_two_valid(fast)?;
  let (prev_slow, cur_slow) = last_two_valid(slow)?;
  
  let kind = if prev_fast < prev_slow && cur_fast > cur_slow {
    CrossoverKind::Bullish
  } else if prev_fast > prev_slow && cur_fast < cur_slow {
    CrossoverKind::Bearish
  } else {
    return None;
  };
  
  Some(CrossoverEvent {
    kind,
    fast_name: fast_name.to_string(),
    slow_name: slow_name.to_string(),
    fast_value: cur_fast,
    slow_value: cur_slow,
  })
}

/// 설정된 모든 쌍에 대해 교차 검사. 쌍마다 최대 한 개의 이벤트.
pub fn detect_all(indicators: &ComputedIndicators, pairs: &[CrossoverPair]) -> Vec<CrossoverEvent> {
  pairs
    .iter()
    .filter_map(|pair| {
      let fast = indicators.get(&pair.fast)?;
      let slow = indicators.get(&pair.slow)?;
      detect_crossover(fast, slow, &pair.fast, &pair.slow)
    })
    .collect()
}
