/**
* filename : mod
* author : HAMA
* date: 2025. 5. 11.
* description: 
**/
pub mod moving_averages;
pub mod utils;

pub use moving_averages::*;
pub use utils::*;

use std::fmt::Debug;
use serde::{Deserialize, Serialize};

/// 가격 시계열과 인덱스로 정렬된 지표 값 (룩백 미충족 구간은 None)
pub type IndicatorSeries = Vec<Option<f64>>;

pub trait Indicator: Debug + Send + Sync {
  fn name(&self) -> &str;
  
  // 새로운 가격으로 지표 업데이트
  fn update(&mut self, price: f64);
  
  // 현재 지표 값 (계산 불가 시 None)
  fn value(&self) -> Option<f64>;
  
  // 지표가 계산 가능한지 (충분한 데이터가 있는지) 확인
  fn is_ready(&self) -> bool;
  
  // 지표 상태 리셋
  fn reset(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorKind {
  Sma,
  Ema,
}

/// 지표 하나의 정의: 출력 키 이름, 종류, 윈도우(SMA) 또는 스팬(EMA)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSpec {
  pub name: String,
  pub kind: IndicatorKind,
  pub window: usize,
}

impl IndicatorSpec {
  pub fn new(name: impl Into<String>, kind: IndicatorKind, window: usize) -> Self {
    IndicatorSpec {
      name: name.into(),
      kind,
      window,
    }
  }
  
  pub fn build(&self) -> Box<dyn Indicator> {
    match self.kind {
      IndicatorKind::Sma => Box::new(SimpleMovingAverage::new(self.window)),
      IndicatorKind::Ema => Box::new(ExponentialMovingAverage::new(self.window)),
    }
  }
}

/// 한 번의 실행에서 계산된 지표 시계열 묶음 (설정 순서 유지)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComputedIndicators {
  entries: Vec<(IndicatorSpec, IndicatorSeries)>,
}

impl ComputedIndicators {
  pub fn get(&self, name: &str) -> Option<&IndicatorSeries> {
    self.entries
      .iter()
      .find(|(spec, _)| spec.name == name)
      .map(|(_, series)| series)
  }
  
  pub fn iter(&self) -> impl Iterator<Item = (&IndicatorSpec, &IndicatorSeries)> {
    self.entries.iter().map(|(spec, series)| (spec, series))
  }
  
  pub fn len(&self) -> usize {
    self.entries.len()
  }
  
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

/// 모든 지표를 한 번의 패스로 계산한다. 빈 입력이면 빈 시계열을 돌려준다.
pub fn compute_indicators(prices: &[f64], specs: &[IndicatorSpec]) -> ComputedIndicators {
  let mut indicators: Vec<Box<dyn Indicator>> = specs.iter().map(IndicatorSpec::build).collect();
  let mut outputs: Vec<IndicatorSeries> = specs.iter().map(|_| Vec::with_capacity(prices.len())).collect();
  
  for &price in prices {
    update_indicators(&mut indicators, price);
    for (indicator, output) in indicators.iter().zip(outputs.iter_mut()) {
      output.push(indicator.value());
    }
  }
  
  ComputedIndicators {
    entries: specs.iter().cloned().zip(outputs).collect(),
  }
}
