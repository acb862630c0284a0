/**
* filename : utils
* author : HAMA
* date: 2025. 5. 11.
* description: 
**/

use super::Indicator;

// 단일 가격 데이터를 사용하여 여러 지표 업데이트
pub fn update_indicators(indicators: &mut [Box<dyn Indicator>], price: f64) {
  for indicator in indicators.iter_mut() {
    indicator.update(price);
  }
}

// 지표 초기화
pub fn reset_indicators(indicators: &mut [Box<dyn Indicator>]) {
  for indicator in indicators.iter_mut() {
    indicator.reset();
  }
}

// 가격 시계열 전체를 지표 하나에 흘려 정렬된 시계열로 변환
pub fn indicator_series(indicator: &mut dyn Indicator, prices: &[f64]) -> super::IndicatorSeries {
  prices
    .iter()
    .map(|&price| {
      indicator.update(price);
      indicator.value()
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::indicators::{ExponentialMovingAverage, SimpleMovingAverage};
  
  #[test]
  fn test_reset_indicators_clears_state() {
    let mut indicators: Vec<Box<dyn Indicator>> = vec![
      Box::new(SimpleMovingAverage::new(2)),
      Box::new(ExponentialMovingAverage::new(3)),
    ];
    update_indicators(&mut indicators, 10.0);
    update_indicators(&mut indicators, 12.0);
    assert!(indicators.iter().all(|i| i.is_ready()));
    
    reset_indicators(&mut indicators);
    assert!(indicators.iter().all(|i| !i.is_ready()));
    assert!(indicators.iter().all(|i| i.value().is_none()));
  }
}
