/**
* filename : moving_averages
* author : HAMA
* date: 2025. 5. 11.
* description:
**/

use std::collections::VecDeque;
use super::Indicator;

/// 단순 이동평균. 누적 합을 유지해 샘플당 O(1)로 갱신한다.
#[derive(Debug)]
pub struct SimpleMovingAverage {
  name: String,
  period: usize,
  values: VecDeque<f64>,
  sum: f64,
}

impl SimpleMovingAverage {
  pub fn new(period: usize) -> Self {
    SimpleMovingAverage {
      name: format!("SMA-{}", period),
      period,
      values: VecDeque::with_capacity(period),
      sum: 0.0,
    }
  }

  pub fn period(&self) -> usize {
    self.period
  }
}

impl Indicator for SimpleMovingAverage {
  fn name(&self) -> &str {
    &self.name
  }

  fn update(&mut self, price: f64) {
    // 새 가격 추가
    self.values.push_back(price);
    self.sum += price;

    // 오래된 가격 제거 (필요시)
    if self.values.len() > self.period {
      if let Some(old_value) = self.values.pop_front() {
        self.sum -= old_value;
      }
    }
  }

  fn value(&self) -> Option<f64> {
    if !self.is_ready() {
      return None;
    }

    Some(self.sum / self.period as f64)
  }

  fn is_ready(&self) -> bool {
    self.period > 0 && self.values.len() >= self.period
  }

  fn reset(&mut self) {
    self.values.clear();
    self.sum = 0.0;
  }
}

/// 비보정(adjust=false) 지수이동평균. 첫 샘플로 시작하며 null 구간이 없다.
#[derive(Debug)]
pub struct ExponentialMovingAverage {
  name: String,
  span: usize,
  current_ema: Option<f64>,
  alpha: f64,
}

impl ExponentialMovingAverage {
  pub fn new(span: usize) -> Self {
    let alpha = 2.0 / (span as f64 + 1.0);

    ExponentialMovingAverage {
      name: format!("EMA-{}", span),
      span,
      current_ema: None,
      alpha,
    }
  }

  pub fn span(&self) -> usize {
    self.span
  }

  pub fn alpha(&self) -> f64 {
    self.alpha
  }
}

impl Indicator for ExponentialMovingAverage {
  fn name(&self) -> &str {
    &self.name
  }

  fn update(&mut self, price: f64) {
    // 상태는 반올림 없이 전체 정밀도로 유지
    let next = match self.current_ema {
      None => price,
      Some(prev_ema) => self.alpha * price + (1.0 - self.alpha) * prev_ema,
    };
    self.current_ema = Some(next);
  }

  fn value(&self) -> Option<f64> {
    self.current_ema
  }

  fn is_ready(&self) -> bool {
    self.current_ema.is_some()
  }

  fn reset(&mut self) {
    self.current_ema = None;
  }
}

/// 가격 시계열에 대한 SMA(window) 시계열
pub fn sma_series(prices: &[f64], window: usize) -> super::IndicatorSeries {
  super::indicator_series(&mut SimpleMovingAverage::new(window), prices)
}

/// 가격 시계열에 대한 EMA(span) 시계열
pub fn ema_series(prices: &[f64], span: usize) -> super::IndicatorSeries {
  super::indicator_series(&mut ExponentialMovingAverage::new(span), prices)
}
