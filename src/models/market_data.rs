use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::timestamp_to_datetime;

/// 공급자가 돌려주는 OHLCV 바 (timestamp: 밀리초)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketData {
    pub symbol: String,
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl MarketData {
    pub fn new(
        symbol: impl Into<String>,
        timestamp: i64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        MarketData {
            symbol: symbol.into(),
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// 종가만 있는 바 (테스트, CSV 입력용)
    pub fn from_close(symbol: impl Into<String>, timestamp: i64, close: f64) -> Self {
        MarketData::new(symbol, timestamp, close, close, close, close, 0.0)
    }

    pub fn datetime(&self) -> DateTime<Utc> {
        timestamp_to_datetime(self.timestamp)
    }

    pub fn to_sample(&self) -> PriceSample {
        PriceSample {
            timestamp: self.datetime(),
            close: self.close,
        }
    }
}

/// 지표 계산에 쓰이는 (시각, 종가) 쌍
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceSample {
    pub timestamp: DateTime<Utc>,
    pub close: f64,
}

impl PriceSample {
    pub fn new(timestamp: DateTime<Utc>, close: f64) -> Self {
        PriceSample { timestamp, close }
    }
}

/// 바 목록을 시간순 샘플 목록으로 변환
pub fn to_samples(bars: &[MarketData]) -> Vec<PriceSample> {
    bars.iter().map(MarketData::to_sample).collect()
}

/// 샘플 목록에서 종가만 추출
pub fn closes(samples: &[PriceSample]) -> Vec<f64> {
    samples.iter().map(|s| s.close).collect()
}
