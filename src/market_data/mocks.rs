use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::TrackerError;
use crate::market_data::provider::SeriesFetcher;
use crate::models::market_data::MarketData;

/// 간격별로 미리 준비한 시계열을 돌려주는 공급자 (테스트, 드라이런용)
#[derive(Default)]
pub struct StaticSeriesFetcher {
    series: HashMap<String, Vec<MarketData>>,
    failing: Vec<String>,
    requests: Mutex<Vec<(String, String, String)>>,
}

impl StaticSeriesFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// `interval` 요청에 대해 주어진 종가 시계열을 반환하도록 설정
    pub fn with_closes(mut self, symbol: &str, interval: &str, start_ms: i64, step_ms: i64, closes: &[f64]) -> Self {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| MarketData::from_close(symbol, start_ms + step_ms * i as i64, close))
            .collect();
        self.series.insert(interval.to_string(), bars);
        self
    }

    pub fn with_bars(mut self, interval: &str, bars: Vec<MarketData>) -> Self {
        self.series.insert(interval.to_string(), bars);
        self
    }

    /// `interval` 요청을 실패시키도록 설정
    pub fn failing(mut self, interval: &str) -> Self {
        self.failing.push(interval.to_string());
        self
    }

    /// 지금까지 받은 (symbol, range, interval) 요청 목록
    pub fn requests(&self) -> Vec<(String, String, String)> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl SeriesFetcher for StaticSeriesFetcher {
    async fn fetch_series(&self, symbol: &str, range: &str, interval: &str) -> Result<Vec<MarketData>, TrackerError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push((symbol.to_string(), range.to_string(), interval.to_string()));
        }

        if self.failing.iter().any(|i| i == interval) {
            return Err(TrackerError::Fetch(format!("{} {} unavailable", symbol, interval)));
        }

        Ok(self.series.get(interval).cloned().unwrap_or_default())
    }
}
