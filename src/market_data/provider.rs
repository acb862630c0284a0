use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::Deserialize;

use crate::error::TrackerError;
use crate::models::market_data::MarketData;

/// 가격 시계열 공급자 인터페이스
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SeriesFetcher: Send + Sync {
    /// `range` 기간 동안 `interval` 간격의 시간순 바 목록 조회
    async fn fetch_series(&self, symbol: &str, range: &str, interval: &str) -> Result<Vec<MarketData>, TrackerError>;
}

/// Yahoo chart API 기반 공급자
pub struct YahooChartProvider {
    base_url: String,
    http: reqwest::Client,
}

impl YahooChartProvider {
    pub fn new(base_url: impl Into<String>, timeout_ms: Option<u64>) -> Result<Self, TrackerError> {
        let mut builder = reqwest::Client::builder().user_agent("Mozilla/5.0 (tqqq-tracker)");
        if let Some(ms) = timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        let http = builder
            .build()
            .map_err(|e| TrackerError::Config(format!("Failed to build http client: {}", e)))?;

        Ok(YahooChartProvider {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    fn chart_url(&self, symbol: &str) -> String {
        format!("{}/v8/finance/chart/{}", self.base_url, symbol)
    }
}

#[async_trait]
impl SeriesFetcher for YahooChartProvider {
    async fn fetch_series(&self, symbol: &str, range: &str, interval: &str) -> Result<Vec<MarketData>, TrackerError> {
        let res = self.http
            .get(self.chart_url(symbol))
            .query(&[("range", range), ("interval", interval)])
            .send().await
            .map_err(|e| TrackerError::Fetch(format!("chart http error: {}", e)))?;

        let status = res.status();
        let body = res.text().await
            .map_err(|e| TrackerError::Fetch(format!("chart body error: {}", e)))?;
        if !status.is_success() {
            return Err(TrackerError::Fetch(format!("chart request for {} failed: {}", symbol, status)));
        }

        let bars = parse_chart_response(symbol, &body)?;
        log::debug!("{} {} / {}: {}개 바 수신", symbol, range, interval, bars.len());
        Ok(bars)
    }
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Default, Deserialize)]
struct ChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

/// chart 응답 본문을 바 목록으로 변환. 종가가 null인 행은 건너뛴다.
pub fn parse_chart_response(symbol: &str, body: &str) -> Result<Vec<MarketData>, TrackerError> {
    let envelope: ChartEnvelope = serde_json::from_str(body)
        .map_err(|e| TrackerError::Parse(format!("chart response: {}", e)))?;

    if let Some(err) = envelope.chart.error {
        return Err(TrackerError::Fetch(format!(
            "provider error {}: {}",
            err.code.unwrap_or_default(),
            err.description.unwrap_or_default()
        )));
    }

    let result = envelope.chart.result
        .and_then(|mut results| if results.is_empty() { None } else { Some(results.remove(0)) })
        .ok_or_else(|| TrackerError::EmptySeries(format!("no chart result for {}", symbol)))?;

    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();

    let mut bars: Vec<MarketData> = result.timestamp
        .iter()
        .enumerate()
        .filter_map(|(i, &ts)| {
            let close = at(&quote.close, i)?;
            Some(MarketData::new(
                symbol,
                ts * 1000,
                at(&quote.open, i).unwrap_or(close),
                at(&quote.high, i).unwrap_or(close),
                at(&quote.low, i).unwrap_or(close),
                close,
                at(&quote.volume, i).unwrap_or(0.0),
            ))
        })
        .collect();

    bars.sort_by_key(|bar| bar.timestamp);
    Ok(bars)
}

fn at(values: &[Option<f64>], i: usize) -> Option<f64> {
    values.get(i).copied().flatten()
}

/// 비어 있는 시계열은 치명적 오류로 취급
pub fn ensure_non_empty(symbol: &str, interval: &str, bars: Vec<MarketData>) -> Result<Vec<MarketData>, TrackerError> {
    if bars.is_empty() {
        return Err(TrackerError::EmptySeries(format!("{} returned no {} bars", symbol, interval)));
    }
    Ok(bars)
}
