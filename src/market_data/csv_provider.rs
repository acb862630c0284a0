use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::TrackerError;
use crate::market_data::provider::SeriesFetcher;
use crate::models::market_data::MarketData;

/// 로컬 CSV 파일 공급자 (오프라인 실행용). range/interval은 무시한다.
pub struct CsvSeriesFetcher {
    path: PathBuf,
    delimiter: u8,
}

impl CsvSeriesFetcher {
    pub fn new(path: PathBuf, delimiter: char) -> Self {
        Self { path, delimiter: delimiter as u8 }
    }

    pub fn load(&self, symbol: &str) -> Result<Vec<MarketData>, TrackerError> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .from_path(&self.path)?;

        let mut result = Vec::new();
        for rec in rdr.deserialize() {
            let row: CsvRow = rec?;
            result.push(MarketData {
                symbol: symbol.to_string(),
                timestamp: row.timestamp,
                open: row.open.unwrap_or(row.close),
                high: row.high.unwrap_or(row.close),
                low: row.low.unwrap_or(row.close),
                close: row.close,
                volume: row.volume.unwrap_or(0.0),
            });
        }
        result.sort_by_key(|bar| bar.timestamp);
        Ok(result)
    }
}

#[async_trait]
impl SeriesFetcher for CsvSeriesFetcher {
    async fn fetch_series(&self, symbol: &str, _range: &str, _interval: &str) -> Result<Vec<MarketData>, TrackerError> {
        self.load(symbol)
    }
}

#[derive(serde::Deserialize)]
struct CsvRow {
    timestamp: i64,
    open: Option<f64>,
    high: Option<f64>,
    low: Option<f64>,
    close: f64,
    volume: Option<f64>,
}
