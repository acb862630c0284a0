//! 가격 시계열 공급자

pub mod csv_provider;
pub mod mocks;
pub mod provider;

pub use csv_provider::CsvSeriesFetcher;
pub use mocks::StaticSeriesFetcher;
pub use provider::{SeriesFetcher, YahooChartProvider};
