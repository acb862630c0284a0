//! 이동평균 추적기 라이브러리
//!
//! 단일 종목의 가격 시계열로 이동평균을 계산해 차트용 JSON을 기록하고,
//! 지표선 교차 시 푸시 알림을 보냅니다.

pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod market_data;
pub mod models;
pub mod notify;
pub mod output;
pub mod signals;
pub mod utils;

// 핵심 타입 재노출
pub use crate::config::Config;
pub use crate::core::{RunReport, Tracker};
pub use crate::error::TrackerError;
pub use crate::indicators::{IndicatorKind, IndicatorSeries, IndicatorSpec};
pub use crate::models::artifact::{Artifact, ArtifactMeta};
pub use crate::models::market_data::{MarketData, PriceSample};
pub use crate::signals::{ChangeSummary, CrossoverEvent, CrossoverKind, CrossoverPair};

/// 버전 정보
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 결과 타입 별칭
pub type Result<T> = std::result::Result<T, TrackerError>;
