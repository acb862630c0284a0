//! 로깅 유틸리티
//!
//! 로그 초기화 및 실행 단계별 로그 함수 제공

use env_logger::Builder;
use log::LevelFilter;
use std::env;

use crate::error::TrackerError;
use crate::signals::CrossoverEvent;

/// 레벨 문자열 파싱 (알 수 없으면 Info)
pub fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Info,
    }
}

/// 로깅 시스템 초기화. RUST_LOG가 있으면 우선, 없으면 `default_level` 사용
pub fn init(default_level: &str) -> Result<(), TrackerError> {
    let mut builder = Builder::from_default_env();

    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| default_level.to_string());

    builder
      .filter_level(parse_level(&log_level))
      .format_timestamp_millis()
      .try_init()
      .map_err(|e| TrackerError::Config(format!("Failed to initialise logger: {}", e)))?;

    log::info!("로깅 시스템 초기화 완료: 레벨 = {}", log_level);

    Ok(())
}

/// 실행 시작 로그
pub fn log_run_start(symbol: &str, range: &str, interval: &str) {
    log::info!("실행 시작 - 심볼: {} - 기간: {} - 간격: {}", symbol, range, interval);
}

/// 산출물 기록 로그
pub fn log_artifact_written(location: &str, samples: usize) {
    log::info!("산출물 기록 완료: {} - 샘플 수: {}", location, samples);
}

/// 교차 감지 로그
pub fn log_crossover(symbol: &str, event: &CrossoverEvent) {
    log::info!("교차 감지: {} - {} - {} ({:.2}) / {} ({:.2})",
               symbol, event.kind, event.fast_name, event.fast_value, event.slow_name, event.slow_value);
}

/// 오류 로그
pub fn log_error(context: &str, error: &TrackerError) {
    log::error!("오류 발생 - {}: {}", context, error);
}
