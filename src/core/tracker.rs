/**
* filename : tracker
* author : HAMA
* date: 2025. 5. 11.
* description: 조회 → 계산 → 기록 → 알림을 한 번 수행하는 파이프라인
**/

use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::config::{Config, SourceKind};
use crate::error::TrackerError;
use crate::indicators::{compute_indicators, ComputedIndicators};
use crate::market_data::provider::ensure_non_empty;
use crate::market_data::{CsvSeriesFetcher, SeriesFetcher, YahooChartProvider};
use crate::models::artifact::Artifact;
use crate::models::market_data::{closes, to_samples};
use crate::notify::{DeliveryOutcome, Notification, Notifier, NtfyNotifier};
use crate::output::{ArtifactWriter, JsonFileWriter};
use crate::signals::{build_change_summary, detect_all, ChangeSummary, CrossoverEvent, ReferenceMode, ReferencePolicy};
use crate::utils::labels::format_labels;
use crate::utils::logging;

/// 한 번의 실행 결과
#[derive(Debug, Clone)]
pub struct RunReport {
  pub samples: usize,
  pub artifact: Artifact,
  pub summary: ChangeSummary,
  pub events: Vec<CrossoverEvent>,
  pub outcomes: Vec<DeliveryOutcome>,
}

// 계산 단계 결과 (기록 전)
struct Computation {
  artifact: Artifact,
  indicators: ComputedIndicators,
  summary: ChangeSummary,
}

pub struct Tracker {
  config: Config,
  timezone: Tz,
  fetcher: Arc<dyn SeriesFetcher>,
  writer: Arc<dyn ArtifactWriter>,
  notifier: Arc<dyn Notifier>,
}

impl Tracker {
  pub fn new(
    config: Config,
    fetcher: Arc<dyn SeriesFetcher>,
    writer: Arc<dyn ArtifactWriter>,
    notifier: Arc<dyn Notifier>,
  ) -> Result<Self, TrackerError> {
    config.validate()?;
    let timezone = config.timezone()?;

    Ok(Tracker {
      config,
      timezone,
      fetcher,
      writer,
      notifier,
    })
  }

  /// 설정에 맞는 공급자, 파일 기록기, ntfy 알림기로 구성
  pub fn from_config(config: Config) -> Result<Self, TrackerError> {
    let fetcher: Arc<dyn SeriesFetcher> = match config.fetch.source {
      SourceKind::Yahoo => Arc::new(YahooChartProvider::new(config.fetch.base_url.clone(), config.fetch.timeout_ms)?),
      SourceKind::Csv => {
        let path = config.fetch.csv_path.clone()
          .ok_or_else(|| TrackerError::Config("csv source requires fetch.csv_path".to_string()))?;
        Arc::new(CsvSeriesFetcher::new(path, ','))
      }
    };
    let writer = Arc::new(JsonFileWriter::new(config.output.path.clone()));
    let notifier = Arc::new(NtfyNotifier::from_config(&config.notification));

    Tracker::new(config, fetcher, writer, notifier)
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  /// 한 번 실행. 조회 실패는 기록 전에 중단하고, 알림 실패는 결과에만 남긴다.
  pub async fn run(&self, now: DateTime<Utc>) -> Result<RunReport, TrackerError> {
    let symbol = self.config.instrument.symbol.as_str();
    let fetch = &self.config.fetch;
    logging::log_run_start(symbol, &fetch.range, &fetch.interval);

    let bars = self.fetcher.fetch_series(symbol, &fetch.range, &fetch.interval).await?;
    let bars = ensure_non_empty(symbol, &fetch.interval, bars)?;
    let coarse = self.fetch_reference_closes(symbol).await;

    let samples = to_samples(&bars);
    let timestamps: Vec<DateTime<Utc>> = samples.iter().map(|s| s.timestamp).collect();
    let computation = self.compute(&timestamps, &closes(&samples), &coarse, now)?;

    self.writer.write(&computation.artifact)?;
    logging::log_artifact_written(&self.writer.location(), samples.len());

    let events = detect_all(&computation.indicators, &self.config.crossovers);
    let outcomes = self.notify(symbol, &events).await;

    Ok(RunReport {
      samples: samples.len(),
      artifact: computation.artifact,
      summary: computation.summary,
      events,
      outcomes,
    })
  }

  // 기준가용 상위 주기 종가. 실패하면 비워서 대체 규칙을 따르게 한다.
  async fn fetch_reference_closes(&self, symbol: &str) -> Vec<f64> {
    if self.config.reference != ReferenceMode::PreviousPeriodClose {
      return Vec::new();
    }

    let fetch = &self.config.fetch;
    match self.fetcher.fetch_series(symbol, &fetch.reference_range, &fetch.reference_interval).await {
      Ok(bars) => bars.iter().map(|b| b.close).collect(),
      Err(e) => {
        log::warn!("기준가 시계열 조회 실패, 첫 샘플 종가로 대체: {}", e);
        Vec::new()
      }
    }
  }

  fn compute(
    &self,
    timestamps: &[DateTime<Utc>],
    prices: &[f64],
    coarse: &[f64],
    now: DateTime<Utc>,
  ) -> Result<Computation, TrackerError> {
    let indicators = compute_indicators(prices, &self.config.indicators);

    let policy = match self.config.reference {
      ReferenceMode::PreviousSample => ReferencePolicy::PreviousSample,
      ReferenceMode::PreviousPeriodClose => ReferencePolicy::PreviousPeriodClose(coarse),
    };
    let summary = build_change_summary(prices, policy)
      .ok_or_else(|| TrackerError::EmptySeries("no prices to summarise".to_string()))?;

    let dates = format_labels(timestamps, now, self.timezone);
    let artifact = Artifact::assemble(dates, prices, &indicators, &summary);

    Ok(Computation {
      artifact,
      indicators,
      summary,
    })
  }

  async fn notify(&self, symbol: &str, events: &[CrossoverEvent]) -> Vec<DeliveryOutcome> {
    let mut outcomes = Vec::with_capacity(events.len());

    for event in events {
      logging::log_crossover(symbol, event);
      let notification = Notification::from_event(symbol, event, &self.config.notification.tags)
        .with_priority(self.config.notification.priority.clone());

      let outcome = self.notifier.deliver(&notification).await;
      if let DeliveryOutcome::Failed(reason) = &outcome {
        log::warn!("알림 실패 무시 - {} {}/{}: {}", event.kind, event.fast_name, event.slow_name, reason);
      }
      outcomes.push(outcome);
    }

    outcomes
  }
}
