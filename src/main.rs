/**
* filename : main
* author : HAMA
* date: 2025. 5. 8.
* description:
**/

use chrono::Utc;

use tqqq_tracker::config::Config;
use tqqq_tracker::core::Tracker;
use tqqq_tracker::utils::logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), anyhow::Error> {
    // 설정 로드
    let config = Config::load()?;

    // 로깅 초기화
    logging::init(&config.logging.level)?;
    log::info!("추적기 시작 v{} - 심볼: {}", tqqq_tracker::VERSION, config.instrument.symbol);

    let tracker = Tracker::from_config(config)?;
    let report = match tracker.run(Utc::now()).await {
        Ok(report) => report,
        Err(e) => {
            logging::log_error("실행 중단", &e);
            return Err(e.into());
        }
    };

    log::info!(
        "실행 완료 - 샘플: {} - 현재가: {:.2} - 교차: {} - 알림 성공: {}",
        report.samples,
        report.artifact.meta.current_price,
        report.events.len(),
        report.outcomes.iter().filter(|o| o.is_delivered()).count(),
    );

    Ok(())
}
