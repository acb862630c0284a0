use std::time::Duration;

use async_trait::async_trait;

use crate::config::NotificationConfig;
use crate::notify::{DeliveryOutcome, Notification, Notifier};

/// ntfy 형식 푸시 알림기: `{base_url}/{topic}`에 본문을 POST
pub struct NtfyNotifier {
    enabled: bool,
    endpoint: String,
    http: reqwest::Client,
}

impl NtfyNotifier {
    pub fn new(base_url: &str, topic: &str, timeout_ms: Option<u64>, enabled: bool) -> Self {
        let mut builder = reqwest::Client::builder();
        if let Some(ms) = timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        let http = builder.build().unwrap_or_else(|e| {
            log::warn!("알림 HTTP 클라이언트 설정 실패, 기본값 사용: {}", e);
            reqwest::Client::new()
        });

        NtfyNotifier {
            enabled,
            endpoint: format!("{}/{}", base_url.trim_end_matches('/'), topic),
            http,
        }
    }

    pub fn from_config(config: &NotificationConfig) -> Self {
        Self::new(&config.base_url, &config.topic, config.timeout_ms, config.enabled)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Notifier for NtfyNotifier {
    async fn deliver(&self, notification: &Notification) -> DeliveryOutcome {
        if !self.enabled {
            log::debug!("알림 비활성화: {}", notification.title);
            return DeliveryOutcome::Skipped;
        }

        let mut request = self.http
            .post(&self.endpoint)
            .header("Title", notification.title.as_str())
            .header("Tags", notification.tags.join(","))
            .body(notification.body.clone());
        if let Some(priority) = &notification.priority {
            request = request.header("Priority", priority.as_str());
        }

        match request.send().await {
            Ok(res) if res.status().is_success() => {
                log::info!("알림 전송 완료: {}", notification.title);
                DeliveryOutcome::Delivered
            }
            Ok(res) => {
                let reason = format!("notification rejected: {}", res.status());
                log::warn!("알림 전송 실패 - {}: {}", notification.title, reason);
                DeliveryOutcome::Failed(reason)
            }
            Err(e) => {
                let reason = format!("notification http error: {}", e);
                log::warn!("알림 전송 실패 - {}: {}", notification.title, reason);
                DeliveryOutcome::Failed(reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification() -> Notification {
        Notification {
            title: "TQQQ Bullish Crossover".to_string(),
            body: "EMA9 crossed above EMA12".to_string(),
            tags: vec!["bullish".to_string()],
            priority: None,
        }
    }

    #[test]
    fn test_endpoint() {
        let notifier = NtfyNotifier::new("https://ntfy.sh/", "tqqq-alerts", None, true);
        assert_eq!(notifier.endpoint(), "https://ntfy.sh/tqqq-alerts");
    }

    #[tokio::test]
    async fn test_disabled_is_skipped() {
        let notifier = NtfyNotifier::new("https://ntfy.sh", "tqqq", None, false);
        assert_eq!(notifier.deliver(&notification()).await, DeliveryOutcome::Skipped);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_fails_without_panicking() {
        // 포트 1은 닫혀 있어 즉시 연결 실패
        let notifier = NtfyNotifier::new("http://127.0.0.1:1", "tqqq", Some(2000), true);
        let outcome = notifier.deliver(&notification()).await;
        assert!(matches!(outcome, DeliveryOutcome::Failed(_)));
    }
}
