//! 교차 알림 전송
//!
//! 전송은 최선 노력(best-effort)이며 실패는 결과 값으로만 보고한다.

pub mod ntfy;

use std::sync::Mutex;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::Serialize;

use crate::signals::{CrossoverEvent, CrossoverKind};
use crate::utils::math::round2;

pub use ntfy::NtfyNotifier;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
    pub priority: Option<String>,
}

impl Notification {
    /// 교차 이벤트로 알림 메시지 구성
    pub fn from_event(symbol: &str, event: &CrossoverEvent, extra_tags: &[String]) -> Self {
        let (label, direction, tag) = match event.kind {
            CrossoverKind::Bullish => ("Bullish", "above", "chart_with_upwards_trend"),
            CrossoverKind::Bearish => ("Bearish", "below", "chart_with_downwards_trend"),
        };

        let mut tags = vec![tag.to_string(), event.kind.as_str().to_string()];
        tags.extend(extra_tags.iter().cloned());

        Notification {
            title: format!("{} {} Crossover", symbol, label),
            body: format!(
                "{} ({:.2}) crossed {} {} ({:.2})",
                event.fast_name.to_uppercase(),
                round2(event.fast_value),
                direction,
                event.slow_name.to_uppercase(),
                round2(event.slow_value),
            ),
            tags,
            priority: None,
        }
    }

    pub fn with_priority(mut self, priority: Option<String>) -> Self {
        self.priority = priority;
        self
    }
}

/// 전송 결과. 호출 측은 결과와 무관하게 계속 진행한다.
#[derive(Debug, Clone, PartialEq)]
pub enum DeliveryOutcome {
    Delivered,
    Failed(String),
    Skipped,
}

impl DeliveryOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryOutcome::Delivered)
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// 알림 한 건 전송. 오류를 던지지 않는다.
    async fn deliver(&self, notification: &Notification) -> DeliveryOutcome;
}

/// 전송 대신 메모리에 기록하는 알림기 (테스트, 드라이런용)
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn deliver(&self, notification: &Notification) -> DeliveryOutcome {
        match self.sent.lock() {
            Ok(mut sent) => {
                sent.push(notification.clone());
                DeliveryOutcome::Delivered
            }
            Err(_) => DeliveryOutcome::Failed("recording notifier poisoned".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(kind: CrossoverKind) -> CrossoverEvent {
        CrossoverEvent {
            kind,
            fast_name: "ema9".to_string(),
            slow_name: "ema12".to_string(),
            fast_value: 61.234,
            slow_value: 61.1,
        }
    }

    #[test]
    fn test_bullish_message() {
        let n = Notification::from_event("TQQQ", &event(CrossoverKind::Bullish), &["tqqq".to_string()]);

        assert_eq!(n.title, "TQQQ Bullish Crossover");
        assert_eq!(n.body, "EMA9 (61.23) crossed above EMA12 (61.10)");
        assert_eq!(n.tags, vec!["chart_with_upwards_trend", "bullish", "tqqq"]);
        assert_eq!(n.priority, None);
    }

    #[test]
    fn test_bearish_message() {
        let n = Notification::from_event("TQQQ", &event(CrossoverKind::Bearish), &[])
            .with_priority(Some("high".to_string()));

        assert_eq!(n.title, "TQQQ Bearish Crossover");
        assert!(n.body.contains("crossed below"));
        assert_eq!(n.tags[0], "chart_with_downwards_trend");
        assert_eq!(n.priority.as_deref(), Some("high"));
    }

    #[tokio::test]
    async fn test_recording_notifier() {
        let notifier = RecordingNotifier::new();
        let n = Notification::from_event("TQQQ", &event(CrossoverKind::Bullish), &[]);

        assert!(notifier.deliver(&n).await.is_delivered());
        assert_eq!(notifier.sent(), vec![n]);
    }
}
