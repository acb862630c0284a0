/**
* filename : config
* author : HAMA
* date: 2025. 5. 8.
* description:
**/

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono_tz::Tz;

use crate::error::TrackerError;
use crate::indicators::{IndicatorKind, IndicatorSpec};
use crate::signals::change_summary::ReferenceMode;
use crate::signals::crossover::CrossoverPair;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub instrument: InstrumentConfig,
    pub fetch: FetchConfig,
    pub indicators: Vec<IndicatorSpec>,
    pub crossovers: Vec<CrossoverPair>,
    pub reference: ReferenceMode,
    pub output: OutputConfig,
    pub notification: NotificationConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstrumentConfig {
    pub symbol: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Yahoo,
    Csv,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    pub source: SourceKind,
    pub base_url: String,
    pub range: String,
    pub interval: String,
    pub reference_range: String,
    pub reference_interval: String,
    pub csv_path: Option<PathBuf>,
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    pub enabled: bool,
    pub base_url: String,
    pub topic: String,
    pub tags: Vec<String>,
    pub priority: Option<String>,
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub timezone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Config {
    /// Load configuration from `config.json` in the working directory
    pub fn load() -> Result<Self, TrackerError> {
        let config_path = Path::new("config.json");

        let mut cfg = if config_path.exists() {
            Self::read_file(config_path)?
        } else {
            Config::default()
        };
        cfg.apply_env_overrides();
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load configuration from an explicit path, without environment overrides
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, TrackerError> {
        let cfg = Self::read_file(path.as_ref())?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn read_file(path: &Path) -> Result<Self, TrackerError> {
        let mut file = File::open(path)
            .map_err(|e| TrackerError::Config(format!("Failed to open config file: {}", e)))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| TrackerError::Config(format!("Failed to read config file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| TrackerError::Config(format!("Failed to parse config file: {}", e)))
    }

    /// Apply environment variable overrides for runtime fields
    fn apply_env_overrides(&mut self) {
        use std::env;
        if let Ok(v) = env::var("TRACKER_SYMBOL") { if !v.is_empty() { self.instrument.symbol = v; } }
        if let Ok(v) = env::var("TRACKER_OUTPUT_PATH") { if !v.is_empty() { self.output.path = PathBuf::from(v); } }
        if let Ok(v) = env::var("NTFY_TOPIC") { if !v.is_empty() { self.notification.topic = v; } }
        if let Ok(v) = env::var("NTFY_BASE_URL") { if !v.is_empty() { self.notification.base_url = v; } }
        if let Ok(v) = env::var("NOTIFY_ENABLED") {
            let lower = v.to_lowercase();
            if ["1","true","yes"].contains(&lower.as_str()) { self.notification.enabled = true; }
            if ["0","false","no"].contains(&lower.as_str()) { self.notification.enabled = false; }
        }
    }

    /// Check indicator and crossover definitions for consistency
    pub fn validate(&self) -> Result<(), TrackerError> {
        if self.instrument.symbol.trim().is_empty() {
            return Err(TrackerError::Config("instrument symbol is empty".to_string()));
        }

        let mut names = HashSet::new();
        for spec in &self.indicators {
            if spec.window == 0 {
                return Err(TrackerError::Config(format!("indicator {} has a zero window", spec.name)));
            }
            if !names.insert(spec.name.as_str()) {
                return Err(TrackerError::Config(format!("duplicate indicator name: {}", spec.name)));
            }
            if ["dates", "prices", "meta"].contains(&spec.name.as_str()) {
                return Err(TrackerError::Config(format!("reserved indicator name: {}", spec.name)));
            }
        }

        for pair in &self.crossovers {
            for name in [&pair.fast, &pair.slow] {
                if !names.contains(name.as_str()) {
                    return Err(TrackerError::Config(format!("crossover references unknown indicator: {}", name)));
                }
            }
        }

        if self.fetch.source == SourceKind::Csv && self.fetch.csv_path.is_none() {
            return Err(TrackerError::Config("csv source requires fetch.csv_path".to_string()));
        }

        self.timezone()?;
        Ok(())
    }

    /// Display timezone used for chart labels
    pub fn timezone(&self) -> Result<Tz, TrackerError> {
        self.display.timezone.parse::<Tz>()
            .map_err(|e| TrackerError::Config(format!("Unknown timezone {}: {}", self.display.timezone, e)))
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            instrument: InstrumentConfig {
                symbol: "TQQQ".to_string(),
            },
            fetch: FetchConfig {
                source: SourceKind::Yahoo,
                base_url: "https://query1.finance.yahoo.com".to_string(),
                range: "60d".to_string(),
                interval: "15m".to_string(),
                reference_range: "5d".to_string(),
                reference_interval: "1d".to_string(),
                csv_path: None,
                timeout_ms: Some(10000),
            },
            indicators: vec![
                IndicatorSpec::new("sma50", IndicatorKind::Sma, 50),
                IndicatorSpec::new("sma100", IndicatorKind::Sma, 100),
                IndicatorSpec::new("ema9", IndicatorKind::Ema, 9),
                IndicatorSpec::new("ema12", IndicatorKind::Ema, 12),
            ],
            crossovers: vec![
                CrossoverPair::new("sma50", "sma100"),
                CrossoverPair::new("ema9", "ema12"),
            ],
            reference: ReferenceMode::PreviousPeriodClose,
            output: OutputConfig {
                path: PathBuf::from("public/data.json"),
            },
            notification: NotificationConfig {
                enabled: true,
                base_url: "https://ntfy.sh".to_string(),
                topic: "tqqq-tracker".to_string(),
                tags: vec!["tqqq".to_string()],
                priority: Some("high".to_string()),
                timeout_ms: Some(5000),
            },
            display: DisplayConfig {
                timezone: "America/New_York".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let cfg = Config::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.indicators.len(), 4);
        assert_eq!(cfg.crossovers.len(), 2);
    }

    #[test]
    fn test_unknown_crossover_indicator_rejected() {
        let mut cfg = Config::default();
        cfg.crossovers.push(CrossoverPair::new("ema9", "ema200"));
        assert!(matches!(cfg.validate(), Err(TrackerError::Config(_))));
    }

    #[test]
    fn test_duplicate_and_zero_window_rejected() {
        let mut cfg = Config::default();
        cfg.indicators.push(IndicatorSpec::new("ema9", IndicatorKind::Ema, 9));
        assert!(cfg.validate().is_err());

        let mut cfg = Config::default();
        cfg.indicators[0].window = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_bad_timezone_rejected() {
        let mut cfg = Config::default();
        cfg.display.timezone = "Mars/Olympus".to_string();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_config_json_roundtrip_shape() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("\"reference\":\"previous_period_close\""));
        assert!(json.contains("\"kind\":\"sma\""));
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.instrument.symbol, "TQQQ");
    }
}
