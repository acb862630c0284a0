use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::TrackerError;
use crate::models::artifact::Artifact;

/// 산출물 기록 인터페이스
pub trait ArtifactWriter: Send + Sync {
    fn write(&self, artifact: &Artifact) -> Result<(), TrackerError>;

    /// 기록 위치 (로그용)
    fn location(&self) -> String;
}

/// JSON 파일 기록기. 임시 파일에 쓴 뒤 rename으로 교체한다.
pub struct JsonFileWriter {
    path: PathBuf,
}

impl JsonFileWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileWriter { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "data.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ArtifactWriter for JsonFileWriter {
    fn write(&self, artifact: &Artifact) -> Result<(), TrackerError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let bytes = serde_json::to_vec(artifact)?;
        let tmp = self.temp_path();
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(&bytes)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// 메모리에 보관하는 기록기 (테스트, 드라이런용)
#[derive(Default)]
pub struct InMemoryArtifactWriter {
    written: Mutex<Vec<Artifact>>,
}

impl InMemoryArtifactWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<Artifact> {
        self.written.lock().ok().and_then(|w| w.last().cloned())
    }

    pub fn count(&self) -> usize {
        self.written.lock().map(|w| w.len()).unwrap_or(0)
    }
}

impl ArtifactWriter for InMemoryArtifactWriter {
    fn write(&self, artifact: &Artifact) -> Result<(), TrackerError> {
        self.written
            .lock()
            .map_err(|_| TrackerError::InvalidParameter("artifact store poisoned".to_string()))?
            .push(artifact.clone());
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::artifact::ArtifactMeta;
    use std::collections::BTreeMap;

    fn artifact(price: f64) -> Artifact {
        let mut indicators = BTreeMap::new();
        indicators.insert("ema9".to_string(), vec![Some(price)]);
        Artifact {
            dates: vec!["Jan 02, 2024, 10:00 AM".to_string()],
            prices: vec![price],
            indicators,
            meta: ArtifactMeta {
                current_price: price,
                price_change: 0.0,
                percent_change: Some(0.0),
                is_positive: true,
            },
        }
    }

    #[test]
    fn test_write_creates_dir_and_overwrites() {
        let dir = std::env::temp_dir().join(format!("tqqq-tracker-writer-{}", std::process::id()));
        let path = dir.join("public").join("data.json");
        let writer = JsonFileWriter::new(&path);

        writer.write(&artifact(10.5)).unwrap();
        writer.write(&artifact(11.25)).unwrap();

        let parsed: Artifact = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed, artifact(11.25));
        assert!(!writer.temp_path().exists());

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_temp_path_is_sibling() {
        let writer = JsonFileWriter::new("public/data.json");
        assert_eq!(writer.temp_path(), PathBuf::from("public/data.json.tmp"));
        assert_eq!(writer.location(), "public/data.json");
    }

    #[test]
    fn test_in_memory_writer() {
        let writer = InMemoryArtifactWriter::new();
        writer.write(&artifact(1.0)).unwrap();
        assert_eq!(writer.count(), 1);
        assert_eq!(writer.last().unwrap().prices, vec![1.0]);
    }
}
