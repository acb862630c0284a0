//! 산출물 기록

pub mod writer;

pub use writer::{ArtifactWriter, InMemoryArtifactWriter, JsonFileWriter};
