//! 실행 파이프라인

pub mod tracker;

pub use tracker::{RunReport, Tracker};
