//! Per-screen orchestration: detect, recognize, reconcile, caption, and
//! convert coordinates, with the model calls behind async traits.

mod config;
mod models;
mod pipeline;

pub use config::{DetectorConfig, OcrConfig, ParseConfig};
pub use models::{IconCaptioner, IconDetector, OcrEngine};
pub use pipeline::{ParseError, ParsedScreen, Pipeline};
