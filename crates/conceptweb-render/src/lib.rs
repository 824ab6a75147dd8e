#![forbid(unsafe_code)]

pub mod config;
pub mod geom;
pub mod model;
pub mod network;
pub mod svg;
pub mod text;
pub mod timeline;

use crate::config::DiagramConfig;
use crate::text::{DeterministicTextMeasurer, TextMeasurer};
use std::path::PathBuf;
use std::sync::Arc;

pub use network::layout_network;
pub use timeline::layout_timeline;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("nothing to lay out: no {what}")]
    EmptyDataset { what: &'static str },
    #[error("cannot scale by a maximum {what} of zero")]
    ZeroScale { what: &'static str },
    #[error("invalid config: {message}")]
    Config { message: String },
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone)]
pub struct LayoutOptions {
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
    pub config: DiagramConfig,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            text_measurer: Arc::new(DeterministicTextMeasurer::default()),
            config: DiagramConfig::default(),
        }
    }
}

impl LayoutOptions {
    pub fn with_config(config: DiagramConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }
}
