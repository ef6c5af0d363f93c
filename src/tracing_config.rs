//! Tracing configuration for debugging member resolution.
//!
//! Supports three output formats controlled by `BRIDGECK_LOG_FORMAT`:
//!
//! - `text` (default): flat `tracing-subscriber` lines
//! - `tree`: indented span hierarchy via `tracing-tree`
//! - `json`: one JSON object per span/event
//!
//! ## Quick start
//!
//! ```bash
//! # Follow flattening and bridge construction as a tree
//! BRIDGECK_LOG=debug BRIDGECK_LOG_FORMAT=tree cargo test scenario
//!
//! # Per-edge flattening and per-call-site rejections
//! BRIDGECK_LOG="bridgeck_solver=trace,bridgeck_checker=debug" cargo test
//! ```
//!
//! Nothing is installed unless `BRIDGECK_LOG` (or `RUST_LOG`) is set.

use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Tree,
    Json,
}

impl LogFormat {
    /// Parse a `BRIDGECK_LOG_FORMAT` value. Unknown values fall back to text.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var("BRIDGECK_LOG_FORMAT").unwrap_or_default())
    }
}

/// `BRIDGECK_LOG` takes precedence over `RUST_LOG`.
fn build_filter() -> EnvFilter {
    if let Ok(val) = std::env::var("BRIDGECK_LOG") {
        EnvFilter::builder().parse_lossy(val)
    } else {
        EnvFilter::from_default_env()
    }
}

/// Install the global subscriber, writing to stderr.
///
/// A no-op when neither variable is set. Safe to call more than once: a
/// second call leaves the first subscriber in place.
pub fn init_tracing() {
    if std::env::var("BRIDGECK_LOG").is_err() && std::env::var("RUST_LOG").is_err() {
        return;
    }

    let filter = build_filter();
    let format = LogFormat::from_env();
    match format {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_targets(true);
            let _ = Registry::default().with(filter).with(tree_layer).try_init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);
            let _ = Registry::default().with(filter).with(json_layer).try_init();
        }
        LogFormat::Text => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init();
        }
    }
    debug!(?format, "tracing initialized");
}
