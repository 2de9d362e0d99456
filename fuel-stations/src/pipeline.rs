//! Fetch → transform → write, run once.

use std::path::PathBuf;

use tracing::info;

use crate::output::{DEFAULT_OUTPUT_PATH, OutputError, write_geojson};
use crate::source::{DocumentSource, FetchConfig, FetchError, Fetcher, HttpSource};
use crate::stations::{TransformStats, transform};

/// Configuration for a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// How to fetch the feed
    pub fetch: FetchConfig,
    /// Where to write the GeoJSON
    pub output_path: PathBuf,
}

impl PipelineConfig {
    /// Set the fetch configuration.
    pub fn with_fetch(mut self, fetch: FetchConfig) -> Self {
        self.fetch = fetch;
        self
    }

    /// Set the output path.
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

/// Errors that end a run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub stats: TransformStats,
    pub output_path: PathBuf,
}

/// Run the pipeline against the live HTTP feed.
pub async fn run(config: &PipelineConfig) -> Result<RunSummary, PipelineError> {
    let source = HttpSource::new(&config.fetch)?;
    info!(url = source.url(), "using price feed");
    run_with_source(source, config).await
}

/// Run the pipeline against any document source.
///
/// Nothing is written unless the fetch succeeds.
pub async fn run_with_source<S: DocumentSource>(
    source: S,
    config: &PipelineConfig,
) -> Result<RunSummary, PipelineError> {
    let document = Fetcher::new(source, &config.fetch).fetch().await?;

    let transformed = transform(&document);

    write_geojson(&transformed.collection, &config.output_path)?;
    info!(
        features = transformed.stats.emitted,
        path = %config.output_path.display(),
        "GeoJSON written"
    );

    Ok(RunSummary {
        stats: transformed.stats,
        output_path: config.output_path.clone(),
    })
}
