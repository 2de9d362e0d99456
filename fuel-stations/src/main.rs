use std::process::ExitCode;

use fuel_stations::pipeline::{PipelineConfig, run};
use tracing::error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config = PipelineConfig::default();

    match run(&config).await {
        Ok(summary) => {
            println!(
                "Saved {} of {} stations to {}",
                summary.stats.emitted,
                summary.stats.processed,
                summary.output_path.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
