use std::fs;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Set up tracing output for the CLI: human-readable console lines plus a
/// daily-rotated JSON file under `logs/`. `RUST_LOG` overrides the default
/// info-level filter for this crate.
///
/// The returned guard owns the file writer's flush thread; hold it for the
/// life of the process or buffered log lines are lost on exit.
pub fn init_logging() -> WorkerGuard {
    let _ = fs::create_dir_all("logs");

    let file_appender = tracing_appender::rolling::daily("logs", "normalizer.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::from_default_env()
        .add_directive("cra_normalizer=info".parse().expect("valid directive"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().with_writer(file_writer))
        .with(fmt::layer().with_writer(std::io::stdout))
        .init();

    guard
}
