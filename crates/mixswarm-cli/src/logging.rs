use crate::error::{CliError, Result};
use std::fs::File;
use std::path::PathBuf;
use tracing_subscriber::{
    filter::{LevelFilter, Targets},
    fmt::{self, format::FmtSpan},
    prelude::*,
};

/// Target shared by the optimizer library and this binary.
const CRATE_TARGET: &str = "mixswarm";

fn level_filter(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        LevelFilter::ERROR
    } else {
        match verbosity {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}

/// `-v` raises only the optimizer's own events; dependencies stay at WARN unless
/// `--quiet` lowers everything to ERROR.
fn log_targets(verbosity: u8, quiet: bool) -> Targets {
    let level = level_filter(verbosity, quiet);
    Targets::new()
        .with_default(level.min(LevelFilter::WARN))
        .with_target(CRATE_TARGET, level)
}

pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<PathBuf>) -> Result<()> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .compact();

    let subscriber = tracing_subscriber::registry()
        .with(log_targets(verbosity, quiet))
        .with(stderr_layer);

    if let Some(path) = log_file {
        let file = File::create(&path).map_err(CliError::Io)?;

        // Span close events record how long each workflow phase took.
        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_thread_ids(true)
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE);

        subscriber.with(file_layer).init();
    } else {
        subscriber.init();
    }

    Ok(())
}
