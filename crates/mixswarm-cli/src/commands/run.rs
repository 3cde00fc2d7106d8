use crate::cli::RunArgs;
use crate::config::build_config;
use crate::error::Result;
use crate::report;
use crate::utils::progress::CliProgressHandler;
use mixswarm::{engine::progress::ProgressReporter, workflows};
use tracing::{info, warn};

pub fn run(args: RunArgs) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let app_config = build_config(&args.config, &args.overrides)?;
    info!(
        objective = %app_config.objective,
        variables = app_config.space.len(),
        "Configuration resolved."
    );

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("{}", report::format_settings(&app_config));
    println!("Starting optimization...");
    let result = workflows::optimize::run(
        &app_config.space,
        &app_config.objective,
        &app_config.optimizer,
        &reporter,
    )?;

    if result.incumbent.is_none() {
        warn!("Optimization finished without a single feasible evaluation.");
    }
    println!("{}", report::format_summary(&result));

    if let Some(path) = &args.history {
        report::write_history(path, &app_config.space, &result.history)?;
        println!("History written to: {}", path.display());
    }

    Ok(())
}
