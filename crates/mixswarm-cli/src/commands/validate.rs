use crate::cli::ValidateArgs;
use crate::config::build_config;
use crate::error::Result;
use crate::report;
use tracing::info;

pub fn run(args: ValidateArgs) -> Result<()> {
    let app_config = build_config(&args.config, &args.overrides)?;
    info!("Configuration {:?} is valid.", &args.config);

    println!("{}", report::format_settings(&app_config));
    Ok(())
}
