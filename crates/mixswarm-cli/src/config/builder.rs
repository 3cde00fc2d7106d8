use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::OverrideArgs;
use crate::error::{CliError, Result};
use crate::utils::parser::{self, ParseError};
use mixswarm::core::models::space::SearchSpace;
use mixswarm::engine::config::OptimizerConfigBuilder;
use mixswarm::engine::error::EngineError;
use std::path::Path;
use tracing::debug;

/// Merges command-line overrides, the configuration file and built-in defaults, in that
/// order of precedence.
pub fn build_config(config_path: &Path, overrides: &OverrideArgs) -> Result<AppConfig> {
    let file_config = FileConfig::from_file(config_path)?;
    merge(file_config, overrides)
}

fn merge(file_config: FileConfig, overrides: &OverrideArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();
    let mut file_config = apply_set_values(file_config, &overrides.set_values)?;

    let objective = match overrides.objective.as_deref().or(file_config.objective.as_deref()) {
        Some(name) => parser::parse_objective(name).map_err(|e| CliError::Argument(e.to_string()))?,
        None => defaults.objective,
    };

    if file_config.variables.is_empty() {
        return Err(CliError::Config(
            "At least one `[[variables]]` entry is required.".to_string(),
        ));
    }
    let space = SearchSpace::from_declarations(std::mem::take(&mut file_config.variables))
        .map_err(EngineError::from)?;
    debug!(variables = space.len(), "Search space built.");

    let opt_file = file_config.optimization.take().unwrap_or_default();

    let mut builder = OptimizerConfigBuilder::new()
        .swarm_size(
            overrides
                .swarm_size
                .or(opt_file.swarm_size)
                .unwrap_or(defaults.swarm_size),
        )
        .max_iterations(
            overrides
                .max_iterations
                .or(opt_file.max_iterations)
                .unwrap_or(defaults.max_iterations),
        )
        .direction(
            overrides
                .direction
                .map(Into::into)
                .or(opt_file.direction)
                .unwrap_or(defaults.direction),
        )
        .propagation(
            overrides
                .propagation
                .map(Into::into)
                .or(opt_file.propagation)
                .unwrap_or(defaults.propagation),
        )
        .inertia(opt_file.inertia.unwrap_or(defaults.inertia))
        .local_acceleration(
            opt_file
                .local_acceleration
                .unwrap_or(defaults.local_acceleration),
        )
        .global_acceleration(
            opt_file
                .global_acceleration
                .unwrap_or(defaults.global_acceleration),
        )
        .bound_handling(
            overrides
                .bound_handling
                .map(Into::into)
                .or(opt_file.bound_handling)
                .unwrap_or(defaults.bound_handling),
        );
    if let Some(seed) = overrides.seed.or(opt_file.seed) {
        builder = builder.seed(seed);
    }

    let optimizer = builder.build().map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        objective,
        space,
        optimizer,
    })
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let (key, value) =
            parser::parse_key_value(kv_pair).map_err(|e| CliError::Config(e.to_string()))?;
        let invalid = |e: ParseError| CliError::Config(e.to_string());

        if key == "objective" {
            config.objective = Some(value.to_string());
            continue;
        }

        let opt = config.optimization.get_or_insert_with(Default::default);
        match key {
            "optimization.seed" => {
                opt.seed = Some(parser::parse_scalar(key, value).map_err(invalid)?);
            }
            "optimization.swarm-size" => {
                opt.swarm_size = Some(parser::parse_scalar(key, value).map_err(invalid)?);
            }
            "optimization.max-iterations" => {
                opt.max_iterations = Some(parser::parse_scalar(key, value).map_err(invalid)?);
            }
            "optimization.inertia" => {
                opt.inertia = Some(parser::parse_scalar(key, value).map_err(invalid)?);
            }
            "optimization.local-acceleration" => {
                opt.local_acceleration = Some(parser::parse_scalar(key, value).map_err(invalid)?);
            }
            "optimization.global-acceleration" => {
                opt.global_acceleration =
                    Some(parser::parse_scalar(key, value).map_err(invalid)?);
            }
            "optimization.direction" => {
                opt.direction = Some(parser::parse_keyword(key, value).map_err(invalid)?);
            }
            "optimization.propagation" => {
                opt.propagation = Some(parser::parse_keyword(key, value).map_err(invalid)?);
            }
            "optimization.bound-handling" => {
                opt.bound_handling = Some(parser::parse_keyword(key, value).map_err(invalid)?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{DirectionArg, PropagationArg};
    use mixswarm::core::benchmarks::Benchmark;
    use mixswarm::core::bounds::BoundHandling;
    use mixswarm::core::objective::Direction;
    use mixswarm::engine::config::Propagation;
    use std::fs;
    use tempfile::tempdir;

    const VARIABLES: &str = r#"
        [[variables]]
        name = "x"
        type = "continuous"
        lower = -5.0
        upper = 5.0

        [[variables]]
        name = "n"
        type = "int"
        lower = 0
        upper = 8
    "#;

    fn write_config(dir: &Path, body: &str) -> std::path::PathBuf {
        let path = dir.join("run.toml");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn build_config_with_only_variables_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = write_config(dir.path(), VARIABLES);

        let app = build_config(&path, &OverrideArgs::default()).expect("build ok");
        let defaults = DefaultsConfig::default();

        assert_eq!(app.objective, defaults.objective);
        assert_eq!(app.space.len(), 2);
        assert_eq!(app.optimizer.seed, None);
        assert_eq!(app.optimizer.swarm_size, defaults.swarm_size);
        assert_eq!(app.optimizer.max_iterations, defaults.max_iterations);
        assert_eq!(app.optimizer.direction, defaults.direction);
        assert_eq!(app.optimizer.propagation, defaults.propagation);
        assert_eq!(app.optimizer.coefficients.inertia, defaults.inertia);
        assert_eq!(app.optimizer.bound_handling, defaults.bound_handling);
    }

    #[test]
    fn build_config_reads_file_values() {
        let dir = tempdir().unwrap();
        let body = format!(
            r#"
            objective = "ackley"

            [optimization]
            seed = 5
            swarm-size = 12
            max-iterations = 40
            direction = "maximize"
            propagation = "asynchronous"
            inertia = 0.5
            bound-handling = "resample"
            {}"#,
            VARIABLES
        );
        let path = write_config(dir.path(), &body);

        let app = build_config(&path, &OverrideArgs::default()).expect("build ok");

        assert_eq!(app.objective, Benchmark::Ackley);
        assert_eq!(app.optimizer.seed, Some(5));
        assert_eq!(app.optimizer.swarm_size, 12);
        assert_eq!(app.optimizer.max_iterations, 40);
        assert_eq!(app.optimizer.direction, Direction::Maximize);
        assert_eq!(app.optimizer.propagation, Propagation::Asynchronous);
        assert_eq!(app.optimizer.coefficients.inertia, 0.5);
        assert_eq!(app.optimizer.bound_handling, BoundHandling::Resample);
    }

    #[test]
    fn cli_overrides_file_values() {
        let dir = tempdir().unwrap();
        let body = format!(
            "objective = \"sphere\"\n[optimization]\nseed = 1\nswarm-size = 4\n{}",
            VARIABLES
        );
        let path = write_config(dir.path(), &body);
        let overrides = OverrideArgs {
            objective: Some("rosenbrock".to_string()),
            seed: Some(77),
            swarm_size: Some(30),
            direction: Some(DirectionArg::Maximize),
            propagation: Some(PropagationArg::Asynchronous),
            ..Default::default()
        };

        let app = build_config(&path, &overrides).expect("build ok");

        assert_eq!(app.objective, Benchmark::Rosenbrock);
        assert_eq!(app.optimizer.seed, Some(77));
        assert_eq!(app.optimizer.swarm_size, 30);
        assert_eq!(app.optimizer.direction, Direction::Maximize);
        assert_eq!(app.optimizer.propagation, Propagation::Asynchronous);
    }

    #[test]
    fn set_values_override_file_values() {
        let dir = tempdir().unwrap();
        let body = format!("[optimization]\ninertia = 0.9\n{}", VARIABLES);
        let path = write_config(dir.path(), &body);
        let overrides = OverrideArgs {
            set_values: vec![
                "optimization.inertia=0.25".to_string(),
                "optimization.max-iterations=7".to_string(),
                "optimization.bound-handling=resample".to_string(),
                "objective=rastrigin".to_string(),
            ],
            ..Default::default()
        };

        let app = build_config(&path, &overrides).expect("build ok");

        assert!((app.optimizer.coefficients.inertia - 0.25).abs() < 1e-12);
        assert_eq!(app.optimizer.max_iterations, 7);
        assert_eq!(app.optimizer.bound_handling, BoundHandling::Resample);
        assert_eq!(app.objective, Benchmark::Rastrigin);
    }

    #[test]
    fn unsupported_set_key_is_rejected() {
        let config = FileConfig::default();
        let result = apply_set_values(config, &["optimization.speed=3".to_string()]);
        assert!(matches!(result, Err(CliError::Config(msg)) if msg.contains("optimization.speed")));
    }

    #[test]
    fn malformed_set_value_is_rejected() {
        let config = FileConfig::default();
        let result = apply_set_values(config, &["optimization.swarm-size=many".to_string()]);
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn missing_variables_are_a_config_error() {
        let dir = tempdir().unwrap();
        let path = write_config(dir.path(), "objective = \"sphere\"\n");
        let result = build_config(&path, &OverrideArgs::default());
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn invalid_variable_declaration_surfaces_as_core_error() {
        let dir = tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "[[variables]]\nname = \"t\"\ntype = \"complex\"\n",
        );
        let result = build_config(&path, &OverrideArgs::default());
        assert!(matches!(result, Err(CliError::Core(_))));
    }

    #[test]
    fn zero_swarm_size_is_a_config_error() {
        let dir = tempdir().unwrap();
        let path = write_config(dir.path(), VARIABLES);
        let overrides = OverrideArgs {
            swarm_size: Some(0),
            ..Default::default()
        };
        let result = build_config(&path, &overrides);
        assert!(matches!(result, Err(CliError::Config(msg)) if msg.contains("swarm_size")));
    }

    #[test]
    fn unknown_objective_is_an_argument_error() {
        let dir = tempdir().unwrap();
        let path = write_config(dir.path(), VARIABLES);
        let overrides = OverrideArgs {
            objective: Some("booth".to_string()),
            ..Default::default()
        };
        let result = build_config(&path, &overrides);
        assert!(matches!(result, Err(CliError::Argument(_))));
    }
}
