use crate::error::{CliError, Result};
use mixswarm::core::bounds::BoundHandling;
use mixswarm::core::models::variable::VariableDeclaration;
use mixswarm::core::objective::Direction;
use mixswarm::engine::config::Propagation;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileOptimizationConfig {
    pub seed: Option<u64>,
    pub swarm_size: Option<usize>,
    pub max_iterations: Option<usize>,
    pub direction: Option<Direction>,
    pub propagation: Option<Propagation>,
    pub inertia: Option<f64>,
    pub local_acceleration: Option<f64>,
    pub global_acceleration: Option<f64>,
    pub bound_handling: Option<BoundHandling>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    pub objective: Option<String>,
    pub optimization: Option<FileOptimizationConfig>,
    #[serde(default)]
    pub variables: Vec<VariableDeclaration>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_str_with_path(&content, path)
    }

    fn from_str_with_path(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn full_file_parses() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("run.toml");
        fs::write(
            &path,
            r#"
            objective = "rastrigin"

            [optimization]
            seed = 42
            swarm-size = 20
            max-iterations = 100
            direction = "maximize"
            propagation = "asynchronous"
            inertia = 0.6
            local-acceleration = 1.2
            global-acceleration = 1.8
            bound-handling = "resample"

            [[variables]]
            name = "x"
            type = "continuous"
            lower = -5.0
            upper = 5.0

            [[variables]]
            name = "shape"
            type = "categorical"
            values = ["circle", "square"]
            "#,
        )
        .unwrap();

        let config = FileConfig::from_file(&path).unwrap();
        let opt = config.optimization.unwrap();

        assert_eq!(config.objective.as_deref(), Some("rastrigin"));
        assert_eq!(opt.seed, Some(42));
        assert_eq!(opt.swarm_size, Some(20));
        assert_eq!(opt.direction, Some(Direction::Maximize));
        assert_eq!(opt.propagation, Some(Propagation::Asynchronous));
        assert_eq!(opt.bound_handling, Some(BoundHandling::Resample));
        assert_eq!(opt.global_acceleration, Some(1.8));
        assert_eq!(config.variables.len(), 2);
        assert_eq!(config.variables[1].kind, "categorical");
    }

    #[test]
    fn unknown_keys_are_rejected_with_path() {
        let path = Path::new("bad.toml");
        let result = FileConfig::from_str_with_path("[optimization]\nswarm_size = 3\n", path);
        match result {
            Err(CliError::FileParsing { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected a parsing error, got {:?}", other),
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let result = FileConfig::from_file(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
