use crate::config::AppConfig;
use crate::error::Result;
use mixswarm::core::models::space::SearchSpace;
use mixswarm::engine::state::{IterationRecord, OptimizationResult};
use std::fmt::Write as _;
use std::path::Path;
use tracing::info;

const HISTORY_COLUMNS: [&str; 5] = [
    "iteration",
    "evaluations",
    "failed_evaluations",
    "iteration_best",
    "incumbent",
];

fn history_row(record: &IterationRecord, names: &[&str]) -> Vec<String> {
    let fitness = |value: Option<f64>| value.map(|f| f.to_string()).unwrap_or_default();
    let mut row = vec![
        record.iteration.to_string(),
        record.evaluations.to_string(),
        record.failed_evaluations.to_string(),
        fitness(record.iteration_best_fitness),
        fitness(record.incumbent_fitness),
    ];
    row.extend(names.iter().map(|name| {
        record
            .iteration_best_assignment
            .iter()
            .flatten()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value.to_string())
            .unwrap_or_default()
    }));
    row
}

/// Renders the outcome of a run as human-readable text.
pub fn format_summary(result: &OptimizationResult) -> String {
    let mut out = String::new();
    let stats = &result.statistics;

    match &result.incumbent {
        Some(best) => {
            let _ = writeln!(
                out,
                "Best fitness: {:.6} (particle {})",
                best.fitness, best.particle_id
            );
            for (name, value) in &best.assignment {
                let _ = writeln!(out, "  {} = {}", name, value);
            }
        }
        None => {
            let _ = writeln!(out, "No feasible solution was found.");
        }
    }

    let _ = write!(
        out,
        "Iterations: {}, evaluations: {} ({} failed), infeasible generations: {}",
        stats.iterations, stats.evaluations, stats.failed_evaluations, stats.infeasible_generations
    );
    out
}

/// Renders the run parameters a configuration resolves to.
pub fn format_settings(app_config: &AppConfig) -> String {
    let AppConfig {
        objective,
        space,
        optimizer: config,
    } = app_config;
    let mut out = String::new();

    let _ = writeln!(out, "Objective: {}", objective);
    let _ = writeln!(out, "Search space ({} variables):", space.len());
    for variable in space.variables() {
        let _ = write!(out, "  {:<16} {:<12}", variable.name(), variable.variable_type().as_str());
        if let Some(levels) = variable.levels() {
            let joined: Vec<String> = levels.iter().map(ToString::to_string).collect();
            let _ = writeln!(out, "{{{}}}", joined.join(", "));
        } else {
            match (variable.lower_bound(), variable.upper_bound()) {
                (Some(lower), Some(upper)) => {
                    let _ = writeln!(out, "[{}, {}]", lower, upper);
                }
                _ => {
                    let _ = writeln!(out);
                }
            }
        }
    }

    let seed = config
        .seed
        .map_or_else(|| "entropy".to_string(), |s| s.to_string());
    let _ = writeln!(out, "Optimizer:");
    let _ = writeln!(out, "  swarm size       {}", config.swarm_size);
    let _ = writeln!(out, "  max iterations   {}", config.max_iterations);
    let _ = writeln!(out, "  direction        {}", config.direction);
    let _ = writeln!(out, "  propagation      {}", config.propagation);
    let _ = writeln!(
        out,
        "  coefficients     w={} c1={} c2={}",
        config.coefficients.inertia,
        config.coefficients.local_acceleration,
        config.coefficients.global_acceleration
    );
    let _ = writeln!(out, "  bound handling   {}", config.bound_handling);
    let _ = write!(out, "  seed             {}", seed);
    out
}

/// Writes one CSV row per evaluation pass, bootstrap included. The iteration-best
/// position follows the counters, one column per variable in search-space order.
pub fn write_history(path: &Path, space: &SearchSpace, history: &[IterationRecord]) -> Result<()> {
    let names: Vec<&str> = space.names().collect();
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(HISTORY_COLUMNS.iter().chain(&names))?;
    for record in history {
        writer.write_record(history_row(record, &names))?;
    }
    writer.flush()?;
    info!(rows = history.len(), "History written to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mixswarm::core::benchmarks::Benchmark;
    use mixswarm::core::models::level::Level;
    use mixswarm::core::models::particle::ParticleId;
    use mixswarm::core::models::space::SearchSpaceBuilder;
    use mixswarm::core::objective::Direction;
    use mixswarm::engine::config::OptimizerConfigBuilder;
    use mixswarm::engine::state::{Assignment, Incumbent, RunStatistics};
    use tempfile::tempdir;

    fn record(iteration: usize, best: Option<(f64, Vec<(String, Assignment)>)>) -> IterationRecord {
        let fitness = best.as_ref().map(|(f, _)| *f);
        IterationRecord {
            iteration,
            evaluations: 4,
            failed_evaluations: if best.is_some() { 0 } else { 4 },
            iteration_best_fitness: fitness,
            iteration_best_assignment: best.map(|(_, assignment)| assignment),
            incumbent_fitness: fitness,
        }
    }

    #[test]
    fn summary_lists_the_incumbent_assignment() {
        let result = OptimizationResult {
            incumbent: Some(Incumbent {
                particle_id: ParticleId(3),
                fitness: 0.5,
                assignment: vec![
                    ("x".to_string(), Assignment::Continuous(1.25)),
                    ("flag".to_string(), Assignment::Binary(true)),
                ],
                coordinates: vec![1.25, 1.0],
            }),
            statistics: RunStatistics {
                iterations: 10,
                evaluations: 44,
                failed_evaluations: 2,
                infeasible_generations: 0,
            },
            history: Vec::new(),
        };

        let text = format_summary(&result);

        assert!(text.contains("Best fitness: 0.500000 (particle 3)"));
        assert!(text.contains("  x = 1.25"));
        assert!(text.contains("  flag = 1"));
        assert!(text.contains("evaluations: 44 (2 failed)"));
    }

    #[test]
    fn summary_without_incumbent_says_so() {
        let result = OptimizationResult {
            incumbent: None,
            statistics: RunStatistics::default(),
            history: Vec::new(),
        };
        assert!(format_summary(&result).contains("No feasible solution"));
    }

    #[test]
    fn settings_describe_every_variable() {
        let space = SearchSpaceBuilder::new()
            .continuous("x", -1.0, 1.0)
            .categorical("shape", ["circle", "square"])
            .build()
            .unwrap();
        let config = OptimizerConfigBuilder::new()
            .swarm_size(8)
            .max_iterations(3)
            .direction(Direction::Maximize)
            .seed(11)
            .build()
            .unwrap();

        let app_config = AppConfig {
            objective: Benchmark::Ackley,
            space,
            optimizer: config,
        };

        let text = format_settings(&app_config);

        assert!(text.starts_with("Objective: ackley\n"));
        assert!(text.contains("Search space (2 variables):"));
        assert!(text.contains("[-1, 1]"));
        assert!(text.contains("{circle, square}"));
        assert!(text.contains("swarm size       8"));
        assert!(text.contains("seed             11"));
    }

    #[test]
    fn history_has_one_column_per_variable_in_space_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.csv");
        let space = SearchSpaceBuilder::new()
            .continuous("x", -5.0, 5.0)
            .categorical("shape", ["circle", "square"])
            .binary("on")
            .build()
            .unwrap();
        let best = vec![
            ("x".to_string(), Assignment::Continuous(0.5)),
            (
                "shape".to_string(),
                Assignment::Categorical(Level::from("square")),
            ),
            ("on".to_string(), Assignment::Binary(true)),
        ];

        write_history(&path, &space, &[record(0, None), record(1, Some((2.5, best)))]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines[0],
            "iteration,evaluations,failed_evaluations,iteration_best,incumbent,x,shape,on"
        );
        assert_eq!(lines[1], "0,4,4,,,,,");
        assert_eq!(lines[2], "1,4,0,2.5,2.5,0.5,square,1");
    }
}
