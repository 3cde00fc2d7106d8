use crate::core::bounds::BoundEnforcer;
use crate::core::models::space::SearchSpace;
use crate::core::objective::Objective;
use crate::engine::config::{OptimizerConfig, Propagation};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::state::{
    Incumbent, IterationRecord, OptimizationResult, PassStatistics, RunStatistics,
    decode_assignment,
};
use crate::engine::swarm::Swarm;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, instrument, warn};

/// Drives one swarm from initialization to the end of its iteration budget.
pub struct Optimizer<'a, O: Objective + ?Sized> {
    space: &'a SearchSpace,
    objective: &'a O,
    config: &'a OptimizerConfig,
    enforcer: Box<dyn BoundEnforcer>,
}

impl<'a, O: Objective + ?Sized> Optimizer<'a, O> {
    /// Creates a driver using the bound-handling policy named in `config`.
    pub fn new(space: &'a SearchSpace, objective: &'a O, config: &'a OptimizerConfig) -> Self {
        Self {
            space,
            objective,
            config,
            enforcer: config.bound_handling.enforcer(),
        }
    }

    /// Replaces the configured bound-handling policy.
    pub fn with_bound_enforcer(mut self, enforcer: Box<dyn BoundEnforcer>) -> Self {
        self.enforcer = enforcer;
        self
    }

    /// Runs the full optimization. With a fixed seed the result is reproducible.
    #[instrument(skip_all, name = "optimization_workflow")]
    pub fn run(self, reporter: &ProgressReporter) -> Result<OptimizationResult, EngineError> {
        let config = self.config;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        // === Phase 1: Swarm initialization ===
        reporter.report(Progress::PhaseStart {
            name: "Initialization",
        });
        info!(
            variables = self.space.len(),
            swarm_size = config.swarm_size,
            max_iterations = config.max_iterations,
            direction = %config.direction,
            propagation = %config.propagation,
            "Initialising swarm."
        );
        let mut swarm = Swarm::new(self.space, config.direction, self.enforcer);
        swarm.initialise(config.swarm_size, &mut rng)?;
        reporter.report(Progress::PhaseFinish);

        let mut statistics = RunStatistics::default();
        let mut history = Vec::with_capacity(config.max_iterations + 1);

        // === Phase 2: Bootstrap evaluation ===
        // Always asynchronous so that every particle receives the same informant.
        reporter.report(Progress::PhaseStart { name: "Bootstrap" });
        let pass = swarm.evaluate(self.objective, Propagation::Asynchronous)?;
        record_pass(&swarm, 0, &pass, &mut statistics, &mut history);
        reporter.report(Progress::PhaseFinish);

        // === Phase 3: Iterations ===
        reporter.report(Progress::PhaseStart { name: "Iterations" });
        reporter.report(Progress::TaskStart {
            total_steps: config.max_iterations as u64,
        });
        for iteration in 1..=config.max_iterations {
            swarm.update_velocity(&config.coefficients, &mut rng)?;
            swarm.update_position(&mut rng)?;
            let pass = swarm.evaluate(self.objective, config.propagation)?;
            record_pass(&swarm, iteration, &pass, &mut statistics, &mut history);
            statistics.iterations = iteration;

            reporter.report(Progress::IterationFinished {
                iteration,
                incumbent: swarm.incumbent().and_then(|p| p.fitness()),
            });
            reporter.report(Progress::TaskIncrement);
        }
        reporter.report(Progress::TaskFinish);
        reporter.report(Progress::PhaseFinish);

        swarm.finish();

        let incumbent = swarm
            .incumbent()
            .and_then(|p| p.fitness().map(|f| Incumbent::from_particle(self.space, p, f)));

        match &incumbent {
            Some(best) => info!(
                particle = %best.particle_id,
                fitness = best.fitness,
                evaluations = statistics.evaluations,
                failed = statistics.failed_evaluations,
                "Optimization complete."
            ),
            None => warn!(
                evaluations = statistics.evaluations,
                "Optimization complete without a single feasible evaluation."
            ),
        }

        Ok(OptimizationResult {
            incumbent,
            statistics,
            history,
        })
    }
}

fn record_pass(
    swarm: &Swarm,
    iteration: usize,
    pass: &PassStatistics,
    statistics: &mut RunStatistics,
    history: &mut Vec<IterationRecord>,
) {
    statistics.record(pass);
    if pass.all_failed() {
        warn!(
            iteration,
            evaluations = pass.evaluations,
            "Every evaluation in this generation was infeasible."
        );
    }
    history.push(IterationRecord {
        iteration,
        evaluations: pass.evaluations,
        failed_evaluations: pass.failed_evaluations,
        iteration_best_fitness: swarm.iteration_best().and_then(|p| p.fitness()),
        iteration_best_assignment: swarm
            .iteration_best()
            .map(|p| decode_assignment(swarm.space(), p.position())),
        incumbent_fitness: swarm.incumbent().and_then(|p| p.fitness()),
    });
}

/// Runs a complete optimization with the bound-handling policy named in `config`.
pub fn run<O: Objective + ?Sized>(
    space: &SearchSpace,
    objective: &O,
    config: &OptimizerConfig,
    reporter: &ProgressReporter,
) -> Result<OptimizationResult, EngineError> {
    Optimizer::new(space, objective, config).run(reporter)
}
