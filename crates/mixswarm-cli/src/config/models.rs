use mixswarm::core::benchmarks::Benchmark;
use mixswarm::core::models::space::SearchSpace;
use mixswarm::engine::config::OptimizerConfig;

pub struct AppConfig {
    pub objective: Benchmark,
    pub space: SearchSpace,
    pub optimizer: OptimizerConfig,
}
