use mixswarm::core::benchmarks::Benchmark;
use mixswarm::core::bounds::BoundHandling;
use mixswarm::core::objective::Direction;
use mixswarm::engine::config::{
    DEFAULT_GLOBAL_ACCELERATION, DEFAULT_INERTIA, DEFAULT_LOCAL_ACCELERATION, Propagation,
};

pub struct DefaultsConfig {
    pub objective: Benchmark,
    pub swarm_size: usize,
    pub max_iterations: usize,
    pub direction: Direction,
    pub propagation: Propagation,
    pub inertia: f64,
    pub local_acceleration: f64,
    pub global_acceleration: f64,
    pub bound_handling: BoundHandling,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            objective: Benchmark::Sphere,
            swarm_size: 20,
            max_iterations: 100,
            direction: Direction::Minimize,
            propagation: Propagation::Synchronous,
            inertia: DEFAULT_INERTIA,
            local_acceleration: DEFAULT_LOCAL_ACCELERATION,
            global_acceleration: DEFAULT_GLOBAL_ACCELERATION,
            bound_handling: BoundHandling::Clamp,
        }
    }
}
