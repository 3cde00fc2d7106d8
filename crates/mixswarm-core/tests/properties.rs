use mixswarm::core::benchmarks::Benchmark;
use mixswarm::core::bounds::{BoundHandling, Clamp};
use mixswarm::core::models::space::{SearchSpace, SearchSpaceBuilder};
use mixswarm::core::objective::{Candidate, Direction, Objective};
use mixswarm::engine::config::{OptimizerConfigBuilder, Propagation, VelocityCoefficients};
use mixswarm::engine::progress::ProgressReporter;
use mixswarm::engine::swarm::Swarm;
use mixswarm::workflows::optimize;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn mixed_space() -> SearchSpace {
    SearchSpaceBuilder::new()
        .continuous("x", -5.12, 5.12)
        .continuous("y", -5.12, 5.12)
        .integer("n", -3, 3)
        .categorical("c", [0.5, 1.5, 2.5])
        .binary("b")
        .build()
        .unwrap()
}

fn fitness_at<O: Objective>(space: &SearchSpace, objective: &O, position: &[f64]) -> f64 {
    objective
        .evaluate(&Candidate::new(space, position))
        .expect("benchmark is feasible everywhere in the space")
}

#[test]
fn incumbent_fitness_is_monotone_in_both_directions() {
    let space = mixed_space();
    for (direction, propagation) in [
        (Direction::Minimize, Propagation::Synchronous),
        (Direction::Minimize, Propagation::Asynchronous),
        (Direction::Maximize, Propagation::Synchronous),
        (Direction::Maximize, Propagation::Asynchronous),
    ] {
        let config = OptimizerConfigBuilder::new()
            .seed(31)
            .swarm_size(8)
            .max_iterations(40)
            .direction(direction)
            .propagation(propagation)
            .build()
            .unwrap();
        let result =
            optimize::run(&space, &Benchmark::Rastrigin, &config, &ProgressReporter::new()).unwrap();

        let fitnesses: Vec<f64> = result
            .history
            .iter()
            .map(|r| r.incumbent_fitness.unwrap())
            .collect();
        for pair in fitnesses.windows(2) {
            assert!(
                !direction.is_better(pair[0], pair[1]),
                "{} incumbent regressed from {} to {}",
                direction,
                pair[0],
                pair[1]
            );
        }
    }
}

#[test]
fn every_policy_keeps_positions_in_domain_through_a_run() {
    let space = mixed_space();
    let coefficients = VelocityCoefficients {
        inertia: 1.2,
        local_acceleration: 2.5,
        global_acceleration: 2.5,
    };
    for handling in [BoundHandling::Clamp, BoundHandling::Resample] {
        let mut rng = StdRng::seed_from_u64(13);
        let mut swarm = Swarm::new(&space, Direction::Minimize, handling.enforcer());
        swarm.initialise(10, &mut rng).unwrap();
        swarm
            .evaluate(&Benchmark::Ackley, Propagation::Asynchronous)
            .unwrap();

        for _ in 0..30 {
            swarm.update_velocity(&coefficients, &mut rng).unwrap();
            swarm.update_position(&mut rng).unwrap();
            for particle in swarm.particles() {
                assert!(
                    space.contains(particle.position()),
                    "{} left the domain: {:?}",
                    handling,
                    particle.position()
                );
            }
            swarm
                .evaluate(&Benchmark::Ackley, Propagation::Synchronous)
                .unwrap();
        }
    }
}

#[test]
fn asynchronous_broadcast_is_the_best_ranked_position() {
    let space = mixed_space();
    // Infeasible whenever the flag is set, so most passes are partially infeasible.
    let flagged_sphere = |c: &Candidate| {
        if c.bit("b")? {
            None
        } else {
            Benchmark::Sphere.evaluate(c)
        }
    };
    let mut rng = StdRng::seed_from_u64(77);
    let mut swarm = Swarm::new(&space, Direction::Minimize, Box::new(Clamp));
    swarm.initialise(12, &mut rng).unwrap();
    let bootstrap = swarm
        .evaluate(&flagged_sphere, Propagation::Asynchronous)
        .unwrap();

    let mut partial_passes = usize::from(bootstrap.failed_evaluations > 0 && !bootstrap.all_failed());
    for _ in 0..20 {
        swarm
            .update_velocity(&VelocityCoefficients::default(), &mut rng)
            .unwrap();
        swarm.update_position(&mut rng).unwrap();
        let stats = swarm
            .evaluate(&flagged_sphere, Propagation::Asynchronous)
            .unwrap();
        if stats.failed_evaluations > 0 && !stats.all_failed() {
            partial_passes += 1;
        }

        let ranked = swarm.ranked_by_fitness();
        assert_eq!(ranked.len(), stats.evaluations - stats.failed_evaluations);
        for particle in &ranked {
            assert_eq!(particle.position()[4], 0.0, "a flagged particle was ranked");
        }
        let Some(best) = ranked.first() else {
            continue;
        };
        assert_eq!(swarm.iteration_best().map(|p| p.id()), Some(best.id()));
        for particle in swarm.particles() {
            assert_eq!(particle.informant_best(), best.position());
        }
    }
    assert!(partial_passes > 0);
}

#[test]
fn synchronous_informant_is_never_replaced_by_a_worse_position() {
    let space = mixed_space();
    let mut rng = StdRng::seed_from_u64(19);
    let mut swarm = Swarm::new(&space, Direction::Maximize, Box::new(Clamp));
    swarm.initialise(9, &mut rng).unwrap();
    swarm
        .evaluate(&Benchmark::Rosenbrock, Propagation::Asynchronous)
        .unwrap();

    let informant_fitness = |swarm: &Swarm| -> Vec<f64> {
        swarm
            .particles()
            .iter()
            .map(|p| fitness_at(&space, &Benchmark::Rosenbrock, p.informant_best()))
            .collect()
    };

    for _ in 0..15 {
        let before = informant_fitness(&swarm);
        swarm
            .update_velocity(&VelocityCoefficients::default(), &mut rng)
            .unwrap();
        swarm.update_position(&mut rng).unwrap();
        swarm
            .evaluate(&Benchmark::Rosenbrock, Propagation::Synchronous)
            .unwrap();
        let after = informant_fitness(&swarm);

        for (i, (old, new)) in before.iter().zip(&after).enumerate() {
            assert!(
                !Direction::Maximize.is_better(*old, *new),
                "particle {} informant fell from {} to {}",
                i + 1,
                old,
                new
            );
        }
    }
}
