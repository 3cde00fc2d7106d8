use super::config::{Propagation, VelocityCoefficients};
use super::error::SwarmError;
use super::sampling::{sample_position, sample_velocity};
use super::state::PassStatistics;
use crate::core::bounds::BoundEnforcer;
use crate::core::models::particle::{Particle, ParticleId};
use crate::core::models::space::SearchSpace;
use crate::core::models::variable::Domain;
use crate::core::objective::{Candidate, Direction, Objective};
use rand::Rng;
use tracing::{debug, instrument, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwarmPhase {
    Unpopulated,
    Initialized,
    Bootstrapped,
    Iterating,
    Done,
}

impl SwarmPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SwarmPhase::Unpopulated => "unpopulated",
            SwarmPhase::Initialized => "initialized",
            SwarmPhase::Bootstrapped => "bootstrapped",
            SwarmPhase::Iterating => "iterating",
            SwarmPhase::Done => "done",
        }
    }
}

/// The particle population and its best-tracking state.
///
/// The swarm moves through [`SwarmPhase`]s: it is populated once by
/// [`initialise`](Swarm::initialise), bootstrapped by its first
/// [`evaluate`](Swarm::evaluate) pass, and only then accepts velocity updates.
pub struct Swarm<'a> {
    space: &'a SearchSpace,
    direction: Direction,
    enforcer: Box<dyn BoundEnforcer>,
    particles: Vec<Particle>,
    /// Per particle, whether its evaluation in the latest pass succeeded.
    succeeded: Vec<bool>,
    iteration_best: Option<Particle>,
    incumbent: Option<Particle>,
    total_evaluations: usize,
    total_failed_evaluations: usize,
    phase: SwarmPhase,
}

impl<'a> Swarm<'a> {
    pub fn new(space: &'a SearchSpace, direction: Direction, enforcer: Box<dyn BoundEnforcer>) -> Self {
        Self {
            space,
            direction,
            enforcer,
            particles: Vec::new(),
            succeeded: Vec::new(),
            iteration_best: None,
            incumbent: None,
            total_evaluations: 0,
            total_failed_evaluations: 0,
            phase: SwarmPhase::Unpopulated,
        }
    }

    pub fn space(&self) -> &'a SearchSpace {
        self.space
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn phase(&self) -> SwarmPhase {
        self.phase
    }

    pub fn size(&self) -> usize {
        self.particles.len()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.iter().find(|p| p.id() == id)
    }

    /// Best particle of the most recent pass that had a successful evaluation.
    pub fn iteration_best(&self) -> Option<&Particle> {
        self.iteration_best.as_ref()
    }

    /// Best particle state seen over the whole run.
    pub fn incumbent(&self) -> Option<&Particle> {
        self.incumbent.as_ref()
    }

    pub fn total_evaluations(&self) -> usize {
        self.total_evaluations
    }

    pub fn total_failed_evaluations(&self) -> usize {
        self.total_failed_evaluations
    }

    /// Particles evaluated successfully in the latest pass, best first. Ties keep
    /// insertion order.
    pub fn ranked_by_fitness(&self) -> Vec<&Particle> {
        self.ranked_indices()
            .into_iter()
            .map(|i| &self.particles[i])
            .collect()
    }

    fn ranked_indices(&self) -> Vec<usize> {
        let mut ranked: Vec<(usize, f64)> = self
            .particles
            .iter()
            .enumerate()
            .filter(|(i, _)| self.succeeded[*i])
            .filter_map(|(i, p)| p.fitness().map(|fitness| (i, fitness)))
            .collect();
        ranked.sort_by(|a, b| self.direction.compare(a.1, b.1));
        ranked.into_iter().map(|(i, _)| i).collect()
    }

    #[instrument(level = "debug", skip_all, fields(size = size))]
    pub fn initialise(&mut self, size: usize, rng: &mut impl Rng) -> Result<(), SwarmError> {
        self.require_phase(SwarmPhase::Unpopulated, "initialise")?;
        if size == 0 {
            return Err(SwarmError::EmptySwarm);
        }

        self.particles = (1..=size)
            .map(|id| {
                let mut position = sample_position(self.space, rng);
                self.enforcer
                    .enforce_position(self.space, &mut position, &mut *rng);
                let velocity = sample_velocity(self.space, rng);
                Particle::new(ParticleId(id as u32), position, velocity)
            })
            .collect();
        self.succeeded = vec![false; size];

        self.phase = SwarmPhase::Initialized;
        debug!(size, "Swarm initialised.");
        Ok(())
    }

    /// Evaluates every particle once and propagates the best positions found.
    #[instrument(level = "debug", skip_all, fields(propagation = %propagation))]
    pub fn evaluate<O: Objective + ?Sized>(
        &mut self,
        objective: &O,
        propagation: Propagation,
    ) -> Result<PassStatistics, SwarmError> {
        self.require_populated("evaluate")?;
        self.succeeded.fill(false);

        let stats = match propagation {
            Propagation::Synchronous => self.evaluate_synchronous(objective),
            Propagation::Asynchronous => self.evaluate_asynchronous(objective),
        };

        self.total_evaluations += stats.evaluations;
        self.total_failed_evaluations += stats.failed_evaluations;
        if self.phase == SwarmPhase::Initialized {
            self.phase = SwarmPhase::Bootstrapped;
        }

        debug!(
            evaluations = stats.evaluations,
            failed = stats.failed_evaluations,
            iteration_best = ?self.iteration_best.as_ref().and_then(Particle::fitness),
            "Evaluation pass complete."
        );
        Ok(stats)
    }

    fn evaluate_synchronous<O: Objective + ?Sized>(&mut self, objective: &O) -> PassStatistics {
        let mut stats = PassStatistics::default();
        let mut best_fitness = self.iteration_best.as_ref().and_then(Particle::fitness);

        for i in 0..self.particles.len() {
            stats.evaluations += 1;
            let outcome = evaluate_particle(self.space, objective, &self.particles[i]);
            let Some(fitness) = outcome else {
                stats.failed_evaluations += 1;
                trace!(particle = %self.particles[i].id(), "Infeasible evaluation.");
                continue;
            };
            self.apply_fitness(i, fitness);

            let improved = best_fitness.is_none_or(|best| self.direction.is_better(fitness, best));
            if improved {
                let position = self.particles[i].position().to_vec();
                self.particles[i].set_informant_best(&position);
                self.iteration_best = Some(self.particles[i].clone());
                best_fitness = Some(fitness);
            }

            self.offer_incumbent(i);
        }
        stats
    }

    fn evaluate_asynchronous<O: Objective + ?Sized>(&mut self, objective: &O) -> PassStatistics {
        let outcomes = self.evaluate_all(objective);
        let mut stats = PassStatistics {
            evaluations: outcomes.len(),
            failed_evaluations: 0,
        };

        for (i, outcome) in outcomes.into_iter().enumerate() {
            let Some(fitness) = outcome else {
                stats.failed_evaluations += 1;
                trace!(particle = %self.particles[i].id(), "Infeasible evaluation.");
                continue;
            };
            self.apply_fitness(i, fitness);
        }

        if let Some(&best) = self.ranked_indices().first() {
            let position = self.particles[best].position().to_vec();
            for particle in &mut self.particles {
                particle.set_informant_best(&position);
            }
            self.iteration_best = Some(self.particles[best].clone());
            self.offer_incumbent(best);
        }
        stats
    }

    #[cfg(not(feature = "parallel"))]
    fn evaluate_all<O: Objective + ?Sized>(&self, objective: &O) -> Vec<Option<f64>> {
        self.particles
            .iter()
            .map(|particle| evaluate_particle(self.space, objective, particle))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn evaluate_all<O: Objective + ?Sized>(&self, objective: &O) -> Vec<Option<f64>> {
        self.particles
            .par_iter()
            .map(|particle| evaluate_particle(self.space, objective, particle))
            .collect()
    }

    fn apply_fitness(&mut self, index: usize, fitness: f64) {
        self.succeeded[index] = true;
        let particle = &mut self.particles[index];
        let prior = particle.fitness();
        particle.set_fitness(fitness);
        if let Some(prior) = prior {
            if self.direction.is_better(fitness, prior) {
                particle.mark_personal_best();
            }
        }
    }

    fn offer_incumbent(&mut self, index: usize) {
        let particle = &self.particles[index];
        let Some(fitness) = particle.fitness() else {
            return;
        };
        let improved = match self.incumbent.as_ref().and_then(Particle::fitness) {
            Some(current) => self.direction.is_better(fitness, current),
            None => true,
        };
        if improved {
            self.incumbent = Some(particle.clone());
        }
    }

    /// Applies `v' = w*v + c1*r1*(pbest - x) + c2*r2*(ibest - x)` to every coordinate of
    /// every particle, with fresh `r1, r2` in `[0, 1)` per coordinate.
    pub fn update_velocity(
        &mut self,
        coefficients: &VelocityCoefficients,
        rng: &mut impl Rng,
    ) -> Result<(), SwarmError> {
        match self.phase {
            SwarmPhase::Bootstrapped | SwarmPhase::Iterating => {}
            SwarmPhase::Unpopulated | SwarmPhase::Initialized => {
                return Err(SwarmError::UninitializedBestReference);
            }
            SwarmPhase::Done => {
                return Err(SwarmError::InvalidPhase {
                    operation: "update_velocity",
                    phase: self.phase.as_str(),
                });
            }
        }

        let VelocityCoefficients {
            inertia,
            local_acceleration,
            global_acceleration,
        } = *coefficients;

        for particle in &mut self.particles {
            let velocity: Vec<f64> = (0..particle.position().len())
                .map(|d| {
                    let x = particle.position()[d];
                    let r1: f64 = rng.r#gen();
                    let r2: f64 = rng.r#gen();
                    inertia * particle.velocity()[d]
                        + local_acceleration * r1 * (particle.personal_best()[d] - x)
                        + global_acceleration * r2 * (particle.informant_best()[d] - x)
                })
                .collect();
            particle.set_velocity(velocity);
        }

        self.phase = SwarmPhase::Iterating;
        Ok(())
    }

    /// Moves every particle by its velocity and enforces the domain bounds.
    pub fn update_position(&mut self, rng: &mut impl Rng) -> Result<(), SwarmError> {
        self.require_populated("update_position")?;

        let space = self.space;
        for particle in &mut self.particles {
            let mut candidate: Vec<f64> = space
                .variables()
                .iter()
                .zip(particle.position().iter().zip(particle.velocity()))
                .map(|(variable, (x, v))| match variable.domain() {
                    Domain::Integer { .. } | Domain::Categorical { .. } => (x + v).trunc(),
                    _ => x + v,
                })
                .collect();
            self.enforcer
                .enforce_position(space, &mut candidate, &mut *rng);
            particle.set_position(candidate);
        }
        Ok(())
    }

    /// Marks the run as finished. Later updates and evaluations are rejected.
    pub fn finish(&mut self) {
        self.phase = SwarmPhase::Done;
    }

    fn require_populated(&self, operation: &'static str) -> Result<(), SwarmError> {
        match self.phase {
            SwarmPhase::Unpopulated | SwarmPhase::Done => Err(SwarmError::InvalidPhase {
                operation,
                phase: self.phase.as_str(),
            }),
            _ => Ok(()),
        }
    }

    fn require_phase(&self, expected: SwarmPhase, operation: &'static str) -> Result<(), SwarmError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(SwarmError::InvalidPhase {
                operation,
                phase: self.phase.as_str(),
            })
        }
    }
}

fn evaluate_particle<O: Objective + ?Sized>(
    space: &SearchSpace,
    objective: &O,
    particle: &Particle,
) -> Option<f64> {
    objective
        .evaluate(&Candidate::new(space, particle.position()))
        .filter(|fitness| fitness.is_finite())
}
