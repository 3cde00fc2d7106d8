use std::fmt;

/// Identifier of a particle, unique within its swarm and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(pub u32);

impl fmt::Display for ParticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// State of one candidate solution in the swarm.
///
/// A particle is a plain state holder: it does no domain validation of its own. The
/// swarm applies bound enforcement before every position change, so positions stored
/// here are always domain-conformant. Cloning yields an independent snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    id: ParticleId,
    position: Vec<f64>,
    velocity: Vec<f64>,
    fitness: Option<f64>,
    personal_best: Vec<f64>,
    informant_best: Vec<f64>,
}

impl Particle {
    /// Creates a particle whose personal and informant bests start at its own position.
    pub fn new(id: ParticleId, position: Vec<f64>, velocity: Vec<f64>) -> Self {
        Self {
            id,
            personal_best: position.clone(),
            informant_best: position.clone(),
            position,
            velocity,
            fitness: None,
        }
    }

    pub fn id(&self) -> ParticleId {
        self.id
    }

    pub fn position(&self) -> &[f64] {
        &self.position
    }

    pub fn velocity(&self) -> &[f64] {
        &self.velocity
    }

    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    pub fn personal_best(&self) -> &[f64] {
        &self.personal_best
    }

    pub fn informant_best(&self) -> &[f64] {
        &self.informant_best
    }

    pub fn set_position(&mut self, position: Vec<f64>) {
        self.position = position;
    }

    pub fn set_velocity(&mut self, velocity: Vec<f64>) {
        self.velocity = velocity;
    }

    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }

    /// Records the current position as the personal best.
    pub fn mark_personal_best(&mut self) {
        self.personal_best.clone_from(&self.position);
    }

    pub fn set_informant_best(&mut self, position: &[f64]) {
        self.informant_best.clear();
        self.informant_best.extend_from_slice(position);
    }
}

impl fmt::Display for Particle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.fitness {
            Some(fitness) => write!(f, "Particle {} has fitness {}", self.id, fitness),
            None => write!(f, "Particle {} has fitness None", self.id),
        }
    }
}
