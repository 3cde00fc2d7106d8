use crate::core::models::space::SearchSpace;
use crate::core::models::variable::{Domain, Variable};
use rand::Rng;

/// Draws a uniformly random in-domain coordinate for `variable`.
pub fn sample_coordinate(variable: &Variable, rng: &mut impl Rng) -> f64 {
    match variable.domain() {
        Domain::Continuous { lower, upper } => rng.gen_range(*lower..=*upper),
        Domain::Integer { lower, upper } => rng.gen_range(*lower..=*upper) as f64,
        Domain::Categorical { levels } => rng.gen_range(0..levels.len()) as f64,
        Domain::Binary => rng.gen_range(0..=1_u8) as f64,
    }
}

/// Draws an initial velocity component scaled to the variable's coordinate range.
///
/// Numeric and categorical components are uniform in `[-span, span]`; binary components
/// are `-1` or `+1` with equal probability.
pub fn sample_velocity_component(variable: &Variable, rng: &mut impl Rng) -> f64 {
    match variable.domain() {
        Domain::Binary => {
            if rng.r#gen::<bool>() {
                1.0
            } else {
                -1.0
            }
        }
        _ => {
            let span = variable.span();
            if span > 0.0 {
                rng.gen_range(-span..=span)
            } else {
                0.0
            }
        }
    }
}

pub fn sample_position(space: &SearchSpace, rng: &mut impl Rng) -> Vec<f64> {
    space
        .variables()
        .iter()
        .map(|variable| sample_coordinate(variable, rng))
        .collect()
}

pub fn sample_velocity(space: &SearchSpace, rng: &mut impl Rng) -> Vec<f64> {
    space
        .variables()
        .iter()
        .map(|variable| sample_velocity_component(variable, rng))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::space::SearchSpaceBuilder;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn mixed_space() -> SearchSpace {
        SearchSpaceBuilder::new()
            .continuous("x", -2.0, 3.0)
            .integer("n", 1, 6)
            .categorical("c", ["A", "B", "C", "D"])
            .binary("b")
            .build()
            .unwrap()
    }

    #[test]
    fn sampled_positions_are_domain_conformant() {
        let space = mixed_space();
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..200 {
            let position = sample_position(&space, &mut rng);
            assert!(space.contains(&position), "{:?} escapes the space", position);
        }
    }

    #[test]
    fn sampled_velocities_respect_variable_spans() {
        let space = mixed_space();
        let mut rng = StdRng::seed_from_u64(23);
        for _ in 0..200 {
            let v = sample_velocity(&space, &mut rng);
            assert!((-5.0..=5.0).contains(&v[0]));
            assert!((-5.0..=5.0).contains(&v[1]));
            assert!((-3.0..=3.0).contains(&v[2]));
            assert!(v[3] == 1.0 || v[3] == -1.0);
        }
    }

    #[test]
    fn degenerate_ranges_yield_zero_velocity() {
        let space = SearchSpaceBuilder::new()
            .continuous("fixed", 1.0, 1.0)
            .categorical("only", ["solo"])
            .build()
            .unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(sample_velocity(&space, &mut rng), vec![0.0, 0.0]);
        assert_eq!(sample_position(&space, &mut rng), vec![1.0, 0.0]);
    }

    #[test]
    fn same_seed_reproduces_the_same_samples() {
        let space = mixed_space();
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        assert_eq!(sample_position(&space, &mut a), sample_position(&space, &mut b));
        assert_eq!(sample_velocity(&space, &mut a), sample_velocity(&space, &mut b));
    }
}
