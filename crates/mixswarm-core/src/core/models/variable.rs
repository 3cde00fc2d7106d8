use super::level::{Level, Value};
use super::space::SpaceError;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// The four kinds of decision variable a search space can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableType {
    Continuous,
    Integer,
    Categorical,
    Binary,
}

impl VariableType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VariableType::Continuous => "continuous",
            VariableType::Integer => "integer",
            VariableType::Categorical => "categorical",
            VariableType::Binary => "binary",
        }
    }
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VariableType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "continuous" | "float" => Ok(VariableType::Continuous),
            "integer" | "int" => Ok(VariableType::Integer),
            "categorical" | "enumerate" => Ok(VariableType::Categorical),
            "binary" => Ok(VariableType::Binary),
            _ => Err(()),
        }
    }
}

/// The set of values a variable may take.
#[derive(Debug, Clone, PartialEq)]
pub enum Domain {
    Continuous { lower: f64, upper: f64 },
    Integer { lower: i64, upper: i64 },
    Categorical { levels: Vec<Level> },
    Binary,
}

/// A named decision variable together with its domain.
///
/// Instances are only created through validated paths ([`Variable::new`] or
/// [`Variable::from_declaration`]), so every `Variable` satisfies its domain invariants:
/// finite bounds with `lower <= upper`, and a non-empty set of distinct levels.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    name: String,
    domain: Domain,
}

impl Variable {
    /// Creates a variable after validating its domain.
    ///
    /// # Errors
    ///
    /// Returns a [`SpaceError`] when bounds are inverted or non-finite, or when a
    /// categorical level set is empty or contains duplicates.
    pub fn new(name: impl Into<String>, domain: Domain) -> Result<Self, SpaceError> {
        let name = name.into();
        match &domain {
            Domain::Continuous { lower, upper } => {
                if !lower.is_finite() || !upper.is_finite() || lower > upper {
                    return Err(SpaceError::InvalidBounds {
                        name,
                        lower: *lower,
                        upper: *upper,
                    });
                }
            }
            Domain::Integer { lower, upper } => {
                if lower > upper {
                    return Err(SpaceError::InvalidBounds {
                        name,
                        lower: *lower as f64,
                        upper: *upper as f64,
                    });
                }
            }
            Domain::Categorical { levels } => {
                if levels.is_empty() {
                    return Err(SpaceError::EmptyValueSet { name });
                }
                for (i, level) in levels.iter().enumerate() {
                    if levels[..i].contains(level) {
                        return Err(SpaceError::DuplicateLevel {
                            name,
                            level: level.to_string(),
                        });
                    }
                }
            }
            Domain::Binary => {}
        }
        Ok(Self { name, domain })
    }

    /// Converts a raw configuration entry into a validated variable.
    pub fn from_declaration(declaration: VariableDeclaration) -> Result<Self, SpaceError> {
        let VariableDeclaration {
            name,
            kind,
            lower,
            upper,
            values,
        } = declaration;

        let variable_type = kind
            .parse::<VariableType>()
            .map_err(|_| SpaceError::UnsupportedVariableType {
                name: name.clone(),
                kind: kind.clone(),
            })?;

        let domain = match variable_type {
            VariableType::Continuous => {
                let (lower, upper) = require_bounds(&name, lower, upper)?;
                Domain::Continuous { lower, upper }
            }
            VariableType::Integer => {
                let (lower, upper) = require_bounds(&name, lower, upper)?;
                let (lower, upper) = integral_bounds(&name, lower, upper)?;
                Domain::Integer { lower, upper }
            }
            VariableType::Categorical => {
                let levels = values.ok_or_else(|| SpaceError::MissingValues { name: name.clone() })?;
                Domain::Categorical { levels }
            }
            VariableType::Binary => Domain::Binary,
        };

        Self::new(name, domain)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn variable_type(&self) -> VariableType {
        match self.domain {
            Domain::Continuous { .. } => VariableType::Continuous,
            Domain::Integer { .. } => VariableType::Integer,
            Domain::Categorical { .. } => VariableType::Categorical,
            Domain::Binary => VariableType::Binary,
        }
    }

    /// Lower bound, for continuous and integer variables only.
    pub fn lower_bound(&self) -> Option<f64> {
        match self.domain {
            Domain::Continuous { lower, .. } => Some(lower),
            Domain::Integer { lower, .. } => Some(lower as f64),
            _ => None,
        }
    }

    /// Upper bound, for continuous and integer variables only.
    pub fn upper_bound(&self) -> Option<f64> {
        match self.domain {
            Domain::Continuous { upper, .. } => Some(upper),
            Domain::Integer { upper, .. } => Some(upper as f64),
            _ => None,
        }
    }

    /// Declared levels, for categorical variables only.
    pub fn levels(&self) -> Option<&[Level]> {
        match &self.domain {
            Domain::Categorical { levels } => Some(levels),
            _ => None,
        }
    }

    /// Width of the coordinate range, used to scale initial velocities.
    pub(crate) fn span(&self) -> f64 {
        match &self.domain {
            Domain::Continuous { lower, upper } => (upper - lower).abs(),
            Domain::Integer { lower, upper } => upper.abs_diff(*lower) as f64,
            Domain::Categorical { levels } => (levels.len() - 1) as f64,
            Domain::Binary => 1.0,
        }
    }

    /// Whether an encoded coordinate lies inside this variable's domain.
    pub fn contains(&self, coordinate: f64) -> bool {
        match &self.domain {
            Domain::Continuous { lower, upper } => (*lower..=*upper).contains(&coordinate),
            Domain::Integer { lower, upper } => {
                coordinate.fract() == 0.0 && (*lower as f64..=*upper as f64).contains(&coordinate)
            }
            Domain::Categorical { levels } => {
                coordinate.fract() == 0.0 && coordinate >= 0.0 && coordinate < levels.len() as f64
            }
            Domain::Binary => coordinate == 0.0 || coordinate == 1.0,
        }
    }

    /// Decodes an in-domain coordinate. Returns `None` for out-of-domain coordinates.
    pub fn decode(&self, coordinate: f64) -> Option<Value<'_>> {
        if !self.contains(coordinate) {
            return None;
        }
        Some(match &self.domain {
            Domain::Continuous { .. } => Value::Continuous(coordinate),
            Domain::Integer { .. } => Value::Integer(coordinate as i64),
            Domain::Categorical { levels } => Value::Categorical(&levels[coordinate as usize]),
            Domain::Binary => Value::Binary(coordinate == 1.0),
        })
    }
}

fn require_bounds(
    name: &str,
    lower: Option<f64>,
    upper: Option<f64>,
) -> Result<(f64, f64), SpaceError> {
    let lower = lower.ok_or_else(|| SpaceError::MissingBound {
        name: name.to_string(),
        bound: "lower",
    })?;
    let upper = upper.ok_or_else(|| SpaceError::MissingBound {
        name: name.to_string(),
        bound: "upper",
    })?;
    Ok((lower, upper))
}

fn integral_bounds(name: &str, lower: f64, upper: f64) -> Result<(i64, i64), SpaceError> {
    for bound in [lower, upper] {
        if !bound.is_finite() || bound.fract() != 0.0 {
            return Err(SpaceError::FractionalIntegerBound {
                name: name.to_string(),
                bound,
            });
        }
    }
    // `i64::MAX as f64` rounds up to 2^63, which is already out of range.
    let representable = i64::MIN as f64..i64::MAX as f64;
    if !representable.contains(&lower) || !representable.contains(&upper) {
        return Err(SpaceError::InvalidBounds {
            name: name.to_string(),
            lower,
            upper,
        });
    }
    Ok((lower as i64, upper as i64))
}

/// A decision variable as written in a configuration file, before validation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariableDeclaration {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub lower: Option<f64>,
    #[serde(default)]
    pub upper: Option<f64>,
    #[serde(default)]
    pub values: Option<Vec<Level>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declaration(kind: &str) -> VariableDeclaration {
        VariableDeclaration {
            name: "v".to_string(),
            kind: kind.to_string(),
            lower: None,
            upper: None,
            values: None,
        }
    }

    #[test]
    fn type_names_accept_legacy_aliases() {
        assert_eq!("float".parse(), Ok(VariableType::Continuous));
        assert_eq!("int".parse(), Ok(VariableType::Integer));
        assert_eq!("enumerate".parse(), Ok(VariableType::Categorical));
        assert_eq!("Binary".parse(), Ok(VariableType::Binary));
        assert!("complex".parse::<VariableType>().is_err());
    }

    #[test]
    fn unknown_type_is_reported_with_variable_name() {
        let err = Variable::from_declaration(declaration("complex")).unwrap_err();
        assert_eq!(
            err,
            SpaceError::UnsupportedVariableType {
                name: "v".to_string(),
                kind: "complex".to_string(),
            }
        );
    }

    #[test]
    fn continuous_declaration_without_upper_bound_is_rejected() {
        let mut decl = declaration("continuous");
        decl.lower = Some(0.0);
        let err = Variable::from_declaration(decl).unwrap_err();
        assert!(matches!(err, SpaceError::MissingBound { bound: "upper", .. }));
    }

    #[test]
    fn categorical_declaration_without_values_is_rejected() {
        let err = Variable::from_declaration(declaration("categorical")).unwrap_err();
        assert!(matches!(err, SpaceError::MissingValues { .. }));
    }

    #[test]
    fn integer_declaration_with_fractional_bound_is_rejected() {
        let mut decl = declaration("integer");
        decl.lower = Some(0.5);
        decl.upper = Some(4.0);
        let err = Variable::from_declaration(decl).unwrap_err();
        assert!(matches!(err, SpaceError::FractionalIntegerBound { .. }));
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let err = Variable::new("x", Domain::Continuous { lower: 2.0, upper: 1.0 }).unwrap_err();
        assert!(matches!(err, SpaceError::InvalidBounds { .. }));
    }

    #[test]
    fn duplicate_levels_are_rejected() {
        let levels = vec![Level::from("A"), Level::from("B"), Level::from("A")];
        let err = Variable::new("c", Domain::Categorical { levels }).unwrap_err();
        assert!(matches!(err, SpaceError::DuplicateLevel { .. }));
    }

    #[test]
    fn accessors_return_none_for_inapplicable_domain_data() {
        let binary = Variable::new("b", Domain::Binary).unwrap();
        assert_eq!(binary.lower_bound(), None);
        assert_eq!(binary.upper_bound(), None);
        assert_eq!(binary.levels(), None);

        let integer = Variable::new("n", Domain::Integer { lower: -2, upper: 3 }).unwrap();
        assert_eq!(integer.lower_bound(), Some(-2.0));
        assert_eq!(integer.levels(), None);
    }

    #[test]
    fn decode_maps_categorical_index_to_level() {
        let levels = vec![Level::from("A"), Level::from("B")];
        let var = Variable::new("c", Domain::Categorical { levels }).unwrap();
        assert_eq!(var.decode(1.0), Some(Value::Categorical(&Level::from("B"))));
        assert_eq!(var.decode(2.0), None);
        assert_eq!(var.decode(0.5), None);
    }

    #[test]
    fn span_matches_domain_width() {
        let cont = Variable::new("x", Domain::Continuous { lower: -1.0, upper: 3.0 }).unwrap();
        assert_eq!(cont.span(), 4.0);
        let levels = vec![Level::from(1_i64), Level::from(2_i64), Level::from(3_i64)];
        let cat = Variable::new("c", Domain::Categorical { levels }).unwrap();
        assert_eq!(cat.span(), 2.0);
    }

    #[test]
    fn integer_bounds_outside_i64_are_rejected() {
        let decl = VariableDeclaration {
            lower: Some(-1e19),
            upper: Some(5.0),
            ..declaration("integer")
        };
        assert!(matches!(
            Variable::from_declaration(decl),
            Err(SpaceError::InvalidBounds { lower, .. }) if lower == -1e19
        ));

        let decl = VariableDeclaration {
            lower: Some(0.0),
            upper: Some(9_223_372_036_854_775_808.0),
            ..declaration("int")
        };
        assert!(matches!(
            Variable::from_declaration(decl),
            Err(SpaceError::InvalidBounds { .. })
        ));
    }

    #[test]
    fn span_of_full_i64_range_does_not_overflow() {
        let var = Variable::new(
            "n",
            Domain::Integer {
                lower: i64::MIN,
                upper: i64::MAX,
            },
        )
        .unwrap();
        assert_eq!(var.span(), u64::MAX as f64);
    }
}
