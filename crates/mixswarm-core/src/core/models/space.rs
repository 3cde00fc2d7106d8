use super::level::{Level, Value};
use super::variable::{Domain, Variable, VariableDeclaration, VariableType};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SpaceError {
    #[error("Variable '{name}' is missing its {bound} bound")]
    MissingBound { name: String, bound: &'static str },

    #[error("Categorical variable '{name}' is missing its value set")]
    MissingValues { name: String },

    #[error("Variable '{name}' has invalid bounds [{lower}, {upper}]")]
    InvalidBounds { name: String, lower: f64, upper: f64 },

    #[error("Integer variable '{name}' has a non-integral bound {bound}")]
    FractionalIntegerBound { name: String, bound: f64 },

    #[error("Categorical variable '{name}' has an empty value set")]
    EmptyValueSet { name: String },

    #[error("Categorical variable '{name}' declares level '{level}' more than once")]
    DuplicateLevel { name: String, level: String },

    #[error("Variable '{0}' is declared more than once")]
    DuplicateVariable(String),

    #[error("Search space must contain at least one variable")]
    EmptySpace,

    #[error("Unsupported type '{kind}' for variable '{name}'")]
    UnsupportedVariableType { name: String, kind: String },
}

/// An ordered, immutable collection of decision variables.
///
/// Insertion order is significant: it defines the coordinate layout of every position
/// and the column order of reports. A `SearchSpace` is built once and shared by
/// reference for the whole run.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSpace {
    variables: Vec<Variable>,
    index: HashMap<String, usize>,
}

impl SearchSpace {
    /// Builds a search space from validated variables, preserving their order.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::EmptySpace`] for an empty list and
    /// [`SpaceError::DuplicateVariable`] when two variables share a name.
    pub fn new(variables: Vec<Variable>) -> Result<Self, SpaceError> {
        if variables.is_empty() {
            return Err(SpaceError::EmptySpace);
        }
        let mut index = HashMap::with_capacity(variables.len());
        for (i, variable) in variables.iter().enumerate() {
            if index.insert(variable.name().to_string(), i).is_some() {
                return Err(SpaceError::DuplicateVariable(variable.name().to_string()));
            }
        }
        Ok(Self { variables, index })
    }

    /// Validates raw configuration entries and builds the search space from them.
    ///
    /// Every entry is checked before the space exists, so malformed declarations and
    /// unsupported types surface here rather than during sampling.
    pub fn from_declarations(
        declarations: impl IntoIterator<Item = VariableDeclaration>,
    ) -> Result<Self, SpaceError> {
        let variables = declarations
            .into_iter()
            .map(Variable::from_declaration)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(variables)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variables.iter().map(Variable::name)
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.index_of(name).map(|i| &self.variables[i])
    }

    pub fn variable_type(&self, name: &str) -> Option<VariableType> {
        self.variable(name).map(Variable::variable_type)
    }

    pub fn lower_bound(&self, name: &str) -> Option<f64> {
        self.variable(name).and_then(Variable::lower_bound)
    }

    pub fn upper_bound(&self, name: &str) -> Option<f64> {
        self.variable(name).and_then(Variable::upper_bound)
    }

    pub fn levels(&self, name: &str) -> Option<&[Level]> {
        self.variable(name).and_then(Variable::levels)
    }

    /// Whether every coordinate lies inside its variable's domain.
    pub fn contains(&self, coordinates: &[f64]) -> bool {
        coordinates.len() == self.variables.len()
            && self
                .variables
                .iter()
                .zip(coordinates)
                .all(|(v, &c)| v.contains(c))
    }

    /// Decodes a position into `(name, value)` pairs in search-space order.
    ///
    /// Coordinates outside their domain are skipped; positions produced by the swarm
    /// are always conformant, so this only matters for hand-built vectors.
    pub fn decode<'a>(&'a self, coordinates: &[f64]) -> Vec<(&'a str, Value<'a>)> {
        self.variables
            .iter()
            .zip(coordinates)
            .filter_map(|(v, &c)| v.decode(c).map(|value| (v.name(), value)))
            .collect()
    }
}

enum PendingVariable {
    Typed(String, Domain),
    Declared(VariableDeclaration),
}

#[derive(Default)]
pub struct SearchSpaceBuilder {
    pending: Vec<PendingVariable>,
}

impl SearchSpaceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn continuous(mut self, name: impl Into<String>, lower: f64, upper: f64) -> Self {
        self.pending.push(PendingVariable::Typed(
            name.into(),
            Domain::Continuous { lower, upper },
        ));
        self
    }
    pub fn integer(mut self, name: impl Into<String>, lower: i64, upper: i64) -> Self {
        self.pending.push(PendingVariable::Typed(
            name.into(),
            Domain::Integer { lower, upper },
        ));
        self
    }
    pub fn categorical<L: Into<Level>>(
        mut self,
        name: impl Into<String>,
        levels: impl IntoIterator<Item = L>,
    ) -> Self {
        let levels = levels.into_iter().map(Into::into).collect();
        self.pending.push(PendingVariable::Typed(
            name.into(),
            Domain::Categorical { levels },
        ));
        self
    }
    pub fn binary(mut self, name: impl Into<String>) -> Self {
        self.pending
            .push(PendingVariable::Typed(name.into(), Domain::Binary));
        self
    }
    pub fn declaration(mut self, declaration: VariableDeclaration) -> Self {
        self.pending.push(PendingVariable::Declared(declaration));
        self
    }

    pub fn build(self) -> Result<SearchSpace, SpaceError> {
        let variables = self
            .pending
            .into_iter()
            .map(|p| match p {
                PendingVariable::Typed(name, domain) => Variable::new(name, domain),
                PendingVariable::Declared(decl) => Variable::from_declaration(decl),
            })
            .collect::<Result<Vec<_>, _>>()?;
        SearchSpace::new(variables)
    }
}
