use std::fmt;
use std::str::FromStr;

use lazylp_expr::{IndexSet, Param, TermStream};

use crate::model::ModelError;

/// Variable domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarKind {
    Real,
    NonNegativeReal,
    NonPositiveReal,
    PositiveReal,
    NegativeReal,
    Integer,
    NonNegativeInteger,
    NonPositiveInteger,
    PositiveInteger,
    NegativeInteger,
    Binary,
}

impl VarKind {
    pub const ALL: [VarKind; 11] = [
        VarKind::Real,
        VarKind::NonNegativeReal,
        VarKind::NonPositiveReal,
        VarKind::PositiveReal,
        VarKind::NegativeReal,
        VarKind::Integer,
        VarKind::NonNegativeInteger,
        VarKind::NonPositiveInteger,
        VarKind::PositiveInteger,
        VarKind::NegativeInteger,
        VarKind::Binary,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VarKind::Real => "Real",
            VarKind::NonNegativeReal => "NonNegativeReal",
            VarKind::NonPositiveReal => "NonPositiveReal",
            VarKind::PositiveReal => "PositiveReal",
            VarKind::NegativeReal => "NegativeReal",
            VarKind::Integer => "Integer",
            VarKind::NonNegativeInteger => "NonNegativeInteger",
            VarKind::NonPositiveInteger => "NonPositiveInteger",
            VarKind::PositiveInteger => "PositiveInteger",
            VarKind::NegativeInteger => "NegativeInteger",
            VarKind::Binary => "Binary",
        }
    }

    /// Listed in the GENERAL section.
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            VarKind::Integer
                | VarKind::NonNegativeInteger
                | VarKind::NonPositiveInteger
                | VarKind::PositiveInteger
                | VarKind::NegativeInteger
        )
    }

    pub fn is_binary(self) -> bool {
        self == VarKind::Binary
    }

    /// Bounds implied by the domain when none are declared.
    ///
    /// Strict real domains use the closed bound (LP cannot express `x > 0`);
    /// strict integer domains tighten to the nearest integer.
    pub fn default_bounds(self) -> (f64, f64) {
        match self {
            VarKind::Real | VarKind::Integer => (f64::NEG_INFINITY, f64::INFINITY),
            VarKind::NonNegativeReal | VarKind::PositiveReal | VarKind::NonNegativeInteger => {
                (0.0, f64::INFINITY)
            }
            VarKind::NonPositiveReal | VarKind::NegativeReal | VarKind::NonPositiveInteger => {
                (f64::NEG_INFINITY, 0.0)
            }
            VarKind::PositiveInteger => (1.0, f64::INFINITY),
            VarKind::NegativeInteger => (f64::NEG_INFINITY, -1.0),
            VarKind::Binary => (0.0, 1.0),
        }
    }
}

impl fmt::Display for VarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive; `_`, `-` and spaces are ignored (`"non_negative real"`).
impl FromStr for VarKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        VarKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(&key))
            .ok_or_else(|| ModelError::InvalidKind(s.to_string()))
    }
}

/// Objective sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectiveSense {
    Min,
    Max,
}

impl ObjectiveSense {
    /// Section header token.
    pub fn as_str(self) -> &'static str {
        match self {
            ObjectiveSense::Min => "MIN",
            ObjectiveSense::Max => "MAX",
        }
    }
}

impl FromStr for ObjectiveSense {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MIN" | "MINIMIZE" => Ok(ObjectiveSense::Min),
            "MAX" | "MAXIMIZE" => Ok(ObjectiveSense::Max),
            _ => Err(ModelError::InvalidSense(s.to_string())),
        }
    }
}

/// Constraint comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    LessEqual,
    GreaterEqual,
    Equal,
}

impl Comparison {
    /// Token written in the constraint suffix.
    pub fn as_str(self) -> &'static str {
        match self {
            Comparison::LessEqual => "<=",
            Comparison::GreaterEqual => ">=",
            Comparison::Equal => "=",
        }
    }
}

impl FromStr for Comparison {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "<=" | "=<" => Ok(Comparison::LessEqual),
            ">=" | "=>" => Ok(Comparison::GreaterEqual),
            "==" | "=" => Ok(Comparison::Equal),
            _ => Err(ModelError::InvalidComparison(s.to_string())),
        }
    }
}

/// Key of a constraint block.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BlockKey {
    /// Assigned from the registry counter, in declaration order from 0.
    Auto(u32),
    Named(String),
}

impl BlockKey {
    /// Row label written before the block, if any.
    pub fn label(&self) -> Option<&str> {
        match self {
            BlockKey::Auto(_) => None,
            BlockKey::Named(name) => Some(name),
        }
    }
}

impl fmt::Display for BlockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockKey::Auto(id) => write!(f, "#{id}"),
            BlockKey::Named(name) => f.write_str(name),
        }
    }
}

/// A declared decision variable.
#[derive(Debug, Clone)]
pub struct Variable {
    name: String,
    kind: VarKind,
    upper_bound: Option<Param>,
    lower_bound: Option<Param>,
    default_index: Option<IndexSet>,
}

impl Variable {
    pub fn new(name: impl Into<String>, kind: VarKind) -> Self {
        Self {
            name: name.into(),
            kind,
            upper_bound: None,
            lower_bound: None,
            default_index: None,
        }
    }

    /// Create a binary variable over `index`.
    pub fn binary(name: impl Into<String>, index: IndexSet) -> Self {
        Self::new(name, VarKind::Binary).with_default_index(index)
    }

    pub fn with_upper_bound(mut self, bound: impl Into<Param>) -> Self {
        self.upper_bound = Some(bound.into());
        self
    }

    pub fn with_lower_bound(mut self, bound: impl Into<Param>) -> Self {
        self.lower_bound = Some(bound.into());
        self
    }

    pub fn with_default_index(mut self, index: IndexSet) -> Self {
        self.default_index = Some(index);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> VarKind {
        self.kind
    }

    pub fn upper_bound(&self) -> Option<&Param> {
        self.upper_bound.as_ref()
    }

    pub fn lower_bound(&self) -> Option<&Param> {
        self.lower_bound.as_ref()
    }

    pub fn default_index(&self) -> Option<&IndexSet> {
        self.default_index.as_ref()
    }
}

/// The objective: a sense and the streams of its expression.
#[derive(Debug, Clone)]
pub struct ObjectiveBlock {
    pub(crate) sense: ObjectiveSense,
    pub(crate) streams: Vec<TermStream>,
}

impl ObjectiveBlock {
    pub fn sense(&self) -> ObjectiveSense {
        self.sense
    }

    pub fn streams(&self) -> &[TermStream] {
        &self.streams
    }
}

/// A constraint block. With an index it stands for one row per index value.
#[derive(Debug, Clone)]
pub struct ConstraintBlock {
    pub(crate) key: BlockKey,
    pub(crate) streams: Vec<TermStream>,
    pub(crate) sense: Comparison,
    pub(crate) rhs: Param,
    pub(crate) index: Option<IndexSet>,
}

impl ConstraintBlock {
    pub fn key(&self) -> &BlockKey {
        &self.key
    }

    pub fn streams(&self) -> &[TermStream] {
        &self.streams
    }

    pub fn sense(&self) -> Comparison {
        self.sense
    }

    pub fn rhs(&self) -> &Param {
        &self.rhs
    }

    pub fn index(&self) -> Option<&IndexSet> {
        self.index.as_ref()
    }
}
