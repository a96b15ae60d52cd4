use std::fmt;

use thiserror::Error;

/// Programmer errors raised while declaring flags.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("flag --{name} is already registered")]
    DuplicateFlag { name: String },
    #[error("flag name {name:?} is reserved for help")]
    ReservedName { name: String },
    #[error("flag name {name:?} is not a valid long name")]
    InvalidName { name: String },
    #[error("default for --{name} does not match the kind of its field")]
    DefaultKindMismatch { name: String },
}

/// The argument vector could not be mapped onto registered flags.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected argument: {token}")]
    UnexpectedToken { token: String },
    #[error("unknown flag: --{flag}")]
    UnknownFlag { flag: String },
    #[error("missing value for --{flag}")]
    MissingValue { flag: String },
    #[error("invalid value {value:?} for --{flag}: {reason}")]
    InvalidValue {
        flag: String,
        value: String,
        reason: String,
    },
}

impl ParseError {
    /// The flag name or raw token the error is about.
    #[must_use]
    pub fn subject(&self) -> &str {
        match self {
            ParseError::UnexpectedToken { token } => token,
            ParseError::UnknownFlag { flag }
            | ParseError::MissingValue { flag }
            | ParseError::InvalidValue { flag, .. } => flag,
        }
    }
}

/// One `flag=value` requirement of a governing selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionClause {
    pub flag: String,
    pub value: String,
}

/// The selections that made a rule apply, e.g. `target=iissite`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoverningCondition {
    pub clauses: Vec<ConditionClause>,
}

impl fmt::Display for GoverningCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, clause) in self.clauses.iter().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}={}", clause.flag, clause.value)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("--{flag} is required when {condition}")]
    MissingRequired {
        flag: String,
        condition: GoverningCondition,
    },
}

impl ValidationError {
    #[must_use]
    pub fn flag(&self) -> &str {
        match self {
            ValidationError::MissingRequired { flag, .. } => flag,
        }
    }

    #[must_use]
    pub fn condition(&self) -> &GoverningCondition {
        match self {
            ValidationError::MissingRequired { condition, .. } => condition,
        }
    }
}

/// Terminal failure of a bind call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
