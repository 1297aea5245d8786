/// Runtime classification of a JSON value, used in mismatch reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display, strum_macros::AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum JsonKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl JsonKind {
    pub fn of(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(_) => Self::Bool,
            serde_json::Value::Number(_) => Self::Number,
            serde_json::Value::String(_) => Self::String,
            serde_json::Value::Array(_) => Self::Array,
            serde_json::Value::Object(_) => Self::Object,
        }
    }
}

/// One path-qualified structural mismatch found while decoding.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("{path}: expected {expected}, found {found}")]
    WrongType {
        path: String,
        expected: &'static str,
        found: JsonKind,
    },

    #[error("{path}: missing required field `{field}`")]
    MissingField { path: String, field: &'static str },

    #[error("{path}: expected status {expected}, found \"{found}\"")]
    UnknownStatus {
        path: String,
        expected: &'static str,
        found: String,
    },

    #[error("{path}: {reason}")]
    Invalid { path: String, reason: String },
}

impl Violation {
    /// The field path the mismatch was observed at (`$` is the input root).
    pub fn path(&self) -> &str {
        match self {
            Self::WrongType { path, .. }
            | Self::MissingField { path, .. }
            | Self::UnknownStatus { path, .. }
            | Self::Invalid { path, .. } => path,
        }
    }
}

/// Aggregated decode failure.
///
/// Carries every mismatch relevant to the variant implied by `status` (or the
/// discriminant mismatch itself), so callers can render a complete diagnostic
/// instead of stopping at the first problem.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid envelope: {}", .violations.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
pub struct DecodeError {
    pub violations: Vec<Violation>,
}

impl DecodeError {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    pub fn single(violation: Violation) -> Self {
        Self {
            violations: vec![violation],
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
