use serde::Serialize;
use thiserror::Error;

/// One failed check, addressed by a dot-joined field path (`0.category`,
/// `weeklySchedule.schedule.2.day`). The root value has an empty path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub message: String,
    pub path: String,
}

impl Violation {
    pub fn new(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: path.into(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

fn summarize(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid input: {}", summarize(.0))]
    InvalidInput(Vec<Violation>),

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Malformed output: {0}")]
    MalformedOutput(String),

    #[error("Schema violation: {}", summarize(.0))]
    SchemaViolation(Vec<Violation>),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn invalid_input(violations: Vec<Violation>) -> Self {
        Self::InvalidInput(violations)
    }

    pub fn provider(msg: impl Into<String>) -> Self {
        Self::ProviderError(msg.into())
    }

    pub fn malformed_output(msg: impl Into<String>) -> Self {
        Self::MalformedOutput(msg.into())
    }

    pub fn schema_violation(violations: Vec<Violation>) -> Self {
        Self::SchemaViolation(violations)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Violations carried by the validation-class errors, `None` otherwise.
    pub fn violations(&self) -> Option<&[Violation]> {
        match self {
            Self::InvalidInput(v) | Self::SchemaViolation(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    pub fn is_provider_error(&self) -> bool {
        matches!(self, Self::ProviderError(_))
    }

    pub fn is_malformed_output(&self) -> bool {
        matches!(self, Self::MalformedOutput(_))
    }

    pub fn is_schema_violation(&self) -> bool {
        matches!(self, Self::SchemaViolation(_))
    }
}
