use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum DomainError {
    #[error("threshold `{name}` out of range: {value}")]
    InvalidThreshold { name: &'static str, value: f64 },
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("catalog failure: {0}")]
    Catalog(String),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Stable machine-readable class used in CLI error payloads.
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::Domain(DomainError::InvalidThreshold { .. }) => "invalid_threshold",
            Self::Domain(DomainError::InvariantViolation(_)) => "invariant_violation",
            Self::Catalog(_) => "catalog",
            Self::Configuration(_) => "config_validation",
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Domain(DomainError::InvalidThreshold { .. }) => {
                "Mining thresholds are out of range. Check the [mining] config section."
            }
            Self::Domain(DomainError::InvariantViolation(_)) => {
                "Rule generation hit an inconsistent state; previous rules were kept."
            }
            Self::Catalog(_) => "The product catalog could not be loaded.",
            Self::Configuration(_) => "The configuration is invalid. Check inputs and try again.",
        }
    }
}
