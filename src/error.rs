//! Error type for parsing category strings coming from the data store.

use thiserror::Error;

/// A category string that does not name any variant of the expected enum.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategoryError {
    #[error("unknown risk level: {0:?}")]
    RiskLevel(String),

    #[error("unknown density level: {0:?}")]
    DensityLevel(String),

    #[error("unknown severity: {0:?}")]
    Severity(String),

    #[error("unknown facility kind: {0:?}")]
    FacilityKind(String),

    #[error("unknown incident type: {0:?}")]
    IncidentType(String),

    #[error("unknown infrastructure level: {0:?}")]
    InfrastructureLevel(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CategoryError::RiskLevel("extreme".to_string());
        assert_eq!(err.to_string(), "unknown risk level: \"extreme\"");
    }
}
