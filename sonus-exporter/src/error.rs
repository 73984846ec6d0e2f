use sonus_client::{FetchError, SessionError};
use thiserror::Error;
use tokio::task::JoinError;

/// Registration and observation errors of a [`MetricRegistry`](crate::MetricRegistry).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Metric family {name} is already registered")]
    Duplicate { name: String },

    #[error("Metric family {name} expects {expected} label values, got {got}")]
    LabelArity {
        name: String,
        expected: usize,
        got: usize,
    },
}

/// Failure to bind a record instance against its schema.
#[derive(Debug, Error)]
pub enum BindError {
    #[error("Field {record}.{field} declared {expected} but holds a {found} value")]
    KindMismatch {
        record: &'static str,
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Record {record} declares {expected} fields but yields {found}")]
    FieldCount {
        record: &'static str,
        expected: usize,
        found: usize,
    },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Errors surfaced by a probe.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Bind(#[from] BindError),

    /// Failure of one topology leaf, labelled with that leaf.
    #[error("{leaf}: {source}")]
    Leaf {
        leaf: String,
        #[source]
        source: Box<ProbeError>,
    },

    #[error("Harvest task failed: {0}")]
    Task(#[from] JoinError),

    #[error("Probe did not complete within {seconds:.3}s")]
    DeadlineExceeded { seconds: f64 },

    #[error("Effective probe timeout must be positive, got {seconds}s")]
    InvalidTimeout { seconds: f64 },
}

impl ProbeError {
    /// Wrap an error with the identity of the leaf it came from.
    pub fn at_leaf(leaf: impl Into<String>, source: ProbeError) -> Self {
        ProbeError::Leaf {
            leaf: leaf.into(),
            source: Box::new(source),
        }
    }

    /// Innermost error, looking through leaf attribution.
    pub fn root(&self) -> &ProbeError {
        match self {
            ProbeError::Leaf { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Result type alias for probe operations.
pub type Result<T> = std::result::Result<T, ProbeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_attribution_display() {
        let err = ProbeError::at_leaf(
            "default/EXT",
            ProbeError::Registry(RegistryError::Duplicate {
                name: "sonus_x".to_string(),
            }),
        );
        assert_eq!(
            err.to_string(),
            "default/EXT: Metric family sonus_x is already registered"
        );
        assert!(matches!(err.root(), ProbeError::Registry(_)));
    }

    #[test]
    fn test_label_arity_display() {
        let err = RegistryError::LabelArity {
            name: "sonus_fan_speed".to_string(),
            expected: 3,
            got: 2,
        };
        assert_eq!(
            err.to_string(),
            "Metric family sonus_fan_speed expects 3 label values, got 2"
        );
    }
}
