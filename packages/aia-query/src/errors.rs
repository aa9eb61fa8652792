//! Error types for aia-query
//!
//! Every fallible query operation returns [`Result`]. Configuration loading
//! has its own [`crate::config::ConfigError`].

use crate::features::entity_model::EntityKind;
use thiserror::Error;

/// Main error type for model construction and query evaluation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum QueryError {
    /// Lookup by name or id missed
    #[error("{what} '{key}' not found")]
    NotFound { what: &'static str, key: String },

    /// Attribute is not defined for this kind of entity
    #[error("attribute '{attribute}' is not supported on {kind} entities")]
    UnsupportedAttribute { attribute: String, kind: EntityKind },

    /// Values cannot be ordered against each other, or are not numeric
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    /// min/max/avg/median over an empty sequence
    #[error("cannot compute {0} of an empty sequence")]
    EmptyAggregation(&'static str),

    /// Builder consistency violation
    #[error("invalid model: {0}")]
    InvalidModel(String),

    /// Malformed expression (bad regex, unknown attribute name, ...)
    #[error("invalid expression: {0}")]
    InvalidExpression(String),

    /// Component descriptor could not be read
    #[error("catalog error: {0}")]
    Catalog(String),
}

impl QueryError {
    pub fn not_found(what: &'static str, key: impl Into<String>) -> Self {
        QueryError::NotFound {
            what,
            key: key.into(),
        }
    }

    pub fn unsupported(attribute: impl ToString, kind: EntityKind) -> Self {
        QueryError::UnsupportedAttribute {
            attribute: attribute.to_string(),
            kind,
        }
    }

    pub fn type_mismatch(msg: impl Into<String>) -> Self {
        QueryError::TypeMismatch(msg.into())
    }

    pub fn invalid_model(msg: impl Into<String>) -> Self {
        QueryError::InvalidModel(msg.into())
    }

    pub fn invalid_expression(msg: impl Into<String>) -> Self {
        QueryError::InvalidExpression(msg.into())
    }

    /// True for the one error kind filters swallow in lenient mode.
    pub fn is_unsupported_attribute(&self) -> bool {
        matches!(self, QueryError::UnsupportedAttribute { .. })
    }
}

impl From<serde_json::Error> for QueryError {
    fn from(err: serde_json::Error) -> Self {
        QueryError::Catalog(err.to_string())
    }
}

/// Result type alias for query operations
pub type Result<T> = std::result::Result<T, QueryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = QueryError::not_found("screen", "Screen9");
        assert_eq!(err.to_string(), "screen 'Screen9' not found");

        let err = QueryError::unsupported("name", EntityKind::Block);
        assert_eq!(
            err.to_string(),
            "attribute 'name' is not supported on block entities"
        );
        assert!(err.is_unsupported_attribute());
        assert!(!QueryError::EmptyAggregation("avg").is_unsupported_attribute());
    }

    #[test]
    fn test_json_error_maps_to_catalog() {
        let err: QueryError = serde_json::from_str::<serde_json::Value>("{oops")
            .unwrap_err()
            .into();
        assert!(matches!(err, QueryError::Catalog(_)));
    }
}
