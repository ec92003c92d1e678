//! Error types for dialect translation and execution.

use thiserror::Error;

/// The main error type for translation and execution.
#[derive(Debug, Error)]
pub enum DialectError {
    /// A well-formed IR node requests a feature the active dialect cannot
    /// express. Raised before any SQL is sent to the backend.
    #[error("{feature} is not supported on {dialect}")]
    Unsupported {
        feature: String,
        dialect: &'static str,
    },

    /// The caller handed the translator something outside the IR contract
    /// (a programmer bug, never data-dependent).
    #[error("Configuration error: {0}")]
    Config(String),

    /// No dialect registered under the given name.
    #[error("Unknown dialect: '{0}'")]
    UnknownDialect(String),

    /// The backend rejected a statement. Carries the rendered SQL so the
    /// failure can be reproduced.
    #[error("Execution error: {message} (sql: {sql})")]
    Execution { message: String, sql: String },

    /// Failure establishing or using the underlying connection.
    #[error("Connection error: {0}")]
    Connection(String),
}

impl DialectError {
    /// Create a capability error for the given feature and dialect.
    pub fn unsupported(feature: impl Into<String>, dialect: &'static str) -> Self {
        Self::Unsupported {
            feature: feature.into(),
            dialect,
        }
    }

    /// Create an execution error that has not yet been tied to a statement.
    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution {
            message: message.into(),
            sql: String::new(),
        }
    }

    /// Attach the rendered SQL to an execution error, leaving other
    /// variants untouched. Translation errors never carry backend SQL.
    pub fn with_sql(self, sql: &str) -> Self {
        match self {
            Self::Execution { message, sql: old } if old.is_empty() => Self::Execution {
                message,
                sql: sql.to_string(),
            },
            other => other,
        }
    }
}

/// Result type alias for dialect operations.
pub type DialectResult<T> = Result<T, DialectError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DialectError::unsupported("IS TRUE", "hsqldb");
        assert_eq!(err.to_string(), "IS TRUE is not supported on hsqldb");
    }

    #[test]
    fn test_with_sql_annotates_execution_only() {
        let err = DialectError::execution("syntax error").with_sql("SELECT *");
        assert_eq!(
            err.to_string(),
            "Execution error: syntax error (sql: SELECT *)"
        );

        let err = DialectError::unsupported("DROP COLUMN", "vertica").with_sql("x");
        assert!(matches!(err, DialectError::Unsupported { .. }));
    }
}
