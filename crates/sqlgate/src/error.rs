//! Error types for sqlgate

use crate::qb::ClauseKind;
use thiserror::Error;

/// Result type alias for sqlgate operations
pub type DbResult<T> = Result<T, DbError>;

/// Error raised by a driver during prepare/bind/execute/fetch.
///
/// Drivers construct this with whatever message the engine reported; the
/// builder and gateway never inspect or rewrite it.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct DriverError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl DriverError {
    /// Create a driver error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Create a driver error wrapping an underlying error.
    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// The message reported by the driver.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Error types for statement building and gateway operations
#[derive(Debug, Error)]
pub enum DbError {
    /// Builder constructed without a usable driver or with invalid settings
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Gateway operation attempted with no table bound
    #[error("The table has not been set")]
    NoTable,

    /// Render attempted with no active clause
    #[error("No SQL clause has been created yet")]
    NoClause,

    /// INSERT/UPDATE attempted with no column data and no clause to reuse
    #[error("The columns parameter cannot be empty for a new {0} clause")]
    MissingColumns(ClauseKind),

    /// Failure surfaced by the driver
    #[error("Driver error: {0}")]
    Driver(#[from] DriverError),

    /// Malformed input (row sets, options)
    #[error("Validation error: {0}")]
    Validation(String),

    /// A statement hook refused to let the statement run
    #[error("Statement aborted by hook: {0}")]
    Aborted(String),
}

impl DbError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Check if this is a missing-table error
    pub fn is_no_table(&self) -> bool {
        matches!(self, Self::NoTable)
    }

    /// Check if this is a missing-clause error
    pub fn is_no_clause(&self) -> bool {
        matches!(self, Self::NoClause)
    }

    /// Check if this is a missing-columns error
    pub fn is_missing_columns(&self) -> bool {
        matches!(self, Self::MissingColumns(_))
    }

    /// Check if this error came from the driver
    pub fn is_driver(&self) -> bool {
        matches!(self, Self::Driver(_))
    }

    /// Whether SQL may already have reached the driver when this error was raised.
    ///
    /// Only driver failures happen after a statement is handed over; every other
    /// variant is raised before anything is prepared.
    pub fn sql_may_have_run(&self) -> bool {
        self.is_driver()
    }
}
