//! Driver trait for the connection the builder and gateway talk to.
//!
//! The driver owns the actual connection, prepared-statement resources,
//! transactions and pooling. sqlgate only asks it to escape strings, report
//! its capabilities and run prepared statements.

use crate::engine::EngineKind;
use crate::error::DriverError;
use crate::qb::ParamList;
use crate::value::Row;
use std::collections::VecDeque;

/// Result type alias for driver calls
pub type DriverResult<T> = Result<T, DriverError>;

/// String escaping used when rendering literal values.
pub trait Escape {
    /// Escape a string so it can be embedded between single quotes.
    fn escape(&self, value: &str) -> String;
}

/// A raw database connection.
///
/// `prepare`, `bind_params` and `execute` return the driver itself so calls
/// chain: `driver.prepare(sql)?.bind_params(&params)?.execute()?`.
pub trait Driver: Escape {
    /// Whether statements go through the generic prepared-statement interface,
    /// which binds by `:name` regardless of the engine behind it.
    fn is_generic_prepared_interface(&self) -> bool;

    /// Declared driver type of the generic interface (`"sqlite"`, `"pgsql"`,
    /// `"mysql"`, ...). Only meaningful when the generic interface is in use.
    fn declared_driver_type(&self) -> Option<&str>;

    /// The engine this driver's native adapter talks to, if known.
    fn native_engine(&self) -> Option<EngineKind>;

    /// Prepare a statement for execution.
    fn prepare(&mut self, sql: &str) -> DriverResult<&mut Self>;

    /// Bind parameters to the prepared statement.
    fn bind_params(&mut self, params: &ParamList) -> DriverResult<&mut Self>;

    /// Execute the prepared statement.
    fn execute(&mut self) -> DriverResult<&mut Self>;

    /// Fetch all rows produced by the last execution.
    fn fetch_result(&mut self) -> DriverResult<Vec<Row>>;
}

/// One statement as seen by a [`RecordingDriver`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedStatement {
    pub sql: String,
    pub params: Option<ParamList>,
    pub executed: bool,
}

/// An in-memory driver that records statements instead of running them.
///
/// Useful for tests and for previewing the SQL a gateway would issue. Result
/// sets queued with [`RecordingDriver::push_result`] are returned by
/// `fetch_result` in FIFO order (an empty set once the queue is drained).
#[derive(Debug, Clone, Default)]
pub struct RecordingDriver {
    engine: Option<EngineKind>,
    generic: bool,
    declared: Option<String>,
    statements: Vec<RecordedStatement>,
    results: VecDeque<Vec<Row>>,
    fail_on_execute: Option<usize>,
    executions: usize,
}

impl RecordingDriver {
    /// A native driver for `engine`.
    pub fn new(engine: EngineKind) -> Self {
        Self {
            engine: Some(engine),
            ..Self::default()
        }
    }

    /// A driver whose engine is not recognized.
    pub fn unrecognized() -> Self {
        Self::default()
    }

    /// A generic prepared-statement interface declaring `driver_type`.
    pub fn generic(native: Option<EngineKind>, driver_type: impl Into<String>) -> Self {
        Self {
            engine: native,
            generic: true,
            declared: Some(driver_type.into()),
            ..Self::default()
        }
    }

    /// Queue a result set for the next `fetch_result`.
    pub fn push_result(&mut self, rows: Vec<Row>) -> &mut Self {
        self.results.push_back(rows);
        self
    }

    /// Make the `n`-th `execute` call (1-based) fail.
    pub fn fail_on_execute(mut self, n: usize) -> Self {
        self.fail_on_execute = Some(n);
        self
    }

    /// Every statement prepared so far.
    pub fn statements(&self) -> &[RecordedStatement] {
        &self.statements
    }

    /// The most recently prepared statement.
    pub fn last_statement(&self) -> Option<&RecordedStatement> {
        self.statements.last()
    }

    /// Number of statements that executed successfully.
    pub fn executed_count(&self) -> usize {
        self.statements.iter().filter(|s| s.executed).count()
    }

    fn current(&mut self) -> DriverResult<&mut RecordedStatement> {
        self.statements
            .last_mut()
            .ok_or_else(|| DriverError::new("no statement has been prepared"))
    }
}

impl Escape for RecordingDriver {
    fn escape(&self, value: &str) -> String {
        value.replace('\'', "''")
    }
}

impl Driver for RecordingDriver {
    fn is_generic_prepared_interface(&self) -> bool {
        self.generic
    }

    fn declared_driver_type(&self) -> Option<&str> {
        self.declared.as_deref()
    }

    fn native_engine(&self) -> Option<EngineKind> {
        self.engine
    }

    fn prepare(&mut self, sql: &str) -> DriverResult<&mut Self> {
        self.statements.push(RecordedStatement {
            sql: sql.to_string(),
            params: None,
            executed: false,
        });
        Ok(self)
    }

    fn bind_params(&mut self, params: &ParamList) -> DriverResult<&mut Self> {
        self.current()?.params = Some(params.clone());
        Ok(self)
    }

    fn execute(&mut self) -> DriverResult<&mut Self> {
        self.executions += 1;
        if self.fail_on_execute == Some(self.executions) {
            return Err(DriverError::new(format!(
                "execution {} failed",
                self.executions
            )));
        }
        self.current()?.executed = true;
        Ok(self)
    }

    fn fetch_result(&mut self) -> DriverResult<Vec<Row>> {
        Ok(self.results.pop_front().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn records_prepare_bind_execute() {
        let mut driver = RecordingDriver::new(EngineKind::MySql);
        let mut params = ParamList::new();
        params.push(Value::from("Ann"));

        driver
            .prepare("SELECT 1")
            .unwrap()
            .bind_params(&params)
            .unwrap()
            .execute()
            .unwrap();

        let stmt = driver.last_statement().unwrap();
        assert_eq!(stmt.sql, "SELECT 1");
        assert_eq!(stmt.params.as_ref().map(ParamList::len), Some(1));
        assert!(stmt.executed);
    }

    #[test]
    fn execute_without_prepare_fails() {
        let mut driver = RecordingDriver::new(EngineKind::Sqlite);
        assert!(driver.execute().is_err());
    }

    #[test]
    fn fails_on_requested_execution() {
        let mut driver = RecordingDriver::new(EngineKind::Postgres).fail_on_execute(2);
        driver.prepare("A").unwrap().execute().unwrap();
        let err = driver.prepare("B").unwrap().execute().unwrap_err();
        assert_eq!(err.message(), "execution 2 failed");
        assert_eq!(driver.executed_count(), 1);
    }

    #[test]
    fn results_are_fifo() {
        let mut driver = RecordingDriver::new(EngineKind::Sqlite);
        driver
            .push_result(vec![Row::new().with("id", 1)])
            .push_result(vec![]);
        assert_eq!(driver.fetch_result().unwrap().len(), 1);
        assert!(driver.fetch_result().unwrap().is_empty());
        assert!(driver.fetch_result().unwrap().is_empty());
    }

    #[test]
    fn escape_doubles_single_quotes() {
        let driver = RecordingDriver::unrecognized();
        assert_eq!(driver.escape("O'Brien"), "O''Brien");
    }
}
