use std::fmt;
use std::time::Duration;

/// The type of SQL operation being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryType {
    /// SELECT query
    Select,
    /// INSERT statement
    Insert,
    /// UPDATE statement
    Update,
    /// DELETE statement
    Delete,
    /// Anything else
    Other,
}

impl QueryType {
    /// Detect query type from the leading keyword of a SQL string.
    pub fn from_sql(sql: &str) -> Self {
        let trimmed = sql.trim_start();
        if starts_with_keyword(trimmed, "SELECT") {
            QueryType::Select
        } else if starts_with_keyword(trimmed, "INSERT") {
            QueryType::Insert
        } else if starts_with_keyword(trimmed, "UPDATE") {
            QueryType::Update
        } else if starts_with_keyword(trimmed, "DELETE") {
            QueryType::Delete
        } else {
            QueryType::Other
        }
    }
}

fn starts_with_keyword(sql: &str, keyword: &str) -> bool {
    sql.get(..keyword.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(keyword))
        && sql[keyword.len()..]
            .chars()
            .next()
            .is_none_or(|c| !c.is_ascii_alphanumeric() && c != '_')
}

/// What a hook sees about the statement about to run.
#[derive(Debug, Clone)]
pub struct QueryContext {
    /// The SQL handed to the driver.
    pub sql: String,
    /// Number of bound parameters (0 when nothing is bound).
    pub param_count: usize,
    /// Detected query type.
    pub query_type: QueryType,
    /// The gateway's table, when known.
    pub table: Option<String>,
}

impl QueryContext {
    pub fn new(sql: &str, param_count: usize) -> Self {
        Self {
            sql: sql.to_string(),
            param_count,
            query_type: QueryType::from_sql(sql),
            table: None,
        }
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }
}

/// Maximum length for error messages in `QueryResult::Error`.
const MAX_ERROR_LEN: usize = 512;

/// Outcome of one statement, as reported to hooks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryResult {
    /// A SELECT fetched this many rows.
    Rows(usize),
    /// A write statement executed.
    Executed,
    /// The driver failed (message truncated to 512 bytes).
    Error(String),
}

impl QueryResult {
    /// Create an error result, truncating long messages.
    pub fn error(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        if msg.len() > MAX_ERROR_LEN {
            Self::Error(format!("{}...", super::truncate_sql_bytes(&msg, MAX_ERROR_LEN)))
        } else {
            Self::Error(msg)
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, QueryResult::Error(_))
    }
}

impl fmt::Display for QueryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryResult::Rows(n) => write!(f, "{n} rows"),
            QueryResult::Executed => f.write_str("executed"),
            QueryResult::Error(e) => write!(f, "error: {e}"),
        }
    }
}

/// Action to take after a hook inspects a statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookAction {
    /// Run the statement.
    Continue,
    /// Refuse to run the statement; surfaces as `DbError::Aborted`.
    Abort(String),
}

/// Trait for hooking into statement execution.
///
/// Hooks run in registration order. The first `Abort` stops the statement
/// before it is prepared.
pub trait QueryHook: Send + Sync {
    /// Called before the statement is prepared.
    fn before_query(&self, ctx: &QueryContext) -> HookAction {
        let _ = ctx;
        HookAction::Continue
    }

    /// Called after the statement completes (success or failure).
    fn after_query(&self, _ctx: &QueryContext, _duration: Duration, _result: &QueryResult) {}
}
