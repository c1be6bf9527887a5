//! Statement hooks around gateway execution.
//!
//! Hooks registered on a [`Table`](crate::gateway::Table) see each statement
//! before it is prepared (and may abort it) and again after it completes.
//!
//! # Example
//!
//! ```rust,ignore
//! use sqlgate::monitor::{HookAction, QueryContext, QueryHook, QueryType};
//!
//! // Refuse unfiltered deletes.
//! struct NoBlindDelete;
//!
//! impl QueryHook for NoBlindDelete {
//!     fn before_query(&self, ctx: &QueryContext) -> HookAction {
//!         if ctx.query_type == QueryType::Delete && !ctx.sql.contains(" WHERE ") {
//!             return HookAction::Abort("DELETE without WHERE".into());
//!         }
//!         HookAction::Continue
//!     }
//! }
//!
//! let users = Table::new(driver, "users").with_hook(NoBlindDelete);
//! ```

mod stats;
mod types;

#[cfg(feature = "tracing")]
mod tracing_hook;


pub use stats::{QueryStats, StatsHook};
pub use types::{HookAction, QueryContext, QueryHook, QueryResult, QueryType};

#[cfg(feature = "tracing")]
pub use tracing_hook::TracingSqlHook;

pub(crate) fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}
