//! # sqlgate
//!
//! A multi-engine SQL statement builder and table gateway.
//!
//! ## Features
//!
//! - **Five engines**: MySQL, Oracle, PostgreSQL, SQLite and SQL Server, plus a
//!   pass-through profile for unrecognized drivers
//! - **Detected once**: identifier quoting and placeholder syntax are derived
//!   from the driver's capabilities when the builder is created
//! - **Generic interface aware**: drivers behind a generic prepared-statement
//!   layer always bind by `:name`
//! - **Table gateway**: select / insert / update / delete on one table with
//!   correctly numbered placeholders and bind order
//! - **Hooks**: inspect, count, log or veto every statement before it runs
//!
//! ## Statement Builder
//!
//! ```ignore
//! use sqlgate::{Expr, StatementBuilder};
//!
//! let mut sql = StatementBuilder::new(driver).with_table("users");
//! sql.select(Some(&["id", "name"]))
//!     .and_where(Expr::eq("status", "?"))
//!     .limit(10);
//! let text = sql.render()?; // SELECT `id`, `name` FROM `users` WHERE `status` = ? LIMIT 10
//! ```
//!
//! ## Table Gateway
//!
//! ```ignore
//! use sqlgate::{Row, SelectOptions, Table};
//!
//! let mut users = Table::new(driver, "users");
//! users.insert(Row::new().with("name", "Ann").with("age", 30))?;
//! users.update(Row::new().with("age", 31), Some(Expr::eq("age", "$1")), vec![30])?;
//! users.select(None, None, ParamList::new(), &SelectOptions::new().order("name"))?;
//! ```

pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod gateway;
pub mod monitor;
pub mod qb;
pub mod value;

pub use config::SqlConfig;
pub use driver::{Driver, DriverResult, Escape, RecordedStatement, RecordingDriver};
pub use engine::{
    EngineKind, EngineProfile, PlaceholderStyle, QuoteStyle, UPDATE_PLACEHOLDER_OFFSET,
};
pub use error::{DbError, DbResult, DriverError};
pub use gateway::{Order, OrderSpec, SelectOptions, Table};
pub use monitor::{HookAction, QueryContext, QueryHook, QueryResult, QueryStats, QueryType, StatsHook};
pub use qb::{
    Clause, ClauseKind, Delete, Expr, Insert, OrderDirection, Param, ParamList, Select, Statement,
    StatementBuilder, Update,
};
pub use value::{Row, RowSet, Value};

#[cfg(feature = "tracing")]
pub use monitor::TracingSqlHook;
