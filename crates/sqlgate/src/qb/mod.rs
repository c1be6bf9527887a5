//! Multi-engine SQL statement builder.
//!
//! A [`StatementBuilder`] wraps one driver and renders SELECT, INSERT, UPDATE
//! and DELETE statements for the engine behind it:
//!
//! - identifiers are quoted with the engine's delimiters (`` `a` ``, `[a]`,
//!   `"a"`), dotted names segment by segment;
//! - INSERT/UPDATE placeholders follow the engine's bind syntax (`?`, `:col`,
//!   `$n`), with UPDATE ordinals shifted by
//!   [`UPDATE_PLACEHOLDER_OFFSET`](crate::engine::UPDATE_PLACEHOLDER_OFFSET);
//! - SELECT paging uses `LIMIT/OFFSET` or `OFFSET .. ROWS FETCH NEXT .. ROWS
//!   ONLY` depending on the engine.
//!
//! # Usage
//!
//! ```ignore
//! use sqlgate::qb::{Expr, StatementBuilder};
//!
//! let mut sql = StatementBuilder::new(driver).with_table("users");
//! sql.select(None)
//!     .and_where(Expr::eq("status", "active"))
//!     .limit(20);
//! let text = sql.render()?;
//!
//! let values = Row::new().with("name", "Ann").with("age", 30);
//! let placeholders = sql.insert_placeholders(&values);
//! sql.insert(Some(placeholders))?;
//! let text = sql.render()?;
//! ```

mod builder;
mod clause;
mod delete;
mod expr;
mod insert;
mod param;
mod quote;
mod select;
mod update;

pub use builder::{Statement, StatementBuilder};
pub use clause::{Clause, ClauseKind, ClauseSql, RenderContext};
pub use delete::Delete;
pub use expr::Expr;
pub use insert::Insert;
pub use param::{Param, ParamList};
pub use quote::Quoter;
pub use select::{OrderDirection, Select};
pub use update::Update;
