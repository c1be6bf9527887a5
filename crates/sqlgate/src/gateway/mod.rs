//! Table gateway: CRUD operations on one table.
//!
//! ```ignore
//! use sqlgate::gateway::{SelectOptions, Table};
//! use sqlgate::qb::Expr;
//!
//! let mut users = Table::new(driver, "users");
//! users.insert(Row::new().with("name", "Ann").with("age", 30))?;
//! users.select(
//!     None,
//!     Some(Expr::gt("age", "?")),
//!     vec![18],
//!     &SelectOptions::new().order("name").limit(10),
//! )?;
//! for row in users.rows() {
//!     println!("{:?}", row.get("name"));
//! }
//! ```

mod options;
mod table;

#[cfg(test)]
mod tests;

pub use options::{Order, OrderSpec, SelectOptions};
pub use table::Table;
