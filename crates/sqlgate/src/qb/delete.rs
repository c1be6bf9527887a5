//! DELETE clause.

use crate::qb::clause::{ClauseKind, ClauseSql, RenderContext};
use crate::qb::expr::{render_filters, Expr};
use crate::value::Value;

/// DELETE clause. Without a filter every row of the table is deleted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Delete {
    filters: Vec<Expr>,
}

impl Delete {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a WHERE condition (AND-ed with existing ones).
    pub fn and_where(&mut self, expr: Expr) -> &mut Self {
        self.filters.push(expr);
        self
    }

    /// Add WHERE: column = value
    pub fn where_eq(&mut self, column: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.and_where(Expr::eq(column, value))
    }

    pub fn has_filter(&self) -> bool {
        self.filters.iter().any(|f| !f.is_empty())
    }
}

impl ClauseSql for Delete {
    fn kind(&self) -> ClauseKind {
        ClauseKind::Delete
    }

    fn render(&self, ctx: &RenderContext<'_>) -> String {
        let mut sql = format!("DELETE FROM {}", ctx.table());
        let where_sql = render_filters(&self.filters, ctx.quoter());
        if !where_sql.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&where_sql);
        }
        sql
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::RecordingDriver;
    use crate::engine::{EngineKind, EngineProfile};
    use crate::qb::quote::Quoter;

    fn render(engine: EngineKind, delete: &Delete) -> String {
        let profile = EngineProfile::native(engine);
        let driver = RecordingDriver::new(engine);
        delete.render(&RenderContext::new(Quoter::new(&profile, &driver), "users", None))
    }

    #[test]
    fn test_delete_all() {
        let delete = Delete::new();
        assert!(!delete.has_filter());
        assert_eq!(render(EngineKind::Oracle, &delete), "DELETE FROM \"users\"");
    }

    #[test]
    fn test_delete_with_filter() {
        let mut delete = Delete::new();
        delete.where_eq("id", "?");
        assert!(delete.has_filter());
        assert_eq!(render(EngineKind::SqlServer, &delete), "DELETE FROM [users] WHERE [id] = ?");
    }
}
