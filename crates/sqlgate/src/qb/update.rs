//! UPDATE clause.

use crate::qb::clause::{ClauseKind, ClauseSql, RenderContext};
use crate::qb::expr::{render_filters, Expr};
use crate::value::{Row, Value};

/// UPDATE clause: SET assignments plus an optional filter.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Update {
    values: Row,
    filters: Vec<Expr>,
}

impl Update {
    pub fn new(values: Row) -> Self {
        Self {
            values,
            filters: Vec::new(),
        }
    }

    /// Set a column value; re-setting a column keeps its position.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.values.set(column, value);
        self
    }

    /// Replace all SET assignments.
    pub fn values(&mut self, values: Row) -> &mut Self {
        self.values = values;
        self
    }

    pub fn row(&self) -> &Row {
        &self.values
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
}

impl ClauseSql for Update {
    fn kind(&self) -> ClauseKind {
        ClauseKind::Update
    }

    fn render(&self, ctx: &RenderContext<'_>) -> String {
        let q = ctx.quoter();
        let sets: Vec<String> = self
            .values
            .iter()
            .map(|(c, v)| format!("{} = {}", q.quote_identifier(c), q.quote_literal(v)))
            .collect();

        let mut sql = format!("UPDATE {} SET {}", ctx.table(), sets.join(", "));

        let where_sql = render_filters(&self.filters, q);
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

    fn render(engine: EngineKind, update: &Update) -> String {
        let profile = EngineProfile::native(engine);
        let driver = RecordingDriver::new(engine);
        update.render(&RenderContext::new(Quoter::new(&profile, &driver), "users", None))
    }

    #[test]
    fn test_update_with_dollar_placeholders() {
        let mut update = Update::new(Row::new().with("age", "$2"));
        update.where_eq("age", "$1");
        assert_eq!(
            render(EngineKind::Postgres, &update),
            "UPDATE \"users\" SET \"age\" = $2 WHERE \"age\" = $1"
        );
    }

    #[test]
    fn test_update_multiple_columns_without_filter() {
        let update = Update::new(Row::new().with("name", "?").with("age", "?"));
        assert_eq!(
            render(EngineKind::MySql, &update),
            "UPDATE `users` SET `name` = ?, `age` = ?"
        );
    }

    #[test]
    fn test_update_filters_are_anded() {
        let mut update = Update::new(Row::new().with("status", "inactive"));
        update
            .and_where(Expr::lt("last_login", "2020-01-01"))
            .and_where(Expr::is_not_null("email"));
        assert_eq!(
            render(EngineKind::Sqlite, &update),
            "UPDATE \"users\" SET \"status\" = 'inactive' WHERE \"last_login\" < '2020-01-01' AND \"email\" IS NOT NULL"
        );
    }
}
