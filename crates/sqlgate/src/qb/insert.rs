//! INSERT clause.

use crate::qb::clause::{ClauseKind, ClauseSql, RenderContext};
use crate::value::{Row, Value};

/// INSERT clause: one row of column values.
///
/// Values are usually placeholders produced by
/// [`StatementBuilder::insert_placeholders`](crate::qb::StatementBuilder::insert_placeholders),
/// but literal values are quoted like any other literal.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Insert {
    values: Row,
}

impl Insert {
    pub fn new(values: Row) -> Self {
        Self { values }
    }

    /// Set a column value; re-setting a column keeps its position.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.values.set(column, value);
        self
    }

    /// Replace all column values.
    pub fn values(&mut self, values: Row) -> &mut Self {
        self.values = values;
        self
    }

    pub fn row(&self) -> &Row {
        &self.values
    }
}

impl ClauseSql for Insert {
    fn kind(&self) -> ClauseKind {
        ClauseKind::Insert
    }

    fn render(&self, ctx: &RenderContext<'_>) -> String {
        let q = ctx.quoter();
        let columns: Vec<String> = self.values.columns().map(|c| q.quote_identifier(c)).collect();
        let values: Vec<String> = self.values.values().map(|v| q.quote_literal(v)).collect();

        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            ctx.table(),
            columns.join(","),
            values.join(",")
        )
    }
}
