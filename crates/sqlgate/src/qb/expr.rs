//! Filter expressions for WHERE clauses.
//!
//! An [`Expr`] is built by the caller and passed through the gateway untouched;
//! only the builder renders it. Column names are quoted for the active engine
//! and values go through literal quoting, so bind tokens such as `?`, `:id` or
//! `$1` stay bare while plain text is escaped.

use crate::qb::quote::Quoter;
use crate::value::Value;

/// Expression node for building WHERE clauses.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// AND group: all conditions must be true.
    And(Vec<Expr>),

    /// OR group: at least one condition must be true.
    Or(Vec<Expr>),

    /// NOT: negate the inner expression.
    Not(Box<Expr>),

    /// Simple comparison: column op value
    Compare {
        column: String,
        op: &'static str,
        value: Value,
    },

    /// NULL check: column IS NULL or column IS NOT NULL
    NullCheck { column: String, is_null: bool },

    /// IN list: column IN (a, b, ...) or column NOT IN (...)
    InList {
        column: String,
        values: Vec<Value>,
        negated: bool,
    },

    /// BETWEEN: column BETWEEN a AND b
    Between {
        column: String,
        from: Value,
        to: Value,
        negated: bool,
    },

    /// Raw SQL fragment, emitted verbatim.
    Raw(String),

    /// Always true (used for empty NOT IN lists).
    True,

    /// Always false (used for empty IN lists).
    False,
}

impl Expr {
    pub fn and(exprs: Vec<Expr>) -> Self {
        Expr::And(exprs)
    }

    pub fn or(exprs: Vec<Expr>) -> Self {
        Expr::Or(exprs)
    }

    pub fn not(expr: Expr) -> Self {
        Expr::Not(Box::new(expr))
    }

    fn compare(column: impl Into<String>, op: &'static str, value: impl Into<Value>) -> Self {
        Expr::Compare {
            column: column.into(),
            op,
            value: value.into(),
        }
    }

    /// column = value
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(column, "=", value)
    }

    /// column != value
    pub fn ne(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(column, "!=", value)
    }

    /// column > value
    pub fn gt(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(column, ">", value)
    }

    /// column >= value
    pub fn gte(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(column, ">=", value)
    }

    /// column < value
    pub fn lt(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(column, "<", value)
    }

    /// column <= value
    pub fn lte(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(column, "<=", value)
    }

    /// column LIKE pattern
    pub fn like(column: impl Into<String>, pattern: impl Into<Value>) -> Self {
        Self::compare(column, "LIKE", pattern)
    }

    /// column NOT LIKE pattern
    pub fn not_like(column: impl Into<String>, pattern: impl Into<Value>) -> Self {
        Self::compare(column, "NOT LIKE", pattern)
    }

    pub fn is_null(column: impl Into<String>) -> Self {
        Expr::NullCheck {
            column: column.into(),
            is_null: true,
        }
    }

    pub fn is_not_null(column: impl Into<String>) -> Self {
        Expr::NullCheck {
            column: column.into(),
            is_null: false,
        }
    }

    /// column IN (values...); an empty list never matches.
    pub fn in_list<V: Into<Value>>(column: impl Into<String>, values: Vec<V>) -> Self {
        if values.is_empty() {
            return Expr::False;
        }
        Expr::InList {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
            negated: false,
        }
    }

    /// column NOT IN (values...); an empty list always matches.
    pub fn not_in<V: Into<Value>>(column: impl Into<String>, values: Vec<V>) -> Self {
        if values.is_empty() {
            return Expr::True;
        }
        Expr::InList {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
            negated: true,
        }
    }

    pub fn between(
        column: impl Into<String>,
        from: impl Into<Value>,
        to: impl Into<Value>,
    ) -> Self {
        Expr::Between {
            column: column.into(),
            from: from.into(),
            to: to.into(),
            negated: false,
        }
    }

    pub fn not_between(
        column: impl Into<String>,
        from: impl Into<Value>,
        to: impl Into<Value>,
    ) -> Self {
        Expr::Between {
            column: column.into(),
            from: from.into(),
            to: to.into(),
            negated: true,
        }
    }

    pub fn raw(sql: impl Into<String>) -> Self {
        Expr::Raw(sql.into())
    }

    /// Check if this expression is empty (contains no conditions).
    pub fn is_empty(&self) -> bool {
        match self {
            Expr::And(exprs) | Expr::Or(exprs) => exprs.iter().all(Expr::is_empty),
            Expr::Not(inner) => inner.is_empty(),
            _ => false,
        }
    }

    /// Render the expression for the quoter's engine.
    pub fn render(&self, q: &Quoter<'_>) -> String {
        match self {
            Expr::And(exprs) => join_group(exprs, " AND ", q),
            Expr::Or(exprs) => join_group(exprs, " OR ", q),
            Expr::Not(inner) => {
                let sql = inner.render(q);
                if sql.is_empty() {
                    String::new()
                } else {
                    format!("NOT ({sql})")
                }
            }
            Expr::Compare { column, op, value } => {
                format!(
                    "{} {} {}",
                    q.quote_identifier(column),
                    op,
                    q.quote_literal(value)
                )
            }
            Expr::NullCheck { column, is_null } => {
                let check = if *is_null { "IS NULL" } else { "IS NOT NULL" };
                format!("{} {}", q.quote_identifier(column), check)
            }
            Expr::InList {
                column,
                values,
                negated,
            } => {
                if values.is_empty() {
                    return if *negated { "1=1" } else { "1=0" }.to_string();
                }
                let items: Vec<String> = values.iter().map(|v| q.quote_literal(v)).collect();
                let op = if *negated { "NOT IN" } else { "IN" };
                format!("{} {} ({})", q.quote_identifier(column), op, items.join(", "))
            }
            Expr::Between {
                column,
                from,
                to,
                negated,
            } => {
                let op = if *negated { "NOT BETWEEN" } else { "BETWEEN" };
                format!(
                    "{} {} {} AND {}",
                    q.quote_identifier(column),
                    op,
                    q.quote_literal(from),
                    q.quote_literal(to)
                )
            }
            Expr::Raw(sql) => sql.clone(),
            Expr::True => "1=1".to_string(),
            Expr::False => "1=0".to_string(),
        }
    }
}

/// Render `exprs` joined by `sep`, parenthesising nested groups of the other kind.
fn join_group(exprs: &[Expr], sep: &str, q: &Quoter<'_>) -> String {
    let parts: Vec<String> = exprs
        .iter()
        .filter(|e| !e.is_empty())
        .map(|e| {
            let sql = e.render(q);
            let nested = match e {
                Expr::Or(_) => sep == " AND ",
                Expr::And(_) => sep == " OR ",
                _ => false,
            };
            if nested && !sql.is_empty() {
                format!("({sql})")
            } else {
                sql
            }
        })
        .filter(|s| !s.is_empty())
        .collect();
    parts.join(sep)
}

/// Render a list of filters AND-ed together; empty input renders nothing.
pub(crate) fn render_filters(filters: &[Expr], q: &Quoter<'_>) -> String {
    join_group(filters, " AND ", q)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::RecordingDriver;
    use crate::engine::{EngineKind, EngineProfile};

    fn render(engine: EngineKind, expr: &Expr) -> String {
        let profile = EngineProfile::native(engine);
        let driver = RecordingDriver::new(engine);
        expr.render(&Quoter::new(&profile, &driver))
    }

    #[test]
    fn compare_quotes_column_and_value() {
        let expr = Expr::eq("name", "Ann");
        assert_eq!(render(EngineKind::MySql, &expr), "`name` = 'Ann'");
        assert_eq!(render(EngineKind::SqlServer, &expr), "[name] = 'Ann'");
    }

    #[test]
    fn placeholders_stay_bare() {
        assert_eq!(render(EngineKind::Postgres, &Expr::eq("age", "$1")), "\"age\" = $1");
        assert_eq!(render(EngineKind::Sqlite, &Expr::eq("id", ":id")), "\"id\" = :id");
        assert_eq!(render(EngineKind::MySql, &Expr::gt("age", "?")), "`age` > ?");
    }

    #[test]
    fn nested_groups_are_parenthesised() {
        let expr = Expr::and(vec![
            Expr::eq("status", "active"),
            Expr::or(vec![
                Expr::eq("role", "admin"),
                Expr::and(vec![Expr::eq("role", "user"), Expr::gt("score", 100)]),
            ]),
        ]);
        assert_eq!(
            render(EngineKind::Postgres, &expr),
            "\"status\" = 'active' AND (\"role\" = 'admin' OR (\"role\" = 'user' AND \"score\" > 100))"
        );
    }

    #[test]
    fn in_list_and_between() {
        assert_eq!(
            render(EngineKind::MySql, &Expr::in_list("id", vec![1, 2, 3])),
            "`id` IN (1, 2, 3)"
        );
        assert_eq!(render(EngineKind::MySql, &Expr::in_list::<i64>("id", vec![])), "1=0");
        assert_eq!(render(EngineKind::MySql, &Expr::not_in::<i64>("id", vec![])), "1=1");
        assert_eq!(
            render(EngineKind::Sqlite, &Expr::between("age", 18, 65)),
            "\"age\" BETWEEN 18 AND 65"
        );
    }

    #[test]
    fn null_checks_and_not() {
        let expr = Expr::not(Expr::is_null("deleted_at"));
        assert_eq!(render(EngineKind::Oracle, &expr), "NOT (\"deleted_at\" IS NULL)");
    }

    #[test]
    fn empty_groups_render_nothing() {
        assert!(Expr::and(vec![Expr::or(vec![])]).is_empty());
        assert_eq!(render(EngineKind::MySql, &Expr::and(vec![])), "");
    }
}
