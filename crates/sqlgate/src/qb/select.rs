//! SELECT clause.

use crate::engine::EngineKind;
use crate::qb::clause::{ClauseKind, ClauseSql, RenderContext};
use crate::qb::expr::{render_filters, Expr};

/// Upper bound MySQL accepts as "no limit" when only an OFFSET is wanted.
const MYSQL_MAX_LIMIT: &str = "18446744073709551615";

/// Sort direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    Asc,
    Desc,
    /// Random order, rendered with the engine's random function.
    Random,
}

impl OrderDirection {
    /// Parse a direction keyword; anything unrecognized sorts ascending.
    pub fn parse(direction: &str) -> Self {
        match direction.trim().to_ascii_uppercase().as_str() {
            "DESC" => OrderDirection::Desc,
            "RAND()" | "RANDOM()" | "RAND" | "RANDOM" => OrderDirection::Random,
            _ => OrderDirection::Asc,
        }
    }

    /// Check if a token names a direction rather than a column.
    pub fn is_keyword(token: &str) -> bool {
        matches!(
            token.trim().to_ascii_uppercase().as_str(),
            "ASC" | "DESC" | "RAND()" | "RANDOM()" | "RAND" | "RANDOM"
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
struct OrderBy {
    columns: Vec<String>,
    direction: OrderDirection,
}

/// SELECT clause under construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Select {
    /// Columns; empty means `*`
    columns: Vec<String>,
    distinct: bool,
    /// WHERE conditions, AND-ed
    filters: Vec<Expr>,
    order: Vec<OrderBy>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl Select {
    /// Create a `SELECT *` clause.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selected columns.
    pub fn columns<I, S>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Append one column.
    pub fn add_column(&mut self, column: impl Into<String>) -> &mut Self {
        self.columns.push(column.into());
        self
    }

    pub fn distinct(&mut self, distinct: bool) -> &mut Self {
        self.distinct = distinct;
        self
    }

    /// Add a WHERE condition (AND-ed with existing ones).
    pub fn and_where(&mut self, expr: Expr) -> &mut Self {
        self.filters.push(expr);
        self
    }

    /// Add WHERE: column = value
    pub fn where_eq(
        &mut self,
        column: impl Into<String>,
        value: impl Into<crate::value::Value>,
    ) -> &mut Self {
        self.and_where(Expr::eq(column, value))
    }

    /// Add ORDER BY over one or more columns.
    pub fn order_by<I, S>(&mut self, columns: I, direction: OrderDirection) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.order.push(OrderBy {
            columns: columns.into_iter().map(Into::into).collect(),
            direction,
        });
        self
    }

    pub fn limit(&mut self, n: u64) -> &mut Self {
        self.limit = Some(n);
        self
    }

    pub fn offset(&mut self, n: u64) -> &mut Self {
        self.offset = Some(n);
        self
    }

    pub fn get_limit(&self) -> Option<u64> {
        self.limit
    }

    pub fn get_offset(&self) -> Option<u64> {
        self.offset
    }

    fn render_columns(&self, ctx: &RenderContext<'_>) -> String {
        if self.columns.is_empty() {
            return "*".to_string();
        }
        self.columns
            .iter()
            .map(|c| {
                // Expressions and aliases pass through untouched.
                if c == "*" || c.contains('(') || c.contains(' ') {
                    c.clone()
                } else {
                    ctx.quoter().quote_identifier(c)
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn render_order(&self, ctx: &RenderContext<'_>, sql: &mut String) {
        let parts: Vec<String> = self
            .order
            .iter()
            .flat_map(|o| -> Vec<String> {
                match o.direction {
                    OrderDirection::Random => {
                        let random = ctx
                            .quoter()
                            .engine()
                            .map_or("RAND()", EngineKind::random_function);
                        vec![random.to_string()]
                    }
                    OrderDirection::Asc | OrderDirection::Desc => {
                        let dir = if o.direction == OrderDirection::Desc {
                            "DESC"
                        } else {
                            "ASC"
                        };
                        o.columns
                            .iter()
                            .map(|c| format!("{} {}", ctx.quoter().quote_identifier(c), dir))
                            .collect()
                    }
                }
            })
            .collect();

        if !parts.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&parts.join(", "));
        } else if ctx.quoter().engine() == Some(EngineKind::SqlServer)
            && (self.limit.is_some() || self.offset.is_some())
        {
            // OFFSET/FETCH is only valid after an ORDER BY on SQL Server.
            sql.push_str(" ORDER BY (SELECT NULL)");
        }
    }

    fn render_paging(&self, ctx: &RenderContext<'_>, sql: &mut String) {
        if self.limit.is_none() && self.offset.is_none() {
            return;
        }
        match ctx.quoter().engine() {
            Some(EngineKind::SqlServer | EngineKind::Oracle) => {
                sql.push_str(&format!(" OFFSET {} ROWS", self.offset.unwrap_or(0)));
                if let Some(limit) = self.limit {
                    sql.push_str(&format!(" FETCH NEXT {limit} ROWS ONLY"));
                }
            }
            engine => {
                match (self.limit, engine) {
                    (Some(limit), _) => sql.push_str(&format!(" LIMIT {limit}")),
                    (None, Some(EngineKind::MySql)) => {
                        sql.push_str(&format!(" LIMIT {MYSQL_MAX_LIMIT}"));
                    }
                    (None, Some(EngineKind::Sqlite)) => sql.push_str(" LIMIT -1"),
                    (None, _) => {}
                }
                if let Some(offset) = self.offset {
                    sql.push_str(&format!(" OFFSET {offset}"));
                }
            }
        }
    }
}

impl ClauseSql for Select {
    fn kind(&self) -> ClauseKind {
        ClauseKind::Select
    }

    fn render(&self, ctx: &RenderContext<'_>) -> String {
        let mut sql = String::from("SELECT ");
        if self.distinct {
            sql.push_str("DISTINCT ");
        }
        sql.push_str(&self.render_columns(ctx));
        sql.push_str(" FROM ");
        sql.push_str(&ctx.table_with_alias());

        let where_sql = render_filters(&self.filters, ctx.quoter());
        if !where_sql.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&where_sql);
        }

        self.render_order(ctx, &mut sql);
        self.render_paging(ctx, &mut sql);
        sql
    }
}
