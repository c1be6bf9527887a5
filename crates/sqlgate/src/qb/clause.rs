//! The clause variants a builder can hold and the context they render in.

use crate::qb::delete::Delete;
use crate::qb::insert::Insert;
use crate::qb::quote::Quoter;
use crate::qb::select::Select;
use crate::qb::update::Update;
use std::fmt;

/// The kind of statement a clause renders to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClauseKind {
    Select,
    Insert,
    Update,
    Delete,
}

impl fmt::Display for ClauseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ClauseKind::Select => "SELECT",
            ClauseKind::Insert => "INSERT",
            ClauseKind::Update => "UPDATE",
            ClauseKind::Delete => "DELETE",
        })
    }
}

/// Everything a clause needs at render time.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    quoter: Quoter<'a>,
    table: &'a str,
    alias: Option<&'a str>,
}

impl<'a> RenderContext<'a> {
    pub fn new(quoter: Quoter<'a>, table: &'a str, alias: Option<&'a str>) -> Self {
        Self {
            quoter,
            table,
            alias,
        }
    }

    pub fn quoter(&self) -> &Quoter<'a> {
        &self.quoter
    }

    /// The quoted target table, without alias.
    pub fn table(&self) -> String {
        self.quoter.quote_identifier(self.table)
    }

    /// The quoted target table followed by `AS alias` when one is set.
    pub fn table_with_alias(&self) -> String {
        match self.alias {
            Some(alias) => format!(
                "{} AS {}",
                self.table(),
                self.quoter.quote_identifier(alias)
            ),
            None => self.table(),
        }
    }
}

/// Base trait for all clauses.
pub trait ClauseSql {
    /// Which statement this clause renders.
    fn kind(&self) -> ClauseKind;

    /// Render the SQL text.
    fn render(&self, ctx: &RenderContext<'_>) -> String;
}

/// The builder's live clause.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    Select(Select),
    Insert(Insert),
    Update(Update),
    Delete(Delete),
}

impl ClauseSql for Clause {
    fn kind(&self) -> ClauseKind {
        match self {
            Clause::Select(_) => ClauseKind::Select,
            Clause::Insert(_) => ClauseKind::Insert,
            Clause::Update(_) => ClauseKind::Update,
            Clause::Delete(_) => ClauseKind::Delete,
        }
    }

    fn render(&self, ctx: &RenderContext<'_>) -> String {
        match self {
            Clause::Select(c) => c.render(ctx),
            Clause::Insert(c) => c.render(ctx),
            Clause::Update(c) => c.render(ctx),
            Clause::Delete(c) => c.render(ctx),
        }
    }
}

impl From<Select> for Clause {
    fn from(c: Select) -> Self {
        Clause::Select(c)
    }
}

impl From<Insert> for Clause {
    fn from(c: Insert) -> Self {
        Clause::Insert(c)
    }
}

impl From<Update> for Clause {
    fn from(c: Update) -> Self {
        Clause::Update(c)
    }
}

impl From<Delete> for Clause {
    fn from(c: Delete) -> Self {
        Clause::Delete(c)
    }
}
