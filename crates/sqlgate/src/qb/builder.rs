//! The statement builder: one driver, one engine profile, at most one live clause.

use crate::config::SqlConfig;
use crate::driver::Driver;
use crate::engine::{EngineKind, EngineProfile, PlaceholderStyle, QuoteStyle};
use crate::error::{DbError, DbResult};
use crate::qb::clause::{Clause, ClauseKind, ClauseSql, RenderContext};
use crate::qb::delete::Delete;
use crate::qb::insert::Insert;
use crate::qb::param::ParamList;
use crate::qb::quote::Quoter;
use crate::qb::select::Select;
use crate::qb::update::Update;
use crate::value::{Row, Value};

/// Rendered SQL plus its parameters in final bind order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: ParamList,
}

impl Statement {
    pub fn new(sql: impl Into<String>, params: ParamList) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }
}

/// Builds SQL text for the engine behind a driver.
///
/// The engine profile is detected once at construction. Clause factories are
/// idempotent by clause type: asking for the clause type already held returns
/// it, any other type replaces it. [`render`](Self::render) consumes the clause.
///
/// ```ignore
/// let mut sql = StatementBuilder::new(driver).with_table("users");
/// sql.select(Some(&["id", "name"])).where_eq("status", "?").limit(10);
/// let text = sql.render()?;
/// ```
#[derive(Debug)]
pub struct StatementBuilder<D: Driver> {
    driver: D,
    profile: EngineProfile,
    table: Option<String>,
    alias: Option<String>,
    clause: Option<Clause>,
    last_sql: Option<String>,
}

impl<D: Driver> StatementBuilder<D> {
    /// Create a builder and detect the engine profile from `driver`.
    pub fn new(driver: D) -> Self {
        let profile = EngineProfile::detect(
            driver.native_engine(),
            driver.is_generic_prepared_interface(),
            driver.declared_driver_type(),
        );

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "sqlgate.engine",
            engine = ?profile.engine(),
            quote_style = ?profile.quote_style(),
            placeholder_style = ?profile.placeholder_style(),
            generic = driver.is_generic_prepared_interface(),
            "detected engine profile"
        );

        Self {
            driver,
            profile,
            table: None,
            alias: None,
            clause: None,
            last_sql: None,
        }
    }

    /// Create a builder from an optional driver.
    pub fn try_new(driver: Option<D>) -> DbResult<Self> {
        driver
            .map(Self::new)
            .ok_or_else(|| DbError::configuration("a database driver is required"))
    }

    /// Create a builder and apply table, alias and quote-style settings.
    pub fn from_config(driver: Option<D>, config: &SqlConfig) -> DbResult<Self> {
        let mut builder = Self::try_new(driver)?;
        if let Some(style) = config.quote_style {
            builder.profile = builder.profile.with_quote_style(style);
        }
        if let Some(table) = config.table.as_deref().filter(|t| !t.is_empty()) {
            builder.set_table(table);
        }
        if let Some(alias) = config.alias.as_deref().filter(|a| !a.is_empty()) {
            builder.set_alias(alias);
        }
        Ok(builder)
    }

    /// Set the target table (builder form).
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.set_table(table);
        self
    }

    /// Set the table alias (builder form).
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.set_alias(alias);
        self
    }

    pub fn set_table(&mut self, table: impl Into<String>) -> &mut Self {
        self.table = Some(table.into());
        self
    }

    /// Alias of [`set_table`](Self::set_table), reads naturally before a SELECT.
    pub fn from(&mut self, table: impl Into<String>) -> &mut Self {
        self.set_table(table)
    }

    /// Alias of [`set_table`](Self::set_table), reads naturally before an INSERT.
    pub fn into(&mut self, table: impl Into<String>) -> &mut Self {
        self.set_table(table)
    }

    pub fn set_alias(&mut self, alias: impl Into<String>) -> &mut Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn has_table(&self) -> bool {
        self.table.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn has_alias(&self) -> bool {
        self.alias.as_deref().is_some_and(|a| !a.is_empty())
    }

    pub fn profile(&self) -> &EngineProfile {
        &self.profile
    }

    pub fn engine(&self) -> Option<EngineKind> {
        self.profile.engine()
    }

    pub fn quote_style(&self) -> QuoteStyle {
        self.profile.quote_style()
    }

    pub fn placeholder_style(&self) -> PlaceholderStyle {
        self.profile.placeholder_style()
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn into_driver(self) -> D {
        self.driver
    }

    /// SQL text of the most recent successful render.
    pub fn last_sql(&self) -> Option<&str> {
        self.last_sql.as_deref()
    }

    fn quoter(&self) -> Quoter<'_> {
        Quoter::new(&self.profile, &self.driver)
    }

    /// Quote a table or column name for this engine.
    pub fn quote_identifier(&self, name: &str) -> String {
        self.quoter().quote_identifier(name)
    }

    /// Render a value as a SQL literal; bind tokens and numbers stay bare.
    pub fn quote_literal(&self, value: &Value) -> String {
        self.quoter().quote_literal(value)
    }

    /// The live clause, if any.
    pub fn clause(&self) -> Option<&Clause> {
        self.clause.as_ref()
    }

    /// Install a pre-built clause, replacing any live one.
    pub fn set_clause(&mut self, clause: impl Into<Clause>) -> &mut Self {
        self.clause = Some(clause.into());
        self
    }

    fn holds(&self, kind: ClauseKind) -> bool {
        self.clause.as_ref().is_some_and(|c| c.kind() == kind)
    }

    /// Start (or continue) a SELECT.
    ///
    /// `columns` only applies when a new clause is created; `None` selects `*`.
    pub fn select(&mut self, columns: Option<&[&str]>) -> &mut Select {
        if !self.holds(ClauseKind::Select) {
            let mut select = Select::new();
            if let Some(columns) = columns {
                select.columns(columns.iter().copied());
            }
            self.clause = Some(Clause::Select(select));
        }
        match &mut self.clause {
            Some(Clause::Select(select)) => select,
            _ => unreachable!("a SELECT clause was installed above"),
        }
    }

    /// Start (or continue) an INSERT.
    ///
    /// Fails with [`DbError::MissingColumns`] when no INSERT is live and no
    /// column values are given. Values given while an INSERT is live are ignored.
    pub fn insert(&mut self, columns: Option<Row>) -> DbResult<&mut Insert> {
        if !self.holds(ClauseKind::Insert) {
            let columns = columns
                .filter(|row| !row.is_empty())
                .ok_or(DbError::MissingColumns(ClauseKind::Insert))?;
            self.clause = Some(Clause::Insert(Insert::new(columns)));
        }
        match &mut self.clause {
            Some(Clause::Insert(insert)) => Ok(insert),
            _ => unreachable!("an INSERT clause was installed above"),
        }
    }

    /// Start (or continue) an UPDATE. Same rules as [`insert`](Self::insert).
    pub fn update(&mut self, columns: Option<Row>) -> DbResult<&mut Update> {
        if !self.holds(ClauseKind::Update) {
            let columns = columns
                .filter(|row| !row.is_empty())
                .ok_or(DbError::MissingColumns(ClauseKind::Update))?;
            self.clause = Some(Clause::Update(Update::new(columns)));
        }
        match &mut self.clause {
            Some(Clause::Update(update)) => Ok(update),
            _ => unreachable!("an UPDATE clause was installed above"),
        }
    }

    /// Start (or continue) a DELETE.
    pub fn delete(&mut self) -> &mut Delete {
        if !self.holds(ClauseKind::Delete) {
            self.clause = Some(Clause::Delete(Delete::new()));
        }
        match &mut self.clause {
            Some(Clause::Delete(delete)) => delete,
            _ => unreachable!("a DELETE clause was installed above"),
        }
    }

    /// Render the live clause to SQL text and reset the builder.
    ///
    /// Fails with [`DbError::NoClause`] when nothing has been started and with
    /// [`DbError::NoTable`] when no table is set; in both cases the clause (if
    /// any) is left in place.
    pub fn render(&mut self) -> DbResult<String> {
        if self.clause.is_none() {
            return Err(DbError::NoClause);
        }
        let table = match self.table.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => return Err(DbError::NoTable),
        };

        let sql = {
            let clause = self.clause.as_ref().ok_or(DbError::NoClause)?;
            let alias = self.alias.as_deref().filter(|a| !a.is_empty());
            let ctx = RenderContext::new(self.quoter(), table, alias);
            clause.render(&ctx)
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "sqlgate.sql",
            clause = ?self.clause.as_ref().map(ClauseSql::kind),
            engine = ?self.profile.engine(),
            sql = %sql,
            "rendered statement"
        );

        self.clause = None;
        self.last_sql = Some(sql.clone());
        Ok(sql)
    }

    /// Placeholder row for an INSERT of `row`'s columns (ordinals from 1).
    pub fn insert_placeholders(&self, row: &Row) -> Row {
        row.columns()
            .enumerate()
            .map(|(i, c)| (c, self.profile.insert_placeholder(c, i + 1)))
            .collect()
    }

    /// Placeholder row for an UPDATE of `row`'s columns (ordinals offset by one).
    pub fn update_placeholders(&self, row: &Row) -> Row {
        row.columns()
            .enumerate()
            .map(|(i, c)| (c, self.profile.update_placeholder(c, i + 1)))
            .collect()
    }

    /// Bind parameters for `row`'s values in column order, named by column
    /// when the engine binds by name.
    pub fn row_params(&self, row: &Row) -> ParamList {
        let mut params = ParamList::new();
        for (column, value) in row.iter() {
            if self.profile.placeholder_style().is_named() {
                params.push_named(column, value.clone());
            } else {
                params.push(value.clone());
            }
        }
        params
    }
}
