//! The table gateway.

use crate::driver::{Driver, DriverResult};
use crate::error::{DbError, DbResult};
use crate::gateway::options::{Order, SelectOptions};
use crate::monitor::{HookAction, QueryContext, QueryHook, QueryResult};
use crate::qb::{
    ClauseKind, Delete, Expr, Insert, OrderDirection, ParamList, Select, Statement,
    StatementBuilder, Update,
};
use crate::value::{Row, RowSet};
use std::sync::Arc;
use std::time::Instant;

/// Whether a statement's parameters are handed to the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bind {
    Always,
    IfAny,
}

/// CRUD access to one table through a [`StatementBuilder`].
///
/// Every operation checks the table name first and fails with
/// [`DbError::NoTable`] before touching the builder or driver.
pub struct Table<D: Driver> {
    table: String,
    builder: StatementBuilder<D>,
    rows: Vec<Row>,
    hooks: Vec<Arc<dyn QueryHook>>,
    last_statement: Option<Statement>,
}

impl<D: Driver> Table<D> {
    /// Create a gateway for `table` over `driver`.
    pub fn new(driver: D, table: impl Into<String>) -> Self {
        Self::with_builder(StatementBuilder::new(driver), table)
    }

    /// Create a gateway reusing an existing builder (and its detected profile).
    pub fn with_builder(builder: StatementBuilder<D>, table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            builder,
            rows: Vec::new(),
            hooks: Vec::new(),
            last_statement: None,
        }
    }

    /// Register a hook (builder form).
    pub fn with_hook(mut self, hook: impl QueryHook + 'static) -> Self {
        self.hooks.push(Arc::new(hook));
        self
    }

    /// Register a shared hook.
    pub fn add_hook(&mut self, hook: Arc<dyn QueryHook>) -> &mut Self {
        self.hooks.push(hook);
        self
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    /// Rows fetched by the most recent [`select`](Self::select).
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn number_of_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    pub fn builder(&self) -> &StatementBuilder<D> {
        &self.builder
    }

    pub fn builder_mut(&mut self) -> &mut StatementBuilder<D> {
        &mut self.builder
    }

    /// The last statement handed to the driver, whether or not it succeeded.
    pub fn last_statement(&self) -> Option<&Statement> {
        self.last_statement.as_ref()
    }

    fn ensure_table(&self) -> DbResult<()> {
        if self.table.is_empty() {
            return Err(DbError::NoTable);
        }
        Ok(())
    }

    /// Run a SELECT and replace the cached rows with its result.
    ///
    /// `params` are bound only when non-empty. The order direction is passed
    /// through the driver's escape before it is parsed.
    pub fn select(
        &mut self,
        columns: Option<&[&str]>,
        filter: Option<Expr>,
        params: impl Into<ParamList>,
        options: &SelectOptions,
    ) -> DbResult<&mut Self> {
        self.ensure_table()?;

        let mut select = Select::new();
        if let Some(columns) = columns {
            select.columns(columns.iter().copied());
        }
        if let Some(filter) = filter {
            select.and_where(filter);
        }
        if let Some(limit) = options.checked_limit()? {
            select.limit(limit);
        }
        if let Some(offset) = options.checked_offset()? {
            select.offset(offset);
        }
        if let Some(spec) = &options.order {
            let order = Order::resolve(spec);
            let direction = self.builder.driver().escape(&order.direction);
            select.order_by(order.by, OrderDirection::parse(&direction));
        }

        self.builder.set_table(self.table.clone());
        self.builder.set_clause(select);
        let sql = self.builder.render()?;

        let rows = self.run(Statement::new(sql, params.into()), Bind::IfAny, true)?;
        self.rows = rows;
        Ok(self)
    }

    /// Insert one row or many.
    ///
    /// Rows are written one statement at a time with no surrounding
    /// transaction: if row *k* fails, rows before it stay written. Wrap the
    /// call in a driver-level transaction when all-or-nothing is required.
    pub fn insert(&mut self, rows: impl Into<RowSet>) -> DbResult<&mut Self> {
        self.ensure_table()?;

        for row in rows.into().into_rows() {
            let placeholders = self.builder.insert_placeholders(&row);
            let params = self.builder.row_params(&row);

            if placeholders.is_empty() {
                return Err(DbError::MissingColumns(ClauseKind::Insert));
            }
            self.builder.set_table(self.table.clone());
            self.builder.set_clause(Insert::new(placeholders));
            let sql = self.builder.render()?;

            self.run(Statement::new(sql, params), Bind::Always, false)?;
        }
        Ok(self)
    }

    /// Update rows matching `filter`.
    ///
    /// Column values bind first, in column order, followed by `extra_params`
    /// (the values for bind tokens used inside `filter`).
    pub fn update(
        &mut self,
        set: Row,
        filter: Option<Expr>,
        extra_params: impl Into<ParamList>,
    ) -> DbResult<&mut Self> {
        self.ensure_table()?;

        let placeholders = self.builder.update_placeholders(&set);
        let mut params = self.builder.row_params(&set);
        params.extend(&extra_params.into());

        if placeholders.is_empty() {
            return Err(DbError::MissingColumns(ClauseKind::Update));
        }
        let mut update = Update::new(placeholders);
        if let Some(filter) = filter {
            update.and_where(filter);
        }

        self.builder.set_table(self.table.clone());
        self.builder.set_clause(update);
        let sql = self.builder.render()?;

        self.run(Statement::new(sql, params), Bind::Always, false)?;
        Ok(self)
    }

    /// Delete rows matching `filter` (every row when `None`).
    pub fn delete(
        &mut self,
        filter: Option<Expr>,
        extra_params: impl Into<ParamList>,
    ) -> DbResult<&mut Self> {
        self.ensure_table()?;

        let mut delete = Delete::new();
        if let Some(filter) = filter {
            delete.and_where(filter);
        }

        self.builder.set_table(self.table.clone());
        self.builder.set_clause(delete);
        let sql = self.builder.render()?;

        self.run(Statement::new(sql, extra_params.into()), Bind::IfAny, false)?;
        Ok(self)
    }

    /// Hand one statement to the driver, running hooks around it.
    fn run(&mut self, statement: Statement, bind: Bind, fetch: bool) -> DbResult<Vec<Row>> {
        let bind = bind == Bind::Always || !statement.params.is_empty();
        let param_count = if bind { statement.params.len() } else { 0 };
        let ctx = QueryContext::new(&statement.sql, param_count).with_table(&self.table);

        for hook in &self.hooks {
            if let HookAction::Abort(reason) = hook.before_query(&ctx) {
                return Err(DbError::Aborted(reason));
            }
        }

        let start = Instant::now();
        let outcome = execute(self.builder.driver_mut(), &statement, bind, fetch);
        let elapsed = start.elapsed();
        self.last_statement = Some(statement);

        let result = match &outcome {
            Ok(rows) if fetch => QueryResult::Rows(rows.len()),
            Ok(_) => QueryResult::Executed,
            Err(e) => QueryResult::error(e.to_string()),
        };
        for hook in &self.hooks {
            hook.after_query(&ctx, elapsed, &result);
        }

        outcome.map_err(DbError::from)
    }
}

fn execute<D: Driver>(
    driver: &mut D,
    statement: &Statement,
    bind: bool,
    fetch: bool,
) -> DriverResult<Vec<Row>> {
    let driver = driver.prepare(&statement.sql)?;
    let driver = if bind {
        driver.bind_params(&statement.params)?
    } else {
        driver
    };
    let driver = driver.execute()?;
    if fetch {
        driver.fetch_result()
    } else {
        Ok(Vec::new())
    }
}

impl<D: Driver + std::fmt::Debug> std::fmt::Debug for Table<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("table", &self.table)
            .field("builder", &self.builder)
            .field("rows", &self.rows.len())
            .field("hooks", &self.hooks.len())
            .field("last_statement", &self.last_statement)
            .finish()
    }
}
