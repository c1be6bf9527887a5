//! Builder configuration.

use crate::engine::QuoteStyle;
use crate::error::{DbError, DbResult};
use serde::Deserialize;

/// Settings applied by [`StatementBuilder::from_config`](crate::qb::StatementBuilder::from_config).
///
/// ```toml
/// table = "users"
/// alias = "u"
/// quote_style = "double_quote"   # backtick | bracket | double_quote | none
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SqlConfig {
    /// Target table.
    pub table: Option<String>,
    /// Table alias rendered in SELECT.
    pub alias: Option<String>,
    /// Override the detected identifier quote style.
    pub quote_style: Option<QuoteStyle>,
}

impl SqlConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(input: &str) -> DbResult<Self> {
        toml::from_str(input)
            .map_err(|e| DbError::configuration(format!("invalid builder config: {e}")))
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_quote_style(mut self, style: QuoteStyle) -> Self {
        self.quote_style = Some(style);
        self
    }
}
