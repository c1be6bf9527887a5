//! Identifier and literal quoting for one engine profile.

use crate::driver::Escape;
use crate::engine::{is_bind_token, EngineKind, EngineProfile};
use crate::value::Value;

/// Quotes identifiers and literal values according to an [`EngineProfile`].
#[derive(Clone, Copy)]
pub struct Quoter<'a> {
    profile: &'a EngineProfile,
    escaper: &'a dyn Escape,
}

impl<'a> Quoter<'a> {
    pub fn new(profile: &'a EngineProfile, escaper: &'a dyn Escape) -> Self {
        Self { profile, escaper }
    }

    pub fn profile(&self) -> &EngineProfile {
        self.profile
    }

    pub fn engine(&self) -> Option<EngineKind> {
        self.profile.engine()
    }

    /// Quote a table or column name. Dotted names are quoted per segment.
    pub fn quote_identifier(&self, name: &str) -> String {
        self.profile.quote_style().quote(name)
    }

    /// Render a value for inclusion in SQL text.
    ///
    /// Bind tokens (`?`, `:name`, `$n`) and numbers are emitted as-is; any other
    /// text goes through the driver's escape and is wrapped in single quotes.
    /// Non-finite floats render as `NULL`.
    pub fn quote_literal(&self, value: &Value) -> String {
        match value {
            Value::Null => "NULL".to_string(),
            Value::Int(n) => n.to_string(),
            // No engine has a literal for NaN or infinity.
            Value::Float(x) if !x.is_finite() => "NULL".to_string(),
            Value::Float(x) => x.to_string(),
            Value::Bool(b) => {
                let (yes, no) = match self.engine() {
                    Some(EngineKind::Postgres) => ("TRUE", "FALSE"),
                    _ => ("1", "0"),
                };
                (if *b { yes } else { no }).to_string()
            }
            Value::Text(s) if is_bind_token(s) => s.clone(),
            Value::Text(s) => format!("'{}'", self.escaper.escape(s)),
        }
    }
}

impl std::fmt::Debug for Quoter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Quoter")
            .field("profile", self.profile)
            .finish_non_exhaustive()
    }
}
