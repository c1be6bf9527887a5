//! Engine profiles: which quoting and placeholder rules apply to a driver.
//!
//! The profile is computed once from the driver's capability queries by
//! [`EngineProfile::detect`]. Detection has two tiers:
//!
//! 1. the native engine reported by the driver selects the engine kind, quote
//!    style and placeholder style;
//! 2. if the driver runs behind the generic prepared-statement interface, the
//!    placeholder style is forced to `:name`, and a recognized declared driver
//!    type (`sqlite`, `pgsql`, `mysql`) overrides the engine kind and quote style.
//!
//! The generic-interface tier always wins.

use serde::Deserialize;
use std::fmt;

/// Offset added to UPDATE placeholder ordinals.
///
/// UPDATE statements reserve `$1` for a leading bound value, so the first SET
/// column binds to `$2`. Filter parameters are concatenated after the column
/// parameters in the final bind order.
pub const UPDATE_PLACEHOLDER_OFFSET: usize = 1;

/// The database product a statement is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineKind {
    MySql,
    Oracle,
    Postgres,
    Sqlite,
    SqlServer,
}

impl EngineKind {
    /// All supported engines.
    pub const ALL: [EngineKind; 5] = [
        EngineKind::MySql,
        EngineKind::Oracle,
        EngineKind::Postgres,
        EngineKind::Sqlite,
        EngineKind::SqlServer,
    ];

    /// Map a generic-interface driver-type string to an engine.
    ///
    /// Only the three types the generic interface can declare are recognized.
    pub fn from_declared_type(declared: &str) -> Option<Self> {
        match declared {
            "sqlite" => Some(EngineKind::Sqlite),
            "pgsql" => Some(EngineKind::Postgres),
            "mysql" => Some(EngineKind::MySql),
            _ => None,
        }
    }

    /// Identifier quoting used by this engine.
    pub fn quote_style(self) -> QuoteStyle {
        match self {
            EngineKind::MySql => QuoteStyle::Backtick,
            EngineKind::Oracle | EngineKind::Postgres | EngineKind::Sqlite => {
                QuoteStyle::DoubleQuote
            }
            EngineKind::SqlServer => QuoteStyle::Bracket,
        }
    }

    /// Placeholder syntax used by the engine's native driver.
    pub fn native_placeholder_style(self) -> PlaceholderStyle {
        match self {
            EngineKind::Postgres => PlaceholderStyle::PositionalDollar,
            EngineKind::Sqlite => PlaceholderStyle::NamedColon,
            EngineKind::MySql | EngineKind::Oracle | EngineKind::SqlServer => {
                PlaceholderStyle::QuestionMark
            }
        }
    }

    /// Expression producing a random ordering key.
    pub fn random_function(self) -> &'static str {
        match self {
            EngineKind::MySql => "RAND()",
            EngineKind::Postgres | EngineKind::Sqlite => "RANDOM()",
            EngineKind::SqlServer => "NEWID()",
            EngineKind::Oracle => "DBMS_RANDOM.VALUE",
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EngineKind::MySql => "MYSQL",
            EngineKind::Oracle => "ORACLE",
            EngineKind::Postgres => "PGSQL",
            EngineKind::Sqlite => "SQLITE",
            EngineKind::SqlServer => "SQLSRV",
        })
    }
}

/// Delimiter pair used to quote table and column names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStyle {
    Backtick,
    Bracket,
    DoubleQuote,
    None,
}

impl QuoteStyle {
    /// Opening and closing quote characters, or `None` for pass-through.
    pub fn delimiters(self) -> Option<(char, char)> {
        match self {
            QuoteStyle::Backtick => Some(('`', '`')),
            QuoteStyle::Bracket => Some(('[', ']')),
            QuoteStyle::DoubleQuote => Some(('"', '"')),
            QuoteStyle::None => None,
        }
    }

    /// Quote one identifier segment.
    fn quote_segment(self, segment: &str, out: &mut String) {
        let Some((open, close)) = self.delimiters() else {
            out.push_str(segment);
            return;
        };
        if segment == "*" {
            out.push('*');
            return;
        }
        out.push(open);
        for ch in segment.chars() {
            if ch == close {
                out.push(close);
            }
            out.push(ch);
        }
        out.push(close);
    }

    /// Quote an identifier; dotted names are quoted segment by segment.
    pub fn quote(self, name: &str) -> String {
        let mut out = String::with_capacity(name.len() + 2);
        for (i, segment) in name.split('.').enumerate() {
            if i > 0 {
                out.push('.');
            }
            self.quote_segment(segment, &mut out);
        }
        out
    }
}

/// Bound-parameter syntax expected by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderStyle {
    /// `?`
    QuestionMark,
    /// `:column`
    NamedColon,
    /// `$n`
    PositionalDollar,
}

impl PlaceholderStyle {
    /// The placeholder for `column` at 1-based position `ordinal`.
    pub fn placeholder(self, column: &str, ordinal: usize) -> String {
        match self {
            PlaceholderStyle::NamedColon => format!(":{column}"),
            PlaceholderStyle::PositionalDollar => format!("${ordinal}"),
            PlaceholderStyle::QuestionMark => "?".to_string(),
        }
    }

    /// Whether parameters are bound by name rather than by position.
    pub fn is_named(self) -> bool {
        matches!(self, PlaceholderStyle::NamedColon)
    }
}

/// Check if a text value is a bind token that must never be quoted.
///
/// Recognized forms: `?`, `:name`, `$n`. Any new placeholder syntax must be
/// added here, or its tokens will be escaped as string literals.
pub fn is_bind_token(value: &str) -> bool {
    value == "?"
        || value.starts_with(':')
        || value
            .strip_prefix('$')
            .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

/// The quoting and placeholder rules for one driver connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineProfile {
    engine: Option<EngineKind>,
    quote_style: QuoteStyle,
    placeholder_style: PlaceholderStyle,
}

impl EngineProfile {
    /// Profile of a native driver for `engine`.
    pub fn native(engine: EngineKind) -> Self {
        Self {
            engine: Some(engine),
            quote_style: engine.quote_style(),
            placeholder_style: engine.native_placeholder_style(),
        }
    }

    /// Profile used when the driver's engine is not recognized.
    pub fn unrecognized() -> Self {
        Self {
            engine: None,
            quote_style: QuoteStyle::None,
            placeholder_style: PlaceholderStyle::QuestionMark,
        }
    }

    /// Two-tier detection; the generic-interface override beats native inference.
    pub fn detect(native: Option<EngineKind>, generic: bool, declared: Option<&str>) -> Self {
        let mut profile = native.map_or_else(Self::unrecognized, Self::native);

        if generic {
            profile.placeholder_style = PlaceholderStyle::NamedColon;
            if let Some(engine) = declared.and_then(EngineKind::from_declared_type) {
                profile.engine = Some(engine);
                profile.quote_style = engine.quote_style();
            }
        }

        profile
    }

    /// Replace the identifier quote style (construction-time configuration only).
    pub(crate) fn with_quote_style(mut self, style: QuoteStyle) -> Self {
        self.quote_style = style;
        self
    }

    pub fn engine(&self) -> Option<EngineKind> {
        self.engine
    }

    pub fn quote_style(&self) -> QuoteStyle {
        self.quote_style
    }

    pub fn placeholder_style(&self) -> PlaceholderStyle {
        self.placeholder_style
    }

    /// INSERT placeholder for the column at 1-based `ordinal`.
    pub fn insert_placeholder(&self, column: &str, ordinal: usize) -> String {
        self.placeholder_style.placeholder(column, ordinal)
    }

    /// UPDATE placeholder for the column at 1-based `ordinal`.
    pub fn update_placeholder(&self, column: &str, ordinal: usize) -> String {
        self.placeholder_style
            .placeholder(column, ordinal + UPDATE_PLACEHOLDER_OFFSET)
    }
}
