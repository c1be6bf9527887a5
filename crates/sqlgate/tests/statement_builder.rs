//! Statement builder behavior through the public API.

use sqlgate::{
    ClauseKind, DbError, EngineKind, Expr, PlaceholderStyle, QuoteStyle, RecordingDriver, Row,
    SqlConfig, StatementBuilder, Value,
};

#[test]
fn engine_profiles_match_inference_table() {
    let cases = [
        (EngineKind::MySql, QuoteStyle::Backtick, PlaceholderStyle::QuestionMark),
        (EngineKind::Oracle, QuoteStyle::DoubleQuote, PlaceholderStyle::QuestionMark),
        (EngineKind::Postgres, QuoteStyle::DoubleQuote, PlaceholderStyle::PositionalDollar),
        (EngineKind::Sqlite, QuoteStyle::DoubleQuote, PlaceholderStyle::NamedColon),
        (EngineKind::SqlServer, QuoteStyle::Bracket, PlaceholderStyle::QuestionMark),
    ];
    for (engine, quote, placeholder) in cases {
        let sql = StatementBuilder::new(RecordingDriver::new(engine));
        assert_eq!(sql.quote_style(), quote, "engine {engine}");
        assert_eq!(sql.placeholder_style(), placeholder, "engine {engine}");
    }
}

#[test]
fn generic_interface_always_uses_named_placeholders() {
    for declared in ["sqlite", "pgsql", "mysql", "odbc"] {
        for native in [None, Some(EngineKind::Postgres), Some(EngineKind::SqlServer)] {
            let sql = StatementBuilder::new(RecordingDriver::generic(native, declared));
            assert_eq!(sql.placeholder_style(), PlaceholderStyle::NamedColon);
        }
    }

    let sql = StatementBuilder::new(RecordingDriver::generic(Some(EngineKind::SqlServer), "mysql"));
    assert_eq!(sql.engine(), Some(EngineKind::MySql));
    assert_eq!(sql.quote_identifier("a.b"), "`a`.`b`");
}

#[test]
fn second_render_without_clause_fails() {
    let mut sql = StatementBuilder::new(RecordingDriver::new(EngineKind::MySql)).with_table("t");
    sql.delete();
    assert_eq!(sql.render().unwrap(), "DELETE FROM `t`");
    assert!(matches!(sql.render(), Err(DbError::NoClause)));
    assert_eq!(sql.last_sql(), Some("DELETE FROM `t`"));
}

#[test]
fn builder_errors_never_touch_the_driver() {
    let mut sql = StatementBuilder::new(RecordingDriver::new(EngineKind::Postgres));
    assert!(sql.insert(None).is_err());
    assert!(sql.render().is_err());
    sql.select(None);
    assert!(sql.render().is_err());
    assert!(sql.driver().statements().is_empty());
}

#[test]
fn update_missing_columns_message() {
    let mut sql = StatementBuilder::new(RecordingDriver::new(EngineKind::Sqlite)).with_table("t");
    let err = sql.update(None).unwrap_err();
    assert!(matches!(err, DbError::MissingColumns(ClauseKind::Update)));
    assert_eq!(
        err.to_string(),
        "The columns parameter cannot be empty for a new UPDATE clause"
    );
}

#[test]
fn placeholders_and_literals_together() {
    let mut sql = StatementBuilder::new(RecordingDriver::new(EngineKind::Postgres)).with_table("users");
    let row = Row::new().with("name", "Ann").with("age", 31);
    let set = sql.update_placeholders(&row);
    sql.update(Some(set))
        .unwrap()
        .and_where(Expr::eq("age", "$1"))
        .and_where(Expr::ne("name", "O'Brien"));
    assert_eq!(
        sql.render().unwrap(),
        "UPDATE \"users\" SET \"name\" = $2, \"age\" = $3 WHERE \"age\" = $1 AND \"name\" != 'O''Brien'"
    );
}

#[test]
fn literal_quoting_rules() {
    let sql = StatementBuilder::new(RecordingDriver::new(EngineKind::MySql));
    assert_eq!(sql.quote_literal(&Value::from("?")), "?");
    assert_eq!(sql.quote_literal(&Value::from(":x")), ":x");
    assert_eq!(sql.quote_literal(&Value::from("$7")), "$7");
    assert_eq!(sql.quote_literal(&Value::from("$7x")), "'$7x'");
    assert_eq!(sql.quote_literal(&Value::Float(2.5)), "2.5");
    assert_eq!(sql.quote_literal(&Value::Null), "NULL");
}

#[test]
fn config_from_toml() {
    let config = SqlConfig::from_toml_str("table = \"orders\"\nalias = \"o\"").unwrap();
    let mut sql =
        StatementBuilder::from_config(Some(RecordingDriver::new(EngineKind::Sqlite)), &config)
            .unwrap();
    sql.select(Some(&["o.id", "o.total"])).limit(1);
    assert_eq!(
        sql.render().unwrap(),
        "SELECT \"o\".\"id\", \"o\".\"total\" FROM \"orders\" AS \"o\" LIMIT 1"
    );

    let err = SqlConfig::from_toml_str("table = [").unwrap_err();
    assert!(matches!(err, DbError::Configuration(_)));
}
