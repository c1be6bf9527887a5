use super::*;
use crate::driver::RecordingDriver;
use crate::engine::EngineKind;
use crate::error::DbError;
use crate::monitor::{HookAction, QueryContext, QueryHook, QueryType, StatsHook};
use crate::qb::{Expr, ParamList};
use crate::value::{Row, Value};
use std::sync::Arc;

fn users(engine: EngineKind) -> Table<RecordingDriver> {
    Table::new(RecordingDriver::new(engine), "users")
}

#[test]
fn test_empty_table_name_fails_first() {
    let mut t = Table::new(RecordingDriver::new(EngineKind::MySql), "");
    assert!(t.select(None, None, ParamList::new(), &SelectOptions::new()).unwrap_err().is_no_table());
    assert!(t.insert(Row::new().with("a", 1)).unwrap_err().is_no_table());
    assert!(t.update(Row::new(), None, ParamList::new()).unwrap_err().is_no_table());
    assert!(t.delete(None, ParamList::new()).unwrap_err().is_no_table());
    assert!(t.builder().driver().statements().is_empty());
    assert!(t.builder().last_sql().is_none());
}

#[test]
fn test_select_binds_only_non_empty_params() {
    let mut t = users(EngineKind::MySql);
    t.select(None, None, ParamList::new(), &SelectOptions::new()).unwrap();
    let stmt = t.builder().driver().last_statement().unwrap();
    assert_eq!(stmt.sql, "SELECT * FROM `users`");
    assert!(stmt.params.is_none());

    t.select(Some(&["id"]), Some(Expr::eq("id", "?")), vec![7], &SelectOptions::new())
        .unwrap();
    let stmt = t.builder().driver().last_statement().unwrap();
    assert_eq!(stmt.sql, "SELECT `id` FROM `users` WHERE `id` = ?");
    assert_eq!(stmt.params, Some(ParamList::from(vec![7])));
}

#[test]
fn test_select_replaces_cached_rows() {
    let mut driver = RecordingDriver::new(EngineKind::Sqlite);
    driver
        .push_result(vec![Row::new().with("id", 1), Row::new().with("id", 2)])
        .push_result(vec![Row::new().with("id", 3)]);
    let mut t = Table::new(driver, "users");

    t.select(None, None, ParamList::new(), &SelectOptions::new()).unwrap();
    assert_eq!(t.number_of_rows(), 2);

    t.select(None, None, ParamList::new(), &SelectOptions::new()).unwrap();
    assert_eq!(t.number_of_rows(), 1);
    assert_eq!(t.rows()[0].get("id"), Some(&Value::Int(3)));
    assert_eq!(t.into_rows().len(), 1);
}

#[test]
fn test_select_order_is_escaped_and_parsed() {
    let mut t = users(EngineKind::Postgres);
    let opts = SelectOptions::new().order("last_name, first_name DESC").limit(2);
    t.select(None, None, ParamList::new(), &opts).unwrap();
    assert_eq!(
        t.last_statement().unwrap().sql,
        "SELECT * FROM \"users\" ORDER BY \"last_name\" DESC, \"first_name\" DESC LIMIT 2"
    );

    let opts = SelectOptions::new().order("RAND()");
    t.select(None, None, ParamList::new(), &opts).unwrap();
    assert_eq!(t.last_statement().unwrap().sql, "SELECT * FROM \"users\" ORDER BY RANDOM()");
}

#[test]
fn test_select_order_direction_mid_string() {
    let mut t = users(EngineKind::MySql);
    for order in [
        OrderSpec::from("name DESC, id"),
        OrderSpec::from(vec!["name DESC", "id"]),
    ] {
        t.select(None, None, ParamList::new(), &SelectOptions::new().order(order))
            .unwrap();
        assert_eq!(
            t.last_statement().unwrap().sql,
            "SELECT * FROM `users` ORDER BY `name` DESC, `id` DESC"
        );
    }

    t.select(None, None, ParamList::new(), &SelectOptions::new().order("name RANDOM"))
        .unwrap();
    assert_eq!(t.last_statement().unwrap().sql, "SELECT * FROM `users` ORDER BY RAND()");
}

#[test]
fn test_select_rejects_negative_limit() {
    let mut t = users(EngineKind::MySql);
    let err = t
        .select(None, None, ParamList::new(), &SelectOptions::new().limit(-5))
        .unwrap_err();
    assert!(matches!(err, DbError::Validation(_)));
    assert!(t.builder().driver().statements().is_empty());
}

#[test]
fn test_insert_named_params_under_sqlite() {
    let mut t = users(EngineKind::Sqlite);
    t.insert(Row::new().with("name", "Ann").with("age", 30)).unwrap();
    let stmt = t.builder().driver().last_statement().unwrap();
    assert_eq!(stmt.sql, "INSERT INTO \"users\" (\"name\",\"age\") VALUES (:name,:age)");
    let params = stmt.params.as_ref().unwrap();
    assert_eq!(params.get_named("name"), Some(&Value::from("Ann")));
    assert_eq!(params.get_named("age"), Some(&Value::Int(30)));
}

#[test]
fn test_insert_many_restarts_ordinals() {
    let mut t = users(EngineKind::Postgres);
    t.insert(vec![
        Row::new().with("name", "Ann").with("age", 30),
        Row::new().with("name", "Bob").with("age", 41),
    ])
    .unwrap();
    let stmts = t.builder().driver().statements();
    assert_eq!(stmts.len(), 2);
    for stmt in stmts {
        assert_eq!(stmt.sql, "INSERT INTO \"users\" (\"name\",\"age\") VALUES ($1,$2)");
        assert!(stmt.executed);
    }
    assert_eq!(
        stmts[1].params.as_ref().unwrap().values(),
        vec![&Value::from("Bob"), &Value::Int(41)]
    );
}

#[test]
fn test_insert_empty_row_is_missing_columns() {
    let mut t = users(EngineKind::MySql);
    let err = t.insert(Row::new()).unwrap_err();
    assert!(matches!(err, DbError::MissingColumns(_)));
    assert!(t.builder().driver().statements().is_empty());
}

#[test]
fn test_update_without_filter_binds_columns() {
    let mut t = users(EngineKind::MySql);
    t.update(Row::new().with("active", false), None, ParamList::new()).unwrap();
    let stmt = t.builder().driver().last_statement().unwrap();
    assert_eq!(stmt.sql, "UPDATE `users` SET `active` = ?");
    assert_eq!(stmt.params, Some(ParamList::from(vec![false])));
}

#[test]
fn test_delete_binds_only_when_params_given() {
    let mut t = users(EngineKind::SqlServer);
    t.delete(None, ParamList::new()).unwrap();
    let stmt = t.builder().driver().last_statement().unwrap();
    assert_eq!(stmt.sql, "DELETE FROM [users]");
    assert!(stmt.params.is_none());

    t.delete(Some(Expr::eq("id", "?")), vec![9]).unwrap();
    let stmt = t.builder().driver().last_statement().unwrap();
    assert_eq!(stmt.sql, "DELETE FROM [users] WHERE [id] = ?");
    assert_eq!(stmt.params, Some(ParamList::from(vec![9])));
}

#[test]
fn test_driver_error_propagates() {
    let mut t = Table::new(RecordingDriver::new(EngineKind::MySql).fail_on_execute(1), "users");
    let err = t.delete(None, ParamList::new()).unwrap_err();
    assert!(err.is_driver());
    assert_eq!(t.last_statement().unwrap().sql, "DELETE FROM `users`");
}

struct ReadOnly;

impl QueryHook for ReadOnly {
    fn before_query(&self, ctx: &QueryContext) -> HookAction {
        if ctx.query_type == QueryType::Select {
            HookAction::Continue
        } else {
            HookAction::Abort(format!("{} is read-only", ctx.table.as_deref().unwrap_or("?")))
        }
    }
}

#[test]
fn test_hook_abort_stops_before_prepare() {
    let mut t = users(EngineKind::MySql).with_hook(ReadOnly);
    let err = t.delete(None, ParamList::new()).unwrap_err();
    assert!(matches!(&err, DbError::Aborted(reason) if reason == "users is read-only"));
    assert!(!err.sql_may_have_run());
    assert!(t.builder().driver().statements().is_empty());

    t.select(None, None, ParamList::new(), &SelectOptions::new()).unwrap();
    assert_eq!(t.builder().driver().statements().len(), 1);
}

#[test]
fn test_hooks_observe_results() {
    let stats = Arc::new(StatsHook::new());
    let mut t = Table::new(RecordingDriver::new(EngineKind::MySql).fail_on_execute(3), "users");
    t.add_hook(stats.clone());

    t.insert(Row::new().with("name", "Ann")).unwrap();
    t.select(None, None, ParamList::new(), &SelectOptions::new()).unwrap();
    assert!(t.update(Row::new().with("name", "Bob"), None, ParamList::new()).is_err());

    let snapshot = stats.stats();
    assert_eq!(snapshot.total_queries, 3);
    assert_eq!(snapshot.insert_count, 1);
    assert_eq!(snapshot.select_count, 1);
    assert_eq!(snapshot.update_count, 1);
    assert_eq!(snapshot.failed_queries, 1);
}
