//! End-to-end SQLite rendering scenarios.

use sql_render_core::ast::{
    Ast, ComparisonOp, ConflictClause, Condition, Field, InsertQuery, LockMode, Param,
    SelectQuery, SimpleCondition, Table, ValueRow,
};
use sql_render_core::error::RenderError;
use sql_render_core::render::{Dialect, SqliteDialect};
use sql_render_core::RenderOptions;
use std::collections::BTreeMap;

#[test]
fn concat_renders_with_double_pipe() {
    use sql_render_core::ast::{ExprKind, FieldExpression, Operand, StringExpr, StringFn};

    let mut q = SelectQuery::from_table(Table::new("users"));
    q.expressions.push(
        FieldExpression::new(ExprKind::StringFn(StringExpr {
            function: StringFn::Concat,
            args: vec![
                Operand::Field(Field::new("first_name")),
                Operand::Field(Field::new("last_name")),
            ],
        }))
        .with_alias("full_name"),
    );

    let result = SqliteDialect::new()
        .render(&Ast::Select(q), &RenderOptions::default())
        .unwrap();
    assert!(result
        .sql
        .contains("\"first_name\" || \"last_name\" AS \"full_name\""));
}

#[test]
fn upsert_uses_on_conflict_shape() {
    let mut row = ValueRow::new();
    row.insert("id".to_string(), Param::new("id"));
    let mut insert = InsertQuery::values(Table::new("users"), vec![row]);
    let mut updates = BTreeMap::new();
    updates.insert("name".to_string(), Param::new("name"));
    insert.on_conflict = Some(ConflictClause::do_update(vec!["id".to_string()], updates));

    let result = SqliteDialect::new()
        .render(&Ast::Insert(insert), &RenderOptions::default())
        .unwrap();
    assert!(result
        .sql
        .contains("ON CONFLICT (\"id\") DO UPDATE SET \"name\" = :name"));
}

#[test]
fn double_quote_identifiers_double_embedded_quote() {
    let mut q = SelectQuery::from_table(Table::new("weird\"table"));
    q.fields.push(Field::new("id"));
    let result = SqliteDialect::new()
        .render(&Ast::Select(q), &RenderOptions::default())
        .unwrap();
    assert!(result.sql.contains("\"weird\"\"table\""));
}

#[test]
fn not_eq_renders_default_bang_eq() {
    let mut q = SelectQuery::from_table(Table::new("users"));
    q.where_clause = Some(Condition::Simple(SimpleCondition::with_value(
        Field::new("status"),
        ComparisonOp::NotEq,
        Param::new("status"),
    )));

    let result = SqliteDialect::new()
        .render(&Ast::Select(q), &RenderOptions::default())
        .unwrap();
    assert!(result.sql.ends_with("WHERE \"status\" != :status"));
}

#[test]
fn returning_is_supported_on_insert() {
    let mut row = ValueRow::new();
    row.insert("name".to_string(), Param::new("name"));
    let mut insert = InsertQuery::values(Table::new("users"), vec![row]);
    insert.returning.push(Field::new("id"));

    let result = SqliteDialect::new()
        .render(&Ast::Insert(insert), &RenderOptions::default())
        .unwrap();
    assert_eq!(
        result.sql,
        "INSERT INTO \"users\" (\"name\") VALUES (:name) RETURNING \"id\""
    );
}

#[test]
fn ilike_lowers_both_sides() {
    let mut q = SelectQuery::from_table(Table::new("users"));
    q.where_clause = Some(Condition::Simple(SimpleCondition::with_value(
        Field::new("email"),
        ComparisonOp::ILike,
        Param::new("pattern"),
    )));

    let result = SqliteDialect::new()
        .render(&Ast::Select(q), &RenderOptions::default())
        .unwrap();
    assert!(result.sql.contains("LOWER(\"email\") LIKE LOWER(:pattern)"));
}

#[test]
fn row_locking_is_unsupported() {
    let mut q = SelectQuery::from_table(Table::new("accounts"));
    q.lock = Some(LockMode::ForUpdate);
    let err = SqliteDialect::new()
        .render(&Ast::Select(q), &RenderOptions::default())
        .unwrap_err();
    assert!(matches!(err, RenderError::UnsupportedFeature { .. }));
}

#[test]
fn array_operators_are_unsupported() {
    use sql_render_core::ast::ComparisonOp as Op;

    let mut q = SelectQuery::from_table(Table::new("posts"));
    q.where_clause = Some(Condition::Simple(SimpleCondition::with_value(
        Field::new("tags"),
        Op::ArrayContains,
        Param::new("wanted_tags"),
    )));

    let err = SqliteDialect::new()
        .render(&Ast::Select(q), &RenderOptions::default())
        .unwrap_err();
    assert!(matches!(err, RenderError::UnsupportedFeature { .. }));
}
