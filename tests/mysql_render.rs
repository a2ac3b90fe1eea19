//! End-to-end MySQL/MariaDB rendering scenarios.

use sql_render_core::ast::{
    Ast, ComparisonOp, ConflictClause, Condition, Field, InsertQuery, Param, SelectQuery,
    SimpleCondition, Table, ValueRow,
};
use sql_render_core::error::RenderError;
use sql_render_core::render::{Dialect, MySqlDialect};
use sql_render_core::RenderOptions;
use std::collections::BTreeMap;

#[test]
fn upsert_sorts_update_assignments() {
    let mut row = ValueRow::new();
    row.insert("id".to_string(), Param::new("id"));
    row.insert("name".to_string(), Param::new("new_name"));
    row.insert("email".to_string(), Param::new("new_email"));
    let mut insert = InsertQuery::values(Table::new("users"), vec![row]);

    let mut updates = BTreeMap::new();
    updates.insert("name".to_string(), Param::new("new_name"));
    updates.insert("email".to_string(), Param::new("new_email"));
    insert.on_conflict = Some(ConflictClause::do_update(vec!["id".to_string()], updates));

    let result = MySqlDialect::new()
        .render(&Ast::Insert(insert), &RenderOptions::default())
        .unwrap();

    assert!(result
        .sql
        .contains("ON DUPLICATE KEY UPDATE `email` = :new_email, `name` = :new_name"));
}

#[test]
fn do_nothing_simulated_with_self_update() {
    let mut row = ValueRow::new();
    row.insert("id".to_string(), Param::new("id"));
    let mut insert = InsertQuery::values(Table::new("users"), vec![row]);
    insert.on_conflict = Some(ConflictClause::do_nothing(vec!["id".to_string()]));

    let result = MySqlDialect::new()
        .render(&Ast::Insert(insert), &RenderOptions::default())
        .unwrap();

    assert!(result.sql.contains("ON DUPLICATE KEY UPDATE `id` = `id`"));
}

#[test]
fn returning_is_rejected() {
    let mut row = ValueRow::new();
    row.insert("id".to_string(), Param::new("id"));
    let mut insert = InsertQuery::values(Table::new("users"), vec![row]);
    insert.returning.push(Field::new("id"));

    let err = MySqlDialect::new()
        .render(&Ast::Insert(insert), &RenderOptions::default())
        .unwrap_err();
    assert!(matches!(
        err,
        RenderError::UnsupportedFeature { feature, .. } if feature == "RETURNING"
    ));
}

#[test]
fn ilike_lowers_to_bare_like() {
    let mut q = SelectQuery::from_table(Table::new("users"));
    q.where_clause = Some(Condition::Simple(SimpleCondition::with_value(
        Field::new("email"),
        ComparisonOp::ILike,
        Param::new("pattern"),
    )));

    let result = MySqlDialect::new()
        .render(&Ast::Select(q), &RenderOptions::default())
        .unwrap();
    assert!(result.sql.contains("`email` LIKE :pattern"));
}

#[test]
fn distinct_on_is_unsupported() {
    use sql_render_core::ast::{Distinct, OrderBy};

    let mut q = SelectQuery::from_table(Table::new("events"));
    q.distinct = Distinct::On(vec![Field::new("user_id")]);
    q.order_by.push(OrderBy::asc(Field::new("user_id")));

    let err = MySqlDialect::new()
        .render(&Ast::Select(q), &RenderOptions::default())
        .unwrap_err();
    assert!(matches!(err, RenderError::UnsupportedFeature { .. }));
}

#[test]
fn array_operators_are_unsupported() {
    let mut q = SelectQuery::from_table(Table::new("posts"));
    q.where_clause = Some(Condition::Simple(SimpleCondition::with_value(
        Field::new("tags"),
        ComparisonOp::ArrayOverlap,
        Param::new("any_tags"),
    )));

    let err = MySqlDialect::new()
        .render(&Ast::Select(q), &RenderOptions::default())
        .unwrap_err();
    assert!(matches!(err, RenderError::UnsupportedFeature { .. }));
}

#[test]
fn filter_clause_is_unsupported() {
    use sql_render_core::ast::{AggregateExpr, AggregateFn, ExprKind, FieldExpression};

    let mut q = SelectQuery::from_table(Table::new("orders"));
    q.expressions.push(
        FieldExpression::new(ExprKind::Aggregate(AggregateExpr {
            function: AggregateFn::Count,
            field: None,
        }))
        .with_filter(Condition::Simple(SimpleCondition::with_value(
            Field::new("status"),
            ComparisonOp::Eq,
            Param::new("status"),
        ))),
    );

    let err = MySqlDialect::new()
        .render(&Ast::Select(q), &RenderOptions::default())
        .unwrap_err();
    assert!(matches!(err, RenderError::UnsupportedFeature { .. }));
}

#[test]
fn backtick_identifiers_double_embedded_backtick() {
    let mut q = SelectQuery::from_table(Table::new("weird`table"));
    q.fields.push(Field::new("id"));
    let result = MySqlDialect::new()
        .render(&Ast::Select(q), &RenderOptions::default())
        .unwrap();
    assert!(result.sql.contains("`weird``table`"));
}
