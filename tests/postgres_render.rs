//! End-to-end PostgreSQL rendering scenarios.

use sql_render_core::ast::{
    Ast, ComparisonOp, Condition, Field, Param, SelectQuery, SimpleCondition, Table,
};
use sql_render_core::render::{Dialect, PostgresDialect};
use sql_render_core::RenderOptions;

#[test]
fn simple_select_with_no_predicate() {
    let mut q = SelectQuery::from_table(Table::new("users"));
    q.fields.push(Field::new("id"));
    q.fields.push(Field::new("name"));

    let result = PostgresDialect::new()
        .render(&Ast::Select(q), &RenderOptions::default())
        .unwrap();

    assert_eq!(result.sql, "SELECT \"id\", \"name\" FROM \"users\"");
    assert!(result.required_params.is_empty());
}

#[test]
fn parameterized_predicate() {
    let mut q = SelectQuery::from_table(Table::new("users"));
    q.fields.push(Field::new("id"));
    q.where_clause = Some(Condition::Simple(SimpleCondition::with_value(
        Field::new("active"),
        ComparisonOp::Eq,
        Param::new("is_active"),
    )));

    let result = PostgresDialect::new()
        .render(&Ast::Select(q), &RenderOptions::default())
        .unwrap();

    assert_eq!(
        result.sql,
        "SELECT \"id\" FROM \"users\" WHERE \"active\" = :is_active"
    );
    assert_eq!(result.required_params, vec!["is_active".to_string()]);
}

#[test]
fn in_rewrites_to_any() {
    let mut q = SelectQuery::from_table(Table::new("users"));
    q.where_clause = Some(Condition::Simple(SimpleCondition::with_value(
        Field::new("status"),
        ComparisonOp::In,
        Param::new("statuses"),
    )));

    let result = PostgresDialect::new()
        .render(&Ast::Select(q), &RenderOptions::default())
        .unwrap();

    assert!(result.sql.ends_with("WHERE \"status\" = ANY(:statuses)"));
}

#[test]
fn not_in_rewrites_to_not_all() {
    let mut q = SelectQuery::from_table(Table::new("users"));
    q.where_clause = Some(Condition::Simple(SimpleCondition::with_value(
        Field::new("status"),
        ComparisonOp::NotIn,
        Param::new("statuses"),
    )));

    let result = PostgresDialect::new()
        .render(&Ast::Select(q), &RenderOptions::default())
        .unwrap();

    assert!(result.sql.ends_with("WHERE \"status\" != ALL(:statuses)"));
}

#[test]
fn empty_projection_renders_star() {
    let q = SelectQuery::from_table(Table::new("users"));
    let result = PostgresDialect::new()
        .render(&Ast::Select(q), &RenderOptions::default())
        .unwrap();
    assert_eq!(result.sql, "SELECT * FROM \"users\"");
}

#[test]
fn count_ignores_field_list() {
    use sql_render_core::ast::CountQuery;

    let count = CountQuery {
        from: Table::new("users"),
        joins: vec![],
        where_clause: None,
    };
    let result = PostgresDialect::new()
        .render(&Ast::Count(count), &RenderOptions::default())
        .unwrap();
    assert_eq!(result.sql, "SELECT COUNT(*) FROM \"users\"");
}

#[test]
fn distinct_on_requires_order_by_prefix() {
    use sql_render_core::ast::Distinct;
    use sql_render_core::error::RenderError;

    let mut q = SelectQuery::from_table(Table::new("events"));
    q.distinct = Distinct::On(vec![Field::new("user_id")]);
    // no matching ORDER BY prefix -> validation error, not a render error
    let err = PostgresDialect::new()
        .render(&Ast::Select(q), &RenderOptions::default())
        .unwrap_err();
    assert!(matches!(err, RenderError::InvalidAst { .. }));
}

#[test]
fn distinct_on_with_matching_order_by() {
    use sql_render_core::ast::{Distinct, OrderBy};

    let mut q = SelectQuery::from_table(Table::new("events"));
    q.distinct = Distinct::On(vec![Field::new("user_id")]);
    q.order_by.push(OrderBy::asc(Field::new("user_id")));
    q.order_by.push(OrderBy::desc(Field::new("created_at")));

    let result = PostgresDialect::new()
        .render(&Ast::Select(q), &RenderOptions::default())
        .unwrap();
    assert!(result.sql.contains("DISTINCT ON (\"user_id\")"));
    assert!(result.sql.ends_with("ORDER BY \"user_id\" ASC, \"created_at\" DESC"));
}

#[test]
fn returning_on_insert() {
    use sql_render_core::ast::{InsertQuery, ValueRow};

    let mut row = ValueRow::new();
    row.insert("name".to_string(), Param::new("name"));
    let mut insert = InsertQuery::values(Table::new("users"), vec![row]);
    insert.returning.push(Field::new("id"));

    let result = PostgresDialect::new()
        .render(&Ast::Insert(insert), &RenderOptions::default())
        .unwrap();
    assert_eq!(
        result.sql,
        "INSERT INTO \"users\" (\"name\") VALUES (:name) RETURNING \"id\""
    );
}

#[test]
fn row_locking_for_update() {
    use sql_render_core::ast::LockMode;

    let mut q = SelectQuery::from_table(Table::new("accounts"));
    q.lock = Some(LockMode::ForUpdate);
    let result = PostgresDialect::new()
        .render(&Ast::Select(q), &RenderOptions::default())
        .unwrap();
    assert!(result.sql.ends_with("FOR UPDATE"));
}

#[test]
fn array_contains_renders_postgres_operator() {
    let mut q = SelectQuery::from_table(Table::new("posts"));
    q.where_clause = Some(Condition::Simple(SimpleCondition::with_value(
        Field::new("tags"),
        ComparisonOp::ArrayContains,
        Param::new("wanted_tags"),
    )));

    let result = PostgresDialect::new()
        .render(&Ast::Select(q), &RenderOptions::default())
        .unwrap();
    assert!(result.sql.ends_with("WHERE \"tags\" @> :wanted_tags"));
}

#[test]
fn array_overlap_renders_postgres_operator() {
    let mut q = SelectQuery::from_table(Table::new("posts"));
    q.where_clause = Some(Condition::Simple(SimpleCondition::with_value(
        Field::new("tags"),
        ComparisonOp::ArrayOverlap,
        Param::new("any_tags"),
    )));

    let result = PostgresDialect::new()
        .render(&Ast::Select(q), &RenderOptions::default())
        .unwrap();
    assert!(result.sql.ends_with("WHERE \"tags\" && :any_tags"));
}

#[test]
fn filter_clause_is_supported() {
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

    let result = PostgresDialect::new()
        .render(&Ast::Select(q), &RenderOptions::default())
        .unwrap();
    assert!(result.sql.contains("FILTER (WHERE \"status\" = :status)"));
}
