//! The AST validator (§4.1): a pure function run before any SQL is
//! produced. Every check here fails with [`RenderError::InvalidAst`] — the
//! dialect renderer re-validates defensively (see `render::Dialect::render`)
//! so a caller that skips this entry point still gets fail-fast behavior.

use crate::ast::{
    Ast, ChannelQuery, CompoundQuery, Condition, CountQuery, DeleteQuery, Distinct, ExprKind,
    FieldExpression, InsertQuery, InsertSource, Operand, Param, SelectQuery, UpdateAssignment,
    UpdateQuery,
};
use crate::error::{RenderError, Result};
use crate::options::RenderOptions;

/// Validates a single statement.
pub fn validate(ast: &Ast, options: &RenderOptions) -> Result<()> {
    match ast {
        Ast::Select(q) => validate_select(q, 0, options),
        Ast::Insert(q) => validate_insert(q, options),
        Ast::Update(q) => validate_update(q, options),
        Ast::Delete(q) => validate_delete(q, options),
        Ast::Count(q) => validate_count(q, options),
        Ast::Listen(q) | Ast::Unlisten(q) => validate_channel(q),
    }
}

/// Validates a compound query: the base plus every operand, and the
/// trailing `ORDER BY`/pagination.
pub fn validate_compound(compound: &CompoundQuery, options: &RenderOptions) -> Result<()> {
    validate_select(&compound.base, 0, options)?;
    for (_, operand) in &compound.operands {
        validate_select(operand, 0, options)?;
    }
    for order in &compound.trailing_order_by {
        if !order.has_consistent_expression() {
            return Err(RenderError::invalid_ast(
                "trailing ORDER BY expression has an operator without a matching parameter",
            ));
        }
        validate_param_name(&order.field.name)?;
        if let Some(p) = &order.param {
            validate_param_ref(p)?;
        }
    }
    Ok(())
}

fn validate_channel(q: &ChannelQuery) -> Result<()> {
    if q.channel.trim().is_empty() {
        return Err(RenderError::invalid_ast("channel name is empty"));
    }
    Ok(())
}

fn validate_select(q: &SelectQuery, depth: u8, options: &RenderOptions) -> Result<()> {
    let Some(table) = &q.from else {
        return Err(RenderError::invalid_ast("SELECT has no target table"));
    };
    if table.name.trim().is_empty() {
        return Err(RenderError::invalid_ast("table name is empty"));
    }
    if !table.has_valid_alias() {
        return Err(RenderError::invalid_ast(format!(
            "table alias {:?} is not a single lowercase letter",
            table.alias
        )));
    }

    if let Distinct::On(fields) = &q.distinct {
        if fields.is_empty() {
            return Err(RenderError::invalid_ast("DISTINCT ON has no fields"));
        }
        let prefix: Vec<&str> = q
            .order_by
            .iter()
            .take(fields.len())
            .map(|o| o.field.name.as_str())
            .collect();
        let wanted: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        if prefix != wanted {
            return Err(RenderError::invalid_ast(
                "DISTINCT ON fields must be a leading prefix of ORDER BY",
            ));
        }
    }

    for join in &q.joins {
        if !join.has_valid_on() {
            return Err(RenderError::invalid_ast(format!(
                "{} requires an ON clause",
                join.kind
            )));
        }
        if let Some(on) = &join.on {
            validate_param_name(&on.left.name)?;
            validate_param_name(&on.right.name)?;
        }
    }

    for expr in &q.expressions {
        validate_field_expression(expr, depth, options)?;
    }

    if let Some(cond) = &q.where_clause {
        validate_condition(cond, depth, options)?;
    }
    for having in &q.having {
        validate_condition(having, depth, options)?;
    }

    for order in &q.order_by {
        if !order.has_consistent_expression() {
            return Err(RenderError::invalid_ast(
                "ORDER BY expression has an operator without a matching parameter",
            ));
        }
        if let Some(p) = &order.param {
            validate_param_ref(p)?;
        }
    }

    Ok(())
}

fn validate_insert(q: &InsertQuery, options: &RenderOptions) -> Result<()> {
    if q.table.name.trim().is_empty() {
        return Err(RenderError::invalid_ast("INSERT has no target table"));
    }
    match &q.source {
        InsertSource::Values(rows) => {
            if rows.is_empty() {
                return Err(RenderError::invalid_ast(
                    "INSERT has no value rows",
                ));
            }
            if !q.has_uniform_rows() {
                return Err(RenderError::invalid_ast(
                    "INSERT value rows do not share the same column set",
                ));
            }
            for row in rows {
                for p in row.values() {
                    validate_param_ref(p)?;
                }
            }
        }
        InsertSource::Query(select) => validate_select(select, 0, options)?,
    }

    if let Some(conflict) = &q.on_conflict {
        if conflict.columns.is_empty() {
            return Err(RenderError::invalid_ast(
                "ON CONFLICT has no target columns",
            ));
        }
        if !conflict.is_valid() {
            return Err(RenderError::invalid_ast(
                "ON CONFLICT DO UPDATE has no update entries",
            ));
        }
        if let crate::ast::ConflictAction::DoUpdate(updates) = &conflict.action {
            for p in updates.values() {
                validate_param_ref(p)?;
            }
        }
    }

    Ok(())
}

fn validate_update(q: &UpdateQuery, options: &RenderOptions) -> Result<()> {
    if q.table.name.trim().is_empty() {
        return Err(RenderError::invalid_ast("UPDATE has no target table"));
    }
    if q.assignments.is_empty() {
        return Err(RenderError::invalid_ast(
            "UPDATE has no assignments",
        ));
    }
    for assignment in q.assignments.values() {
        match assignment {
            UpdateAssignment::Value(p) => validate_param_ref(p)?,
            UpdateAssignment::Expression(expr) => validate_field_expression(expr, 0, options)?,
        }
    }
    if let Some(cond) = &q.where_clause {
        validate_condition(cond, 0, options)?;
    }
    Ok(())
}

fn validate_delete(q: &DeleteQuery, options: &RenderOptions) -> Result<()> {
    if q.table.name.trim().is_empty() {
        return Err(RenderError::invalid_ast("DELETE has no target table"));
    }
    if let Some(cond) = &q.where_clause {
        validate_condition(cond, 0, options)?;
    }
    Ok(())
}

fn validate_count(q: &CountQuery, options: &RenderOptions) -> Result<()> {
    if q.from.name.trim().is_empty() {
        return Err(RenderError::invalid_ast("COUNT has no target table"));
    }
    for join in &q.joins {
        if !join.has_valid_on() {
            return Err(RenderError::invalid_ast(format!(
                "{} requires an ON clause",
                join.kind
            )));
        }
    }
    if let Some(cond) = &q.where_clause {
        validate_condition(cond, 0, options)?;
    }
    Ok(())
}

fn validate_condition(condition: &Condition, depth: u8, options: &RenderOptions) -> Result<()> {
    if condition.is_empty_group() {
        return Err(RenderError::invalid_ast("condition group is empty"));
    }
    match condition {
        Condition::Simple(c) => {
            if c.op.is_nullary() {
                if c.value.is_some() {
                    return Err(RenderError::invalid_ast(
                        "IS NULL/IS NOT NULL must not carry a value parameter",
                    ));
                }
            } else if let Some(p) = &c.value {
                validate_param_ref(p)?;
            } else {
                return Err(RenderError::invalid_ast(format!(
                    "operator {} requires a value parameter",
                    c.op
                )));
            }
        }
        Condition::FieldComparison(_) => {}
        Condition::Between(b) => {
            validate_param_ref(&b.low)?;
            validate_param_ref(&b.high)?;
        }
        Condition::Subquery(s) => {
            use crate::ast::SubqueryOp;
            match s.op {
                SubqueryOp::In | SubqueryOp::NotIn => {
                    if s.field.is_none() {
                        return Err(RenderError::invalid_ast(
                            "IN/NOT IN subquery condition requires a field",
                        ));
                    }
                }
                SubqueryOp::Exists | SubqueryOp::NotExists => {
                    if s.field.is_some() {
                        return Err(RenderError::invalid_ast(
                            "EXISTS/NOT EXISTS must not carry a field",
                        ));
                    }
                }
            }
            let next_depth = depth + 1;
            if next_depth > options.max_subquery_depth {
                return Err(RenderError::DepthExceeded {
                    depth: next_depth,
                    max: options.max_subquery_depth,
                });
            }
            validate_select(&s.subquery, next_depth, options)?;
        }
        Condition::Aggregate(a) => {
            use crate::ast::AggregateFn;
            if a.field.is_none() && a.function != AggregateFn::Count {
                return Err(RenderError::invalid_ast(format!(
                    "{} requires a field unless it is COUNT(*)",
                    a.function.as_str()
                )));
            }
            validate_param_ref(&a.value)?;
        }
        Condition::Group(g) => {
            for c in &g.conditions {
                validate_condition(c, depth, options)?;
            }
        }
    }
    Ok(())
}

fn validate_field_expression(
    expr: &FieldExpression,
    depth: u8,
    options: &RenderOptions,
) -> Result<()> {
    if let Some(filter) = &expr.filter {
        validate_condition(filter, depth, options)?;
    }
    match &expr.kind {
        ExprKind::Case(c) => {
            if c.when_then.is_empty() {
                return Err(RenderError::invalid_ast("CASE has no WHEN branches"));
            }
            for (cond, then) in &c.when_then {
                validate_condition(cond, depth, options)?;
                validate_operand(then)?;
            }
            if let Some(else_branch) = &c.else_branch {
                validate_operand(else_branch)?;
            }
        }
        ExprKind::Coalesce(c) => {
            if c.operands.len() < 2 {
                return Err(RenderError::invalid_ast(
                    "COALESCE requires at least two operands",
                ));
            }
            for op in &c.operands {
                validate_operand(op)?;
            }
        }
        ExprKind::Nullif(n) => {
            validate_operand(&n.left)?;
            validate_operand(&n.right)?;
        }
        ExprKind::Math(m) => {
            if m.args.is_empty() {
                return Err(RenderError::invalid_ast(format!(
                    "{:?} requires at least one argument",
                    m.function
                )));
            }
            for a in &m.args {
                validate_operand(a)?;
            }
        }
        ExprKind::StringFn(s) => {
            if s.args.is_empty() {
                return Err(RenderError::invalid_ast(format!(
                    "{:?} requires at least one argument",
                    s.function
                )));
            }
            for a in &s.args {
                validate_operand(a)?;
            }
        }
        ExprKind::Date(d) => {
            use crate::ast::DateFn;
            if matches!(d.function, DateFn::Extract | DateFn::DateTrunc) && d.part.is_none() {
                return Err(RenderError::invalid_ast(format!(
                    "{:?} requires a date part",
                    d.function
                )));
            }
            for a in &d.args {
                validate_operand(a)?;
            }
        }
        ExprKind::Cast(c) => validate_operand(&c.operand)?,
        ExprKind::Window(w) => {
            for a in &w.args {
                validate_operand(a)?;
            }
            for o in &w.order_by {
                if !o.has_consistent_expression() {
                    return Err(RenderError::invalid_ast(
                        "window ORDER BY expression has an operator without a matching parameter",
                    ));
                }
                if let Some(p) = &o.param {
                    validate_param_ref(p)?;
                }
            }
        }
        ExprKind::Binary(b) => {
            validate_operand(&b.left)?;
            validate_operand(&b.right)?;
        }
        ExprKind::Aggregate(a) => {
            use crate::ast::AggregateFn;
            if a.field.is_none() && a.function != AggregateFn::Count {
                return Err(RenderError::invalid_ast(format!(
                    "{} requires a field unless it is COUNT(*)",
                    a.function.as_str()
                )));
            }
        }
    }
    Ok(())
}

fn validate_operand(operand: &Operand) -> Result<()> {
    match operand {
        Operand::Field(_) => Ok(()),
        Operand::Param(p) => validate_param_ref(p),
        Operand::Expr(e) => {
            // Nested expressions don't traverse subqueries or filters here —
            // a nested FieldExpression cannot itself carry a FILTER or a
            // subquery operand per the AST's own shape.
            validate_param_in_kind(&e.kind)
        }
    }
}

fn validate_param_in_kind(kind: &ExprKind) -> Result<()> {
    match kind {
        ExprKind::Math(m) => m.args.iter().try_for_each(validate_operand),
        ExprKind::StringFn(s) => s.args.iter().try_for_each(validate_operand),
        ExprKind::Date(d) => d.args.iter().try_for_each(validate_operand),
        ExprKind::Cast(c) => validate_operand(&c.operand),
        ExprKind::Binary(b) => {
            validate_operand(&b.left)?;
            validate_operand(&b.right)
        }
        ExprKind::Coalesce(c) => c.operands.iter().try_for_each(validate_operand),
        ExprKind::Nullif(n) => {
            validate_operand(&n.left)?;
            validate_operand(&n.right)
        }
        ExprKind::Aggregate(_) | ExprKind::Case(_) | ExprKind::Window(_) => Ok(()),
    }
}

fn validate_param_ref(param: &Param) -> Result<()> {
    validate_param_name(&param.name)
}

fn validate_param_name(name: &str) -> Result<()> {
    if Param::is_valid_name(name) {
        Ok(())
    } else {
        Err(RenderError::invalid_ast(format!(
            "parameter name {name:?} is not a valid identifier"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{
        ComparisonOp, Field, Param, SelectQuery, SimpleCondition, Table,
    };

    #[test]
    fn select_requires_table() {
        let q = SelectQuery::default();
        let err = validate_select(&q, 0, &RenderOptions::default()).unwrap_err();
        assert!(matches!(err, RenderError::InvalidAst { .. }));
    }

    #[test]
    fn empty_condition_group_rejected() {
        let mut q = SelectQuery::from_table(Table::new("users"));
        q.where_clause = Some(Condition::and_all(vec![]));
        let err = validate_select(&q, 0, &RenderOptions::default()).unwrap_err();
        assert!(matches!(err, RenderError::InvalidAst { .. }));
    }

    #[test]
    fn valid_select_passes() {
        let mut q = SelectQuery::from_table(Table::new("users"));
        q.where_clause = Some(Condition::Simple(SimpleCondition::with_value(
            Field::new("active"),
            ComparisonOp::Eq,
            Param::new("is_active"),
        )));
        validate_select(&q, 0, &RenderOptions::default()).unwrap();
    }

    #[test]
    fn subquery_depth_exceeded() {
        use crate::ast::{SubqueryCondition, SubqueryOp};

        let options = RenderOptions {
            max_subquery_depth: 1,
        };
        let inner = SelectQuery::from_table(Table::new("orders"));
        let mid = Condition::Subquery(SubqueryCondition {
            field: Some(Field::new("id")),
            op: SubqueryOp::In,
            subquery: Box::new(inner),
        });
        let mut outer = SelectQuery::from_table(Table::new("users"));
        outer.where_clause = Some(mid);
        // depth 0 -> 1, within max of 1: ok
        validate_select(&outer, 0, &options).unwrap();

        let options_tight = RenderOptions {
            max_subquery_depth: 0,
        };
        let err = validate_select(&outer, 0, &options_tight).unwrap_err();
        assert!(matches!(err, RenderError::DepthExceeded { .. }));
    }

    #[test]
    fn bad_parameter_name_rejected() {
        let mut q = SelectQuery::from_table(Table::new("users"));
        q.where_clause = Some(Condition::Simple(SimpleCondition::with_value(
            Field::new("active"),
            ComparisonOp::Eq,
            Param::new("1-bad"),
        )));
        let err = validate_select(&q, 0, &RenderOptions::default()).unwrap_err();
        assert!(matches!(err, RenderError::InvalidAst { .. }));
    }
}
