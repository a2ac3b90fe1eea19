//! SQLite dialect: double-quoted identifiers (ANSI-compatible), `||`
//! string concatenation, `strftime`/`julianday`-based date arithmetic,
//! `INSERT ... ON CONFLICT` upsert (SQLite adopted PostgreSQL's syntax), and
//! no row locking at all — SQLite is single-writer.

use crate::ast::{ConflictAction, ConflictClause, DatePart};
use crate::error::Result;

use super::context::RenderContext;
use super::{CapabilityDescriptor, Dialect, RowLocking};

#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteDialect;

impl Dialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn capabilities(&self) -> CapabilityDescriptor {
        CapabilityDescriptor {
            distinct_on: false,
            upsert: true,
            returning_on_insert: true,
            returning_on_update: true,
            returning_on_delete: true,
            case_insensitive_like: true,
            regex_operators: false,
            array_operators: false,
            filter_clause: true,
            in_array: false,
            row_locking: RowLocking::None,
            listen_notify: false,
        }
    }

    fn quote_identifier(&self, name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }

    fn ilike_comparison(&self, field_sql: &str, placeholder: &str, negate: bool) -> String {
        // SQLite has no ILIKE operator; fall back to an explicit LOWER(...) rewrite.
        let kw = if negate { "NOT LIKE" } else { "LIKE" };
        format!("LOWER({field_sql}) {kw} LOWER({placeholder})")
    }

    fn now_sql(&self) -> &'static str {
        "datetime('now')"
    }

    fn current_date_sql(&self) -> &'static str {
        "date('now')"
    }

    fn extract_sql(&self, part: DatePart, arg: &str) -> String {
        let fmt = strftime_token(part);
        format!("CAST(strftime('{fmt}', {arg}) AS INTEGER)")
    }

    fn date_trunc_sql(&self, part: DatePart, arg: &str) -> String {
        let fmt = match part {
            DatePart::Year => "%Y-01-01 00:00:00",
            DatePart::Month => "%Y-%m-01 00:00:00",
            DatePart::Day | DatePart::Dow | DatePart::Doy => "%Y-%m-%d 00:00:00",
            DatePart::Hour => "%Y-%m-%d %H:00:00",
            DatePart::Minute => "%Y-%m-%d %H:%M:00",
            DatePart::Second => "%Y-%m-%d %H:%M:%S",
            DatePart::Week | DatePart::Quarter => "%Y-%m-01 00:00:00",
        };
        format!("strftime('{fmt}', {arg})")
    }

    fn date_add_sql(&self, part: DatePart, amount: &str, arg: &str) -> String {
        let unit = match part {
            DatePart::Year => "years",
            DatePart::Month => "months",
            DatePart::Day | DatePart::Dow | DatePart::Doy => "days",
            DatePart::Hour => "hours",
            DatePart::Minute => "minutes",
            DatePart::Second => "seconds",
            DatePart::Week => "days",
            DatePart::Quarter => "months",
        };
        format!("datetime({arg}, ('+' || {amount} || ' {unit}'))")
    }

    fn date_diff_sql(&self, _part: DatePart, start: &str, end: &str) -> String {
        format!("(julianday({end}) - julianday({start}))")
    }

    fn concat_sql(&self, args: &[String]) -> String {
        args.join(" || ")
    }

    fn upsert_fragment(&self, conflict: &ConflictClause, ctx: &RenderContext) -> Result<String> {
        let cols = conflict
            .columns
            .iter()
            .map(|c| self.quote_identifier(c))
            .collect::<Vec<_>>()
            .join(", ");
        match &conflict.action {
            ConflictAction::DoNothing => Ok(format!("ON CONFLICT ({cols}) DO NOTHING")),
            ConflictAction::DoUpdate(updates) => {
                let assignments = updates
                    .iter()
                    .map(|(col, param)| {
                        format!(
                            "{} = {}",
                            self.quote_identifier(col),
                            ctx.register_param(&param.name)
                        )
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                Ok(format!("ON CONFLICT ({cols}) DO UPDATE SET {assignments}"))
            }
        }
    }
}

fn strftime_token(part: DatePart) -> &'static str {
    match part {
        DatePart::Year => "%Y",
        DatePart::Month => "%m",
        DatePart::Day => "%d",
        DatePart::Hour => "%H",
        DatePart::Minute => "%M",
        DatePart::Second => "%S",
        DatePart::Week => "%W",
        DatePart::Dow => "%w",
        DatePart::Doy | DatePart::Quarter => "%j",
    }
}

impl SqliteDialect {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Ast, ComparisonOp, Condition, Field, Param, SelectQuery, SimpleCondition, Table};
    use crate::options::RenderOptions;

    #[test]
    fn renders_concat_with_double_pipe() {
        use crate::ast::{ExprKind, FieldExpression, Operand, StringExpr, StringFn};

        let mut q = SelectQuery::from_table(Table::new("users"));
        q.expressions.push(FieldExpression::new(ExprKind::StringFn(StringExpr {
            function: StringFn::Concat,
            args: vec![Operand::Field(Field::new("first")), Operand::Field(Field::new("last"))],
        })));
        let result = SqliteDialect.render(&Ast::Select(q), &RenderOptions::default()).unwrap();
        assert!(result.sql.contains("\"first\" || \"last\""));
    }

    #[test]
    fn distinct_on_is_unsupported() {
        use crate::ast::Distinct;
        use crate::error::RenderError;

        let mut q = SelectQuery::from_table(Table::new("users"));
        q.distinct = Distinct::On(vec![Field::new("id")]);
        q.order_by.push(crate::ast::OrderBy::asc(Field::new("id")));
        let err = SqliteDialect.render(&Ast::Select(q), &RenderOptions::default()).unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedFeature { .. }));
    }

    #[test]
    fn not_eq_renders_default_bang_eq() {
        let mut q = SelectQuery::from_table(Table::new("users"));
        q.where_clause = Some(Condition::Simple(SimpleCondition::with_value(
            Field::new("status"),
            ComparisonOp::NotEq,
            Param::new("status"),
        )));
        let result = SqliteDialect.render(&Ast::Select(q), &RenderOptions::default()).unwrap();
        assert!(result.sql.contains("!= :status"));
    }
}
