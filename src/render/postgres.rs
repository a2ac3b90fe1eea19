//! PostgreSQL dialect: the richest capability set — `DISTINCT ON`,
//! `ON CONFLICT` upsert, `RETURNING` on every DML statement, POSIX regex
//! operators, array/`ANY`/`ALL` rewriting of `IN`, and the full row-locking
//! family.

use crate::ast::{ConflictAction, ConflictClause, DatePart};
use crate::error::Result;

use super::context::RenderContext;
use super::{CapabilityDescriptor, Dialect, RowLocking};

#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresDialect;

impl Dialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgresql"
    }

    fn capabilities(&self) -> CapabilityDescriptor {
        CapabilityDescriptor {
            distinct_on: true,
            upsert: true,
            returning_on_insert: true,
            returning_on_update: true,
            returning_on_delete: true,
            case_insensitive_like: true,
            regex_operators: true,
            array_operators: true,
            filter_clause: true,
            in_array: true,
            row_locking: RowLocking::Full,
            listen_notify: true,
        }
    }

    fn quote_identifier(&self, name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }

    fn now_sql(&self) -> &'static str {
        "NOW()"
    }

    fn current_date_sql(&self) -> &'static str {
        "CURRENT_DATE"
    }

    fn date_trunc_sql(&self, part: DatePart, arg: &str) -> String {
        format!("DATE_TRUNC('{}', {arg})", part.as_str().to_lowercase())
    }

    fn date_add_sql(&self, part: DatePart, amount: &str, arg: &str) -> String {
        format!(
            "({arg} + (INTERVAL '1 {}' * {amount}))",
            part.as_str().to_lowercase()
        )
    }

    fn date_diff_sql(&self, part: DatePart, start: &str, end: &str) -> String {
        format!(
            "EXTRACT({} FROM ({end} - {start}))",
            part.as_str()
        )
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
                    .map(|(col, param)| format!("{} = {}", self.quote_identifier(col), ctx.register_param(&param.name)))
                    .collect::<Vec<_>>()
                    .join(", ");
                Ok(format!("ON CONFLICT ({cols}) DO UPDATE SET {assignments}"))
            }
        }
    }
}

impl PostgresDialect {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Ast, Field, Param, SelectQuery, SimpleCondition, Table};
    use crate::options::RenderOptions;

    #[test]
    fn renders_simple_select() {
        let mut q = SelectQuery::from_table(Table::aliased("users", "u"));
        q.fields.push(Field::qualified("u", "id"));
        q.where_clause = Some(crate::ast::Condition::Simple(SimpleCondition::with_value(
            Field::qualified("u", "id"),
            crate::ast::ComparisonOp::Eq,
            Param::new("id"),
        )));
        let result = PostgresDialect
            .render(&Ast::Select(q), &RenderOptions::default())
            .unwrap();
        assert_eq!(result.sql, "SELECT \"u\".\"id\" FROM \"users\" u WHERE \"u\".\"id\" = :id");
        assert_eq!(result.required_params, vec!["id".to_string()]);
    }

    #[test]
    fn rewrites_in_to_any() {
        let mut q = SelectQuery::from_table(Table::new("users"));
        q.where_clause = Some(crate::ast::Condition::Simple(SimpleCondition::with_value(
            Field::new("id"),
            crate::ast::ComparisonOp::In,
            Param::new("ids"),
        )));
        let result = PostgresDialect
            .render(&Ast::Select(q), &RenderOptions::default())
            .unwrap();
        assert!(result.sql.contains("= ANY(:ids)"));
    }
}
