//! SQL Server dialect: bracketed identifiers, `OUTPUT` instead of
//! `RETURNING` (placed mid-statement rather than trailing), `OFFSET ...
//! FETCH NEXT` pagination with a synthesized `ORDER BY (SELECT 1)` when the
//! caller didn't supply one, and no upsert support — `MERGE` is
//! disproportionately complex for what this dialect needs to express, so
//! `ON CONFLICT` simply errors here.

use crate::ast::{ConflictClause, DatePart, Field};
use crate::error::{RenderError, Result};

use super::context::RenderContext;
use super::{CapabilityDescriptor, Dialect, ReturningOp, ReturningPosition, RowLocking};

#[derive(Debug, Clone, Copy, Default)]
pub struct MssqlDialect;

impl Dialect for MssqlDialect {
    fn name(&self) -> &'static str {
        "sqlserver"
    }

    fn capabilities(&self) -> CapabilityDescriptor {
        CapabilityDescriptor {
            distinct_on: false,
            upsert: false,
            returning_on_insert: true,
            returning_on_update: true,
            returning_on_delete: true,
            case_insensitive_like: true,
            regex_operators: false,
            array_operators: false,
            filter_clause: false,
            in_array: false,
            row_locking: RowLocking::None,
            listen_notify: false,
        }
    }

    fn quote_identifier(&self, name: &str) -> String {
        format!("[{}]", name.replace(']', "]]"))
    }

    fn not_eq_sql(&self) -> &'static str {
        "<>"
    }

    fn ilike_comparison(&self, field_sql: &str, placeholder: &str, negate: bool) -> String {
        // SQL Server's default collation is case-insensitive, so ILIKE
        // lowers to a bare LIKE.
        let kw = if negate { "NOT LIKE" } else { "LIKE" };
        format!("{field_sql} {kw} {placeholder}")
    }

    fn now_sql(&self) -> &'static str {
        "GETDATE()"
    }

    fn current_date_sql(&self) -> &'static str {
        "CAST(GETDATE() AS DATE)"
    }

    fn extract_sql(&self, part: DatePart, arg: &str) -> String {
        format!("DATEPART({}, {arg})", part.as_str())
    }

    fn date_trunc_sql(&self, part: DatePart, arg: &str) -> String {
        match part {
            DatePart::Year => format!("DATEFROMPARTS(YEAR({arg}), 1, 1)"),
            DatePart::Month => format!("DATEFROMPARTS(YEAR({arg}), MONTH({arg}), 1)"),
            _ => format!("CAST({arg} AS DATE)"),
        }
    }

    fn date_add_sql(&self, part: DatePart, amount: &str, arg: &str) -> String {
        format!("DATEADD({}, {amount}, {arg})", part.as_str())
    }

    fn date_diff_sql(&self, part: DatePart, start: &str, end: &str) -> String {
        format!("DATEDIFF({}, {start}, {end})", part.as_str())
    }

    fn length_fn_name(&self) -> &'static str {
        "LEN"
    }

    fn math_fn_name(&self, function: crate::ast::MathFn) -> &'static str {
        match function {
            crate::ast::MathFn::Ceil => "CEILING",
            other => default_math_fn_name(other),
        }
    }

    fn substring_sql(&self, args: &[String]) -> String {
        if args.len() >= 3 {
            format!("SUBSTRING({}, {}, {})", args[0], args[1], args[2])
        } else {
            format!("SUBSTRING({}, {})", args[0], args[1])
        }
    }

    fn requires_order_by_for_pagination(&self) -> bool {
        true
    }

    fn render_pagination(&self, pagination: &crate::ast::Pagination, ctx: &RenderContext) -> Result<Option<String>> {
        if pagination.is_empty() {
            return Ok(None);
        }
        let offset_sql = pagination
            .offset
            .as_ref()
            .map_or_else(|| "0".to_string(), |v| self.render_pagination_value(v, ctx));
        let mut clause = format!("OFFSET {offset_sql} ROWS");
        if let Some(limit) = &pagination.limit {
            clause.push_str(&format!(
                " FETCH NEXT {} ROWS ONLY",
                self.render_pagination_value(limit, ctx)
            ));
        }
        Ok(Some(clause))
    }

    fn returning_position(&self, op: ReturningOp) -> ReturningPosition {
        match op {
            ReturningOp::Insert => ReturningPosition::BeforeValues,
            ReturningOp::Update | ReturningOp::Delete => ReturningPosition::BeforeWhere,
        }
    }

    fn returning_fragment(&self, op: ReturningOp, fields: &[Field]) -> String {
        let prefix = match op {
            ReturningOp::Delete => "DELETED",
            ReturningOp::Insert | ReturningOp::Update => "INSERTED",
        };
        let cols = fields
            .iter()
            .map(|f| format!("{prefix}.{}", self.quote_identifier(&f.name)))
            .collect::<Vec<_>>()
            .join(", ");
        format!("OUTPUT {cols}")
    }

    fn upsert_fragment(&self, _conflict: &ConflictClause, _ctx: &RenderContext) -> Result<String> {
        Err(RenderError::build_error(
            "sqlserver upsert is rejected at the capability gate and should be unreachable",
        ))
    }
}

fn default_math_fn_name(function: crate::ast::MathFn) -> &'static str {
    use crate::ast::MathFn;
    match function {
        MathFn::Abs => "ABS",
        MathFn::Round => "ROUND",
        MathFn::Ceil => "CEIL",
        MathFn::Floor => "FLOOR",
        MathFn::Power => "POWER",
        MathFn::Sqrt => "SQRT",
        MathFn::Mod => "MOD",
    }
}

impl MssqlDialect {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Ast, InsertQuery, Param, Table, ValueRow};
    use crate::error::RenderError;
    use crate::options::RenderOptions;

    #[test]
    fn output_clause_precedes_values() {
        let mut row = ValueRow::new();
        row.insert("name".to_string(), Param::new("name"));
        let mut insert = InsertQuery::values(Table::new("users"), vec![row]);
        insert.returning.push(Field::new("id"));
        let result = MssqlDialect
            .render(&Ast::Insert(insert), &RenderOptions::default())
            .unwrap();
        let output_pos = result.sql.find("OUTPUT").unwrap();
        let values_pos = result.sql.find("VALUES").unwrap();
        assert!(output_pos < values_pos);
        assert!(result.sql.contains("OUTPUT INSERTED.[id]"));
    }

    #[test]
    fn upsert_is_rejected() {
        use crate::ast::ConflictClause;

        let mut row = ValueRow::new();
        row.insert("id".to_string(), Param::new("id"));
        let mut insert = InsertQuery::values(Table::new("users"), vec![row]);
        insert.on_conflict = Some(ConflictClause::do_nothing(vec!["id".to_string()]));
        let err = MssqlDialect
            .render(&Ast::Insert(insert), &RenderOptions::default())
            .unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedFeature { .. }));
    }

    #[test]
    fn pagination_synthesizes_order_by() {
        use crate::ast::{Pagination, PaginationValue, SelectQuery};

        let mut q = SelectQuery::from_table(Table::new("users"));
        q.pagination = Pagination {
            limit: Some(PaginationValue::Static(10)),
            offset: Some(PaginationValue::Static(0)),
        };
        let result = MssqlDialect.render(&Ast::Select(q), &RenderOptions::default()).unwrap();
        assert!(result.sql.contains("ORDER BY (SELECT 1) OFFSET 0 ROWS FETCH NEXT 10 ROWS ONLY"));
    }
}
