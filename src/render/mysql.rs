//! MySQL/MariaDB dialect: backtick identifiers, `ON DUPLICATE KEY UPDATE`
//! upsert (no conflict-target column list), `RETURNING` unsupported on any
//! statement, and only exclusive (`FOR UPDATE`) row locking.

use crate::ast::{ConflictAction, ConflictClause, DatePart};
use crate::error::Result;

use super::context::RenderContext;
use super::{CapabilityDescriptor, Dialect, RowLocking};

#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlDialect;

impl Dialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn capabilities(&self) -> CapabilityDescriptor {
        CapabilityDescriptor {
            distinct_on: false,
            upsert: true,
            returning_on_insert: false,
            returning_on_update: false,
            returning_on_delete: false,
            case_insensitive_like: false,
            regex_operators: false,
            array_operators: false,
            filter_clause: false,
            in_array: false,
            row_locking: RowLocking::ExclusiveOnly,
            listen_notify: false,
        }
    }

    fn quote_identifier(&self, name: &str) -> String {
        format!("`{}`", name.replace('`', "``"))
    }

    fn not_eq_sql(&self) -> &'static str {
        "<>"
    }

    fn ilike_comparison(&self, field_sql: &str, placeholder: &str, negate: bool) -> String {
        // MySQL/MariaDB's default collation is already case-insensitive, so
        // ILIKE lowers to a bare LIKE.
        let kw = if negate { "NOT LIKE" } else { "LIKE" };
        format!("{field_sql} {kw} {placeholder}")
    }

    fn now_sql(&self) -> &'static str {
        "NOW()"
    }

    fn current_date_sql(&self) -> &'static str {
        "CURDATE()"
    }

    fn extract_sql(&self, part: DatePart, arg: &str) -> String {
        format!("EXTRACT({} FROM {arg})", part.as_str())
    }

    fn date_trunc_sql(&self, part: DatePart, arg: &str) -> String {
        let fmt = match part {
            DatePart::Year => "%Y-01-01",
            DatePart::Month => "%Y-%m-01",
            DatePart::Day | DatePart::Dow | DatePart::Doy => "%Y-%m-%d",
            DatePart::Hour => "%Y-%m-%d %H:00:00",
            DatePart::Minute => "%Y-%m-%d %H:%i:00",
            DatePart::Second => "%Y-%m-%d %H:%i:%s",
            DatePart::Week | DatePart::Quarter => "%Y-%m-01",
        };
        format!("DATE_FORMAT({arg}, '{fmt}')")
    }

    fn date_add_sql(&self, part: DatePart, amount: &str, arg: &str) -> String {
        format!("DATE_ADD({arg}, INTERVAL {amount} {})", part.as_str())
    }

    fn date_diff_sql(&self, _part: DatePart, start: &str, end: &str) -> String {
        format!("DATEDIFF({end}, {start})")
    }

    fn length_fn_name(&self) -> &'static str {
        "LENGTH"
    }

    fn substring_sql(&self, args: &[String]) -> String {
        if args.len() >= 3 {
            format!("SUBSTRING({}, {}, {})", args[0], args[1], args[2])
        } else {
            format!("SUBSTRING({}, {})", args[0], args[1])
        }
    }

    fn upsert_fragment(&self, conflict: &ConflictClause, ctx: &RenderContext) -> Result<String> {
        match &conflict.action {
            ConflictAction::DoNothing => {
                let col = conflict
                    .columns
                    .first()
                    .map(|c| self.quote_identifier(c))
                    .unwrap_or_else(|| "id".to_string());
                Ok(format!("ON DUPLICATE KEY UPDATE {col} = {col}"))
            }
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
                Ok(format!("ON DUPLICATE KEY UPDATE {assignments}"))
            }
        }
    }
}

impl MySqlDialect {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}
