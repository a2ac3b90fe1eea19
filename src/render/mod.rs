//! The dialect rendering engine: the traversal that turns a validated AST
//! into dialect-correct, parameterized SQL.
//!
//! [`Dialect`] is the single trait every target (PostgreSQL, MySQL/MariaDB,
//! SQL Server, SQLite) implements. Clause assembly, condition dispatch, and
//! expression dispatch live as default methods here; each dialect overrides
//! only the handful of hook methods where its SQL actually diverges
//! (identifier quoting, operator spelling, date/string function syntax,
//! pagination shape, upsert syntax, `RETURNING`/`OUTPUT` placement).

pub mod capability;
pub mod context;
pub mod mssql;
pub mod mysql;
pub mod postgres;
pub mod sqlite;

pub use capability::{CapabilityDescriptor, RowLocking};
pub use context::RenderContext;
pub use mssql::MssqlDialect;
pub use mysql::MySqlDialect;
pub use postgres::PostgresDialect;
pub use sqlite::SqliteDialect;

use crate::ast::{
    Ast, ChannelQuery, ComparisonOp, CompoundQuery, Condition, CountQuery, DateExpr, DateFn,
    DeleteQuery, Distinct, ExprKind, Field, FieldComparison, FieldExpression, InsertQuery,
    InsertSource, Join, MathExpr, MathFn, Operand, OrderBy, Pagination, SelectQuery, StringExpr,
    StringFn, Table, UpdateAssignment, UpdateQuery, WindowExpr,
};
use crate::ast::{AggregateFn, ConflictClause, LockMode};
use crate::error::{RenderError, Result};
use crate::options::RenderOptions;
use crate::validate;

/// The final output of a render pass: a parameterized SQL string and the
/// ordered, deduplicated list of parameter names that must be bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    pub sql: String,
    pub required_params: Vec<String>,
}

/// Which statement kind a `RETURNING`/`OUTPUT` clause belongs to — its
/// wording and position both depend on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturningOp {
    Insert,
    Update,
    Delete,
}

/// Where a dialect places its `RETURNING`/`OUTPUT` fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturningPosition {
    /// After the whole statement (PostgreSQL, SQLite `RETURNING`).
    Trailing,
    /// Between the column list and `VALUES` (SQL Server `OUTPUT` on INSERT).
    BeforeValues,
    /// Between `SET`/the table and `WHERE` (SQL Server `OUTPUT` on
    /// UPDATE/DELETE).
    BeforeWhere,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChannelOp {
    Listen,
    Unlisten,
}

fn ast_kind(ast: &Ast) -> &'static str {
    match ast {
        Ast::Select(_) => "select",
        Ast::Insert(_) => "insert",
        Ast::Update(_) => "update",
        Ast::Delete(_) => "delete",
        Ast::Count(_) => "count",
        Ast::Listen(_) => "listen",
        Ast::Unlisten(_) => "unlisten",
    }
}

/// The per-dialect SQL renderer. Every method has a default implementation
/// in terms of the abstract hook methods at the bottom of the trait; a
/// concrete dialect overrides hooks, not the traversal.
pub trait Dialect {
    // ---- identity & capabilities -----------------------------------

    fn name(&self) -> &'static str;

    fn capabilities(&self) -> CapabilityDescriptor;

    // ---- public entry points ----------------------------------------

    fn render(&self, ast: &Ast, options: &RenderOptions) -> Result<QueryResult> {
        validate::validate(ast, options)?;
        let ctx = RenderContext::new(options.max_subquery_depth);
        let sql = match ast {
            Ast::Select(q) => self.render_select(q, &ctx)?,
            Ast::Insert(q) => self.render_insert(q, &ctx)?,
            Ast::Update(q) => self.render_update(q, &ctx)?,
            Ast::Delete(q) => self.render_delete(q, &ctx)?,
            Ast::Count(q) => self.render_count(q, &ctx)?,
            Ast::Listen(q) => self.render_channel(ChannelOp::Listen, q)?,
            Ast::Unlisten(q) => self.render_channel(ChannelOp::Unlisten, q)?,
        };
        tracing::trace!(dialect = self.name(), operation = ast_kind(ast), "rendered query");
        Ok(QueryResult {
            sql,
            required_params: ctx.required_params(),
        })
    }

    fn render_compound(&self, compound: &CompoundQuery, options: &RenderOptions) -> Result<QueryResult> {
        validate::validate_compound(compound, options)?;
        let root_ctx = RenderContext::new(options.max_subquery_depth);

        let base_ctx = root_ctx.sibling_with_prefix("q0_");
        let mut sql = format!("({})", self.render_select(&compound.base, &base_ctx)?);

        for (i, (op, operand)) in compound.operands.iter().enumerate() {
            let operand_ctx = root_ctx.sibling_with_prefix(format!("q{}_", i + 1));
            sql.push_str(&format!(
                " {} ({})",
                op.as_str(),
                self.render_select(operand, &operand_ctx)?
            ));
        }

        let trailing_ctx = root_ctx.sibling_with_prefix("");
        let tail = self.render_tail(
            &compound.trailing_order_by,
            &compound.trailing_pagination,
            None,
            &trailing_ctx,
        )?;
        if !tail.is_empty() {
            sql.push(' ');
            sql.push_str(&tail);
        }

        tracing::trace!(
            dialect = self.name(),
            operands = compound.operands.len(),
            "rendered compound query"
        );
        Ok(QueryResult {
            sql,
            required_params: root_ctx.required_params(),
        })
    }

    // ---- statement renderers ------------------------------------------

    fn render_select(&self, q: &SelectQuery, ctx: &RenderContext) -> Result<String> {
        let Some(table) = &q.from else {
            return Err(RenderError::build_error("SELECT has no target table"));
        };

        let mut parts = vec!["SELECT".to_string()];
        match &q.distinct {
            Distinct::None => {}
            Distinct::All => parts.push("DISTINCT".to_string()),
            Distinct::On(fields) => {
                if !self.capabilities().distinct_on {
                    return Err(RenderError::unsupported(self.name(), "DISTINCT ON"));
                }
                let cols = fields
                    .iter()
                    .map(|f| self.render_field(f))
                    .collect::<Vec<_>>()
                    .join(", ");
                parts.push(format!("DISTINCT ON ({cols})"));
            }
        }
        parts.push(self.render_projection(&q.fields, &q.expressions, ctx)?);
        parts.push("FROM".to_string());
        parts.push(self.render_table(table));

        for join in &q.joins {
            parts.push(self.render_join(join)?);
        }

        if let Some(where_clause) = &q.where_clause {
            parts.push("WHERE".to_string());
            parts.push(self.render_condition(where_clause, ctx)?);
        }

        if !q.group_by.is_empty() {
            parts.push("GROUP BY".to_string());
            parts.push(
                q.group_by
                    .iter()
                    .map(|f| self.render_field(f))
                    .collect::<Vec<_>>()
                    .join(", "),
            );
        }

        if !q.having.is_empty() {
            parts.push("HAVING".to_string());
            let rendered: Result<Vec<String>> =
                q.having.iter().map(|c| self.render_condition(c, ctx)).collect();
            parts.push(rendered?.join(" AND "));
        }

        let tail = self.render_tail(&q.order_by, &q.pagination, q.lock, ctx)?;
        if !tail.is_empty() {
            parts.push(tail);
        }

        Ok(parts.join(" "))
    }

    fn render_insert(&self, q: &InsertQuery, ctx: &RenderContext) -> Result<String> {
        match &q.source {
            InsertSource::Values(rows) => self.render_insert_values(q, rows, ctx),
            InsertSource::Query(select) => self.render_insert_select(q, select, ctx),
        }
    }

    fn render_insert_values(
        &self,
        q: &InsertQuery,
        rows: &[crate::ast::ValueRow],
        ctx: &RenderContext,
    ) -> Result<String> {
        let Some(first) = rows.first() else {
            return Err(RenderError::build_error("INSERT has no value rows"));
        };
        // `ValueRow` is a `BTreeMap`, so its keys already iterate sorted.
        let columns: Vec<&String> = first.keys().collect();
        let col_list = columns
            .iter()
            .map(|c| self.quote_identifier(c))
            .collect::<Vec<_>>()
            .join(", ");

        let mut sql = format!("INSERT INTO {} ({col_list})", self.render_table(&q.table));

        let returning = self.render_returning(ReturningOp::Insert, &q.returning)?;
        if let Some(frag) = &returning {
            if self.returning_position(ReturningOp::Insert) == ReturningPosition::BeforeValues {
                sql.push(' ');
                sql.push_str(frag);
            }
        }

        sql.push_str(" VALUES ");
        let row_strs: Vec<String> = rows
            .iter()
            .map(|row| {
                let vals: Vec<String> = columns
                    .iter()
                    .map(|c| ctx.register_param(&row[*c].name))
                    .collect();
                format!("({})", vals.join(", "))
            })
            .collect();
        sql.push_str(&row_strs.join(", "));

        if let Some(conflict) = &q.on_conflict {
            sql.push(' ');
            sql.push_str(&self.render_on_conflict_clause(conflict, ctx)?);
        }

        if let Some(frag) = &returning {
            if self.returning_position(ReturningOp::Insert) != ReturningPosition::BeforeValues {
                sql.push(' ');
                sql.push_str(frag);
            }
        }

        Ok(sql)
    }

    fn render_insert_select(
        &self,
        q: &InsertQuery,
        select: &SelectQuery,
        ctx: &RenderContext,
    ) -> Result<String> {
        let mut sql = format!(
            "INSERT INTO {} {}",
            self.render_table(&q.table),
            self.render_select(select, ctx)?
        );
        if let Some(conflict) = &q.on_conflict {
            sql.push(' ');
            sql.push_str(&self.render_on_conflict_clause(conflict, ctx)?);
        }
        if let Some(frag) = self.render_returning(ReturningOp::Insert, &q.returning)? {
            sql.push(' ');
            sql.push_str(&frag);
        }
        Ok(sql)
    }

    fn render_update(&self, q: &UpdateQuery, ctx: &RenderContext) -> Result<String> {
        let mut sql = format!("UPDATE {} SET ", self.render_table(&q.table));

        // `assignments` is a `BTreeMap`, so iteration is already sorted by
        // field name; partition into value-based then expression-based
        // groups, each keeping that sorted relative order.
        let mut value_keys = Vec::new();
        let mut expr_keys = Vec::new();
        for (k, v) in &q.assignments {
            match v {
                UpdateAssignment::Value(_) => value_keys.push(k),
                UpdateAssignment::Expression(_) => expr_keys.push(k),
            }
        }

        let mut assignment_strs = Vec::new();
        for key in value_keys.into_iter().chain(expr_keys) {
            let rhs = match &q.assignments[key] {
                UpdateAssignment::Value(p) => ctx.register_param(&p.name),
                UpdateAssignment::Expression(e) => self.render_field_expression(e, ctx)?,
            };
            assignment_strs.push(format!("{} = {rhs}", self.quote_identifier(key)));
        }
        sql.push_str(&assignment_strs.join(", "));

        let returning = self.render_returning(ReturningOp::Update, &q.returning)?;
        if let Some(frag) = &returning {
            if self.returning_position(ReturningOp::Update) == ReturningPosition::BeforeWhere {
                sql.push(' ');
                sql.push_str(frag);
            }
        }

        if let Some(where_clause) = &q.where_clause {
            sql.push_str(" WHERE ");
            sql.push_str(&self.render_condition(where_clause, ctx)?);
        }

        if let Some(frag) = &returning {
            if self.returning_position(ReturningOp::Update) != ReturningPosition::BeforeWhere {
                sql.push(' ');
                sql.push_str(frag);
            }
        }

        Ok(sql)
    }

    fn render_delete(&self, q: &DeleteQuery, ctx: &RenderContext) -> Result<String> {
        let mut sql = format!("DELETE FROM {}", self.render_table(&q.table));

        let returning = self.render_returning(ReturningOp::Delete, &q.returning)?;
        if let Some(frag) = &returning {
            if self.returning_position(ReturningOp::Delete) == ReturningPosition::BeforeWhere {
                sql.push(' ');
                sql.push_str(frag);
            }
        }

        if let Some(where_clause) = &q.where_clause {
            sql.push_str(" WHERE ");
            sql.push_str(&self.render_condition(where_clause, ctx)?);
        }

        if let Some(frag) = &returning {
            if self.returning_position(ReturningOp::Delete) != ReturningPosition::BeforeWhere {
                sql.push(' ');
                sql.push_str(frag);
            }
        }

        Ok(sql)
    }

    fn render_count(&self, q: &CountQuery, ctx: &RenderContext) -> Result<String> {
        let mut parts = vec!["SELECT COUNT(*) FROM".to_string(), self.render_table(&q.from)];
        for join in &q.joins {
            parts.push(self.render_join(join)?);
        }
        if let Some(where_clause) = &q.where_clause {
            parts.push("WHERE".to_string());
            parts.push(self.render_condition(where_clause, ctx)?);
        }
        Ok(parts.join(" "))
    }

    fn render_channel(&self, op: ChannelOp, q: &ChannelQuery) -> Result<String> {
        if !self.capabilities().listen_notify {
            return Err(RenderError::unsupported(self.name(), "LISTEN/UNLISTEN"));
        }
        let keyword = match op {
            ChannelOp::Listen => "LISTEN",
            ChannelOp::Unlisten => "UNLISTEN",
        };
        Ok(format!("{keyword} {}", self.quote_identifier(&q.channel)))
    }

    // ---- returning / upsert ---------------------------------------

    fn render_returning(&self, op: ReturningOp, fields: &[Field]) -> Result<Option<String>> {
        if fields.is_empty() {
            return Ok(None);
        }
        let supported = match op {
            ReturningOp::Insert => self.capabilities().returning_on_insert,
            ReturningOp::Update => self.capabilities().returning_on_update,
            ReturningOp::Delete => self.capabilities().returning_on_delete,
        };
        if !supported {
            return Err(RenderError::unsupported(self.name(), "RETURNING"));
        }
        Ok(Some(self.returning_fragment(op, fields)))
    }

    fn render_on_conflict_clause(&self, conflict: &ConflictClause, ctx: &RenderContext) -> Result<String> {
        if !self.capabilities().upsert {
            return Err(RenderError::unsupported(self.name(), "ON CONFLICT/upsert"));
        }
        self.upsert_fragment(conflict, ctx)
    }

    // ---- joins, tables, fields -----------------------------------------

    fn render_table(&self, table: &Table) -> String {
        match &table.alias {
            // Aliases are validated to a single lowercase letter and emitted
            // bare — they cannot collide with a reserved word at that length.
            Some(alias) => format!("{} {alias}", self.quote_identifier(&table.name)),
            None => self.quote_identifier(&table.name),
        }
    }

    fn render_join(&self, join: &Join) -> Result<String> {
        let mut s = format!("{} {}", join.kind.as_str(), self.render_table(&join.table));
        if let Some(on) = &join.on {
            s.push_str(" ON ");
            s.push_str(&self.render_field_comparison(on));
        }
        Ok(s)
    }

    fn render_field(&self, field: &Field) -> String {
        let base = match &field.table {
            Some(t) => format!(
                "{}.{}",
                self.quote_identifier(t),
                self.quote_identifier(&field.name)
            ),
            None => self.quote_identifier(&field.name),
        };
        match &field.json {
            None => base,
            Some(crate::ast::JsonAccessor::TextKey(key)) => self.json_text_key_sql(&base, key),
            Some(crate::ast::JsonAccessor::PathKey(path)) => self.json_path_key_sql(&base, path),
        }
    }

    fn render_field_comparison(&self, c: &FieldComparison) -> String {
        format!(
            "{} {} {}",
            self.render_field(&c.left),
            self.comparison_op_sql(c.op),
            self.render_field(&c.right)
        )
    }

    fn render_projection(
        &self,
        fields: &[Field],
        expressions: &[FieldExpression],
        ctx: &RenderContext,
    ) -> Result<String> {
        if fields.is_empty() && expressions.is_empty() {
            return Ok("*".to_string());
        }
        let mut parts: Vec<String> = fields.iter().map(|f| self.render_field(f)).collect();
        for expr in expressions {
            parts.push(self.render_field_expression(expr, ctx)?);
        }
        Ok(parts.join(", "))
    }

    // ---- conditions -----------------------------------------------------

    fn render_condition(&self, condition: &Condition, ctx: &RenderContext) -> Result<String> {
        match condition {
            Condition::Simple(c) => self.render_simple_condition(c, ctx),
            Condition::FieldComparison(c) => Ok(self.render_field_comparison(c)),
            Condition::Between(b) => {
                let field_sql = self.render_field(&b.field);
                let low = ctx.register_param(&b.low.name);
                let high = ctx.register_param(&b.high.name);
                let kw = if b.negated { "NOT BETWEEN" } else { "BETWEEN" };
                Ok(format!("{field_sql} {kw} {low} AND {high}"))
            }
            Condition::Subquery(s) => self.render_subquery_condition(s, ctx),
            Condition::Aggregate(a) => {
                let agg_sql = self.render_aggregate_call(a.function, a.field.as_ref())?;
                let placeholder = ctx.register_param(&a.value.name);
                Ok(format!("{agg_sql} {} {placeholder}", a.op.as_str()))
            }
            Condition::Group(g) => {
                let rendered: Result<Vec<String>> =
                    g.conditions.iter().map(|c| self.render_condition(c, ctx)).collect();
                Ok(format!(
                    "({})",
                    rendered?.join(&format!(" {} ", g.logic.as_str()))
                ))
            }
        }
    }

    fn render_simple_condition(
        &self,
        c: &crate::ast::SimpleCondition,
        ctx: &RenderContext,
    ) -> Result<String> {
        let field_sql = self.render_field(&c.field);
        match c.op {
            ComparisonOp::IsNull => Ok(format!("{field_sql} IS NULL")),
            ComparisonOp::IsNotNull => Ok(format!("{field_sql} IS NOT NULL")),
            ComparisonOp::ILike | ComparisonOp::NotILike => {
                let value = c
                    .value
                    .as_ref()
                    .ok_or_else(|| RenderError::build_error("ILIKE requires a value parameter"))?;
                let negate = c.op == ComparisonOp::NotILike;
                let placeholder = ctx.register_param(&value.name);
                Ok(self.ilike_comparison(&field_sql, &placeholder, negate))
            }
            ComparisonOp::Regex | ComparisonOp::NotRegex => {
                if !self.capabilities().regex_operators {
                    return Err(RenderError::unsupported(self.name(), "regex operator"));
                }
                let value = c
                    .value
                    .as_ref()
                    .ok_or_else(|| RenderError::build_error("regex operator requires a value"))?;
                let placeholder = ctx.register_param(&value.name);
                Ok(format!("{field_sql} {} {placeholder}", c.op.as_str()))
            }
            ComparisonOp::ArrayContains | ComparisonOp::ArrayOverlap => {
                if !self.capabilities().array_operators {
                    return Err(RenderError::unsupported(self.name(), "array operator"));
                }
                let value = c
                    .value
                    .as_ref()
                    .ok_or_else(|| RenderError::build_error("array operator requires a value"))?;
                let placeholder = ctx.register_param(&value.name);
                Ok(format!("{field_sql} {} {placeholder}", c.op.as_str()))
            }
            ComparisonOp::In | ComparisonOp::NotIn => {
                let value = c
                    .value
                    .as_ref()
                    .ok_or_else(|| RenderError::build_error("IN/NOT IN requires a value"))?;
                let placeholder = ctx.register_param(&value.name);
                if self.capabilities().in_array {
                    let (cmp, func) = if c.op == ComparisonOp::In {
                        ("=", "ANY")
                    } else {
                        (self.not_eq_sql(), "ALL")
                    };
                    Ok(format!("{field_sql} {cmp} {func}({placeholder})"))
                } else {
                    let kw = if c.op == ComparisonOp::In { "IN" } else { "NOT IN" };
                    Ok(format!("{field_sql} {kw} ({placeholder})"))
                }
            }
            ComparisonOp::NotEq => {
                let value = c
                    .value
                    .as_ref()
                    .ok_or_else(|| RenderError::build_error("!= requires a value"))?;
                let placeholder = ctx.register_param(&value.name);
                Ok(format!("{field_sql} {} {placeholder}", self.not_eq_sql()))
            }
            _ => {
                let value = c.value.as_ref().ok_or_else(|| {
                    RenderError::build_error(format!("{} requires a value parameter", c.op))
                })?;
                let placeholder = ctx.register_param(&value.name);
                Ok(format!("{field_sql} {} {placeholder}", c.op.as_str()))
            }
        }
    }

    fn render_subquery_condition(
        &self,
        s: &crate::ast::SubqueryCondition,
        ctx: &RenderContext,
    ) -> Result<String> {
        use crate::ast::SubqueryOp;
        let child_ctx = ctx.enter_subquery()?;
        let sub_sql = self.render_select(&s.subquery, &child_ctx)?;
        match s.op {
            SubqueryOp::Exists => Ok(format!("EXISTS ({sub_sql})")),
            SubqueryOp::NotExists => Ok(format!("NOT EXISTS ({sub_sql})")),
            SubqueryOp::In | SubqueryOp::NotIn => {
                let field = s
                    .field
                    .as_ref()
                    .ok_or_else(|| RenderError::build_error("IN/NOT IN subquery requires a field"))?;
                let kw = if s.op == SubqueryOp::In { "IN" } else { "NOT IN" };
                Ok(format!("{} {kw} ({sub_sql})", self.render_field(field)))
            }
        }
    }

    fn render_aggregate_call(&self, function: AggregateFn, field: Option<&Field>) -> Result<String> {
        match field {
            Some(f) => {
                let distinct = if function.is_distinct() { "DISTINCT " } else { "" };
                Ok(format!("{}({distinct}{})", function.as_str(), self.render_field(f)))
            }
            None if matches!(function, AggregateFn::Count) => Ok(format!("{}(*)", function.as_str())),
            None => Err(RenderError::build_error(format!(
                "{} requires a field",
                function.as_str()
            ))),
        }
    }

    // ---- expressions ------------------------------------------------

    fn render_field_expression(&self, expr: &FieldExpression, ctx: &RenderContext) -> Result<String> {
        let mut sql = self.render_expr_kind(&expr.kind, ctx)?;
        if let Some(filter) = &expr.filter {
            if !self.capabilities().filter_clause {
                return Err(RenderError::unsupported(self.name(), "FILTER clause"));
            }
            sql = format!("{sql} FILTER (WHERE {})", self.render_condition(filter, ctx)?);
        }
        if let Some(alias) = &expr.alias {
            sql = format!("{sql} AS {}", self.quote_identifier(alias));
        }
        Ok(sql)
    }

    fn render_expr_kind(&self, kind: &ExprKind, ctx: &RenderContext) -> Result<String> {
        match kind {
            ExprKind::Case(c) => {
                let mut sql = "CASE".to_string();
                for (cond, then) in &c.when_then {
                    sql.push_str(&format!(
                        " WHEN {} THEN {}",
                        self.render_condition(cond, ctx)?,
                        self.render_operand(then, ctx)?
                    ));
                }
                if let Some(else_branch) = &c.else_branch {
                    sql.push_str(&format!(" ELSE {}", self.render_operand(else_branch, ctx)?));
                }
                sql.push_str(" END");
                Ok(sql)
            }
            ExprKind::Coalesce(c) => {
                let rendered: Result<Vec<String>> =
                    c.operands.iter().map(|o| self.render_operand(o, ctx)).collect();
                Ok(format!("COALESCE({})", rendered?.join(", ")))
            }
            ExprKind::Nullif(n) => Ok(format!(
                "NULLIF({}, {})",
                self.render_operand(&n.left, ctx)?,
                self.render_operand(&n.right, ctx)?
            )),
            ExprKind::Math(m) => self.render_math_expr(m, ctx),
            ExprKind::StringFn(s) => self.render_string_expr(s, ctx),
            ExprKind::Date(d) => self.render_date_expr(d, ctx),
            ExprKind::Cast(c) => Ok(format!(
                "CAST({} AS {})",
                self.render_operand(&c.operand, ctx)?,
                c.target.as_sql()
            )),
            ExprKind::Window(w) => self.render_window_expr(w, ctx),
            ExprKind::Binary(b) => Ok(format!(
                "{} {} {}",
                self.render_operand(&b.left, ctx)?,
                b.op.as_str(),
                self.render_operand(&b.right, ctx)?
            )),
            ExprKind::Aggregate(a) => self.render_aggregate_call(a.function, a.field.as_ref()),
        }
    }

    fn render_operand(&self, operand: &Operand, ctx: &RenderContext) -> Result<String> {
        match operand {
            Operand::Field(f) => Ok(self.render_field(f)),
            Operand::Param(p) => Ok(ctx.register_param(&p.name)),
            Operand::Expr(e) => Ok(format!("({})", self.render_expr_kind(&e.kind, ctx)?)),
        }
    }

    fn render_math_expr(&self, m: &MathExpr, ctx: &RenderContext) -> Result<String> {
        let args: Vec<String> = m
            .args
            .iter()
            .map(|a| self.render_operand(a, ctx))
            .collect::<Result<_>>()?;
        match m.function {
            MathFn::Mod => {
                if args.len() != 2 {
                    return Err(RenderError::build_error("MOD requires two arguments"));
                }
                Ok(format!("MOD({}, {})", args[0], args[1]))
            }
            MathFn::Power => {
                if args.len() != 2 {
                    return Err(RenderError::build_error("POWER requires two arguments"));
                }
                Ok(format!(
                    "{}({}, {})",
                    self.math_fn_name(MathFn::Power),
                    args[0],
                    args[1]
                ))
            }
            _ => {
                let Some(arg) = args.first() else {
                    return Err(RenderError::build_error(format!(
                        "{:?} requires one argument",
                        m.function
                    )));
                };
                Ok(format!("{}({arg})", self.math_fn_name(m.function)))
            }
        }
    }

    fn render_string_expr(&self, s: &StringExpr, ctx: &RenderContext) -> Result<String> {
        let args: Vec<String> = s
            .args
            .iter()
            .map(|a| self.render_operand(a, ctx))
            .collect::<Result<_>>()?;
        match s.function {
            StringFn::Concat => Ok(self.concat_sql(&args)),
            StringFn::Substring => Ok(self.substring_sql(&args)),
            StringFn::Upper => {
                let a = args
                    .first()
                    .ok_or_else(|| RenderError::build_error("UPPER requires one argument"))?;
                Ok(format!("UPPER({a})"))
            }
            StringFn::Lower => {
                let a = args
                    .first()
                    .ok_or_else(|| RenderError::build_error("LOWER requires one argument"))?;
                Ok(format!("LOWER({a})"))
            }
            StringFn::Trim => {
                let a = args
                    .first()
                    .ok_or_else(|| RenderError::build_error("TRIM requires one argument"))?;
                Ok(format!("TRIM({a})"))
            }
            StringFn::Length => {
                let a = args
                    .first()
                    .ok_or_else(|| RenderError::build_error("LENGTH requires one argument"))?;
                Ok(format!("{}({a})", self.length_fn_name()))
            }
            StringFn::Replace => {
                if args.len() != 3 {
                    return Err(RenderError::build_error("REPLACE requires three arguments"));
                }
                Ok(format!("REPLACE({}, {}, {})", args[0], args[1], args[2]))
            }
        }
    }

    fn render_date_expr(&self, d: &DateExpr, ctx: &RenderContext) -> Result<String> {
        match d.function {
            DateFn::Now => Ok(self.now_sql().to_string()),
            DateFn::CurrentDate => Ok(self.current_date_sql().to_string()),
            DateFn::Extract => {
                let part = d
                    .part
                    .ok_or_else(|| RenderError::build_error("EXTRACT requires a date part"))?;
                let arg = d
                    .args
                    .first()
                    .ok_or_else(|| RenderError::build_error("EXTRACT requires an argument"))?;
                Ok(self.extract_sql(part, &self.render_operand(arg, ctx)?))
            }
            DateFn::DateTrunc => {
                let part = d
                    .part
                    .ok_or_else(|| RenderError::build_error("DATE_TRUNC requires a date part"))?;
                let arg = d
                    .args
                    .first()
                    .ok_or_else(|| RenderError::build_error("DATE_TRUNC requires an argument"))?;
                Ok(self.date_trunc_sql(part, &self.render_operand(arg, ctx)?))
            }
            DateFn::DateAdd => {
                let part = d
                    .part
                    .ok_or_else(|| RenderError::build_error("DATE_ADD requires a date part"))?;
                if d.args.len() != 2 {
                    return Err(RenderError::build_error(
                        "DATE_ADD requires an amount and a date argument",
                    ));
                }
                let amount = self.render_operand(&d.args[0], ctx)?;
                let arg = self.render_operand(&d.args[1], ctx)?;
                Ok(self.date_add_sql(part, &amount, &arg))
            }
            DateFn::DateDiff => {
                let part = d
                    .part
                    .ok_or_else(|| RenderError::build_error("DATE_DIFF requires a date part"))?;
                if d.args.len() != 2 {
                    return Err(RenderError::build_error(
                        "DATE_DIFF requires start and end arguments",
                    ));
                }
                let start = self.render_operand(&d.args[0], ctx)?;
                let end = self.render_operand(&d.args[1], ctx)?;
                Ok(self.date_diff_sql(part, &start, &end))
            }
        }
    }

    fn render_window_expr(&self, w: &WindowExpr, ctx: &RenderContext) -> Result<String> {
        let args: Vec<String> = w
            .args
            .iter()
            .map(|a| self.render_operand(a, ctx))
            .collect::<Result<_>>()?;
        let mut sql = format!("{}({})", w.function.as_str(), args.join(", "));

        let mut over_parts = Vec::new();
        if !w.partition_by.is_empty() {
            let cols = w
                .partition_by
                .iter()
                .map(|f| self.render_field(f))
                .collect::<Vec<_>>()
                .join(", ");
            over_parts.push(format!("PARTITION BY {cols}"));
        }
        if !w.order_by.is_empty() {
            over_parts.push(format!("ORDER BY {}", self.render_order_by_list(&w.order_by, ctx)?));
        }
        sql.push_str(&format!(" OVER ({})", over_parts.join(" ")));
        Ok(sql)
    }

    // ---- order by, pagination, lock -----------------------------------

    fn render_order_by_list(&self, order_by: &[OrderBy], ctx: &RenderContext) -> Result<String> {
        let mut parts = Vec::with_capacity(order_by.len());
        for o in order_by {
            let mut s = self.render_field(&o.field);
            if let (Some(op), Some(param)) = (o.op, &o.param) {
                s = format!("{s} {} {}", op.as_str(), ctx.register_param(&param.name));
            }
            s.push(' ');
            s.push_str(o.direction.as_str());
            if let Some(nulls) = o.nulls {
                s.push(' ');
                s.push_str(nulls.as_str());
            }
            parts.push(s);
        }
        Ok(parts.join(", "))
    }

    fn render_tail(
        &self,
        order_by: &[OrderBy],
        pagination: &Pagination,
        lock: Option<LockMode>,
        ctx: &RenderContext,
    ) -> Result<String> {
        let mut parts = Vec::new();

        let mut order_sql = if order_by.is_empty() {
            String::new()
        } else {
            self.render_order_by_list(order_by, ctx)?
        };
        if order_sql.is_empty() && !pagination.is_empty() && self.requires_order_by_for_pagination() {
            order_sql = "(SELECT 1)".to_string();
        }
        if !order_sql.is_empty() {
            parts.push(format!("ORDER BY {order_sql}"));
        }

        if let Some(p) = self.render_pagination(pagination, ctx)? {
            parts.push(p);
        }

        if let Some(mode) = lock {
            parts.push(self.render_lock(mode)?);
        }

        Ok(parts.join(" "))
    }

    fn render_pagination(&self, pagination: &Pagination, ctx: &RenderContext) -> Result<Option<String>> {
        if pagination.is_empty() {
            return Ok(None);
        }
        let mut clause = String::new();
        if let Some(limit) = &pagination.limit {
            clause.push_str("LIMIT ");
            clause.push_str(&self.render_pagination_value(limit, ctx));
        }
        if let Some(offset) = &pagination.offset {
            if !clause.is_empty() {
                clause.push(' ');
            }
            clause.push_str("OFFSET ");
            clause.push_str(&self.render_pagination_value(offset, ctx));
        }
        Ok(Some(clause))
    }

    fn render_pagination_value(&self, value: &crate::ast::PaginationValue, ctx: &RenderContext) -> String {
        match value {
            crate::ast::PaginationValue::Static(n) => n.to_string(),
            crate::ast::PaginationValue::Param(p) => ctx.register_param(&p.name),
        }
    }

    fn render_lock(&self, mode: LockMode) -> Result<String> {
        let supported = match self.capabilities().row_locking {
            RowLocking::None => false,
            RowLocking::ExclusiveOnly => {
                matches!(mode, LockMode::ForUpdate | LockMode::ForUpdateSkipLocked)
            }
            RowLocking::SharedOnly => mode.is_share_family(),
            RowLocking::Full => true,
        };
        if !supported {
            return Err(RenderError::unsupported(self.name(), mode.as_str()));
        }
        Ok(mode.as_str().to_string())
    }

    /// Whether pagination requires a synthesized `ORDER BY (SELECT 1)` when
    /// the AST supplies none (SQL Server's `OFFSET ... FETCH` syntax).
    fn requires_order_by_for_pagination(&self) -> bool {
        false
    }

    // ---- dialect hooks: identifier & operator spelling -----------------

    fn quote_identifier(&self, name: &str) -> String;

    fn not_eq_sql(&self) -> &'static str {
        "!="
    }

    fn comparison_op_sql(&self, op: ComparisonOp) -> &'static str {
        if op == ComparisonOp::NotEq {
            self.not_eq_sql()
        } else {
            op.as_str()
        }
    }

    fn ilike_comparison(&self, field_sql: &str, placeholder: &str, negate: bool) -> String {
        let kw = if negate { "NOT ILIKE" } else { "ILIKE" };
        format!("{field_sql} {kw} {placeholder}")
    }

    fn json_text_key_sql(&self, field_sql: &str, key: &str) -> String {
        format!("{field_sql} ->> '{key}'")
    }

    fn json_path_key_sql(&self, field_sql: &str, path: &[String]) -> String {
        format!("{field_sql} #>> '{{{}}}'", path.join(","))
    }

    // ---- dialect hooks: functions ---------------------------------------

    fn now_sql(&self) -> &'static str;
    fn current_date_sql(&self) -> &'static str;
    fn extract_sql(&self, part: crate::ast::DatePart, arg: &str) -> String {
        format!("EXTRACT({} FROM {arg})", part.as_str())
    }
    fn date_trunc_sql(&self, part: crate::ast::DatePart, arg: &str) -> String;
    fn date_add_sql(&self, part: crate::ast::DatePart, amount: &str, arg: &str) -> String;
    fn date_diff_sql(&self, part: crate::ast::DatePart, start: &str, end: &str) -> String;

    fn math_fn_name(&self, function: MathFn) -> &'static str {
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

    fn length_fn_name(&self) -> &'static str {
        "LENGTH"
    }

    fn concat_sql(&self, args: &[String]) -> String {
        format!("CONCAT({})", args.join(", "))
    }

    fn substring_sql(&self, args: &[String]) -> String {
        if args.len() >= 3 {
            format!("SUBSTRING({} FROM {} FOR {})", args[0], args[1], args[2])
        } else {
            format!("SUBSTRING({} FROM {})", args[0], args[1])
        }
    }

    // ---- dialect hooks: returning & upsert -------------------------------

    fn returning_position(&self, _op: ReturningOp) -> ReturningPosition {
        ReturningPosition::Trailing
    }

    fn returning_fragment(&self, op: ReturningOp, fields: &[Field]) -> String {
        let cols = fields
            .iter()
            .map(|f| self.render_field(f))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = op;
        format!("RETURNING {cols}")
    }

    fn upsert_fragment(&self, _conflict: &ConflictClause, _ctx: &RenderContext) -> Result<String> {
        Err(RenderError::build_error(
            "upsert is not implemented for this dialect",
        ))
    }
}
