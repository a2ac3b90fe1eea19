//! The top-level query types: `Ast` (one statement) and `CompoundQuery`
//! (a base `SELECT` plus set-operation operands).
//!
//! The AST is a tree, not a graph — subqueries create strictly downward
//! links, there are no back-references and no shared-ownership cycles.
//! An `Ast` is built once, optionally mutated while building, then treated
//! as immutable once handed to a renderer.

use std::collections::BTreeMap;

use super::condition::Condition;
use super::conflict::ConflictClause;
use super::enums::{LockMode, SetOp};
use super::expression::FieldExpression;
use super::join::Join;
use super::order::{OrderBy, Pagination};
use super::value::{Field, Param, Table};

/// `DISTINCT`/`DISTINCT ON` modifier for a [`SelectQuery`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Distinct {
    #[default]
    None,
    All,
    /// `DISTINCT ON (fields)` — PostgreSQL only; every field here must also
    /// appear, in the same order, as a leading prefix of `order_by`.
    On(Vec<Field>),
}

/// A single `SELECT` statement.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectQuery {
    pub distinct: Distinct,
    /// Plain field projection.
    pub fields: Vec<Field>,
    /// Computed column projection, rendered after `fields`.
    pub expressions: Vec<FieldExpression>,
    pub from: Option<Table>,
    pub joins: Vec<Join>,
    pub where_clause: Option<Condition>,
    pub group_by: Vec<Field>,
    /// `HAVING` items, joined with `AND`.
    pub having: Vec<Condition>,
    pub order_by: Vec<OrderBy>,
    pub pagination: Pagination,
    pub lock: Option<LockMode>,
}

impl SelectQuery {
    #[must_use]
    pub fn from_table(table: Table) -> Self {
        Self {
            from: Some(table),
            ..Self::default()
        }
    }

    /// Whether the projection is empty (renders as `*`).
    #[must_use]
    pub fn is_projection_empty(&self) -> bool {
        self.fields.is_empty() && self.expressions.is_empty()
    }
}

/// One row of `INSERT ... VALUES`. Keys are column names; every row in a
/// multi-row insert must share the same key set.
pub type ValueRow = BTreeMap<String, Param>;

/// Source of rows for an `INSERT`.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertSource {
    Values(Vec<ValueRow>),
    Query(Box<SelectQuery>),
}

/// An `INSERT` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertQuery {
    pub table: Table,
    pub source: InsertSource,
    pub on_conflict: Option<ConflictClause>,
    /// `RETURNING`/`OUTPUT` field list. Empty means no returning clause.
    pub returning: Vec<Field>,
}

impl InsertQuery {
    #[must_use]
    pub fn values(table: Table, rows: Vec<ValueRow>) -> Self {
        Self {
            table,
            source: InsertSource::Values(rows),
            on_conflict: None,
            returning: vec![],
        }
    }

    /// Whether every row in a `Values` source shares the same key set.
    #[must_use]
    pub fn has_uniform_rows(&self) -> bool {
        match &self.source {
            InsertSource::Values(rows) => {
                let Some(first) = rows.first() else {
                    return false;
                };
                let keys: Vec<&String> = first.keys().collect();
                rows.iter().all(|r| {
                    let row_keys: Vec<&String> = r.keys().collect();
                    row_keys == keys
                })
            }
            InsertSource::Query(_) => true,
        }
    }
}

/// A single `SET` assignment: either a bound value or a computed expression.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateAssignment {
    Value(Param),
    Expression(FieldExpression),
}

/// An `UPDATE` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateQuery {
    pub table: Table,
    pub assignments: BTreeMap<String, UpdateAssignment>,
    pub where_clause: Option<Condition>,
    pub returning: Vec<Field>,
}

/// A `DELETE` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteQuery {
    pub table: Table,
    pub where_clause: Option<Condition>,
    pub returning: Vec<Field>,
}

/// `SELECT COUNT(*) FROM ...` — ignores any explicit field list.
#[derive(Debug, Clone, PartialEq)]
pub struct CountQuery {
    pub from: Table,
    pub joins: Vec<Join>,
    pub where_clause: Option<Condition>,
}

/// `LISTEN`/`UNLISTEN` target a notification channel, not a table.
/// Dialect-specific: only PostgreSQL implements these; other dialects
/// reject them with `UnsupportedFeature`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelQuery {
    pub channel: String,
}

/// One SQL statement awaiting validation and rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum Ast {
    Select(SelectQuery),
    Insert(InsertQuery),
    Update(UpdateQuery),
    Delete(DeleteQuery),
    Count(CountQuery),
    Listen(ChannelQuery),
    Unlisten(ChannelQuery),
}

/// A base `SELECT` combined with one or more set-operation operands, plus
/// an optional trailing `ORDER BY`/pagination applied to the whole result.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundQuery {
    pub base: SelectQuery,
    pub operands: Vec<(SetOp, SelectQuery)>,
    pub trailing_order_by: Vec<OrderBy>,
    pub trailing_pagination: Pagination,
}

impl CompoundQuery {
    #[must_use]
    pub fn new(base: SelectQuery) -> Self {
        Self {
            base,
            operands: vec![],
            trailing_order_by: vec![],
            trailing_pagination: Pagination::default(),
        }
    }

    #[must_use]
    pub fn with_operand(mut self, op: SetOp, query: SelectQuery) -> Self {
        self.operands.push((op, query));
        self
    }
}
