//! The polymorphic condition tree.
//!
//! Conditions are a tagged sum of six shapes. Implementations pattern-match
//! on the tag; there is no runtime class hierarchy and no trait object.

use super::enums::{AggregateFn, ComparisonOp};
use super::value::{Field, Param};
use super::query::SelectQuery;

/// Logical connective for a [`ConditionGroup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicOp {
    And,
    Or,
}

impl LogicOp {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

/// `field <op> :param`, or `field IS [NOT] NULL` when `op` is nullary.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleCondition {
    pub field: Field,
    pub op: ComparisonOp,
    /// Required unless `op` is `IsNull`/`IsNotNull`.
    pub value: Option<Param>,
}

impl SimpleCondition {
    /// Builds a nullary condition (`IS NULL`/`IS NOT NULL`).
    #[must_use]
    pub fn nullary(field: Field, op: ComparisonOp) -> Self {
        Self {
            field,
            op,
            value: None,
        }
    }

    /// Builds a condition requiring a value parameter.
    #[must_use]
    pub fn with_value(field: Field, op: ComparisonOp, value: Param) -> Self {
        Self {
            field,
            op,
            value: Some(value),
        }
    }
}

/// `left <op> right` — column-to-column, no parameter. Used for join `ON`
/// clauses and other field-to-field predicates.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldComparison {
    pub left: Field,
    pub op: ComparisonOp,
    pub right: Field,
}

/// `field [NOT] BETWEEN :low AND :high`.
#[derive(Debug, Clone, PartialEq)]
pub struct BetweenCondition {
    pub field: Field,
    pub low: Param,
    pub high: Param,
    pub negated: bool,
}

/// Operators valid on a [`SubqueryCondition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubqueryOp {
    In,
    NotIn,
    Exists,
    NotExists,
}

/// `field [NOT] IN (<subquery>)` or `[NOT] EXISTS (<subquery>)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SubqueryCondition {
    /// Required for `In`/`NotIn`; must be absent for `Exists`/`NotExists`.
    pub field: Option<Field>,
    pub op: SubqueryOp,
    pub subquery: Box<SelectQuery>,
}

/// `<aggregate-fn>([field]) <op> :param`.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateCondition {
    pub function: AggregateFn,
    /// Absent only for `COUNT(*)`.
    pub field: Option<Field>,
    pub op: ComparisonOp,
    pub value: Param,
}

/// A parenthesized, non-empty group of conditions joined by `logic`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionGroup {
    pub logic: LogicOp,
    pub conditions: Vec<Condition>,
}

/// The condition tree's tag: six shapes, matched by variant rather than
/// through a trait object hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Simple(SimpleCondition),
    FieldComparison(FieldComparison),
    Between(BetweenCondition),
    Subquery(SubqueryCondition),
    Aggregate(AggregateCondition),
    Group(ConditionGroup),
}

impl Condition {
    /// `true` for a [`ConditionGroup`] with no conditions — always invalid.
    #[must_use]
    pub fn is_empty_group(&self) -> bool {
        matches!(self, Self::Group(g) if g.conditions.is_empty())
    }

    /// Convenience: wraps conditions in an `AND` group.
    #[must_use]
    pub fn and_all(conditions: Vec<Condition>) -> Self {
        Self::Group(ConditionGroup {
            logic: LogicOp::And,
            conditions,
        })
    }

    /// Convenience: wraps conditions in an `OR` group.
    #[must_use]
    pub fn or_all(conditions: Vec<Condition>) -> Self {
        Self::Group(ConditionGroup {
            logic: LogicOp::Or,
            conditions,
        })
    }
}
