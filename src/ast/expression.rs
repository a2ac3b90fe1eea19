//! `FieldExpression` — computed columns in a projection or `ORDER BY`.
//!
//! A `FieldExpression` is a sum with exactly one of ~10 inner variants plus
//! an optional alias and an optional `FILTER (WHERE ...)`. The "exactly
//! one" invariant is a type invariant (an enum), not a field full of
//! `Option`s checked at runtime.

use super::condition::Condition;
use super::enums::{AggregateFn, CastType, DateFn, DatePart, MathFn, StringFn, WindowFn};
use super::order::OrderBy;
use super::value::{Field, Param};

/// Operand to a [`FieldExpression`]: a plain column, a parameter, or a
/// nested expression. Kept deliberately small — the inner variants below
/// only ever need to combine fields, params, and other expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Field(Field),
    Param(Param),
    Expr(Box<FieldExpression>),
}

impl From<Field> for Operand {
    fn from(f: Field) -> Self {
        Self::Field(f)
    }
}

impl From<Param> for Operand {
    fn from(p: Param) -> Self {
        Self::Param(p)
    }
}

/// `CASE WHEN ... THEN ... [ELSE ...] END`.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseExpr {
    pub when_then: Vec<(Condition, Operand)>,
    pub else_branch: Option<Operand>,
}

/// `COALESCE(a, b, ...)`. At least two operands.
#[derive(Debug, Clone, PartialEq)]
pub struct CoalesceExpr {
    pub operands: Vec<Operand>,
}

/// `NULLIF(a, b)`.
#[derive(Debug, Clone, PartialEq)]
pub struct NullifExpr {
    pub left: Operand,
    pub right: Operand,
}

/// A math function call.
#[derive(Debug, Clone, PartialEq)]
pub struct MathExpr {
    pub function: MathFn,
    pub args: Vec<Operand>,
}

/// A string function call.
#[derive(Debug, Clone, PartialEq)]
pub struct StringExpr {
    pub function: StringFn,
    pub args: Vec<Operand>,
}

/// A date/time function call. `part` carries the date-part granularity for
/// `Extract`, `DateTrunc`, `DateAdd`, and `DateDiff`; it is unused by `Now`
/// and `CurrentDate`.
#[derive(Debug, Clone, PartialEq)]
pub struct DateExpr {
    pub function: DateFn,
    pub part: Option<DatePart>,
    pub args: Vec<Operand>,
}

/// `CAST(expr AS <type>)`.
#[derive(Debug, Clone, PartialEq)]
pub struct CastExpr {
    pub operand: Operand,
    pub target: CastType,
}

/// A window function call: `fn(args) OVER (PARTITION BY ... ORDER BY ...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowExpr {
    pub function: WindowFn,
    pub args: Vec<Operand>,
    pub partition_by: Vec<Field>,
    pub order_by: Vec<OrderBy>,
}

/// A binary arithmetic expression: `left <op> right`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl BinaryOp {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Operand,
    pub op: BinaryOp,
    pub right: Operand,
}

/// An aggregate applied directly as a projection expression
/// (as opposed to [`super::condition::AggregateCondition`], which compares
/// an aggregate to a parameter in a `WHERE`/`HAVING`).
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateExpr {
    pub function: AggregateFn,
    pub field: Option<Field>,
}

/// The inner variant of a [`FieldExpression`] — exactly one is ever present.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Case(CaseExpr),
    Coalesce(CoalesceExpr),
    Nullif(NullifExpr),
    Math(MathExpr),
    StringFn(StringExpr),
    Date(DateExpr),
    Cast(CastExpr),
    Window(WindowExpr),
    Binary(BinaryExpr),
    Aggregate(AggregateExpr),
}

/// A computed projection/order-by column: one [`ExprKind`] plus an optional
/// alias and an optional `FILTER (WHERE ...)` modifier (meaningful only for
/// `Aggregate`/`Window` kinds; the validator does not police this beyond
/// what the renderer's capability gate already enforces).
#[derive(Debug, Clone, PartialEq)]
pub struct FieldExpression {
    pub kind: ExprKind,
    pub alias: Option<String>,
    pub filter: Option<Box<Condition>>,
}

impl FieldExpression {
    #[must_use]
    pub fn new(kind: ExprKind) -> Self {
        Self {
            kind,
            alias: None,
            filter: None,
        }
    }

    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    #[must_use]
    pub fn with_filter(mut self, condition: Condition) -> Self {
        self.filter = Some(Box::new(condition));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_op_spelling() {
        assert_eq!(BinaryOp::Add.as_str(), "+");
        assert_eq!(BinaryOp::Mod.as_str(), "%");
    }

    #[test]
    fn field_expression_builder() {
        let expr = FieldExpression::new(ExprKind::Aggregate(AggregateExpr {
            function: AggregateFn::Count,
            field: None,
        }))
        .with_alias("total");
        assert_eq!(expr.alias.as_deref(), Some("total"));
        assert!(expr.filter.is_none());
    }
}
