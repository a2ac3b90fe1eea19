//! `ORDER BY` entries and pagination values.

use super::enums::{ComparisonOp, NullOrdering, OrderDirection};
use super::value::{Field, Param};

/// One `ORDER BY` entry: a plain field ordering, or — when `op`/`param` are
/// set — an expression ordering (`field <op> :param <direction>`).
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub field: Field,
    pub direction: OrderDirection,
    pub nulls: Option<NullOrdering>,
    pub op: Option<ComparisonOp>,
    pub param: Option<Param>,
}

impl OrderBy {
    #[must_use]
    pub fn asc(field: Field) -> Self {
        Self {
            field,
            direction: OrderDirection::Asc,
            nulls: None,
            op: None,
            param: None,
        }
    }

    #[must_use]
    pub fn desc(field: Field) -> Self {
        Self {
            field,
            direction: OrderDirection::Desc,
            nulls: None,
            op: None,
            param: None,
        }
    }

    #[must_use]
    pub fn with_nulls(mut self, nulls: NullOrdering) -> Self {
        self.nulls = Some(nulls);
        self
    }

    #[must_use]
    pub fn expression(field: Field, op: ComparisonOp, param: Param, direction: OrderDirection) -> Self {
        Self {
            field,
            direction,
            nulls: None,
            op: Some(op),
            param: Some(param),
        }
    }

    /// Whether `param` is present exactly when `op` is.
    #[must_use]
    pub fn has_consistent_expression(&self) -> bool {
        self.op.is_some() == self.param.is_some()
    }
}

/// A `LIMIT`/`OFFSET` value: exactly one of a static count or a parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum PaginationValue {
    Static(u64),
    Param(Param),
}

/// `LIMIT`/`OFFSET` pair; either side may be absent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Pagination {
    pub limit: Option<PaginationValue>,
    pub offset: Option<PaginationValue>,
}

impl Pagination {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.limit.is_none() && self.offset.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_by_expression_consistency() {
        let ob = OrderBy::expression(
            Field::new("score"),
            ComparisonOp::Gt,
            Param::new("threshold"),
            OrderDirection::Desc,
        );
        assert!(ob.has_consistent_expression());

        let plain = OrderBy::asc(Field::new("name"));
        assert!(plain.has_consistent_expression());
    }

    #[test]
    fn pagination_empty() {
        assert!(Pagination::default().is_empty());
        let p = Pagination {
            limit: Some(PaginationValue::Static(10)),
            offset: None,
        };
        assert!(!p.is_empty());
    }
}
