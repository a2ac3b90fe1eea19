//! Closed enumerations for the AST.
//!
//! Every operator, function, and clause kind the renderer has to spell out
//! is a fixed, closed set. No open-string operator reaches the public
//! surface — a caller cannot hand the renderer an arbitrary function name
//! and expect it to be emitted verbatim.

use core::fmt;

/// Comparison operators usable in a [`crate::ast::condition::SimpleCondition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Like,
    NotLike,
    ILike,
    NotILike,
    Regex,
    NotRegex,
    In,
    NotIn,
    IsNull,
    IsNotNull,
    /// Array containment (`field @> :p`). Gated on
    /// [`crate::render::CapabilityDescriptor::array_operators`].
    ArrayContains,
    /// Array overlap (`field && :p`). Gated on
    /// [`crate::render::CapabilityDescriptor::array_operators`].
    ArrayOverlap,
}

impl ComparisonOp {
    /// Whether this operator never takes a value parameter.
    #[must_use]
    pub const fn is_nullary(self) -> bool {
        matches!(self, Self::IsNull | Self::IsNotNull)
    }

    /// The dialect-neutral (ANSI) spelling; dialects override where §4.3 requires it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
            Self::ILike => "ILIKE",
            Self::NotILike => "NOT ILIKE",
            Self::Regex => "~",
            Self::NotRegex => "!~",
            Self::In => "IN",
            Self::NotIn => "NOT IN",
            Self::IsNull => "IS NULL",
            Self::IsNotNull => "IS NOT NULL",
            Self::ArrayContains => "@>",
            Self::ArrayOverlap => "&&",
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Join kinds for [`crate::ast::join::Join`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

impl JoinKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Full => "FULL JOIN",
            Self::Cross => "CROSS JOIN",
        }
    }
}

impl fmt::Display for JoinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateFn {
    Count,
    CountDistinct,
    Sum,
    Avg,
    Min,
    Max,
}

impl AggregateFn {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Count | Self::CountDistinct => "COUNT",
            Self::Sum => "SUM",
            Self::Avg => "AVG",
            Self::Min => "MIN",
            Self::Max => "MAX",
        }
    }

    #[must_use]
    pub const fn is_distinct(self) -> bool {
        matches!(self, Self::CountDistinct)
    }
}

impl fmt::Display for AggregateFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// String functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringFn {
    Concat,
    Substring,
    Upper,
    Lower,
    Trim,
    Length,
    Replace,
}

/// Math functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathFn {
    Abs,
    Round,
    Ceil,
    Floor,
    Power,
    Sqrt,
    Mod,
}

/// Date/time functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFn {
    Now,
    CurrentDate,
    Extract,
    DateTrunc,
    DateAdd,
    DateDiff,
}

/// Window functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowFn {
    RowNumber,
    Rank,
    DenseRank,
    Lag,
    Lead,
    NTile,
}

impl WindowFn {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RowNumber => "ROW_NUMBER",
            Self::Rank => "RANK",
            Self::DenseRank => "DENSE_RANK",
            Self::Lag => "LAG",
            Self::Lead => "LEAD",
            Self::NTile => "NTILE",
        }
    }
}

impl fmt::Display for WindowFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Date parts usable in `EXTRACT`/`DATEPART`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePart {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Week,
    Quarter,
    Dow,
    Doy,
}

impl DatePart {
    /// The ANSI/PostgreSQL spelling used in `EXTRACT(<part> FROM ...)`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Year => "YEAR",
            Self::Month => "MONTH",
            Self::Day => "DAY",
            Self::Hour => "HOUR",
            Self::Minute => "MINUTE",
            Self::Second => "SECOND",
            Self::Week => "WEEK",
            Self::Quarter => "QUARTER",
            Self::Dow => "DOW",
            Self::Doy => "DOY",
        }
    }
}

impl fmt::Display for DatePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cast target types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CastType {
    Integer,
    BigInt,
    SmallInt,
    Text,
    Varchar(u32),
    Numeric { precision: u16, scale: u16 },
    Boolean,
    Date,
    Timestamp,
    Uuid,
}

impl CastType {
    #[must_use]
    pub fn as_sql(&self) -> String {
        match self {
            Self::Integer => "INTEGER".to_string(),
            Self::BigInt => "BIGINT".to_string(),
            Self::SmallInt => "SMALLINT".to_string(),
            Self::Text => "TEXT".to_string(),
            Self::Varchar(len) => format!("VARCHAR({len})"),
            Self::Numeric { precision, scale } => format!("NUMERIC({precision}, {scale})"),
            Self::Boolean => "BOOLEAN".to_string(),
            Self::Date => "DATE".to_string(),
            Self::Timestamp => "TIMESTAMP".to_string(),
            Self::Uuid => "UUID".to_string(),
        }
    }
}

/// Set operations joining operands of a [`crate::ast::query::CompoundQuery`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOp {
    Union,
    UnionAll,
    Intersect,
    Except,
}

impl SetOp {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Union => "UNION",
            Self::UnionAll => "UNION ALL",
            Self::Intersect => "INTERSECT",
            Self::Except => "EXCEPT",
        }
    }
}

impl fmt::Display for SetOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Row locking modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    ForUpdate,
    ForShare,
    ForUpdateSkipLocked,
    ForNoKeyUpdate,
    ForKeyShare,
}

impl LockMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ForUpdate => "FOR UPDATE",
            Self::ForShare => "FOR SHARE",
            Self::ForUpdateSkipLocked => "FOR UPDATE SKIP LOCKED",
            Self::ForNoKeyUpdate => "FOR NO KEY UPDATE",
            Self::ForKeyShare => "FOR KEY SHARE",
        }
    }

    /// Whether this mode falls under the `ForShare`-family capability gate.
    #[must_use]
    pub const fn is_share_family(self) -> bool {
        matches!(self, Self::ForShare | Self::ForKeyShare)
    }
}

impl fmt::Display for LockMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `ORDER BY` direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl OrderDirection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `NULLS FIRST`/`NULLS LAST` placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullOrdering {
    First,
    Last,
}

impl NullOrdering {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::First => "NULLS FIRST",
            Self::Last => "NULLS LAST",
        }
    }
}

impl fmt::Display for NullOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `ON CONFLICT` action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertAction {
    DoNothing,
    DoUpdate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparison_op_nullary() {
        assert!(ComparisonOp::IsNull.is_nullary());
        assert!(ComparisonOp::IsNotNull.is_nullary());
        assert!(!ComparisonOp::Eq.is_nullary());
    }

    #[test]
    fn lock_mode_share_family() {
        assert!(LockMode::ForShare.is_share_family());
        assert!(LockMode::ForKeyShare.is_share_family());
        assert!(!LockMode::ForUpdate.is_share_family());
    }

    #[test]
    fn cast_type_sql() {
        assert_eq!(CastType::Varchar(255).as_sql(), "VARCHAR(255)");
        assert_eq!(
            CastType::Numeric {
                precision: 10,
                scale: 2
            }
            .as_sql(),
            "NUMERIC(10, 2)"
        );
    }
}
