//! Abstract Syntax Tree (AST) types for SQL statements.
//!
//! The AST is a tree of owned values. It is built once, optionally mutated
//! in place while building, then treated as immutable once handed to a
//! [`crate::render::Dialect`]. Nothing here performs I/O or SQL-text
//! parsing — see the crate-level Non-goals.

pub mod condition;
pub mod conflict;
pub mod enums;
pub mod expression;
pub mod join;
pub mod order;
pub mod query;
pub mod value;

pub use condition::{
    AggregateCondition, BetweenCondition, Condition, ConditionGroup, FieldComparison, LogicOp,
    SimpleCondition, SubqueryCondition, SubqueryOp,
};
pub use conflict::{ConflictAction, ConflictClause};
pub use enums::{
    AggregateFn, CastType, ComparisonOp, DateFn, DatePart, JoinKind, LockMode, MathFn,
    NullOrdering, OrderDirection, SetOp, StringFn, UpsertAction, WindowFn,
};
pub use expression::{
    AggregateExpr, BinaryExpr, BinaryOp, CaseExpr, CastExpr, CoalesceExpr, DateExpr, ExprKind,
    FieldExpression, MathExpr, NullifExpr, Operand, StringExpr, WindowExpr,
};
pub use join::Join;
pub use order::{OrderBy, Pagination, PaginationValue};
pub use query::{
    Ast, ChannelQuery, CompoundQuery, CountQuery, DeleteQuery, Distinct, InsertQuery,
    InsertSource, SelectQuery, UpdateAssignment, UpdateQuery, ValueRow,
};
pub use value::{Field, JsonAccessor, Param, Table};
