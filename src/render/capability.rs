//! The per-dialect capability descriptor (§4.2).
//!
//! Consulted before any AST traversal. An unsupported shape is rejected
//! with [`crate::error::RenderError::UnsupportedFeature`] before a single
//! byte of SQL is emitted for that branch.

/// How a dialect supports `FOR ...` row locking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowLocking {
    /// No locking clauses supported at all.
    None,
    /// Only plain exclusive locking (`FOR UPDATE`, `FOR UPDATE SKIP LOCKED`),
    /// not the `FOR SHARE`/`FOR KEY SHARE`/`FOR NO KEY UPDATE` family
    /// (MySQL/MariaDB).
    ExclusiveOnly,
    /// Only `FOR SHARE`-family modes (`FOR SHARE`, `FOR KEY SHARE`).
    SharedOnly,
    /// Every `LockMode` variant.
    Full,
}

/// A static, per-dialect record of supported features.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilityDescriptor {
    pub distinct_on: bool,
    pub upsert: bool,
    pub returning_on_insert: bool,
    pub returning_on_update: bool,
    pub returning_on_delete: bool,
    pub case_insensitive_like: bool,
    pub regex_operators: bool,
    pub array_operators: bool,
    /// Whether a [`crate::ast::FieldExpression`]'s `FILTER (WHERE ...)`
    /// modifier is supported (PostgreSQL, SQLite) or rejected
    /// (MySQL/MariaDB, SQL Server have no `FILTER` clause).
    pub filter_clause: bool,
    /// `true` rewrites `IN` to `= ANY(:p)` (PostgreSQL); `false` keeps
    /// standard `IN (:p)`.
    pub in_array: bool,
    pub row_locking: RowLocking,
    pub listen_notify: bool,
}
