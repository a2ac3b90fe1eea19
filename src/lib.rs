//! # sql-render-core
//!
//! A typed SQL abstract syntax tree with pluggable dialect renderers for
//! PostgreSQL, MySQL/MariaDB, SQL Server, and SQLite.
//!
//! This crate does not parse SQL text and does not execute queries — it
//! renders a validated, statically-typed [`ast::Ast`] into a parameterized
//! SQL string plus the ordered list of parameter names a caller must bind.
//! Binding those parameters against a real connection (`sqlx`, `tokio-postgres`,
//! ...) is the caller's job.
//!
//! ## Example
//!
//! ```rust
//! use sql_render_core::ast::{Ast, ComparisonOp, Condition, Field, Param, SelectQuery, SimpleCondition, Table};
//! use sql_render_core::render::{Dialect, PostgresDialect};
//! use sql_render_core::options::RenderOptions;
//!
//! let mut query = SelectQuery::from_table(Table::aliased("users", "u"));
//! query.fields.push(Field::qualified("u", "id"));
//! query.where_clause = Some(Condition::Simple(SimpleCondition::with_value(
//!     Field::qualified("u", "is_active"),
//!     ComparisonOp::Eq,
//!     Param::new("is_active"),
//! )));
//!
//! let result = PostgresDialect::new()
//!     .render(&Ast::Select(query), &RenderOptions::default())
//!     .unwrap();
//!
//! assert_eq!(result.sql, "SELECT \"u\".\"id\" FROM \"users\" u WHERE \"u\".\"is_active\" = :is_active");
//! assert_eq!(result.required_params, vec!["is_active".to_string()]);
//! ```
//!
//! ## Layout
//!
//! - [`ast`] — the statement types a caller builds (`SelectQuery`,
//!   `InsertQuery`, `Condition`, ...).
//! - [`validate`] — the pure, renderer-independent structural checks run
//!   before any SQL is emitted.
//! - [`render`] — the [`render::Dialect`] trait and its four implementations.
//! - [`options`] — [`options::RenderOptions`], currently just the subquery
//!   depth limit.
//! - [`error`] — [`error::RenderError`] and the crate's `Result` alias.

pub mod ast;
pub mod error;
pub mod options;
pub mod render;
pub mod validate;

pub use error::{RenderError, Result};
pub use options::RenderOptions;
pub use render::{Dialect, MssqlDialect, MySqlDialect, PostgresDialect, QueryResult, SqliteDialect};
