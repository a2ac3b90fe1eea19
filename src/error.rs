//! Error taxonomy for validation and rendering.
//!
//! Four kinds, matching §7 of the specification this crate implements.
//! Errors are surfaced to the caller intact: the renderer never retries,
//! never partially emits SQL on error, and never logs a parameter value.

/// Errors produced by [`crate::validate::validate`] or a
/// [`crate::render::Dialect`] render call.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// A structural AST violation caught before any SQL is emitted (missing
    /// target table, inconsistent multi-row insert, empty condition group,
    /// bad operator/value combination, invalid alias, malformed parameter
    /// name).
    #[error("invalid AST: {message}")]
    InvalidAst {
        /// Human-readable description of the violation.
        message: String,
    },

    /// The chosen dialect's capability descriptor rejects a feature present
    /// in the AST.
    #[error("{dialect} does not support {feature}")]
    UnsupportedFeature {
        /// The dialect that rejected the feature.
        dialect: &'static str,
        /// The feature name, e.g. `"DISTINCT ON"`, `"RETURNING"`.
        feature: String,
    },

    /// Subquery nesting exceeded the configured maximum.
    #[error("subquery nesting depth {depth} exceeds the maximum of {max}")]
    DepthExceeded {
        /// The depth that would have been reached.
        depth: u8,
        /// The configured maximum.
        max: u8,
    },

    /// An internal contradiction the renderer hit while walking an AST that
    /// slipped past validation (e.g. `EXTRACT` with no field, `POWER` with
    /// no exponent).
    #[error("internal renderer error: {message}")]
    BuildError {
        /// Human-readable description of the contradiction.
        message: String,
    },
}

impl RenderError {
    #[must_use]
    pub fn invalid_ast(message: impl Into<String>) -> Self {
        Self::InvalidAst {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn unsupported(dialect: &'static str, feature: impl Into<String>) -> Self {
        Self::UnsupportedFeature {
            dialect,
            feature: feature.into(),
        }
    }

    #[must_use]
    pub fn build_error(message: impl Into<String>) -> Self {
        Self::BuildError {
            message: message.into(),
        }
    }
}

/// Result alias used throughout validation and rendering.
pub type Result<T> = std::result::Result<T, RenderError>;
