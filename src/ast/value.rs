//! Tables, fields, and named parameters — the leaf value types of the AST.

use core::fmt;

/// A table reference in a `FROM`/`UPDATE`/`DELETE FROM`/`INSERT INTO` target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// The table name. Must be non-empty.
    pub name: String,
    /// An optional short alias. Invariant: a single lowercase ASCII letter.
    pub alias: Option<String>,
}

impl Table {
    /// Creates a table reference with no alias.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
        }
    }

    /// Attaches a single-letter alias.
    #[must_use]
    pub fn aliased(name: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: Some(alias.into()),
        }
    }

    /// The name used to qualify columns: the alias if present, else the table name.
    #[must_use]
    pub fn qualifier(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    /// Whether the alias (if any) satisfies the single-lowercase-letter invariant.
    #[must_use]
    pub fn has_valid_alias(&self) -> bool {
        match &self.alias {
            None => true,
            Some(a) => {
                let mut chars = a.chars();
                matches!(
                    (chars.next(), chars.next()),
                    (Some(c), None) if c.is_ascii_lowercase()
                )
            }
        }
    }
}

/// A JSON-B accessor attached to a [`Field`]: either a text key (`->>`) or a path key (`#>>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonAccessor {
    /// `field ->> 'key'`
    TextKey(String),
    /// `field #>> '{a,b,c}'`
    PathKey(Vec<String>),
}

/// A column reference, optionally qualified and optionally a JSON-B accessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// The column name. Must be non-empty.
    pub name: String,
    /// Optional table/alias qualifier.
    pub table: Option<String>,
    /// At most one JSON-B accessor may be set.
    pub json: Option<JsonAccessor>,
}

impl Field {
    /// Creates an unqualified field.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: None,
            json: None,
        }
    }

    /// Creates a field qualified by a table name or alias.
    #[must_use]
    pub fn qualified(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: Some(table.into()),
            json: None,
        }
    }

    /// Attaches a JSON-B text-key accessor.
    #[must_use]
    pub fn with_json_text_key(mut self, key: impl Into<String>) -> Self {
        self.json = Some(JsonAccessor::TextKey(key.into()));
        self
    }

    /// Attaches a JSON-B path-key accessor.
    #[must_use]
    pub fn with_json_path_key(mut self, path: Vec<String>) -> Self {
        self.json = Some(JsonAccessor::PathKey(path));
        self
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(t) = &self.table {
            write!(f, "{t}.{}", self.name)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

/// A named placeholder. Names match `[A-Za-z_][A-Za-z0-9_]*`.
///
/// `Param` is the only run-time-varying leaf in the AST — plain literal
/// values are deliberately not representable; every dynamic value must
/// flow through a named parameter so the renderer never concatenates
/// caller data into SQL text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
}

impl Param {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Whether `name` matches `[A-Za-z_][A-Za-z0-9_]*`.
    #[must_use]
    pub fn is_valid_name(name: &str) -> bool {
        let mut chars = name.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
            _ => return false,
        }
        chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    }
}
