//! `ON CONFLICT` (upsert) clauses for `INSERT`.

use super::value::Param;
use std::collections::BTreeMap;

/// What to do on a conflicting insert.
#[derive(Debug, Clone, PartialEq)]
pub enum ConflictAction {
    DoNothing,
    /// Non-empty map of column name to the parameter assigned on conflict.
    DoUpdate(BTreeMap<String, Param>),
}

/// `ON CONFLICT (<columns>) <action>`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConflictClause {
    pub columns: Vec<String>,
    pub action: ConflictAction,
}

impl ConflictClause {
    #[must_use]
    pub fn do_nothing(columns: Vec<String>) -> Self {
        Self {
            columns,
            action: ConflictAction::DoNothing,
        }
    }

    #[must_use]
    pub fn do_update(columns: Vec<String>, updates: BTreeMap<String, Param>) -> Self {
        Self {
            columns,
            action: ConflictAction::DoUpdate(updates),
        }
    }

    /// `DO UPDATE` requires a non-empty updates map.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        match &self.action {
            ConflictAction::DoNothing => true,
            ConflictAction::DoUpdate(updates) => !updates.is_empty(),
        }
    }
}
