//! `JOIN` clauses.

use super::condition::FieldComparison;
use super::enums::JoinKind;
use super::value::Table;

/// `<kind> JOIN <table> ON <on>` — `on` is required unless `kind` is `Cross`.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub kind: JoinKind,
    pub table: Table,
    pub on: Option<FieldComparison>,
}

impl Join {
    #[must_use]
    pub fn new(kind: JoinKind, table: Table, on: FieldComparison) -> Self {
        Self {
            kind,
            table,
            on: Some(on),
        }
    }

    #[must_use]
    pub fn cross(table: Table) -> Self {
        Self {
            kind: JoinKind::Cross,
            table,
            on: None,
        }
    }

    /// Whether `on` is present exactly when required.
    #[must_use]
    pub fn has_valid_on(&self) -> bool {
        match self.kind {
            JoinKind::Cross => self.on.is_none(),
            _ => self.on.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::enums::ComparisonOp;
    use super::super::value::Field;
    use super::*;

    #[test]
    fn cross_join_has_no_on() {
        let j = Join::cross(Table::new("orders"));
        assert!(j.has_valid_on());
    }

    #[test]
    fn inner_join_requires_on() {
        let on = FieldComparison {
            left: Field::qualified("u", "id"),
            op: ComparisonOp::Eq,
            right: Field::qualified("o", "user_id"),
        };
        let j = Join::new(JoinKind::Inner, Table::aliased("orders", "o"), on);
        assert!(j.has_valid_on());
    }
}
