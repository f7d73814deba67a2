//! SQL map augmentation

use crate::sql::{SqlMapDocument, XmlElement};

/// Copy of `existing` with each statement appended unless an element with
/// the same id is already there. Existing elements are user overrides and
/// always win.
#[must_use]
pub fn augment_sql_map(existing: &SqlMapDocument, statements: Vec<XmlElement>) -> SqlMapDocument {
    let mut document = existing.clone();
    for statement in statements {
        let present = statement
            .id()
            .is_some_and(|id| document.element(id).is_some());
        if present {
            tracing::warn!(
                namespace = %document.namespace,
                id = statement.id().unwrap_or_default(),
                "statement already present, keeping existing element"
            );
            continue;
        }
        document.elements.push(statement);
    }
    document
}
