//! # Decoration Passes
//!
//! Optional passes that amend finished Java descriptions, such as API
//! documentation annotations. They run after derivation and never change
//! method names, signatures or bodies. Decorators run in registration order.

pub mod swagger;

pub use swagger::{FieldDecoration, ModelDecoration, SwaggerDecorator};

use crate::java::JavaClass;
use crate::schema::Table;

/// A pass over the Java descriptions of one table
pub trait ArtifactDecorator: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    fn decorate_controller(&self, _table: &Table, _controller: &mut JavaClass) {}

    /// Annotations for the host-generated model class, if this pass has any
    fn model_decoration(&self, _table: &Table) -> Option<ModelDecoration> {
        None
    }
}

/// Java string literal contents: backslashes, quotes and line breaks escaped
pub(crate) fn escape_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}
