//! Java source descriptions
//!
//! Structured descriptions of the classes and interfaces the generator emits.
//! Layer emitters build them, decorators amend copies of them, and
//! [`render`] turns them into source text.

pub mod render;
pub mod types;

pub use render::render;
pub use types::JavaType;

use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JavaParameter {
    pub java_type: JavaType,
    pub name: String,
    pub annotations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JavaField {
    pub java_type: JavaType,
    pub name: String,
    pub annotations: Vec<String>,
}

/// A method; interface methods have an empty body and render as a signature
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JavaMethod {
    pub name: String,
    pub parameters: Vec<JavaParameter>,
    /// `None` renders as `void`
    pub return_type: Option<JavaType>,
    pub annotations: Vec<String>,
    pub body: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    Class,
    Interface,
}

/// A top-level class or interface
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JavaClass {
    pub java_type: JavaType,
    pub kind: ClassKind,
    pub annotations: Vec<String>,
    pub imports: BTreeSet<String>,
    pub fields: Vec<JavaField>,
    pub methods: Vec<JavaMethod>,
}

impl JavaClass {
    #[must_use]
    pub fn new(java_type: JavaType, kind: ClassKind) -> Self {
        Self {
            java_type,
            kind,
            annotations: Vec::new(),
            imports: BTreeSet::new(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Import everything `java_type` references, skipping this class's own package
    pub fn import_type(&mut self, java_type: &JavaType) {
        let own_package = self.java_type.package().map(str::to_string);
        for import in java_type.imports() {
            let same_package = import
                .rsplit_once('.')
                .is_some_and(|(package, _)| Some(package) == own_package.as_deref());
            if !same_package && import != self.java_type.qualified_name_without_arguments() {
                self.imports.insert(import);
            }
        }
    }

    /// Import a fully-qualified name given as text, e.g. an annotation type
    pub fn import_name(&mut self, qualified: &str) {
        if let Some(java_type) = JavaType::parse(qualified) {
            self.import_type(&java_type);
        }
    }

    /// True if any class annotation starts with `prefix`
    #[must_use]
    pub fn has_annotation(&self, prefix: &str) -> bool {
        self.annotations.iter().any(|a| a.starts_with(prefix))
    }

    #[must_use]
    pub fn method(&self, name: &str) -> Option<&JavaMethod> {
        self.methods.iter().find(|m| m.name == name)
    }
}
