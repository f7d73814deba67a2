//! Java type names
//!
//! A parsed, fully-qualified Java type such as `java.util.List<com.example.User>`.
//! Generated sources print short names and collect imports from the qualified
//! parts, so the same value serves both purposes.

use serde::{Deserialize, Serialize};
use std::fmt;

const PRIMITIVES: &[(&str, &str)] = &[
    ("boolean", "Boolean"),
    ("byte", "Byte"),
    ("char", "Character"),
    ("short", "Short"),
    ("int", "Integer"),
    ("long", "Long"),
    ("float", "Float"),
    ("double", "Double"),
];

/// A Java type with optional package and generic arguments
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct JavaType {
    package: Option<String>,
    base_name: String,
    arguments: Vec<JavaType>,
}

impl JavaType {
    /// Parse a type name like `java.util.List<java.lang.Long>`.
    ///
    /// Returns `None` for empty names, unbalanced angle brackets or empty
    /// generic arguments.
    #[must_use]
    pub fn parse(spec: &str) -> Option<Self> {
        let spec = spec.trim();
        if spec.is_empty() {
            return None;
        }

        let (base, arguments) = match spec.find('<') {
            Some(open) => {
                if !spec.ends_with('>') {
                    return None;
                }
                let inner = &spec[open + 1..spec.len() - 1];
                let arguments = split_top_level(inner)?
                    .into_iter()
                    .map(Self::parse)
                    .collect::<Option<Vec<_>>>()?;
                (&spec[..open], arguments)
            }
            None => {
                if spec.contains('>') {
                    return None;
                }
                (spec, Vec::new())
            }
        };

        let base = base.trim();
        if base.is_empty() || base.split('.').any(str::is_empty) {
            return None;
        }
        let (package, base_name) = match base.rfind('.') {
            Some(dot) => (Some(base[..dot].to_string()), base[dot + 1..].to_string()),
            None => (None, base.to_string()),
        };

        Some(Self {
            package,
            base_name,
            arguments,
        })
    }

    /// A non-generic type `name` in `package`; an empty package means none
    #[must_use]
    pub fn in_package(package: &str, name: &str) -> Self {
        Self {
            package: (!package.is_empty()).then(|| package.to_string()),
            base_name: name.to_string(),
            arguments: Vec::new(),
        }
    }

    /// The `int` primitive
    #[must_use]
    pub fn int() -> Self {
        Self {
            package: None,
            base_name: "int".to_string(),
            arguments: Vec::new(),
        }
    }

    /// `java.util.List<element>`
    #[must_use]
    pub fn list_of(element: Self) -> Self {
        Self {
            package: Some("java.util".to_string()),
            base_name: "List".to_string(),
            arguments: vec![element],
        }
    }

    /// Same raw type with the given generic arguments
    #[must_use]
    pub fn with_arguments(&self, arguments: Vec<Self>) -> Self {
        Self {
            package: self.package.clone(),
            base_name: self.base_name.clone(),
            arguments,
        }
    }

    #[must_use]
    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    #[must_use]
    pub fn short_name_without_arguments(&self) -> &str {
        &self.base_name
    }

    #[must_use]
    pub fn qualified_name_without_arguments(&self) -> String {
        match &self.package {
            Some(package) => format!("{package}.{}", self.base_name),
            None => self.base_name.clone(),
        }
    }

    /// Short form used in generated source, e.g. `List<User>`
    #[must_use]
    pub fn short_name(&self) -> String {
        if self.arguments.is_empty() {
            return self.base_name.clone();
        }
        let arguments: Vec<String> = self.arguments.iter().map(Self::short_name).collect();
        format!("{}<{}>", self.base_name, arguments.join(", "))
    }

    #[must_use]
    pub fn is_primitive(&self) -> bool {
        self.package.is_none() && PRIMITIVES.iter().any(|(p, _)| *p == self.base_name)
    }

    /// Wrapper type for primitives, identity otherwise
    #[must_use]
    pub fn boxed(&self) -> Self {
        match PRIMITIVES.iter().find(|(p, _)| *p == self.base_name) {
            Some((_, wrapper)) if self.package.is_none() => Self {
                package: Some("java.lang".to_string()),
                base_name: (*wrapper).to_string(),
                arguments: Vec::new(),
            },
            _ => self.clone(),
        }
    }

    /// Qualified names that need an import statement, this type and its arguments.
    ///
    /// Primitives, `java.lang` and package-less names never need one.
    #[must_use]
    pub fn imports(&self) -> Vec<String> {
        let mut imports = Vec::new();
        self.collect_imports(&mut imports);
        imports
    }

    fn collect_imports(&self, out: &mut Vec<String>) {
        if let Some(package) = &self.package
            && package != "java.lang"
        {
            out.push(self.qualified_name_without_arguments());
        }
        for argument in &self.arguments {
            argument.collect_imports(out);
        }
    }
}

/// Split generic arguments on commas that are not nested in brackets
fn split_top_level(inner: &str) -> Option<Vec<&str>> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (idx, ch) in inner.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.checked_sub(1)?,
            ',' if depth == 0 => {
                parts.push(&inner[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }
    parts.push(&inner[start..]);
    if parts.iter().any(|p| p.trim().is_empty()) {
        return None;
    }
    Some(parts)
}

impl fmt::Display for JavaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.qualified_name_without_arguments())?;
        if !self.arguments.is_empty() {
            let arguments: Vec<String> = self.arguments.iter().map(ToString::to_string).collect();
            write!(f, "<{}>", arguments.join(", "))?;
        }
        Ok(())
    }
}

impl TryFrom<String> for JavaType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("malformed Java type name '{value}'"))
    }
}

impl From<JavaType> for String {
    fn from(value: JavaType) -> Self {
        value.to_string()
    }
}
