//! # Naming Deriver
//!
//! Every identifier the generated layers share is derived here, from the
//! domain object name alone. Each action maps to a fixed prefix or a fixed
//! name; the only way two operations share a method name is a degenerate
//! domain name like `ByIds`, which table validation rejects.

use heck::{ToLowerCamelCase, ToUpperCamelCase};
use std::collections::HashSet;

pub const BATCH_INSERT: &str = "batchInsert";
pub const INSERT_OR_UPDATE: &str = "insertOrUpdate";
pub const LIST_BY_PRIMARY_KEY: &str = "listByPrimaryKey";
pub const LIST_BY_IDS: &str = "listByIds";

pub const INSERT: &str = "insert";
pub const DELETE_BY_PRIMARY_KEY: &str = "deleteByPrimaryKey";
pub const UPDATE_BY_PRIMARY_KEY: &str = "updateByPrimaryKey";
pub const SELECT_BY_PRIMARY_KEY: &str = "selectByPrimaryKey";

/// Lower-case the first character only, leaving the rest untouched.
///
/// `UserURL` becomes `userURL`, which is why this is not heck's lower camel case.
#[must_use]
pub fn lower_camel(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Java property name for a storage column name, `gmt_create` → `gmtCreate`
#[must_use]
pub fn property_name(column: &str) -> String {
    column.to_lower_camel_case()
}

/// Domain object name for a storage table name, `order_item` → `OrderItem`
#[must_use]
pub fn domain_name(table: &str) -> String {
    table.to_upper_camel_case()
}

/// Identifiers derived from one domain object name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Naming {
    domain: String,
}

impl Naming {
    #[must_use]
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
        }
    }

    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    #[must_use]
    pub fn add_method(&self) -> String {
        format!("add{}", self.domain)
    }

    #[must_use]
    pub fn delete_method(&self) -> String {
        format!("delete{}", self.domain)
    }

    #[must_use]
    pub fn update_method(&self) -> String {
        format!("update{}", self.domain)
    }

    #[must_use]
    pub fn get_method(&self) -> String {
        format!("get{}", self.domain)
    }

    /// Filtered list; also the statement id of the list query
    #[must_use]
    pub fn list_method(&self) -> String {
        format!("list{}", self.domain)
    }

    /// `lowerCamel(D)`, the variable name of a domain value
    #[must_use]
    pub fn variable(&self) -> String {
        lower_camel(&self.domain)
    }

    #[must_use]
    pub fn service_type_name(&self) -> String {
        format!("{}Service", self.domain)
    }

    #[must_use]
    pub fn controller_type_name(&self) -> String {
        format!("{}Controller", self.domain)
    }

    /// Injected service field, `lowerCamel(D + "Service")`
    #[must_use]
    pub fn service_field(&self) -> String {
        lower_camel(&self.service_type_name())
    }

    /// Request path `/{lowerCamel(D)}/{action}`
    #[must_use]
    pub fn url_path(&self, action: &str) -> String {
        format!("/{}/{action}", self.variable())
    }

    /// Every method name this naming scheme can produce
    #[must_use]
    pub fn all_method_names(&self) -> Vec<String> {
        vec![
            self.add_method(),
            self.delete_method(),
            self.update_method(),
            self.get_method(),
            self.list_method(),
            LIST_BY_IDS.to_string(),
            BATCH_INSERT.to_string(),
            INSERT_OR_UPDATE.to_string(),
            LIST_BY_PRIMARY_KEY.to_string(),
        ]
    }

    /// Method names produced more than once. Only degenerate domain names
    /// such as `ByIds` can trigger this.
    #[must_use]
    pub fn collisions(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for name in self.all_method_names() {
            if !seen.insert(name.clone()) && !duplicates.contains(&name) {
                duplicates.push(name);
            }
        }
        duplicates
    }
}

/// Injected persistence-client field for a mapper type name, `UserMapper` → `userMapper`
#[must_use]
pub fn mapper_field(mapper_type_name: &str) -> String {
    lower_camel(mapper_type_name)
}
