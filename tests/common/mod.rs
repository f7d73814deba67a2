#![allow(dead_code)]

use crudmapper::java::JavaType;
use crudmapper::{Column, GeneratorConfig, SchemaDocument, Table};

pub fn ty(name: &str) -> JavaType {
    JavaType::parse(name).expect("valid Java type")
}

pub fn config() -> GeneratorConfig {
    GeneratorConfig::for_packages(
        "com.example.service",
        "com.example.controller",
        ty("com.example.common.Response"),
    )
}

pub fn config_without_swagger() -> GeneratorConfig {
    let mut config = config();
    config.swagger.enabled = false;
    config
}

/// `user (id PK, name, email)`, remarks "用户"
pub fn user_table() -> Table {
    table_with_keys(&["id"])
}

/// `user` with the given primary key columns
pub fn table_with_keys(keys: &[&str]) -> Table {
    Table::new(
        "user",
        ty("com.example.model.User"),
        ty("com.example.mapper.UserMapper"),
        vec![
            Column::new("id", ty("java.lang.Long"), "BIGINT").with_remarks("主键"),
            Column::new("name", ty("java.lang.String"), "VARCHAR").with_remarks("姓名"),
            Column::new("email", ty("java.lang.String"), "VARCHAR").with_remarks("邮箱"),
        ],
        keys,
    )
    .expect("valid user table")
    .with_remarks("用户")
}

/// `order_item (order_id PK, line_no PK, sku, qty)`
pub fn composite_key_table() -> Table {
    Table::new(
        "order_item",
        ty("com.example.model.OrderItem"),
        ty("com.example.mapper.OrderItemMapper"),
        vec![
            Column::new("order_id", ty("java.lang.Long"), "BIGINT"),
            Column::new("line_no", ty("java.lang.Integer"), "INTEGER"),
            Column::new("sku", ty("java.lang.String"), "VARCHAR"),
            Column::new("qty", ty("java.lang.Integer"), "INTEGER"),
        ],
        &["order_id", "line_no"],
    )
    .expect("valid order_item table")
    .with_remarks("订单明细")
}

/// `audit_log (event, payload, gmt_create)`, no primary key
pub fn keyless_table() -> Table {
    Table::new(
        "audit_log",
        ty("com.example.model.AuditLog"),
        ty("com.example.mapper.AuditLogMapper"),
        vec![
            Column::new("event", ty("java.lang.String"), "VARCHAR"),
            Column::new("payload", ty("java.lang.String"), "LONGVARCHAR"),
            Column::new("gmt_create", ty("java.util.Date"), "TIMESTAMP"),
        ],
        &[],
    )
    .expect("valid audit_log table")
}

pub const SCHEMA_JSON: &str = r#"{
  "tables": [
    {
      "name": "user",
      "domain_type": "com.example.model.User",
      "remarks": "用户",
      "columns": [
        { "name": "id", "java_type": "java.lang.Long", "jdbc_type": "BIGINT", "remarks": "主键" },
        { "name": "name", "java_type": "java.lang.String", "jdbc_type": "VARCHAR" },
        { "name": "email", "java_type": "java.lang.String", "jdbc_type": "VARCHAR" }
      ],
      "primary_key": ["id"]
    },
    {
      "name": "audit_log",
      "domain_type": "com.example.model.AuditLog",
      "mapper_type": "com.example.mapper.AuditLogMapper",
      "columns": [
        { "name": "event", "java_type": "java.lang.String", "jdbc_type": "VARCHAR" }
      ]
    }
  ]
}"#;

pub fn schema_tables(config: &GeneratorConfig) -> Vec<Table> {
    SchemaDocument::from_json(SCHEMA_JSON)
        .and_then(|document| document.into_tables(config))
        .expect("valid schema document")
}
