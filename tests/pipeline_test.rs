use crudmapper::pipeline::{ArtifactKind, Baseline, augment_table};
use crudmapper::sql::XmlElement;
use crudmapper::{Generator, emit};
use std::collections::HashSet;
use std::fs;

mod common;
use common::{config, keyless_table, schema_tables, user_table};

// ============================================================================
// Idempotent augmentation
// ============================================================================

#[test]
fn test_second_run_adds_nothing() {
    let config = config();
    let generator = Generator::from_config(&config);
    let first = generator.generate_table(&user_table());
    let second = generator.augment_table(&user_table(), &first.as_baseline());

    assert_eq!(first.mapper, second.mapper);
    assert_eq!(first.sql_map, second.sql_map);
    assert_eq!(first.files, second.files);
    for (a, b) in first.files.iter().zip(&second.files) {
        assert_eq!(a.body, b.body);
    }
}

#[test]
fn test_augmentation_keeps_existing_methods() {
    let config = config();
    let table = user_table();
    let baseline = Baseline::scaffold(&table);
    let artifacts = augment_table(&table, &config, &[], &baseline);

    let names: Vec<&str> = artifacts.mapper.methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "insert",
            "deleteByPrimaryKey",
            "updateByPrimaryKey",
            "selectByPrimaryKey",
            "batchInsert",
            "insertOrUpdate",
            "listUser",
            "listByPrimaryKey",
        ]
    );
    let unique: HashSet<&str> = names.iter().copied().collect();
    assert_eq!(unique.len(), names.len());
}

#[test]
fn test_user_override_statement_survives() {
    let config = config();
    let table = user_table();
    let mut baseline = Baseline::scaffold(&table);
    baseline.sql_map.elements.push(
        XmlElement::new("select")
            .attr("id", "listUser")
            .attr("resultMap", "BaseResultMap")
            .text("select * from user where deleted = 0"),
    );

    let artifacts = augment_table(&table, &config, &[], &baseline);
    let list = artifacts.sql_map.element("listUser").unwrap();
    assert_eq!(list.text_lines(), vec!["select * from user where deleted = 0"]);
    let count = artifacts
        .sql_map
        .elements
        .iter()
        .filter(|e| e.id() == Some("listUser"))
        .count();
    assert_eq!(count, 1);
}

#[test]
fn test_derived_statements_follow_fixed_order() {
    let config = config();
    let artifacts = Generator::new(&config).generate_table(&user_table());
    let ids = artifacts.sql_map.ids();
    let derived = &ids[ids.len() - 4..];
    assert_eq!(derived, ["batchInsert", "insertOrUpdate", "listUser", "listByPrimaryKey"]);
}

// ============================================================================
// Rendered artifacts
// ============================================================================

#[test]
fn test_rendered_mapper_interface() {
    let config = config();
    let artifacts = Generator::new(&config).generate_table(&keyless_table());
    let expected = "\
package com.example.mapper;

import com.example.model.AuditLog;
import java.util.List;

public interface AuditLogMapper {
    int insert(AuditLog record);

    int batchInsert(List<AuditLog> list);

    List<AuditLog> listAuditLog(AuditLog req);
}
";
    assert_eq!(artifacts.file(ArtifactKind::MapperInterface).unwrap().body, expected);
}

#[test]
fn test_rendered_sql_map_document() {
    let config = config();
    let artifacts = Generator::new(&config).generate_table(&user_table());
    let xml = &artifacts.file(ArtifactKind::SqlMap).unwrap().body;
    assert!(xml.contains("<mapper namespace=\"com.example.mapper.UserMapper\">"));
    assert!(xml.contains("  <insert id=\"batchInsert\" parameterType=\"com.example.model.User\">\n    insert into user (\n      id,name,\n      email\n    ) values \n"));
    assert!(xml.contains("      gmt_modified = now()\n  </insert>"));
}

#[test]
fn test_generation_is_deterministic() {
    let config = config();
    let generator = Generator::from_config(&config);
    let a = generator.generate_table(&user_table());
    let b = generator.generate_table(&user_table());
    for (x, y) in a.files.iter().zip(&b.files) {
        assert_eq!(x.body, y.body);
    }
}

// ============================================================================
// Schema document to files on disk
// ============================================================================

#[test]
fn test_schema_document_end_to_end() {
    let config = config();
    let tables = schema_tables(&config);
    assert_eq!(tables.len(), 2);
    assert_eq!(tables[0].mapper_type().to_string(), "com.example.model.UserMapper");

    let artifacts = Generator::from_config(&config).generate_all(&tables, 2);
    let dir = tempfile::tempdir().unwrap();
    let summary = emit::write_artifacts(dir.path(), &artifacts, false).unwrap();
    assert_eq!(summary.written.len(), 8);

    let controller = dir
        .path()
        .join("src/main/java/com/example/controller/UserController.java");
    let body = fs::read_to_string(controller).unwrap();
    assert!(body.contains("@PostMapping(value = \"/user/listByIds\")"));

    let manifest = dir.path().join("manifest.json");
    emit::write_manifest(&manifest, &artifacts).unwrap();
    let text = fs::read_to_string(manifest).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json[1]["table"], "audit_log");
    assert_eq!(json[1]["methods"].as_array().unwrap().len(), 2);
    assert!(text.contains("@ApiModel("));
}

#[test]
fn test_manifest_records_model_annotations_per_table() {
    let config = config();
    let tables = schema_tables(&config);
    let artifacts = Generator::from_config(&config).generate_all(&tables, 1);
    let dir = tempfile::tempdir().unwrap();
    let manifest = dir.path().join("manifest.json");
    emit::write_manifest(&manifest, &artifacts).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(manifest).unwrap()).unwrap();
    let user = &json[0]["model_decorations"][0];
    assert_eq!(
        user["annotation"],
        "@ApiModel(value = \"com.example.model.User\", description = \"用户\")"
    );
    let properties: Vec<&str> = user["fields"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|f| f["property"].as_str())
        .collect();
    assert_eq!(properties, vec!["id", "name", "email"]);
    assert_eq!(user["fields"][0]["annotation"], "@ApiModelProperty(value = \"主键\")");
    assert_eq!(json[1]["model_decorations"].as_array().unwrap().len(), 1);
}
