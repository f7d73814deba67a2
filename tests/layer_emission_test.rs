use crudmapper::codegen::{Binding, HttpMethod, ServiceAction};
use crudmapper::java::render;
use crudmapper::pipeline::ArtifactKind;
use crudmapper::{Generator, TableArtifacts};

mod common;
use common::{composite_key_table, config, config_without_swagger, keyless_table, user_table};

fn generate(table: &crudmapper::Table) -> TableArtifacts {
    let config = config();
    Generator::from_config(&config).generate_table(table)
}

fn service_names(artifacts: &TableArtifacts) -> Vec<&str> {
    artifacts
        .service
        .methods
        .iter()
        .map(|m| m.contract.name.as_str())
        .collect()
}

fn handler_names(artifacts: &TableArtifacts) -> Vec<&str> {
    artifacts
        .controller
        .handlers
        .iter()
        .map(|h| h.contract.name.as_str())
        .collect()
}

// ============================================================================
// Service layer
// ============================================================================

#[test]
fn test_user_service_methods_in_order() {
    let artifacts = generate(&user_table());
    assert_eq!(
        service_names(&artifacts),
        vec!["addUser", "deleteUser", "updateUser", "getUser", "listByIds", "listUser"]
    );
}

#[test]
fn test_service_delegates_to_persistence_methods() {
    let artifacts = generate(&user_table());
    let delegates: Vec<&str> = artifacts
        .service
        .methods
        .iter()
        .map(|m| m.delegate.name.as_str())
        .collect();
    assert_eq!(
        delegates,
        vec![
            "insert",
            "deleteByPrimaryKey",
            "updateByPrimaryKey",
            "selectByPrimaryKey",
            "listByPrimaryKey",
            "listUser",
        ]
    );
    let body = &artifacts.file(ArtifactKind::Service).unwrap().body;
    assert!(body.contains("        return userMapper.listUser(req);\n"));
    assert!(body.contains("        return userMapper.deleteByPrimaryKey(id);\n"));
}

// ============================================================================
// Controller layer
// ============================================================================

#[test]
fn test_user_controller_routes() {
    let artifacts = generate(&user_table());
    let routes: Vec<(&str, HttpMethod)> = artifacts
        .controller
        .handlers
        .iter()
        .map(|h| (h.path.as_str(), h.http_method))
        .collect();
    assert_eq!(
        routes,
        vec![
            ("/user/add", HttpMethod::Post),
            ("/user/delete", HttpMethod::Post),
            ("/user/update", HttpMethod::Post),
            ("/user/get", HttpMethod::Get),
            ("/user/listByIds", HttpMethod::Post),
            ("/user/list", HttpMethod::Post),
        ]
    );
}

#[test]
fn test_controller_bindings() {
    let artifacts = generate(&user_table());
    let controller = &artifacts.controller;
    assert_eq!(
        controller.handler(ServiceAction::Delete).unwrap().bindings(),
        vec![Binding::Param("id".to_string())]
    );
    assert_eq!(
        controller.handler(ServiceAction::ListByIds).unwrap().bindings(),
        vec![Binding::Body]
    );
    assert_eq!(
        controller.handler(ServiceAction::Add).unwrap().bindings(),
        vec![Binding::Body]
    );
}

#[test]
fn test_controller_wraps_in_envelope() {
    let artifacts = generate(&user_table());
    let body = &artifacts.file(ArtifactKind::Controller).unwrap().body;
    assert!(body.contains("import com.example.common.Response;\n"));
    assert!(body.contains(
        "    public Response<List<User>> listByIds(@RequestBody List<Long> ids) {\n        return new Response<>(userService.listByIds(ids));\n    }"
    ));
    assert!(body.contains("    public Response<Integer> addUser(@RequestBody User record) {"));
}

#[test]
fn test_mapper_service_and_controller_share_signatures() {
    let artifacts = generate(&user_table());
    for method in &artifacts.service.methods {
        let handler = artifacts.controller.handler(method.action).unwrap();
        assert!(method.contract.shares_signature(&method.delegate));
        assert!(handler.contract.shares_signature(&method.contract));
        assert_eq!(handler.contract.name, method.contract.name);
    }

    let mapper_list = artifacts.mapper.method("listByPrimaryKey").unwrap();
    let service_list = artifacts.service_java.method("listByIds").unwrap();
    let controller_list = artifacts.controller_java.method("listByIds").unwrap();
    assert_eq!(mapper_list.return_type, service_list.return_type);
    for ((a, b), c) in mapper_list
        .parameters
        .iter()
        .zip(&service_list.parameters)
        .zip(&controller_list.parameters)
    {
        assert_eq!(a.java_type, b.java_type);
        assert_eq!(b.java_type, c.java_type);
        assert_eq!(a.name, c.name);
    }
}

// ============================================================================
// Omission propagation
// ============================================================================

#[test]
fn test_composite_key_omits_list_by_ids_everywhere() {
    let artifacts = generate(&composite_key_table());
    assert!(artifacts.mapper.method("listByPrimaryKey").is_none());
    assert!(artifacts.sql_map.element("listByPrimaryKey").is_none());
    assert!(!service_names(&artifacts).contains(&"listByIds"));
    assert!(artifacts.controller.handler(ServiceAction::ListByIds).is_none());
    assert!(!artifacts
        .file(ArtifactKind::Controller)
        .unwrap()
        .body
        .contains("/orderItem/listByIds"));

    let get = artifacts.controller.handler(ServiceAction::Get).unwrap();
    assert_eq!(get.path, "/orderItem/get");
    assert_eq!(get.bindings(), vec![Binding::ModelAttribute]);
}

#[test]
fn test_keyless_table_omits_key_operations_everywhere() {
    let artifacts = generate(&keyless_table());
    assert_eq!(service_names(&artifacts), vec!["addAuditLog", "listAuditLog"]);
    assert_eq!(handler_names(&artifacts), vec!["addAuditLog", "listAuditLog"]);
    assert!(artifacts.mapper.method("insertOrUpdate").is_none());
    assert!(artifacts.sql_map.element("insertOrUpdate").is_none());
}

// ============================================================================
// Decoration
// ============================================================================

#[test]
fn test_swagger_annotations_on_controller() {
    let artifacts = generate(&user_table());
    let body = &artifacts.file(ArtifactKind::Controller).unwrap().body;
    assert!(body.contains("@RestController\n@Api(tags = \"用户\")\npublic class UserController {"));
    assert!(body.contains(
        "    @GetMapping(value = \"/user/get\")\n    @ApiOperation(value = \"详情查询用户\")\n"
    ));
    assert!(body.contains("import io.swagger.annotations.ApiOperation;"));
    assert_eq!(artifacts.model_decorations.len(), 1);
}

#[test]
fn test_decoration_never_changes_signatures() {
    let plain_config = config_without_swagger();
    let decorated = generate(&user_table());
    let plain = Generator::from_config(&plain_config).generate_table(&user_table());
    assert_eq!(decorated.controller, plain.controller);
    for (a, b) in decorated
        .controller_java
        .methods
        .iter()
        .zip(&plain.controller_java.methods)
    {
        assert_eq!(a.parameters, b.parameters);
        assert_eq!(a.return_type, b.return_type);
        assert_eq!(a.body, b.body);
    }
    assert!(!render(&plain.controller_java).contains("@Api"));
}
