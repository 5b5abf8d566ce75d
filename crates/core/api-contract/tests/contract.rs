use api_contract::{
    ACCESS_DENIED, ACCESS_MODULE_INELIGIBLE, ACCESS_NOT_GRANTED, ACCESS_UNKNOWN_PERMISSION,
    DecisionDto, ExplainDto, MenuComponentDto, MenuModuleDto, MenuSubmoduleDto, MenuActionDto,
    deny_error_code, deny_status_hint,
};
use serde_json::Value;

#[test]
fn deny_reasons_map_to_stable_codes() {
    assert_eq!(deny_error_code("module_ineligible"), ACCESS_MODULE_INELIGIBLE);
    assert_eq!(deny_error_code("unknown_permission"), ACCESS_UNKNOWN_PERMISSION);
    assert_eq!(deny_error_code("not_granted"), ACCESS_NOT_GRANTED);
    assert_eq!(deny_error_code("something_else"), ACCESS_DENIED);

    assert_eq!(deny_status_hint("module_ineligible"), 402);
    assert_eq!(deny_status_hint("unknown_permission"), 403);
    assert_eq!(deny_status_hint("not_granted"), 403);
}

#[test]
fn decision_dto_is_camel_case() {
    let deny = DecisionDto::deny("acme", "alice", "hrm.employees.employee-directory.edit", "not_granted");
    let value = serde_json::to_value(deny).expect("serialize");
    assert_eq!(value["tenantId"], "acme");
    assert_eq!(value["allowed"], false);
    assert_eq!(value["reason"], "not_granted");
    assert_eq!(value["errorCode"], "ACCESS.NOT_GRANTED");
    assert_eq!(value["statusHint"], 403);
    assert!(value.get("error_code").is_none());

    let allow = DecisionDto::allow("acme", "alice", "hrm.employees.employee-directory.view");
    let value = serde_json::to_value(allow).expect("serialize");
    assert_eq!(value["allowed"], true);
    assert_eq!(value["statusHint"], 200);
    assert!(value.get("reason").is_none());
    assert!(value.get("errorCode").is_none());
}

#[test]
fn explain_dto_omits_empty_fields() {
    let dto = ExplainDto {
        tenant_id: "acme".to_string(),
        module: "crm".to_string(),
        status: "eligible".to_string(),
        required_plan: None,
        dependency: None,
        activation_closure: Vec::new(),
    };
    let value = serde_json::to_value(dto).expect("serialize");
    assert!(value.get("requiredPlan").is_none());
    assert!(value.get("activationClosure").is_none());
}

#[test]
fn menu_component_kind_is_serialized_as_type() {
    let module = MenuModuleDto {
        code: "hrm".to_string(),
        name: "Human Resources".to_string(),
        icon: Some("users".to_string()),
        route_prefix: Some("/hr".to_string()),
        priority: 10,
        submodules: vec![MenuSubmoduleDto {
            code: "employees".to_string(),
            name: "Employees".to_string(),
            icon: None,
            components: vec![MenuComponentDto {
                code: "employee-directory".to_string(),
                name: "Employee Directory".to_string(),
                kind: "page".to_string(),
                route: Some("/hr/employees".to_string()),
                actions: vec![MenuActionDto {
                    code: "view".to_string(),
                    name: "View".to_string(),
                    permission: "hrm.employees.employee-directory.view".to_string(),
                }],
            }],
        }],
    };
    let value: Value = serde_json::to_value(module).expect("serialize");
    assert_eq!(value["routePrefix"], "/hr");
    let component = &value["submodules"][0]["components"][0];
    assert_eq!(component["type"], "page");
    assert!(component.get("kind").is_none());
    assert_eq!(
        component["actions"][0]["permission"],
        "hrm.employees.employee-directory.view"
    );
}
