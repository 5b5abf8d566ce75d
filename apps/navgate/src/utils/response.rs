//! 输出辅助函数和 DTO 转换
//!
//! - 错误响应：access_error, unknown_module_error
//! - DTO 转换：decision_to_dto, menu_to_dto, explain_to_dto, registry_summary
//!
//! 所有输出统一为 ApiResponse 格式的 JSON。

use api_contract::{
    ApiResponse, DecisionDto, ExplainDto, MenuActionDto, MenuComponentDto, MenuDto, MenuModuleDto,
    MenuSubmoduleDto, RegistrySummaryDto,
};
use domain::Decision;
use navgate_access::AccessError;
use navgate_menu::{ComponentView, ModuleView, SubmoduleView};
use navgate_registry::Registry;
use navgate_resolver::Eligibility;
use serde::Serialize;

/// 序列化为带缩进的 JSON。
pub fn render<T: Serialize>(response: &ApiResponse<T>) -> String {
    serde_json::to_string_pretty(response).unwrap_or_else(|err| {
        format!(r#"{{"success":false,"data":null,"error":{{"code":"INTERNAL.ERROR","message":"{err}"}}}}"#)
    })
}

/// 门面错误响应
pub fn access_error(err: &AccessError) -> ApiResponse<()> {
    let code = match err {
        AccessError::UnknownTenant(_) => "TENANT.NOT_FOUND",
        AccessError::Storage(_) => "INTERNAL.ERROR",
    };
    ApiResponse::error(code, err.to_string())
}

/// 未知模块错误响应
pub fn unknown_module_error(module: &str) -> ApiResponse<()> {
    ApiResponse::error("REGISTRY.UNKNOWN_MODULE", format!("unknown module: {module}"))
}

pub fn decision_to_dto(tenant_id: &str, user_id: &str, permission: &str, decision: Decision) -> DecisionDto {
    match decision {
        Decision::Allow => DecisionDto::allow(tenant_id, user_id, permission),
        Decision::Deny(reason) => DecisionDto::deny(tenant_id, user_id, permission, reason.as_str()),
    }
}

pub fn registry_summary(registry: &Registry) -> RegistrySummaryDto {
    RegistrySummaryDto {
        revision: registry.revision().to_string(),
        modules: registry.module_count(),
        permissions: registry.permission_count(),
        activation_order: registry
            .activation_order()
            .map(|module| module.code.clone())
            .collect(),
    }
}

/// 可用性说明；不可用时附带升级所需套餐与需一并开通的模块。
pub fn explain_to_dto(registry: &Registry, tenant_id: &str, module: &str, eligibility: &Eligibility) -> ExplainDto {
    let (required_plan, dependency, activation_closure) = match eligibility {
        Eligibility::Eligible | Eligibility::UnknownModule => (None, None, Vec::new()),
        Eligibility::PlanTooLow { .. } => (
            navgate_resolver::required_plan(registry, module),
            None,
            Vec::new(),
        ),
        Eligibility::NotActivated => (
            None,
            None,
            navgate_resolver::activation_closure(registry, module).unwrap_or_default(),
        ),
        Eligibility::DependencyUnmet { dependency } => (
            navgate_resolver::required_plan(registry, module),
            Some(dependency.clone()),
            navgate_resolver::activation_closure(registry, module).unwrap_or_default(),
        ),
    };
    ExplainDto {
        tenant_id: tenant_id.to_string(),
        module: module.to_string(),
        status: eligibility.as_str().to_string(),
        required_plan: required_plan.map(|plan| plan.to_string()),
        dependency,
        activation_closure,
    }
}

pub fn menu_to_dto(tenant_id: &str, user_id: &str, menu: Vec<ModuleView>) -> MenuDto {
    MenuDto {
        tenant_id: tenant_id.to_string(),
        user_id: user_id.to_string(),
        modules: menu.into_iter().map(module_to_dto).collect(),
    }
}

fn module_to_dto(module: ModuleView) -> MenuModuleDto {
    MenuModuleDto {
        code: module.code,
        name: module.name,
        icon: module.icon,
        route_prefix: module.route_prefix,
        priority: module.priority,
        submodules: module.submodules.into_iter().map(submodule_to_dto).collect(),
    }
}

fn submodule_to_dto(submodule: SubmoduleView) -> MenuSubmoduleDto {
    MenuSubmoduleDto {
        code: submodule.code,
        name: submodule.name,
        icon: submodule.icon,
        components: submodule
            .components
            .into_iter()
            .map(component_to_dto)
            .collect(),
    }
}

fn component_to_dto(component: ComponentView) -> MenuComponentDto {
    MenuComponentDto {
        code: component.code,
        name: component.name,
        kind: component.kind.to_string(),
        route: component.route,
        actions: component
            .actions
            .into_iter()
            .map(|action| MenuActionDto {
                permission: action.key.to_string(),
                code: action.code,
                name: action.name,
            })
            .collect(),
    }
}
