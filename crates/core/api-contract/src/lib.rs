//! 稳定的 DTO 与 API 响应契约。
//!
//! 不依赖 HTTP 框架；状态码只作为提示随响应体输出。

use serde::{Deserialize, Serialize};

/// 模块不可用（套餐不足、未开通或依赖不满足）。
pub const ACCESS_MODULE_INELIGIBLE: &str = "ACCESS.MODULE_INELIGIBLE";
/// 请求的权限键不在注册表中。
pub const ACCESS_UNKNOWN_PERMISSION: &str = "ACCESS.UNKNOWN_PERMISSION";
/// 权限键存在但未授予。
pub const ACCESS_NOT_GRANTED: &str = "ACCESS.NOT_GRANTED";
/// 无法识别的拒绝原因。
pub const ACCESS_DENIED: &str = "ACCESS.DENIED";

/// 标准 API 响应封装。
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

/// 失败响应的错误体。
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code: code.into(),
                message: message.into(),
            }),
        }
    }
}

/// 拒绝原因对应的错误码。
pub fn deny_error_code(reason: &str) -> &'static str {
    match reason {
        "module_ineligible" => ACCESS_MODULE_INELIGIBLE,
        "unknown_permission" => ACCESS_UNKNOWN_PERMISSION,
        "not_granted" => ACCESS_NOT_GRANTED,
        _ => ACCESS_DENIED,
    }
}

/// 拒绝原因对应的 HTTP 状态提示：模块不可用提示升级（402），其余为 403。
pub fn deny_status_hint(reason: &str) -> u16 {
    match reason {
        "module_ineligible" => 402,
        _ => 403,
    }
}

/// 单次授权判定结果。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionDto {
    pub tenant_id: String,
    pub user_id: String,
    pub permission: String,
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    pub status_hint: u16,
}

impl DecisionDto {
    pub fn allow(
        tenant_id: impl Into<String>,
        user_id: impl Into<String>,
        permission: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            user_id: user_id.into(),
            permission: permission.into(),
            allowed: true,
            reason: None,
            error_code: None,
            status_hint: 200,
        }
    }

    pub fn deny(
        tenant_id: impl Into<String>,
        user_id: impl Into<String>,
        permission: impl Into<String>,
        reason: &str,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            user_id: user_id.into(),
            permission: permission.into(),
            allowed: false,
            reason: Some(reason.to_string()),
            error_code: Some(deny_error_code(reason).to_string()),
            status_hint: deny_status_hint(reason),
        }
    }
}

/// 租户可用模块集合。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityDto {
    pub tenant_id: String,
    pub plan: String,
    pub modules: Vec<String>,
}

/// 单个模块的可用性说明。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplainDto {
    pub tenant_id: String,
    pub module: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_plan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependency: Option<String>,
    /// 开通该模块需要一并开通的非核心模块（依赖在前）。
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub activation_closure: Vec<String>,
}

/// 模块下的全部权限键。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleKeysDto {
    pub module: String,
    pub keys: Vec<String>,
}

/// 注册表概要。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrySummaryDto {
    pub revision: String,
    pub modules: usize,
    pub permissions: usize,
    pub activation_order: Vec<String>,
}

/// 有效菜单。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuDto {
    pub tenant_id: String,
    pub user_id: String,
    pub modules: Vec<MenuModuleDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuModuleDto {
    pub code: String,
    pub name: String,
    pub icon: Option<String>,
    pub route_prefix: Option<String>,
    pub priority: i32,
    pub submodules: Vec<MenuSubmoduleDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuSubmoduleDto {
    pub code: String,
    pub name: String,
    pub icon: Option<String>,
    pub components: Vec<MenuComponentDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuComponentDto {
    pub code: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub route: Option<String>,
    pub actions: Vec<MenuActionDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuActionDto {
    pub code: String,
    pub name: String,
    /// 完整权限键，前端可直接用于按钮级控制。
    pub permission: String,
}
