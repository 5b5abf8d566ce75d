pub mod catalog;
pub mod decision;
pub mod permission;
pub mod plan;
pub mod tenant;

pub use catalog::{ActionDescriptor, ComponentKind, ComponentNode, LicenseType, ModuleNode, SubmoduleNode};
pub use decision::{Decision, DenyReason};
pub use permission::{PermissionKey, PermissionKeyError, module_segment, validate_code};
pub use plan::{PlanTier, UnknownPlanTier};
pub use tenant::{RoleGrant, TenantActivation};

use std::collections::{BTreeSet, HashSet};

/// 租户上下文：一次授权判定所需的全部输入。
///
/// 由调用方从租户/角色存储组装，引擎本身不做 I/O。
#[derive(Debug, Clone)]
pub struct TenantContext {
    pub tenant_id: String,
    pub user_id: String,
    pub plan: PlanTier,
    pub active_modules: BTreeSet<String>,
    pub roles: Vec<String>,
    /// 用户所有角色授权的并集。
    pub granted_keys: HashSet<PermissionKey>,
}

impl TenantContext {
    /// 构造仅含身份与套餐的上下文，开通与授权通过 `with_*` 补充。
    pub fn new(tenant_id: impl Into<String>, user_id: impl Into<String>, plan: PlanTier) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            user_id: user_id.into(),
            plan,
            active_modules: BTreeSet::new(),
            roles: Vec::new(),
            granted_keys: HashSet::new(),
        }
    }

    /// 以租户开通记录为基础构造上下文。
    pub fn from_activation(activation: &TenantActivation, user_id: impl Into<String>) -> Self {
        Self {
            tenant_id: activation.tenant_id.clone(),
            user_id: user_id.into(),
            plan: activation.plan,
            active_modules: activation.active_module_codes.clone(),
            roles: Vec::new(),
            granted_keys: HashSet::new(),
        }
    }

    pub fn with_active_modules(
        mut self,
        codes: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.active_modules = codes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_roles(mut self, roles: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.roles = roles.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_grants(mut self, keys: impl IntoIterator<Item = PermissionKey>) -> Self {
        self.granted_keys = keys.into_iter().collect();
        self
    }

    /// 是否显式授予了该权限键。
    pub fn is_granted(&self, key: &PermissionKey) -> bool {
        self.granted_keys.contains(key)
    }
}

impl Default for TenantContext {
    /// 空上下文（仅用于测试或占位）。
    fn default() -> Self {
        Self::new("", "", PlanTier::Basic)
    }
}
