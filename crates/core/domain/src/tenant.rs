//! 外部拥有的租户/角色状态（由身份与计费服务提供，本仓库只消费）。

use crate::permission::PermissionKey;
use crate::plan::PlanTier;
use std::collections::BTreeSet;

/// 租户的套餐与显式开通模块。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantActivation {
    pub tenant_id: String,
    pub plan: PlanTier,
    pub active_module_codes: BTreeSet<String>,
    /// 每次套餐或开通集合变化时递增。
    pub revision: u64,
}

impl TenantActivation {
    pub fn new(
        tenant_id: impl Into<String>,
        plan: PlanTier,
        active_module_codes: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            plan,
            active_module_codes: active_module_codes.into_iter().map(Into::into).collect(),
            revision: 0,
        }
    }
}

/// 角色授予的权限键集合。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleGrant {
    pub role_id: String,
    pub granted_permission_keys: BTreeSet<PermissionKey>,
    pub revision: u64,
}

impl RoleGrant {
    pub fn new(role_id: impl Into<String>, keys: impl IntoIterator<Item = PermissionKey>) -> Self {
        Self {
            role_id: role_id.into(),
            granted_permission_keys: keys.into_iter().collect(),
            revision: 0,
        }
    }
}
