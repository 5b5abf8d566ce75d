//! 种子数据：用 JSON 文档填充内存存储。
//!
//! ```json
//! {
//!   "tenants": [{ "tenant_id": "acme", "plan": "professional", "active_modules": ["hrm"] }],
//!   "roles":   [{ "tenant_id": "acme", "role_id": "hr-clerk", "permissions": ["hrm.employees.employee-directory.view"] }],
//!   "users":   [{ "tenant_id": "acme", "user_id": "alice", "roles": ["hr-clerk"] }]
//! }
//! ```

use crate::error::StorageError;
use crate::in_memory::{InMemoryRoleGrantStore, InMemoryTenantStore};
use domain::{PermissionKey, PlanTier, TenantActivation};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedDocument {
    #[serde(default)]
    pub tenants: Vec<SeedTenant>,
    #[serde(default)]
    pub roles: Vec<SeedRole>,
    #[serde(default)]
    pub users: Vec<SeedUser>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedTenant {
    pub tenant_id: String,
    pub plan: String,
    #[serde(default)]
    pub active_modules: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedRole {
    pub tenant_id: String,
    pub role_id: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedUser {
    pub tenant_id: String,
    pub user_id: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// 写入条数统计。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub tenants: usize,
    pub roles: usize,
    pub users: usize,
}

impl SeedDocument {
    pub fn from_json(raw: &str) -> Result<Self, StorageError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|err| StorageError::new(format!("read seed {}: {err}", path.display())))?;
        Self::from_json(&raw)
    }

    /// 校验并写入内存存储。
    ///
    /// 套餐或权限键格式错误时整体失败，此前已写入的记录保留。
    pub fn apply(
        &self,
        tenants: &InMemoryTenantStore,
        roles: &InMemoryRoleGrantStore,
    ) -> Result<SeedSummary, StorageError> {
        for tenant in &self.tenants {
            let plan: PlanTier = tenant.plan.parse().map_err(|err| {
                StorageError::new(format!("tenant {}: {err}", tenant.tenant_id))
            })?;
            tenants.upsert_activation(TenantActivation::new(
                tenant.tenant_id.as_str(),
                plan,
                tenant.active_modules.iter().cloned(),
            ))?;
        }
        for role in &self.roles {
            let keys = role
                .permissions
                .iter()
                .map(|raw| {
                    PermissionKey::parse(raw).map_err(|err| {
                        StorageError::new(format!("role {}: {err}", role.role_id))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            roles.upsert_role(&role.tenant_id, &role.role_id, keys)?;
        }
        for user in &self.users {
            roles.assign_roles(&user.tenant_id, &user.user_id, user.roles.iter().cloned())?;
        }

        let summary = SeedSummary {
            tenants: self.tenants.len(),
            roles: self.roles.len(),
            users: self.users.len(),
        };
        tracing::info!(
            tenants = summary.tenants,
            roles = summary.roles,
            users = summary.users,
            "Seeded in-memory stores"
        );
        Ok(summary)
    }
}
