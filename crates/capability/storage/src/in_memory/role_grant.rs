//! 角色授权内存存储实现
//!
//! 角色按 (tenant_id, role_id) 存放；用户角色按 (tenant_id, user_id) 存放。

use crate::error::StorageError;
use crate::models::UserRoleRecord;
use crate::traits::RoleGrantStore;
use crate::validation::{ensure_tenant, ensure_user};
use domain::{PermissionKey, RoleGrant};
use std::collections::HashMap;
use std::sync::RwLock;

type ScopedKey = (String, String);

/// 角色授权内存存储
#[derive(Default)]
pub struct InMemoryRoleGrantStore {
    grants: RwLock<HashMap<ScopedKey, RoleGrant>>,
    user_roles: RwLock<HashMap<ScopedKey, UserRoleRecord>>,
}

impl InMemoryRoleGrantStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 覆盖角色的授权集合，返回带新 revision 的记录。
    pub fn upsert_role(
        &self,
        tenant_id: &str,
        role_id: &str,
        keys: impl IntoIterator<Item = PermissionKey>,
    ) -> Result<RoleGrant, StorageError> {
        ensure_tenant(tenant_id)?;
        let mut map = self
            .grants
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        let revision = map
            .get(&(tenant_id.to_string(), role_id.to_string()))
            .map(|grant| grant.revision)
            .unwrap_or(0);
        let mut grant = RoleGrant::new(role_id, keys);
        grant.revision = revision + 1;
        map.insert((tenant_id.to_string(), role_id.to_string()), grant.clone());
        Ok(grant)
    }

    /// 删除角色；持有该角色的用户不再从中获得授权。
    pub fn remove_role(&self, tenant_id: &str, role_id: &str) -> Result<bool, StorageError> {
        ensure_tenant(tenant_id)?;
        let mut map = self
            .grants
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        Ok(map
            .remove(&(tenant_id.to_string(), role_id.to_string()))
            .is_some())
    }

    /// 覆盖用户在租户下持有的角色。
    pub fn assign_roles(
        &self,
        tenant_id: &str,
        user_id: &str,
        roles: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<UserRoleRecord, StorageError> {
        ensure_tenant(tenant_id)?;
        ensure_user(user_id)?;
        let record = UserRoleRecord {
            tenant_id: tenant_id.to_string(),
            user_id: user_id.to_string(),
            roles: roles.into_iter().map(Into::into).collect(),
        };
        let mut map = self
            .user_roles
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        map.insert((tenant_id.to_string(), user_id.to_string()), record.clone());
        Ok(record)
    }
}

#[async_trait::async_trait]
impl RoleGrantStore for InMemoryRoleGrantStore {
    async fn list_user_roles(
        &self,
        tenant_id: &str,
        user_id: &str,
    ) -> Result<Vec<String>, StorageError> {
        ensure_tenant(tenant_id)?;
        ensure_user(user_id)?;
        let roles = self
            .user_roles
            .read()
            .ok()
            .and_then(|map| {
                map.get(&(tenant_id.to_string(), user_id.to_string()))
                    .map(|record| record.roles.clone())
            })
            .unwrap_or_default();
        Ok(roles)
    }

    async fn find_role_grant(
        &self,
        tenant_id: &str,
        role_id: &str,
    ) -> Result<Option<RoleGrant>, StorageError> {
        ensure_tenant(tenant_id)?;
        Ok(self
            .grants
            .read()
            .ok()
            .and_then(|map| map.get(&(tenant_id.to_string(), role_id.to_string())).cloned()))
    }
}
