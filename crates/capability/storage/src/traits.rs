//! 存储接口 Trait 定义
//!
//! - TenantActivationStore：租户套餐与模块开通
//! - RoleGrantStore：用户角色与角色授权
//!
//! 设计原则：
//! - 所有接口显式接收 tenant_id
//! - 所有接口返回 StorageError
//! - 使用 async_trait 支持动态分发

use crate::error::StorageError;
use async_trait::async_trait;
use domain::{PermissionKey, RoleGrant, TenantActivation};
use std::collections::HashSet;

/// 租户开通存储接口
#[async_trait]
pub trait TenantActivationStore: Send + Sync {
    /// 查找租户的套餐与开通记录
    async fn find_activation(
        &self,
        tenant_id: &str,
    ) -> Result<Option<TenantActivation>, StorageError>;
}

/// 角色授权存储接口
#[async_trait]
pub trait RoleGrantStore: Send + Sync {
    /// 列出用户在租户下持有的角色
    async fn list_user_roles(
        &self,
        tenant_id: &str,
        user_id: &str,
    ) -> Result<Vec<String>, StorageError>;

    /// 查找租户内角色的授权集合
    async fn find_role_grant(
        &self,
        tenant_id: &str,
        role_id: &str,
    ) -> Result<Option<RoleGrant>, StorageError>;

    /// 用户全部角色授权的并集
    ///
    /// 不存在的角色不贡献任何权限键。
    async fn effective_grants(
        &self,
        tenant_id: &str,
        user_id: &str,
    ) -> Result<HashSet<PermissionKey>, StorageError> {
        let mut keys = HashSet::new();
        for role_id in self.list_user_roles(tenant_id, user_id).await? {
            if let Some(grant) = self.find_role_grant(tenant_id, &role_id).await? {
                keys.extend(grant.granted_permission_keys);
            }
        }
        Ok(keys)
    }
}
