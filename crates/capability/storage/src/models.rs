//! 数据模型
//!
//! 租户开通（`TenantActivation`）与角色授权（`RoleGrant`）直接使用领域类型；
//! 此处只定义存储特有的记录。

/// 用户在某租户下持有的角色。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRoleRecord {
    pub tenant_id: String,
    pub user_id: String,
    pub roles: Vec<String>,
}
