//! 内存存储实现模块
//!
//! 用于测试与命令行演示。
//!
//! 包含以下实现：
//! - TenantActivationStore: InMemoryTenantStore
//! - RoleGrantStore: InMemoryRoleGrantStore

pub mod role_grant;
pub mod tenant;

pub use role_grant::*;
pub use tenant::*;
