//! # navgate Storage 模块
//!
//! 租户开通与角色授权的存储抽象。引擎只消费这些状态，真正的持久化由外部服务负责；
//! 本 crate 提供接口定义、内存实现以及用于测试和命令行的种子加载。
//!
//! ## 模块说明
//!
//! - [`traits`]：存储接口（`TenantActivationStore`、`RoleGrantStore`）
//! - [`models`]：存储特有的记录
//! - [`error`]：存储错误类型
//! - [`validation`]：租户/用户 ID 校验
//! - [`in_memory`]：`RwLock<HashMap>` 内存实现，写入时递增 revision
//! - [`seed`]：JSON 种子文档
//!
//! ## 多租户隔离
//!
//! 所有接口显式接收 `tenant_id`；角色按 (tenant_id, role_id) 隔离，
//! 同名角色在不同租户下互不影响。

pub mod error;
pub mod in_memory;
pub mod models;
pub mod seed;
pub mod traits;
pub mod validation;

pub use error::*;
pub use models::*;
pub use seed::{SeedDocument, SeedRole, SeedSummary, SeedTenant, SeedUser};
pub use traits::*;
pub use validation::*;

pub use in_memory::{InMemoryRoleGrantStore, InMemoryTenantStore};
