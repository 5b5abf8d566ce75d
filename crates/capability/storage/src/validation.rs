//! 验证辅助函数
//!
//! - ensure_tenant：租户 ID 非空
//! - ensure_user：用户 ID 非空

use crate::error::StorageError;

/// 验证租户 ID 非空
///
/// 所有按租户查询/写入前调用。
pub fn ensure_tenant(tenant_id: &str) -> Result<(), StorageError> {
    if tenant_id.trim().is_empty() {
        return Err(StorageError::new("tenant_id required"));
    }
    Ok(())
}

/// 验证用户 ID 非空
pub fn ensure_user(user_id: &str) -> Result<(), StorageError> {
    if user_id.trim().is_empty() {
        return Err(StorageError::new("user_id required"));
    }
    Ok(())
}
