//! 租户开通内存存储实现
//!
//! 用于测试与命令行演示。revision 取自存储级递增序列，
//! 删除后重建的租户也不会复用旧 revision。

use crate::error::StorageError;
use crate::traits::TenantActivationStore;
use crate::validation::ensure_tenant;
use domain::{PlanTier, TenantActivation};
use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

/// 租户开通内存存储
///
/// 使用 RwLock + HashMap 提供线程安全的内存存储。
#[derive(Default)]
pub struct InMemoryTenantStore {
    activations: RwLock<HashMap<String, TenantActivation>>,
    sequence: AtomicU64,
}

impl InMemoryTenantStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入整条开通记录，返回带新 revision 的记录。
    pub fn upsert_activation(
        &self,
        activation: TenantActivation,
    ) -> Result<TenantActivation, StorageError> {
        let TenantActivation {
            tenant_id,
            plan,
            active_module_codes,
            ..
        } = activation;
        ensure_tenant(&tenant_id)?;
        self.mutate(&tenant_id, plan, |current| {
            current.plan = plan;
            current.active_module_codes = active_module_codes;
        })
    }

    /// 变更租户套餐。
    pub fn set_plan(&self, tenant_id: &str, plan: PlanTier) -> Result<TenantActivation, StorageError> {
        ensure_tenant(tenant_id)?;
        self.mutate(tenant_id, plan, |current| current.plan = plan)
    }

    /// 开通模块（已开通时仍递增 revision）。
    pub fn activate_module(
        &self,
        tenant_id: &str,
        module_code: &str,
    ) -> Result<TenantActivation, StorageError> {
        ensure_tenant(tenant_id)?;
        self.mutate(tenant_id, PlanTier::default(), |current| {
            current.active_module_codes.insert(module_code.to_string());
        })
    }

    /// 停用模块。
    pub fn deactivate_module(
        &self,
        tenant_id: &str,
        module_code: &str,
    ) -> Result<TenantActivation, StorageError> {
        ensure_tenant(tenant_id)?;
        self.mutate(tenant_id, PlanTier::default(), |current| {
            current.active_module_codes.remove(module_code);
        })
    }

    /// 删除租户记录。
    pub fn remove(&self, tenant_id: &str) -> Result<bool, StorageError> {
        ensure_tenant(tenant_id)?;
        let mut map = self
            .activations
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        Ok(map.remove(tenant_id).is_some())
    }

    fn mutate(
        &self,
        tenant_id: &str,
        initial_plan: PlanTier,
        apply: impl FnOnce(&mut TenantActivation),
    ) -> Result<TenantActivation, StorageError> {
        let mut map = self
            .activations
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        let current = map.entry(tenant_id.to_string()).or_insert_with(|| {
            TenantActivation::new(tenant_id, initial_plan, std::iter::empty::<String>())
        });
        apply(current);
        current.revision = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        Ok(current.clone())
    }
}

#[async_trait::async_trait]
impl TenantActivationStore for InMemoryTenantStore {
    async fn find_activation(
        &self,
        tenant_id: &str,
    ) -> Result<Option<TenantActivation>, StorageError> {
        ensure_tenant(tenant_id)?;
        Ok(self
            .activations
            .read()
            .ok()
            .and_then(|map| map.get(tenant_id).cloned()))
    }
}
