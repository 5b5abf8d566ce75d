//! 租户可用模块集合缓存。
//!
//! 条目按租户存放，并带上计算时的注册表 revision 以及租户的套餐与开通集合。
//! 任一项不同即视为未命中，不依赖存储方 revision 的单调性；
//! 显式失效只用于释放内存。

use domain::{PlanTier, TenantActivation};
use std::collections::{BTreeSet, HashMap};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Stamp {
    registry: Uuid,
    plan: PlanTier,
    active_modules: BTreeSet<String>,
}

impl Stamp {
    fn new(registry: Uuid, activation: &TenantActivation) -> Self {
        Self {
            registry,
            plan: activation.plan,
            active_modules: activation.active_module_codes.clone(),
        }
    }

    fn matches(&self, registry: Uuid, activation: &TenantActivation) -> bool {
        self.registry == registry
            && self.plan == activation.plan
            && self.active_modules == activation.active_module_codes
    }
}

#[derive(Debug)]
struct Entry {
    stamp: Stamp,
    eligible: BTreeSet<String>,
    seq: u64,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<String, Entry>,
    next_seq: u64,
}

/// 容量满时淘汰最早写入的租户。
#[derive(Debug)]
pub(crate) struct EligibilityCache {
    capacity: usize,
    state: RwLock<CacheState>,
}

impl EligibilityCache {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            capacity,
            state: RwLock::new(CacheState::default()),
        }
    }

    pub(crate) async fn get(
        &self,
        registry: Uuid,
        activation: &TenantActivation,
    ) -> Option<BTreeSet<String>> {
        let state = self.state.read().await;
        state
            .entries
            .get(&activation.tenant_id)
            .filter(|entry| entry.stamp.matches(registry, activation))
            .map(|entry| entry.eligible.clone())
    }

    pub(crate) async fn insert(
        &self,
        registry: Uuid,
        activation: &TenantActivation,
        eligible: BTreeSet<String>,
    ) {
        let tenant_id = activation.tenant_id.as_str();
        let mut state = self.state.write().await;
        if !state.entries.contains_key(tenant_id) && state.entries.len() >= self.capacity {
            let oldest = state
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.seq)
                .map(|(tenant, _)| tenant.clone());
            if let Some(oldest) = oldest {
                state.entries.remove(&oldest);
            }
        }
        let seq = state.next_seq;
        state.next_seq += 1;
        state.entries.insert(
            tenant_id.to_string(),
            Entry {
                stamp: Stamp::new(registry, activation),
                eligible,
                seq,
            },
        );
    }

    pub(crate) async fn invalidate(&self, tenant_id: &str) -> bool {
        self.state.write().await.entries.remove(tenant_id).is_some()
    }

    pub(crate) async fn clear(&self) {
        self.state.write().await.entries.clear();
    }

    pub(crate) async fn len(&self) -> usize {
        self.state.read().await.entries.len()
    }
}
