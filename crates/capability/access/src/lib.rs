//! 访问门面：从租户/角色存储组装上下文，再交给判定引擎与菜单投影。
//!
//! 存储 I/O 全部发生在构造 `TenantContext` 之前；判定本身是纯计算。
//! 每次调用生成 request_id/trace_id 并挂在 span 上。

mod cache;

use async_trait::async_trait;
use cache::EligibilityCache;
use domain::{Decision, TenantActivation, TenantContext};
use navgate_authz::Authorizer;
use navgate_menu::ModuleView;
use navgate_registry::{Registry, RegistryHandle};
use navgate_resolver::{Eligibility, eligible_modules, explain};
use navgate_storage::{RoleGrantStore, StorageError, TenantActivationStore};
use navgate_telemetry::new_request_ids;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{Instrument, info_span};

/// 门面调用错误。判定拒绝不是错误，见 [`Decision`]。
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    #[error("unknown tenant: {0}")]
    UnknownTenant(String),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// 一次调用所需的全部输入：注册表快照、上下文与可用模块集合。
struct Resolved {
    registry: Arc<Registry>,
    ctx: TenantContext,
    eligible: BTreeSet<String>,
}

/// 访问门面实现（基于存储接口 + 共享注册表）。
pub struct AccessService {
    registry: Arc<RegistryHandle>,
    tenants: Arc<dyn TenantActivationStore>,
    grants: Arc<dyn RoleGrantStore>,
    cache: Option<EligibilityCache>,
}

impl AccessService {
    /// 创建不带缓存的门面。
    pub fn new(
        registry: Arc<RegistryHandle>,
        tenants: Arc<dyn TenantActivationStore>,
        grants: Arc<dyn RoleGrantStore>,
    ) -> Self {
        Self {
            registry,
            tenants,
            grants,
            cache: None,
        }
    }

    /// 启用可用模块缓存；`capacity` 为 0 时关闭。
    pub fn with_eligibility_cache(mut self, capacity: usize) -> Self {
        self.cache = (capacity > 0).then(|| EligibilityCache::new(capacity));
        self
    }

    pub fn registry(&self) -> &Arc<RegistryHandle> {
        &self.registry
    }

    pub fn cache_enabled(&self) -> bool {
        self.cache.is_some()
    }

    /// 当前缓存的租户数。
    pub async fn cached_tenants(&self) -> usize {
        match &self.cache {
            Some(cache) => cache.len().await,
            None => 0,
        }
    }

    /// 组装用户的授权上下文。
    pub async fn context(&self, tenant_id: &str, user_id: &str) -> Result<TenantContext, AccessError> {
        let activation = self.tenant_activation(tenant_id).await?;
        self.user_context(&activation, user_id).await
    }

    /// 租户可用模块集合。
    pub async fn eligible_modules(&self, tenant_id: &str) -> Result<BTreeSet<String>, AccessError> {
        let ids = new_request_ids();
        let span = info_span!(
            "access.eligible_modules",
            request_id = %ids.request_id,
            trace_id = %ids.trace_id,
            tenant_id = %tenant_id
        );
        async {
            let registry = self.registry.current();
            let activation = self.tenant_activation(tenant_id).await?;
            Ok(self.eligible_for(&registry, &activation).await)
        }
        .instrument(span)
        .await
    }

    /// 判定单个权限键。
    pub async fn authorize(
        &self,
        tenant_id: &str,
        user_id: &str,
        permission: &str,
    ) -> Result<Decision, AccessError> {
        let ids = new_request_ids();
        let span = info_span!(
            "access.authorize",
            request_id = %ids.request_id,
            trace_id = %ids.trace_id,
            tenant_id = %tenant_id,
            user_id = %user_id
        );
        async {
            let Resolved {
                registry,
                ctx,
                eligible,
            } = self.resolve(tenant_id, user_id).await?;
            let authorizer = Authorizer::with_eligible(&registry, &ctx, eligible);
            Ok(authorizer.authorize(permission))
        }
        .instrument(span)
        .await
    }

    /// 投影用户的有效菜单。
    pub async fn menu(&self, tenant_id: &str, user_id: &str) -> Result<Vec<ModuleView>, AccessError> {
        let ids = new_request_ids();
        let span = info_span!(
            "access.menu",
            request_id = %ids.request_id,
            trace_id = %ids.trace_id,
            tenant_id = %tenant_id,
            user_id = %user_id
        );
        async {
            let Resolved {
                registry,
                ctx,
                eligible,
            } = self.resolve(tenant_id, user_id).await?;
            let authorizer = Authorizer::with_eligible(&registry, &ctx, eligible);
            Ok(navgate_menu::project_with(&authorizer))
        }
        .instrument(span)
        .await
    }

    /// 解释某个模块对租户是否可用。
    pub async fn explain(&self, tenant_id: &str, module_code: &str) -> Result<Eligibility, AccessError> {
        let registry = self.registry.current();
        let activation = self.tenant_activation(tenant_id).await?;
        Ok(explain(
            &registry,
            activation.plan,
            &activation.active_module_codes,
            module_code,
        ))
    }

    /// 丢弃单个租户的缓存条目（开通或套餐变化后调用）。
    pub async fn invalidate_tenant(&self, tenant_id: &str) {
        if let Some(cache) = &self.cache
            && cache.invalidate(tenant_id).await
        {
            tracing::debug!(tenant_id = %tenant_id, "Eligibility cache entry invalidated");
        }
    }

    /// 清空缓存（例如注册表热替换后）。
    pub async fn invalidate_all(&self) {
        if let Some(cache) = &self.cache {
            cache.clear().await;
            tracing::debug!("Eligibility cache cleared");
        }
    }

    /// 读取租户开通记录；不存在时返回 `UnknownTenant`。
    pub async fn tenant_activation(&self, tenant_id: &str) -> Result<TenantActivation, AccessError> {
        self.tenants
            .find_activation(tenant_id)
            .await?
            .ok_or_else(|| AccessError::UnknownTenant(tenant_id.to_string()))
    }

    async fn user_context(
        &self,
        activation: &TenantActivation,
        user_id: &str,
    ) -> Result<TenantContext, AccessError> {
        let tenant_id = activation.tenant_id.as_str();
        let roles = self.grants.list_user_roles(tenant_id, user_id).await?;
        let keys = self.grants.effective_grants(tenant_id, user_id).await?;
        Ok(TenantContext::from_activation(activation, user_id)
            .with_roles(roles)
            .with_grants(keys))
    }

    async fn resolve(&self, tenant_id: &str, user_id: &str) -> Result<Resolved, AccessError> {
        let registry = self.registry.current();
        let activation = self.tenant_activation(tenant_id).await?;
        let ctx = self.user_context(&activation, user_id).await?;
        let eligible = self.eligible_for(&registry, &activation).await;
        Ok(Resolved {
            registry,
            ctx,
            eligible,
        })
    }

    async fn eligible_for(&self, registry: &Registry, activation: &TenantActivation) -> BTreeSet<String> {
        let Some(cache) = &self.cache else {
            return eligible_modules(registry, activation.plan, &activation.active_module_codes);
        };
        if let Some(eligible) = cache.get(registry.revision(), activation).await {
            navgate_telemetry::record_eligibility_cache_hit();
            return eligible;
        }
        navgate_telemetry::record_eligibility_cache_miss();
        let eligible = eligible_modules(registry, activation.plan, &activation.active_module_codes);
        cache
            .insert(registry.revision(), activation, eligible.clone())
            .await;
        eligible
    }
}

/// 访问门面 trait，便于替换实现与测试。
#[async_trait]
pub trait AccessGate: Send + Sync {
    async fn context(&self, tenant_id: &str, user_id: &str) -> Result<TenantContext, AccessError>;
    async fn eligible_modules(&self, tenant_id: &str) -> Result<BTreeSet<String>, AccessError>;
    async fn authorize(
        &self,
        tenant_id: &str,
        user_id: &str,
        permission: &str,
    ) -> Result<Decision, AccessError>;
    async fn menu(&self, tenant_id: &str, user_id: &str) -> Result<Vec<ModuleView>, AccessError>;
    async fn invalidate_tenant(&self, tenant_id: &str);
    async fn invalidate_all(&self);
}

#[async_trait]
impl AccessGate for AccessService {
    async fn context(&self, tenant_id: &str, user_id: &str) -> Result<TenantContext, AccessError> {
        self.context(tenant_id, user_id).await
    }

    async fn eligible_modules(&self, tenant_id: &str) -> Result<BTreeSet<String>, AccessError> {
        self.eligible_modules(tenant_id).await
    }

    async fn authorize(
        &self,
        tenant_id: &str,
        user_id: &str,
        permission: &str,
    ) -> Result<Decision, AccessError> {
        self.authorize(tenant_id, user_id, permission).await
    }

    async fn menu(&self, tenant_id: &str, user_id: &str) -> Result<Vec<ModuleView>, AccessError> {
        self.menu(tenant_id, user_id).await
    }

    async fn invalidate_tenant(&self, tenant_id: &str) {
        self.invalidate_tenant(tenant_id).await
    }

    async fn invalidate_all(&self) {
        self.invalidate_all().await
    }
}
