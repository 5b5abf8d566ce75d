//! 授权判定引擎。
//!
//! 判定顺序（首个失败即返回）：
//! 1. 请求的模块段不在租户可用模块集合中 → `module_ineligible`
//! 2. 权限键不在注册表中 → `unknown_permission`
//! 3. 权限键不在用户授权集合中 → `not_granted`
//! 4. 放行
//!
//! 可用性先于授权检查：指向已停用模块的陈旧授权一律失败关闭。
//! 拒绝是返回值而非错误；引擎不做任何 I/O。

use domain::{Decision, DenyReason, PermissionKey, TenantContext, module_segment};
use navgate_registry::Registry;
use navgate_resolver::eligible_modules;
use std::collections::BTreeSet;

/// 绑定注册表与上下文的判定器。
///
/// 可用模块集合只在构造时计算一次，批量判定与菜单投影共享。
#[derive(Debug)]
pub struct Authorizer<'a> {
    registry: &'a Registry,
    ctx: &'a TenantContext,
    eligible: BTreeSet<String>,
}

impl<'a> Authorizer<'a> {
    pub fn new(registry: &'a Registry, ctx: &'a TenantContext) -> Self {
        let eligible = eligible_modules(registry, ctx.plan, &ctx.active_modules);
        Self::with_eligible(registry, ctx, eligible)
    }

    /// 使用调用方已计算（例如缓存）的可用模块集合。
    pub fn with_eligible(
        registry: &'a Registry,
        ctx: &'a TenantContext,
        eligible: BTreeSet<String>,
    ) -> Self {
        Self {
            registry,
            ctx,
            eligible,
        }
    }

    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    pub fn context(&self) -> &'a TenantContext {
        self.ctx
    }

    pub fn eligible_modules(&self) -> &BTreeSet<String> {
        &self.eligible
    }

    /// 判定点分字符串形式的请求。
    pub fn authorize(&self, request: &str) -> Decision {
        if !self.eligible.contains(module_segment(request)) {
            return self.deny(request, DenyReason::ModuleIneligible);
        }
        if !self.registry.permission_key_exists(request) {
            return self.deny(request, DenyReason::UnknownPermission);
        }
        match PermissionKey::parse(request) {
            Ok(key) => self.check_grant(&key),
            Err(_) => self.deny(request, DenyReason::UnknownPermission),
        }
    }

    /// 判定已解析的权限键。
    pub fn authorize_key(&self, key: &PermissionKey) -> Decision {
        if !self.eligible.contains(key.module()) {
            return self.deny(&key.to_string(), DenyReason::ModuleIneligible);
        }
        if !self.registry.permission_index().contains(key) {
            return self.deny(&key.to_string(), DenyReason::UnknownPermission);
        }
        self.check_grant(key)
    }

    /// 与 [`Authorizer::authorize_key`] 同样的判定，但不计数也不写日志。
    ///
    /// 供菜单投影等批量枚举使用，判定计数与拒绝日志只反映真实的访问检查。
    pub fn permits(&self, key: &PermissionKey) -> bool {
        self.eligible.contains(key.module())
            && self.registry.permission_index().contains(key)
            && self.ctx.is_granted(key)
    }

    pub fn is_allowed(&self, request: &str) -> bool {
        self.authorize(request).is_allowed()
    }

    /// 上下文可以使用的全部权限键（模块菜单顺序，模块内按键排序）。
    pub fn allowed_keys(&self) -> Vec<PermissionKey> {
        let index = self.registry.permission_index();
        self.registry
            .modules()
            .iter()
            .filter(|module| self.eligible.contains(&module.code))
            .flat_map(|module| index.iter_under(&module.code))
            .filter(|key| self.ctx.is_granted(key))
            .cloned()
            .collect()
    }

    fn check_grant(&self, key: &PermissionKey) -> Decision {
        if !self.ctx.is_granted(key) {
            return self.deny(&key.to_string(), DenyReason::NotGranted);
        }
        navgate_telemetry::record_allowed();
        Decision::Allow
    }

    fn deny(&self, request: &str, reason: DenyReason) -> Decision {
        match reason {
            DenyReason::ModuleIneligible => {
                navgate_telemetry::record_denied_module_ineligible();
                tracing::debug!(
                    tenant_id = %self.ctx.tenant_id,
                    user_id = %self.ctx.user_id,
                    plan = %self.ctx.plan,
                    permission = %request,
                    reason = reason.as_str(),
                    "Access denied"
                );
            }
            DenyReason::UnknownPermission => {
                navgate_telemetry::record_denied_unknown_permission();
                tracing::warn!(
                    tenant_id = %self.ctx.tenant_id,
                    user_id = %self.ctx.user_id,
                    permission = %request,
                    reason = reason.as_str(),
                    "Unknown permission requested"
                );
            }
            DenyReason::NotGranted => {
                navgate_telemetry::record_denied_not_granted();
                tracing::debug!(
                    tenant_id = %self.ctx.tenant_id,
                    user_id = %self.ctx.user_id,
                    permission = %request,
                    reason = reason.as_str(),
                    "Access denied"
                );
            }
        }
        Decision::Deny(reason)
    }
}

/// 单次判定。批量判定请复用 [`Authorizer`]。
pub fn authorize(registry: &Registry, ctx: &TenantContext, request: &str) -> Decision {
    Authorizer::new(registry, ctx).authorize(request)
}
