//! 追踪、请求 ID 与授权判定计数。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 请求级追踪标识。
#[derive(Debug, Clone)]
pub struct RequestIds {
    pub request_id: String,
    pub trace_id: String,
}

/// 计数器快照。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub decisions_allowed: u64,
    pub denied_module_ineligible: u64,
    pub denied_unknown_permission: u64,
    pub denied_not_granted: u64,
    pub menus_projected: u64,
    pub registry_loads: u64,
    pub registry_swaps: u64,
    pub eligibility_cache_hits: u64,
    pub eligibility_cache_misses: u64,
}

impl MetricsSnapshot {
    /// 全部拒绝次数。
    pub fn decisions_denied(&self) -> u64 {
        self.denied_module_ineligible + self.denied_unknown_permission + self.denied_not_granted
    }
}

/// 进程级计数器。
pub struct TelemetryMetrics {
    decisions_allowed: AtomicU64,
    denied_module_ineligible: AtomicU64,
    denied_unknown_permission: AtomicU64,
    denied_not_granted: AtomicU64,
    menus_projected: AtomicU64,
    registry_loads: AtomicU64,
    registry_swaps: AtomicU64,
    eligibility_cache_hits: AtomicU64,
    eligibility_cache_misses: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self {
            decisions_allowed: AtomicU64::new(0),
            denied_module_ineligible: AtomicU64::new(0),
            denied_unknown_permission: AtomicU64::new(0),
            denied_not_granted: AtomicU64::new(0),
            menus_projected: AtomicU64::new(0),
            registry_loads: AtomicU64::new(0),
            registry_swaps: AtomicU64::new(0),
            eligibility_cache_hits: AtomicU64::new(0),
            eligibility_cache_misses: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            decisions_allowed: self.decisions_allowed.load(Ordering::Relaxed),
            denied_module_ineligible: self.denied_module_ineligible.load(Ordering::Relaxed),
            denied_unknown_permission: self.denied_unknown_permission.load(Ordering::Relaxed),
            denied_not_granted: self.denied_not_granted.load(Ordering::Relaxed),
            menus_projected: self.menus_projected.load(Ordering::Relaxed),
            registry_loads: self.registry_loads.load(Ordering::Relaxed),
            registry_swaps: self.registry_swaps.load(Ordering::Relaxed),
            eligibility_cache_hits: self.eligibility_cache_hits.load(Ordering::Relaxed),
            eligibility_cache_misses: self.eligibility_cache_misses.load(Ordering::Relaxed),
        }
    }
}

impl Default for TelemetryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局指标实例。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing（默认 info）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if fmt().with_env_filter(filter).try_init().is_ok() {
        tracing::debug!("Tracing subscriber installed");
    }
}

/// 生成新的 request_id 与 trace_id。
pub fn new_request_ids() -> RequestIds {
    RequestIds {
        request_id: uuid::Uuid::new_v4().to_string(),
        trace_id: uuid::Uuid::new_v4().to_string(),
    }
}

/// 记录放行次数。
pub fn record_allowed() {
    metrics().decisions_allowed.fetch_add(1, Ordering::Relaxed);
}

/// 记录因模块不可用而拒绝的次数。
pub fn record_denied_module_ineligible() {
    metrics()
        .denied_module_ineligible
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录因权限键不存在而拒绝的次数。
pub fn record_denied_unknown_permission() {
    metrics()
        .denied_unknown_permission
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录因未授权而拒绝的次数。
pub fn record_denied_not_granted() {
    metrics().denied_not_granted.fetch_add(1, Ordering::Relaxed);
}

/// 记录菜单投影次数。
pub fn record_menu_projected() {
    metrics().menus_projected.fetch_add(1, Ordering::Relaxed);
}

/// 记录注册表加载成功次数。
pub fn record_registry_load() {
    metrics().registry_loads.fetch_add(1, Ordering::Relaxed);
}

/// 记录注册表热替换次数。
pub fn record_registry_swap() {
    metrics().registry_swaps.fetch_add(1, Ordering::Relaxed);
}

/// 记录资格缓存命中。
pub fn record_eligibility_cache_hit() {
    metrics()
        .eligibility_cache_hits
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录资格缓存未命中。
pub fn record_eligibility_cache_miss() {
    metrics()
        .eligibility_cache_misses
        .fetch_add(1, Ordering::Relaxed);
}
