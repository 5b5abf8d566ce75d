//! 注册表热替换句柄。

use crate::error::RegistryError;
use crate::loader::load_from_path;
use crate::registry::Registry;
use arc_swap::ArcSwap;
use std::path::Path;
use std::sync::Arc;

/// 持有当前生效的注册表。
///
/// 读者拿到的是整棵树的 `Arc` 快照；替换只交换指针，不修改已发布的树。
pub struct RegistryHandle {
    current: ArcSwap<Registry>,
}

impl RegistryHandle {
    pub fn new(registry: Registry) -> Self {
        Self {
            current: ArcSwap::from_pointee(registry),
        }
    }

    /// 当前注册表快照。
    pub fn current(&self) -> Arc<Registry> {
        self.current.load_full()
    }

    /// 原子替换为新注册表，返回旧快照。
    pub fn replace(&self, registry: Registry) -> Arc<Registry> {
        let next = Arc::new(registry);
        let revision = next.revision();
        let previous = self.current.swap(next);
        navgate_telemetry::record_registry_swap();
        tracing::info!(
            previous = %previous.revision(),
            revision = %revision,
            "Swapped module registry"
        );
        previous
    }

    /// 重新加载文件；失败时保留当前注册表不变。
    pub fn reload_from_path(&self, path: &Path) -> Result<Arc<Registry>, RegistryError> {
        let registry = match load_from_path(path) {
            Ok(registry) => registry,
            Err(err) => {
                tracing::error!(path = %path.display(), error = %err, "Registry reload rejected");
                return Err(err);
            }
        };
        self.replace(registry);
        Ok(self.current())
    }
}

impl std::fmt::Debug for RegistryHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryHandle")
            .field("revision", &self.current.load().revision())
            .finish()
    }
}
