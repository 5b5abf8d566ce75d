use crate::index::PermissionIndex;
use domain::{ModuleNode, PermissionKey};
use std::collections::{BTreeSet, HashMap};
use uuid::Uuid;

/// 已校验的模块注册表。
///
/// 构造后不可变；热加载通过整体替换实现（见 `RegistryHandle`），
/// 因此可被任意数量的线程无锁并发读取。
#[derive(Debug)]
pub struct Registry {
    /// 按 priority 升序（同值保持声明顺序）。
    modules: Vec<ModuleNode>,
    by_code: HashMap<String, usize>,
    /// 拓扑序：依赖在前。
    activation_order: Vec<usize>,
    index: PermissionIndex,
    revision: Uuid,
}

impl Registry {
    pub(crate) fn new(
        modules: Vec<ModuleNode>,
        activation_order: Vec<String>,
        revision: Uuid,
    ) -> Self {
        let by_code: HashMap<String, usize> = modules
            .iter()
            .enumerate()
            .map(|(position, module)| (module.code.clone(), position))
            .collect();
        let activation_order = activation_order
            .iter()
            .filter_map(|code| by_code.get(code).copied())
            .collect();
        let index = PermissionIndex::build(&modules);
        Self {
            modules,
            by_code,
            activation_order,
            index,
            revision,
        }
    }

    /// 全部模块（菜单顺序）。
    pub fn modules(&self) -> &[ModuleNode] {
        &self.modules
    }

    pub fn module(&self, code: &str) -> Option<&ModuleNode> {
        self.by_code.get(code).map(|position| &self.modules[*position])
    }

    pub fn contains_module(&self, code: &str) -> bool {
        self.by_code.contains_key(code)
    }

    /// 按拓扑序（依赖在前）遍历模块。
    pub fn activation_order(&self) -> impl Iterator<Item = &ModuleNode> + '_ {
        self.activation_order
            .iter()
            .map(|position| &self.modules[*position])
    }

    pub fn permission_index(&self) -> &PermissionIndex {
        &self.index
    }

    pub fn permission_key_exists(&self, raw: &str) -> bool {
        self.index.exists(raw)
    }

    pub fn keys_under(&self, module_code: &str) -> BTreeSet<PermissionKey> {
        self.index.keys_under(module_code)
    }

    /// 内容指纹：相同文档总得到相同 revision，可作为缓存键。
    pub fn revision(&self) -> Uuid {
        self.revision
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    pub fn permission_count(&self) -> usize {
        self.index.len()
    }
}
