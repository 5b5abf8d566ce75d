//! 权限索引：加载时构建，之后只读。

use domain::{ModuleNode, PermissionKey};
use std::collections::{BTreeSet, HashMap, HashSet};

/// 权限键存在性与按模块的反向索引。
#[derive(Debug, Default)]
pub struct PermissionIndex {
    keys: HashSet<String>,
    by_module: HashMap<String, BTreeSet<PermissionKey>>,
}

impl PermissionIndex {
    pub(crate) fn build(modules: &[ModuleNode]) -> Self {
        let mut index = Self::default();
        for module in modules {
            let keys: BTreeSet<PermissionKey> = module.permission_keys().collect();
            index.keys.extend(keys.iter().map(ToString::to_string));
            index.by_module.insert(module.code.clone(), keys);
        }
        index
    }

    /// 点分字符串是否为已登记的权限键；未知键返回 false。
    pub fn exists(&self, raw: &str) -> bool {
        self.keys.contains(raw)
    }

    pub fn contains(&self, key: &PermissionKey) -> bool {
        self.by_module
            .get(key.module())
            .is_some_and(|keys| keys.contains(key))
    }

    /// 模块下的全部权限键；未知模块返回空集。
    pub fn keys_under(&self, module_code: &str) -> BTreeSet<PermissionKey> {
        self.by_module
            .get(module_code)
            .cloned()
            .unwrap_or_default()
    }

    /// 同 `keys_under`，但不复制。
    pub fn iter_under<'a>(
        &'a self,
        module_code: &str,
    ) -> impl Iterator<Item = &'a PermissionKey> + use<'a> {
        self.by_module.get(module_code).into_iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
