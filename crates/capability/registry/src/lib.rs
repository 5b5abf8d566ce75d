//! # 模块注册表
//!
//! 把静态的 模块 → 子模块 → 组件 → 动作 配置树加载为带索引的不可变 `Registry`：
//!
//! - [`raw`]：外部 JSON 形态
//! - [`loader`]：结构校验（编码唯一、依赖可解析、无依赖环）与拓扑排序
//! - [`index`]：权限键存在性与按模块的反向索引
//! - [`handle`]：基于 `arc-swap` 的整体热替换
//!
//! 加载失败是启动期致命错误，宿主应直接退出。

pub mod error;
pub mod handle;
pub mod index;
pub mod loader;
pub mod raw;
pub mod registry;

pub use error::RegistryError;
pub use handle::RegistryHandle;
pub use index::PermissionIndex;
pub use loader::{load, load_from_path, load_from_str};
pub use raw::{RawAction, RawComponent, RawModule, RawRegistry, RawSubmodule};
pub use registry::Registry;
