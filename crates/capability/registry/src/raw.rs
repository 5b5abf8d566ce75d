//! 注册表的外部 JSON 形态（未校验）。
//!
//! 文本字段原样保留；枚举类字段以字符串读入，由 loader 转换并报告具体路径。

use serde::{Deserialize, Serialize};

fn default_min_plan() -> String {
    "basic".to_string()
}

fn default_license_type() -> String {
    "standard".to_string()
}

fn default_component_kind() -> String {
    "page".to_string()
}

/// 注册表文档根。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRegistry {
    #[serde(default)]
    pub modules: Vec<RawModule>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawModule {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub is_core: bool,
    #[serde(default = "default_min_plan")]
    pub min_plan: String,
    #[serde(default = "default_license_type")]
    pub license_type: String,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_prefix: Option<String>,
    #[serde(default)]
    pub submodules: Vec<RawSubmodule>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSubmodule {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub priority: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub components: Vec<RawComponent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawComponent {
    pub code: String,
    pub name: String,
    #[serde(rename = "type", default = "default_component_kind")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    #[serde(default)]
    pub actions: Vec<RawAction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawAction {
    pub code: String,
    #[serde(default)]
    pub name: String,
}
