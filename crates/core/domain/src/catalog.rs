//! 模块目录树：模块 → 子模块 → 组件 → 动作。
//!
//! 名称、图标、描述、路由等文本字段对引擎不透明，仅原样透传给菜单投影。

use crate::permission::PermissionKey;
use crate::plan::PlanTier;
use std::fmt;
use std::str::FromStr;

/// 模块授权方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LicenseType {
    #[default]
    Standard,
    Addon,
}

impl LicenseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LicenseType::Standard => "standard",
            LicenseType::Addon => "addon",
        }
    }
}

impl FromStr for LicenseType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(LicenseType::Standard),
            "addon" => Ok(LicenseType::Addon),
            _ => Err(value.to_string()),
        }
    }
}

/// 组件形态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ComponentKind {
    #[default]
    Page,
    Section,
    Widget,
}

impl ComponentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Page => "page",
            ComponentKind::Section => "section",
            ComponentKind::Widget => "widget",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "page" => Ok(ComponentKind::Page),
            "section" => Ok(ComponentKind::Section),
            "widget" => Ok(ComponentKind::Widget),
            _ => Err(value.to_string()),
        }
    }
}

/// 组件上的最细粒度操作（view/create/approve 等）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionDescriptor {
    pub code: String,
    pub name: String,
}

/// 页面、区块或小部件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentNode {
    pub code: String,
    pub name: String,
    pub kind: ComponentKind,
    pub route: Option<String>,
    pub actions: Vec<ActionDescriptor>,
}

/// 模块下的二级分组。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmoduleNode {
    pub code: String,
    pub name: String,
    pub priority: i32,
    pub icon: Option<String>,
    pub components: Vec<ComponentNode>,
}

/// 顶层功能模块。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleNode {
    pub code: String,
    pub name: String,
    pub priority: i32,
    pub is_core: bool,
    pub min_plan: PlanTier,
    pub license_type: LicenseType,
    /// 依赖模块编码，保持声明顺序且已去重。
    pub dependencies: Vec<String>,
    pub icon: Option<String>,
    pub description: Option<String>,
    pub route_prefix: Option<String>,
    pub submodules: Vec<SubmoduleNode>,
}

impl ModuleNode {
    /// 按树序枚举本模块下全部权限键。
    pub fn permission_keys(&self) -> impl Iterator<Item = PermissionKey> + '_ {
        self.submodules.iter().flat_map(move |submodule| {
            submodule.components.iter().flat_map(move |component| {
                component.actions.iter().filter_map(move |action| {
                    PermissionKey::new(
                        self.code.as_str(),
                        submodule.code.as_str(),
                        component.code.as_str(),
                        action.code.as_str(),
                    )
                    .ok()
                })
            })
        })
    }
}
