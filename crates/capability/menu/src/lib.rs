//! 有效菜单投影：只保留当前上下文被放行的动作。
//!
//! 剪枝自下而上：没有放行动作的组件、没有组件的子模块、没有子模块的模块
//! 都不会出现在结果中。各层顺序沿用注册表的 priority 顺序。

use domain::{ComponentKind, ComponentNode, ModuleNode, PermissionKey, SubmoduleNode, TenantContext};
use navgate_authz::Authorizer;
use navgate_registry::Registry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionView {
    pub code: String,
    pub name: String,
    pub key: PermissionKey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentView {
    pub code: String,
    pub name: String,
    pub kind: ComponentKind,
    pub route: Option<String>,
    pub actions: Vec<ActionView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmoduleView {
    pub code: String,
    pub name: String,
    pub icon: Option<String>,
    pub components: Vec<ComponentView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleView {
    pub code: String,
    pub name: String,
    pub icon: Option<String>,
    pub route_prefix: Option<String>,
    pub priority: i32,
    pub submodules: Vec<SubmoduleView>,
}

impl ModuleView {
    /// 视图中全部动作的权限键（树序）。
    pub fn keys(&self) -> impl Iterator<Item = &PermissionKey> + '_ {
        self.submodules
            .iter()
            .flat_map(|submodule| submodule.components.iter())
            .flat_map(|component| component.actions.iter())
            .map(|action| &action.key)
    }
}

/// 计算上下文的完整有效菜单。
pub fn project(registry: &Registry, ctx: &TenantContext) -> Vec<ModuleView> {
    project_with(&Authorizer::new(registry, ctx))
}

/// 复用已构造的判定器投影菜单。
pub fn project_with(authorizer: &Authorizer<'_>) -> Vec<ModuleView> {
    let ctx = authorizer.context();
    let menu: Vec<ModuleView> = authorizer
        .registry()
        .modules()
        .iter()
        .filter(|module| authorizer.eligible_modules().contains(&module.code))
        .filter_map(|module| module_view(authorizer, module))
        .collect();

    navgate_telemetry::record_menu_projected();
    tracing::debug!(
        tenant_id = %ctx.tenant_id,
        user_id = %ctx.user_id,
        modules = menu.len(),
        "Projected effective menu"
    );
    menu
}

/// 只投影单个模块；模块不可用或被完全剪枝时返回 `None`。
pub fn project_module(registry: &Registry, ctx: &TenantContext, code: &str) -> Option<ModuleView> {
    let module = registry.module(code)?;
    let authorizer = Authorizer::new(registry, ctx);
    if !authorizer.eligible_modules().contains(code) {
        return None;
    }
    module_view(&authorizer, module)
}

fn module_view(authorizer: &Authorizer<'_>, module: &ModuleNode) -> Option<ModuleView> {
    let submodules: Vec<SubmoduleView> = module
        .submodules
        .iter()
        .filter_map(|submodule| submodule_view(authorizer, module, submodule))
        .collect();
    if submodules.is_empty() {
        return None;
    }
    Some(ModuleView {
        code: module.code.clone(),
        name: module.name.clone(),
        icon: module.icon.clone(),
        route_prefix: module.route_prefix.clone(),
        priority: module.priority,
        submodules,
    })
}

fn submodule_view(
    authorizer: &Authorizer<'_>,
    module: &ModuleNode,
    submodule: &SubmoduleNode,
) -> Option<SubmoduleView> {
    let components: Vec<ComponentView> = submodule
        .components
        .iter()
        .filter_map(|component| component_view(authorizer, module, submodule, component))
        .collect();
    if components.is_empty() {
        return None;
    }
    Some(SubmoduleView {
        code: submodule.code.clone(),
        name: submodule.name.clone(),
        icon: submodule.icon.clone(),
        components,
    })
}

fn component_view(
    authorizer: &Authorizer<'_>,
    module: &ModuleNode,
    submodule: &SubmoduleNode,
    component: &ComponentNode,
) -> Option<ComponentView> {
    let actions: Vec<ActionView> = component
        .actions
        .iter()
        .filter_map(|action| {
            let key =
                PermissionKey::new(&module.code, &submodule.code, &component.code, &action.code)
                    .ok()?;
            authorizer.permits(&key).then(|| ActionView {
                code: action.code.clone(),
                name: action.name.clone(),
                key,
            })
        })
        .collect();
    if actions.is_empty() {
        return None;
    }
    Some(ComponentView {
        code: component.code.clone(),
        name: component.name.clone(),
        kind: component.kind,
        route: component.route.clone(),
        actions,
    })
}
