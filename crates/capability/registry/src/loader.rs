use crate::error::RegistryError;
use crate::raw::{RawComponent, RawModule, RawRegistry, RawSubmodule};
use crate::registry::Registry;
use domain::{
    ActionDescriptor, ComponentKind, ComponentNode, LicenseType, ModuleNode, PlanTier,
    SubmoduleNode, validate_code,
};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;
use uuid::Uuid;

/// 从 JSON 文件加载注册表。
pub fn load_from_path(path: &Path) -> Result<Registry, RegistryError> {
    let contents = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_from_str(&contents)
}

/// 从 JSON 文本加载注册表。
pub fn load_from_str(json: &str) -> Result<Registry, RegistryError> {
    let raw: RawRegistry = serde_json::from_str(json)?;
    load(raw)
}

/// 校验原始树并构建不可变注册表。
///
/// 校验顺序：编码格式与同级唯一性、套餐/类型取值、依赖引用、依赖环。
pub fn load(raw: RawRegistry) -> Result<Registry, RegistryError> {
    let revision = Uuid::new_v5(&Uuid::NAMESPACE_OID, &serde_json::to_vec(&raw)?);

    let mut seen = HashSet::new();
    let mut modules = Vec::with_capacity(raw.modules.len());
    for raw_module in raw.modules {
        let module = convert_module(raw_module)?;
        if !seen.insert(module.code.clone()) {
            return Err(RegistryError::DuplicateModule(module.code));
        }
        modules.push(module);
    }

    check_dependencies(&modules)?;
    let activation_order = topological_order(&modules)?;
    modules.sort_by_key(|module| module.priority);

    let registry = Registry::new(modules, activation_order, revision);
    navgate_telemetry::record_registry_load();
    tracing::info!(
        modules = registry.module_count(),
        permissions = registry.permission_count(),
        revision = %registry.revision(),
        "Loaded module registry"
    );
    Ok(registry)
}

fn check_code(path: &str, code: &str) -> Result<(), RegistryError> {
    validate_code(code).map_err(|source| RegistryError::InvalidCode {
        path: path.to_string(),
        source,
    })
}

fn convert_module(raw: RawModule) -> Result<ModuleNode, RegistryError> {
    check_code(&raw.code, &raw.code)?;
    let min_plan = raw
        .min_plan
        .parse::<PlanTier>()
        .map_err(|_| RegistryError::InvalidPlan {
            module: raw.code.clone(),
            value: raw.min_plan.clone(),
        })?;
    let license_type = raw
        .license_type
        .parse::<LicenseType>()
        .map_err(|value| RegistryError::InvalidAttribute {
            path: raw.code.clone(),
            field: "license_type",
            value,
        })?;

    let mut dependencies: Vec<String> = Vec::with_capacity(raw.dependencies.len());
    for dependency in raw.dependencies {
        check_code(&format!("{}.dependencies", raw.code), &dependency)?;
        if dependency == raw.code {
            return Err(RegistryError::SelfDependency(raw.code));
        }
        if !dependencies.contains(&dependency) {
            dependencies.push(dependency);
        }
    }

    let mut seen = HashSet::new();
    let mut submodules = Vec::with_capacity(raw.submodules.len());
    for raw_submodule in raw.submodules {
        let submodule = convert_submodule(&raw.code, raw_submodule)?;
        if !seen.insert(submodule.code.clone()) {
            return Err(RegistryError::DuplicateSubmodule {
                module: raw.code,
                submodule: submodule.code,
            });
        }
        submodules.push(submodule);
    }
    submodules.sort_by_key(|submodule| submodule.priority);

    Ok(ModuleNode {
        code: raw.code,
        name: raw.name,
        priority: raw.priority,
        is_core: raw.is_core,
        min_plan,
        license_type,
        dependencies,
        icon: raw.icon,
        description: raw.description,
        route_prefix: raw.route_prefix,
        submodules,
    })
}

fn convert_submodule(module_code: &str, raw: RawSubmodule) -> Result<SubmoduleNode, RegistryError> {
    let path = format!("{module_code}.{}", raw.code);
    check_code(&path, &raw.code)?;

    let mut seen = HashSet::new();
    let mut components = Vec::with_capacity(raw.components.len());
    for raw_component in raw.components {
        let component = convert_component(&path, raw_component)?;
        if !seen.insert(component.code.clone()) {
            return Err(RegistryError::DuplicateComponent {
                parent: path,
                component: component.code,
            });
        }
        components.push(component);
    }

    Ok(SubmoduleNode {
        code: raw.code,
        name: raw.name,
        priority: raw.priority,
        icon: raw.icon,
        components,
    })
}

fn convert_component(parent: &str, raw: RawComponent) -> Result<ComponentNode, RegistryError> {
    let path = format!("{parent}.{}", raw.code);
    check_code(&path, &raw.code)?;
    let kind = raw
        .kind
        .parse::<ComponentKind>()
        .map_err(|value| RegistryError::InvalidAttribute {
            path: path.clone(),
            field: "type",
            value,
        })?;

    let mut actions: Vec<ActionDescriptor> = Vec::with_capacity(raw.actions.len());
    for raw_action in raw.actions {
        check_code(&format!("{path}.{}", raw_action.code), &raw_action.code)?;
        if actions.iter().any(|action| action.code == raw_action.code) {
            return Err(RegistryError::DuplicateAction {
                parent: path,
                action: raw_action.code,
            });
        }
        let name = if raw_action.name.is_empty() {
            raw_action.code.clone()
        } else {
            raw_action.name
        };
        actions.push(ActionDescriptor {
            code: raw_action.code,
            name,
        });
    }

    Ok(ComponentNode {
        code: raw.code,
        name: raw.name,
        kind,
        route: raw.route,
        actions,
    })
}

fn check_dependencies(modules: &[ModuleNode]) -> Result<(), RegistryError> {
    let codes: HashSet<&str> = modules.iter().map(|module| module.code.as_str()).collect();
    for module in modules {
        if let Some(dependency) = module
            .dependencies
            .iter()
            .find(|dependency| !codes.contains(dependency.as_str()))
        {
            return Err(RegistryError::DanglingDependency {
                module: module.code.clone(),
                dependency: dependency.clone(),
            });
        }
    }
    Ok(())
}

/// Kahn 拓扑排序；就绪集合按声明位置出队，结果确定。
fn topological_order(modules: &[ModuleNode]) -> Result<Vec<String>, RegistryError> {
    let position: HashMap<&str, usize> = modules
        .iter()
        .enumerate()
        .map(|(at, module)| (module.code.as_str(), at))
        .collect();

    let mut pending: Vec<usize> = modules
        .iter()
        .map(|module| module.dependencies.len())
        .collect();
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); modules.len()];
    for (at, module) in modules.iter().enumerate() {
        for dependency in &module.dependencies {
            if let Some(&from) = position.get(dependency.as_str()) {
                dependents[from].push(at);
            }
        }
    }

    let mut ready: BTreeSet<usize> = pending
        .iter()
        .enumerate()
        .filter(|(_, count)| **count == 0)
        .map(|(at, _)| at)
        .collect();
    let mut emitted = vec![false; modules.len()];
    let mut order = Vec::with_capacity(modules.len());
    while let Some(next) = ready.pop_first() {
        emitted[next] = true;
        order.push(modules[next].code.clone());
        for &dependent in &dependents[next] {
            pending[dependent] -= 1;
            if pending[dependent] == 0 {
                ready.insert(dependent);
            }
        }
    }

    if order.len() < modules.len() {
        return Err(RegistryError::DependencyCycle(find_cycle(
            modules, &position, &emitted,
        )));
    }
    Ok(order)
}

/// 在未出队的模块中沿依赖边行走，直到回到路径上的某个模块。
///
/// 未出队模块必有未出队的依赖，所以行走总能继续。
fn find_cycle(
    modules: &[ModuleNode],
    position: &HashMap<&str, usize>,
    emitted: &[bool],
) -> Vec<String> {
    let Some(start) = emitted.iter().position(|done| !done) else {
        return Vec::new();
    };

    let mut path: Vec<usize> = Vec::new();
    let mut current = start;
    loop {
        if let Some(at) = path.iter().position(|&visited| visited == current) {
            let mut cycle: Vec<String> = path[at..]
                .iter()
                .map(|&member| modules[member].code.clone())
                .collect();
            cycle.push(modules[current].code.clone());
            return cycle;
        }
        path.push(current);
        let next = modules[current]
            .dependencies
            .iter()
            .filter_map(|dependency| position.get(dependency.as_str()).copied())
            .find(|&candidate| !emitted[candidate]);
        match next {
            Some(next) => current = next,
            None => {
                return path
                    .iter()
                    .map(|&member| modules[member].code.clone())
                    .collect();
            }
        }
    }
}
