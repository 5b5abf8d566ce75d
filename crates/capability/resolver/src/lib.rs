//! 套餐与依赖解析：租户可以使用哪些模块。
//!
//! 模块可用当且仅当：
//! 1. 租户套餐不低于模块 `min_plan`；
//! 2. 模块为核心模块，或已被租户显式开通；
//! 3. 全部依赖模块本身可用（传递生效）。
//!
//! 依赖按注册表预先计算的拓扑序求值，每个模块只访问一次；依赖环在加载期已被拒绝。

use domain::PlanTier;
use navgate_registry::Registry;
use std::collections::{BTreeSet, HashSet};

/// 单个模块的可用性说明（供升级/开通提示使用）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility {
    Eligible,
    UnknownModule,
    PlanTooLow { required: PlanTier },
    NotActivated,
    /// 第一个不可用的依赖（按声明顺序）。
    DependencyUnmet { dependency: String },
}

impl Eligibility {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Eligibility::Eligible)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Eligibility::Eligible => "eligible",
            Eligibility::UnknownModule => "unknown_module",
            Eligibility::PlanTooLow { .. } => "plan_too_low",
            Eligibility::NotActivated => "not_activated",
            Eligibility::DependencyUnmet { .. } => "dependency_unmet",
        }
    }
}

/// 计算租户可用模块集合。
///
/// 不在注册表中的开通编码被忽略。纯函数，可按 (plan, 开通集合) 缓存。
pub fn eligible_modules(
    registry: &Registry,
    plan: PlanTier,
    activated: &BTreeSet<String>,
) -> BTreeSet<String> {
    let mut eligible = BTreeSet::new();
    for module in registry.activation_order() {
        let selected = module.is_core || activated.contains(&module.code);
        if !selected || !plan.satisfies(module.min_plan) {
            continue;
        }
        if module
            .dependencies
            .iter()
            .all(|dependency| eligible.contains(dependency))
        {
            eligible.insert(module.code.clone());
        }
    }
    eligible
}

/// 解释单个模块为何可用或不可用。
///
/// 判定顺序与 `eligible_modules` 一致：套餐、开通、依赖。
pub fn explain(
    registry: &Registry,
    plan: PlanTier,
    activated: &BTreeSet<String>,
    code: &str,
) -> Eligibility {
    let Some(module) = registry.module(code) else {
        return Eligibility::UnknownModule;
    };
    if !plan.satisfies(module.min_plan) {
        return Eligibility::PlanTooLow {
            required: module.min_plan,
        };
    }
    if !module.is_core && !activated.contains(code) {
        return Eligibility::NotActivated;
    }
    let eligible = eligible_modules(registry, plan, activated);
    match module
        .dependencies
        .iter()
        .find(|dependency| !eligible.contains(*dependency))
    {
        Some(dependency) => Eligibility::DependencyUnmet {
            dependency: dependency.clone(),
        },
        None => Eligibility::Eligible,
    }
}

/// 使用该模块所需的最低套餐：模块及其传递依赖 `min_plan` 的最大值。
pub fn required_plan(registry: &Registry, code: &str) -> Option<PlanTier> {
    let closure = dependency_closure(registry, code)?;
    closure
        .iter()
        .filter_map(|member| registry.module(member))
        .map(|module| module.min_plan)
        .max()
}

/// 使用该模块需要显式开通的非核心模块（依赖在前，含模块自身）。
pub fn activation_closure(registry: &Registry, code: &str) -> Option<Vec<String>> {
    let closure = dependency_closure(registry, code)?;
    Some(
        registry
            .activation_order()
            .filter(|module| !module.is_core && closure.contains(&module.code))
            .map(|module| module.code.clone())
            .collect(),
    )
}

/// 模块自身及其全部传递依赖。
fn dependency_closure(registry: &Registry, code: &str) -> Option<HashSet<String>> {
    let root = registry.module(code)?;
    let mut closure = HashSet::new();
    let mut stack = vec![root];
    while let Some(module) = stack.pop() {
        if !closure.insert(module.code.clone()) {
            continue;
        }
        stack.extend(
            module
                .dependencies
                .iter()
                .filter_map(|dependency| registry.module(dependency)),
        );
    }
    Some(closure)
}
