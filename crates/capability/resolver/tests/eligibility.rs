use domain::PlanTier;
use navgate_registry::{Registry, load, load_from_str};
use navgate_resolver::{Eligibility, activation_closure, eligible_modules, explain, required_plan};
use serde_json::json;
use std::collections::BTreeSet;

const FIXTURE: &str = include_str!("../../../../fixtures/registry.json");

fn set(codes: &[&str]) -> BTreeSet<String> {
    codes.iter().map(|code| code.to_string()).collect()
}

fn module(code: &str, is_core: bool, min_plan: &str, dependencies: &[&str]) -> serde_json::Value {
    json!({
        "code": code,
        "name": code,
        "is_core": is_core,
        "min_plan": min_plan,
        "dependencies": dependencies,
    })
}

fn core_and_hrm() -> Registry {
    load(
        serde_json::from_value(json!({
            "modules": [
                module("core", true, "basic", &[]),
                module("hrm", false, "basic", &["core"]),
            ]
        }))
        .expect("raw"),
    )
    .expect("registry")
}

#[test]
fn activated_module_with_core_dependency_is_eligible() {
    let registry = core_and_hrm();
    let eligible = eligible_modules(&registry, PlanTier::Basic, &set(&["hrm"]));
    assert_eq!(eligible, set(&["core", "hrm"]));
}

#[test]
fn core_modules_are_implicitly_eligible() {
    let registry = core_and_hrm();
    let eligible = eligible_modules(&registry, PlanTier::Basic, &set(&[]));
    assert_eq!(eligible, set(&["core"]));
}

#[test]
fn unknown_activation_codes_are_ignored() {
    let registry = core_and_hrm();
    let eligible = eligible_modules(&registry, PlanTier::Basic, &set(&["hrm", "ghost"]));
    assert_eq!(eligible, set(&["core", "hrm"]));
}

#[test]
fn eligibility_is_monotonic_in_plan() {
    let registry = load_from_str(FIXTURE).expect("fixture");
    let everything: BTreeSet<String> = registry
        .modules()
        .iter()
        .map(|module| module.code.clone())
        .collect();
    let partial = set(&["hrm", "erp", "inventory", "dms", "quality"]);

    for activated in [&everything, &partial] {
        for (at, plan) in PlanTier::ALL.iter().enumerate() {
            let lower = eligible_modules(&registry, *plan, activated);
            for higher_plan in &PlanTier::ALL[at..] {
                let higher = eligible_modules(&registry, *higher_plan, activated);
                assert!(lower.is_subset(&higher), "{plan} -> {higher_plan}");
            }
        }
    }
}

#[test]
fn dependency_failure_is_transitive() {
    let registry = load_from_str(FIXTURE).expect("fixture");
    // ecommerce 依赖 inventory → erp；erp 未开通时整条链不可用
    let activated = set(&["crm", "inventory", "ecommerce"]);
    let eligible = eligible_modules(&registry, PlanTier::Enterprise, &activated);
    assert!(eligible.contains("crm"));
    assert!(!eligible.contains("inventory"));
    assert!(!eligible.contains("ecommerce"));
    assert_eq!(
        explain(&registry, PlanTier::Enterprise, &activated, "ecommerce"),
        Eligibility::DependencyUnmet {
            dependency: "inventory".to_string()
        }
    );
}

#[test]
fn dependency_must_clear_its_own_plan_bar() {
    let registry = load(
        serde_json::from_value(json!({
            "modules": [
                module("core", true, "basic", &[]),
                module("reports", false, "professional", &["core"]),
                module("widgets", false, "basic", &["reports"]),
            ]
        }))
        .expect("raw"),
    )
    .expect("registry");
    let activated = set(&["reports", "widgets"]);

    let eligible = eligible_modules(&registry, PlanTier::Basic, &activated);
    assert_eq!(eligible, set(&["core"]));
    assert_eq!(required_plan(&registry, "widgets"), Some(PlanTier::Professional));

    let eligible = eligible_modules(&registry, PlanTier::Professional, &activated);
    assert_eq!(eligible, set(&["core", "reports", "widgets"]));
}

#[test]
fn explain_reports_first_failing_check() {
    let registry = load_from_str(FIXTURE).expect("fixture");

    assert_eq!(
        explain(&registry, PlanTier::Basic, &set(&["erp"]), "erp"),
        Eligibility::PlanTooLow {
            required: PlanTier::Professional
        }
    );
    assert_eq!(
        explain(&registry, PlanTier::Professional, &set(&[]), "erp"),
        Eligibility::NotActivated
    );
    assert_eq!(
        explain(&registry, PlanTier::Professional, &set(&["erp"]), "erp"),
        Eligibility::Eligible
    );
    assert_eq!(
        explain(&registry, PlanTier::Enterprise, &set(&[]), "core"),
        Eligibility::Eligible
    );
    let unknown = explain(&registry, PlanTier::Enterprise, &set(&[]), "ghost");
    assert_eq!(unknown, Eligibility::UnknownModule);
    assert_eq!(unknown.as_str(), "unknown_module");
}

#[test]
fn explain_agrees_with_eligible_set() {
    let registry = load_from_str(FIXTURE).expect("fixture");
    let activated = set(&["hrm", "erp", "finance", "analytics", "dms", "quality"]);
    for plan in PlanTier::ALL {
        let eligible = eligible_modules(&registry, plan, &activated);
        for module in registry.modules() {
            assert_eq!(
                explain(&registry, plan, &activated, &module.code).is_eligible(),
                eligible.contains(&module.code),
                "{} at {plan}",
                module.code
            );
        }
    }
}

#[test]
fn required_plan_covers_transitive_dependencies() {
    let registry = load_from_str(FIXTURE).expect("fixture");
    assert_eq!(required_plan(&registry, "core"), Some(PlanTier::Basic));
    assert_eq!(required_plan(&registry, "finance"), Some(PlanTier::Professional));
    assert_eq!(required_plan(&registry, "ecommerce"), Some(PlanTier::Business));
    assert_eq!(required_plan(&registry, "compliance"), Some(PlanTier::Enterprise));
    assert_eq!(required_plan(&registry, "ghost"), None);
}

#[test]
fn activation_closure_lists_non_core_modules_dependencies_first() {
    let registry = load_from_str(FIXTURE).expect("fixture");
    assert_eq!(
        activation_closure(&registry, "ecommerce"),
        Some(vec![
            "crm".to_string(),
            "erp".to_string(),
            "inventory".to_string(),
            "ecommerce".to_string(),
        ])
    );
    assert_eq!(activation_closure(&registry, "core"), Some(Vec::new()));
    assert_eq!(activation_closure(&registry, "ghost"), None);

    let closure = activation_closure(&registry, "compliance").expect("closure");
    let eligible = eligible_modules(
        &registry,
        PlanTier::Enterprise,
        &closure.iter().cloned().collect(),
    );
    assert!(eligible.contains("compliance"));
}
