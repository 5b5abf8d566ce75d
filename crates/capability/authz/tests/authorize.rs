use domain::{Decision, DenyReason, PermissionKey, PlanTier, TenantContext};
use navgate_authz::{Authorizer, authorize};
use navgate_registry::{Registry, load_from_str};

const FIXTURE: &str = include_str!("../../../../fixtures/registry.json");

fn registry() -> Registry {
    load_from_str(FIXTURE).expect("fixture")
}

fn keys(raw: &[&str]) -> Vec<PermissionKey> {
    raw.iter()
        .map(|key| PermissionKey::parse(key).expect("key"))
        .collect()
}

fn hr_context(plan: PlanTier) -> TenantContext {
    TenantContext::new("tenant-1", "user-1", plan)
        .with_active_modules(["hrm", "erp"])
        .with_roles(["hr-clerk"])
        .with_grants(keys(&[
            "core.dashboard.home.view",
            "hrm.employees.employee-directory.view",
            "erp.procurement.purchase-orders.view",
        ]))
}

#[test]
fn granted_key_on_eligible_module_is_allowed() {
    let registry = registry();
    let ctx = hr_context(PlanTier::Basic);
    assert_eq!(
        authorize(&registry, &ctx, "hrm.employees.employee-directory.view"),
        Decision::Allow
    );
    assert_eq!(authorize(&registry, &ctx, "core.dashboard.home.view"), Decision::Allow);
}

#[test]
fn grant_does_not_override_plan_gate() {
    let registry = registry();
    // erp 需要 professional；basic 租户即使持有授权也被拒绝
    let ctx = hr_context(PlanTier::Basic);
    assert_eq!(
        authorize(&registry, &ctx, "erp.procurement.purchase-orders.view"),
        Decision::Deny(DenyReason::ModuleIneligible)
    );

    let upgraded = hr_context(PlanTier::Professional);
    assert_eq!(
        authorize(&registry, &upgraded, "erp.procurement.purchase-orders.view"),
        Decision::Allow
    );
}

#[test]
fn stale_grant_for_deactivated_module_fails_closed() {
    let registry = registry();
    let ctx = hr_context(PlanTier::Enterprise).with_active_modules(["erp"]);
    assert_eq!(
        authorize(&registry, &ctx, "hrm.employees.employee-directory.view"),
        Decision::Deny(DenyReason::ModuleIneligible)
    );
}

#[test]
fn unknown_action_on_eligible_module_is_unknown_permission() {
    let registry = registry();
    let ctx = hr_context(PlanTier::Basic);
    assert_eq!(
        authorize(
            &registry,
            &ctx,
            "hrm.employees.employee-directory.nonexistent-action"
        ),
        Decision::Deny(DenyReason::UnknownPermission)
    );
    assert_eq!(
        authorize(&registry, &ctx, "hrm.employees"),
        Decision::Deny(DenyReason::UnknownPermission)
    );
}

#[test]
fn unknown_module_is_ineligible() {
    let registry = registry();
    let ctx = hr_context(PlanTier::Enterprise);
    assert_eq!(
        authorize(&registry, &ctx, "ghost.a.b.c"),
        Decision::Deny(DenyReason::ModuleIneligible)
    );
    assert_eq!(
        authorize(&registry, &ctx, ""),
        Decision::Deny(DenyReason::ModuleIneligible)
    );
}

#[test]
fn existing_but_ungranted_key_is_not_granted() {
    let registry = registry();
    let ctx = hr_context(PlanTier::Basic);
    assert_eq!(
        authorize(&registry, &ctx, "hrm.employees.employee-directory.edit"),
        Decision::Deny(DenyReason::NotGranted)
    );
}

#[test]
fn decisions_are_deterministic() {
    let registry = registry();
    let ctx = hr_context(PlanTier::Professional);
    let requests = [
        "hrm.employees.employee-directory.view",
        "hrm.employees.employee-directory.edit",
        "erp.procurement.purchase-orders.view",
        "finance.ledger.journal-entries.view",
        "hrm.bogus.thing.view",
    ];
    let first: Vec<Decision> = requests
        .iter()
        .map(|request| authorize(&registry, &ctx, request))
        .collect();
    for _ in 0..10 {
        let again: Vec<Decision> = requests
            .iter()
            .map(|request| authorize(&registry, &ctx, request))
            .collect();
        assert_eq!(first, again);
    }
}

#[test]
fn authorize_key_matches_string_form() {
    let registry = registry();
    let ctx = hr_context(PlanTier::Basic);
    let authorizer = Authorizer::new(&registry, &ctx);
    for module in registry.modules() {
        for key in registry.keys_under(&module.code) {
            assert_eq!(
                authorizer.authorize_key(&key),
                authorizer.authorize(&key.to_string()),
                "{key}"
            );
        }
    }
}

#[test]
fn allowed_keys_are_exactly_the_allowed_decisions() {
    let registry = registry();
    let ctx = hr_context(PlanTier::Basic);
    let authorizer = Authorizer::new(&registry, &ctx);

    let allowed = authorizer.allowed_keys();
    assert_eq!(
        allowed,
        keys(&[
            "core.dashboard.home.view",
            "hrm.employees.employee-directory.view",
        ])
    );
    for key in &allowed {
        assert!(authorizer.is_allowed(&key.to_string()));
    }
}

#[test]
fn authorizer_exposes_eligible_set() {
    let registry = registry();
    let ctx = hr_context(PlanTier::Professional);
    let authorizer = Authorizer::new(&registry, &ctx);
    let eligible: Vec<&str> = authorizer
        .eligible_modules()
        .iter()
        .map(String::as_str)
        .collect();
    assert_eq!(eligible, vec!["core", "erp", "hrm"]);
}

#[test]
fn plan_downgrade_revokes_explicit_grant() {
    let registry = load_from_str(
        r#"{
          "modules": [
            { "code": "core", "name": "Core", "is_core": true },
            {
              "code": "hrm",
              "name": "HR",
              "min_plan": "professional",
              "dependencies": ["core"],
              "submodules": [{
                "code": "employees",
                "name": "Employees",
                "components": [{
                  "code": "employee-directory",
                  "name": "Directory",
                  "actions": [{ "code": "view" }]
                }]
              }]
            }
          ]
        }"#,
    )
    .expect("registry");
    let ctx = TenantContext::new("tenant-1", "user-1", PlanTier::Basic)
        .with_active_modules(["hrm"])
        .with_grants(keys(&["hrm.employees.employee-directory.view"]));

    assert_eq!(
        authorize(&registry, &ctx, "hrm.employees.employee-directory.view"),
        Decision::Deny(DenyReason::ModuleIneligible)
    );
}

#[test]
fn permits_agrees_with_authorize_key() {
    let registry = registry();
    let ctx = hr_context(PlanTier::Basic);
    let authorizer = Authorizer::new(&registry, &ctx);
    for module in registry.modules() {
        for key in registry.keys_under(&module.code) {
            assert_eq!(
                authorizer.permits(&key),
                authorizer.authorize_key(&key).is_allowed(),
                "{key}"
            );
        }
    }
    let unknown = PermissionKey::parse("hrm.employees.employee-directory.fire").expect("key");
    assert!(!authorizer.permits(&unknown));
}
