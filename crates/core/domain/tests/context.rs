use domain::{
    Decision, DenyReason, PermissionKey, PermissionKeyError, PlanTier, TenantActivation,
    TenantContext, module_segment,
};

#[test]
fn tenant_context_builds() {
    let key = PermissionKey::parse("hrm.employees.employee-directory.view").expect("key");
    let ctx = TenantContext::new("tenant-1", "user-1", PlanTier::Professional)
        .with_active_modules(["hrm"])
        .with_roles(["hr-manager"])
        .with_grants([key.clone()]);

    assert_eq!(ctx.tenant_id, "tenant-1");
    assert_eq!(ctx.user_id, "user-1");
    assert_eq!(ctx.plan, PlanTier::Professional);
    assert!(ctx.active_modules.contains("hrm"));
    assert_eq!(ctx.roles.len(), 1);
    assert!(ctx.is_granted(&key));
}

#[test]
fn tenant_context_from_activation() {
    let activation = TenantActivation::new("tenant-2", PlanTier::Business, ["crm", "erp"]);
    let ctx = TenantContext::from_activation(&activation, "user-9");
    assert_eq!(ctx.tenant_id, "tenant-2");
    assert_eq!(ctx.plan, PlanTier::Business);
    assert_eq!(ctx.active_modules.len(), 2);
    assert!(ctx.granted_keys.is_empty());
}

#[test]
fn plan_tiers_are_totally_ordered() {
    assert!(PlanTier::Basic < PlanTier::Professional);
    assert!(PlanTier::Professional < PlanTier::Business);
    assert!(PlanTier::Business < PlanTier::Enterprise);
    assert!(PlanTier::Enterprise.satisfies(PlanTier::Basic));
    assert!(!PlanTier::Basic.satisfies(PlanTier::Business));
}

#[test]
fn plan_tier_parses_case_insensitively() {
    assert_eq!("Professional".parse::<PlanTier>(), Ok(PlanTier::Professional));
    assert_eq!(" enterprise ".parse::<PlanTier>(), Ok(PlanTier::Enterprise));
    assert!("gold".parse::<PlanTier>().is_err());
    assert_eq!(PlanTier::Business.to_string(), "business");
}

#[test]
fn permission_key_round_trips_through_display() {
    let raw = "crm.leads.lead-board.assign";
    let key: PermissionKey = raw.parse().expect("key");
    assert_eq!(key.module(), "crm");
    assert_eq!(key.submodule(), "leads");
    assert_eq!(key.component(), "lead-board");
    assert_eq!(key.action(), "assign");
    assert_eq!(key.to_string(), raw);
}

#[test]
fn permission_key_rejects_malformed_input() {
    assert_eq!(
        PermissionKey::parse("crm.leads.view"),
        Err(PermissionKeyError::SegmentCount("crm.leads.view".to_string()))
    );
    assert_eq!(
        PermissionKey::parse("crm..board.view"),
        Err(PermissionKeyError::EmptyCode)
    );
    assert!(PermissionKey::new("crm", "leads", "lead board", "view").is_err());
}

#[test]
fn module_segment_takes_text_before_first_dot() {
    assert_eq!(module_segment("hrm.employees.directory.view"), "hrm");
    assert_eq!(module_segment("hrm"), "hrm");
    assert_eq!(module_segment(""), "");
}

#[test]
fn decision_exposes_reason() {
    assert!(Decision::Allow.is_allowed());
    assert_eq!(Decision::Allow.reason(), None);
    let denied = Decision::Deny(DenyReason::NotGranted);
    assert!(!denied.is_allowed());
    assert_eq!(denied.reason().map(|reason| reason.as_str()), Some("not_granted"));
    assert_eq!(DenyReason::ModuleIneligible.to_string(), "module_ineligible");
}
