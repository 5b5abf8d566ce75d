use domain::{PermissionKey, PlanTier, TenantContext};
use navgate_menu::project;
use navgate_registry::load_from_str;

const FIXTURE: &str = include_str!("../../../../fixtures/registry.json");

// 计数器是进程级的，本文件只放一个测试，避免与其它判定并发干扰。
#[test]
fn projection_does_not_count_as_decisions() {
    let registry = load_from_str(FIXTURE).expect("fixture");
    let ctx = TenantContext::new("tenant-1", "user-1", PlanTier::Professional)
        .with_active_modules(["hrm"])
        .with_grants([PermissionKey::parse("hrm.employees.employee-directory.view").expect("key")]);

    let before = navgate_telemetry::metrics().snapshot();
    let menu = project(&registry, &ctx);
    let after = navgate_telemetry::metrics().snapshot();

    assert_eq!(menu.len(), 1);
    assert_eq!(after.decisions_denied(), before.decisions_denied());
    assert_eq!(after.decisions_allowed, before.decisions_allowed);
    assert_eq!(after.menus_projected, before.menus_projected + 1);
}
