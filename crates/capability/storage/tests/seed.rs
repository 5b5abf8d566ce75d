use domain::PlanTier;
use navgate_storage::{
    InMemoryRoleGrantStore, InMemoryTenantStore, RoleGrantStore, SeedDocument, SeedSummary,
    TenantActivationStore,
};

const SEED: &str = include_str!("../../../../fixtures/seed.json");

#[tokio::test]
async fn seed_fixture_populates_stores() {
    let document = SeedDocument::from_json(SEED).expect("seed");
    let tenants = InMemoryTenantStore::new();
    let roles = InMemoryRoleGrantStore::new();

    let summary = document.apply(&tenants, &roles).expect("apply");
    assert_eq!(
        summary,
        SeedSummary {
            tenants: document.tenants.len(),
            roles: document.roles.len(),
            users: document.users.len(),
        }
    );

    let acme = tenants
        .find_activation("acme")
        .await
        .expect("find")
        .expect("acme");
    assert_eq!(acme.plan, PlanTier::Professional);
    assert!(acme.active_module_codes.contains("hrm"));

    let grants = roles.effective_grants("acme", "alice").await.expect("grants");
    assert!(!grants.is_empty());
}

#[test]
fn seed_rejects_unknown_plan() {
    let document = SeedDocument::from_json(
        r#"{ "tenants": [{ "tenant_id": "acme", "plan": "platinum" }] }"#,
    )
    .expect("parse");
    let error = document
        .apply(&InMemoryTenantStore::new(), &InMemoryRoleGrantStore::new())
        .expect_err("unknown plan");
    assert!(error.to_string().contains("acme"));
}

#[test]
fn seed_rejects_malformed_permission() {
    let document = SeedDocument::from_json(
        r#"{ "roles": [{ "tenant_id": "acme", "role_id": "broken", "permissions": ["hrm.view"] }] }"#,
    )
    .expect("parse");
    let error = document
        .apply(&InMemoryTenantStore::new(), &InMemoryRoleGrantStore::new())
        .expect_err("malformed key");
    assert!(error.to_string().contains("broken"));
}

#[test]
fn seed_reports_missing_file_and_bad_json() {
    let missing = std::env::temp_dir().join(format!("navgate-seed-{}.json", uuid::Uuid::new_v4()));
    assert!(SeedDocument::from_path(&missing).is_err());
    assert!(SeedDocument::from_json("{ not json").is_err());
}
