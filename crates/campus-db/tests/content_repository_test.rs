//! Integration tests for the content unit store using in-memory
//! SurrealDB: initial state, compare-and-set writes, tenant
//! isolation, and the published read path.

use campus_core::error::CampusError;
use campus_core::lifecycle::{ContentStatus, Environment, LifecycleState};
use campus_core::models::content::{
    ContentKind, ContentPatch, ContentPayload, CreateContentUnit, NoticePayload, SectionPayload,
};
use campus_core::models::tenant::CreateTenant;
use campus_core::repository::{ContentRepository, TenantRepository};
use campus_db::repository::{SurrealContentRepository, SurrealTenantRepository};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

/// Helper: spin up in-memory DB, run migrations, create a tenant.
async fn setup() -> (
    SurrealContentRepository<surrealdb::engine::local::Db>,
    Uuid, // tenant_id
    Surreal<surrealdb::engine::local::Db>,
) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    campus_db::run_migrations(&db).await.unwrap();

    let tenant_repo = SurrealTenantRepository::new(db.clone());
    let tenant = tenant_repo
        .create(CreateTenant {
            name: "Test School".into(),
            slug: "test-school".into(),
            branding: None,
        })
        .await
        .unwrap();

    (SurrealContentRepository::new(db.clone()), tenant.id, db)
}

fn section_payload(page: &str, title: &str) -> ContentPayload {
    ContentPayload::Section(SectionPayload {
        page: page.into(),
        variant: "hero".into(),
        props: serde_json::json!({ "title": title }),
    })
}

fn notice_payload(title: &str) -> ContentPayload {
    ContentPayload::Notice(NoticePayload {
        title: title.into(),
        body: "Details to follow.".into(),
        attachment_url: None,
    })
}

const PENDING: LifecycleState =
    LifecycleState::new(Environment::Sandbox, ContentStatus::PendingApproval);
const LIVE: LifecycleState = LifecycleState::new(Environment::Live, ContentStatus::Published);

#[tokio::test]
async fn create_lands_at_sandbox_draft() {
    let (repo, tenant_id, _db) = setup().await;

    let unit = repo
        .create(CreateContentUnit {
            tenant_id,
            payload: section_payload("home", "Welcome"),
            pinned: false,
            position: Some(1),
            updated_by: Some("editor@test-school".into()),
        })
        .await
        .unwrap();

    assert_eq!(unit.tenant_id, tenant_id);
    assert_eq!(unit.kind, ContentKind::Section);
    assert_eq!(unit.state(), LifecycleState::initial());
    assert_eq!(unit.position, Some(1));

    let fetched = repo.get_by_id(tenant_id, unit.id).await.unwrap();
    assert_eq!(fetched.id, unit.id);
    assert_eq!(fetched.payload, unit.payload);
}

#[tokio::test]
async fn transition_follows_cas_guard() {
    let (repo, tenant_id, _db) = setup().await;

    let unit = repo
        .create(CreateContentUnit {
            tenant_id,
            payload: notice_payload("Term dates"),
            pinned: false,
            position: None,
            updated_by: None,
        })
        .await
        .unwrap();

    let pending = repo
        .transition(tenant_id, unit.id, LifecycleState::initial(), PENDING)
        .await
        .unwrap();
    assert_eq!(pending.state(), PENDING);

    let live = repo
        .transition(tenant_id, unit.id, PENDING, LIVE)
        .await
        .unwrap();
    assert_eq!(live.state(), LIVE);
    // Promotion must not touch the payload.
    assert_eq!(live.payload, unit.payload);
}

#[tokio::test]
async fn stale_transition_is_a_conflict() {
    let (repo, tenant_id, _db) = setup().await;

    let unit = repo
        .create(CreateContentUnit {
            tenant_id,
            payload: notice_payload("Sports day"),
            pinned: false,
            position: None,
            updated_by: None,
        })
        .await
        .unwrap();

    // Unit is still in draft; a writer claiming it is pending loses.
    let result = repo.transition(tenant_id, unit.id, PENDING, LIVE).await;
    assert!(matches!(result, Err(CampusError::Conflict { .. })));

    // The losing write had no effect.
    let fetched = repo.get_by_id(tenant_id, unit.id).await.unwrap();
    assert_eq!(fetched.state(), LifecycleState::initial());
}

#[tokio::test]
async fn transition_of_absent_unit_is_not_found() {
    let (repo, tenant_id, _db) = setup().await;

    let result = repo
        .transition(tenant_id, Uuid::new_v4(), PENDING, LIVE)
        .await;
    assert!(matches!(result, Err(CampusError::NotFound { .. })));
}

#[tokio::test]
async fn concurrent_transitions_serialize() {
    let (repo, tenant_id, _db) = setup().await;

    let unit = repo
        .create(CreateContentUnit {
            tenant_id,
            payload: notice_payload("Open evening"),
            pinned: false,
            position: None,
            updated_by: None,
        })
        .await
        .unwrap();
    repo.transition(tenant_id, unit.id, LifecycleState::initial(), PENDING)
        .await
        .unwrap();

    // Two approvals racing from the same pending read: exactly one
    // matches the CAS guard.
    let (a, b) = tokio::join!(
        repo.transition(tenant_id, unit.id, PENDING, LIVE),
        repo.transition(tenant_id, unit.id, PENDING, LIVE),
    );

    let winners = [&a, &b].iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1, "exactly one approve must win: {a:?} / {b:?}");

    let fetched = repo.get_by_id(tenant_id, unit.id).await.unwrap();
    assert_eq!(fetched.state(), LIVE);
}

#[tokio::test]
async fn apply_patch_writes_payload_and_state_together() {
    let (repo, tenant_id, _db) = setup().await;

    let unit = repo
        .create(CreateContentUnit {
            tenant_id,
            payload: section_payload("home", "Welcome"),
            pinned: false,
            position: Some(1),
            updated_by: None,
        })
        .await
        .unwrap();
    repo.transition(tenant_id, unit.id, LifecycleState::initial(), PENDING)
        .await
        .unwrap();

    // Edit while pending: payload changes and the state is demoted
    // back to draft in the same statement.
    let edited = repo
        .apply_patch(
            tenant_id,
            unit.id,
            ContentPatch {
                payload: Some(section_payload("home", "Welcome back")),
                updated_by: Some("editor2".into()),
                ..Default::default()
            },
            PENDING,
            LifecycleState::initial(),
        )
        .await
        .unwrap();

    assert_eq!(edited.state(), LifecycleState::initial());
    assert_eq!(edited.payload, section_payload("home", "Welcome back"));
    assert_eq!(edited.updated_by.as_deref(), Some("editor2"));
}

#[tokio::test]
async fn apply_patch_can_clear_position() {
    let (repo, tenant_id, _db) = setup().await;

    let unit = repo
        .create(CreateContentUnit {
            tenant_id,
            payload: section_payload("home", "Welcome"),
            pinned: false,
            position: Some(4),
            updated_by: None,
        })
        .await
        .unwrap();

    let edited = repo
        .apply_patch(
            tenant_id,
            unit.id,
            ContentPatch {
                position: Some(None),
                ..Default::default()
            },
            LifecycleState::initial(),
            LifecycleState::initial(),
        )
        .await
        .unwrap();

    assert_eq!(edited.position, None);
}

#[tokio::test]
async fn delete_is_idempotent() {
    let (repo, tenant_id, _db) = setup().await;

    let unit = repo
        .create(CreateContentUnit {
            tenant_id,
            payload: notice_payload("Ephemeral"),
            pinned: false,
            position: None,
            updated_by: None,
        })
        .await
        .unwrap();

    repo.delete(tenant_id, unit.id).await.unwrap();
    assert!(matches!(
        repo.get_by_id(tenant_id, unit.id).await,
        Err(CampusError::NotFound { .. })
    ));

    // Second delete of the same id succeeds with no error.
    repo.delete(tenant_id, unit.id).await.unwrap();
}

#[tokio::test]
async fn list_filters_by_environment_and_kind() {
    let (repo, tenant_id, _db) = setup().await;

    let section = repo
        .create(CreateContentUnit {
            tenant_id,
            payload: section_payload("home", "Welcome"),
            pinned: false,
            position: Some(1),
            updated_by: None,
        })
        .await
        .unwrap();
    let notice = repo
        .create(CreateContentUnit {
            tenant_id,
            payload: notice_payload("Term dates"),
            pinned: false,
            position: None,
            updated_by: None,
        })
        .await
        .unwrap();

    // Promote the notice so environments differ.
    repo.transition(tenant_id, notice.id, LifecycleState::initial(), PENDING)
        .await
        .unwrap();
    repo.transition(tenant_id, notice.id, PENDING, LIVE)
        .await
        .unwrap();

    let sandbox = repo
        .list(tenant_id, Some(Environment::Sandbox), None)
        .await
        .unwrap();
    assert_eq!(sandbox.len(), 1);
    assert_eq!(sandbox[0].id, section.id);

    let live = repo
        .list(tenant_id, Some(Environment::Live), None)
        .await
        .unwrap();
    assert_eq!(live.len(), 1);
    assert_eq!(live[0].id, notice.id);

    let notices = repo
        .list(tenant_id, None, Some(ContentKind::Notice))
        .await
        .unwrap();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].id, notice.id);

    let all = repo.list(tenant_id, None, None).await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn tenant_isolation_is_absolute() {
    let (repo, tenant_a, db) = setup().await;

    let tenant_repo = SurrealTenantRepository::new(db);
    let tenant_b = tenant_repo
        .create(CreateTenant {
            name: "Other School".into(),
            slug: "other-school".into(),
            branding: None,
        })
        .await
        .unwrap()
        .id;

    let unit_a = repo
        .create(CreateContentUnit {
            tenant_id: tenant_a,
            payload: notice_payload("A only"),
            pinned: false,
            position: None,
            updated_by: None,
        })
        .await
        .unwrap();

    // Tenant B sees nothing of tenant A's content.
    assert!(repo.list(tenant_b, None, None).await.unwrap().is_empty());
    assert!(matches!(
        repo.get_by_id(tenant_b, unit_a.id).await,
        Err(CampusError::NotFound { .. })
    ));

    // A cross-tenant transition attempt does not move the unit.
    let result = repo
        .transition(tenant_b, unit_a.id, LifecycleState::initial(), PENDING)
        .await;
    assert!(result.is_err());
    let fetched = repo.get_by_id(tenant_a, unit_a.id).await.unwrap();
    assert_eq!(fetched.state(), LifecycleState::initial());
}

#[tokio::test]
async fn published_view_filters_and_orders() {
    let (repo, tenant_id, _db) = setup().await;

    async fn publish(
        repo: &SurrealContentRepository<surrealdb::engine::local::Db>,
        tenant_id: Uuid,
        id: Uuid,
    ) {
        repo.transition(tenant_id, id, LifecycleState::initial(), PENDING)
            .await
            .unwrap();
        repo.transition(tenant_id, id, PENDING, LIVE).await.unwrap();
    }

    // Sections with shuffled positions.
    let mut section_ids = Vec::new();
    for pos in [3_i64, 1, 2] {
        let unit = repo
            .create(CreateContentUnit {
                tenant_id,
                payload: section_payload("home", &format!("S{pos}")),
                pinned: false,
                position: Some(pos),
                updated_by: None,
            })
            .await
            .unwrap();
        publish(&repo, tenant_id, unit.id).await;
        section_ids.push((pos, unit.id));
    }

    // Notices: one pinned, two unpinned, plus one left in sandbox.
    let older = repo
        .create(CreateContentUnit {
            tenant_id,
            payload: notice_payload("Older"),
            pinned: false,
            position: None,
            updated_by: None,
        })
        .await
        .unwrap();
    publish(&repo, tenant_id, older.id).await;

    // Keep creation timestamps strictly ordered.
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let newer = repo
        .create(CreateContentUnit {
            tenant_id,
            payload: notice_payload("Newer"),
            pinned: false,
            position: None,
            updated_by: None,
        })
        .await
        .unwrap();
    publish(&repo, tenant_id, newer.id).await;

    let pinned = repo
        .create(CreateContentUnit {
            tenant_id,
            payload: notice_payload("Pinned"),
            pinned: true,
            position: None,
            updated_by: None,
        })
        .await
        .unwrap();
    publish(&repo, tenant_id, pinned.id).await;

    // Never published: must not appear in the public view.
    repo.create(CreateContentUnit {
        tenant_id,
        payload: notice_payload("Sandbox only"),
        pinned: true,
        position: None,
        updated_by: None,
    })
    .await
    .unwrap();

    let sections = repo
        .list_published(tenant_id, Some(ContentKind::Section))
        .await
        .unwrap();
    let positions: Vec<_> = sections.iter().map(|u| u.position.unwrap()).collect();
    assert_eq!(positions, vec![1, 2, 3]);

    let notices = repo
        .list_published(tenant_id, Some(ContentKind::Notice))
        .await
        .unwrap();
    assert_eq!(notices.len(), 3);
    assert_eq!(notices[0].id, pinned.id); // pinned first
    assert_eq!(notices[1].id, newer.id); // then reverse creation time
    assert_eq!(notices[2].id, older.id);

    for unit in sections.iter().chain(notices.iter()) {
        assert_eq!(unit.environment, Environment::Live);
        assert_eq!(unit.status, ContentStatus::Published);
    }

    // Unfiltered: sections first, then notices, 6 published total.
    let all = repo.list_published(tenant_id, None).await.unwrap();
    assert_eq!(all.len(), 6);
    assert_eq!(all[0].kind, ContentKind::Section);
    assert_eq!(all[3].kind, ContentKind::Notice);
}
