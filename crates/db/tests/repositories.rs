//! Repository behaviour against a migrated in-memory database.

use assert_matches::assert_matches;
use hvlab_core::status::PaymentStatus;
use hvlab_core::user_ref::UserRef;
use hvlab_db::models::construction_payment::CreateConstructionPayment;
use hvlab_db::models::drawing::UpsertDrawing;
use hvlab_db::models::execution_record::{CreateExecutionRecord, UpdateExecutionRecord};
use hvlab_db::models::notification::CreateNotification;
use hvlab_db::models::payment::{CreatePayment, PaymentFilter};
use hvlab_db::models::project::{CreateProject, ProjectFilter, UpdateProject};
use hvlab_db::models::schedule::{CreateSchedule, ScheduleFilter};
use hvlab_db::models::site_log::CreateSiteLog;
use hvlab_db::models::work_request::{CreateWorkRequest, UpdateWorkRequest};
use hvlab_db::repositories::{
    ConstructionPaymentRepo, DrawingRepo, ExecutionRecordRepo, KakaoTokenRepo, NotificationRepo,
    PaymentRepo, ProcessRepo, ProjectRepo, ScheduleRepo, SiteLogRepo, SpecbookRepo, UserRepo,
    WorkRequestRepo,
};
use hvlab_db::{create_memory_pool, run_migrations, DbPool, SeedOptions};
use serde_json::json;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn setup() -> DbPool {
    let pool = create_memory_pool().await.unwrap();
    let report = run_migrations(
        &pool,
        &SeedOptions {
            default_password_hash: "hash".to_string(),
            contractors: vec![],
        },
    )
    .await;
    assert!(report.is_clean(), "failures: {:?}", report.failures);
    pool
}

fn new_project(name: &str) -> CreateProject {
    serde_json::from_value(json!({
        "name": name,
        "location": { "address": "서울시 강남구" },
        "budget": 10_000_000
    }))
    .unwrap()
}

async fn user_id(pool: &DbPool, username: &str) -> i64 {
    UserRepo::find_by_username(pool, username)
        .await
        .unwrap()
        .expect("seeded user")
        .id
}

// ---------------------------------------------------------------------------
// Test: projects
// ---------------------------------------------------------------------------

#[tokio::test]
async fn project_defaults_and_soft_delete() {
    let pool = setup().await;
    let project = ProjectRepo::create(&pool, &new_project("압구정 현대"), None)
        .await
        .unwrap();

    assert_eq!(project.status, "planning");
    assert_eq!(project.progress, 0);
    assert_eq!(project.actual_cost, 0);
    assert_eq!(project.color_code, "#9CA3AF");

    assert!(ProjectRepo::soft_delete(&pool, project.id).await.unwrap());
    assert!(!ProjectRepo::soft_delete(&pool, project.id).await.unwrap());
    assert!(ProjectRepo::find_by_id(&pool, project.id).await.unwrap().is_none());
    let listed = ProjectRepo::list(&pool, &ProjectFilter::default()).await.unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn project_update_clamps_progress_and_keeps_unset_fields() {
    let pool = setup().await;
    let project = ProjectRepo::create(&pool, &new_project("반포 자이"), None)
        .await
        .unwrap();

    let update = UpdateProject {
        progress: Some(150),
        ..Default::default()
    };
    let updated = ProjectRepo::update(&pool, project.id, &update)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.progress, 100);
    assert_eq!(updated.name, "반포 자이");
    assert_eq!(updated.budget, 10_000_000);
}

// ---------------------------------------------------------------------------
// Test: schedules
// ---------------------------------------------------------------------------

#[tokio::test]
async fn schedule_assignees_resolve_ids_and_names() {
    let pool = setup().await;
    let worker = user_id(&pool, "재천").await;
    let input: CreateSchedule = serde_json::from_value(json!({
        "title": "타일 시공",
        "start_date": "2026-03-01",
        "end_date": "2026-03-05",
        "assignees": [worker, "민기", "외부 인원"]
    }))
    .unwrap();

    let detail = ScheduleRepo::create(&pool, &input, None).await.unwrap();

    assert_eq!(detail.schedule.kind, "construction");
    assert_eq!(detail.schedule.priority, "medium");
    assert_eq!(detail.schedule.time, "-");
    assert_eq!(detail.duration_days, 4);
    let names: Vec<_> = detail.assignees.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["재천", "민기", "외부 인원"]);
    assert_eq!(detail.assignees[0].user_id, Some(worker));
    assert!(detail.assignees[1].user_id.is_some());
    assert_eq!(detail.assignees[2].user_id, None);

    let listed = ScheduleRepo::list(&pool, &ScheduleFilter::default()).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].assignees.len(), 3);
}

#[tokio::test]
async fn schedule_progress_completion_round_trip() {
    let pool = setup().await;
    let input: CreateSchedule = serde_json::from_value(json!({
        "title": "도배",
        "start_date": "2026-04-01",
        "end_date": "2026-04-02"
    }))
    .unwrap();
    let created = ScheduleRepo::create(&pool, &input, None).await.unwrap();

    let done = ScheduleRepo::set_progress(&pool, created.schedule.id, 120)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(done.schedule.progress, 100);
    assert!(done.schedule.is_completed);
    assert!(done.schedule.completed_at.is_some());

    let reopened = ScheduleRepo::set_progress(&pool, created.schedule.id, 40)
        .await
        .unwrap()
        .unwrap();
    assert!(!reopened.schedule.is_completed);
    assert!(reopened.schedule.completed_at.is_none());
}

#[tokio::test]
async fn schedule_stats_split_by_progress() {
    let pool = setup().await;
    let project = ProjectRepo::create(&pool, &new_project("잠실 엘스"), None)
        .await
        .unwrap();
    let mut ids = Vec::new();
    for title in ["철거", "목공", "도장"] {
        let input: CreateSchedule = serde_json::from_value(json!({
            "project_id": project.id,
            "title": title,
            "start_date": "2026-05-01",
            "end_date": "2026-05-03"
        }))
        .unwrap();
        ids.push(ScheduleRepo::create(&pool, &input, None).await.unwrap().schedule.id);
    }
    ScheduleRepo::set_progress(&pool, ids[0], 100).await.unwrap();
    ScheduleRepo::set_progress(&pool, ids[1], 50).await.unwrap();

    let stats = ScheduleRepo::project_stats(&pool, project.id).await.unwrap();
    assert_eq!(stats.total_schedules, 3);
    assert_eq!(stats.completed_schedules, 1);
    assert_eq!(stats.in_progress_schedules, 1);
    assert_eq!(stats.pending_schedules, 1);
    assert_eq!(stats.average_progress, Some(50.0));

    let empty = ProjectRepo::create(&pool, &new_project("빈 현장"), None)
        .await
        .unwrap();
    let none = ScheduleRepo::project_stats(&pool, empty.id).await.unwrap();
    assert_eq!(none.total_schedules, 0);
    assert_eq!(none.average_progress, None);
}

#[tokio::test]
async fn schedule_list_filters_by_assignee() {
    let pool = setup().await;
    let worker = user_id(&pool, "재천").await;
    for (title, assignees) in [("타일", json!([worker, "민기"])), ("도배", json!(["민기"]))] {
        let input: CreateSchedule = serde_json::from_value(json!({
            "title": title,
            "start_date": "2026-06-01",
            "end_date": "2026-06-02",
            "assignees": assignees
        }))
        .unwrap();
        ScheduleRepo::create(&pool, &input, None).await.unwrap();
    }

    let filter = ScheduleFilter {
        assignee_id: Some(worker),
        ..Default::default()
    };
    let mine = ScheduleRepo::list(&pool, &filter).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].schedule.title, "타일");
    // Co-assignees are still listed.
    assert_eq!(mine[0].assignees.len(), 2);
}

// ---------------------------------------------------------------------------
// Test: processes and spec book
// ---------------------------------------------------------------------------

#[tokio::test]
async fn new_process_goes_last_and_reorder_rewrites_sort_order() {
    let pool = setup().await;
    let before = ProcessRepo::list(&pool, true).await.unwrap();
    let last = before.iter().map(|p| p.sort_order).max().unwrap();

    let created = ProcessRepo::create(&pool, "줄눈").await.unwrap();
    assert_eq!(created.sort_order, last + 1);
    assert!(created.is_active);
    assert_matches!(ProcessRepo::create(&pool, "줄눈").await, Err(sqlx::Error::Database(_)));

    let first = before[0].id;
    let updated = ProcessRepo::reorder(&pool, &[created.id, first, 999_999])
        .await
        .unwrap();
    assert_eq!(updated, 2);
    let listed = ProcessRepo::list(&pool, true).await.unwrap();
    assert_eq!(listed[0].id, created.id);
    assert_eq!(listed[1].id, first);

    let hidden = ProcessRepo::update(&pool, created.id, None, Some(false))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(hidden.name, "줄눈");
    assert!(!ProcessRepo::list(&pool, false)
        .await
        .unwrap()
        .iter()
        .any(|p| p.id == created.id));
}

#[tokio::test]
async fn specbook_items_filter_by_category() {
    let pool = setup().await;
    for (name, category) in [("아일랜드 상판", "주방"), ("세면대", "욕실"), ("후드", "주방")] {
        let input = hvlab_db::models::specbook::CreateSpecbookItem {
            name: Some(name.to_string()),
            category: Some(category.to_string()),
            ..Default::default()
        };
        let item = SpecbookRepo::create(&pool, &input).await.unwrap();
        assert!(item.is_library);
    }

    assert_eq!(SpecbookRepo::list(&pool, None).await.unwrap().len(), 3);
    let kitchen = SpecbookRepo::list(&pool, Some("주방")).await.unwrap();
    let names: Vec<_> = kitchen.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["후드", "아일랜드 상판"]);

    let removed = SpecbookRepo::delete(&pool, kitchen[0].id).await.unwrap();
    assert_eq!(removed.map(|i| i.name), Some("후드".to_string()));
    assert!(SpecbookRepo::delete(&pool, kitchen[0].id).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Test: execution records
// ---------------------------------------------------------------------------

#[tokio::test]
async fn execution_record_project_link_follows_name() {
    let pool = setup().await;
    let project = ProjectRepo::create(&pool, &new_project("목동 신시가지"), None)
        .await
        .unwrap();
    let input: CreateExecutionRecord = serde_json::from_value(json!({
        "project_name": "미등록 현장",
        "date": "2026-07-01",
        "item_name": "석고보드",
        "material_cost": 300000,
        "total_amount": 330000
    }))
    .unwrap();
    let record = ExecutionRecordRepo::create(&pool, &input, "신애", None)
        .await
        .unwrap();
    assert_eq!(record.project_id, None);
    assert_eq!(record.labor_cost, 0);
    assert!(record.images.0.is_empty());

    let rename = UpdateExecutionRecord {
        project_name: Some("목동 신시가지".to_string()),
        ..Default::default()
    };
    let moved = ExecutionRecordRepo::update(&pool, record.id, &rename, Some(project.id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(moved.project_id, Some(project.id));

    // Leaving the name alone keeps the link.
    let notes = UpdateExecutionRecord {
        notes: Some("2차 반입".to_string()),
        ..Default::default()
    };
    let kept = ExecutionRecordRepo::update(&pool, record.id, &notes, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(kept.project_id, Some(project.id));
    assert_eq!(kept.item_name, "석고보드");
}

// ---------------------------------------------------------------------------
// Test: payments
// ---------------------------------------------------------------------------

fn new_payment(project_id: i64) -> CreatePayment {
    serde_json::from_value(json!({
        "project_id": project_id,
        "amount": 500000,
        "category": "material",
        "bank_info": {
            "account_holder": "홍길동",
            "bank_name": "국민은행",
            "account_number": "110-123-456789"
        }
    }))
    .unwrap()
}

#[tokio::test]
async fn payment_workflow_is_guarded_by_status() {
    let pool = setup().await;
    let admin = user_id(&pool, "상준").await;
    let project = ProjectRepo::create(&pool, &new_project("청담"), None).await.unwrap();

    let payment = PaymentRepo::create(&pool, &new_payment(project.id), Some(UserRef::Id(admin)))
        .await
        .unwrap();
    assert_eq!(payment.status, "pending");
    assert_eq!(payment.urgency, "normal");
    assert_eq!(payment.payment_method, "bankTransfer");
    assert_eq!(payment.project_name.as_deref(), Some("청담"));
    assert_eq!(payment.requester_name.as_deref(), Some("상준"));
    assert_matches!(payment.requested_by, Some(UserRef::Id(id)) if id == admin);

    // complete before approve does nothing
    assert!(!PaymentRepo::complete(&pool, payment.id, admin, None).await.unwrap());
    assert!(PaymentRepo::approve(&pool, payment.id, admin).await.unwrap());
    assert!(!PaymentRepo::approve(&pool, payment.id, admin).await.unwrap());
    assert!(PaymentRepo::complete(&pool, payment.id, admin, Some("/uploads/r.png"))
        .await
        .unwrap());

    let done = PaymentRepo::find_by_id(&pool, payment.id).await.unwrap().unwrap();
    assert_eq!(done.status, "completed");
    assert!(done.approval_date.is_some());
    assert!(done.completion_date.is_some());
    assert!(done.processing_time_hours.is_some());
    assert_eq!(done.receipt_url.as_deref(), Some("/uploads/r.png"));
}

#[tokio::test]
async fn payment_name_requester_and_stats() {
    let pool = setup().await;
    let project = ProjectRepo::create(&pool, &new_project("한남"), None).await.unwrap();

    let first = PaymentRepo::create(
        &pool,
        &new_payment(project.id),
        Some(UserRef::Name("현장소장".to_string())),
    )
    .await
    .unwrap();
    PaymentRepo::create(&pool, &new_payment(project.id), None)
        .await
        .unwrap();
    assert_matches!(first.requested_by, Some(UserRef::Name(ref n)) if n == "현장소장");
    assert_eq!(first.requester_name.as_deref(), Some("현장소장"));

    PaymentRepo::set_status(&pool, first.id, PaymentStatus::Rejected, 1, Some("중복"))
        .await
        .unwrap();

    let pending = PaymentRepo::list(
        &pool,
        &PaymentFilter {
            status: Some(PaymentStatus::Pending),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(pending.len(), 1);

    let stats = PaymentRepo::stats(&pool).await.unwrap();
    assert_eq!(stats.total_count, 2);
    assert_eq!(stats.total_amount, 1_000_000);
    assert_eq!(stats.by_status.len(), 2);
}

// ---------------------------------------------------------------------------
// Test: other resources
// ---------------------------------------------------------------------------

#[tokio::test]
async fn construction_payment_clamps_vat_percentage() {
    let pool = setup().await;
    let input: CreateConstructionPayment = serde_json::from_value(json!({
        "project": "성수",
        "client": "김고객",
        "total_amount": 50_000_000,
        "vat_percentage": 130,
        "payments": [{ "types": ["계약금", "착수금"], "amount": 5_000_000 }]
    }))
    .unwrap();

    let created = ConstructionPaymentRepo::create(&pool, &input).await.unwrap();
    assert_eq!(created.vat_percentage, 100);
    assert_eq!(created.vat_type, "percentage");
    assert_eq!(created.payments.0[0].types.len(), 2);
}

#[tokio::test]
async fn work_request_completion_stamps_date() {
    let pool = setup().await;
    let input: CreateWorkRequest = serde_json::from_value(json!({
        "project": "성수",
        "request_type": "자재주문",
        "requested_by": "신애"
    }))
    .unwrap();
    let created = WorkRequestRepo::create(&pool, &input).await.unwrap();
    assert_eq!(created.priority, "medium");
    assert_eq!(created.description, "");
    assert!(created.request_date.is_some());
    assert!(created.completed_date.is_none());

    let update: UpdateWorkRequest =
        serde_json::from_value(json!({ "status": "completed" })).unwrap();
    let updated = WorkRequestRepo::update(&pool, created.id, &update)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.status, "completed");
    assert!(updated.completed_date.is_some());
}

#[tokio::test]
async fn site_logs_by_project_and_range() {
    let pool = setup().await;
    for (project, date) in [("성수", "2026-05-01"), ("성수", "2026-05-10"), ("한남", "2026-05-05")] {
        let input: CreateSiteLog =
            serde_json::from_value(json!({ "project": project, "date": date })).unwrap();
        SiteLogRepo::create(&pool, &input, "재성").await.unwrap();
    }

    let by_project = SiteLogRepo::list_by_project(&pool, "성수").await.unwrap();
    assert_eq!(by_project.len(), 2);
    assert_eq!(by_project[0].date.to_string(), "2026-05-10");

    let start = "2026-05-01".parse().unwrap();
    let end = "2026-05-05".parse().unwrap();
    let ranged = SiteLogRepo::list_in_range(&pool, start, end).await.unwrap();
    assert_eq!(ranged.len(), 2);
}

#[tokio::test]
async fn drawing_upsert_replaces_per_project_and_type() {
    let pool = setup().await;
    let admin = user_id(&pool, "상준").await;
    let manager = user_id(&pool, "신애").await;
    let project = ProjectRepo::create(&pool, &new_project("잠실"), None).await.unwrap();

    let first: UpsertDrawing = serde_json::from_value(json!({
        "project_id": project.id,
        "type": "전기도면",
        "image_url": "/uploads/drawings/a.png"
    }))
    .unwrap();
    let created = DrawingRepo::upsert(&pool, &first, admin).await.unwrap();

    let second: UpsertDrawing = serde_json::from_value(json!({
        "project_id": project.id,
        "type": "전기도면",
        "image_url": "/uploads/drawings/b.png",
        "rooms": [{ "id": "r1", "name": "거실", "x": 0.0, "y": 0.0, "width": 50.0, "height": 40.0 }]
    }))
    .unwrap();
    let replaced = DrawingRepo::upsert(&pool, &second, manager).await.unwrap();

    assert_eq!(replaced.id, created.id);
    assert_eq!(replaced.image_url, "/uploads/drawings/b.png");
    assert_eq!(replaced.created_by, Some(admin));
    assert_eq!(replaced.last_modified_by, Some(manager));
    assert_eq!(replaced.rooms.0.len(), 1);
    assert_eq!(DrawingRepo::list_by_project(&pool, project.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn notifications_read_state() {
    let pool = setup().await;
    let user = user_id(&pool, "재현").await;
    for title in ["결제 승인", "결제 완료"] {
        NotificationRepo::create(
            &pool,
            &CreateNotification {
                user_id: user,
                kind: "payment_status".to_string(),
                title: title.to_string(),
                message: None,
                link: None,
            },
        )
        .await
        .unwrap();
    }

    assert_eq!(NotificationRepo::unread_count(&pool, user).await.unwrap(), 2);
    let list = NotificationRepo::list_for_user(&pool, user, false, 50, 0).await.unwrap();
    assert!(NotificationRepo::mark_read(&pool, list[0].id, user).await.unwrap());
    assert!(!NotificationRepo::mark_read(&pool, list[0].id, user).await.unwrap());
    assert_eq!(NotificationRepo::mark_all_read(&pool, user).await.unwrap(), 1);
    assert_eq!(NotificationRepo::unread_count(&pool, user).await.unwrap(), 0);
}

#[tokio::test]
async fn kakao_token_upsert_keeps_refresh_token() {
    let pool = setup().await;
    let user = user_id(&pool, "상준").await;

    KakaoTokenRepo::upsert(&pool, user, "access-1", Some("refresh-1"), Some(21599))
        .await
        .unwrap();
    let refreshed = KakaoTokenRepo::upsert(&pool, user, "access-2", None, Some(21599))
        .await
        .unwrap();

    assert_eq!(refreshed.access_token, "access-2");
    assert_eq!(refreshed.refresh_token.as_deref(), Some("refresh-1"));
}

#[tokio::test]
async fn reference_lists_are_ordered() {
    let pool = setup().await;
    let processes = ProcessRepo::list(&pool, false).await.unwrap();
    assert_eq!(processes.first().map(|p| p.name.as_str()), Some("현장점검"));
    let categories = SpecbookRepo::list_categories(&pool).await.unwrap();
    assert_eq!(categories.first().map(|c| c.name.as_str()), Some("주방"));
}
