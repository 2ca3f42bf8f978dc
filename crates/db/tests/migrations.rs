//! Integration tests for the startup migration runner.
//!
//! Each test runs against a private in-memory database.

use hvlab_db::migrations::{SeedContractor, DEFAULT_PROCESSES, DEFAULT_SPECBOOK_CATEGORIES, DEFAULT_USERS};
use hvlab_db::{create_memory_pool, run_migrations, DbPool, SeedOptions};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn seed_options() -> SeedOptions {
    SeedOptions {
        default_password_hash: "test-hash".to_string(),
        contractors: vec![SeedContractor {
            name: "김반장".to_string(),
            process: "타일".to_string(),
            rank: Some("반장".to_string()),
            company_name: None,
            contact: Some("010-0000-0000".to_string()),
            account_number: None,
            notes: None,
        }],
    }
}

async fn count(pool: &DbPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap_or_else(|e| panic!("{table} count failed: {e}"))
}

async fn has_column(pool: &DbPool, table: &str, column: &str) -> bool {
    let n: i64 = sqlx::query_scalar(&format!(
        "SELECT COUNT(*) FROM pragma_table_info('{table}') WHERE name = ?1"
    ))
    .bind(column)
    .fetch_one(pool)
    .await
    .unwrap();
    n == 1
}

// ---------------------------------------------------------------------------
// Test: fresh database
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fresh_database_is_created_and_seeded() {
    let pool = create_memory_pool().await.unwrap();
    let report = run_migrations(&pool, &seed_options()).await;

    assert!(report.is_clean(), "failures: {:?}", report.failures);
    assert!(report.tables_ensured >= 17);
    assert_eq!(count(&pool, "users").await, DEFAULT_USERS.len() as i64);
    assert_eq!(count(&pool, "processes").await, DEFAULT_PROCESSES.len() as i64);
    assert_eq!(
        count(&pool, "specbook_categories").await,
        DEFAULT_SPECBOOK_CATEGORIES.len() as i64
    );
    assert_eq!(count(&pool, "contractors").await, 1);
    assert!(report.seeded.contains(&"users"));
    assert!(report.seeded.contains(&"contractors"));
}

#[tokio::test]
async fn additive_columns_exist_after_first_run() {
    let pool = create_memory_pool().await.unwrap();
    let report = run_migrations(&pool, &seed_options()).await;

    assert!(has_column(&pool, "schedules", "time").await);
    assert!(has_column(&pool, "payment_requests", "item_name").await);
    assert!(has_column(&pool, "payment_requests", "includes_vat").await);
    assert!(has_column(&pool, "work_requests", "request_type").await);
    assert!(report.columns_present.is_empty());
    assert!(report.columns_added.contains(&"schedules.time".to_string()));
}

// ---------------------------------------------------------------------------
// Test: idempotence
// ---------------------------------------------------------------------------

#[tokio::test]
async fn second_run_is_clean_and_does_not_duplicate_seeds() {
    let pool = create_memory_pool().await.unwrap();
    let first = run_migrations(&pool, &seed_options()).await;
    let second = run_migrations(&pool, &seed_options()).await;

    assert!(first.is_clean());
    assert!(second.is_clean(), "failures: {:?}", second.failures);
    assert!(second.columns_added.is_empty());
    assert_eq!(second.columns_present.len(), first.columns_added.len());
    assert!(second.seeded.is_empty());

    assert_eq!(count(&pool, "users").await, DEFAULT_USERS.len() as i64);
    assert_eq!(count(&pool, "processes").await, DEFAULT_PROCESSES.len() as i64);
    assert_eq!(count(&pool, "contractors").await, 1);
}

#[tokio::test]
async fn non_empty_table_is_not_seeded() {
    let pool = create_memory_pool().await.unwrap();
    let first = run_migrations(&pool, &seed_options()).await;
    assert!(first.is_clean());

    sqlx::query("DELETE FROM specbook_categories")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO specbook_categories (name, sort_order) VALUES ('커스텀', 0)")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("DELETE FROM processes").execute(&pool).await.unwrap();

    let second = run_migrations(&pool, &seed_options()).await;

    assert_eq!(count(&pool, "specbook_categories").await, 1);
    assert_eq!(count(&pool, "processes").await, DEFAULT_PROCESSES.len() as i64);
    assert_eq!(second.seeded, vec!["processes"]);
}

#[tokio::test]
async fn empty_contractor_list_leaves_table_alone() {
    let pool = create_memory_pool().await.unwrap();
    let options = SeedOptions {
        default_password_hash: "test-hash".to_string(),
        contractors: vec![],
    };
    let report = run_migrations(&pool, &options).await;

    assert!(report.is_clean());
    assert_eq!(count(&pool, "contractors").await, 0);
    assert!(!report.seeded.contains(&"contractors"));
}

#[tokio::test]
async fn foreign_keys_are_enforced() {
    let pool = create_memory_pool().await.unwrap();
    run_migrations(&pool, &seed_options()).await;

    let result = sqlx::query(
        "INSERT INTO payment_requests (project_id, amount, category) VALUES (9999, 100, 'material')",
    )
    .execute(&pool)
    .await;
    assert!(result.is_err());
}
