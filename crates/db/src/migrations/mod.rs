//! Startup schema runner.
//!
//! Runs in three passes, all idempotent:
//!
//! 1. `CREATE TABLE IF NOT EXISTS` / `CREATE INDEX IF NOT EXISTS`.
//! 2. Additive `ALTER TABLE ... ADD COLUMN` for late columns. A "duplicate
//!    column name" failure counts as already applied.
//! 3. Seed rows, each set inserted only if its table is empty.
//!
//! No failure aborts startup. Anything unexpected is logged and recorded in
//! the returned [`MigrationReport`].

mod columns;
mod schema;
mod seed;

pub use seed::{
    SeedContractor, SeedOptions, DEFAULT_PROCESSES, DEFAULT_SPECBOOK_CATEGORIES, DEFAULT_USERS,
};

use crate::DbPool;

/// What a migration run did.
#[derive(Debug, Default, Clone)]
pub struct MigrationReport {
    /// Tables whose `CREATE TABLE IF NOT EXISTS` succeeded.
    pub tables_ensured: usize,
    /// `table.column` names added in this run.
    pub columns_added: Vec<String>,
    /// `table.column` names that were already present.
    pub columns_present: Vec<String>,
    /// Tables that received seed rows in this run.
    pub seeded: Vec<&'static str>,
    /// Statements that failed for any other reason.
    pub failures: Vec<String>,
}

impl MigrationReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Bring the schema up to date and seed empty reference tables.
pub async fn run_migrations(pool: &DbPool, seed: &SeedOptions) -> MigrationReport {
    let mut report = MigrationReport::default();

    // --- Tables and indexes ---
    for (table, ddl) in schema::TABLES {
        match sqlx::query(ddl).execute(pool).await {
            Ok(_) => report.tables_ensured += 1,
            Err(e) => {
                tracing::warn!(table, error = %e, "Failed to create table");
                report.failures.push(format!("create {table}: {e}"));
            }
        }
    }
    for ddl in schema::INDEXES {
        if let Err(e) = sqlx::query(ddl).execute(pool).await {
            tracing::warn!(statement = ddl, error = %e, "Failed to create index");
            report.failures.push(format!("{ddl}: {e}"));
        }
    }

    // --- Additive columns ---
    for column in columns::ADDITIVE_COLUMNS {
        let name = format!("{}.{}", column.table, column.column);
        match sqlx::query(&column.statement()).execute(pool).await {
            Ok(_) => {
                tracing::info!(column = %name, "Added column");
                report.columns_added.push(name);
            }
            Err(e) if columns::is_duplicate_column(&e) => {
                tracing::debug!(column = %name, "Column already present");
                report.columns_present.push(name);
            }
            Err(e) => {
                tracing::warn!(column = %name, error = %e, "Failed to add column");
                report.failures.push(format!("add {name}: {e}"));
            }
        }
    }

    // --- Seed data ---
    seed_table(pool, &mut report, "users", |pool| {
        let hash = seed.default_password_hash.clone();
        async move { seed::insert_default_users(&pool, &hash).await }
    })
    .await;

    seed_table(pool, &mut report, "processes", |pool| async move {
        seed::insert_named_rows(&pool, "processes", DEFAULT_PROCESSES).await
    })
    .await;

    seed_table(pool, &mut report, "specbook_categories", |pool| async move {
        seed::insert_named_rows(&pool, "specbook_categories", DEFAULT_SPECBOOK_CATEGORIES).await
    })
    .await;

    if !seed.contractors.is_empty() {
        let contractors = seed.contractors.clone();
        seed_table(pool, &mut report, "contractors", |pool| async move {
            seed::insert_contractors(&pool, &contractors).await
        })
        .await;
    }

    tracing::info!(
        tables = report.tables_ensured,
        columns_added = report.columns_added.len(),
        seeded = ?report.seeded,
        failures = report.failures.len(),
        "Database migrations finished"
    );

    report
}

/// Run `insert` only when `table` currently has no rows.
async fn seed_table<F, Fut>(pool: &DbPool, report: &mut MigrationReport, table: &'static str, insert: F)
where
    F: FnOnce(DbPool) -> Fut,
    Fut: std::future::Future<Output = Result<(), sqlx::Error>>,
{
    match seed::table_is_empty(pool, table).await {
        Ok(true) => match insert(pool.clone()).await {
            Ok(()) => {
                tracing::info!(table, "Seeded empty table");
                report.seeded.push(table);
            }
            Err(e) => {
                tracing::warn!(table, error = %e, "Failed to seed table");
                report.failures.push(format!("seed {table}: {e}"));
            }
        },
        Ok(false) => tracing::debug!(table, "Table has rows, skipping seed"),
        Err(e) => {
            tracing::warn!(table, error = %e, "Failed to count rows");
            report.failures.push(format!("count {table}: {e}"));
        }
    }
}
