//! Seed rows inserted only into empty tables.

use hvlab_core::roles::{ROLE_ADMIN, ROLE_MANAGER, ROLE_WORKER};
use serde::Deserialize;

use crate::DbPool;

/// Default staff accounts: `(username, name, role, department)`.
pub const DEFAULT_USERS: &[(&str, &str, &str, &str)] = &[
    ("상준", "상준", ROLE_ADMIN, "관리부"),
    ("신애", "신애", ROLE_MANAGER, "관리부"),
    ("재천", "재천", ROLE_WORKER, "시공부"),
    ("민기", "민기", ROLE_WORKER, "시공부"),
    ("재성", "재성", ROLE_WORKER, "시공부"),
    ("재현", "재현", ROLE_WORKER, "시공부"),
];

/// Construction processes in the order they usually happen on site.
pub const DEFAULT_PROCESSES: &[&str] = &[
    "현장점검", "가설", "철거", "방수", "단열", "설비", "전기배선", "인터넷선",
    "에어컨배관", "전열교환기", "소방", "창호", "현관문교체", "목공", "조명타공",
    "금속", "타일", "도장", "마루", "필름", "도배", "중문", "가구", "상판",
    "욕실집기", "조명", "이노솔", "유리", "실리콘", "도어락", "커튼/블라인드",
    "청소", "마감", "준공검사", "가전입고", "스타일링", "촬영", "이사", "기타",
];

pub const DEFAULT_SPECBOOK_CATEGORIES: &[&str] = &[
    "주방", "욕실/세면대", "수전", "타일", "조명", "도어/손잡이", "바닥재", "벽지/도장",
    "가구", "기타",
];

/// One row of the contractor directory import file.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedContractor {
    pub name: String,
    pub process: String,
    #[serde(default)]
    pub rank: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Inputs for seeding that the database layer cannot produce itself.
#[derive(Debug, Clone)]
pub struct SeedOptions {
    /// Pre-hashed password given to every default account.
    pub default_password_hash: String,
    /// Contractor directory. When empty the contractors table is left alone.
    pub contractors: Vec<SeedContractor>,
}

pub(crate) async fn table_is_empty(pool: &DbPool, table: &str) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await?;
    Ok(count == 0)
}

pub(crate) async fn insert_default_users(pool: &DbPool, password_hash: &str) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    for (username, name, role, department) in DEFAULT_USERS {
        sqlx::query(
            "INSERT INTO users (username, password_hash, name, role, department)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(*username)
        .bind(password_hash)
        .bind(*name)
        .bind(*role)
        .bind(*department)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await
}

pub(crate) async fn insert_named_rows(
    pool: &DbPool,
    table: &str,
    names: &[&str],
) -> Result<(), sqlx::Error> {
    let query = format!("INSERT INTO {table} (name, sort_order) VALUES (?1, ?2)");
    let mut tx = pool.begin().await?;
    for (order, name) in names.iter().enumerate() {
        sqlx::query(&query)
            .bind(*name)
            .bind(order as i64)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await
}

pub(crate) async fn insert_contractors(
    pool: &DbPool,
    contractors: &[SeedContractor],
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    for c in contractors {
        sqlx::query(
            "INSERT INTO contractors (rank, company_name, name, process, contact, account_number, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .bind(&c.rank)
        .bind(&c.company_name)
        .bind(&c.name)
        .bind(&c.process)
        .bind(&c.contact)
        .bind(&c.account_number)
        .bind(&c.notes)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await
}
