//! Repository for `specbook_items` and the seeded `specbook_categories`.

use hvlab_core::types::DbId;

use crate::models::specbook::{
    CreateSpecbookItem, SpecbookCategory, SpecbookItem, UpdateSpecbookItem,
};
use crate::repositories::NOW;
use crate::DbPool;

const COLUMNS: &str = "\
    id, name, category, brand, price, description, image_url, project_id, is_library, \
    created_at, updated_at";

pub struct SpecbookRepo;

impl SpecbookRepo {
    pub async fn list_categories(pool: &DbPool) -> Result<Vec<SpecbookCategory>, sqlx::Error> {
        sqlx::query_as::<_, SpecbookCategory>(
            "SELECT id, name, sort_order FROM specbook_categories ORDER BY sort_order ASC, id ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Items, newest first, optionally limited to one category.
    pub async fn list(
        pool: &DbPool,
        category: Option<&str>,
    ) -> Result<Vec<SpecbookItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM specbook_items
             WHERE (?1 IS NULL OR category = ?1)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, SpecbookItem>(&query)
            .bind(category)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<SpecbookItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM specbook_items WHERE id = ?1");
        sqlx::query_as::<_, SpecbookItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a library item (one linked to a project when `project_id` is set).
    pub async fn create(
        pool: &DbPool,
        input: &CreateSpecbookItem,
    ) -> Result<SpecbookItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO specbook_items (
                name, category, brand, price, description, image_url, project_id, is_library
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7 IS NULL)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SpecbookItem>(&query)
            .bind(&input.name)
            .bind(&input.category)
            .bind(&input.brand)
            .bind(&input.price)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(input.project_id)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &DbPool,
        id: DbId,
        input: &UpdateSpecbookItem,
    ) -> Result<Option<SpecbookItem>, sqlx::Error> {
        let query = format!(
            "UPDATE specbook_items SET
                name = COALESCE(?2, name),
                category = COALESCE(?3, category),
                brand = COALESCE(?4, brand),
                price = COALESCE(?5, price),
                description = COALESCE(?6, description),
                image_url = COALESCE(?7, image_url),
                updated_at = {NOW}
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SpecbookItem>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.category)
            .bind(&input.brand)
            .bind(&input.price)
            .bind(&input.description)
            .bind(&input.image_url)
            .fetch_optional(pool)
            .await
    }

    /// Delete an item, returning it so the caller can remove its image.
    pub async fn delete(pool: &DbPool, id: DbId) -> Result<Option<SpecbookItem>, sqlx::Error> {
        let query = format!("DELETE FROM specbook_items WHERE id = ?1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, SpecbookItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
