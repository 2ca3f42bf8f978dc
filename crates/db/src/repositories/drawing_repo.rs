//! Repository for the `drawings` table.

use hvlab_core::types::DbId;
use sqlx::types::Json;

use crate::models::drawing::{Drawing, UpsertDrawing};
use crate::repositories::NOW;
use crate::DbPool;

const COLUMNS: &str = "\
    id, project_id, type, image_url, markers, rooms, naver_type_sqm, naver_type_pyeong, \
    naver_area, created_by, last_modified_by, created_at, updated_at";

pub struct DrawingRepo;

impl DrawingRepo {
    /// Create the drawing for `(project_id, type)` or replace the existing
    /// one. `created_by` is kept from the first save.
    pub async fn upsert(
        pool: &DbPool,
        input: &UpsertDrawing,
        user_id: DbId,
    ) -> Result<Drawing, sqlx::Error> {
        let query = format!(
            "INSERT INTO drawings (
                project_id, type, image_url, markers, rooms, naver_type_sqm,
                naver_type_pyeong, naver_area, created_by, last_modified_by)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)
             ON CONFLICT (project_id, type) DO UPDATE SET
                image_url = excluded.image_url,
                markers = excluded.markers,
                rooms = excluded.rooms,
                naver_type_sqm = excluded.naver_type_sqm,
                naver_type_pyeong = excluded.naver_type_pyeong,
                naver_area = excluded.naver_area,
                last_modified_by = excluded.last_modified_by,
                updated_at = {NOW}
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Drawing>(&query)
            .bind(input.project_id)
            .bind(&input.kind)
            .bind(&input.image_url)
            .bind(Json(&input.markers))
            .bind(Json(&input.rooms))
            .bind(&input.naver_type_sqm)
            .bind(&input.naver_type_pyeong)
            .bind(&input.naver_area)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// All drawings of a project, in type order.
    pub async fn list_by_project(
        pool: &DbPool,
        project_id: DbId,
    ) -> Result<Vec<Drawing>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM drawings WHERE project_id = ?1 ORDER BY type");
        sqlx::query_as::<_, Drawing>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find(
        pool: &DbPool,
        project_id: DbId,
        kind: &str,
    ) -> Result<Option<Drawing>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM drawings WHERE project_id = ?1 AND type = ?2");
        sqlx::query_as::<_, Drawing>(&query)
            .bind(project_id)
            .bind(kind)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &DbPool, project_id: DbId, kind: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM drawings WHERE project_id = ?1 AND type = ?2")
            .bind(project_id)
            .bind(kind)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
