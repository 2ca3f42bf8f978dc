//! Repository for the `projects` table.
//!
//! Projects are soft-deleted; every read filters on `deleted_at IS NULL`.

use hvlab_core::types::DbId;
use hvlab_core::validation::clamp_percent;
use sqlx::types::Json;

use crate::models::project::{CreateProject, Project, ProjectFilter, UpdateProject, DEFAULT_COLOR_CODE};
use crate::repositories::NOW;
use crate::DbPool;

const COLUMNS: &str = "\
    id, name, client_name, client_phone, client_email, client_address, \
    address, detail_address, latitude, longitude, start_date, end_date, \
    status, budget, actual_cost, manager_id, field_manager_ids, worker_ids, \
    color_code, progress, description, created_by, deleted_at, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    ///
    /// Unset fields take their defaults: status `planning`, progress 0,
    /// actual cost 0, color `#9CA3AF`.
    pub async fn create(
        pool: &DbPool,
        input: &CreateProject,
        created_by: Option<DbId>,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (
                name, client_name, client_phone, client_email, client_address,
                address, detail_address, latitude, longitude, start_date, end_date,
                status, budget, actual_cost, manager_id, field_manager_ids, worker_ids,
                color_code, progress, description, created_by)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11,
                     ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21)
             RETURNING {COLUMNS}"
        );
        let coordinates = input.location.coordinates;
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(&input.client.name)
            .bind(&input.client.phone)
            .bind(&input.client.email)
            .bind(&input.client.address)
            .bind(&input.location.address)
            .bind(&input.location.detail_address)
            .bind(coordinates.map(|c| c.lat))
            .bind(coordinates.map(|c| c.lng))
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.status.map(|s| s.as_str()).unwrap_or("planning"))
            .bind(input.budget)
            .bind(input.actual_cost.unwrap_or(0))
            .bind(input.manager_id)
            .bind(Json(&input.field_manager_ids))
            .bind(Json(&input.worker_ids))
            .bind(input.color_code.as_deref().unwrap_or(DEFAULT_COLOR_CODE))
            .bind(clamp_percent(input.progress.unwrap_or(0)))
            .bind(&input.description)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a live project by ID.
    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = ?1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List live projects, newest first.
    pub async fn list(pool: &DbPool, filter: &ProjectFilter) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE deleted_at IS NULL AND (?1 IS NULL OR status = ?1)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(filter.status.map(|s| s.as_str()))
            .fetch_all(pool)
            .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &DbPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = COALESCE(?2, name),
                client_name = COALESCE(?3, client_name),
                client_phone = COALESCE(?4, client_phone),
                client_email = COALESCE(?5, client_email),
                client_address = COALESCE(?6, client_address),
                address = COALESCE(?7, address),
                detail_address = COALESCE(?8, detail_address),
                latitude = COALESCE(?9, latitude),
                longitude = COALESCE(?10, longitude),
                start_date = COALESCE(?11, start_date),
                end_date = COALESCE(?12, end_date),
                status = COALESCE(?13, status),
                budget = COALESCE(?14, budget),
                actual_cost = COALESCE(?15, actual_cost),
                manager_id = COALESCE(?16, manager_id),
                field_manager_ids = COALESCE(?17, field_manager_ids),
                worker_ids = COALESCE(?18, worker_ids),
                color_code = COALESCE(?19, color_code),
                progress = COALESCE(?20, progress),
                description = COALESCE(?21, description),
                updated_at = {NOW}
             WHERE id = ?1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        let client = input.client.as_ref();
        let location = input.location.as_ref();
        let coordinates = location.and_then(|l| l.coordinates);
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(client.and_then(|c| c.name.as_deref()))
            .bind(client.and_then(|c| c.phone.as_deref()))
            .bind(client.and_then(|c| c.email.as_deref()))
            .bind(client.and_then(|c| c.address.as_deref()))
            .bind(location.and_then(|l| l.address.as_deref()))
            .bind(location.and_then(|l| l.detail_address.as_deref()))
            .bind(coordinates.map(|c| c.lat))
            .bind(coordinates.map(|c| c.lng))
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.status.map(|s| s.as_str()))
            .bind(input.budget)
            .bind(input.actual_cost)
            .bind(input.manager_id)
            .bind(input.field_manager_ids.as_ref().map(Json))
            .bind(input.worker_ids.as_ref().map(Json))
            .bind(&input.color_code)
            .bind(input.progress.map(clamp_percent))
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a project. Returns `true` if the row was updated.
    pub async fn soft_delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET deleted_at = {NOW}, updated_at = {NOW}
             WHERE id = ?1 AND deleted_at IS NULL"
        );
        let result = sqlx::query(&query).bind(id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }

    /// Name of a live project, used when composing notifications.
    pub async fn name_of(pool: &DbPool, id: DbId) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar("SELECT name FROM projects WHERE id = ?1 AND deleted_at IS NULL")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Id of the live project with exactly this name.
    pub async fn id_by_name(pool: &DbPool, name: &str) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT id FROM projects WHERE name = ?1 AND deleted_at IS NULL ORDER BY id LIMIT 1",
        )
        .bind(name)
        .fetch_optional(pool)
        .await
    }
}
