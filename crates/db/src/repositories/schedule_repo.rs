//! Repository for `schedules`, `schedule_assignees` and `schedule_comments`.

use std::collections::HashMap;

use hvlab_core::schedule::{duration_days, is_complete, NO_TIME};
use hvlab_core::types::DbId;
use hvlab_core::user_ref::UserRef;
use hvlab_core::validation::clamp_percent;
use sqlx::types::Json;
use sqlx::{Sqlite, Transaction};

use crate::models::schedule::{
    CreateSchedule, Schedule, ScheduleAssignee, ScheduleComment, ScheduleDetail, ScheduleFilter,
    ScheduleStats, UpdateSchedule,
};
use crate::repositories::NOW;
use crate::DbPool;

const COLUMNS: &str = "\
    id, project_id, title, type, phase, start_date, end_date, all_day, time, \
    progress, priority, dependencies, reminders, is_completed, completed_at, \
    as_request_id, description, created_by, created_at, updated_at";

const COMMENT_COLUMNS: &str = "id, schedule_id, user_id, author_name, content, created_at";

/// Provides CRUD operations for schedules and their children.
pub struct ScheduleRepo;

impl ScheduleRepo {
    /// Insert a schedule with its assignees in one transaction.
    pub async fn create(
        pool: &DbPool,
        input: &CreateSchedule,
        created_by: Option<DbId>,
    ) -> Result<ScheduleDetail, sqlx::Error> {
        let progress = clamp_percent(input.progress.unwrap_or(0));
        let query = format!(
            "INSERT INTO schedules (
                project_id, title, type, phase, start_date, end_date, all_day, time,
                progress, priority, dependencies, reminders, is_completed, completed_at,
                as_request_id, description, created_by)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13,
                     CASE WHEN ?13 THEN {NOW} END, ?14, ?15, ?16)
             RETURNING id"
        );

        let mut tx = pool.begin().await?;
        let id: DbId = sqlx::query_scalar(&query)
            .bind(input.project_id)
            .bind(&input.title)
            .bind(input.kind.map(|k| k.as_str()).unwrap_or("construction"))
            .bind(&input.phase)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.all_day)
            .bind(input.time.as_deref().unwrap_or(NO_TIME))
            .bind(progress)
            .bind(input.priority.map(|p| p.as_str()).unwrap_or("medium"))
            .bind(Json(&input.dependencies))
            .bind(Json(&input.reminders))
            .bind(is_complete(progress))
            .bind(input.as_request_id)
            .bind(&input.description)
            .bind(created_by)
            .fetch_one(&mut *tx)
            .await?;
        Self::insert_assignees(&mut tx, id, &input.assignees).await?;
        tx.commit().await?;

        Self::find_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Find a schedule with its assignees.
    pub async fn find_by_id(
        pool: &DbPool,
        id: DbId,
    ) -> Result<Option<ScheduleDetail>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM schedules WHERE id = ?1");
        let schedule = sqlx::query_as::<_, Schedule>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        match schedule {
            Some(schedule) => {
                let assignees = Self::assignees_of(pool, schedule.id).await?;
                Ok(Some(into_detail(schedule, assignees)))
            }
            None => Ok(None),
        }
    }

    /// List schedules by start date. Date bounds select schedules that
    /// overlap `[start, end]`; `assignee_id` keeps the ones assigned to a
    /// user, with every assignee still listed on each.
    pub async fn list(
        pool: &DbPool,
        filter: &ScheduleFilter,
    ) -> Result<Vec<ScheduleDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM schedules
             WHERE (?1 IS NULL OR project_id = ?1)
               AND (?2 IS NULL OR end_date >= ?2)
               AND (?3 IS NULL OR start_date <= ?3)
               AND (?4 IS NULL OR EXISTS (
                    SELECT 1 FROM schedule_assignees x
                    WHERE x.schedule_id = schedules.id AND x.user_id = ?4))
             ORDER BY start_date ASC, id ASC"
        );
        let schedules = sqlx::query_as::<_, Schedule>(&query)
            .bind(filter.project_id)
            .bind(filter.start)
            .bind(filter.end)
            .bind(filter.assignee_id)
            .fetch_all(pool)
            .await?;

        let assignee_query = "SELECT a.schedule_id, a.user_id, a.name
             FROM schedule_assignees a JOIN schedules s ON s.id = a.schedule_id
             WHERE (?1 IS NULL OR s.project_id = ?1)
               AND (?2 IS NULL OR s.end_date >= ?2)
               AND (?3 IS NULL OR s.start_date <= ?3)
               AND (?4 IS NULL OR EXISTS (
                    SELECT 1 FROM schedule_assignees x
                    WHERE x.schedule_id = s.id AND x.user_id = ?4))
             ORDER BY a.id";
        let rows = sqlx::query_as::<_, ScheduleAssignee>(assignee_query)
            .bind(filter.project_id)
            .bind(filter.start)
            .bind(filter.end)
            .bind(filter.assignee_id)
            .fetch_all(pool)
            .await?;

        let mut by_schedule: HashMap<DbId, Vec<ScheduleAssignee>> = HashMap::new();
        for row in rows {
            by_schedule.entry(row.schedule_id).or_default().push(row);
        }
        Ok(schedules
            .into_iter()
            .map(|schedule| {
                let assignees = by_schedule.remove(&schedule.id).unwrap_or_default();
                into_detail(schedule, assignees)
            })
            .collect())
    }

    pub async fn project_stats(
        pool: &DbPool,
        project_id: DbId,
    ) -> Result<ScheduleStats, sqlx::Error> {
        sqlx::query_as::<_, ScheduleStats>(
            "SELECT
                COUNT(*) AS total_schedules,
                COALESCE(SUM(is_completed), 0) AS completed_schedules,
                COALESCE(SUM(NOT is_completed AND progress > 0), 0) AS in_progress_schedules,
                COALESCE(SUM(NOT is_completed AND progress = 0), 0) AS pending_schedules,
                AVG(progress) AS average_progress
             FROM schedules WHERE project_id = ?1",
        )
        .bind(project_id)
        .fetch_one(pool)
        .await
    }

    /// Update a schedule. Only non-`None` fields are applied; `assignees`
    /// replaces the whole set when present.
    pub async fn update(
        pool: &DbPool,
        id: DbId,
        input: &UpdateSchedule,
    ) -> Result<Option<ScheduleDetail>, sqlx::Error> {
        let progress = input.progress.map(clamp_percent);
        // Explicit is_completed wins over the one implied by progress.
        let completed = input.is_completed.or(progress.map(is_complete));
        let query = format!(
            "UPDATE schedules SET
                project_id = COALESCE(?2, project_id),
                title = COALESCE(?3, title),
                type = COALESCE(?4, type),
                phase = COALESCE(?5, phase),
                start_date = COALESCE(?6, start_date),
                end_date = COALESCE(?7, end_date),
                all_day = COALESCE(?8, all_day),
                time = COALESCE(?9, time),
                progress = COALESCE(?10, progress),
                priority = COALESCE(?11, priority),
                dependencies = COALESCE(?12, dependencies),
                reminders = COALESCE(?13, reminders),
                completed_at = CASE
                    WHEN ?14 IS NULL THEN completed_at
                    WHEN ?14 AND NOT is_completed THEN {NOW}
                    WHEN ?14 THEN completed_at
                    ELSE NULL END,
                is_completed = COALESCE(?14, is_completed),
                description = COALESCE(?15, description),
                updated_at = {NOW}
             WHERE id = ?1"
        );

        let mut tx = pool.begin().await?;
        let result = sqlx::query(&query)
            .bind(id)
            .bind(input.project_id)
            .bind(&input.title)
            .bind(input.kind.map(|k| k.as_str()))
            .bind(&input.phase)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.all_day)
            .bind(&input.time)
            .bind(progress)
            .bind(input.priority.map(|p| p.as_str()))
            .bind(input.dependencies.as_ref().map(Json))
            .bind(input.reminders.as_ref().map(Json))
            .bind(completed)
            .bind(&input.description)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        if let Some(assignees) = &input.assignees {
            sqlx::query("DELETE FROM schedule_assignees WHERE schedule_id = ?1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            Self::insert_assignees(&mut tx, id, assignees).await?;
        }
        tx.commit().await?;

        Self::find_by_id(pool, id).await
    }

    /// Set progress (clamped to 0..=100). Reaching 100 marks the schedule
    /// completed; dropping below clears completion.
    pub async fn set_progress(
        pool: &DbPool,
        id: DbId,
        progress: i64,
    ) -> Result<Option<ScheduleDetail>, sqlx::Error> {
        let update = UpdateSchedule {
            progress: Some(progress),
            ..Default::default()
        };
        Self::update(pool, id, &update).await
    }

    /// Delete a schedule. Assignees and comments cascade.
    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM schedules WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Comments
    // -----------------------------------------------------------------------

    pub async fn add_comment(
        pool: &DbPool,
        schedule_id: DbId,
        user_id: Option<DbId>,
        author_name: &str,
        content: &str,
    ) -> Result<ScheduleComment, sqlx::Error> {
        let query = format!(
            "INSERT INTO schedule_comments (schedule_id, user_id, author_name, content)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING {COMMENT_COLUMNS}"
        );
        sqlx::query_as::<_, ScheduleComment>(&query)
            .bind(schedule_id)
            .bind(user_id)
            .bind(author_name)
            .bind(content)
            .fetch_one(pool)
            .await
    }

    /// Comments on a schedule, oldest first.
    pub async fn list_comments(
        pool: &DbPool,
        schedule_id: DbId,
    ) -> Result<Vec<ScheduleComment>, sqlx::Error> {
        let query = format!(
            "SELECT {COMMENT_COLUMNS} FROM schedule_comments
             WHERE schedule_id = ?1 ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, ScheduleComment>(&query)
            .bind(schedule_id)
            .fetch_all(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Assignees
    // -----------------------------------------------------------------------

    /// Insert assignees. User ids are resolved to the user's name and
    /// unknown ids are skipped; free-text names are linked to a user with
    /// the same name when one exists. Duplicates are ignored.
    async fn insert_assignees(
        tx: &mut Transaction<'_, Sqlite>,
        schedule_id: DbId,
        assignees: &[UserRef],
    ) -> Result<(), sqlx::Error> {
        for assignee in assignees {
            match assignee {
                UserRef::Id(user_id) => {
                    sqlx::query(
                        "INSERT OR IGNORE INTO schedule_assignees (schedule_id, user_id, name)
                         SELECT ?1, id, name FROM users WHERE id = ?2",
                    )
                    .bind(schedule_id)
                    .bind(*user_id)
                    .execute(&mut **tx)
                    .await?;
                }
                UserRef::Name(name) => {
                    let name = name.trim();
                    if name.is_empty() {
                        continue;
                    }
                    sqlx::query(
                        "INSERT OR IGNORE INTO schedule_assignees (schedule_id, user_id, name)
                         VALUES (?1, (SELECT id FROM users WHERE name = ?2 ORDER BY id LIMIT 1), ?2)",
                    )
                    .bind(schedule_id)
                    .bind(name)
                    .execute(&mut **tx)
                    .await?;
                }
            }
        }
        Ok(())
    }

    async fn assignees_of(
        pool: &DbPool,
        schedule_id: DbId,
    ) -> Result<Vec<ScheduleAssignee>, sqlx::Error> {
        sqlx::query_as::<_, ScheduleAssignee>(
            "SELECT schedule_id, user_id, name FROM schedule_assignees
             WHERE schedule_id = ?1 ORDER BY id",
        )
        .bind(schedule_id)
        .fetch_all(pool)
        .await
    }
}

fn into_detail(schedule: Schedule, assignees: Vec<ScheduleAssignee>) -> ScheduleDetail {
    ScheduleDetail {
        duration_days: duration_days(schedule.start_date, schedule.end_date),
        schedule,
        assignees,
    }
}
