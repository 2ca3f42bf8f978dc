//! Construction processes (공정) used to label schedules, payments and
//! contractors.

use hvlab_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Process {
    pub id: DbId,
    pub name: String,
    pub sort_order: i64,
    pub is_active: bool,
}

/// Query for `GET /processes`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProcessQuery {
    #[serde(default, rename = "includeInactive")]
    pub include_inactive: bool,
}

/// Body of `POST /processes`. The name is trimmed before it is stored.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProcess {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProcess {
    pub name: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateProcess {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.is_active.is_none()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProcessOrder {
    pub id: DbId,
}

/// Body of `PUT /processes/reorder/bulk`: the new order, first to last.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReorderProcesses {
    #[serde(default)]
    pub orders: Vec<ProcessOrder>,
}
