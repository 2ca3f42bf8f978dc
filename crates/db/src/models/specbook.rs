//! Spec book: the finish and fixture library shown to clients.

use hvlab_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Category label meaning "no category filter".
pub const ALL_CATEGORIES: &str = "전체";

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SpecbookCategory {
    pub id: DbId,
    pub name: String,
    pub sort_order: i64,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SpecbookItem {
    pub id: DbId,
    pub name: String,
    pub category: String,
    pub brand: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
    /// Public URL under `/uploads/specbook/`.
    pub image_url: Option<String>,
    pub project_id: Option<DbId>,
    pub is_library: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Text fields of a new item, collected from the multipart form.
#[derive(Debug, Clone, Default, Validate)]
pub struct CreateSpecbookItem {
    #[validate(
        required(message = "이름과 카테고리는 필수입니다."),
        length(min = 1, message = "이름과 카테고리는 필수입니다.")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "이름과 카테고리는 필수입니다."),
        length(min = 1, message = "이름과 카테고리는 필수입니다.")
    )]
    pub category: Option<String>,
    pub brand: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
    pub project_id: Option<DbId>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Validate)]
pub struct UpdateSpecbookItem {
    #[validate(length(min = 1, message = "이름과 카테고리는 필수입니다."))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "이름과 카테고리는 필수입니다."))]
    pub category: Option<String>,
    pub brand: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
    /// Replaces the stored image when a new file was uploaded.
    pub image_url: Option<String>,
}

/// Query for `GET /specbook`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpecbookFilter {
    pub category: Option<String>,
}

impl SpecbookFilter {
    /// The category to filter on, treating a blank value and
    /// [`ALL_CATEGORIES`] as no filter.
    pub fn category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty() && *c != ALL_CATEGORIES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_and_blank_categories_do_not_filter() {
        let filter = |c: Option<&str>| SpecbookFilter {
            category: c.map(str::to_string),
        };
        assert_eq!(filter(None).category(), None);
        assert_eq!(filter(Some("전체")).category(), None);
        assert_eq!(filter(Some("  ")).category(), None);
        assert_eq!(filter(Some("주방")).category(), Some("주방"));
    }
}
