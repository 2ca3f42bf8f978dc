//! Handlers for the `/specbook` resource: the finish library and its
//! categories.
//!
//! Items are written as `multipart/form-data` so an image can travel with
//! the text fields. Images land in `{uploads_dir}/specbook/` and are served
//! from `/uploads/specbook/`.

use std::path::{Path as FsPath, PathBuf};

use axum::body::Bytes;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use hvlab_core::error::CoreError;
use hvlab_core::types::DbId;
use hvlab_core::validation::validate_input;
use hvlab_db::models::specbook::{
    CreateSpecbookItem, SpecbookCategory, SpecbookFilter, SpecbookItem, UpdateSpecbookItem,
};
use hvlab_db::repositories::SpecbookRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireManager;
use crate::response::DataResponse;
use crate::state::AppState;

/// Largest accepted image, in bytes.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Request body limit for item uploads: the image plus the text fields.
pub const MAX_UPLOAD_BODY_BYTES: usize = MAX_IMAGE_BYTES + 512 * 1024;

pub const IMAGE_ONLY_MESSAGE: &str = "이미지 파일만 업로드 가능합니다.";
pub const IMAGE_TOO_LARGE_MESSAGE: &str = "이미지 크기는 5MB 이하여야 합니다.";

const IMAGE_EXTENSIONS: &[&str] = &["jpeg", "jpg", "png", "gif"];
const IMAGE_URL_PREFIX: &str = "/uploads/specbook/";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "SpecbookItem",
        id,
    })
}

// ---------------------------------------------------------------------------
// Form parsing and image storage
// ---------------------------------------------------------------------------

/// An uploaded image that passed the type and size checks.
struct ImageUpload {
    extension: String,
    data: Bytes,
}

/// Every field a specbook form may carry. Blank text counts as absent.
#[derive(Default)]
struct SpecbookForm {
    name: Option<String>,
    category: Option<String>,
    brand: Option<String>,
    price: Option<String>,
    description: Option<String>,
    project_id: Option<DbId>,
    image: Option<ImageUpload>,
}

fn non_blank(text: String) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Lower-cased extension of `file_name` when it is an accepted image type.
fn image_extension(file_name: &str, content_type: Option<&str>) -> Option<String> {
    let (_, ext) = file_name.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    let type_ok = content_type.map_or(true, |ct| {
        ct.strip_prefix("image/")
            .is_some_and(|sub| IMAGE_EXTENSIONS.contains(&sub))
    });
    (IMAGE_EXTENSIONS.contains(&ext.as_str()) && type_ok).then_some(ext)
}

async fn read_form(mut multipart: Multipart) -> AppResult<SpecbookForm> {
    let mut form = SpecbookForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name == "image" {
            let file_name = field.file_name().unwrap_or("").to_string();
            let content_type = field.content_type().map(str::to_string);
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            // Browsers send an empty file part when nothing was chosen.
            if file_name.is_empty() && data.is_empty() {
                continue;
            }
            let extension = image_extension(&file_name, content_type.as_deref())
                .ok_or_else(|| AppError::BadRequest(IMAGE_ONLY_MESSAGE.into()))?;
            if data.len() > MAX_IMAGE_BYTES {
                return Err(AppError::BadRequest(IMAGE_TOO_LARGE_MESSAGE.into()));
            }
            form.image = Some(ImageUpload { extension, data });
            continue;
        }

        let text = field
            .text()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        match name.as_str() {
            "name" => form.name = non_blank(text),
            "category" => form.category = non_blank(text),
            "brand" => form.brand = non_blank(text),
            "price" => form.price = non_blank(text),
            "description" => form.description = non_blank(text),
            "project_id" => {
                form.project_id = match non_blank(text) {
                    Some(raw) => Some(raw.parse().map_err(|_| {
                        AppError::BadRequest(format!("Invalid project_id '{raw}'"))
                    })?),
                    None => None,
                };
            }
            _ => {}
        }
    }

    Ok(form)
}

fn specbook_dir(uploads_dir: &str) -> PathBuf {
    FsPath::new(uploads_dir).join("specbook")
}

/// Write the image under a fresh name and return its public URL.
async fn store_image(uploads_dir: &str, image: &ImageUpload) -> AppResult<String> {
    let dir = specbook_dir(uploads_dir);
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    let file_name = format!(
        "{}-{}.{}",
        chrono::Utc::now().timestamp_millis(),
        uuid::Uuid::new_v4().simple(),
        image.extension
    );
    tokio::fs::write(dir.join(&file_name), &image.data)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;
    Ok(format!("{IMAGE_URL_PREFIX}{file_name}"))
}

/// Remove a stored image. Failures are logged; the row change stands.
async fn remove_image(uploads_dir: &str, image_url: &str) {
    let Some(file_name) = image_url.strip_prefix(IMAGE_URL_PREFIX) else {
        return;
    };
    if file_name.contains('/') || file_name.contains("..") {
        return;
    }
    if let Err(e) = tokio::fs::remove_file(specbook_dir(uploads_dir).join(file_name)).await {
        tracing::warn!(image_url, error = %e, "Failed to remove specbook image");
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/specbook/categories
pub async fn list_categories(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<SpecbookCategory>>>> {
    let categories = SpecbookRepo::list_categories(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// GET /api/specbook?category=
pub async fn list(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<SpecbookFilter>,
) -> AppResult<Json<DataResponse<Vec<SpecbookItem>>>> {
    let items = SpecbookRepo::list(&state.pool, filter.category()).await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/specbook/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<SpecbookItem>>> {
    let item = SpecbookRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: item }))
}

/// POST /api/specbook (multipart: name, category, brand, price,
/// description, project_id, image)
pub async fn create(
    RequireManager(user): RequireManager,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<SpecbookItem>>)> {
    let form = read_form(multipart).await?;
    let mut input = CreateSpecbookItem {
        name: form.name,
        category: form.category,
        brand: form.brand,
        price: form.price,
        description: form.description,
        project_id: form.project_id,
        image_url: None,
    };
    validate_input(&input)?;

    if let Some(image) = &form.image {
        input.image_url = Some(store_image(&state.config.uploads_dir, image).await?);
    }
    let item = SpecbookRepo::create(&state.pool, &input).await?;
    tracing::info!(
        specbook_item_id = item.id,
        category = %item.category,
        user_id = user.user_id,
        "Specbook item created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// PUT /api/specbook/{id} (multipart, every field optional)
///
/// A new image replaces the stored one.
pub async fn update(
    RequireManager(_user): RequireManager,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<SpecbookItem>>> {
    let form = read_form(multipart).await?;
    let mut input = UpdateSpecbookItem {
        name: form.name,
        category: form.category,
        brand: form.brand,
        price: form.price,
        description: form.description,
        image_url: None,
    };
    validate_input(&input)?;

    let existing = SpecbookRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    if let Some(image) = &form.image {
        input.image_url = Some(store_image(&state.config.uploads_dir, image).await?);
    }

    let item = SpecbookRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    if input.image_url.is_some() {
        if let Some(old) = existing.image_url.as_deref() {
            remove_image(&state.config.uploads_dir, old).await;
        }
    }
    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/specbook/{id}
pub async fn delete(
    RequireManager(_user): RequireManager,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let item = SpecbookRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    if let Some(url) = item.image_url.as_deref() {
        remove_image(&state.config.uploads_dir, url).await;
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_image_types() {
        assert_eq!(image_extension("tile.JPG", Some("image/jpeg")).as_deref(), Some("jpg"));
        assert_eq!(image_extension("sink.png", None).as_deref(), Some("png"));
        assert_eq!(image_extension("anim.gif", Some("image/gif")).as_deref(), Some("gif"));
    }

    #[test]
    fn rejects_other_files() {
        assert_eq!(image_extension("notes.pdf", Some("application/pdf")), None);
        assert_eq!(image_extension("noext", Some("image/png")), None);
        // Extension alone is not enough.
        assert_eq!(image_extension("script.png", Some("text/html")), None);
    }

    #[test]
    fn blank_text_is_absent() {
        assert_eq!(non_blank("  ".into()), None);
        assert_eq!(non_blank(" 주방 ".into()).as_deref(), Some("주방"));
    }
}
