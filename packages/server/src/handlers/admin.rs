use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::{Datelike, Utc};
use gallery_common::ArtworkRecord;
use gallery_common::table::{available_years, derive_view};
use sea_orm::{ActiveModelTrait, EntityTrait, IntoActiveModel, Set};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::artwork::{find_artwork, load_snapshot};
use super::blob::{StagedUpload, is_empty_file_field, release_blob, stage_field};
use crate::entity::artwork;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::query::AppQuery;
use crate::models::artwork::{
    AdminTableQuery, AdminTableResponse, ArtworkForm, ArtworkInput, ArtworkResponse, IMAGE_RULE,
};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Admin Artworks",
    operation_id = "listAdminArtworks",
    summary = "Admin artwork table",
    description = "Searches titles, filters by category and year, sorts and paginates the \
        catalog. Ties on the sort field are broken by most recently updated first. \
        Sorting by a new field defaults to descending.",
    params(AdminTableQuery),
    responses(
        (status = 200, description = "One page of the table", body = AdminTableResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user, query))]
pub async fn list_artworks(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    AppQuery(query): AppQuery<AdminTableQuery>,
) -> Result<Json<AdminTableResponse>, AppError> {
    let table_state = query.to_table_state()?;
    let records = load_snapshot(&state.db).await?;

    let years = available_years(&records);
    let view = derive_view(&records, &table_state);

    Ok(Json(AdminTableResponse::new(view, &table_state, years)))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Admin Artworks",
    operation_id = "createArtwork",
    summary = "Create an artwork",
    description = "Multipart form with `title`, `year`, `category`, optional `details`, \
        `height`, `width`, `length` (inches) and a required PNG `image` (max 50MB).",
    request_body(content_type = "multipart/form-data", description = "Artwork fields and image"),
    responses(
        (status = 201, description = "Artwork created", body = ArtworkResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, multipart), fields(admin = %auth_user.email))]
pub async fn create_artwork(
    auth_user: AuthUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let (input, image) = read_artwork_form(multipart).await?;
    let image = image.ok_or_else(|| AppError::Validation("Image is required".into()))?;

    let hash = image.store(&*state.blob_store).await?.to_hex();

    let now = Utc::now();
    let new_artwork = artwork::ActiveModel {
        id: Set(Uuid::now_v7().to_string()),
        title: Set(input.title),
        year: Set(input.year),
        category: Set(input.category),
        details: Set(input.details),
        height: Set(input.height),
        width: Set(input.width),
        length: Set(input.length),
        image_hash: Set(hash.clone()),
        image_content_type: Set(IMAGE_RULE.format.mime().to_string()),
        image_size: Set(image.size_i64()),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let model = match new_artwork.insert(&state.db).await {
        Ok(model) => model,
        Err(e) => {
            release_blob(&state.db, &*state.blob_store, &hash).await;
            return Err(e.into());
        }
    };
    info!(id = %model.id, "Artwork created");

    Ok((
        StatusCode::CREATED,
        Json(ArtworkResponse::from(ArtworkRecord::from(model))),
    ))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Admin Artworks",
    operation_id = "getAdminArtwork",
    summary = "Get an artwork for editing",
    params(("id" = String, Path, description = "Artwork ID")),
    responses(
        (status = 200, description = "Artwork", body = ArtworkResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Artwork not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _auth_user), fields(id = %id))]
pub async fn get_artwork(
    _auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ArtworkResponse>, AppError> {
    let model = find_artwork(&state.db, &id).await?;
    Ok(Json(ArtworkRecord::from(model).into()))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Admin Artworks",
    operation_id = "updateArtwork",
    summary = "Replace an artwork",
    description = "Same form as create. All text fields are replaced; blank optional fields \
        are cleared. `image` is optional and keeps the current image when omitted or empty.",
    params(("id" = String, Path, description = "Artwork ID")),
    request_body(content_type = "multipart/form-data", description = "Artwork fields and optional image"),
    responses(
        (status = 200, description = "Artwork updated", body = ArtworkResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Artwork not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, multipart), fields(id = %id, admin = %auth_user.email))]
pub async fn update_artwork(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Json<ArtworkResponse>, AppError> {
    let existing = find_artwork(&state.db, &id).await?;
    let (input, image) = read_artwork_form(multipart).await?;

    let old_hash = existing.image_hash.clone();
    let mut active = existing.into_active_model();
    active.title = Set(input.title);
    active.year = Set(input.year);
    active.category = Set(input.category);
    active.details = Set(input.details);
    active.height = Set(input.height);
    active.width = Set(input.width);
    active.length = Set(input.length);
    active.updated_at = Set(Utc::now());

    let new_hash = match &image {
        Some(image) => {
            let hash = image.store(&*state.blob_store).await?.to_hex();
            active.image_hash = Set(hash.clone());
            active.image_content_type = Set(IMAGE_RULE.format.mime().to_string());
            active.image_size = Set(image.size_i64());
            Some(hash)
        }
        None => None,
    };

    let model = match active.update(&state.db).await {
        Ok(model) => model,
        Err(e) => {
            if let Some(hash) = &new_hash {
                release_blob(&state.db, &*state.blob_store, hash).await;
            }
            return Err(e.into());
        }
    };

    if new_hash.as_ref().is_some_and(|h| *h != old_hash) {
        release_blob(&state.db, &*state.blob_store, &old_hash).await;
    }
    info!(id = %model.id, image_replaced = new_hash.is_some(), "Artwork updated");

    Ok(Json(ArtworkRecord::from(model).into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Admin Artworks",
    operation_id = "deleteArtwork",
    summary = "Delete an artwork",
    description = "Deletes the artwork. Its image is removed from storage when nothing else uses it.",
    params(("id" = String, Path, description = "Artwork ID")),
    responses(
        (status = 204, description = "Artwork deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Artwork not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id = %id, admin = %auth_user.email))]
pub async fn delete_artwork(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let existing = find_artwork(&state.db, &id).await?;

    artwork::Entity::delete_by_id(existing.id.clone())
        .exec(&state.db)
        .await?;
    release_blob(&state.db, &*state.blob_store, &existing.image_hash).await;
    info!(id = %existing.id, "Artwork deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Read the artwork form, staging the image if one was sent.
async fn read_artwork_form(
    mut multipart: Multipart,
) -> Result<(ArtworkInput, Option<StagedUpload>), AppError> {
    let mut form = ArtworkForm::default();
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        if name == "image" {
            if !is_empty_file_field(&field) {
                image = Some(stage_field(field, &IMAGE_RULE).await?);
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read field '{name}': {e}")))?;
        if !form.set_field(&name, value) {
            debug!(field = %name, "Ignoring unknown form field");
        }
    }

    let input = form.validate(Utc::now().year())?;
    Ok((input, image))
}
