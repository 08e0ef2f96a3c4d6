use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ConnectionTrait, EntityTrait, Set};
use tracing::{info, instrument};

use super::blob::{BlobMeta, blob_response, release_blob, stage_field};
use crate::entity::site_asset;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::models::asset::{AssetKind, AssetResponse};
use crate::state::AppState;
use crate::utils::filename::validate_upload_filename;

pub async fn find_asset<C: ConnectionTrait>(
    db: &C,
    kind: AssetKind,
) -> Result<Option<site_asset::Model>, AppError> {
    Ok(site_asset::Entity::find_by_id(kind.as_str().to_owned())
        .one(db)
        .await?)
}

#[utoipa::path(
    get,
    path = "/cv",
    tag = "About",
    operation_id = "getCv",
    summary = "Download the CV",
    description = "Streams the current CV PDF. Supports ETag-based caching via If-None-Match.",
    responses(
        (status = 200, description = "CV content", content_type = "application/pdf"),
        (status = 304, description = "Not Modified (ETag match)"),
        (status = 404, description = "No CV uploaded (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, headers))]
pub async fn get_cv(State(state): State<AppState>, headers: HeaderMap) -> Result<Response, AppError> {
    serve_asset(&state, AssetKind::Cv, &headers).await
}

#[utoipa::path(
    get,
    path = "/headshot",
    tag = "About",
    operation_id = "getHeadshot",
    summary = "Download the headshot",
    description = "Streams the current headshot PNG. Supports ETag-based caching via If-None-Match.",
    responses(
        (status = 200, description = "Headshot content", content_type = "image/png"),
        (status = 304, description = "Not Modified (ETag match)"),
        (status = 404, description = "No headshot uploaded (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, headers))]
pub async fn get_headshot(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    serve_asset(&state, AssetKind::Headshot, &headers).await
}

#[utoipa::path(
    post,
    path = "/cv",
    tag = "Admin Assets",
    operation_id = "uploadCv",
    summary = "Upload the CV",
    description = "Multipart form with a `file` field (PDF only, max 10MB). Replaces the \
        current CV.",
    request_body(content_type = "multipart/form-data", description = "CV file"),
    responses(
        (status = 200, description = "CV stored", body = AssetResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, multipart), fields(admin = %auth_user.email))]
pub async fn upload_cv(
    auth_user: AuthUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AssetResponse>, AppError> {
    upload_asset(&state, AssetKind::Cv, multipart).await.map(Json)
}

#[utoipa::path(
    delete,
    path = "/cv",
    tag = "Admin Assets",
    operation_id = "deleteCv",
    summary = "Remove the CV",
    responses(
        (status = 204, description = "CV removed"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "No CV uploaded (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(admin = %auth_user.email))]
pub async fn delete_cv(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    delete_asset(&state, AssetKind::Cv).await
}

#[utoipa::path(
    post,
    path = "/headshot",
    tag = "Admin Assets",
    operation_id = "uploadHeadshot",
    summary = "Upload the headshot",
    description = "Multipart form with a `file` field (PNG only, max 50MB). Replaces the \
        current headshot.",
    request_body(content_type = "multipart/form-data", description = "Headshot image"),
    responses(
        (status = 200, description = "Headshot stored", body = AssetResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, multipart), fields(admin = %auth_user.email))]
pub async fn upload_headshot(
    auth_user: AuthUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AssetResponse>, AppError> {
    upload_asset(&state, AssetKind::Headshot, multipart)
        .await
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/headshot",
    tag = "Admin Assets",
    operation_id = "deleteHeadshot",
    summary = "Remove the headshot",
    responses(
        (status = 204, description = "Headshot removed"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "No headshot uploaded (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(admin = %auth_user.email))]
pub async fn delete_headshot(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    delete_asset(&state, AssetKind::Headshot).await
}

async fn serve_asset(
    state: &AppState,
    kind: AssetKind,
    headers: &HeaderMap,
) -> Result<Response, AppError> {
    let model = find_asset(&state.db, kind)
        .await?
        .ok_or_else(|| AppError::NotFound(kind.missing_message().into()))?;

    blob_response(
        BlobMeta {
            content_hash: &model.content_hash,
            content_type: &model.content_type,
            size: model.size,
            filename: Some(&model.filename),
        },
        headers,
        &*state.blob_store,
    )
    .await
}

async fn upload_asset(
    state: &AppState,
    kind: AssetKind,
    mut multipart: Multipart,
) -> Result<AssetResponse, AppError> {
    let rule = kind.rule();
    let mut staged = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        if field.name() == Some("file") {
            staged = Some(stage_field(field, &rule).await?);
        }
    }

    let staged = staged.ok_or_else(|| AppError::Validation("Missing 'file' field".into()))?;
    let filename = match staged.filename.as_deref() {
        Some(name) if !name.trim().is_empty() => validate_upload_filename(name)
            .map_err(|e| AppError::Validation(e.message().into()))?
            .to_string(),
        _ => kind.default_filename().to_string(),
    };

    let previous = find_asset(&state.db, kind).await?;
    let hash = staged.store(&*state.blob_store).await?.to_hex();

    let row = site_asset::ActiveModel {
        kind: Set(kind.as_str().to_string()),
        content_hash: Set(hash.clone()),
        filename: Set(filename),
        content_type: Set(rule.format.mime().to_string()),
        size: Set(staged.size_i64()),
        updated_at: Set(Utc::now()),
    };
    let upsert = site_asset::Entity::insert(row)
        .on_conflict(
            OnConflict::column(site_asset::Column::Kind)
                .update_columns([
                    site_asset::Column::ContentHash,
                    site_asset::Column::Filename,
                    site_asset::Column::ContentType,
                    site_asset::Column::Size,
                    site_asset::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(&state.db)
        .await;
    if let Err(e) = upsert {
        release_blob(&state.db, &*state.blob_store, &hash).await;
        return Err(e.into());
    }

    if let Some(previous) = previous
        && previous.content_hash != hash
    {
        release_blob(&state.db, &*state.blob_store, &previous.content_hash).await;
    }

    let saved = find_asset(&state.db, kind)
        .await?
        .ok_or_else(|| AppError::Internal("site_asset missing after upsert".into()))?;
    info!(%kind, size = saved.size, "Site asset replaced");

    Ok(AssetResponse::new(kind, saved))
}

async fn delete_asset(state: &AppState, kind: AssetKind) -> Result<StatusCode, AppError> {
    let existing = find_asset(&state.db, kind)
        .await?
        .ok_or_else(|| AppError::NotFound(kind.missing_message().into()))?;

    site_asset::Entity::delete_by_id(existing.kind.clone())
        .exec(&state.db)
        .await?;
    release_blob(&state.db, &*state.blob_store, &existing.content_hash).await;
    info!(%kind, "Site asset removed");

    Ok(StatusCode::NO_CONTENT)
}
