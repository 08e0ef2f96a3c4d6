use axum::Json;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Response;
use gallery_common::ArtworkRecord;
use gallery_common::catalog;
use sea_orm::{ConnectionTrait, EntityTrait};
use tracing::instrument;

use super::blob::{BlobMeta, blob_response};
use crate::entity::artwork;
use crate::error::{AppError, ErrorBody};
use crate::extractors::query::AppQuery;
use crate::models::artwork::{ArtworkDetailResponse, CatalogQuery, CatalogResponse};
use crate::state::AppState;

/// Every artwork as a core record, in storage order.
pub async fn load_snapshot<C: ConnectionTrait>(db: &C) -> Result<Vec<ArtworkRecord>, AppError> {
    Ok(artwork::Entity::find()
        .all(db)
        .await?
        .into_iter()
        .map(Into::into)
        .collect())
}

pub async fn find_artwork<C: ConnectionTrait>(
    db: &C,
    id: &str,
) -> Result<artwork::Model, AppError> {
    artwork::Entity::find_by_id(id.to_owned())
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Artwork not found".into()))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Catalog",
    operation_id = "listArtworks",
    summary = "Public artwork grid",
    description = "Returns the catalog ordered newest year first, most recently updated first \
        within a year. `category` narrows the grid; unknown values show everything.",
    params(CatalogQuery),
    responses(
        (status = 200, description = "Catalog grid", body = CatalogResponse),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_artworks(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<CatalogQuery>,
) -> Result<Json<CatalogResponse>, AppError> {
    let records = load_snapshot(&state.db).await?;
    Ok(Json(catalog::grid(records, query.category()).into()))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Catalog",
    operation_id = "getArtwork",
    summary = "Public artwork detail",
    description = "Returns one artwork with its position in its category's grid, the \
        neighboring artwork ids and a breadcrumb back to the filtered grid.",
    params(("id" = String, Path, description = "Artwork ID")),
    responses(
        (status = 200, description = "Artwork detail", body = ArtworkDetailResponse),
        (status = 404, description = "Artwork not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id = %id))]
pub async fn get_artwork(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ArtworkDetailResponse>, AppError> {
    let records = load_snapshot(&state.db).await?;
    Ok(Json(catalog::detail(records, &id)?.into()))
}

#[utoipa::path(
    get,
    path = "/{id}/image",
    tag = "Catalog",
    operation_id = "getArtworkImage",
    summary = "Download an artwork image",
    description = "Streams the PNG image. Supports ETag-based caching via If-None-Match.",
    params(("id" = String, Path, description = "Artwork ID")),
    responses(
        (status = 200, description = "Image content", content_type = "image/png"),
        (status = 304, description = "Not Modified (ETag match)"),
        (status = 404, description = "Artwork not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, headers), fields(id = %id))]
pub async fn get_artwork_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let model = find_artwork(&state.db, &id).await?;
    blob_response(
        BlobMeta {
            content_hash: &model.image_hash,
            content_type: &model.image_content_type,
            size: model.image_size,
            filename: None,
        },
        &headers,
        &*state.blob_store,
    )
    .await
}
