use axum::Json;
use axum::extract::State;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, IntoActiveModel, QueryOrder, Set};
use tracing::{info, instrument};

use crate::entity::bio;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::bio::{BioResponse, UpdateBioRequest, validate_update_bio};
use crate::state::AppState;

/// The current bio row, if one has ever been saved.
pub async fn current_bio<C: ConnectionTrait>(db: &C) -> Result<Option<bio::Model>, AppError> {
    Ok(bio::Entity::find()
        .order_by_desc(bio::Column::UpdatedAt)
        .one(db)
        .await?)
}

#[utoipa::path(
    put,
    path = "/bio",
    tag = "Admin Bio",
    operation_id = "updateBio",
    summary = "Replace the bio",
    description = "Stores the artist statement shown on the about page. Content is HTML and \
        must not be blank.",
    request_body = UpdateBioRequest,
    responses(
        (status = 200, description = "Bio saved", body = BioResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(admin = %auth_user.email))]
pub async fn update_bio(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<UpdateBioRequest>,
) -> Result<Json<BioResponse>, AppError> {
    validate_update_bio(&payload)?;

    let now = Utc::now();
    let model = match current_bio(&state.db).await? {
        Some(existing) => {
            let mut active = existing.into_active_model();
            active.content = Set(payload.content);
            active.updated_at = Set(now);
            active.update(&state.db).await?
        }
        None => {
            bio::ActiveModel {
                content: Set(payload.content),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&state.db)
            .await?
        }
    };
    info!("Bio updated");

    Ok(Json(model.into()))
}
