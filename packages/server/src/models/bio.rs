use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::bio;
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateBioRequest {
    /// HTML produced by the admin editor.
    #[schema(example = "<p>Works between painting and sculpture.</p>")]
    pub content: String,
}

pub fn validate_update_bio(payload: &UpdateBioRequest) -> Result<(), AppError> {
    if payload.content.trim().is_empty() {
        return Err(AppError::Validation("Bio content is required".into()));
    }
    Ok(())
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct BioResponse {
    pub content: String,
    pub updated_at: DateTime<Utc>,
}

impl From<bio::Model> for BioResponse {
    fn from(model: bio::Model) -> Self {
        Self {
            content: model.content,
            updated_at: model.updated_at,
        }
    }
}
