use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::shared::{MIB, UploadRule};
use crate::entity::site_asset;
use crate::utils::signature::FileFormat;

/// The singleton files an admin can upload for the about page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Cv,
    Headshot,
}

impl AssetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cv => "cv",
            Self::Headshot => "headshot",
        }
    }

    pub fn rule(&self) -> UploadRule {
        match self {
            Self::Cv => UploadRule {
                format: FileFormat::Pdf,
                max_bytes: 10 * MIB,
                type_error: "Only PDF files are allowed",
                size_error: "File size must be less than 10MB",
            },
            Self::Headshot => UploadRule {
                format: FileFormat::Png,
                max_bytes: 50 * MIB,
                type_error: "Only PNG files are allowed",
                size_error: "File size must be less than 50MB",
            },
        }
    }

    /// Name used when the client sends none.
    pub fn default_filename(&self) -> &'static str {
        match self {
            Self::Cv => "cv.pdf",
            Self::Headshot => "headshot.png",
        }
    }

    /// Public download path.
    pub fn public_url(&self) -> String {
        format!("/api/v1/about/{}", self.as_str())
    }

    pub fn missing_message(&self) -> &'static str {
        match self {
            Self::Cv => "No CV has been uploaded",
            Self::Headshot => "No headshot has been uploaded",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, ToSchema)]
pub struct AssetResponse {
    pub kind: AssetKind,
    #[schema(example = "cv-2024.pdf")]
    pub filename: String,
    #[schema(example = "application/pdf")]
    pub content_type: String,
    /// Bytes.
    pub size: i64,
    #[schema(example = "/api/v1/about/cv")]
    pub url: String,
    pub updated_at: DateTime<Utc>,
}

impl AssetResponse {
    pub fn new(kind: AssetKind, model: site_asset::Model) -> Self {
        Self {
            kind,
            filename: model.filename,
            content_type: model.content_type,
            size: model.size,
            url: kind.public_url(),
            updated_at: model.updated_at,
        }
    }
}
