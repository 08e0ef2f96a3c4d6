use gallery_common::{ArtworkRecord, Category};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "artwork")]
pub struct Model {
    /// UUIDv7 text.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub title: String,
    #[sea_orm(indexed)]
    pub year: i32,
    #[sea_orm(indexed)]
    pub category: Category,

    #[sea_orm(column_type = "Text", nullable)]
    pub details: Option<String>,

    pub height: Option<f64>,
    pub width: Option<f64>,
    pub length: Option<f64>,

    /// SHA-256 of the image blob, hex encoded.
    #[sea_orm(indexed)]
    pub image_hash: String,
    pub image_content_type: String,
    pub image_size: i64,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ArtworkRecord {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            year: m.year,
            category: m.category,
            details: m.details,
            height: m.height,
            width: m.width,
            length: m.length,
            image_ref: m.image_hash,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
