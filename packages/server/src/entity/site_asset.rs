use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A singleton uploaded file, keyed by kind (`cv`, `headshot`).
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "site_asset")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub kind: String,

    /// SHA-256 of the blob, hex encoded.
    #[sea_orm(indexed)]
    pub content_hash: String,
    pub filename: String,
    pub content_type: String,
    pub size: i64,

    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
