use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// The artist statement. The site keeps a single logical row; the most
/// recently updated one wins if more ever exist.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bio")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Sanitized on the client; stored and served as HTML.
    #[sea_orm(column_type = "Text")]
    pub content: String,

    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
