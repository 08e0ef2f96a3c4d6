#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classification of an artwork.
///
/// The serialized form is also the stored column value and the query
/// parameter value, so `WorkOnPaper` travels as `"Work on Paper"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
pub enum Category {
    #[serde(rename = "Painting")]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Painting"))]
    Painting,
    #[serde(rename = "Work on Paper")]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Work on Paper"))]
    WorkOnPaper,
    #[serde(rename = "Sculpture")]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Sculpture"))]
    Sculpture,
}

impl Category {
    /// All categories, in sidebar order.
    pub const ALL: &'static [Category] = &[Self::Painting, Self::WorkOnPaper, Self::Sculpture];

    /// Canonical string form, used for storage and query parameters.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Painting => "Painting",
            Self::WorkOnPaper => "Work on Paper",
            Self::Sculpture => "Sculpture",
        }
    }

    /// Plural label shown in breadcrumbs and section headings.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Painting => "Paintings",
            Self::WorkOnPaper => "Works on Paper",
            Self::Sculpture => "Sculpture",
        }
    }

    /// Whether dimensions for this category include a length.
    pub fn is_three_dimensional(&self) -> bool {
        matches!(self, Self::Sculpture)
    }

    /// Form-encoded query parameter value (spaces become `+`).
    pub fn query_value(&self) -> String {
        self.as_str().replace(' ', "+")
    }

    /// Catalog link filtered to this category.
    pub fn catalog_href(&self) -> String {
        format!("/artworks?category={}", self.query_value())
    }

    /// Decode an already percent-decoded query value.
    ///
    /// Anything unrecognized means "no filter" rather than an error.
    pub fn from_query_param(value: &str) -> Option<Self> {
        value.parse().ok()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCategoryError {
    pub invalid: String,
}

impl fmt::Display for ParseCategoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid category '{}'. Valid values: {}",
            self.invalid,
            Category::ALL
                .iter()
                .map(|c| c.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl std::error::Error for ParseCategoryError {}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Painting" => Ok(Self::Painting),
            "Work on Paper" => Ok(Self::WorkOnPaper),
            "Sculpture" => Ok(Self::Sculpture),
            _ => Err(ParseCategoryError {
                invalid: s.to_string(),
            }),
        }
    }
}
