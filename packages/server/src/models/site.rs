use chrono::{DateTime, Utc};
use gallery_common::Category;
use serde::Serialize;
use utoipa::ToSchema;

use super::artwork::ArtworkResponse;
use crate::config::ArtistConfig;

/// Sidebar entry for one category.
#[derive(Serialize, ToSchema)]
pub struct CategoryLink {
    pub category: Category,
    #[schema(example = "Works on Paper")]
    pub label: String,
    #[schema(example = "/artworks?category=Work+on+Paper")]
    pub href: String,
}

impl From<Category> for CategoryLink {
    fn from(category: Category) -> Self {
        Self {
            category,
            label: category.label().to_string(),
            href: category.catalog_href(),
        }
    }
}

/// Landing page content.
#[derive(Serialize, ToSchema)]
pub struct HomeResponse {
    #[schema(example = "Jane Doe")]
    pub artist_name: String,
    /// A randomly chosen artwork, absent when the catalog is empty.
    pub hero: Option<ArtworkResponse>,
    pub categories: Vec<CategoryLink>,
}

#[derive(Serialize, ToSchema)]
pub struct ContactLinks {
    #[schema(example = "studio@example.com")]
    pub email: Option<String>,
    #[schema(example = "mailto:studio@example.com")]
    pub email_href: Option<String>,
    /// Handle as configured, e.g. `@studio`.
    #[schema(example = "@studio")]
    pub instagram: Option<String>,
    #[schema(example = "https://instagram.com/studio")]
    pub instagram_url: Option<String>,
    pub website: Option<String>,
}

impl From<&ArtistConfig> for ContactLinks {
    fn from(artist: &ArtistConfig) -> Self {
        let email = artist.email.clone().filter(|e| !e.trim().is_empty());
        let instagram = artist.instagram.clone().filter(|i| !i.trim().is_empty());
        Self {
            email_href: email.as_ref().map(|e| format!("mailto:{e}")),
            instagram_url: instagram.as_deref().map(instagram_url),
            email,
            instagram,
            website: artist.website.clone().filter(|w| !w.trim().is_empty()),
        }
    }
}

/// Profile URL for a handle, with or without a leading `@`.
pub fn instagram_url(handle: &str) -> String {
    let handle = handle.trim();
    format!(
        "https://instagram.com/{}",
        handle.strip_prefix('@').unwrap_or(handle)
    )
}

/// About page content.
#[derive(Serialize, ToSchema)]
pub struct AboutResponse {
    pub artist_name: String,
    /// HTML.
    pub bio: String,
    /// `true` when no bio has been saved and the configured fallback is shown.
    pub bio_is_fallback: bool,
    pub bio_updated_at: Option<DateTime<Utc>>,
    pub contact: ContactLinks,
    pub headshot_url: Option<String>,
    pub cv_url: Option<String>,
}
