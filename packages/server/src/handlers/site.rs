use axum::Json;
use axum::extract::State;
use gallery_common::{ArtworkRecord, Category};
use rand::seq::IndexedRandom;
use sea_orm::{EntityTrait, QuerySelect};
use tracing::instrument;

use super::asset::find_asset;
use super::bio::current_bio;
use crate::entity::artwork;
use crate::error::AppError;
use crate::models::asset::AssetKind;
use crate::models::site::{AboutResponse, CategoryLink, ContactLinks, HomeResponse};
use crate::state::AppState;

/// Hero candidates are drawn from at most this many artworks.
const HERO_POOL: u64 = 100;

#[utoipa::path(
    get,
    path = "/home",
    tag = "Site",
    operation_id = "getHome",
    summary = "Landing page content",
    description = "Artist name, category links and a random hero artwork.",
    responses(
        (status = 200, description = "Landing page", body = HomeResponse),
    ),
)]
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Result<Json<HomeResponse>, AppError> {
    let pool = artwork::Entity::find()
        .limit(Some(HERO_POOL))
        .all(&state.db)
        .await?;
    let hero = pool
        .choose(&mut rand::rng())
        .cloned()
        .map(|m| ArtworkRecord::from(m).into());

    Ok(Json(HomeResponse {
        artist_name: state.config.artist.name.clone(),
        hero,
        categories: Category::ALL.iter().copied().map(CategoryLink::from).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "About",
    operation_id = "getAbout",
    summary = "About page content",
    description = "Bio (or the configured fallback), contact links and links to the headshot \
        and CV when they have been uploaded.",
    responses(
        (status = 200, description = "About page", body = AboutResponse),
    ),
)]
#[instrument(skip(state))]
pub async fn about(State(state): State<AppState>) -> Result<Json<AboutResponse>, AppError> {
    let artist = &state.config.artist;
    let bio = current_bio(&state.db).await?;
    let headshot = find_asset(&state.db, AssetKind::Headshot).await?;
    let cv = find_asset(&state.db, AssetKind::Cv).await?;

    let (content, bio_is_fallback, bio_updated_at) = match bio {
        Some(bio) => (bio.content, false, Some(bio.updated_at)),
        None => (artist.bio_fallback.clone(), true, None),
    };

    Ok(Json(AboutResponse {
        artist_name: artist.name.clone(),
        bio: content,
        bio_is_fallback,
        bio_updated_at,
        contact: ContactLinks::from(artist),
        headshot_url: headshot.map(|_| AssetKind::Headshot.public_url()),
        cv_url: cv.map(|_| AssetKind::Cv.public_url()),
    }))
}
