use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::site::home))
        .nest("/about", about_routes())
        .nest("/artworks", artwork_routes())
        .nest("/auth", auth_routes())
        .nest("/admin", admin_routes())
}

fn about_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::site::about))
        .routes(routes!(handlers::asset::get_cv))
        .routes(routes!(handlers::asset::get_headshot))
}

fn artwork_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::artwork::list_artworks))
        .routes(routes!(handlers::artwork::get_artwork))
        .routes(routes!(handlers::artwork::get_artwork_image))
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::auth::login))
        .routes(routes!(handlers::auth::me))
}

fn admin_routes() -> OpenApiRouter<AppState> {
    let artworks = OpenApiRouter::new()
        .routes(routes!(
            handlers::admin::list_artworks,
            handlers::admin::create_artwork
        ))
        .routes(routes!(
            handlers::admin::get_artwork,
            handlers::admin::update_artwork,
            handlers::admin::delete_artwork
        ));

    let assets = OpenApiRouter::new()
        .routes(routes!(
            handlers::asset::upload_cv,
            handlers::asset::delete_cv
        ))
        .routes(routes!(
            handlers::asset::upload_headshot,
            handlers::asset::delete_headshot
        ))
        .routes(routes!(handlers::bio::update_bio));

    OpenApiRouter::new()
        .nest("/artworks", artworks)
        .merge(assets)
        .layer(handlers::blob::upload_body_limit())
}
