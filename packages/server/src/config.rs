use config::{Config, ConfigError, Environment, File};
use gallery_common::config::StorageAppConfig;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    /// Admin account created on startup when both fields are set.
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

/// Artist-specific settings shown on the public pages.
#[derive(Debug, Deserialize, Clone)]
pub struct ArtistConfig {
    pub name: String,
    /// Shown on the about page when no bio has been saved yet.
    pub bio_fallback: String,
    pub email: Option<String>,
    /// Handle, with or without a leading `@`.
    pub instagram: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub storage: StorageAppConfig,
    pub artist: ArtistConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            .set_default("database.url", "sqlite://gallery.db?mode=rwc")?
            .set_default("artist.name", "Artist")?
            .set_default(
                "artist.bio_fallback",
                "Contemporary artist working in painting, works on paper, and sculpture.",
            )?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., GALLERY__AUTH__JWT_SECRET)
            .add_source(Environment::with_prefix("GALLERY").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
