use anyhow::{Context, Result};
use sea_orm::*;
use tracing::{info, warn};

use crate::config::AuthConfig;
use crate::entity::admin_user;
use crate::handlers::auth::normalize_email;
use crate::utils::hash;

/// Create the configured admin account if it does not exist yet.
///
/// An existing account keeps its password; changing the configured password
/// later has no effect.
pub async fn seed_admin(db: &DatabaseConnection, auth: &AuthConfig) -> Result<()> {
    let (Some(email), Some(password)) = (&auth.admin_email, &auth.admin_password) else {
        info!("No admin credentials configured, skipping admin seed");
        return Ok(());
    };

    let email = normalize_email(email);
    if email.is_empty() || password.is_empty() {
        warn!("Admin email or password is blank, skipping admin seed");
        return Ok(());
    }

    let password_hash = hash::hash_password(password)
        .map_err(|e| anyhow::anyhow!("Password hash error: {e}"))?;

    let model = admin_user::ActiveModel {
        email: Set(email.clone()),
        password: Set(password_hash),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let result = admin_user::Entity::insert(model)
        .on_conflict(
            sea_query::OnConflict::column(admin_user::Column::Email)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await;

    match result {
        Ok(0) | Err(DbErr::RecordNotInserted) => info!(%email, "Admin account already exists"),
        Ok(_) => info!(%email, "Seeded admin account"),
        Err(e) => return Err(e).context("Failed to seed admin account"),
    }

    Ok(())
}
