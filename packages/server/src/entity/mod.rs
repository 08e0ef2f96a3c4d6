pub mod admin_user;
pub mod artwork;
pub mod bio;
pub mod site_asset;
