pub mod admin;
pub mod artwork;
pub mod asset;
pub mod auth;
pub mod bio;
pub mod blob;
pub mod site;
