pub mod artwork;
pub mod asset;
pub mod auth;
pub mod bio;
pub mod shared;
pub mod site;
