
mod admin;
mod assets;
