pub mod artwork;
pub mod catalog;
pub mod category;
pub mod compare;
pub mod config;
pub mod storage;
pub mod table;


pub use artwork::ArtworkRecord;
pub use category::Category;
