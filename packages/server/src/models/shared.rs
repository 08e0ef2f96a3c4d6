use serde::Serialize;

use crate::utils::signature::FileFormat;

/// Pagination metadata included in list responses.
#[derive(Serialize, utoipa::ToSchema)]
pub struct Pagination {
    /// Current page number (1-based).
    #[schema(example = 1)]
    pub page: u64,
    /// Number of items per page.
    #[schema(example = 10)]
    pub per_page: u64,
    /// Total number of matching items across all pages.
    #[schema(example = 47)]
    pub total: u64,
    /// Total number of pages.
    #[schema(example = 5)]
    pub total_pages: u64,
}

/// Accepted format and size for one kind of upload.
pub struct UploadRule {
    pub format: FileFormat,
    pub max_bytes: u64,
    pub type_error: &'static str,
    pub size_error: &'static str,
}

pub const MIB: u64 = 1024 * 1024;

/// Treat absent and blank multipart/query values the same.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
