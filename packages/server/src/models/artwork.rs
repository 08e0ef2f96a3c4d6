use chrono::{DateTime, Utc};
use gallery_common::artwork::check_dimensions;
use gallery_common::catalog::{CatalogDetail, CatalogGrid};
use gallery_common::table::{DEFAULT_PAGE_SIZE, SortDirection, SortField, TableState, TableView};
use gallery_common::{ArtworkRecord, Category};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::shared::{MIB, Pagination, UploadRule, non_blank};
use crate::error::AppError;
use crate::utils::signature::FileFormat;

pub const MIN_YEAR: i32 = 2000;
const MAX_TITLE_CHARS: usize = 255;
const MAX_DETAILS_CHARS: usize = 500;
const MAX_PER_PAGE: u64 = 100;

pub const IMAGE_RULE: UploadRule = UploadRule {
    format: FileFormat::Png,
    max_bytes: 50 * MIB,
    type_error: "Only PNG images are allowed",
    size_error: "Image must be less than 50MB",
};

/// An artwork as returned by both the public and the admin API.
#[derive(Serialize, ToSchema)]
pub struct ArtworkResponse {
    #[schema(example = "01936f0e-1234-7abc-8000-000000000001")]
    pub id: String,
    #[schema(example = "Harbor at Dusk")]
    pub title: String,
    #[schema(example = 2023)]
    pub year: i32,
    pub category: Category,
    pub details: Option<String>,
    /// Inches.
    pub height: Option<f64>,
    /// Inches.
    pub width: Option<f64>,
    /// Inches. Sculpture only.
    pub length: Option<f64>,
    /// Display string, present only when the dimensions are complete for the
    /// category.
    #[schema(example = "24\" × 36\"")]
    pub dimensions: Option<String>,
    #[schema(example = "/api/v1/artworks/01936f0e-1234-7abc-8000-000000000001/image")]
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ArtworkRecord> for ArtworkResponse {
    fn from(record: ArtworkRecord) -> Self {
        Self {
            dimensions: record.dimensions(),
            image_url: format!("/api/v1/artworks/{}/image", record.id),
            id: record.id,
            title: record.title,
            year: record.year,
            category: record.category,
            details: record.details,
            height: record.height,
            width: record.width,
            length: record.length,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Deserialize, IntoParams)]
pub struct CatalogQuery {
    /// `Painting`, `Work on Paper` or `Sculpture`. Anything else shows all works.
    pub category: Option<String>,
}

impl CatalogQuery {
    pub fn category(&self) -> Option<Category> {
        self.category
            .as_deref()
            .and_then(Category::from_query_param)
    }
}

/// The public grid.
#[derive(Serialize, ToSchema)]
pub struct CatalogResponse {
    /// Active filter, if any.
    pub category: Option<Category>,
    #[schema(example = "Works on Paper")]
    pub heading: String,
    /// Number of works in the grid.
    pub count: usize,
    pub artworks: Vec<ArtworkResponse>,
}

impl From<CatalogGrid> for CatalogResponse {
    fn from(grid: CatalogGrid) -> Self {
        Self {
            heading: grid
                .category
                .map_or("All Works", |c| c.label())
                .to_string(),
            category: grid.category,
            count: grid.display_count,
            artworks: grid.records.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct Breadcrumb {
    #[schema(example = "Works on Paper")]
    pub label: String,
    #[schema(example = "/artworks?category=Work+on+Paper")]
    pub href: String,
}

/// One artwork with its place in its category's grid.
#[derive(Serialize, ToSchema)]
pub struct ArtworkDetailResponse {
    pub artwork: ArtworkResponse,
    /// 1-based position within the category grid.
    #[schema(example = 3)]
    pub position: usize,
    #[schema(example = 12)]
    pub total: usize,
    pub prev_id: Option<String>,
    pub next_id: Option<String>,
    pub breadcrumb: Breadcrumb,
}

impl From<CatalogDetail> for ArtworkDetailResponse {
    fn from(detail: CatalogDetail) -> Self {
        let category = detail.record.category;
        Self {
            artwork: detail.record.into(),
            position: detail.position,
            total: detail.total,
            prev_id: detail.prev_id,
            next_id: detail.next_id,
            breadcrumb: Breadcrumb {
                label: category.label().to_string(),
                href: category.catalog_href(),
            },
        }
    }
}

/// Query parameters of the admin table.
#[derive(Deserialize, IntoParams, Default)]
pub struct AdminTableQuery {
    /// Case-insensitive title substring.
    pub search: Option<String>,
    /// Exact category; empty means all.
    pub category: Option<String>,
    /// Exact year; empty means all.
    #[param(value_type = Option<i32>)]
    pub year: Option<String>,
    /// `year` (default), `created_at`, `title` or `category`.
    pub sort_by: Option<String>,
    /// `asc` or `desc` (default).
    pub sort_order: Option<String>,
    pub page: Option<u64>,
    /// 1-100, default 10.
    pub per_page: Option<u64>,
}

impl AdminTableQuery {
    /// Replay the query onto a fresh table state. Filters go first so the page
    /// they would reset is applied last.
    pub fn to_table_state(&self) -> Result<TableState, AppError> {
        let mut state = TableState::default();

        if let Some(search) = &self.search {
            state.set_search(search.trim());
        }
        let category = non_blank(self.category.clone())
            .map(|c| c.parse::<Category>())
            .transpose()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        state.set_category(category);
        let year = non_blank(self.year.clone())
            .map(|y| y.parse::<i32>())
            .transpose()
            .map_err(|_| AppError::Validation("year must be a whole number".into()))?;
        state.set_year(year);

        let field = match non_blank(self.sort_by.clone()) {
            Some(s) => s
                .parse::<SortField>()
                .map_err(|e| AppError::Validation(e.to_string()))?,
            None => SortField::Year,
        };
        let direction = match self.sort_order.as_deref() {
            None | Some("desc") => SortDirection::Desc,
            Some("asc") => SortDirection::Asc,
            Some(_) => {
                return Err(AppError::Validation(
                    "sort_order must be one of: asc, desc".into(),
                ));
            }
        };
        state.set_sort(field, direction);

        state.set_page_size(
            self.per_page
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .clamp(1, MAX_PER_PAGE),
        );
        state.set_page(self.page.unwrap_or(1));
        Ok(state)
    }
}

#[derive(Serialize, ToSchema)]
pub struct RowRange {
    pub from: u64,
    pub to: u64,
}

#[derive(Serialize, ToSchema)]
pub struct AdminTableResponse {
    pub data: Vec<ArtworkResponse>,
    pub pagination: Pagination,
    /// Row numbers shown on this page; absent when the page is empty.
    pub showing: Option<RowRange>,
    pub sort_by: SortField,
    pub sort_order: SortDirection,
    /// Year filter options, newest first.
    pub available_years: Vec<i32>,
}

impl AdminTableResponse {
    pub fn new(view: TableView, state: &TableState, available_years: Vec<i32>) -> Self {
        let showing = view.row_range().map(|(from, to)| RowRange { from, to });
        Self {
            pagination: Pagination {
                page: view.current_page,
                per_page: view.page_size,
                total: view.total_filtered_count,
                total_pages: view.total_pages,
            },
            data: view.rows.into_iter().map(Into::into).collect(),
            showing,
            sort_by: state.sort_field(),
            sort_order: state.sort_direction(),
            available_years,
        }
    }
}

/// Raw text fields of an artwork create/replace form.
#[derive(Default, Debug)]
pub struct ArtworkForm {
    pub title: Option<String>,
    pub year: Option<String>,
    pub category: Option<String>,
    pub details: Option<String>,
    pub height: Option<String>,
    pub width: Option<String>,
    pub length: Option<String>,
}

impl ArtworkForm {
    /// Store a text field. Returns `false` for names the form does not know.
    pub fn set_field(&mut self, name: &str, value: String) -> bool {
        let slot = match name {
            "title" => &mut self.title,
            "year" => &mut self.year,
            // Older clients send the category as `medium`.
            "category" | "medium" => &mut self.category,
            "details" => &mut self.details,
            "height" => &mut self.height,
            "width" => &mut self.width,
            "length" => &mut self.length,
            _ => return false,
        };
        *slot = Some(value);
        true
    }

    pub fn validate(self, current_year: i32) -> Result<ArtworkInput, AppError> {
        let title = non_blank(self.title)
            .ok_or_else(|| AppError::Validation("Title is required".into()))?;
        if title.chars().count() > MAX_TITLE_CHARS {
            return Err(AppError::Validation("Title too long".into()));
        }

        let year = non_blank(self.year)
            .ok_or_else(|| AppError::Validation("Year is required".into()))?
            .parse::<i32>()
            .map_err(|_| AppError::Validation("Year must be a whole number".into()))?;
        if year < MIN_YEAR {
            return Err(AppError::Validation("Year must be 2000 or later".into()));
        }
        if year > current_year {
            return Err(AppError::Validation(format!(
                "Year cannot be later than {current_year}"
            )));
        }

        let category = non_blank(self.category)
            .ok_or_else(|| AppError::Validation("Category is required".into()))?
            .parse::<Category>()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let details = non_blank(self.details);
        if details
            .as_ref()
            .is_some_and(|d| d.chars().count() > MAX_DETAILS_CHARS)
        {
            return Err(AppError::Validation("Details too long".into()));
        }

        let height = parse_dimension(self.height, "Height")?;
        let width = parse_dimension(self.width, "Width")?;
        let length = parse_dimension(self.length, "Length")?;
        check_dimensions(category, height, width, length).map_err(|errors| {
            AppError::Validation(
                errors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; "),
            )
        })?;

        Ok(ArtworkInput {
            title,
            year,
            category,
            details,
            height,
            width,
            length,
        })
    }
}

fn parse_dimension(raw: Option<String>, label: &str) -> Result<Option<f64>, AppError> {
    let Some(raw) = non_blank(raw) else {
        return Ok(None);
    };
    let value = raw
        .parse::<f64>()
        .map_err(|_| AppError::Validation(format!("{label} must be a number")))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(AppError::Validation(format!("{label} must be positive")));
    }
    Ok(Some(value))
}

/// Validated artwork fields, ready to persist.
#[derive(Debug, PartialEq)]
pub struct ArtworkInput {
    pub title: String,
    pub year: i32,
    pub category: Category,
    pub details: Option<String>,
    pub height: Option<f64>,
    pub width: Option<f64>,
    pub length: Option<f64>,
}
