//! Admin artwork table: search, filter, sort and paginate a snapshot.
//!
//! The view is recomputed from the full snapshot on every call; nothing is
//! cached between calls.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::artwork::ArtworkRecord;
use crate::category::Category;
use crate::compare::{contains_ignore_case, locale_cmp, recent_first};

pub const DEFAULT_PAGE_SIZE: u64 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Year,
    CreatedAt,
    Title,
    Category,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::CreatedAt => "created_at",
            Self::Title => "title",
            Self::Category => "category",
        }
    }

    /// Ascending comparison on this field alone.
    fn compare(&self, a: &ArtworkRecord, b: &ArtworkRecord) -> Ordering {
        match self {
            Self::Year => a.year.cmp(&b.year),
            Self::CreatedAt => a.created_at.cmp(&b.created_at),
            Self::Title => locale_cmp(&a.title, &b.title),
            Self::Category => locale_cmp(a.category.as_str(), b.category.as_str()),
        }
    }
}

/// Error returned when a string is not a known sort field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSortFieldError {
    invalid: String,
}

impl fmt::Display for ParseSortFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sort_by must be one of: year, created_at, title, category (got '{}')",
            self.invalid
        )
    }
}

impl std::error::Error for ParseSortFieldError {}

impl FromStr for SortField {
    type Err = ParseSortFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "year" => Ok(Self::Year),
            "created_at" => Ok(Self::CreatedAt),
            "title" => Ok(Self::Title),
            "category" => Ok(Self::Category),
            _ => Err(ParseSortFieldError {
                invalid: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// Transient admin table state.
///
/// The page is coupled to the filters: changing the search text, category
/// filter or year filter snaps it back to page 1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableState {
    search: String,
    category: Option<Category>,
    year: Option<i32>,
    sort_field: SortField,
    sort_direction: SortDirection,
    page: u64,
    page_size: u64,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: None,
            year: None,
            sort_field: SortField::Year,
            sort_direction: SortDirection::Desc,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl TableState {
    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn sort_field(&self) -> SortField {
        self.sort_field
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        let search = search.into();
        if search != self.search {
            self.search = search;
            self.page = 1;
        }
    }

    pub fn set_category(&mut self, category: Option<Category>) {
        if category != self.category {
            self.category = category;
            self.page = 1;
        }
    }

    pub fn set_year(&mut self, year: Option<i32>) {
        if year != self.year {
            self.year = year;
            self.page = 1;
        }
    }

    /// Sort by `field`. Re-selecting the active field flips the direction;
    /// selecting a new field starts descending.
    pub fn toggle_sort(&mut self, field: SortField) {
        if field == self.sort_field {
            self.sort_direction = self.sort_direction.flipped();
        } else {
            self.sort_field = field;
            self.sort_direction = SortDirection::Desc;
        }
    }

    /// Set sort field and direction directly (e.g. from a query string).
    pub fn set_sort(&mut self, field: SortField, direction: SortDirection) {
        self.sort_field = field;
        self.sort_direction = direction;
    }

    pub fn set_page(&mut self, page: u64) {
        self.page = page.max(1);
    }

    pub fn set_page_size(&mut self, page_size: u64) {
        self.page_size = page_size.max(1);
    }

    fn matches(&self, record: &ArtworkRecord) -> bool {
        contains_ignore_case(&record.title, &self.search)
            && self.category.is_none_or(|c| record.category == c)
            && self.year.is_none_or(|y| record.year == y)
    }

    /// Full comparator: chosen field and direction, then most recently updated
    /// first regardless of direction.
    fn compare(&self, a: &ArtworkRecord, b: &ArtworkRecord) -> Ordering {
        self.sort_direction
            .apply(self.sort_field.compare(a, b))
            .then_with(|| recent_first(&a.updated_at, &b.updated_at))
    }

    /// Filter and sort without paginating.
    pub fn filtered(&self, records: &[ArtworkRecord]) -> Vec<ArtworkRecord> {
        let mut rows: Vec<ArtworkRecord> =
            records.iter().filter(|r| self.matches(r)).cloned().collect();
        rows.sort_by(|a, b| self.compare(a, b));
        rows
    }
}

/// One rendered page of the admin table.
#[derive(Clone, Debug, PartialEq)]
pub struct TableView {
    pub rows: Vec<ArtworkRecord>,
    pub total_filtered_count: u64,
    pub total_pages: u64,
    pub current_page: u64,
    pub page_size: u64,
}

impl TableView {
    /// 1-based `(first, last)` row numbers on this page, or `None` when empty.
    pub fn row_range(&self) -> Option<(u64, u64)> {
        if self.rows.is_empty() {
            return None;
        }
        let first = (self.current_page - 1) * self.page_size + 1;
        Some((first, first + self.rows.len() as u64 - 1))
    }
}

/// Derive the page described by `state` from the full snapshot.
pub fn derive_view(records: &[ArtworkRecord], state: &TableState) -> TableView {
    let filtered = state.filtered(records);
    let total_filtered_count = filtered.len() as u64;
    let total_pages = total_filtered_count.div_ceil(state.page_size);

    let offset = (state.page - 1).saturating_mul(state.page_size);
    let rows = filtered
        .into_iter()
        .skip(usize::try_from(offset).unwrap_or(usize::MAX))
        .take(usize::try_from(state.page_size).unwrap_or(usize::MAX))
        .collect();

    TableView {
        rows,
        total_filtered_count,
        total_pages,
        current_page: state.page,
        page_size: state.page_size,
    }
}

/// Distinct years present in the snapshot, newest first.
pub fn available_years(records: &[ArtworkRecord]) -> Vec<i32> {
    let mut years: Vec<i32> = records.iter().map(|r| r.year).collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}
