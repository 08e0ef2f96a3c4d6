//! Public catalog ordering and sequential navigation.
//!
//! The grid and the detail page both go through [`grid`], so the position and
//! neighbors reported by [`detail`] always match what the grid shows.

use std::cmp::Ordering;

use serde::Serialize;
use thiserror::Error;

use crate::artwork::ArtworkRecord;
use crate::category::Category;
use crate::compare::recent_first;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("artwork '{0}' is not in the current view")]
    NotFound(String),
}

/// Where an identifier sits inside an ordered, filtered list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Located {
    /// 1-based.
    pub position: usize,
    pub total: usize,
    pub prev_id: Option<String>,
    pub next_id: Option<String>,
}

/// The grid view for one category (or all of them).
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogGrid {
    pub category: Option<Category>,
    pub records: Vec<ArtworkRecord>,
    pub display_count: usize,
}

/// One record plus its place in its category's grid.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogDetail {
    pub record: ArtworkRecord,
    pub position: usize,
    pub total: usize,
    pub prev_id: Option<String>,
    pub next_id: Option<String>,
}

/// Keep only records of `category`, preserving input order. `None` keeps all.
pub fn filter_by_category(
    records: Vec<ArtworkRecord>,
    category: Option<Category>,
) -> Vec<ArtworkRecord> {
    match category {
        None => records,
        Some(category) => records
            .into_iter()
            .filter(|r| r.category == category)
            .collect(),
    }
}

/// Display comparator: newest year first, then most recently updated.
pub fn display_cmp(a: &ArtworkRecord, b: &ArtworkRecord) -> Ordering {
    b.year
        .cmp(&a.year)
        .then_with(|| recent_first(&a.updated_at, &b.updated_at))
}

/// Canonical display order. Stable, so full ties keep their input order.
pub fn order_for_display(mut records: Vec<ArtworkRecord>) -> Vec<ArtworkRecord> {
    records.sort_by(display_cmp);
    records
}

/// Find `target_id` in an ordered list of identifiers.
pub fn locate<S: AsRef<str>>(ids: &[S], target_id: &str) -> Result<Located, CatalogError> {
    let index = ids
        .iter()
        .position(|id| id.as_ref() == target_id)
        .ok_or_else(|| CatalogError::NotFound(target_id.to_string()))?;

    let prev_id = index
        .checked_sub(1)
        .map(|i| ids[i].as_ref().to_string());
    let next_id = ids.get(index + 1).map(|id| id.as_ref().to_string());

    Ok(Located {
        position: index + 1,
        total: ids.len(),
        prev_id,
        next_id,
    })
}

/// Build the grid shown for `category`.
pub fn grid(records: Vec<ArtworkRecord>, category: Option<Category>) -> CatalogGrid {
    let records = filter_by_category(order_for_display(records), category);
    let display_count = records.len();
    CatalogGrid {
        category,
        records,
        display_count,
    }
}

/// Resolve `target_id` and its neighbors within the grid of its own category.
pub fn detail(records: Vec<ArtworkRecord>, target_id: &str) -> Result<CatalogDetail, CatalogError> {
    let category = records
        .iter()
        .find(|r| r.id == target_id)
        .map(|r| r.category)
        .ok_or_else(|| CatalogError::NotFound(target_id.to_string()))?;

    let grid = grid(records, Some(category));
    let ids: Vec<&str> = grid.records.iter().map(|r| r.id.as_str()).collect();
    let located = locate(&ids, target_id)?;

    let record = grid
        .records
        .into_iter()
        .nth(located.position - 1)
        .ok_or_else(|| CatalogError::NotFound(target_id.to_string()))?;

    Ok(CatalogDetail {
        record,
        position: located.position,
        total: located.total,
        prev_id: located.prev_id,
        next_id: located.next_id,
    })
}
