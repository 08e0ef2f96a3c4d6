use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::category::Category;

/// A point-in-time copy of one artwork, as consumed by the catalog and
/// admin table engines.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArtworkRecord {
    pub id: String,
    pub title: String,
    pub year: i32,
    pub category: Category,
    pub details: Option<String>,
    /// Inches.
    pub height: Option<f64>,
    /// Inches.
    pub width: Option<f64>,
    /// Inches. Only meaningful for sculpture.
    pub length: Option<f64>,
    /// Opaque reference to the image blob.
    pub image_ref: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ArtworkRecord {
    /// Public dimension string, or `None` when the required subset is missing.
    pub fn dimensions(&self) -> Option<String> {
        format_dimensions(self.category, self.height, self.width, self.length)
    }
}

/// Format dimensions for public display.
///
/// Sculpture reads `length × width × height`; everything else reads
/// `height × width`.
pub fn format_dimensions(
    category: Category,
    height: Option<f64>,
    width: Option<f64>,
    length: Option<f64>,
) -> Option<String> {
    match category {
        Category::Sculpture => {
            let (h, w, l) = (height?, width?, length?);
            Some(format!("{l}\" × {w}\" × {h}\""))
        }
        Category::Painting | Category::WorkOnPaper => {
            let (h, w) = (height?, width?);
            Some(format!("{h}\" × {w}\""))
        }
    }
}

/// Dimension completeness violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DimensionError {
    #[error("Height is required when dimensions are provided")]
    MissingHeight,
    #[error("Width is required when dimensions are provided")]
    MissingWidth,
    #[error("Length is required when dimensions are provided")]
    MissingLength,
    #[error("Width is required when height is provided")]
    WidthRequiredWithHeight,
    #[error("Height is required when width is provided")]
    HeightRequiredWithWidth,
    #[error("Length is only applicable to sculptures")]
    LengthNotApplicable,
}

impl DimensionError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingHeight | Self::HeightRequiredWithWidth => "height",
            Self::MissingWidth | Self::WidthRequiredWithHeight => "width",
            Self::MissingLength | Self::LengthNotApplicable => "length",
        }
    }
}

/// Check the dimension completeness rule for a category.
///
/// Sculpture takes all three dimensions or none. Paintings and works on paper
/// take height and width together or neither, and never a length. All
/// violations are reported, in field order.
pub fn check_dimensions(
    category: Category,
    height: Option<f64>,
    width: Option<f64>,
    length: Option<f64>,
) -> Result<(), Vec<DimensionError>> {
    let (has_h, has_w, has_l) = (height.is_some(), width.is_some(), length.is_some());
    let mut errors = Vec::new();

    if category.is_three_dimensional() {
        let provided = [has_h, has_w, has_l].iter().filter(|p| **p).count();
        if provided > 0 && provided < 3 {
            if !has_h {
                errors.push(DimensionError::MissingHeight);
            }
            if !has_w {
                errors.push(DimensionError::MissingWidth);
            }
            if !has_l {
                errors.push(DimensionError::MissingLength);
            }
        }
    } else {
        if has_h && !has_w {
            errors.push(DimensionError::WidthRequiredWithHeight);
        }
        if has_w && !has_h {
            errors.push(DimensionError::HeightRequiredWithWidth);
        }
        if has_l {
            errors.push(DimensionError::LengthNotApplicable);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
