//! Packaging-box label overlay engine
//!
//! Generates print-ready label PDFs by overlaying per-item text (SKU,
//! Korean/English product names) and an origin-country icon onto
//! brand-specific PDF templates. Rendering is driven by two inputs:
//!
//! - tabular item rows (CSV), and
//! - a JSON coordinate registry mapping brands and template keys to
//!   draw layouts.
//!
//! The pipeline per row: resolve the template file from
//! (brand, box type, box group), resolve the layout for that exact
//! template (falling back to the brand default), render a transparent
//! overlay honoring hide/rotate flags and zero-coordinate suppression,
//! then stamp the overlay onto the template's first page.

pub mod bundle;
pub mod compose;
pub mod icon;
pub mod layout;
pub mod normalize;
pub mod overlay;
pub mod registry;
pub mod row;
pub mod template;

#[cfg(test)]
pub(crate) mod testutil;

pub use compose::Composer;
pub use icon::IconStore;
pub use layout::{FieldKey, IconKey, Layout, Point, Rect};
pub use normalize::{normalize, normalize_country};
pub use registry::CoordRegistry;
pub use row::LabelRow;

pub use pdf_canvas::FontData;

use thiserror::Error;

/// Errors that can occur in the label pipeline
#[derive(Debug, Error)]
pub enum LabelError {
    /// Coordinate registry missing, unreadable, or invalid
    #[error("Config error: {0}")]
    Config(String),

    /// Input rows missing required columns
    #[error("Input schema error: missing columns: {0}")]
    Schema(String),

    /// Brand directory does not exist under the template root
    #[error("Brand directory not found: {0}")]
    BrandDirectoryNotFound(String),

    /// No template file matches the brand/box type/box group
    #[error("Template not found for brand '{brand}', box type '{box_type}', box group '{box_group}'")]
    TemplateNotFound {
        brand: String,
        box_type: String,
        box_group: String,
    },

    /// Two template files normalize to the same lookup key
    #[error("Duplicate template key '{key}' in brand '{brand}': {first} and {second}")]
    DuplicateTemplateKey {
        brand: String,
        key: String,
        first: String,
        second: String,
    },

    /// No template-specific layout and no brand default
    #[error("No layout for brand '{brand}', template key '{template_key}'")]
    LayoutNotFound {
        brand: String,
        template_key: String,
    },

    /// Typeface or other required asset missing/unusable
    #[error("Asset error: {0}")]
    Asset(String),

    #[error(transparent)]
    Pdf(#[from] pdf_canvas::PdfError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),
}

/// Result type for label pipeline operations
pub type Result<T> = std::result::Result<T, LabelError>;
