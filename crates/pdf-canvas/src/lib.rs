//! PDF Canvas - Low-level PDF overlay drawing
//!
//! This crate provides functionality for:
//! - Opening template PDF documents and reading their page geometry
//! - Building transparent single-page overlays (rectangles, text, images)
//! - Embedding a TrueType font for CID text drawing
//! - Stamping an overlay onto a template's first page
//!
//! # Example
//!
//! ```ignore
//! use pdf_canvas::{Canvas, Color, FontData, TemplateDocument};
//!
//! let mut font = FontData::from_ttf("noto", &std::fs::read("NotoSansKR.ttf")?)?;
//! let mut template = TemplateDocument::open("templates/iloom/BASIC_M.pdf")?;
//! let (w, h) = template.page_size()?;
//!
//! let mut canvas = Canvas::new(w, h);
//! canvas.fill_rect(Color::white(), 180.0, 295.0, 160.0, 55.0);
//! canvas.draw_text(&mut font, "IL-001", 180.0, 330.0, 26.0, false);
//!
//! template.stamp(&canvas, &font)?;
//! template.save_first_page("out.pdf")?;
//! ```

mod canvas;
mod document;
mod font;
mod image;

pub use canvas::{Canvas, Color};
pub use document::TemplateDocument;
pub use font::FontData;
pub use image::ImageXObject;

use thiserror::Error;

/// Errors that can occur during PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to open PDF: {0}")]
    OpenError(String),

    #[error("Failed to save PDF: {0}")]
    SaveError(String),

    #[error("Failed to parse font: {0}")]
    FontParseError(String),

    #[error("Image error: {0}")]
    ImageError(String),

    #[error("PDF parsing error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Lopdf error: {0}")]
    LopdfError(#[from] lopdf::Error),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;
