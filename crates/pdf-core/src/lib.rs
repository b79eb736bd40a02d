//! PDF Core - Low-level PDF assembly
//!
//! This crate provides functionality for:
//! - Creating blank documents with standard page formats (A4, Letter)
//! - Portrait and landscape orientation, in points
//! - Embedding raster images (PNG, JPEG) as image XObjects
//! - Scaling images to fit the page
//! - Serializing to bytes or to a file
//!
//! # Example
//!
//! ```ignore
//! use pdf_core::{ImageScaleMode, Orientation, PageFormat, PdfDocument};
//!
//! let mut doc = PdfDocument::with_page(PageFormat::A4, Orientation::Landscape);
//! let width = doc.page_size(1)?.width;
//! doc.insert_image_scaled(&png_bytes, 1, 0.0, 0.0, width, 0.0, ImageScaleMode::FitWidth)?;
//! let bytes = doc.to_bytes()?;
//! ```

mod document;
mod image;
mod page;

pub use document::PdfDocument;
pub use image::{calculate_scaled_dimensions, ImageScaleMode, ImageXObject};
pub use page::{Orientation, PageFormat, PageSize};

use thiserror::Error;

/// Errors that can occur during PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to save PDF: {0}")]
    SaveError(String),

    #[error("Invalid page number: {0} (document has {1} pages)")]
    InvalidPage(usize, usize),

    #[error("Image error: {0}")]
    ImageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Lopdf error: {0}")]
    LopdfError(#[from] lopdf::Error),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            PdfError::InvalidPage(3, 1).to_string(),
            "Invalid page number: 3 (document has 1 pages)"
        );
        assert_eq!(
            PdfError::ImageError("bad".to_string()).to_string(),
            "Image error: bad"
        );
    }
}
