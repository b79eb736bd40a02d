//! Receipt - form state, rendering and PDF export of numbered receipts
//!
//! This crate provides:
//! - Form state with derived amount-in-words (`ReceiptSession`, `ReceiptForm`)
//! - A persisted receipt counter cycling 001-999 (`ReceiptCounter`, `KeyValueStore`)
//! - A fixed receipt layout (`render_receipt`)
//! - Rasterization of the layout (`GlyphRasterizer`)
//! - Export to a landscape A4 PDF named `recibo_NNN.pdf` (`Exporter`)
//!
//! # Example
//!
//! ```ignore
//! use receipt::{DirectorySink, Exporter, FileStore, FormField, GlyphRasterizer};
//! use receipt::{ReceiptConfig, ReceiptSession};
//!
//! let config = ReceiptConfig::load_or_default("recibo.toml")?;
//! let mut session = ReceiptSession::open(FileStore::new(&config.receipt.counter_store))?;
//! session.update_field(FormField::ReceiverName, "João Souza");
//! session.update_field(FormField::AmountNumeric, "150.5");
//! session.update_field(FormField::Date, "2024-03-05");
//!
//! let rasterizer = GlyphRasterizer::from_settings(&config.raster)?;
//! let mut exporter = Exporter::new(&config, rasterizer, DirectorySink::new("out"));
//! let outcome = exporter.export(&mut session)?;
//! println!("{}", outcome.path.display());
//! ```

mod config;
mod counter;
mod exporter;
mod form;
mod layout;
mod raster;
mod session;
mod store;

pub use config::{ProviderProfile, RasterSettings, ReceiptConfig, ReceiptSettings, MIN_SCALE};
pub use counter::{format_receipt_number, ReceiptCounter, COUNTER_KEY, MAX_RECEIPT_NUMBER};
pub use exporter::{
    build_pdf, DirectorySink, ExportOutcome, Exporter, PreparedReceipt, ReceiptSink,
};
pub use form::{derive_words_form, FormField, ReceiptForm};
pub use layout::{render_receipt, Align, Block, ReceiptLayout, Span, INVALID_DATE};
pub use raster::{GlyphRasterizer, Raster, Rasterizer};
pub use session::ReceiptSession;
pub use store::{FileStore, KeyValueStore, MemoryStore};

use thiserror::Error;

/// Errors that can occur while filling, rendering or exporting a receipt
#[derive(Debug, Error)]
pub enum ReceiptError {
    #[error("Unknown form field: {0}")]
    UnknownField(String),

    #[error("Invalid date: {0:?} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Store error: {0}")]
    StoreError(String),

    #[error("Font error: {0}")]
    FontError(String),

    #[error("Rasterization failed: {0}")]
    RasterError(String),

    #[error("Delivery failed: {0}")]
    DeliveryError(String),

    #[error("Receipt {prepared} was prepared but the counter is now at {current}")]
    StaleReceipt { prepared: String, current: String },

    #[error("PDF error: {0}")]
    PdfError(#[from] pdf_core::PdfError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for receipt operations
pub type Result<T> = std::result::Result<T, ReceiptError>;
