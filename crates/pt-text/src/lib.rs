//! PT Text - Brazilian Portuguese text formatting
//!
//! This crate provides:
//! - Number names in Portuguese (um, dois, três...)
//! - Monetary amounts in words (reais, centavos)
//! - Long and short date formatting (05 de março de 2024)
//! - Lenient parsing of amount and ISO date input
//!
//! # Example
//!
//! ```
//! use pt_text::{format_pt_number, format_reais, format_pt_date_long};
//!
//! assert_eq!(format_pt_number(42), "quarenta e dois");
//! assert_eq!(format_reais(150.5), "cento e cinquenta reais e cinquenta centavos");
//! assert_eq!(format_pt_date_long(2024, 3, 5), "05 de março de 2024");
//! ```

mod formatter;
mod parse;

pub use formatter::PtFormatter;

pub use formatter::{
    format_pt_date_long, format_pt_date_short, format_pt_number, format_reais, MAX_AMOUNT,
    MONTHS_LONG,
};
pub use parse::{parse_amount, parse_iso_date};

use thiserror::Error;

/// Errors that can occur during Portuguese text processing
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PtTextError {
    #[error("Invalid date: {0:?}")]
    InvalidDate(String),

    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),
}

/// Result type for Portuguese text operations
pub type Result<T> = std::result::Result<T, PtTextError>;
