//! Parsing of form input

use crate::formatter::MAX_AMOUNT;
use crate::{PtTextError, Result};
use chrono::NaiveDate;

/// Parse a decimal amount as typed into a form field
///
/// Surrounding whitespace is ignored. The input must be a finite number
/// using "." as the decimal separator, with a magnitude below
/// [`MAX_AMOUNT`]. "150,50", "", "inf", "NaN" and "1e20" are rejected.
///
/// # Examples
/// ```
/// use pt_text::parse_amount;
/// assert_eq!(parse_amount(" 150.5 ").unwrap(), 150.5);
/// assert!(parse_amount("150,50").is_err());
/// ```
pub fn parse_amount(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(PtTextError::InvalidAmount(text.to_string()));
    }

    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() && n.abs() < MAX_AMOUNT => Ok(n),
        _ => Err(PtTextError::InvalidAmount(text.to_string())),
    }
}

/// Parse an ISO calendar date (YYYY-MM-DD)
///
/// # Examples
/// ```
/// use pt_text::parse_iso_date;
/// let date = parse_iso_date("2024-03-05").unwrap();
/// assert_eq!(date.to_string(), "2024-03-05");
/// assert!(parse_iso_date("").is_err());
/// ```
pub fn parse_iso_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .map_err(|_| PtTextError::InvalidDate(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_parse_amount_valid() {
        assert_eq!(parse_amount("150.5").unwrap(), 150.5);
        assert_eq!(parse_amount("0").unwrap(), 0.0);
        assert_eq!(parse_amount("  42 ").unwrap(), 42.0);
        assert_eq!(parse_amount("1e3").unwrap(), 1000.0);
        assert_eq!(parse_amount("-3.25").unwrap(), -3.25);
    }

    #[test]
    fn test_parse_amount_invalid() {
        assert!(parse_amount("").is_err());
        assert!(parse_amount("   ").is_err());
        assert!(parse_amount("150,50").is_err());
        assert!(parse_amount("12a").is_err());
        assert!(parse_amount("inf").is_err());
        assert!(parse_amount("NaN").is_err());
    }

    #[test]
    fn test_parse_amount_out_of_range() {
        assert_eq!(
            parse_amount("1e20"),
            Err(PtTextError::InvalidAmount("1e20".to_string()))
        );
        assert!(parse_amount("-1e20").is_err());
        assert!(parse_amount("1000000000000000").is_err());
        assert_eq!(parse_amount("999999999999999").unwrap(), 999_999_999_999_999.0);
    }

    #[test]
    fn test_parse_amount_error_keeps_input() {
        assert_eq!(
            parse_amount("abc"),
            Err(PtTextError::InvalidAmount("abc".to_string()))
        );
    }

    #[test]
    fn test_parse_iso_date() {
        let date = parse_iso_date("2024-03-05").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 3, 5));
    }

    #[test]
    fn test_parse_iso_date_invalid() {
        assert!(parse_iso_date("").is_err());
        assert!(parse_iso_date("05/03/2024").is_err());
        assert!(parse_iso_date("2024-02-30").is_err());
        assert!(parse_iso_date("2024-13-01").is_err());
    }
}
