//! Receipt numbering, persisted between runs

use crate::store::KeyValueStore;
use crate::Result;
use std::fmt;
use tracing::warn;

/// Store key holding the next receipt number
pub const COUNTER_KEY: &str = "receiptNumber";

/// Highest receipt number before wrapping back to 1
pub const MAX_RECEIPT_NUMBER: u32 = 999;

/// Number of the next receipt to export, always in `1..=999`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReceiptCounter(u32);

impl Default for ReceiptCounter {
    fn default() -> Self {
        Self(1)
    }
}

impl ReceiptCounter {
    /// Counter at `value`, if it is in range
    pub fn new(value: u32) -> Option<Self> {
        (1..=MAX_RECEIPT_NUMBER).contains(&value).then_some(Self(value))
    }

    pub fn value(self) -> u32 {
        self.0
    }

    /// The number after this one; 999 wraps to 1
    pub fn next(self) -> Self {
        if self.0 >= MAX_RECEIPT_NUMBER {
            Self(1)
        } else {
            Self(self.0 + 1)
        }
    }

    /// Zero-padded form used on the receipt ("007")
    pub fn formatted(self) -> String {
        format_receipt_number(self.0)
    }

    /// Export file name, e.g. `recibo_007.pdf`
    pub fn filename(self) -> String {
        format!("recibo_{}.pdf", self.formatted())
    }

    /// Parse a stored value; anything other than a decimal in range is rejected
    pub fn parse(text: &str) -> Option<Self> {
        text.trim().parse::<u32>().ok().and_then(Self::new)
    }

    /// Read the counter from a store
    ///
    /// A missing or unusable value starts the sequence at 1. Store failures
    /// are returned as errors.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Result<Self> {
        match store.get(COUNTER_KEY)? {
            None => Ok(Self::default()),
            Some(raw) => Ok(Self::parse(&raw).unwrap_or_else(|| {
                warn!("stored receipt number {raw:?} is not usable, starting at 001");
                Self::default()
            })),
        }
    }

    /// Write the counter to a store
    pub fn persist<S: KeyValueStore + ?Sized>(self, store: &mut S) -> Result<()> {
        store.set(COUNTER_KEY, &self.0.to_string())
    }
}

impl fmt::Display for ReceiptCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

/// Zero-pad a receipt number to at least three digits
///
/// # Example
/// ```
/// use receipt::format_receipt_number;
///
/// assert_eq!(format_receipt_number(7), "007");
/// assert_eq!(format_receipt_number(999), "999");
/// ```
pub fn format_receipt_number(n: u32) -> String {
    format!("{n:03}")
}
