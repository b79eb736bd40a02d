//! Receipt form fields and their derived values

use crate::{ReceiptError, Result};
use chrono::NaiveDate;
use pt_text::{format_reais, parse_amount, parse_iso_date};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Editable receipt fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    ReceiverName,
    ReceiverTaxId,
    AmountNumeric,
    Procedure,
    Location,
    Date,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::ReceiverName,
        FormField::ReceiverTaxId,
        FormField::AmountNumeric,
        FormField::Procedure,
        FormField::Location,
        FormField::Date,
    ];

    /// Canonical field name
    pub fn name(self) -> &'static str {
        match self {
            FormField::ReceiverName => "receiverName",
            FormField::ReceiverTaxId => "receiverTaxId",
            FormField::AmountNumeric => "amountNumeric",
            FormField::Procedure => "procedure",
            FormField::Location => "location",
            FormField::Date => "date",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FormField {
    type Err = ReceiptError;

    /// Accepts `receiverName`, `receiver_name` and `receiver-name` spellings
    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "receivername" => Ok(FormField::ReceiverName),
            "receivertaxid" => Ok(FormField::ReceiverTaxId),
            "amountnumeric" | "amount" => Ok(FormField::AmountNumeric),
            "procedure" => Ok(FormField::Procedure),
            "location" => Ok(FormField::Location),
            "date" => Ok(FormField::Date),
            _ => Err(ReceiptError::UnknownField(s.to_string())),
        }
    }
}

/// Current values of the receipt form
///
/// `amount_words` is never set directly; it follows `amount_numeric`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReceiptForm {
    receiver_name: String,
    receiver_tax_id: String,
    amount_numeric: String,
    amount_words: String,
    procedure: String,
    location: String,
    date: String,
}

impl ReceiptForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace one field's value
    ///
    /// Changing the amount re-derives the amount in words. Text that does not
    /// parse as a number leaves the previous words in place.
    pub fn update_field(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::ReceiverName => self.receiver_name = value,
            FormField::ReceiverTaxId => self.receiver_tax_id = value,
            FormField::AmountNumeric => {
                self.amount_words = derive_words_form(&value, &self.amount_words);
                self.amount_numeric = value;
            }
            FormField::Procedure => self.procedure = value,
            FormField::Location => self.location = value,
            FormField::Date => self.date = value,
        }
    }

    /// Value of a field as typed
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::ReceiverName => &self.receiver_name,
            FormField::ReceiverTaxId => &self.receiver_tax_id,
            FormField::AmountNumeric => &self.amount_numeric,
            FormField::Procedure => &self.procedure,
            FormField::Location => &self.location,
            FormField::Date => &self.date,
        }
    }

    pub fn receiver_name(&self) -> &str {
        &self.receiver_name
    }

    pub fn receiver_tax_id(&self) -> &str {
        &self.receiver_tax_id
    }

    pub fn amount_numeric(&self) -> &str {
        &self.amount_numeric
    }

    /// Amount spelled out in Portuguese, e.g. "cem reais"
    pub fn amount_words(&self) -> &str {
        &self.amount_words
    }

    pub fn procedure(&self) -> &str {
        &self.procedure
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    /// The service date, if it is a valid `YYYY-MM-DD` value
    pub fn parsed_date(&self) -> Result<NaiveDate> {
        parse_iso_date(&self.date).map_err(|_| ReceiptError::InvalidDate(self.date.clone()))
    }

    /// Check the form can be exported
    pub fn validate(&self) -> Result<()> {
        self.parsed_date().map(|_| ())
    }
}

/// Words for a typed amount, or `previous` when the text is not a number
///
/// # Example
/// ```
/// use receipt::derive_words_form;
///
/// assert_eq!(derive_words_form("100", ""), "cem reais");
/// assert_eq!(derive_words_form("abc", "cem reais"), "cem reais");
/// ```
pub fn derive_words_form(amount_numeric: &str, previous: &str) -> String {
    match parse_amount(amount_numeric) {
        Ok(amount) => format_reais(amount),
        Err(e) => {
            debug!("keeping previous amount words: {e}");
            previous.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_field_names_round_trip() {
        for field in FormField::ALL {
            assert_eq!(field.name().parse::<FormField>().unwrap(), field);
        }
    }

    #[test]
    fn test_field_name_spellings() {
        assert_eq!(
            "receiver_tax_id".parse::<FormField>().unwrap(),
            FormField::ReceiverTaxId
        );
        assert_eq!(
            "receiver-name".parse::<FormField>().unwrap(),
            FormField::ReceiverName
        );
        assert_eq!("amount".parse::<FormField>().unwrap(), FormField::AmountNumeric);
        assert!(matches!(
            "signature".parse::<FormField>(),
            Err(ReceiptError::UnknownField(name)) if name == "signature"
        ));
    }

    #[test]
    fn test_update_plain_field() {
        let mut form = ReceiptForm::new();
        form.update_field(FormField::ReceiverName, "João Souza");
        assert_eq!(form.receiver_name(), "João Souza");
        assert_eq!(form.get(FormField::ReceiverName), "João Souza");
        assert_eq!(form.amount_words(), "");
    }

    #[test]
    fn test_amount_derives_words() {
        let mut form = ReceiptForm::new();
        form.update_field(FormField::AmountNumeric, "150.5");
        assert_eq!(form.amount_numeric(), "150.5");
        assert_eq!(
            form.amount_words(),
            "cento e cinquenta reais e cinquenta centavos"
        );
    }

    #[test]
    fn test_unparsable_amount_keeps_previous_words() {
        let mut form = ReceiptForm::new();
        form.update_field(FormField::AmountNumeric, "100");
        form.update_field(FormField::AmountNumeric, "1a");
        assert_eq!(form.amount_numeric(), "1a");
        assert_eq!(form.amount_words(), "cem reais");

        form.update_field(FormField::AmountNumeric, "");
        assert_eq!(form.amount_numeric(), "");
        assert_eq!(form.amount_words(), "cem reais");
    }

    #[test]
    fn test_huge_amount_keeps_previous_words() {
        let mut form = ReceiptForm::new();
        form.update_field(FormField::AmountNumeric, "100");
        form.update_field(FormField::AmountNumeric, "1e20");
        assert_eq!(form.amount_numeric(), "1e20");
        assert_eq!(form.amount_words(), "cem reais");
    }

    #[test]
    fn test_date_validation() {
        let mut form = ReceiptForm::new();
        assert!(matches!(form.validate(), Err(ReceiptError::InvalidDate(_))));

        form.update_field(FormField::Date, "2024-02-30");
        assert!(form.validate().is_err());

        form.update_field(FormField::Date, "2024-03-05");
        assert_eq!(
            form.parsed_date().unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
        );
    }
}
