//! Portuguese number, currency, and date formatting

/// Names for 0-19
const UNITS: [&str; 20] = [
    "zero",
    "um",
    "dois",
    "três",
    "quatro",
    "cinco",
    "seis",
    "sete",
    "oito",
    "nove",
    "dez",
    "onze",
    "doze",
    "treze",
    "catorze",
    "quinze",
    "dezesseis",
    "dezessete",
    "dezoito",
    "dezenove",
];

/// Tens (index = tens digit)
const TENS: [&str; 10] = [
    "",
    "",
    "vinte",
    "trinta",
    "quarenta",
    "cinquenta",
    "sessenta",
    "setenta",
    "oitenta",
    "noventa",
];

/// Hundreds (index = hundreds digit); exactly 100 is "cem"
const HUNDREDS: [&str; 10] = [
    "",
    "cento",
    "duzentos",
    "trezentos",
    "quatrocentos",
    "quinhentos",
    "seiscentos",
    "setecentos",
    "oitocentos",
    "novecentos",
];

/// Scale names per group of three digits (singular, plural)
const SCALES: [(&str, &str); 7] = [
    ("", ""),
    ("mil", "mil"),
    ("milhão", "milhões"),
    ("bilhão", "bilhões"),
    ("trilhão", "trilhões"),
    ("quatrilhão", "quatrilhões"),
    ("quintilhão", "quintilhões"),
];

/// Portuguese month names (long)
pub const MONTHS_LONG: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// Portuguese text formatting utilities
pub struct PtFormatter;

impl PtFormatter {
    /// Format a number as Portuguese words
    pub fn format_number(n: u64) -> String {
        format_pt_number(n)
    }

    /// Format an amount of money in reais as words
    pub fn format_reais(amount: f64) -> String {
        format_reais(amount)
    }

    /// Format a date as "05 de março de 2024"
    pub fn format_date_long(year: i32, month: u32, day: u32) -> String {
        format_pt_date_long(year, month, day)
    }

    /// Format a date as "05/03/2024"
    pub fn format_date_short(year: i32, month: u32, day: u32) -> String {
        format_pt_date_short(year, month, day)
    }
}

/// Spell out 1..=999
fn format_hundreds(n: u64) -> String {
    if n == 100 {
        return "cem".to_string();
    }

    let hundreds = (n / 100) as usize;
    let rest = (n % 100) as usize;
    let mut parts: Vec<&str> = Vec::with_capacity(3);

    if hundreds > 0 {
        parts.push(HUNDREDS[hundreds]);
    }
    if rest >= 20 {
        parts.push(TENS[rest / 10]);
        if rest % 10 > 0 {
            parts.push(UNITS[rest % 10]);
        }
    } else if rest > 0 {
        parts.push(UNITS[rest]);
    }

    parts.join(" e ")
}

/// Spell out one three-digit group followed by its scale word
fn format_group(value: u64, scale: usize) -> String {
    match scale {
        0 => format_hundreds(value),
        // "mil", never "um mil"
        1 if value == 1 => "mil".to_string(),
        _ => {
            let (singular, plural) = SCALES[scale];
            let name = if value == 1 { singular } else { plural };
            format!("{} {}", format_hundreds(value), name)
        }
    }
}

/// Format a non-negative integer as Portuguese words
///
/// Groups are joined with " e " when the following group is below one
/// hundred or a round hundred ("mil e cem", "mil e vinte"), otherwise
/// with a plain space ("mil duzentos e trinta").
///
/// # Examples
/// ```
/// use pt_text::format_pt_number;
/// assert_eq!(format_pt_number(0), "zero");
/// assert_eq!(format_pt_number(123), "cento e vinte e três");
/// assert_eq!(format_pt_number(1100), "mil e cem");
/// assert_eq!(format_pt_number(2_000_000), "dois milhões");
/// ```
pub fn format_pt_number(n: u64) -> String {
    if n == 0 {
        return UNITS[0].to_string();
    }

    let mut groups = Vec::new();
    let mut rest = n;
    let mut scale = 0;
    while rest > 0 {
        let value = rest % 1000;
        if value > 0 {
            groups.push((scale, value));
        }
        rest /= 1000;
        scale += 1;
    }

    let mut result = String::new();
    for (scale, value) in groups.into_iter().rev() {
        if !result.is_empty() {
            if value < 100 || value % 100 == 0 {
                result.push_str(" e ");
            } else {
                result.push(' ');
            }
        }
        result.push_str(&format_group(value, scale));
    }

    result
}

/// Amounts at or above this magnitude, in reais, are not spelled out
pub const MAX_AMOUNT: f64 = 1e15;

/// Format an amount in reais as words (monetary style)
///
/// Amounts are rounded to whole centavos. Exact millions and above take
/// "de reais" ("um milhão de reais"). Non-finite amounts and amounts whose
/// magnitude reaches [`MAX_AMOUNT`] yield an empty string.
///
/// # Examples
/// ```
/// use pt_text::format_reais;
/// assert_eq!(format_reais(1.0), "um real");
/// assert_eq!(format_reais(0.01), "um centavo");
/// assert_eq!(format_reais(123.40), "cento e vinte e três reais e quarenta centavos");
/// assert_eq!(format_reais(1_000_000.0), "um milhão de reais");
/// ```
pub fn format_reais(amount: f64) -> String {
    if !amount.is_finite() || amount.abs() >= MAX_AMOUNT {
        return String::new();
    }

    let cents = (amount.abs() * 100.0).round() as u64;
    let reais = cents / 100;
    let centavos = cents % 100;

    let reais_part = match reais {
        0 => None,
        1 => Some("um real".to_string()),
        r if r % 1_000_000 == 0 => Some(format!("{} de reais", format_pt_number(r))),
        r => Some(format!("{} reais", format_pt_number(r))),
    };
    let centavos_part = match centavos {
        0 => None,
        1 => Some("um centavo".to_string()),
        c => Some(format!("{} centavos", format_pt_number(c))),
    };

    let words = match (reais_part, centavos_part) {
        (None, None) => "zero reais".to_string(),
        (Some(r), None) => r,
        (None, Some(c)) => c,
        (Some(r), Some(c)) => format!("{r} e {c}"),
    };

    if amount < 0.0 && cents > 0 {
        format!("menos {words}")
    } else {
        words
    }
}

/// Format a date in long Portuguese form (e.g., "05 de março de 2024")
///
/// # Arguments
/// * `year` - Gregorian year
/// * `month` - Month (1-12)
/// * `day` - Day of month
pub fn format_pt_date_long(year: i32, month: u32, day: u32) -> String {
    let month_idx = month.saturating_sub(1) as usize;
    let month_name = MONTHS_LONG.get(month_idx).unwrap_or(&"");
    format!("{day:02} de {month_name} de {year}")
}

/// Format a date in short Portuguese form (e.g., "05/03/2024")
pub fn format_pt_date_short(year: i32, month: u32, day: u32) -> String {
    format!("{day:02}/{month:02}/{year}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_pt_number_units() {
        assert_eq!(format_pt_number(0), "zero");
        assert_eq!(format_pt_number(1), "um");
        assert_eq!(format_pt_number(9), "nove");
        assert_eq!(format_pt_number(14), "catorze");
        assert_eq!(format_pt_number(19), "dezenove");
    }

    #[test]
    fn test_format_pt_number_tens() {
        assert_eq!(format_pt_number(20), "vinte");
        assert_eq!(format_pt_number(21), "vinte e um");
        assert_eq!(format_pt_number(50), "cinquenta");
        assert_eq!(format_pt_number(99), "noventa e nove");
    }

    #[test]
    fn test_format_pt_number_hundreds() {
        assert_eq!(format_pt_number(100), "cem");
        assert_eq!(format_pt_number(101), "cento e um");
        assert_eq!(format_pt_number(150), "cento e cinquenta");
        assert_eq!(format_pt_number(200), "duzentos");
        assert_eq!(format_pt_number(515), "quinhentos e quinze");
        assert_eq!(format_pt_number(999), "novecentos e noventa e nove");
    }

    #[test]
    fn test_format_pt_number_thousands() {
        assert_eq!(format_pt_number(1000), "mil");
        assert_eq!(format_pt_number(1001), "mil e um");
        assert_eq!(format_pt_number(1100), "mil e cem");
        assert_eq!(format_pt_number(1234), "mil duzentos e trinta e quatro");
        assert_eq!(format_pt_number(2000), "dois mil");
        assert_eq!(format_pt_number(100_000), "cem mil");
        assert_eq!(
            format_pt_number(999_999),
            "novecentos e noventa e nove mil novecentos e noventa e nove"
        );
    }

    #[test]
    fn test_format_pt_number_millions() {
        assert_eq!(format_pt_number(1_000_000), "um milhão");
        assert_eq!(format_pt_number(2_000_000), "dois milhões");
        assert_eq!(format_pt_number(2_500_000), "dois milhões e quinhentos mil");
        assert_eq!(format_pt_number(1_000_000_000), "um bilhão");
        assert_eq!(
            format_pt_number(1_234_567),
            "um milhão duzentos e trinta e quatro mil quinhentos e sessenta e sete"
        );
    }

    #[test]
    fn test_format_reais() {
        assert_eq!(format_reais(0.0), "zero reais");
        assert_eq!(format_reais(1.0), "um real");
        assert_eq!(format_reais(2.0), "dois reais");
        assert_eq!(format_reais(0.01), "um centavo");
        assert_eq!(format_reais(0.29), "vinte e nove centavos");
        assert_eq!(format_reais(1.01), "um real e um centavo");
        assert_eq!(
            format_reais(150.5),
            "cento e cinquenta reais e cinquenta centavos"
        );
        assert_eq!(
            format_reais(123.40),
            "cento e vinte e três reais e quarenta centavos"
        );
    }

    #[test]
    fn test_format_reais_large() {
        assert_eq!(format_reais(1000.0), "mil reais");
        assert_eq!(format_reais(1_000_000.0), "um milhão de reais");
        assert_eq!(format_reais(3_000_000.0), "três milhões de reais");
        assert_eq!(
            format_reais(1_500_000.0),
            "um milhão e quinhentos mil reais"
        );
    }

    #[test]
    fn test_format_reais_rounding_and_sign() {
        assert_eq!(format_reais(10.999), "onze reais");
        assert_eq!(format_reais(-5.0), "menos cinco reais");
        assert_eq!(format_reais(-0.001), "zero reais");
        assert_eq!(format_reais(f64::NAN), "");
        assert_eq!(format_reais(f64::INFINITY), "");
    }

    #[test]
    fn test_format_reais_range() {
        assert_eq!(
            format_reais(999_999_999_999.0),
            "novecentos e noventa e nove bilhões novecentos e noventa e nove milhões \
             novecentos e noventa e nove mil novecentos e noventa e nove reais"
        );
        assert_eq!(format_reais(1e14), "cem trilhões de reais");
        assert_eq!(format_reais(MAX_AMOUNT), "");
        assert_eq!(format_reais(-1e20), "");
        assert_eq!(format_reais(1e20), "");
    }

    #[test]
    fn test_format_pt_date_long() {
        assert_eq!(format_pt_date_long(2024, 3, 5), "05 de março de 2024");
        assert_eq!(format_pt_date_long(2025, 12, 31), "31 de dezembro de 2025");
        assert_eq!(format_pt_date_long(2025, 1, 1), "01 de janeiro de 2025");
    }

    #[test]
    fn test_format_pt_date_short() {
        assert_eq!(format_pt_date_short(2024, 3, 5), "05/03/2024");
    }

    #[test]
    fn test_formatter_delegates() {
        assert_eq!(PtFormatter::format_number(42), "quarenta e dois");
        assert_eq!(PtFormatter::format_reais(2.5), "dois reais e cinquenta centavos");
        assert_eq!(PtFormatter::format_date_long(2024, 7, 9), "09 de julho de 2024");
        assert_eq!(PtFormatter::format_date_short(2024, 7, 9), "09/07/2024");
    }
}
