//! Number, date and currency formatting
//!
//! Locale rules cover the portal languages. Anything the tables cannot format
//! degrades to a plain rendering instead of failing.

use chrono::{
    Datelike,
    NaiveDate,
};
use thiserror::Error;

use crate::types::LanguageCode;

/// Currency used when the caller does not name one.
pub const DEFAULT_CURRENCY: &str = "INR";

/// Maximum fraction digits of a formatted number.
const MAX_FRACTION_DIGITS: usize = 3;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub(crate) enum FormatError {
    #[error("No formatting rules for locale '{0}'")]
    UnsupportedLocale(String),
    #[error("Cannot format non-finite number")]
    NonFinite,
    #[error("Invalid currency code '{0}'")]
    InvalidCurrency(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Grouping {
    /// 1,234,567
    Western,
    /// 12,34,567
    Indian,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateOrder {
    /// January 5, 2024
    MonthDayYear,
    /// 5 January 2024
    DayMonthYear,
}

#[derive(Debug)]
struct LocaleRules {
    decimal: char,
    group: char,
    grouping: Grouping,
    date_order: DateOrder,
    months: [&'static str; 12],
}

const ENGLISH_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const HINDI_MONTHS: [&str; 12] = [
    "जनवरी",
    "फ़रवरी",
    "मार्च",
    "अप्रैल",
    "मई",
    "जून",
    "जुलाई",
    "अगस्त",
    "सितंबर",
    "अक्तूबर",
    "नवंबर",
    "दिसंबर",
];

const URDU_MONTHS: [&str; 12] = [
    "جنوری", "فروری", "مارچ", "اپریل", "مئی", "جون", "جولائی", "اگست", "ستمبر", "اکتوبر", "نومبر",
    "دسمبر",
];

static EN: LocaleRules = LocaleRules {
    decimal: '.',
    group: ',',
    grouping: Grouping::Western,
    date_order: DateOrder::MonthDayYear,
    months: ENGLISH_MONTHS,
};

static EN_IN: LocaleRules = LocaleRules {
    decimal: '.',
    group: ',',
    grouping: Grouping::Indian,
    date_order: DateOrder::DayMonthYear,
    months: ENGLISH_MONTHS,
};

static HI: LocaleRules = LocaleRules {
    decimal: '.',
    group: ',',
    grouping: Grouping::Indian,
    date_order: DateOrder::DayMonthYear,
    months: HINDI_MONTHS,
};

static UR: LocaleRules = LocaleRules {
    decimal: '.',
    group: ',',
    grouping: Grouping::Western,
    date_order: DateOrder::DayMonthYear,
    months: URDU_MONTHS,
};

static UR_IN: LocaleRules = LocaleRules {
    decimal: '.',
    group: ',',
    grouping: Grouping::Indian,
    date_order: DateOrder::DayMonthYear,
    months: URDU_MONTHS,
};

/// Exact tag first, then the primary subtag.
fn rules_for(language: &LanguageCode) -> Result<&'static LocaleRules, FormatError> {
    let normalized = language.as_str().replace('_', "-").to_ascii_lowercase();
    let rules = match normalized.as_str() {
        "en-in" => Some(&EN_IN),
        "ur-in" => Some(&UR_IN),
        _ => match language.primary().to_ascii_lowercase().as_str() {
            "en" => Some(&EN),
            "hi" => Some(&HI),
            "ur" => Some(&UR),
            _ => None,
        },
    };
    rules.ok_or_else(|| FormatError::UnsupportedLocale(language.to_string()))
}

fn currency_symbol(code: &str) -> Result<(&str, usize), FormatError> {
    let known = match code {
        "INR" => Some(("₹", 2)),
        "USD" => Some(("$", 2)),
        "EUR" => Some(("€", 2)),
        "GBP" => Some(("£", 2)),
        "JPY" => Some(("¥", 0)),
        "PKR" => Some(("Rs", 2)),
        _ => None,
    };
    match known {
        Some(symbol) => Ok(symbol),
        None if code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase()) => Ok((code, 2)),
        None => Err(FormatError::InvalidCurrency(code.to_string())),
    }
}

/// Inserts group separators into a string of ASCII digits.
fn group_digits(digits: &str, separator: char, grouping: Grouping) -> String {
    let mut groups: Vec<&str> = Vec::new();
    let mut rest = digits;

    let mut size = 3;
    while rest.len() > size {
        let (head, tail) = rest.split_at(rest.len() - size);
        groups.push(tail);
        rest = head;
        if grouping == Grouping::Indian {
            size = 2;
        }
    }
    groups.push(rest);

    groups.reverse();
    groups.join(&separator.to_string())
}

/// Renders `value` with `fraction_digits` decimals using `rules`.
///
/// With `trim`, trailing fraction zeros are dropped.
fn render_number(
    value: f64,
    fraction_digits: usize,
    trim: bool,
    rules: &LocaleRules,
) -> Result<String, FormatError> {
    if !value.is_finite() {
        return Err(FormatError::NonFinite);
    }

    let fixed = format!("{:.*}", fraction_digits, value.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = if trim { fraction.trim_end_matches('0') } else { fraction };

    let mut result = String::new();
    if value.is_sign_negative() && fixed.bytes().any(|b| matches!(b, b'1'..=b'9')) {
        result.push('-');
    }
    result.push_str(&group_digits(integer, rules.group, rules.grouping));
    if !fraction.is_empty() {
        result.push(rules.decimal);
        result.push_str(fraction);
    }
    Ok(result)
}

/// Locale-aware formatting for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatter {
    language: LanguageCode,
}

impl Formatter {
    #[must_use]
    pub const fn new(language: LanguageCode) -> Self {
        Self { language }
    }

    #[must_use]
    pub const fn language(&self) -> &LanguageCode {
        &self.language
    }

    /// `1234567.891` → `1,234,567.891` (`en`) or `12,34,567.891` (`hi`).
    ///
    /// Falls back to `value.to_string()`.
    #[must_use]
    pub fn format_number(&self, value: f64) -> String {
        self.try_format_number(value).unwrap_or_else(|e| {
            tracing::debug!(language = %self.language, error = %e, "Number formatting fell back");
            value.to_string()
        })
    }

    /// Long month-day-year date. Falls back to the ISO date.
    #[must_use]
    pub fn format_date(&self, date: NaiveDate) -> String {
        self.try_format_date(date).unwrap_or_else(|e| {
            tracing::debug!(language = %self.language, error = %e, "Date formatting fell back");
            date.to_string()
        })
    }

    /// `100000, "INR"` → `₹1,00,000.00` (`hi`). Falls back to `"<CODE> <amount>"`.
    #[must_use]
    pub fn format_currency(&self, amount: f64, currency_code: &str) -> String {
        self.try_format_currency(amount, currency_code).unwrap_or_else(|e| {
            tracing::debug!(language = %self.language, error = %e, "Currency formatting fell back");
            format!("{currency_code} {amount}")
        })
    }

    /// [`Self::format_currency`] in Indian rupees.
    #[must_use]
    pub fn format_currency_default(&self, amount: f64) -> String {
        self.format_currency(amount, DEFAULT_CURRENCY)
    }

    fn try_format_number(&self, value: f64) -> Result<String, FormatError> {
        render_number(value, MAX_FRACTION_DIGITS, true, rules_for(&self.language)?)
    }

    fn try_format_date(&self, date: NaiveDate) -> Result<String, FormatError> {
        let rules = rules_for(&self.language)?;
        let month = rules.months.get(date.month0() as usize).copied().unwrap_or_default();
        Ok(match rules.date_order {
            DateOrder::MonthDayYear => format!("{month} {}, {}", date.day(), date.year()),
            DateOrder::DayMonthYear => format!("{} {month} {}", date.day(), date.year()),
        })
    }

    fn try_format_currency(&self, amount: f64, currency_code: &str) -> Result<String, FormatError> {
        let rules = rules_for(&self.language)?;
        let (symbol, fraction_digits) = currency_symbol(currency_code)?;
        let number = render_number(amount, fraction_digits, false, rules)?;
        let separator = if symbol.chars().all(char::is_alphabetic) { " " } else { "" };

        Ok(match number.strip_prefix('-') {
            Some(magnitude) => format!("-{symbol}{separator}{magnitude}"),
            None => format!("{symbol}{separator}{number}"),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    fn formatter(code: &str) -> Formatter {
        Formatter::new(LanguageCode::from(code))
    }

    #[rstest]
    #[case::english("en", 1_234_567.891, "1,234,567.891")]
    #[case::hindi("hi", 1_234_567.891, "12,34,567.891")]
    #[case::english_india("en-IN", 1_234_567.0, "12,34,567")]
    #[case::urdu("ur", 1_234_567.5, "1,234,567.5")]
    #[case::small("hi", 999.0, "999")]
    #[case::thousand_indian("hi", 1000.0, "1,000")]
    #[case::lakh("hi", 100_000.0, "1,00,000")]
    #[case::negative("en", -1234.5, "-1,234.5")]
    #[case::rounds("en", 0.123_56, "0.124")]
    #[case::negative_zero("en", -0.0001, "0")]
    fn format_number(#[case] code: &str, #[case] value: f64, #[case] expected: &str) {
        assert_that!(formatter(code).format_number(value), eq(expected));
    }

    #[rstest]
    #[case::unsupported_locale("xx", 1234.5, "1234.5")]
    #[case::nan("en", f64::NAN, "NaN")]
    #[case::infinite("hi", f64::INFINITY, "inf")]
    fn format_number_falls_back(#[case] code: &str, #[case] value: f64, #[case] expected: &str) {
        assert_that!(formatter(code).format_number(value), eq(expected));
    }

    #[rstest]
    #[case::english("en", "January 5, 2024")]
    #[case::english_india("en-IN", "5 January 2024")]
    #[case::hindi("hi", "5 जनवरी 2024")]
    #[case::urdu("ur", "5 جنوری 2024")]
    #[case::unsupported("xx", "2024-01-05")]
    fn format_date(#[case] code: &str, #[case] expected: &str) {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();

        assert_that!(formatter(code).format_date(date), eq(expected));
    }

    #[rstest]
    #[case::rupees_hindi("hi", 100_000.0, "INR", "₹1,00,000.00")]
    #[case::rupees_english("en", 100_000.0, "INR", "₹100,000.00")]
    #[case::dollars("en", 12.5, "USD", "$12.50")]
    #[case::yen("en", 1500.0, "JPY", "¥1,500")]
    #[case::negative("hi", -250.0, "INR", "-₹250.00")]
    #[case::unknown_code("en", 10.0, "XYZ", "XYZ 10.00")]
    #[case::invalid_code("en", 10.0, "rupee", "rupee 10")]
    #[case::unsupported_locale("xx", 10.5, "INR", "INR 10.5")]
    fn format_currency(
        #[case] code: &str,
        #[case] amount: f64,
        #[case] currency: &str,
        #[case] expected: &str,
    ) {
        assert_that!(formatter(code).format_currency(amount, currency), eq(expected));
    }

    #[googletest::test]
    fn format_currency_defaults_to_rupees() {
        expect_that!(formatter("hi").format_currency_default(1234.0), eq("₹1,234.00"));
    }
}
