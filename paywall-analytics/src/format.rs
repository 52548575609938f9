//! Locale-aware currency, number and date formatting.
//!
//! Locale and currency conventions come from small static tables that follow
//! CLDR for the locales the dashboard ships with. The strict entry point,
//! [`try_format_currency`], fails on anything outside those tables; the
//! lenient ones fall back to plain symbol concatenation.

use crate::error::{FormatError, FormatResult};
use chrono::{DateTime, NaiveDate, Utc};

const NBSP: &str = "\u{a0}";
const NARROW_NBSP: &str = "\u{202f}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SymbolPosition {
    Before,
    After,
}

/// Number and date conventions for one locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale {
    tag: &'static str,
    group_separator: &'static str,
    decimal_separator: &'static str,
    /// Integer parts shorter than `3 + min_grouping_digits` are not grouped.
    min_grouping_digits: usize,
    symbol_position: SymbolPosition,
    /// Always separate a leading symbol from the amount.
    spaced_prefix: bool,
    date_pattern: &'static str,
    time_pattern: &'static str,
}

const LOCALES: &[Locale] = &[
    Locale {
        tag: "en-US",
        group_separator: ",",
        decimal_separator: ".",
        min_grouping_digits: 1,
        symbol_position: SymbolPosition::Before,
        spaced_prefix: false,
        date_pattern: "%b %-d, %Y",
        time_pattern: "%-I:%M %p",
    },
    Locale {
        tag: "en-GB",
        group_separator: ",",
        decimal_separator: ".",
        min_grouping_digits: 1,
        symbol_position: SymbolPosition::Before,
        spaced_prefix: false,
        date_pattern: "%-d %b %Y",
        time_pattern: "%H:%M",
    },
    Locale {
        tag: "de-DE",
        group_separator: ".",
        decimal_separator: ",",
        min_grouping_digits: 1,
        symbol_position: SymbolPosition::After,
        spaced_prefix: false,
        date_pattern: "%d.%m.%Y",
        time_pattern: "%H:%M",
    },
    Locale {
        tag: "fr-FR",
        group_separator: NARROW_NBSP,
        decimal_separator: ",",
        min_grouping_digits: 1,
        symbol_position: SymbolPosition::After,
        spaced_prefix: false,
        date_pattern: "%d/%m/%Y",
        time_pattern: "%H:%M",
    },
    Locale {
        tag: "es-ES",
        group_separator: ".",
        decimal_separator: ",",
        min_grouping_digits: 2,
        symbol_position: SymbolPosition::After,
        spaced_prefix: false,
        date_pattern: "%-d/%-m/%Y",
        time_pattern: "%H:%M",
    },
    Locale {
        tag: "pt-BR",
        group_separator: ".",
        decimal_separator: ",",
        min_grouping_digits: 1,
        symbol_position: SymbolPosition::Before,
        spaced_prefix: true,
        date_pattern: "%d/%m/%Y",
        time_pattern: "%H:%M",
    },
    Locale {
        tag: "ja-JP",
        group_separator: ",",
        decimal_separator: ".",
        min_grouping_digits: 1,
        symbol_position: SymbolPosition::Before,
        spaced_prefix: false,
        date_pattern: "%Y/%m/%d",
        time_pattern: "%H:%M",
    },
];

impl Locale {
    /// The default dashboard locale.
    #[must_use]
    pub fn en_us() -> Self {
        LOCALES[0]
    }

    /// Resolves a BCP-47 style tag (`en-US`, `de_de`, `fr`).
    ///
    /// A bare language picks the first supported region for it.
    pub fn parse(tag: &str) -> FormatResult<Self> {
        let normalized = tag.trim().replace('_', "-");
        if let Some(locale) = LOCALES
            .iter()
            .find(|l| l.tag.eq_ignore_ascii_case(&normalized))
        {
            return Ok(*locale);
        }

        let language = normalized.split('-').next().unwrap_or_default();
        if !language.is_empty() && !normalized.contains('-') {
            if let Some(locale) = LOCALES.iter().find(|l| {
                l.tag
                    .split('-')
                    .next()
                    .is_some_and(|lang| lang.eq_ignore_ascii_case(language))
            }) {
                return Ok(*locale);
            }
        }

        Err(FormatError::UnsupportedLocale(tag.to_string()))
    }

    /// Like [`Locale::parse`] but falls back to `en-US`.
    #[must_use]
    pub fn parse_or_default(tag: &str) -> Self {
        Self::parse(tag).unwrap_or_default()
    }

    #[must_use]
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// Returns the tags of every supported locale.
    pub fn supported() -> impl Iterator<Item = &'static str> {
        LOCALES.iter().map(|l| l.tag)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::en_us()
    }
}

/// An ISO-4217 currency known to the formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Currency {
    code: &'static str,
    symbol: &'static str,
    minor_digits: usize,
}

const CURRENCIES: &[Currency] = &[
    Currency { code: "USD", symbol: "$", minor_digits: 2 },
    Currency { code: "EUR", symbol: "€", minor_digits: 2 },
    Currency { code: "GBP", symbol: "£", minor_digits: 2 },
    Currency { code: "JPY", symbol: "¥", minor_digits: 0 },
    Currency { code: "CAD", symbol: "CA$", minor_digits: 2 },
    Currency { code: "AUD", symbol: "A$", minor_digits: 2 },
    Currency { code: "INR", symbol: "₹", minor_digits: 2 },
    Currency { code: "BRL", symbol: "R$", minor_digits: 2 },
    Currency { code: "CHF", symbol: "CHF", minor_digits: 2 },
    Currency { code: "CNY", symbol: "CN¥", minor_digits: 2 },
    Currency { code: "KRW", symbol: "₩", minor_digits: 0 },
    Currency { code: "MXN", symbol: "MX$", minor_digits: 2 },
];

impl Currency {
    /// Looks up a currency by code, case-insensitively.
    pub fn lookup(code: &str) -> FormatResult<Self> {
        let code = code.trim();
        CURRENCIES
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code))
            .copied()
            .ok_or_else(|| FormatError::UnknownCurrency(code.to_string()))
    }

    #[must_use]
    pub fn code(&self) -> &'static str {
        self.code
    }

    #[must_use]
    pub fn symbol(&self) -> &'static str {
        self.symbol
    }

    /// Number of digits after the decimal separator.
    #[must_use]
    pub fn minor_digits(&self) -> usize {
        self.minor_digits
    }
}

/// Formats an amount strictly: unknown currencies, unsupported locales and
/// non-finite values are errors.
pub fn try_format_currency(value: f64, currency: &str, locale: &str) -> FormatResult<String> {
    if !value.is_finite() {
        return Err(FormatError::NonFinite);
    }
    let currency = Currency::lookup(currency)?;
    let locale = Locale::parse(locale)?;

    let (negative, amount) = render_amount(value, currency.minor_digits, &locale);
    let sign = if negative { "-" } else { "" };

    let formatted = match locale.symbol_position {
        SymbolPosition::Before => {
            let spaced = locale.spaced_prefix
                || currency.symbol.chars().last().is_some_and(char::is_alphabetic);
            let gap = if spaced { NBSP } else { "" };
            format!("{sign}{}{gap}{amount}", currency.symbol)
        }
        SymbolPosition::After => format!("{sign}{amount}{NBSP}{}", currency.symbol),
    };
    Ok(formatted)
}

/// Formats an amount for the `en-US` locale, falling back to plain symbol
/// concatenation when the currency is unknown.
///
/// ```
/// use paywall_analytics::format_currency;
///
/// assert_eq!(format_currency(1234.5, "USD"), "$1,234.50");
/// assert_eq!(format_currency(1234.5, "XYZ"), "XYZ 1234.50");
/// ```
#[must_use]
pub fn format_currency(value: f64, currency: &str) -> String {
    format_currency_in(value, currency, Locale::en_us().tag)
}

/// Formats an amount for `locale`, falling back to plain symbol
/// concatenation when strict formatting fails.
#[must_use]
pub fn format_currency_in(value: f64, currency: &str, locale: &str) -> String {
    try_format_currency(value, currency, locale)
        .unwrap_or_else(|_| format_with_symbol_table(value, currency))
}

fn format_with_symbol_table(value: f64, currency: &str) -> String {
    let (symbol, decimals) = match Currency::lookup(currency) {
        Ok(known) => (known.symbol.to_string(), known.minor_digits),
        Err(_) => {
            let code = currency.trim().to_ascii_uppercase();
            let symbol = if code.is_empty() { code } else { format!("{code} ") };
            (symbol, 2)
        }
    };
    let amount = format!("{:.decimals$}", value.abs());
    let negative = value < 0.0 && amount.chars().any(|c| c.is_ascii_digit() && c != '0');
    let sign = if negative { "-" } else { "" };
    format!("{sign}{symbol}{amount}")
}

/// Formats a plain number with the locale's separators.
#[must_use]
pub fn format_number(value: f64, decimals: usize, locale: &str) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let locale = Locale::parse_or_default(locale);
    let (negative, amount) = render_amount(value, decimals, &locale);
    if negative { format!("-{amount}") } else { amount }
}

/// Formats a value that is already a percentage (`12.5` → `12.5%`).
#[must_use]
pub fn format_percentage(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return format!("{value}%");
    }
    format!("{value:.decimals$}%")
}

const COMPACT_UNITS: &[(f64, &str)] = &[(1.0, ""), (1e3, "K"), (1e6, "M"), (1e9, "B")];

/// Short form for stat cards: `1.2K`, `3.4M`, `2B`.
#[must_use]
pub fn format_compact(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let abs = value.abs();
    let mut unit = COMPACT_UNITS
        .iter()
        .rposition(|(threshold, _)| abs >= *threshold)
        .unwrap_or(0);

    let mut digits = format!("{:.1}", abs / COMPACT_UNITS[unit].0);
    // Rounding can carry into the next unit (999_950 -> 1000K).
    if unit + 1 < COMPACT_UNITS.len() && digits.parse::<f64>().is_ok_and(|d| d >= 1000.0) {
        unit += 1;
        digits = format!("{:.1}", abs / COMPACT_UNITS[unit].0);
    }
    if digits.ends_with(".0") {
        digits.truncate(digits.len() - 2);
    }
    let sign = if value < 0.0 && digits != "0" { "-" } else { "" };
    format!("{sign}{digits}{}", COMPACT_UNITS[unit].1)
}

/// Formats a calendar date in the locale's medium style.
#[must_use]
pub fn format_date(date: NaiveDate, locale: &str) -> String {
    let locale = Locale::parse_or_default(locale);
    date.format(locale.date_pattern).to_string()
}

/// Formats a UTC timestamp as date and time.
#[must_use]
pub fn format_datetime(timestamp: DateTime<Utc>, locale: &str) -> String {
    let locale = Locale::parse_or_default(locale);
    format!(
        "{}, {}",
        timestamp.format(locale.date_pattern),
        timestamp.format(locale.time_pattern)
    )
}

/// Renders `|value|` rounded to `decimals`, grouped per locale. The flag is
/// true when the rounded amount is negative and non-zero.
fn render_amount(value: f64, decimals: usize, locale: &Locale) -> (bool, String) {
    // Ties round away from zero; `format!` alone rounds them to even.
    let factor = 10f64.powi(i32::try_from(decimals).unwrap_or(i32::MAX));
    let scaled = (value.abs() * factor).round() / factor;
    let rounded = if scaled.is_finite() { scaled } else { value.abs() };
    let fixed = format!("{rounded:.decimals$}");
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let negative = value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');

    let mut out = group_digits(integer, locale.group_separator, locale.min_grouping_digits);
    if !fraction.is_empty() {
        out.push_str(locale.decimal_separator);
        out.push_str(fraction);
    }
    (negative, out)
}

fn group_digits(digits: &str, separator: &str, min_grouping_digits: usize) -> String {
    if digits.len() < 3 + min_grouping_digits {
        return digits.to_string();
    }

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());
    let lead = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - lead) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}
