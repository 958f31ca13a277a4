use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a string cannot be parsed as an amount.
#[derive(Debug, Error)]
pub enum ParseAmountError {
    #[error("amount is empty")]
    Empty,

    #[error("invalid amount '{input}': {source}")]
    Invalid {
        input: String,
        #[source]
        source: rust_decimal::Error,
    },
}

/// Parses a euro amount in Austrian or plain notation.
///
/// Accepts an optional `€` sign and spaces. With a decimal comma, dots are
/// thousands separators (`100.000,50`). Without a comma, a dot is a
/// thousands separator only when every group after it has exactly three
/// digits (`1.234.567`); otherwise it is the decimal point (`100000.50`).
pub fn parse_amount(s: &str) -> Result<Decimal, ParseAmountError> {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() || normalized == "-" {
        return Err(ParseAmountError::Empty);
    }
    Decimal::from_str(&normalized).map_err(|source| {
        tracing::debug!(input = %s, "invalid amount: {}", source);
        ParseAmountError::Invalid {
            input: s.to_string(),
            source,
        }
    })
}

/// Like [`parse_amount`], but empty input yields `None`.
pub fn parse_optional_amount(s: &str) -> Result<Option<Decimal>, ParseAmountError> {
    match parse_amount(s) {
        Ok(amount) => Ok(Some(amount)),
        Err(ParseAmountError::Empty) => Ok(None),
        Err(e) => Err(e),
    }
}

fn normalize_amount_input(s: &str) -> String {
    let compact: String = s
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '€' && *c != '_')
        .collect();

    if compact.contains(',') {
        return compact.replace('.', "").replace(',', ".");
    }

    let mut groups = compact.split('.');
    let head = groups.next().unwrap_or_default();
    let tail: Vec<&str> = groups.collect();
    let thousands = !tail.is_empty()
        && !head.trim_start_matches('-').is_empty()
        && tail
            .iter()
            .all(|g| g.len() == 3 && g.chars().all(|c| c.is_ascii_digit()));

    if thousands { compact.replace('.', "") } else { compact }
}
