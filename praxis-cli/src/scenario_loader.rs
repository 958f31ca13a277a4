//! CSV loader for practice scenarios.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter.
//!
//! | Column                    | Required | Type    | Notes                                        |
//! |---------------------------|----------|---------|----------------------------------------------|
//! | `label`                   | yes      | string  | Free text shown in reports                   |
//! | `gross_revenue`           | yes      | amount  | `100000.50` or `"100.000,50"`                |
//! | `total_expenses`          | yes      | amount  |                                              |
//! | `practice_type`           | yes      | string  | `kassenarzt`, `wahlarzt` or `mixed`          |
//! | `pauschalierung`          | no       | flag    | `true`/`false`, `ja`/`nein`, `1`/`0`; empty is `false` |
//! | `private_patient_revenue` | no       | amount  | Leave cell empty for `None`                  |
//!
//! ### Example
//!
//! ```csv
//! label,gross_revenue,total_expenses,practice_type,pauschalierung,private_patient_revenue
//! Ordination Wien,100000,40000,kassenarzt,nein,
//! Wahlarztpraxis,"80.000,00",30000,wahlarzt,ja,80000
//! ```

use std::path::{Path, PathBuf};

use praxis_core::{PracticeType, TaxCalculationInput};
use serde::Deserialize;

use crate::amount::{ParseAmountError, parse_amount, parse_optional_amount};

#[derive(Debug, Deserialize)]
struct CsvRow {
    label: String,
    gross_revenue: String,
    total_expenses: String,
    practice_type: String,
    #[serde(default)]
    pauschalierung: String,
    #[serde(default)]
    private_patient_revenue: String,
}

/// A labelled practice scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub label: String,
    pub input: TaxCalculationInput,
}

/// Errors that can occur while loading scenario data.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioLoadError {
    #[error("cannot read scenario file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Bad structure, missing required column, etc.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("unrecognised practice type '{value}' on row {row}")]
    InvalidPracticeType { value: String, row: usize },

    #[error("unrecognised pauschalierung flag '{value}' on row {row}")]
    InvalidFlag { value: String, row: usize },

    #[error("invalid {column} on row {row}: {source}")]
    InvalidAmount {
        column: &'static str,
        row: usize,
        #[source]
        source: ParseAmountError,
    },
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "" | "false" | "nein" | "n" | "0" => Some(false),
        "true" | "ja" | "j" | "1" => Some(true),
        _ => None,
    }
}

/// Convert a single CSV row into a scenario.
///
/// `row` is 1-based (for error messages).
fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<Scenario, ScenarioLoadError> {
    let amount = |column: &'static str, value: &str| {
        parse_amount(value).map_err(|source| ScenarioLoadError::InvalidAmount {
            column,
            row: row_number,
            source,
        })
    };

    let gross_revenue = amount("gross_revenue", &row.gross_revenue)?;
    let total_expenses = amount("total_expenses", &row.total_expenses)?;
    let private_patient_revenue =
        parse_optional_amount(&row.private_patient_revenue).map_err(|source| {
            ScenarioLoadError::InvalidAmount {
                column: "private_patient_revenue",
                row: row_number,
                source,
            }
        })?;

    let practice_type = PracticeType::parse(&row.practice_type).ok_or_else(|| {
        ScenarioLoadError::InvalidPracticeType {
            value: row.practice_type.clone(),
            row: row_number,
        }
    })?;
    let applying_pauschalierung =
        parse_flag(&row.pauschalierung).ok_or_else(|| ScenarioLoadError::InvalidFlag {
            value: row.pauschalierung.clone(),
            row: row_number,
        })?;

    Ok(Scenario {
        label: row.label,
        input: TaxCalculationInput {
            gross_revenue,
            total_expenses,
            practice_type,
            applying_pauschalierung,
            private_patient_revenue,
        },
    })
}

/// Parse CSV text and return the scenarios in file order.
///
/// # Errors
///
/// Returns a [`ScenarioLoadError`] naming the first offending row.
pub fn load_from_str(input: &str) -> Result<Vec<Scenario>, ScenarioLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1)
        })
        .collect()
}

/// Reads a file from disk and delegates to [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<Scenario>, ScenarioLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ScenarioLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let scenarios = load_from_str(&contents)?;
    tracing::info!(path = %path.display(), count = scenarios.len(), "Loaded scenarios");
    Ok(scenarios)
}
