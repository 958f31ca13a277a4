use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One slice of a progressive tax table.
///
/// `upper_limit` is inclusive; `None` marks the open-ended top bracket. The
/// lower limit of a bracket is the previous bracket's `upper_limit`, or zero
/// for the first one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub upper_limit: Option<Decimal>,
    pub rate: Decimal,
    #[serde(default)]
    pub description: String,
}

impl TaxBracket {
    pub fn bounded(
        upper_limit: Decimal,
        rate: Decimal,
        description: impl Into<String>,
    ) -> Self {
        Self {
            upper_limit: Some(upper_limit),
            rate,
            description: description.into(),
        }
    }

    pub fn unbounded(
        rate: Decimal,
        description: impl Into<String>,
    ) -> Self {
        Self {
            upper_limit: None,
            rate,
            description: description.into(),
        }
    }
}
