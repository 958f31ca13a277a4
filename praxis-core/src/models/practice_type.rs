use std::fmt;

use serde::{Deserialize, Serialize};

/// How a practice bills its patients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PracticeType {
    /// Contract with the public health insurers; revenue is VAT-exempt.
    Kassenarzt,
    /// No insurer contract; patients are billed directly.
    Wahlarzt,
    /// Both insurer-contracted and private patients.
    Mixed,
}

impl PracticeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kassenarzt => "kassenarzt",
            Self::Wahlarzt => "wahlarzt",
            Self::Mixed => "mixed",
        }
    }

    /// Case-insensitive parse of the lowercase code.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kassenarzt" => Some(Self::Kassenarzt),
            "wahlarzt" => Some(Self::Wahlarzt),
            "mixed" => Some(Self::Mixed),
            _ => None,
        }
    }

    /// Kassenarzt revenue is exempt from VAT by statute.
    pub fn is_vat_exempt(&self) -> bool {
        matches!(self, Self::Kassenarzt)
    }
}

impl fmt::Display for PracticeType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
