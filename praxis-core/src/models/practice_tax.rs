use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::PracticeType;

/// One practice-year scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxCalculationInput {
    pub gross_revenue: Decimal,
    pub total_expenses: Decimal,
    pub practice_type: PracticeType,
    #[serde(default)]
    pub applying_pauschalierung: bool,
    /// Revenue from privately billed patients. When absent the whole
    /// `gross_revenue` is treated as VAT-relevant.
    #[serde(default)]
    pub private_patient_revenue: Option<Decimal>,
}

impl TaxCalculationInput {
    /// Revenue the VAT calculation is based on.
    pub fn vat_relevant_revenue(&self) -> Decimal {
        self.private_patient_revenue.unwrap_or(self.gross_revenue)
    }
}

/// Outcome of the practice tax calculation. All amounts are annual euros
/// rounded to cents; `effective_tax_rate` is a percentage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxCalculationResult {
    pub profit: Decimal,
    pub pauschal_deduction: Decimal,
    pub taxable_income: Decimal,
    pub sv_beitraege: Decimal,
    pub aerztekammer_beitrag: Decimal,
    pub income_tax: Decimal,
    pub vat: Decimal,
    pub total_tax_burden: Decimal,
    pub net_income: Decimal,
    pub effective_tax_rate: Decimal,

    // Scenario context, carried so reports can be derived from the result alone
    pub gross_revenue: Decimal,
    pub vat_relevant_revenue: Decimal,
    pub practice_type: PracticeType,
    pub applying_pauschalierung: bool,
}

/// Annual income tax split into the four Vorauszahlungen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuarterlySplit {
    pub q1: Decimal,
    pub q2: Decimal,
    pub q3: Decimal,
    pub q4: Decimal,
    pub total: Decimal,
}

impl QuarterlySplit {
    pub fn quarters(&self) -> [Decimal; 4] {
        [self.q1, self.q2, self.q3, self.q4]
    }
}
