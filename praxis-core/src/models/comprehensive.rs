use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{PracticeType, QuarterlySplit};

/// Salaried income for the year (Einkünfte aus nichtselbständiger Arbeit).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmploymentIncome {
    /// Regular gross salary, excluding 13th/14th payments.
    pub gross_salary: Decimal,
    /// 13th and 14th salary (sonstige Bezüge).
    pub special_payments: Decimal,
    /// Lohnsteuer already withheld by the employer.
    pub withheld_income_tax: Decimal,
    /// Actual Werbungskosten; the statutory lump sum applies when larger.
    pub work_expenses: Decimal,
    /// Pendlerpauschale.
    pub commuter_allowance: Decimal,
}

/// Practice income for the year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfEmploymentIncome {
    pub gross_revenue: Decimal,
    pub total_expenses: Decimal,
    pub practice_type: PracticeType,
    #[serde(default)]
    pub applying_pauschalierung: bool,
    #[serde(default)]
    pub private_patient_revenue: Option<Decimal>,
    /// Investments qualifying for the investment-based Gewinnfreibetrag.
    #[serde(default)]
    pub qualifying_investments: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxDeductions {
    /// Sonderausgaben other than church contributions and donations.
    pub special_expenses: Decimal,
    pub church_contributions: Decimal,
    pub donations: Decimal,
    /// Außergewöhnliche Belastungen before the Selbstbehalt.
    pub extraordinary_burdens: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxCredits {
    pub children_under_18: u32,
    pub children_over_18: u32,
    /// Alleinverdiener or Alleinerzieher status.
    pub sole_earner: bool,
    pub pendlereuro: Decimal,
}

impl TaxCredits {
    pub fn children(&self) -> u32 {
        self.children_under_18.saturating_add(self.children_over_18)
    }
}

/// A full personal tax year combining salaried and practice income.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComprehensiveTaxInput {
    pub employment: Option<EmploymentIncome>,
    pub self_employment: Option<SelfEmploymentIncome>,
    pub deductions: TaxDeductions,
    pub credits: TaxCredits,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeBreakdown {
    pub employment_income: Decimal,
    pub werbungskosten: Decimal,
    pub self_employment_profit: Decimal,
    pub pauschal_deduction: Decimal,
    pub gewinnfreibetrag: Decimal,
    pub self_employment_income: Decimal,
    /// Special payments above the last preferential band.
    pub special_payment_excess: Decimal,
    pub total_income: Decimal,
    pub total_deductions: Decimal,
    pub taxable_income: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialSecurityBreakdown {
    pub employee: Decimal,
    pub special_payments: Decimal,
    pub self_employed: Decimal,
    pub aerztekammer_beitrag: Decimal,
}

impl SocialSecurityBreakdown {
    pub fn total(&self) -> Decimal {
        self.employee + self.special_payments + self.self_employed + self.aerztekammer_beitrag
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedCredits {
    pub familienbonus: Decimal,
    pub absetzbetraege: Decimal,
}

impl AppliedCredits {
    pub fn total(&self) -> Decimal {
        self.familienbonus + self.absetzbetraege
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComprehensiveTaxResult {
    pub income: IncomeBreakdown,
    pub social_security: SocialSecurityBreakdown,
    pub credits: AppliedCredits,
    pub income_tax_before_credits: Decimal,
    pub special_payment_tax: Decimal,
    pub total_income_tax: Decimal,
    pub vat: Decimal,
    pub total_tax_burden: Decimal,
    pub gross_income: Decimal,
    pub net_income: Decimal,
    pub effective_tax_rate: Decimal,
    /// Positive: Nachzahlung. Negative: Gutschrift.
    pub balance_due: Decimal,
    pub vorauszahlungen: QuarterlySplit,
}
