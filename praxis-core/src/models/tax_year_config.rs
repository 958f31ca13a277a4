use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::TaxBracket;

/// Errors raised when a [`TaxYearConfig`] contains values no calculation can
/// work with.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxConfigError {
    #[error("bracket table '{table}' is empty")]
    EmptyBracketTable { table: &'static str },

    #[error("bracket table '{table}' is not sorted ascending at index {index}")]
    UnsortedBrackets { table: &'static str, index: usize },

    #[error("bracket table '{table}' has an open-ended bracket at index {index} before the end")]
    OpenBracketNotLast { table: &'static str, index: usize },

    #[error("bracket table '{table}' must end with an open-ended bracket")]
    MissingTopBracket { table: &'static str },

    #[error("bracket table '{table}' must end with a bounded bracket")]
    UnexpectedTopBracket { table: &'static str },

    #[error("{field} must be between 0 and 1, got {rate}")]
    InvalidRate { field: &'static str, rate: Decimal },

    #[error("{field} must be non-negative, got {amount}")]
    NegativeAmount { field: &'static str, amount: Decimal },
}

/// All statutory constants for one Austrian tax year.
///
/// A config is built once (from a preset or a file), validated, and then only
/// borrowed by calculators. Switching tax years means switching the whole
/// value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearConfig {
    pub tax_year: i32,
    /// Einkommensteuertarif, ascending, ending with an open-ended bracket.
    pub income_tax_brackets: Vec<TaxBracket>,
    pub social_security: SocialSecurityConfig,
    pub chamber_levy: ChamberLevyConfig,
    pub vat: VatConfig,
    pub pauschalierung: PauschalierungConfig,
    pub special_payments: SpecialPaymentConfig,
    pub profit_allowance: ProfitAllowanceConfig,
    pub deductions: DeductionConfig,
    pub credits: TaxCreditConfig,
}

/// Social insurance contribution parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialSecurityConfig {
    /// Combined SVS rate for self-employed physicians.
    pub self_employed_rate: Decimal,
    /// Annual minimum SVS contribution, owed even in loss years.
    pub min_contribution: Decimal,
    /// Annual Höchstbeitragsgrundlage for self-employed income.
    pub max_assessment_base: Decimal,
    /// Employee share on regular salary.
    pub employee_rate: Decimal,
    pub employee_max_base: Decimal,
    /// Employee share on 13th/14th salaries.
    pub special_payment_rate: Decimal,
    pub special_payment_max_base: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChamberLevyConfig {
    pub base_fee: Decimal,
    pub rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatConfig {
    pub standard_rate: Decimal,
    /// Revenue below this amount qualifies for the Kleinunternehmer exemption.
    pub kleinunternehmer_threshold: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PauschalierungConfig {
    pub rate: Decimal,
    /// Revenue at or above this amount is not eligible for the flat rate.
    pub revenue_ceiling: Decimal,
}

/// Taxation of sonstige Bezüge (13th/14th salary).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialPaymentConfig {
    /// Freigrenze: net special payments up to this amount are untaxed.
    pub exemption_limit: Decimal,
    /// Fixed-rate bands. The last band is bounded; anything above it is taxed
    /// with the regular tariff.
    pub brackets: Vec<TaxBracket>,
}

/// Gewinnfreibetrag parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitAllowanceConfig {
    pub basic_rate: Decimal,
    pub basic_limit: Decimal,
    /// Investment-based tiers over the whole profit; the first tier covers
    /// the basic allowance range at 0%.
    pub investment_brackets: Vec<TaxBracket>,
    pub max_allowance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionConfig {
    pub werbungskosten_pauschale: Decimal,
    pub church_contribution_cap: Decimal,
    /// Donations are deductible up to this share of total income.
    pub donation_cap_rate: Decimal,
    /// Selbstbehalt for außergewöhnliche Belastungen. The rate of the tier the
    /// income falls into applies to the whole income.
    pub selbstbehalt_tiers: Vec<TaxBracket>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxCreditConfig {
    pub verkehrsabsetzbetrag: Decimal,
    pub familienbonus_under_18: Decimal,
    pub familienbonus_over_18: Decimal,
    pub alleinverdiener_one_child: Decimal,
    pub alleinverdiener_two_children: Decimal,
    pub alleinverdiener_additional_child: Decimal,
}

#[derive(Clone, Copy)]
enum TopBracket {
    Open,
    Bounded,
}

impl TaxYearConfig {
    /// Checks every table and constant.
    ///
    /// # Errors
    ///
    /// Returns the first [`TaxConfigError`] found.
    pub fn validate(&self) -> Result<(), TaxConfigError> {
        validate_brackets(
            "income_tax_brackets",
            &self.income_tax_brackets,
            TopBracket::Open,
        )?;
        validate_brackets(
            "special_payments.brackets",
            &self.special_payments.brackets,
            TopBracket::Bounded,
        )?;
        validate_brackets(
            "profit_allowance.investment_brackets",
            &self.profit_allowance.investment_brackets,
            TopBracket::Bounded,
        )?;
        validate_brackets(
            "deductions.selbstbehalt_tiers",
            &self.deductions.selbstbehalt_tiers,
            TopBracket::Open,
        )?;

        let ss = &self.social_security;
        let rates = [
            ("social_security.self_employed_rate", ss.self_employed_rate),
            ("social_security.employee_rate", ss.employee_rate),
            ("social_security.special_payment_rate", ss.special_payment_rate),
            ("chamber_levy.rate", self.chamber_levy.rate),
            ("vat.standard_rate", self.vat.standard_rate),
            ("pauschalierung.rate", self.pauschalierung.rate),
            ("profit_allowance.basic_rate", self.profit_allowance.basic_rate),
            ("deductions.donation_cap_rate", self.deductions.donation_cap_rate),
        ];
        for (field, rate) in rates {
            validate_rate(field, rate)?;
        }

        let credits = &self.credits;
        let amounts = [
            ("social_security.min_contribution", ss.min_contribution),
            ("social_security.max_assessment_base", ss.max_assessment_base),
            ("social_security.employee_max_base", ss.employee_max_base),
            ("social_security.special_payment_max_base", ss.special_payment_max_base),
            ("chamber_levy.base_fee", self.chamber_levy.base_fee),
            ("vat.kleinunternehmer_threshold", self.vat.kleinunternehmer_threshold),
            ("pauschalierung.revenue_ceiling", self.pauschalierung.revenue_ceiling),
            ("special_payments.exemption_limit", self.special_payments.exemption_limit),
            ("profit_allowance.basic_limit", self.profit_allowance.basic_limit),
            ("profit_allowance.max_allowance", self.profit_allowance.max_allowance),
            ("deductions.werbungskosten_pauschale", self.deductions.werbungskosten_pauschale),
            ("deductions.church_contribution_cap", self.deductions.church_contribution_cap),
            ("credits.verkehrsabsetzbetrag", credits.verkehrsabsetzbetrag),
            ("credits.familienbonus_under_18", credits.familienbonus_under_18),
            ("credits.familienbonus_over_18", credits.familienbonus_over_18),
            ("credits.alleinverdiener_one_child", credits.alleinverdiener_one_child),
            ("credits.alleinverdiener_two_children", credits.alleinverdiener_two_children),
            ("credits.alleinverdiener_additional_child", credits.alleinverdiener_additional_child),
        ];
        for (field, amount) in amounts {
            if amount < Decimal::ZERO {
                return Err(TaxConfigError::NegativeAmount { field, amount });
            }
        }

        Ok(())
    }
}

fn validate_rate(
    field: &'static str,
    rate: Decimal,
) -> Result<(), TaxConfigError> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(TaxConfigError::InvalidRate { field, rate });
    }
    Ok(())
}

fn validate_brackets(
    table: &'static str,
    brackets: &[TaxBracket],
    top: TopBracket,
) -> Result<(), TaxConfigError> {
    let Some(last) = brackets.last() else {
        return Err(TaxConfigError::EmptyBracketTable { table });
    };

    let mut previous = Decimal::ZERO;
    for (index, bracket) in brackets.iter().enumerate() {
        validate_rate(table, bracket.rate)?;
        match bracket.upper_limit {
            Some(limit) if limit <= previous && index > 0 => {
                return Err(TaxConfigError::UnsortedBrackets { table, index });
            }
            Some(limit) if limit < Decimal::ZERO => {
                return Err(TaxConfigError::UnsortedBrackets { table, index });
            }
            Some(limit) => previous = limit,
            None if index + 1 < brackets.len() => {
                return Err(TaxConfigError::OpenBracketNotLast { table, index });
            }
            None => {}
        }
    }

    match (top, last.upper_limit) {
        (TopBracket::Open, Some(_)) => Err(TaxConfigError::MissingTopBracket { table }),
        (TopBracket::Bounded, None) => Err(TaxConfigError::UnexpectedTopBracket { table }),
        _ => Ok(()),
    }
}
