//! Tax optimization hints derived from a practice result.
//!
//! Each rule inspects a [`TipContext`] and may produce one
//! [`OptimizationTip`]. Rules are independent and evaluated in table order.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{non_negative, round_half_up};
use crate::calculations::format::{format_euro_at, format_percent_at};
use crate::{TaxCalculationResult, TaxYearConfig};

/// Effective tax rate (in percent) above which a high-burden tip is shown.
pub const HIGH_BURDEN_THRESHOLD: Decimal = dec!(45);

/// Net income above which a congratulation is shown.
pub const NET_INCOME_MILESTONE: Decimal = dec!(60000);

/// Share of the Kleinunternehmer threshold from which revenue counts as close.
pub const KLEINUNTERNEHMER_WARNING_SHARE: Decimal = dec!(0.90);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OptimizationTip {
    /// Flat-rate deduction not used although the practice is eligible.
    ConsiderPauschalierung {
        rate: Decimal,
        estimated_deduction: Decimal,
    },
    HighTaxBurden { effective_tax_rate: Decimal },
    StrongNetIncome { net_income: Decimal },
    /// The SVS minimum contribution exceeds the percentage contribution.
    MinimumSocialSecurity { minimum: Decimal, regular: Decimal },
    /// VAT-exempt only because revenue is just below the threshold.
    ApproachingKleinunternehmerThreshold { revenue: Decimal, threshold: Decimal },
}

impl fmt::Display for OptimizationTip {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::ConsiderPauschalierung {
                rate,
                estimated_deduction,
            } => write!(
                f,
                "Erwägen Sie die Pauschalierung: {} des Gewinns ({}) wären pauschal absetzbar.",
                format_percent_at(*rate * Decimal::ONE_HUNDRED),
                format_euro_at(*estimated_deduction)
            ),
            Self::HighTaxBurden { effective_tax_rate } => write!(
                f,
                "Ihre Abgabenbelastung liegt bei {} und damit über {}%. Eine Steuerberatung kann sich lohnen.",
                format_percent_at(*effective_tax_rate),
                HIGH_BURDEN_THRESHOLD
            ),
            Self::StrongNetIncome { net_income } => write!(
                f,
                "Glückwunsch! Ihr Nettoeinkommen von {} liegt über {}.",
                format_euro_at(*net_income),
                format_euro_at(NET_INCOME_MILESTONE)
            ),
            Self::MinimumSocialSecurity { minimum, regular } => write!(
                f,
                "Es gilt der SVS-Mindestbeitrag von {} statt {} nach Beitragssatz.",
                format_euro_at(*minimum),
                format_euro_at(*regular)
            ),
            Self::ApproachingKleinunternehmerThreshold { revenue, threshold } => write!(
                f,
                "Ihr umsatzsteuerpflichtiger Umsatz von {} liegt knapp unter der Kleinunternehmergrenze von {}.",
                format_euro_at(*revenue),
                format_euro_at(*threshold)
            ),
        }
    }
}

/// Everything a rule may look at.
pub struct TipContext<'a> {
    pub config: &'a TaxYearConfig,
    pub result: &'a TaxCalculationResult,
}

type Rule = fn(&TipContext<'_>) -> Option<OptimizationTip>;

const RULES: [Rule; 5] = [
    pauschalierung_rule,
    high_burden_rule,
    net_income_rule,
    minimum_social_security_rule,
    kleinunternehmer_rule,
];

/// Evaluates all rules against `result`, in order.
///
/// ```
/// use rust_decimal_macros::dec;
/// use praxis_core::{
///     OptimizationTip, PracticeTaxCalculator, PracticeType, TaxCalculationInput, TaxYearConfig,
///     tax_optimization_tips,
/// };
///
/// let config = TaxYearConfig::austria_2024();
/// let calculator = PracticeTaxCalculator::new(&config).unwrap();
/// let result = calculator.calculate(&TaxCalculationInput {
///     gross_revenue: dec!(100000),
///     total_expenses: dec!(40000),
///     practice_type: PracticeType::Kassenarzt,
///     applying_pauschalierung: false,
///     private_patient_revenue: None,
/// });
///
/// let tips = tax_optimization_tips(&config, &result);
/// assert!(matches!(tips[0], OptimizationTip::ConsiderPauschalierung { .. }));
/// ```
pub fn tax_optimization_tips(
    config: &TaxYearConfig,
    result: &TaxCalculationResult,
) -> Vec<OptimizationTip> {
    let ctx = TipContext { config, result };
    RULES.iter().filter_map(|rule| rule(&ctx)).collect()
}

/// Like [`tax_optimization_tips`], rendered as German messages.
pub fn tax_optimization_messages(
    config: &TaxYearConfig,
    result: &TaxCalculationResult,
) -> Vec<String> {
    tax_optimization_tips(config, result)
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn pauschalierung_rule(ctx: &TipContext<'_>) -> Option<OptimizationTip> {
    let result = ctx.result;
    let pauschalierung = &ctx.config.pauschalierung;
    let eligible = result.gross_revenue < pauschalierung.revenue_ceiling;

    (!result.applying_pauschalierung && eligible && result.profit > Decimal::ZERO).then(|| {
        OptimizationTip::ConsiderPauschalierung {
            rate: pauschalierung.rate,
            estimated_deduction: round_half_up(result.profit * pauschalierung.rate),
        }
    })
}

fn high_burden_rule(ctx: &TipContext<'_>) -> Option<OptimizationTip> {
    let rate = ctx.result.effective_tax_rate;
    (rate > HIGH_BURDEN_THRESHOLD).then_some(OptimizationTip::HighTaxBurden {
        effective_tax_rate: rate,
    })
}

fn net_income_rule(ctx: &TipContext<'_>) -> Option<OptimizationTip> {
    let net_income = ctx.result.net_income;
    (net_income > NET_INCOME_MILESTONE).then_some(OptimizationTip::StrongNetIncome { net_income })
}

fn minimum_social_security_rule(ctx: &TipContext<'_>) -> Option<OptimizationTip> {
    let ss = &ctx.config.social_security;
    let base = non_negative(ctx.result.profit).min(ss.max_assessment_base);
    let regular = round_half_up(base * ss.self_employed_rate);

    (ss.min_contribution > regular).then_some(OptimizationTip::MinimumSocialSecurity {
        minimum: ss.min_contribution,
        regular,
    })
}

fn kleinunternehmer_rule(ctx: &TipContext<'_>) -> Option<OptimizationTip> {
    let result = ctx.result;
    let threshold = ctx.config.vat.kleinunternehmer_threshold;
    let revenue = result.vat_relevant_revenue;

    let close = revenue >= threshold * KLEINUNTERNEHMER_WARNING_SHARE && revenue < threshold;
    let liable_type = !result.practice_type.is_vat_exempt();

    (liable_type && result.vat.is_zero() && revenue > Decimal::ZERO && close).then_some(
        OptimizationTip::ApproachingKleinunternehmerThreshold { revenue, threshold },
    )
}
