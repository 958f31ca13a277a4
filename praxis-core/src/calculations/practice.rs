//! Practice-level tax calculation for Austrian physicians.
//!
//! [`PracticeTaxCalculator`] combines the primitive calculators into one
//! [`TaxCalculationResult`]:
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Profit: gross revenue minus expenses (may be negative) |
//! | 2    | Pauschalierung: flat-rate deduction on positive profit, if applied |
//! | 3    | Taxable income: profit minus Pauschalierung |
//! | 4    | SV-Beiträge: SVS contributions on non-negative profit, at least the minimum |
//! | 5    | Ärztekammer: base fee plus a share of non-negative profit |
//! | 6    | Income tax: progressive tariff, zero in a loss year |
//! | 7    | VAT: none for Kassenärzte, otherwise on private revenue unless Kleinunternehmer |
//! | 8    | Total burden: Lines 4 + 5 + 6 + 7 |
//! | 9    | Net income: profit minus total burden |
//! | 10   | Effective rate: total burden as a percentage of positive profit |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use praxis_core::{PracticeTaxCalculator, PracticeType, TaxCalculationInput, TaxYearConfig};
//!
//! let config = TaxYearConfig::austria_2024();
//! let calculator = PracticeTaxCalculator::new(&config).unwrap();
//!
//! let result = calculator.calculate(&TaxCalculationInput {
//!     gross_revenue: dec!(100000),
//!     total_expenses: dec!(40000),
//!     practice_type: PracticeType::Kassenarzt,
//!     applying_pauschalierung: false,
//!     private_patient_revenue: None,
//! });
//!
//! assert_eq!(result.profit, dec!(60000));
//! assert_eq!(result.aerztekammer_beitrag, dec!(2100));
//! assert_eq!(result.vat, dec!(0));
//! assert!(result.net_income < result.profit);
//! ```

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::common::{
    bracket_rate, non_negative, percentage, progressive_tax, round_half_up,
};
use crate::calculations::tips::{OptimizationTip, tax_optimization_tips};
use crate::{TaxCalculationInput, TaxCalculationResult, TaxConfigError, TaxYearConfig};

/// Calculator for a single practice-year.
///
/// Borrows a validated [`TaxYearConfig`]; every calculation is infallible and
/// free of side effects apart from `tracing` events.
#[derive(Debug, Clone, Copy)]
pub struct PracticeTaxCalculator<'a> {
    config: &'a TaxYearConfig,
}

impl<'a> PracticeTaxCalculator<'a> {
    /// Creates a calculator after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns [`TaxConfigError`] if the configuration is invalid.
    pub fn new(config: &'a TaxYearConfig) -> Result<Self, TaxConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &'a TaxYearConfig {
        self.config
    }

    /// Income tax on `taxable_income` using the progressive tariff.
    ///
    /// Zero or negative income yields zero.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use praxis_core::{PracticeTaxCalculator, TaxYearConfig};
    ///
    /// let config = TaxYearConfig::austria_2024();
    /// let calculator = PracticeTaxCalculator::new(&config).unwrap();
    ///
    /// assert_eq!(calculator.calculate_income_tax(dec!(12816)), dec!(0));
    /// // 8,002 × 20% + 13,695 × 30% + 25,487 × 40%
    /// assert_eq!(calculator.calculate_income_tax(dec!(60000)), dec!(15903.70));
    /// ```
    pub fn calculate_income_tax(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        if taxable_income <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        round_half_up(progressive_tax(
            &self.config.income_tax_brackets,
            taxable_income,
        ))
    }

    /// Marginal income tax rate at `taxable_income`.
    pub fn marginal_rate(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        bracket_rate(&self.config.income_tax_brackets, taxable_income)
    }

    /// SVS contributions on `profit`.
    ///
    /// The assessment base is `profit` clamped to `[0, max_assessment_base]`;
    /// the result never falls below the minimum contribution.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use praxis_core::{PracticeTaxCalculator, TaxYearConfig};
    ///
    /// let config = TaxYearConfig::austria_2024();
    /// let calculator = PracticeTaxCalculator::new(&config).unwrap();
    ///
    /// assert_eq!(calculator.calculate_sv_beitraege(dec!(10000)), dec!(6000));
    /// assert_eq!(calculator.calculate_sv_beitraege(dec!(200000)), dec!(90000) * dec!(0.2745));
    /// ```
    pub fn calculate_sv_beitraege(
        &self,
        profit: Decimal,
    ) -> Decimal {
        let ss = &self.config.social_security;
        let base = non_negative(profit).min(ss.max_assessment_base);
        if profit > ss.max_assessment_base {
            debug!(
                profit = %profit,
                max_assessment_base = %ss.max_assessment_base,
                "Profit exceeds SV maximum assessment base; contribution capped"
            );
        }

        let contribution = round_half_up(base * ss.self_employed_rate);
        if contribution < ss.min_contribution {
            debug!(
                contribution = %contribution,
                min_contribution = %ss.min_contribution,
                "Regular SV contribution below minimum; minimum applies"
            );
            return ss.min_contribution;
        }
        contribution
    }

    /// Ärztekammer levy: base fee plus a share of non-negative profit.
    pub fn calculate_aerztekammer_beitrag(
        &self,
        profit: Decimal,
    ) -> Decimal {
        let levy = &self.config.chamber_levy;
        round_half_up(levy.base_fee + non_negative(profit) * levy.rate)
    }

    /// VAT contained in gross-of-VAT `revenue`.
    ///
    /// Zero when the Kleinunternehmer exemption applies or revenue is not
    /// positive.
    pub fn calculate_vat(
        &self,
        revenue: Decimal,
        is_kleinunternehmer: bool,
    ) -> Decimal {
        if is_kleinunternehmer || revenue <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        let rate = self.config.vat.standard_rate;
        round_half_up(revenue * rate / (Decimal::ONE + rate))
    }

    /// Flat-rate deduction on `profit` when Pauschalierung is applied.
    ///
    /// Eligibility is not checked here; see [`Self::is_pauschalierung_eligible`].
    /// A loss yields no deduction. The amount is exact; [`Self::calculate`]
    /// rounds it to cents.
    pub fn calculate_pauschal_deduction(
        &self,
        profit: Decimal,
        applying: bool,
    ) -> Decimal {
        if !applying {
            return Decimal::ZERO;
        }
        if profit <= Decimal::ZERO {
            warn!(
                profit = %profit,
                "Pauschalierung requested for a loss year; no deduction applied"
            );
            return Decimal::ZERO;
        }
        profit * self.config.pauschalierung.rate
    }

    /// Whether `revenue` falls under the Kleinunternehmer VAT exemption.
    pub fn is_kleinunternehmer(
        &self,
        revenue: Decimal,
    ) -> bool {
        revenue < self.config.vat.kleinunternehmer_threshold
    }

    /// Whether a practice with `revenue` may use Pauschalierung.
    pub fn is_pauschalierung_eligible(
        &self,
        revenue: Decimal,
    ) -> bool {
        revenue < self.config.pauschalierung.revenue_ceiling
    }

    /// VAT owed by a practice, taking the practice type into account.
    pub fn practice_vat(
        &self,
        input: &TaxCalculationInput,
    ) -> Decimal {
        if input.practice_type.is_vat_exempt() {
            return Decimal::ZERO;
        }
        let revenue = input.vat_relevant_revenue();
        self.calculate_vat(revenue, self.is_kleinunternehmer(revenue))
    }

    /// Calculates the full practice result.
    ///
    /// # Example: Loss Year
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use praxis_core::{PracticeTaxCalculator, PracticeType, TaxCalculationInput, TaxYearConfig};
    ///
    /// let config = TaxYearConfig::austria_2024();
    /// let calculator = PracticeTaxCalculator::new(&config).unwrap();
    ///
    /// let result = calculator.calculate(&TaxCalculationInput {
    ///     gross_revenue: dec!(30000),
    ///     total_expenses: dec!(40000),
    ///     practice_type: PracticeType::Kassenarzt,
    ///     applying_pauschalierung: false,
    ///     private_patient_revenue: None,
    /// });
    ///
    /// assert_eq!(result.profit, dec!(-10000));
    /// assert_eq!(result.income_tax, dec!(0));
    /// assert_eq!(result.sv_beitraege, dec!(6000));
    /// assert_eq!(result.effective_tax_rate, dec!(0));
    /// ```
    pub fn calculate(
        &self,
        input: &TaxCalculationInput,
    ) -> TaxCalculationResult {
        // Step 1: Profit, saturating at the Decimal range
        let profit = round_half_up(input.gross_revenue.saturating_sub(input.total_expenses));
        if profit <= Decimal::ZERO {
            warn!(
                gross_revenue = %input.gross_revenue,
                total_expenses = %input.total_expenses,
                profit = %profit,
                "Practice shows no profit; income tax is zero, minimum SV applies"
            );
        }

        if input.applying_pauschalierung && !self.is_pauschalierung_eligible(input.gross_revenue) {
            warn!(
                gross_revenue = %input.gross_revenue,
                revenue_ceiling = %self.config.pauschalierung.revenue_ceiling,
                "Pauschalierung applied above the revenue ceiling"
            );
        }

        // Steps 2-3: Pauschalierung and taxable income
        let pauschal_deduction = round_half_up(
            self.calculate_pauschal_deduction(profit, input.applying_pauschalierung),
        );
        let taxable_income = profit.saturating_sub(pauschal_deduction);

        // Steps 4-5: Contributions on non-negative profit
        let sv_beitraege = self.calculate_sv_beitraege(non_negative(profit));
        let aerztekammer_beitrag = self.calculate_aerztekammer_beitrag(non_negative(profit));

        // Step 6: No income tax on a loss
        let income_tax = if profit > Decimal::ZERO {
            self.calculate_income_tax(taxable_income)
        } else {
            Decimal::ZERO
        };

        // Step 7: VAT
        let vat = self.practice_vat(input);

        // Steps 8-10: Totals
        let total_tax_burden = sv_beitraege
            .saturating_add(aerztekammer_beitrag)
            .saturating_add(income_tax)
            .saturating_add(vat);
        let net_income = profit.saturating_sub(total_tax_burden);
        let effective_tax_rate = percentage(total_tax_burden, profit);

        debug!(
            profit = %profit,
            taxable_income = %taxable_income,
            income_tax = %income_tax,
            sv_beitraege = %sv_beitraege,
            vat = %vat,
            effective_tax_rate = %effective_tax_rate,
            "Practice tax calculated"
        );

        TaxCalculationResult {
            profit,
            pauschal_deduction,
            taxable_income,
            sv_beitraege,
            aerztekammer_beitrag,
            income_tax,
            vat,
            total_tax_burden,
            net_income,
            effective_tax_rate,
            gross_revenue: input.gross_revenue,
            vat_relevant_revenue: input.vat_relevant_revenue(),
            practice_type: input.practice_type,
            applying_pauschalierung: input.applying_pauschalierung,
        }
    }

    /// Optimization tips for a result computed with this calculator's config.
    pub fn optimization_tips(
        &self,
        result: &TaxCalculationResult,
    ) -> Vec<OptimizationTip> {
        tax_optimization_tips(self.config, result)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tracing_subscriber::fmt::format::FmtSpan;

    use super::*;
    use crate::PracticeType;

    fn config() -> TaxYearConfig {
        TaxYearConfig::austria_2024()
    }

    fn kassenarzt(
        gross_revenue: Decimal,
        total_expenses: Decimal,
        applying_pauschalierung: bool,
    ) -> TaxCalculationInput {
        TaxCalculationInput {
            gross_revenue,
            total_expenses,
            practice_type: PracticeType::Kassenarzt,
            applying_pauschalierung,
            private_patient_revenue: None,
        }
    }

    /// Initializes tracing subscriber for tests that verify log output.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_span_events(FmtSpan::NONE)
            .with_test_writer()
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    // =========================================================================
    // new tests
    // =========================================================================

    #[test]
    fn new_rejects_invalid_config() {
        let mut config = config();
        config.chamber_levy.rate = dec!(3);

        let result = PracticeTaxCalculator::new(&config);

        assert_eq!(
            result.err(),
            Some(TaxConfigError::InvalidRate {
                field: "chamber_levy.rate",
                rate: dec!(3)
            })
        );
    }

    // =========================================================================
    // calculate_income_tax tests
    // =========================================================================

    #[test]
    fn income_tax_is_zero_up_to_tax_free_threshold() {
        let config = config();
        let calculator = PracticeTaxCalculator::new(&config).unwrap();

        for income in [dec!(0), dec!(1), dec!(5000), dec!(12815.99), dec!(12816)] {
            assert_eq!(calculator.calculate_income_tax(income), dec!(0));
        }
    }

    #[test]
    fn income_tax_is_zero_for_negative_income() {
        let config = config();
        let calculator = PracticeTaxCalculator::new(&config).unwrap();

        assert_eq!(calculator.calculate_income_tax(dec!(-50000)), dec!(0));
    }

    #[test]
    fn income_tax_just_above_threshold() {
        let config = config();
        let calculator = PracticeTaxCalculator::new(&config).unwrap();

        // 1,000 × 20%
        assert_eq!(calculator.calculate_income_tax(dec!(13816)), dec!(200.00));
    }

    #[test]
    fn income_tax_at_each_bracket_boundary() {
        let config = config();
        let calculator = PracticeTaxCalculator::new(&config).unwrap();

        assert_eq!(calculator.calculate_income_tax(dec!(20818)), dec!(1600.40));
        assert_eq!(calculator.calculate_income_tax(dec!(34513)), dec!(5708.90));
        assert_eq!(calculator.calculate_income_tax(dec!(66612)), dec!(18548.50));
        assert_eq!(calculator.calculate_income_tax(dec!(99266)), dec!(34222.42));
        assert_eq!(calculator.calculate_income_tax(dec!(1000000)), dec!(484589.42));
    }

    #[test]
    fn income_tax_above_one_million_uses_55_percent() {
        let config = config();
        let calculator = PracticeTaxCalculator::new(&config).unwrap();

        assert_eq!(
            calculator.calculate_income_tax(dec!(1100000)),
            dec!(484589.42) + dec!(55000.00)
        );
    }

    #[test]
    fn income_tax_is_monotonic() {
        let config = config();
        let calculator = PracticeTaxCalculator::new(&config).unwrap();

        let mut previous = Decimal::ZERO;
        let mut income = dec!(-1000);
        while income < dec!(1200000) {
            let tax = calculator.calculate_income_tax(income);
            assert!(tax >= previous, "tax decreased at {income}");
            previous = tax;
            income += dec!(1733.37);
        }
    }

    #[test]
    fn marginal_rate_follows_bracket_table() {
        let config = config();
        let calculator = PracticeTaxCalculator::new(&config).unwrap();

        assert_eq!(calculator.marginal_rate(dec!(10000)), dec!(0.00));
        assert_eq!(calculator.marginal_rate(dec!(60000)), dec!(0.40));
        assert_eq!(calculator.marginal_rate(dec!(2000000)), dec!(0.55));
    }

    // =========================================================================
    // calculate_sv_beitraege tests
    // =========================================================================

    #[test]
    fn sv_minimum_applies_to_small_profits() {
        let config = config();
        let calculator = PracticeTaxCalculator::new(&config).unwrap();

        assert_eq!(calculator.calculate_sv_beitraege(dec!(0)), dec!(6000));
        assert_eq!(calculator.calculate_sv_beitraege(dec!(1000)), dec!(6000));
        assert_eq!(calculator.calculate_sv_beitraege(dec!(10000)), dec!(6000));
        assert_eq!(calculator.calculate_sv_beitraege(dec!(21857)), dec!(6000));
    }

    #[test]
    fn sv_minimum_applies_to_negative_profit() {
        let config = config();
        let calculator = PracticeTaxCalculator::new(&config).unwrap();

        assert_eq!(calculator.calculate_sv_beitraege(dec!(-25000)), dec!(6000));
    }

    #[test]
    fn sv_regular_rate_above_minimum() {
        let config = config();
        let calculator = PracticeTaxCalculator::new(&config).unwrap();

        assert_eq!(calculator.calculate_sv_beitraege(dec!(60000)), dec!(16470.00));
    }

    #[test]
    fn sv_capped_at_maximum_assessment_base() {
        let _guard = init_test_tracing();
        let config = config();
        let calculator = PracticeTaxCalculator::new(&config).unwrap();

        assert_eq!(calculator.calculate_sv_beitraege(dec!(200000)), dec!(24705.00));
        assert_eq!(
            calculator.calculate_sv_beitraege(dec!(5000000)),
            dec!(90000) * dec!(0.2745)
        );
    }

    // =========================================================================
    // calculate_aerztekammer_beitrag tests
    // =========================================================================

    #[test]
    fn aerztekammer_base_fee_for_zero_profit() {
        let config = config();
        let calculator = PracticeTaxCalculator::new(&config).unwrap();

        assert_eq!(calculator.calculate_aerztekammer_beitrag(dec!(0)), dec!(300));
    }

    #[test]
    fn aerztekammer_adds_percentage_of_profit() {
        let config = config();
        let calculator = PracticeTaxCalculator::new(&config).unwrap();

        assert_eq!(calculator.calculate_aerztekammer_beitrag(dec!(50000)), dec!(1800));
    }

    #[test]
    fn aerztekammer_never_below_base_fee() {
        let config = config();
        let calculator = PracticeTaxCalculator::new(&config).unwrap();

        assert_eq!(calculator.calculate_aerztekammer_beitrag(dec!(-40000)), dec!(300));
    }

    #[test]
    fn aerztekammer_has_no_cap() {
        let config = config();
        let calculator = PracticeTaxCalculator::new(&config).unwrap();

        assert_eq!(
            calculator.calculate_aerztekammer_beitrag(dec!(2000000)),
            dec!(60300)
        );
    }

    // =========================================================================
    // calculate_vat tests
    // =========================================================================

    #[test]
    fn vat_is_zero_for_kleinunternehmer() {
        let config = config();
        let calculator = PracticeTaxCalculator::new(&config).unwrap();

        for revenue in [dec!(0), dec!(30000), dec!(120000), dec!(10000000)] {
            assert_eq!(calculator.calculate_vat(revenue, true), dec!(0));
        }
    }

    #[test]
    fn vat_extracts_twenty_percent_from_gross() {
        let config = config();
        let calculator = PracticeTaxCalculator::new(&config).unwrap();

        assert_eq!(calculator.calculate_vat(dec!(120000), false), dec!(20000));
    }

    #[test]
    fn vat_rounds_to_cents() {
        let config = config();
        let calculator = PracticeTaxCalculator::new(&config).unwrap();

        assert_eq!(calculator.calculate_vat(dec!(80000), false), dec!(13333.33));
    }

    #[test]
    fn vat_is_zero_for_zero_or_negative_revenue() {
        let config = config();
        let calculator = PracticeTaxCalculator::new(&config).unwrap();

        assert_eq!(calculator.calculate_vat(dec!(0), false), dec!(0));
        assert_eq!(calculator.calculate_vat(dec!(-500), false), dec!(0));
    }

    #[test]
    fn kleinunternehmer_threshold_is_exclusive() {
        let config = config();
        let calculator = PracticeTaxCalculator::new(&config).unwrap();

        assert!(calculator.is_kleinunternehmer(dec!(34999.99)));
        assert!(!calculator.is_kleinunternehmer(dec!(35000)));
    }

    // =========================================================================
    // calculate_pauschal_deduction tests
    // =========================================================================

    #[test]
    fn pauschal_deduction_zero_when_not_applying() {
        let config = config();
        let calculator = PracticeTaxCalculator::new(&config).unwrap();

        for profit in [dec!(-1000), dec!(0), dec!(60000), dec!(900000)] {
            assert_eq!(calculator.calculate_pauschal_deduction(profit, false), dec!(0));
        }
    }

    #[test]
    fn pauschal_deduction_is_thirteen_percent() {
        let config = config();
        let calculator = PracticeTaxCalculator::new(&config).unwrap();

        assert_eq!(
            calculator.calculate_pauschal_deduction(dec!(60000), true),
            dec!(60000) * dec!(0.13)
        );
    }

    #[test]
    fn pauschal_deduction_scales_linearly() {
        let config = config();
        let calculator = PracticeTaxCalculator::new(&config).unwrap();

        let single = calculator.calculate_pauschal_deduction(dec!(45000), true);
        let double = calculator.calculate_pauschal_deduction(dec!(90000), true);

        assert_eq!(double, single * dec!(2));
    }

    #[test]
    fn pauschal_deduction_keeps_sub_cent_amounts() {
        let config = config();
        let calculator = PracticeTaxCalculator::new(&config).unwrap();

        assert_eq!(calculator.calculate_pauschal_deduction(dec!(1.05), true), dec!(0.1365));
    }

    #[test]
    fn pauschal_deduction_scales_linearly_below_one_cent() {
        let config = config();
        let calculator = PracticeTaxCalculator::new(&config).unwrap();

        let single = calculator.calculate_pauschal_deduction(dec!(1.05), true);
        let double = calculator.calculate_pauschal_deduction(dec!(2.10), true);

        assert_eq!(double, single * dec!(2));
    }

    #[test]
    fn pauschal_deduction_zero_for_loss() {
        let _guard = init_test_tracing();
        let config = config();
        let calculator = PracticeTaxCalculator::new(&config).unwrap();

        assert_eq!(calculator.calculate_pauschal_deduction(dec!(-10000), true), dec!(0));
    }

    #[test]
    fn pauschalierung_eligibility_below_ceiling_only() {
        let config = config();
        let calculator = PracticeTaxCalculator::new(&config).unwrap();

        assert!(calculator.is_pauschalierung_eligible(dec!(219999.99)));
        assert!(!calculator.is_pauschalierung_eligible(dec!(220000)));
        assert!(!calculator.is_pauschalierung_eligible(dec!(250000)));
    }

    // =========================================================================
    // calculate tests
    // =========================================================================

    #[test]
    fn calculate_kassenarzt_without_pauschalierung() {
        let config = config();
        let calculator = PracticeTaxCalculator::new(&config).unwrap();

        let result = calculator.calculate(&kassenarzt(dec!(100000), dec!(40000), false));

        assert_eq!(result.profit, dec!(60000));
        assert_eq!(result.pauschal_deduction, dec!(0));
        assert_eq!(result.taxable_income, dec!(60000));
        assert_eq!(result.sv_beitraege, dec!(16470.00));
        assert_eq!(result.aerztekammer_beitrag, dec!(2100));
        assert_eq!(result.income_tax, dec!(15903.70));
        assert_eq!(result.vat, dec!(0));
        // 16,470 + 2,100 + 15,903.70
        assert_eq!(result.total_tax_burden, dec!(34473.70));
        assert_eq!(result.net_income, dec!(25526.30));
        assert_eq!(result.effective_tax_rate, dec!(57.46));
    }

    #[test]
    fn calculate_kassenarzt_with_pauschalierung() {
        let config = config();
        let calculator = PracticeTaxCalculator::new(&config).unwrap();

        let result = calculator.calculate(&kassenarzt(dec!(100000), dec!(40000), true));

        assert_eq!(result.pauschal_deduction, dec!(7800));
        assert_eq!(result.taxable_income, dec!(52200));
        assert_eq!(result.income_tax, dec!(12783.70));
        assert_eq!(result.sv_beitraege, dec!(16470.00));
        assert_eq!(result.total_tax_burden, dec!(31353.70));
        assert_eq!(result.net_income, dec!(28646.30));
    }

    #[test]
    fn calculate_wahlarzt_with_private_revenue_owes_vat() {
        let config = config();
        let calculator = PracticeTaxCalculator::new(&config).unwrap();

        let result = calculator.calculate(&TaxCalculationInput {
            gross_revenue: dec!(80000),
            total_expenses: dec!(30000),
            practice_type: PracticeType::Wahlarzt,
            applying_pauschalierung: false,
            private_patient_revenue: Some(dec!(80000)),
        });

        assert_eq!(result.profit, dec!(50000));
        assert_eq!(result.vat, dec!(13333.33));
        assert_eq!(result.income_tax, dec!(11903.70));
        assert_eq!(result.total_tax_burden, dec!(40762.03));
        assert_eq!(result.effective_tax_rate, dec!(81.52));
    }

    #[test]
    fn calculate_wahlarzt_without_private_revenue_uses_gross_revenue() {
        let config = config();
        let calculator = PracticeTaxCalculator::new(&config).unwrap();

        let result = calculator.calculate(&TaxCalculationInput {
            gross_revenue: dec!(120000),
            total_expenses: dec!(50000),
            practice_type: PracticeType::Wahlarzt,
            applying_pauschalierung: false,
            private_patient_revenue: None,
        });

        assert_eq!(result.vat, dec!(20000));
        assert_eq!(result.vat_relevant_revenue, dec!(120000));
    }

    #[test]
    fn calculate_mixed_practice_taxes_only_private_revenue() {
        let config = config();
        let calculator = PracticeTaxCalculator::new(&config).unwrap();

        let result = calculator.calculate(&TaxCalculationInput {
            gross_revenue: dec!(200000),
            total_expenses: dec!(90000),
            practice_type: PracticeType::Mixed,
            applying_pauschalierung: false,
            private_patient_revenue: Some(dec!(60000)),
        });

        assert_eq!(result.vat, dec!(10000));
    }

    #[test]
    fn calculate_wahlarzt_below_kleinunternehmer_threshold_owes_no_vat() {
        let config = config();
        let calculator = PracticeTaxCalculator::new(&config).unwrap();

        let result = calculator.calculate(&TaxCalculationInput {
            gross_revenue: dec!(30000),
            total_expenses: dec!(5000),
            practice_type: PracticeType::Wahlarzt,
            applying_pauschalierung: false,
            private_patient_revenue: None,
        });

        assert_eq!(result.vat, dec!(0));
    }

    #[test]
    fn calculate_kassenarzt_never_owes_vat() {
        let config = config();
        let calculator = PracticeTaxCalculator::new(&config).unwrap();

        let result = calculator.calculate(&TaxCalculationInput {
            private_patient_revenue: Some(dec!(500000)),
            ..kassenarzt(dec!(600000), dec!(100000), false)
        });

        assert_eq!(result.vat, dec!(0));
    }

    #[test]
    fn calculate_loss_year() {
        let _guard = init_test_tracing();
        let config = config();
        let calculator = PracticeTaxCalculator::new(&config).unwrap();

        let result = calculator.calculate(&kassenarzt(dec!(30000), dec!(40000), false));

        assert_eq!(result.profit, dec!(-10000));
        assert_eq!(result.taxable_income, dec!(-10000));
        assert_eq!(result.income_tax, dec!(0));
        assert_eq!(result.sv_beitraege, dec!(6000));
        assert_eq!(result.aerztekammer_beitrag, dec!(300));
        assert_eq!(result.total_tax_burden, dec!(6300));
        assert_eq!(result.net_income, dec!(-16300));
        assert_eq!(result.effective_tax_rate, dec!(0));
    }

    #[test]
    fn calculate_loss_year_with_pauschalierung_does_not_deepen_loss() {
        let _guard = init_test_tracing();
        let config = config();
        let calculator = PracticeTaxCalculator::new(&config).unwrap();

        let result = calculator.calculate(&kassenarzt(dec!(30000), dec!(40000), true));

        assert_eq!(result.pauschal_deduction, dec!(0));
        assert_eq!(result.taxable_income, result.profit);
    }

    #[test]
    fn calculate_zero_profit_has_zero_rate() {
        let config = config();
        let calculator = PracticeTaxCalculator::new(&config).unwrap();

        let result = calculator.calculate(&kassenarzt(dec!(40000), dec!(40000), false));

        assert_eq!(result.income_tax, dec!(0));
        assert_eq!(result.effective_tax_rate, dec!(0));
    }

    #[test]
    fn calculate_is_deterministic() {
        let config = config();
        let calculator = PracticeTaxCalculator::new(&config).unwrap();
        let input = TaxCalculationInput {
            gross_revenue: dec!(187654.32),
            total_expenses: dec!(61234.56),
            practice_type: PracticeType::Mixed,
            applying_pauschalierung: true,
            private_patient_revenue: Some(dec!(45678.90)),
        };

        assert_eq!(calculator.calculate(&input), calculator.calculate(&input));
    }

    #[test]
    fn calculate_carries_scenario_context() {
        let config = config();
        let calculator = PracticeTaxCalculator::new(&config).unwrap();

        let result = calculator.calculate(&kassenarzt(dec!(100000), dec!(40000), true));

        assert_eq!(result.gross_revenue, dec!(100000));
        assert_eq!(result.practice_type, PracticeType::Kassenarzt);
        assert!(result.applying_pauschalierung);
    }

    #[test]
    fn calculate_totals_are_consistent() {
        let config = config();
        let calculator = PracticeTaxCalculator::new(&config).unwrap();

        let result = calculator.calculate(&TaxCalculationInput {
            gross_revenue: dec!(143210.55),
            total_expenses: dec!(38901.17),
            practice_type: PracticeType::Wahlarzt,
            applying_pauschalierung: true,
            private_patient_revenue: Some(dec!(143210.55)),
        });

        assert_eq!(
            result.total_tax_burden,
            result.sv_beitraege + result.aerztekammer_beitrag + result.income_tax + result.vat
        );
        assert_eq!(result.net_income, result.profit - result.total_tax_burden);
    }

    #[test]
    fn calculate_rounds_pauschal_deduction_to_cents() {
        let config = config();
        let calculator = PracticeTaxCalculator::new(&config).unwrap();

        // 60,000.05 × 13% = 7,800.0065
        let result = calculator.calculate(&kassenarzt(dec!(100000.05), dec!(40000), true));

        assert_eq!(result.pauschal_deduction, dec!(7800.01));
        assert_eq!(result.taxable_income, dec!(52200.04));
    }

    #[test]
    fn calculate_saturates_at_decimal_max() {
        let config = config();
        let calculator = PracticeTaxCalculator::new(&config).unwrap();

        let result = calculator.calculate(&kassenarzt(Decimal::MAX, dec!(-1), false));

        assert_eq!(result.profit, Decimal::MAX);
        assert_eq!(result.sv_beitraege, dec!(24705.00));
        assert!(result.income_tax > Decimal::ZERO);
        assert!(result.net_income < result.profit);
    }

    #[test]
    fn calculate_saturates_at_decimal_min() {
        let _guard = init_test_tracing();
        let config = config();
        let calculator = PracticeTaxCalculator::new(&config).unwrap();

        let result = calculator.calculate(&kassenarzt(Decimal::MIN, dec!(1), true));

        assert_eq!(result.profit, Decimal::MIN);
        assert_eq!(result.income_tax, dec!(0));
        assert_eq!(result.sv_beitraege, dec!(6000));
        assert_eq!(result.net_income, Decimal::MIN);
        assert_eq!(result.effective_tax_rate, dec!(0));
    }

    #[test]
    fn calculate_tiny_profit_with_huge_private_revenue_saturates_rate() {
        let config = config();
        let calculator = PracticeTaxCalculator::new(&config).unwrap();

        let result = calculator.calculate(&TaxCalculationInput {
            gross_revenue: dec!(1),
            total_expenses: dec!(0.99),
            practice_type: PracticeType::Wahlarzt,
            applying_pauschalierung: false,
            private_patient_revenue: Some(Decimal::MAX),
        });

        assert_eq!(result.profit, dec!(0.01));
        assert!(result.vat > Decimal::ZERO);
        assert_eq!(result.effective_tax_rate, Decimal::MAX);
    }

    #[test]
    fn calculate_uses_the_borrowed_tax_year() {
        let config_2025 = TaxYearConfig::austria_2025();
        let calculator = PracticeTaxCalculator::new(&config_2025).unwrap();

        // 2025 threshold is 13,308
        assert_eq!(calculator.calculate_income_tax(dec!(13308)), dec!(0));
        assert_eq!(calculator.calculate_income_tax(dec!(14308)), dec!(200.00));
    }
}
