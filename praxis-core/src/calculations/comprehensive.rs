//! Personal income tax across salaried and practice income.
//!
//! [`ComprehensiveTaxCalculator`] extends the practice calculation to a full
//! Arbeitnehmerveranlagung-style assessment:
//!
//! - employee social insurance and Werbungskosten on the salary,
//! - preferential taxation of 13th/14th salaries,
//! - the Gewinnfreibetrag on practice profit,
//! - Sonderausgaben and außergewöhnliche Belastungen,
//! - Familienbonus Plus and Absetzbeträge as non-refundable credits.
//!
//! The practice part reuses [`PracticeTaxCalculator`], so profit, Pauschalierung,
//! SVS contributions, chamber levy and VAT are computed exactly as for a
//! single practice.

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::{
    bracket_excess, bracket_rate, non_negative, percentage, progressive_tax, round_half_up,
};
use crate::calculations::practice::PracticeTaxCalculator;
use crate::calculations::quarterly::calculate_quarterly_vorauszahlungen;
use crate::{
    AppliedCredits, ComprehensiveTaxInput, ComprehensiveTaxResult, EmploymentIncome,
    IncomeBreakdown, SelfEmploymentIncome, SocialSecurityBreakdown, TaxCalculationInput,
    TaxCalculationResult, TaxConfigError, TaxCredits, TaxDeductions, TaxYearConfig,
};

#[derive(Debug, Clone, Copy)]
pub struct ComprehensiveTaxCalculator<'a> {
    practice: PracticeTaxCalculator<'a>,
}

/// Tax on 13th/14th salaries and the part left for the regular tariff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecialPaymentTax {
    pub tax: Decimal,
    pub excess: Decimal,
}

struct EmploymentPart {
    income: Decimal,
    werbungskosten: Decimal,
    employee_sv: Decimal,
    special_sv: Decimal,
    net_special_payments: Decimal,
}

impl<'a> ComprehensiveTaxCalculator<'a> {
    /// # Errors
    ///
    /// Returns [`TaxConfigError`] if the configuration is invalid.
    pub fn new(config: &'a TaxYearConfig) -> Result<Self, TaxConfigError> {
        Ok(Self {
            practice: PracticeTaxCalculator::new(config)?,
        })
    }

    pub fn config(&self) -> &'a TaxYearConfig {
        self.practice.config()
    }

    /// Taxes net special payments with the fixed-rate bands.
    ///
    /// Nothing is taxed up to the Freigrenze. Above it the bands apply from
    /// the first euro; the part above the last band goes to the regular
    /// tariff and is returned as `excess`.
    pub fn special_payment_tax(
        &self,
        net_special_payments: Decimal,
    ) -> SpecialPaymentTax {
        let special = &self.config().special_payments;
        if net_special_payments <= special.exemption_limit {
            return SpecialPaymentTax {
                tax: Decimal::ZERO,
                excess: Decimal::ZERO,
            };
        }
        SpecialPaymentTax {
            tax: round_half_up(progressive_tax(&special.brackets, net_special_payments)),
            excess: bracket_excess(&special.brackets, net_special_payments),
        }
    }

    /// Gewinnfreibetrag on `base` (profit after Pauschalierung and contributions).
    ///
    /// The basic allowance needs no investment; the investment-based part is
    /// limited by `qualifying_investments`. Not available together with
    /// Pauschalierung.
    pub fn gewinnfreibetrag(
        &self,
        base: Decimal,
        qualifying_investments: Decimal,
        applying_pauschalierung: bool,
    ) -> Decimal {
        if applying_pauschalierung || base <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        let allowance = &self.config().profit_allowance;
        let basic = base.min(allowance.basic_limit) * allowance.basic_rate;
        let investment = progressive_tax(&allowance.investment_brackets, base)
            .min(non_negative(qualifying_investments));

        round_half_up((basic + investment).min(allowance.max_allowance))
    }

    /// Total deductible Sonderausgaben and außergewöhnliche Belastungen.
    pub fn total_deductions(
        &self,
        total_income: Decimal,
        deductions: &TaxDeductions,
    ) -> Decimal {
        let config = &self.config().deductions;
        let income = non_negative(total_income);

        let church = non_negative(deductions.church_contributions).min(config.church_contribution_cap);
        let donations =
            non_negative(deductions.donations).min(round_half_up(income * config.donation_cap_rate));
        let selbstbehalt =
            round_half_up(income * bracket_rate(&config.selbstbehalt_tiers, income));
        let extraordinary = non_negative(deductions.extraordinary_burdens - selbstbehalt);

        non_negative(deductions.special_expenses) + church + donations + extraordinary
    }

    /// Absetzbeträge the taxpayer is entitled to before limiting by tax.
    pub fn absetzbetraege(
        &self,
        credits: &TaxCredits,
        has_employment: bool,
    ) -> Decimal {
        let config = &self.config().credits;
        let verkehr = if has_employment {
            config.verkehrsabsetzbetrag
        } else {
            Decimal::ZERO
        };

        let alleinverdiener = match (credits.sole_earner, credits.children()) {
            (false, _) | (true, 0) => Decimal::ZERO,
            (true, 1) => config.alleinverdiener_one_child,
            (true, n) => {
                config.alleinverdiener_two_children
                    + config.alleinverdiener_additional_child * Decimal::from(n - 2)
            }
        };

        verkehr + alleinverdiener + non_negative(credits.pendlereuro)
    }

    pub fn familienbonus(
        &self,
        credits: &TaxCredits,
    ) -> Decimal {
        let config = &self.config().credits;
        config.familienbonus_under_18 * Decimal::from(credits.children_under_18)
            + config.familienbonus_over_18 * Decimal::from(credits.children_over_18)
    }

    pub fn calculate(
        &self,
        input: &ComprehensiveTaxInput,
    ) -> ComprehensiveTaxResult {
        let employment = input
            .employment
            .as_ref()
            .map(|e| self.employment_part(e));
        let special = self.special_payment_tax(
            employment
                .as_ref()
                .map_or(Decimal::ZERO, |e| e.net_special_payments),
        );

        let practice = input
            .self_employment
            .as_ref()
            .map(|s| (s, self.practice.calculate(&practice_input(s))));
        let gewinnfreibetrag = practice.as_ref().map_or(Decimal::ZERO, |(s, r)| {
            self.gewinnfreibetrag(
                r.profit - r.pauschal_deduction - r.sv_beitraege - r.aerztekammer_beitrag,
                s.qualifying_investments,
                s.applying_pauschalierung,
            )
        });
        let practice = practice.map(|(_, r)| r);

        let employment_income = employment.as_ref().map_or(Decimal::ZERO, |e| e.income);
        let self_employment_income = practice.as_ref().map_or(Decimal::ZERO, |r| {
            r.profit - r.pauschal_deduction - r.sv_beitraege - r.aerztekammer_beitrag
                - gewinnfreibetrag
        });
        let total_income = employment_income + self_employment_income + special.excess;
        let total_deductions = self.total_deductions(total_income, &input.deductions);
        let taxable_income = non_negative(total_income - total_deductions);

        let income_tax_before_credits = self.practice.calculate_income_tax(taxable_income);
        let credits = self.apply_credits(
            income_tax_before_credits,
            &input.credits,
            employment.is_some(),
        );
        let total_income_tax = income_tax_before_credits - credits.total() + special.tax;

        let social_security = SocialSecurityBreakdown {
            employee: employment.as_ref().map_or(Decimal::ZERO, |e| e.employee_sv),
            special_payments: employment.as_ref().map_or(Decimal::ZERO, |e| e.special_sv),
            self_employed: practice.as_ref().map_or(Decimal::ZERO, |r| r.sv_beitraege),
            aerztekammer_beitrag: practice
                .as_ref()
                .map_or(Decimal::ZERO, |r| r.aerztekammer_beitrag),
        };
        let vat = practice.as_ref().map_or(Decimal::ZERO, |r| r.vat);
        let total_tax_burden = total_income_tax + social_security.total() + vat;

        let gross_income = input
            .employment
            .as_ref()
            .map_or(Decimal::ZERO, |e| e.gross_salary + e.special_payments)
            + practice.as_ref().map_or(Decimal::ZERO, |r| r.profit);
        let net_income = gross_income - total_tax_burden;
        let effective_tax_rate = percentage(total_tax_burden, gross_income);

        let withheld = input
            .employment
            .as_ref()
            .map_or(Decimal::ZERO, |e| e.withheld_income_tax);
        let balance_due = total_income_tax - withheld;
        let vorauszahlungen = calculate_quarterly_vorauszahlungen(non_negative(balance_due));

        debug!(
            total_income = %total_income,
            taxable_income = %taxable_income,
            total_income_tax = %total_income_tax,
            balance_due = %balance_due,
            "Comprehensive tax calculated"
        );

        ComprehensiveTaxResult {
            income: IncomeBreakdown {
                employment_income,
                werbungskosten: employment.as_ref().map_or(Decimal::ZERO, |e| e.werbungskosten),
                self_employment_profit: practice.as_ref().map_or(Decimal::ZERO, |r| r.profit),
                pauschal_deduction: practice
                    .as_ref()
                    .map_or(Decimal::ZERO, |r| r.pauschal_deduction),
                gewinnfreibetrag,
                self_employment_income,
                special_payment_excess: special.excess,
                total_income,
                total_deductions,
                taxable_income,
            },
            social_security,
            credits,
            income_tax_before_credits,
            special_payment_tax: special.tax,
            total_income_tax,
            vat,
            total_tax_burden,
            gross_income,
            net_income,
            effective_tax_rate,
            balance_due,
            vorauszahlungen,
        }
    }

    /// The practice part of `input` on its own, if any.
    pub fn practice_result(
        &self,
        input: &ComprehensiveTaxInput,
    ) -> Option<TaxCalculationResult> {
        input
            .self_employment
            .as_ref()
            .map(|s| self.practice.calculate(&practice_input(s)))
    }

    fn employment_part(
        &self,
        employment: &EmploymentIncome,
    ) -> EmploymentPart {
        let ss = &self.config().social_security;
        let employee_sv = round_half_up(
            non_negative(employment.gross_salary).min(ss.employee_max_base) * ss.employee_rate,
        );
        let special_sv = round_half_up(
            non_negative(employment.special_payments).min(ss.special_payment_max_base)
                * ss.special_payment_rate,
        );
        let werbungskosten = employment
            .work_expenses
            .max(self.config().deductions.werbungskosten_pauschale);

        EmploymentPart {
            income: employment.gross_salary
                - employee_sv
                - werbungskosten
                - non_negative(employment.commuter_allowance),
            werbungskosten,
            employee_sv,
            special_sv,
            net_special_payments: non_negative(employment.special_payments - special_sv),
        }
    }

    fn apply_credits(
        &self,
        income_tax: Decimal,
        credits: &TaxCredits,
        has_employment: bool,
    ) -> AppliedCredits {
        let familienbonus = self.familienbonus(credits).min(income_tax);
        let absetzbetraege = self
            .absetzbetraege(credits, has_employment)
            .min(income_tax - familienbonus);

        AppliedCredits {
            familienbonus,
            absetzbetraege,
        }
    }
}

fn practice_input(income: &SelfEmploymentIncome) -> TaxCalculationInput {
    TaxCalculationInput {
        gross_revenue: income.gross_revenue,
        total_expenses: income.total_expenses,
        practice_type: income.practice_type,
        applying_pauschalierung: income.applying_pauschalierung,
        private_patient_revenue: income.private_patient_revenue,
    }
}
