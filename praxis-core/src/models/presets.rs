//! Built-in configurations for the supported Austrian tax years.

use rust_decimal_macros::dec;

use crate::models::tax_year_config::{
    ChamberLevyConfig, DeductionConfig, PauschalierungConfig, ProfitAllowanceConfig,
    SocialSecurityConfig, SpecialPaymentConfig, TaxCreditConfig, VatConfig,
};
use crate::{TaxBracket, TaxYearConfig};

impl TaxYearConfig {
    /// Tax years with a built-in preset.
    pub const SUPPORTED_YEARS: [i32; 2] = [2024, 2025];

    /// Returns the preset for `tax_year`, if one exists.
    ///
    /// ```
    /// use praxis_core::TaxYearConfig;
    ///
    /// assert_eq!(TaxYearConfig::for_year(2024).map(|c| c.tax_year), Some(2024));
    /// assert!(TaxYearConfig::for_year(1999).is_none());
    /// ```
    pub fn for_year(tax_year: i32) -> Option<Self> {
        match tax_year {
            2024 => Some(Self::austria_2024()),
            2025 => Some(Self::austria_2025()),
            _ => None,
        }
    }

    /// Tariff and contribution constants for 2024.
    pub fn austria_2024() -> Self {
        Self {
            tax_year: 2024,
            income_tax_brackets: vec![
                TaxBracket::bounded(dec!(12816), dec!(0.00), "Steuerfrei"),
                TaxBracket::bounded(dec!(20818), dec!(0.20), "20%"),
                TaxBracket::bounded(dec!(34513), dec!(0.30), "30%"),
                TaxBracket::bounded(dec!(66612), dec!(0.40), "40%"),
                TaxBracket::bounded(dec!(99266), dec!(0.48), "48%"),
                TaxBracket::bounded(dec!(1000000), dec!(0.50), "50%"),
                TaxBracket::unbounded(dec!(0.55), "55%"),
            ],
            social_security: SocialSecurityConfig {
                employee_max_base: dec!(72720),
                special_payment_max_base: dec!(12120),
                ..base_social_security()
            },
            chamber_levy: base_chamber_levy(),
            vat: VatConfig {
                standard_rate: dec!(0.20),
                kleinunternehmer_threshold: dec!(35000),
            },
            pauschalierung: base_pauschalierung(),
            special_payments: base_special_payments(),
            profit_allowance: base_profit_allowance(),
            deductions: base_deductions(),
            credits: TaxCreditConfig {
                verkehrsabsetzbetrag: dec!(463),
                familienbonus_under_18: dec!(2000.16),
                familienbonus_over_18: dec!(700.08),
                alleinverdiener_one_child: dec!(572),
                alleinverdiener_two_children: dec!(774),
                alleinverdiener_additional_child: dec!(255),
            },
        }
    }

    /// Tariff and contribution constants for 2025.
    pub fn austria_2025() -> Self {
        Self {
            tax_year: 2025,
            income_tax_brackets: vec![
                TaxBracket::bounded(dec!(13308), dec!(0.00), "Steuerfrei"),
                TaxBracket::bounded(dec!(21617), dec!(0.20), "20%"),
                TaxBracket::bounded(dec!(35836), dec!(0.30), "30%"),
                TaxBracket::bounded(dec!(69166), dec!(0.40), "40%"),
                TaxBracket::bounded(dec!(103072), dec!(0.48), "48%"),
                TaxBracket::bounded(dec!(1000000), dec!(0.50), "50%"),
                TaxBracket::unbounded(dec!(0.55), "55%"),
            ],
            social_security: SocialSecurityConfig {
                employee_max_base: dec!(77400),
                special_payment_max_base: dec!(12900),
                ..base_social_security()
            },
            chamber_levy: base_chamber_levy(),
            vat: VatConfig {
                standard_rate: dec!(0.20),
                kleinunternehmer_threshold: dec!(55000),
            },
            pauschalierung: base_pauschalierung(),
            special_payments: base_special_payments(),
            profit_allowance: base_profit_allowance(),
            deductions: base_deductions(),
            credits: TaxCreditConfig {
                verkehrsabsetzbetrag: dec!(487),
                familienbonus_under_18: dec!(2000.16),
                familienbonus_over_18: dec!(700.08),
                alleinverdiener_one_child: dec!(601),
                alleinverdiener_two_children: dec!(813),
                alleinverdiener_additional_child: dec!(268),
            },
        }
    }
}

fn base_social_security() -> SocialSecurityConfig {
    SocialSecurityConfig {
        self_employed_rate: dec!(0.2745),
        min_contribution: dec!(6000),
        max_assessment_base: dec!(90000),
        employee_rate: dec!(0.1807),
        employee_max_base: dec!(72720),
        special_payment_rate: dec!(0.1707),
        special_payment_max_base: dec!(12120),
    }
}

fn base_chamber_levy() -> ChamberLevyConfig {
    ChamberLevyConfig {
        base_fee: dec!(300),
        rate: dec!(0.03),
    }
}

fn base_pauschalierung() -> PauschalierungConfig {
    PauschalierungConfig {
        rate: dec!(0.13),
        revenue_ceiling: dec!(220000),
    }
}

fn base_special_payments() -> SpecialPaymentConfig {
    SpecialPaymentConfig {
        exemption_limit: dec!(2100),
        brackets: vec![
            TaxBracket::bounded(dec!(620), dec!(0.00), "Freibetrag"),
            TaxBracket::bounded(dec!(25000), dec!(0.06), "6%"),
            TaxBracket::bounded(dec!(50000), dec!(0.27), "27%"),
            TaxBracket::bounded(dec!(83333), dec!(0.3575), "35,75%"),
        ],
    }
}

fn base_profit_allowance() -> ProfitAllowanceConfig {
    ProfitAllowanceConfig {
        basic_rate: dec!(0.15),
        basic_limit: dec!(33000),
        investment_brackets: vec![
            TaxBracket::bounded(dec!(33000), dec!(0.00), "Grundfreibetrag"),
            TaxBracket::bounded(dec!(175000), dec!(0.13), "13%"),
            TaxBracket::bounded(dec!(350000), dec!(0.07), "7%"),
            TaxBracket::bounded(dec!(580000), dec!(0.045), "4,5%"),
        ],
        max_allowance: dec!(46400),
    }
}

fn base_deductions() -> DeductionConfig {
    DeductionConfig {
        werbungskosten_pauschale: dec!(132),
        church_contribution_cap: dec!(600),
        donation_cap_rate: dec!(0.10),
        selbstbehalt_tiers: vec![
            TaxBracket::bounded(dec!(7300), dec!(0.06), "6%"),
            TaxBracket::bounded(dec!(14600), dec!(0.08), "8%"),
            TaxBracket::bounded(dec!(36400), dec!(0.10), "10%"),
            TaxBracket::unbounded(dec!(0.12), "12%"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn for_year_returns_matching_preset() {
        for year in TaxYearConfig::SUPPORTED_YEARS {
            let config = TaxYearConfig::for_year(year).unwrap();

            assert_eq!(config.tax_year, year);
        }
    }

    #[test]
    fn for_year_returns_none_for_unknown_year() {
        assert!(TaxYearConfig::for_year(2019).is_none());
    }

    #[test]
    fn austria_2024_tax_free_threshold() {
        let config = TaxYearConfig::austria_2024();

        assert_eq!(config.income_tax_brackets[0].upper_limit, Some(dec!(12816)));
        assert_eq!(config.income_tax_brackets[0].rate, dec!(0.00));
    }

    #[test]
    fn austria_2024_top_rate_is_55_percent_above_one_million() {
        let config = TaxYearConfig::austria_2024();
        let brackets = &config.income_tax_brackets;

        assert_eq!(brackets[brackets.len() - 2].upper_limit, Some(dec!(1000000)));
        assert_eq!(brackets[brackets.len() - 1].upper_limit, None);
        assert_eq!(brackets[brackets.len() - 1].rate, dec!(0.55));
    }

    #[test]
    fn austria_2025_raises_kleinunternehmer_threshold() {
        assert_eq!(
            TaxYearConfig::austria_2025().vat.kleinunternehmer_threshold,
            dec!(55000)
        );
    }

    #[test]
    fn presets_share_practice_constants() {
        let a = TaxYearConfig::austria_2024();
        let b = TaxYearConfig::austria_2025();

        assert_eq!(a.chamber_levy, b.chamber_levy);
        assert_eq!(a.pauschalierung, b.pauschalierung);
        assert_eq!(
            a.social_security.self_employed_rate,
            b.social_security.self_employed_rate
        );
    }
}
