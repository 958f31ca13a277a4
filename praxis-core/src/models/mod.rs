mod comprehensive;
mod practice_tax;
mod practice_type;
mod presets;
mod tax_bracket;
mod tax_year_config;

pub use comprehensive::{
    AppliedCredits, ComprehensiveTaxInput, ComprehensiveTaxResult, EmploymentIncome,
    IncomeBreakdown, SelfEmploymentIncome, SocialSecurityBreakdown, TaxCredits, TaxDeductions,
};
pub use practice_tax::{QuarterlySplit, TaxCalculationInput, TaxCalculationResult};
pub use practice_type::PracticeType;
pub use tax_bracket::TaxBracket;
pub use tax_year_config::{
    ChamberLevyConfig, DeductionConfig, PauschalierungConfig, ProfitAllowanceConfig,
    SocialSecurityConfig, SpecialPaymentConfig, TaxConfigError, TaxCreditConfig, TaxYearConfig,
    VatConfig,
};
