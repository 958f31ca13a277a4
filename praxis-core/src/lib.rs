//! Austrian tax engine for medical practices.
//!
//! The engine is a set of pure calculators over an immutable
//! [`TaxYearConfig`]: progressive income tax, SVS contributions, the
//! Ärztekammer levy, VAT by practice type, the Pauschalierung flat rate, and
//! the composite practice result with quarterly prepayments and optimization
//! tips. [`calculations::ComprehensiveTaxCalculator`] extends this to mixed
//! employment and practice income.

pub mod calculations;
pub mod models;

pub use calculations::{
    ComprehensiveTaxCalculator, OptimizationTip, PracticeTaxCalculator,
    calculate_quarterly_vorauszahlungen, format_euro_at, format_percent_at,
    tax_optimization_messages, tax_optimization_tips,
};
pub use models::*;
