//! Tax calculations for Austrian medical practices.
//!
//! The practice calculator covers a single practice-year; the comprehensive
//! calculator adds salaried income, deductions and credits on top of it.

pub mod common;
pub mod comprehensive;
pub mod format;
pub mod practice;
pub mod quarterly;
pub mod tips;

pub use comprehensive::{ComprehensiveTaxCalculator, SpecialPaymentTax};
pub use format::{format_euro_at, format_percent_at};
pub use practice::PracticeTaxCalculator;
pub use quarterly::calculate_quarterly_vorauszahlungen;
pub use tips::{OptimizationTip, tax_optimization_messages, tax_optimization_tips};
