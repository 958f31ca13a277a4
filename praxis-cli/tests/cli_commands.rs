//! Integration tests that run commands end-to-end against on-disk fixtures.

use std::path::{Path, PathBuf};

use clap::Parser;
use pretty_assertions::assert_eq;
use praxis_cli::{Cli, config::ConfigError, scenario_loader};
use praxis_core::{ComprehensiveTaxCalculator, ComprehensiveTaxInput, TaxYearConfig};
use rust_decimal_macros::dec;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Parses `args` and runs the command, returning the printed report.
fn run(args: &[&str]) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(std::iter::once("praxis-steuer").chain(args.iter().copied()))?;
    let mut out = Vec::new();
    cli.run(&mut out)?;
    Ok(String::from_utf8(out)?)
}

#[test]
fn test_practice_command_prints_result_quarters_and_tips() {
    let output = run(&["practice", "--revenue", "100.000", "--expenses", "40.000"]).unwrap();

    assert!(output.contains("Steuerjahr 2024 (kassenarzt)"));
    assert!(output.contains("€ 34.474"), "{output}");
    assert!(output.contains("Einkommensteuer-Vorauszahlungen"));
    assert!(output.contains("€ 3.976"));
    assert!(output.contains("Tipps"));
    assert!(output.contains("45%"));
}

#[test]
fn test_compare_command_flags_ineligible_revenue() {
    let output = run(&["compare", "--revenue", "250000", "--expenses", "100000"]).unwrap();

    assert!(output.contains("Ohne Pauschalierung"));
    assert!(output.contains("Hinweis"));
}

#[test]
fn test_batch_command_prints_every_fixture_row() {
    let path = fixture("sample_scenarios.csv");

    let output = run(&["batch", path.to_str().unwrap()]).unwrap();

    assert!(output.contains("Steuerjahr 2024: 4 Szenarien"));
    for label in [
        "Kassenordination",
        "Kassenordination pauschal",
        "Wahlarztpraxis",
        "Gruppenpraxis",
    ] {
        assert!(output.contains(label), "missing {label}");
    }
}

#[test]
fn test_batch_command_reports_missing_file() {
    let err = run(&["batch", "no/such/file.csv"]).unwrap_err();

    assert!(err.to_string().contains("failed to load scenarios"));
}

#[test]
fn test_scenario_fixture_loads() {
    let scenarios = scenario_loader::load_from_file(&fixture("sample_scenarios.csv")).unwrap();

    assert_eq!(scenarios.len(), 4);
    assert_eq!(scenarios[2].input.gross_revenue, dec!(80000));
    assert!(scenarios[1].input.applying_pauschalierung);
}

#[test]
fn test_comprehensive_fixture_values() {
    let contents = std::fs::read_to_string(fixture("comprehensive.toml")).unwrap();
    let input: ComprehensiveTaxInput = toml::from_str(&contents).unwrap();
    let config = TaxYearConfig::austria_2024();

    let result = ComprehensiveTaxCalculator::new(&config)
        .unwrap()
        .calculate(&input);

    assert_eq!(result.income.total_income, dec!(111001.65));
    assert_eq!(result.income.total_deductions, dec!(1100));
    assert_eq!(result.income_tax_before_credits, dec!(39540.25));
    assert_eq!(result.credits.familienbonus, dec!(4000.32));
    assert_eq!(result.credits.absetzbetraege, dec!(463));
    assert_eq!(result.total_income_tax, dec!(35537.31));
    assert_eq!(result.balance_due, dec!(23537.31));
    assert_eq!(result.total_tax_burden, dec!(76091.31));
    assert_eq!(result.effective_tax_rate, dec!(44.76));
}

#[test]
fn test_comprehensive_command_prints_balance_and_prepayments() {
    let path = fixture("comprehensive.toml");

    let output = run(&["comprehensive", path.to_str().unwrap()]).unwrap();

    assert!(output.contains("Nachzahlung"));
    assert!(output.contains("€ 23.537"));
    assert!(output.contains("Vorauszahlungen"));
    assert!(output.contains("Pauschalierung"));
}

#[test]
fn test_brackets_command_with_config_file() {
    let path = fixture("config_2024.toml");

    let output = run(&["brackets", "--config", path.to_str().unwrap()]).unwrap();

    assert!(output.contains("Einkommensteuertarif 2024"));
    assert!(output.contains("€ 1.000.000"));
}

#[test]
fn test_config_file_year_must_match_requested_year() {
    let path = fixture("config_2024.toml");

    let err = run(&["brackets", "--config", path.to_str().unwrap(), "--year", "2025"]).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::YearMismatch {
            file_year: 2024,
            requested: 2025
        })
    ));
}

#[test]
fn test_unsupported_year_is_rejected() {
    let err = run(&["brackets", "--year", "2019"]).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::UnsupportedYear { year: 2019, .. })
    ));
}
