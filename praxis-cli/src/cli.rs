//! Command-line definition and command execution.

use std::{fs, io::Write, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use praxis_core::{
    ComprehensiveTaxCalculator, ComprehensiveTaxInput, PracticeTaxCalculator, PracticeType,
    TaxCalculationInput, TaxCalculationResult, TaxYearConfig, calculate_quarterly_vorauszahlungen,
    tax_optimization_messages,
};
use rayon::prelude::*;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::{amount::parse_amount, config::resolve_config, report, scenario_loader};

/// Tax estimator for Austrian medical practices.
///
/// Calculates income tax, SVS contributions, Ärztekammer levy and VAT for a
/// practice year and suggests optimizations.
#[derive(Debug, Parser)]
#[command(name = "praxis-steuer", version)]
pub struct Cli {
    /// Tax year of the built-in configuration (2024 or 2025).
    #[arg(long, global = true)]
    pub year: Option<i32>,

    /// TOML file with the tax-year constants, instead of a built-in preset.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level or filter directive; overrides RUST_LOG.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Also append log output to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Calculate one practice scenario.
    Practice(PracticeArgs),
    /// Compare a scenario without and with Pauschalierung.
    Compare(ScenarioArgs),
    /// Calculate every scenario of a CSV file.
    Batch {
        /// CSV file with one scenario per row.
        file: PathBuf,
    },
    /// Calculate a full tax year with employment and practice income from TOML.
    Comprehensive {
        /// TOML file with the tax-year input.
        file: PathBuf,
    },
    /// Print the income tax brackets of the active configuration.
    Brackets,
}

#[derive(Debug, Clone, Args)]
pub struct ScenarioArgs {
    /// Gross revenue, e.g. 100000 or 100.000,00.
    #[arg(long, value_parser = parse_amount)]
    pub revenue: Decimal,

    /// Total operating expenses.
    #[arg(long, value_parser = parse_amount)]
    pub expenses: Decimal,

    /// kassenarzt, wahlarzt or mixed.
    #[arg(long = "type", value_parser = parse_practice_type, default_value = "kassenarzt")]
    pub practice_type: PracticeType,

    /// Revenue from private patients; defaults to the whole revenue.
    #[arg(long, value_parser = parse_amount)]
    pub private_revenue: Option<Decimal>,
}

#[derive(Debug, Clone, Args)]
pub struct PracticeArgs {
    #[command(flatten)]
    pub scenario: ScenarioArgs,

    /// Apply the 13% Pauschalierung.
    #[arg(long)]
    pub pauschalierung: bool,
}

fn parse_practice_type(s: &str) -> Result<PracticeType, String> {
    PracticeType::parse(s)
        .ok_or_else(|| format!("unknown practice type '{s}' (kassenarzt, wahlarzt, mixed)"))
}

impl ScenarioArgs {
    pub fn to_input(
        &self,
        applying_pauschalierung: bool,
    ) -> TaxCalculationInput {
        TaxCalculationInput {
            gross_revenue: self.revenue,
            total_expenses: self.expenses,
            practice_type: self.practice_type,
            applying_pauschalierung,
            private_patient_revenue: self.private_revenue,
        }
    }
}

impl Cli {
    /// Resolves the configuration and runs the selected command, writing the
    /// report to `out`.
    pub fn run(
        &self,
        out: &mut impl Write,
    ) -> Result<()> {
        let config = resolve_config(self.year, self.config.as_deref())?;
        info!(tax_year = config.tax_year, "Starting calculation");

        match &self.command {
            Command::Practice(args) => run_practice(&config, args, out),
            Command::Compare(args) => run_compare(&config, args, out),
            Command::Batch { file } => run_batch(&config, file, out),
            Command::Comprehensive { file } => run_comprehensive(&config, file, out),
            Command::Brackets => {
                writeln!(out, "Einkommensteuertarif {}", config.tax_year)?;
                writeln!(out, "{}", report::brackets_table(&config.income_tax_brackets))?;
                Ok(())
            }
        }
    }
}

fn run_practice(
    config: &TaxYearConfig,
    args: &PracticeArgs,
    out: &mut impl Write,
) -> Result<()> {
    let calculator = PracticeTaxCalculator::new(config)?;
    let result = calculator.calculate(&args.scenario.to_input(args.pauschalierung));

    writeln!(out, "Steuerjahr {} ({})", config.tax_year, result.practice_type)?;
    writeln!(out, "{}", report::practice_table(&result))?;
    writeln!(out)?;
    writeln!(out, "Einkommensteuer-Vorauszahlungen")?;
    writeln!(
        out,
        "{}",
        report::quarterly_table(&calculate_quarterly_vorauszahlungen(result.income_tax))
    )?;
    write_tips(config, &result, out)
}

fn run_compare(
    config: &TaxYearConfig,
    args: &ScenarioArgs,
    out: &mut impl Write,
) -> Result<()> {
    let calculator = PracticeTaxCalculator::new(config)?;
    let without = calculator.calculate(&args.to_input(false));
    let with = calculator.calculate(&args.to_input(true));

    writeln!(out, "Steuerjahr {}: Vergleich Pauschalierung", config.tax_year)?;
    writeln!(out, "{}", report::comparison_table(&without, &with))?;
    if !calculator.is_pauschalierung_eligible(args.revenue) {
        writeln!(
            out,
            "Hinweis: Der Umsatz liegt über der Grenze für die Pauschalierung."
        )?;
    }
    Ok(())
}

fn run_batch(
    config: &TaxYearConfig,
    file: &std::path::Path,
    out: &mut impl Write,
) -> Result<()> {
    let scenarios = scenario_loader::load_from_file(file)
        .with_context(|| format!("failed to load scenarios from '{}'", file.display()))?;
    let calculator = PracticeTaxCalculator::new(config)?;

    let inputs: Vec<&TaxCalculationInput> = scenarios.iter().map(|s| &s.input).collect();
    let results = calculate_parallel(&calculator, &inputs);

    writeln!(out, "Steuerjahr {}: {} Szenarien", config.tax_year, scenarios.len())?;
    writeln!(
        out,
        "{}",
        report::batch_table(
            scenarios
                .iter()
                .map(|s| s.label.as_str())
                .zip(results.iter())
        )
    )?;
    Ok(())
}

/// Calculates `inputs` on the rayon thread pool sharing one calculator.
/// Results keep the input order.
pub fn calculate_parallel(
    calculator: &PracticeTaxCalculator<'_>,
    inputs: &[&TaxCalculationInput],
) -> Vec<TaxCalculationResult> {
    debug!(
        scenarios = inputs.len(),
        threads = rayon::current_num_threads(),
        "Calculating scenarios"
    );

    inputs
        .par_iter()
        .map(|input| calculator.calculate(input))
        .collect()
}

fn run_comprehensive(
    config: &TaxYearConfig,
    file: &std::path::Path,
    out: &mut impl Write,
) -> Result<()> {
    let contents = fs::read_to_string(file)
        .with_context(|| format!("cannot read input file '{}'", file.display()))?;
    let input: ComprehensiveTaxInput = toml::from_str(&contents)
        .with_context(|| format!("cannot parse input file '{}'", file.display()))?;

    let calculator = ComprehensiveTaxCalculator::new(config)?;
    let result = calculator.calculate(&input);

    writeln!(out, "Steuerjahr {}: Gesamtberechnung", config.tax_year)?;
    writeln!(out, "{}", report::comprehensive_table(&result))?;
    if result.vorauszahlungen.total > Decimal::ZERO {
        writeln!(out)?;
        writeln!(out, "Vorauszahlungen")?;
        writeln!(out, "{}", report::quarterly_table(&result.vorauszahlungen))?;
    }
    if let Some(practice) = calculator.practice_result(&input) {
        write_tips(config, &practice, out)?;
    }
    Ok(())
}

fn write_tips(
    config: &TaxYearConfig,
    result: &TaxCalculationResult,
    out: &mut impl Write,
) -> Result<()> {
    let messages = tax_optimization_messages(config, result);
    if messages.is_empty() {
        return Ok(());
    }
    writeln!(out)?;
    writeln!(out, "Tipps")?;
    for message in messages {
        writeln!(out, "- {message}")?;
    }
    Ok(())
}
