//! Table rendering for calculation results.

use praxis_core::{
    ComprehensiveTaxResult, QuarterlySplit, TaxBracket, TaxCalculationResult, format_euro_at,
    format_percent_at,
};
use rust_decimal::Decimal;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

#[derive(Debug, Clone, Tabled)]
struct LineRow {
    #[tabled(rename = "Position")]
    label: String,
    #[tabled(rename = "Betrag")]
    amount: String,
}

#[derive(Debug, Clone, Tabled)]
struct ComparisonRow {
    #[tabled(rename = "Position")]
    label: String,
    #[tabled(rename = "Ohne Pauschalierung")]
    without: String,
    #[tabled(rename = "Mit Pauschalierung")]
    with: String,
    #[tabled(rename = "Differenz")]
    difference: String,
}

#[derive(Debug, Clone, Tabled)]
struct ScenarioRow {
    #[tabled(rename = "Szenario")]
    label: String,
    #[tabled(rename = "Typ")]
    practice_type: String,
    #[tabled(rename = "Gewinn")]
    profit: String,
    #[tabled(rename = "ESt")]
    income_tax: String,
    #[tabled(rename = "SV")]
    sv: String,
    #[tabled(rename = "USt")]
    vat: String,
    #[tabled(rename = "Belastung")]
    total: String,
    #[tabled(rename = "Netto")]
    net: String,
    #[tabled(rename = "Quote")]
    rate: String,
}

#[derive(Debug, Clone, Tabled)]
struct BracketRow {
    #[tabled(rename = "Von")]
    from: String,
    #[tabled(rename = "Bis")]
    to: String,
    #[tabled(rename = "Steuersatz")]
    rate: String,
}

fn line(
    label: &str,
    amount: Decimal,
) -> LineRow {
    LineRow {
        label: label.to_string(),
        amount: format_euro_at(amount),
    }
}

fn render<T: Tabled>(rows: Vec<T>) -> String {
    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string()
}

fn practice_lines(result: &TaxCalculationResult) -> Vec<(&'static str, Decimal)> {
    vec![
        ("Umsatz", result.gross_revenue),
        ("Gewinn", result.profit),
        ("Pauschalierung", result.pauschal_deduction),
        ("Bemessungsgrundlage", result.taxable_income),
        ("SV-Beiträge", result.sv_beitraege),
        ("Ärztekammer", result.aerztekammer_beitrag),
        ("Einkommensteuer", result.income_tax),
        ("Umsatzsteuer", result.vat),
        ("Gesamtbelastung", result.total_tax_burden),
        ("Nettoeinkommen", result.net_income),
    ]
}

/// One practice result as a two-column table.
pub fn practice_table(result: &TaxCalculationResult) -> String {
    let mut rows: Vec<LineRow> = practice_lines(result)
        .into_iter()
        .map(|(label, amount)| line(label, amount))
        .collect();
    rows.push(LineRow {
        label: "Effektive Belastung".to_string(),
        amount: format_percent_at(result.effective_tax_rate),
    });
    render(rows)
}

/// The same scenario without and with Pauschalierung, side by side.
pub fn comparison_table(
    without: &TaxCalculationResult,
    with: &TaxCalculationResult,
) -> String {
    let mut rows: Vec<ComparisonRow> = practice_lines(without)
        .into_iter()
        .zip(practice_lines(with))
        .map(|((label, a), (_, b))| ComparisonRow {
            label: label.to_string(),
            without: format_euro_at(a),
            with: format_euro_at(b),
            difference: format_euro_at(b - a),
        })
        .collect();
    rows.push(ComparisonRow {
        label: "Effektive Belastung".to_string(),
        without: format_percent_at(without.effective_tax_rate),
        with: format_percent_at(with.effective_tax_rate),
        difference: format_percent_at(with.effective_tax_rate - without.effective_tax_rate),
    });
    render(rows)
}

/// One summary row per labelled result.
pub fn batch_table<'a>(results: impl IntoIterator<Item = (&'a str, &'a TaxCalculationResult)>) -> String {
    let rows: Vec<ScenarioRow> = results
        .into_iter()
        .map(|(label, r)| ScenarioRow {
            label: label.to_string(),
            practice_type: r.practice_type.to_string(),
            profit: format_euro_at(r.profit),
            income_tax: format_euro_at(r.income_tax),
            sv: format_euro_at(r.sv_beitraege),
            vat: format_euro_at(r.vat),
            total: format_euro_at(r.total_tax_burden),
            net: format_euro_at(r.net_income),
            rate: format_percent_at(r.effective_tax_rate),
        })
        .collect();
    render(rows)
}

pub fn quarterly_table(split: &QuarterlySplit) -> String {
    let mut rows: Vec<LineRow> = split
        .quarters()
        .iter()
        .enumerate()
        .map(|(i, amount)| line(&format!("Q{}", i + 1), *amount))
        .collect();
    rows.push(line("Summe", split.total));
    render(rows)
}

/// Income tax bracket table with lower and upper bounds.
pub fn brackets_table(brackets: &[TaxBracket]) -> String {
    let mut lower = Decimal::ZERO;
    let rows: Vec<BracketRow> = brackets
        .iter()
        .map(|b| {
            let row = BracketRow {
                from: format_euro_at(lower),
                to: b.upper_limit.map_or_else(|| "darüber".to_string(), format_euro_at),
                rate: format_percent_at(b.rate * Decimal::ONE_HUNDRED),
            };
            if let Some(limit) = b.upper_limit {
                lower = limit;
            }
            row
        })
        .collect();
    render(rows)
}

pub fn comprehensive_table(result: &ComprehensiveTaxResult) -> String {
    let income = &result.income;
    let ss = &result.social_security;
    let mut rows = vec![
        line("Einkünfte nichtselbständig", income.employment_income),
        line("Werbungskosten", income.werbungskosten),
        line("Gewinn Praxis", income.self_employment_profit),
        line("Pauschalierung", income.pauschal_deduction),
        line("Gewinnfreibetrag", income.gewinnfreibetrag),
        line("Einkünfte selbständig", income.self_employment_income),
        line("Gesamtbetrag der Einkünfte", income.total_income),
        line("Abzüge", income.total_deductions),
        line("Einkommen", income.taxable_income),
        line("SV Dienstnehmer", ss.employee),
        line("SV Sonderzahlungen", ss.special_payments),
        line("SVS", ss.self_employed),
        line("Ärztekammer", ss.aerztekammer_beitrag),
        line("ESt vor Absetzbeträgen", result.income_tax_before_credits),
        line("Familienbonus Plus", result.credits.familienbonus),
        line("Absetzbeträge", result.credits.absetzbetraege),
        line("Steuer Sonderzahlungen", result.special_payment_tax),
        line("Einkommensteuer gesamt", result.total_income_tax),
        line("Umsatzsteuer", result.vat),
        line("Gesamtbelastung", result.total_tax_burden),
        line("Nettoeinkommen", result.net_income),
        line(balance_label(result.balance_due), result.balance_due.abs()),
    ];
    rows.push(LineRow {
        label: "Effektive Belastung".to_string(),
        amount: format_percent_at(result.effective_tax_rate),
    });
    render(rows)
}

fn balance_label(balance: Decimal) -> &'static str {
    if balance < Decimal::ZERO { "Gutschrift" } else { "Nachzahlung" }
}
