//! Battery NPV CLI
//!
//! Command-line interface for evaluating battery storage project scenarios

use anyhow::{Context, Result};
use battery_npv::config::{load_scenario, ScenarioOverrides};
use battery_npv::{CashFlowResult, Preset, ScenarioConfig, ScenarioRunner};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "battery_npv", version, about = "Battery storage project NPV model")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate one scenario and print or export its cash flows
    Evaluate(EvaluateArgs),
    /// Evaluate every preset, or the given scenario files, side by side
    Compare {
        /// JSON scenario files; all presets when omitted
        files: Vec<PathBuf>,
    },
    /// Print the preset configurations as JSON
    Presets,
}

#[derive(Args)]
struct EvaluateArgs {
    /// Start from a named preset instead of the defaults
    #[arg(long, conflicts_with = "config")]
    preset: Option<Preset>,

    /// Start from a JSON scenario file
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    inputs: InputFlags,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Write to this file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

/// Scenario inputs; percentages are given as percent (7.0 for 7%)
#[derive(Args)]
struct InputFlags {
    /// Upfront investment ($)
    #[arg(long)]
    investment: Option<f64>,
    /// Discount rate (%)
    #[arg(long, allow_negative_numbers = true)]
    discount_rate: Option<f64>,
    /// Project life (years, at most 100)
    #[arg(long)]
    project_life: Option<u32>,
    /// Year-1 electricity savings ($)
    #[arg(long, allow_negative_numbers = true)]
    base_savings: Option<f64>,
    /// Savings escalation rate (%)
    #[arg(long, allow_negative_numbers = true)]
    escalation: Option<f64>,
    /// EQORE share of savings (%)
    #[arg(long)]
    savings_split: Option<f64>,
    /// Federal corporate tax rate (%)
    #[arg(long)]
    corp_tax: Option<f64>,
    /// IRA tax credit (%)
    #[arg(long)]
    ira_credit: Option<f64>,
    /// Bonus depreciation (%)
    #[arg(long)]
    bonus_depr: Option<f64>,
    /// Percent financed (%)
    #[arg(long)]
    finance: Option<f64>,
    /// Loan interest rate (%)
    #[arg(long, allow_negative_numbers = true)]
    loan_rate: Option<f64>,
    /// Loan term (years)
    #[arg(long)]
    loan_term: Option<u32>,
    /// Date of year 0 for IRR (YYYY-MM-DD); today when omitted
    #[arg(long)]
    evaluation_date: Option<NaiveDate>,
}

impl InputFlags {
    fn into_overrides(self) -> ScenarioOverrides {
        let pct = |v: Option<f64>| v.map(|p| p / 100.0);
        ScenarioOverrides {
            investment: self.investment,
            discount_rate: pct(self.discount_rate),
            project_life: self.project_life,
            base_savings: self.base_savings,
            escalation: pct(self.escalation),
            savings_split: pct(self.savings_split),
            corp_tax: pct(self.corp_tax),
            ira_credit_pct: pct(self.ira_credit),
            bonus_depr_pct: pct(self.bonus_depr),
            finance_pct: pct(self.finance),
            loan_rate: pct(self.loan_rate),
            loan_term: self.loan_term,
            depreciation_rates: None,
            evaluation_date: self.evaluation_date,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Evaluate(args) => evaluate(args),
        Command::Compare { files } => compare(&files),
        Command::Presets => presets(),
    }
}

fn evaluate(args: EvaluateArgs) -> Result<()> {
    let base = match (&args.config, args.preset) {
        (Some(path), _) => load_scenario(path)
            .with_context(|| format!("loading scenario {}", path.display()))?,
        (None, Some(preset)) => preset.config(),
        (None, None) => ScenarioConfig::default(),
    };
    let config = args.inputs.into_overrides().apply(base);

    let result = ScenarioRunner::new()
        .run(&config)
        .context("invalid scenario")?;

    let mut out = open_output(args.output.as_deref())?;
    match args.format {
        OutputFormat::Table => write_table(&mut out, &result)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &result)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => write_csv(out, &result)?,
    }

    Ok(())
}

fn compare(files: &[PathBuf]) -> Result<()> {
    let (names, configs): (Vec<String>, Vec<ScenarioConfig>) = if files.is_empty() {
        Preset::ALL
            .iter()
            .map(|p| (p.name().to_string(), p.config()))
            .unzip()
    } else {
        let mut loaded = Vec::with_capacity(files.len());
        for path in files {
            let config = load_scenario(path)
                .with_context(|| format!("loading scenario {}", path.display()))?;
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            loaded.push((name, config));
        }
        loaded.into_iter().unzip()
    };

    let results = ScenarioRunner::new().run_batch(&configs);

    println!(
        "{:<16} {:>14} {:>14} {:>14} {:>9} {:>9} {:>20}",
        "Scenario", "Project NPV", "Customer NPV", "EQORE NPV", "IRR", "MIRR", "Payback"
    );
    println!("{}", "-".repeat(102));
    for (name, result) in names.iter().zip(results) {
        match result {
            Ok(r) => println!(
                "{:<16} {:>14.2} {:>14.2} {:>14.2} {:>9} {:>9} {:>20}",
                name,
                r.summary.project_npv,
                r.summary.customer_npv,
                r.summary.eqore_npv,
                r.project.irr.display_pct(),
                r.project.mirr.display_pct(),
                r.project.discounted_payback.to_string(),
            ),
            Err(e) => println!("{:<16} error: {}", name, e),
        }
    }

    Ok(())
}

fn presets() -> Result<()> {
    for preset in Preset::ALL {
        println!("# {}", preset);
        println!("{}", serde_json::to_string_pretty(&preset.config())?);
    }
    Ok(())
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    let out: Box<dyn Write> = match path {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    Ok(out)
}

fn write_csv(out: Box<dyn Write>, result: &CashFlowResult) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for row in result.rows() {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_table(out: &mut dyn Write, result: &CashFlowResult) -> Result<()> {
    let s = &result.summary;

    writeln!(out, "Battery Storage Project NPV Model")?;
    writeln!(out, "=================================\n")?;
    writeln!(out, "Key Outputs:")?;
    writeln!(out, "  NPV of Electricity Savings:      ${:>14.2}", s.npv_savings)?;
    writeln!(out, "  NPV of Depreciation Tax Shield:  ${:>14.2}", s.npv_depreciation_shield)?;
    writeln!(out, "  NPV of Interest Tax Shield:      ${:>14.2}", s.npv_interest_shield)?;
    writeln!(out, "  IRA Tax Credit Today:            ${:>14.2}", s.ira_credit)?;
    writeln!(out, "  Loan Principal Drawn at t=0:     ${:>14.2}", s.loan_principal)?;
    writeln!(out, "  Down Payment at t=0:             ${:>14.2}", s.down_payment)?;
    writeln!(out, "  Annual Loan Payment:             ${:>14.2}", s.loan_payment)?;
    writeln!(out)?;

    writeln!(out, "{:<10} {:>14} {:>10} {:>10} {:>20}", "", "NPV", "IRR", "MIRR", "Disc. Payback")?;
    for (label, metrics) in [
        ("EQORE", &result.eqore),
        ("Customer", &result.customer),
        ("Project", &result.project),
    ] {
        writeln!(
            out,
            "{:<10} {:>14.2} {:>10} {:>10} {:>20}",
            label,
            metrics.npv,
            metrics.irr.display_pct(),
            metrics.mirr.display_pct(),
            metrics.discounted_payback.to_string(),
        )?;
    }
    writeln!(out)?;

    writeln!(
        out,
        "{:>4} {:>12} {:>12} {:>12} {:>12} {:>11} {:>11} {:>12} {:>13} {:>12} {:>13} {:>13}",
        "Year", "Savings", "EQORE Sav", "Cust Sav", "Deprec", "Dep Shield", "Interest",
        "Principal", "Financing CF", "EQORE CF", "Customer CF", "Total CF"
    )?;
    writeln!(out, "{}", "-".repeat(153))?;
    for row in result.rows() {
        writeln!(
            out,
            "{:>4} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>11.2} {:>11.2} {:>12.2} {:>13.2} {:>12.2} {:>13.2} {:>13.2}",
            row.year,
            row.gross_savings,
            row.eqore_savings,
            row.customer_savings,
            row.depreciation,
            row.depreciation_tax_shield,
            row.interest_paid,
            row.principal_paid,
            row.financing_cash_flow,
            row.eqore_cash_flow,
            row.customer_cash_flow,
            row.total_cash_flow,
        )?;
    }

    Ok(())
}
