use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tax_core::{FilingStatusCode, TaxYearPolicy};
use tax_data::{PolicyLoader, logging};
use tracing::info;

/// Load one tax year's policy tables from CSV files and validate them.
///
/// Three CSV files are read:
/// - FICA constants: tax_year, ss_wage_base, max_ss_tax,
///   regular_medicare_rate, additional_medicare_rate
/// - Per filing status: tax_year, filing_status (S, MFJ, MFS, HOH, QSS),
///   additional_medicare_threshold, standard_deduction
/// - Tax brackets: tax_year, schedule (X, Y-1, Y-2, Z), min_income,
///   max_income (empty for unlimited), base_tax, rate
#[derive(Parser, Debug)]
#[command(name = "tax-policy-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Tax year to assemble
    #[arg(short = 'y', long)]
    tax_year: i32,

    /// Path to the FICA constants CSV file
    #[arg(long)]
    fica: PathBuf,

    /// Path to the per filing status CSV file
    #[arg(long)]
    filing_status: PathBuf,

    /// Path to the tax brackets CSV file
    #[arg(long)]
    brackets: PathBuf,

    /// Log filter (e.g. "debug"); overrides RUST_LOG
    #[arg(long)]
    log_level: Option<String>,
}

fn open(path: &Path) -> Result<File> {
    File::open(path).with_context(|| format!("Failed to open: {}", path.display()))
}

fn print_summary(policy: &TaxYearPolicy) {
    let fica = &policy.fica;

    println!("Tax year {}", policy.tax_year);
    println!("  Social Security wage base:  {}", fica.ss_wage_base);
    println!("  Maximum Social Security tax: {}", fica.max_ss_tax);
    println!("  Medicare rate:              {}", fica.regular_medicare_tax_rate);
    println!("  Additional Medicare rate:   {}", fica.additional_medicare_tax_rate);
    println!();
    println!(
        "  {:<4} {:>12} {:>12} {:>8} {:>8}",
        "", "Threshold", "Std. ded.", "Brackets", "Top rate"
    );

    for status in FilingStatusCode::ALL {
        let brackets = policy.brackets(status).unwrap_or_default();
        let top_rate = brackets
            .last()
            .map(|b| b.tax_rate.to_string())
            .unwrap_or_default();
        println!(
            "  {:<4} {:>12} {:>12} {:>8} {:>8}",
            status.as_str(),
            fica.additional_medicare_threshold(status)
                .map(|t| t.to_string())
                .unwrap_or_default(),
            policy
                .standard_deduction(status)
                .map(|d| d.to_string())
                .unwrap_or_default(),
            brackets.len(),
            top_rate,
        );
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_default_logging();
    if let Some(level) = &args.log_level {
        logging::set_log_level(level)?;
    }

    info!(path = %args.fica.display(), "loading FICA constants");
    let fica = PolicyLoader::parse_fica(open(&args.fica)?)
        .with_context(|| format!("Failed to parse CSV: {}", args.fica.display()))?;

    info!(path = %args.filing_status.display(), "loading filing status amounts");
    let statuses = PolicyLoader::parse_filing_statuses(open(&args.filing_status)?)
        .with_context(|| format!("Failed to parse CSV: {}", args.filing_status.display()))?;

    info!(path = %args.brackets.display(), "loading tax brackets");
    let brackets = PolicyLoader::parse_brackets(open(&args.brackets)?)
        .with_context(|| format!("Failed to parse CSV: {}", args.brackets.display()))?;

    let policy = PolicyLoader::build(args.tax_year, &fica, &statuses, &brackets)
        .with_context(|| format!("Tax year {} did not load", args.tax_year))?;

    print_summary(&policy);

    Ok(())
}
