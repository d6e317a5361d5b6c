use std::collections::BTreeMap;
use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tax_core::{FicaPolicy, FilingStatusCode, PolicyError, TaxBracket, TaxYearPolicy};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur when loading tax-year policy data.
#[derive(Debug, Error)]
pub enum PolicyLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("Invalid filing status code: {0}")]
    InvalidFilingStatus(String),

    #[error("No FICA constants for tax year {0}")]
    TaxYearNotFound(i32),

    #[error("FICA constants for tax year {0} appear more than once")]
    DuplicateTaxYear(i32),

    #[error("Filing status {status} appears more than once for tax year {tax_year}")]
    DuplicateFilingStatus {
        tax_year: i32,
        status: FilingStatusCode,
    },

    #[error("Invalid policy for tax year {tax_year}: {source}")]
    Policy {
        tax_year: i32,
        #[source]
        source: PolicyError,
    },
}

impl From<csv::Error> for PolicyLoaderError {
    fn from(err: csv::Error) -> Self {
        PolicyLoaderError::CsvParse(err.to_string())
    }
}

/// Maps IRS schedule codes to filing status codes.
///
/// - Schedule X → Single (S)
/// - Schedule Y-1 → Married Filing Jointly (MFJ) and Qualifying Surviving Spouse (QSS)
/// - Schedule Y-2 → Married Filing Separately (MFS)
/// - Schedule Z → Head of Household (HOH)
fn schedule_to_filing_status_codes(
    schedule: &str
) -> Result<&'static [FilingStatusCode], PolicyLoaderError> {
    use FilingStatusCode::*;

    match schedule {
        "X" => Ok(&[Single]),
        "Y-1" => Ok(&[MarriedFilingJointly, QualifyingSurvivingSpouse]),
        "Y-2" => Ok(&[MarriedFilingSeparately]),
        "Z" => Ok(&[HeadOfHousehold]),
        _ => Err(PolicyLoaderError::InvalidSchedule(schedule.to_string())),
    }
}

fn parse_filing_status(code: &str) -> Result<FilingStatusCode, PolicyLoaderError> {
    FilingStatusCode::parse(code.trim())
        .ok_or_else(|| PolicyLoaderError::InvalidFilingStatus(code.to_string()))
}

/// A single record from the FICA constants CSV file.
///
/// - `tax_year`: The tax year (e.g., 2023)
/// - `ss_wage_base`: Maximum wages subject to Social Security tax
/// - `max_ss_tax`: Largest Social Security tax one employer may withhold
/// - `regular_medicare_rate`: Employee Medicare rate (e.g., 0.0145)
/// - `additional_medicare_rate`: Additional Medicare Tax rate (e.g., 0.009)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FicaRecord {
    pub tax_year: i32,
    pub ss_wage_base: Decimal,
    pub max_ss_tax: Decimal,
    pub regular_medicare_rate: Decimal,
    pub additional_medicare_rate: Decimal,
}

/// A single record from the per-filing-status CSV file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FilingStatusRecord {
    pub tax_year: i32,
    pub filing_status: String,
    pub additional_medicare_threshold: Decimal,
    pub standard_deduction: Decimal,
}

/// A single record from the tax brackets CSV file.
///
/// The CSV format uses IRS schedule designations:
/// - `tax_year`: The tax year (e.g., 2023)
/// - `schedule`: The IRS schedule code (X, Y-1, Y-2, Z)
/// - `min_income`: The minimum income for this bracket
/// - `max_income`: The maximum income for this bracket (empty for unlimited)
/// - `base_tax`: The base tax amount for this bracket
/// - `rate`: The marginal tax rate as a decimal (e.g., 0.10 for 10%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TaxBracketRecord {
    pub tax_year: i32,
    pub schedule: String,
    pub min_income: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_income: Option<Decimal>,
    pub base_tax: Decimal,
    pub rate: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

fn parse_records<T, R>(reader: R) -> Result<Vec<T>, PolicyLoaderError>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();

    for result in csv_reader.deserialize() {
        let record: T = result?;
        records.push(record);
    }

    Ok(records)
}

/// Loader for tax-year policy tables from CSV files.
///
/// Three files make up one or more tax years: FICA constants, per filing
/// status amounts, and the IRS bracket schedules. Any of them may hold
/// several years; [`PolicyLoader::build`] picks out one.
pub struct PolicyLoader;

impl PolicyLoader {
    pub fn parse_fica<R: Read>(reader: R) -> Result<Vec<FicaRecord>, PolicyLoaderError> {
        parse_records(reader)
    }

    pub fn parse_filing_statuses<R: Read>(
        reader: R
    ) -> Result<Vec<FilingStatusRecord>, PolicyLoaderError> {
        parse_records(reader)
    }

    /// Parse tax bracket records from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file or
    /// a string slice.
    pub fn parse_brackets<R: Read>(
        reader: R
    ) -> Result<Vec<TaxBracketRecord>, PolicyLoaderError> {
        parse_records(reader)
    }

    /// Assemble and validate the policy for `tax_year`.
    ///
    /// Records for other years are ignored. Brackets are sorted by their
    /// lower bound, and schedule Y-1 is copied to both MFJ and QSS.
    ///
    /// # Errors
    ///
    /// Fails when the year has no (or more than one) FICA row, when a code
    /// is unknown, or when the assembled policy does not validate.
    pub fn build(
        tax_year: i32,
        fica: &[FicaRecord],
        statuses: &[FilingStatusRecord],
        brackets: &[TaxBracketRecord],
    ) -> Result<TaxYearPolicy, PolicyLoaderError> {
        let mut fica_rows = fica.iter().filter(|r| r.tax_year == tax_year);
        let fica_row = fica_rows
            .next()
            .ok_or(PolicyLoaderError::TaxYearNotFound(tax_year))?;
        if fica_rows.next().is_some() {
            return Err(PolicyLoaderError::DuplicateTaxYear(tax_year));
        }

        let mut thresholds = BTreeMap::new();
        let mut standard_deductions = BTreeMap::new();
        for record in statuses.iter().filter(|r| r.tax_year == tax_year) {
            let status = parse_filing_status(&record.filing_status)?;
            if thresholds
                .insert(status, record.additional_medicare_threshold)
                .is_some()
            {
                return Err(PolicyLoaderError::DuplicateFilingStatus { tax_year, status });
            }
            standard_deductions.insert(status, record.standard_deduction);
        }

        let mut tax_brackets: BTreeMap<FilingStatusCode, Vec<TaxBracket>> = BTreeMap::new();
        for record in brackets.iter().filter(|r| r.tax_year == tax_year) {
            for &status in schedule_to_filing_status_codes(&record.schedule)? {
                tax_brackets.entry(status).or_default().push(TaxBracket {
                    min_income: record.min_income,
                    max_income: record.max_income,
                    tax_rate: record.rate,
                    base_tax: record.base_tax,
                });
            }
        }
        for schedule in tax_brackets.values_mut() {
            schedule.sort_by_key(|b| b.min_income);
        }

        let policy = TaxYearPolicy {
            tax_year,
            fica: FicaPolicy::with_thresholds(
                fica_row.ss_wage_base,
                fica_row.max_ss_tax,
                fica_row.regular_medicare_rate,
                fica_row.additional_medicare_rate,
                thresholds,
            ),
            standard_deductions,
            tax_brackets,
        };

        policy
            .validate()
            .map_err(|source| PolicyLoaderError::Policy { tax_year, source })?;

        debug!(
            tax_year,
            statuses = policy.standard_deductions.len(),
            "assembled tax year policy"
        );
        info!(tax_year, "tax year policy validated");

        Ok(policy)
    }
}
