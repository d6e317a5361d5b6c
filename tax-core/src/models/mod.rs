mod fica_policy;
mod filing_status;
mod tax_bracket;
mod tax_year_policy;
mod w2;

pub use fica_policy::FicaPolicy;
pub use filing_status::FilingStatusCode;
pub use tax_bracket::TaxBracket;
pub use tax_year_policy::{PolicyError, TaxYearPolicy};
pub use w2::W2;
