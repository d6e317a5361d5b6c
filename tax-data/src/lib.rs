pub mod loader;
pub mod logging;

pub use loader::{
    FicaRecord, FilingStatusRecord, PolicyLoader, PolicyLoaderError, TaxBracketRecord,
};
