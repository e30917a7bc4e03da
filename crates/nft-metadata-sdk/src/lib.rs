mod config;
mod metadata_compiler;
mod record;

pub use config::*;
pub use metadata_compiler::*;
pub use record::*;

// Re-export the sheet layout so callers only need one crate
pub use nft_metadata_csvs::{Column, CsvError, RawRow};
