/*!
# Metadata Compiler

Single pass over a metadata sheet:

- Row 0 gets the hash header label appended
- Team-name rows update the carried minting tool
- Item rows are normalized, written to `<output_dir>/<filename>.json` and
  fingerprinted; the hex digest is appended to the source row
- Rows that fail validation or series-number parsing are left untouched

Rows are processed strictly in order since the minting tool carries forward.
*/

mod compiler_error;
mod fingerprint;
mod normalizer;

use crate::{config::CompilerConfig, record::CompiledRecord};
use nft_metadata_csvs::{output_csv_path, read_metadata_csv, write_metadata_csv, Column, RawRow};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub use {
    compiler_error::{CompilerError, CompilerResult},
    fingerprint::{is_document_filename, sha256_hex, FingerprintEmitter},
    normalizer::{parse_attributes, MintingTool, RowNormalizer, RowOutcome, SkipReason},
};

/// Row counts for one compile run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompilationSummary {
    pub header_rows: usize,
    pub team_rows: usize,
    pub missing_required_field: usize,
    pub invalid_filename: usize,
    pub invalid_series_number: usize,
    pub duplicate_filename: usize,
    pub records: usize,
}

impl CompilationSummary {
    pub fn skipped_rows(&self) -> usize {
        self.missing_required_field
            + self.invalid_filename
            + self.invalid_series_number
            + self.duplicate_filename
    }

    fn record_skip(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::MissingRequiredField => self.missing_required_field += 1,
            SkipReason::InvalidFilename => self.invalid_filename += 1,
            SkipReason::InvalidSeriesNumber => self.invalid_series_number += 1,
            SkipReason::DuplicateFilename => self.duplicate_filename += 1,
        }
    }
}

/// Everything a compile run produced besides the documents on disk.
#[derive(Debug, Clone)]
pub struct CompilationResult {
    /// Source rows, with the header label or fingerprint appended where due
    pub rows: Vec<RawRow>,
    /// Records in sheet order, each with its fingerprint
    pub records: Vec<CompiledRecord>,
    pub summary: CompilationSummary,
}

/// Compile `rows` (header first) into documents under `config.output_dir`.
///
/// The output directory is created once before the first row. Any failure to
/// create it or to write a document aborts the run; rows already written stay
/// on disk. A filename is written at most once per run: later rows reusing it
/// are skipped so every fingerprint in the sheet matches its document.
pub fn compile_metadata(
    rows: Vec<RawRow>,
    config: &CompilerConfig,
) -> CompilerResult<CompilationResult> {
    config.validate()?;

    let emitter = FingerprintEmitter::prepare(&config.output_dir)?;
    let normalizer = RowNormalizer::new(config);
    let mut minting_tool = MintingTool::default();

    let mut summary = CompilationSummary::default();
    let mut records = Vec::new();
    let mut emitted_filenames = HashSet::new();
    let mut output_rows = Vec::with_capacity(rows.len());

    for (row_index, mut row) in rows.into_iter().enumerate() {
        match normalizer.normalize(&row, row_index, &mut minting_tool) {
            RowOutcome::Header => {
                let mismatches = row.header_mismatches();
                if !mismatches.is_empty() {
                    warn!(
                        "Header does not match the expected layout at {:?}; reading columns by position",
                        mismatches
                    );
                }
                row.push(config.schema.hash_header());
                summary.header_rows += 1;
            }
            RowOutcome::TeamName => {
                debug!("Row {}: minting tool is now {:?}", row_index, minting_tool.as_str());
                summary.team_rows += 1;
            }
            RowOutcome::Skipped(reason) => {
                debug!("Row {}: skipped ({:?})", row_index, reason);
                summary.record_skip(reason);
            }
            RowOutcome::Record(record) => {
                let filename = row.trimmed(Column::Filename).to_string();
                if !emitted_filenames.insert(filename.clone()) {
                    warn!(
                        "Row {}: {}.json already written by an earlier row; skipped",
                        row_index, filename
                    );
                    summary.record_skip(SkipReason::DuplicateFilename);
                    output_rows.push(row);
                    continue;
                }
                let sha256 = emitter.emit(&record, &filename)?;
                row.push(sha256.clone());
                records.push(CompiledRecord {
                    filename,
                    record,
                    sha256,
                });
                summary.records += 1;
            }
        }
        output_rows.push(row);
    }

    info!(
        "Compiled {} records into {} ({} team rows, {} skipped)",
        summary.records,
        emitter.output_dir().display(),
        summary.team_rows,
        summary.skipped_rows()
    );

    Ok(CompilationResult {
        rows: output_rows,
        records,
        summary,
    })
}

/// Read the sheet at `input`, compile it, and write the annotated sheet next
/// to it as `<stem>.output.csv`.
///
/// The input is read before anything is created, so an unreadable sheet
/// leaves no output directory or annotated sheet behind.
pub fn compile_metadata_file(
    input: &Path,
    config: &CompilerConfig,
) -> CompilerResult<(PathBuf, CompilationResult)> {
    let rows = read_metadata_csv(input)?;
    let output_csv = output_csv_path(input)?;
    debug!("Read {} rows from {}", rows.len(), input.display());

    let result = compile_metadata(rows, config)?;
    write_metadata_csv(&output_csv, &result.rows)?;

    Ok((output_csv, result))
}
