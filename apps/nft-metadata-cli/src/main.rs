use clap::{Parser, ValueEnum};
use nft_metadata_sdk::{compile_metadata_file, SchemaVariant};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

mod config;
mod error;
mod logging;

use config::{resolve_config, ConfigOverrides};
use error::CliResult;

#[derive(Parser, Debug)]
#[command(name = "nft-metadata")]
#[command(about = "Compile an NFT metadata sheet into CHIP-0007 documents and SHA-256 fingerprints")]
#[command(version)]
struct Cli {
    /// Metadata sheet to compile
    #[arg(long = "csv", default_value = "hngi9-csv-file.csv")]
    csv: PathBuf,

    /// Directory for the per-item JSON documents [default: nft-jsons]
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Document schema to emit [default: collection]
    #[arg(short, long, value_enum)]
    schema: Option<SchemaArg>,

    /// YAML file with compiler settings (flags take precedence)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log every skipped row and written document
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SchemaArg {
    Chip0007,
    Collection,
}

impl From<SchemaArg> for SchemaVariant {
    fn from(arg: SchemaArg) -> Self {
        match arg {
            SchemaArg::Chip0007 => SchemaVariant::Chip0007,
            SchemaArg::Collection => SchemaVariant::Collection,
        }
    }
}

/// Accept the single-dash `-csv` spelling of `--csv`.
///
/// clap would otherwise read `-csv` as `-c sv`, i.e. a config path. Arguments
/// after a bare `--` are left alone.
fn normalize_args(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    let mut after_separator = false;
    args.into_iter()
        .map(|arg| {
            if after_separator {
                return arg;
            }
            match arg.to_str() {
                Some("--") => {
                    after_separator = true;
                    arg
                }
                Some("-csv") => OsString::from("--csv"),
                Some(s) if s.starts_with("-csv=") => OsString::from(format!("-{s}")),
                _ => arg,
            }
        })
        .collect()
}

fn main() -> ExitCode {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));
    logging::init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let config = resolve_config(
        cli.config.as_deref(),
        ConfigOverrides {
            output_dir: cli.output_dir,
            schema: cli.schema.map(Into::into),
        },
    )?;

    info!("Compiling {}", cli.csv.display());
    info!("Schema: {:?}", config.schema);
    info!("Output directory: {}", config.output_dir.display());

    let (output_csv, result) = compile_metadata_file(&cli.csv, &config)?;

    info!(
        "Wrote {} documents, {} rows skipped",
        result.summary.records,
        result.summary.skipped_rows()
    );
    info!("Annotated sheet saved to: {}", output_csv.display());

    Ok(())
}
