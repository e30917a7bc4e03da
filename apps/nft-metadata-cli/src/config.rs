use crate::error::{CliError, CliResult};
use nft_metadata_sdk::{CompilerConfig, SchemaVariant};
use std::fs;
use std::path::{Path, PathBuf};

/// Flag values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub output_dir: Option<PathBuf>,
    pub schema: Option<SchemaVariant>,
}

/// Load the compiler config from an optional YAML file, then apply flags.
///
/// Keys missing from the file keep their defaults.
pub fn resolve_config(
    config_file: Option<&Path>,
    overrides: ConfigOverrides,
) -> CliResult<CompilerConfig> {
    let mut config = match config_file {
        Some(path) => load_config_file(path)?,
        None => CompilerConfig::default(),
    };

    if let Some(output_dir) = overrides.output_dir {
        config.output_dir = output_dir;
    }
    if let Some(schema) = overrides.schema {
        config.schema = schema;
    }

    Ok(config)
}

fn load_config_file(path: &Path) -> CliResult<CompilerConfig> {
    let contents = fs::read_to_string(path).map_err(|source| CliError::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_yaml::from_str(&contents)?)
}
