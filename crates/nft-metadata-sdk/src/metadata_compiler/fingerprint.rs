use super::{CompilerError, CompilerResult};
use crate::record::Record;
use sha2::{Digest, Sha256};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Lowercase hex SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// True when `name` is a single, non-empty path component, so
/// `<output_dir>/<name>.json` stays inside `output_dir`.
pub fn is_document_filename(name: &str) -> bool {
    !name.is_empty() && Path::new(name).file_name() == Some(OsStr::new(name))
}

/// Writes record documents into one output directory and fingerprints them.
#[derive(Debug, Clone)]
pub struct FingerprintEmitter {
    output_dir: PathBuf,
}

impl FingerprintEmitter {
    /// Create `output_dir` (and any missing parents) if needed.
    ///
    /// An existing directory is reused as is.
    pub fn prepare(output_dir: impl Into<PathBuf>) -> CompilerResult<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).map_err(|source| CompilerError::CreateOutputDir {
            path: output_dir.clone(),
            source,
        })?;

        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Where the document for `target_filename` lives.
    pub fn document_path(&self, target_filename: &str) -> PathBuf {
        self.output_dir.join(format!("{target_filename}.json"))
    }

    /// Serialize `record`, write it to `<output_dir>/<target_filename>.json`
    /// and return the hex SHA-256 of exactly the bytes written.
    pub fn emit(&self, record: &Record, target_filename: &str) -> CompilerResult<String> {
        if !is_document_filename(target_filename) {
            return Err(CompilerError::InvalidDocumentName(
                target_filename.to_string(),
            ));
        }

        let bytes = record
            .to_canonical_json()
            .map_err(|source| CompilerError::Serialize {
                filename: target_filename.to_string(),
                source,
            })?;

        let path = self.document_path(target_filename);
        fs::write(&path, &bytes).map_err(|source| CompilerError::WriteDocument {
            path: path.clone(),
            source,
        })?;

        let sha256 = sha256_hex(&bytes);
        debug!("Wrote {} ({} bytes, sha256 {})", path.display(), bytes.len(), sha256);

        Ok(sha256)
    }
}
