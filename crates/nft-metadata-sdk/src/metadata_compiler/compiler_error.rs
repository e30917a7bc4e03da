use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CompilerError {
    #[error(transparent)]
    Csv(#[from] nft_metadata_csvs::CsvError),

    #[error("Could not create output directory {}: {source}", path.display())]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not write document {}: {source}", path.display())]
    WriteDocument {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not serialize record for {filename}: {source}")]
    Serialize {
        filename: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Document name {0:?} is not a plain file name")]
    InvalidDocumentName(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type CompilerResult<T> = std::result::Result<T, CompilerError>;
