use backing_bytes::{BackingError, ErrorKind};
use blob_dataset::BlobError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PackedError {
    #[error("packed dataset of {len} bytes exceeds the {limit}-byte limit")]
    TooLarge { len: usize, limit: usize },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("packed dataset protobuf format error: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("packed dataset format version mismatch: expected {expected}, actual {actual}")]
    FormatVersion { expected: u32, actual: u32 },

    #[error("{field} value {value} does not fit in 16 bits")]
    ValueOutOfRange { field: &'static str, value: u32 },

    #[error("range table {table} uses the reserved bound 0xFFFF as a lower bound")]
    SentinelRange { table: usize },

    #[error("nested dataset: {0}")]
    Blob(#[from] BlobError),

    #[error("backing error: {0}")]
    Backing(#[from] BackingError),
}

impl PackedError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PackedError::TooLarge { .. } => ErrorKind::Resource,
            PackedError::Io(e) => match e.kind() {
                io::ErrorKind::InvalidData
                | io::ErrorKind::InvalidInput
                | io::ErrorKind::UnexpectedEof => ErrorKind::Format,
                _ => ErrorKind::Resource,
            },
            PackedError::Blob(e) => e.kind(),
            PackedError::Backing(e) => e.kind(),
            _ => ErrorKind::Format,
        }
    }
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("no packed dataset path configured")]
    MissingDatasetPath,

    #[error("invalid {var} value {value:?}")]
    InvalidLimit { var: &'static str, value: String },

    #[error("failed to load packed dataset {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: PackedError,
    },
}

impl RegistryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::MissingDatasetPath | RegistryError::InvalidLimit { .. } => {
                ErrorKind::Configuration
            }
            RegistryError::Load { source, .. } => source.kind(),
        }
    }
}
