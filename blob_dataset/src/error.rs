use backing_bytes::{BackingError, ErrorKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlobError {
    #[error("dataset image too short: need at least {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },

    #[error("broken dataset: magic mismatch (expected \"{expected}\", found \"{actual}\")")]
    MagicMismatch { expected: String, actual: String },

    #[error("unsupported dataset layout: expected {expected} sections, found {found}")]
    SectionCount { expected: usize, found: usize },

    #[error("section {section} at {start}..{end} lies outside the {len}-byte image")]
    SectionOutOfBounds {
        section: &'static str,
        start: usize,
        end: usize,
        len: usize,
    },

    #[error("section {section} has {len} bytes, not a whole number of {element_size}-byte elements")]
    BadSectionLength {
        section: &'static str,
        len: usize,
        element_size: usize,
    },

    #[error("section {section} at offset {offset} is not aligned to {align} bytes")]
    Misaligned {
        section: &'static str,
        offset: usize,
        align: usize,
    },

    #[error("dataset image of {len} bytes does not fit 32-bit section offsets")]
    ImageTooLarge { len: usize },

    #[error("backing error: {0}")]
    Backing(#[from] BackingError),
}

impl BlobError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BlobError::Backing(e) => e.kind(),
            BlobError::ImageTooLarge { .. } => ErrorKind::Resource,
            _ => ErrorKind::Format,
        }
    }
}
