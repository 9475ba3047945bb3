#[cfg(feature = "std")]
use thiserror::Error;

/// Broad classes of dataset loading failures.
///
/// `Format` is bad or incompatible data, `Resource` is a file or size
/// problem, `Configuration` is a missing or invalid setting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Format,
    Resource,
    Configuration,
}

/// Backing buffer errors
#[cfg_attr(feature = "std", derive(Error))]
#[derive(Debug)]
pub enum BackingError {
    /// IO error while opening or mapping a file
    #[cfg(feature = "std")]
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Requested range does not fit in the buffer
    #[cfg_attr(
        feature = "std",
        error("range {start}..{end} out of bounds for buffer of {len} bytes")
    )]
    OutOfBounds { start: usize, end: usize, len: usize },

    /// Range cannot be reinterpreted as a slice of the element type
    #[cfg_attr(
        feature = "std",
        error("cannot view {len} bytes at offset {offset} as [{type_name}]: {reason:?}")
    )]
    Cast {
        offset: usize,
        len: usize,
        type_name: &'static str,
        reason: bytemuck::PodCastError,
    },
}

impl BackingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            #[cfg(feature = "std")]
            BackingError::Io(_) => ErrorKind::Resource,
            BackingError::OutOfBounds { .. } | BackingError::Cast { .. } => ErrorKind::Format,
        }
    }
}

#[cfg(not(feature = "std"))]
impl core::fmt::Display for BackingError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BackingError::OutOfBounds { start, end, len } => write!(
                f,
                "range {}..{} out of bounds for buffer of {} bytes",
                start, end, len
            ),
            BackingError::Cast {
                offset,
                len,
                type_name,
                reason,
            } => write!(
                f,
                "cannot view {} bytes at offset {} as [{}]: {:?}",
                len, offset, type_name, reason
            ),
        }
    }
}
