//! Zero-copy views into a backing image.
//!
//! These helpers are the only place raw offsets turn into slices. Callers
//! validate a range once, keep the `Range<usize>`, and re-slice cheaply later.
//!
//! # Examples
//!
//! ```
//! use backing_bytes::{bytes_at, cast_at, is_subslice};
//!
//! let words: [u16; 4] = [1, 2, 3, 4];
//! let image: &[u8] = bytemuck::cast_slice(&words);
//!
//! let tail = bytes_at(image, 4..8).unwrap();
//! assert!(is_subslice(image, tail));
//!
//! let typed: &[u16] = cast_at(image, 4..8).unwrap();
//! assert_eq!(typed, &[3, 4]);
//! ```
use crate::BackingError;
use bytemuck::Pod;
use core::ops::Range;

/// Returns the bytes in `range`, or `OutOfBounds` if it does not fit.
///
/// # Examples
///
/// ```
/// use backing_bytes::bytes_at;
///
/// let image = b"magicpayload";
/// assert_eq!(bytes_at(image, 5..12).unwrap(), b"payload");
/// assert!(bytes_at(image, 5..13).is_err());
/// ```
#[inline]
pub fn bytes_at(buf: &[u8], range: Range<usize>) -> Result<&[u8], BackingError> {
    if range.start > range.end || range.end > buf.len() {
        return Err(BackingError::OutOfBounds {
            start: range.start,
            end: range.end,
            len: buf.len(),
        });
    }
    Ok(&buf[range])
}

/// Reinterprets the bytes in `range` as a slice of `T` without copying.
///
/// The range must fit, its length must be a multiple of `size_of::<T>()`,
/// and its first byte must be aligned for `T` in memory. Values are read in
/// native byte order.
///
/// # Examples
///
/// ```
/// use backing_bytes::{cast_at, BackingError};
///
/// let ids: [u32; 3] = [10, 20, 30];
/// let image: &[u8] = bytemuck::cast_slice(&ids);
///
/// assert_eq!(cast_at::<u32>(image, 4..12).unwrap(), &[20, 30]);
/// assert!(matches!(cast_at::<u32>(image, 0..6), Err(BackingError::Cast { .. })));
/// ```
pub fn cast_at<T: Pod>(buf: &[u8], range: Range<usize>) -> Result<&[T], BackingError> {
    let offset = range.start;
    let bytes = bytes_at(buf, range)?;
    bytemuck::try_cast_slice::<u8, T>(bytes).map_err(|reason| BackingError::Cast {
        offset,
        len: bytes.len(),
        type_name: core::any::type_name::<T>(),
        reason,
    })
}

/// Returns `true` when `inner` lies entirely inside `outer` (by address).
///
/// An empty `inner` counts when it points anywhere within or just past
/// `outer`.
pub fn is_subslice(outer: &[u8], inner: &[u8]) -> bool {
    let outer = outer.as_ptr_range();
    let inner = inner.as_ptr_range();
    outer.start <= inner.start && inner.end <= outer.end
}
