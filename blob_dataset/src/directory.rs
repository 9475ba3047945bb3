use crate::{BlobError, SectionId, SectionKind};
use backing_bytes::{BackingError, bytes_at, cast_at};
use bytemuck::PodCastError;
use bytemuck_derive::{Pod, Zeroable};
use core::ops::Range;
use log::{debug, error};

/// Directory header following the magic tag. Fields are little-endian.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct DirectoryHeader {
    pub section_count: u32,
    pub reserved: u32,
}

impl DirectoryHeader {
    pub const SIZE: usize = core::mem::size_of::<DirectoryHeader>();
}

/// One directory entry. Fields are little-endian; `offset` is absolute.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct SectionEntry {
    pub offset: u32,
    pub length: u32,
}

impl SectionEntry {
    pub const SIZE: usize = core::mem::size_of::<SectionEntry>();
}

/// Validated byte ranges of every section in one image.
///
/// Produced once by [`SectionTable::parse`]; the ranges are only valid for
/// the exact buffer they were parsed from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionTable {
    ranges: [Range<usize>; SectionId::COUNT],
}

impl SectionTable {
    /// Checks the magic tag and binds every section of `buf`.
    ///
    /// Typed sections are checked for length and memory alignment here so
    /// that accessors can cast without failing later.
    pub fn parse(buf: &[u8], expected_magic: &[u8]) -> Result<Self, BlobError> {
        let header_end = expected_magic.len() + DirectoryHeader::SIZE;
        if buf.len() < header_end {
            return Err(BlobError::TooShort {
                needed: header_end,
                actual: buf.len(),
            });
        }

        let actual_magic = &buf[..expected_magic.len()];
        if actual_magic != expected_magic {
            let expected = expected_magic.escape_ascii().to_string();
            let actual = actual_magic.escape_ascii().to_string();
            error!("broken dataset: expected magic \"{}\", found \"{}\"", expected, actual);
            return Err(BlobError::MagicMismatch { expected, actual });
        }

        let header: DirectoryHeader =
            bytemuck::pod_read_unaligned(&buf[expected_magic.len()..header_end]);
        let found = u32::from_le(header.section_count) as usize;
        if found != SectionId::COUNT {
            return Err(BlobError::SectionCount {
                expected: SectionId::COUNT,
                found,
            });
        }

        let directory_end = header_end + SectionId::COUNT * SectionEntry::SIZE;
        if buf.len() < directory_end {
            return Err(BlobError::TooShort {
                needed: directory_end,
                actual: buf.len(),
            });
        }

        let mut ranges: [Range<usize>; SectionId::COUNT] = core::array::from_fn(|_| 0..0);
        for id in SectionId::ALL {
            let at = header_end + id.index() * SectionEntry::SIZE;
            let entry: SectionEntry = bytemuck::pod_read_unaligned(&buf[at..at + SectionEntry::SIZE]);
            let start = u32::from_le(entry.offset) as usize;
            let end = start.saturating_add(u32::from_le(entry.length) as usize);

            check_section(buf, id, start..end).map_err(|e| section_error(id, e))?;
            debug!("bound section {} to {}..{}", id.name(), start, end);
            ranges[id.index()] = start..end;
        }

        Ok(SectionTable { ranges })
    }

    /// Validated byte range of `id`.
    #[inline]
    pub fn range(&self, id: SectionId) -> Range<usize> {
        self.ranges[id.index()].clone()
    }
}

fn check_section(buf: &[u8], id: SectionId, range: Range<usize>) -> Result<(), BlobError> {
    match id.kind() {
        SectionKind::Bytes => {
            bytes_at(buf, range)?;
        }
        SectionKind::U16Array => {
            cast_at::<u16>(buf, range)?;
        }
        SectionKind::U32Array => {
            cast_at::<u32>(buf, range)?;
        }
        SectionKind::SizeInfo => {
            let len = range.len();
            if cast_at::<u32>(buf, range)?.len() != 2 {
                return Err(BlobError::BadSectionLength {
                    section: id.name(),
                    len,
                    element_size: 2 * SectionKind::SizeInfo.element_size(),
                });
            }
        }
    }
    Ok(())
}

/// Attaches the section name to low-level view errors.
fn section_error(id: SectionId, err: BlobError) -> BlobError {
    let section = id.name();
    match err {
        BlobError::Backing(BackingError::OutOfBounds { start, end, len }) => {
            BlobError::SectionOutOfBounds {
                section,
                start,
                end,
                len,
            }
        }
        BlobError::Backing(BackingError::Cast {
            reason: PodCastError::TargetAlignmentGreaterAndInputNotAligned,
            offset,
            ..
        }) => BlobError::Misaligned {
            section,
            offset,
            align: id.kind().element_size(),
        },
        BlobError::Backing(BackingError::Cast { len, .. }) => BlobError::BadSectionLength {
            section,
            len,
            element_size: id.kind().element_size(),
        },
        other => other,
    }
}
