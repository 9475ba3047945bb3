//! Builds images in the sectioned format.

use crate::directory::{DirectoryHeader, SectionEntry};
use crate::{BlobError, SectionId};
use std::io::{self, Write};

/// Every payload starts on this boundary, measured from the image start.
pub const SECTION_ALIGNMENT: usize = 8;

/// Collects section payloads and lays them out as one image.
///
/// Sections that are never added are written empty, except the segmenter
/// size info which defaults to two zero counts.
#[derive(Clone, Debug)]
pub struct DataSetWriter {
    magic: Vec<u8>,
    sections: [Vec<u8>; SectionId::COUNT],
}

impl DataSetWriter {
    pub fn new(magic: &[u8]) -> Self {
        let mut writer = DataSetWriter {
            magic: magic.to_vec(),
            sections: core::array::from_fn(|_| Vec::new()),
        };
        writer.set_segmenter_size(0, 0);
        writer
    }

    /// Sets the raw bytes of a section, replacing earlier content.
    pub fn add(&mut self, id: SectionId, bytes: &[u8]) -> &mut Self {
        self.sections[id.index()] = bytes.to_vec();
        self
    }

    /// Stores `values` in native byte order.
    pub fn add_u16(&mut self, id: SectionId, values: &[u16]) -> &mut Self {
        self.add(id, bytemuck::cast_slice(values))
    }

    /// Stores `values` in native byte order.
    pub fn add_u32(&mut self, id: SectionId, values: &[u32]) -> &mut Self {
        self.add(id, bytemuck::cast_slice(values))
    }

    pub fn set_segmenter_size(&mut self, l_num_elements: u32, r_num_elements: u32) -> &mut Self {
        self.add_u32(SectionId::SegmenterSizeInfo, &[l_num_elements, r_num_elements])
    }

    /// Lays out the image in memory.
    pub fn build(&self) -> Result<Vec<u8>, BlobError> {
        let header_end = self.magic.len() + DirectoryHeader::SIZE;
        let directory_end = header_end + SectionId::COUNT * SectionEntry::SIZE;

        let mut entries = Vec::with_capacity(SectionId::COUNT);
        let mut pos = directory_end.next_multiple_of(SECTION_ALIGNMENT);
        for payload in &self.sections {
            entries.push((pos, payload.len()));
            pos = (pos + payload.len()).next_multiple_of(SECTION_ALIGNMENT);
        }
        if pos > u32::MAX as usize {
            return Err(BlobError::ImageTooLarge { len: pos });
        }

        let mut image = Vec::with_capacity(pos);
        image.extend_from_slice(&self.magic);
        let header = DirectoryHeader {
            section_count: (SectionId::COUNT as u32).to_le(),
            reserved: 0,
        };
        image.extend_from_slice(bytemuck::bytes_of(&header));
        for &(offset, length) in &entries {
            let entry = SectionEntry {
                offset: (offset as u32).to_le(),
                length: (length as u32).to_le(),
            };
            image.extend_from_slice(bytemuck::bytes_of(&entry));
        }
        for ((offset, _), payload) in entries.iter().zip(&self.sections) {
            image.resize(*offset, 0);
            image.extend_from_slice(payload);
        }
        image.resize(pos, 0);
        Ok(image)
    }

    /// Builds the image and writes it to `writer`.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let image = self
            .build()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        writer.write_all(&image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SectionTable;

    #[test]
    fn payloads_are_aligned() {
        let mut writer = DataSetWriter::new(b"odd");
        writer
            .add(SectionId::Connector, b"x")
            .add_u16(SectionId::Boundary, &[1, 2, 3])
            .add_u32(SectionId::SuffixToken, &[4]);
        let image = writer.build().unwrap();
        let table = SectionTable::parse(&image, b"odd").unwrap();

        for id in SectionId::ALL {
            assert_eq!(table.range(id).start % SECTION_ALIGNMENT, 0, "{}", id.name());
        }
        assert_eq!(image.len() % SECTION_ALIGNMENT, 0);
    }

    #[test]
    fn empty_writer_still_decodes() {
        let image = DataSetWriter::new(b"M").build().unwrap();
        let table = SectionTable::parse(&image, b"M").unwrap();
        for id in SectionId::ALL {
            if id == SectionId::SegmenterSizeInfo {
                assert_eq!(table.range(id).len(), 8);
            } else {
                assert!(table.range(id).is_empty());
            }
        }
    }

    #[test]
    fn write_to_matches_build() {
        let mut writer = DataSetWriter::new(b"M");
        writer.add(SectionId::PosGroup, &[1, 2, 3]);

        let mut out = Vec::new();
        writer.write_to(&mut out).unwrap();
        assert_eq!(out, writer.build().unwrap());
    }
}
