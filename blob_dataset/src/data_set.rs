use crate::{BlobError, DataManager, SectionId, SectionKind, SectionTable};
use backing_bytes::Backing;
use log::info;

/// A decoded image: the backing buffer plus its validated section table.
///
/// Decoding is all-or-nothing. There is no way to re-initialize a `DataSet`
/// in place; decoding another image produces a new value, and a failed
/// decode leaves any existing value untouched.
#[derive(Debug)]
pub struct DataSet {
    backing: Backing,
    sections: SectionTable,
}

impl DataSet {
    /// Validates `backing` against `expected_magic` and binds every section.
    pub fn decode(backing: Backing, expected_magic: &[u8]) -> Result<Self, BlobError> {
        let sections = SectionTable::parse(backing.as_bytes(), expected_magic)?;
        info!(
            "decoded {}-byte {} dataset image ({} sections)",
            backing.len(),
            backing.kind(),
            SectionId::COUNT
        );
        Ok(DataSet { backing, sections })
    }

    /// Decodes an image compiled into the binary.
    pub fn from_static(image: &'static [u8], expected_magic: &[u8]) -> Result<Self, BlobError> {
        Self::decode(Backing::Static(image), expected_magic)
    }

    /// Raw bytes of one section.
    #[inline]
    pub fn section(&self, id: SectionId) -> &[u8] {
        &self.backing.as_bytes()[self.sections.range(id)]
    }

    /// Every section in directory order.
    pub fn sections(&self) -> impl Iterator<Item = (SectionId, &[u8])> + '_ {
        SectionId::ALL.into_iter().map(move |id| (id, self.section(id)))
    }

    pub fn backing(&self) -> &Backing {
        &self.backing
    }

    pub fn section_table(&self) -> &SectionTable {
        &self.sections
    }

    // Length and alignment were checked by `SectionTable::parse` against the
    // backing's address, and the backing never moves its bytes, so these
    // casts cannot fail. Owned payloads of unknown alignment should go
    // through `Backing::owned_aligned` first or they may be rejected as
    // misaligned.
    pub(crate) fn u16_section(&self, id: SectionId) -> &[u16] {
        debug_assert_eq!(id.kind(), SectionKind::U16Array);
        bytemuck::cast_slice(self.section(id))
    }

    pub(crate) fn u32_section(&self, id: SectionId) -> &[u32] {
        debug_assert!(matches!(id.kind(), SectionKind::U32Array | SectionKind::SizeInfo));
        bytemuck::cast_slice(self.section(id))
    }
}

impl DataManager for DataSet {
    fn data_set(&self) -> &DataSet {
        self
    }
}
