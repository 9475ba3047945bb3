//! Images compiled into the binary.
//!
//! Each platform build supplies one [`PlatformData`]: its image and its
//! magic tag. [`EmbeddedDataManager`] is the same type on every platform.
//!
//! ```rust,ignore
//! static IMAGE: AlignedImage<{ include_bytes!("data.bin").len() }> =
//!     AlignedImage(*include_bytes!("data.bin"));
//!
//! static PLATFORM: PlatformData = PlatformData {
//!     name: "desktop",
//!     image: IMAGE.as_bytes(),
//!     magic: b"\xEFMOZC\x0D\x0A",
//! };
//!
//! let manager = EmbeddedDataManager::new(&PLATFORM)?;
//! ```

use crate::{BlobError, DataManager, DataSet};
use log::error;

/// Wrapper that gives an embedded image the alignment typed sections need.
///
/// `include_bytes!` alone only guarantees byte alignment.
#[repr(C, align(8))]
pub struct AlignedImage<const N: usize>(pub [u8; N]);

impl<const N: usize> AlignedImage<N> {
    pub const fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Per-platform configuration of an embedded dataset.
#[derive(Clone, Copy, Debug)]
pub struct PlatformData {
    pub name: &'static str,
    pub image: &'static [u8],
    pub magic: &'static [u8],
}

#[derive(Debug)]
pub struct EmbeddedDataManager {
    platform: &'static str,
    data_set: DataSet,
}

impl EmbeddedDataManager {
    pub fn new(platform: &PlatformData) -> Result<Self, BlobError> {
        let data_set = DataSet::from_static(platform.image, platform.magic).map_err(|e| {
            error!("embedded {} dataset is broken: {}", platform.name, e);
            e
        })?;
        Ok(EmbeddedDataManager {
            platform: platform.name,
            data_set,
        })
    }

    pub fn platform(&self) -> &'static str {
        self.platform
    }
}

impl DataManager for EmbeddedDataManager {
    fn data_set(&self) -> &DataSet {
        &self.data_set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DataSetWriter, SectionId};

    static SMALL: AlignedImage<4> = AlignedImage(*b"abcd");

    fn leaked_image(magic: &[u8]) -> &'static [u8] {
        let mut writer = DataSetWriter::new(magic);
        writer
            .add(SectionId::Connector, b"embedded-conn")
            .add_u16(SectionId::SegmenterLTable, &[3, 1, 4]);
        Box::leak(writer.build().unwrap().into_boxed_slice())
    }

    #[test]
    fn aligned_image_is_aligned() {
        assert_eq!(SMALL.as_bytes().as_ptr() as usize % 8, 0);
        assert_eq!(SMALL.as_bytes(), b"abcd");
    }

    #[test]
    fn platform_manager_decodes_its_image() {
        let platform = PlatformData {
            name: "test",
            image: leaked_image(b"PLAT"),
            magic: b"PLAT",
        };
        let manager = EmbeddedDataManager::new(&platform).unwrap();

        assert_eq!(manager.platform(), "test");
        assert_eq!(manager.connector_data(), b"embedded-conn");
        assert_eq!(manager.segmenter_data().l_table, &[3, 1, 4]);
    }

    #[test]
    fn platforms_use_their_own_magic() {
        let platform = PlatformData {
            name: "other",
            image: leaked_image(b"PLAT"),
            magic: b"OTHR",
        };
        assert!(matches!(
            EmbeddedDataManager::new(&platform),
            Err(BlobError::MagicMismatch { .. })
        ));
    }
}
