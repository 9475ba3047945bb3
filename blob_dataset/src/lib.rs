//! Sectioned dataset images.
//!
//! An image is a caller-supplied magic tag, a fixed-size directory header and
//! one directory entry per [`SectionId`], followed by the section payloads.
//! [`DataSet`] validates the whole directory once and then hands out
//! zero-copy views through the [`DataManager`] accessors.
//!
//! ```rust
//! use blob_dataset::{DataManager, DataSet, DataSetWriter, SectionId};
//! use backing_bytes::Backing;
//!
//! let mut writer = DataSetWriter::new(b"DEMO\x01");
//! writer
//!     .add(SectionId::Connector, b"connector")
//!     .add_u16(SectionId::Boundary, &[1, 2, 3])
//!     .set_segmenter_size(4, 5);
//! let image = writer.build().unwrap();
//!
//! let data_set = DataSet::decode(Backing::Owned(image), b"DEMO\x01").unwrap();
//! assert_eq!(data_set.connector_data(), b"connector");
//! assert_eq!(data_set.segmenter_data().boundary, &[1, 2, 3]);
//! assert_eq!(data_set.segmenter_data().l_num_elements, 4);
//! ```

pub mod data_set;
pub mod directory;
pub mod embedded;
pub mod error;
pub mod manager;
pub mod section;
pub mod writer;

pub use data_set::DataSet;
pub use directory::SectionTable;
pub use embedded::{AlignedImage, EmbeddedDataManager, PlatformData};
pub use error::BlobError;
pub use manager::{
    DataManager, ReadingCorrectionData, SegmenterData, SuffixDictionaryData, SymbolRewriterData,
};
#[cfg(feature = "usage_rewriter")]
pub use manager::UsageRewriterData;
pub use section::{SectionId, SectionKind};
pub use writer::DataSetWriter;
