//! Packed (protobuf) datasets.
//!
//! A packed container carries the part-of-speech tables as flat repeated
//! fields and, optionally, a nested sectioned image. [`PackedDataManager`]
//! rebuilds the tables into owned arrays and decodes the nested image with
//! [`blob_dataset::DataSet`].
//!
//! ```rust
//! use packed_dataset::proto::{ConjugationType, PosToken, SystemDictionaryData};
//! use packed_dataset::{FORMAT_VERSION, PackedDataManager};
//! use prost::Message;
//!
//! let container = SystemDictionaryData {
//!     format_version: Some(FORMAT_VERSION),
//!     product_version: Some("2.17.0".into()),
//!     pos_tokens: vec![PosToken {
//!         pos: Some("名詞".into()),
//!         conjugation_forms: vec![ConjugationType {
//!             key_suffix: None,
//!             value_suffix: None,
//!             id: Some(1843),
//!         }],
//!     }],
//!     ..Default::default()
//! };
//!
//! let manager = PackedDataManager::from_bytes(&container.encode_to_vec()).unwrap();
//! assert_eq!(manager.product_version(), "2.17.0");
//! assert_eq!(manager.user_pos().get(0).unwrap().pos, Some("名詞"));
//! assert!(manager.data_set().is_none());
//! ```

pub mod error;
pub mod manager;
pub mod pos_matcher;
pub mod proto;
pub mod registry;
pub mod user_pos;

pub use error::{PackedError, RegistryError};
pub use manager::{DEFAULT_TOTAL_BYTES_LIMIT, DecodeLimits, FORMAT_VERSION, PackedDataManager};
pub use pos_matcher::{PosMatcher, Range, RangeTables};
pub use registry::{DatasetRegistry, RegistryConfig};
pub use user_pos::{ConjugationForm, PosToken, Span, UserPosTable};
