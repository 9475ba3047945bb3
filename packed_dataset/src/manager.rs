use crate::proto::SystemDictionaryData;
use crate::{PackedError, PosMatcher, UserPosTable};
use backing_bytes::Backing;
use blob_dataset::{
    DataManager, DataSet, ReadingCorrectionData, SegmenterData, SuffixDictionaryData,
    SymbolRewriterData,
};
#[cfg(feature = "usage_rewriter")]
use blob_dataset::UsageRewriterData;
use flate2::read::MultiGzDecoder;
use log::{error, info};
use prost::Message;
use std::io::Read;
use std::path::Path;

/// Container format this build understands.
pub const FORMAT_VERSION: u32 = 1;

/// Largest container body accepted by default, before or after gunzip.
pub const DEFAULT_TOTAL_BYTES_LIMIT: usize = 64 << 20;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodeLimits {
    pub total_bytes_limit: usize,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        DecodeLimits {
            total_bytes_limit: DEFAULT_TOTAL_BYTES_LIMIT,
        }
    }
}

/// Dataset rebuilt from a packed container.
///
/// Owns the part-of-speech tables and, when the container carries one, the
/// nested sectioned image. Nothing is mutated after construction.
#[derive(Debug)]
pub struct PackedDataManager {
    product_version: String,
    user_pos: UserPosTable,
    pos_matcher: PosMatcher,
    data_set: Option<DataSet>,
}

impl PackedDataManager {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PackedError> {
        Self::from_bytes_with_limits(bytes, DecodeLimits::default())
    }

    pub fn from_bytes_with_limits(bytes: &[u8], limits: DecodeLimits) -> Result<Self, PackedError> {
        if bytes.len() > limits.total_bytes_limit {
            return Err(PackedError::TooLarge {
                len: bytes.len(),
                limit: limits.total_bytes_limit,
            });
        }
        Self::decode_body(bytes)
    }

    pub fn from_gzip(bytes: &[u8]) -> Result<Self, PackedError> {
        Self::from_gzip_with_limits(bytes, DecodeLimits::default())
    }

    /// Gunzips `bytes` and decodes the result.
    ///
    /// Concatenated gzip members are read as one stream. At most
    /// `total_bytes_limit` decompressed bytes are read; a larger body fails
    /// with `TooLarge` instead of being buffered.
    pub fn from_gzip_with_limits(bytes: &[u8], limits: DecodeLimits) -> Result<Self, PackedError> {
        let limit = limits.total_bytes_limit;
        let mut body = Vec::new();
        MultiGzDecoder::new(bytes)
            .take(limit as u64 + 1)
            .read_to_end(&mut body)?;
        if body.len() > limit {
            error!("decompressed packed dataset exceeds {} bytes", limit);
            return Err(PackedError::TooLarge {
                len: body.len(),
                limit,
            });
        }
        Self::decode_body(&body)
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PackedError> {
        Self::open_with_limits(path, DecodeLimits::default())
    }

    /// Loads a container file, raw or gzip-compressed.
    ///
    /// A protobuf body can never start with `0x1f` (wire type 7), so the
    /// gzip magic is unambiguous.
    pub fn open_with_limits<P: AsRef<Path>>(
        path: P,
        limits: DecodeLimits,
    ) -> Result<Self, PackedError> {
        #[cfg(feature = "mmap")]
        let backing = Backing::map_file(path)?;
        #[cfg(not(feature = "mmap"))]
        let backing = Backing::read_file(path)?;

        let bytes = backing.as_bytes();
        if bytes.starts_with(&GZIP_MAGIC) {
            Self::from_gzip_with_limits(bytes, limits)
        } else {
            Self::from_bytes_with_limits(bytes, limits)
        }
    }

    fn decode_body(body: &[u8]) -> Result<Self, PackedError> {
        let message = SystemDictionaryData::decode(body).map_err(|e| {
            error!("packed dataset protobuf format error: {}", e);
            e
        })?;
        Self::from_message(message)
    }

    /// Rebuilds the tables from an already decoded container.
    pub fn from_message(message: SystemDictionaryData) -> Result<Self, PackedError> {
        let actual = message.format_version.unwrap_or_default();
        if actual != FORMAT_VERSION {
            error!(
                "packed dataset format version mismatch: expected {}, actual {}",
                FORMAT_VERSION, actual
            );
            return Err(PackedError::FormatVersion {
                expected: FORMAT_VERSION,
                actual,
            });
        }

        let user_pos = UserPosTable::from_wire(message.pos_tokens)?;
        let pos_matcher = PosMatcher::from_wire(message.pos_matcher_data.unwrap_or_default())?;

        // Containers built for POS data only carry no nested image.
        let data_set = match message.mozc_data {
            Some(payload) => {
                let magic = message.mozc_data_magic.unwrap_or_default();
                let data_set = DataSet::decode(Backing::owned_aligned(payload), magic.as_bytes())
                    .map_err(|e| {
                        error!("failed to initialize nested dataset: {}", e);
                        e
                    })?;
                Some(data_set)
            }
            None => None,
        };

        let product_version = message.product_version.unwrap_or_default();
        info!(
            "loaded packed dataset {:?}: {} POS tokens, {} range tables, nested image: {}",
            product_version,
            user_pos.len(),
            pos_matcher.range_tables().len(),
            data_set.is_some()
        );

        Ok(PackedDataManager {
            product_version,
            user_pos,
            pos_matcher,
            data_set,
        })
    }

    /// Dictionary version string carried by the container.
    pub fn product_version(&self) -> &str {
        &self.product_version
    }

    pub fn user_pos(&self) -> &UserPosTable {
        &self.user_pos
    }

    pub fn pos_matcher(&self) -> &PosMatcher {
        &self.pos_matcher
    }

    /// The nested image, if the container had one.
    pub fn data_set(&self) -> Option<&DataSet> {
        self.data_set.as_ref()
    }

    /// Raw bytes of the nested image.
    pub fn mozc_data(&self) -> Option<&[u8]> {
        self.data_set().map(|d| d.backing().as_bytes())
    }

    //  Section accessors, present only with a nested image

    pub fn connector_data(&self) -> Option<&[u8]> {
        self.data_set().map(DataManager::connector_data)
    }

    pub fn system_dictionary_data(&self) -> Option<&[u8]> {
        self.data_set().map(DataManager::system_dictionary_data)
    }

    pub fn collocation_data(&self) -> Option<&[u8]> {
        self.data_set().map(DataManager::collocation_data)
    }

    pub fn collocation_suppression_data(&self) -> Option<&[u8]> {
        self.data_set().map(DataManager::collocation_suppression_data)
    }

    pub fn suggestion_filter_data(&self) -> Option<&[u8]> {
        self.data_set().map(DataManager::suggestion_filter_data)
    }

    pub fn pos_group_data(&self) -> Option<&[u8]> {
        self.data_set().map(DataManager::pos_group_data)
    }

    pub fn counter_suffix_data(&self) -> Option<&[u8]> {
        self.data_set().map(DataManager::counter_suffix_data)
    }

    pub fn segmenter_data(&self) -> Option<SegmenterData<'_>> {
        self.data_set().map(DataManager::segmenter_data)
    }

    pub fn suffix_dictionary_data(&self) -> Option<SuffixDictionaryData<'_>> {
        self.data_set().map(DataManager::suffix_dictionary_data)
    }

    pub fn reading_correction_data(&self) -> Option<ReadingCorrectionData<'_>> {
        self.data_set().map(DataManager::reading_correction_data)
    }

    pub fn symbol_rewriter_data(&self) -> Option<SymbolRewriterData<'_>> {
        self.data_set().map(DataManager::symbol_rewriter_data)
    }

    #[cfg(feature = "usage_rewriter")]
    pub fn usage_rewriter_data(&self) -> Option<UsageRewriterData<'_>> {
        self.data_set().map(DataManager::usage_rewriter_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto::{PosMatcherData, PosToken, RangeBound, RangeTable};
    use blob_dataset::{DataSetWriter, SectionId};

    fn container() -> SystemDictionaryData {
        SystemDictionaryData {
            format_version: Some(FORMAT_VERSION),
            product_version: Some("test-1".into()),
            pos_tokens: vec![PosToken {
                pos: Some("名詞".into()),
                conjugation_forms: vec![],
            }],
            pos_matcher_data: Some(PosMatcherData {
                rule_id_table: vec![3, 4],
                range_tables: vec![RangeTable {
                    ranges: vec![RangeBound {
                        lower: Some(1),
                        upper: Some(9),
                    }],
                }],
            }),
            mozc_data: None,
            mozc_data_magic: None,
        }
    }

    #[test]
    fn pos_only_container() {
        let manager = PackedDataManager::from_bytes(&container().encode_to_vec()).unwrap();

        assert_eq!(manager.product_version(), "test-1");
        assert_eq!(manager.user_pos().len(), 1);
        assert_eq!(manager.pos_matcher().rule_id_table(), &[3, 4]);
        assert!(manager.pos_matcher().is_in_range(0, 5));
        assert!(manager.data_set().is_none());
        assert!(manager.mozc_data().is_none());
        assert!(manager.connector_data().is_none());
        assert!(manager.segmenter_data().is_none());
    }

    #[test]
    fn nested_image_is_forwarded() {
        let mut writer = DataSetWriter::new(b"NESTED");
        writer
            .add(SectionId::Connector, b"nested-conn")
            .add_u16(SectionId::Boundary, &[8, 9]);
        let image = writer.build().unwrap();

        let mut message = container();
        message.mozc_data = Some(image.clone());
        message.mozc_data_magic = Some("NESTED".into());

        let manager = PackedDataManager::from_bytes(&message.encode_to_vec()).unwrap();
        assert_eq!(manager.connector_data(), Some(&b"nested-conn"[..]));
        assert_eq!(manager.segmenter_data().unwrap().boundary, &[8, 9]);
        assert_eq!(manager.mozc_data(), Some(image.as_slice()));
    }

    #[test]
    fn nested_magic_is_checked_independently() {
        let image = DataSetWriter::new(b"NESTED").build().unwrap();

        let mut message = container();
        message.mozc_data = Some(image);
        message.mozc_data_magic = Some("OTHER!".into());

        let err = PackedDataManager::from_bytes(&message.encode_to_vec()).unwrap_err();
        assert!(matches!(
            err,
            PackedError::Blob(blob_dataset::BlobError::MagicMismatch { .. })
        ));
    }

    #[test]
    fn version_mismatch_is_rejected() {
        let mut message = container();
        message.format_version = Some(FORMAT_VERSION + 1);

        let err = PackedDataManager::from_bytes(&message.encode_to_vec()).unwrap_err();
        assert!(matches!(
            err,
            PackedError::FormatVersion { expected: FORMAT_VERSION, actual } if actual == FORMAT_VERSION + 1
        ));

        message.format_version = None;
        assert!(PackedDataManager::from_bytes(&message.encode_to_vec()).is_err());
    }

    #[test]
    fn malformed_protobuf_is_rejected() {
        let err = PackedDataManager::from_bytes(&[0x0a, 0xff, 0xff]).unwrap_err();
        assert!(matches!(err, PackedError::Decode(_)));
        assert_eq!(err.kind(), backing_bytes::ErrorKind::Format);
    }

    #[test]
    fn raw_body_over_limit_is_rejected() {
        let bytes = container().encode_to_vec();
        let limits = DecodeLimits {
            total_bytes_limit: bytes.len() - 1,
        };

        let err = PackedDataManager::from_bytes_with_limits(&bytes, limits).unwrap_err();
        assert!(matches!(err, PackedError::TooLarge { .. }));
        assert_eq!(err.kind(), backing_bytes::ErrorKind::Resource);
        assert!(PackedDataManager::from_bytes_with_limits(
            &bytes,
            DecodeLimits {
                total_bytes_limit: bytes.len()
            }
        )
        .is_ok());
    }

    #[test]
    fn default_limit_is_64_mib() {
        assert_eq!(DecodeLimits::default().total_bytes_limit, 64 * 1024 * 1024);
    }
}
