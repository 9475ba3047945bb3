//! The fixed section set of the image format.
//!
//! Order matters: directory entries appear in exactly this order, and the
//! count of ids is the format's version check.

/// How a section's bytes are interpreted by its consumer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectionKind {
    /// Opaque bytes
    Bytes,
    /// Native-endian `u16` array
    U16Array,
    /// Native-endian `u32` array
    U32Array,
    /// Exactly two native-endian `u32`s
    SizeInfo,
}

impl SectionKind {
    /// Width of one element in bytes.
    pub const fn element_size(self) -> usize {
        match self {
            SectionKind::Bytes => 1,
            SectionKind::U16Array => 2,
            SectionKind::U32Array | SectionKind::SizeInfo => 4,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum SectionId {
    Connector,
    SystemDictionary,
    SuggestionFilter,
    Collocation,
    CollocationSuppression,
    PosGroup,
    Boundary,
    SegmenterSizeInfo,
    SegmenterLTable,
    SegmenterRTable,
    SegmenterBitArray,
    CounterSuffix,
    SuffixKey,
    SuffixValue,
    SuffixToken,
    ReadingCorrectionValue,
    ReadingCorrectionError,
    ReadingCorrectionCorrection,
    SymbolToken,
    SymbolString,
    UsageBaseConjugationSuffix,
    UsageConjugationSuffix,
    UsageConjugationIndex,
    UsageItems,
    UsageStringArray,
}

impl SectionId {
    pub const COUNT: usize = 25;

    /// All sections in directory order.
    pub const ALL: [SectionId; SectionId::COUNT] = [
        SectionId::Connector,
        SectionId::SystemDictionary,
        SectionId::SuggestionFilter,
        SectionId::Collocation,
        SectionId::CollocationSuppression,
        SectionId::PosGroup,
        SectionId::Boundary,
        SectionId::SegmenterSizeInfo,
        SectionId::SegmenterLTable,
        SectionId::SegmenterRTable,
        SectionId::SegmenterBitArray,
        SectionId::CounterSuffix,
        SectionId::SuffixKey,
        SectionId::SuffixValue,
        SectionId::SuffixToken,
        SectionId::ReadingCorrectionValue,
        SectionId::ReadingCorrectionError,
        SectionId::ReadingCorrectionCorrection,
        SectionId::SymbolToken,
        SectionId::SymbolString,
        SectionId::UsageBaseConjugationSuffix,
        SectionId::UsageConjugationSuffix,
        SectionId::UsageConjugationIndex,
        SectionId::UsageItems,
        SectionId::UsageStringArray,
    ];

    /// Position in the directory.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            SectionId::Connector => "conn",
            SectionId::SystemDictionary => "dict",
            SectionId::SuggestionFilter => "sugg",
            SectionId::Collocation => "coll",
            SectionId::CollocationSuppression => "cols",
            SectionId::PosGroup => "posg",
            SectionId::Boundary => "bdry",
            SectionId::SegmenterSizeInfo => "segmenter_sizeinfo",
            SectionId::SegmenterLTable => "segmenter_ltable",
            SectionId::SegmenterRTable => "segmenter_rtable",
            SectionId::SegmenterBitArray => "segmenter_bitarray",
            SectionId::CounterSuffix => "counter_suffix",
            SectionId::SuffixKey => "suffix_key",
            SectionId::SuffixValue => "suffix_value",
            SectionId::SuffixToken => "suffix_token",
            SectionId::ReadingCorrectionValue => "reading_correction_value",
            SectionId::ReadingCorrectionError => "reading_correction_error",
            SectionId::ReadingCorrectionCorrection => "reading_correction_correction",
            SectionId::SymbolToken => "symbol_token",
            SectionId::SymbolString => "symbol_string",
            SectionId::UsageBaseConjugationSuffix => "usage_base_conjugation_suffix",
            SectionId::UsageConjugationSuffix => "usage_conjugation_suffix",
            SectionId::UsageConjugationIndex => "usage_conjugation_index",
            SectionId::UsageItems => "usage_item_array",
            SectionId::UsageStringArray => "usage_string_array",
        }
    }

    pub const fn kind(self) -> SectionKind {
        match self {
            SectionId::Boundary | SectionId::SegmenterLTable | SectionId::SegmenterRTable => {
                SectionKind::U16Array
            }
            SectionId::SuffixToken => SectionKind::U32Array,
            SectionId::SegmenterSizeInfo => SectionKind::SizeInfo,
            _ => SectionKind::Bytes,
        }
    }

    /// Looks a section up by its directory name.
    pub fn from_name(name: &str) -> Option<SectionId> {
        SectionId::ALL.iter().copied().find(|id| id.name() == name)
    }
}
