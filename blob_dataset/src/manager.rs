//! Consumer-facing accessor surface.
//!
//! Every accessor returns borrows tied to the manager, so a view can never
//! outlive the image it points into. Nothing here copies payload bytes.

use crate::{DataSet, SectionId};

/// Segmenter tables, in the shape the segmenter consumes them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SegmenterData<'a> {
    pub l_num_elements: usize,
    pub r_num_elements: usize,
    pub l_table: &'a [u16],
    pub r_table: &'a [u16],
    pub bitarray: &'a [u8],
    pub boundary: &'a [u16],
}

impl SegmenterData<'_> {
    #[inline]
    pub fn bitarray_num_bytes(&self) -> usize {
        self.bitarray.len()
    }
}

/// Parallel key / value / token arrays of the suffix dictionary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SuffixDictionaryData<'a> {
    pub key_array: &'a [u8],
    pub value_array: &'a [u8],
    pub token_array: &'a [u32],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReadingCorrectionData<'a> {
    pub value_array: &'a [u8],
    pub error_array: &'a [u8],
    pub correction_array: &'a [u8],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SymbolRewriterData<'a> {
    pub token_array: &'a [u8],
    pub string_array: &'a [u8],
}

#[cfg(feature = "usage_rewriter")]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UsageRewriterData<'a> {
    pub base_conjugation_suffix: &'a [u8],
    pub conjugation_suffix: &'a [u8],
    pub conjugation_suffix_index: &'a [u8],
    pub usage_items: &'a [u8],
    pub string_array: &'a [u8],
}

/// Read access to every section of a decoded image.
///
/// Implementors only provide [`DataManager::data_set`]; every accessor is
/// derived from it, so platform wrappers never forward calls by hand.
pub trait DataManager {
    fn data_set(&self) -> &DataSet;

    fn connector_data(&self) -> &[u8] {
        self.data_set().section(SectionId::Connector)
    }

    fn system_dictionary_data(&self) -> &[u8] {
        self.data_set().section(SectionId::SystemDictionary)
    }

    fn collocation_data(&self) -> &[u8] {
        self.data_set().section(SectionId::Collocation)
    }

    fn collocation_suppression_data(&self) -> &[u8] {
        self.data_set().section(SectionId::CollocationSuppression)
    }

    fn suggestion_filter_data(&self) -> &[u8] {
        self.data_set().section(SectionId::SuggestionFilter)
    }

    fn pos_group_data(&self) -> &[u8] {
        self.data_set().section(SectionId::PosGroup)
    }

    fn counter_suffix_data(&self) -> &[u8] {
        self.data_set().section(SectionId::CounterSuffix)
    }

    fn segmenter_data(&self) -> SegmenterData<'_> {
        let data_set = self.data_set();
        let size_info = data_set.u32_section(SectionId::SegmenterSizeInfo);
        SegmenterData {
            l_num_elements: size_info[0] as usize,
            r_num_elements: size_info[1] as usize,
            l_table: data_set.u16_section(SectionId::SegmenterLTable),
            r_table: data_set.u16_section(SectionId::SegmenterRTable),
            bitarray: data_set.section(SectionId::SegmenterBitArray),
            boundary: data_set.u16_section(SectionId::Boundary),
        }
    }

    fn suffix_dictionary_data(&self) -> SuffixDictionaryData<'_> {
        let data_set = self.data_set();
        SuffixDictionaryData {
            key_array: data_set.section(SectionId::SuffixKey),
            value_array: data_set.section(SectionId::SuffixValue),
            token_array: data_set.u32_section(SectionId::SuffixToken),
        }
    }

    fn reading_correction_data(&self) -> ReadingCorrectionData<'_> {
        let data_set = self.data_set();
        ReadingCorrectionData {
            value_array: data_set.section(SectionId::ReadingCorrectionValue),
            error_array: data_set.section(SectionId::ReadingCorrectionError),
            correction_array: data_set.section(SectionId::ReadingCorrectionCorrection),
        }
    }

    fn symbol_rewriter_data(&self) -> SymbolRewriterData<'_> {
        let data_set = self.data_set();
        SymbolRewriterData {
            token_array: data_set.section(SectionId::SymbolToken),
            string_array: data_set.section(SectionId::SymbolString),
        }
    }

    #[cfg(feature = "usage_rewriter")]
    fn usage_rewriter_data(&self) -> UsageRewriterData<'_> {
        let data_set = self.data_set();
        UsageRewriterData {
            base_conjugation_suffix: data_set.section(SectionId::UsageBaseConjugationSuffix),
            conjugation_suffix: data_set.section(SectionId::UsageConjugationSuffix),
            conjugation_suffix_index: data_set.section(SectionId::UsageConjugationIndex),
            usage_items: data_set.section(SectionId::UsageItems),
            string_array: data_set.section(SectionId::UsageStringArray),
        }
    }
}
