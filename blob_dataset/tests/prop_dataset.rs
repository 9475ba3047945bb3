//! Property-based tests for sectioned image decoding.

use backing_bytes::{Backing, is_subslice};
use blob_dataset::{BlobError, DataManager, DataSet, DataSetWriter, SectionId, SectionKind};
use proptest::prelude::*;

const MAGIC: &[u8] = b"\xEFMOZC\x0D\x0A";

#[derive(Debug, Clone)]
struct Payloads {
    bytes: Vec<Vec<u8>>,
    boundary: Vec<u16>,
    l_table: Vec<u16>,
    r_table: Vec<u16>,
    suffix_token: Vec<u32>,
    sizes: (u32, u32),
}

fn payloads_strategy() -> impl Strategy<Value = Payloads> {
    (
        prop::collection::vec(prop::collection::vec(any::<u8>(), 0..64), SectionId::COUNT),
        prop::collection::vec(any::<u16>(), 0..32),
        prop::collection::vec(any::<u16>(), 0..32),
        prop::collection::vec(any::<u16>(), 0..32),
        prop::collection::vec(any::<u32>(), 0..32),
        (any::<u32>(), any::<u32>()),
    )
        .prop_map(|(bytes, boundary, l_table, r_table, suffix_token, sizes)| Payloads {
            bytes,
            boundary,
            l_table,
            r_table,
            suffix_token,
            sizes,
        })
}

fn build(p: &Payloads) -> Vec<u8> {
    let mut writer = DataSetWriter::new(MAGIC);
    for id in SectionId::ALL {
        if id.kind() == SectionKind::Bytes {
            writer.add(id, &p.bytes[id.index()]);
        }
    }
    writer
        .add_u16(SectionId::Boundary, &p.boundary)
        .add_u16(SectionId::SegmenterLTable, &p.l_table)
        .add_u16(SectionId::SegmenterRTable, &p.r_table)
        .add_u32(SectionId::SuffixToken, &p.suffix_token)
        .set_segmenter_size(p.sizes.0, p.sizes.1);
    writer.build().unwrap()
}

proptest! {
    // -------------------------------------------------------------
    // 1. Every accessor returns the written bytes, in place.
    // -------------------------------------------------------------
    #[test]
    fn prop_accessors_are_views(p in payloads_strategy()) {
        let data_set = DataSet::decode(Backing::Owned(build(&p)), MAGIC).unwrap();
        let image = data_set.backing().as_bytes();

        for (id, bytes) in data_set.sections() {
            prop_assert!(is_subslice(image, bytes));
            if id.kind() == SectionKind::Bytes {
                prop_assert_eq!(bytes, p.bytes[id.index()].as_slice());
            }
        }

        let segmenter = data_set.segmenter_data();
        prop_assert_eq!(segmenter.l_num_elements, p.sizes.0 as usize);
        prop_assert_eq!(segmenter.r_num_elements, p.sizes.1 as usize);
        prop_assert_eq!(segmenter.l_table, p.l_table.as_slice());
        prop_assert_eq!(segmenter.r_table, p.r_table.as_slice());
        prop_assert_eq!(segmenter.boundary, p.boundary.as_slice());
        prop_assert_eq!(segmenter.bitarray, p.bytes[SectionId::SegmenterBitArray.index()].as_slice());
        prop_assert_eq!(segmenter.bitarray_num_bytes(), segmenter.bitarray.len());

        let suffix = data_set.suffix_dictionary_data();
        prop_assert_eq!(suffix.token_array, p.suffix_token.as_slice());
        prop_assert!(is_subslice(image, bytemuck::cast_slice(suffix.token_array)));

        let reading = data_set.reading_correction_data();
        prop_assert_eq!(reading.error_array, p.bytes[SectionId::ReadingCorrectionError.index()].as_slice());

        let symbol = data_set.symbol_rewriter_data();
        prop_assert_eq!(symbol.string_array, p.bytes[SectionId::SymbolString.index()].as_slice());

        let usage = data_set.usage_rewriter_data();
        prop_assert_eq!(usage.usage_items, p.bytes[SectionId::UsageItems.index()].as_slice());

        prop_assert_eq!(data_set.pos_group_data(), p.bytes[SectionId::PosGroup.index()].as_slice());
        prop_assert_eq!(data_set.counter_suffix_data(), p.bytes[SectionId::CounterSuffix.index()].as_slice());
    }

    // -------------------------------------------------------------
    // 2. Any change inside the magic prefix is a format error.
    // -------------------------------------------------------------
    #[test]
    fn prop_corrupt_magic_fails(
        p in payloads_strategy(),
        index in 0usize..MAGIC.len(),
        flip in 1u8..=255,
    ) {
        let mut image = build(&p);
        image[index] ^= flip;

        let result = DataSet::decode(Backing::Owned(image), MAGIC);
        let is_magic_error = matches!(result, Err(BlobError::MagicMismatch { .. }));
        prop_assert!(is_magic_error);
    }

    // -------------------------------------------------------------
    // 3. Truncated images never decode.
    // -------------------------------------------------------------
    #[test]
    fn prop_truncated_image_fails(p in payloads_strategy(), cut in 1usize..64) {
        let image = build(&p);
        let directory_end = MAGIC.len() + 8 + SectionId::COUNT * 8;
        let keep = directory_end.saturating_sub(cut);

        prop_assert!(DataSet::decode(Backing::Owned(image[..keep].to_vec()), MAGIC).is_err());
    }
}

#[test]
fn magic_comparison_is_exact() {
    let image = DataSetWriter::new(b"magic").build().unwrap();

    assert!(DataSet::decode(Backing::Owned(image.clone()), b"magic").is_ok());
    assert!(DataSet::decode(Backing::Owned(image.clone()), b"MAGIC").is_err());
    assert!(DataSet::decode(Backing::Owned(image), b"magic ").is_err());
}

#[test]
fn section_count_mismatch_is_format_error() {
    let mut image = DataSetWriter::new(b"M").build().unwrap();
    image[1..5].copy_from_slice(&3u32.to_le_bytes());

    let err = DataSet::decode(Backing::Owned(image), b"M").unwrap_err();
    assert_eq!(err.kind(), backing_bytes::ErrorKind::Format);
}
