//! Wire messages of the packed container.
//!
//! Optional fields keep presence: an absent label or suffix stays `None`
//! all the way into the rebuilt tables.

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SystemDictionaryData {
    #[prost(uint32, optional, tag = "1")]
    pub format_version: Option<u32>,
    #[prost(string, optional, tag = "2")]
    pub product_version: Option<String>,
    #[prost(message, repeated, tag = "3")]
    pub pos_tokens: Vec<PosToken>,
    #[prost(message, optional, tag = "4")]
    pub pos_matcher_data: Option<PosMatcherData>,
    /// Nested image in the sectioned format.
    #[prost(bytes = "vec", optional, tag = "5")]
    pub mozc_data: Option<Vec<u8>>,
    #[prost(string, optional, tag = "6")]
    pub mozc_data_magic: Option<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PosToken {
    #[prost(string, optional, tag = "1")]
    pub pos: Option<String>,
    #[prost(message, repeated, tag = "2")]
    pub conjugation_forms: Vec<ConjugationType>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ConjugationType {
    #[prost(string, optional, tag = "1")]
    pub key_suffix: Option<String>,
    #[prost(string, optional, tag = "2")]
    pub value_suffix: Option<String>,
    #[prost(uint32, optional, tag = "3")]
    pub id: Option<u32>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PosMatcherData {
    #[prost(uint32, repeated, packed = "false", tag = "1")]
    pub rule_id_table: Vec<u32>,
    #[prost(message, repeated, tag = "2")]
    pub range_tables: Vec<RangeTable>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RangeTable {
    #[prost(message, repeated, tag = "1")]
    pub ranges: Vec<RangeBound>,
}

/// One inclusive `(lower, upper)` pair.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RangeBound {
    #[prost(uint32, optional, tag = "1")]
    pub lower: Option<u32>,
    #[prost(uint32, optional, tag = "2")]
    pub upper: Option<u32>,
}
