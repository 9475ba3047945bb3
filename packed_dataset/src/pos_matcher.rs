//! Part-of-speech range tables and the matcher built on them.
//!
//! Every table is stored back to back in one array and closed by
//! [`Range::SENTINEL`]; only the start index of each table is kept.

use crate::PackedError;
use crate::proto;
use bytemuck_derive::{Pod, Zeroable};

/// Inclusive id range, laid out as two native `u16`s.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Range {
    pub lower: u16,
    pub upper: u16,
}

impl Range {
    /// End-of-table marker. Never a real bound.
    pub const SENTINEL: Range = Range {
        lower: 0xFFFF,
        upper: 0xFFFF,
    };

    #[inline]
    pub fn is_sentinel(&self) -> bool {
        self.lower == Self::SENTINEL.lower
    }

    #[inline]
    pub fn contains(&self, id: u16) -> bool {
        self.lower <= id && id <= self.upper
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RangeTables {
    items: Vec<Range>,
    starts: Vec<u32>,
}

impl RangeTables {
    pub fn from_wire(tables: Vec<proto::RangeTable>) -> Result<Self, PackedError> {
        let total: usize = tables.iter().map(|t| t.ranges.len() + 1).sum();
        let mut items = Vec::with_capacity(total);
        let mut starts = Vec::with_capacity(tables.len());

        for (table, wire) in tables.into_iter().enumerate() {
            starts.push(items.len() as u32);
            for bound in wire.ranges {
                let range = Range {
                    lower: narrow("range lower bound", bound.lower.unwrap_or_default())?,
                    upper: narrow("range upper bound", bound.upper.unwrap_or_default())?,
                };
                if range.is_sentinel() {
                    return Err(PackedError::SentinelRange { table });
                }
                items.push(range);
            }
            items.push(Range::SENTINEL);
        }

        Ok(RangeTables { items, starts })
    }

    /// Number of tables.
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// Start index of every table in [`RangeTables::items`].
    pub fn starts(&self) -> &[u32] {
        &self.starts
    }

    /// The shared backing array, sentinels included.
    pub fn items(&self) -> &[Range] {
        &self.items
    }

    /// Table `index` as laid out in memory, ending with its sentinel.
    pub fn table(&self, index: usize) -> Option<&[Range]> {
        let start = *self.starts.get(index)? as usize;
        let end = self
            .starts
            .get(index + 1)
            .map_or(self.items.len(), |&next| next as usize);
        Some(&self.items[start..end])
    }

    /// The real ranges of table `index`, without the sentinel.
    pub fn ranges(&self, index: usize) -> Option<&[Range]> {
        self.table(index).map(|table| &table[..table.len() - 1])
    }

    /// Raw bytes of the shared array, for consumers that read it directly.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.items)
    }
}

fn narrow(field: &'static str, value: u32) -> Result<u16, PackedError> {
    u16::try_from(value).map_err(|_| PackedError::ValueOutOfRange { field, value })
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PosMatcher {
    rule_id_table: Vec<u16>,
    range_tables: RangeTables,
}

impl PosMatcher {
    pub fn new(rule_id_table: Vec<u16>, range_tables: RangeTables) -> Self {
        PosMatcher {
            rule_id_table,
            range_tables,
        }
    }

    pub fn from_wire(data: proto::PosMatcherData) -> Result<Self, PackedError> {
        let rule_id_table = data
            .rule_id_table
            .into_iter()
            .map(|id| narrow("rule id", id))
            .collect::<Result<Vec<_>, _>>()?;
        let range_tables = RangeTables::from_wire(data.range_tables)?;
        Ok(Self::new(rule_id_table, range_tables))
    }

    pub fn rule_id_table(&self) -> &[u16] {
        &self.rule_id_table
    }

    pub fn rule_id(&self, index: usize) -> Option<u16> {
        self.rule_id_table.get(index).copied()
    }

    pub fn range_tables(&self) -> &RangeTables {
        &self.range_tables
    }

    /// Table `index` with its trailing sentinel, or `None` past the end.
    pub fn range_table(&self, index: usize) -> Option<&[Range]> {
        self.range_tables.table(index)
    }

    /// Whether `id` falls in any range of table `table`.
    ///
    /// Scans from the table start up to its sentinel. Unknown tables match
    /// nothing.
    pub fn is_in_range(&self, table: usize, id: u16) -> bool {
        let Some(&start) = self.range_tables.starts.get(table) else {
            return false;
        };
        for range in &self.range_tables.items[start as usize..] {
            if range.is_sentinel() {
                return false;
            }
            if range.contains(id) {
                return true;
            }
        }
        false
    }
}
