//! Part-of-speech token table with per-token conjugation forms.
//!
//! All forms live in one shared array; each token remembers a [`Span`] into
//! it. A token without forms has no span at all, which consumers use as the
//! presence test.

use crate::PackedError;
use crate::proto;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConjugationForm {
    pub key_suffix: Option<String>,
    pub value_suffix: Option<String>,
    pub id: u16,
}

/// Position of one token's forms inside the shared conjugation array.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub start: u32,
    pub len: u32,
}

impl Span {
    #[inline]
    pub fn range(self) -> core::ops::Range<usize> {
        self.start as usize..(self.start + self.len) as usize
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct TokenEntry {
    pos: Option<String>,
    conjugations: Option<Span>,
}

/// Borrowed view of one token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PosToken<'a> {
    pub pos: Option<&'a str>,
    /// `None` when the token has no conjugation forms.
    pub conjugation_forms: Option<&'a [ConjugationForm]>,
}

impl PosToken<'_> {
    pub fn conjugation_size(&self) -> usize {
        self.conjugation_forms.map_or(0, <[ConjugationForm]>::len)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserPosTable {
    tokens: Vec<TokenEntry>,
    conjugations: Vec<ConjugationForm>,
}

impl UserPosTable {
    /// Rebuilds the table from wire records, keeping encounter order.
    ///
    /// Labels and suffixes are moved out of the messages, not copied.
    pub fn from_wire(tokens: Vec<proto::PosToken>) -> Result<Self, PackedError> {
        let total: usize = tokens.iter().map(|t| t.conjugation_forms.len()).sum();
        let mut conjugations = Vec::with_capacity(total);
        let mut entries = Vec::with_capacity(tokens.len());

        for token in tokens {
            let start = conjugations.len();
            for form in token.conjugation_forms {
                let raw = form.id.unwrap_or_default();
                let id = u16::try_from(raw).map_err(|_| PackedError::ValueOutOfRange {
                    field: "conjugation id",
                    value: raw,
                })?;
                conjugations.push(ConjugationForm {
                    key_suffix: form.key_suffix,
                    value_suffix: form.value_suffix,
                    id,
                });
            }

            let len = conjugations.len() - start;
            let span = (len > 0).then(|| Span {
                start: start as u32,
                len: len as u32,
            });
            entries.push(TokenEntry {
                pos: token.pos,
                conjugations: span,
            });
        }

        Ok(UserPosTable {
            tokens: entries,
            conjugations,
        })
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<PosToken<'_>> {
        self.tokens.get(index).map(|entry| self.view(entry))
    }

    pub fn iter(&self) -> impl Iterator<Item = PosToken<'_>> + '_ {
        self.tokens.iter().map(|entry| self.view(entry))
    }

    /// Where token `index` keeps its forms, or `None` if it has none.
    pub fn conjugation_span(&self, index: usize) -> Option<Span> {
        self.tokens.get(index).and_then(|entry| entry.conjugations)
    }

    /// The shared conjugation array, every token's forms back to back.
    pub fn conjugations(&self) -> &[ConjugationForm] {
        &self.conjugations
    }

    fn view<'a>(&'a self, entry: &'a TokenEntry) -> PosToken<'a> {
        PosToken {
            pos: entry.pos.as_deref(),
            conjugation_forms: entry.conjugations.map(|span| &self.conjugations[span.range()]),
        }
    }
}
