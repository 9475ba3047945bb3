#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

#[cfg(feature = "std")]
use std::{fs::File, io::Read, path::Path};

#[cfg(feature = "mmap")]
use memmap2::Mmap;

#[cfg(feature = "std")]
use crate::BackingError;

/// The single owner of a dataset image.
///
/// - `Static` for images compiled into the binary
/// - `Owned` for payloads moved out of a decoded message or read from disk
/// - `Aligned` for owned payloads copied to an 8-byte boundary
/// - `Mmap` only when feature = "mmap"
///
/// Every variant keeps its bytes at a fixed address for as long as the
/// value lives, even when the `Backing` itself is moved. Offsets validated
/// against one `as_bytes()` call stay valid for later calls.
#[derive(Debug)]
pub enum Backing {
    /// Process-lifetime embedded image
    Static(&'static [u8]),

    /// Heap buffer owned by this value
    Owned(Vec<u8>),

    /// First `len` bytes of a word buffer, always 8-byte aligned
    Aligned { words: Vec<u64>, len: usize },

    /// Read-only memory mapped file
    #[cfg(feature = "mmap")]
    Mmap(Mmap),
}

impl Backing {
    /// Borrow the whole image
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Backing::Static(bytes) => bytes,
            Backing::Owned(vec) => vec.as_slice(),
            Backing::Aligned { words, len } => {
                &bytemuck::cast_slice::<u64, u8>(words.as_slice())[..*len]
            }

            #[cfg(feature = "mmap")]
            Backing::Mmap(m) => m.as_ref(),
        }
    }

    /// Return byte count
    #[inline]
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Short name of the variant, for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Backing::Static(_) => "static",
            Backing::Owned(_) => "owned",
            Backing::Aligned { .. } => "aligned",

            #[cfg(feature = "mmap")]
            Backing::Mmap(_) => "mmap",
        }
    }

    /// Takes ownership of `bytes`, copying them only if the allocation
    /// does not start on an 8-byte boundary.
    ///
    /// The global allocator only promises byte alignment for `Vec<u8>`, while
    /// typed sections need up to 8.
    pub fn owned_aligned(bytes: Vec<u8>) -> Self {
        if bytes.as_ptr() as usize % 8 == 0 {
            Backing::Owned(bytes)
        } else {
            Self::aligned_copy(&bytes)
        }
    }

    /// Copies `bytes` into a fresh 8-byte aligned buffer.
    pub fn aligned_copy(bytes: &[u8]) -> Self {
        let mut words: Vec<u64> = Vec::new();
        words.resize(bytes.len().div_ceil(8), 0);
        bytemuck::cast_slice_mut::<u64, u8>(words.as_mut_slice())[..bytes.len()]
            .copy_from_slice(bytes);
        Backing::Aligned {
            words,
            len: bytes.len(),
        }
    }

    //  File constructors

    /// Read a whole file into an owned buffer.
    #[cfg(feature = "std")]
    pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Self, BackingError> {
        let mut file = File::open(path)?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        Ok(Backing::Owned(bytes))
    }

    /// Map a file read-only.
    ///
    /// The file must not be truncated or rewritten while the map is alive.
    #[cfg(feature = "mmap")]
    pub fn map_file<P: AsRef<Path>>(path: P) -> Result<Self, BackingError> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(Backing::Mmap(mmap))
    }
}

impl AsRef<[u8]> for Backing {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Vec<u8>> for Backing {
    fn from(bytes: Vec<u8>) -> Self {
        Backing::Owned(bytes)
    }
}

impl From<&'static [u8]> for Backing {
    fn from(bytes: &'static [u8]) -> Self {
        Backing::Static(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static IMAGE: [u8; 6] = *b"abcdef";

    #[test]
    fn static_and_owned_expose_same_bytes() {
        let s = Backing::from(&IMAGE[..]);
        let o = Backing::from(IMAGE.to_vec());

        assert_eq!(s.as_bytes(), o.as_bytes());
        assert_eq!(s.len(), 6);
        assert_eq!(s.kind(), "static");
        assert_eq!(o.kind(), "owned");
        assert!(!o.is_empty());
        assert!(Backing::Owned(Vec::new()).is_empty());
    }

    #[test]
    fn owned_address_survives_move() {
        let backing = Backing::Owned(vec![1u8, 2, 3, 4]);
        let before = backing.as_bytes().as_ptr();

        let moved = Box::new(backing);
        assert_eq!(moved.as_bytes().as_ptr(), before);
    }

    #[test]
    fn aligned_copy_keeps_bytes_on_word_boundary() {
        let source = b"xpayload-of-eleven";
        // odd start offset
        let backing = Backing::aligned_copy(&source[1..]);

        assert_eq!(backing.as_bytes(), &source[1..]);
        assert_eq!(backing.as_bytes().as_ptr() as usize % 8, 0);
        assert_eq!(backing.kind(), "aligned");
        assert!(Backing::aligned_copy(&[]).is_empty());
    }

    #[test]
    fn owned_aligned_is_always_word_aligned() {
        for len in [0usize, 1, 7, 8, 9, 63, 1000] {
            let bytes: Vec<u8> = (0..len).map(|i| i as u8).collect();
            let backing = Backing::owned_aligned(bytes.clone());

            assert_eq!(backing.as_bytes(), bytes.as_slice());
            assert_eq!(backing.as_bytes().as_ptr() as usize % 8, 0);
        }
    }

    #[cfg(feature = "std")]
    #[test]
    fn read_file_operations() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"dataset").unwrap();
        file.flush().unwrap();

        let backing = Backing::read_file(file.path()).unwrap();
        assert_eq!(backing.as_bytes(), b"dataset");
        assert_eq!(backing.kind(), "owned");

        assert!(matches!(
            Backing::read_file(file.path().with_extension("missing")),
            Err(BackingError::Io(_))
        ));
    }

    #[cfg(feature = "mmap")]
    #[test]
    fn mmap_readonly_operations() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let mut file = NamedTempFile::new().unwrap();
        let words: [u32; 2] = [7, 9];
        file.write_all(bytemuck::cast_slice(&words)).unwrap();
        file.flush().unwrap();

        let backing = Backing::map_file(file.path()).unwrap();
        assert_eq!(backing.kind(), "mmap");
        assert_eq!(backing.len(), 8);
        assert_eq!(backing.as_bytes(), bytemuck::cast_slice::<u32, u8>(&words));
    }
}
