#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
pub use std::vec::Vec;

#[cfg(not(feature = "std"))]
pub use alloc::vec::Vec;

pub mod backing;
pub mod error;
pub mod view;

pub use backing::Backing;
pub use error::{BackingError, ErrorKind};
pub use view::{bytes_at, cast_at, is_subslice};
