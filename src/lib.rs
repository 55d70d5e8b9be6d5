//! `MutBuf`: a growable, mutable byte-string buffer.
//!
//! A `MutBuf` owns a contiguous byte region and keeps a zero terminator
//! directly after the content, so the text can be handed to consumers
//! that expect terminated strings. Appends are amortized O(1) through
//! capacity doubling, transformations happen in place, and every
//! fallible operation reports through a recoverable error instead of
//! aborting.
//!
//! ```
//! use mutbuf::MutBuf;
//!
//! let mut buf = MutBuf::new().unwrap();
//! buf.push_str("pi = ").unwrap();
//! buf.push_f64(3.14159, 2).unwrap();
//! assert_eq!(buf.as_bytes(), b"pi = 3.14");
//!
//! assert!(buf.starts_with(b"pi"));
//! assert_eq!(buf.index_of(b"="), Some(3));
//! ```
//!
//! # Splitting
//!
//! Splitting partitions the content into independently owned buffers.
//! Once the piece limit is one short of being reached, the final piece
//! absorbs all remaining content, separators included:
//!
//! ```
//! use mutbuf::MutBuf;
//!
//! let mut csv = MutBuf::new().unwrap();
//! csv.push_str("a,b,c,d").unwrap();
//! let pieces = csv.split(2, b",").unwrap();
//! assert_eq!(pieces[0].as_bytes(), b"a");
//! assert_eq!(pieces[1].as_bytes(), b"b,c,d");
//! ```
//!
//! # Allocation strategies
//!
//! Storage is obtained through an [`Allocator`] strategy injected at
//! creation time. The default goes through the global allocator;
//! substitute a custom strategy to meter usage or to exercise failure
//! paths in tests.
//!
//! ```
//! use mutbuf::{DefaultAllocator, MutBuf};
//!
//! let buf = MutBuf::with_capacity_in(64, DefaultAllocator).unwrap();
//! assert_eq!(buf.capacity(), 64);
//! ```
//!
//! # Error model
//!
//! Fallible operations return [`MutBufError`] and record a sticky
//! [`Status`] on the buffer; read-only operations (search, comparison)
//! cannot fail. An allocation failure leaves the visible content and
//! the terminator invariant exactly as they were before the call.

mod alloc;
mod buf;
mod error;
mod render;
mod search;

pub use alloc::{Allocator, DefaultAllocator};
pub use buf::{MutBuf, DEFAULT_CAPACITY};
pub use error::{MutBufError, Result, Status};
