#![forbid(unsafe_code)]
//! tagseq-core: tagged sequences, backing stores, the cursor protocol and the
//! materializer.
//!
//! Design intent:
//! - A sequence is a pair of reference-counted stores; copies are O(1) and
//!   writes are copy-on-write.
//! - Every pipeline stage is a [`Cursor`]; only [`materialize`] allocates.
//! - No I/O and no async in core.

pub mod config;
pub mod cursor;
pub mod error;
pub mod format;
pub mod prelude;
pub mod seq;
pub mod store;

pub use cursor::{materialize, materialize_tags, materialize_with, rows, Cursor, IntoCursor, Source};
pub use error::{Error, Result};
pub use seq::{Frame, RangeFrame, TagSet, TaggedSeq};
pub use store::{NoValue, NoValues, RangeTags, TagStore, ValueStore};
