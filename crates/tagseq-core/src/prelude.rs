//! Convenient re-exports for downstream crates.

pub use crate::config::{EngineConfig, TsvConfig};
pub use crate::cursor::{materialize, materialize_tags, materialize_with, rows, Cursor, IntoCursor, Source};
pub use crate::error::{Error, Result};
pub use crate::seq::{Frame, RangeFrame, TagSet, TaggedSeq};
pub use crate::store::{NoValue, NoValues, RangeTags, TagStore, ValueStore};
