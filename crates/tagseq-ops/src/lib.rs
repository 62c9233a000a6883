#![forbid(unsafe_code)]
//! tagseq-ops: derived cursors over tagged sequences.
//!
//! Every operator is a variant of one sorted merge, parameterized by
//! caller-supplied callbacks:
//! - [`Reduction`]: fold runs of equal tags (group-by).
//! - [`Intersection`]: right-driven two-finger merge (inner join, selection).
//! - [`Union`]: interleave two cursors (outer join, concatenate).
//! - [`Retag`]: re-key from an index-aligned sequence and stably re-sort.
//! - [`Map`] / [`Filter`]: per-row transforms.
//!
//! Operators are plain generic structs: a pipeline monomorphizes into one
//! fused loop and allocates only when materialized.

pub mod ext;
pub mod join;
pub mod map;
pub mod reduce;
pub mod retag;
pub mod stats;

pub use ext::CursorExt;
pub use join::merge::Intersection;
pub use join::union::{concatenate, Union};
pub use map::{Filter, Map};
pub use reduce::Reduction;
pub use retag::{retag, retag_by, Retag};
pub use stats::Moments;

use tagseq_core::{Cursor, IntoCursor};

/// Tag type of whatever `In` converts into.
pub type TagOf<In> = <<In as IntoCursor>::Cursor as Cursor>::Tag;

/// Value type of whatever `In` converts into.
pub type ValueOf<In> = <<In as IntoCursor>::Cursor as Cursor>::Value;
