#![forbid(unsafe_code)]
//! tagseq-io: load delimited text into tagged sequences.
//!
//! Records come back as a [`RangeFrame`](tagseq_core::RangeFrame): row `i` is
//! tagged `i`, so the result can be re-keyed with `tagseq_ops::retag_by` and
//! then grouped or joined.

pub mod error;
pub mod tsv;

pub use error::{Error, Result};
pub use tsv::{read_header, read_records, read_string_records, read_tsv, read_tsv_records};
