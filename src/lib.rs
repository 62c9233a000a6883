#![forbid(unsafe_code)]
//! tagseq: sorted, tagged sequences and merge-based cursor operators.
//!
//! ```
//! use tagseq::prelude::*;
//!
//! let a = Frame::new(vec![1, 2, 2, 3], vec![10, 20, 100, 30]).unwrap();
//! let b = Frame::new(vec![1, 2, 3], vec![-11, -22, -33]).unwrap();
//!
//! let joined = a.cursor().reduce_sum().collate(&b, |l, r| l + r).materialize();
//! assert_eq!(joined.values(), &vec![-1, 98, -3]);
//! ```

pub use tagseq_core;
pub use tagseq_io;
pub use tagseq_ops;

pub mod prelude {
    pub use tagseq_core::prelude::*;
    pub use tagseq_ops::{concatenate, retag, retag_by, CursorExt, Moments};
}
