//! Joins over sorted cursors.
//!
//! Precondition: both inputs are sorted on their tags (enforced by
//! `TaggedSeq` construction and preserved by every operator).
//!
//! - [`merge`]: inner join ([`Intersection`]) and the helpers below.
//! - [`union`]: outer join / concatenate ([`Union`](union::Union)).

pub mod merge;
pub mod union;

use std::ops::Add;

use tagseq_core::{Cursor, IntoCursor};

use crate::{TagOf, ValueOf};
pub use merge::Intersection;

/// Inner join with a callback that always produces a row.
pub fn collate<LI, RI, F, O>(
    left: LI,
    right: RI,
    mut op: F,
) -> impl Cursor<Tag = TagOf<LI>, Value = O>
where
    LI: IntoCursor,
    RI: IntoCursor,
    RI::Cursor: Cursor<Tag = TagOf<LI>>,
    F: FnMut(&ValueOf<LI>, &ValueOf<RI>) -> O,
{
    Intersection::new(left, right, move |_, l, r| Some(op(l, r)))
}

/// Inner join adding the matching values.
pub fn sum<LI, RI>(left: LI, right: RI) -> impl Cursor<Tag = TagOf<LI>, Value = ValueOf<LI>>
where
    LI: IntoCursor,
    RI: IntoCursor,
    RI::Cursor: Cursor<Tag = TagOf<LI>, Value = ValueOf<LI>>,
    ValueOf<LI>: Clone + Add<Output = ValueOf<LI>>,
{
    collate(left, right, |l: &ValueOf<LI>, r: &ValueOf<LI>| {
        l.clone() + r.clone()
    })
}

/// Inner join pairing the matching values.
pub fn pair<LI, RI>(
    left: LI,
    right: RI,
) -> impl Cursor<Tag = TagOf<LI>, Value = (ValueOf<LI>, ValueOf<RI>)>
where
    LI: IntoCursor,
    RI: IntoCursor,
    RI::Cursor: Cursor<Tag = TagOf<LI>>,
    ValueOf<LI>: Clone,
    ValueOf<RI>: Clone,
{
    collate(left, right, |l: &ValueOf<LI>, r: &ValueOf<RI>| {
        (l.clone(), r.clone())
    })
}

/// Index selection `data[index]`: the rows of `data` whose tags appear in
/// `index`, in `index` order. The index's values are ignored, so tag-only
/// sequences work as indexes.
pub fn select<DI, II>(data: DI, index: II) -> impl Cursor<Tag = TagOf<DI>, Value = ValueOf<DI>>
where
    DI: IntoCursor,
    II: IntoCursor,
    II::Cursor: Cursor<Tag = TagOf<DI>>,
    ValueOf<DI>: Clone,
{
    Intersection::new(data, index, |_, v: &ValueOf<DI>, _| Some(v.clone()))
}
