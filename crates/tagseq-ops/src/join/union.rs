//! Union: the generalized outer join / concatenate.
//!
//! Interleaves two cursors of the same tag and value type in tag order. On a
//! tie the **right** row is emitted first, then the left one. Nothing is
//! dropped: the output length is the sum of the input lengths.

use tagseq_core::{Cursor, IntoCursor};

pub struct Union<L, R> {
    left: L,
    right: R,
    take_left: bool,
}

impl<L, R> Union<L, R>
where
    L: Cursor,
    R: Cursor<Tag = L::Tag, Value = L::Value>,
{
    pub fn new<LI, RI>(left: LI, right: RI) -> Self
    where
        LI: IntoCursor<Cursor = L>,
        RI: IntoCursor<Cursor = R>,
    {
        let mut union = Self {
            left: left.into_cursor(),
            right: right.into_cursor(),
            take_left: false,
        };
        union.pick();
        union
    }

    fn pick(&mut self) {
        self.take_left =
            !self.left.end() && (self.right.end() || self.left.tag() < self.right.tag());
    }
}

impl<L, R> Cursor for Union<L, R>
where
    L: Cursor,
    R: Cursor<Tag = L::Tag, Value = L::Value>,
{
    type Tag = L::Tag;
    type Value = L::Value;

    fn end(&self) -> bool {
        self.left.end() && self.right.end()
    }

    fn tag(&self) -> &L::Tag {
        if self.take_left {
            self.left.tag()
        } else {
            self.right.tag()
        }
    }

    fn value(&self) -> &L::Value {
        if self.take_left {
            self.left.value()
        } else {
            self.right.value()
        }
    }

    fn next(&mut self) {
        if self.take_left {
            self.left.next();
        } else {
            self.right.next();
        }
        self.pick();
    }

    fn advance_to_tag(&mut self, tag: &L::Tag) {
        self.left.advance_to_tag(tag);
        self.right.advance_to_tag(tag);
        self.pick();
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (ll, lu) = self.left.size_hint();
        let (rl, ru) = self.right.size_hint();
        let upper = match (lu, ru) {
            (Some(a), Some(b)) => a.checked_add(b),
            _ => None,
        };
        (ll.saturating_add(rl), upper)
    }
}

/// Concatenate two sorted inputs into one sorted stream.
pub fn concatenate<LI, RI>(left: LI, right: RI) -> Union<LI::Cursor, RI::Cursor>
where
    LI: IntoCursor,
    RI: IntoCursor,
    RI::Cursor: Cursor<Tag = crate::TagOf<LI>, Value = crate::ValueOf<LI>>,
{
    Union::new(left, right)
}
