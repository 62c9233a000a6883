//! Merge join: the generalized inner join.
//!
//! Right-driven two-finger merge. For each right row the left cursor seeks to
//! the right row's tag; on an exact match `combine(left_tag, left_value,
//! right_value)` decides the output. Returning `None` drops the row.
//!
//! Properties:
//! - Output tags are the right cursor's tags, in order.
//! - Every right row with a match yields (at most) one row, so duplicate right
//!   tags are preserved and the output is never longer than the right input.
//! - Duplicate left tags: **first match wins**. The left seek stops on the
//!   first row of the run and stays there for every right row with that tag;
//!   the rest of the left run is never combined. Reduce the left side first
//!   to fold such runs.

use tagseq_core::{Cursor, IntoCursor};

pub struct Intersection<L, R, F, O> {
    left: L,
    right: R,
    combine: F,
    current: Option<O>,
}

impl<L, R, F, O> Intersection<L, R, F, O>
where
    L: Cursor,
    R: Cursor<Tag = L::Tag>,
    F: FnMut(&L::Tag, &L::Value, &R::Value) -> Option<O>,
{
    pub fn new<LI, RI>(left: LI, right: RI, combine: F) -> Self
    where
        LI: IntoCursor<Cursor = L>,
        RI: IntoCursor<Cursor = R>,
    {
        let mut join = Self {
            left: left.into_cursor(),
            right: right.into_cursor(),
            combine,
            current: None,
        };
        join.settle();
        join
    }

    /// Move the right cursor to the next row that produces output.
    fn settle(&mut self) {
        self.current = None;
        while !self.right.end() {
            self.left.advance_to_tag(self.right.tag());
            if !self.left.end() && self.left.tag() == self.right.tag() {
                if let Some(out) =
                    (self.combine)(self.left.tag(), self.left.value(), self.right.value())
                {
                    self.current = Some(out);
                    return;
                }
            }
            self.right.next();
        }
    }
}

impl<L, R, F, O> Cursor for Intersection<L, R, F, O>
where
    L: Cursor,
    R: Cursor<Tag = L::Tag>,
    F: FnMut(&L::Tag, &L::Value, &R::Value) -> Option<O>,
{
    type Tag = L::Tag;
    type Value = O;

    fn end(&self) -> bool {
        self.current.is_none()
    }

    fn tag(&self) -> &L::Tag {
        assert!(!self.end(), "tag() called on an exhausted cursor");
        self.right.tag()
    }

    fn value(&self) -> &O {
        self.current
            .as_ref()
            .expect("value() called on an exhausted cursor")
    }

    fn next(&mut self) {
        if !self.end() {
            self.right.next();
            self.settle();
        }
    }

    fn advance_to_tag(&mut self, tag: &L::Tag) {
        if !self.end() && self.right.tag() < tag {
            self.right.advance_to_tag(tag);
            self.settle();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let pending = usize::from(!self.end());
        (pending, self.right.size_hint().1)
    }
}
