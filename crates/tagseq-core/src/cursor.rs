//! The cursor protocol, the source cursor and the materializer.
//!
//! A cursor is a single-pass, forward-only view over rows in ascending tag
//! order. Derived cursors (reductions, joins, unions, ...) are built purely on
//! the five protocol operations, so they compose without knowing whether a
//! child is a stored sequence or another pipeline stage.
//!
//! Nothing is allocated while a pipeline is being built or driven; only
//! [`materialize`] allocates the output storage.

use crate::config::EngineConfig;
use crate::seq::{Frame, TagSet, TaggedSeq};
use crate::store::{NoValues, TagStore, ValueStore};

/// Pull-based row cursor.
///
/// Invariants:
/// - Rows come out in non-decreasing tag order.
/// - `tag()` and `value()` are only valid while `!end()`; they panic otherwise.
/// - `next()` at end is a no-op.
/// - `advance_to_tag(t)` never moves backward and is idempotent for
///   non-decreasing `t`.
pub trait Cursor {
    type Tag: Ord + Clone;
    type Value;

    fn end(&self) -> bool;

    fn tag(&self) -> &Self::Tag;

    fn value(&self) -> &Self::Value;

    /// Step exactly one row forward.
    fn next(&mut self);

    /// Move to the first row whose tag is `>= tag`, or to the end.
    fn advance_to_tag(&mut self, tag: &Self::Tag);

    /// Lower and optional upper bound on the rows left, like `Iterator::size_hint`.
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, None)
    }
}

impl<C: Cursor + ?Sized> Cursor for &mut C {
    type Tag = C::Tag;
    type Value = C::Value;

    fn end(&self) -> bool {
        (**self).end()
    }

    fn tag(&self) -> &C::Tag {
        (**self).tag()
    }

    fn value(&self) -> &C::Value {
        (**self).value()
    }

    fn next(&mut self) {
        (**self).next()
    }

    fn advance_to_tag(&mut self, tag: &C::Tag) {
        (**self).advance_to_tag(tag)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (**self).size_hint()
    }
}

/// Conversion into a cursor. Sequences become [`Source`] cursors (an O(1)
/// handle clone); cursors pass through unchanged.
pub trait IntoCursor {
    type Cursor: Cursor;

    fn into_cursor(self) -> Self::Cursor;
}

impl<C: Cursor> IntoCursor for C {
    type Cursor = C;

    fn into_cursor(self) -> C {
        self
    }
}

impl<TS: TagStore, VS: ValueStore> IntoCursor for TaggedSeq<TS, VS> {
    type Cursor = Source<TS, VS>;

    fn into_cursor(self) -> Source<TS, VS> {
        Source::new(self)
    }
}

impl<TS: TagStore, VS: ValueStore> IntoCursor for &TaggedSeq<TS, VS> {
    type Cursor = Source<TS, VS>;

    fn into_cursor(self) -> Source<TS, VS> {
        Source::new(self.clone())
    }
}

impl<TS: TagStore, VS: ValueStore> TaggedSeq<TS, VS> {
    /// A source cursor positioned at the first row.
    pub fn cursor(&self) -> Source<TS, VS> {
        Source::new(self.clone())
    }
}

/// Cursor over a stored sequence.
///
/// Seeking is a binary search over the remaining tags, or O(1) for
/// implicit-index tags.
#[derive(Debug)]
pub struct Source<TS, VS> {
    seq: TaggedSeq<TS, VS>,
    row: usize,
}

impl<TS: TagStore, VS: ValueStore> Source<TS, VS> {
    pub fn new(seq: TaggedSeq<TS, VS>) -> Self {
        Self { seq, row: 0 }
    }

    /// Row index of the current position.
    pub fn position(&self) -> usize {
        self.row
    }
}

impl<TS: TagStore, VS: ValueStore> Cursor for Source<TS, VS> {
    type Tag = TS::Tag;
    type Value = VS::Value;

    fn end(&self) -> bool {
        self.row >= self.seq.len()
    }

    fn tag(&self) -> &TS::Tag {
        assert!(!self.end(), "tag() called on an exhausted cursor");
        self.seq.tags().tag_at(&self.row)
    }

    fn value(&self) -> &VS::Value {
        assert!(!self.end(), "value() called on an exhausted cursor");
        self.seq.values().value_at(self.row)
    }

    fn next(&mut self) {
        if !self.end() {
            self.row += 1;
        }
    }

    fn advance_to_tag(&mut self, tag: &TS::Tag) {
        self.row = self.seq.tags().seek(self.row, tag);
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.seq.len().saturating_sub(self.row);
        (left, Some(left))
    }
}

/// Drain a cursor into a freshly allocated sequence.
pub fn materialize<C>(input: C) -> Frame<<C::Cursor as Cursor>::Tag, <C::Cursor as Cursor>::Value>
where
    C: IntoCursor,
    <C::Cursor as Cursor>::Value: Clone,
{
    materialize_with(input, &EngineConfig::default())
}

/// [`materialize`] with an explicit config (caps the up-front reservation).
pub fn materialize_with<C>(
    input: C,
    cfg: &EngineConfig,
) -> Frame<<C::Cursor as Cursor>::Tag, <C::Cursor as Cursor>::Value>
where
    C: IntoCursor,
    <C::Cursor as Cursor>::Value: Clone,
{
    let mut cursor = input.into_cursor();

    #[cfg(feature = "tracing")]
    let _span = tracing::trace_span!("materialize").entered();

    let reserve = reserve_rows(&cursor, cfg);
    let mut tags = Vec::with_capacity(reserve);
    let mut values = Vec::with_capacity(reserve);
    while !cursor.end() {
        tags.push(cursor.tag().clone());
        values.push(cursor.value().clone());
        cursor.next();
    }

    #[cfg(feature = "tracing")]
    tracing::trace!(rows = tags.len(), reserved = reserve, "materialized");

    TaggedSeq::from_parts(tags, values)
}

/// Drain a cursor into a tag-only sequence, dropping its values.
pub fn materialize_tags<C: IntoCursor>(input: C) -> TagSet<<C::Cursor as Cursor>::Tag> {
    let mut cursor = input.into_cursor();
    let mut tags = Vec::with_capacity(reserve_rows(&cursor, &EngineConfig::default()));
    while !cursor.end() {
        tags.push(cursor.tag().clone());
        cursor.next();
    }
    let values = NoValues::new(tags.len());
    TaggedSeq::from_parts(tags, values)
}

fn reserve_rows<C: Cursor>(cursor: &C, cfg: &EngineConfig) -> usize {
    let (lower, upper) = cursor.size_hint();
    upper.unwrap_or(lower).min(cfg.max_reserve_rows)
}

/// Iterator adapter yielding owned `(tag, value)` pairs.
pub struct Rows<C> {
    cursor: C,
}

/// Walk any cursor (or sequence) as an iterator of cloned rows.
pub fn rows<C: IntoCursor>(input: C) -> Rows<C::Cursor> {
    Rows {
        cursor: input.into_cursor(),
    }
}

impl<C> Iterator for Rows<C>
where
    C: Cursor,
    C::Value: Clone,
{
    type Item = (C::Tag, C::Value);

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor.end() {
            return None;
        }
        let row = (self.cursor.tag().clone(), self.cursor.value().clone());
        self.cursor.next();
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cursor.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seq::RangeFrame;
    use crate::store::NoValue;

    #[test]
    fn find_tag() {
        let df = Frame::new(vec![1, 2, 3, 4], vec![10., 20., 30., 40.]).unwrap();
        let mut c = df.cursor();

        c.advance_to_tag(&2);

        assert!(!c.end());
        assert_eq!(*c.tag(), 2);
        assert_eq!(*c.value(), 20.);
        assert_eq!(df.get(c.position()).unwrap(), (2, &20.));
    }

    #[test]
    fn find_tag_missing() {
        let df = Frame::new(vec![1, 2, 3, 4], vec![10., 20., 30., 40.]).unwrap();
        let mut c = df.cursor();

        c.advance_to_tag(&20);

        assert!(c.end());
    }

    #[test]
    fn seek_between_tags_lands_on_next_greater() {
        let df = Frame::new(vec![1, 3, 5], vec!['a', 'b', 'c']).unwrap();
        let mut c = df.cursor();

        c.advance_to_tag(&2);
        assert_eq!((*c.tag(), *c.value()), (3, 'b'));

        // Idempotent, and never backward.
        c.advance_to_tag(&2);
        c.advance_to_tag(&3);
        assert_eq!(*c.tag(), 3);
        c.advance_to_tag(&0);
        assert_eq!(*c.tag(), 3);
    }

    #[test]
    fn materialize_is_identity() {
        let original = Frame::new(vec![1, 2, 3, 4], vec![10., 20., 30., 40.]).unwrap();
        let df = materialize(&original);

        assert_eq!(df, original);
        assert!(!df.shares_storage(&original));
    }

    #[test]
    fn materialize_empty() {
        let df: Frame<i32, i32> = materialize(Frame::<i32, i32>::empty());
        assert!(df.is_empty());
    }

    #[test]
    fn materialize_with_small_reserve_cap() {
        let cfg = EngineConfig {
            max_reserve_rows: 1,
            ..Default::default()
        };
        let df = materialize_with(RangeFrame::from_values(vec![5, 6, 7]), &cfg);
        assert_eq!(df.tags(), &vec![0, 1, 2]);
        assert_eq!(df.values(), &vec![5, 6, 7]);
    }

    #[test]
    fn range_tags_advance_to_tag() {
        let df = RangeFrame::from_values(vec![-1, -2, -3, -4, -5]);
        let mut c = df.cursor();

        c.advance_to_tag(&3);

        assert_eq!(*c.tag(), 3);
        assert_eq!(*c.value(), -4);
        assert_eq!(df.get(c.position()).unwrap(), (3, &-4));
    }

    #[test]
    fn range_tags_advance_to_tag_missing() {
        let df = RangeFrame::from_values(vec![-1, -2, -3, -4, -5]);
        let mut c = df.cursor();

        c.advance_to_tag(&20);

        assert!(c.end());
        c.next();
        assert!(c.end());
    }

    #[test]
    fn materialize_tags_drops_values() {
        let df = Frame::new(vec![1, 2, 2], vec!["x", "y", "z"]).unwrap();
        let tags = materialize_tags(&df);
        assert_eq!(tags.tags(), &vec![1, 2, 2]);
        assert_eq!(tags.value(2).unwrap(), &NoValue);
    }

    #[test]
    fn rows_iterates_clones() {
        let df = Frame::new(vec!["a", "b"], vec![1, 2]).unwrap();
        let collected: Vec<_> = rows(&df).collect();
        assert_eq!(collected, vec![("a", 1), ("b", 2)]);
    }

    #[test]
    fn borrowed_cursor_keeps_its_position() {
        let df = Frame::new(vec![1, 2, 3], vec![1, 2, 3]).unwrap();
        let mut c = df.cursor();
        c.next();
        let rest = materialize(&mut c);
        assert_eq!(rest.tags(), &vec![2, 3]);
        assert!(c.end());
    }

    #[test]
    #[should_panic(expected = "exhausted cursor")]
    fn tag_at_end_panics() {
        let df = Frame::<i32, i32>::empty();
        let c = df.cursor();
        let _ = c.tag();
    }
}
