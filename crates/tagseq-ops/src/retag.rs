//! Re-keying: take new tags from an index-aligned sequence and stably re-sort.
//!
//! The tag source and the value source share row order. Row `i` of the output
//! is tagged with the tag source's *value* at `i`. Rows are then ordered by the
//! new tag; rows sharing a new tag keep their original relative order. This is
//! the one place that restores the sort invariant after a key change.

use tagseq_core::{
    materialize, Cursor, Error, Frame, Result, TagStore, TaggedSeq, ValueStore,
};

use crate::map::Map;

/// Cursor over a re-keyed sequence.
///
/// The stable permutation is computed up front; rows are read through it.
pub struct Retag<KT, KV, TS, VS> {
    keys: TaggedSeq<KT, KV>,
    values: TaggedSeq<TS, VS>,
    order: Vec<usize>,
    pos: usize,
}

impl<KT, KV, TS, VS> Retag<KT, KV, TS, VS>
where
    KT: TagStore,
    KV: ValueStore,
    KV::Value: Ord + Clone,
    TS: TagStore,
    VS: ValueStore,
{
    /// Fails with [`Error::LengthMismatch`] before any work if the two
    /// sequences differ in length.
    pub fn new(keys: &TaggedSeq<KT, KV>, values: &TaggedSeq<TS, VS>) -> Result<Self> {
        if keys.len() != values.len() {
            return Err(Error::LengthMismatch {
                tags: keys.len(),
                values: values.len(),
            });
        }

        let new_tags = keys.values();
        let mut order: Vec<usize> = (0..keys.len()).collect();
        // `sort_by` is stable: equal keys keep their row order.
        order.sort_by(|&a, &b| new_tags.value_at(a).cmp(new_tags.value_at(b)));

        #[cfg(feature = "tracing")]
        tracing::trace!(rows = order.len(), "retag permutation built");

        Ok(Self {
            keys: keys.clone(),
            values: values.clone(),
            order,
            pos: 0,
        })
    }

    fn key(&self, row: usize) -> &KV::Value {
        self.keys.values().value_at(row)
    }
}

impl<KT, KV, TS, VS> Cursor for Retag<KT, KV, TS, VS>
where
    KT: TagStore,
    KV: ValueStore,
    KV::Value: Ord + Clone,
    TS: TagStore,
    VS: ValueStore,
{
    type Tag = KV::Value;
    type Value = VS::Value;

    fn end(&self) -> bool {
        self.pos >= self.order.len()
    }

    fn tag(&self) -> &KV::Value {
        assert!(!self.end(), "tag() called on an exhausted cursor");
        self.key(self.order[self.pos])
    }

    fn value(&self) -> &VS::Value {
        assert!(!self.end(), "value() called on an exhausted cursor");
        self.values.values().value_at(self.order[self.pos])
    }

    fn next(&mut self) {
        if !self.end() {
            self.pos += 1;
        }
    }

    fn advance_to_tag(&mut self, tag: &KV::Value) {
        let from = self.pos.min(self.order.len());
        self.pos = from
            + self.order[from..].partition_point(|&row| self.key(row) < tag);
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.order.len().saturating_sub(self.pos);
        (left, Some(left))
    }
}

/// Re-key `values` by the values of `keys` and materialize the result.
pub fn retag<KT, KV, TS, VS>(
    keys: &TaggedSeq<KT, KV>,
    values: &TaggedSeq<TS, VS>,
) -> Result<Frame<KV::Value, VS::Value>>
where
    KT: TagStore,
    KV: ValueStore,
    KV::Value: Ord + Clone,
    TS: TagStore,
    VS: ValueStore,
    VS::Value: Clone,
{
    Ok(materialize(Retag::new(keys, values)?))
}

/// Re-key every row by `key(tag, value)` and materialize the result.
pub fn retag_by<TS, VS, K, F>(seq: &TaggedSeq<TS, VS>, key: F) -> Result<Frame<K, VS::Value>>
where
    TS: TagStore,
    VS: ValueStore,
    VS::Value: Clone,
    K: Ord + Clone,
    F: FnMut(&TS::Tag, &VS::Value) -> K,
{
    let keys = materialize(Map::new(seq, key));
    retag(&keys, seq)
}
