//! The materialized tagged sequence.
//!
//! A `TaggedSeq` is two reference-counted stores: tags (ascending) and values.
//! Cloning is O(1) and shares both stores. Positional writes go through
//! copy-on-write, so a write through one handle never changes what another
//! handle, or a cursor built from it, observes.

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::store::{NoValues, RangeTags, TagStore, ValueStore};

#[derive(Debug, PartialEq)]
pub struct TaggedSeq<TS, VS> {
    tags: Arc<TS>,
    values: Arc<VS>,
}

/// A sequence with stored tags and values.
pub type Frame<T, V> = TaggedSeq<Vec<T>, Vec<V>>;

/// A sequence tagged by row position.
pub type RangeFrame<V> = TaggedSeq<RangeTags, Vec<V>>;

/// A tag-only sequence, e.g. an index used for selection.
pub type TagSet<T> = TaggedSeq<Vec<T>, NoValues>;

impl<TS, VS> Clone for TaggedSeq<TS, VS> {
    fn clone(&self) -> Self {
        Self {
            tags: Arc::clone(&self.tags),
            values: Arc::clone(&self.values),
        }
    }
}

impl<TS: TagStore, VS: ValueStore> TaggedSeq<TS, VS> {
    /// Build from two stores, checking both invariants with the default config.
    pub fn from_stores(tags: TS, values: VS) -> Result<Self> {
        Self::from_stores_with(tags, values, &EngineConfig::default())
    }

    pub fn from_stores_with(tags: TS, values: VS, cfg: &EngineConfig) -> Result<Self> {
        if tags.len() != values.len() {
            return Err(Error::LengthMismatch {
                tags: tags.len(),
                values: values.len(),
            });
        }
        if cfg.verify_sorted {
            if let Some(index) = tags.first_unsorted() {
                return Err(Error::Unsorted { index });
            }
        }
        Ok(Self::from_parts(tags, values))
    }

    /// Callers guarantee equal lengths and ascending tags.
    pub(crate) fn from_parts(tags: TS, values: VS) -> Self {
        debug_assert_eq!(tags.len(), values.len());
        Self {
            tags: Arc::new(tags),
            values: Arc::new(values),
        }
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn tags(&self) -> &TS {
        &self.tags
    }

    pub fn values(&self) -> &VS {
        &self.values
    }

    /// Tag and value of row `row`.
    pub fn get(&self, row: usize) -> Result<(TS::Tag, &VS::Value)> {
        self.check_bounds(row)?;
        Ok((self.tags.tag_at(&row).clone(), self.values.value_at(row)))
    }

    pub fn value(&self, row: usize) -> Result<&VS::Value> {
        self.check_bounds(row)?;
        Ok(self.values.value_at(row))
    }

    /// Whether both stores are shared with `other`.
    pub fn shares_storage(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.tags, &other.tags) && Arc::ptr_eq(&self.values, &other.values)
    }

    fn check_bounds(&self, row: usize) -> Result<()> {
        if row >= self.len() {
            return Err(Error::OutOfBounds {
                index: row,
                len: self.len(),
            });
        }
        Ok(())
    }
}

impl<TS: TagStore, VS: ValueStore + Clone> TaggedSeq<TS, VS> {
    /// Mutable access to the value of row `row`.
    ///
    /// If the value store is shared with other handles it is copied first.
    /// Tags are never writable in place; they carry the sort order.
    pub fn value_mut(&mut self, row: usize) -> Result<&mut VS::Value> {
        self.check_bounds(row)?;
        Ok(Arc::make_mut(&mut self.values).value_at_mut(row))
    }

    pub fn set_value(&mut self, row: usize, value: VS::Value) -> Result<()> {
        *self.value_mut(row)? = value;
        Ok(())
    }
}

impl<T: Ord + Clone, V> TaggedSeq<Vec<T>, Vec<V>> {
    /// Build from literal tag and value lists.
    pub fn new(tags: Vec<T>, values: Vec<V>) -> Result<Self> {
        Self::from_stores(tags, values)
    }

    pub fn empty() -> Self {
        Self::from_parts(Vec::new(), Vec::new())
    }
}

impl<V> TaggedSeq<RangeTags, Vec<V>> {
    /// Tag `values` by position. No tag storage is allocated.
    pub fn from_values(values: Vec<V>) -> Self {
        Self::from_parts(RangeTags::new(values.len()), values)
    }
}

impl<T: Ord + Clone> TaggedSeq<Vec<T>, NoValues> {
    /// A tag-only sequence. No value storage is allocated.
    pub fn from_tags(tags: Vec<T>) -> Result<Self> {
        let values = NoValues::new(tags.len());
        Self::from_stores(tags, values)
    }

    /// Iterate the tags; every value is [`NoValue`](crate::store::NoValue).
    pub fn tag_iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.tags.iter()
    }
}
