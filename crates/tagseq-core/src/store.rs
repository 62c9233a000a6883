//! Backing stores for the two halves of a tagged sequence.
//!
//! Tags and values live in separate containers. The plain case is a `Vec`;
//! two zero-storage stores cover the common degenerate shapes:
//! - [`RangeTags`]: tags are the row positions themselves, only a count is kept.
//! - [`NoValues`]: a tag-only sequence, every row answers with [`NoValue`].
//!
//! Stores are chosen by type parameter, so the fast paths cost nothing at
//! runtime.

use serde::{Deserialize, Serialize};

/// Storage for the tag column.
pub trait TagStore {
    type Tag: Ord + Clone;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Tag of row `*row`.
    ///
    /// The row is passed by reference so that implicit-index stores can hand
    /// the position back as the tag without storing it. Callers check bounds.
    fn tag_at<'a>(&'a self, row: &'a usize) -> &'a Self::Tag;

    /// First row at or after `from` whose tag is `>= tag`, or `len()` if none.
    fn seek(&self, from: usize, tag: &Self::Tag) -> usize;

    /// Index of the first row whose tag is smaller than its predecessor.
    fn first_unsorted(&self) -> Option<usize>;
}

/// Storage for the value column.
pub trait ValueStore {
    type Value;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value of row `row`. Callers check bounds.
    fn value_at(&self, row: usize) -> &Self::Value;

    fn value_at_mut(&mut self, row: usize) -> &mut Self::Value;
}

impl<T: Ord + Clone> TagStore for Vec<T> {
    type Tag = T;

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn tag_at<'a>(&'a self, row: &'a usize) -> &'a T {
        &self[*row]
    }

    fn seek(&self, from: usize, tag: &T) -> usize {
        let from = from.min(Vec::len(self));
        from + self[from..].partition_point(|t| t < tag)
    }

    fn first_unsorted(&self) -> Option<usize> {
        self.windows(2).position(|w| w[1] < w[0]).map(|i| i + 1)
    }
}

impl<V> ValueStore for Vec<V> {
    type Value = V;

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn value_at(&self, row: usize) -> &V {
        &self[row]
    }

    fn value_at_mut(&mut self, row: usize) -> &mut V {
        &mut self[row]
    }
}

/// Implicit-index tags: `tag(i) == i`, only the row count is stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeTags {
    len: usize,
}

impl RangeTags {
    pub fn new(len: usize) -> Self {
        Self { len }
    }
}

impl TagStore for RangeTags {
    type Tag = usize;

    fn len(&self) -> usize {
        self.len
    }

    fn tag_at<'a>(&'a self, row: &'a usize) -> &'a usize {
        row
    }

    fn seek(&self, from: usize, tag: &usize) -> usize {
        from.max(*tag).min(self.len)
    }

    fn first_unsorted(&self) -> Option<usize> {
        None
    }
}

/// The value of a tag-only row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NoValue;

/// Value store for tag-only sequences. Keeps a row count and nothing else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoValues {
    len: usize,
    #[serde(skip)]
    placeholder: NoValue,
}

impl NoValues {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            placeholder: NoValue,
        }
    }
}

impl ValueStore for NoValues {
    type Value = NoValue;

    fn len(&self) -> usize {
        self.len
    }

    fn value_at(&self, _row: usize) -> &NoValue {
        &self.placeholder
    }

    fn value_at_mut(&mut self, _row: usize) -> &mut NoValue {
        &mut self.placeholder
    }
}
