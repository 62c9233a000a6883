//! Fluent pipeline building on any cursor.
//!
//! ```
//! use tagseq_core::Frame;
//! use tagseq_ops::CursorExt;
//!
//! let sales = Frame::new(vec!["a", "a", "b"], vec![1, 2, 5]).unwrap();
//! let totals = sales.cursor().reduce_sum().materialize();
//! assert_eq!(totals.values(), &vec![3, 5]);
//! ```

use std::ops::Add;

use tagseq_core::{materialize, Cursor, Frame, IntoCursor};

use crate::join::{self, merge::Intersection, union::Union};
use crate::map::{Filter, Map};
use crate::reduce::{self, Reduction};
use crate::stats::Moments;

pub trait CursorExt: Cursor + Sized {
    /// Transform values lazily; tags are untouched.
    fn map_values<O, F>(self, f: F) -> Map<Self, F, O>
    where
        F: FnMut(&Self::Tag, &Self::Value) -> O,
    {
        Map::new(self, f)
    }

    fn filter<P>(self, pred: P) -> Filter<Self, P>
    where
        P: FnMut(&Self::Tag, &Self::Value) -> bool,
    {
        Filter::new(self, pred)
    }

    /// Group-by with explicit `init` / `accumulate` callbacks.
    fn reduce<Acc, I, A>(self, init: I, accumulate: A) -> Reduction<Self, I, A, Acc>
    where
        I: FnMut(&Self::Tag, &Self::Value) -> Acc,
        A: FnMut(&Self::Tag, &Self::Value, Acc) -> Acc,
    {
        Reduction::new(self, init, accumulate)
    }

    fn reduce_sum(self) -> impl Cursor<Tag = Self::Tag, Value = Self::Value>
    where
        Self::Value: Clone + Add<Output = Self::Value>,
    {
        reduce::sum(self)
    }

    fn reduce_max(self) -> impl Cursor<Tag = Self::Tag, Value = Self::Value>
    where
        Self::Value: Clone + PartialOrd,
    {
        reduce::max(self)
    }

    fn reduce_min(self) -> impl Cursor<Tag = Self::Tag, Value = Self::Value>
    where
        Self::Value: Clone + PartialOrd,
    {
        reduce::min(self)
    }

    fn reduce_count(self) -> impl Cursor<Tag = Self::Tag, Value = usize> {
        reduce::count(self)
    }

    fn reduce_moments(self) -> impl Cursor<Tag = Self::Tag, Value = Moments>
    where
        Self::Value: Copy + Into<f64>,
    {
        reduce::moments(self)
    }

    fn reduce_mean(self) -> impl Cursor<Tag = Self::Tag, Value = f64>
    where
        Self::Value: Copy + Into<f64>,
    {
        reduce::mean(self)
    }

    /// Inner join with `self` on the left; `combine` returning `None` drops
    /// the row.
    fn join<R, O, F>(self, right: R, combine: F) -> Intersection<Self, R::Cursor, F, O>
    where
        R: IntoCursor,
        R::Cursor: Cursor<Tag = Self::Tag>,
        F: FnMut(&Self::Tag, &Self::Value, &<R::Cursor as Cursor>::Value) -> Option<O>,
    {
        Intersection::new(self, right, combine)
    }

    fn collate<R, O, F>(self, right: R, op: F) -> impl Cursor<Tag = Self::Tag, Value = O>
    where
        R: IntoCursor,
        R::Cursor: Cursor<Tag = Self::Tag>,
        F: FnMut(&Self::Value, &<R::Cursor as Cursor>::Value) -> O,
    {
        join::collate(self, right, op)
    }

    /// `self[index]`: keep the rows whose tags appear in `index`.
    fn select<R>(self, index: R) -> impl Cursor<Tag = Self::Tag, Value = Self::Value>
    where
        R: IntoCursor,
        R::Cursor: Cursor<Tag = Self::Tag>,
        Self::Value: Clone,
    {
        join::select(self, index)
    }

    /// Concatenate with another sorted input; ties emit `other` first.
    fn union<R>(self, other: R) -> Union<Self, R::Cursor>
    where
        R: IntoCursor,
        R::Cursor: Cursor<Tag = Self::Tag, Value = Self::Value>,
    {
        Union::new(self, other)
    }

    fn materialize(self) -> Frame<Self::Tag, Self::Value>
    where
        Self::Value: Clone,
    {
        materialize(self)
    }
}

impl<C: Cursor> CursorExt for C {}

#[cfg(test)]
mod tests {
    use super::*;
    use tagseq_core::{RangeFrame, TagSet};

    #[test]
    fn fluent_group_mean() {
        let df = Frame::new(vec!["x", "x", "y"], vec![1.0f32, 3.0, 10.0]).unwrap();
        let g = df.cursor().reduce_mean().materialize();
        assert_eq!(g.tags(), &vec!["x", "y"]);
        assert_eq!(g.values(), &vec![2.0, 10.0]);
    }

    #[test]
    fn fluent_select_filter_map() {
        let df = RangeFrame::from_values(vec![5, 6, 7, 8, 9]);
        let idx = TagSet::from_tags(vec![1usize, 2, 4]).unwrap();

        let g = df
            .cursor()
            .select(&idx)
            .filter(|_, v| *v != 7)
            .map_values(|t, v| t * 100 + *v as usize)
            .materialize();

        assert_eq!(g.tags(), &vec![1, 4]);
        assert_eq!(g.values(), &vec![106, 409]);
    }

    #[test]
    fn fluent_union_then_merge_partial_moments() {
        let day1 = Frame::new(vec!["a", "b"], vec![1.0, 4.0]).unwrap();
        let day2 = Frame::new(vec!["a", "a"], vec![2.0, 3.0]).unwrap();

        let partial1 = day1.cursor().reduce_moments().materialize();
        let partial2 = day2.cursor().reduce_moments().materialize();

        let merged = reduce::merge_moments(partial1.cursor().union(&partial2)).materialize();

        assert_eq!(merged.tags(), &vec!["a", "b"]);
        assert_eq!(merged.values()[0].mean(), 2.0);
        assert_eq!(merged.values()[0].count, 3);
        assert_eq!(merged.values()[1].sum, 4.0);
    }

    #[test]
    fn fluent_join_drops_on_none() {
        let a = Frame::new(vec![1, 2, 3], vec![1, 2, 3]).unwrap();
        let b = Frame::new(vec![2, 3], vec![10, 20]).unwrap();

        let g = a
            .cursor()
            .join(&b, |_, l, r| (*r > 10).then(|| l + r))
            .materialize();

        assert_eq!(g.tags(), &vec![3]);
        assert_eq!(g.values(), &vec![23]);
    }
}
