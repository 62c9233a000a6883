//! Group-by reduction: one output row per run of equal tags.
//!
//! Precondition: the input is tag-sorted, so equal tags are contiguous.

use std::ops::Add;

use tagseq_core::{materialize_tags, Cursor, IntoCursor, NoValue, TagSet};

use crate::map::Map;
use crate::stats::Moments;
use crate::{TagOf, ValueOf};

/// Folds each run of equal tags with `init` (first row) and `accumulate`
/// (every following row of the run).
pub struct Reduction<C: Cursor, I, A, Acc> {
    input: C,
    init: I,
    accumulate: A,
    current: Option<(C::Tag, Acc)>,
}

impl<C, I, A, Acc> Reduction<C, I, A, Acc>
where
    C: Cursor,
    I: FnMut(&C::Tag, &C::Value) -> Acc,
    A: FnMut(&C::Tag, &C::Value, Acc) -> Acc,
{
    pub fn new<In: IntoCursor<Cursor = C>>(input: In, init: I, accumulate: A) -> Self {
        let mut reduction = Self {
            input: input.into_cursor(),
            init,
            accumulate,
            current: None,
        };
        reduction.fold_run();
        reduction
    }

    fn fold_run(&mut self) {
        if self.input.end() {
            self.current = None;
            return;
        }

        let tag = self.input.tag().clone();
        let mut acc = (self.init)(&tag, self.input.value());
        self.input.next();
        while !self.input.end() && *self.input.tag() == tag {
            acc = (self.accumulate)(self.input.tag(), self.input.value(), acc);
            self.input.next();
        }
        self.current = Some((tag, acc));
    }
}

impl<C, I, A, Acc> Cursor for Reduction<C, I, A, Acc>
where
    C: Cursor,
    I: FnMut(&C::Tag, &C::Value) -> Acc,
    A: FnMut(&C::Tag, &C::Value, Acc) -> Acc,
{
    type Tag = C::Tag;
    type Value = Acc;

    fn end(&self) -> bool {
        self.current.is_none()
    }

    fn tag(&self) -> &C::Tag {
        &self
            .current
            .as_ref()
            .expect("tag() called on an exhausted cursor")
            .0
    }

    fn value(&self) -> &Acc {
        &self
            .current
            .as_ref()
            .expect("value() called on an exhausted cursor")
            .1
    }

    fn next(&mut self) {
        self.fold_run();
    }

    fn advance_to_tag(&mut self, tag: &C::Tag) {
        if matches!(&self.current, Some((current, _)) if current < tag) {
            // The input already sits on the first row past the current run.
            self.input.advance_to_tag(tag);
            self.fold_run();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let pending = usize::from(self.current.is_some());
        let (lower, upper) = self.input.size_hint();
        (
            pending + usize::from(lower > 0),
            upper.and_then(|u| u.checked_add(pending)),
        )
    }
}

/// Sum of each run.
pub fn sum<In>(input: In) -> impl Cursor<Tag = TagOf<In>, Value = ValueOf<In>>
where
    In: IntoCursor,
    ValueOf<In>: Clone + Add<Output = ValueOf<In>>,
{
    Reduction::new(input, |_, v| v.clone(), |_, v, acc| acc + v.clone())
}

/// Largest value of each run (first one wins among equals).
pub fn max<In>(input: In) -> impl Cursor<Tag = TagOf<In>, Value = ValueOf<In>>
where
    In: IntoCursor,
    ValueOf<In>: Clone + PartialOrd,
{
    Reduction::new(
        input,
        |_, v| v.clone(),
        |_, v, acc| if *v > acc { v.clone() } else { acc },
    )
}

/// Smallest value of each run (first one wins among equals).
pub fn min<In>(input: In) -> impl Cursor<Tag = TagOf<In>, Value = ValueOf<In>>
where
    In: IntoCursor,
    ValueOf<In>: Clone + PartialOrd,
{
    Reduction::new(
        input,
        |_, v| v.clone(),
        |_, v, acc| if *v < acc { v.clone() } else { acc },
    )
}

/// Number of rows in each run.
pub fn count<In: IntoCursor>(input: In) -> impl Cursor<Tag = TagOf<In>, Value = usize> {
    Reduction::new(input, |_, _| 1usize, |_, _, n| n + 1)
}

/// Fold each run with a binary operator, starting from its first value.
pub fn reduce_with<In, F>(input: In, mut op: F) -> impl Cursor<Tag = TagOf<In>, Value = ValueOf<In>>
where
    In: IntoCursor,
    ValueOf<In>: Clone,
    F: FnMut(&ValueOf<In>, &ValueOf<In>) -> ValueOf<In>,
{
    Reduction::new(input, |_, v| v.clone(), move |_, v, acc| op(&acc, v))
}

/// Count, sum and sum of squares of each run.
pub fn moments<In>(input: In) -> impl Cursor<Tag = TagOf<In>, Value = Moments>
where
    In: IntoCursor,
    ValueOf<In>: Copy + Into<f64>,
{
    Reduction::new(
        input,
        |_, v| Moments::of((*v).into()),
        |_, v, acc| acc.push((*v).into()),
    )
}

/// Merge runs of partial [`Moments`], e.g. after concatenating two aggregates.
pub fn merge_moments<In>(input: In) -> impl Cursor<Tag = TagOf<In>, Value = Moments>
where
    In: IntoCursor,
    In::Cursor: Cursor<Value = Moments>,
{
    Reduction::new(input, |_, m| *m, |_, m, acc| acc.merge(m))
}

pub fn mean<In>(input: In) -> impl Cursor<Tag = TagOf<In>, Value = f64>
where
    In: IntoCursor,
    ValueOf<In>: Copy + Into<f64>,
{
    Map::new(moments(input), |_, m| m.mean())
}

/// Population variance of each run.
pub fn variance<In>(input: In) -> impl Cursor<Tag = TagOf<In>, Value = f64>
where
    In: IntoCursor,
    ValueOf<In>: Copy + Into<f64>,
{
    Map::new(moments(input), |_, m| m.variance())
}

/// Population standard deviation of each run.
pub fn std_dev<In>(input: In) -> impl Cursor<Tag = TagOf<In>, Value = f64>
where
    In: IntoCursor,
    ValueOf<In>: Copy + Into<f64>,
{
    Map::new(moments(input), |_, m| m.std_dev())
}

/// The distinct tags of a sorted input, as a tag-only sequence.
pub fn unique_tags<In: IntoCursor>(input: In) -> TagSet<TagOf<In>> {
    materialize_tags(Reduction::new(input, |_, _| NoValue, |_, _, acc| acc))
}
