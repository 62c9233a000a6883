//! Per-row transforms: value mapping and filtering. Tags pass through.

use tagseq_core::{Cursor, IntoCursor};

/// Replaces each value with `f(tag, value)`, computed once per row.
pub struct Map<C, F, O> {
    input: C,
    f: F,
    current: Option<O>,
}

impl<C, F, O> Map<C, F, O>
where
    C: Cursor,
    F: FnMut(&C::Tag, &C::Value) -> O,
{
    pub fn new<In: IntoCursor<Cursor = C>>(input: In, f: F) -> Self {
        let mut map = Self {
            input: input.into_cursor(),
            f,
            current: None,
        };
        map.settle();
        map
    }

    fn settle(&mut self) {
        self.current = if self.input.end() {
            None
        } else {
            Some((self.f)(self.input.tag(), self.input.value()))
        };
    }
}

impl<C, F, O> Cursor for Map<C, F, O>
where
    C: Cursor,
    F: FnMut(&C::Tag, &C::Value) -> O,
{
    type Tag = C::Tag;
    type Value = O;

    fn end(&self) -> bool {
        self.input.end()
    }

    fn tag(&self) -> &C::Tag {
        self.input.tag()
    }

    fn value(&self) -> &O {
        self.current
            .as_ref()
            .expect("value() called on an exhausted cursor")
    }

    fn next(&mut self) {
        if !self.input.end() {
            self.input.next();
            self.settle();
        }
    }

    fn advance_to_tag(&mut self, tag: &C::Tag) {
        if !self.input.end() && self.input.tag() < tag {
            self.input.advance_to_tag(tag);
            self.settle();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.input.size_hint()
    }
}

/// Keeps the rows for which `pred(tag, value)` holds.
pub struct Filter<C, P> {
    input: C,
    pred: P,
}

impl<C, P> Filter<C, P>
where
    C: Cursor,
    P: FnMut(&C::Tag, &C::Value) -> bool,
{
    pub fn new<In: IntoCursor<Cursor = C>>(input: In, pred: P) -> Self {
        let mut filter = Self {
            input: input.into_cursor(),
            pred,
        };
        filter.skip_rejected();
        filter
    }

    fn skip_rejected(&mut self) {
        while !self.input.end() && !(self.pred)(self.input.tag(), self.input.value()) {
            self.input.next();
        }
    }
}

impl<C, P> Cursor for Filter<C, P>
where
    C: Cursor,
    P: FnMut(&C::Tag, &C::Value) -> bool,
{
    type Tag = C::Tag;
    type Value = C::Value;

    fn end(&self) -> bool {
        self.input.end()
    }

    fn tag(&self) -> &C::Tag {
        self.input.tag()
    }

    fn value(&self) -> &C::Value {
        self.input.value()
    }

    fn next(&mut self) {
        self.input.next();
        self.skip_rejected();
    }

    fn advance_to_tag(&mut self, tag: &C::Tag) {
        self.input.advance_to_tag(tag);
        self.skip_rejected();
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.input.size_hint().1)
    }
}
