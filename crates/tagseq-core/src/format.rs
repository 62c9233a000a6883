//! Plain-text rendering of sequences.
//!
//! Rows are read through the cursor protocol: one `tag<TAB>value` line per row.
//! Tag-only sequences render as a bracketed list.

use std::fmt;

use crate::cursor::Cursor;
use crate::seq::TaggedSeq;
use crate::store::{NoValues, TagStore};

impl<TS, V> fmt::Display for TaggedSeq<TS, Vec<V>>
where
    TS: TagStore,
    TS::Tag: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut c = self.cursor();
        while !c.end() {
            writeln!(f, "{}\t{}", c.tag(), c.value())?;
            c.next();
        }
        Ok(())
    }
}

impl<TS> fmt::Display for TaggedSeq<TS, NoValues>
where
    TS: TagStore,
    TS::Tag: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut c = self.cursor();
        write!(f, "[")?;
        while !c.end() {
            write!(f, "{}, ", c.tag())?;
            c.next();
        }
        write!(f, "]")
    }
}
