use std::hash::{BuildHasher, Hash, RandomState};

use super::{Exhausted, HashTable};

/// A type for stateful, single-pass traversal of a [`HashTable`]. See [`HashTable::cursor`] to
/// create one.
///
/// A Cursor walks the table in the same order as [`iter`](HashTable::iter): bucket by bucket,
/// and within each bucket in insertion order. Where an [`Iterator`] hides its position, a
/// Cursor exposes the traversal as a pair of operations: [`has_next`](Cursor::has_next)
/// reports whether an entry remains without advancing, and [`next`](Cursor::next) yields the
/// entry under the Cursor and moves past it.
///
/// The Cursor borrows its HashTable for its whole lifetime, so inserting or removing entries
/// mid-traversal is rejected at compile time rather than left to corrupt the walk at runtime.
pub struct Cursor<'a, K: Hash + Eq, V, B: BuildHasher = RandomState> {
    pub(crate) table: &'a HashTable<K, V, B>,
    pub(crate) bucket: usize,
    pub(crate) pos: usize,
}

impl<'a, K: Hash + Eq, V, B: BuildHasher> Cursor<'a, K, V, B> {
    pub(crate) fn new(table: &'a HashTable<K, V, B>) -> Cursor<'a, K, V, B> {
        let mut cursor = Cursor {
            table,
            bucket: 0,
            pos: 0,
        };

        // Establishes the invariant that the Cursor rests on a yieldable entry or past the end
        // of the bucket array, never on an empty bucket.
        cursor.skip_empty_buckets();
        cursor
    }

    /// Returns true if the Cursor has at least one entry left to yield. Unlike advancing an
    /// [`Iterator`], this doesn't move the Cursor.
    pub fn has_next(&self) -> bool {
        self.bucket < self.table.cap()
    }

    /// Yields the entry under the Cursor and advances to the next one, failing once every
    /// entry in the table has been yielded. The returned references borrow the table itself,
    /// not the Cursor, so they outlive further movement.
    pub fn next(&mut self) -> Result<(&'a K, &'a V), Exhausted> {
        if !self.has_next() {
            return Err(Exhausted);
        }

        let table = self.table;
        let (key, value) = &table.buckets[self.bucket][self.pos];

        self.pos += 1;
        if self.pos == table.buckets[self.bucket].len() {
            self.bucket += 1;
            self.pos = 0;
            self.skip_empty_buckets();
        }

        Ok((key, value))
    }

    /// Moves the Cursor forward until it rests on a non-empty bucket or falls off the end of
    /// the bucket array, restoring the invariant from [`new`](Cursor::new).
    fn skip_empty_buckets(&mut self) {
        while self.bucket < self.table.cap() && self.table.buckets[self.bucket].is_empty() {
            self.bucket += 1;
        }
    }
}
