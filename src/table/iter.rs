use std::hash::{BuildHasher, Hash};
use std::iter::FusedIterator;

use std::slice::Iter as SliceIter;
use std::slice::IterMut as SliceIterMut;
use std::vec::IntoIter as VecIntoIter;

use super::{HashTable, Bucket};

impl<K: Hash + Eq, V, B: BuildHasher> IntoIterator for HashTable<K, V, B> {
    type Item = (K, V);

    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            len: self.len,
            outer: self.buckets.into_iter(),
            inner: VecIntoIter::default(),
        }
    }
}

/// An owned type for owned iteration over a [`HashTable`]'s entries, yielded bucket by bucket.
/// See [`HashTable::into_iter`].
pub struct IntoIter<K, V> {
    pub(crate) outer: VecIntoIter<Bucket<K, V>>,
    pub(crate) inner: VecIntoIter<(K, V)>,
    pub(crate) len: usize,
}

impl<K: Hash + Eq, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.inner.next() {
                self.len -= 1;
                return Some(entry);
            }

            // Move on to the next bucket, or finish if there are none left.
            self.inner = self.outer.next()?.into_iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<K: Hash + Eq, V> FusedIterator for IntoIter<K, V> {}

impl<K: Hash + Eq, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.len
    }
}

impl<'a, K: Hash + Eq, V, B: BuildHasher> IntoIterator for &'a HashTable<K, V, B> {
    type Item = (&'a K, &'a V);

    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            len: self.len,
            outer: self.buckets.iter(),
            inner: SliceIter::default(),
        }
    }
}

/// A borrowed type for iteration over a [`HashTable`]'s entries as key-value reference pairs,
/// yielded bucket by bucket. See [`HashTable::iter`].
pub struct Iter<'a, K, V> {
    pub(crate) outer: SliceIter<'a, Bucket<K, V>>,
    pub(crate) inner: SliceIter<'a, (K, V)>,
    pub(crate) len: usize,
}

impl<'a, K: Hash + Eq, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((key, value)) = self.inner.next() {
                self.len -= 1;
                return Some((key, value));
            }

            // Move on to the next bucket, or finish if there are none left.
            self.inner = self.outer.next()?.iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<K: Hash + Eq, V> FusedIterator for Iter<'_, K, V> {}

impl<K: Hash + Eq, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.len
    }
}

/// An owned type for owned iteration over a [`HashTable`]'s keys. See
/// [`HashTable::into_keys`].
pub struct IntoKeys<K, V>(
    pub(crate) IntoIter<K, V>
);

impl<K: Hash + Eq, V> Iterator for IntoKeys<K, V> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|e| e.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K: Hash + Eq, V> FusedIterator for IntoKeys<K, V> {}

impl<K: Hash + Eq, V> ExactSizeIterator for IntoKeys<K, V> {}

/// A borrowed type for iteration over a [`HashTable`]'s keys. See [`HashTable::keys`].
pub struct Keys<'a, K, V>(
    pub(crate) Iter<'a, K, V>
);

impl<'a, K: Hash + Eq, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|e| e.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K: Hash + Eq, V> FusedIterator for Keys<'_, K, V> {}

impl<K: Hash + Eq, V> ExactSizeIterator for Keys<'_, K, V> {}

/// An owned type for owned iteration over a [`HashTable`]'s values. See
/// [`HashTable::into_values`].
pub struct IntoValues<K, V>(
    pub(crate) IntoIter<K, V>
);

impl<K: Hash + Eq, V> Iterator for IntoValues<K, V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|e| e.1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K: Hash + Eq, V> FusedIterator for IntoValues<K, V> {}

impl<K: Hash + Eq, V> ExactSizeIterator for IntoValues<K, V> {}

/// A borrowed type for iteration over a [`HashTable`]'s values as mutable references. See
/// [`HashTable::values_mut`].
pub struct ValuesMut<'a, K, V> {
    pub(crate) outer: SliceIterMut<'a, Bucket<K, V>>,
    pub(crate) inner: SliceIterMut<'a, (K, V)>,
    pub(crate) len: usize,
}

impl<'a, K: Hash + Eq, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((_, value)) = self.inner.next() {
                self.len -= 1;
                return Some(value);
            }

            // Move on to the next bucket, or finish if there are none left.
            self.inner = self.outer.next()?.iter_mut();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<K: Hash + Eq, V> FusedIterator for ValuesMut<'_, K, V> {}

impl<K: Hash + Eq, V> ExactSizeIterator for ValuesMut<'_, K, V> {
    fn len(&self) -> usize {
        self.len
    }
}

/// A borrowed type for iteration over a [`HashTable`]'s values. See [`HashTable::values`].
pub struct Values<'a, K, V>(
    pub(crate) Iter<'a, K, V>
);

impl<'a, K: Hash + Eq, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|e| e.1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K: Hash + Eq, V> FusedIterator for Values<'_, K, V> {}

impl<K: Hash + Eq, V> ExactSizeIterator for Values<'_, K, V> {}
