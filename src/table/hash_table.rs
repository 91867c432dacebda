use std::borrow::Borrow;
use std::fmt::{Debug, Display, Formatter};
use std::hash::{BuildHasher, Hash, RandomState};
use std::ops::Index;
use std::{fmt, mem};

use super::{Cursor, IntoKeys, IntoValues, Iter, Keys, Values, ValuesMut};
use super::{BuildError, CapacityOverflow, DuplicateKey, KeyNotFound, LoadFactorRange, ZeroCapacity};
use crate::util::result::ResultExtension;

const DEFAULT_CAP: usize = 16;

const DEFAULT_LOAD_FACTOR: f64 = 0.75;

const GROWTH_FACTOR: usize = 2;

/// A map of unique keys to values which relies on the keys implementing [`Hash`], resolving
/// collisions by chaining entries within a bucket.
///
/// Unlike most maps, insertion is strict: [`insert`](HashTable::insert) fails on a key that is
/// already present rather than replacing the value, handing the rejected pair back inside the
/// error. Lookups and removals accept any borrowed form of the key type, following the same
/// [`Borrow`] contract as [`std::collections::HashMap`].
///
/// Each key's bucket is its hash interpreted as a signed value, reduced modulo the capacity
/// and normalized to a non-negative index. The table grows once its length exceeds
/// `floor(cap * load factor)`: the capacity doubles and every entry is rehashed in one pass,
/// so a resize is O(n) but leaves lookups cheap. The capacity never decreases, not even when
/// entries are removed or the table is cleared.
///
/// It is a logic error for keys in a HashTable to be manipulated in a way that changes their
/// hash. Because of this, HashTable's API prevents mutable access to its keys.
///
/// A HashTable performs no internal synchronization. Shared ownership across threads requires
/// an external lock, as with std's collections.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of entries in the HashTable.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `insert` | `O(1)`**, `O(n)` |
/// | `get` | `O(1)`* |
/// | `remove` | `O(1)`* |
/// | `contains` | `O(1)`* |
/// | `reserve` | `O(n)`***, `O(1)` |
/// | `clear` | `O(n)` |
///
/// \* Entries that share a bucket are scanned linearly, so these methods take additional time
/// proportional to the length of the chain. With a well-distributed hasher and the load factor
/// kept at or below 1, chains stay short and the expected cost is constant.
///
/// \** If the insertion pushes the HashTable past its threshold, `insert` will take `O(n)` to
/// rehash every entry. \* applies as well.
///
/// \*** If the HashTable's threshold already covers the additional entries, `reserve` is
/// `O(1)`.
pub struct HashTable<K: Hash + Eq, V, B: BuildHasher = RandomState> {
    pub(crate) buckets: Vec<Bucket<K, V>>,
    pub(crate) len: usize,
    pub(crate) load_factor: f64,
    pub(crate) threshold: usize,
    pub(crate) hasher: B,
}

/// Entries that share a bucket index are chained in insertion order.
pub(crate) type Bucket<K, V> = Vec<(K, V)>;

/// Builds a bucket array of `cap` empty chains.
fn empty_buckets<K, V>(cap: usize) -> Vec<Bucket<K, V>> {
    let mut buckets = Vec::with_capacity(cap);
    buckets.resize_with(cap, Vec::new);
    buckets
}

/// Calculates the resize threshold, rounding down so the table grows no later than the load
/// factor permits.
const fn threshold_for(cap: usize, load_factor: f64) -> usize {
    (cap as f64 * load_factor) as usize
}

// These constructors are pinned to RandomState, in the same way as the standard library's, so
// that `HashTable::new()` infers without the caller having to name a hasher they never chose.
impl<K: Hash + Eq, V> HashTable<K, V> {
    /// Creates a new HashTable with capacity 16, a load factor of 0.75 and a random hasher.
    ///
    /// # Examples
    /// ```
    /// # use chaintable::HashTable;
    /// let table: HashTable<&str, u32> = HashTable::new();
    /// assert_eq!(table.cap(), 16);
    /// assert_eq!(table.threshold(), 12);
    /// ```
    pub fn new() -> HashTable<K, V> {
        Self::allocate(DEFAULT_CAP, DEFAULT_LOAD_FACTOR, RandomState::new())
    }

    /// Creates a new HashTable with the provided `cap`acity and the default load factor of
    /// 0.75, failing if the capacity is 0. A random hasher will be used.
    ///
    /// # Examples
    /// ```
    /// # use chaintable::HashTable;
    /// let table: HashTable<&str, u32> = HashTable::with_cap(32).unwrap();
    /// assert_eq!(table.cap(), 32);
    /// assert_eq!(table.threshold(), 24);
    ///
    /// assert!(HashTable::<&str, u32>::with_cap(0).is_err());
    /// ```
    pub fn with_cap(cap: usize) -> Result<HashTable<K, V>, ZeroCapacity> {
        Self::with_cap_and_hasher(cap, RandomState::new())
    }

    /// Creates a new HashTable with the provided `cap`acity and `load_factor`, failing if the
    /// capacity is 0 or the load factor falls outside of `(0, 1]`. A random hasher will be
    /// used.
    ///
    /// # Examples
    /// ```
    /// # use chaintable::HashTable;
    /// let table: HashTable<&str, u32> = HashTable::with_cap_and_load_factor(10, 0.5)?;
    /// assert_eq!(table.threshold(), 5);
    ///
    /// assert!(HashTable::<&str, u32>::with_cap_and_load_factor(10, 1.5).is_err());
    /// # Ok::<(), chaintable::table::BuildError>(())
    /// ```
    pub fn with_cap_and_load_factor(
        cap: usize,
        load_factor: f64,
    ) -> Result<HashTable<K, V>, BuildError> {
        Self::with_cap_and_load_factor_and_hasher(cap, load_factor, RandomState::new())
    }
}

impl<K: Hash + Eq, V, B: BuildHasher> HashTable<K, V, B> {
    /// Creates a new HashTable with capacity 16, a load factor of 0.75 and the provided
    /// `hasher`.
    pub fn with_hasher(hasher: B) -> HashTable<K, V, B> {
        Self::allocate(DEFAULT_CAP, DEFAULT_LOAD_FACTOR, hasher)
    }

    /// Creates a new HashTable with the provided `cap`acity and `hasher` and the default load
    /// factor of 0.75, failing if the capacity is 0.
    pub fn with_cap_and_hasher(cap: usize, hasher: B) -> Result<HashTable<K, V, B>, ZeroCapacity> {
        if cap == 0 {
            return Err(ZeroCapacity);
        }

        Ok(Self::allocate(cap, DEFAULT_LOAD_FACTOR, hasher))
    }

    /// Creates a new HashTable with the provided `cap`acity, `load_factor` and `hasher`,
    /// failing if the capacity is 0 or the load factor falls outside of `(0, 1]`.
    pub fn with_cap_and_load_factor_and_hasher(
        cap: usize,
        load_factor: f64,
        hasher: B,
    ) -> Result<HashTable<K, V, B>, BuildError> {
        if cap == 0 {
            return Err(ZeroCapacity.into());
        }

        // Written to reject NaN as well, which fails every comparison.
        if !(load_factor > 0.0 && load_factor <= 1.0) {
            return Err(LoadFactorRange { load_factor }.into());
        }

        Ok(Self::allocate(cap, load_factor, hasher))
    }

    /// Returns the number of entries in the HashTable.
    ///
    /// # Examples
    /// ```
    /// # use chaintable::HashTable;
    /// let table = HashTable::from([("one", 1), ("two", 2)]);
    /// assert_eq!(table.len(), 2);
    /// ```
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the HashTable contains no entries.
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the current capacity of the HashTable, being the number of buckets that entries
    /// are distributed across.
    pub fn cap(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the load factor of the HashTable, fixed at construction.
    pub const fn load_factor(&self) -> f64 {
        self.load_factor
    }

    /// Returns the number of entries above which the next insertion will grow the HashTable,
    /// equal to `floor(cap * load factor)`.
    pub const fn threshold(&self) -> usize {
        self.threshold
    }

    /// Inserts the provided `key`-`value` pair into the HashTable, failing if an entry with an
    /// equal key already exists. On failure the rejected pair is handed back inside the error
    /// and the HashTable is left exactly as it was.
    ///
    /// If the insertion pushes the length past the threshold, the capacity doubles and every
    /// entry is rehashed.
    ///
    /// # Examples
    /// ```
    /// # use chaintable::HashTable;
    /// let mut table = HashTable::new();
    /// assert!(table.insert("one", 1).is_ok());
    ///
    /// let rejected = table.insert("one", 10).unwrap_err();
    /// assert_eq!((rejected.key, rejected.value), ("one", 10));
    /// assert_eq!(table.get("one"), Some(&1));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Result<(), DuplicateKey<K, V>> {
        if self.contains(&key) {
            return Err(DuplicateKey { key, value });
        }

        let index = self.bucket_index(&key);
        self.buckets[index].push((key, value));
        self.len += 1;

        // Grown after the insertion, so the new entry is rehashed along with the rest.
        if self.len > self.threshold {
            self.grow();
        }

        Ok(())
    }

    /// Returns the entry for the provided `key` as a key-value pair or None if there is no
    /// entry.
    pub fn get_entry<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (index, pos) = self.find_entry(key)?;

        let (existing, value) = &self.buckets[index][pos];
        Some((existing, value))
    }

    /// Returns a reference to the value associated with the provided `key` or None if the
    /// table contains no entry for `key`.
    ///
    /// # Examples
    /// ```
    /// # use chaintable::HashTable;
    /// let table = HashTable::from([("one", 1)]);
    /// assert_eq!(table.get("one"), Some(&1));
    /// assert_eq!(table.get("two"), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (index, pos) = self.find_entry(key)?;

        let (_, value) = &self.buckets[index][pos];
        Some(value)
    }

    /// Returns a mutable reference to the value associated with the provided `key` or None if
    /// the table contains no entry for `key`.
    ///
    /// # Examples
    /// ```
    /// # use chaintable::HashTable;
    /// let mut table = HashTable::from([("one", 1)]);
    /// if let Some(value) = table.get_mut("one") {
    ///     *value += 9;
    /// }
    /// assert_eq!(table.get("one"), Some(&10));
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (index, pos) = self.find_entry(key)?;

        let (_, value) = &mut self.buckets[index][pos];
        Some(value)
    }

    /// Removes the entry associated with `key`, returning it if it exists. The capacity is
    /// unaffected, no matter how many entries are removed.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (index, pos) = self.find_entry(key)?;

        // Vec::remove rather than swap_remove: the rest of the chain keeps its insertion
        // order.
        let entry = self.buckets[index].remove(pos);
        self.len -= 1;

        Some(entry)
    }

    /// Removes the entry associated with `key`, returning the value if it exists.
    ///
    /// # Examples
    /// ```
    /// # use chaintable::HashTable;
    /// let mut table = HashTable::from([("one", 1), ("two", 2)]);
    /// assert_eq!(table.remove("two"), Some(2));
    /// assert_eq!(table.remove("two"), None);
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Returns true if there is a value associated with the provided `key`.
    ///
    /// # Examples
    /// ```
    /// # use chaintable::HashTable;
    /// let table = HashTable::from([(String::from("one"), 1)]);
    /// assert!(table.contains("one"));
    /// assert!(!table.contains("two"));
    /// ```
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find_entry(key).is_some()
    }

    /// Increases the capacity of the HashTable to ensure that len + `extra` entries will fit
    /// without exceeding the threshold. The capacity grows by doubling, so the resulting
    /// threshold may cover considerably more than the requested entries.
    ///
    /// # Panics
    /// Panics if the required capacity exceeds [`usize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use chaintable::HashTable;
    /// let mut table: HashTable<u32, u32> = HashTable::new();
    /// table.reserve(100);
    /// assert!(table.threshold() >= 100);
    ///
    /// let cap = table.cap();
    /// for i in 0..100 {
    ///     let _ = table.insert(i, i);
    /// }
    /// assert_eq!(table.cap(), cap);
    /// ```
    pub fn reserve(&mut self, extra: usize) {
        let required = self.len.checked_add(extra).ok_or(CapacityOverflow).throw();
        if required <= self.threshold {
            return;
        }

        let mut new_cap = self.cap();
        let mut new_threshold = self.threshold;
        while new_threshold < required {
            new_cap = new_cap.checked_mul(GROWTH_FACTOR).ok_or(CapacityOverflow).throw();
            new_threshold = threshold_for(new_cap, self.load_factor);
        }

        self.realloc_with_cap(new_cap);
    }

    /// Removes every entry from the HashTable. The bucket array is kept allocated, so the
    /// capacity and threshold are unchanged.
    ///
    /// # Examples
    /// ```
    /// # use chaintable::HashTable;
    /// let mut table = HashTable::from([("one", 1), ("two", 2)]);
    /// let cap = table.cap();
    ///
    /// table.clear();
    /// assert!(table.is_empty());
    /// assert_eq!(table.cap(), cap);
    /// ```
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.len = 0;
    }

    /// Returns and iterator over all key-value pairs in the HashTable, as references. Entries
    /// are yielded bucket by bucket, so the order depends on the hasher and the current
    /// capacity and changes when the table grows.
    ///
    /// # Examples
    /// ```
    /// # use chaintable::HashTable;
    /// let table = HashTable::from([("one", 1), ("two", 2)]);
    /// for (key, value) in table.iter() {
    ///     println!("{key}: {value}");
    /// }
    /// assert_eq!(table.iter().count(), 2);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.into_iter()
    }

    /// Returns a [`Cursor`] over the HashTable, for traversals that need to carry their
    /// position around as explicit state. The Cursor follows the same order as
    /// [`iter`](HashTable::iter) and borrows the table for its whole lifetime, so the table
    /// cannot be modified mid-traversal.
    ///
    /// # Examples
    /// ```
    /// # use chaintable::HashTable;
    /// let table = HashTable::from([("one", 1)]);
    ///
    /// let mut cursor = table.cursor();
    /// while cursor.has_next() {
    ///     let (key, value) = cursor.next().expect("has_next was true");
    ///     println!("{key}: {value}");
    /// }
    /// assert!(cursor.next().is_err());
    /// ```
    pub fn cursor(&self) -> Cursor<'_, K, V, B> {
        Cursor::new(self)
    }

    /// Consumes self and returns an iterator over all contained keys.
    pub fn into_keys(self) -> IntoKeys<K, V> {
        IntoKeys(self.into_iter())
    }

    /// Returns and iterator over all keys in the HashTable, as references.
    pub fn keys<'a>(&'a self) -> Keys<'a, K, V> {
        Keys(self.iter())
    }

    /// Consumes self and returns an iterator over all contained values.
    pub fn into_values(self) -> IntoValues<K, V> {
        IntoValues(self.into_iter())
    }

    /// Returns and iterator over all values in the HashTable, as mutable references.
    pub fn values_mut<'a>(&'a mut self) -> ValuesMut<'a, K, V> {
        ValuesMut {
            len: self.len,
            outer: self.buckets.iter_mut(),
            inner: Default::default(),
        }
    }

    /// Returns and iterator over all values in the HashTable, as references.
    pub fn values<'a>(&'a self) -> Values<'a, K, V> {
        Values(self.iter())
    }
}

impl<K: Hash + Eq, V, B: BuildHasher> HashTable<K, V, B> {
    /// Builds a HashTable from parts which have already been validated.
    fn allocate(cap: usize, load_factor: f64, hasher: B) -> HashTable<K, V, B> {
        HashTable {
            buckets: empty_buckets(cap),
            len: 0,
            load_factor,
            threshold: threshold_for(cap, load_factor),
            hasher,
        }
    }

    /// Grows the HashTable by the growth factor, rehashing every entry.
    pub(crate) fn grow(&mut self) {
        self.realloc_with_cap(self.cap() * GROWTH_FACTOR);
    }

    /// Reallocates the HashTable to have capacity equal to `new_cap`, redistributing every
    /// entry and recalculating the threshold.
    pub(crate) fn realloc_with_cap(&mut self, new_cap: usize) {
        // Replace the bucket array first so that the old one can be consumed while rehashing.
        let old_buckets = mem::replace(&mut self.buckets, empty_buckets(new_cap));

        // Walking the old buckets in index order, chains included, fixes the relative order of
        // entries that end up sharing a bucket in the new array.
        for (key, value) in old_buckets.into_iter().flatten() {
            let index = self.bucket_index(&key);
            self.buckets[index].push((key, value));
        }

        self.threshold = threshold_for(new_cap, self.load_factor);
    }

    /// Calculates the bucket index for the provided `hashable`. The hash is interpreted as a
    /// signed value and reduced modulo the capacity; a negative remainder is shifted up by the
    /// capacity to land in `0..cap`.
    pub(crate) fn bucket_index<H: Hash + ?Sized>(&self, hashable: &H) -> usize {
        let key_hash = self.hasher.hash_one(hashable) as i64;

        let rem = key_hash % self.cap() as i64;
        if rem < 0 {
            (rem + self.cap() as i64) as usize
        } else {
            rem as usize
        }
    }

    /// Finds the entry for the provided `key`, returning its bucket index and its position
    /// within the bucket's chain, or None if there is no entry.
    pub(crate) fn find_entry<Q>(&self, key: &Q) -> Option<(usize, usize)>
    where
        // We're introducing a new type parameter here, Q which represents a borrowed version
        // of K where equality and hashing carries over the borrow.
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_index(key);

        // This is where Eq comes in: out of the entries chained in this bucket, only one can
        // hold an equal key.
        let pos = self.buckets[index]
            .iter()
            .position(|(existing, _)| existing.borrow() == key)?;

        Some((index, pos))
    }
}

impl<K: Hash + Eq, V> Default for HashTable<K, V> {
    fn default() -> Self {
        HashTable::new()
    }
}

impl<K: Hash + Eq + Clone, V: Clone, B: BuildHasher + Clone> Clone for HashTable<K, V, B> {
    /// Clones the HashTable, preserving its exact bucket layout along with its configuration.
    fn clone(&self) -> Self {
        HashTable {
            buckets: self.buckets.clone(),
            len: self.len,
            load_factor: self.load_factor,
            threshold: self.threshold,
            hasher: self.hasher.clone(),
        }
    }
}

impl<K: Hash + Eq + Debug, V: Debug, B: BuildHasher + Debug> Debug for HashTable<K, V, B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashTable")
            .field("buckets", &self.buckets)
            .field("len", &self.len)
            .field("cap", &self.cap())
            .field("load_factor", &self.load_factor)
            .field("threshold", &self.threshold)
            .field("hasher", &self.hasher)
            .finish()
    }
}

impl<K: Hash + Eq + Debug, V: Debug, B: BuildHasher> Display for HashTable<K, V, B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#")?;
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, B, Q> Index<&Q> for HashTable<K, V, B>
where
    K: Hash + Eq + Borrow<Q>,
    B: BuildHasher,
    Q: Hash + Eq + ?Sized,
{
    type Output = V;

    /// Returns a reference to the value associated with the provided `key`.
    ///
    /// # Panics
    /// Panics if there is no entry for the key in the HashTable.
    fn index(&self, key: &Q) -> &V {
        self.get(key).ok_or(KeyNotFound).throw()
    }
}

impl<K: Hash + Eq, V, B: BuildHasher> Extend<(K, V)> for HashTable<K, V, B> {
    /// Extends the HashTable with the provided key-value pairs. Keys which are already present
    /// keep their existing value, and the first pair wins among duplicates within `iter`
    /// itself.
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);

        for (key, value) in iter {
            let _ = self.insert(key, value);
        }
    }
}

impl<K: Hash + Eq, V, B: BuildHasher + Default> FromIterator<(K, V)> for HashTable<K, V, B> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut table = HashTable::with_hasher(B::default());
        table.extend(iter);
        table
    }
}

impl<K: Hash + Eq, V, const N: usize> From<[(K, V); N]> for HashTable<K, V> {
    /// Builds a HashTable from an array of key-value pairs, keeping the first pair for any key
    /// that repeats.
    fn from(pairs: [(K, V); N]) -> Self {
        Self::from_iter(pairs)
    }
}
