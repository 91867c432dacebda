use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};

use derive_more::{Display, Error, From, IsVariant, TryInto};

/// Error for constructing a [`HashTable`](crate::table::HashTable) with a capacity of 0, which
/// would leave no bucket for any entry to land in.
#[derive(Debug)]
pub struct ZeroCapacity;

impl Display for ZeroCapacity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Unable to create a HashTable with capacity 0!")
    }
}

impl Error for ZeroCapacity {}

/// Error for constructing a [`HashTable`](crate::table::HashTable) with a load factor outside
/// of `(0, 1]`. NaN is rejected by the same rule.
#[derive(Debug)]
pub struct LoadFactorRange {
    /// The offending load factor.
    pub load_factor: f64,
}

impl Display for LoadFactorRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Load factor {} outside of the range (0, 1]!", self.load_factor)
    }
}

impl Error for LoadFactorRange {}

/// Error for any of the ways constructing a [`HashTable`](crate::table::HashTable) can fail.
#[derive(Debug, Display, Error, From, TryInto, IsVariant)]
pub enum BuildError {
    /// The requested capacity was 0.
    ZeroCapacity(ZeroCapacity),
    /// The requested load factor was outside of `(0, 1]`.
    LoadFactorRange(LoadFactorRange),
}

/// Error for inserting a key that the [`HashTable`](crate::table::HashTable) already holds an
/// entry for. The rejected pair is handed back so the caller can decide what to do with it.
#[derive(Debug)]
pub struct DuplicateKey<K, V> {
    /// The key that was rejected.
    pub key: K,
    /// The value that was rejected along with it.
    pub value: V,
}

impl<K: Debug, V> Display for DuplicateKey<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "An entry already exists for key {:?}!", self.key)
    }
}

impl<K: Debug, V: Debug> Error for DuplicateKey<K, V> {}

/// Error for looking up a key that the [`HashTable`](crate::table::HashTable) holds no entry
/// for.
#[derive(Debug)]
pub struct KeyNotFound;

impl Display for KeyNotFound {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "No entry found for the provided key!")
    }
}

impl Error for KeyNotFound {}

/// Error for advancing a [`Cursor`](crate::table::Cursor) that has already yielded every entry
/// in its table.
#[derive(Debug)]
pub struct Exhausted;

impl Display for Exhausted {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "No entries remain for the Cursor to yield!")
    }
}

impl Error for Exhausted {}

/// Error for growing a [`HashTable`](crate::table::HashTable) beyond [`usize::MAX`].
#[derive(Debug)]
pub struct CapacityOverflow;

impl Display for CapacityOverflow {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Capacity overflow!")
    }
}

impl Error for CapacityOverflow {}
