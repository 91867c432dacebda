//! A module containing [`HashTable`] and associtated types.
//!
//! Alongside the table itself, this module provides its strongly typed errors, owned and
//! borrowed iteration over entries, keys or values, and a [`Cursor`] for traversals that need
//! to carry their position around as explicit state.
//!
//! As a note, there is no mutable iterator over entries or keys because mutating the keys of a
//! HashTable in place would cause a logic error.
//!
//! [`HashTable`] is also re-exported at the crate root.
#![warn(missing_docs)]

mod cursor;
mod error;
mod hash_table;
mod iter;


pub use cursor::*;
pub use error::*;
pub use hash_table::*;
pub use iter::*;
