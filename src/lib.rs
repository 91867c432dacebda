//! A hash table built on separate chaining, written to keep every mechanism visible.
//!
//! # Purpose
//! General-purpose maps go out of their way to hide their internals, which is exactly what you
//! want right up until you need to reason about them. This crate leans the other way:
//! [`HashTable`] keeps its bucket count and resize bookkeeping inspectable, so the effects of
//! collision chaining and rehashing can be observed (and tested) directly rather than taken on
//! faith.
//!
//! The table also makes one opinionated API choice: [`insert`](HashTable::insert) never
//! overwrites. Inserting a key that is already present is an error which hands the rejected
//! pair back to the caller. I find this contract surfaces bugs that a silent upsert would have
//! absorbed, and an update is still only a remove-then-insert away.
//!
//! # Design
//! Entries live in a [`Vec`] of buckets, where each bucket is itself a [`Vec`] of key-value
//! pairs chained in insertion order. A key's bucket is chosen by reducing its hash modulo the
//! capacity, interpreting the hash as a signed value and normalizing negative remainders back
//! into range. When an insert pushes the entry count above `floor(cap * load factor)`, the
//! bucket array doubles and every entry is rehashed in a single pass. Capacity never shrinks.
//!
//! # Error Handling
//! Failures are strongly typed: dedicated structs (often ZSTs) that implement
//! [`Error`](std::error::Error), combined into enums for static dispatch where an operation
//! can fail in more than one way. Conditions that indicate a misused API, like indexing a
//! missing key or overflowing the capacity, panic instead, matching the behaviour of std's
//! collections.
//!
//! # Dependencies
//! Beyond `std`, this crate only depends on some derive macros, because hand-writing a pile of
//! nearly identical [`Display`](std::fmt::Display) and [`Error`](std::error::Error) impls is
//! nobody's idea of fun.
//!
//! # Potential Future Additions
//! - An entry API, to get rid of the double lookup in insert-or-update patterns
//! - Shrinking, once I settle on a policy that can't fight the growth rule

#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]

pub mod table;

pub(crate) mod util;

#[doc(inline)]
pub use table::HashTable;
