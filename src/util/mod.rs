#![warn(missing_docs)]

pub mod hash;
pub mod result;
