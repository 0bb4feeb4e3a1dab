//! Derive macros shared by the value types of this crate.

pub use derive_more::Display;
