#![deny(missing_docs)]

//! # nvp-core: Foundational Types for the NVP Request Family
//!
//! This crate defines the types every request type in `nvp-request` is built
//! from. It has no internal crate dependencies, only `serde`, `serde_json`,
//! `thiserror`, and `regex` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **[`NvpMap`] is a value.** Request and response fields are owned
//!    `String` pairs; every clone is an independent copy. No request ever
//!    aliases a map its caller can still mutate.
//!
//! 2. **Field rules are data.** Each request type declares a `const` table of
//!    [`FieldRule`]s. One engine ([`FieldRule::apply`]) enforces presence,
//!    length, and character-pattern constraints for the whole family.
//!
//! 3. **[`NvpError`] hierarchy.** Structured errors with `thiserror`, no
//!    `Box<dyn Error>`, no `.unwrap()` outside tests.

pub mod error;
pub mod fields;
pub mod rules;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{NvpError, ValidationError};
pub use fields::NvpMap;
pub use rules::{Check, FieldRule, Pattern};
