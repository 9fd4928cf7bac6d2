//! # realsnap-core — Foundational Types for RealSnap
//!
//! RealSnap fingerprints uploaded images: each upload is stored, hashed,
//! given a fresh verification identifier, and recorded so that anyone
//! holding the identifier (usually via a QR code) can view the original
//! alongside its SHA-256 digest.
//!
//! This crate defines the value types every other crate shares. It depends
//! on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** [`RecordId`] (the public
//!    verification key) and [`ContentRef`] (the storage location) are
//!    distinct types, so storage layout can never leak through the public
//!    identifier by accident.
//!
//! 2. **Digests carry their own encoding.** [`ContentDigest`] serializes as
//!    64 lowercase hex characters and is only produced by
//!    [`sha256_digest()`] or parsed back with [`ContentDigest::from_hex()`].
//!
//! 3. **UTC-only timestamps.** [`Timestamp`] is UTC with a `Z` suffix and
//!    seconds precision.
//!
//! 4. **Records are immutable values.** [`Record`] has no setters; a record
//!    is built once at intake and only read afterwards.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `realsnap-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod digest;
pub mod error;
pub mod identity;
pub mod record;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use digest::{sha256_digest, sha256_hex, ContentDigest};
pub use error::ValidationError;
pub use identity::{ContentRef, RecordId};
pub use record::{verify_ref, Record};
pub use temporal::Timestamp;
