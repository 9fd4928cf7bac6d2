//! # Route Modules
//!
//! - `upload` — upload form and multipart intake (`/`, `/api/upload`).
//! - `verify` — human-facing verification page (`/v/{id}`).
//! - `records` — JSON record lookup (`/api/records/{id}`).
//! - `files` — stored originals and QR files (`/uploads/*`, `/public/*`).

pub mod files;
pub mod records;
pub mod upload;
pub mod verify;
