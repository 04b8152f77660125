//! Core types and utilities for keygate.
//!
//! This crate provides the foundational types used throughout the keygate
//! authentication service:
//!
//! - **Identifiers**: Strongly-typed values for authenticated principals
//!   and refresh credentials
//! - **Error types**: Parse and generation errors shared across crates
//!
//! # Example
//!
//! ```
//! use keygate_core::{RefreshToken, Subject};
//!
//! // Parse a subject from a login username
//! let subject: Subject = "admin".parse().unwrap();
//! assert_eq!(subject.as_str(), "admin");
//!
//! // Generate an opaque refresh token
//! let token = RefreshToken::generate().unwrap();
//! assert_ne!(token, RefreshToken::generate().unwrap());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ids;

pub use ids::{IdError, RefreshToken, Subject};
