//! Core types shared across newplus.
//!
//! Currently this is the error system: [`NewPlusError`] for typed failures,
//! [`ErrorContext`] for user-facing messages and [`user_friendly_error`] for
//! turning any `anyhow` error into something worth printing.

pub mod error;

pub use error::{ErrorContext, NewPlusError, user_friendly_error};
