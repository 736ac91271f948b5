//! Foundation types for PUCC.
//!
//! This crate contains the types shared by all PUCC crates: the error
//! taxonomy, decoded key events, and the shell configuration.

pub mod config;
pub mod error;
pub mod input;
