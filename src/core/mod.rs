//! Core library components.
//!
//! The encoded secret format, the backend contract and its implementations,
//! local key storage, and configuration handling.

pub mod backend;
pub mod codec;
pub mod config;
pub mod constants;
pub mod crypto;
pub mod secret;
pub mod store;
pub mod types;
