//! # Types
//!
//! Platform-agnostic types used throughout the traceback engine.
//!
//! These abstract away target-specific details so the walker, resolver, and
//! decoder can work with concepts like "address" and "argument descriptor"
//! without caring whether we are on x86-64 or arm64.

pub mod address;
pub mod symbols;

// Re-export all public types
pub use address::Address;
pub use symbols::{ArgDescriptor, ArgType, SymbolEntry, MAX_ARG_NAME};
