//! # tracewalk-core
//!
//! Frame-pointer stack walking and symbolic argument decoding for Tracewalk.
//!
//! This crate implements a traceback facility for environments without
//! unwind tables or debug sections: given only a frame pointer and a static
//! symbol table, it walks the call stack, resolves each return address to a
//! known function by bounded backward scan, decodes stack-passed arguments
//! by declared type, and renders a human-readable trace to a caller-supplied
//! sink.
//!
//! ## Fault tolerance
//!
//! The stack being read is untrusted. Every risky dereference is funneled
//! through a guarded-read primitive ([`memory::MemoryAccess`]) whose
//! platform implementations ask the kernel to copy the bytes, so an invalid
//! pointer produces a recoverable [`MemoryFault`] instead of killing the
//! process. A fault costs at most one argument's (or one frame's) worth of
//! output.
//!
//! ## Why unsafe code is needed
//!
//! Reading the frame-pointer register and issuing raw-memory syscalls
//! cannot be expressed in safe Rust. The unsafe surface is confined to the
//! `walker` and `platform` modules and wrapped in safe APIs.

#![allow(unsafe_code)] // Required for register reads and raw-memory syscalls

pub mod decode;
pub mod error;
pub mod memory;
pub mod platform;
pub mod symbols;
pub mod traceback;
pub mod types;
pub mod walker;

// Re-export commonly used types
pub use error::{MemoryFault, Result, TraceError};
pub use memory::MemoryAccess;
pub use symbols::{FunctionResolver, SymbolTable};
pub use traceback::{traceback, traceback_with_options, Traceback, TracebackOptions};
pub use types::{Address, ArgDescriptor, ArgType, SymbolEntry};
