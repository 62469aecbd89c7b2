//! # Error Types
//!
//! Error handling for the traceback engine.
//!
//! We use `thiserror` to generate `Error` trait implementations and nice
//! error messages.
//!
//! Almost nothing in a traceback is a hard failure: unresolvable addresses,
//! unknown functions, garbage argument pointers, and malformed frame chains
//! all degrade the output instead of propagating. The only errors that reach
//! the caller are the ones below.

use thiserror::Error;

use crate::types::Address;

/// A guarded memory read hit an address the process cannot read.
///
/// This is the recoverable outcome of probing raw stack memory: reading
/// through a [`crate::memory::MemoryAccess`] source never crashes the
/// process, it yields this error instead. The decoder treats a fault as
/// "this one argument is garbage" and keeps going; the walker treats it as
/// "no valid frame remains".
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("memory fault reading {len} bytes at {address}")]
pub struct MemoryFault
{
    /// Address of the failed read.
    pub address: Address,
    /// Number of bytes requested.
    pub len: usize,
}

impl MemoryFault
{
    /// Record a failed read of `len` bytes at `address`.
    pub const fn new(address: Address, len: usize) -> Self
    {
        Self { address, len }
    }
}

/// Main error type for traceback operations
///
/// These are the only conditions a traceback cannot paper over:
/// the output sink refused our bytes, or the process-wide signal mask
/// could not be saved/restored around the walk.
#[derive(Error, Debug)]
pub enum TraceError
{
    /// The output sink returned an error while the trace was being written.
    #[error("failed to write traceback output: {0}")]
    Io(#[from] std::io::Error),

    /// Saving or installing the signal mask around the walk failed.
    ///
    /// The mask is process-wide state; if it cannot be manipulated the walk
    /// is not started at all rather than run unguarded.
    #[error("failed to update signal mask: {0}")]
    Signal(std::io::Error),
}

/// Convenience type alias for `Result<T, TraceError>`
pub type Result<T> = std::result::Result<T, TraceError>;
