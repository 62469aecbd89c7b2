//! # Traceback Driver
//!
//! The walk loop that ties the components together.
//!
//! Starting from a frame pointer, each step reads the saved return address,
//! resolves it to a function start, advances to the caller's frame, and
//! prints one `Function <name>(<args>), in` line. The walk ends when the
//! resolved entry carries the designated root-function name, when no valid
//! frame remains, or when the malformed-stack guard trips.
//!
//! Frames print strictly in stack order, outermost (most recent) first.

use std::io::Write;

use tracing::{debug, trace, warn};

use crate::decode;
use crate::error::Result;
use crate::memory::MemoryAccess;
use crate::platform::{ProcessMemory, SignalScope};
use crate::symbols::{FunctionResolver, SymbolTable, MAX_FUNCTION_SCAN_BYTES};
use crate::types::Address;
use crate::walker::{self, FrameWalker};

/// Name the walk terminates on when no other root is configured.
///
/// `__libc_start_main` initializes the execution environment before calling
/// the user program's `main`, which makes it the natural outermost frame
/// for a hosted process.
pub const DEFAULT_ROOT_FUNCTION: &str = "__libc_start_main";

/// Default cap on walked frames; tripping it means the chain is malformed.
pub const DEFAULT_MAX_FRAMES: usize = 64;

/// Tunable knobs for a walk.
#[derive(Debug, Clone)]
pub struct TracebackOptions
{
    /// Function name that terminates the walk (exact match).
    pub root_name: String,
    /// Upper bound on frames before the walk is declared malformed.
    pub max_frames: usize,
    /// Byte budget for the resolver's backward scan.
    pub scan_budget: usize,
}

impl Default for TracebackOptions
{
    fn default() -> Self
    {
        Self {
            root_name: DEFAULT_ROOT_FUNCTION.to_string(),
            max_frames: DEFAULT_MAX_FRAMES,
            scan_budget: MAX_FUNCTION_SCAN_BYTES,
        }
    }
}

/// Walks a frame chain against a symbol table and writes the trace.
pub struct Traceback<'a, M>
{
    table: &'a SymbolTable,
    memory: &'a M,
    options: TracebackOptions,
}

impl<'a, M: MemoryAccess> Traceback<'a, M>
{
    /// Driver with default options.
    pub fn new(table: &'a SymbolTable, memory: &'a M) -> Self
    {
        Self::with_options(table, memory, TracebackOptions::default())
    }

    /// Driver with explicit options.
    pub fn with_options(table: &'a SymbolTable, memory: &'a M, options: TracebackOptions) -> Self
    {
        Self {
            table,
            memory,
            options,
        }
    }

    /// Walk the chain rooted at `start` and write one line per frame.
    ///
    /// Unknown frames print as `Function <address>(...), in` and do not
    /// stop the walk; only the root name (or running out of valid frames)
    /// does. A revisited frame pointer or an exhausted frame budget prints
    /// a truncation notice instead of looping forever.
    pub fn write_from(&self, sink: &mut dyn Write, start: Address) -> Result<()>
    {
        let walker = FrameWalker::new(self.memory);
        let resolver = FunctionResolver::with_scan_budget(self.table, self.options.scan_budget);

        debug!(%start, root = %self.options.root_name, "starting traceback walk");

        let mut frame_pointer = start;
        let mut visited: Vec<Address> = Vec::new();

        loop {
            if visited.len() >= self.options.max_frames || visited.contains(&frame_pointer) {
                warn!(%frame_pointer, frames = visited.len(), "malformed frame chain, truncating walk");
                writeln!(sink, "Traceback truncated (malformed stack)")?;
                break;
            }
            visited.push(frame_pointer);

            let Ok(return_address) = walker.return_address_of(frame_pointer) else {
                trace!(%frame_pointer, "frame unreadable, ending walk");
                break;
            };
            let Ok(caller) = walker.caller_frame_pointer(frame_pointer) else {
                trace!(%frame_pointer, "saved frame pointer unreadable, ending walk");
                break;
            };

            // Arguments of the function containing `return_address` live in
            // its own frame, which is the one we just advanced into.
            let function = resolver.resolve(return_address);
            frame_pointer = caller;

            match self.table.lookup_by_exact_address(function) {
                Some(entry) => {
                    trace!(function = entry.name(), %frame_pointer, "decoded frame");
                    write!(sink, "Function {}(", entry.name())?;
                    decode::write_params(sink, entry.args(), frame_pointer, self.memory)?;
                    writeln!(sink, "), in")?;
                    if entry.name() == self.options.root_name {
                        debug!(frames = visited.len(), "root function reached");
                        break;
                    }
                }
                None => {
                    trace!(%function, "no symbol for frame");
                    writeln!(sink, "Function {function}(...), in")?;
                }
            }
        }

        Ok(())
    }
}

/// Print a traceback of the live call stack to `sink`.
///
/// Captures the current frame pointer, scopes the process-wide signal mask
/// with a [`SignalScope`] guard (restored on every exit path), and walks
/// the stack through the kernel-mediated [`ProcessMemory`] source.
pub fn traceback(table: &SymbolTable, sink: &mut dyn Write) -> Result<()>
{
    traceback_with_options(table, sink, TracebackOptions::default())
}

/// Like [`traceback`], with explicit [`TracebackOptions`].
pub fn traceback_with_options(table: &SymbolTable, sink: &mut dyn Write, options: TracebackOptions) -> Result<()>
{
    let _scope = SignalScope::acquire()?;
    let memory = ProcessMemory::new();
    let start = walker::current_frame_pointer();
    if start.is_null() {
        return Ok(());
    }
    Traceback::with_options(table, &memory, options).write_from(sink, start)
}
