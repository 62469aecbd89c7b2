//! # Frame Walker
//!
//! Frame-pointer-based traversal of the call stack.
//!
//! With frame pointers enabled, every activation record stores the caller's
//! frame pointer at `[fp]` and the return address one word above it at
//! `[fp + WORD_SIZE]`. The walker is nothing more than those two reads,
//! expressed over a [`MemoryAccess`] source so that a corrupt frame pointer
//! surfaces as a fault instead of a crash. Validation of the values read
//! is the driver's and decoder's job, not the walker's.

use crate::error::MemoryFault;
use crate::memory::MemoryAccess;
use crate::types::Address;

/// Size of a stack word, in bytes.
pub const WORD_SIZE: u64 = std::mem::size_of::<usize>() as u64;

/// Read the caller-chain links of stack frames through a memory source.
pub struct FrameWalker<'a, M>
{
    memory: &'a M,
}

impl<'a, M: MemoryAccess> FrameWalker<'a, M>
{
    pub fn new(memory: &'a M) -> Self
    {
        Self { memory }
    }

    /// Saved return address of the frame based at `frame_pointer`.
    pub fn return_address_of(&self, frame_pointer: Address) -> Result<Address, MemoryFault>
    {
        self.memory.read_pointer(frame_pointer + WORD_SIZE)
    }

    /// Saved frame pointer of the caller's frame.
    pub fn caller_frame_pointer(&self, frame_pointer: Address) -> Result<Address, MemoryFault>
    {
        self.memory.read_pointer(frame_pointer)
    }
}

/// Frame pointer of the caller at the moment of the call.
///
/// Reads the frame-pointer register directly; `#[inline(never)]` guarantees
/// this function has its own frame, whose saved-FP slot the walk then
/// follows to the caller. Requires the build to keep frame pointers
/// (`-C force-frame-pointers=yes` on targets where the default omits them).
#[cfg(target_arch = "x86_64")]
#[inline(never)]
pub fn current_frame_pointer() -> Address
{
    let fp: u64;
    unsafe {
        std::arch::asm!("mov {}, rbp", out(reg) fp, options(nomem, nostack, preserves_flags));
    }
    Address::from(fp)
}

/// Frame pointer of the caller at the moment of the call.
#[cfg(target_arch = "aarch64")]
#[inline(never)]
pub fn current_frame_pointer() -> Address
{
    let fp: u64;
    unsafe {
        std::arch::asm!("mov {}, x29", out(reg) fp, options(nomem, nostack, preserves_flags));
    }
    Address::from(fp)
}

/// Fallback for architectures without a known frame-pointer register name.
///
/// Returns the null address; the driver then terminates immediately with an
/// empty trace rather than reading through garbage.
#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
pub fn current_frame_pointer() -> Address
{
    Address::ZERO
}
