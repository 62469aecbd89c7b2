//! # Linux Memory Probing
//!
//! Guarded reads of our own address space using `process_vm_readv()`.
//!
//! `process_vm_readv()` is normally used to read another process's memory,
//! but it works just as well against the calling PID, and it has the one
//! property we need: an unmapped or unreadable source range makes the
//! syscall return `EFAULT` instead of raising SIGSEGV in the caller. That
//! turns "dereference a pointer that might be garbage" into an ordinary
//! fallible operation.

use crate::error::MemoryFault;
use crate::memory::MemoryAccess;
use crate::types::Address;

/// Guarded view of the current process's memory.
#[derive(Debug, Clone, Copy)]
pub struct ProcessMemory
{
    pid: libc::pid_t,
}

impl ProcessMemory
{
    /// Create a memory source for the calling process.
    pub fn new() -> Self
    {
        Self {
            pid: unsafe { libc::getpid() },
        }
    }
}

impl Default for ProcessMemory
{
    fn default() -> Self
    {
        Self::new()
    }
}

impl MemoryAccess for ProcessMemory
{
    fn read_bytes(&self, address: Address, dst: &mut [u8]) -> Result<(), MemoryFault>
    {
        if dst.is_empty() {
            return Ok(());
        }

        let local = libc::iovec {
            iov_base: dst.as_mut_ptr().cast::<libc::c_void>(),
            iov_len: dst.len(),
        };
        let remote = libc::iovec {
            iov_base: address.value() as *mut libc::c_void,
            iov_len: dst.len(),
        };

        // A short read means the range straddles an unmapped page; the
        // decoder wants all-or-nothing, so treat it as a fault too.
        let copied = unsafe { libc::process_vm_readv(self.pid, &local, 1, &remote, 1, 0) };
        if copied == dst.len() as isize {
            Ok(())
        } else {
            Err(MemoryFault::new(address, dst.len()))
        }
    }
}
