//! # macOS Memory Probing
//!
//! Guarded reads of our own address space using Mach APIs.
//!
//! `mach_vm_read_overwrite()` copies from a task's memory into a caller
//! buffer and reports unreadable ranges with a `kern_return_t` error code
//! instead of a signal. Running it against `mach_task_self()` gives us the
//! same fault-to-`Result` conversion the Linux path gets from
//! `process_vm_readv()`.

use mach2::kern_return::KERN_SUCCESS;
use mach2::traps::mach_task_self;
use mach2::vm::mach_vm_read_overwrite;
use mach2::vm_types::{mach_vm_address_t, mach_vm_size_t};

use crate::error::MemoryFault;
use crate::memory::MemoryAccess;
use crate::types::Address;

/// Guarded view of the current task's memory.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessMemory;

impl ProcessMemory
{
    /// Create a memory source for the calling task.
    pub fn new() -> Self
    {
        Self
    }
}

impl MemoryAccess for ProcessMemory
{
    fn read_bytes(&self, address: Address, dst: &mut [u8]) -> Result<(), MemoryFault>
    {
        if dst.is_empty() {
            return Ok(());
        }

        let mut actual: mach_vm_size_t = 0;
        let result = unsafe {
            mach_vm_read_overwrite(
                mach_task_self(),
                address.value(),
                dst.len() as mach_vm_size_t,
                dst.as_mut_ptr() as mach_vm_address_t,
                &mut actual,
            )
        };

        if result == KERN_SUCCESS && actual as usize == dst.len() {
            Ok(())
        } else {
            Err(MemoryFault::new(address, dst.len()))
        }
    }
}
