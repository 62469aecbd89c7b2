//! Stub memory source for targets without a guarded-read primitive.
//!
//! Every read faults, so a traceback on an unsupported target degrades to
//! raw-address output rather than failing to build.

use crate::error::MemoryFault;
use crate::memory::MemoryAccess;
use crate::types::Address;

/// Placeholder that reports every address as unreadable.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessMemory;

impl ProcessMemory
{
    pub fn new() -> Self
    {
        Self
    }
}

impl MemoryAccess for ProcessMemory
{
    fn read_bytes(&self, address: Address, dst: &mut [u8]) -> Result<(), MemoryFault>
    {
        Err(MemoryFault::new(address, dst.len()))
    }
}
