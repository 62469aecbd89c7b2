//! # Guarded Memory Access
//!
//! The traceback reads raw stack memory that may be garbage: frame pointers
//! can be corrupt, argument slots can hold invalid pointers, and strings can
//! run off the end of a mapping. Every risky dereference therefore goes
//! through the [`MemoryAccess`] trait, whose implementations convert an
//! unreadable address into a [`MemoryFault`] instead of letting the process
//! take a segmentation fault.
//!
//! This replaces the classic "install a SIGSEGV handler and `longjmp` back
//! to a checkpoint" recovery scheme with a narrow, composable primitive:
//! each call site gets an ordinary `Result` and decides locally how to
//! degrade.

use smallvec::SmallVec;

use crate::error::MemoryFault;
use crate::types::Address;

/// Upper bound on how many bytes a C-string read will walk before giving up.
///
/// Only the first 25 characters of a string are ever displayed, so there is
/// no reason to chase an unterminated string across the address space.
pub const MAX_CSTRING_READ: usize = 256;

/// Minimal memory accessor required for stack walking and argument decoding.
///
/// The one required method is [`read_bytes`](MemoryAccess::read_bytes); the
/// typed helpers are defined on top of it. Tests substitute a synthetic
/// implementation that lays out fake stacks; production code uses
/// [`crate::platform::ProcessMemory`], which probes the live address space
/// through the kernel so an invalid address produces an error, not a crash.
pub trait MemoryAccess
{
    /// Fill `dst` from `address`, or fault if any byte is unreadable.
    fn read_bytes(&self, address: Address, dst: &mut [u8]) -> Result<(), MemoryFault>;

    /// Read a single byte.
    fn read_u8(&self, address: Address) -> Result<u8, MemoryFault>
    {
        let mut buf = [0u8; 1];
        self.read_bytes(address, &mut buf)?;
        Ok(buf[0])
    }

    /// Read a native-endian `i32`.
    fn read_i32(&self, address: Address) -> Result<i32, MemoryFault>
    {
        let mut buf = [0u8; 4];
        self.read_bytes(address, &mut buf)?;
        Ok(i32::from_ne_bytes(buf))
    }

    /// Read a native-endian `u64`.
    fn read_u64(&self, address: Address) -> Result<u64, MemoryFault>
    {
        let mut buf = [0u8; 8];
        self.read_bytes(address, &mut buf)?;
        Ok(u64::from_ne_bytes(buf))
    }

    /// Read a native-endian `f32`.
    fn read_f32(&self, address: Address) -> Result<f32, MemoryFault>
    {
        let mut buf = [0u8; 4];
        self.read_bytes(address, &mut buf)?;
        Ok(f32::from_ne_bytes(buf))
    }

    /// Read a native-endian `f64`.
    fn read_f64(&self, address: Address) -> Result<f64, MemoryFault>
    {
        let mut buf = [0u8; 8];
        self.read_bytes(address, &mut buf)?;
        Ok(f64::from_ne_bytes(buf))
    }

    /// Read a pointer-sized word as an [`Address`].
    fn read_pointer(&self, address: Address) -> Result<Address, MemoryFault>
    {
        let mut buf = [0u8; std::mem::size_of::<usize>()];
        self.read_bytes(address, &mut buf)?;
        Ok(Address::from(usize::from_ne_bytes(buf)))
    }

    /// Read a NUL-terminated string starting at `address`.
    ///
    /// Returns the bytes before the terminator, at most `max_len` of them.
    /// The read proceeds one byte at a time so a string that ends exactly at
    /// a mapping boundary is still read successfully; a fault anywhere
    /// before the terminator fails the whole read, and the caller falls back
    /// to printing an address.
    fn read_c_string(&self, address: Address, max_len: usize) -> Result<SmallVec<[u8; 64]>, MemoryFault>
    {
        let mut out = SmallVec::new();
        for i in 0..max_len {
            let byte = self.read_u8(address + i as u64)?;
            if byte == 0 {
                break;
            }
            out.push(byte);
        }
        Ok(out)
    }
}

impl<M: MemoryAccess + ?Sized> MemoryAccess for &M
{
    fn read_bytes(&self, address: Address, dst: &mut [u8]) -> Result<(), MemoryFault>
    {
        (**self).read_bytes(address, dst)
    }
}
