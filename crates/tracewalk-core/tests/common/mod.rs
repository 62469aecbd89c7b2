//! Shared test harness: a synthetic memory source for laying out stacks.

#![allow(dead_code)]

use tracewalk_core::error::MemoryFault;
use tracewalk_core::memory::MemoryAccess;
use tracewalk_core::types::Address;

/// Stack word size on the test target.
pub const WORD: u64 = std::mem::size_of::<usize>() as u64;

struct Region
{
    base: u64,
    bytes: Vec<u8>,
}

/// In-memory [`MemoryAccess`] implementation.
///
/// Reads succeed only when the whole range falls inside a mapped region;
/// everything else reports a [`MemoryFault`], which is exactly how the
/// kernel-mediated production sources behave on unmapped addresses.
#[derive(Default)]
pub struct FakeMemory
{
    regions: Vec<Region>,
}

impl FakeMemory
{
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Map `len` zeroed bytes at `base`.
    pub fn map(&mut self, base: u64, len: usize)
    {
        self.regions.push(Region {
            base,
            bytes: vec![0u8; len],
        });
    }

    fn region_mut(&mut self, addr: u64, len: usize) -> &mut Region
    {
        self.regions
            .iter_mut()
            .find(|region| addr >= region.base && addr + len as u64 <= region.base + region.bytes.len() as u64)
            .unwrap_or_else(|| panic!("test wrote outside mapped memory at 0x{addr:x}"))
    }

    pub fn put(&mut self, addr: u64, bytes: &[u8])
    {
        let region = self.region_mut(addr, bytes.len());
        let offset = (addr - region.base) as usize;
        region.bytes[offset..offset + bytes.len()].copy_from_slice(bytes);
    }

    /// Write a pointer-sized word.
    pub fn put_word(&mut self, addr: u64, value: u64)
    {
        self.put(addr, &(value as usize).to_ne_bytes());
    }

    pub fn put_u8(&mut self, addr: u64, value: u8)
    {
        self.put(addr, &[value]);
    }

    pub fn put_i32(&mut self, addr: u64, value: i32)
    {
        self.put(addr, &value.to_ne_bytes());
    }

    pub fn put_f32(&mut self, addr: u64, value: f32)
    {
        self.put(addr, &value.to_ne_bytes());
    }

    pub fn put_f64(&mut self, addr: u64, value: f64)
    {
        self.put(addr, &value.to_ne_bytes());
    }

    /// Write a NUL-terminated string.
    pub fn put_cstr(&mut self, addr: u64, s: &[u8])
    {
        self.put(addr, s);
        self.put(addr + s.len() as u64, &[0u8]);
    }
}

impl MemoryAccess for FakeMemory
{
    fn read_bytes(&self, address: Address, dst: &mut [u8]) -> Result<(), MemoryFault>
    {
        let addr = address.value();
        let end = addr
            .checked_add(dst.len() as u64)
            .ok_or(MemoryFault::new(address, dst.len()))?;
        let region = self
            .regions
            .iter()
            .find(|region| addr >= region.base && end <= region.base + region.bytes.len() as u64)
            .ok_or(MemoryFault::new(address, dst.len()))?;
        let offset = (addr - region.base) as usize;
        dst.copy_from_slice(&region.bytes[offset..offset + dst.len()]);
        Ok(())
    }
}
