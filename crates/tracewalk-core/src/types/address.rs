//! Memory address type.

use std::fmt;
use std::ops::{Add, Sub};

/// Strongly typed memory address
///
/// This wrapper around `u64` provides type safety when working with memory
/// addresses. It prevents accidentally mixing addresses with other `u64`
/// values (like sizes, offsets, or scan budgets), which matters a lot in a
/// crate whose whole job is arithmetic on raw pointers.
///
/// ## Example
///
/// ```rust
/// use tracewalk_core::types::Address;
///
/// let addr = Address::new(0x1000);
/// let next_addr = addr + 0x100; // Add offset
/// assert_eq!(next_addr.value(), 0x1100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(u64);

impl Address
{
    /// The null address (0x0)
    ///
    /// Typically invalid; used as a sentinel (e.g. the terminating element
    /// of a string array).
    pub const ZERO: Self = Address(0);

    /// Create a new address from a `u64` value
    ///
    /// Equivalent to `Address::from(value)` but usable in const contexts.
    pub const fn new(value: u64) -> Self
    {
        Address(value)
    }

    /// Get the raw `u64` value of this address
    pub const fn value(self) -> u64
    {
        self.0
    }

    /// Returns `true` for the null address.
    pub const fn is_null(self) -> bool
    {
        self.0 == 0
    }

    /// Apply a signed byte offset, wrapping on overflow.
    ///
    /// Argument slots are located at signed offsets from a frame pointer,
    /// so this is the primary way slot addresses are computed. Wrapping
    /// matches what pointer arithmetic on a garbage frame pointer would do;
    /// the resulting address is validated by the guarded read, not here.
    pub const fn offset(self, bytes: i64) -> Self
    {
        Address(self.0.wrapping_add(bytes as u64))
    }

    /// Add an offset to this address, checking for overflow
    pub fn checked_add(self, offset: u64) -> Option<Self>
    {
        self.0.checked_add(offset).map(Address)
    }

    /// Subtract an offset from this address, checking for underflow
    pub fn checked_sub(self, offset: u64) -> Option<Self>
    {
        self.0.checked_sub(offset).map(Address)
    }
}

impl From<u64> for Address
{
    fn from(value: u64) -> Self
    {
        Address(value)
    }
}

impl From<usize> for Address
{
    fn from(value: usize) -> Self
    {
        Address(value as u64)
    }
}

impl From<Address> for u64
{
    fn from(address: Address) -> Self
    {
        address.0
    }
}

impl fmt::Display for Address
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "0x{:016x}", self.0)
    }
}

impl Add<u64> for Address
{
    type Output = Address;

    fn add(self, rhs: u64) -> Self::Output
    {
        Address(self.0.wrapping_add(rhs))
    }
}

impl Sub<u64> for Address
{
    type Output = Address;

    fn sub(self, rhs: u64) -> Self::Output
    {
        Address(self.0.wrapping_sub(rhs))
    }
}
