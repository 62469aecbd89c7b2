//! Return-address to function-start resolution.
//!
//! There is no per-return-site record of which function a return address
//! belongs to, so resolution is a deliberate brute-force approximation:
//! scan backward one byte at a time from the return address until an
//! address in the symbol table is hit, or a fixed byte budget runs out.
//! The budget keeps a return address that belongs to no known function from
//! drifting into an unrelated entry point far below it.

use tracing::trace;

use super::SymbolTable;
use crate::types::Address;

/// Default scan budget, in bytes.
///
/// Functions larger than this resolve as "unknown"; that is the accepted
/// trade-off, not an error.
pub const MAX_FUNCTION_SCAN_BYTES: usize = 4096;

/// Maps return addresses to function entry points by bounded backward scan.
pub struct FunctionResolver<'a>
{
    table: &'a SymbolTable,
    max_scan: usize,
}

impl<'a> FunctionResolver<'a>
{
    /// Resolver with the default scan budget.
    pub fn new(table: &'a SymbolTable) -> Self
    {
        Self::with_scan_budget(table, MAX_FUNCTION_SCAN_BYTES)
    }

    /// Resolver with a custom scan budget.
    pub fn with_scan_budget(table: &'a SymbolTable, max_scan: usize) -> Self
    {
        Self { table, max_scan }
    }

    /// Resolve `return_address` to the start of its enclosing function.
    ///
    /// Scans `return_address - 1`, `return_address - 2`, … for at most the
    /// scan budget. If no known entry point is found the original return
    /// address is returned unchanged; callers detect that case by failing
    /// the subsequent table lookup and must treat it as "unknown function",
    /// not as an error.
    pub fn resolve(&self, return_address: Address) -> Address
    {
        let mut cursor = return_address - 1;
        for _ in 0..self.max_scan {
            if self.table.contains_address(cursor) {
                return cursor;
            }
            cursor = cursor - 1;
        }
        trace!(%return_address, budget = self.max_scan, "scan budget exhausted, leaving address unresolved");
        return_address
    }
}
