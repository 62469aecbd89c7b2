//! # Symbol Table
//!
//! Lookup over the static list of known functions.
//!
//! The table is populated once, before any traceback runs, and is never
//! mutated afterwards. Lookups scan the entries in their fixed construction
//! order; should two entries ever share an address, the first one in table
//! order wins.

mod resolve;

pub use resolve::{FunctionResolver, MAX_FUNCTION_SCAN_BYTES};

use crate::types::{Address, SymbolEntry};

/// Immutable table of known function entry points and argument layouts.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable
{
    entries: Vec<SymbolEntry>,
}

impl SymbolTable
{
    /// Build a table from an ordered entry list.
    pub fn new(entries: Vec<SymbolEntry>) -> Self
    {
        Self { entries }
    }

    /// Entry whose start address equals `addr` exactly, first match in
    /// table order.
    pub fn lookup_by_exact_address(&self, addr: Address) -> Option<&SymbolEntry>
    {
        self.entries.iter().find(|entry| entry.start() == addr)
    }

    /// True iff some entry starts exactly at `addr`.
    ///
    /// This is the resolver's scan-termination predicate, so it sits on the
    /// hot path of the backward byte scan.
    pub fn contains_address(&self, addr: Address) -> bool
    {
        self.entries.iter().any(|entry| entry.start() == addr)
    }

    /// All entries, in table order.
    pub fn entries(&self) -> &[SymbolEntry]
    {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize
    {
        self.entries.len()
    }

    /// True if the table has no entries.
    pub fn is_empty(&self) -> bool
    {
        self.entries.is_empty()
    }
}
