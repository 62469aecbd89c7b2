//! Symbol table entry types.
//!
//! The symbol table is the only source of truth the traceback has: there are
//! no unwind tables and no debug sections, just a static list of known
//! function entry points with the layout of their stack-passed arguments.

use super::Address;

/// Maximum length of an argument name, in bytes.
///
/// Names longer than this are truncated at construction time.
pub const MAX_ARG_NAME: usize = 32;

/// Declared type of a stack-passed argument.
///
/// This tag drives the decoder's type dispatch; it is declared in the symbol
/// table, never inferred from memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgType
{
    /// Single byte, printed as a character literal (octal-escaped if not printable).
    Char,
    /// 32-bit signed integer.
    Int,
    /// 32-bit float, printed with six fractional digits.
    Float,
    /// 64-bit float, printed with six fractional digits.
    Double,
    /// Pointer to a NUL-terminated character string.
    String,
    /// Pointer to a null-terminated array of string pointers.
    StringArray,
    /// Opaque pointer; only its address is shown.
    VoidPointer,
    /// Type the table could not classify; only the slot address is shown.
    Unknown,
}

/// Describes one argument of a known function.
///
/// `frame_offset` locates the argument slot relative to the function's frame
/// pointer (positive offsets reach into the caller-pushed argument area).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgDescriptor
{
    name: String,
    ty: ArgType,
    frame_offset: i32,
}

impl ArgDescriptor
{
    /// Build a descriptor, truncating the name to [`MAX_ARG_NAME`] bytes.
    pub fn new(name: impl Into<String>, ty: ArgType, frame_offset: i32) -> Self
    {
        let mut name = name.into();
        if name.len() > MAX_ARG_NAME {
            name.truncate(MAX_ARG_NAME);
        }
        Self {
            name,
            ty,
            frame_offset,
        }
    }

    /// Argument name as it appears in the trace output.
    pub fn name(&self) -> &str
    {
        &self.name
    }

    /// Declared type tag.
    pub fn ty(&self) -> ArgType
    {
        self.ty
    }

    /// Signed byte offset from the frame pointer to the argument slot.
    pub fn frame_offset(&self) -> i32
    {
        self.frame_offset
    }
}

/// A known function: name, entry address, and ordered argument layout.
#[derive(Debug, Clone)]
pub struct SymbolEntry
{
    name: String,
    start: Address,
    args: Vec<ArgDescriptor>,
}

impl SymbolEntry
{
    /// Build an entry from an ordered descriptor list.
    ///
    /// Descriptor slabs produced by table generators historically mark the
    /// end of the argument list with an empty-named entry rather than a
    /// length. That convention is honored here once, at construction: the
    /// list is cut at the first descriptor with an empty name, so the rest
    /// of the crate only ever sees real arguments.
    pub fn new(name: impl Into<String>, start: Address, args: Vec<ArgDescriptor>) -> Self
    {
        let mut args = args;
        if let Some(end) = args.iter().position(|arg| arg.name().is_empty()) {
            args.truncate(end);
        }
        Self {
            name: name.into(),
            start,
            args,
        }
    }

    /// Function name.
    pub fn name(&self) -> &str
    {
        &self.name
    }

    /// Entry-point address.
    pub fn start(&self) -> Address
    {
        self.start
    }

    /// Argument descriptors, in declaration order. Empty for `void` functions.
    pub fn args(&self) -> &[ArgDescriptor]
    {
        &self.args
    }
}
