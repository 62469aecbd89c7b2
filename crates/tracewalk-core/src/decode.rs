//! # Argument Decoder
//!
//! Type-directed formatting of argument values read from raw stack memory.
//!
//! For each descriptor the decoder computes the slot address
//! `frame_pointer + frame_offset` and reads the value through the guarded
//! [`MemoryAccess`] source. Nothing read here is trusted: a faulted read
//! abandons the current argument, prints its slot address in pointer
//! format, and moves on to the next descriptor. A bad argument never
//! aborts the rest of its frame, let alone the walk.

use std::io::{self, Write};

use crate::memory::{MemoryAccess, MAX_CSTRING_READ};
use crate::types::{Address, ArgDescriptor, ArgType};
use crate::walker::WORD_SIZE;

/// Most characters of a string ever shown; longer strings get `...`.
pub const STRING_DISPLAY_MAX: usize = 25;

/// Most string-array elements shown individually; a fourth collapses to `, ...`.
pub const ARRAY_DISPLAY_MAX: usize = 3;

/// Write the formatted argument list of one frame.
///
/// Arguments are separated by `", "`; an empty descriptor list renders as
/// the literal `void`. Only sink errors propagate.
pub fn write_params<M: MemoryAccess>(
    sink: &mut dyn Write,
    args: &[ArgDescriptor],
    frame_pointer: Address,
    memory: &M,
) -> io::Result<()>
{
    for (index, arg) in args.iter().enumerate() {
        if index != 0 {
            write!(sink, ", ")?;
        }
        write_arg(sink, arg, frame_pointer, memory)?;
    }
    if args.is_empty() {
        write!(sink, "void")?;
    }
    Ok(())
}

fn write_arg<M: MemoryAccess>(
    sink: &mut dyn Write,
    arg: &ArgDescriptor,
    frame_pointer: Address,
    memory: &M,
) -> io::Result<()>
{
    let slot = frame_pointer.offset(arg.frame_offset() as i64);
    let name = arg.name();

    match arg.ty() {
        ArgType::Char => match memory.read_u8(slot) {
            Ok(byte) if is_printable(byte) => write!(sink, "char {name}='{}'", byte as char),
            Ok(byte) => write!(sink, "char {name}='\\{byte:o}'"),
            Err(_) => write!(sink, "{slot}"),
        },
        ArgType::Int => match memory.read_i32(slot) {
            Ok(value) => write!(sink, "int {name}={value}"),
            Err(_) => write!(sink, "{slot}"),
        },
        ArgType::Float => match memory.read_f32(slot) {
            Ok(value) => write!(sink, "float {name}={value:.6}"),
            Err(_) => write!(sink, "{slot}"),
        },
        ArgType::Double => match memory.read_f64(slot) {
            Ok(value) => write!(sink, "double {name}={value:.6}"),
            Err(_) => write!(sink, "{slot}"),
        },
        ArgType::String => {
            // The type prefix is committed before the risky double
            // dereference; a fault leaves `char *name=<slot address>`.
            write!(sink, "char *{name}=")?;
            let text = memory
                .read_pointer(slot)
                .and_then(|ptr| memory.read_c_string(ptr, MAX_CSTRING_READ));
            match text {
                Ok(bytes) => write!(sink, "\"{}\"", render_string(&bytes)),
                Err(_) => write!(sink, "{slot}"),
            }
        }
        ArgType::StringArray => {
            write!(sink, "char **{name}=")?;
            match memory.read_pointer(slot) {
                Ok(array) => write_string_array(sink, array, memory),
                Err(_) => write!(sink, "{slot}"),
            }
        }
        ArgType::VoidPointer => write!(sink, "void *{name}=0v{:x}", slot.value()),
        ArgType::Unknown => write!(sink, "UNKNOWN *{name}={slot}"),
    }
}

/// Render the elements of a string array as `{"a", "b", ...}`.
///
/// Stops at the first null or empty element; shows at most
/// [`ARRAY_DISPLAY_MAX`] elements, collapsing an existing fourth into
/// `, ...`. An element whose bytes cannot be read renders as its pointer
/// value in place of a quoted string.
fn write_string_array<M: MemoryAccess>(sink: &mut dyn Write, array: Address, memory: &M) -> io::Result<()>
{
    write!(sink, "{{")?;
    for index in 0..=ARRAY_DISPLAY_MAX {
        let slot = array + (index as u64 * WORD_SIZE);
        let element = match memory.read_pointer(slot) {
            Ok(element) => element,
            Err(_) => {
                // The array buffer itself ran out. Past the display cap the
                // unreadable slot collapses into the ellipsis like any other
                // surplus element; before it, show where the buffer ended.
                if index == ARRAY_DISPLAY_MAX {
                    write!(sink, ", ...")?;
                } else {
                    if index != 0 {
                        write!(sink, ", ")?;
                    }
                    write!(sink, "{slot}")?;
                }
                break;
            }
        };
        if element.is_null() {
            break;
        }
        match memory.read_c_string(element, MAX_CSTRING_READ) {
            Ok(bytes) if bytes.is_empty() => break,
            Ok(bytes) => {
                if index == ARRAY_DISPLAY_MAX {
                    write!(sink, ", ...")?;
                    break;
                }
                if index != 0 {
                    write!(sink, ", ")?;
                }
                write!(sink, "\"{}\"", render_string(&bytes))?;
            }
            Err(_) => {
                if index == ARRAY_DISPLAY_MAX {
                    write!(sink, ", ...")?;
                    break;
                }
                if index != 0 {
                    write!(sink, ", ")?;
                }
                write!(sink, "{element}")?;
            }
        }
    }
    write!(sink, "}}")
}

/// Escape and truncate string bytes for display.
///
/// The first [`STRING_DISPLAY_MAX`] bytes are kept, printable ones
/// verbatim and the rest octal-escaped (`\NNN`, matching the char
/// format); anything longer gets a `...` suffix.
fn render_string(bytes: &[u8]) -> String
{
    let mut out = String::with_capacity(bytes.len().min(STRING_DISPLAY_MAX) + 3);
    for &byte in bytes.iter().take(STRING_DISPLAY_MAX) {
        if is_printable(byte) {
            out.push(byte as char);
        } else {
            out.push_str(&format!("\\{byte:o}"));
        }
    }
    if bytes.len() > STRING_DISPLAY_MAX {
        out.push_str("...");
    }
    out
}

/// C `isprint()` over the ASCII range.
fn is_printable(byte: u8) -> bool
{
    (0x20..=0x7e).contains(&byte)
}
