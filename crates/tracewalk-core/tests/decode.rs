//! Tests for type-directed argument decoding against synthetic stacks.

mod common;

use common::{FakeMemory, WORD};
use tracewalk_core::decode::write_params;
use tracewalk_core::types::{Address, ArgDescriptor, ArgType};

const STACK: u64 = 0x7f00_0000;
const DATA: u64 = 0x6000_0000;

fn decode(memory: &FakeMemory, args: &[ArgDescriptor], fp: u64) -> String
{
    let mut sink = Vec::new();
    write_params(&mut sink, args, Address::new(fp), memory).unwrap();
    String::from_utf8(sink).unwrap()
}

fn mapped() -> FakeMemory
{
    let mut memory = FakeMemory::new();
    memory.map(STACK, 0x1000);
    memory.map(DATA, 0x1000);
    memory
}

#[test]
fn empty_descriptor_list_prints_void()
{
    let memory = mapped();
    assert_eq!(decode(&memory, &[], STACK), "void");
}

#[test]
fn char_prints_printable_and_octal_escapes()
{
    let mut memory = mapped();
    memory.put_u8(STACK + 16, b'A');
    memory.put_u8(STACK + 24, 6);

    let args = [
        ArgDescriptor::new("p", ArgType::Char, 16),
        ArgDescriptor::new("q", ArgType::Char, 24),
    ];
    assert_eq!(decode(&memory, &args, STACK), "char p='A', char q='\\6'");
}

#[test]
fn int_prints_signed_decimal()
{
    let mut memory = mapped();
    memory.put_i32(STACK + 16, -42);

    let args = [ArgDescriptor::new("n", ArgType::Int, 16)];
    assert_eq!(decode(&memory, &args, STACK), "int n=-42");
}

#[test]
fn floats_print_six_fractional_digits()
{
    let mut memory = mapped();
    memory.put_f32(STACK + 16, 35.0);
    memory.put_f64(STACK + 24, 2.5);

    let args = [
        ArgDescriptor::new("f", ArgType::Float, 16),
        ArgDescriptor::new("d", ArgType::Double, 24),
    ];
    assert_eq!(decode(&memory, &args, STACK), "float f=35.000000, double d=2.500000");
}

#[test]
fn string_prints_quoted()
{
    let mut memory = mapped();
    memory.put_cstr(DATA, b"test");
    memory.put_word(STACK + 16, DATA);

    let args = [ArgDescriptor::new("str", ArgType::String, 16)];
    assert_eq!(decode(&memory, &args, STACK), "char *str=\"test\"");
}

#[test]
fn string_truncation_boundary_is_25_characters()
{
    let mut memory = mapped();
    let exactly = "a".repeat(25);
    let over = "b".repeat(26);
    memory.put_cstr(DATA, exactly.as_bytes());
    memory.put_cstr(DATA + 0x100, over.as_bytes());
    memory.put_word(STACK + 16, DATA);
    memory.put_word(STACK + 24, DATA + 0x100);

    let args = [
        ArgDescriptor::new("s", ArgType::String, 16),
        ArgDescriptor::new("t", ArgType::String, 24),
    ];
    let expected = format!("char *s=\"{exactly}\", char *t=\"{}...\"", "b".repeat(25));
    assert_eq!(decode(&memory, &args, STACK), expected);
}

#[test]
fn string_escapes_non_printable_bytes()
{
    let mut memory = mapped();
    memory.put_cstr(DATA, b"bletch\x07");
    memory.put_word(STACK + 16, DATA);

    let args = [ArgDescriptor::new("s", ArgType::String, 16)];
    assert_eq!(decode(&memory, &args, STACK), "char *s=\"bletch\\7\"");
}

#[test]
fn string_with_unreadable_target_falls_back_to_slot_address()
{
    let mut memory = mapped();
    memory.put_word(STACK + 16, 0xdead_0000);

    let args = [ArgDescriptor::new("s", ArgType::String, 16)];
    let slot = Address::new(STACK + 16);
    assert_eq!(decode(&memory, &args, STACK), format!("char *s={slot}"));
}

#[test]
fn faulted_slot_prints_address_and_decoding_continues()
{
    let mut memory = mapped();
    memory.put_i32(STACK + 24, 7);

    // First slot lies outside every mapped region.
    let args = [
        ArgDescriptor::new("bad", ArgType::Int, -0x20000),
        ArgDescriptor::new("ok", ArgType::Int, 24),
    ];
    let bad_slot = Address::new(STACK - 0x20000);
    assert_eq!(decode(&memory, &args, STACK), format!("{bad_slot}, int ok=7"));
}

#[test]
fn string_array_prints_elements_in_braces()
{
    let mut memory = mapped();
    memory.put_cstr(DATA, b"alpha");
    memory.put_cstr(DATA + 0x20, b"beta");
    let array = DATA + 0x100;
    memory.put_word(array, DATA);
    memory.put_word(array + WORD, DATA + 0x20);
    memory.put_word(array + 2 * WORD, 0);
    memory.put_word(STACK + 16, array);

    let args = [ArgDescriptor::new("argv", ArgType::StringArray, 16)];
    assert_eq!(decode(&memory, &args, STACK), "char **argv={\"alpha\", \"beta\"}");
}

#[test]
fn string_array_shows_three_elements_then_ellipsis()
{
    let mut memory = mapped();
    for (i, s) in [b"a", b"b", b"c", b"d"].iter().enumerate() {
        memory.put_cstr(DATA + (i as u64) * 0x20, *s);
        memory.put_word(DATA + 0x100 + (i as u64) * WORD, DATA + (i as u64) * 0x20);
    }
    memory.put_word(DATA + 0x100 + 4 * WORD, 0);
    memory.put_word(STACK + 16, DATA + 0x100);

    let args = [ArgDescriptor::new("argv", ArgType::StringArray, 16)];
    assert_eq!(decode(&memory, &args, STACK), "char **argv={\"a\", \"b\", \"c\", ...}");
}

#[test]
fn string_array_with_unreadable_fourth_slot_collapses_to_ellipsis()
{
    let mut memory = mapped();
    // Three element slots at the very end of the mapping; the slot a
    // fourth element would occupy is unreadable.
    let array = DATA + 0x1000 - 3 * WORD;
    for (i, s) in [b"a", b"b", b"c"].iter().enumerate() {
        memory.put_cstr(DATA + (i as u64) * 0x20, *s);
        memory.put_word(array + (i as u64) * WORD, DATA + (i as u64) * 0x20);
    }
    memory.put_word(STACK + 16, array);

    let args = [ArgDescriptor::new("argv", ArgType::StringArray, 16)];
    assert_eq!(decode(&memory, &args, STACK), "char **argv={\"a\", \"b\", \"c\", ...}");
}

#[test]
fn string_array_stops_at_null_and_empty_elements()
{
    let mut memory = mapped();

    // Null first element.
    let null_first = DATA + 0x100;
    memory.put_word(null_first, 0);
    memory.put_word(STACK + 16, null_first);

    // Empty string second element.
    memory.put_cstr(DATA, b"one");
    memory.put_cstr(DATA + 0x20, b"");
    let empty_second = DATA + 0x200;
    memory.put_word(empty_second, DATA);
    memory.put_word(empty_second + WORD, DATA + 0x20);
    memory.put_word(STACK + 24, empty_second);

    let args = [
        ArgDescriptor::new("a", ArgType::StringArray, 16),
        ArgDescriptor::new("b", ArgType::StringArray, 24),
    ];
    assert_eq!(decode(&memory, &args, STACK), "char **a={}, char **b={\"one\"}");
}

#[test]
fn string_array_element_with_unreadable_bytes_prints_pointer()
{
    let mut memory = mapped();
    memory.put_cstr(DATA, b"good");
    let array = DATA + 0x100;
    memory.put_word(array, DATA);
    memory.put_word(array + WORD, 0xdead_0000);
    memory.put_word(array + 2 * WORD, 0);
    memory.put_word(STACK + 16, array);

    let args = [ArgDescriptor::new("argv", ArgType::StringArray, 16)];
    let bad = Address::new(0xdead_0000);
    assert_eq!(decode(&memory, &args, STACK), format!("char **argv={{\"good\", {bad}}}"));
}

#[test]
fn void_pointer_prints_slot_address_in_0v_notation()
{
    let memory = mapped();

    let args = [ArgDescriptor::new("ptr", ArgType::VoidPointer, 16)];
    let expected = format!("void *ptr=0v{:x}", STACK + 16);
    assert_eq!(decode(&memory, &args, STACK), expected);
}

#[test]
fn unknown_type_prints_tagged_slot_address()
{
    let memory = mapped();

    let args = [ArgDescriptor::new("x", ArgType::Unknown, 16)];
    let slot = Address::new(STACK + 16);
    assert_eq!(decode(&memory, &args, STACK), format!("UNKNOWN *x={slot}"));
}
