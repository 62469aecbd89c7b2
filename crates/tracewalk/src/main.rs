use std::io::{self, Write};
use std::process;

use clap::{Parser, Subcommand};
use tracewalk_core::{Address, SymbolEntry, SymbolTable, TracebackOptions};
use tracewalk_utils::{info, init_logging};

/// Symbolic stack tracebacks from frame pointers and a static symbol table.
#[derive(Parser, Debug)]
#[command(name = "tracewalk")]
#[command(version)]
#[command(about = "Symbolic stack tracebacks from frame pointers and a static symbol table", long_about = None)]
struct Cli
{
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands
{
    /// Walk this process's own stack through a nested call chain and print it
    Demo
    {
        /// Upper bound on walked frames before the trace is cut off
        #[arg(long, default_value_t = tracewalk_core::traceback::DEFAULT_MAX_FRAMES)]
        max_frames: usize,
    },
}

fn main()
{
    // Initialize logging (reads from RUST_LOG env var)
    // Defaults to INFO level and Pretty format if not set
    if let Err(e) = init_logging() {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    let cli = Cli::parse();

    if let Err(e) = run_command(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run_command(cli: Cli) -> tracewalk_core::Result<()>
{
    match cli.command {
        Commands::Demo { max_frames } => {
            info!(max_frames, "running self-traceback demo");
            let table = demo_symbol_table();
            let options = TracebackOptions {
                root_name: "main".to_string(),
                max_frames,
                ..TracebackOptions::default()
            };
            demo_f1(&table, options)
        }
    }
}

/// Register the demo chain's entry points.
///
/// Function addresses come straight from the function items; none of the
/// demo functions take stack-decoded arguments, so every entry carries an
/// empty layout and prints as `(void)`.
fn demo_symbol_table() -> SymbolTable
{
    let entry = |name: &str, f: usize| SymbolEntry::new(name, Address::from(f), Vec::new());
    SymbolTable::new(vec![
        entry("main", main as usize),
        entry("demo_f1", demo_f1 as usize),
        entry("demo_f2", demo_f2 as usize),
        entry("demo_f3", demo_f3 as usize),
        entry("demo_f4", demo_f4 as usize),
        entry("demo_f5", demo_f5 as usize),
        entry("demo_f6", demo_f6 as usize),
    ])
}

// Each link of the chain is #[inline(never)] so it keeps a real stack
// frame for the walk to find.

#[inline(never)]
fn demo_f1(table: &SymbolTable, options: TracebackOptions) -> tracewalk_core::Result<()>
{
    std::hint::black_box(demo_f2(table, options))
}

#[inline(never)]
fn demo_f2(table: &SymbolTable, options: TracebackOptions) -> tracewalk_core::Result<()>
{
    std::hint::black_box(demo_f3(table, options))
}

#[inline(never)]
fn demo_f3(table: &SymbolTable, options: TracebackOptions) -> tracewalk_core::Result<()>
{
    std::hint::black_box(demo_f4(table, options))
}

#[inline(never)]
fn demo_f4(table: &SymbolTable, options: TracebackOptions) -> tracewalk_core::Result<()>
{
    std::hint::black_box(demo_f5(table, options))
}

#[inline(never)]
fn demo_f5(table: &SymbolTable, options: TracebackOptions) -> tracewalk_core::Result<()>
{
    std::hint::black_box(demo_f6(table, options))
}

#[inline(never)]
fn demo_f6(table: &SymbolTable, options: TracebackOptions) -> tracewalk_core::Result<()>
{
    let stdout = io::stdout();
    let mut sink = stdout.lock();
    tracewalk_core::traceback::traceback_with_options(table, &mut sink, options)?;
    sink.flush()?;
    Ok(())
}
