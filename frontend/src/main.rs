use std::io;
use std::path::{Path, PathBuf};
use std::process::exit;
use std::thread;
use std::time::Duration;

use clap::Parser;
use ferrite_core::image;
use ferrite_core::vm::Vm;

mod config;
mod console;

/// Assembler and simulator for a 16-bit dual-stack Forth CPU.
#[derive(Parser)]
#[command(name = "ferrite", version)]
struct Args {
    /// Assembly source; when given, compile it and write the block
    /// image instead of running
    source: Option<PathBuf>,

    /// Block image path (overrides the config file)
    #[arg(long)]
    block: Option<PathBuf>,

    /// Print the symbol table after assembling
    #[arg(long)]
    symbols: bool,
}

fn main() {
    let args = Args::parse();
    let config = config::Config::load();
    let block = args
        .block
        .or(config.block)
        .unwrap_or_else(|| PathBuf::from(image::FORTH_BLOCK));

    let status = match &args.source {
        Some(source) => assemble(source, &block, args.symbols),
        None => run(&block),
    };
    exit(status);
}

/// Compile a source file and save the image, returning a process
/// status.
fn assemble(source: &Path, block: &Path, symbols: bool) -> i32 {
    let text = match std::fs::read_to_string(source) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("ferrite: {}: {e}", source.display());
            return 1;
        }
    };
    let compiled = match ferrite_asm::compile(&text) {
        Ok(compiled) => compiled,
        Err(e) => {
            eprintln!("ferrite: {}: {e}", source.display());
            return 1;
        }
    };
    if let Err(e) = image::write(block, &compiled.core[..compiled.length as usize]) {
        eprintln!("ferrite: {}: {e}", block.display());
        return 1;
    }
    if symbols && let Err(e) = compiled.symbols.print(&mut io::stdout().lock()) {
        eprintln!("ferrite: {e}");
        return 1;
    }
    0
}

/// Load the block image and drive the machine. A positive status from
/// the VM means input was not ready; sleep briefly and re-enter. The
/// image is deliberately not saved back on exit.
fn run(block: &Path) -> i32 {
    let cells = match image::read(block) {
        Ok(cells) => cells,
        Err(e) => {
            eprintln!("ferrite: {}: {e}", block.display());
            return -1;
        }
    };
    let mut vm = Vm::from_image(&cells);
    let mut console = console::StdConsole::new(block.to_path_buf());
    loop {
        let status = vm.run(&mut console);
        if status > 0 {
            thread::sleep(Duration::from_millis(10));
            continue;
        }
        return status;
    }
}
