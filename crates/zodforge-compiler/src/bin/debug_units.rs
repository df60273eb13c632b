//! Debug script to see which units a metadata document produces.
//!
//! Usage: `debug_units <metadata.json> [unit-path]`. Without a unit path the
//! generated file list is printed; with one, that file's source.

use std::path::PathBuf;

use zodforge_compiler::{Compiler, CompilerConfig};

fn main() -> miette::Result<()> {
    let mut args = std::env::args().skip(1);
    let metadata = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| CompilerConfig::default().metadata);
    let selected = args.next();

    let compiler = Compiler::new(CompilerConfig {
        metadata,
        ..CompilerConfig::default()
    });
    let generated = compiler.generate()?;

    match selected {
        Some(path) => match generated.files.iter().find(|(p, _)| *p == path) {
            Some((_, content)) => print!("{}", content),
            None => println!("No unit at '{}'", path),
        },
        None => {
            println!(
                "{} enums, {} objects, {} operations",
                generated.stats.enums, generated.stats.objects, generated.stats.operations
            );
            for (path, content) in &generated.files {
                println!("  {} ({} bytes)", path, content.len());
            }
        }
    }

    Ok(())
}
