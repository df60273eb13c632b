//! zodforge CLI.
//!
//! Generates Zod schema modules from ORM metadata, checks metadata without
//! writing, and regenerates on change in watch mode.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::{Args, Parser, Subcommand};
use miette::IntoDiagnostic;
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode, DebounceEventResult};
use tracing_subscriber::EnvFilter;

use zodforge_compiler::{Compiler, CompilerConfig, UnitStats, DEFAULT_FORMAT};

mod ui;

/// Configuration file picked up from the working directory.
const CONFIG_FILE: &str = "zodforge.json";

#[derive(Parser)]
#[command(name = "zodforge")]
#[command(about = "zodforge - Zod validation schemas from ORM metadata")]
struct Cli {
    /// Configuration file (defaults to ./zodforge.json when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate schema modules into the output directory
    Generate(TargetArgs),

    /// Validate metadata and generate in memory without writing
    Check(TargetArgs),

    /// Regenerate whenever the metadata file changes
    Watch(TargetArgs),
}

/// Overrides applied on top of the configuration file.
#[derive(Args, Default)]
struct TargetArgs {
    /// Metadata document
    #[arg(short, long)]
    metadata: Option<PathBuf>,

    /// Output directory for generated schema modules
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Metadata format
    #[arg(short, long, default_value = DEFAULT_FORMAT)]
    format: String,

    /// Skip `<Model>Select` schemas and `select` fragments
    #[arg(long)]
    no_select: bool,

    /// Skip `<Model>Include` schemas and `include` fragments
    #[arg(long)]
    no_include: bool,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate(target) => {
            let config = resolve_config(cli.config.as_deref(), &target)?;
            generate(config, &target.format)?;
        }
        Commands::Check(target) => {
            let config = resolve_config(cli.config.as_deref(), &target)?;
            check(config, &target.format)?;
        }
        Commands::Watch(target) => {
            let config = resolve_config(cli.config.as_deref(), &target)?;
            run_watch_mode(config, target.format).await?;
        }
    }

    Ok(())
}

/// `RUST_LOG` wins; otherwise the level follows `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the configuration file, if any, then applies flag overrides.
fn resolve_config(path: Option<&Path>, target: &TargetArgs) -> miette::Result<CompilerConfig> {
    let mut config = match path {
        Some(path) => CompilerConfig::load(path)?,
        None if Path::new(CONFIG_FILE).is_file() => CompilerConfig::load(Path::new(CONFIG_FILE))?,
        None => CompilerConfig::default(),
    };

    if let Some(metadata) = &target.metadata {
        config.metadata = metadata.clone();
    }
    if let Some(output) = &target.output {
        config.output = output.clone();
    }
    if target.no_select {
        config.generate_select = false;
    }
    if target.no_include {
        config.generate_include = false;
    }

    tracing::debug!(
        metadata = %config.metadata.display(),
        output = %config.output.display(),
        "resolved configuration"
    );
    Ok(config)
}

fn generate(config: CompilerConfig, format: &str) -> miette::Result<()> {
    let output = config.output.clone();
    let spinner = ui::spinner("Generating schemas...");
    let start = Instant::now();

    let result = Compiler::new(config).with_format(format).compile();
    spinner.finish_and_clear();

    let result = match result {
        Ok(result) => result,
        Err(e) => {
            ui::nope_header();
            return Err(e.into());
        }
    };

    ui::box_header(&format!("{} {}", ui::symbols::DIAMOND, output.display()));
    ui::box_line(&format!(
        "{} written {} {} pruned",
        result.files_written,
        ui::symbols::DOT,
        result.files_pruned
    ));
    ui::box_footer();
    println!();
    print_stats(&result.stats);
    println!();
    ui::timing("Generated", start.elapsed().as_millis());

    Ok(())
}

fn check(config: CompilerConfig, format: &str) -> miette::Result<()> {
    let spinner = ui::spinner("Checking metadata...");

    match Compiler::new(config).with_format(format).check() {
        Ok(stats) => {
            spinner.finish_and_clear();
            ui::looking_good();
            println!();
            println!(
                "    {} enums {} {} objects {} {} operations",
                stats.enums,
                ui::symbols::DOT,
                stats.objects,
                ui::symbols::DOT,
                stats.operations
            );
            Ok(())
        }
        Err(e) => {
            spinner.finish_and_clear();
            ui::nope_header();
            Err(e.into())
        }
    }
}

fn print_stats(stats: &UnitStats) {
    let total = stats.enums + stats.objects + stats.operations;
    ui::unit_line("enums", stats.enums, total);
    ui::unit_line("objects", stats.objects, total);
    ui::unit_line("operations", stats.operations, total);
}

/// Regenerates on every debounced change to the metadata file.
///
/// The parent directory is watched rather than the file itself so that
/// editors replacing the file on save keep triggering events.
async fn run_watch_mode(config: CompilerConfig, format: String) -> miette::Result<()> {
    let metadata = std::fs::canonicalize(&config.metadata).into_diagnostic()?;
    let watch_dir = metadata
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let (tx, mut rx) = tokio::sync::mpsc::channel::<()>(1);
    let target = metadata.clone();

    let mut debouncer = new_debouncer(
        Duration::from_millis(500),
        move |result: DebounceEventResult| match result {
            Ok(events) => {
                if events.iter().any(|event| event.path == target) {
                    let _ = tx.try_send(());
                }
            }
            Err(e) => tracing::warn!(error = %e, "file watcher error"),
        },
    )
    .into_diagnostic()?;

    debouncer
        .watcher()
        .watch(&watch_dir, RecursiveMode::NonRecursive)
        .into_diagnostic()?;

    ui::info(&format!("Watching {}", metadata.display()));
    println!();

    // Initial run so the output reflects the current metadata.
    if let Err(e) = recompile(&config, &format).await {
        ui::error(&format!("{}", e));
    }
    println!();
    ui::info("Ready! Waiting for changes...");

    loop {
        tokio::select! {
            changed = rx.recv() => {
                if changed.is_none() {
                    break;
                }
                println!();
                if let Err(e) = recompile(&config, &format).await {
                    ui::error(&format!("{}", e));
                }
                println!();
                ui::info("Ready! Waiting for changes...");
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                ui::dim("Stopping watch mode.");
                break;
            }
        }
    }

    Ok(())
}

async fn recompile(config: &CompilerConfig, format: &str) -> miette::Result<()> {
    let spinner = ui::spinner("Change detected, regenerating...");
    let start = Instant::now();

    let compiler = Compiler::new(config.clone()).with_format(format);
    let result = tokio::task::spawn_blocking(move || compiler.compile())
        .await
        .into_diagnostic()?;
    spinner.finish_and_clear();

    let result = result?;
    ui::success(&format!(
        "Generated {} modules ({} written, {} pruned) in {}ms",
        result.stats.enums + result.stats.objects + result.stats.operations,
        result.files_written,
        result.files_pruned,
        start.elapsed().as_millis()
    ));
    Ok(())
}
