//! # zodforge Compiler
//!
//! This crate generates Zod validation schemas from the metadata an ORM
//! emits about its models. Every enum, composite input type and model
//! operation becomes one TypeScript module exporting one validator.
//!
//! ## Architecture
//!
//! ```text
//! Metadata (DMMF JSON)
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Frontend   │  Format-specific parsing
//! │ (JSON → IR)  │
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Validate   │  Structure checks
//! │   (IR)       │
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Codegen    │  Units → Zod modules + index.ts
//! │  (IR → TS)   │
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │    Writer    │  Output root, stale-file pruning
//! └──────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use zodforge_compiler::{Compiler, CompilerConfig};
//!
//! let config = CompilerConfig {
//!     metadata: "prisma/dmmf.json".into(),
//!     output: "src/generated/schemas".into(),
//!     ..CompilerConfig::default()
//! };
//!
//! let compiler = Compiler::new(config);
//! let result = compiler.compile()?;
//! ```

pub mod config;
pub mod context;
pub mod frontend;
pub mod ir;
pub mod validate;
pub mod codegen;
pub mod diagnostic;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

pub use codegen::{GeneratedCode, UnitStats};
pub use config::CompilerConfig;
pub use context::GenerationContext;
pub use diagnostic::CompilerError;

/// Metadata format read when none is specified.
pub const DEFAULT_FORMAT: &str = "dmmf";

/// The main compiler struct that orchestrates the generation pipeline.
pub struct Compiler {
    config: CompilerConfig,
    format: String,
}

impl Compiler {
    /// Creates a new compiler with the given configuration.
    pub fn new(config: CompilerConfig) -> Self {
        Self {
            config,
            format: DEFAULT_FORMAT.to_string(),
        }
    }

    /// Reads metadata in `format` instead of the default.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Reads and validates the metadata.
    pub fn load_metadata(&self) -> Result<ir::SchemaIR, CompilerError> {
        let mut frontend = frontend::create_frontend(&self.format)?;
        let schema = frontend.load(&self.config.metadata)?;
        validate::validate_schema(&schema)?;
        Ok(schema)
    }

    /// Generates every module in memory without touching the output root.
    pub fn generate(&self) -> Result<GeneratedCode, CompilerError> {
        let schema = self.load_metadata()?;
        codegen::generate(&schema, &self.config)
    }

    /// Runs the full pipeline:
    /// 1. Load metadata through the configured frontend
    /// 2. Validate its structure
    /// 3. Generate every unit and the manifest
    /// 4. Write output files
    /// 5. Remove schema modules left over from earlier runs
    ///
    /// Nothing is written unless generation succeeded as a whole.
    pub fn compile(&self) -> Result<CompileResult, CompilerError> {
        let generated = self.generate()?;

        let written = self.write_output(&generated)?;
        let pruned = self.prune_stale(&generated);

        info!(
            output = %self.config.output.display(),
            files = generated.files.len(),
            written,
            pruned,
            "wrote schema modules"
        );

        Ok(CompileResult {
            stats: generated.stats,
            files_written: written,
            files_pruned: pruned,
        })
    }

    /// Validates metadata and generates in memory, writing nothing.
    pub fn check(&self) -> Result<UnitStats, CompilerError> {
        Ok(self.generate()?.stats)
    }

    /// Writes generated code to the output root. Files whose content is
    /// unchanged are left alone; returns how many were written.
    fn write_output(&self, generated: &GeneratedCode) -> Result<usize, CompilerError> {
        let root = &self.config.output;
        std::fs::create_dir_all(root).map_err(|e| CompilerError::io(root, e.to_string()))?;

        let mut written = 0;
        for (filename, content) in &generated.files {
            let path = root.join(filename);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| CompilerError::io(parent, e.to_string()))?;
            }
            if std::fs::read_to_string(&path).is_ok_and(|existing| existing == *content) {
                continue;
            }
            std::fs::write(&path, content).map_err(|e| CompilerError::io(&path, e.to_string()))?;
            written += 1;
        }

        Ok(written)
    }

    /// Deletes `*.schema.ts` files under the output root that this run did
    /// not produce. Returns how many were removed.
    fn prune_stale(&self, generated: &GeneratedCode) -> usize {
        let root = &self.config.output;
        let current: BTreeSet<PathBuf> = generated.files.iter().map(|(f, _)| root.join(f)).collect();
        let suffix = format!("{}.{}", codegen::SCHEMA_SUFFIX, codegen::SOURCE_EXTENSION);

        let mut pruned = 0;
        for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
            let path = entry.path();
            if !path.is_file() || current.contains(path) || !is_schema_module(path, &suffix) {
                continue;
            }
            match std::fs::remove_file(path) {
                Ok(()) => {
                    debug!(path = %path.display(), "removed stale schema module");
                    pruned += 1;
                }
                Err(e) => warn!(path = %path.display(), error = %e, "failed to remove stale schema module"),
            }
        }
        pruned
    }
}

fn is_schema_module(path: &Path, suffix: &str) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(suffix))
}

/// Result of a successful compilation.
#[derive(Debug)]
pub struct CompileResult {
    /// Units generated per family.
    pub stats: UnitStats,
    /// Number of files written; unchanged files are not rewritten.
    pub files_written: usize,
    /// Number of stale schema modules removed.
    pub files_pruned: usize,
}
