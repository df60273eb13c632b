//! Compiler configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::diagnostic::CompilerError;

/// Configuration for the zodforge compiler.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompilerConfig {
    /// Metadata document produced by the ORM's introspection step.
    pub metadata: PathBuf,

    /// Directory to write generated schema modules to.
    pub output: PathBuf,

    /// Emit `<Model>Select` schemas and `select` operation fragments.
    pub generate_select: bool,

    /// Emit `<Model>Include` schemas and `include` operation fragments.
    pub generate_include: bool,

    /// Where the ORM client's type declarations live.
    pub client: ClientGeneratorConfig,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            metadata: PathBuf::from("schema.dmmf.json"),
            output: PathBuf::from("generated/schemas"),
            generate_select: true,
            generate_include: true,
            client: ClientGeneratorConfig::default(),
        }
    }
}

impl CompilerConfig {
    /// Loads a configuration file.
    pub fn load(path: &Path) -> Result<Self, CompilerError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| CompilerError::io(path, e.to_string()))?;

        serde_json::from_str(&content).map_err(|e| CompilerError::InvalidConfig {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// Which client generator produced the type declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum ClientVariant {
    /// The classic generator; types are imported from the package or its output dir.
    #[default]
    #[serde(rename = "prisma-client-js")]
    Legacy,

    /// The newer generator; types live in a `client` module inside its output dir.
    #[serde(rename = "prisma-client")]
    Modern,
}

/// Module system of the generated client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleFormat {
    Esm,
    Cjs,
}

/// Client generator settings relevant to import resolution.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientGeneratorConfig {
    pub provider: ClientVariant,

    /// Custom output location. `None` means the default package location.
    pub output: Option<PathBuf>,

    pub module_format: Option<ModuleFormat>,

    /// Extension appended to relative imports (e.g., "js").
    pub import_file_extension: Option<String>,
}

impl ClientGeneratorConfig {
    /// Module name the modern generator places its types under.
    pub const CLIENT_MODULE: &'static str = "client";

    /// Whether the client import must end in the `client` module.
    pub fn requires_client_module(&self) -> bool {
        self.provider == ClientVariant::Modern
    }

    /// Extension to append to every relative import, if the variant demands one.
    pub fn import_extension(&self) -> Option<&str> {
        if self.provider != ClientVariant::Modern || self.module_format != Some(ModuleFormat::Esm) {
            return None;
        }
        self.import_file_extension
            .as_deref()
            .map(|ext| ext.trim_start_matches('.'))
            .filter(|ext| !ext.is_empty())
    }
}
