//! Linter configuration.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use htmllint_parser::ParserOptions;
use jsonc_parser::ParseOptions;
use jsonschema::Validator;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::LinterError;

// Embed the schema
const SCHEMA_JSON: &str = include_str!("../../../schemas/v1/config.json");
static CONFIG_SCHEMA: OnceLock<Result<Validator, String>> = OnceLock::new();

/// Configuration for parsing HTML documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinterConfig {
    /// Template markers, front matter and raw content handling.
    #[serde(flatten)]
    pub parser: ParserOptions,

    /// Directory containing the configuration file.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl LinterConfig {
    /// Configuration file names, in lookup order.
    pub const CONFIG_FILES: &'static [&'static str] = &[".htmllint.jsonc", ".htmllint.json"];

    /// Creates a new configuration with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the first configuration file present in `dir`.
    pub fn discover(dir: impl AsRef<Path>) -> Option<PathBuf> {
        let dir = dir.as_ref();
        Self::CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Loads the configuration file of `dir`, or the defaults when there is
    /// none.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, LinterError> {
        match Self::discover(&dir) {
            Some(path) => Self::from_file(path),
            None => {
                debug!("No config file in {}", dir.as_ref().display());
                Ok(Self::default())
            }
        }
    }

    /// Loads configuration from a file.
    ///
    /// Supports `.htmllint.jsonc`, `.htmllint.json`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LinterError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| LinterError::config(format!("Failed to read config: {}", e)))?;

        let mut config = Self::from_json(&content)?;

        if let Some(parent) = path.parent() {
            config.base_dir = Some(parent.to_path_buf());
        }

        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parses configuration from a JSON string with schema validation.
    ///
    /// Comments and trailing commas are accepted.
    pub fn from_json(json: &str) -> Result<Self, LinterError> {
        let value = jsonc_parser::parse_to_serde_value(json, &ParseOptions::default())
            .map_err(|e| LinterError::config(format!("Invalid JSON: {}", e)))?
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));

        let schema = CONFIG_SCHEMA
            .get_or_init(compile_schema)
            .as_ref()
            .map_err(|e| LinterError::internal(e.clone()))?;

        if let Err(e) = schema.validate(&value) {
            return Err(LinterError::config(format!(
                "Config validation failed: {} at {}",
                e,
                e.instance_path()
            )));
        }

        serde_json::from_value(value)
            .map_err(|e| LinterError::config(format!("Invalid config: {}", e)))
    }

    /// Returns the options to construct a parser with.
    pub fn parser_options(&self) -> ParserOptions {
        self.parser.clone()
    }

    /// Computes a hash of the configuration for cache invalidation.
    pub fn hash(&self) -> String {
        let json = serde_json::to_string(self).unwrap_or_default();
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}

fn compile_schema() -> Result<Validator, String> {
    let schema_json: serde_json::Value = serde_json::from_str(SCHEMA_JSON)
        .map_err(|e| format!("Invalid embedded config schema: {}", e))?;
    Validator::new(&schema_json).map_err(|e| format!("Invalid config schema: {}", e))
}
