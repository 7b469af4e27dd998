//! Configuration types for DecisionEngine

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use verdict_runtime::DEFAULT_MAX_RECURSION_DEPTH;

/// Default config file, resolved relative to the working directory
/// (`config/verdict.toml`, `.yaml` or `.json`)
pub const DEFAULT_CONFIG_FILE: &str = "config/verdict";

/// Prefix of the environment variables that override file settings
pub const ENV_PREFIX: &str = "VERDICT";

/// Main engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum depth of nested BKM invocations
    pub max_recursion_depth: usize,

    /// Pre-parse rule entries, literal decisions and BKM bodies at load time
    pub cache_asts: bool,

    /// Reject decision table inputs outside their `allowed_values`
    pub strict_input_values: bool,

    /// Log level used by [`init_logging`](crate::init_logging) when `RUST_LOG` is unset
    pub log_level: String,

    /// Model documents loaded when the engine is built
    pub model_files: Vec<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_recursion_depth: DEFAULT_MAX_RECURSION_DEPTH,
            cache_asts: true,
            strict_input_values: true,
            log_level: "info".to_string(),
            model_files: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from `config/verdict.*` and `VERDICT_*` variables.
    ///
    /// A `.env` file is read first when present. Missing sources leave the
    /// defaults in place.
    pub fn load() -> Result<Self> {
        Self::build(config::File::with_name(DEFAULT_CONFIG_FILE).required(false))
    }

    /// Load configuration from an explicit file, then `VERDICT_*` variables.
    ///
    /// The file format follows its extension.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        Self::build(config::File::from(path.as_ref()).required(false))
    }

    fn build<S>(file: S) -> Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(file)
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize::<Self>()?;

        tracing::debug!("Loaded engine configuration: {:?}", config);
        Ok(config)
    }

    /// Add a model file to load at build time
    pub fn with_model_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_files.push(path.into());
        self
    }

    /// Set the BKM recursion depth limit
    pub fn with_max_recursion_depth(mut self, depth: usize) -> Self {
        self.max_recursion_depth = depth;
        self
    }

    /// Enable or disable load-time AST caching
    pub fn with_ast_cache(mut self, enabled: bool) -> Self {
        self.cache_asts = enabled;
        self
    }

    /// Enable or disable the decision table `allowed_values` check
    pub fn with_strict_input_values(mut self, enabled: bool) -> Self {
        self.strict_input_values = enabled;
        self
    }

    /// Set the default log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }
}
