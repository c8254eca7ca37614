use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = "packes.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Bundler invocation
    #[serde(default)]
    pub bundler: BundlerConfig,

    /// Output defaults
    #[serde(default)]
    pub output: OutputConfig,

    /// Scratch file location
    #[serde(default)]
    pub scratch: ScratchConfig,

    /// Package aliases, `name = "path"`; paths are relative to the invoking directory
    #[serde(default)]
    pub alias: BTreeMap<String, PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundlerConfig {
    /// Executable to spawn
    #[serde(default = "default_bundler_program")]
    pub program: String,

    /// Extra arguments appended to every invocation
    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Minify unless the command line says otherwise
    #[serde(default)]
    pub minify: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScratchConfig {
    /// Directory for the bridge module and raw bundler output.
    /// Defaults to the directory of the packes executable.
    pub directory: Option<PathBuf>,
}

impl Default for BundlerConfig {
    fn default() -> Self {
        Self {
            program: default_bundler_program(),
            args: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::find_config_file()?,
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

            let config: Config = toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Write a default `packes.toml` into `output_dir`
    pub fn init(output_dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

        let config_path = output_dir.join(CONFIG_FILE_NAME);
        let content = toml::to_string_pretty(&Config::default())
            .context("Failed to serialize default configuration")?;

        std::fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

        Ok(config_path)
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> Result<PathBuf> {
        let current_dir = std::env::current_dir()
            .context("Failed to get current directory")?;

        // Look for packes.toml in current directory and parents
        let mut dir = current_dir.as_path();
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Ok(config_path);
            }

            match dir.parent() {
                Some(parent) => dir = parent,
                None => break,
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("packes").join("config.toml");
            if config_path.exists() {
                return Ok(config_path);
            }
        }

        // May not exist; load() falls back to defaults
        Ok(current_dir.join(CONFIG_FILE_NAME))
    }
}

fn default_bundler_program() -> String {
    "esbuild".to_string()
}
