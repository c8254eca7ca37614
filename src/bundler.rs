//! The external bundler collaborator.
//!
//! The rewriting engine only needs one thing from a bundler: take the
//! synthetic bridge module, bundle it, and leave a single script at the
//! output path that defines [`AGGREGATE_NAMESPACE`] holding everything the
//! bridge re-exported. [`EsbuildBundler`] does that by driving the `esbuild`
//! executable.

use std::future::Future;
use std::path::PathBuf;
use std::process::Stdio;

use serde::Serialize;
use tokio::process::Command;
use tracing::{debug, info};

use crate::AGGREGATE_NAMESPACE;
use crate::alias::AliasTable;
use crate::config::BundlerConfig;
use crate::errors::{PackError, Result};

/// Everything the bundler needs for one build
#[derive(Debug, Clone)]
pub struct BundleRequest {
    pub entry_path: PathBuf,
    pub output_path: PathBuf,
    pub working_directory: PathBuf,
    pub aliases: AliasTable,
    pub minify: bool,
}

/// Diagnostics from a completed build
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl BuildReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Parse esbuild's plain-text log.
    ///
    /// Each diagnostic starts with a marker line (`✘ [ERROR]` or `X [ERROR]`
    /// on terminals without unicode, `▲ [WARNING]`); the indented lines after
    /// it (source excerpt, notes) are kept with the message.
    pub fn from_log(log: &str) -> Self {
        enum Current {
            None,
            Error,
            Warning,
        }

        let mut report = Self::default();
        let mut current = Current::None;

        for line in log.lines() {
            let trimmed = line.trim_start();

            if let Some(message) = diagnostic_message(trimmed, "[ERROR]") {
                report.errors.push(message.to_string());
                current = Current::Error;
            } else if let Some(message) = diagnostic_message(trimmed, "[WARNING]") {
                report.warnings.push(message.to_string());
                current = Current::Warning;
            } else if line.starts_with(char::is_whitespace) && !trimmed.is_empty() {
                let target = match current {
                    Current::Error => report.errors.last_mut(),
                    Current::Warning => report.warnings.last_mut(),
                    Current::None => None,
                };
                if let Some(message) = target {
                    message.push('\n');
                    message.push_str(trimmed);
                }
            } else if !trimmed.is_empty() {
                // Summary lines such as "1 error" close the current diagnostic
                current = Current::None;
            }
        }

        report
    }
}

fn diagnostic_message<'a>(line: &'a str, tag: &str) -> Option<&'a str> {
    let start = line.find(tag)?;
    let marker = line[..start].trim();
    if marker.chars().count() > 1 {
        return None;
    }
    Some(line[start + tag.len()..].trim())
}

/// A bundler the pipeline can hand the bridge module to.
///
/// Completes exactly once per call: `Err` when the build could not run at
/// all, otherwise a report whose errors decide whether the run fails.
pub trait Bundler {
    fn bundle(&self, request: &BundleRequest) -> impl Future<Output = Result<BuildReport>> + Send;
}

/// Drives the `esbuild` executable
#[derive(Debug, Clone)]
pub struct EsbuildBundler {
    config: BundlerConfig,
}

impl EsbuildBundler {
    pub fn new(config: &BundlerConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Command-line arguments for a request
    pub fn arguments(&self, request: &BundleRequest) -> Vec<String> {
        let mut args = vec![
            request.entry_path.display().to_string(),
            "--bundle".to_string(),
            "--format=iife".to_string(),
            format!("--global-name={}", AGGREGATE_NAMESPACE),
            format!("--outfile={}", request.output_path.display()),
            "--log-level=warning".to_string(),
            "--color=false".to_string(),
            format!("--define:process.env.NODE_ENV={}", node_env_define()),
        ];

        for (name, path) in request.aliases.iter() {
            args.push(format!("--alias:{}={}", name, path.display()));
        }

        if request.minify {
            args.push("--minify".to_string());
        }

        args.extend(self.config.args.iter().cloned());
        args
    }
}

impl Bundler for EsbuildBundler {
    async fn bundle(&self, request: &BundleRequest) -> Result<BuildReport> {
        let args = self.arguments(request);
        info!("Running {} on {}", self.config.program, request.entry_path.display());
        debug!("Bundler arguments: {:?}", args);

        let output = Command::new(&self.config.program)
            .args(&args)
            .current_dir(&request.working_directory)
            .env("NODE_PATH", request.working_directory.join("node_modules"))
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| PackError::BundlerLaunch {
                program: self.config.program.clone(),
                source,
            })?;

        let log = String::from_utf8_lossy(&output.stderr);
        let mut report = BuildReport::from_log(&log);

        if !output.status.success() && !report.has_errors() {
            report.errors.push(format!(
                "{} exited with {}: {}",
                self.config.program,
                output.status,
                log.trim()
            ));
        }

        debug!(
            "Bundler finished with {} error(s), {} warning(s)",
            report.errors.len(),
            report.warnings.len()
        );

        Ok(report)
    }
}

/// `process.env.NODE_ENV` as seen by the invoking process, as a JS expression
fn node_env_define() -> String {
    match std::env::var("NODE_ENV") {
        Ok(value) => serde_json::to_string(&value).unwrap_or_else(|_| "undefined".to_string()),
        Err(_) => "undefined".to_string(),
    }
}
