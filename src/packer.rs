use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{Instrument, debug, error, info, info_span, warn};
use uuid::Uuid;

use crate::alias::AliasTable;
use crate::bindings::{BindingNameList, binding_names};
use crate::bridge::bridge_module;
use crate::bundler::{BundleRequest, Bundler, EsbuildBundler};
use crate::config::Config;
use crate::errors::{PackError, Result};
use crate::output::assemble;
use crate::scanner::{StatementRecord, StatementScanner};
use crate::scratch::{ScratchFiles, default_scratch_dir};
use crate::specifier::resolve_path;

/// Runs the whole rewrite: scan, bridge, bundle, assemble
pub struct Packer<B = EsbuildBundler> {
    config: Config,
    scanner: StatementScanner,
    bundler: B,
}

/// Per-run options
#[derive(Debug, Clone, Default)]
pub struct PackOptions {
    /// Directory relative paths are resolved against; the process's current directory if unset
    pub working_directory: Option<PathBuf>,

    /// `name=path[,name=path...]`, merged over the configured aliases
    pub alias: Option<String>,

    /// Ask the bundler to minify; also enabled by `output.minify` in the config
    pub minify: bool,
}

/// Result of a successful run
#[derive(Debug, Serialize)]
pub struct PackResult {
    /// Where the final file was written
    pub output_path: PathBuf,

    /// Size of the final file in bytes
    pub size: usize,

    /// Names destructured from the aggregate namespace
    pub bindings: BindingNameList,

    /// Bundler warnings, already logged
    pub warnings: Vec<String>,

    pub run_id: String,
}

/// What a run would do with an entry file, without bundling
#[derive(Debug, Serialize)]
pub struct ScanReport {
    pub entry_path: PathBuf,
    pub records: Vec<StatementRecord>,
    pub bridge_module: String,
    pub bindings: BindingNameList,
    pub stripped_body: String,
}

impl Packer<EsbuildBundler> {
    pub fn new(config: Config) -> Result<Self> {
        let bundler = EsbuildBundler::new(&config.bundler);
        Self::with_bundler(config, bundler)
    }
}

impl<B: Bundler> Packer<B> {
    pub fn with_bundler(config: Config, bundler: B) -> Result<Self> {
        Ok(Self {
            config,
            scanner: StatementScanner::new()?,
            bundler,
        })
    }

    /// Rewrite `input` through the bundler and write the standalone file to `output`
    pub async fn pack(&self, input: &Path, output: &Path, options: PackOptions) -> Result<PackResult> {
        let run_id = Uuid::new_v4().to_string();
        let span = info_span!("pack", run_id = %run_id);

        self.pack_inner(input, output, options, run_id)
            .instrument(span)
            .await
    }

    async fn pack_inner(
        &self,
        input: &Path,
        output: &Path,
        options: PackOptions,
        run_id: String,
    ) -> Result<PackResult> {
        let cwd = working_directory(&options)?;

        // Preconditions: nothing is written and the bundler is not touched until these pass
        let (entry, dist) = check_paths(input, output, &cwd)?;
        let aliases = self.aliases(&options, &cwd)?;
        let minify = options.minify || self.config.output.minify;

        info!("Packing {} into {}", entry.display(), dist.display());

        let source = std::fs::read_to_string(&entry)
            .map_err(|e| PackError::file_system_error("Failed to read entry file", &entry, e))?;

        let scan = self.scanner.scan(&source);
        debug!("Found {} import/export statement(s)", scan.records.len());

        let bridge = bridge_module(&scan.records, &cwd);
        let bindings = binding_names(&scan.records);

        let scratch = ScratchFiles::new(&self.scratch_dir(&cwd)?)?;
        scratch.write_entry(&bridge)?;

        let request = BundleRequest {
            entry_path: scratch.entry_path().to_path_buf(),
            output_path: scratch.output_path().to_path_buf(),
            working_directory: cwd.clone(),
            aliases,
            minify,
        };

        let report = self.bundler.bundle(&request).await?;

        if report.has_warnings() {
            for warning in &report.warnings {
                warn!("Bundler warning: {}", warning);
            }
        }

        if report.has_errors() {
            for message in &report.errors {
                error!("Bundler error: {}", message);
            }
            return Err(PackError::BuildFailed {
                errors: report.errors,
            });
        }

        let artifact = scratch.read_output()?;
        let content = assemble(&artifact, &bindings, &scan.stripped_body);

        std::fs::write(&dist, &content)
            .map_err(|e| PackError::file_system_error("Failed to write output file", &dist, e))?;

        info!("Output: {} ({} bytes)", dist.display(), content.len());

        Ok(PackResult {
            output_path: dist,
            size: content.len(),
            bindings,
            warnings: report.warnings,
            run_id,
        })
    }

    /// Scan an entry file and show the bridge module and bindings it would produce
    pub fn scan_entry(&self, input: &Path, working_directory: Option<&Path>) -> Result<ScanReport> {
        let cwd = match working_directory {
            Some(dir) => dir.to_path_buf(),
            None => std::env::current_dir()?,
        };
        let entry = resolve_path(&cwd, input);

        if !entry.exists() {
            return Err(PackError::EntryNotFound { path: entry });
        }

        let source = std::fs::read_to_string(&entry)
            .map_err(|e| PackError::file_system_error("Failed to read entry file", &entry, e))?;
        let scan = self.scanner.scan(&source);

        Ok(ScanReport {
            bridge_module: bridge_module(&scan.records, &cwd),
            bindings: binding_names(&scan.records),
            entry_path: entry,
            records: scan.records,
            stripped_body: scan.stripped_body,
        })
    }

    /// Configured aliases overridden by the per-run alias string
    fn aliases(&self, options: &PackOptions, cwd: &Path) -> Result<AliasTable> {
        let mut aliases = AliasTable::from_pairs(&self.config.alias, cwd);
        if let Some(spec) = options.alias.as_deref() {
            aliases.merge(AliasTable::parse(spec, cwd)?);
        }
        Ok(aliases)
    }

    fn scratch_dir(&self, cwd: &Path) -> Result<PathBuf> {
        match &self.config.scratch.directory {
            Some(dir) => Ok(resolve_path(cwd, dir)),
            None => default_scratch_dir(),
        }
    }
}

fn working_directory(options: &PackOptions) -> Result<PathBuf> {
    match &options.working_directory {
        Some(dir) => Ok(dir.clone()),
        None => Ok(std::env::current_dir()?),
    }
}

/// Resolve entry and output paths, failing fast on the two preconditions
fn check_paths(input: &Path, output: &Path, cwd: &Path) -> Result<(PathBuf, PathBuf)> {
    let entry = resolve_path(cwd, input);
    let dist = resolve_path(cwd, output);

    if input == output || entry == dist {
        return Err(PackError::SameInputOutput { path: entry });
    }

    if !entry.exists() {
        return Err(PackError::EntryNotFound { path: entry });
    }

    Ok((entry, dist))
}
