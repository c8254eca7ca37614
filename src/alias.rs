use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::errors::{PackError, Result};
use crate::specifier::resolve_path;

/// Package-name overrides handed to the bundler.
///
/// Keyed by bare package name; values are absolute paths resolved against the
/// invoking directory. Iteration is in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AliasTable {
    entries: BTreeMap<String, PathBuf>,
}

impl AliasTable {
    /// Parse `name=path[,name=path...]`; empty segments are ignored
    pub fn parse(spec: &str, cwd: &Path) -> Result<Self> {
        let mut table = Self::default();

        for entry in spec.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (name, path) = entry
                .split_once('=')
                .map(|(name, path)| (name.trim(), path.trim()))
                .filter(|(name, path)| !name.is_empty() && !path.is_empty())
                .ok_or_else(|| PackError::InvalidAlias {
                    entry: entry.to_string(),
                })?;

            table.insert(name, resolve_path(cwd, path));
        }

        Ok(table)
    }

    /// Build a table from configured `name -> path` pairs
    pub fn from_pairs<'a>(
        pairs: impl IntoIterator<Item = (&'a String, &'a PathBuf)>,
        cwd: &Path,
    ) -> Self {
        let mut table = Self::default();
        for (name, path) in pairs {
            table.insert(name, resolve_path(cwd, path));
        }
        table
    }

    pub fn insert(&mut self, name: impl Into<String>, path: PathBuf) {
        self.entries.insert(name.into(), path);
    }

    /// Entries of `other` win over existing ones
    pub fn merge(&mut self, other: AliasTable) {
        self.entries.extend(other.entries);
    }

    pub fn get(&self, name: &str) -> Option<&Path> {
        self.entries.get(name).map(PathBuf::as_path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.entries
            .iter()
            .map(|(name, path)| (name.as_str(), path.as_path()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
