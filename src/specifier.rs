use std::path::{Component, Path, PathBuf};

use serde::Serialize;

/// A module specifier ready to be written into the bridge module.
///
/// Relative specifiers (anything starting with `.`) become absolute paths
/// against the invoking directory; bare package names are left for the
/// bundler's own resolution, alias table included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedSpecifier(String);

impl ResolvedSpecifier {
    pub fn resolve(specifier: &str, cwd: &Path) -> Self {
        if specifier.starts_with('.') {
            Self(resolve_path(cwd, specifier).display().to_string())
        } else {
            Self(specifier.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Join `path` onto `base` (unless already absolute) and normalise it
pub fn resolve_path(base: &Path, path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        normalize_path(path)
    } else {
        normalize_path(&base.join(path))
    }
}

/// Lexically remove `.` and `..` components without touching the filesystem
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(prefix) => normalized.push(prefix.as_os_str()),
            Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push("..");
                }
            }
            Component::Normal(part) => normalized.push(part),
        }
    }

    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_specifier_is_resolved() {
        let cwd = Path::new("/work/app");
        assert_eq!(ResolvedSpecifier::resolve("./m", cwd).as_str(), "/work/app/m");
        assert_eq!(
            ResolvedSpecifier::resolve("../shared/util.js", cwd).as_str(),
            "/work/shared/util.js"
        );
    }

    #[test]
    fn test_bare_specifier_is_untouched() {
        let cwd = Path::new("/work/app");
        let resolved = ResolvedSpecifier::resolve("lodash/fp", cwd);
        assert_eq!(resolved.as_str(), "lodash/fp");
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(
            normalize_path(Path::new("/a/./b/../c/")),
            PathBuf::from("/a/c")
        );
        assert_eq!(resolve_path(Path::new("/a"), "/b/./c"), PathBuf::from("/b/c"));
        assert_eq!(resolve_path(Path::new("/a/b"), "../x.js"), PathBuf::from("/a/x.js"));
    }
}
