//! Clause shapes shared by the bridge rewriter and the binding extractor.
//!
//! Both consumers must branch identically, so the clause is classified once
//! here: a brace decides between the named forms, and without one a leading
//! `*` or a `Default, * as ns` pair picks a namespace form over a bare
//! default binding.

use crate::scanner::{StatementKind, StatementRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClauseShape<'a> {
    /// `* as Name`
    Namespace(&'a str),
    /// `Name`
    Default(&'a str),
    /// `{a, b}`, kept verbatim including the braces
    Named(&'a str),
    /// `Default, {a, b}`
    DefaultAndNamed { default: &'a str, named: Vec<&'a str> },
    /// `Default, * as name`
    DefaultAndNamespace { default: &'a str, name: &'a str },
    /// `*` and anything else without a rewrite
    Unsupported,
}

impl<'a> ClauseShape<'a> {
    /// Shape of a record's clause; `None` for records that carry no import/export clause
    pub fn of(record: &'a StatementRecord) -> Option<Self> {
        let clause = record.clause.as_deref()?;

        match record.kind {
            StatementKind::BindingImport => Some(Self::classify(clause)),
            StatementKind::ReExport => Some(match Self::classify(clause) {
                shape @ (Self::Namespace(_) | Self::Named(_)) => shape,
                _ => Self::Unsupported,
            }),
            StatementKind::SideEffectImport | StatementKind::DeclarationExport => None,
        }
    }

    pub fn classify(clause: &'a str) -> Self {
        let clause = clause.trim();

        match clause.find('{') {
            Some(0) => Self::Named(clause),
            Some(_) => Self::classify_default_and_named(clause),
            None if clause.starts_with('*') => Self::classify_namespace(clause),
            None if is_identifier(clause) => Self::Default(clause),
            None => Self::classify_default_and_namespace(clause),
        }
    }

    fn classify_default_and_namespace(clause: &'a str) -> Self {
        let Some((default, rest)) = clause.split_once(',') else {
            return Self::Unsupported;
        };
        let default = default.trim();

        match Self::classify_namespace(rest.trim()) {
            Self::Namespace(name) if is_identifier(default) => {
                Self::DefaultAndNamespace { default, name }
            }
            _ => Self::Unsupported,
        }
    }

    fn classify_namespace(clause: &'a str) -> Self {
        match clause.split_once(" as ") {
            Some((star, name)) if star.trim() == "*" && is_identifier(name.trim()) => {
                Self::Namespace(name.trim())
            }
            _ => Self::Unsupported,
        }
    }

    fn classify_default_and_named(clause: &'a str) -> Self {
        let Some((default, rest)) = clause.split_once(',') else {
            return Self::Unsupported;
        };
        let default = default.trim();
        let inner = rest
            .trim()
            .strip_prefix('{')
            .and_then(|named| named.strip_suffix('}'));

        match inner {
            Some(inner) if is_identifier(default) => Self::DefaultAndNamed {
                default,
                named: named_items(inner),
            },
            _ => Self::Unsupported,
        }
    }
}

/// Split the inside of a brace list into trimmed, non-empty items
pub fn named_items(inner: &str) -> Vec<&str> {
    inner
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect()
}

/// The name a brace item is exposed under: `a as b` is exposed as `b`
pub fn local_name(item: &str) -> &str {
    match item.rsplit_once(" as ") {
        Some((_, alias)) => alias.trim(),
        None => item.trim(),
    }
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}
