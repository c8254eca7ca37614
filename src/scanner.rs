//! Statement scanning and classification.
//!
//! The scanner walks the entry file line by line and tries a fixed set of
//! statement matchers at the start of every line. It is pattern based: only
//! the six import/export shapes below are recognised, always at column 0, and
//! anything else is ordinary body text.

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::errors::Result;

/// Classification of a recognised import/export statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatementKind {
    /// `import 'x'`
    SideEffectImport,
    /// `import <clause> from 'x'`
    BindingImport,
    /// `export <clause> from 'x'`
    ReExport,
    /// `export function f`, `export { a }`, `export const a = ...`
    DeclarationExport,
}

impl StatementKind {
    /// Whether the statement text stays in the stripped body
    pub fn is_retained(self) -> bool {
        matches!(self, Self::DeclarationExport)
    }
}

/// One recognised statement, in source order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementRecord {
    pub kind: StatementKind,

    /// Module specifier as written; absent for declaration exports
    pub source: Option<String>,

    /// Import/export clause, or the declared name(s) for declaration exports
    pub clause: Option<String>,
}

impl StatementRecord {
    pub fn side_effect(source: impl Into<String>) -> Self {
        Self {
            kind: StatementKind::SideEffectImport,
            source: Some(source.into()),
            clause: None,
        }
    }

    pub fn binding(clause: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            kind: StatementKind::BindingImport,
            source: Some(source.into()),
            clause: Some(clause.into()),
        }
    }

    pub fn re_export(clause: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            kind: StatementKind::ReExport,
            source: Some(source.into()),
            clause: Some(clause.into()),
        }
    }

    pub fn declaration(names: impl Into<String>) -> Self {
        Self {
            kind: StatementKind::DeclarationExport,
            source: None,
            clause: Some(names.into()),
        }
    }
}

/// Result of scanning one entry file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanOutput {
    pub records: Vec<StatementRecord>,

    /// Entry text without imports and re-exports; declaration exports kept verbatim
    pub stripped_body: String,
}

/// The recognised statement shapes, in matching priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatementForm {
    SideEffectImport,
    BindingImport,
    ReExport,
    FunctionExport,
    NamedListExport,
    VariableExport,
}

const FORMS: [StatementForm; 6] = [
    StatementForm::SideEffectImport,
    StatementForm::BindingImport,
    StatementForm::ReExport,
    StatementForm::FunctionExport,
    StatementForm::NamedListExport,
    StatementForm::VariableExport,
];

impl StatementForm {
    // Every pattern is anchored at the current line start and consumes
    // through the end of the statement's last line.
    fn pattern(self) -> &'static str {
        match self {
            Self::SideEffectImport => r#"\Aimport[ \t]*['"]([^'"\n]*)['"][^\n]*(?:\n|\z)"#,
            Self::BindingImport => {
                r#"\Aimport\b\s*((?:[^;'"{}\n]|\{[^{}'";]*\})+?)\s*\bfrom\s*['"]([^'"\n]+)['"][^\n]*(?:\n|\z)"#
            }
            Self::ReExport => {
                r#"\Aexport\b\s*((?:[^;'"{}\n]|\{[^{}'";]*\})+?)\s*\bfrom\s*['"]([^'"\n]+)['"][^\n]*(?:\n|\z)"#
            }
            Self::FunctionExport => {
                r#"\Aexport\s+(?:default\s+)?(?:async\s+)?function\b\s*\*?\s*([A-Za-z_$][\w$]*)\s*\([^)\n]*\)[^{\n]*\{[^\n]*(?:\n|\z)"#
            }
            Self::NamedListExport => r#"\Aexport\s*\{([^{}]*)\}[^\n]*(?:\n|\z)"#,
            Self::VariableExport => {
                r#"\Aexport\s+(?:const|var|let)\s+([A-Za-z_$][\w$]*)\s*=[^\n]*(?:\n|\z)"#
            }
        }
    }
}

/// A compiled matcher for one statement form
struct Matcher {
    form: StatementForm,
    regex: Regex,
}

impl Matcher {
    fn new(form: StatementForm) -> Result<Self> {
        Ok(Self {
            form,
            regex: Regex::new(form.pattern())?,
        })
    }

    /// Try the form at the start of `text`, returning the consumed length and the record
    fn match_at(&self, text: &str) -> Option<(usize, StatementRecord)> {
        let caps = self.regex.captures(text)?;
        let consumed = caps.get(0)?.end();
        let first = caps.get(1)?.as_str();

        let record = match self.form {
            StatementForm::SideEffectImport => StatementRecord::side_effect(first),
            StatementForm::BindingImport => {
                StatementRecord::binding(normalize_clause(first), caps.get(2)?.as_str())
            }
            StatementForm::ReExport => {
                StatementRecord::re_export(normalize_clause(first), caps.get(2)?.as_str())
            }
            StatementForm::FunctionExport
            | StatementForm::NamedListExport
            | StatementForm::VariableExport => StatementRecord::declaration(normalize_clause(first)),
        };

        Some((consumed, record))
    }
}

/// Captured clauses are trimmed and lose their line breaks
fn normalize_clause(raw: &str) -> String {
    raw.trim().replace(['\r', '\n'], "")
}

/// Scans entry files for top-level import/export statements
pub struct StatementScanner {
    matchers: Vec<Matcher>,
}

impl StatementScanner {
    pub fn new() -> Result<Self> {
        let matchers = FORMS
            .iter()
            .map(|form| Matcher::new(*form))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { matchers })
    }

    /// Classify every recognised statement and build the stripped body.
    ///
    /// Never fails: text that matches no form is copied through untouched.
    pub fn scan(&self, source: &str) -> ScanOutput {
        let mut records = Vec::new();
        let mut stripped_body = String::with_capacity(source.len());
        let mut pos = 0;

        while pos < source.len() {
            let rest = &source[pos..];

            match self.match_statement(rest) {
                Some((consumed, record)) => {
                    debug!("Matched {:?} statement: {:?}", record.kind, record.clause);
                    if record.kind.is_retained() {
                        stripped_body.push_str(&rest[..consumed]);
                    }
                    records.push(record);
                    pos += consumed;
                }
                None => {
                    let line_len = rest.find('\n').map_or(rest.len(), |i| i + 1);
                    stripped_body.push_str(&rest[..line_len]);
                    pos += line_len;
                }
            }
        }

        ScanOutput { records, stripped_body }
    }

    fn match_statement(&self, text: &str) -> Option<(usize, StatementRecord)> {
        self.matchers.iter().find_map(|matcher| matcher.match_at(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str) -> ScanOutput {
        StatementScanner::new().unwrap().scan(source)
    }

    #[test]
    fn test_side_effect_import() {
        let out = scan("import './polyfill';\nimport \"reset.css\"\n");
        assert_eq!(
            out.records,
            vec![
                StatementRecord::side_effect("./polyfill"),
                StatementRecord::side_effect("reset.css"),
            ]
        );
        assert_eq!(out.stripped_body, "");
    }

    #[test]
    fn test_binding_import_clauses() {
        let out = scan(concat!(
            "import * as A from './m';\n",
            "import {b, c} from './m';\n",
            "import Def, {x, y} from 'pkg';\n",
            "import React from \"react\"\n",
        ));

        assert_eq!(
            out.records,
            vec![
                StatementRecord::binding("* as A", "./m"),
                StatementRecord::binding("{b, c}", "./m"),
                StatementRecord::binding("Def, {x, y}", "pkg"),
                StatementRecord::binding("React", "react"),
            ]
        );
        assert!(out.stripped_body.is_empty());
    }

    #[test]
    fn test_multiline_brace_clause() {
        let out = scan("import {\n  a,\n  b\n} from './ab';\nconsole.log(a);\n");
        assert_eq!(out.records, vec![StatementRecord::binding("{  a,  b}", "./ab")]);
        assert_eq!(out.stripped_body, "console.log(a);\n");
    }

    #[test]
    fn test_re_export() {
        let out = scan("export { p, q } from 'pkg';\nexport * as ns from './ns';\n");
        assert_eq!(
            out.records,
            vec![
                StatementRecord::re_export("{ p, q }", "pkg"),
                StatementRecord::re_export("* as ns", "./ns"),
            ]
        );
        assert!(out.stripped_body.is_empty());
    }

    #[test]
    fn test_function_export_is_retained() {
        let source = "export function f(a){return a;}\nexport default async function load(url) {\n  return url;\n}\n";
        let out = scan(source);

        assert_eq!(
            out.records,
            vec![
                StatementRecord::declaration("f"),
                StatementRecord::declaration("load"),
            ]
        );
        assert_eq!(out.stripped_body, source);
    }

    #[test]
    fn test_generator_function_export() {
        let out = scan("export function* ids() {\n  yield 1;\n}\n");
        assert_eq!(out.records, vec![StatementRecord::declaration("ids")]);
    }

    #[test]
    fn test_named_list_export_records_its_own_names() {
        // Each declaration form carries its own capture rather than the
        // function-export name.
        let source = "const a = 1, b = 2;\nexport { a, b };\n";
        let out = scan(source);

        assert_eq!(out.records, vec![StatementRecord::declaration("a, b")]);
        assert_eq!(out.stripped_body, source);
    }

    #[test]
    fn test_variable_export_records_its_own_name() {
        let source = "export const answer = 42;\nexport let counter=0;\nexport var legacy = true;\n";
        let out = scan(source);

        assert_eq!(
            out.records,
            vec![
                StatementRecord::declaration("answer"),
                StatementRecord::declaration("counter"),
                StatementRecord::declaration("legacy"),
            ]
        );
        assert_eq!(out.stripped_body, source);
    }

    #[test]
    fn test_declaration_edge_cases() {
        let source = "export {};\nexport const c = 1;\nexport { a as b };\n";
        let out = scan(source);

        assert_eq!(
            out.records,
            vec![
                StatementRecord::declaration(""),
                StatementRecord::declaration("c"),
                StatementRecord::declaration("a as b"),
            ]
        );
        assert_eq!(out.stripped_body, source);
    }

    #[test]
    fn test_destructuring_export_is_body_text() {
        let source = "export const {a, b} = obj;\nexport let [first] = list;\n";
        let out = scan(source);

        assert!(out.records.is_empty());
        assert_eq!(out.stripped_body, source);
    }

    #[test]
    fn test_default_and_namespace_import() {
        let out = scan("import Def, * as ns from 'x';\nns.go(Def);\n");
        assert_eq!(out.records, vec![StatementRecord::binding("Def, * as ns", "x")]);
        assert_eq!(out.stripped_body, "ns.go(Def);\n");
    }

    #[test]
    fn test_records_keep_source_order() {
        let out = scan(concat!(
            "import 'a';\n",
            "export const x = 1;\n",
            "import {y} from './y';\n",
            "export {z} from 'z';\n",
        ));
        let kinds: Vec<_> = out.records.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                StatementKind::SideEffectImport,
                StatementKind::DeclarationExport,
                StatementKind::BindingImport,
                StatementKind::ReExport,
            ]
        );
        assert_eq!(out.stripped_body, "export const x = 1;\n");
    }

    #[test]
    fn test_indented_and_malformed_statements_pass_through() {
        let source = "function lazy() {\n  import('./later');\n}\n  import x from 'y';\nimport {broken from 'x';\n";
        let out = scan(source);
        assert!(out.records.is_empty());
        assert_eq!(out.stripped_body, source);
    }

    #[test]
    fn test_last_line_without_newline() {
        let out = scan("const a = 1;\nimport b from './b'");
        assert_eq!(out.records, vec![StatementRecord::binding("b", "./b")]);
        assert_eq!(out.stripped_body, "const a = 1;\n");
    }

    #[test]
    fn test_rescanning_stripped_body_is_stable() {
        let source = concat!(
            "import 'side';\n",
            "import * as A from './m';\n",
            "import {b,c} from './m';\n",
            "export { p, q } from 'pkg';\n",
            "export function f(a){return a;}\n",
            "export const g = 1;\n",
            "const h = 2;\n",
            "export { h };\n",
        );
        let first = scan(source);
        let second = scan(&first.stripped_body);

        assert!(second
            .records
            .iter()
            .all(|r| r.kind == StatementKind::DeclarationExport));

        let declarations: Vec<_> = first
            .records
            .iter()
            .filter(|r| r.kind == StatementKind::DeclarationExport)
            .cloned()
            .collect();
        assert_eq!(second.records, declarations);
        assert_eq!(second.stripped_body, first.stripped_body);
    }
}
