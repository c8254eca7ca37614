use crate::clause::{ClauseShape, local_name, named_items};
use crate::scanner::{StatementKind, StatementRecord};

/// Ordered local names to destructure from the aggregate namespace.
///
/// Duplicates are kept; order follows the records, then the clause (default
/// name before named items).
pub type BindingNameList = Vec<String>;

/// Collect the binding names for every record, branching exactly like the bridge rewriter
pub fn binding_names(records: &[StatementRecord]) -> BindingNameList {
    records.iter().flat_map(record_names).collect()
}

fn record_names(record: &StatementRecord) -> Vec<String> {
    match record.kind {
        StatementKind::SideEffectImport => Vec::new(),
        StatementKind::DeclarationExport => record
            .clause
            .as_deref()
            .map(|names| {
                named_items(names)
                    .into_iter()
                    .map(|item| local_name(item).to_string())
                    .collect()
            })
            .unwrap_or_default(),
        StatementKind::BindingImport | StatementKind::ReExport => match ClauseShape::of(record) {
            Some(ClauseShape::Namespace(name) | ClauseShape::Default(name)) => vec![name.to_string()],
            Some(ClauseShape::Named(clause)) => brace_names(clause),
            Some(ClauseShape::DefaultAndNamed { default, named }) => {
                let mut names = vec![default.to_string()];
                names.extend(named.into_iter().map(|item| local_name(item).to_string()));
                names
            }
            Some(ClauseShape::DefaultAndNamespace { default, name }) => {
                vec![default.to_string(), name.to_string()]
            }
            Some(ClauseShape::Unsupported) | None => Vec::new(),
        },
    }
}

fn brace_names(clause: &str) -> Vec<String> {
    let inner = clause
        .trim()
        .trim_start_matches('{')
        .trim_end_matches('}');

    named_items(inner)
        .into_iter()
        .map(|item| local_name(item).to_string())
        .collect()
}
