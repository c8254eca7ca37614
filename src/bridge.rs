use std::path::Path;

use tracing::{debug, warn};

use crate::clause::ClauseShape;
use crate::scanner::{StatementKind, StatementRecord};
use crate::specifier::ResolvedSpecifier;

/// Build the synthetic bridge module handed to the bundler.
///
/// One line per import or re-export, in record order. Declaration exports
/// are already local to the entry file and contribute nothing.
pub fn bridge_module(records: &[StatementRecord], cwd: &Path) -> String {
    let lines: Vec<String> = records
        .iter()
        .filter_map(|record| bridge_line(record, cwd))
        .collect();

    debug!("Bridge module has {} statement(s)", lines.len());
    lines.join("\n")
}

/// The canonical bridge statement for a single record
pub fn bridge_line(record: &StatementRecord, cwd: &Path) -> Option<String> {
    if record.kind == StatementKind::DeclarationExport {
        return None;
    }

    let source = ResolvedSpecifier::resolve(record.source.as_deref()?, cwd);

    if record.kind == StatementKind::SideEffectImport {
        return Some(format!("import '{}';", source.as_str()));
    }

    let line = match ClauseShape::of(record)? {
        ClauseShape::Namespace(name) | ClauseShape::Default(name) => {
            format!("export {{{}}} from '{}';", name, source.as_str())
        }
        ClauseShape::Named(clause) => format!("export {} from '{}';", clause, source.as_str()),
        ClauseShape::DefaultAndNamed { default, named } => {
            let mut items = vec![default];
            items.extend(named);
            format!("export {{{}}} from '{}';", items.join(","), source.as_str())
        }
        ClauseShape::DefaultAndNamespace { default, name } => {
            format!("export {{{},{}}} from '{}';", default, name, source.as_str())
        }
        ClauseShape::Unsupported => {
            warn!(
                "Skipping unsupported {:?} clause '{}' from '{}'",
                record.kind,
                record.clause.as_deref().unwrap_or_default(),
                source.as_str()
            );
            return None;
        }
    };

    Some(line)
}
