use tracing::debug;

use crate::AGGREGATE_NAMESPACE;

/// The `const {...} = __PACKES__;` line binding every recovered name
pub fn destructuring_preamble(names: &[String]) -> String {
    format!("const {{{}}} = {};", names.join(","), AGGREGATE_NAMESPACE)
}

/// Join the bundler artifact, the preamble and the stripped entry body.
///
/// Evaluation order matches the entry file: bundled dependencies first,
/// then the bindings, then the entry's own code.
pub fn assemble(artifact: &str, names: &[String], stripped_body: &str) -> String {
    debug!(
        "Assembling output: {} byte artifact, {} binding(s), {} byte body",
        artifact.len(),
        names.len(),
        stripped_body.len()
    );

    format!(
        "{};\n{}\n{}",
        artifact,
        destructuring_preamble(names),
        stripped_body
    )
}
