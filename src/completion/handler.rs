//! Completion request assembly.
//!
//! Combines the document's analysis state with a fresh backward scan of its
//! current text to answer one completion request.  Requests are resolved in
//! priority order:
//!
//! 1. **Import** (`import ` or `import QtQuick.`): every module name in
//!    the catalog.
//! 2. **Member access** (`subject.`): members of the component `subject`
//!    names, either directly as a type name or through an `id:` binding.
//! 3. **General**: members of the enclosing component (if one can be
//!    inferred) followed by the document's standing candidate list.

use tower_lsp::lsp_types::Position;
use tracing::debug;

use crate::analyzer::DocumentAnalyzer;
use crate::completion::builder::append_component_members;
use crate::completion::context::{CompletionContext, detect_context};
use crate::scanner::TextScanner;
use crate::types::{CandidateKind, CompletionCandidate};

/// Build the candidate list for a completion at `pos`.
///
/// `trigger` is the character that caused the request, if any.  Detection
/// relies on the text itself, so a manual invocation right after `.`
/// behaves exactly like a `.`-triggered one.
pub fn assemble_completion(
    analyzer: &DocumentAnalyzer,
    pos: Position,
    trigger: Option<&str>,
) -> Vec<CompletionCandidate> {
    let scanner = TextScanner::new(analyzer.text());
    let context = detect_context(&scanner, pos);
    debug!(?context, ?trigger, line = pos.line, character = pos.character, "completion context");

    match context {
        CompletionContext::MemberAccess { subject } => member_candidates(analyzer, &subject),
        CompletionContext::Import => module_candidates(analyzer),
        CompletionContext::General => general_candidates(analyzer, &scanner, pos),
    }
}

/// Members of the component `subject` refers to.  A component type name
/// takes precedence over an identifier with the same spelling.
pub fn member_candidates(analyzer: &DocumentAnalyzer, subject: &str) -> Vec<CompletionCandidate> {
    if subject.is_empty() {
        return Vec::new();
    }

    let type_name = if analyzer.is_imported_component(subject) {
        subject
    } else if let Some(binding) = analyzer.binding(subject) {
        binding.inferred_type.as_str()
    } else {
        return Vec::new();
    };

    members_of_type(analyzer, type_name)
}

/// Members of every imported component whose primary name is `type_name`.
fn members_of_type(analyzer: &DocumentAnalyzer, type_name: &str) -> Vec<CompletionCandidate> {
    let mut items = Vec::new();
    for (id, _) in analyzer.imported_components_named(type_name) {
        append_component_members(analyzer.catalog(), id, &mut items);
    }
    items
}

/// One candidate per catalog module.
pub fn module_candidates(analyzer: &DocumentAnalyzer) -> Vec<CompletionCandidate> {
    analyzer
        .catalog()
        .modules()
        .iter()
        .map(|m| CompletionCandidate::new(&m.name, CandidateKind::ModuleName))
        .collect()
}

fn general_candidates(
    analyzer: &DocumentAnalyzer,
    scanner: &TextScanner,
    pos: Position,
) -> Vec<CompletionCandidate> {
    let Some(type_name) = analyzer.infer_enclosing_type(scanner, pos) else {
        return analyzer.candidates().to_vec();
    };
    debug!(%type_name, "enclosing component");

    let mut items = members_of_type(analyzer, &type_name);
    items.extend_from_slice(analyzer.candidates());
    items
}
