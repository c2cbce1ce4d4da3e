//! Per-document analysis state.
//!
//! A [`DocumentAnalyzer`] owns everything derived from one open document:
//! the modules and components brought into scope by its `import` lines, the
//! `id:` declarations bound to their enclosing component type, and the
//! standing list of completion candidates built from both.
//!
//! The state is recomputed from scratch on every content change.  Both
//! passes clear their collections first, so analysing the same text twice
//! yields identical state and nothing from an earlier revision survives.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use tower_lsp::lsp_types::Position;
use tracing::debug;

use crate::catalog::Catalog;
use crate::scanner::{TextScanner, is_word_char, offset_to_position};
use crate::types::{CandidateKind, Component, ComponentId, CompletionCandidate, IdentifierBinding, Module};

/// `import <dotted.path> <version-or-clause>` (one match per import line).
static IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bimport\s+(?P<path>(?:\w+\.?)+)[ \t]*(?P<clause>[^\r\n]*)").unwrap()
});

/// `id: name`
static ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bid\s*:\s*(?P<id>\w+)").unwrap());

/// Markup keywords offered in every document.
const KEYWORDS: &[&str] = &["import", "property", "signal", "id: ", "states: "];

/// Primitive property types offered in every document.
const BUILTIN_TYPES: &[&str] = &[
    "bool",
    "double",
    "enumeration",
    "int",
    "list",
    "real",
    "string",
    "url",
    "var",
];

/// Importing this module implicitly imports [`IMPLICIT_IMPORT`].
const IMPLICIT_IMPORT_TRIGGER: &str = "QtQuick";
const IMPLICIT_IMPORT: &str = "QtQml";

pub struct DocumentAnalyzer {
    catalog: Arc<Catalog>,
    text: String,
    /// Indices into `catalog.modules()`, in import order.
    imported_modules: Vec<usize>,
    /// Flattened in import order; a component re-exported by two imported
    /// modules appears twice.
    imported_components: Vec<ComponentId>,
    candidates: Vec<CompletionCandidate>,
    bindings: Vec<IdentifierBinding>,
}

impl DocumentAnalyzer {
    /// Create the state for a newly opened document and analyse it.
    pub fn new(catalog: Arc<Catalog>, text: impl Into<String>) -> Self {
        let mut analyzer = Self {
            catalog,
            text: text.into(),
            imported_modules: Vec::new(),
            imported_components: Vec::new(),
            candidates: Vec::new(),
            bindings: Vec::new(),
        };
        analyzer.analyze();
        analyzer
    }

    /// Replace the document text and recompute all derived state.
    pub fn update(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.analyze();
    }

    fn analyze(&mut self) {
        self.resolve_imports();
        self.resolve_ids();
        debug!(
            modules = self.imported_modules.len(),
            components = self.imported_components.len(),
            ids = self.bindings.len(),
            "document analysed"
        );
    }

    // ─── Import resolution ──────────────────────────────────────────────

    /// Rebuild the imported modules and components from the `import` lines,
    /// then append the keyword and builtin type candidates.
    ///
    /// Also clears the id bindings, since they depend on the imports.
    pub fn resolve_imports(&mut self) {
        self.imported_modules.clear();
        self.imported_components.clear();
        self.candidates.clear();
        self.bindings.clear();

        let imports: Vec<(String, String)> = IMPORT_RE
            .captures_iter(&self.text)
            .map(|caps| {
                (
                    caps["path"].trim_end_matches('.').to_string(),
                    caps["clause"].to_string(),
                )
            })
            .collect();

        let catalog = Arc::clone(&self.catalog);
        for (path, clause) in &imports {
            for (idx, module) in catalog.modules().iter().enumerate() {
                if !Self::import_brings_in(&catalog, module, path, clause) {
                    continue;
                }
                self.imported_modules.push(idx);

                for &id in &module.components {
                    self.imported_components.push(id);
                    if let Some(name) = catalog.component(id).primary_name() {
                        self.push_unique(CompletionCandidate::new(name, CandidateKind::ComponentType));
                    }
                }
            }
        }

        for keyword in KEYWORDS {
            self.candidates
                .push(CompletionCandidate::new(*keyword, CandidateKind::Keyword));
        }
        for ty in BUILTIN_TYPES {
            self.candidates
                .push(CompletionCandidate::new(*ty, CandidateKind::BuiltinType));
        }
    }

    /// `import <path> <clause>` imports `module` when the names match and
    /// the module version does not exceed the requested one.  `QtQuick`
    /// additionally imports `QtQml` at any version.
    fn import_brings_in(catalog: &Catalog, module: &Module, path: &str, clause: &str) -> bool {
        (module.name == path && catalog.version_matches(module, clause))
            || (path == IMPLICIT_IMPORT_TRIGGER && module.name == IMPLICIT_IMPORT)
    }

    /// Push a candidate unless one with the same label and kind exists.
    fn push_unique(&mut self, candidate: CompletionCandidate) {
        let exists = self
            .candidates
            .iter()
            .any(|c| c.label == candidate.label && c.kind == candidate.kind);
        if !exists {
            self.candidates.push(candidate);
        }
    }

    // ─── Identifier resolution ──────────────────────────────────────────

    /// Rebuild the `id:` bindings.  Ids whose enclosing block has no
    /// resolvable component type are skipped.
    pub fn resolve_ids(&mut self) {
        self.bindings.clear();
        self.candidates.retain(|c| c.kind != CandidateKind::Identifier);

        let scanner = TextScanner::new(&self.text);
        let mut found = Vec::new();
        for caps in ID_RE.captures_iter(&self.text) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            let pos = offset_to_position(&self.text, whole.start());
            match self.infer_enclosing_type(&scanner, pos) {
                Some(ty) => found.push(IdentifierBinding {
                    id: caps["id"].to_string(),
                    inferred_type: ty,
                }),
                None => debug!(id = &caps["id"], line = pos.line, "id without resolvable type"),
            }
        }

        for binding in found {
            self.candidates.push(
                CompletionCandidate::new(&binding.id, CandidateKind::Identifier)
                    .with_detail(format!("Type of: {}", binding.inferred_type)),
            );
            self.bindings.push(binding);
        }
    }

    // ─── Type inference ─────────────────────────────────────────────────

    /// The component type of the block enclosing `pos`.
    ///
    /// Finds the structurally enclosing `{`, takes the word in front of it
    /// and returns it if it names an imported component.  Otherwise the
    /// block is a grouped property or similar sub-block, so the search
    /// climbs out one brace level from that word and tries again.  Each
    /// step moves strictly backward, and running out of braces yields an
    /// empty word, which ends the search.
    pub fn infer_enclosing_type(&self, scanner: &TextScanner, pos: Position) -> Option<String> {
        let mut pos = pos;
        loop {
            let brace = scanner.first_char_outside_brace_pairs(pos, |c| c == '{');
            let word_end = scanner.first_preceding_match(brace, is_word_char);
            let word = scanner.preceding_word(word_end).word;

            if word.is_empty() {
                return None;
            }
            if self.is_imported_component(&word) {
                return Some(word);
            }
            pos = word_end;
        }
    }

    /// Whether `name` is the primary exported name of an imported component.
    pub fn is_imported_component(&self, name: &str) -> bool {
        self.imported_components_named(name).next().is_some()
    }

    /// Imported components whose primary exported name is `name`.
    pub fn imported_components_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = (ComponentId, &'a Component)> + 'a {
        self.imported_components()
            .filter(move |(_, c)| c.primary_name() == Some(name))
    }

    // ─── Accessors ──────────────────────────────────────────────────────

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn imported_modules(&self) -> impl Iterator<Item = &Module> + '_ {
        let modules = self.catalog.modules();
        self.imported_modules.iter().map(move |&idx| &modules[idx])
    }

    pub fn imported_components(&self) -> impl Iterator<Item = (ComponentId, &Component)> + '_ {
        self.imported_components
            .iter()
            .map(|&id| (id, self.catalog.component(id)))
    }

    /// The standing candidate list: component types, keywords, builtin
    /// types and identifiers.
    pub fn candidates(&self) -> &[CompletionCandidate] {
        &self.candidates
    }

    pub fn bindings(&self) -> &[IdentifierBinding] {
        &self.bindings
    }

    /// The binding declared with `id: <id>`, if any.
    pub fn binding(&self, id: &str) -> Option<&IdentifierBinding> {
        self.bindings.iter().find(|b| b.id == id)
    }
}
