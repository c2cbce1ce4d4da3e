//! Data types used throughout the qmlantom server.
//!
//! This module contains the "model" structs and enums that represent the
//! symbol catalog (components, their exports and members, modules) as well
//! as the per-document analysis results (completion candidates and
//! identifier bindings).

use tower_lsp::lsp_types::{CompletionItem, CompletionItemKind};

/// Index of a [`Component`] inside a [`crate::catalog::Catalog`].
pub type ComponentId = usize;

/// One `"<module>/<Component> <version>"` export entry of a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportInfo {
    /// The dotted module path (e.g. `"QtQuick.Controls"`).
    pub module_name: String,
    /// The symbol used in markup (e.g. `"Rectangle"`).
    pub component_name: String,
    /// The version string exactly as written in the export (e.g. `"2.0"`).
    pub module_version: String,
    /// `module_name` split on `.` (e.g. `["QtQuick", "Controls"]`).
    pub module_name_segments: Vec<String>,
}

/// A property declared by a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyInfo {
    pub name: String,
    /// Type name as given by the descriptor (e.g. `"QColor"`).
    pub type_name: Option<String>,
}

/// An enum declared by a component. Only the value names are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumInfo {
    pub name: String,
    pub values: Vec<String>,
}

/// A component (markup type) from the symbol catalog.
///
/// Members are owned so the catalog does not borrow from the descriptor
/// sources it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    /// The internal component name (e.g. `"QQuickRectangle"`), unique within
    /// one descriptor source.
    pub name: String,
    /// Every well-formed export entry, in descriptor order.  The first one is
    /// authoritative for name matching.
    pub exports: Vec<ExportInfo>,
    /// Internal name of the parent component, if any.
    pub prototype: Option<String>,
    pub properties: Vec<PropertyInfo>,
    pub methods: Vec<String>,
    pub signals: Vec<String>,
    pub enums: Vec<EnumInfo>,
}

impl Component {
    /// The authoritative export entry.
    pub fn primary_export(&self) -> Option<&ExportInfo> {
        self.exports.first()
    }

    /// The in-markup name of the primary export (e.g. `"Rectangle"`).
    pub fn primary_name(&self) -> Option<&str> {
        self.primary_export().map(|e| e.component_name.as_str())
    }
}

/// A named, versioned group of components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    /// The dotted module path, unique within the catalog.
    pub name: String,
    /// Lowest export version seen for this module.
    pub version: String,
    /// Member components, deduplicated by component name.
    pub components: Vec<ComponentId>,
}

/// What a completion candidate stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateKind {
    ComponentType,
    Property,
    Method,
    /// A signal, offered under its `on<Signal>` handler name.
    Signal,
    EnumMember,
    /// An `id:` declared in the current document.
    Identifier,
    Keyword,
    BuiltinType,
    ModuleName,
}

impl CandidateKind {
    /// The LSP item kind editors use to pick an icon.
    pub fn lsp_kind(self) -> CompletionItemKind {
        match self {
            CandidateKind::ComponentType => CompletionItemKind::CLASS,
            CandidateKind::Property => CompletionItemKind::PROPERTY,
            CandidateKind::Method => CompletionItemKind::METHOD,
            CandidateKind::Signal => CompletionItemKind::EVENT,
            CandidateKind::EnumMember => CompletionItemKind::ENUM_MEMBER,
            CandidateKind::Identifier => CompletionItemKind::VARIABLE,
            CandidateKind::Keyword => CompletionItemKind::KEYWORD,
            CandidateKind::BuiltinType => CompletionItemKind::STRUCT,
            CandidateKind::ModuleName => CompletionItemKind::MODULE,
        }
    }
}

/// A single completion suggestion, independent of the LSP wire format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionCandidate {
    pub label: String,
    pub kind: CandidateKind,
    pub detail: Option<String>,
}

impl CompletionCandidate {
    pub fn new(label: impl Into<String>, kind: CandidateKind) -> Self {
        Self {
            label: label.into(),
            kind,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn to_completion_item(&self) -> CompletionItem {
        CompletionItem {
            label: self.label.clone(),
            kind: Some(self.kind.lsp_kind()),
            detail: self.detail.clone(),
            ..CompletionItem::default()
        }
    }
}

/// An `id:` declaration bound to the component type of its enclosing block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierBinding {
    pub id: String,
    /// Primary exported name of the enclosing component (e.g. `"Rectangle"`).
    pub inferred_type: String,
}
