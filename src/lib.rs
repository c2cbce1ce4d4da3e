//! qmlantom: a lightweight QML language server.
//!
//! Completion and hover for QML documents driven entirely by regular
//! expressions and backward text scans over the current document, checked
//! against a static catalog of component types.  There is no parser, so
//! analysis keeps working on half-typed, syntactically broken markup.
//!
//! The crate is split into:
//! - [`catalog`]: the immutable symbol catalog, built once at startup
//! - [`scanner`]: backward position-algebra primitives over document text
//! - [`analyzer`]: per-document import, `id:` and enclosing-type analysis
//! - [`completion`] and [`hover`]: request assembly
//! - `server`: the `tower_lsp::LanguageServer` wiring for [`Backend`]

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tower_lsp::Client;
use tower_lsp::lsp_types::{Hover, Position, Url};
use tracing::debug;

pub mod analyzer;
pub mod bundled;
pub mod catalog;
pub mod completion;
pub mod config;
pub mod error;
pub mod hover;
pub mod scanner;
mod server;
pub mod types;
mod util;

use analyzer::DocumentAnalyzer;
use catalog::Catalog;
use error::RequestError;
use types::CompletionCandidate;

pub struct Backend {
    name: String,
    version: String,
    catalog: Arc<Catalog>,
    /// One analysis state per open document.  Writers build the new state
    /// first and only hold the lock for the swap.
    documents: RwLock<HashMap<Url, DocumentAnalyzer>>,
    client: Option<Client>,
}

impl Backend {
    pub fn new(client: Client, catalog: Arc<Catalog>) -> Self {
        Self {
            client: Some(client),
            ..Self::new_test(catalog)
        }
    }

    /// A backend with no client attached; log messages are dropped.
    pub fn new_test(catalog: Arc<Catalog>) -> Self {
        Self {
            name: "qmlantom".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            catalog,
            documents: RwLock::new(HashMap::new()),
            client: None,
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    // ─── Document lifecycle ─────────────────────────────────────────────

    /// Start tracking `uri` (or re-analyse it if already tracked).
    pub fn open_document(&self, uri: Url, text: String) {
        let analyzer = DocumentAnalyzer::new(Arc::clone(&self.catalog), text);
        self.documents.write().insert(uri, analyzer);
    }

    /// Replace the full text of `uri` and re-analyse it from scratch.
    pub fn change_document(&self, uri: Url, text: String) {
        if !self.documents.read().contains_key(&uri) {
            debug!(%uri, "change for untracked document, tracking it now");
        }
        self.open_document(uri, text);
    }

    /// Stop tracking `uri`.  Returns whether it was tracked.
    pub fn close_document(&self, uri: &Url) -> bool {
        self.documents.write().remove(uri).is_some()
    }

    pub fn is_open(&self, uri: &Url) -> bool {
        self.documents.read().contains_key(uri)
    }

    // ─── Requests ───────────────────────────────────────────────────────

    /// Completion candidates at `pos` in `uri`.
    pub fn completion_candidates(
        &self,
        uri: &Url,
        pos: Position,
        trigger: Option<&str>,
    ) -> Result<Vec<CompletionCandidate>, RequestError> {
        self.with_document(uri, |analyzer| {
            completion::handler::assemble_completion(analyzer, pos, trigger)
        })
    }

    /// Documentation hover at `pos` in `uri`.
    pub fn hover_at(&self, uri: &Url, pos: Position) -> Result<Option<Hover>, RequestError> {
        self.with_document(uri, |analyzer| hover::assemble_hover(analyzer, pos))
    }
}
