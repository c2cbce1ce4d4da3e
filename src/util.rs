//! Utility functions for the qmlantom server.
//!
//! This module contains helper methods for document lookup, logging to the
//! client, and read-only accessors used by tests.

use tower_lsp::lsp_types::{MessageType, Url};

use crate::Backend;
use crate::analyzer::DocumentAnalyzer;
use crate::error::RequestError;
use crate::types::IdentifierBinding;

impl Backend {
    /// Run `f` against the analysis state of `uri` under the read lock.
    pub(crate) fn with_document<R>(
        &self,
        uri: &Url,
        f: impl FnOnce(&DocumentAnalyzer) -> R,
    ) -> Result<R, RequestError> {
        let documents = self.documents.read();
        let analyzer = documents
            .get(uri)
            .ok_or_else(|| RequestError::UnknownDocument(uri.clone()))?;
        Ok(f(analyzer))
    }

    /// Public helper for tests: the `id:` bindings of an open document.
    pub fn bindings_for_uri(&self, uri: &Url) -> Option<Vec<IdentifierBinding>> {
        self.with_document(uri, |a| a.bindings().to_vec()).ok()
    }

    /// Public helper for tests: primary names of the imported components of
    /// an open document, in import order.
    pub fn imported_component_names(&self, uri: &Url) -> Option<Vec<String>> {
        self.with_document(uri, |a| {
            a.imported_components()
                .filter_map(|(_, c)| c.primary_name().map(str::to_string))
                .collect()
        })
        .ok()
    }

    pub(crate) async fn log(&self, typ: MessageType, message: String) {
        if let Some(client) = &self.client {
            client.log_message(typ, message).await;
        }
    }
}
