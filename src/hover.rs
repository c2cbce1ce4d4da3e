//! Hover: API reference links.
//!
//! Hovering a component name shows links to its reference documentation.
//! The URL shape depends on who publishes the module, which is decided by
//! the first segment of the dotted module path:
//!
//! | module prefix | documentation site                          |
//! |---------------|---------------------------------------------|
//! | `ArcGIS.`     | AppStudio framework reference               |
//! | `Esri.`       | ArcGIS Runtime SDK for Qt reference         |
//! | anything else | Qt 5 reference                              |

use tower_lsp::lsp_types::{Hover, HoverContents, MarkupContent, MarkupKind, Position};

use crate::analyzer::DocumentAnalyzer;
use crate::scanner::TextScanner;
use crate::types::ExportInfo;

/// Prepended when a name resolves to more than one reference page.
pub const MULTIPLE_LINKS_WARNING: &str = "Multiple Api reference links found for this component.\n\nYou may have imported multiple modules containing the component with the same name, or some of the links may be deprecated.\n";

/// Which documentation site hosts a module's reference pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocFamily {
    AppStudio,
    ArcGisRuntime,
    Qt,
}

impl DocFamily {
    pub fn classify(export: &ExportInfo) -> Self {
        let segments = &export.module_name_segments;
        // Only a prefix counts: a module named just `Esri` is not `Esri.`.
        if segments.len() < 2 {
            return DocFamily::Qt;
        }
        match segments[0].as_str() {
            "ArcGIS" => DocFamily::AppStudio,
            "Esri" => DocFamily::ArcGisRuntime,
            _ => DocFamily::Qt,
        }
    }

    fn url_parts(self) -> (&'static str, &'static str) {
        match self {
            DocFamily::AppStudio => ("https://doc.arcgis.com/en/appstudio/api/reference/framework/qml-", ""),
            DocFamily::ArcGisRuntime => (
                "https://developers.arcgis.com/qt/latest/qml/api-reference/qml-",
                ".html",
            ),
            DocFamily::Qt => ("https://doc.qt.io/qt-5/qml-", ".html"),
        }
    }
}

/// The reference page for one export, e.g.
/// `QtQuick.Controls/Button` → `https://doc.qt.io/qt-5/qml-qtquick-controls-button.html`.
pub fn documentation_url(export: &ExportInfo) -> String {
    let (base, suffix) = DocFamily::classify(export).url_parts();
    format!(
        "{}{}-{}{}",
        base,
        export.module_name.replace('.', "-").to_lowercase(),
        export.component_name.to_lowercase(),
        suffix
    )
}

/// Distinct reference URLs for every imported component named `word`.
///
/// For each match the primary export contributes a link, and so does every
/// further export living in a different module.
pub fn documentation_urls(analyzer: &DocumentAnalyzer, word: &str) -> Vec<String> {
    let mut urls: Vec<String> = Vec::new();
    for (_, component) in analyzer.imported_components_named(word) {
        let Some(primary) = component.primary_export() else {
            continue;
        };
        let extra = component
            .exports
            .iter()
            .skip(1)
            .filter(|e| e.module_name != primary.module_name);

        for export in std::iter::once(primary).chain(extra) {
            let url = documentation_url(export);
            if !urls.contains(&url) {
                urls.push(url);
            }
        }
    }
    urls
}

/// Markdown body listing `urls`, or `None` when there are none.
pub fn hover_markdown(urls: &[String]) -> Option<String> {
    if urls.is_empty() {
        return None;
    }
    let mut value = String::new();
    if urls.len() > 1 {
        value.push_str(MULTIPLE_LINKS_WARNING);
    }
    for url in urls {
        value.push('\n');
        value.push_str(url);
        value.push('\n');
    }
    Some(value)
}

/// Hover for the word under `pos`.
pub fn assemble_hover(analyzer: &DocumentAnalyzer, pos: Position) -> Option<Hover> {
    let scanner = TextScanner::new(analyzer.text());
    let (word, range) = scanner.word_at(pos)?;
    let value = hover_markdown(&documentation_urls(analyzer, &word))?;

    Some(Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value,
        }),
        range: Some(range),
    })
}
