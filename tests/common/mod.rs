#![allow(dead_code)]

use std::sync::Arc;

use qmlantom_lsp::Backend;
use qmlantom_lsp::catalog::{Catalog, DescriptorSource};
use tower_lsp::LanguageServer;
use tower_lsp::lsp_types::*;

/// Core types, mirroring the shape of real qmltypes-derived descriptors.
pub const QTQML_JSON: &str = r#"{
    "components": [
        {
            "name": "QObject",
            "exports": ["QtQml/QtObject 2.0"],
            "properties": [{ "name": "objectName", "type": "string" }],
            "methods": [{ "name": "destroy" }]
        },
        {
            "name": "QQmlTimer",
            "exports": ["QtQml/Timer 2.0"],
            "prototype": "QObject",
            "properties": [{ "name": "interval", "type": "int" }],
            "signals": [{ "name": "triggered" }],
            "methods": [{ "name": "start" }]
        },
        {
            "name": "QQmlEngine",
            "prototype": "QObject"
        }
    ]
}"#;

pub const QTQUICK_JSON: &str = r#"{
    "components": [
        {
            "name": "QQuickItem",
            "exports": ["QtQuick/Item 2.0"],
            "prototype": "QObject",
            "properties": [
                { "name": "width", "type": "double" },
                { "name": "height", "type": "double" }
            ],
            "methods": [{ "name": "forceActiveFocus" }],
            "enums": [
                { "name": "TransformOrigin", "values": { "Center": 4, "TopLeft": 0 } }
            ]
        },
        {
            "name": "QQuickRectangle",
            "exports": ["QtQuick/Rectangle 2.0"],
            "prototype": "QQuickItem",
            "properties": [{ "name": "color", "type": "QColor" }, { "name": "radius" }]
        },
        {
            "name": "QQuickMouseArea",
            "exports": ["QtQuick/MouseArea 2.0"],
            "prototype": "QQuickItem",
            "signals": [{ "name": "clicked" }, { "name": "pressAndHold" }]
        },
        {
            "name": "QQuickPinchArea",
            "exports": ["QtQuick/PinchArea 2.5"],
            "prototype": "QQuickItem"
        }
    ]
}"#;

pub const CONTROLS_JSON: &str = r#"{
    "components": [
        {
            "name": "QQuickButton",
            "exports": ["QtQuick.Controls/Button 2.0", "QtQuick.Templates/Button 2.0"],
            "prototype": "QQuickItem",
            "properties": [{ "name": "text", "type": "string" }],
            "signals": [{ "name": "clicked" }]
        }
    ]
}"#;

/// Two unrelated `Map` components plus an AppStudio one.
pub const MAPS_JSON: &str = r#"{
    "components": [
        {
            "name": "QDeclarativeGeoMap",
            "exports": ["QtLocation/Map 5.0"],
            "prototype": "QQuickItem",
            "properties": [{ "name": "zoomLevel", "type": "double" }]
        },
        {
            "name": "MapQuickView",
            "exports": ["Esri.ArcGISRuntime/Map 100.0"],
            "prototype": "QObject",
            "properties": [{ "name": "basemap" }]
        },
        {
            "name": "AppFramework",
            "exports": ["ArcGIS.AppFramework/AppFramework 1.0"],
            "prototype": "QObject"
        }
    ]
}"#;

/// Components whose prototypes form a loop.
pub const CYCLE_JSON: &str = r#"{
    "components": [
        {
            "name": "LoopA",
            "exports": ["Loops/LoopA 1.0"],
            "prototype": "LoopB",
            "properties": [{ "name": "alpha" }]
        },
        {
            "name": "LoopB",
            "exports": ["Loops/LoopB 1.0"],
            "prototype": "LoopA",
            "properties": [{ "name": "beta" }]
        }
    ]
}"#;

pub fn test_sources() -> Vec<DescriptorSource> {
    vec![
        DescriptorSource::new("QtQml.json", QTQML_JSON),
        DescriptorSource::new("QtQuick.2.json", QTQUICK_JSON),
        DescriptorSource::new("QtQuick.Controls.json", CONTROLS_JSON),
        DescriptorSource::new("Maps.json", MAPS_JSON),
        DescriptorSource::new("Loops.json", CYCLE_JSON),
    ]
}

pub fn test_catalog() -> Arc<Catalog> {
    Arc::new(Catalog::load(test_sources()).expect("test catalog should load"))
}

pub fn create_test_backend() -> Backend {
    Backend::new_test(test_catalog())
}

pub async fn open(backend: &Backend, uri: &Url, text: &str) {
    let open_params = DidOpenTextDocumentParams {
        text_document: TextDocumentItem {
            uri: uri.clone(),
            language_id: "qml".to_string(),
            version: 1,
            text: text.to_string(),
        },
    };
    backend.did_open(open_params).await;
}

/// Run a completion request and return the items.
pub async fn complete(
    backend: &Backend,
    uri: &Url,
    line: u32,
    character: u32,
    trigger: Option<&str>,
) -> Vec<CompletionItem> {
    let completion_params = CompletionParams {
        text_document_position: TextDocumentPositionParams {
            text_document: TextDocumentIdentifier { uri: uri.clone() },
            position: Position { line, character },
        },
        work_done_progress_params: WorkDoneProgressParams::default(),
        partial_result_params: PartialResultParams::default(),
        context: Some(CompletionContext {
            trigger_kind: if trigger.is_some() {
                CompletionTriggerKind::TRIGGER_CHARACTER
            } else {
                CompletionTriggerKind::INVOKED
            },
            trigger_character: trigger.map(str::to_string),
        }),
    };

    match backend.completion(completion_params).await.unwrap() {
        Some(CompletionResponse::Array(items)) => items,
        other => panic!("Expected CompletionResponse::Array, got {:?}", other),
    }
}

pub fn labels(items: &[CompletionItem]) -> Vec<&str> {
    items.iter().map(|i| i.label.as_str()).collect()
}

pub fn labels_of_kind(items: &[CompletionItem], kind: CompletionItemKind) -> Vec<&str> {
    items
        .iter()
        .filter(|i| i.kind == Some(kind))
        .map(|i| i.label.as_str())
        .collect()
}

pub async fn hover(backend: &Backend, uri: &Url, line: u32, character: u32) -> Option<Hover> {
    let hover_params = HoverParams {
        text_document_position_params: TextDocumentPositionParams {
            text_document: TextDocumentIdentifier { uri: uri.clone() },
            position: Position { line, character },
        },
        work_done_progress_params: WorkDoneProgressParams::default(),
    };
    backend.hover(hover_params).await.unwrap()
}

pub fn hover_text(hover: &Hover) -> &str {
    match &hover.contents {
        HoverContents::Markup(markup) => &markup.value,
        other => panic!("Expected markup hover, got {:?}", other),
    }
}
