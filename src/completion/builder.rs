//! Member candidate building.
//!
//! Turns a catalog component into property, method, signal-handler and
//! enum-value candidates, walking the `prototype` chain so inherited members
//! are included.  Prototypes are looked up by name in the catalog at query
//! time; a chain that revisits a component stops there instead of looping.

use std::collections::HashSet;

use tracing::warn;

use crate::catalog::Catalog;
use crate::types::{CandidateKind, Component, ComponentId, CompletionCandidate};

/// `clicked` → `onClicked`.
pub fn signal_handler_name(signal: &str) -> String {
    let mut chars = signal.chars();
    match chars.next() {
        Some(first) => format!("on{}{}", first.to_uppercase(), chars.as_str()),
        None => "on".to_string(),
    }
}

/// Members of `id` and of every ancestor reachable through `prototype`.
///
/// Own members come first; an inherited member is dropped when a member
/// with the same label and kind is already present.
pub fn component_members(catalog: &Catalog, id: ComponentId) -> Vec<CompletionCandidate> {
    let mut items = Vec::new();
    append_component_members(catalog, id, &mut items);
    items
}

/// Like [`component_members`], appending to `items` with the same
/// deduplication against what is already there.
pub fn append_component_members(
    catalog: &Catalog,
    id: ComponentId,
    items: &mut Vec<CompletionCandidate>,
) {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut current = Some(catalog.component(id));

    while let Some(component) = current {
        if !visited.insert(component.name.as_str()) {
            warn!(component = %component.name, "prototype cycle detected");
            break;
        }

        push_own_members(component, items);

        current = component
            .prototype
            .as_deref()
            .and_then(|parent| catalog.component_by_name(parent))
            .map(|(_, parent)| parent);
    }
}

fn push_own_members(component: &Component, items: &mut Vec<CompletionCandidate>) {
    let owner = component.primary_name().unwrap_or(&component.name);

    for property in &component.properties {
        let candidate = CompletionCandidate::new(&property.name, CandidateKind::Property)
            .with_detail(property.type_name.as_deref().unwrap_or(owner));
        push_if_new(items, candidate);
    }

    for method in &component.methods {
        push_if_new(
            items,
            CompletionCandidate::new(method, CandidateKind::Method).with_detail(owner),
        );
    }

    for signal in &component.signals {
        push_if_new(
            items,
            CompletionCandidate::new(signal_handler_name(signal), CandidateKind::Signal)
                .with_detail(owner),
        );
    }

    for en in &component.enums {
        for value in &en.values {
            push_if_new(
                items,
                CompletionCandidate::new(value, CandidateKind::EnumMember)
                    .with_detail(format!("{}.{}", owner, en.name)),
            );
        }
    }
}

fn push_if_new(items: &mut Vec<CompletionCandidate>, candidate: CompletionCandidate) {
    if !items
        .iter()
        .any(|existing| existing.label == candidate.label && existing.kind == candidate.kind)
    {
        items.push(candidate);
    }
}
