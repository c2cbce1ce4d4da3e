//! Symbol catalog.
//!
//! The catalog is the read-only table of modules and components that every
//! document analysis consults.  It is built once at startup from a set of
//! descriptor sources (JSON files describing components and their exports)
//! and never mutated afterwards; the server shares it behind an `Arc`.
//!
//! # Build algorithm
//!
//! For every component record in every descriptor source, each export
//! string of the form `"<dotted.module>/<Component> <version>"` becomes an
//! [`ExportInfo`], and the component is inserted into the [`Module`] named
//! by the dotted path (once per module, deduplicated by component name).
//! Records without an `exports` array, and export strings that do not match
//! the pattern, are skipped.  An unreadable or unparseable source aborts the
//! whole build.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::CatalogError;
use crate::types::{Component, ComponentId, EnumInfo, ExportInfo, Module, PropertyInfo};

/// `"<dotted.module.path>/<ComponentName> <version>"`
static EXPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<module>\w+(?:\.\w+)*)/(?P<component>\w+) (?P<version>\S+)$").unwrap()
});

// ─── Descriptor sources ─────────────────────────────────────────────────────

/// One named JSON document describing components.
#[derive(Debug, Clone)]
pub struct DescriptorSource {
    /// Used in log and error messages only (usually the file name).
    pub name: String,
    pub content: String,
}

impl DescriptorSource {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Read a single descriptor file.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { name, content })
    }

    /// Read every `*.json` file in `dir`, sorted by file name.
    pub fn read_dir(dir: &Path) -> Result<Vec<Self>, CatalogError> {
        let entries = fs::read_dir(dir).map_err(|source| CatalogError::Read {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| CatalogError::Read {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        paths.iter().map(|p| Self::from_path(p)).collect()
    }
}

// ─── Raw descriptor records ─────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RawComponent {
    name: String,
    exports: Vec<String>,
    #[serde(default)]
    prototype: Option<String>,
    #[serde(default)]
    properties: Vec<RawProperty>,
    #[serde(default)]
    methods: Vec<RawNamed>,
    #[serde(default)]
    signals: Vec<RawNamed>,
    #[serde(default)]
    enums: Vec<RawEnum>,
}

#[derive(Debug, Deserialize)]
struct RawProperty {
    name: String,
    #[serde(rename = "type", default)]
    type_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawNamed {
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawEnum {
    name: String,
    #[serde(default)]
    values: serde_json::Map<String, serde_json::Value>,
}

/// Parse one export string.  Returns `None` when it does not match the
/// `"<module>/<Component> <version>"` shape.
pub fn parse_export(export: &str) -> Option<ExportInfo> {
    let caps = EXPORT_RE.captures(export.trim())?;
    let module_name = caps["module"].to_string();
    let module_name_segments = module_name.split('.').map(str::to_string).collect();
    Some(ExportInfo {
        component_name: caps["component"].to_string(),
        module_version: caps["version"].to_string(),
        module_name,
        module_name_segments,
    })
}

// ─── Versions ───────────────────────────────────────────────────────────────

/// A dotted numeric version, compared segment by segment as integers.
///
/// Trailing zero segments are dropped on parse so `2` and `2.0` are equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ModuleVersion(Vec<u32>);

impl ModuleVersion {
    /// Parse the leading version number of `text` (e.g. `"2.15"` from
    /// `"2.15 as Controls"`).  Returns `None` if `text` does not start with a
    /// digit.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim_start();
        let end = text
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(text.len());
        let mut segments = Vec::new();
        for part in text[..end].split('.') {
            if part.is_empty() {
                break;
            }
            segments.push(part.parse::<u32>().ok()?);
        }
        if segments.is_empty() {
            return None;
        }
        while segments.len() > 1 && segments.last() == Some(&0) {
            segments.pop();
        }
        Some(Self(segments))
    }
}

/// `available <= requested`, numerically.  A requested version that does
/// not parse (including an absent one) accepts any module version; an
/// unparseable available version is treated as the lowest possible.
pub fn version_satisfies(available: &str, requested: &str) -> bool {
    let Some(requested) = ModuleVersion::parse(requested) else {
        return true;
    };
    match ModuleVersion::parse(available) {
        Some(available) => available <= requested,
        None => true,
    }
}

// ─── Catalog ────────────────────────────────────────────────────────────────

/// The immutable table of modules and components.
#[derive(Debug, Default)]
pub struct Catalog {
    components: Vec<Component>,
    modules: Vec<Module>,
    module_index: HashMap<String, usize>,
    /// Internal component name → first component registered under it.
    component_index: HashMap<String, ComponentId>,
}

impl Catalog {
    /// A catalog with no modules.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the catalog from descriptor sources, in order.
    pub fn load<I>(sources: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = DescriptorSource>,
    {
        let mut catalog = Self::default();
        for source in sources {
            catalog.add_source(&source)?;
        }
        debug!(
            modules = catalog.modules.len(),
            components = catalog.components.len(),
            "symbol catalog built"
        );
        Ok(catalog)
    }

    fn add_source(&mut self, source: &DescriptorSource) -> Result<(), CatalogError> {
        let json: serde_json::Value =
            serde_json::from_str(&source.content).map_err(|e| CatalogError::Parse {
                source_name: source.name.clone(),
                source: e,
            })?;

        let records = json
            .get("components")
            .and_then(|c| c.as_array())
            .ok_or_else(|| CatalogError::MissingComponents {
                source_name: source.name.clone(),
            })?;

        for record in records {
            // Internal helper types carry no exports; they cannot be
            // imported, so they are not worth a warning.
            if record.get("exports").is_none() {
                continue;
            }
            let raw: RawComponent = match serde_json::from_value(record.clone()) {
                Ok(raw) => raw,
                Err(e) => {
                    warn!(source = %source.name, error = %e, "skipping malformed component record");
                    continue;
                }
            };
            if let Some(component) = Self::convert_component(raw, &source.name) {
                self.insert_component(component);
            }
        }
        Ok(())
    }

    /// Turn a raw record into a [`Component`], dropping exports that do not
    /// match the expected pattern.  Returns `None` if no export survives.
    fn convert_component(raw: RawComponent, source_name: &str) -> Option<Component> {
        let exports: Vec<ExportInfo> = raw
            .exports
            .iter()
            .filter_map(|e| {
                let info = parse_export(e);
                if info.is_none() {
                    warn!(source = %source_name, component = %raw.name, export = %e, "ignoring malformed export entry");
                }
                info
            })
            .collect();

        if exports.is_empty() {
            return None;
        }

        Some(Component {
            name: raw.name,
            exports,
            prototype: raw.prototype.filter(|p| !p.is_empty()),
            properties: raw
                .properties
                .into_iter()
                .map(|p| PropertyInfo {
                    name: p.name,
                    type_name: p.type_name,
                })
                .collect(),
            methods: raw.methods.into_iter().map(|m| m.name).collect(),
            signals: raw.signals.into_iter().map(|s| s.name).collect(),
            enums: raw
                .enums
                .into_iter()
                .map(|e| EnumInfo {
                    name: e.name,
                    values: e.values.keys().cloned().collect(),
                })
                .collect(),
        })
    }

    fn insert_component(&mut self, component: Component) {
        let id = self.components.len();
        self.component_index
            .entry(component.name.clone())
            .or_insert(id);

        for export in &component.exports {
            let module_idx = match self.module_index.get(&export.module_name) {
                Some(&idx) => idx,
                None => {
                    let idx = self.modules.len();
                    self.modules.push(Module {
                        name: export.module_name.clone(),
                        version: export.module_version.clone(),
                        components: Vec::new(),
                    });
                    self.module_index.insert(export.module_name.clone(), idx);
                    idx
                }
            };

            let module = &mut self.modules[module_idx];
            if Self::version_cmp(&export.module_version, &module.version) == Ordering::Less {
                module.version = export.module_version.clone();
            }

            let components = &self.components;
            // `id` itself is not in `components` yet, so test it first.
            let duplicate = module
                .components
                .iter()
                .any(|&c| c == id || components[c].name == component.name);
            if !duplicate {
                module.components.push(id);
            }
        }

        self.components.push(component);
    }

    fn version_cmp(a: &str, b: &str) -> Ordering {
        match (ModuleVersion::parse(a), ModuleVersion::parse(b)) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }

    /// All modules, in the order they were first seen.
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// Look up a module by exact dotted name.
    pub fn module(&self, name: &str) -> Option<&Module> {
        self.module_index.get(name).map(|&idx| &self.modules[idx])
    }

    /// Whether `module` satisfies an import requesting `import_version`
    /// (the module version must not exceed the requested one).
    pub fn version_matches(&self, module: &Module, import_version: &str) -> bool {
        version_satisfies(&module.version, import_version)
    }

    /// The component with the given id.  Ids are only handed out by this
    /// catalog, so the lookup cannot miss.
    pub fn component(&self, id: ComponentId) -> &Component {
        &self.components[id]
    }

    /// Look up a component by its internal name (as used in `prototype`).
    pub fn component_by_name(&self, name: &str) -> Option<(ComponentId, &Component)> {
        self.component_index
            .get(name)
            .map(|&id| (id, &self.components[id]))
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }
}
