//! Embedded catalog descriptors.
//!
//! `build.rs` scans the `qml_types/` directory and generates
//! `bundled_generated.rs`, which embeds every descriptor file via
//! `include_str!` as a `(file_name, json_source)` pair.  The server loads
//! these before any user-configured catalog directory, so a bare install
//! already knows the core `QtQml` and `QtQuick` types.
//!
//! To add or update bundled types, drop the JSON file into `qml_types/` and
//! rebuild.

use crate::catalog::DescriptorSource;

include!(concat!(env!("OUT_DIR"), "/bundled_generated.rs"));

/// The descriptor sources compiled into the binary, sorted by file name.
pub fn bundled_sources() -> Vec<DescriptorSource> {
    BUNDLED_DESCRIPTORS
        .iter()
        .map(|&(name, content)| DescriptorSource::new(name, content))
        .collect()
}
