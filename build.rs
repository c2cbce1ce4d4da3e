//! Build script for qmlantom.
//!
//! Scans `qml_types/` for catalog descriptor files (`*.json`) and generates
//! a Rust source file (`bundled_generated.rs`) that embeds every one of them
//! via `include_str!`, paired with its file name.
//!
//! The generated file is consumed by `src/bundled.rs` at compile time.

use std::env;
use std::fs;
use std::path::Path;

/// Relative path from the crate root to the bundled descriptor directory.
const DESCRIPTOR_DIR: &str = "qml_types";

fn main() {
    println!("cargo:rerun-if-changed={}", DESCRIPTOR_DIR);
    println!("cargo:rerun-if-changed=build.rs");

    let manifest_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");
    let descriptor_dir = Path::new(&manifest_dir).join(DESCRIPTOR_DIR);

    let entries = match fs::read_dir(&descriptor_dir) {
        Ok(entries) => entries,
        Err(e) => {
            // No bundled descriptors: the build still succeeds, the server
            // just starts with whatever catalog directories are configured.
            println!(
                "cargo:warning=Could not read {} ({}); generating empty descriptor index",
                DESCRIPTOR_DIR, e
            );
            write_generated_file(&[]);
            return;
        }
    };

    // Sorted so the catalog build order is stable across platforms.
    let mut files: Vec<(String, String)> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
        .filter_map(|path| {
            let name = path.file_name()?.to_string_lossy().into_owned();
            let abs = path.to_string_lossy().replace('\\', "/");
            Some((name, abs))
        })
        .collect();
    files.sort();

    write_generated_file(&files);
}

/// Write the `(file_name, contents)` array to `$OUT_DIR`.
fn write_generated_file(files: &[(String, String)]) {
    let out_dir = env::var("OUT_DIR").expect("OUT_DIR not set");
    let dest_path = Path::new(&out_dir).join("bundled_generated.rs");

    let mut out = String::new();
    out.push_str("/// Catalog descriptor files embedded at compile time.\n");
    out.push_str("///\n");
    out.push_str("/// Each entry is `(file_name, json_source)`.\n");
    out.push_str(&format!(
        "pub(crate) static BUNDLED_DESCRIPTORS: [(&str, &str); {}] = [\n",
        files.len()
    ));
    for (name, abs) in files {
        out.push_str(&format!(
            "    (\"{}\", include_str!(\"{}\")),\n",
            escape(name),
            escape(abs)
        ));
    }
    out.push_str("];\n");

    fs::write(&dest_path, &out).expect("Failed to write generated descriptor index");
}

/// Escape a string for embedding in a Rust string literal.
fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
