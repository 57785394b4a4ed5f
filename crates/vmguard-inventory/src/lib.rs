//! Inventory adapters: read resource snapshots from disk.
//!
//! This crate is allowed to do filesystem IO. Fetching resources from a cloud
//! API is someone else's job; snapshots arrive here as JSON.

#![forbid(unsafe_code)]

mod parse;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use vmguard_domain::Resource;
use walkdir::WalkDir;

/// Fuzz-friendly API for testing parsing robustness without filesystem access.
pub mod fuzz {
    /// Parse arbitrary text as an inventory document. **Never panics** on any input.
    pub fn parse_inventory(text: &str) -> anyhow::Result<()> {
        let _ = super::parse_inventory(text)?;
        Ok(())
    }
}

/// Parse one inventory document held in memory.
pub fn parse_inventory(text: &str) -> anyhow::Result<Vec<Resource>> {
    parse::parse_records(text)
}

/// Load resources from a JSON file, or from every `*.json` file in a directory.
///
/// Directory entries are read in sorted path order and concatenated, so the
/// resulting resource order (and therefore the report) is stable.
pub fn load_inventory(path: &Utf8Path) -> anyhow::Result<Vec<Resource>> {
    if path.is_dir() {
        let mut out = Vec::new();
        for file in discover_snapshots(path)? {
            out.extend(load_file(&file)?);
        }
        Ok(out)
    } else {
        load_file(path)
    }
}

/// `*.json` files under `dir`, in sorted order.
///
/// Symlinks are followed. A path that is not UTF-8 is an error rather than a
/// skipped file, so no snapshot silently drops out of the audit.
pub fn discover_snapshots(dir: &Utf8Path) -> anyhow::Result<Vec<Utf8PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
        let entry = entry.with_context(|| format!("walk {dir}"))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = Utf8PathBuf::from_path_buf(entry.into_path())
            .map_err(|p| anyhow::anyhow!("non-UTF-8 path in inventory: {}", p.display()))?;
        if path.extension() == Some("json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn load_file(path: &Utf8Path) -> anyhow::Result<Vec<Resource>> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read {path}"))?;
    parse::parse_records(&text).with_context(|| format!("parse {path}"))
}
