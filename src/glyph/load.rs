use std::fs;

use anyhow::{Context, Result, anyhow};

use super::document::GlyphDocument;

/// Reads and parses a graph document. Malformed input is fatal here; link
/// records pointing at unknown nodes are tolerated and dealt with later,
/// at scene-construction time.
pub fn load_document(path: &str) -> Result<GlyphDocument> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read graph document at {path}"))?;

    let document: GlyphDocument = serde_json::from_str(&raw)
        .with_context(|| format!("invalid graph document JSON in {path}"))?;

    if document.nodes.is_empty() {
        return Err(anyhow!("graph document {path} contains no nodes"));
    }

    Ok(document)
}
