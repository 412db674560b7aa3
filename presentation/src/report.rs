use domain::models::SemanticMap;
use serde::Serialize;
use shared::types::Result;
use std::path::Path;

#[derive(Serialize)]
struct Report<'a> {
    maps: &'a [SemanticMap],
}

/// Writes every map of the run, responses and cluster labels included, as
/// pretty-printed JSON.
pub fn write_report(path: &Path, maps: &[SemanticMap]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let serialized = serde_json::to_string_pretty(&Report { maps })?;
    std::fs::write(path, serialized)?;
    tracing::info!(path = %path.display(), maps = maps.len(), "report written");
    Ok(())
}
