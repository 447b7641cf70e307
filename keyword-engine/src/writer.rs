use std::fs;
use std::path::Path;
use tracing::debug;
use trendseed_core::{CoreError, KeywordResult};

/// Writes `result` as pretty-printed UTF-8 JSON, replacing any existing file.
///
/// Non-ASCII text is written as-is, with 2-space indentation and no trailing
/// newline.
pub fn write_result(path: &Path, result: &KeywordResult) -> Result<(), CoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(result)?;
    fs::write(path, json)?;
    debug!("Wrote {} entries to {}", result.len(), path.display());
    Ok(())
}

pub fn read_result(path: &Path) -> Result<KeywordResult, CoreError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
