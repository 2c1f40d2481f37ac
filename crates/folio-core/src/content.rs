//! Reading and writing the published `content.json`.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::SiteContent;

/// Parses a serialized site document and checks its invariants.
pub fn parse_content(json: &str) -> Result<SiteContent> {
    let content: SiteContent = serde_json::from_str(json).map_err(|e| Error::Schema(e.to_string()))?;
    content.validate()?;
    Ok(content)
}

pub fn load_content(path: &Path) -> Result<SiteContent> {
    if !path.exists() {
        return Err(Error::NotFound(path.display().to_string()));
    }
    let raw = read_file_content(path)?;
    let content = parse_content(&raw)?;
    tracing::debug!(
        path = %path.display(),
        projects = content.projects.len(),
        testimonials = content.testimonials.len(),
        "loaded site content"
    );
    Ok(content)
}

/// Serializes with two-space indentation, the layout of the exported file.
pub fn to_pretty_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn write_content<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, to_pretty_json(value)?)?;
    Ok(())
}

fn read_file_content(file_path: &Path) -> Result<String> {
    match fs::read_to_string(file_path) {
        Ok(content) => Ok(content),
        Err(_) => Ok(String::from_utf8_lossy(&fs::read(file_path)?).to_string()),
    }
}
