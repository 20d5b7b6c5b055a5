use crate::core::documenter::DocumentationRecord;
use std::path::Path;

/// Paired output names for one processed workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputNames {
    pub json_name: String,
    pub md_name: String,
}

/// Derive output names from the AI-suggested filename, falling back to the
/// source name with its extension stripped. Collision handling against the
/// destination belongs to the storage backend, not this layer.
pub fn derive_names(record: &DocumentationRecord, source_name: &str) -> OutputNames {
    let suggested = record
        .suggested_filename
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let base = match suggested {
        Some(name) => {
            let name = name.strip_suffix(".json").unwrap_or(name);
            let name = name.strip_suffix(".md").unwrap_or(name);
            name.to_string()
        }
        None => Path::new(source_name)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(source_name)
            .to_string(),
    };

    OutputNames {
        json_name: format!("{}.json", base),
        md_name: format!("{}.md", base),
    }
}
