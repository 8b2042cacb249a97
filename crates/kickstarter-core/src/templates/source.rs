//! Where template text comes from: assets compiled into the binary, or a
//! directory on disk

use super::bundled;
use crate::error::TemplateError;
use std::path::PathBuf;

/// Template source - either the bundled assets or a local directory
#[derive(Debug, Clone, Default)]
pub enum TemplateSource {
    #[default]
    Bundled,
    Local(PathBuf),
}

impl TemplateSource {
    /// Create a local template source from a path
    pub fn local(path: impl Into<PathBuf>) -> Self {
        Self::Local(path.into())
    }

    /// Read a template by its logical path (e.g. `Content/Sites.xml`)
    pub fn read(&self, template_path: &str) -> Result<String, TemplateError> {
        match self {
            TemplateSource::Bundled => bundled::get(template_path)
                .map(str::to_string)
                .ok_or_else(|| TemplateError::NotFound(template_path.to_string())),
            TemplateSource::Local(root) => {
                let full_path = root.join(template_path);
                if !full_path.is_file() {
                    return Err(TemplateError::NotFound(full_path.display().to_string()));
                }
                std::fs::read_to_string(&full_path).map_err(|source| TemplateError::Io {
                    path: full_path.display().to_string(),
                    source,
                })
            }
        }
    }
}
