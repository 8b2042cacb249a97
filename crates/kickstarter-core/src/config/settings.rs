//! Host settings file parsing (content dimensions)

use crate::dimensions::ContentDimension;
use crate::error::{KickstartError, Result};
use serde::de::Error as _;
use serde::Deserialize;
use serde_yaml::Mapping;
use std::path::Path;

/// `Neos.ContentRepository.contentDimensions` in a host `Settings.yaml`
#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    #[serde(rename = "Neos", default)]
    neos: NeosSettings,
}

#[derive(Debug, Default, Deserialize)]
struct NeosSettings {
    #[serde(rename = "ContentRepository", default)]
    content_repository: ContentRepositorySettings,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContentRepositorySettings {
    #[serde(default)]
    content_dimensions: Mapping,
}

#[derive(Debug, Deserialize)]
struct DimensionSettings {
    default: String,
    #[serde(default)]
    label: Option<String>,
}

/// Parse content dimensions from settings YAML, in declaration order
pub fn parse_dimensions(yaml: &str) -> std::result::Result<Vec<ContentDimension>, serde_yaml::Error> {
    if yaml.trim().is_empty() {
        return Ok(Vec::new());
    }
    let settings: SettingsFile = serde_yaml::from_str(yaml)?;
    settings
        .neos
        .content_repository
        .content_dimensions
        .into_iter()
        .map(|(identifier, dimension)| -> std::result::Result<_, serde_yaml::Error> {
            let identifier = identifier
                .as_str()
                .ok_or_else(|| serde_yaml::Error::custom("dimension identifiers must be strings"))?
                .to_string();
            let dimension: DimensionSettings = serde_yaml::from_value(dimension)?;
            Ok(ContentDimension {
                identifier,
                default: dimension.default,
                label: dimension.label,
            })
        })
        .collect()
}

/// Load content dimensions from a settings file; a missing file means none
pub fn load_dimensions(path: &Path) -> Result<Vec<ContentDimension>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "settings file not found, no dimensions");
            return Ok(Vec::new());
        }
        Err(e) => return Err(KickstartError::fs(path, e)),
    };

    parse_dimensions(&content).map_err(|e| KickstartError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
