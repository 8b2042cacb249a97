//! Package manifest types and `composer.json` serialization

use super::key::PackageKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What a new package declares about itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageManifest {
    /// Composer package type (e.g. `neos-site`)
    #[serde(rename = "type")]
    pub package_type: String,

    /// Hard dependencies: package name -> version constraint
    #[serde(default)]
    pub require: BTreeMap<String, String>,

    /// Optional dependencies: package name -> version constraint
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub suggest: BTreeMap<String, String>,
}

impl PackageManifest {
    pub fn new(package_type: impl Into<String>) -> Self {
        Self {
            package_type: package_type.into(),
            require: BTreeMap::new(),
            suggest: BTreeMap::new(),
        }
    }

    pub fn require(mut self, name: impl Into<String>, constraint: impl Into<String>) -> Self {
        self.require.insert(name.into(), constraint.into());
        self
    }

    pub fn suggest(mut self, name: impl Into<String>, constraint: impl Into<String>) -> Self {
        self.suggest.insert(name.into(), constraint.into());
        self
    }
}

#[derive(Debug, Serialize)]
struct ComposerFile<'a> {
    name: String,
    #[serde(flatten)]
    manifest: &'a PackageManifest,
    autoload: Autoload,
    extra: Extra<'a>,
}

#[derive(Debug, Serialize)]
struct Autoload {
    #[serde(rename = "psr-4")]
    psr4: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
struct Extra<'a> {
    neos: NeosExtra<'a>,
}

#[derive(Debug, Serialize)]
struct NeosExtra<'a> {
    #[serde(rename = "package-key")]
    package_key: &'a str,
}

/// Render the `composer.json` for a package
pub fn composer_json(key: &PackageKey, manifest: &PackageManifest) -> serde_json::Result<String> {
    let file = ComposerFile {
        name: key.composer_name(),
        manifest,
        autoload: Autoload {
            psr4: BTreeMap::from([(key.namespace(), "Classes".to_string())]),
        },
        extra: Extra {
            neos: NeosExtra {
                package_key: key.as_str(),
            },
        },
    };
    let mut json = serde_json::to_string_pretty(&file)?;
    json.push('\n');
    Ok(json)
}
