//! Runtime configuration
//!
//! Values are resolved from explicit overrides first, then environment
//! variables, then defaults.

pub mod settings;

use crate::dimensions::{ContentDimension, StaticDimensionRepository};
use crate::error::Result;
use crate::generator::FluidSiteGenerator;
use crate::package::FilesystemPackageManager;
use crate::templates::TemplateRenderer;
use std::path::PathBuf;

pub use settings::{load_dimensions, parse_dimensions};

/// Environment variable overriding where packages are created
pub const PACKAGES_PATH_ENV: &str = "SITE_KICKSTART_PACKAGES_PATH";

/// Environment variable pointing at a settings file with content dimensions
pub const SETTINGS_ENV: &str = "SITE_KICKSTART_SETTINGS";

/// Default packages directory, relative to the working directory
pub const DEFAULT_PACKAGES_PATH: &str = "Packages";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KickstartConfig {
    /// Root directory packages are created under
    pub packages_path: PathBuf,

    /// Optional settings file with content dimensions
    pub settings_file: Option<PathBuf>,
}

impl Default for KickstartConfig {
    fn default() -> Self {
        Self {
            packages_path: PathBuf::from(DEFAULT_PACKAGES_PATH),
            settings_file: None,
        }
    }
}

impl KickstartConfig {
    /// Resolve configuration from overrides and the process environment
    pub fn resolve(packages_path: Option<PathBuf>, settings_file: Option<PathBuf>) -> Self {
        Self::resolve_with(packages_path, settings_file, |name| std::env::var(name).ok())
    }

    /// Resolve configuration using a custom environment lookup
    pub fn resolve_with(
        packages_path: Option<PathBuf>,
        settings_file: Option<PathBuf>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let non_empty = |name: &str| env(name).filter(|value| !value.trim().is_empty());

        Self {
            packages_path: packages_path
                .or_else(|| non_empty(PACKAGES_PATH_ENV).map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PACKAGES_PATH)),
            settings_file: settings_file.or_else(|| non_empty(SETTINGS_ENV).map(PathBuf::from)),
        }
    }

    pub fn package_manager(&self) -> FilesystemPackageManager {
        FilesystemPackageManager::new(&self.packages_path)
    }

    /// Load the configured content dimensions (none without a settings file)
    pub fn dimensions(&self) -> Result<Vec<ContentDimension>> {
        match &self.settings_file {
            Some(path) => load_dimensions(path),
            None => Ok(Vec::new()),
        }
    }

    pub fn dimension_repository(&self) -> Result<StaticDimensionRepository> {
        Ok(StaticDimensionRepository::new(self.dimensions()?))
    }

    /// Wire the site generator with the configured collaborators and the
    /// bundled templates
    pub fn site_generator(
        &self,
    ) -> Result<FluidSiteGenerator<FilesystemPackageManager, StaticDimensionRepository>> {
        Ok(FluidSiteGenerator::new(
            self.package_manager(),
            self.dimension_repository()?,
            TemplateRenderer::default(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = KickstartConfig::resolve_with(None, None, env_of(&[]));
        assert_eq!(config, KickstartConfig::default());
    }

    #[test]
    fn test_env_overrides_default() {
        let config = KickstartConfig::resolve_with(
            None,
            None,
            env_of(&[(PACKAGES_PATH_ENV, "/srv/Packages"), (SETTINGS_ENV, "Settings.yaml")]),
        );
        assert_eq!(config.packages_path, PathBuf::from("/srv/Packages"));
        assert_eq!(config.settings_file, Some(PathBuf::from("Settings.yaml")));
    }

    #[test]
    fn test_explicit_overrides_env() {
        let config = KickstartConfig::resolve_with(
            Some(PathBuf::from("out")),
            None,
            env_of(&[(PACKAGES_PATH_ENV, "/srv/Packages")]),
        );
        assert_eq!(config.packages_path, PathBuf::from("out"));
    }

    #[test]
    fn test_blank_env_is_ignored() {
        let config =
            KickstartConfig::resolve_with(None, None, env_of(&[(PACKAGES_PATH_ENV, "  ")]));
        assert_eq!(config.packages_path, PathBuf::from(DEFAULT_PACKAGES_PATH));
    }

    #[test]
    fn test_no_settings_file_means_no_dimensions() {
        let config = KickstartConfig::default();
        assert!(config.dimensions().unwrap().is_empty());
    }

    #[test]
    fn test_site_generator_reads_settings() {
        use crate::generator::SitePackageGenerator;

        let dir = tempfile::TempDir::new().unwrap();
        let settings = dir.path().join("Settings.yaml");
        std::fs::write(
            &settings,
            "Neos:\n  ContentRepository:\n    contentDimensions:\n      language:\n        default: de\n",
        )
        .unwrap();
        let config = KickstartConfig::resolve_with(
            Some(dir.path().join("Packages")),
            Some(settings),
            |_| None,
        );

        let files = config.site_generator().unwrap().generate("Acme.Demo", "Acme").unwrap();

        let xml = std::fs::read_to_string(&files[1]).unwrap();
        assert!(xml.contains("<language>de</language>"));
    }
}
