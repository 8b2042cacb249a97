//! Package-management collaborator
//!
//! The generator only needs two operations from the host's package manager:
//! create a package and look one up. [`FilesystemPackageManager`] implements
//! them against a plain `Packages/` directory.

use super::key::PackageKey;
use super::manifest::{composer_json, PackageManifest};
use crate::error::{KickstartError, Result};
use crate::templates::write_file;
use std::fs;
use std::path::{Path, PathBuf};

/// Directories created for every new package, relative to its root
const PACKAGE_SKELETON: &[&str] = &[
    "Classes",
    "Configuration",
    "Resources/Private",
    "Resources/Public",
    "Tests/Functional",
    "Tests/Unit",
];

/// A package known to the package manager
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    key: PackageKey,
    path: PathBuf,
}

impl Package {
    pub fn new(key: PackageKey, path: impl Into<PathBuf>) -> Self {
        Self {
            key,
            path: path.into(),
        }
    }

    pub fn key(&self) -> &PackageKey {
        &self.key
    }

    /// Package root directory
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn resources_path(&self) -> PathBuf {
        self.path.join("Resources")
    }

    pub fn configuration_path(&self) -> PathBuf {
        self.path.join("Configuration")
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.path.join("composer.json")
    }
}

/// Creates and looks up packages
pub trait PackageManager {
    /// Create a new package. Fails if a package with the same key (compared
    /// case-insensitively) already exists.
    fn create_package(&self, key: &PackageKey, manifest: &PackageManifest) -> Result<Package>;

    /// Look up an existing package
    fn get_package(&self, key: &PackageKey) -> Result<Package>;
}

/// Package manager that keeps packages in `<packages_path>/<group>/<Key>/`
#[derive(Debug, Clone)]
pub struct FilesystemPackageManager {
    packages_path: PathBuf,
}

impl FilesystemPackageManager {
    pub fn new(packages_path: impl Into<PathBuf>) -> Self {
        Self {
            packages_path: packages_path.into(),
        }
    }

    /// Group directory a package type is installed into
    fn group_for_type(package_type: &str) -> &'static str {
        match package_type {
            "neos-site" => "Sites",
            "neos-plugin" => "Plugins",
            "neos-framework" => "Framework",
            _ => "Application",
        }
    }

    /// Find an installed package directory by key, ignoring case
    fn find(&self, key: &PackageKey) -> Result<Option<PathBuf>> {
        let groups = match fs::read_dir(&self.packages_path) {
            Ok(groups) => groups,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(KickstartError::fs(&self.packages_path, e)),
        };

        for group in groups {
            let group = group.map_err(|e| KickstartError::fs(&self.packages_path, e))?;
            if !group.path().is_dir() {
                continue;
            }
            let entries = fs::read_dir(group.path()).map_err(|e| KickstartError::fs(group.path(), e))?;
            for entry in entries {
                let entry = entry.map_err(|e| KickstartError::fs(group.path(), e))?;
                let name = entry.file_name();
                if entry.path().is_dir() && name.to_string_lossy().eq_ignore_ascii_case(key.as_str()) {
                    return Ok(Some(entry.path()));
                }
            }
        }

        Ok(None)
    }
}

impl PackageManager for FilesystemPackageManager {
    fn create_package(&self, key: &PackageKey, manifest: &PackageManifest) -> Result<Package> {
        if let Some(existing) = self.find(key)? {
            tracing::debug!(path = %existing.display(), "package directory already present");
            return Err(KickstartError::PackageAlreadyExists(key.to_string()));
        }

        let path = self
            .packages_path
            .join(Self::group_for_type(&manifest.package_type))
            .join(key.as_str());

        for dir in PACKAGE_SKELETON {
            let dir_path = path.join(dir);
            fs::create_dir_all(&dir_path).map_err(|e| KickstartError::fs(&dir_path, e))?;
        }

        let package = Package::new(key.clone(), path);
        let json = composer_json(key, manifest).map_err(|e| KickstartError::Config {
            path: package.manifest_path(),
            message: e.to_string(),
        })?;
        write_file(&package.manifest_path(), &json)?;

        tracing::info!(package = %key, path = %package.path().display(), "created package");
        Ok(package)
    }

    fn get_package(&self, key: &PackageKey) -> Result<Package> {
        self.find(key)?
            .map(|path| Package::new(key.clone(), path))
            .ok_or_else(|| KickstartError::UnknownPackage(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn site_manifest() -> PackageManifest {
        PackageManifest::new("neos-site").require("neos/neos", "*")
    }

    #[test]
    fn test_create_package_layout() {
        let dir = TempDir::new().unwrap();
        let manager = FilesystemPackageManager::new(dir.path());
        let key = PackageKey::parse("Acme.Demo").unwrap();

        let package = manager.create_package(&key, &site_manifest()).unwrap();

        assert_eq!(package.path(), dir.path().join("Sites/Acme.Demo"));
        assert!(package.manifest_path().is_file());
        for sub in PACKAGE_SKELETON {
            assert!(package.path().join(sub).is_dir(), "{sub} missing");
        }
        assert_eq!(package.resources_path(), package.path().join("Resources"));
        assert_eq!(package.configuration_path(), package.path().join("Configuration"));
    }

    #[test]
    fn test_non_site_packages_go_to_application() {
        let dir = TempDir::new().unwrap();
        let manager = FilesystemPackageManager::new(dir.path());
        let key = PackageKey::parse("Acme.Library").unwrap();

        let package = manager
            .create_package(&key, &PackageManifest::new("neos-package"))
            .unwrap();

        assert_eq!(package.path(), dir.path().join("Application/Acme.Library"));
    }

    #[test]
    fn test_create_twice_fails() {
        let dir = TempDir::new().unwrap();
        let manager = FilesystemPackageManager::new(dir.path());
        let key = PackageKey::parse("Acme.Demo").unwrap();
        manager.create_package(&key, &site_manifest()).unwrap();

        let err = manager.create_package(&key, &site_manifest()).unwrap_err();
        assert!(matches!(err, KickstartError::PackageAlreadyExists(k) if k == "Acme.Demo"));
    }

    #[test]
    fn test_existing_key_is_case_insensitive() {
        let dir = TempDir::new().unwrap();
        let manager = FilesystemPackageManager::new(dir.path());
        manager
            .create_package(&PackageKey::parse("Acme.Demo").unwrap(), &site_manifest())
            .unwrap();

        let err = manager
            .create_package(&PackageKey::parse("acme.demo").unwrap(), &site_manifest())
            .unwrap_err();
        assert!(matches!(err, KickstartError::PackageAlreadyExists(_)));
    }

    #[test]
    fn test_get_package() {
        let dir = TempDir::new().unwrap();
        let manager = FilesystemPackageManager::new(dir.path().join("Packages"));
        let key = PackageKey::parse("Acme.Demo").unwrap();

        let err = manager.get_package(&key).unwrap_err();
        assert!(matches!(err, KickstartError::UnknownPackage(_)));

        let created = manager.create_package(&key, &site_manifest()).unwrap();
        assert_eq!(manager.get_package(&key).unwrap(), created);
    }
}
