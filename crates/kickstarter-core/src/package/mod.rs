//! Package keys, manifests and the package-management collaborator

pub mod key;
pub mod manager;
pub mod manifest;

pub use key::PackageKey;
pub use manager::{FilesystemPackageManager, Package, PackageManager};
pub use manifest::{composer_json, PackageManifest};
