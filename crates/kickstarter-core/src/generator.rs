//! Site package generation
//!
//! [`FluidSiteGenerator`] creates a site package and fills it with the
//! bundled boilerplate: a content descriptor, the Fusion tree, a default page
//! template, a node type configuration and empty public asset folders.

use crate::dimensions::{dimensions_value, DimensionRepository};
use crate::error::{KickstartError, Result};
use crate::naming::{fusion_node_name, site_node_name};
use crate::package::{Package, PackageKey, PackageManager, PackageManifest};
use crate::templates::{
    html_escape, render_source_directory, write_file, Context, TemplateRenderer,
};
use std::fs;
use std::path::PathBuf;

const SITES_XML_TEMPLATE: &str = "Content/Sites.xml";
const FUSION_TEMPLATE_DIR: &str = "Fusion";
const PAGE_TEMPLATE: &str = "Template/SiteTemplate.html";
const NODE_TYPES_TEMPLATE: &str = "Configuration/NodeTypes.Document.Page.yaml";

const NEOS_VIEW_HELPER: &str = "{namespace neos=Neos\\Neos\\ViewHelpers}";
const FUSION_VIEW_HELPER: &str = "{namespace fusion=Neos\\Fusion\\ViewHelpers}";

/// Folders created below `Resources/Public`
pub const PUBLIC_RESOURCE_FOLDERS: &[&str] = &["Images", "JavaScript", "Styles"];

/// Something that can kickstart a site package
pub trait SitePackageGenerator {
    /// Human-readable generator name
    fn name(&self) -> &'static str;

    /// Create the package `package_key` for the site `site_name` and return
    /// every file written
    fn generate(&self, package_key: &str, site_name: &str) -> Result<Vec<PathBuf>>;
}

/// Manifest every generated site package is created with
pub fn site_package_manifest() -> PackageManifest {
    PackageManifest::new("neos-site")
        .require("neos/neos", "*")
        .suggest("neos/seo", "*")
}

/// Generator for a basic Fluid-template based site
pub struct FluidSiteGenerator<P, D> {
    package_manager: P,
    dimensions: D,
    renderer: TemplateRenderer,
}

impl<P: PackageManager, D: DimensionRepository> FluidSiteGenerator<P, D> {
    pub fn new(package_manager: P, dimensions: D, renderer: TemplateRenderer) -> Self {
        Self {
            package_manager,
            dimensions,
            renderer,
        }
    }

    fn generate_sites_xml(&self, package: &Package, site_name: &str) -> Result<PathBuf> {
        let key = package.key().as_str();
        let context = Context::new()
            .with("packageKey", key)
            .with("siteName", html_escape(site_name))
            .with("siteNodeName", site_node_name(key))
            .with("dimensions", dimensions_value(&self.dimensions.find_all()));

        let content = self.renderer.render(SITES_XML_TEMPLATE, &context)?;
        let target = package.resources_path().join("Private/Content/Sites.xml");
        write_file(&target, &content)?;
        Ok(target)
    }

    fn generate_fusion_directory(&self, package: &Package, site_name: &str) -> Result<Vec<PathBuf>> {
        let key = package.key().as_str();
        let context = Context::new()
            .with("packageKey", key)
            .with("siteName", site_name)
            .with("siteNodeName", fusion_node_name(key));

        render_source_directory(
            self.renderer.source(),
            FUSION_TEMPLATE_DIR,
            &package.resources_path().join("Private/Fusion"),
            &context,
        )
    }

    fn generate_default_template(&self, package: &Package, site_name: &str) -> Result<PathBuf> {
        let context = Context::new()
            .with("siteName", site_name)
            .with("neosViewHelper", NEOS_VIEW_HELPER)
            .with("fusionViewHelper", FUSION_VIEW_HELPER)
            .with("siteNodeName", site_node_name(package.key().as_str()));

        let content = self.renderer.render(PAGE_TEMPLATE, &context)?;
        let target = package
            .resources_path()
            .join("Private/Templates/Page/Default.html");
        write_file(&target, &content)?;
        Ok(target)
    }

    fn generate_node_types_configuration(&self, package: &Package) -> Result<PathBuf> {
        let context = Context::new().with("packageKey", package.key().as_str());

        let content = self.renderer.render(NODE_TYPES_TEMPLATE, &context)?;
        let target = package
            .configuration_path()
            .join("NodeTypes.Document.Page.yaml");
        write_file(&target, &content)?;
        Ok(target)
    }

    fn generate_additional_folders(&self, package: &Package) -> Result<()> {
        let public_path = package.resources_path().join("Public");
        for folder in PUBLIC_RESOURCE_FOLDERS {
            let path = public_path.join(folder);
            fs::create_dir_all(&path).map_err(|e| KickstartError::fs(&path, e))?;
            tracing::debug!(path = %path.display(), "created folder");
        }
        Ok(())
    }
}

impl<P: PackageManager, D: DimensionRepository> SitePackageGenerator for FluidSiteGenerator<P, D> {
    fn name(&self) -> &'static str {
        "Fluid Basic"
    }

    fn generate(&self, package_key: &str, site_name: &str) -> Result<Vec<PathBuf>> {
        let key = PackageKey::parse(package_key)?;

        let created = self
            .package_manager
            .create_package(&key, &site_package_manifest())?;
        let package = self.package_manager.get_package(created.key())?;

        let mut generated_files = Vec::new();
        let manifest_path = package.manifest_path();
        if manifest_path.is_file() {
            generated_files.push(manifest_path);
        }

        tracing::info!(package = %key, "rendering site content descriptor");
        generated_files.push(self.generate_sites_xml(&package, site_name)?);

        tracing::info!(package = %key, "rendering fusion directory");
        generated_files.extend(self.generate_fusion_directory(&package, site_name)?);

        tracing::info!(package = %key, "rendering default page template");
        generated_files.push(self.generate_default_template(&package, site_name)?);

        tracing::info!(package = %key, "rendering node type configuration");
        generated_files.push(self.generate_node_types_configuration(&package)?);

        self.generate_additional_folders(&package)?;

        Ok(generated_files)
    }
}
