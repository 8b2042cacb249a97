//! Kickstarter Core - site package scaffolding for a Neos-style CMS
//!
//! Given a package key and a site name, the generator creates a new site
//! package and fills it with boilerplate rendered from bundled templates.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Rendering** - placeholder/loop template renderer and
//!   recursive directory rendering (`templates`)
//! - **Layer 2: Collaborators** - package manager and content dimension
//!   provider behind traits (`package`, `dimensions`)
//! - **Layer 3: Generation** - `SitePackageGenerator` and `FluidSiteGenerator`
//! - **Layer 4: CLI/TUI Interface** - optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use kickstarter_core::{KickstartConfig, SitePackageGenerator};
//!
//! let config = KickstartConfig::resolve(None, None);
//! let files = config.site_generator()?.generate("Acme.Site", "Acme & Co")?;
//! ```

pub mod config;
pub mod dimensions;
pub mod error;
pub mod generator;
pub mod naming;
pub mod package;
pub mod summary;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::KickstartConfig;
pub use dimensions::{ContentDimension, DimensionRepository, StaticDimensionRepository};
pub use error::{KickstartError, TemplateError};
pub use generator::{FluidSiteGenerator, SitePackageGenerator};
pub use package::{FilesystemPackageManager, Package, PackageKey, PackageManager, PackageManifest};
pub use templates::{render_directory, Context, TemplateRenderer, TemplateSource, Value};

#[cfg(feature = "tui")]
pub use tui::run;
