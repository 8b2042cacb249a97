//! Template loading, rendering and directory mirroring
//!
//! This module provides:
//! - Substitution contexts (`Context`, `Value`)
//! - The placeholder/loop renderer (`TemplateRenderer`)
//! - Template sources: bundled assets or a local directory
//! - Recursive directory rendering

pub mod bundled;
pub mod context;
pub mod directory;
pub mod renderer;
pub mod source;

pub use context::{html_escape, Context, Value};
pub use directory::{render_directory, render_source_directory, write_file};
pub use renderer::{render_str, Template, TemplateRenderer};
pub use source::TemplateSource;
