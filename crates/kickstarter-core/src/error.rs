//! Error types shared by the renderer, the package manager and the generator

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or rendering a template
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The logical template path does not name a known template
    #[error("template not found: {0}")]
    NotFound(String),

    /// The template exists but could not be read
    #[error("failed to read template {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The template body contains a malformed control construct
    #[error("syntax error in template {template} at line {line}: {message}")]
    Syntax {
        template: String,
        line: usize,
        message: String,
    },
}

/// Errors raised while generating a site package
#[derive(Debug, Error)]
pub enum KickstartError {
    #[error("invalid package key \"{0}\"")]
    InvalidPackageKey(String),

    #[error("package \"{0}\" already exists")]
    PackageAlreadyExists(String),

    #[error("unknown package \"{0}\"")]
    UnknownPackage(String),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("file system error at {}: {source}", .path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration in {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },
}

impl KickstartError {
    /// Wrap an I/O error together with the path that caused it
    pub fn fs(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileSystem {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = KickstartError> = std::result::Result<T, E>;
