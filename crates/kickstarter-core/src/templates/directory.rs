//! Recursive directory rendering
//!
//! Mirrors a template tree into a destination directory, rendering every
//! file with the same context.

use super::bundled;
use super::context::Context;
use super::renderer::render_str;
use super::source::TemplateSource;
use crate::error::{KickstartError, Result, TemplateError};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Render every file below `source_dir` into `dest_dir`, keeping relative
/// paths. Returns the written files in traversal order.
pub fn render_directory(
    source_dir: &Path,
    dest_dir: &Path,
    context: &Context,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dest_dir).map_err(|e| KickstartError::fs(dest_dir, e))?;

    let mut rendered_files = Vec::new();

    for entry in WalkDir::new(source_dir).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| source_dir.to_path_buf());
            KickstartError::fs(path, e.into())
        })?;

        let Ok(relative) = entry.path().strip_prefix(source_dir) else {
            continue;
        };
        let target_path = dest_dir.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target_path).map_err(|e| KickstartError::fs(&target_path, e))?;
            continue;
        }

        let text = fs::read_to_string(entry.path()).map_err(|source| TemplateError::Io {
            path: entry.path().display().to_string(),
            source,
        })?;
        let content = render_str(&relative.to_string_lossy(), &text, context)?;
        write_file(&target_path, &content)?;
        rendered_files.push(target_path);
    }

    Ok(rendered_files)
}

/// Render the template directory `prefix` of a [`TemplateSource`] into
/// `dest_dir`
pub fn render_source_directory(
    source: &TemplateSource,
    prefix: &str,
    dest_dir: &Path,
    context: &Context,
) -> Result<Vec<PathBuf>> {
    match source {
        TemplateSource::Local(root) => {
            let source_dir = root.join(prefix);
            if !source_dir.is_dir() {
                return Err(TemplateError::NotFound(source_dir.display().to_string()).into());
            }
            render_directory(&source_dir, dest_dir, context)
        }
        TemplateSource::Bundled => {
            let files = bundled::files_under(prefix);
            if files.is_empty() {
                return Err(TemplateError::NotFound(prefix.to_string()).into());
            }

            fs::create_dir_all(dest_dir).map_err(|e| KickstartError::fs(dest_dir, e))?;

            let mut rendered_files = Vec::new();
            for (relative, text) in files {
                let content = render_str(relative, text, context)?;
                let target_path = dest_dir.join(relative);
                write_file(&target_path, &content)?;
                rendered_files.push(target_path);
            }
            Ok(rendered_files)
        }
    }
}

/// Create-or-overwrite a file, creating missing parent directories
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| KickstartError::fs(parent, e))?;
    }
    fs::write(path, content).map_err(|e| KickstartError::fs(path, e))?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use tempfile::TempDir;

    fn source_tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("Document/Nested")).unwrap();
        fs::create_dir_all(root.join("Empty")).unwrap();
        fs::write(root.join("Root.fusion"), "include: **/*.fusion // {siteName}\n").unwrap();
        fs::write(
            root.join("Document/Page.fusion"),
            "prototype({packageKey}:Page) < prototype(Neos.Neos:Page) {\n}\n",
        )
        .unwrap();
        fs::write(
            root.join("Document/Nested/Deep.fusion"),
            "root.{siteNodeName} { {unknown} }\n",
        )
        .unwrap();
        dir
    }

    fn context() -> Context {
        Context::new()
            .with("packageKey", "Acme.Demo")
            .with("siteName", "Acme & Co")
            .with("siteNodeName", "Demo")
    }

    fn relative_files(root: &Path) -> BTreeSet<PathBuf> {
        WalkDir::new(root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.path().strip_prefix(root).unwrap().to_path_buf())
            .collect()
    }

    #[test]
    fn test_renders_and_mirrors_tree() {
        let source = source_tree();
        let dest = TempDir::new().unwrap();
        let target = dest.path().join("Resources/Private/Fusion");

        let written = render_directory(source.path(), &target, &context()).unwrap();

        assert_eq!(written.len(), 3);
        assert_eq!(
            fs::read_to_string(target.join("Root.fusion")).unwrap(),
            "include: **/*.fusion // Acme & Co\n"
        );
        assert_eq!(
            fs::read_to_string(target.join("Document/Page.fusion")).unwrap(),
            "prototype(Acme.Demo:Page) < prototype(Neos.Neos:Page) {\n}\n"
        );
        assert_eq!(
            fs::read_to_string(target.join("Document/Nested/Deep.fusion")).unwrap(),
            "root.Demo { {unknown} }\n"
        );
        assert!(target.join("Empty").is_dir());
    }

    #[test]
    fn test_file_set_matches_source() {
        let source = source_tree();
        let dest = TempDir::new().unwrap();

        render_directory(source.path(), dest.path(), &context()).unwrap();

        assert_eq!(relative_files(source.path()), relative_files(dest.path()));
    }

    #[test]
    fn test_rendering_twice_is_identical() {
        let source = source_tree();
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();

        let a = render_directory(source.path(), first.path(), &context()).unwrap();
        let b = render_directory(source.path(), second.path(), &context()).unwrap();

        let rel = |paths: &[PathBuf], root: &Path| -> Vec<PathBuf> {
            paths
                .iter()
                .map(|p| p.strip_prefix(root).unwrap().to_path_buf())
                .collect()
        };
        assert_eq!(rel(&a, first.path()), rel(&b, second.path()));
        for relative in relative_files(first.path()) {
            assert_eq!(
                fs::read(first.path().join(&relative)).unwrap(),
                fs::read(second.path().join(&relative)).unwrap()
            );
        }
    }

    #[test]
    fn test_traversal_is_lexicographic() {
        let source = source_tree();
        let dest = TempDir::new().unwrap();

        let written = render_directory(source.path(), dest.path(), &context()).unwrap();
        let relative: Vec<String> = written
            .iter()
            .map(|p| p.strip_prefix(dest.path()).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(
            relative,
            vec!["Document/Nested/Deep.fusion", "Document/Page.fusion", "Root.fusion"]
        );
    }

    #[test]
    fn test_rerender_overwrites_existing_files() {
        let source = source_tree();
        let dest = TempDir::new().unwrap();
        fs::write(dest.path().join("Root.fusion"), "stale").unwrap();

        render_directory(source.path(), dest.path(), &context()).unwrap();

        assert_eq!(
            fs::read_to_string(dest.path().join("Root.fusion")).unwrap(),
            "include: **/*.fusion // Acme & Co\n"
        );
    }

    #[test]
    fn test_malformed_template_aborts() {
        let source = TempDir::new().unwrap();
        fs::write(source.path().join("Bad.fusion"), "{% for x in y %}").unwrap();
        let dest = TempDir::new().unwrap();

        let err = render_directory(source.path(), dest.path(), &context()).unwrap_err();
        assert!(matches!(err, KickstartError::Template(TemplateError::Syntax { .. })));
        assert!(!dest.path().join("Bad.fusion").exists());
    }

    #[test]
    fn test_missing_source_directory_is_fs_error() {
        let dest = TempDir::new().unwrap();
        let missing = dest.path().join("does-not-exist");

        let err = render_directory(&missing, &dest.path().join("out"), &context()).unwrap_err();
        assert!(matches!(err, KickstartError::FileSystem { .. }));
    }

    #[test]
    fn test_blocked_destination_is_fs_error_naming_path() {
        let source = source_tree();
        let dest = TempDir::new().unwrap();
        fs::write(dest.path().join("Document"), "not a directory").unwrap();

        let err = render_directory(source.path(), dest.path(), &context()).unwrap_err();
        match err {
            KickstartError::FileSystem { path, .. } => {
                assert_eq!(path, dest.path().join("Document"))
            }
            other => panic!("expected a file system error, got {other:?}"),
        }
    }

    #[test]
    fn test_render_bundled_fusion() {
        let dest = TempDir::new().unwrap();

        let written =
            render_source_directory(&TemplateSource::Bundled, "Fusion", dest.path(), &context())
                .unwrap();

        assert_eq!(written.len(), 3);
        let page = fs::read_to_string(dest.path().join("Document/Page.fusion")).unwrap();
        assert!(page.starts_with("prototype(Acme.Demo:Document.Page) < prototype(Neos.Neos:Page) {"));
        assert!(!page.contains("{packageKey}"));
        let root = fs::read_to_string(dest.path().join("Override/Root.fusion")).unwrap();
        assert!(root.contains("root.Demo {"));
    }

    #[test]
    fn test_render_bundled_unknown_prefix() {
        let dest = TempDir::new().unwrap();
        let err =
            render_source_directory(&TemplateSource::Bundled, "Nope", dest.path(), &context())
                .unwrap_err();
        assert!(matches!(err, KickstartError::Template(TemplateError::NotFound(_))));
    }

    #[test]
    fn test_render_local_unknown_prefix() {
        let root = source_tree();
        let dest = TempDir::new().unwrap();

        let err = render_source_directory(
            &TemplateSource::local(root.path()),
            "Nope",
            dest.path(),
            &context(),
        )
        .unwrap_err();
        assert!(matches!(err, KickstartError::Template(TemplateError::NotFound(_))));
    }

    #[test]
    fn test_render_local_prefix() {
        let root = source_tree();
        let dest = TempDir::new().unwrap();

        let written = render_source_directory(
            &TemplateSource::local(root.path()),
            "Document",
            dest.path(),
            &context(),
        )
        .unwrap();
        assert_eq!(written.len(), 2);
        assert!(dest.path().join("Page.fusion").is_file());
    }
}
