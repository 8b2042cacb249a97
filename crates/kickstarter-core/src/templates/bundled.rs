//! Templates compiled into the binary
//!
//! Files live under `resources/` in this crate. Every file there must have an
//! entry in [`BUNDLED`]; the `include_str!` paths are checked at compile time.

/// Logical path -> template text, sorted by path
const BUNDLED: &[(&str, &str)] = &[
    (
        "Configuration/NodeTypes.Document.Page.yaml",
        include_str!("../../resources/Configuration/NodeTypes.Document.Page.yaml"),
    ),
    (
        "Content/Sites.xml",
        include_str!("../../resources/Content/Sites.xml"),
    ),
    (
        "Fusion/Document/Page.fusion",
        include_str!("../../resources/Fusion/Document/Page.fusion"),
    ),
    (
        "Fusion/Override/Root.fusion",
        include_str!("../../resources/Fusion/Override/Root.fusion"),
    ),
    (
        "Fusion/Root.fusion",
        include_str!("../../resources/Fusion/Root.fusion"),
    ),
    (
        "Template/SiteTemplate.html",
        include_str!("../../resources/Template/SiteTemplate.html"),
    ),
];

/// Look up a bundled template by logical path
pub fn get(path: &str) -> Option<&'static str> {
    BUNDLED
        .iter()
        .find(|(name, _)| *name == path)
        .map(|(_, content)| *content)
}

/// All bundled files below `prefix`, as (relative path, content) pairs in
/// lexicographic order
pub fn files_under(prefix: &str) -> Vec<(&'static str, &'static str)> {
    let prefix = prefix.trim_end_matches('/');
    let mut files: Vec<_> = BUNDLED
        .iter()
        .filter_map(|(name, content)| {
            name.strip_prefix(prefix)
                .and_then(|rest| rest.strip_prefix('/'))
                .map(|relative| (relative, *content))
        })
        .collect();
    files.sort_by(|a, b| a.0.cmp(b.0));
    files
}
