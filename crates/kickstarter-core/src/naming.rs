//! Node names derived from package keys

use sha2::{Digest, Sha256};

fn is_valid_node_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Turn arbitrary text into a valid content node name (`[a-z0-9-]+`)
///
/// Names that are already valid are returned unchanged. Everything else is
/// lowercased and each run of other characters becomes a single `-`. When
/// nothing is left, the name is `node-` plus a SHA-256 prefix of the input.
pub fn render_valid_node_name(name: &str) -> String {
    if is_valid_node_name(name) {
        return name.to_string();
    }

    let mut rendered = String::with_capacity(name.len());
    for c in name.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            rendered.push(c);
        } else if !rendered.ends_with('-') {
            rendered.push('-');
        }
    }
    let rendered = rendered.trim_matches('-');

    if rendered.is_empty() {
        let digest = Sha256::digest(name.as_bytes());
        let hex: String = digest[..8].iter().map(|b| format!("{:02x}", b)).collect();
        return format!("node-{}", hex);
    }
    rendered.to_string()
}

/// Site node name used in the content descriptor and page template
pub fn site_node_name(package_key: &str) -> String {
    render_valid_node_name(package_key)
}

/// Node name used inside the Fusion boilerplate: the last dot segment of the
/// package key, or the whole key when that segment is empty or `"0"`.
pub fn fusion_node_name(package_key: &str) -> &str {
    match package_key.rsplit_once('.') {
        Some((_, last)) if !last.is_empty() && last != "0" => last,
        _ => package_key,
    }
}
