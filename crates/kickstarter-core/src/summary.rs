//! Post-generation output shared by the interactive and plain CLI flows

use colored::Colorize;
use std::path::{Path, PathBuf};

/// Paths of `files` relative to `base` (unchanged when outside of it)
pub fn relative_paths(files: &[PathBuf], base: &Path) -> Vec<String> {
    files
        .iter()
        .map(|file| {
            file.strip_prefix(base)
                .unwrap_or(file)
                .display()
                .to_string()
        })
        .collect()
}

/// Steps shown after a site package was created
pub fn next_steps(package_key: &str) -> Vec<String> {
    vec![
        format!("composer require {}", composer_hint(package_key)),
        format!("./flow site:import --package-key {}", package_key),
        "Add your styles to Resources/Public/Styles and scripts to Resources/Public/JavaScript"
            .to_string(),
    ]
}

fn composer_hint(package_key: &str) -> String {
    crate::package::PackageKey::parse(package_key)
        .map(|key| key.composer_name())
        .unwrap_or_else(|_| package_key.to_lowercase())
}

/// Print created files and next steps without interactive widgets
pub fn print_plain(generator_name: &str, package_key: &str, files: &[PathBuf], base: &Path) {
    println!(
        "{}",
        format!("{} site package {}", generator_name, package_key)
            .cyan()
            .bold()
    );
    println!();
    for file in relative_paths(files, base) {
        println!("  {} {}", "Created".green(), file);
    }
    println!();
    println!("  Next steps");
    println!();
    for (i, step) in next_steps(package_key).iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_paths() {
        let base = Path::new("/srv/Packages");
        let files = vec![
            PathBuf::from("/srv/Packages/Sites/Acme.Demo/composer.json"),
            PathBuf::from("/elsewhere/file.txt"),
        ];
        let relative = relative_paths(&files, base);
        assert_eq!(
            relative[0],
            Path::new("Sites/Acme.Demo/composer.json").display().to_string()
        );
        assert_eq!(relative[1], Path::new("/elsewhere/file.txt").display().to_string());
    }

    #[test]
    fn test_next_steps_mention_package() {
        let steps = next_steps("Acme.Demo");
        assert_eq!(steps[0], "composer require acme/demo");
        assert!(steps[1].contains("--package-key Acme.Demo"));
    }
}
