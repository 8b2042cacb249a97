//! Charm-style CLI prompts using cliclack

use crate::config::KickstartConfig;
use crate::generator::SitePackageGenerator;
use crate::naming::site_node_name;
use crate::package::PackageKey;
use crate::summary;
use anyhow::{Context as _, Result};
use std::path::PathBuf;

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct KickstartArgs {
    /// Package key of the new site package (e.g. `Acme.Site`)
    pub package_key: Option<String>,

    /// Human-readable site name
    pub site_name: Option<String>,

    /// Directory packages are created under
    pub packages_path: Option<PathBuf>,

    /// Settings file with content dimensions
    pub settings_file: Option<PathBuf>,
}

/// Run the kickstarter with interactive prompts
pub fn run(args: KickstartArgs) -> Result<()> {
    let config = KickstartConfig::resolve(args.packages_path.clone(), args.settings_file.clone());
    let generator = config
        .site_generator()
        .context("Failed to load configuration")?;

    cliclack::intro(format!("Site Kickstarter ({})", generator.name()))?;

    // Step 1: Package key
    let package_key = select_package_key(&args)?;

    // Step 2: Site name
    let site_name = select_site_name(&args, &package_key)?;

    // Step 3: Confirm target
    cliclack::log::info(format!(
        "Packages directory: {}",
        config.packages_path.display()
    ))?;
    if let Some(settings) = &config.settings_file {
        cliclack::log::info(format!("Content dimensions from {}", settings.display()))?;
    }
    let confirm: bool = cliclack::confirm(format!("Create site package {}?", package_key))
        .initial_value(true)
        .interact()?;
    if !confirm {
        anyhow::bail!("Setup cancelled.");
    }

    // Step 4: Generate
    let spinner = cliclack::spinner();
    spinner.start("Creating site package...");
    let files = match generator.generate(&package_key, &site_name) {
        Ok(files) => files,
        Err(e) => {
            spinner.error("Failed to create site package");
            return Err(e).with_context(|| format!("Failed to kickstart {}", package_key));
        }
    };
    spinner.stop(format!(
        "Created {} files in {}",
        files.len(),
        config.packages_path.display()
    ));

    for file in summary::relative_paths(&files, &config.packages_path) {
        cliclack::log::success(file)?;
    }

    // Step 5: Next steps
    print_next_steps(&package_key)?;

    Ok(())
}

fn select_package_key(args: &KickstartArgs) -> Result<String> {
    if let Some(key) = &args.package_key {
        PackageKey::parse(key)?;
        cliclack::log::info(format!("Package key: {}", key))?;
        return Ok(key.clone());
    }

    let key: String = cliclack::input("Package key")
        .placeholder("Acme.Site")
        .validate(|input: &String| {
            if PackageKey::is_valid(input) {
                Ok(())
            } else {
                Err("Use a dotted key of letters and digits, e.g. Acme.Site")
            }
        })
        .interact()?;

    Ok(key)
}

fn select_site_name(args: &KickstartArgs, package_key: &str) -> Result<String> {
    if let Some(name) = &args.site_name {
        cliclack::log::info(format!("Site name: {}", name))?;
        return Ok(name.clone());
    }

    let default_name = package_key.replace('.', " ");
    let name: String = cliclack::input("Site name")
        .placeholder(&default_name)
        .default_input(&default_name)
        .interact()?;

    cliclack::log::info(format!("Site node name: {}", site_node_name(package_key)))?;

    Ok(name)
}

fn print_next_steps(package_key: &str) -> Result<()> {
    println!();
    println!("  Next steps");
    println!();

    for (i, step) in summary::next_steps(package_key).iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy building!")?;

    Ok(())
}
