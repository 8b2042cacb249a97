//! Site Kickstart CLI - site package scaffolding

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use kickstarter_core::config::{PACKAGES_PATH_ENV, SETTINGS_ENV};
use kickstarter_core::naming::{fusion_node_name, site_node_name};
use kickstarter_core::tui::KickstartArgs;
use kickstarter_core::{summary, KickstartConfig, PackageKey, SitePackageGenerator};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "site-kickstart")]
#[command(about = "Kickstart a site package with Fusion and Fluid boilerplate")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new site package
    Create(CreateArgs),
    /// Show the node names derived from a package key
    NodeName(NodeNameArgs),
}

#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// Package key of the new site package, e.g. Acme.Site
    pub package_key: Option<String>,

    /// Human-readable site name
    pub site_name: Option<String>,

    /// Directory packages are created under
    #[arg(long = "packages-path", env = PACKAGES_PATH_ENV)]
    pub packages_path: Option<PathBuf>,

    /// Settings.yaml providing content dimensions
    #[arg(long = "settings", env = SETTINGS_ENV)]
    pub settings: Option<PathBuf>,

    /// Non-interactive mode: never prompt, fail on missing arguments
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CreateArgs> for KickstartArgs {
    fn from(args: CreateArgs) -> Self {
        KickstartArgs {
            package_key: args.package_key,
            site_name: args.site_name,
            packages_path: args.packages_path,
            settings_file: args.settings,
        }
    }
}

#[derive(Parser, Debug)]
pub struct NodeNameArgs {
    /// Package key to derive names from
    pub package_key: String,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Create the package without prompts, printing a plain summary
fn create_non_interactive(args: CreateArgs) -> Result<()> {
    let package_key = args
        .package_key
        .context("A package key is required in non-interactive mode")?;
    let site_name = args
        .site_name
        .context("A site name is required in non-interactive mode")?;

    let config = KickstartConfig::resolve(args.packages_path, args.settings);
    let generator = config
        .site_generator()
        .context("Failed to load configuration")?;

    let files = generator
        .generate(&package_key, &site_name)
        .with_context(|| format!("Failed to kickstart {}", package_key))?;

    summary::print_plain(generator.name(), &package_key, &files, &config.packages_path);
    Ok(())
}

fn print_node_names(args: NodeNameArgs) -> Result<()> {
    if !PackageKey::is_valid(&args.package_key) {
        eprintln!(
            "{} \"{}\" is not a valid package key",
            "Warning:".yellow(),
            args.package_key
        );
    }
    println!("{} {}", "Site node name:".cyan(), site_node_name(&args.package_key));
    println!(
        "{} {}",
        "Fusion node name:".cyan(),
        fusion_node_name(&args.package_key)
    );
    Ok(())
}

fn run_interactive(args: KickstartArgs) -> Result<()> {
    let result = kickstarter_core::run(args);

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}

fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    init_tracing();

    let args = Args::parse();
    tracing::debug!(?args, "parsed arguments");

    match args.command {
        Some(Command::Create(create_args)) if create_args.yes => {
            create_non_interactive(create_args)
        }
        Some(Command::Create(create_args)) => run_interactive(create_args.into()),
        Some(Command::NodeName(node_args)) => print_node_names(node_args),
        // No subcommand provided, default to create behavior (interactive mode)
        None => run_interactive(KickstartArgs::default()),
    }
}
