use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use log::info;
use stagehand_core::kernel::constants::{APP_NAME, DEFAULT_CONFIG_FILE};
use stagehand_core::kernel::error::Result;
use stagehand_core::{Kernel, KernelConfig, ProviderCatalog, ProviderType};

// --- Bundled Providers for Static Registration ---
use core_environment::EnvironmentProvider;
use core_logging::LoggingProvider;

/// Stagehand: runs providers through a staged lifecycle
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Simple liveness check, prints `pong`
    #[arg(long)]
    ping: bool,

    /// Kernel configuration file (.json, .yaml, .yml or .toml)
    #[arg(long, short, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Boot every provider, print a summary, then shut down
    Run,
    /// List registered provider identities
    List,
    /// List provider types that can be registered by name
    Catalog,
}

fn bundled_catalog() -> ProviderCatalog {
    let mut catalog = ProviderCatalog::new();
    catalog
        .register::<LoggingProvider>()
        .register::<EnvironmentProvider>();
    catalog
}

/// `--config` wins; otherwise `stagehand.toml` in the working directory is
/// used when present, and the bundled providers when it is not.
fn load_config(path: Option<&PathBuf>) -> Result<KernelConfig> {
    if let Some(path) = path {
        return KernelConfig::load(path);
    }
    let default_path = Path::new(DEFAULT_CONFIG_FILE);
    if default_path.is_file() {
        info!("Using {} from the working directory", DEFAULT_CONFIG_FILE);
        return KernelConfig::load(default_path);
    }
    Ok(KernelConfig::new()
        .with_provider(LoggingProvider::TYPE_NAME)
        .with_provider(EnvironmentProvider::TYPE_NAME))
}

fn run_lifecycle(kernel: &mut Kernel) -> Result<()> {
    println!("Booting {} kernel...", APP_NAME);
    kernel.boot()?;
    info!("Kernel booted with {} provider(s)", kernel.len());

    println!("Kernel status: {}", kernel.status());
    for entry in kernel.entries() {
        let stage = entry
            .current_stage()
            .map(|stage| stage.tag_name())
            .unwrap_or("registered");
        println!("  - {}: {}", entry.label(), stage);
    }
    if let Some(environment) = kernel.find_instance::<EnvironmentProvider>() {
        println!("Environment: {}", environment.summary());
    }

    println!("Shutting down {} kernel...", APP_NAME);
    kernel.shutdown()?;
    println!("Kernel status: {}", kernel.status());
    Ok(())
}

fn build_kernel(config_path: Option<&PathBuf>) -> Result<Kernel> {
    let config = load_config(config_path)?;
    Kernel::from_config(&config, bundled_catalog())
}

fn execute(args: CliArgs) -> Result<()> {
    match args.command.unwrap_or(Commands::Run) {
        Commands::Catalog => {
            println!("Available provider types:");
            for type_name in bundled_catalog().type_names() {
                println!("  - {}", type_name);
            }
            Ok(())
        }
        Commands::List => {
            let kernel = build_kernel(args.config.as_ref())?;
            if kernel.is_empty() {
                println!("No providers registered.");
            } else {
                println!("Registered providers:");
                for id in kernel.providers() {
                    println!("  - {}", id);
                }
            }
            Ok(())
        }
        Commands::Run => {
            let mut kernel = build_kernel(args.config.as_ref())?;
            run_lifecycle(&mut kernel)
        }
    }
}

fn main() {
    let args = CliArgs::parse();

    // Handle simple ping command
    if args.ping {
        println!("pong");
        return;
    }

    if let Err(e) = execute(args) {
        eprintln!("{} failed: {}", APP_NAME, e);
        process::exit(1);
    }
}
