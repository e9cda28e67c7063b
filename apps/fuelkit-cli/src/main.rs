//! fuelkit CLI - bootstrap probe for fuelkit applications.
//!
//! Loads modules and packages the way an application would at boot and
//! reports what got registered, which routes were merged and how text is
//! formatted by the configured engines.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fuelkit_core::adapters::Collaborators;
use fuelkit_core::adapters::router::Route;
use fuelkit_core::extension::display_dir;
use fuelkit_core::{FuelConfig, LoadEntry, ModuleManager, PackageManager};
use fuelkit_format::{FormatterSet, MarkdownFormatter, TemplateFormatter};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Directory under the application root holding named templates.
const VIEWS_DIR: &str = "views";

/// fuelkit - load and inspect application extensions
#[derive(Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Application root (defaults to the current directory)
    #[arg(short, long, global = true)]
    root: Option<PathBuf>,

    /// Configuration file (defaults to <root>/fuelkit.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Module operations
    Module {
        #[command(subcommand)]
        action: ModuleAction,
    },

    /// Package operations
    Package {
        #[command(subcommand)]
        action: PackageAction,
    },

    /// Load modules with route merging enabled and print the route table
    Routes {
        /// Modules to load, as `name` or `name=path`
        #[arg(required = true)]
        modules: Vec<String>,
    },

    /// Format a file with a named engine
    Format {
        /// Engine name ("template" or "markdown")
        engine: String,

        /// File whose content is formatted
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum ModuleAction {
    /// Load modules and print the registry
    Load {
        /// Modules to load, as `name` or `name=path`
        #[arg(required = true)]
        names: Vec<String>,

        /// Print the registry as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print where a module would be loaded from
    Exists {
        /// Module name
        name: String,
    },
}

#[derive(Subcommand)]
enum PackageAction {
    /// Load packages and print the registry and finder paths
    Load {
        /// Packages to load, as `name` or `name=path`
        #[arg(required = true)]
        names: Vec<String>,

        /// Print the registry as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if let Err(e) = run_command(cli) {
        error!("Command failed: {:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Initialize tracing subscriber for structured logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = if verbose {
        EnvFilter::new("fuelkit=debug,fuelkit_core=debug,fuelkit_format=debug")
    } else {
        EnvFilter::new("fuelkit=info,fuelkit_core=info,fuelkit_format=info")
    };

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .init();
}

fn run_command(cli: Cli) -> Result<()> {
    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };
    let config = load_config(root, cli.config.as_deref())?;

    match cli.command {
        Commands::Module { action } => match action {
            ModuleAction::Load { names, json } => run_module_load(&config, &names, json),
            ModuleAction::Exists { name } => run_module_exists(&config, &name),
        },
        Commands::Package { action } => match action {
            PackageAction::Load { names, json } => run_package_load(&config, &names, json),
        },
        Commands::Routes { modules } => run_routes(config, &modules),
        Commands::Format { engine, file } => run_format(&config, &engine, &file),
    }
}

fn load_config(root: PathBuf, file: Option<&Path>) -> Result<FuelConfig> {
    match file {
        Some(file) => FuelConfig::load_file(root, file)
            .with_context(|| format!("Failed to load configuration from {}", file.display())),
        None => FuelConfig::load(root).context("Failed to load configuration"),
    }
}

/// Splits `name=path` arguments into load entries.
fn parse_entries(args: &[String]) -> Vec<LoadEntry> {
    args.iter()
        .map(|arg| match arg.split_once('=') {
            Some((name, path)) => LoadEntry::at(name, PathBuf::from(path)),
            None => LoadEntry::named(arg.as_str()),
        })
        .collect()
}

fn load_modules(modules: &mut ModuleManager, args: &[String]) -> Result<()> {
    let all_new = modules
        .load_many(parse_entries(args))
        .context("Failed to load modules")?;
    if !all_new {
        info!("Some modules were already loaded");
    }
    Ok(())
}

fn print_registry(registry: &BTreeMap<String, PathBuf>, json: bool) -> Result<()> {
    if json {
        let map: BTreeMap<&str, String> = registry
            .iter()
            .map(|(name, path)| (name.as_str(), display_dir(path)))
            .collect();
        println!("{}", serde_json::to_string_pretty(&map)?);
    } else {
        for (name, path) in registry {
            println!("{name} {}", display_dir(path));
        }
    }
    Ok(())
}

fn run_module_load(config: &FuelConfig, args: &[String], json: bool) -> Result<()> {
    let mut modules = ModuleManager::new(config, Collaborators::standard(vec![]));
    load_modules(&mut modules, args)?;
    print_registry(&modules.loaded(), json)
}

fn run_module_exists(config: &FuelConfig, name: &str) -> Result<()> {
    let modules = ModuleManager::new(config, Collaborators::standard(vec![]));
    let path = modules
        .exists(name)
        .with_context(|| format!("module could not be found: {name}"))?;
    println!("{}", display_dir(&path));
    Ok(())
}

fn run_package_load(config: &FuelConfig, args: &[String], json: bool) -> Result<()> {
    let collaborators = Collaborators::standard(vec![config.app_root.clone()]);
    let mut packages = PackageManager::new(config, collaborators.clone());
    for entry in parse_entries(args) {
        packages
            .load(&entry.name, entry.path.as_deref())
            .with_context(|| format!("Failed to load package {}", entry.name))?;
    }

    print_registry(&packages.loaded(), json)?;
    if !json {
        for path in collaborators.finder.paths() {
            println!("finder {}", display_dir(&path));
        }
    }
    Ok(())
}

fn run_routes(mut config: FuelConfig, args: &[String]) -> Result<()> {
    config.routing.module_routes = true;
    let mut modules = ModuleManager::new(&config, Collaborators::standard(vec![]));
    load_modules(&mut modules, args)?;

    for route in modules.collaborators().router.routes() {
        println!("{}", format_route(&route));
    }
    Ok(())
}

fn format_route(route: &Route) -> String {
    let verb = route.verb.as_deref().unwrap_or("*");
    format!("{} {} {} -> {}", route.name, verb, route.path, route.target)
}

fn run_format(config: &FuelConfig, engine: &str, file: &Path) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let views = config.app_root.join(VIEWS_DIR);
    let templates = if views.is_dir() {
        TemplateFormatter::new(vec![views]).context("Failed to open template directory")?
    } else {
        TemplateFormatter::inline()
    };

    let mut formatters = FormatterSet::new();
    formatters
        .register(templates.with_global("app_root", config.app_root.display().to_string()))
        .register(MarkdownFormatter::new());

    let output = formatters
        .parse(engine, &text)
        .with_context(|| format!("Failed to format {}", file.display()))?;
    println!("{output}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entries_accepts_both_forms() {
        let entries = parse_entries(&["blog".to_string(), "shop=/srv/shop".to_string()]);
        assert_eq!(entries[0].name, "blog");
        assert!(entries[0].path.is_none());
        assert_eq!(entries[1].name, "shop");
        assert_eq!(entries[1].path.as_deref(), Some(Path::new("/srv/shop")));
    }

    #[test]
    fn test_format_route() {
        let mut route = Route::new("blog/about", "blog/about");
        assert_eq!(format_route(&route), "blog/about * blog/about -> blog/about");

        route.verb = Some("GET".to_string());
        assert_eq!(format_route(&route), "blog/about GET blog/about -> blog/about");
    }
}
