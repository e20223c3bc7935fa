//! Stratadoc CLI - Static API documentation generator

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use stratadoc_core::config::CONFIG_FILE;
use stratadoc_core::{
    Config, ErrorPolicy, Generator, NamespaceNode, NamespaceResolver, Router, SymbolIndex, SymbolLookup,
    SymbolModel, SymbolRef,
};
use tracing_subscriber::EnvFilter;

mod constants;
mod output;

use constants::FileConstantStore;

#[derive(Parser)]
#[command(name = "stratadoc")]
#[command(version = stratadoc_core::VERSION)]
#[command(about = "Static API documentation generator", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the documentation site from a reflected symbol model
    Generate {
        /// Symbol model (JSON) written by the reflection front end
        model: PathBuf,

        /// Site configuration (defaults to ./stratadoc.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory, overrides `output.destination`
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip annotated source pages
        #[arg(long)]
        no_source: bool,

        /// Abort on the first page that fails instead of skipping it
        #[arg(long)]
        halt_on_error: bool,

        /// Number of rendering threads (defaults to one per core)
        #[arg(short, long)]
        jobs: Option<usize>,
    },

    /// Print the output path of a single page
    Route {
        /// Kind of route to compute
        kind: RouteArg,

        /// Namespace name, qualified symbol name or source file path
        name: String,

        /// Symbol model used to look up symbols
        #[arg(long)]
        model: Option<PathBuf>,

        /// Site configuration providing base URL and extension
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the namespace hierarchy of a symbol model
    Tree {
        /// Symbol model (JSON) written by the reflection front end
        model: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum RouteArg {
    Namespace,
    Symbol,
    Source,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Generate {
            model,
            config,
            output,
            no_source,
            halt_on_error,
            jobs,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(output) = output {
                config.output.destination = output;
            }
            if no_source {
                config.output.source_code = false;
            }
            let policy = if halt_on_error {
                ErrorPolicy::Halt
            } else {
                ErrorPolicy::Continue
            };
            generate_site(&model, &config, policy, jobs)?;
        }

        Commands::Route {
            kind,
            name,
            model,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            println!("{}", compute_route(&config.router(), kind, &name, model.as_deref())?);
        }

        Commands::Tree { model } => {
            print_tree(&model)?;
        }
    }

    Ok(())
}

/// Install the global subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Load the given config file, or `./stratadoc.toml` when it exists.
fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::from_path(path).with_context(|| format!("Failed to load config '{}'", path.display())),
        None if Path::new(CONFIG_FILE).is_file() => {
            Config::from_path(CONFIG_FILE).with_context(|| format!("Failed to load config '{CONFIG_FILE}'"))
        }
        None => {
            tracing::info!("no {CONFIG_FILE} found, using defaults");
            Ok(Config::with_title("API Documentation"))
        }
    }
}

fn load_model(path: &Path) -> Result<SymbolModel> {
    SymbolModel::from_path(path).with_context(|| format!("Failed to load symbol model '{}'", path.display()))
}

fn generate_site(model_path: &Path, config: &Config, policy: ErrorPolicy, jobs: Option<usize>) -> Result<()> {
    let model = load_model(model_path)?;
    let index = SymbolIndex::new(&model);
    let constants = FileConstantStore::load(&config.constants.directory, index.namespaces())
        .context("Failed to load namespace constants")?;

    let mut generator = Generator::new(config, &index, &constants);
    if let Some(jobs) = jobs {
        generator = generator.with_threads(jobs);
    }
    let report = generator.generate(policy)?;

    let destination = &config.output.destination;
    let written = output::write_pages(destination, &report.pages)?;
    println!("Generated {} pages in: {}", written, destination.display());

    if !report.is_success() {
        for failure in &report.failures {
            eprintln!("error: {failure}");
        }
        bail!("{} pages could not be generated", report.failures.len());
    }

    Ok(())
}

fn compute_route(router: &Router, kind: RouteArg, name: &str, model_path: Option<&Path>) -> Result<String> {
    match kind {
        RouteArg::Namespace => Ok(router.link_namespace(name)),
        RouteArg::Source => Ok(router.link_source(SymbolRef::SourceLocation(Path::new(name)))?),
        RouteArg::Symbol => {
            let model_path = model_path.ok_or_else(|| anyhow!("--model is required to route a symbol"))?;
            let model = load_model(model_path)?;
            let index = SymbolIndex::new(&model);
            let symbol = index
                .class_or_interface(name)
                .or_else(|| index.trait_named(name))
                .or_else(|| index.function(name))
                .ok_or_else(|| anyhow!("Symbol '{}' not found in '{}'", name, model_path.display()))?;
            Ok(router.link_symbol(symbol)?)
        }
    }
}

fn print_tree(model_path: &Path) -> Result<()> {
    let model = load_model(model_path)?;
    let index = SymbolIndex::new(&model);
    let constants = stratadoc_core::MemoryConstantStore::new();
    let resolver = NamespaceResolver::new(&index, &constants);

    let mut out = String::new();
    for node in resolver.tree() {
        render_node(&mut out, &node, 0);
    }
    print!("{out}");
    Ok(())
}

fn render_node(out: &mut String, node: &NamespaceNode, depth: usize) {
    out.push_str(&"  ".repeat(depth));
    out.push_str(&node.simple_name);
    out.push('\n');
    for child in &node.children {
        render_node(out, child, depth + 1);
    }
}
