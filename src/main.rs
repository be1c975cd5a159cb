mod catalog;
mod cluster;
mod commands;
mod config;
mod context;
mod diagnostics;
mod error;
mod logging;
mod output;
mod traits;
mod wizard;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use commands::create::{SourceFlags, limits_from_flags};
use commands::{
    CatalogCommand, CreateCommand, CreateDevfileCommand, GlobalArgs, OutputFormat,
};
use wizard::{ComponentPreset, DevfilePreset, ResourceLimits};

#[derive(Parser)]
#[command(name = "compwiz")]
#[command(about = "Interactive wizard for configuring deployable components", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Catalog file (defaults to ~/.compwiz/catalog.yaml)
    #[arg(long, global = true)]
    catalog: Option<String>,

    /// Cluster server URL used for component name checks
    #[arg(long, global = true)]
    server: Option<String>,

    /// Project (namespace) to create the component in
    #[arg(long, global = true)]
    project: Option<String>,

    /// Application to associate the component with
    #[arg(long = "app", global = true)]
    application: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Configure a builder-image component
    Create(CreateArgs),

    /// Configure a devfile component
    CreateDevfile(CreateDevfileArgs),

    /// List component types, tags and starter projects from the catalog
    Catalog {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },
}

#[derive(Args)]
struct CreateArgs {
    /// Component type (skips the type prompt)
    #[arg(long = "type")]
    component_type: Option<String>,

    /// Image tag of the component type
    #[arg(long)]
    tag: Option<String>,

    /// Component name
    #[arg(long)]
    name: Option<String>,

    /// Local source directory
    #[arg(long, conflicts_with_all = ["binary", "git"])]
    local: Option<String>,

    /// Path to a binary artifact
    #[arg(long, conflicts_with = "git")]
    binary: Option<String>,

    /// Git repository URL
    #[arg(long)]
    git: Option<String>,

    /// Git ref to build from (defaults to master)
    #[arg(long, requires = "git")]
    git_ref: Option<String>,

    /// Comma separated ports, e.g. 8080,9100/udp
    #[arg(long)]
    ports: Option<String>,

    /// Comma separated KEY=VALUE pairs
    #[arg(long)]
    env: Option<String>,

    #[arg(long)]
    min_memory: Option<String>,

    #[arg(long)]
    max_memory: Option<String>,

    #[arg(long)]
    min_cpu: Option<String>,

    #[arg(long)]
    max_cpu: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
}

#[derive(Args)]
struct CreateDevfileArgs {
    /// Devfile component type (skips the type prompt)
    #[arg(long = "type")]
    component_type: Option<String>,

    /// Component name
    #[arg(long)]
    name: Option<String>,

    /// Starter project to download
    #[arg(long)]
    starter: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let globals = GlobalArgs {
        catalog: cli.catalog,
        server: cli.server,
        project: cli.project.clone(),
        application: cli.application.clone(),
    };
    let ctx = context::Context::new();

    match cli.command {
        Commands::Create(args) => {
            let source = SourceFlags {
                local: args.local,
                binary: args.binary,
                git: args.git,
                git_ref: args.git_ref,
            }
            .into_source();

            let limits = limits_from_flags(ResourceLimits {
                min_memory: args.min_memory,
                max_memory: args.max_memory,
                min_cpu: args.min_cpu,
                max_cpu: args.max_cpu,
            });

            let preset = ComponentPreset {
                component_type: args.component_type,
                tag: args.tag,
                source,
                application: cli.application,
                name: args.name,
                ports: args.ports,
                env_vars: args.env,
                limits,
            };
            CreateCommand::execute(&ctx, &globals, preset, args.output)?;
        }
        Commands::CreateDevfile(args) => {
            let preset = DevfilePreset {
                component_type: args.component_type,
                name: args.name,
                project: cli.project,
                starter_project: args.starter,
            };
            CreateDevfileCommand::execute(&ctx, &globals, preset, args.output)?;
        }
        Commands::Catalog { output } => {
            CatalogCommand::execute(&ctx, &globals, output)?;
        }
    }

    Ok(())
}
