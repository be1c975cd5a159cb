pub mod catalog;
pub mod create;
pub mod create_devfile;

pub use catalog::CatalogCommand;
pub use create::CreateCommand;
pub use create_devfile::CreateDevfileCommand;

use crate::catalog::Catalog;
use crate::config::Settings;
use crate::context::Context;
use anyhow::{Context as _, Result};
use clap::ValueEnum;
use serde::Serialize;

/// Flags shared by every subcommand; they override config file and environment
#[derive(Debug, Clone, Default)]
pub struct GlobalArgs {
    pub catalog: Option<String>,
    pub server: Option<String>,
    pub project: Option<String>,
    pub application: Option<String>,
}

/// How a resolved component is printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Yaml,
    Json,
}

/// Settings from ~/.compwiz/config.yaml, the environment and the global flags
pub fn load_settings(ctx: &Context, args: &GlobalArgs) -> Result<Settings> {
    load_settings_with(ctx, args, |key| std::env::var(key).ok())
}

fn load_settings_with<F>(ctx: &Context, args: &GlobalArgs, lookup: F) -> Result<Settings>
where
    F: Fn(&str) -> Option<String>,
{
    let path = Settings::default_path()?;
    let mut settings = Settings::load(&*ctx.fs, &path)?;
    settings.apply_env(lookup);

    if let Some(catalog) = &args.catalog {
        settings.catalog = Some(catalog.clone());
    }
    if let Some(server) = &args.server {
        settings.server = Some(server.clone());
    }
    if let Some(project) = &args.project {
        settings.project = project.clone();
    }
    if let Some(application) = &args.application {
        settings.application = application.clone();
    }

    tracing::debug!(
        project = %settings.project,
        application = %settings.application,
        "Settings resolved"
    );
    Ok(settings)
}

pub fn load_catalog(ctx: &Context, settings: &Settings) -> Result<Catalog> {
    let path = settings.catalog_path()?;
    tracing::debug!("Loading catalog from {:?}", path);
    Catalog::load(&*ctx.fs, &path)
}

/// Serialized form of a value, or `None` for the styled text summary
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<Option<String>> {
    let rendered = match format {
        OutputFormat::Text => return Ok(None),
        OutputFormat::Yaml => serde_yaml::to_string(value).context("Failed to render YAML")?,
        OutputFormat::Json => {
            serde_json::to_string_pretty(value).context("Failed to render JSON")?
        }
    };
    Ok(Some(rendered))
}
