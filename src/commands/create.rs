use super::{GlobalArgs, OutputFormat, load_catalog, load_settings, render};
use crate::context::Context;
use crate::wizard::flows::DEFAULT_GIT_REF;
use crate::wizard::validators::parse_port;
use crate::wizard::{
    ComponentPreset, ComponentSource, ResolutionContext, ResolvedComponentDescriptor,
    ResourceLimits,
};
use anyhow::{Context as _, Result};

/// Source location flags, at most one of which is set
#[derive(Debug, Clone, Default)]
pub struct SourceFlags {
    pub local: Option<String>,
    pub binary: Option<String>,
    pub git: Option<String>,
    pub git_ref: Option<String>,
}

impl SourceFlags {
    /// Source preset implied by the flags, if any
    pub fn into_source(self) -> Option<ComponentSource> {
        if let Some(path) = self.local {
            return Some(ComponentSource::Local { path });
        }
        if let Some(path) = self.binary {
            return Some(ComponentSource::Binary { path });
        }
        self.git.map(|url| ComponentSource::Git {
            url,
            reference: self.git_ref.unwrap_or_else(|| DEFAULT_GIT_REF.to_string()),
        })
    }
}

/// Resource limit flags; setting any of them skips the limits prompts
pub fn limits_from_flags(limits: ResourceLimits) -> Option<ResourceLimits> {
    if limits.is_empty() { None } else { Some(limits) }
}

/// Handles the 'create' command - resolves a builder-image component
pub struct CreateCommand;

impl CreateCommand {
    /// Execute the create command
    pub fn execute(
        ctx: &Context,
        globals: &GlobalArgs,
        preset: ComponentPreset,
        format: OutputFormat,
    ) -> Result<()> {
        let settings = load_settings(ctx, globals)?;
        let catalog = load_catalog(ctx, &settings)?;
        let cluster = ctx.cluster(&settings)?;

        let scope = ResolutionContext::new(
            settings.application.clone(),
            settings.project.clone(),
            cluster,
            ctx.diagnostics.clone(),
        );

        let current_dir = std::env::current_dir()
            .context("Failed to determine current directory")?
            .display()
            .to_string();

        if format == OutputFormat::Text {
            ctx.output.section("Create component");
            ctx.output.key_value("Project", &settings.project);
            ctx.output.info(&format!(
                "Catalog offers {} component type(s)",
                catalog.component_types.len()
            ));
            ctx.output.blank();
        }

        let descriptor = ctx
            .flows()
            .resolve_component(&catalog, preset, &scope, &current_dir)
            .context("Failed to resolve component")?;

        Self::present(ctx, &descriptor, format)
    }

    fn present(ctx: &Context, descriptor: &ResolvedComponentDescriptor, format: OutputFormat) -> Result<()> {
        if let Some(rendered) = render(descriptor, format)? {
            println!("{}", rendered.trim_end());
            return Ok(());
        }

        ctx.output.section("Component");
        ctx.output.key_value_highlight("Name", &descriptor.name);
        ctx.output.key_value("Type", &image_of(descriptor));
        ctx.output.key_value("Source", &describe_source(&descriptor.source));
        ctx.output.key_value("Application", &descriptor.application);
        ctx.output.key_value("Project", &descriptor.project);
        ctx.output.key_value("Ports", &joined_or_none(&describe_ports(&descriptor.ports)));
        ctx.output.key_value("Environment", &joined_or_none(&descriptor.env_vars));

        if !descriptor.limits.is_empty() {
            ctx.output.subsection("Resource limits");
            let limits = &descriptor.limits;
            for (key, value) in [
                ("Min memory", &limits.min_memory),
                ("Max memory", &limits.max_memory),
                ("Min CPU", &limits.min_cpu),
                ("Max CPU", &limits.max_cpu),
            ] {
                if let Some(value) = value {
                    ctx.output.key_value(key, value);
                }
            }
        }

        ctx.output.blank();
        ctx.output.success(&format!(
            "Component '{}' configured in application '{}'",
            descriptor.name, descriptor.application
        ));
        Ok(())
    }
}

/// `type:tag`, or just the type when it has no visible tags
fn image_of(descriptor: &ResolvedComponentDescriptor) -> String {
    if descriptor.tag.is_empty() {
        descriptor.component_type.clone()
    } else {
        format!("{}:{}", descriptor.component_type, descriptor.tag)
    }
}

fn describe_source(source: &ComponentSource) -> String {
    let source_type = source.source_type();
    match source {
        ComponentSource::Local { path } | ComponentSource::Binary { path } => {
            format!("{} ({})", source_type, path)
        }
        ComponentSource::Git { url, reference } => {
            format!("{} ({}@{})", source_type, url, reference)
        }
        ComponentSource::None => source_type.to_string(),
    }
}

/// Ports with their protocol made explicit
fn describe_ports(ports: &[String]) -> Vec<String> {
    ports
        .iter()
        .map(|token| match parse_port(token) {
            Ok(port) => port.to_string(),
            Err(_) => token.clone(),
        })
        .collect()
}

fn joined_or_none(values: &[String]) -> String {
    if values.is_empty() {
        "none".to_string()
    } else {
        values.join(", ")
    }
}
