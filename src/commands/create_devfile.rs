use super::{GlobalArgs, OutputFormat, load_catalog, load_settings, render};
use crate::context::Context;
use crate::wizard::{DevfilePreset, ResolvedDevfileComponent};
use anyhow::{Context as _, Result};

/// Handles the 'create-devfile' command - resolves a devfile component
pub struct CreateDevfileCommand;

impl CreateDevfileCommand {
    /// Execute the create-devfile command
    pub fn execute(
        ctx: &Context,
        globals: &GlobalArgs,
        preset: DevfilePreset,
        format: OutputFormat,
    ) -> Result<()> {
        let settings = load_settings(ctx, globals)?;
        let catalog = load_catalog(ctx, &settings)?;

        if format == OutputFormat::Text {
            ctx.output.section("Create devfile component");
        }

        let component = ctx
            .flows()
            .resolve_devfile_component(&catalog, preset, &settings.project)
            .context("Failed to resolve devfile component")?;

        Self::present(ctx, &component, format)
    }

    fn present(ctx: &Context, component: &ResolvedDevfileComponent, format: OutputFormat) -> Result<()> {
        if let Some(rendered) = render(component, format)? {
            println!("{}", rendered.trim_end());
            return Ok(());
        }

        ctx.output.section("Devfile component");
        ctx.output.key_value_highlight("Name", &component.name);
        ctx.output.key_value("Type", &component.component_type);
        ctx.output.key_value("Project", &component.project);
        match &component.starter_project {
            Some(starter) => ctx.output.key_value("Starter project", starter),
            None => ctx.output.dimmed("  No starter project"),
        }

        ctx.output.blank();
        ctx.output.success(&format!("Devfile component '{}' configured", component.name));
        Ok(())
    }
}
