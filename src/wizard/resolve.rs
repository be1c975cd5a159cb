//! Composite wizards that turn partial input into a resolved component
//!
//! Values supplied up front skip their prompt but go through the same
//! validators. A rejected preset is fatal since there is no prompt to retry.

use anyhow::{Context, Result, bail};

use crate::catalog::Catalog;

use super::candidates::{names_of, tags_for};
use super::descriptor::{
    ComponentSource, ResolvedComponentDescriptor, ResolvedDevfileComponent, ResourceLimits,
    SourceType, SourceTypeTable,
};
use super::flows::Flows;
use super::remote::{ComponentNameValidator, ResolutionContext};
use super::validators::{
    KeyValueValidator, NameValidator, PathValidator, PortsValidator, RequiredValidator, Validator,
    Verdict, split_values,
};

/// Values already known before the component wizard starts
#[derive(Debug, Clone, Default)]
pub struct ComponentPreset {
    pub component_type: Option<String>,
    pub tag: Option<String>,
    pub source: Option<ComponentSource>,
    pub application: Option<String>,
    pub name: Option<String>,
    pub ports: Option<String>,
    pub env_vars: Option<String>,
    pub limits: Option<ResourceLimits>,
}

/// Values already known before the devfile wizard starts
#[derive(Debug, Clone, Default)]
pub struct DevfilePreset {
    pub component_type: Option<String>,
    pub name: Option<String>,
    pub project: Option<String>,
    pub starter_project: Option<String>,
}

/// Run a preset through a validator
fn check_preset(field: &str, value: &str, validator: &dyn Validator) -> Result<String> {
    match validator.validate(value) {
        Verdict::Accept => Ok(value.to_string()),
        Verdict::Reject(reason) => bail!("Invalid {}: {}", field, reason),
    }
}

/// Require a preset to be one of the candidates
fn check_candidate(field: &str, value: &str, candidates: &[String]) -> Result<String> {
    if candidates.iter().any(|c| c == value) {
        return Ok(value.to_string());
    }
    if candidates.is_empty() {
        bail!("Invalid {} '{}': nothing is available", field, value);
    }
    bail!(
        "Invalid {} '{}'. Available: {}",
        field,
        value,
        candidates.join(", ")
    )
}

/// Set limits must be non-empty, like the answers of the limit prompts
fn check_limits(limits: ResourceLimits) -> Result<ResourceLimits> {
    for (field, value) in [
        ("minimum memory", &limits.min_memory),
        ("maximum memory", &limits.max_memory),
        ("minimum CPU", &limits.min_cpu),
        ("maximum CPU", &limits.max_cpu),
    ] {
        if let Some(value) = value {
            check_preset(field, value, &RequiredValidator)?;
        }
    }
    Ok(limits)
}

/// Name suggested for a new component: `<type>-<application>` reduced to a valid name
pub fn default_component_name(component_type: &str, application: &str) -> String {
    let raw = format!("{}-{}", component_type, application).to_lowercase();
    let mut name: String = raw
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    name.truncate(63);
    name.trim_matches('-').to_string()
}

impl Flows {
    /// Resolve every field of a builder-image component
    pub fn resolve_component(
        &self,
        catalog: &Catalog,
        preset: ComponentPreset,
        context: &ResolutionContext,
        current_dir: &str,
    ) -> Result<ResolvedComponentDescriptor> {
        if catalog.component_types.is_empty() {
            bail!("The catalog does not define any component types");
        }

        let component_type = match &preset.component_type {
            Some(value) => check_candidate(
                "component type",
                value,
                &names_of(&catalog.component_types),
            )?,
            None => self
                .select_component_type(&catalog.component_types)
                .context("Failed to select component type")?,
        };

        let tag = match &preset.tag {
            Some(value) => check_candidate(
                "tag",
                value,
                &tags_for(&catalog.component_types, &component_type, self.diagnostics()),
            )?,
            None => self
                .select_image_tag(&catalog.component_types, &component_type)
                .context("Failed to select component version")?,
        };

        let source = match preset.source {
            Some(source) => self.check_source(source)?,
            None => self.resolve_source(current_dir)?,
        };

        let application = match &preset.application {
            Some(value) => check_preset("application", value, &NameValidator)?,
            None => self
                .enter_resource_name(
                    &context.application,
                    "What application do you want the component to be associated with",
                )
                .context("Failed to get application name")?,
        };
        let scoped = context.for_application(&application);

        let name = match &preset.name {
            Some(value) => check_preset("component name", value, &ComponentNameValidator::new(scoped.clone()))?,
            None => self
                .enter_component_name(&default_component_name(&component_type, &application), &scoped)
                .context("Failed to get component name")?,
        };

        let ports = match &preset.ports {
            Some(value) => split_values(&check_preset("ports", value, &PortsValidator)?),
            None => self.enter_ports().context("Failed to get ports")?,
        };

        let env_vars = match &preset.env_vars {
            Some(value) => split_values(&check_preset("environment variables", value, &KeyValueValidator)?),
            None => self.enter_env_vars().context("Failed to get environment variables")?,
        };

        let limits = match preset.limits {
            Some(limits) => check_limits(limits)?,
            None => self
                .enter_resource_limits()
                .context("Failed to get resource limits")?,
        };

        Ok(ResolvedComponentDescriptor {
            name,
            component_type,
            tag,
            source,
            application,
            project: scoped.project,
            ports,
            env_vars,
            limits,
        })
    }

    /// Ask for the source type and the matching location
    fn resolve_source(&self, current_dir: &str) -> Result<ComponentSource> {
        let table = SourceTypeTable::default();
        let source_type = self
            .select_source_type(&table)
            .context("Failed to select source type")?;

        let source = match source_type {
            SourceType::Local => ComponentSource::Local {
                path: self
                    .enter_input_type_path(source_type, current_dir, Some("./"))
                    .context("Failed to get source location")?,
            },
            SourceType::Binary => ComponentSource::Binary {
                path: self
                    .enter_input_type_path(source_type, current_dir, None)
                    .context("Failed to get binary location")?,
            },
            SourceType::Git => {
                let (url, reference) = self.enter_git_info().context("Failed to get git details")?;
                ComponentSource::Git { url, reference }
            }
            SourceType::None => ComponentSource::None,
        };

        Ok(source)
    }

    fn check_source(&self, source: ComponentSource) -> Result<ComponentSource> {
        match &source {
            ComponentSource::Local { path } => {
                check_preset(
                    "local source path",
                    path,
                    &PathValidator::existing_dir(self.fs.clone()),
                )?;
            }
            ComponentSource::Binary { path } => {
                check_preset(
                    "binary path",
                    path,
                    &PathValidator::existing_file(self.fs.clone()),
                )?;
            }
            ComponentSource::Git { url, reference } => {
                check_preset("git URL", url, &RequiredValidator)?;
                check_preset("git ref", reference, &RequiredValidator)?;
            }
            ComponentSource::None => {}
        }
        Ok(source)
    }

    /// Resolve every field of a devfile component
    pub fn resolve_devfile_component(
        &self,
        catalog: &Catalog,
        preset: DevfilePreset,
        default_project: &str,
    ) -> Result<ResolvedDevfileComponent> {
        if catalog.devfile_component_types.is_empty() {
            bail!("The catalog does not define any devfile component types");
        }

        let component_type = match &preset.component_type {
            Some(value) => check_candidate(
                "devfile component type",
                value,
                &names_of(&catalog.devfile_component_types),
            )?,
            None => self
                .select_devfile_component_type(&catalog.devfile_component_types)
                .context("Failed to select devfile component type")?,
        };

        let name = match &preset.name {
            Some(value) => check_preset("component name", value, &NameValidator)?,
            None => self
                .enter_devfile_component_name(&component_type)
                .context("Failed to get component name")?,
        };

        let project = match &preset.project {
            Some(value) => check_preset("project", value, &NameValidator)?,
            None => self
                .enter_devfile_component_project(default_project)
                .context("Failed to get project name")?,
        };

        let starter_projects = catalog
            .devfile_component_type(&component_type)
            .map(|t| t.starter_projects.as_slice())
            .unwrap_or_default();

        let starter_project = match &preset.starter_project {
            Some(value) => Some(check_candidate(
                "starter project",
                value,
                &names_of(starter_projects),
            )?),
            None => self
                .select_starter_project(starter_projects)
                .context("Failed to select starter project")?,
        };

        Ok(ResolvedDevfileComponent {
            name,
            component_type,
            project,
            starter_project,
        })
    }
}
