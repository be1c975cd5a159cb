//! Single-field resolution flows
//!
//! Each flow is a fixed sequence of prompts. Failures returned from here are
//! always fatal; rejected answers are retried by the prompt engine.

use std::sync::Arc;

use crate::catalog::{ComponentType, DevfileComponentType, StarterProject};
use crate::diagnostics::Diagnostics;
use crate::error::PromptResult;
use crate::traits::FileSystem;

use super::candidates::{names_of, tags_for};
use super::descriptor::{ResourceLimits, SourceType, SourceTypeTable};
use super::prompt::{FieldSpec, Prompter, SelectSpec};
use super::remote::{ComponentNameValidator, ResolutionContext};
use super::validators::{
    AllOf, KeyValueValidator, NameValidator, PathValidator, PortsValidator, RequiredValidator,
    split_values,
};

/// Ref used when the user accepts the git ref default
pub const DEFAULT_GIT_REF: &str = "master";

const NAME_HELP: &str = "Only lowercase letters, numbers, and hyphens allowed";

/// Which end of a resource range is being entered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitBound {
    Minimum,
    Maximum,
}

impl LimitBound {
    fn as_str(&self) -> &'static str {
        match self {
            LimitBound::Minimum => "minimum",
            LimitBound::Maximum => "maximum",
        }
    }
}

/// Defaults offered by the resource limit prompts
pub const DEFAULT_MIN_MEMORY: &str = "100Mi";
pub const DEFAULT_MAX_MEMORY: &str = "512Mi";
pub const DEFAULT_MIN_CPU: &str = "100m";
pub const DEFAULT_MAX_CPU: &str = "1";

/// Prompt flows for component configuration
pub struct Flows {
    prompter: Prompter,
    pub(super) fs: Arc<dyn FileSystem>,
    diagnostics: Arc<dyn Diagnostics>,
}

impl Flows {
    pub fn new(prompter: Prompter, fs: Arc<dyn FileSystem>, diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self {
            prompter,
            fs,
            diagnostics,
        }
    }

    /// Offer to download a starter project
    ///
    /// Returns `None` when there is nothing to offer or the user declines. A
    /// single project is taken without asking which one; other selection flows
    /// always prompt, even for a single candidate.
    pub fn select_starter_project(&self, projects: &[StarterProject]) -> PromptResult<Option<String>> {
        if projects.is_empty() {
            return Ok(None);
        }

        let names = names_of(projects);

        let download = self
            .prompter
            .confirm("Do you want to download a starter project", false)?;
        if !download {
            return Ok(None);
        }

        if let [only] = names.as_slice() {
            return Ok(Some(only.clone()));
        }

        let spec = SelectSpec::new("Which starter project do you want to download", names);
        self.prompter.select(&spec).map(Some)
    }

    pub fn select_devfile_component_type(&self, options: &[DevfileComponentType]) -> PromptResult<String> {
        let spec = SelectSpec::new(
            "Which devfile component type do you wish to create",
            names_of(options),
        );
        self.prompter.select(&spec)
    }

    pub fn enter_devfile_component_name(&self, default_name: &str) -> PromptResult<String> {
        let spec = FieldSpec::new("What do you wish to name the new devfile component")
            .with_default(default_name)
            .with_help(NAME_HELP)
            .with_validator(AllOf::new().with(RequiredValidator).with(NameValidator));
        self.prompter.ask(&spec)
    }

    pub fn enter_devfile_component_project(&self, default_project: &str) -> PromptResult<String> {
        let spec = FieldSpec::new("What project do you want the devfile component to be created in")
            .with_default(default_project)
            .with_validator(NameValidator);
        self.prompter.ask(&spec)
    }

    /// Select the builder image name
    pub fn select_component_type(&self, options: &[ComponentType]) -> PromptResult<String> {
        let spec = SelectSpec::new("Which component type do you wish to create", names_of(options));
        self.prompter.select(&spec)
    }

    /// Select a tag of the chosen builder image
    ///
    /// A component type without visible tags resolves to the empty tag.
    pub fn select_image_tag(&self, options: &[ComponentType], selected: &str) -> PromptResult<String> {
        let tags = tags_for(options, selected, self.diagnostics.as_ref());
        if tags.is_empty() {
            return Ok(String::new());
        }

        let spec = SelectSpec::new(
            format!("Which version of '{}' component type do you wish to create", selected),
            tags,
        );
        self.prompter.select(&spec)
    }

    pub fn select_source_type(&self, table: &SourceTypeTable) -> PromptResult<SourceType> {
        let spec = SelectSpec::new("Which input type do you wish to use for the component", table.labels());
        let label = self.prompter.select(&spec)?;
        Ok(table.resolve(&label, self.diagnostics.as_ref()))
    }

    /// Ask where local or binary sources live
    pub fn enter_input_type_path(
        &self,
        source_type: SourceType,
        current_dir: &str,
        default_path: Option<&str>,
    ) -> PromptResult<String> {
        let validator = match source_type {
            SourceType::Local => PathValidator::existing_dir(self.fs.clone()),
            SourceType::Binary => PathValidator::existing_file(self.fs.clone()),
            SourceType::Git | SourceType::None => PathValidator::syntactic(),
        };

        let mut spec = FieldSpec::new(format!(
            "Location of {} component, relative to '{}'",
            source_type, current_dir
        ))
        .with_validator(validator);
        if let Some(default_path) = default_path {
            spec = spec.with_default(default_path);
        }
        self.prompter.ask(&spec)
    }

    /// Ask for a component name that is free in the context's application
    pub fn enter_component_name(&self, default_name: &str, context: &ResolutionContext) -> PromptResult<String> {
        let spec = FieldSpec::new("What do you wish to name the new component")
            .with_default(default_name)
            .with_help(NAME_HELP)
            .with_validator(
                AllOf::new()
                    .with(RequiredValidator)
                    .with(ComponentNameValidator::new(context.clone())),
            );
        self.prompter.ask(&spec)
    }

    /// Ask for an application or project name
    pub fn enter_resource_name(&self, default_name: &str, message: &str) -> PromptResult<String> {
        let spec = FieldSpec::new(message)
            .with_default(default_name)
            .with_validator(NameValidator);
        self.prompter.ask(&spec)
    }

    /// Ask for the repository URL, then the ref to build
    pub fn enter_git_info(&self) -> PromptResult<(String, String)> {
        let url = self.prompter.ask(
            &FieldSpec::new("What is the URL of the git repository you wish the new component to use")
                .with_validator(RequiredValidator),
        )?;
        let reference = self.prompter.ask(
            &FieldSpec::new("What git ref (branch, tag, commit) do you wish to use")
                .with_default(DEFAULT_GIT_REF)
                .with_validator(RequiredValidator),
        )?;

        Ok((url, reference))
    }

    pub fn enter_ports(&self) -> PromptResult<Vec<String>> {
        let spec = FieldSpec::new(
            "Enter the ports you wish to set (for example: 8080,8100/tcp,9100/udp). Simply press 'Enter' to avoid setting them",
        )
        .with_default("")
        .with_validator(PortsValidator);
        Ok(split_values(&self.prompter.ask(&spec)?))
    }

    pub fn enter_env_vars(&self) -> PromptResult<Vec<String>> {
        let spec = FieldSpec::new(
            "Enter the environment variables you would like to set (for example: MY_TYPE=backend,PROFILE=dev). Simply press 'Enter' to avoid setting them",
        )
        .with_default("")
        .with_validator(KeyValueValidator);
        Ok(split_values(&self.prompter.ask(&spec)?))
    }

    /// Memory quantity; the cluster is the authority on units
    pub fn enter_memory(&self, bound: LimitBound, default_value: &str) -> PromptResult<String> {
        let spec = FieldSpec::new(format!(
            "Enter the {} memory (for example 100Mi)",
            bound.as_str()
        ))
        .with_default(default_value)
        .with_validator(RequiredValidator);
        self.prompter.ask(&spec)
    }

    /// CPU quantity; the cluster is the authority on units
    pub fn enter_cpu(&self, bound: LimitBound, default_value: &str) -> PromptResult<String> {
        let spec = FieldSpec::new(format!(
            "Enter the {} CPU (for example 100m or 2)",
            bound.as_str()
        ))
        .with_default(default_value)
        .with_validator(RequiredValidator);
        self.prompter.ask(&spec)
    }

    /// Optionally collect memory and CPU bounds
    pub fn enter_resource_limits(&self) -> PromptResult<ResourceLimits> {
        if !self
            .prompter
            .confirm("Do you wish to set resource limits", false)?
        {
            return Ok(ResourceLimits::default());
        }

        Ok(ResourceLimits {
            min_memory: Some(self.enter_memory(LimitBound::Minimum, DEFAULT_MIN_MEMORY)?),
            max_memory: Some(self.enter_memory(LimitBound::Maximum, DEFAULT_MAX_MEMORY)?),
            min_cpu: Some(self.enter_cpu(LimitBound::Minimum, DEFAULT_MIN_CPU)?),
            max_cpu: Some(self.enter_cpu(LimitBound::Maximum, DEFAULT_MAX_CPU)?),
        })
    }

    pub fn diagnostics(&self) -> &dyn Diagnostics {
        self.diagnostics.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::MockClusterClient;
    use crate::diagnostics::MockDiagnostics;
    use crate::error::PromptError;
    use crate::traits::{MockFileSystem, MockResponse, MockUserInput};

    fn text(value: &str) -> MockResponse {
        MockResponse::Text(value.to_string())
    }

    fn select(value: &str) -> MockResponse {
        MockResponse::Select(value.to_string())
    }

    fn flows(responses: Vec<MockResponse>) -> (Flows, Arc<MockUserInput>) {
        flows_with_fs(responses, Arc::new(MockFileSystem::new()))
    }

    fn flows_with_fs(responses: Vec<MockResponse>, fs: Arc<MockFileSystem>) -> (Flows, Arc<MockUserInput>) {
        let input = Arc::new(MockUserInput::with_responses(responses));
        let flows = Flows::new(
            Prompter::new(input.clone()),
            fs,
            Arc::new(MockDiagnostics::new()),
        );
        (flows, input)
    }

    fn projects(names: &[&str]) -> Vec<StarterProject> {
        names
            .iter()
            .map(|n| StarterProject { name: n.to_string() })
            .collect()
    }

    #[test]
    fn test_starter_project_declined() {
        let (flows, input) = flows(vec![MockResponse::Confirm(false)]);

        let result = flows.select_starter_project(&projects(&["a", "b"])).unwrap();
        assert_eq!(result, None);
        assert_eq!(input.prompts().len(), 1);
        assert_eq!(input.remaining(), 0);
    }

    #[test]
    fn test_starter_project_single_candidate_skips_select() {
        let (flows, input) = flows(vec![MockResponse::Confirm(true)]);

        let result = flows.select_starter_project(&projects(&["springboot"])).unwrap();
        assert_eq!(result.as_deref(), Some("springboot"));
        assert_eq!(input.prompts(), vec!["Do you want to download a starter project"]);
    }

    #[test]
    fn test_starter_project_multiple_candidates_prompts() {
        let (flows, input) = flows(vec![MockResponse::Confirm(true), select("alpha")]);

        let result = flows
            .select_starter_project(&projects(&["zeta", "alpha", "zeta"]))
            .unwrap();
        assert_eq!(result.as_deref(), Some("alpha"));
        assert_eq!(input.prompts().len(), 2);
        assert_eq!(input.prompts()[1], "Which starter project do you want to download");
        assert_eq!(input.offered_options(), vec![vec!["alpha", "zeta"]]);
    }

    #[test]
    fn test_starter_project_none_available() {
        let (flows, input) = flows(Vec::new());

        assert_eq!(flows.select_starter_project(&[]).unwrap(), None);
        assert!(input.prompts().is_empty());
    }

    #[test]
    fn test_single_component_type_still_prompts() {
        let (flows, input) = flows(vec![select("nodejs")]);

        let types = vec![ComponentType::new("nodejs", &["14"])];
        assert_eq!(flows.select_component_type(&types).unwrap(), "nodejs");
        assert_eq!(input.prompts().len(), 1);
    }

    #[test]
    fn test_component_type_options_sorted_and_distinct() {
        let (flows, input) = flows(vec![select("java")]);

        let types = vec![
            ComponentType::new("python", &[]),
            ComponentType::new("java", &["11"]),
            ComponentType::new("nodejs", &[]),
            ComponentType::new("java", &["8"]),
        ];
        assert_eq!(flows.select_component_type(&types).unwrap(), "java");
        assert_eq!(input.offered_options(), vec![vec!["java", "nodejs", "python"]]);
    }

    #[test]
    fn test_select_image_tag() {
        let (flows, input) = flows(vec![select("14")]);

        let types = vec![
            ComponentType::new("nodejs", &["latest", "14", "latest"]),
            ComponentType::new("python", &["3.8"]),
        ];
        assert_eq!(flows.select_image_tag(&types, "nodejs").unwrap(), "14");
        assert_eq!(input.offered_options(), vec![vec!["14", "latest"]]);
        assert_eq!(
            input.prompts(),
            vec!["Which version of 'nodejs' component type do you wish to create"]
        );
    }

    #[test]
    fn test_select_image_tag_without_tags_is_empty_sentinel() {
        let (flows, input) = flows(Vec::new());

        let types = vec![ComponentType::new("python", &[])];
        assert_eq!(flows.select_image_tag(&types, "python").unwrap(), "");
        assert_eq!(flows.select_image_tag(&types, "ruby").unwrap(), "");
        assert!(input.prompts().is_empty());
    }

    #[test]
    fn test_select_devfile_component_type() {
        let (flows, _) = flows(vec![select("java-maven")]);

        let types = vec![
            DevfileComponentType::new("nodejs"),
            DevfileComponentType::new("java-maven"),
        ];
        assert_eq!(flows.select_devfile_component_type(&types).unwrap(), "java-maven");
    }

    #[test]
    fn test_source_type_round_trip() {
        let table = SourceTypeTable::default();
        for source_type in SourceType::SELECTABLE {
            let (flows, _) = flows(vec![select(source_type.as_str())]);
            assert_eq!(flows.select_source_type(&table).unwrap(), source_type);
        }
    }

    #[test]
    fn test_git_info_default_ref() {
        let (flows, _) = flows(vec![text("https://github.com/example/app"), text("")]);

        let (url, reference) = flows.enter_git_info().unwrap();
        assert_eq!(url, "https://github.com/example/app");
        assert_eq!(reference, "master");
    }

    #[test]
    fn test_git_info_url_required() {
        let (flows, input) = flows(vec![text(""), text("https://github.com/example/app"), text("v1")]);

        let (url, reference) = flows.enter_git_info().unwrap();
        assert_eq!(url, "https://github.com/example/app");
        assert_eq!(reference, "v1");
        assert_eq!(input.rejections(), vec!["Value is required"]);
    }

    #[test]
    fn test_component_name_rejects_existing_then_accepts() {
        let (flows, input) = flows(vec![text("web"), text("web-2")]);
        let cluster = MockClusterClient::new().with_component("web", "shop", "dev");
        let ctx = ResolutionContext::new(
            "shop",
            "dev",
            Arc::new(cluster),
            Arc::new(MockDiagnostics::new()),
        );

        assert_eq!(flows.enter_component_name("nodejs-shop", &ctx).unwrap(), "web-2");
        assert_eq!(
            input.rejections(),
            vec!["Component with name 'web' already exists in application 'shop'"]
        );
    }

    #[test]
    fn test_component_name_uses_default() {
        let (flows, _) = flows(vec![text("")]);
        let ctx = ResolutionContext::new(
            "shop",
            "dev",
            Arc::new(MockClusterClient::new()),
            Arc::new(MockDiagnostics::new()),
        );

        assert_eq!(flows.enter_component_name("nodejs-shop", &ctx).unwrap(), "nodejs-shop");
    }

    #[test]
    fn test_ports_split() {
        let (flows, input) = flows(vec![text("8080,http"), text("8080,8100/tcp,9100/udp")]);

        assert_eq!(
            flows.enter_ports().unwrap(),
            vec!["8080", "8100/tcp", "9100/udp"]
        );
        assert_eq!(input.rejections().len(), 1);
    }

    #[test]
    fn test_ports_skip() {
        let (flows, _) = flows(vec![text("")]);
        assert!(flows.enter_ports().unwrap().is_empty());
    }

    #[test]
    fn test_env_vars_split() {
        let (flows, input) = flows(vec![text("A=1,B"), text("A=1,B=2")]);

        assert_eq!(flows.enter_env_vars().unwrap(), vec!["A=1", "B=2"]);
        assert_eq!(input.rejections().len(), 1);
    }

    #[test]
    fn test_input_type_path_requires_existing_dir_for_local() {
        let fs = Arc::new(MockFileSystem::new());
        fs.add_dir("./frontend");
        let (flows, input) = flows_with_fs(vec![text("./missing"), text("./frontend")], fs);

        let path = flows
            .enter_input_type_path(SourceType::Local, "/work", None)
            .unwrap();
        assert_eq!(path, "./frontend");
        assert_eq!(input.prompts(), vec!["Location of local component, relative to '/work'"]);
        assert_eq!(input.rejections().len(), 1);
    }

    #[test]
    fn test_memory_and_cpu_prompts() {
        let (flows, input) = flows(vec![text(""), text("2")]);

        assert_eq!(flows.enter_memory(LimitBound::Minimum, "100Mi").unwrap(), "100Mi");
        assert_eq!(flows.enter_cpu(LimitBound::Maximum, "1").unwrap(), "2");
        assert_eq!(
            input.prompts(),
            vec![
                "Enter the minimum memory (for example 100Mi)",
                "Enter the maximum CPU (for example 100m or 2)"
            ]
        );
    }

    #[test]
    fn test_resource_limits_declined() {
        let (flows, _) = flows(vec![MockResponse::Confirm(false)]);
        assert!(flows.enter_resource_limits().unwrap().is_empty());
    }

    #[test]
    fn test_resource_limits_defaults() {
        let (flows, _) = flows(vec![
            MockResponse::Confirm(true),
            text(""),
            text("1Gi"),
            text(""),
            text(""),
        ]);

        let limits = flows.enter_resource_limits().unwrap();
        assert_eq!(limits.min_memory.as_deref(), Some("100Mi"));
        assert_eq!(limits.max_memory.as_deref(), Some("1Gi"));
        assert_eq!(limits.min_cpu.as_deref(), Some("100m"));
        assert_eq!(limits.max_cpu.as_deref(), Some("1"));
    }

    #[test]
    fn test_interrupt_aborts_flow() {
        let (flows, _) = flows(vec![text("https://github.com/example/app"), MockResponse::Interrupt]);

        let err = flows.enter_git_info().unwrap_err();
        assert!(matches!(err, PromptError::Interrupted));
    }
}
