//! Component name validation against the cluster
//!
//! The lookup is a point-in-time check; nothing is cached between prompts.

use std::sync::Arc;

use crate::cluster::ClusterClient;
use crate::diagnostics::Diagnostics;

use super::validators::{Validator, Verdict, validate_name};

/// Scope and capabilities shared by validators that consult the cluster
///
/// Read-only for the lifetime of a wizard run; flows run sequentially against it.
#[derive(Clone)]
pub struct ResolutionContext {
    pub application: String,
    pub project: String,
    pub cluster: Arc<dyn ClusterClient>,
    pub diagnostics: Arc<dyn Diagnostics>,
}

impl ResolutionContext {
    pub fn new(
        application: impl Into<String>,
        project: impl Into<String>,
        cluster: Arc<dyn ClusterClient>,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Self {
        Self {
            application: application.into(),
            project: project.into(),
            cluster,
            diagnostics,
        }
    }

    /// Same capabilities, scoped to another application
    pub fn for_application(&self, application: impl Into<String>) -> Self {
        Self {
            application: application.into(),
            ..self.clone()
        }
    }
}

/// Rejects names that are malformed or already taken in the application
///
/// Every call performs exactly one cluster lookup; results are never cached
/// because the cluster can change between prompts.
#[derive(Clone)]
pub struct ComponentNameValidator {
    context: ResolutionContext,
}

impl ComponentNameValidator {
    pub fn new(context: ResolutionContext) -> Self {
        Self { context }
    }
}

impl Validator for ComponentNameValidator {
    fn validate(&self, input: &str) -> Verdict {
        let verdict = validate_name(input);
        if !verdict.is_accept() {
            return verdict;
        }

        let ctx = &self.context;
        match ctx
            .cluster
            .component_exists(input, &ctx.application, &ctx.project)
        {
            Ok(true) => Verdict::reject(format!(
                "Component with name '{}' already exists in application '{}'",
                input, ctx.application
            )),
            Ok(false) => Verdict::Accept,
            Err(err) => {
                ctx.diagnostics.debug(&format!("{:#}", err));
                Verdict::reject(format!(
                    "Unable to determine if component '{}' exists or not",
                    input
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::MockClusterClient;
    use crate::diagnostics::MockDiagnostics;

    fn context(cluster: MockClusterClient, diagnostics: Arc<MockDiagnostics>) -> ResolutionContext {
        ResolutionContext::new("shop", "dev", Arc::new(cluster), diagnostics)
    }

    #[test]
    fn test_rejects_existing_component() {
        let diagnostics = Arc::new(MockDiagnostics::new());
        let cluster = MockClusterClient::new().with_component("frontend", "shop", "dev");
        let validator = ComponentNameValidator::new(context(cluster, diagnostics));

        assert_eq!(
            validator.validate("frontend"),
            Verdict::reject("Component with name 'frontend' already exists in application 'shop'")
        );
    }

    #[test]
    fn test_accepts_absent_component() {
        let diagnostics = Arc::new(MockDiagnostics::new());
        let cluster = MockClusterClient::new().with_component("frontend", "blog", "dev");
        let validator = ComponentNameValidator::new(context(cluster, diagnostics.clone()));

        assert_eq!(validator.validate("frontend"), Verdict::Accept);
        assert!(diagnostics.messages().is_empty());
    }

    #[test]
    fn test_transport_error_is_generic_rejection() {
        let diagnostics = Arc::new(MockDiagnostics::new());
        let cluster = MockClusterClient::new().failing("connection refused");
        let validator = ComponentNameValidator::new(context(cluster, diagnostics.clone()));

        let verdict = validator.validate("frontend");
        assert_eq!(
            verdict,
            Verdict::reject("Unable to determine if component 'frontend' exists or not")
        );
        assert!(!verdict.reason().unwrap().contains("connection refused"));
        assert!(diagnostics.contains("connection refused"));
    }

    #[test]
    fn test_malformed_name_skips_cluster_lookup() {
        let diagnostics = Arc::new(MockDiagnostics::new());
        let cluster = Arc::new(MockClusterClient::new());
        let ctx = ResolutionContext::new("shop", "dev", cluster.clone(), diagnostics);
        let validator = ComponentNameValidator::new(ctx);

        assert!(!validator.validate("Not_Valid").is_accept());
        assert!(cluster.queries().is_empty());
    }

    #[test]
    fn test_each_validation_queries_cluster() {
        let diagnostics = Arc::new(MockDiagnostics::new());
        let cluster = Arc::new(MockClusterClient::new());
        let ctx = ResolutionContext::new("shop", "dev", cluster.clone(), diagnostics);
        let validator = ComponentNameValidator::new(ctx);

        validator.validate("api");
        validator.validate("api");
        assert_eq!(cluster.queries(), vec!["api", "api"]);
    }

    #[test]
    fn test_for_application_rescopes() {
        let diagnostics = Arc::new(MockDiagnostics::new());
        let cluster = MockClusterClient::new().with_component("api", "blog", "dev");
        let ctx = context(cluster, diagnostics).for_application("blog");

        assert!(!ComponentNameValidator::new(ctx).validate("api").is_accept());
    }
}
