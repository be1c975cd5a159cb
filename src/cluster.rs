use anyhow::{Context, Result, bail};
use reqwest::StatusCode;
use std::collections::HashSet;
use std::sync::Mutex;
use std::time::Duration;
use url::Url;

/// Read-only view of the cluster used to check for name collisions
pub trait ClusterClient: Send + Sync {
    /// Whether a component called `name` exists in `application` within `project`
    fn component_exists(&self, name: &str, application: &str, project: &str) -> Result<bool>;
}

/// Cluster client talking to the component API over HTTP
pub struct HttpClusterClient {
    server: Url,
    client: reqwest::blocking::Client,
}

impl HttpClusterClient {
    pub fn new(server: Url, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { server, client })
    }

    fn component_url(&self, name: &str, application: &str, project: &str) -> Result<Url> {
        let mut url = self.server.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("Server URL cannot be used as a base: {}", self.server))?
            .pop_if_empty()
            .extend([
                "api",
                "v1",
                "namespaces",
                project,
                "applications",
                application,
                "components",
                name,
            ]);
        Ok(url)
    }
}

impl ClusterClient for HttpClusterClient {
    fn component_exists(&self, name: &str, application: &str, project: &str) -> Result<bool> {
        let url = self.component_url(name, application, project)?;
        tracing::debug!("Checking component existence at {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .with_context(|| format!("Failed to query cluster: {}", url))?;

        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => bail!("Cluster request failed with status {}: {}", status, url),
        }
    }
}

/// In-memory cluster for tests
#[allow(dead_code)]
pub struct MockClusterClient {
    components: HashSet<(String, String, String)>,
    failure: Option<String>,
    queries: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl MockClusterClient {
    pub fn new() -> Self {
        Self {
            components: HashSet::new(),
            failure: None,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Register an existing component
    pub fn with_component(mut self, name: &str, application: &str, project: &str) -> Self {
        self.components.insert((
            name.to_string(),
            application.to_string(),
            project.to_string(),
        ));
        self
    }

    /// Make every query fail with the given transport error
    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    /// Names queried so far, in order
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

impl Default for MockClusterClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ClusterClient for MockClusterClient {
    fn component_exists(&self, name: &str, application: &str, project: &str) -> Result<bool> {
        self.queries.lock().unwrap().push(name.to_string());

        if let Some(message) = &self.failure {
            bail!("{}", message);
        }

        Ok(self.components.contains(&(
            name.to_string(),
            application.to_string(),
            project.to_string(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_url() {
        let client = HttpClusterClient::new(
            Url::parse("https://cluster.example.com/").unwrap(),
            Duration::from_secs(5),
        )
        .unwrap();

        let url = client.component_url("frontend", "shop", "dev").unwrap();
        assert_eq!(
            url.as_str(),
            "https://cluster.example.com/api/v1/namespaces/dev/applications/shop/components/frontend"
        );
    }

    #[test]
    fn test_component_url_keeps_base_path() {
        let client = HttpClusterClient::new(
            Url::parse("https://example.com/cluster").unwrap(),
            Duration::from_secs(5),
        )
        .unwrap();

        let url = client.component_url("api", "app", "ns").unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.com/cluster/api/v1/namespaces/ns/applications/app/components/api"
        );
    }

    #[test]
    fn test_mock_cluster_scopes_by_application() {
        let cluster = MockClusterClient::new().with_component("web", "shop", "dev");

        assert!(cluster.component_exists("web", "shop", "dev").unwrap());
        assert!(!cluster.component_exists("web", "blog", "dev").unwrap());
        assert_eq!(cluster.queries(), vec!["web", "web"]);
    }
}
