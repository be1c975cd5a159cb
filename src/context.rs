use crate::cluster::{ClusterClient, HttpClusterClient};
use crate::config::Settings;
use crate::diagnostics::{Diagnostics, TracingDiagnostics};
use crate::traits::{
    FileSystem, InquireUserInput, Output, RealFileSystem, TerminalOutput, UserInput,
};
use crate::wizard::{Flows, Prompter};
use anyhow::Result;
use std::sync::Arc;

/// Application context that holds all dependencies for dependency injection
pub struct Context {
    pub fs: Arc<dyn FileSystem>,
    pub input: Arc<dyn UserInput>,
    pub output: Arc<dyn Output>,
    pub diagnostics: Arc<dyn Diagnostics>,
    /// Fixed cluster client; when unset one is built from the settings
    pub cluster: Option<Arc<dyn ClusterClient>>,
}

impl Context {
    /// Create a new context with real implementations (for production use)
    pub fn new() -> Self {
        Self {
            fs: Arc::new(RealFileSystem),
            input: Arc::new(InquireUserInput),
            output: Arc::new(TerminalOutput),
            diagnostics: Arc::new(TracingDiagnostics),
            cluster: None,
        }
    }

    /// Create a test context with specific mock implementations
    #[cfg(test)]
    pub fn test_with(
        fs: Arc<dyn FileSystem>,
        input: Arc<dyn UserInput>,
        output: Arc<dyn Output>,
        diagnostics: Arc<dyn Diagnostics>,
        cluster: Arc<dyn ClusterClient>,
    ) -> Self {
        Self {
            fs,
            input,
            output,
            diagnostics,
            cluster: Some(cluster),
        }
    }

    /// Cluster client for the configured server
    pub fn cluster(&self, settings: &Settings) -> Result<Arc<dyn ClusterClient>> {
        if let Some(cluster) = &self.cluster {
            return Ok(Arc::clone(cluster));
        }

        let client = HttpClusterClient::new(settings.server_url()?, settings.timeout())?;
        Ok(Arc::new(client))
    }

    /// Wizard flows wired to this context's input, filesystem and diagnostics
    pub fn flows(&self) -> Flows {
        Flows::new(
            Prompter::new(Arc::clone(&self.input)),
            Arc::clone(&self.fs),
            Arc::clone(&self.diagnostics),
        )
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
