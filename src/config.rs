use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::traits::FileSystem;

const COMPWIZ_DIR: &str = ".compwiz";
const CONFIG_FILE: &str = "config.yaml";
const CATALOG_FILE: &str = "catalog.yaml";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variables that override the config file
pub const ENV_SERVER: &str = "COMPWIZ_SERVER";
pub const ENV_PROJECT: &str = "COMPWIZ_PROJECT";
pub const ENV_APPLICATION: &str = "COMPWIZ_APPLICATION";
pub const ENV_CATALOG_PATH: &str = "COMPWIZ_CATALOG_PATH";

/// User settings stored in ~/.compwiz/config.yaml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Base URL of the cluster component API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,

    /// Current project (namespace)
    #[serde(default = "default_project")]
    pub project: String,

    /// Current application
    #[serde(default = "default_application")]
    pub application: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Catalog file location; `~/` is expanded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,
}

fn default_project() -> String {
    "default".to_string()
}

fn default_application() -> String {
    "app".to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: None,
            project: default_project(),
            application: default_application(),
            timeout_secs: default_timeout_secs(),
            catalog: None,
        }
    }
}

impl Settings {
    /// Path of the settings file in the user's home directory
    pub fn default_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?;

        Ok(home_dir.join(COMPWIZ_DIR).join(CONFIG_FILE))
    }

    /// Load settings, falling back to defaults when the file does not exist
    pub fn load(fs: &dyn FileSystem, path: &Path) -> Result<Self> {
        if !fs.exists(path) {
            tracing::debug!("No settings file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs.read_to_string(path)?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse settings file: {:?}", path))
    }

    /// Apply environment overrides through the given lookup
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(server) = lookup(ENV_SERVER) {
            self.server = Some(server);
        }
        if let Some(project) = lookup(ENV_PROJECT) {
            self.project = project;
        }
        if let Some(application) = lookup(ENV_APPLICATION) {
            self.application = application;
        }
        if let Some(catalog) = lookup(ENV_CATALOG_PATH) {
            self.catalog = Some(catalog);
        }
    }

    /// Validated cluster server URL
    pub fn server_url(&self) -> Result<Url> {
        let Some(server) = &self.server else {
            bail!(
                "No cluster server configured.\n\nSet 'server' in ~/{}/{}, export {} or pass --server.",
                COMPWIZ_DIR,
                CONFIG_FILE,
                ENV_SERVER
            );
        };

        let url = Url::parse(server).with_context(|| format!("Invalid server URL: {}", server))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("Server URL must use http or https: {}", server);
        }
        Ok(url)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Catalog location, defaulting to ~/.compwiz/catalog.yaml
    pub fn catalog_path(&self) -> Result<PathBuf> {
        match &self.catalog {
            Some(path) => Ok(expand_path(path)),
            None => {
                let home_dir = dirs::home_dir()
                    .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?;
                Ok(home_dir.join(COMPWIZ_DIR).join(CATALOG_FILE))
            }
        }
    }
}

/// Expand path with home directory support
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }

    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::MockFileSystem;
    use std::collections::HashMap;

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let fs = MockFileSystem::new();
        let settings = Settings::load(&fs, Path::new("/home/dev/.compwiz/config.yaml")).unwrap();

        assert_eq!(settings, Settings::default());
        assert_eq!(settings.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_load_partial_file() {
        let fs = MockFileSystem::new();
        let path = Path::new("/home/dev/.compwiz/config.yaml");
        fs.add_file(path, "server: https://cluster.example.com\nproject: team-a\n");

        let settings = Settings::load(&fs, path).unwrap();
        assert_eq!(settings.server.as_deref(), Some("https://cluster.example.com"));
        assert_eq!(settings.project, "team-a");
        assert_eq!(settings.application, "app");
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [(ENV_PROJECT, "staging"), (ENV_APPLICATION, "shop")]
            .into_iter()
            .collect();

        let mut settings = Settings::default();
        settings.apply_env(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(settings.project, "staging");
        assert_eq!(settings.application, "shop");
        assert!(settings.server.is_none());
    }

    #[test]
    fn test_server_url_required() {
        let settings = Settings::default();
        assert!(settings.server_url().unwrap_err().to_string().contains("No cluster server"));
    }

    #[test]
    fn test_server_url_scheme() {
        let mut settings = Settings::default();
        settings.server = Some("ftp://cluster".to_string());
        assert!(settings.server_url().is_err());

        settings.server = Some("http://localhost:8443".to_string());
        assert_eq!(settings.server_url().unwrap().port(), Some(8443));
    }

    #[test]
    fn test_expand_path() {
        let path = expand_path("~/catalog.yaml");
        assert!(!path.to_string_lossy().starts_with("~/"));

        assert_eq!(expand_path("/etc/catalog.yaml"), PathBuf::from("/etc/catalog.yaml"));
    }
}
