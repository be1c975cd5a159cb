//! Component catalog
//!
//! The catalog lists the builder images (component types with their visible
//! tags) and devfile component types a cluster offers. It is read from a YAML
//! resource file:
//!
//! ```yaml
//! apiVersion: compwiz.io/v1
//! kind: Catalog
//! spec:
//!   componentTypes:
//!     - name: nodejs
//!       nonHiddenTags: ["12", "14", "latest"]
//!   devfileComponentTypes:
//!     - name: java-springboot
//!       description: Spring Boot using Java
//!       starterProjects:
//!         - name: springbootproject
//! ```

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::traits::FileSystem;

const CATALOG_API_VERSION: &str = "compwiz.io/v1";
const CATALOG_KIND: &str = "Catalog";

/// Catalog resource (Kubernetes-style)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogResource {
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    pub kind: String,
    #[serde(default)]
    pub spec: Catalog,
}

/// Everything the wizard can offer for selection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(default)]
    pub component_types: Vec<ComponentType>,
    #[serde(default)]
    pub devfile_component_types: Vec<DevfileComponentType>,
}

/// A builder image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentType {
    pub name: String,
    #[serde(default)]
    pub non_hidden_tags: Vec<String>,
}

/// A devfile-based component type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevfileComponentType {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub starter_projects: Vec<StarterProject>,
}

/// Sample project a devfile component can be initialized from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarterProject {
    pub name: String,
}

#[cfg(test)]
impl ComponentType {
    pub fn new(name: &str, tags: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            non_hidden_tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }
}

#[cfg(test)]
impl DevfileComponentType {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            starter_projects: Vec::new(),
        }
    }

    pub fn with_starter_projects(mut self, names: &[&str]) -> Self {
        self.starter_projects = names
            .iter()
            .map(|n| StarterProject {
                name: n.to_string(),
            })
            .collect();
        self
    }
}

impl Catalog {
    /// Load the catalog from a YAML resource file
    pub fn load(fs: &dyn FileSystem, path: &Path) -> Result<Self> {
        if !fs.exists(path) {
            bail!(
                "Catalog file not found: {:?}\n\nPass --catalog or set COMPWIZ_CATALOG_PATH to point at a catalog file.",
                path
            );
        }

        let content = fs.read_to_string(path)?;
        Self::from_yaml(&content).with_context(|| format!("Failed to parse catalog file: {:?}", path))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let resource: CatalogResource =
            serde_yaml::from_str(content).context("Catalog is not valid YAML")?;

        if resource.api_version != CATALOG_API_VERSION || resource.kind != CATALOG_KIND {
            bail!(
                "Unsupported catalog resource {}/{} (expected {}/{})",
                resource.api_version,
                resource.kind,
                CATALOG_API_VERSION,
                CATALOG_KIND
            );
        }

        Ok(resource.spec)
    }

    /// Find a devfile component type by exact name
    pub fn devfile_component_type(&self, name: &str) -> Option<&DevfileComponentType> {
        self.devfile_component_types.iter().find(|t| t.name == name)
    }
}
