//! Resolved component descriptors and the source-type mapping

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::diagnostics::Diagnostics;

/// Where a component's source comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Local,
    Binary,
    Git,
    /// Sentinel for "no source"; never offered for selection
    None,
}

impl SourceType {
    /// Source types the user can choose from
    pub const SELECTABLE: [SourceType; 3] = [SourceType::Local, SourceType::Git, SourceType::Binary];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Local => "local",
            SourceType::Binary => "binary",
            SourceType::Git => "git",
            SourceType::None => "none",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bidirectional label <-> source type mapping offered by the source-type prompt
#[derive(Debug, Clone)]
pub struct SourceTypeTable {
    by_label: BTreeMap<String, SourceType>,
}

impl SourceTypeTable {
    pub fn new(source_types: &[SourceType]) -> Self {
        Self {
            by_label: source_types
                .iter()
                .map(|t| (t.to_string(), *t))
                .collect(),
        }
    }

    /// Sorted labels to offer
    pub fn labels(&self) -> Vec<String> {
        self.by_label.keys().cloned().collect()
    }

    /// Map a selected label back to its source type
    ///
    /// Labels come from [`Self::labels`], so a miss means the prompt engine
    /// returned something it was not offered; fall back to `None`.
    pub fn resolve(&self, label: &str, diagnostics: &dyn Diagnostics) -> SourceType {
        debug_assert!(
            self.by_label.contains_key(label),
            "source type label '{}' is not in the table",
            label
        );
        match self.by_label.get(label) {
            Some(source_type) => *source_type,
            None => {
                diagnostics.debug(&format!(
                    "Selected source type {} was not part of the source type options",
                    label
                ));
                SourceType::None
            }
        }
    }
}

impl Default for SourceTypeTable {
    fn default() -> Self {
        Self::new(&SourceType::SELECTABLE)
    }
}

/// Resolved source of a component
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ComponentSource {
    Local { path: String },
    Binary { path: String },
    Git { url: String, reference: String },
    None,
}

impl ComponentSource {
    pub fn source_type(&self) -> SourceType {
        match self {
            ComponentSource::Local { .. } => SourceType::Local,
            ComponentSource::Binary { .. } => SourceType::Binary,
            ComponentSource::Git { .. } => SourceType::Git,
            ComponentSource::None => SourceType::None,
        }
    }
}

/// CPU and memory requests/limits; unset values are left to the cluster
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceLimits {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_memory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_memory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_cpu: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_cpu: Option<String>,
}

impl ResourceLimits {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Fully resolved builder-image component
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedComponentDescriptor {
    pub name: String,
    pub component_type: String,
    /// Empty when the component type has no visible tags
    pub tag: String,
    pub source: ComponentSource,
    pub application: String,
    pub project: String,
    pub ports: Vec<String>,
    pub env_vars: Vec<String>,
    #[serde(skip_serializing_if = "ResourceLimits::is_empty")]
    pub limits: ResourceLimits,
}

/// Fully resolved devfile component
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedDevfileComponent {
    pub name: String,
    pub component_type: String,
    pub project: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starter_project: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::MockDiagnostics;

    #[test]
    fn test_labels_are_sorted() {
        let table = SourceTypeTable::default();
        assert_eq!(table.labels(), vec!["binary", "git", "local"]);
    }

    #[test]
    fn test_every_label_resolves_to_its_source_type() {
        let diagnostics = MockDiagnostics::new();
        let all = [
            SourceType::Local,
            SourceType::Binary,
            SourceType::Git,
            SourceType::None,
        ];
        let table = SourceTypeTable::new(&all);

        for source_type in all {
            assert_eq!(table.resolve(&source_type.to_string(), &diagnostics), source_type);
        }
        assert!(diagnostics.messages().is_empty());
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn test_unknown_label_falls_back_to_none() {
        let diagnostics = MockDiagnostics::new();
        let table = SourceTypeTable::default();

        assert_eq!(table.resolve("svn", &diagnostics), SourceType::None);
        assert!(diagnostics.contains("svn was not part of the source type options"));
    }

    #[test]
    fn test_descriptor_serializes_without_empty_limits() {
        let descriptor = ResolvedComponentDescriptor {
            name: "web".to_string(),
            component_type: "nodejs".to_string(),
            tag: "14".to_string(),
            source: ComponentSource::Git {
                url: "https://github.com/example/web".to_string(),
                reference: "master".to_string(),
            },
            application: "shop".to_string(),
            project: "dev".to_string(),
            ports: vec!["8080".to_string()],
            env_vars: Vec::new(),
            limits: ResourceLimits::default(),
        };

        let json = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(json["source"]["type"], "git");
        assert_eq!(json["componentType"], "nodejs");
        assert!(json.get("limits").is_none());
    }
}
