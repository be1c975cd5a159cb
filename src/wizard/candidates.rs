//! Candidate lists offered to selection prompts
//!
//! Lists are rebuilt on every call; the catalog can change between runs.

use crate::catalog::{ComponentType, DevfileComponentType, StarterProject};
use crate::diagnostics::Diagnostics;

/// Anything that can be offered by name in a selection prompt
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for ComponentType {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for DevfileComponentType {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for StarterProject {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Sorted, deduplicated names of the given items
pub fn names_of<T: Named>(items: &[T]) -> Vec<String> {
    sorted_distinct(items.iter().map(|item| item.name().to_string()))
}

/// Sorted non-hidden tags of the selected component type
///
/// An unknown component type yields an empty list; callers treat that as
/// "nothing to offer" rather than an error.
pub fn tags_for(
    component_types: &[ComponentType],
    selected: &str,
    diagnostics: &dyn Diagnostics,
) -> Vec<String> {
    match component_types.iter().find(|t| t.name == selected) {
        Some(component_type) => sorted_distinct(component_type.non_hidden_tags.iter().cloned()),
        None => {
            diagnostics.debug(&format!(
                "Selected component type {} was not part of the catalog images",
                selected
            ));
            Vec::new()
        }
    }
}

fn sorted_distinct(values: impl Iterator<Item = String>) -> Vec<String> {
    let mut result: Vec<String> = values.collect();
    result.sort();
    result.dedup();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::MockDiagnostics;

    #[test]
    fn test_names_sorted_and_distinct() {
        let types = vec![
            ComponentType::new("python", &[]),
            ComponentType::new("java", &[]),
            ComponentType::new("nodejs", &[]),
            ComponentType::new("java", &["8"]),
        ];

        assert_eq!(names_of(&types), vec!["java", "nodejs", "python"]);
    }

    #[test]
    fn test_names_of_empty() {
        let projects: Vec<StarterProject> = Vec::new();
        assert!(names_of(&projects).is_empty());
    }

    #[test]
    fn test_devfile_type_names() {
        let types = vec![
            DevfileComponentType::new("nodejs"),
            DevfileComponentType::new("java-maven"),
        ];
        assert_eq!(names_of(&types), vec!["java-maven", "nodejs"]);
    }

    #[test]
    fn test_tags_for_selected_type() {
        let diagnostics = MockDiagnostics::new();
        let types = vec![
            ComponentType::new("nodejs", &["latest", "12", "14", "12"]),
            ComponentType::new("python", &["3.8"]),
        ];

        assert_eq!(
            tags_for(&types, "nodejs", &diagnostics),
            vec!["12", "14", "latest"]
        );
        assert!(diagnostics.messages().is_empty());
    }

    #[test]
    fn test_tags_for_unknown_type_is_empty() {
        let diagnostics = MockDiagnostics::new();
        let types = vec![ComponentType::new("nodejs", &["14"])];

        assert!(tags_for(&types, "ruby", &diagnostics).is_empty());
        assert!(diagnostics.contains("ruby was not part of the catalog"));
    }

    #[test]
    fn test_tags_for_type_without_tags() {
        let diagnostics = MockDiagnostics::new();
        let types = vec![ComponentType::new("python", &[])];

        assert!(tags_for(&types, "python", &diagnostics).is_empty());
    }
}
