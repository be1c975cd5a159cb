use super::{GlobalArgs, OutputFormat, load_catalog, load_settings, render};
use crate::context::Context;
use crate::wizard::candidates::{names_of, tags_for};
use anyhow::Result;

/// Handles the 'catalog' command - lists the candidates offered by the wizard
pub struct CatalogCommand;

impl CatalogCommand {
    /// Execute the catalog command
    pub fn execute(ctx: &Context, globals: &GlobalArgs, format: OutputFormat) -> Result<()> {
        let settings = load_settings(ctx, globals)?;
        let catalog = load_catalog(ctx, &settings)?;

        if let Some(rendered) = render(&catalog, format)? {
            println!("{}", rendered.trim_end());
            return Ok(());
        }

        if catalog.component_types.is_empty() && catalog.devfile_component_types.is_empty() {
            ctx.output.warning("The catalog does not define any component types");
            return Ok(());
        }

        ctx.output.section("Component types");
        if catalog.component_types.is_empty() {
            ctx.output.dimmed("  None defined");
        }
        for name in names_of(&catalog.component_types) {
            let tags = tags_for(&catalog.component_types, &name, &*ctx.diagnostics);
            if tags.is_empty() {
                ctx.output.list_item(&name);
            } else {
                ctx.output.list_item(&format!("{} ({})", name, tags.join(", ")));
            }
        }

        ctx.output.section("Devfile component types");
        if catalog.devfile_component_types.is_empty() {
            ctx.output.dimmed("  None defined");
        }
        for name in names_of(&catalog.devfile_component_types) {
            let Some(devfile_type) = catalog.devfile_component_type(&name) else {
                continue;
            };

            match &devfile_type.description {
                Some(description) => ctx.output.list_item(&format!("{} - {}", name, description)),
                None => ctx.output.list_item(&name),
            }

            let starters = names_of(&devfile_type.starter_projects);
            if !starters.is_empty() {
                ctx.output.dimmed(&format!("    starter projects: {}", starters.join(", ")));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::MockClusterClient;
    use crate::commands::test_support::{CATALOG_PATH, harness};
    use crate::traits::OutputMessage;

    #[test]
    fn test_lists_sorted_candidates() {
        let h = harness(Vec::new(), MockClusterClient::new());
        let globals = GlobalArgs {
            catalog: Some(CATALOG_PATH.to_string()),
            ..Default::default()
        };

        CatalogCommand::execute(&h.ctx, &globals, OutputFormat::Text).unwrap();

        let items: Vec<String> = h
            .output
            .messages()
            .into_iter()
            .filter_map(|m| match m {
                OutputMessage::ListItem(item) => Some(item),
                _ => None,
            })
            .collect();
        assert_eq!(
            items,
            vec!["nodejs (14, latest)", "python (3.8)", "go", "java-maven - Maven project"]
        );
        assert!(h.output.contains(&OutputMessage::Dimmed(
            "    starter projects: springboot".to_string()
        )));
        assert!(h.diagnostics.messages().is_empty());
    }

    #[test]
    fn test_empty_catalog_warns() {
        let h = harness(Vec::new(), MockClusterClient::new());
        h.fs.add_file("/home/dev/empty.yaml", "apiVersion: compwiz.io/v1\nkind: Catalog\nspec: {}\n");
        let globals = GlobalArgs {
            catalog: Some("/home/dev/empty.yaml".to_string()),
            ..Default::default()
        };

        CatalogCommand::execute(&h.ctx, &globals, OutputFormat::Text).unwrap();

        assert_eq!(
            h.output.messages(),
            vec![OutputMessage::Warning(
                "The catalog does not define any component types".to_string()
            )]
        );
    }

    #[test]
    fn test_missing_catalog_fails() {
        let h = harness(Vec::new(), MockClusterClient::new());
        let globals = GlobalArgs {
            catalog: Some("/nowhere/catalog.yaml".to_string()),
            ..Default::default()
        };

        let err = CatalogCommand::execute(&h.ctx, &globals, OutputFormat::Text).unwrap_err();
        assert!(err.to_string().contains("Catalog file not found"));
    }
}
