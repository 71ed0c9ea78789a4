//! Output formatting for resolved configurations.

use crate::config::{Configuration, ParameterSchema, WorkflowDefinition};
use anyhow::Result;

/// Output format for `show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Yaml,
    Json,
    Markdown,
}

/// Render a configuration in the requested format.
pub fn format_configuration(config: &Configuration, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Yaml => config.to_yaml()?,
        OutputFormat::Json => serde_json::to_string_pretty(config)?,
        OutputFormat::Markdown => format_configuration_markdown(config),
    })
}

/// Format a configuration as markdown: connection settings, then each workflow by name.
pub fn format_configuration_markdown(config: &Configuration) -> String {
    let conn = &config.connection;
    let mut md = String::new();

    md.push_str("# Temporal Connection\n");
    md.push_str(&format!("- **hostPort**: `{}`\n", conn.host_port));
    md.push_str(&format!("- **namespace**: {}\n", conn.namespace));
    md.push_str(&format!("- **environment**: {}\n", conn.environment));
    md.push_str(&format!("- **timeout**: {}\n", conn.timeout));
    if !conn.default_task_queue.is_empty() {
        md.push_str(&format!(
            "- **defaultTaskQueue**: {}\n",
            conn.default_task_queue
        ));
    }

    md.push_str(&format!("\n# Workflows ({})\n", config.workflows.len()));
    for name in config.workflow_names() {
        if let Some(wf) = config.workflow(name) {
            md.push('\n');
            md.push_str(&format_workflow_markdown(name, wf));
        }
    }

    md
}

/// Format a single workflow definition as markdown.
pub fn format_workflow_markdown(name: &str, wf: &WorkflowDefinition) -> String {
    let mut md = String::new();

    md.push_str(&format!("## Workflow: {}\n", name));
    if !wf.purpose.is_empty() {
        md.push_str(&format!("{}\n\n", wf.purpose.trim_end()));
    }
    if !wf.task_queue.is_empty() {
        md.push_str(&format!("- **taskQueue**: {}\n", wf.task_queue));
    }
    if !wf.workflow_id_recipe.is_empty() {
        md.push_str(&format!(
            "- **workflowIDRecipe**: `{}`\n",
            wf.workflow_id_recipe
        ));
    }

    md.push_str(&format_schema_markdown("Input", &wf.input));
    md.push_str(&format_schema_markdown("Output", &wf.output));

    md
}

fn format_schema_markdown(title: &str, schema: &ParameterSchema) -> String {
    if schema.kind.is_empty() && schema.fields.is_empty() && schema.description.is_empty() {
        return String::new();
    }

    let mut md = format!("\n### {}", title);
    if !schema.kind.is_empty() {
        md.push_str(&format!(" (`{}`)", schema.kind));
    }
    md.push('\n');

    if !schema.description.is_empty() {
        md.push_str(&format!("{}\n", schema.description));
    }
    for field in &schema.fields {
        for (name, desc) in field {
            md.push_str(&format!("- `{}`: {}\n", name, desc));
        }
    }

    md
}

/// One line per workflow: name, task queue and purpose.
pub fn format_workflow_list(config: &Configuration) -> String {
    let default_queue = &config.connection.default_task_queue;
    let mut out = String::new();

    for name in config.workflow_names() {
        let Some(wf) = config.workflow(name) else {
            continue;
        };
        let queue = if wf.task_queue.is_empty() {
            default_queue.as_str()
        } else {
            wf.task_queue.as_str()
        };
        let purpose = wf.purpose.lines().next().unwrap_or("");
        out.push_str(&format!("{}\t{}\t{}\n", name, queue, purpose));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn sample_config() -> Configuration {
        let mut config = Configuration::empty();
        config.connection.host_port = "localhost:7233".to_string();
        config.connection.namespace = "default".to_string();
        config.connection.environment = "local".to_string();
        config.connection.timeout = "5s".to_string();
        config.connection.default_task_queue = "fallback-queue".to_string();

        config.workflows.insert(
            "GreetUser".to_string(),
            WorkflowDefinition {
                purpose: "Says hello.\nSecond line.".to_string(),
                input: ParameterSchema {
                    kind: "GreetRequest".to_string(),
                    fields: vec![BTreeMap::from([(
                        "name".to_string(),
                        "Who to greet".to_string(),
                    )])],
                    description: String::new(),
                },
                output: ParameterSchema::default(),
                task_queue: "greetings".to_string(),
                workflow_id_recipe: "greet_{{ .name }}".to_string(),
            },
        );
        config
            .workflows
            .insert("Cleanup".to_string(), WorkflowDefinition::default());
        config
    }

    #[test]
    fn test_markdown_lists_workflows_sorted() {
        let md = format_configuration_markdown(&sample_config());

        assert!(md.contains("- **hostPort**: `localhost:7233`"));
        assert!(md.contains("- **defaultTaskQueue**: fallback-queue"));
        assert!(md.contains("# Workflows (2)"));
        let cleanup = md.find("## Workflow: Cleanup").unwrap();
        let greet = md.find("## Workflow: GreetUser").unwrap();
        assert!(cleanup < greet);
        assert!(md.contains("### Input (`GreetRequest`)"));
        assert!(md.contains("- `name`: Who to greet"));
        assert!(!md.contains("### Output"));
    }

    #[test]
    fn test_workflow_list_falls_back_to_default_queue() {
        let list = format_workflow_list(&sample_config());
        let lines: Vec<&str> = list.lines().collect();

        assert_eq!(lines, vec!["Cleanup\tfallback-queue\t", "GreetUser\tgreetings\tSays hello."]);
    }

    #[test]
    fn test_json_output_uses_wire_names() {
        let json = format_configuration(&sample_config(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["temporal"]["hostPort"], "localhost:7233");
        assert_eq!(
            value["workflows"]["GreetUser"]["workflowIDRecipe"],
            "greet_{{ .name }}"
        );
        assert_eq!(value["workflows"]["GreetUser"]["input"]["type"], "GreetRequest");
    }
}
