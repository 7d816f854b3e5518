use serde_json::{Map, Value};

use crate::error::{Result, WorkforceError};
use crate::types::{AgentTool, CatalogMetadata, ToolId, WorkflowCategory};

/// Catalog contents after shape normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedCatalog {
    pub version: Option<String>,
    pub tools: Vec<(Option<ToolId>, AgentTool)>,
    pub categories: Vec<WorkflowCategory>,
    pub metadata: CatalogMetadata,
}

/// Single entry point for every accepted catalog shape:
///
/// * the workflow document `{ categories, ai_tools: { id: tool }, metadata }`
/// * `{ agents: [...] }` or `{ agents: { id: tool } }`
/// * a bare array of tools
/// * a flat `{ name: tool }` map
///
/// Document order is preserved.
///
/// # Errors
/// Returns `WorkforceError::CatalogError` for scalars or malformed tool entries.
pub fn normalize_catalog(document: Value) -> Result<NormalizedCatalog> {
    let mut root = match document {
        Value::Object(root) => root,
        Value::Array(items) => {
            return Ok(NormalizedCatalog {
                tools: parse_list(items)?,
                ..NormalizedCatalog::default()
            })
        }
        other => {
            return Err(WorkforceError::CatalogError(format!(
                "catalog must be a JSON object or array, found {}",
                kind(&other)
            )))
        }
    };

    if let Some(tools) = root.remove("ai_tools") {
        let categories = take_section(&mut root, "categories")?;
        let metadata = take_section(&mut root, "metadata")?;
        let version = root
            .get("version")
            .and_then(Value::as_str)
            .map(ToString::to_string);
        return Ok(NormalizedCatalog {
            version,
            tools: parse_collection(tools)?,
            categories,
            metadata,
        });
    }

    if let Some(agents) = root.remove("agents") {
        return Ok(NormalizedCatalog {
            tools: parse_collection(agents)?,
            ..NormalizedCatalog::default()
        });
    }

    Ok(NormalizedCatalog {
        tools: parse_keyed(root)?,
        ..NormalizedCatalog::default()
    })
}

fn take_section<T>(root: &mut Map<String, Value>, key: &str) -> Result<T>
where
    T: serde::de::DeserializeOwned + Default,
{
    root.remove(key)
        .map(|section| {
            serde_json::from_value(section)
                .map_err(|e| WorkforceError::CatalogError(format!("invalid {key}: {e}")))
        })
        .transpose()
        .map(Option::unwrap_or_default)
}

fn parse_collection(value: Value) -> Result<Vec<(Option<ToolId>, AgentTool)>> {
    match value {
        Value::Object(map) => parse_keyed(map),
        Value::Array(items) => parse_list(items),
        other => Err(WorkforceError::CatalogError(format!(
            "tool collection must be an object or array, found {}",
            kind(&other)
        ))),
    }
}

fn parse_keyed(map: Map<String, Value>) -> Result<Vec<(Option<ToolId>, AgentTool)>> {
    map.into_iter()
        .map(|(key, mut entry)| {
            // Flat name -> tool maps may omit the name inside the entry.
            if let Value::Object(fields) = &mut entry {
                fields
                    .entry("name")
                    .or_insert_with(|| Value::String(key.clone()));
            }
            parse_tool(entry, &key).map(|tool| (Some(ToolId::new(key)), tool))
        })
        .collect()
}

fn parse_list(items: Vec<Value>) -> Result<Vec<(Option<ToolId>, AgentTool)>> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, entry)| parse_tool(entry, &format!("#{index}")).map(|tool| (None, tool)))
        .collect()
}

fn parse_tool(entry: Value, label: &str) -> Result<AgentTool> {
    serde_json::from_value(entry)
        .map_err(|e| WorkforceError::CatalogError(format!("tool {label}: {e}")))
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
