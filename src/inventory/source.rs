use std::fs;
use std::path::Path;

use serde_json::{Map, Number, Value};
use serde_yaml::Value as YamlValue;
use tracing::{debug, trace_span};

use super::{
    builder::{build_document, BuildOptions},
    error::{ErrorDetails, ErrorLayer, GraphError, Result},
    graph::InventoryGraph,
};

/// The inventory file the viewer loads when nothing else is configured.
pub const DEFAULT_INVENTORY_PATH: &str = "hosts.yml";

fn unsupported_key(key: &YamlValue) -> GraphError {
    GraphError::ParseError(ErrorDetails {
        layer: ErrorLayer::BadInput,
        message: format!("Unsupported mapping key: {:?}", key),
    })
}

/// Mapping keys become strings; scalar keys like `1:` or `true:` keep their
/// YAML spelling.
fn key_text(key: YamlValue) -> Result<String> {
    match key {
        YamlValue::String(s) => Ok(s),
        YamlValue::Null => Ok("null".to_string()),
        YamlValue::Bool(b) => Ok(b.to_string()),
        YamlValue::Number(n) => Ok(n.to_string()),
        YamlValue::Tagged(tagged) => key_text(tagged.value),
        other => Err(unsupported_key(&other)),
    }
}

fn yaml_to_json(value: YamlValue) -> Result<Value> {
    Ok(match value {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(b),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                // .nan and .inf have no JSON number; keep their YAML spelling.
                n.as_f64()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or_else(|| Value::String(n.to_string()))
            }
        }
        YamlValue::String(s) => Value::String(s),
        YamlValue::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<Result<Vec<_>>>()?,
        ),
        YamlValue::Mapping(mapping) => {
            let mut map = Map::new();
            for (key, value) in mapping {
                map.insert(key_text(key)?, yaml_to_json(value)?);
            }
            Value::Object(map)
        }
        YamlValue::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}

/// Parse inventory text into a generic nested mapping.  YAML is a superset of
/// JSON so both are accepted; mapping order is preserved, merge keys
/// (`<<: *anchor`) are resolved and a key repeated within one mapping is a
/// parse error.
pub fn parse_inventory(text: &str) -> Result<Value> {
    let mut document: YamlValue = serde_yaml::from_str(text)?;
    document.apply_merge()?;
    yaml_to_json(document)
}

pub fn load_inventory(path: &Path) -> Result<String> {
    debug!(path = %path.display(), "loading inventory");
    Ok(fs::read_to_string(path)?)
}

/// Parse `text`, pull out `root_name` and build the graph in one go.  This is
/// the unit of work that gets redone from scratch whenever the options change.
pub fn inventory_to_graph(
    text: &str,
    root_name: &str,
    options: &BuildOptions,
) -> Result<InventoryGraph> {
    let span = trace_span!("inventory_to_graph", bytes = text.len());
    let _span_guard = span.enter();

    let document = parse_inventory(text)?;
    build_document(&document, root_name, options)
}
