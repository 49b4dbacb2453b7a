//! Structured (YAML) configuration parsing

use super::tree::{merge, ConfigTree, ConfigValue};
use super::ParseError;
use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use tracing::debug;

/// Parses every document in `content` and deep-merges them in order.
pub fn parse_tree(content: &str) -> Result<ConfigTree, ParseError> {
    let mut tree = ConfigTree::new();

    for (idx, document) in serde_yaml::Deserializer::from_str(content).enumerate() {
        match untag(Value::deserialize(document)?) {
            Value::Null => debug!(document = idx, "Skipping empty YAML document"),
            Value::Mapping(mapping) => merge(&mut tree, convert_mapping(mapping)),
            _ => return Err(ParseError::NotAMapping),
        }
    }

    Ok(tree)
}

fn untag(value: Value) -> Value {
    match value {
        Value::Tagged(tagged) => untag(tagged.value),
        other => other,
    }
}

fn convert_mapping(mapping: Mapping) -> ConfigTree {
    let mut tree = ConfigTree::new();
    for (key, value) in mapping {
        match scalar_text(&untag(key)) {
            Some(key) => {
                tree.insert(key, convert_value(value));
            }
            None => debug!("Skipping YAML entry with a non-scalar key"),
        }
    }
    tree
}

fn convert_value(value: Value) -> ConfigValue {
    match untag(value) {
        Value::Mapping(mapping) => ConfigValue::Map(convert_mapping(mapping)),
        Value::Sequence(items) => ConfigValue::List(items.into_iter().map(convert_value).collect()),
        scalar => ConfigValue::Scalar(scalar_text(&scalar).unwrap_or_default()),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}
