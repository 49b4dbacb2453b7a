//! Canonical configuration tree and its dotted-path view

use crate::util::OrderedMap;
use serde::Serialize;

/// A nested configuration mapping, keys in document order
pub type ConfigTree = OrderedMap<ConfigValue>;

/// Leaf values addressed by full dotted path (`spring.kafka.bootstrap-servers`)
pub type FlatConfig = OrderedMap<String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Scalar(String),
    List(Vec<ConfigValue>),
    Map(ConfigTree),
}

impl ConfigValue {
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            ConfigValue::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&ConfigTree> {
        match self {
            ConfigValue::Map(m) => Some(m),
            _ => None,
        }
    }
}

/// Flattens a tree into dotted paths. Sequence items become `path[index]`;
/// a sequence of scalars is also joined with `,` under its own path.
pub fn flatten(tree: &ConfigTree) -> FlatConfig {
    let mut flat = FlatConfig::new();
    flatten_map(tree, "", &mut flat);
    flat
}

fn flatten_map(tree: &ConfigTree, prefix: &str, flat: &mut FlatConfig) {
    for (key, value) in tree.iter() {
        let path = if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", prefix, key)
        };
        flatten_value(value, path, flat);
    }
}

fn flatten_value(value: &ConfigValue, path: String, flat: &mut FlatConfig) {
    match value {
        ConfigValue::Scalar(s) => {
            flat.insert(path, s.clone());
        }
        ConfigValue::Map(m) => flatten_map(m, &path, flat),
        ConfigValue::List(items) => {
            // A list of scalars also binds to its own path as a comma-separated value
            let scalars: Option<Vec<&str>> = items.iter().map(ConfigValue::as_scalar).collect();
            if let Some(scalars) = scalars.filter(|s| !s.is_empty()) {
                flat.insert(path.clone(), scalars.join(","));
            }
            for (idx, item) in items.iter().enumerate() {
                flatten_value(item, format!("{}[{}]", path, idx), flat);
            }
        }
    }
}

/// Walks nested mappings one segment at a time.
pub fn get_path<'a>(tree: &'a ConfigTree, path: &str) -> Option<&'a ConfigValue> {
    let mut segments = path.split('.');
    let mut current = tree.get(segments.next()?)?;
    for segment in segments {
        current = current.as_map()?.get(segment)?;
    }
    Some(current)
}

/// Sets a scalar at `path`, creating intermediate mappings. A scalar standing
/// where a mapping is needed is replaced, so the later write wins.
pub fn insert_path(tree: &mut ConfigTree, path: &[&str], value: String) {
    let Some((last, parents)) = path.split_last() else {
        return;
    };

    let mut current = tree;
    for segment in parents {
        let slot = current.entry_or_insert_with(segment, || ConfigValue::Map(ConfigTree::new()));
        if slot.as_map().is_none() {
            *slot = ConfigValue::Map(ConfigTree::new());
        }
        let ConfigValue::Map(next) = slot else {
            return;
        };
        current = next;
    }
    current.insert(*last, ConfigValue::Scalar(value));
}

/// Deep-merges `overlay` into `base`; overlay values win except where both sides are mappings.
pub fn merge(base: &mut ConfigTree, overlay: ConfigTree) {
    for (key, value) in overlay.iter() {
        match (base.get_mut(key), value) {
            (Some(ConfigValue::Map(existing)), ConfigValue::Map(incoming)) => {
                merge(existing, incoming.clone());
            }
            _ => {
                base.insert(key, value.clone());
            }
        }
    }
}
