//! The in-memory configuration tree.
//!
//! A configuration document is a [`ConfigNode`]: nested maps, ordered
//! sequences and scalars. Trees are plain data, produced fresh from backend
//! reads, and never contain cycles.
//!
//! Navigation by [`Path`] is provided here; depth-first traversal of every
//! map in a tree lives in [`walk`].

pub mod path;
pub mod walk;

use std::collections::HashMap;

pub use path::{Path, PathError, Step};
pub use walk::{Walk, referable_nodes};

use crate::backend::ConfigError;

/// Children of a map node. Key order carries no meaning.
pub type ConfigMap = HashMap<String, ConfigNode>;

/// A node in a configuration tree.
///
/// Serializes to and from plain JSON. Numbers keep their JSON
/// representation so that integer and floating point values survive a round
/// trip unchanged.
///
/// ```
/// # use confstore::tree::ConfigNode;
/// let node = ConfigNode::map([("name", ConfigNode::from("dev1")), ("port", ConfigNode::from(104i64))]);
/// assert_eq!(node.get("name").and_then(|n| n.as_text()), Some("dev1"));
/// assert_eq!(node.get("port").and_then(|n| n.as_i64()), Some(104));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum ConfigNode {
    /// Absent / null scalar
    #[default]
    Null,
    /// Boolean scalar
    Bool(bool),
    /// Numeric scalar
    Number(serde_json::Number),
    /// Text scalar
    Text(String),
    /// Ordered list of nodes
    Sequence(Vec<ConfigNode>),
    /// String-keyed children
    Map(ConfigMap),
}

impl ConfigNode {
    /// Creates an empty map node.
    pub fn empty_map() -> Self {
        ConfigNode::Map(ConfigMap::new())
    }

    /// Creates a map node from key/value pairs.
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, ConfigNode)>,
    {
        ConfigNode::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Creates a sequence node.
    pub fn sequence(items: impl IntoIterator<Item = ConfigNode>) -> Self {
        ConfigNode::Sequence(items.into_iter().collect())
    }

    pub fn is_map(&self) -> bool {
        matches!(self, ConfigNode::Map(_))
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, ConfigNode::Sequence(_))
    }

    /// Returns true for every variant that is neither a map nor a sequence.
    pub fn is_scalar(&self) -> bool {
        !self.is_map() && !self.is_sequence()
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ConfigNode::Null)
    }

    /// Returns the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            ConfigNode::Null => "null",
            ConfigNode::Bool(_) => "bool",
            ConfigNode::Number(_) => "number",
            ConfigNode::Text(_) => "text",
            ConfigNode::Sequence(_) => "sequence",
            ConfigNode::Map(_) => "map",
        }
    }

    pub fn as_map(&self) -> Option<&ConfigMap> {
        match self {
            ConfigNode::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut ConfigMap> {
        match self {
            ConfigNode::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[ConfigNode]> {
        match self {
            ConfigNode::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ConfigNode::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigNode::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ConfigNode::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// Looks up a direct child of a map node.
    pub fn get(&self, key: &str) -> Option<&ConfigNode> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Sets a direct child of a map node, returning the previous value.
    ///
    /// Returns `None` without modification if this is not a map.
    pub fn insert(&mut self, key: impl Into<String>, value: ConfigNode) -> Option<ConfigNode> {
        self.as_map_mut().and_then(|map| map.insert(key.into(), value))
    }

    /// Removes a direct child of a map node.
    pub fn remove(&mut self, key: &str) -> Option<ConfigNode> {
        self.as_map_mut().and_then(|map| map.remove(key))
    }

    /// Resolves a path relative to this node.
    pub fn get_path(&self, path: &Path) -> Option<&ConfigNode> {
        path.steps()
            .iter()
            .try_fold(self, |node, step| node.child(step))
    }

    /// Resolves a path relative to this node, mutably.
    pub fn get_path_mut(&mut self, path: &Path) -> Option<&mut ConfigNode> {
        let mut node = self;
        for step in path.steps() {
            node = match (node, step) {
                (ConfigNode::Map(map), Step::Key(key)) => map.get_mut(key)?,
                (ConfigNode::Sequence(items), Step::Index(index)) => items.get_mut(*index)?,
                _ => return None,
            };
        }
        Some(node)
    }

    /// Replaces the subtree at `path` with `value`.
    ///
    /// Missing intermediate map entries, and null nodes addressed by a key
    /// step, are created as empty maps. An index
    /// step may address an existing element or, as the final step only, the
    /// position one past the end of a sequence (append).
    ///
    /// On error the tree is left untouched.
    pub fn set_path(&mut self, path: &Path, value: ConfigNode) -> Result<(), ConfigError> {
        self.check_settable(path)?;
        let Some((last, parents)) = path.steps().split_last() else {
            *self = value;
            return Ok(());
        };

        let mut node = self;
        for (depth, step) in parents.iter().enumerate() {
            promote_null(node, step);
            node = match (node, step) {
                (ConfigNode::Map(map), Step::Key(key)) => {
                    map.entry(key.clone()).or_insert_with(ConfigNode::empty_map)
                }
                (ConfigNode::Sequence(items), Step::Index(index)) => {
                    let len = items.len();
                    items.get_mut(*index).ok_or_else(|| {
                        invalid_path(path, format!("index {index} out of bounds at depth {depth} (len {len})"))
                    })?
                }
                (other, step) => {
                    return Err(invalid_path(
                        path,
                        format!("cannot step into {} with '{step}'", other.type_name()),
                    ));
                }
            };
        }

        promote_null(node, last);
        match (node, last) {
            (ConfigNode::Map(map), Step::Key(key)) => {
                map.insert(key.clone(), value);
                Ok(())
            }
            (ConfigNode::Sequence(items), Step::Index(index)) => {
                if *index < items.len() {
                    items[*index] = value;
                    Ok(())
                } else if *index == items.len() {
                    items.push(value);
                    Ok(())
                } else {
                    Err(invalid_path(
                        path,
                        format!("index {index} out of bounds (len {})", items.len()),
                    ))
                }
            }
            (other, step) => Err(invalid_path(
                path,
                format!("cannot step into {} with '{step}'", other.type_name()),
            )),
        }
    }

    /// Dry run of [`set_path`](ConfigNode::set_path) navigation.
    fn check_settable(&self, path: &Path) -> Result<(), ConfigError> {
        let steps = path.steps();
        // `None` once navigation has left the existing tree; from there on
        // only fresh maps get created.
        let mut node = Some(self);
        for (depth, step) in steps.iter().enumerate() {
            let is_last = depth + 1 == steps.len();
            node = match (node, step) {
                (None | Some(ConfigNode::Null), Step::Key(_)) => None,
                (Some(ConfigNode::Map(map)), Step::Key(key)) => map.get(key),
                (Some(ConfigNode::Sequence(items)), Step::Index(index)) => {
                    if *index < items.len() {
                        items.get(*index)
                    } else if is_last && *index == items.len() {
                        None
                    } else {
                        return Err(invalid_path(
                            path,
                            format!("index {index} out of bounds at depth {depth} (len {})", items.len()),
                        ));
                    }
                }
                (existing, step) => {
                    let type_name = existing.map_or("map", ConfigNode::type_name);
                    return Err(invalid_path(
                        path,
                        format!("cannot step into {type_name} with '{step}'"),
                    ));
                }
            };
        }
        Ok(())
    }

    /// Detaches and returns the subtree at `path`.
    ///
    /// Removing a sequence element shifts every later element down by one.
    /// Removing the root resets this node to [`ConfigNode::Null`].
    pub fn remove_path(&mut self, path: &Path) -> Option<ConfigNode> {
        let Some(parent_path) = path.parent() else {
            return Some(std::mem::take(self));
        };
        let parent = self.get_path_mut(&parent_path)?;
        match (parent, path.last()?) {
            (ConfigNode::Map(map), Step::Key(key)) => map.remove(key),
            (ConfigNode::Sequence(items), Step::Index(index)) if *index < items.len() => {
                Some(items.remove(*index))
            }
            _ => None,
        }
    }

    fn child(&self, step: &Step) -> Option<&ConfigNode> {
        match (self, step) {
            (ConfigNode::Map(map), Step::Key(key)) => map.get(key),
            (ConfigNode::Sequence(items), Step::Index(index)) => items.get(*index),
            _ => None,
        }
    }

    /// Walks every map node of this tree, rooted at `base`.
    pub fn walk<'a>(&'a self, base: &Path) -> Walk<'a> {
        Walk::new(self, base.clone())
    }
}

fn promote_null(node: &mut ConfigNode, step: &Step) {
    if node.is_null() && matches!(step, Step::Key(_)) {
        *node = ConfigNode::empty_map();
    }
}

fn invalid_path(path: &Path, reason: String) -> ConfigError {
    ConfigError::InvalidPath {
        path: path.clone(),
        reason,
    }
}

impl From<&str> for ConfigNode {
    fn from(s: &str) -> Self {
        ConfigNode::Text(s.to_string())
    }
}

impl From<String> for ConfigNode {
    fn from(s: String) -> Self {
        ConfigNode::Text(s)
    }
}

impl From<bool> for ConfigNode {
    fn from(b: bool) -> Self {
        ConfigNode::Bool(b)
    }
}

impl From<i64> for ConfigNode {
    fn from(n: i64) -> Self {
        ConfigNode::Number(n.into())
    }
}

impl From<i32> for ConfigNode {
    fn from(n: i32) -> Self {
        ConfigNode::Number(i64::from(n).into())
    }
}

impl From<u64> for ConfigNode {
    fn from(n: u64) -> Self {
        ConfigNode::Number(n.into())
    }
}

impl From<Vec<ConfigNode>> for ConfigNode {
    fn from(items: Vec<ConfigNode>) -> Self {
        ConfigNode::Sequence(items)
    }
}

impl From<ConfigMap> for ConfigNode {
    fn from(map: ConfigMap) -> Self {
        ConfigNode::Map(map)
    }
}

impl From<serde_json::Value> for ConfigNode {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => ConfigNode::Null,
            serde_json::Value::Bool(b) => ConfigNode::Bool(b),
            serde_json::Value::Number(n) => ConfigNode::Number(n),
            serde_json::Value::String(s) => ConfigNode::Text(s),
            serde_json::Value::Array(items) => {
                ConfigNode::Sequence(items.into_iter().map(ConfigNode::from).collect())
            }
            serde_json::Value::Object(map) => {
                ConfigNode::Map(map.into_iter().map(|(k, v)| (k, ConfigNode::from(v))).collect())
            }
        }
    }
}

impl From<ConfigNode> for serde_json::Value {
    fn from(node: ConfigNode) -> Self {
        match node {
            ConfigNode::Null => serde_json::Value::Null,
            ConfigNode::Bool(b) => serde_json::Value::Bool(b),
            ConfigNode::Number(n) => serde_json::Value::Number(n),
            ConfigNode::Text(s) => serde_json::Value::String(s),
            ConfigNode::Sequence(items) => {
                serde_json::Value::Array(items.into_iter().map(serde_json::Value::from).collect())
            }
            ConfigNode::Map(map) => serde_json::Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}
