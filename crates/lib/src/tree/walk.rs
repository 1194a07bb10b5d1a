//! Depth-first traversal over the map nodes of a tree.
//!
//! [`Walk`] yields `(Path, &ConfigMap)` for every map node, pre-order,
//! including the starting node and maps nested inside sequences. It is lazy:
//! nothing below a node is visited until the caller pulls that far.
//!
//! Children of a map are visited in unspecified order. Children of a sequence
//! are visited in sequence order, and their position becomes the `#n` step
//! of every descendant path.

use uuid::Uuid;

use super::{ConfigMap, ConfigNode, Path, Step};

/// Pre-order iterator over the map nodes of a tree.
#[derive(Debug)]
pub struct Walk<'a> {
    stack: Vec<(Path, &'a ConfigNode)>,
}

impl<'a> Walk<'a> {
    /// Starts a walk at `node`, whose own location is `base`.
    pub fn new(node: &'a ConfigNode, base: Path) -> Self {
        Self {
            stack: vec![(base, node)],
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = (Path, &'a ConfigMap);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((path, node)) = self.stack.pop() {
            match node {
                ConfigNode::Map(map) => {
                    for (key, child) in map {
                        if !child.is_scalar() {
                            self.stack.push((path.child(key), child));
                        }
                    }
                    return Some((path, map));
                }
                ConfigNode::Sequence(items) => {
                    // Reverse so that element 0 is popped first.
                    for (index, child) in items.iter().enumerate().rev() {
                        if !child.is_scalar() {
                            self.stack.push((path.child(Step::Index(index)), child));
                        }
                    }
                }
                _ => {}
            }
        }
        None
    }
}

/// Yields `(identifier, path)` for every referable map under `node`.
///
/// A map is referable when `identifier_field` holds text that parses as a
/// UUID. Any other value under that field is skipped with a warning.
pub fn referable_nodes<'a>(
    node: &'a ConfigNode,
    base: &Path,
    identifier_field: &'a str,
) -> impl Iterator<Item = (Uuid, Path)> + 'a {
    Walk::new(node, base.clone()).filter_map(move |(path, map)| {
        let value = map.get(identifier_field)?;
        match value.as_text().map(Uuid::parse_str) {
            Some(Ok(uuid)) => Some((uuid, path)),
            _ => {
                tracing::warn!(
                    path = %path,
                    field = identifier_field,
                    value_type = value.type_name(),
                    "Ignoring identifier field that is not a UUID"
                );
                None
            }
        }
    })
}
