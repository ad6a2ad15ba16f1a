//! Flattened document representation.
//!
//! Documents are matched and mutated as a [`FlatMap`] keyed by dotted paths
//! (`buttons.cancel`, `items.0`). [`unflatten`] rebuilds a [`Node`] tree and infers
//! sequences from contiguous integer keys.

use serde_json::{
    Map,
    Value,
};

/// Path separator used in flat keys.
pub const SEPARATOR: char = '.';

/// Wrapper marking an inherited, not yet translated value (`$text$`).
const PLACEHOLDER_MARK: char = '$';

/// Returns the placeholder form of a phrase.
#[must_use]
pub fn placeholder(phrase: &str) -> String {
    format!("{PLACEHOLDER_MARK}{phrase}{PLACEHOLDER_MARK}")
}

/// Returns true if the value is a string wrapped in `$...$`.
#[must_use]
pub fn is_placeholder(value: &Value) -> bool {
    value.as_str().is_some_and(|s| {
        s.len() >= 2 && s.starts_with(PLACEHOLDER_MARK) && s.ends_with(PLACEHOLDER_MARK)
    })
}

/// Returns true if `text` is the phrase itself or its placeholder form.
fn matches_phrase(text: &str, phrase: &str) -> bool {
    text == phrase
        || text
            .strip_prefix(PLACEHOLDER_MARK)
            .and_then(|rest| rest.strip_suffix(PLACEHOLDER_MARK))
            .is_some_and(|inner| inner == phrase)
}

/// Insertion-ordered mapping from dotted path to leaf value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatMap(Map<String, Value>);

impl FlatMap {
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        self.0.get(path)
    }

    #[must_use]
    pub fn contains_key(&self, path: &str) -> bool {
        self.0.contains_key(path)
    }

    /// Inserts or overwrites a leaf. Existing entries keep their position.
    pub fn insert(&mut self, path: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(path.into(), value)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Keeps only the entries for which `keep` returns true, preserving order.
    pub fn retain(&mut self, keep: impl FnMut(&String, &mut Value) -> bool) {
        self.0.retain(keep);
    }

    /// Paths whose string value is `phrase` or `$phrase$`.
    #[must_use]
    pub fn paths_with_value(&self, phrase: &str) -> Vec<String> {
        self.0
            .iter()
            .filter(|(_, value)| value.as_str().is_some_and(|text| matches_phrase(text, phrase)))
            .map(|(path, _)| path.clone())
            .collect()
    }

    /// Paths with at least one segment equal to `phrase` or `$phrase$`.
    #[must_use]
    pub fn paths_with_segment(&self, phrase: &str) -> Vec<String> {
        self.0
            .keys()
            .filter(|path| path.split(SEPARATOR).any(|segment| matches_phrase(segment, phrase)))
            .cloned()
            .collect()
    }

    /// Moves the value at `from` to `to`, keeping its position in the map.
    ///
    /// If `to` already exists, that entry is replaced and the moved value takes its slot.
    /// Returns false when `from` is absent or equal to `to`.
    pub fn rename(&mut self, from: &str, to: &str) -> bool {
        if from == to || !self.0.contains_key(from) {
            return false;
        }

        let entries = std::mem::take(&mut self.0);
        let moved = entries.get(from).cloned();
        self.0 = entries
            .into_iter()
            .filter_map(|(path, value)| {
                if path == from {
                    Some((to.to_string(), value))
                } else if path == to {
                    moved.clone().map(|moved| (path, moved))
                } else {
                    Some((path, value))
                }
            })
            .collect();
        true
    }
}

impl FromIterator<(String, Value)> for FlatMap {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Document tree with explicit array inference.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Scalar value, or an empty object/array kept verbatim.
    Leaf(Value),
    /// Keyed mapping in insertion order.
    Map(Vec<(String, Node)>),
    /// Mapping whose keys were exactly `0..n`.
    Sequence(Vec<Node>),
}

impl Node {
    /// Rewrites every mapping keyed `"0".."n-1"` into a sequence, children first.
    #[must_use]
    pub fn infer_sequences(self) -> Self {
        match self {
            Self::Map(entries) => {
                let entries: Vec<(String, Self)> = entries
                    .into_iter()
                    .map(|(key, child)| (key, child.infer_sequences()))
                    .collect();

                let is_sequence = !entries.is_empty()
                    && entries.iter().enumerate().all(|(index, (key, _))| *key == index.to_string());

                if is_sequence {
                    Self::Sequence(entries.into_iter().map(|(_, child)| child).collect())
                } else {
                    Self::Map(entries)
                }
            }
            Self::Sequence(items) => {
                Self::Sequence(items.into_iter().map(Self::infer_sequences).collect())
            }
            leaf @ Self::Leaf(_) => leaf,
        }
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        match node {
            Node::Leaf(value) => value,
            Node::Map(entries) => {
                Self::Object(entries.into_iter().map(|(key, child)| (key, child.into())).collect())
            }
            Node::Sequence(items) => Self::Array(items.into_iter().map(Into::into).collect()),
        }
    }
}

/// Flattens a JSON tree into dotted paths.
///
/// Sequences contribute their index as the path segment. Empty objects and arrays are
/// recorded as leaves.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use locale_sync::flat::flatten;
///
/// let flat = flatten(&json!({ "menu": { "items": ["Open", "Close"] } }));
/// assert_eq!(flat.get("menu.items.1"), Some(&json!("Close")));
/// ```
#[must_use]
pub fn flatten(json: &Value) -> FlatMap {
    let mut result = FlatMap::new();
    flatten_value(json, None, &mut result);
    result
}

fn flatten_value(json: &Value, prefix: Option<&str>, result: &mut FlatMap) {
    let join = |segment: &str| {
        prefix.map_or_else(|| segment.to_string(), |p| format!("{p}{SEPARATOR}{segment}"))
    };

    match json {
        Value::Object(map) if !map.is_empty() => {
            for (key, value) in map {
                flatten_value(value, Some(&join(key)), result);
            }
        }
        Value::Array(items) if !items.is_empty() => {
            for (index, value) in items.iter().enumerate() {
                flatten_value(value, Some(&join(&index.to_string())), result);
            }
        }
        _ => {
            if let Some(path) = prefix {
                result.insert(path, json.clone());
            }
        }
    }
}

/// Rebuilds a tree from a flat map, then infers sequences bottom-up.
///
/// An empty map yields an empty object.
#[must_use]
pub fn unflatten(flat: &FlatMap) -> Node {
    let mut root: Vec<(String, Node)> = Vec::new();

    for (path, value) in flat.iter() {
        let segments: Vec<&str> = path.split(SEPARATOR).collect();
        insert_path(&mut root, &segments, value);
    }

    Node::Map(root).infer_sequences()
}

/// Walks (creating as needed) keyed mappings down `segments` and stores the leaf.
fn insert_path(entries: &mut Vec<(String, Node)>, segments: &[&str], value: &Value) {
    let Some((first, rest)) = segments.split_first() else {
        return;
    };

    let index = entries.iter().position(|(key, _)| key == first).unwrap_or_else(|| {
        entries.push(((*first).to_string(), Node::Map(Vec::new())));
        entries.len() - 1
    });
    let Some((_, slot)) = entries.get_mut(index) else {
        return;
    };

    if rest.is_empty() {
        *slot = Node::Leaf(value.clone());
        return;
    }

    // A later nested path wins over an earlier leaf at the same position.
    if !matches!(slot, Node::Map(_)) {
        *slot = Node::Map(Vec::new());
    }
    if let Node::Map(children) = slot {
        insert_path(children, rest, value);
    }
}
