//! Schema-less value tree, stored as an arena.
//!
//! Nodes reference their children by [`NodeId`], so one node may be
//! reachable from several parents, and a child may point back at an
//! ancestor. A tree decoded from JSON never does either, but payloads
//! assembled in code can, and the transformer has to tell them apart.

use serde_json::Number;

/// Index of a node inside a [`ValueGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// A leaf that is neither text nor a container.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(Number),
}

impl Scalar {
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Scalar::Null => serde_json::Value::Null,
            Scalar::Bool(b) => serde_json::Value::Bool(*b),
            Scalar::Number(n) => serde_json::Value::Number(n.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Text(String),
    /// Ordered fields with unique keys.
    Record(Vec<(String, NodeId)>),
    Sequence(Vec<NodeId>),
    Scalar(Scalar),
}

impl Node {
    pub fn is_null(&self) -> bool {
        matches!(self, Node::Scalar(Scalar::Null))
    }
}

/// Arena owning every node of a value.
#[derive(Debug, Clone, Default)]
pub struct ValueGraph {
    nodes: Vec<Node>,
}

impl ValueGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a JSON value into a fresh graph, returning it with its root.
    pub fn from_json(value: &serde_json::Value) -> (Self, NodeId) {
        let mut graph = Self::new();
        let root = graph.insert_json(value);
        (graph, root)
    }

    /// Add a JSON value to this graph and return its root node.
    pub fn insert_json(&mut self, value: &serde_json::Value) -> NodeId {
        match value {
            serde_json::Value::Null => self.scalar(Scalar::Null),
            serde_json::Value::Bool(b) => self.scalar(Scalar::Bool(*b)),
            serde_json::Value::Number(n) => self.scalar(Scalar::Number(n.clone())),
            serde_json::Value::String(s) => self.text(s.clone()),
            serde_json::Value::Array(items) => {
                let children = items.iter().map(|item| self.insert_json(item)).collect();
                self.add(Node::Sequence(children))
            }
            serde_json::Value::Object(map) => {
                let fields = map
                    .iter()
                    .map(|(key, item)| (key.clone(), self.insert_json(item)))
                    .collect();
                self.add(Node::Record(fields))
            }
        }
    }

    pub fn text(&mut self, text: impl Into<String>) -> NodeId {
        self.add(Node::Text(text.into()))
    }

    pub fn scalar(&mut self, scalar: Scalar) -> NodeId {
        self.add(Node::Scalar(scalar))
    }

    pub fn record(&mut self) -> NodeId {
        self.add(Node::Record(Vec::new()))
    }

    pub fn sequence(&mut self) -> NodeId {
        self.add(Node::Sequence(Vec::new()))
    }

    /// Set `key` on a record, replacing any existing child under that key.
    ///
    /// Returns `false` if `record` is not a record node.
    pub fn insert(&mut self, record: NodeId, key: impl Into<String>, child: NodeId) -> bool {
        let key = key.into();
        match self.nodes.get_mut(record.0) {
            Some(Node::Record(fields)) => {
                match fields.iter_mut().find(|(existing, _)| *existing == key) {
                    Some(slot) => slot.1 = child,
                    None => fields.push((key, child)),
                }
                true
            }
            _ => false,
        }
    }

    /// Append a child to a sequence.
    ///
    /// Returns `false` if `sequence` is not a sequence node.
    pub fn push(&mut self, sequence: NodeId, child: NodeId) -> bool {
        match self.nodes.get_mut(sequence.0) {
            Some(Node::Sequence(items)) => {
                items.push(child);
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn add(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_preserves_field_order() {
        let (graph, root) = ValueGraph::from_json(&json!({"z": 1, "a": "x", "m": [true, null]}));

        let Some(Node::Record(fields)) = graph.get(root) else {
            panic!("root should be a record");
        };
        let keys: Vec<_> = fields.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
        assert_eq!(graph.get(fields[1].1), Some(&Node::Text("x".to_string())));
    }

    #[test]
    fn test_from_json_scalars() {
        let (graph, root) = ValueGraph::from_json(&json!([7, false, null]));
        let Some(Node::Sequence(items)) = graph.get(root) else {
            panic!("root should be a sequence");
        };
        assert_eq!(graph.get(items[0]), Some(&Node::Scalar(Scalar::Number(7.into()))));
        assert_eq!(graph.get(items[1]), Some(&Node::Scalar(Scalar::Bool(false))));
        assert!(graph.get(items[2]).unwrap().is_null());
    }

    #[test]
    fn test_insert_replaces_existing_key() {
        let mut graph = ValueGraph::new();
        let record = graph.record();
        let first = graph.text("first");
        let second = graph.text("second");

        assert!(graph.insert(record, "name", first));
        assert!(graph.insert(record, "name", second));

        assert_eq!(
            graph.get(record),
            Some(&Node::Record(vec![("name".to_string(), second)]))
        );
    }

    #[test]
    fn test_insert_on_non_record_fails() {
        let mut graph = ValueGraph::new();
        let text = graph.text("leaf");
        let child = graph.text("child");
        assert!(!graph.insert(text, "k", child));
        assert!(!graph.push(text, child));
    }

    #[test]
    fn test_self_reference_is_representable() {
        let mut graph = ValueGraph::new();
        let record = graph.record();
        assert!(graph.insert(record, "self", record));
        assert_eq!(graph.len(), 1);
    }
}
