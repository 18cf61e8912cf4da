use serde::Serialize;
use std::{collections::BTreeMap, fmt};

///
/// JoinId
/// Index of one node in a `JoinGraph`. The root entity is always `ROOT`.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct JoinId(usize);

impl JoinId {
    pub const ROOT: Self = Self(0);

    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for JoinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "j{}", self.0)
    }
}

///
/// JoinNode
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct JoinNode {
    pub id: JoinId,
    pub entity: String,
    /// Owning node and association attribute; `None` for the root.
    pub parent: Option<(JoinId, String)>,
}

///
/// JoinGraph
///
/// Association references created during one resolution pass. Each
/// `(node, attribute)` edge exists at most once.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct JoinGraph {
    nodes: Vec<JoinNode>,
    #[serde(skip)]
    edges: BTreeMap<(JoinId, String), JoinId>,
}

impl JoinGraph {
    #[must_use]
    pub fn new(root_entity: impl Into<String>) -> Self {
        Self {
            nodes: vec![JoinNode {
                id: JoinId::ROOT,
                entity: root_entity.into(),
                parent: None,
            }],
            edges: BTreeMap::new(),
        }
    }

    /// Reuse the join for `attribute` on `from`, or create it. Returns the
    /// target node and whether it was created.
    pub fn join(&mut self, from: JoinId, attribute: &str, target: &str) -> (JoinId, bool) {
        if let Some(id) = self.edges.get(&(from, attribute.to_string())) {
            return (*id, false);
        }

        let id = JoinId(self.nodes.len());
        self.nodes.push(JoinNode {
            id,
            entity: target.to_string(),
            parent: Some((from, attribute.to_string())),
        });
        self.edges.insert((from, attribute.to_string()), id);

        (id, true)
    }

    #[must_use]
    pub fn get(&self, id: JoinId) -> Option<&JoinNode> {
        self.nodes.get(id.0)
    }

    #[must_use]
    pub fn root(&self) -> &JoinNode {
        &self.nodes[0]
    }

    /// Existing join target for `attribute` on `from`.
    #[must_use]
    pub fn lookup(&self, from: JoinId, attribute: &str) -> Option<JoinId> {
        self.edges.get(&(from, attribute.to_string())).copied()
    }

    /// Nodes in creation order, root first.
    #[must_use]
    pub fn nodes(&self) -> &[JoinNode] {
        &self.nodes
    }

    /// Number of joins, excluding the root.
    #[must_use]
    pub fn join_count(&self) -> usize {
        self.nodes.len() - 1
    }
}
