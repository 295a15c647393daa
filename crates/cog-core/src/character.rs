//! Robot characters and their dialog graphs.

use std::collections::BTreeMap;

use crate::dialog::DialogNode;
use crate::error::{WorldError, WorldResult};

/// A friendly but malfunctioning robot with a dialog graph.
///
/// The graph is validated on construction: node ids are unique, the entry
/// node exists, and every `next` edge reachable from the entry resolves.
/// A conversation walking a constructed `Character` can therefore never
/// step off the graph.
#[derive(Debug, Clone)]
pub struct Character {
    name: String,
    entry: String,
    nodes: BTreeMap<String, DialogNode>,
}

impl Character {
    /// Build a character from its dialog nodes and entry node id.
    ///
    /// Fails with [`WorldError::DuplicateKey`] on colliding node ids,
    /// [`WorldError::MissingEntryNode`] if `entry` is absent, and
    /// [`WorldError::DanglingDialogEdge`] if any choice reachable from the
    /// entry points at a node id not in the graph.
    pub fn new(
        name: impl Into<String>,
        entry: impl Into<String>,
        nodes: Vec<DialogNode>,
    ) -> WorldResult<Self> {
        let name = name.into();
        let entry = entry.into();

        let mut graph = BTreeMap::new();
        for node in nodes {
            if graph.contains_key(&node.id) {
                return Err(WorldError::DuplicateKey {
                    kind: "dialog node",
                    container: name,
                    key: node.id,
                });
            }
            graph.insert(node.id.clone(), node);
        }

        if !graph.contains_key(&entry) {
            return Err(WorldError::MissingEntryNode {
                character: name,
                node: entry,
            });
        }

        // Walk the reachable closure from the entry; cycles are fine, a
        // dangling edge is not.
        let mut pending = vec![entry.clone()];
        let mut visited = std::collections::BTreeSet::new();
        while let Some(id) = pending.pop() {
            if !visited.insert(id.clone()) {
                continue;
            }
            let node = &graph[&id];
            for choice in &node.choices {
                if let Some(target) = &choice.next {
                    if !graph.contains_key(target) {
                        return Err(WorldError::DanglingDialogEdge {
                            character: name,
                            node: id,
                            target: target.clone(),
                        });
                    }
                    pending.push(target.clone());
                }
            }
        }

        Ok(Self { name, entry, nodes: graph })
    }

    /// The character's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Id of the node conversations enter at.
    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// Look up a dialog node by id.
    pub fn node(&self, id: &str) -> WorldResult<&DialogNode> {
        self.nodes
            .get(id)
            .ok_or_else(|| WorldError::DialogNodeNotFound {
                character: self.name.clone(),
                node: id.to_string(),
            })
    }

    /// Number of nodes in the dialog graph.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
