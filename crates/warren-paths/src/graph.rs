//! The [`Graph`] arena — composite-keyed nodes, directed weighted edges,
//! and node removal.

use std::collections::HashMap;
use std::hash::Hash;

use warren_core::Point;

/// The composite identity of a search node: a position plus a state tag.
///
/// Use `S = ()` when position alone determines the search state; use a tag
/// such as [`warren_core::Dir`] when the cost model distinguishes nodes at
/// the same position (two keys with equal `pos` but different `state` are
/// distinct nodes with their own edges).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeKey<S> {
    pub pos: Point,
    pub state: S,
}

impl<S> NodeKey<S> {
    /// Create a new key.
    #[inline]
    pub const fn new(pos: Point, state: S) -> Self {
        Self { pos, state }
    }
}

impl NodeKey<()> {
    /// A position-only key.
    #[inline]
    pub const fn at(pos: Point) -> Self {
        Self { pos, state: () }
    }
}

/// Index of a node in the graph arena.
///
/// Ids are only meaningful for the graph that issued them and stay valid
/// across removals (removed slots are tombstoned, never reused).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub(crate) fn new(idx: usize) -> Self {
        Self(idx as u32)
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A directed edge out of a node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edge {
    /// Destination node.
    pub to: NodeId,
    /// Non-negative traversal cost.
    pub weight: i32,
    /// Positions of the nodes elided into this edge by corridor
    /// compression (empty for edges created by discovery). Cell
    /// identities, not a count: tied routes may share a compressed
    /// corridor, and step counting must not see those cells twice.
    pub elided: Vec<Point>,
}

pub(crate) struct Node<S> {
    pub(crate) key: NodeKey<S>,
    pub(crate) edges: Vec<Edge>,
    /// Nodes holding an edge into this one, so removal can clear both
    /// directions of an asymmetric edge set.
    pub(crate) incoming: Vec<NodeId>,
    pub(crate) removed: bool,
}

/// A directed weighted graph over composite-keyed nodes.
///
/// All nodes live in one arena owned by the graph and reference each other
/// by [`NodeId`]. Each key maps to at most one live node; edge weights are
/// fixed at creation and change only through [`remove_node`](Graph::remove_node)
/// and [`compress_corridors`](Graph::compress_corridors).
pub struct Graph<S> {
    pub(crate) nodes: Vec<Node<S>>,
    pub(crate) index: HashMap<NodeKey<S>, NodeId>,
}

impl<S: Copy + Eq + Hash> Default for Graph<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Copy + Eq + Hash> Graph<S> {
    /// Create an empty graph. See [`Graph::build`](Graph::build) for
    /// flood-fill construction from a grid.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Number of live nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the graph has no live nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Look up the live node for `key`, if any.
    #[inline]
    pub fn node(&self, key: &NodeKey<S>) -> Option<NodeId> {
        self.index.get(key).copied()
    }

    /// The key of node `id`.
    ///
    /// # Panics
    /// Panics if `id` did not come from this graph.
    #[inline]
    pub fn key(&self, id: NodeId) -> NodeKey<S> {
        self.nodes[id.index()].key
    }

    /// Whether `id` refers to a live (not removed) node.
    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.index())
            .is_some_and(|n| !n.removed)
    }

    /// Outgoing edges of node `id`. Removed nodes have none.
    #[inline]
    pub fn edges(&self, id: NodeId) -> &[Edge] {
        &self.nodes[id.index()].edges
    }

    /// Arena-order iterator over live node ids.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| !n.removed)
            .map(|(i, _)| NodeId::new(i))
    }

    /// Register `key`, returning its id. Re-inserting an existing key
    /// returns the existing node unchanged.
    ///
    /// Keys of removed nodes must not be re-inserted; removal is permanent.
    pub fn insert(&mut self, key: NodeKey<S>) -> NodeId {
        self.intern(key).0
    }

    /// Like [`insert`](Graph::insert), also reporting whether the node was
    /// newly created.
    pub(crate) fn intern(&mut self, key: NodeKey<S>) -> (NodeId, bool) {
        if let Some(&id) = self.index.get(&key) {
            return (id, false);
        }
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node {
            key,
            edges: Vec::new(),
            incoming: Vec::new(),
            removed: false,
        });
        self.index.insert(key, id);
        (id, true)
    }

    /// Add a directed edge `from → to` with the given weight.
    ///
    /// Parallel edges between the same pair merge, keeping the cheaper one
    /// (the existing edge wins a tie).
    ///
    /// # Panics
    /// Panics if `weight` is negative (caller contract violation) or if
    /// either endpoint has been removed.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: i32) {
        self.add_edge_elided(from, to, weight, Vec::new());
    }

    pub(crate) fn add_edge_elided(
        &mut self,
        from: NodeId,
        to: NodeId,
        weight: i32,
        elided: Vec<Point>,
    ) {
        assert!(weight >= 0, "negative edge weight {weight} supplied");
        assert!(
            !self.nodes[from.index()].removed && !self.nodes[to.index()].removed,
            "edge endpoints must be live nodes"
        );
        if let Some(e) = self.nodes[from.index()].edges.iter_mut().find(|e| e.to == to) {
            match weight.cmp(&e.weight) {
                std::cmp::Ordering::Less => {
                    e.weight = weight;
                    e.elided = elided;
                }
                // Equally cheap parallel routes are both optimal, so the
                // merged edge carries the cells of both.
                std::cmp::Ordering::Equal => {
                    for p in elided {
                        if !e.elided.contains(&p) {
                            e.elided.push(p);
                        }
                    }
                }
                std::cmp::Ordering::Greater => {}
            }
            return;
        }
        self.nodes[from.index()].edges.push(Edge { to, weight, elided });
        self.nodes[to.index()].incoming.push(from);
    }

    /// Remove the node for `key`, if present. Returns whether a node was
    /// removed.
    pub fn remove_key(&mut self, key: &NodeKey<S>) -> bool {
        match self.node(key) {
            Some(id) => {
                self.remove_node(id);
                true
            }
            None => false,
        }
    }

    /// Remove node `id` and every edge incident to it, in both directions.
    ///
    /// The arena slot is tombstoned so other ids stay valid; subsequent
    /// solves treat the node as if it never existed. Removing an already
    /// removed node is a no-op. Re-insertion is not supported (obstacles
    /// accumulate; they are never lifted).
    pub fn remove_node(&mut self, id: NodeId) {
        let i = id.index();
        if self.nodes[i].removed {
            return;
        }

        let edges = std::mem::take(&mut self.nodes[i].edges);
        for e in &edges {
            let inc = &mut self.nodes[e.to.index()].incoming;
            if let Some(pos) = inc.iter().position(|&s| s == id) {
                inc.swap_remove(pos);
            }
        }

        let incoming = std::mem::take(&mut self.nodes[i].incoming);
        for s in &incoming {
            self.nodes[s.index()].edges.retain(|e| e.to != id);
        }

        self.index.remove(&self.nodes[i].key);
        self.nodes[i].removed = true;
        log::trace!(
            "removed node {id:?} ({} out, {} in edges cleared)",
            edges.len(),
            incoming.len()
        );
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use warren_core::Dir;

    #[test]
    fn node_key_round_trip() {
        let k = NodeKey::new(Point::new(4, 2), Dir::West);
        let json = serde_json::to_string(&k).unwrap();
        let back: NodeKey<Dir> = serde_json::from_str(&json).unwrap();
        assert_eq!(k, back);
    }
}
