//! Single-source shortest paths with tie-tracked predecessors.

use std::collections::{BTreeSet, BinaryHeap, HashSet};
use std::hash::Hash;

use warren_core::Point;

use crate::graph::{Graph, NodeId};

/// Sentinel distance meaning "not reached".
pub const UNREACHABLE: i64 = i64::MAX;

/// Reference into the arena, ordered by distance for use in `BinaryHeap`.
#[derive(Clone, Copy, Eq, PartialEq)]
struct QueueRef {
    idx: usize,
    dist: i64,
}

impl Ord for QueueRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest distance first.
        other.dist.cmp(&self.dist)
    }
}

impl PartialOrd for QueueRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// The result of one solve: a distance table and, per node, every
/// predecessor achieving that node's best distance.
///
/// Borrowing nothing from the graph, it stays valid across later graph
/// mutation — but then describes the topology at solve time.
pub struct ShortestPaths {
    source: NodeId,
    targets: Vec<NodeId>,
    dist: Vec<i64>,
    preds: Vec<Vec<NodeId>>,
}

impl<S: Copy + Eq + Hash> Graph<S> {
    /// Dijkstra from `source`, stopping early once every node in `targets`
    /// has been visited. Pass an empty slice to solve the whole graph, or a
    /// singleton when only one distance is needed.
    ///
    /// Relaxation tracks ties: when an equally short route into a node is
    /// found, the new predecessor is added alongside the existing ones
    /// instead of replacing them, so every optimal path stays
    /// reconstructible. All edge weights are non-negative by construction
    /// ([`add_edge`](Graph::add_edge) rejects negatives).
    pub fn shortest_paths(&self, source: NodeId, targets: &[NodeId]) -> ShortestPaths {
        let n = self.nodes.len();
        let mut dist = vec![UNREACHABLE; n];
        let mut preds: Vec<Vec<NodeId>> = vec![Vec::new(); n];
        let mut visited = vec![false; n];

        // Removed targets can never be visited; leave them out of the
        // early-exit count.
        let mut remaining = targets.iter().filter(|t| self.contains(**t)).count();
        let early_exit = !targets.is_empty();

        let mut heap = BinaryHeap::new();
        if self.contains(source) {
            dist[source.index()] = 0;
            heap.push(QueueRef {
                idx: source.index(),
                dist: 0,
            });
        }

        let mut visits = 0usize;
        while let Some(QueueRef { idx, dist: d }) = heap.pop() {
            if visited[idx] || d > dist[idx] {
                continue;
            }
            visited[idx] = true;
            visits += 1;

            if early_exit && targets.contains(&NodeId::new(idx)) {
                remaining -= 1;
                if remaining == 0 {
                    break;
                }
            }

            for edge in &self.nodes[idx].edges {
                let ti = edge.to.index();
                let cand = d + edge.weight as i64;
                if cand < dist[ti] {
                    dist[ti] = cand;
                    preds[ti].clear();
                    preds[ti].push(NodeId::new(idx));
                    heap.push(QueueRef { idx: ti, dist: cand });
                } else if cand == dist[ti] {
                    let p = NodeId::new(idx);
                    if !preds[ti].contains(&p) {
                        preds[ti].push(p);
                    }
                }
            }
        }

        log::debug!("dijkstra: visited {visits} of {} live nodes", self.len());
        ShortestPaths {
            source,
            targets: targets.to_vec(),
            dist,
            preds,
        }
    }
}

impl ShortestPaths {
    /// The source this table was solved from.
    #[inline]
    pub fn source(&self) -> NodeId {
        self.source
    }

    /// Best known distance to `id`, or [`UNREACHABLE`].
    #[inline]
    pub fn distance(&self, id: NodeId) -> i64 {
        self.dist[id.index()]
    }

    /// Best known distance to `id`, or `None` if it was never reached.
    #[inline]
    pub fn distance_to(&self, id: NodeId) -> Option<i64> {
        let d = self.dist[id.index()];
        (d != UNREACHABLE).then_some(d)
    }

    /// Whether `id` was reached.
    #[inline]
    pub fn is_reachable(&self, id: NodeId) -> bool {
        self.dist[id.index()] != UNREACHABLE
    }

    /// Predecessors of `id` achieving its best distance (empty for the
    /// source and for unreached nodes).
    #[inline]
    pub fn predecessors(&self, id: NodeId) -> &[NodeId] {
        &self.preds[id.index()]
    }

    /// The reachable target with the smallest distance, if any.
    pub fn best_target(&self) -> Option<NodeId> {
        self.targets
            .iter()
            .copied()
            .filter(|t| self.is_reachable(*t))
            .min_by_key(|t| self.distance(*t))
    }

    /// Every node on at least one shortest path from the source to
    /// `target`, found by walking the predecessor sets backward.
    ///
    /// The walk keeps a visited set: predecessor chains from ties may
    /// rejoin a node along different branches. Returns an empty vec if
    /// `target` was never reached.
    pub fn path_nodes(&self, target: NodeId) -> Vec<NodeId> {
        if !self.is_reachable(target) {
            return Vec::new();
        }
        let mut seen: HashSet<NodeId> = HashSet::new();
        let mut stack = vec![target];
        let mut nodes = Vec::new();
        seen.insert(target);
        while let Some(id) = stack.pop() {
            nodes.push(id);
            for &p in &self.preds[id.index()] {
                if seen.insert(p) {
                    stack.push(p);
                }
            }
        }
        nodes
    }

    /// Distinct grid positions on any shortest path to `target`.
    ///
    /// Collapses state-tagged nodes at the same position to a single point.
    pub fn path_points<S: Copy + Eq + Hash>(
        &self,
        graph: &Graph<S>,
        target: NodeId,
    ) -> BTreeSet<Point> {
        self.path_nodes(target)
            .into_iter()
            .map(|id| graph.key(id).pos)
            .collect()
    }

    /// Number of distinct cells on any shortest path to `target`,
    /// including cells elided by corridor compression.
    ///
    /// Unions the positions of the surviving path nodes with the cells
    /// recorded on every compressed edge some optimal path uses. Tied
    /// routes may run through the same corridor, so the recorded cells of
    /// different edges can overlap; the union counts each cell once.
    pub fn path_cell_count<S: Copy + Eq + Hash>(&self, graph: &Graph<S>, target: NodeId) -> usize {
        let nodes = self.path_nodes(target);
        let mut cells: BTreeSet<Point> = nodes.iter().map(|id| graph.key(*id).pos).collect();
        for &id in &nodes {
            for &p in &self.preds[id.index()] {
                if let Some(e) = graph.edges(p).iter().find(|e| e.to == id) {
                    cells.extend(e.elided.iter().copied());
                }
            }
        }
        cells.len()
    }
}
