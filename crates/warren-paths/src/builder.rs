//! Flood-fill graph discovery.

use std::collections::VecDeque;
use std::hash::Hash;

use crate::graph::{Graph, NodeKey};

/// A single outgoing move produced by a [`Mover`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Step<S> {
    /// Destination key.
    pub key: NodeKey<S>,
    /// Non-negative traversal cost.
    pub weight: i32,
}

/// Supplies the valid moves (and their weights) out of a search state.
///
/// This is the seam where a grid, a cost model, and any movement rules
/// (e.g. "never reverse") plug into discovery. Weights must be
/// non-negative; a negative weight makes [`Graph::build`] panic.
pub trait Mover<S> {
    /// Append every valid move out of `from` into `buf`. The caller clears
    /// `buf` before calling.
    fn moves(&self, from: NodeKey<S>, buf: &mut Vec<Step<S>>);
}

impl<S: Copy + Eq + Hash> Graph<S> {
    /// Discover every node reachable from `seed` and build the graph.
    ///
    /// Breadth-first expansion from the seed: each frontier node's moves are
    /// queried once, destination keys are registered the first time they are
    /// seen, and a directed weighted edge is recorded for every move.
    /// Terminates when the frontier drains. No distances are computed here;
    /// see [`shortest_paths`](Graph::shortest_paths).
    pub fn build(seed: NodeKey<S>, mover: &impl Mover<S>) -> Graph<S> {
        let mut graph = Graph::new();
        let (seed_id, _) = graph.intern(seed);

        let mut frontier = VecDeque::new();
        frontier.push_back(seed_id);
        let mut buf = Vec::with_capacity(4);
        let mut edges = 0usize;

        while let Some(id) = frontier.pop_front() {
            buf.clear();
            mover.moves(graph.key(id), &mut buf);
            for step in &buf {
                let (nid, new) = graph.intern(step.key);
                if new {
                    frontier.push_back(nid);
                }
                graph.add_edge(id, nid, step.weight);
                edges += 1;
            }
        }

        log::debug!("built graph: {} nodes, {} edges", graph.len(), edges);
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movers::OpenGrid;
    use warren_core::{CellGrid, Point};

    #[test]
    fn flood_fill_discovers_reachable_cells_once() {
        // The 2x1 pocket on the right is sealed off.
        let grid = CellGrid::parse_maze(&[
            "#######", //
            "#S..#.#", //
            "#...#.#", //
            "#######",
        ])
        .unwrap();
        let g = Graph::build(NodeKey::at(Point::new(1, 1)), &OpenGrid::new(&grid));
        // 6 reachable open cells; the pocket's 2 cells are never discovered.
        assert_eq!(g.len(), 6);
        assert_eq!(g.node(&NodeKey::at(Point::new(5, 1))), None);
        assert_eq!(g.node(&NodeKey::at(Point::new(5, 2))), None);
    }

    #[test]
    fn edges_are_directed_and_uniform() {
        let grid = CellGrid::parse_maze(&["S.E"]).unwrap();
        let g = Graph::build(NodeKey::at(Point::ZERO), &OpenGrid::new(&grid));
        assert_eq!(g.len(), 3);
        let mid = g.node(&NodeKey::at(Point::new(1, 0))).unwrap();
        // Middle cell can go both ways, the ends only inward.
        assert_eq!(g.edges(mid).len(), 2);
        for id in g.ids() {
            for e in g.edges(id) {
                assert_eq!(e.weight, 1);
                assert!(e.elided.is_empty());
            }
        }
    }

    #[test]
    fn build_is_deterministic() {
        let grid = CellGrid::parse_maze(&[
            "S...", //
            ".#..", //
            "...E",
        ])
        .unwrap();
        let seed = NodeKey::at(Point::ZERO);
        let a = Graph::build(seed, &OpenGrid::new(&grid));
        let b = Graph::build(seed, &OpenGrid::new(&grid));
        assert_eq!(a.len(), b.len());
        for id in a.ids() {
            assert_eq!(a.key(id), b.key(id));
            assert_eq!(a.edges(id), b.edges(id));
        }
    }
}
