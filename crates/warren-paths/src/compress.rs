//! Corridor compression — eliding single-exit nodes.

use std::collections::VecDeque;
use std::hash::Hash;

use crate::graph::{Graph, NodeId, NodeKey};

impl<S: Copy + Eq + Hash> Graph<S> {
    /// Elide every node that has exactly one outgoing edge and is not
    /// protected by `keep`, splicing each incoming edge together with the
    /// sole outgoing edge. Returns the number of nodes elided.
    ///
    /// A node `n` with incoming `s → n` (weight w1) and sole outgoing
    /// `n → m` (weight w2) becomes an edge `s → m` of weight `w1 + w2`
    /// whose `elided` list records the position of every cell spliced
    /// away, so step-counting queries
    /// ([`ShortestPaths::path_cell_count`]) remain answerable. Shortest
    /// distances between surviving nodes are unchanged. Incoming edges
    /// from `m` itself (dead-end corridors) are dropped rather than
    /// turned into self-loops.
    ///
    /// `keep` must return true for every node the caller still wants to
    /// solve from or query — typically the seed and the target markers.
    ///
    /// [`ShortestPaths::path_cell_count`]: crate::ShortestPaths::path_cell_count
    pub fn compress_corridors(&mut self, keep: impl Fn(&NodeKey<S>) -> bool) -> usize {
        let mut queue: VecDeque<NodeId> = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| !n.removed && n.edges.len() == 1 && !keep(&n.key))
            .map(|(i, _)| NodeId::new(i))
            .collect();

        let mut elided_total = 0usize;
        while let Some(id) = queue.pop_front() {
            let i = id.index();
            // Splicing elsewhere may have changed this node since it was
            // queued; re-check the criterion.
            if self.nodes[i].removed || self.nodes[i].edges.len() != 1 || keep(&self.nodes[i].key) {
                continue;
            }
            let out = self.nodes[i].edges[0].clone();
            if out.to == id {
                continue;
            }
            let pos = self.nodes[i].key.pos;

            let mut spliced = Vec::new();
            for &s in &self.nodes[i].incoming {
                if s == out.to {
                    continue;
                }
                if let Some(e) = self.nodes[s.index()].edges.iter().find(|e| e.to == id) {
                    spliced.push((s, e.weight, e.elided.clone()));
                }
            }

            self.remove_node(id);
            for (s, w_in, mut cells) in spliced {
                if !cells.contains(&pos) {
                    cells.push(pos);
                }
                for &c in &out.elided {
                    if !cells.contains(&c) {
                        cells.push(c);
                    }
                }
                self.add_edge_elided(s, out.to, w_in + out.weight, cells);
                // Merging parallel edges can drop a source to one exit,
                // making it elidable in turn.
                if self.nodes[s.index()].edges.len() == 1 && !keep(&self.nodes[s.index()].key) {
                    queue.push_back(s);
                }
            }
            elided_total += 1;
        }

        log::debug!(
            "corridor compression elided {elided_total} nodes, {} remain",
            self.len()
        );
        elided_total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dijkstra::ShortestPaths;
    use crate::movers::{OpenGrid, TurnCost};
    use warren_core::{Cell, CellGrid, Dir, Point};

    fn l_corridor() -> CellGrid {
        CellGrid::parse_maze(&[
            "########", //
            "#S.....#", //
            "######.#", //
            "######.#", //
            "######.#", //
            "######.#", //
            "######E#", //
            "########",
        ])
        .unwrap()
    }

    fn turn_graph(grid: &CellGrid) -> (Graph<Dir>, NodeKey<Dir>, Point) {
        let start = grid.locate(Cell::Start).unwrap();
        let end = grid.locate(Cell::End).unwrap();
        let seed = NodeKey::new(start, Dir::East);
        (Graph::build(seed, &TurnCost::new(grid, 1, 1000)), seed, end)
    }

    fn solve_to_end(g: &Graph<Dir>, seed: NodeKey<Dir>, end: Point) -> (ShortestPaths, NodeId) {
        let src = g.node(&seed).unwrap();
        let targets: Vec<_> = Dir::ALL
            .iter()
            .filter_map(|&d| g.node(&NodeKey::new(end, d)))
            .collect();
        let sp = g.shortest_paths(src, &targets);
        let best = sp.best_target().unwrap();
        (sp, best)
    }

    #[test]
    fn corridor_collapses_to_one_edge() {
        let grid = l_corridor();
        let (mut g, seed, end) = turn_graph(&grid);
        let start = seed.pos;
        let elided = g.compress_corridors(|k| k.pos == start || k.pos == end);
        // 5 interior cells along the row, 4 down the column.
        assert_eq!(elided, 9);
        assert_eq!(g.len(), 2);
        let src = g.node(&seed).unwrap();
        assert_eq!(g.edges(src).len(), 1);
        let e = &g.edges(src)[0];
        assert_eq!(e.weight, 9 + 1001);
        assert_eq!(e.elided.len(), 9);
        // Every recorded cell is a distinct interior corridor position.
        let distinct: std::collections::BTreeSet<_> = e.elided.iter().collect();
        assert_eq!(distinct.len(), 9);
        assert!(!e.elided.contains(&start));
        assert!(!e.elided.contains(&end));
    }

    #[test]
    fn compression_preserves_distance_and_cell_count() {
        let grid = l_corridor();
        let (g, seed, end) = turn_graph(&grid);
        let (sp, best) = solve_to_end(&g, seed, end);
        assert_eq!(sp.distance(best), 1010);
        assert_eq!(sp.path_cell_count(&g, best), 11);

        let (mut cg, seed, end) = turn_graph(&grid);
        let start = seed.pos;
        cg.compress_corridors(|k| k.pos == start || k.pos == end);
        let (sp, best) = solve_to_end(&cg, seed, end);
        assert_eq!(sp.distance(best), 1010);
        assert_eq!(sp.path_cell_count(&cg, best), 11);
    }

    /// Two equally priced branches rejoin before a shared two-cell
    /// corridor to the end. After compression both tied edges into the end
    /// record the same corridor cells, which must be counted once.
    #[test]
    fn tied_routes_count_shared_corridor_once() {
        let grid = CellGrid::parse_maze(&[
            "#####", //
            "#.S.#", //
            "#.#.#", //
            "#...#", //
            "##.##", //
            "##.##", //
            "##E##", //
            "#####",
        ])
        .unwrap();
        let start = grid.locate(Cell::Start).unwrap();
        let end = grid.locate(Cell::End).unwrap();
        // Facing south so the east and west branches stay symmetric.
        let seed = NodeKey::new(start, Dir::South);
        let g = Graph::build(seed, &TurnCost::new(&grid, 1, 1000));
        let (sp, best) = solve_to_end(&g, seed, end);
        let plain_dist = sp.distance(best);
        assert_eq!(sp.path_cell_count(&g, best), 11);

        let mut cg = Graph::build(seed, &TurnCost::new(&grid, 1, 1000));
        cg.compress_corridors(|k| k.pos == start || k.pos == end);
        let (sp, best) = solve_to_end(&cg, seed, end);
        assert_eq!(sp.distance(best), plain_dist);
        assert_eq!(sp.path_cell_count(&cg, best), 11);
    }

    #[test]
    fn keep_everything_elides_nothing() {
        let grid = l_corridor();
        let (mut g, ..) = turn_graph(&grid);
        let before = g.len();
        assert_eq!(g.compress_corridors(|_| true), 0);
        assert_eq!(g.len(), before);
    }

    #[test]
    fn dead_end_tip_is_dropped_not_self_looped() {
        let grid = CellGrid::parse_maze(&["S."]).unwrap();
        let seed = NodeKey::at(Point::ZERO);
        let mut g = Graph::build(seed, &OpenGrid::new(&grid));
        let elided = g.compress_corridors(|k| k.pos == Point::ZERO);
        assert_eq!(elided, 1);
        assert_eq!(g.len(), 1);
        let src = g.node(&seed).unwrap();
        assert!(g.edges(src).is_empty());
    }

    #[test]
    fn compressed_maze_matches_uncompressed_answers() {
        let rows = &[
            "###############",
            "#.......#....E#",
            "#.#.###.#.###.#",
            "#.....#.#...#.#",
            "#.###.#####.#.#",
            "#.#.#.......#.#",
            "#.#.#####.###.#",
            "#...........#.#",
            "###.#.#####.#.#",
            "#...#.....#.#.#",
            "#.#.#.###.#.#.#",
            "#.....#...#.#.#",
            "#.###.#.#.#.#.#",
            "#S..#.....#...#",
            "###############",
        ];
        let grid = CellGrid::parse_maze(rows).unwrap();
        let (mut g, seed, end) = turn_graph(&grid);
        let start = seed.pos;
        let elided = g.compress_corridors(|k| k.pos == start || k.pos == end);
        assert!(elided > 0);
        let (sp, best) = solve_to_end(&g, seed, end);
        assert_eq!(sp.distance(best), 7036);
        assert_eq!(sp.path_cell_count(&g, best), 45);
    }
}
