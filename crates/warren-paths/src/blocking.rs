//! The "first blocking removal" search.

use std::collections::HashSet;
use std::hash::Hash;

use crate::graph::{Graph, NodeKey};

/// Remove `removals` from the graph in order and report the index of the
/// first removal that leaves `target` unreachable from `source`.
///
/// Re-solving happens lazily: a removal that does not touch the current
/// optimal path's node set cannot change the answer, so the solver only
/// reruns when one does. Keys not present in the graph (walls, cells
/// removed earlier) are skipped cheaply.
///
/// Returns `None` when no removal disconnects the pair — including when
/// `target` was unreachable before any removal was applied. The graph is
/// left with all removals applied up to and including the returned index
/// (or all of them on `None`).
pub fn first_blocking_removal<S: Copy + Eq + Hash>(
    graph: &mut Graph<S>,
    source: NodeKey<S>,
    target: NodeKey<S>,
    removals: &[NodeKey<S>],
) -> Option<usize> {
    let src = graph.node(&source)?;
    let tgt = graph.node(&target)?;

    let sp = graph.shortest_paths(src, &[tgt]);
    let mut on_path: HashSet<_> = sp.path_nodes(tgt).into_iter().collect();

    for (i, key) in removals.iter().enumerate() {
        let Some(id) = graph.node(key) else {
            continue;
        };
        graph.remove_node(id);
        if !on_path.contains(&id) {
            continue;
        }
        let sp = graph.shortest_paths(src, &[tgt]);
        if !sp.is_reachable(tgt) {
            log::debug!("removal {i} ({}) disconnects source from target", key.pos);
            return Some(i);
        }
        on_path = sp.path_nodes(tgt).into_iter().collect();
    }
    None
}
