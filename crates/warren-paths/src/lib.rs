//! Grid-graph construction and shortest-path search.
//!
//! This crate turns a grid (or any implicit state space) into an explicit
//! weighted directed graph and answers shortest-path queries over it:
//!
//! - **Flood-fill discovery** of every node reachable from a seed
//!   ([`Graph::build`]), with a pluggable move/weight function ([`Mover`])
//! - **Dijkstra with tie tracking** ([`Graph::shortest_paths`]) — every
//!   predecessor achieving a node's best distance is retained, so the full
//!   set of cells on *any* optimal path can be reconstructed
//! - **Incremental mutation** ([`Graph::remove_node`]) with cheap
//!   re-solving, and the derived [`first_blocking_removal`] search
//! - **Corridor compression** ([`Graph::compress_corridors`]) — an optional
//!   graph-shrinking pass that preserves distances and step counts
//!
//! Nodes live in a single arena owned by the [`Graph`] and are referred to
//! by [`NodeId`] everywhere; a node is identified by its [`NodeKey`], a
//! position plus an optional state tag (e.g. an orientation) for cost
//! models where position alone does not determine the search state.

mod blocking;
mod builder;
mod compress;
mod dijkstra;
mod graph;
mod movers;

pub use blocking::first_blocking_removal;
pub use builder::{Mover, Step};
pub use dijkstra::{ShortestPaths, UNREACHABLE};
pub use graph::{Edge, Graph, NodeId, NodeKey};
pub use movers::{OpenGrid, TurnCost};
