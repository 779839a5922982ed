//! Ready-made [`Mover`] implementations for cell grids.

use warren_core::{CellGrid, Dir};

use crate::builder::{Mover, Step};
use crate::graph::NodeKey;

/// Uniform-cost cardinal movement over the open cells of a grid.
///
/// Every step onto a non-wall cell costs 1; nodes are position-only.
pub struct OpenGrid<'a> {
    grid: &'a CellGrid,
}

impl<'a> OpenGrid<'a> {
    pub fn new(grid: &'a CellGrid) -> Self {
        Self { grid }
    }
}

impl Mover<()> for OpenGrid<'_> {
    fn moves(&self, from: NodeKey<()>, buf: &mut Vec<Step<()>>) {
        for dir in Dir::ALL {
            let next = dir.step(from.pos);
            if self.grid.is_open(next) {
                buf.push(Step {
                    key: NodeKey::at(next),
                    weight: 1,
                });
            }
        }
    }
}

/// Orientation-aware movement where changing direction costs extra.
///
/// Nodes are tagged with the direction of travel. A step that continues
/// straight costs `straight`; a perpendicular step costs
/// `straight + turn_penalty`. Reversing is never offered, so a physical
/// cell yields up to three moves per orientation.
pub struct TurnCost<'a> {
    grid: &'a CellGrid,
    straight: i32,
    turn_penalty: i32,
}

impl<'a> TurnCost<'a> {
    /// # Panics
    /// Panics at build time if `straight` or `straight + turn_penalty`
    /// is negative.
    pub fn new(grid: &'a CellGrid, straight: i32, turn_penalty: i32) -> Self {
        Self {
            grid,
            straight,
            turn_penalty,
        }
    }
}

impl Mover<Dir> for TurnCost<'_> {
    fn moves(&self, from: NodeKey<Dir>, buf: &mut Vec<Step<Dir>>) {
        for dir in Dir::ALL {
            if dir == from.state.opposite() {
                continue;
            }
            let next = dir.step(from.pos);
            if !self.grid.is_open(next) {
                continue;
            }
            let weight = if dir.perpendicular_to(from.state) {
                self.straight + self.turn_penalty
            } else {
                self.straight
            };
            buf.push(Step {
                key: NodeKey::new(next, dir),
                weight,
            });
        }
    }
}
