//! Dense occupancy grid backing the arena.

use arena_legends_core::{CellCoord, PlayerId};

/// Row-major grid storing which hero stands on each cell.
#[derive(Clone, Debug)]
pub(crate) struct OccupancyGrid {
    side: u32,
    cells: Vec<Option<PlayerId>>,
}

impl OccupancyGrid {
    pub(crate) fn new(side: u32) -> Self {
        let capacity_u64 = u64::from(side) * u64::from(side);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            side,
            cells: vec![None; capacity],
        }
    }

    pub(crate) const fn side(&self) -> u32 {
        self.side
    }

    pub(crate) fn contains(&self, cell: CellCoord) -> bool {
        cell.row() < self.side && cell.column() < self.side
    }

    /// Out-of-bounds cells are never free.
    pub(crate) fn is_free(&self, cell: CellCoord) -> bool {
        self.index(cell)
            .map_or(false, |index| self.cells.get(index).copied().flatten().is_none())
    }

    pub(crate) fn occupant(&self, cell: CellCoord) -> Option<PlayerId> {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied().flatten())
    }

    pub(crate) fn occupy(&mut self, player: PlayerId, cell: CellCoord) {
        if let Some(index) = self.index(cell) {
            if let Some(slot) = self.cells.get_mut(index) {
                *slot = Some(player);
            }
        }
    }

    pub(crate) fn vacate(&mut self, cell: CellCoord) {
        if let Some(index) = self.index(cell) {
            if let Some(slot) = self.cells.get_mut(index) {
                *slot = None;
            }
        }
    }

    pub(crate) fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|slot| slot.is_some()).count()
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if self.contains(cell) {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.side).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}
