#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative arena state for Arena Legends.
//!
//! The [`Arena`] owns the 7×7 occupancy grid and the hero roster. Every
//! legality decision lives here: cardinal movement, attack geometry per
//! archetype, straight and L-shaped path clearance, the ninja's attack
//! position, and plus-shaped zones. Checks are pure predicates; mutators
//! return `false` instead of failing so callers decide how to report
//! refusals.

mod hero;
mod occupancy;

pub use hero::Hero;

use arena_legends_core::{Archetype, CellCoord, Direction, PlayerId, GRID_SIZE};
use occupancy::OccupancyGrid;
use tracing::debug;

/// Represents the authoritative arena state.
#[derive(Clone, Debug)]
pub struct Arena {
    roster: Vec<Hero>,
    active: Vec<PlayerId>,
    occupancy: OccupancyGrid,
}

impl Arena {
    /// Creates an empty arena with the standard grid size.
    #[must_use]
    pub fn new() -> Self {
        Self {
            roster: Vec::new(),
            active: Vec::new(),
            occupancy: OccupancyGrid::new(GRID_SIZE),
        }
    }

    /// Number of rows and columns of the grid.
    #[must_use]
    pub const fn side(&self) -> u32 {
        self.occupancy.side()
    }

    /// Reports whether the cell lies within the grid.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        self.occupancy.contains(cell)
    }

    /// Adds a hero to the roster with full health, unplaced.
    ///
    /// Identifiers are roster indices, handed out from zero in enlistment
    /// order.
    pub fn enlist(&mut self, name: impl Into<String>, archetype: Archetype) -> PlayerId {
        debug_assert!(self.roster.len() < u32::MAX as usize, "roster exhausted the id space");
        let id = PlayerId::new(self.roster.len() as u32);
        self.roster.push(Hero::new(id, name.into(), archetype));
        id
    }

    /// Every hero ever enlisted, indexed by identifier.
    #[must_use]
    pub fn roster(&self) -> &[Hero] {
        &self.roster
    }

    /// Heroes currently standing on the grid, in placement order.
    #[must_use]
    pub fn active_players(&self) -> &[PlayerId] {
        &self.active
    }

    /// Looks up a hero by identifier.
    #[must_use]
    pub fn hero(&self, id: PlayerId) -> Option<&Hero> {
        self.roster.get(id.index())
    }

    /// Looks up a hero by identifier for mutation.
    pub fn hero_mut(&mut self, id: PlayerId) -> Option<&mut Hero> {
        self.roster.get_mut(id.index())
    }

    /// Hero standing on the provided cell, if any.
    #[must_use]
    pub fn occupant(&self, cell: CellCoord) -> Option<PlayerId> {
        self.occupancy.occupant(cell)
    }

    /// Reports whether the cell is inside the grid and unoccupied.
    #[must_use]
    pub fn is_free(&self, cell: CellCoord) -> bool {
        self.occupancy.is_free(cell)
    }

    /// Puts an unplaced living hero on a free in-bounds cell.
    pub fn place_player(&mut self, id: PlayerId, cell: CellCoord) -> bool {
        if !self.occupancy.is_free(cell) {
            return false;
        }
        let Some(hero) = self.roster.get_mut(id.index()) else {
            return false;
        };
        if hero.cell.is_some() || !hero.is_alive() {
            return false;
        }

        hero.cell = Some(cell);
        self.occupancy.occupy(id, cell);
        self.active.push(id);
        true
    }

    /// Reports whether the hero may move to `to` under its movement rule.
    ///
    /// Moves run along one cardinal axis and cover exactly the archetype's
    /// move range; longer moves also need every intermediate cell empty.
    #[must_use]
    pub fn is_valid_move(&self, id: PlayerId, to: CellCoord) -> bool {
        let Some((hero, from)) = self.placed_hero(id) else {
            return false;
        };
        let Some((_, distance)) = cardinal_line(from, to) else {
            return false;
        };
        if distance != hero.stats().move_range || !self.occupancy.is_free(to) {
            return false;
        }
        distance < 2 || self.is_path_clear(from, to)
    }

    /// Moves a hero, vacating its old cell and occupying the new one.
    pub fn move_player(&mut self, id: PlayerId, to: CellCoord) -> bool {
        if !self.is_valid_move(id, to) {
            debug!(player = id.get(), row = to.row(), column = to.column(), "move refused");
            return false;
        }
        self.relocate(id, to)
    }

    /// Relocates a hero one or two cells along a clear cardinal line.
    ///
    /// Used for the ninja's forced move before an attack; the exact move
    /// range does not apply.
    pub fn dash_to(&mut self, id: PlayerId, to: CellCoord) -> bool {
        let Some((_, from)) = self.placed_hero(id) else {
            return false;
        };
        let legal = matches!(cardinal_line(from, to), Some((_, 1..=2)))
            && self.occupancy.is_free(to)
            && self.is_path_clear(from, to);
        if !legal {
            debug!(player = id.get(), row = to.row(), column = to.column(), "dash refused");
            return false;
        }
        self.relocate(id, to)
    }

    /// Destinations reachable with one move, visited north, south, west, east.
    #[must_use]
    pub fn accessible_cells(&self, id: PlayerId) -> Vec<CellCoord> {
        let Some((hero, from)) = self.placed_hero(id) else {
            return Vec::new();
        };
        let range = hero.stats().move_range;
        Direction::ALL
            .into_iter()
            .filter_map(|direction| from.step(direction, range))
            .filter(|cell| self.occupancy.is_free(*cell))
            .filter(|cell| range < 2 || self.is_path_clear(from, *cell))
            .collect()
    }

    /// Reports whether `attacker` can strike `target` from where it stands.
    #[must_use]
    pub fn can_attack(&self, attacker: PlayerId, target: PlayerId) -> bool {
        if attacker == target {
            return false;
        }
        let (Some((hero, from)), Some((_, to))) =
            (self.placed_hero(attacker), self.placed_hero(target))
        else {
            return false;
        };

        let distance = from.manhattan_distance(to);
        let straight = cardinal_line(from, to).is_some();
        let stats = hero.stats();
        match hero.archetype() {
            Archetype::Ninja => match distance {
                1 => true,
                3 if straight => self.is_path_clear(from, to),
                3 => self.l_path_turn(from, to).is_some(),
                _ => false,
            },
            Archetype::Knight | Archetype::Sorcerer => {
                straight && distance >= stats.min_attack_range && distance <= stats.max_attack_range
            }
        }
    }

    /// Living placed heroes the provided hero can strike, in placement order.
    #[must_use]
    pub fn attackable_targets(&self, id: PlayerId) -> Vec<PlayerId> {
        self.active
            .iter()
            .copied()
            .filter(|target| self.can_attack(id, *target))
            .collect()
    }

    /// Reports whether every cell strictly between `from` and `to` is empty.
    ///
    /// Diagonal offsets are never clear.
    #[must_use]
    pub fn is_path_clear(&self, from: CellCoord, to: CellCoord) -> bool {
        let (rows, columns) = from.delta_to(to);
        if rows != 0 && columns != 0 {
            return false;
        }
        let steps = rows.abs().max(columns.abs());
        let (row_step, column_step) = (rows.signum(), columns.signum());
        (1..steps).all(|step| {
            from.offset(row_step * step, column_step * step)
                .map_or(false, |cell| self.occupancy.is_free(cell))
        })
    }

    /// Turning cell of the first clear L-shaped route from `from` to `to`.
    ///
    /// Only offsets of two-by-one or one-by-two cells have L routes. A route
    /// runs two cells along one axis, then turns and takes the last step
    /// along the other, so the turning cell is always adjacent to `to`. The
    /// horizontal-first route is tried before the vertical-first one; only
    /// the route whose first leg follows the two-cell axis can be clear.
    #[must_use]
    pub fn l_path_turn(&self, from: CellCoord, to: CellCoord) -> Option<CellCoord> {
        let (rows, columns) = from.delta_to(to);
        if !matches!((rows.abs(), columns.abs()), (2, 1) | (1, 2)) {
            return None;
        }

        let routes = [
            from.offset(0, 2 * columns.signum()),
            from.offset(2 * rows.signum(), 0),
        ];
        let turn = routes.into_iter().flatten().find(|turn| {
            self.occupancy.is_free(*turn)
                && self.is_path_clear(from, *turn)
                && self.is_path_clear(*turn, to)
        });
        debug!(
            from_row = from.row(),
            from_column = from.column(),
            to_row = to.row(),
            to_column = to.column(),
            clear = turn.is_some(),
            "l path checked"
        );
        turn
    }

    /// Cell a ninja at `from` must stand on to strike the hero at `target`.
    ///
    /// Adjacent targets need no move and yield `from`. Straight targets three
    /// cells away yield the cell one step short of the target; L-shaped
    /// targets yield the turning cell of the clear route.
    #[must_use]
    pub fn ninja_attack_position(&self, from: CellCoord, target: CellCoord) -> Option<CellCoord> {
        match from.manhattan_distance(target) {
            1 => Some(from),
            3 => match cardinal_line(from, target) {
                Some((direction, _)) => {
                    if !self.is_path_clear(from, target) {
                        return None;
                    }
                    let (rows, columns) = direction.delta();
                    target.offset(-rows, -columns)
                }
                None => self.l_path_turn(from, target),
            },
            _ => None,
        }
    }

    /// Takes a hero off the grid; it stays in the roster.
    pub fn remove_player(&mut self, id: PlayerId) -> bool {
        let Some(position) = self.active.iter().position(|active| *active == id) else {
            return false;
        };
        let _ = self.active.remove(position);
        if let Some(hero) = self.roster.get_mut(id.index()) {
            if let Some(cell) = hero.cell.take() {
                self.occupancy.vacate(cell);
            }
        }
        debug!(player = id.get(), "player removed from arena");
        true
    }

    /// Centre cell plus up to `range` cells in each cardinal direction.
    ///
    /// Cells outside the grid are clipped. For every distance the order is
    /// north, south, west, east.
    #[must_use]
    pub fn plus_shaped_zone(&self, center: CellCoord, range: u32) -> Vec<CellCoord> {
        if !self.contains(center) {
            return Vec::new();
        }
        let mut zone = vec![center];
        for distance in 1..=range {
            zone.extend(
                Direction::ALL
                    .into_iter()
                    .filter_map(|direction| center.step(direction, distance))
                    .filter(|cell| self.contains(*cell)),
            );
        }
        zone
    }

    /// Living heroes standing inside the provided zone, in zone order.
    #[must_use]
    pub fn players_in_zone(&self, zone: &[CellCoord]) -> Vec<PlayerId> {
        zone.iter()
            .filter_map(|cell| self.occupancy.occupant(*cell))
            .filter(|id| self.hero(*id).map_or(false, Hero::is_alive))
            .collect()
    }

    fn placed_hero(&self, id: PlayerId) -> Option<(&Hero, CellCoord)> {
        let hero = self.hero(id)?;
        if !hero.is_alive() {
            return None;
        }
        hero.cell().map(|cell| (hero, cell))
    }

    fn relocate(&mut self, id: PlayerId, to: CellCoord) -> bool {
        let Some(hero) = self.roster.get_mut(id.index()) else {
            return false;
        };
        let Some(from) = hero.cell else {
            return false;
        };
        hero.cell = Some(to);
        self.occupancy.vacate(from);
        self.occupancy.occupy(id, to);
        true
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

/// Direction and length of a non-zero offset along a single axis.
fn cardinal_line(from: CellCoord, to: CellCoord) -> Option<(Direction, u32)> {
    let row_diff = from.row().abs_diff(to.row());
    let column_diff = from.column().abs_diff(to.column());

    match (row_diff, column_diff) {
        (0, 0) => None,
        (0, distance) if to.column() > from.column() => Some((Direction::East, distance)),
        (0, distance) => Some((Direction::West, distance)),
        (distance, 0) if to.row() > from.row() => Some((Direction::South, distance)),
        (distance, 0) => Some((Direction::North, distance)),
        _ => None,
    }
}

/// Query functions that provide read-only access to the arena state.
pub mod query {
    use super::{Arena, Hero};
    use arena_legends_core::{PlayerId, RosterView};

    /// Captures a read-only view of every hero in the roster.
    #[must_use]
    pub fn roster_view(arena: &Arena) -> RosterView {
        RosterView::from_snapshots(arena.roster.iter().map(Hero::snapshot).collect())
    }

    /// Heroes with health left, in roster order.
    #[must_use]
    pub fn living_players(arena: &Arena) -> Vec<PlayerId> {
        arena
            .roster
            .iter()
            .filter(|hero| hero.is_alive())
            .map(Hero::id)
            .collect()
    }

    /// Number of grid cells currently holding a hero.
    #[must_use]
    pub fn occupied_cell_count(arena: &Arena) -> usize {
        arena.occupancy.occupied_count()
    }

    /// Reports whether every placed hero and its cell point at each other.
    #[must_use]
    pub fn is_consistent(arena: &Arena) -> bool {
        let linked = arena.active.iter().all(|id| {
            arena
                .hero(*id)
                .and_then(Hero::cell)
                .map_or(false, |cell| arena.occupancy.occupant(cell) == Some(*id))
        });
        linked && arena.occupancy.occupied_count() == arena.active.len()
    }
}
