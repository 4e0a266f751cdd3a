#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure turn-order rules: seating derivation, order-roll ranking, next-actor
//! search and round completion.

use arena_legends_core::{CellCoord, OrderRoll, PlayerId};

/// Derives the seating order fixed for the whole game.
///
/// Four heroes sitting on the four corners follow the corner traversal
/// top-left, top-right, bottom-right, bottom-left. Any other placement is
/// sorted by [`clock_angle`] around the grid centre; ties keep input order.
#[must_use]
pub fn seating_order(seats: &[(PlayerId, CellCoord)], side: u32) -> Vec<PlayerId> {
    if let Some(order) = corner_traversal(seats, side) {
        return order;
    }

    let center = side.saturating_sub(1) / 2;
    let mut angled: Vec<(PlayerId, f64)> = seats
        .iter()
        .map(|(player, cell)| (*player, clock_angle(*cell, center, center)))
        .collect();
    angled.sort_by(|left, right| left.1.total_cmp(&right.1));
    angled.into_iter().map(|(player, _)| player).collect()
}

/// Clock-face angle of `cell` around the provided centre, in degrees.
///
/// Computed as `(90 − atan2(Δrow, Δcolumn)) mod 360`.
#[must_use]
pub fn clock_angle(cell: CellCoord, center_row: u32, center_column: u32) -> f64 {
    let row_delta = f64::from(cell.row()) - f64::from(center_row);
    let column_delta = f64::from(cell.column()) - f64::from(center_column);
    (90.0 - row_delta.atan2(column_delta).to_degrees()).rem_euclid(360.0)
}

fn corner_traversal(seats: &[(PlayerId, CellCoord)], side: u32) -> Option<Vec<PlayerId>> {
    let last = side.checked_sub(1)?;
    let corners = [
        CellCoord::new(0, 0),
        CellCoord::new(0, last),
        CellCoord::new(last, last),
        CellCoord::new(last, 0),
    ];
    if seats.len() != corners.len() {
        return None;
    }

    corners
        .iter()
        .map(|corner| {
            seats
                .iter()
                .find(|(_, cell)| cell == corner)
                .map(|(player, _)| *player)
        })
        .collect()
}

/// Sorts order rolls by descending face; equal faces keep submission order.
#[must_use]
pub fn rank_order_rolls(rolls: &[OrderRoll]) -> Vec<OrderRoll> {
    let mut ranking = rolls.to_vec();
    ranking.sort_by(|left, right| right.face.cmp(&left.face));
    ranking
}

/// Owner of the best roll, earlier submitters winning ties.
#[must_use]
pub fn first_actor(rolls: &[OrderRoll]) -> Option<PlayerId> {
    rank_order_rolls(rolls).first().map(|roll| roll.player)
}

/// Searches the seating order for the next player allowed to act.
///
/// The search starts just after `current`, wraps around, and gives up on
/// reaching the round's `first` actor. Returns `None` when `current` is not
/// seated or nobody eligible remains.
pub fn next_actor<F>(
    order: &[PlayerId],
    current: PlayerId,
    first: PlayerId,
    mut is_eligible: F,
) -> Option<PlayerId>
where
    F: FnMut(PlayerId) -> bool,
{
    let start = order.iter().position(|player| *player == current)?;
    (1..order.len())
        .map(|offset| order[(start + offset) % order.len()])
        .take_while(|candidate| *candidate != first)
        .find(|candidate| is_eligible(*candidate))
}

/// Bookkeeping of who acted during the current round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundLedger {
    round: u32,
    first: PlayerId,
    acted: Vec<PlayerId>,
}

impl RoundLedger {
    /// Opens the ledger of a round started by `first`.
    #[must_use]
    pub const fn new(round: u32, first: PlayerId) -> Self {
        Self {
            round,
            first,
            acted: Vec::new(),
        }
    }

    /// One-based round number.
    #[must_use]
    pub const fn round(&self) -> u32 {
        self.round
    }

    /// Player who opened the round.
    #[must_use]
    pub const fn first(&self) -> PlayerId {
        self.first
    }

    /// Records that the player finished a turn this round.
    pub fn mark_acted(&mut self, player: PlayerId) {
        if !self.acted.contains(&player) {
            self.acted.push(player);
        }
    }

    /// Reports whether the player already acted this round.
    #[must_use]
    pub fn has_acted(&self, player: PlayerId) -> bool {
        self.acted.contains(&player)
    }

    /// Players who acted, in turn order.
    #[must_use]
    pub fn acted(&self) -> &[PlayerId] {
        &self.acted
    }

    /// Reports whether every living player acted.
    ///
    /// Players eliminated before their turn no longer count.
    #[must_use]
    pub fn is_complete(&self, living: &[PlayerId]) -> bool {
        living.iter().all(|player| self.has_acted(*player))
    }
}
