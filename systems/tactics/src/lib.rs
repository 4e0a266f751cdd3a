#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Computer-player policies.
//!
//! A [`Strategy`] looks at the arena from the point of view of the current
//! actor and answers with the commands a person would have issued. Policies
//! never mutate state; the game validates their commands like any other.

use arena_legends_core::{ActionKind, Archetype, CellCoord, Command, HeroPool, PlayerId};
use arena_legends_world::Arena;

/// Decision policy driving a computer seat.
pub trait Strategy {
    /// Chooses the commands for the actor's turn.
    fn decide(&self, arena: &Arena, actor: PlayerId) -> Vec<Command>;

    /// Chooses a hero for the seat from what the pool still holds.
    fn choose_hero(&self, pool: &HeroPool, seat: u8) -> Option<Archetype> {
        let start = usize::from(seat) % Archetype::ALL.len();
        Archetype::ALL
            .iter()
            .cycle()
            .skip(start)
            .take(Archetype::ALL.len())
            .copied()
            .find(|archetype| pool.remaining(*archetype) > 0)
    }
}

/// Greedy policy: strike the weakest reachable hero, otherwise close in.
#[derive(Clone, Copy, Debug, Default)]
pub struct Greedy;

impl Greedy {
    /// Creates the greedy policy.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Strategy for Greedy {
    fn decide(&self, arena: &Arena, actor: PlayerId) -> Vec<Command> {
        if let Some(cell) = weakest_target(arena, actor) {
            return vec![
                Command::SelectAction {
                    action: ActionKind::Attack,
                },
                Command::ClickCell {
                    cell,
                    action: ActionKind::Attack,
                },
            ];
        }

        if let Some(cell) = approach(arena, actor) {
            return vec![
                Command::SelectAction {
                    action: ActionKind::Move,
                },
                Command::ClickCell {
                    cell,
                    action: ActionKind::Move,
                },
            ];
        }

        vec![Command::Pass]
    }
}

/// Cell of the attackable hero with the least health; first one on ties.
fn weakest_target(arena: &Arena, actor: PlayerId) -> Option<CellCoord> {
    arena
        .attackable_targets(actor)
        .into_iter()
        .filter_map(|id| arena.hero(id))
        .min_by_key(|hero| hero.health())
        .and_then(|hero| hero.cell())
}

/// First accessible cell minimising the distance to the nearest opponent.
fn approach(arena: &Arena, actor: PlayerId) -> Option<CellCoord> {
    let opponents: Vec<CellCoord> = arena
        .active_players()
        .iter()
        .filter(|id| **id != actor)
        .filter_map(|id| arena.hero(*id).and_then(|hero| hero.cell()))
        .collect();
    if opponents.is_empty() {
        return None;
    }

    arena
        .accessible_cells(actor)
        .into_iter()
        .min_by_key(|cell| {
            opponents
                .iter()
                .map(|opponent| cell.manhattan_distance(*opponent))
                .min()
                .unwrap_or(u32::MAX)
        })
}
