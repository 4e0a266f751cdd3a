//! Grid-wide legality properties checked over random arenas.

use arena_legends_core::{Archetype, CellCoord, PlayerId, GRID_SIZE};
use arena_legends_world::{query, Arena};
use proptest::prelude::*;

fn all_cells() -> Vec<CellCoord> {
    (0..GRID_SIZE)
        .flat_map(|row| (0..GRID_SIZE).map(move |column| CellCoord::new(row, column)))
        .collect()
}

fn archetype() -> impl Strategy<Value = Archetype> {
    prop_oneof![
        Just(Archetype::Knight),
        Just(Archetype::Ninja),
        Just(Archetype::Sorcerer),
    ]
}

/// Distinct cells paired with an archetype each.
fn crowd(max: usize) -> impl Strategy<Value = Vec<(Archetype, CellCoord)>> {
    proptest::sample::subsequence(all_cells(), 2..=max)
        .prop_shuffle()
        .prop_flat_map(|cells| {
            let count = cells.len();
            (Just(cells), proptest::collection::vec(archetype(), count))
        })
        .prop_map(|(cells, archetypes)| archetypes.into_iter().zip(cells).collect())
}

fn build(crowd: &[(Archetype, CellCoord)]) -> (Arena, Vec<PlayerId>) {
    let mut arena = Arena::new();
    let ids = crowd
        .iter()
        .enumerate()
        .map(|(index, (archetype, cell))| {
            let id = arena.enlist(format!("Player {}", index + 1), *archetype);
            assert!(arena.place_player(id, *cell));
            id
        })
        .collect();
    (arena, ids)
}

fn is_diagonal(from: CellCoord, to: CellCoord) -> bool {
    from.row() != to.row() && from.column() != to.column()
}

fn interior_clear(arena: &Arena, from: CellCoord, to: CellCoord) -> bool {
    let (rows, columns) = from.delta_to(to);
    let steps = rows.abs().max(columns.abs());
    (1..steps).all(|step| {
        let cell = from
            .offset(rows.signum() * step, columns.signum() * step)
            .expect("interior cells lie inside the grid");
        arena.occupant(cell).is_none()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Sorcerers never target adjacent, distant, or diagonal heroes.
    #[test]
    fn prop_sorcerer_targets_stay_in_line_and_range(crowd in crowd(10)) {
        let (arena, ids) = build(&crowd);

        for id in ids.iter().filter(|id| {
            arena.hero(**id).map(|hero| hero.archetype()) == Some(Archetype::Sorcerer)
        }) {
            let from = arena.hero(*id).and_then(|hero| hero.cell()).expect("placed");
            for target in arena.attackable_targets(*id) {
                let to = arena.hero(target).and_then(|hero| hero.cell()).expect("placed");
                let distance = from.manhattan_distance(to);
                prop_assert!((2..=3).contains(&distance), "distance {}", distance);
                prop_assert!(!is_diagonal(from, to));
            }
        }
    }

    /// Every accessible cell is a valid move that conserves occupancy.
    #[test]
    fn prop_accessible_moves_conserve_occupancy(crowd in crowd(12)) {
        let (arena, ids) = build(&crowd);
        let occupied = query::occupied_cell_count(&arena);

        for id in &ids {
            let origin = arena.hero(*id).and_then(|hero| hero.cell()).expect("placed");
            for destination in arena.accessible_cells(*id) {
                prop_assert!(arena.is_valid_move(*id, destination));

                let mut moved = arena.clone();
                prop_assert!(moved.move_player(*id, destination));
                prop_assert_eq!(moved.occupant(origin), None);
                prop_assert_eq!(moved.occupant(destination), Some(*id));
                prop_assert_eq!(query::occupied_cell_count(&moved), occupied);
                prop_assert!(query::is_consistent(&moved));
            }
        }
    }

    /// Ninja reach at distance three matches an independent path check.
    #[test]
    fn prop_ninja_reach_matches_route_clearance(crowd in crowd(14)) {
        let (arena, ids) = build(&crowd);

        for id in ids.iter().filter(|id| {
            arena.hero(**id).map(|hero| hero.archetype()) == Some(Archetype::Ninja)
        }) {
            let from = arena.hero(*id).and_then(|hero| hero.cell()).expect("placed");
            for target in ids.iter().filter(|target| *target != id) {
                let to = arena.hero(*target).and_then(|hero| hero.cell()).expect("placed");
                let expected = match from.manhattan_distance(to) {
                    1 => true,
                    3 if !is_diagonal(from, to) => interior_clear(&arena, from, to),
                    3 => {
                        let (rows, columns) = from.delta_to(to);
                        let shaped = matches!((rows.abs(), columns.abs()), (2, 1) | (1, 2));
                        // Two cells along the long axis, then one across.
                        let turn = if rows.abs() == 2 {
                            from.offset(rows.signum() * 2, 0)
                        } else {
                            from.offset(0, columns.signum() * 2)
                        };
                        shaped
                            && turn.map_or(false, |turn| {
                                arena.contains(turn)
                                    && arena.occupant(turn).is_none()
                                    && interior_clear(&arena, from, turn)
                                    && turn.manhattan_distance(to) == 1
                            })
                    }
                    _ => false,
                };
                prop_assert_eq!(arena.can_attack(*id, *target), expected);
            }
        }
    }

    /// Every ninja strike is delivered from a free cell next to the target.
    #[test]
    fn prop_ninja_strikes_from_an_adjacent_free_cell(crowd in crowd(14)) {
        let (arena, ids) = build(&crowd);

        for id in ids.iter().filter(|id| {
            arena.hero(**id).map(|hero| hero.archetype()) == Some(Archetype::Ninja)
        }) {
            let from = arena.hero(*id).and_then(|hero| hero.cell()).expect("placed");
            for target in ids.iter().filter(|target| arena.can_attack(*id, **target)) {
                let to = arena.hero(*target).and_then(|hero| hero.cell()).expect("placed");
                let position = arena.ninja_attack_position(from, to).expect("reachable target");
                prop_assert_eq!(position.manhattan_distance(to), 1);
                prop_assert!(position == from || arena.occupant(position).is_none());
            }
        }
    }
}
