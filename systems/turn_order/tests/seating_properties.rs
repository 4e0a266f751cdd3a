//! Seating order properties over random placements.

use std::collections::HashSet;

use arena_legends_core::{CellCoord, DieFace, OrderRoll, PlayerId, GRID_SIZE};
use arena_legends_system_turn_order::{clock_angle, first_actor, seating_order};
use proptest::prelude::*;

fn placements() -> impl Strategy<Value = Vec<(PlayerId, CellCoord)>> {
    let cells: Vec<CellCoord> = (0..GRID_SIZE)
        .flat_map(|row| (0..GRID_SIZE).map(move |column| CellCoord::new(row, column)))
        .collect();
    proptest::sample::subsequence(cells, 2..=4)
        .prop_shuffle()
        .prop_map(|cells| {
            cells
                .into_iter()
                .enumerate()
                .map(|(index, cell)| (PlayerId::new(index as u32), cell))
                .collect()
        })
}

proptest! {
    /// Every seat appears exactly once in the derived order.
    #[test]
    fn prop_seating_order_is_a_permutation(seats in placements()) {
        let order = seating_order(&seats, GRID_SIZE);

        prop_assert_eq!(order.len(), seats.len());
        let unique: HashSet<PlayerId> = order.iter().copied().collect();
        prop_assert_eq!(unique.len(), seats.len());
    }

    /// Off-corner placements come out sorted by clock angle.
    #[test]
    fn prop_angles_never_decrease(seats in placements()) {
        let order = seating_order(&seats, GRID_SIZE);
        let angle_of = |player: PlayerId| {
            seats
                .iter()
                .find(|(id, _)| *id == player)
                .map(|(_, cell)| clock_angle(*cell, 3, 3))
                .expect("seated")
        };
        let on_corners = seats.len() == 4
            && seats.iter().all(|(_, cell)| {
                (cell.row() == 0 || cell.row() == 6) && (cell.column() == 0 || cell.column() == 6)
            });

        if !on_corners {
            for pair in order.windows(2) {
                prop_assert!(angle_of(pair[0]) <= angle_of(pair[1]));
            }
        }
    }

    /// The first actor always holds the highest face.
    #[test]
    fn prop_first_actor_holds_best_roll(faces in proptest::collection::vec(1u8..=6, 1..=4)) {
        let rolls: Vec<OrderRoll> = faces
            .iter()
            .enumerate()
            .map(|(index, face)| OrderRoll {
                player: PlayerId::new(index as u32),
                face: DieFace::new(*face).expect("valid face"),
            })
            .collect();
        let best = faces.iter().copied().max().expect("non-empty");
        let earliest = faces.iter().position(|face| *face == best).expect("present");

        prop_assert_eq!(first_actor(&rolls), Some(PlayerId::new(earliest as u32)));
    }
}
