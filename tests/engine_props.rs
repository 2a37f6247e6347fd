//! Property tests for engine invariants.

use block_drop::game::{fits, is_outside_bounds, try_move, try_rotate, GameEvent};
use block_drop::{Action, GameSession, Grid, Piece, PieceBag, ALL_KINDS};
use proptest::prelude::*;
use std::collections::HashSet;

fn any_piece() -> impl Strategy<Value = Piece> {
    (0..ALL_KINDS.len(), 0usize..4, -3i32..20, -3i32..12).prop_map(|(kind, rotation, row, col)| {
        Piece::with_rotation(ALL_KINDS[kind], rotation, (row, col))
    })
}

fn any_press() -> impl Strategy<Value = Option<Action>> {
    prop_oneof![
        Just(None),
        Just(Some(Action::Rotate)),
        Just(Some(Action::MoveLeft)),
        Just(Some(Action::MoveRight)),
    ]
}

proptest! {
    #[test]
    fn full_rotation_cycle_is_identity(piece in any_piece()) {
        let mut turned = piece;
        for _ in 0..piece.kind.rotation_count() {
            turned.rotate();
        }
        prop_assert_eq!(turned, piece);
        turned.rotate();
        turned.undo_rotate();
        prop_assert_eq!(turned, piece);
    }

    #[test]
    fn cells_are_four_distinct(piece in any_piece()) {
        let cells: HashSet<_> = piece.cells().into_iter().collect();
        prop_assert_eq!(cells.len(), 4);
    }

    #[test]
    fn rejected_rotation_changes_nothing(piece in any_piece()) {
        let grid = Grid::new();
        let mut rotated = piece;
        if try_rotate(&grid, &mut rotated) {
            prop_assert!(fits(&grid, &rotated));
        } else {
            prop_assert_eq!(rotated, piece);
        }
    }

    #[test]
    fn rejected_move_changes_nothing(piece in any_piece(), rows in -1i32..=1, cols in -1i32..=1) {
        let grid = Grid::new();
        let mut moved = piece;
        if try_move(&grid, &mut moved, rows, cols) {
            prop_assert!(!is_outside_bounds(&moved));
        } else {
            prop_assert_eq!(moved, piece);
        }
    }

    #[test]
    fn bag_cycles_are_permutations(seed in any::<u64>()) {
        let mut bag = PieceBag::seeded(seed);
        for _ in 0..3 {
            let cycle: HashSet<_> = (0..7).map(|_| bag.next()).collect();
            prop_assert_eq!(cycle.len(), 7);
        }
    }

    #[test]
    fn score_only_drops_on_restart(
        seed in any::<u64>(),
        frames in prop::collection::vec((any_press(), any::<bool>(), 0.0f32..0.6), 1..300),
    ) {
        let mut game = GameSession::with_seed(seed);
        let mut last = game.score();
        for (press, soft_drop, dt) in frames {
            game.handle_press(press);
            game.update(dt, soft_drop);
            let restarted = game.drain_events().any(|event| event == GameEvent::Restarted);
            prop_assert!(restarted || game.score() >= last);
            last = game.score();
        }
    }
}
