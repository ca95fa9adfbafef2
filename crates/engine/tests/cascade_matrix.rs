use gemfall_core::{Coord, Move, Token, GRID_SIZE};
use gemfall_engine::{
    drain_cascades, generate_moves, has_any_move, EngineError, Grid, TokenStream,
};

/// 24-token stream whose settled grid has five legal moves; the first one
/// chains three cascade steps.
const CHAIN_TOKENS: [u8; 24] = [
    3, 1, 3, 4, 2, 4, 2, 5, 4, 5, 5, 5, 5, 1, 2, 2, 4, 5, 1, 1, 1, 5, 5, 5,
];

fn grid_from_codes(codes: &[u8]) -> Grid {
    let tokens = codes
        .iter()
        .map(|&c| Token::try_from(c).expect("valid code"))
        .collect();
    Grid::from_tokens(tokens).expect("grid builds")
}

fn row_codes(grid: &Grid, y: usize) -> Vec<u8> {
    (0..GRID_SIZE).map(|x| grid.at(x, y).code()).collect()
}

mod construction {
    use super::*;

    #[test]
    fn test_settled_start_is_stable_with_zero_score() {
        let grid = grid_from_codes(&CHAIN_TOKENS);
        assert_eq!(grid.score(), 0);
        assert_eq!(grid.turn(), 1);
        assert!(grid.scan_matches().is_stable());
        assert_eq!(grid.empty_count(), 0);
    }

    #[test]
    fn test_settled_start_layout() {
        let grid = grid_from_codes(&CHAIN_TOKENS);
        assert_eq!(row_codes(&grid, 0), vec![2, 2, 4, 5, 4, 2, 4, 5, 5]);
        assert_eq!(row_codes(&grid, 8), vec![3, 1, 3, 4, 2, 4, 2, 5, 4]);
        assert_eq!(grid.stream().cursor(), 6);
    }

    #[test]
    fn test_replay_from_codes_is_identical() {
        let a = grid_from_codes(&CHAIN_TOKENS);
        let b = Grid::from_stream(TokenStream::from_codes(&CHAIN_TOKENS).unwrap()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_malformed_sequences_fail_construction() {
        assert_eq!(
            Grid::from_tokens(Vec::new()),
            Err(EngineError::EmptyTokenSequence)
        );
        assert!(TokenStream::from_codes(&[1, 2, 42]).is_err());
    }
}

mod enumeration {
    use super::*;

    #[test]
    fn test_chain_grid_moves_in_scan_order() {
        let grid = grid_from_codes(&CHAIN_TOKENS);
        let moves = generate_moves(&grid);
        assert_eq!(
            moves.to_vec(),
            vec![
                Move::cells(4, 3, 4, 4),
                Move::cells(0, 4, 1, 4),
                Move::cells(1, 4, 1, 5),
                Move::cells(5, 4, 5, 5),
                Move::cells(6, 6, 7, 6),
            ]
        );
        assert!(has_any_move(&grid));
    }

    #[test]
    fn test_enumeration_does_not_mutate() {
        let grid = grid_from_codes(&CHAIN_TOKENS);
        let before = grid.clone();
        let _ = generate_moves(&grid);
        assert_eq!(grid, before);
    }
}

mod cascades {
    use super::*;

    #[test]
    fn test_first_move_chains_three_steps() {
        let mut grid = grid_from_codes(&CHAIN_TOKENS);
        grid.try_apply_move(Move::cells(4, 3, 4, 4)).unwrap();
        assert_eq!(grid.turn(), 2);

        let summary = drain_cascades(&mut grid).unwrap();
        assert_eq!(summary.steps, 3);
        assert_eq!(summary.score, 25);
        assert_eq!(grid.score(), 25);
        assert!(grid.scan_matches().is_stable());
    }

    #[test]
    fn test_stepwise_drain_matches_full_drain() {
        let mut stepwise = grid_from_codes(&CHAIN_TOKENS);
        let mut full = stepwise.clone();
        let mv = Move::cells(5, 4, 5, 5);
        stepwise.apply_move(mv);
        full.apply_move(mv);

        let mut scores = Vec::new();
        while let Some(step) = stepwise.cascade_step() {
            assert!(!step.cleared.is_empty());
            assert_eq!(step.refilled as u32, step.cleared.count());
            scores.push(step.score);
        }
        let summary = full.drain_cascades().unwrap();

        assert_eq!(scores.len(), summary.steps);
        assert_eq!(scores.iter().sum::<u32>(), summary.score);
        assert_eq!(stepwise, full);
    }

    #[test]
    fn test_fall_plan_moves_down_within_columns() {
        let mut grid = grid_from_codes(&CHAIN_TOKENS);
        grid.apply_move(Move::cells(1, 4, 1, 5));
        let step = grid.cascade_step().expect("move matches");
        for fall in step.fall.iter() {
            assert_eq!(fall.from.x, fall.to.x);
            assert!(fall.to.y > fall.from.y);
            assert!(Grid::is_inside(fall.from) && Grid::is_inside(fall.to));
        }
        assert_eq!(step.score, 12);
    }

    #[test]
    fn test_cascade_step_on_stable_grid_is_none() {
        let mut grid = grid_from_codes(&CHAIN_TOKENS);
        let before = grid.clone();
        assert!(grid.cascade_step().is_none());
        assert_eq!(grid, before);
    }
}

mod move_requests {
    use super::*;

    #[test]
    fn test_out_of_bounds_rejected() {
        let grid = grid_from_codes(&CHAIN_TOKENS);
        assert_eq!(
            grid.validate_move(Move::cells(8, 0, 9, 0)),
            Err(EngineError::OutOfBounds(Coord::new(9, 0)))
        );
    }

    #[test]
    fn test_non_adjacent_rejected() {
        let grid = grid_from_codes(&CHAIN_TOKENS);
        let mv = Move::cells(4, 3, 4, 5);
        assert_eq!(grid.validate_move(mv), Err(EngineError::NotAdjacent(mv)));
    }

    #[test]
    fn test_non_matching_is_a_plain_negative() {
        let grid = grid_from_codes(&CHAIN_TOKENS);
        assert_eq!(grid.validate_move(Move::cells(0, 0, 1, 0)), Ok(false));
        assert_eq!(grid.validate_move(Move::cells(4, 3, 4, 4)), Ok(true));
        assert_eq!(grid.validate_move(Move::cells(4, 4, 4, 3)), Ok(true));
    }
}
