//! Property-based tests for grid mechanics.

use gemfall_core::{Cells, Coord, LevelProfile, Move, Token, GRID_SIZE, MIN_EXPLODE};
use gemfall_engine::{drain_cascades, generate_moves, Grid, TokenStream};
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Strategy: a full 9x9 matrix of gems (no empties).
fn cells_strategy() -> impl Strategy<Value = Cells> {
    prop::array::uniform9(prop::array::uniform9(0usize..5))
        .prop_map(|rows| rows.map(|row| row.map(|i| Token::GEMS[i])))
}

/// Strategy: a matrix with roughly a fifth of the cells emptied.
fn holey_cells_strategy() -> impl Strategy<Value = Cells> {
    prop::array::uniform9(prop::array::uniform9(0usize..6)).prop_map(|rows| {
        rows.map(|row| row.map(|i| if i == 5 { Token::Empty } else { Token::GEMS[i] }))
    })
}

fn coord_strategy() -> impl Strategy<Value = Coord> {
    (-1i8..=GRID_SIZE as i8, -1i8..=GRID_SIZE as i8).prop_map(|(x, y)| Coord::new(x, y))
}

fn profile_stream(seed: u64) -> TokenStream {
    TokenStream::from_profile(&LevelProfile::l3(), &mut SmallRng::seed_from_u64(seed))
        .expect("l3 has positive weights")
}

/// Brute-force: is `(x, y)` inside some row or column run of length >= MIN_EXPLODE?
fn in_brute_force_run(cells: &Cells, x: usize, y: usize) -> bool {
    let token = cells[y][x];
    let row: Vec<Token> = cells[y].to_vec();
    let col: Vec<Token> = (0..GRID_SIZE).map(|r| cells[r][x]).collect();
    [(row, x), (col, y)].iter().any(|(line, at)| {
        (0..GRID_SIZE).any(|start| {
            (start + MIN_EXPLODE..=GRID_SIZE).any(|end| {
                (start..end).contains(at) && line[start..end].iter().all(|&t| t == token)
            })
        })
    })
}

proptest! {
    // 1. Any grid is stable and full once cascades are drained
    #[test]
    fn drained_grid_is_stable(cells in cells_strategy(), seed in any::<u64>()) {
        let mut grid = Grid::with_cells(cells, profile_stream(seed));
        drain_cascades(&mut grid).expect("cascade settles");
        let scan = grid.scan_matches();
        prop_assert_eq!(scan.score, 0);
        prop_assert!(scan.mask.is_empty());
        prop_assert_eq!(grid.empty_count(), 0);
    }

    // 2. is_exploding agrees with an independent run scan
    #[test]
    fn is_exploding_matches_brute_force(cells in cells_strategy()) {
        let grid = Grid::with_cells(cells, profile_stream(0));
        for y in 0..GRID_SIZE {
            for x in 0..GRID_SIZE {
                prop_assert_eq!(
                    grid.is_exploding(x, y),
                    in_brute_force_run(&cells, x, y),
                    "cell ({}, {})", x, y
                );
            }
        }
    }

    // 3. The scan mask is exactly the set of exploding cells
    #[test]
    fn scan_mask_matches_is_exploding(cells in holey_cells_strategy()) {
        let grid = Grid::with_cells(cells, profile_stream(0));
        let scan = grid.scan_matches();
        for y in 0..GRID_SIZE {
            for x in 0..GRID_SIZE {
                prop_assert_eq!(scan.mask.contains(x, y), grid.is_exploding(x, y));
            }
        }
    }

    // 4. can_swap never changes the grid
    #[test]
    fn can_swap_is_side_effect_free(
        cells in cells_strategy(),
        a in coord_strategy(),
        b in coord_strategy(),
    ) {
        let grid = Grid::with_cells(cells, profile_stream(1));
        let before = grid.clone();
        let _ = grid.can_swap(a, b);
        let _ = grid.can_swap(b, a);
        prop_assert_eq!(grid, before);
    }

    // 5. can_swap is symmetric in its arguments
    #[test]
    fn can_swap_is_symmetric(cells in cells_strategy(), a in coord_strategy(), b in coord_strategy()) {
        let grid = Grid::with_cells(cells, profile_stream(1));
        prop_assert_eq!(grid.can_swap(a, b), grid.can_swap(b, a));
    }

    // 6. Gravity keeps column order and pushes empties to the top
    #[test]
    fn fall_preserves_column_order(cells in holey_cells_strategy()) {
        let mut grid = Grid::with_cells(cells, profile_stream(2));
        let plan = grid.compute_fall();
        grid.apply_fall(&plan);
        for x in 0..GRID_SIZE {
            let before: Vec<Token> =
                (0..GRID_SIZE).map(|y| cells[y][x]).filter(|t| !t.is_empty()).collect();
            let after: Vec<Token> = (0..GRID_SIZE).map(|y| grid.at(x, y)).collect();
            let gap = GRID_SIZE - before.len();
            prop_assert!(after[..gap].iter().all(|t| t.is_empty()));
            prop_assert_eq!(&after[gap..], before.as_slice());
        }
    }

    // 7. Refilling a full grid consumes nothing
    #[test]
    fn refill_full_grid_is_noop(cells in cells_strategy(), seed in any::<u64>()) {
        let mut grid = Grid::with_cells(cells, profile_stream(seed));
        let before = grid.clone();
        prop_assert_eq!(grid.refill(), 0);
        prop_assert_eq!(grid, before);
    }

    // 8. Enumerated moves are adjacent, pass can_swap and never start on the
    //    last row or column
    #[test]
    fn enumerated_moves_are_legal(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let grid = Grid::from_profile(&LevelProfile::l2(), &mut rng).expect("grid builds");
        let last = GRID_SIZE as i8 - 1;
        for mv in generate_moves(&grid).iter() {
            prop_assert!(mv.is_adjacent());
            prop_assert!(grid.can_swap(mv.from, mv.to));
            prop_assert!(mv.from.x < last && mv.from.y < last);
        }
    }
}

/// Play `turns` moves, always the first legal one, recording every state.
fn play_first_moves(seed: u64, turns: usize) -> Vec<(Cells, u32, u32)> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut grid = Grid::from_profile(&LevelProfile::l1(), &mut rng).expect("grid builds");
    let mut states = vec![(*grid.cells(), grid.score(), grid.turn())];
    for _ in 0..turns {
        let Some(mv) = generate_moves(&grid).first() else {
            break;
        };
        grid.apply_move(mv);
        drain_cascades(&mut grid).expect("cascade settles");
        states.push((*grid.cells(), grid.score(), grid.turn()));
    }
    states
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    // 9. Same seed and same moves give the same session, step by step
    #[test]
    fn sessions_are_deterministic(seed in any::<u64>()) {
        prop_assert_eq!(play_first_moves(seed, 8), play_first_moves(seed, 8));
    }

    // 10. Score never decreases and turn counts committed moves
    #[test]
    fn score_monotone_turn_counts_moves(seed in any::<u64>()) {
        let states = play_first_moves(seed, 8);
        for (i, pair) in states.windows(2).enumerate() {
            prop_assert!(pair[1].1 >= pair[0].1);
            prop_assert_eq!(pair[1].2, i as u32 + 2);
        }
    }

    // 11. A replay from the recorded token sequence reproduces the start
    #[test]
    fn token_replay_reproduces_start(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let grid = Grid::from_profile(&LevelProfile::l3(), &mut rng).expect("grid builds");
        let replayed = Grid::from_tokens(grid.stream().tokens().to_vec()).expect("replay builds");
        prop_assert_eq!(replayed, grid);
    }
}

#[test]
fn test_move_validation_never_mutates() {
    let mut rng = SmallRng::seed_from_u64(99);
    let mut grid = Grid::from_profile(&LevelProfile::l2(), &mut rng).expect("grid builds");
    let before = grid.clone();
    for mv in [
        Move::cells(0, 0, 0, 0),
        Move::cells(0, 0, 2, 0),
        Move::cells(8, 8, 9, 8),
        Move::cells(-1, 0, 0, 0),
    ] {
        assert!(grid.try_apply_move(mv).is_err());
    }
    assert_eq!(grid, before);
}
