//! The match-3 grid: cell matrix, score, turn counter and attached token stream.
//!
//! Cascade scanning, gravity and resolution live in sibling modules as further
//! `impl Grid` blocks; this file holds construction, cell access and the swap
//! primitives.

use gemfall_core::{Cells, Coord, LevelProfile, Move, Token, GRID_SIZE, MIN_EXPLODE};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::resolve::drain_cascades;
use crate::{EngineError, TokenStream};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    pub(crate) cells: Cells,
    pub(crate) score: u32,
    pub(crate) turn: u32,
    pub(crate) stream: TokenStream,
}

/// Read-only view handed to a presentation shell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub cells: Cells,
    pub score: u32,
    pub turn: u32,
}

impl Grid {
    pub const SIZE: usize = GRID_SIZE;

    /// Build a grid from an explicit matrix without settling it.
    pub fn with_cells(cells: Cells, stream: TokenStream) -> Self {
        Self {
            cells,
            score: 0,
            turn: 1,
            stream,
        }
    }

    /// Fill row-major from the stream, settle, then zero the score so the
    /// auto-resolved start is never credited.
    pub fn from_stream(mut stream: TokenStream) -> Result<Self, EngineError> {
        let mut cells = [[Token::Empty; GRID_SIZE]; GRID_SIZE];
        for row in cells.iter_mut() {
            for (cell, token) in row.iter_mut().zip(stream.draw(GRID_SIZE)) {
                *cell = token;
            }
        }

        let mut grid = Self::with_cells(cells, stream);
        let summary = drain_cascades(&mut grid)?;
        debug!(
            steps = summary.steps,
            discarded_score = summary.score,
            cursor = grid.stream.cursor(),
            "initial grid settled"
        );
        grid.score = 0;
        Ok(grid)
    }

    pub fn from_profile<R: Rng + ?Sized>(
        profile: &LevelProfile,
        rng: &mut R,
    ) -> Result<Self, EngineError> {
        Self::from_stream(TokenStream::from_profile(profile, rng)?)
    }

    /// Rebuild from a recorded token sequence for exact replay.
    pub fn from_tokens(tokens: Vec<Token>) -> Result<Self, EngineError> {
        Self::from_stream(TokenStream::from_tokens(tokens)?)
    }

    /// Convert a row-major matrix of unknown shape, rejecting any size other
    /// than `GRID_SIZE x GRID_SIZE`.
    pub fn cells_from_rows(rows: &[Vec<Token>]) -> Result<Cells, EngineError> {
        let mismatch = |cols| EngineError::GridSizeMismatch {
            expected: GRID_SIZE,
            rows: rows.len(),
            cols,
        };
        if rows.len() != GRID_SIZE {
            return Err(mismatch(rows.first().map_or(0, Vec::len)));
        }
        let mut cells = [[Token::Empty; GRID_SIZE]; GRID_SIZE];
        for (dst, src) in cells.iter_mut().zip(rows) {
            if src.len() != GRID_SIZE {
                return Err(mismatch(src.len()));
            }
            dst.copy_from_slice(src);
        }
        Ok(cells)
    }

    pub fn cells(&self) -> &Cells {
        &self.cells
    }

    pub fn rows(&self) -> Vec<Vec<Token>> {
        self.cells.iter().map(|row| row.to_vec()).collect()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn stream(&self) -> &TokenStream {
        &self.stream
    }

    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            cells: self.cells,
            score: self.score,
            turn: self.turn,
        }
    }

    #[inline]
    pub fn is_inside(c: Coord) -> bool {
        (0..GRID_SIZE as i8).contains(&c.x) && (0..GRID_SIZE as i8).contains(&c.y)
    }

    /// Token at `c`, or `None` outside the grid.
    pub fn get(&self, c: Coord) -> Option<Token> {
        Self::is_inside(c).then(|| self.cells[c.y as usize][c.x as usize])
    }

    #[inline]
    pub fn at(&self, x: usize, y: usize) -> Token {
        self.cells[y][x]
    }

    /// Exchange two cells with no legality check.
    ///
    /// Panics if either coordinate is outside the grid.
    pub fn swap(&mut self, a: Coord, b: Coord) {
        swap_cells(&mut self.cells, a, b);
    }

    /// Whether the token at `(x, y)` sits in a horizontal or vertical run of at
    /// least `MIN_EXPLODE`. Empty cells never explode.
    pub fn is_exploding(&self, x: usize, y: usize) -> bool {
        exploding_at(&self.cells, x, y)
    }

    /// True iff `a` and `b` are in-bounds 4-neighbors and swapping them makes
    /// either cell explode. Probes a copy of the matrix; `self` is untouched.
    pub fn can_swap(&self, a: Coord, b: Coord) -> bool {
        if !Self::is_inside(a) || !Self::is_inside(b) || a.manhattan(b) != 1 {
            return false;
        }
        let mut probe = self.cells;
        swap_cells(&mut probe, a, b);
        exploding_at(&probe, a.x as usize, a.y as usize)
            || exploding_at(&probe, b.x as usize, b.y as usize)
    }

    /// Reject malformed requests; `Ok(false)` is a legal but non-matching swap.
    pub fn validate_move(&self, mv: Move) -> Result<bool, EngineError> {
        for c in [mv.from, mv.to] {
            if !Self::is_inside(c) {
                return Err(EngineError::OutOfBounds(c));
            }
        }
        if !mv.is_adjacent() {
            return Err(EngineError::NotAdjacent(mv));
        }
        Ok(self.can_swap(mv.from, mv.to))
    }

    /// Commit a move: bump the turn counter, then swap. Does not cascade and
    /// does not validate; use [`Grid::try_apply_move`] for untrusted input.
    ///
    /// Panics if either coordinate is outside the grid.
    pub fn apply_move(&mut self, mv: Move) {
        self.turn += 1;
        self.swap(mv.from, mv.to);
    }

    /// Validate, require a match, then commit. Nothing changes on error.
    pub fn try_apply_move(&mut self, mv: Move) -> Result<(), EngineError> {
        if !self.validate_move(mv)? {
            return Err(EngineError::NoMatch(mv));
        }
        self.apply_move(mv);
        Ok(())
    }

    /// Cost of the token at `c`; used only for move heuristics.
    ///
    /// Panics if `c` is outside the grid.
    pub fn cost_at(&self, c: Coord) -> u32 {
        self.cells[c.y as usize][c.x as usize].cost()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().flatten().filter(|t| t.is_empty()).count()
    }

    /// Replace every empty cell with the next stream token, row-major.
    /// Returns how many cells were filled; zero empties consume nothing.
    pub fn refill(&mut self) -> usize {
        let mut filled = 0;
        for cell in self.cells.iter_mut().flatten() {
            if cell.is_empty() {
                *cell = self.stream.next_token();
                filled += 1;
            }
        }
        filled
    }
}

fn swap_cells(cells: &mut Cells, a: Coord, b: Coord) {
    let (ax, ay, bx, by) = (a.x as usize, a.y as usize, b.x as usize, b.y as usize);
    let tmp = cells[ay][ax];
    cells[ay][ax] = cells[by][bx];
    cells[by][bx] = tmp;
}

/// Count equal tokens from `(x, y)` stepping by `(dx, dy)`, the start included.
fn run_length(cells: &Cells, x: usize, y: usize, dx: isize, dy: isize) -> usize {
    let token = cells[y][x];
    let (mut cx, mut cy) = (x as isize, y as isize);
    let mut count = 0;
    while (0..GRID_SIZE as isize).contains(&cx)
        && (0..GRID_SIZE as isize).contains(&cy)
        && cells[cy as usize][cx as usize] == token
    {
        count += 1;
        cx += dx;
        cy += dy;
    }
    count
}

pub(crate) fn exploding_at(cells: &Cells, x: usize, y: usize) -> bool {
    if cells[y][x].is_empty() {
        return false;
    }
    let horizontal = run_length(cells, x, y, 1, 0) + run_length(cells, x, y, -1, 0) - 1;
    let vertical = run_length(cells, x, y, 0, 1) + run_length(cells, x, y, 0, -1) - 1;
    horizontal >= MIN_EXPLODE || vertical >= MIN_EXPLODE
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.cells {
            for token in row {
                write!(f, "{token}")?;
            }
            writeln!(f)?;
        }
        write!(f, "score {} turn {}", self.score, self.turn)
    }
}
