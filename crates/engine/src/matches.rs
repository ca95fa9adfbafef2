//! Full-grid run detection and clearing.

use gemfall_core::{Cells, Coord, Token, GRID_SIZE, MIN_EXPLODE};
use serde::{Deserialize, Serialize};

use crate::Grid;

/// One bit per cell, bit index `y * GRID_SIZE + x`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash, Serialize, Deserialize)]
pub struct ClearMask(u128);

impl ClearMask {
    pub const EMPTY: Self = Self(0);

    #[inline(always)]
    fn bit(x: usize, y: usize) -> u128 {
        1u128 << (y * GRID_SIZE + x)
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize) {
        self.0 |= Self::bit(x, y);
    }

    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        self.0 & Self::bit(x, y) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn count(&self) -> u32 {
        self.0.count_ones()
    }

    /// Marked cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            let idx = bits.trailing_zeros() as usize;
            bits &= bits - 1;
            Some(Coord::new((idx % GRID_SIZE) as i8, (idx / GRID_SIZE) as i8))
        })
    }
}

/// A maximal run of at least `MIN_EXPLODE` equal gems.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Run {
    pub token: Token,
    pub start: Coord,
    pub len: u8,
    pub horizontal: bool,
}

impl Run {
    pub fn score(&self) -> u32 {
        self.len as u32 * self.token.cost()
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct ScanResult {
    pub score: u32,
    pub mask: ClearMask,
    pub runs: Vec<Run>,
}

impl ScanResult {
    pub fn is_stable(&self) -> bool {
        self.score == 0
    }
}

/// Scan rows then columns for qualifying runs. A cell in both a horizontal and
/// a vertical run is marked once and scores in both.
pub fn scan_matches(cells: &Cells) -> ScanResult {
    let mut result = ScanResult::default();

    for y in 0..GRID_SIZE {
        scan_line(&mut result, true, |i| (i, y), cells);
    }
    for x in 0..GRID_SIZE {
        scan_line(&mut result, false, |i| (x, i), cells);
    }

    result
}

fn scan_line(
    result: &mut ScanResult,
    horizontal: bool,
    pos: impl Fn(usize) -> (usize, usize),
    cells: &Cells,
) {
    let token_at = |i: usize| {
        let (x, y) = pos(i);
        cells[y][x]
    };

    let mut start = 0;
    while start < GRID_SIZE {
        let token = token_at(start);
        let mut end = start + 1;
        while end < GRID_SIZE && token_at(end) == token {
            end += 1;
        }

        let len = end - start;
        if !token.is_empty() && len >= MIN_EXPLODE {
            for i in start..end {
                let (x, y) = pos(i);
                result.mask.set(x, y);
            }
            let (sx, sy) = pos(start);
            let run = Run {
                token,
                start: Coord::new(sx as i8, sy as i8),
                len: len as u8,
                horizontal,
            };
            result.score += run.score();
            result.runs.push(run);
        }
        start = end;
    }
}

impl Grid {
    /// Find every qualifying run without mutating the grid.
    pub fn scan_matches(&self) -> ScanResult {
        scan_matches(&self.cells)
    }

    /// Empty every marked cell and credit the scan's score.
    /// Returns the credited delta.
    pub fn clear_marked(&mut self, scan: &ScanResult) -> u32 {
        for c in scan.mask.iter() {
            self.cells[c.y as usize][c.x as usize] = Token::Empty;
        }
        self.score += scan.score;
        scan.score
    }

    /// Scan and clear in one step. Zero means the grid was already stable.
    pub fn resolve_step(&mut self) -> u32 {
        let scan = self.scan_matches();
        self.clear_marked(&scan)
    }
}
