//! Inline-allocated move list for enumeration results.

use gemfall_core::Move;
use smallvec::SmallVec;

/// Enough for almost every settled 9x9 grid without spilling to the heap.
pub const INLINE_MOVES: usize = 32;

/// Legal moves in enumeration order. The order is part of the contract:
/// selection policies break ties by position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveList {
    moves: SmallVec<[Move; INLINE_MOVES]>,
}

impl MoveList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, m: Move) {
        self.moves.push(m);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    #[inline]
    pub fn first(&self) -> Option<Move> {
        self.moves.first().copied()
    }

    #[inline]
    pub fn last(&self) -> Option<Move> {
        self.moves.last().copied()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Move> {
        self.moves.iter()
    }

    pub fn contains(&self, m: &Move) -> bool {
        self.moves.contains(m)
    }

    pub fn to_vec(&self) -> Vec<Move> {
        self.moves.to_vec()
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = smallvec::IntoIter<[Move; INLINE_MOVES]>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.into_iter()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    fn index(&self, index: usize) -> &Self::Output {
        &self.moves[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list() {
        let list = MoveList::new();
        assert!(list.is_empty());
        assert_eq!(list.first(), None);
        assert_eq!(list.last(), None);
    }

    #[test]
    fn test_push_keeps_order() {
        let mut list = MoveList::new();
        let m1 = Move::cells(0, 0, 1, 0);
        let m2 = Move::cells(0, 0, 0, 1);
        list.push(m1);
        list.push(m2);

        assert_eq!(list.len(), 2);
        assert_eq!(list[0], m1);
        assert_eq!(list.first(), Some(m1));
        assert_eq!(list.last(), Some(m2));
        assert_eq!(list.to_vec(), vec![m1, m2]);
    }

    #[test]
    fn test_spills_past_inline_capacity() {
        let mut list = MoveList::new();
        for i in 0..(INLINE_MOVES as i8 + 5) {
            list.push(Move::cells(0, i, 1, i));
        }
        assert_eq!(list.len(), INLINE_MOVES + 5);
        assert_eq!(list.into_iter().count(), INLINE_MOVES + 5);
    }
}
