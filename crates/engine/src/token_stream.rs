//! Cyclic, pre-drawn token sequence feeding grid fill and refill.

use std::sync::Arc;

use gemfall_core::{LevelProfile, Token, TOKEN_STREAM_LEN};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use crate::EngineError;

/// All randomness is captured at construction; drawing is deterministic.
///
/// The sequence is shared behind an `Arc` so cloning a grid for speculative
/// evaluation only copies the cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Arc<[Token]>,
    cursor: usize,
}

impl TokenStream {
    /// Draw `TOKEN_STREAM_LEN` tokens independently, proportional to the
    /// profile weights.
    pub fn from_profile<R: Rng + ?Sized>(
        profile: &LevelProfile,
        rng: &mut R,
    ) -> Result<Self, EngineError> {
        let dist = WeightedIndex::new(profile.weights)
            .map_err(|_| EngineError::InvalidProfile(profile.name.clone()))?;
        let tokens: Vec<Token> = (0..TOKEN_STREAM_LEN)
            .map(|_| Token::GEMS[dist.sample(rng)])
            .collect();
        Ok(Self {
            tokens: tokens.into(),
            cursor: 0,
        })
    }

    /// Load a recorded sequence verbatim.
    pub fn from_tokens(tokens: Vec<Token>) -> Result<Self, EngineError> {
        if tokens.is_empty() {
            return Err(EngineError::EmptyTokenSequence);
        }
        if let Some(index) = tokens.iter().position(|t| t.is_empty()) {
            return Err(EngineError::EmptyTokenInSequence { index });
        }
        Ok(Self {
            tokens: tokens.into(),
            cursor: 0,
        })
    }

    /// Decode a recorded sequence of integer token codes.
    pub fn from_codes(codes: &[u8]) -> Result<Self, EngineError> {
        let tokens = codes
            .iter()
            .map(|&c| Token::try_from(c))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_tokens(tokens)
    }

    pub fn next_token(&mut self) -> Token {
        let token = self.tokens[self.cursor];
        self.cursor = (self.cursor + 1) % self.tokens.len();
        token
    }

    /// The next `n` tokens in order, wrapping at the end of the sequence.
    pub fn draw(&mut self, n: usize) -> Vec<Token> {
        (0..n).map(|_| self.next_token()).collect()
    }

    pub fn peek(&self) -> Token {
        self.tokens[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The full sequence, independent of the cursor.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}
