//! Token palette and per-token scoring costs.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single cell value. `Empty` only appears transiently mid-cascade.
///
/// Serialized as its integer code so recorded sessions stay compact.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Token {
    #[default]
    Empty = 0,
    Ruby = 1,
    Emerald = 2,
    Diamond = 3,
    Amber = 4,
    Beryl = 5,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("unknown token code {0}")]
    UnknownCode(u8),
}

impl Token {
    /// Every spawnable token, in profile-weight order.
    pub const GEMS: [Token; 5] = [
        Token::Ruby,
        Token::Emerald,
        Token::Diamond,
        Token::Amber,
        Token::Beryl,
    ];

    #[inline]
    pub fn is_empty(self) -> bool {
        self == Token::Empty
    }

    /// Scoring weight of a gem. Empty cells are worth nothing.
    #[inline]
    pub fn cost(self) -> u32 {
        match self {
            Token::Empty => 0,
            Token::Ruby => 5,
            Token::Emerald => 4,
            Token::Diamond => 3,
            Token::Amber => 2,
            Token::Beryl => 1,
        }
    }

    /// Index into [`Token::GEMS`]; `None` for `Empty`.
    #[inline]
    pub fn gem_index(self) -> Option<usize> {
        match self {
            Token::Empty => None,
            gem => Some(gem as usize - 1),
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Token {
    type Error = TokenError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Token::Empty),
            1 => Ok(Token::Ruby),
            2 => Ok(Token::Emerald),
            3 => Ok(Token::Diamond),
            4 => Ok(Token::Amber),
            5 => Ok(Token::Beryl),
            other => Err(TokenError::UnknownCode(other)),
        }
    }
}

impl From<Token> for u8 {
    fn from(token: Token) -> Self {
        token.code()
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let c = match self {
            Token::Empty => '.',
            Token::Ruby => 'R',
            Token::Emerald => 'E',
            Token::Diamond => 'D',
            Token::Amber => 'A',
            Token::Beryl => 'B',
        };
        write!(f, "{c}")
    }
}
