// ═══════════════════════════════════════════════════════════════════════
// Deck: face-down sequence of codes, drawn from the front
// ═══════════════════════════════════════════════════════════════════════

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::error::GameError;

/// Ordered codes. Only ever shrinks: there is no reshuffle mid-game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: VecDeque<usize>,
}

impl Deck {
    pub fn new(cards: Vec<usize>) -> Self {
        Self { cards: cards.into() }
    }

    /// The code that will be drawn next.
    pub fn peek_top(&self) -> Result<usize, GameError> {
        self.cards.front().copied().ok_or(GameError::EmptyDeck)
    }

    /// Remove and return the top code.
    pub fn pop(&mut self) -> Result<usize, GameError> {
        self.cards.pop_front().ok_or(GameError::EmptyDeck)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Remaining codes, top first.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.cards.iter().copied()
    }
}
