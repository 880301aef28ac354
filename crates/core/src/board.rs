//! Board module - the dealt deck of cards
//!
//! The board is a flat array of 16 cards laid out row-major on a 4x4 grid.
//! Index `i` sits at column `i % 4`, row `i / 4`.

use crate::types::{CardFace, Symbol, BOARD_COLS, BOARD_ROWS, DECK_SIZE};

/// A single card on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    pub index: u8,
    pub symbol: Symbol,
    pub face: CardFace,
}

impl Card {
    pub fn is_hidden(&self) -> bool {
        self.face == CardFace::Hidden
    }
}

/// The dealt deck, 4 columns x 4 rows
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    cards: [Card; DECK_SIZE],
}

impl Board {
    /// Lay out a deck face down
    pub fn from_deck(deck: [Symbol; DECK_SIZE]) -> Self {
        let mut cards = [Card {
            index: 0,
            symbol: Symbol::Gamepad,
            face: CardFace::Hidden,
        }; DECK_SIZE];
        for (i, (card, symbol)) in cards.iter_mut().zip(deck).enumerate() {
            card.index = i as u8;
            card.symbol = symbol;
        }
        Self { cards }
    }

    /// Calculate flat index from (col, row) coordinates
    #[inline(always)]
    pub fn index_of(col: usize, row: usize) -> Option<usize> {
        if col >= BOARD_COLS || row >= BOARD_ROWS {
            return None;
        }
        Some(row * BOARD_COLS + col)
    }

    /// Column and row of a flat index
    pub fn position_of(index: usize) -> Option<(usize, usize)> {
        if index >= DECK_SIZE {
            return None;
        }
        Some((index % BOARD_COLS, index / BOARD_COLS))
    }

    /// Get card at index, None if out of range
    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// Set the face of a card. Returns false if out of range.
    pub fn set_face(&mut self, index: usize, face: CardFace) -> bool {
        match self.cards.get_mut(index) {
            Some(card) => {
                card.face = face;
                true
            }
            None => false,
        }
    }

    pub fn cards(&self) -> &[Card; DECK_SIZE] {
        &self.cards
    }

    /// Number of cards showing the given face
    pub fn count(&self, face: CardFace) -> usize {
        self.cards.iter().filter(|c| c.face == face).count()
    }

    /// Index of the other card carrying `symbol`, if any
    pub fn twin_of(&self, index: usize) -> Option<usize> {
        let symbol = self.cards.get(index)?.symbol;
        self.cards
            .iter()
            .position(|c| c.symbol == symbol && c.index as usize != index)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::from_deck(crate::rng::ordered_deck())
    }
}
