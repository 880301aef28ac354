use crate::board::Card;
use crate::types::{CardFace, GamePhase, Symbol, DECK_SIZE};

/// Copy of everything a renderer needs from [`GameState`](crate::GameState).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub cards: [Card; DECK_SIZE],
    pub phase: GamePhase,
    pub moves: u32,
    pub elapsed_seconds: u32,
    pub matched_pairs: u32,
    pub game_id: u32,
    /// Score for the counters so far.
    pub score: u32,
    pub final_score: Option<u32>,
    pub pair_pending: bool,
    pub timer_live: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        for (i, card) in self.cards.iter_mut().enumerate() {
            *card = Card {
                index: i as u8,
                symbol: Symbol::ALL[i / 2],
                face: CardFace::Hidden,
            };
        }
        self.phase = GamePhase::Idle;
        self.moves = 0;
        self.elapsed_seconds = 0;
        self.matched_pairs = 0;
        self.game_id = 0;
        self.score = 0;
        self.final_score = None;
        self.pair_pending = false;
        self.timer_live = false;
    }

    pub fn card(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            cards: [Card {
                index: 0,
                symbol: Symbol::Gamepad,
                face: CardFace::Hidden,
            }; DECK_SIZE],
            phase: GamePhase::Idle,
            moves: 0,
            elapsed_seconds: 0,
            matched_pairs: 0,
            game_id: 0,
            score: 0,
            final_score: None,
            pair_pending: false,
            timer_live: false,
        };
        s.clear();
        s
    }
}
