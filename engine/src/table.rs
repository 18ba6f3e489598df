// ═══════════════════════════════════════════════════════════════════════
// Table: everything on the table except the current phase, i.e.
// board, both decks, and the players' money.
//
// Phases borrow the table mutably while they run; `Game` owns both.
// ═══════════════════════════════════════════════════════════════════════

use log::debug;

use crate::board::Board;
use crate::config::GameConfig;
use crate::deck::Deck;
use crate::error::GameError;
use crate::types::*;

#[derive(Debug, Clone)]
pub struct Table {
    config: GameConfig,
    board: Board,
    area_deck: Deck,
    ability_deck: Deck,
    funds: Vec<Funds>,
}

impl Table {
    /// Decks must be the same length. Codes are checked against the config.
    pub fn new(config: GameConfig, area_deck: Deck, ability_deck: Deck) -> Result<Self, GameError> {
        config.validate()?;
        if area_deck.len() != ability_deck.len() {
            return Err(GameError::InvalidDeck(format!(
                "area deck has {} cards but ability deck has {}",
                area_deck.len(),
                ability_deck.len()
            )));
        }
        if let Some(bad) = area_deck.iter().find(|&a| a > config.areas) {
            return Err(GameError::InvalidDeck(format!("area code {} is out of range", bad)));
        }
        if let Some(bad) = ability_deck.iter().find(|&c| c >= config.columns) {
            return Err(GameError::InvalidDeck(format!("ability code {} is out of range", bad)));
        }

        Ok(Self {
            board: Board::new(config.rows(), config.columns),
            funds: vec![config.start_funds; config.players],
            config,
            area_deck,
            ability_deck,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> usize {
        self.config.players
    }

    // ── Rows ───────────────────────────────────────────────────────────

    /// Board row for `player` in `area`. Area 0 is always the King's row.
    pub fn find_row(&self, player: PlayerId, area: AreaCode) -> usize {
        if area == KING_AREA {
            KING_ROW
        } else {
            player + (area - 1) * self.config.players + 1
        }
    }

    /// Inverse of `find_row`: `(None, 0)` for the King.
    pub fn row_info(&self, row: usize) -> (Option<PlayerId>, AreaCode) {
        if row == KING_ROW {
            (None, KING_AREA)
        } else {
            let players = self.config.players;
            (Some((row - 1) % players), 1 + (row - 1) / players)
        }
    }

    fn check_player(&self, player: PlayerId) -> Result<(), GameError> {
        if player < self.config.players {
            Ok(())
        } else {
            Err(GameError::UnknownPlayer(player))
        }
    }

    /// Only a player's own band needs a real seat; the King's row takes anyone.
    fn check_owner(&self, player: PlayerId, area: AreaCode) -> Result<(), GameError> {
        if area == KING_AREA {
            Ok(())
        } else {
            self.check_player(player)
        }
    }

    fn check_cell(&self, area: AreaCode, ability: AbilityCode) -> Result<(), GameError> {
        if area > self.config.areas {
            return Err(GameError::UnknownArea(area));
        }
        if ability >= self.config.columns {
            return Err(GameError::UnknownAbility(ability));
        }
        Ok(())
    }

    // ── Ownership ──────────────────────────────────────────────────────

    /// Give `ability` to `player`'s band in `area` (the King for area 0).
    pub fn set_for_player(
        &mut self,
        player: PlayerId,
        area: AreaCode,
        ability: AbilityCode,
    ) -> Result<(), GameError> {
        self.check_cell(area, ability)?;
        self.check_owner(player, area)?;
        let row = self.find_row(player, area);
        self.board.set(row, ability);
        Ok(())
    }

    pub fn set_for_king(&mut self, ability: AbilityCode) -> Result<(), GameError> {
        self.check_cell(KING_AREA, ability)?;
        self.board.set(KING_ROW, ability);
        Ok(())
    }

    /// Area 0 asks about the King whatever `player` is.
    pub fn has(&self, player: PlayerId, area: AreaCode, ability: AbilityCode) -> Result<bool, GameError> {
        self.check_cell(area, ability)?;
        self.check_owner(player, area)?;
        Ok(self.board.get(self.find_row(player, area), ability))
    }

    // ── Decks ──────────────────────────────────────────────────────────

    pub fn hidden_area(&self) -> Result<AreaCode, GameError> {
        self.area_deck.peek_top()
    }

    pub fn hidden_ability(&self) -> Result<AbilityCode, GameError> {
        self.ability_deck.peek_top()
    }

    pub fn pop_area(&mut self) -> Result<AreaCode, GameError> {
        self.area_deck.pop()
    }

    pub fn pop_ability(&mut self) -> Result<AbilityCode, GameError> {
        self.ability_deck.pop()
    }

    /// Cards left; both decks always hold the same number.
    pub fn deck_len(&self) -> usize {
        self.area_deck.len()
    }

    pub fn decks_exhausted(&self) -> bool {
        self.area_deck.is_empty() || self.ability_deck.is_empty()
    }

    /// Pop one card from each deck together.
    pub(crate) fn pop_lot(&mut self) -> Result<(AreaCode, AbilityCode), GameError> {
        if self.decks_exhausted() {
            return Err(GameError::EmptyDeck);
        }
        Ok((self.area_deck.pop()?, self.ability_deck.pop()?))
    }

    /// Award the face-down lot to `player` (to the King if its area is 0),
    /// then advance both decks regardless.
    pub fn buy(&mut self, player: PlayerId) -> Result<(), GameError> {
        self.check_owner(player, self.hidden_area()?)?;
        let (area, ability) = self.pop_lot()?;
        self.board.set(self.find_row(player, area), ability);
        debug!("player {} bought ability {} in area {}", player, ability, area);
        Ok(())
    }

    // ── Money ──────────────────────────────────────────────────────────

    /// Panics on an unknown player; callers hold validated seats.
    pub fn funds(&self, player: PlayerId) -> Funds {
        self.funds[player]
    }

    pub fn all_funds(&self) -> &[Funds] {
        &self.funds
    }

    pub(crate) fn debit(&mut self, player: PlayerId, amount: Funds) {
        self.funds[player] -= amount;
    }

    pub(crate) fn credit_all(&mut self, amount: Funds) {
        for f in &mut self.funds {
            *f += amount;
        }
    }

    // ── Scoring ────────────────────────────────────────────────────────

    /// Winning row index, if the game is decided.
    ///
    /// The earliest row holding the strictly highest weight leads. It wins
    /// once that weight reaches the win amount, or as soon as a deck runs
    /// out. Row 0 is the King, so the King can win.
    pub fn winner(&self) -> Option<usize> {
        let weights = self.board.row_weights();
        let mut leader: Option<(usize, u32)> = None;
        for (row, &w) in weights.iter().enumerate() {
            if leader.map_or(true, |(_, best)| w > best) {
                leader = Some((row, w));
            }
        }
        let (row, weight) = leader?;
        if weight >= self.config.win_amount() || self.decks_exhausted() {
            Some(row)
        } else {
            None
        }
    }
}
