// ═══════════════════════════════════════════════════════════════════════
// Game: the whole match: table, current phase, phase sequencing
//
// Phase order:
//   Auction ─(settled)─▶ Payday ─▶ Auction (starter moves one seat) ─▶ ...
//
// The game ends as soon as `winner()` is decided: a row reaches the win
// amount, or the decks run out. Front-ends drive play through `turns()`.
// ═══════════════════════════════════════════════════════════════════════

use log::info;

use crate::auction::{Auction, AuctionPhase};
use crate::board::Board;
use crate::config::GameConfig;
use crate::deck::Deck;
use crate::error::GameError;
use crate::payday::PaydayPhase;
use crate::phase::Phase;
use crate::setup;
use crate::table::Table;
use crate::turns::Turns;
use crate::types::*;

#[derive(Debug, Clone)]
pub struct Game {
    table: Table,
    phase: Phase,
    auction_starter: PlayerId,
}

impl Game {
    /// New match with freshly shuffled decks. Player 0 opens the first auction.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        config.validate()?;
        let (areas, abilities) = setup::shuffled_decks(&config, seed);
        Self::from_decks(config, areas, abilities)
    }

    /// New match with the decks in exactly this order, top card first.
    pub fn with_decks(
        config: GameConfig,
        areas: Vec<AreaCode>,
        abilities: Vec<AbilityCode>,
    ) -> Result<Self, GameError> {
        Self::from_decks(config, Deck::new(areas), Deck::new(abilities))
    }

    fn from_decks(config: GameConfig, areas: Deck, abilities: Deck) -> Result<Self, GameError> {
        if areas.is_empty() || abilities.is_empty() {
            return Err(GameError::InvalidDeck("decks must not start empty".into()));
        }
        let table = Table::new(config, areas, abilities)?;
        let phase = Phase::Auction(AuctionPhase::open(&table, 0)?);
        info!(
            "new game: {} players, {} columns, {} areas, {} cards per deck",
            table.players(),
            table.config().columns,
            table.config().areas,
            table.deck_len()
        );
        Ok(Self { table, phase, auction_starter: 0 })
    }

    // ── State ──────────────────────────────────────────────────────────

    pub fn config(&self) -> &GameConfig {
        self.table.config()
    }

    pub fn board(&self) -> &Board {
        self.table.board()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn auction_starter(&self) -> PlayerId {
        self.auction_starter
    }

    pub fn players(&self) -> usize {
        self.table.players()
    }

    pub fn funds(&self, player: PlayerId) -> Funds {
        self.table.funds(player)
    }

    pub fn all_funds(&self) -> &[Funds] {
        self.table.all_funds()
    }

    pub fn deck_len(&self) -> usize {
        self.table.deck_len()
    }

    pub fn column_frequency(&self) -> Vec<u32> {
        self.table.board().column_frequency()
    }

    pub fn row_weights(&self) -> Vec<u32> {
        self.table.board().row_weights()
    }

    pub fn win_amount(&self) -> u32 {
        self.table.config().win_amount()
    }

    // ── Board & decks ──────────────────────────────────────────────────

    pub fn find_row(&self, player: PlayerId, area: AreaCode) -> usize {
        self.table.find_row(player, area)
    }

    pub fn row_info(&self, row: usize) -> (Option<PlayerId>, AreaCode) {
        self.table.row_info(row)
    }

    pub fn set_for_player(&mut self, player: PlayerId, area: AreaCode, ability: AbilityCode) -> Result<(), GameError> {
        self.table.set_for_player(player, area, ability)
    }

    pub fn set_for_king(&mut self, ability: AbilityCode) -> Result<(), GameError> {
        self.table.set_for_king(ability)
    }

    pub fn has(&self, player: PlayerId, area: AreaCode, ability: AbilityCode) -> Result<bool, GameError> {
        self.table.has(player, area, ability)
    }

    pub fn hidden_area(&self) -> Result<AreaCode, GameError> {
        self.table.hidden_area()
    }

    pub fn hidden_ability(&self) -> Result<AbilityCode, GameError> {
        self.table.hidden_ability()
    }

    pub fn pop_area(&mut self) -> Result<AreaCode, GameError> {
        self.table.pop_area()
    }

    pub fn pop_ability(&mut self) -> Result<AbilityCode, GameError> {
        self.table.pop_ability()
    }

    pub fn buy(&mut self, player: PlayerId) -> Result<(), GameError> {
        self.table.buy(player)
    }

    // ── Winner ─────────────────────────────────────────────────────────

    /// Raw board row of the winner, once decided. Row 0 is the King.
    pub fn winner(&self) -> Option<usize> {
        self.table.winner()
    }

    /// `winner()` decoded into the King or a player's area row.
    pub fn winner_player(&self) -> Option<Winner> {
        let row = self.winner()?;
        Some(match self.row_info(row) {
            (Some(player), area) => Winner::Player { player, area },
            (None, _) => Winner::King,
        })
    }

    // ── Phase sequencing ───────────────────────────────────────────────

    /// Handle for acting on the current auction.
    pub fn auction(&mut self) -> Result<Auction<'_>, GameError> {
        match &mut self.phase {
            Phase::Auction(a) => Ok(Auction::new(a, &mut self.table)),
            Phase::Payday(_) => Err(GameError::NotAuction),
        }
    }

    /// Move on from a finished phase: auction → payday → next auction.
    pub fn next_phase(&mut self) -> Result<(), GameError> {
        if self.phase.is_active() {
            return Err(GameError::PhaseStillActive);
        }
        if let Some(winner) = self.winner() {
            return Err(GameError::GameOver { winner });
        }

        self.phase = match self.phase.kind() {
            PhaseKind::Auction => Phase::Payday(PaydayPhase::pay(&mut self.table)),
            PhaseKind::Payday => {
                let starter = (self.auction_starter + 1) % self.players();
                let auction = AuctionPhase::open(&self.table, starter)?;
                self.auction_starter = starter;
                info!("auction opens, player {} starts, {} lots left", starter, self.deck_len());
                Phase::Auction(auction)
            }
        };
        Ok(())
    }

    /// Borrow the game as a sequence of turns.
    pub fn turns(&mut self) -> Turns<'_> {
        Turns::new(self)
    }

    /// Close the turn handed to `player`, then leave a finished phase.
    pub(crate) fn finish_turn(&mut self, player: Option<PlayerId>) -> Result<(), GameError> {
        self.phase.finalize_for(&mut self.table, player)?;
        if !self.phase.is_active() && self.winner().is_none() {
            self.next_phase()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game_3p_5c() -> Game {
        let config = GameConfig::new(3).with_columns(5);
        Game::with_decks(config, vec![1, 2, 3, 0], vec![0, 1, 2, 3]).unwrap()
    }

    #[test]
    fn test_starts_in_auction() {
        let game = game_3p_5c();
        assert_eq!(game.phase().kind(), PhaseKind::Auction);
        assert!(game.phase().is_active());
        assert_eq!(game.auction_starter(), 0);
        assert_eq!(game.phase().active_player(), Some(0));
        assert_eq!(game.win_amount(), 8);
    }

    #[test]
    fn test_rejects_empty_decks() {
        let result = Game::with_decks(GameConfig::new(2), vec![], vec![]);
        assert!(matches!(result, Err(GameError::InvalidDeck(_))));
        assert!(matches!(
            Game::new(GameConfig::new(0), 1),
            Err(GameError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_next_phase_requires_inactive_phase() {
        let mut game = game_3p_5c();
        assert_eq!(game.next_phase(), Err(GameError::PhaseStillActive));
        assert_eq!(game.phase().kind(), PhaseKind::Auction);
    }

    #[test]
    fn test_phase_rotation() {
        let mut game = game_3p_5c();
        for _ in 0..3 {
            game.auction().unwrap().pass_bid().unwrap();
        }
        game.next_phase().unwrap();
        assert_eq!(game.phase().kind(), PhaseKind::Payday);
        assert!(!game.phase().is_active());
        assert_eq!(game.phase().active_player(), None);
        assert_eq!(game.all_funds(), &[12_000, 12_000, 12_000]);
        assert!(matches!(game.auction(), Err(GameError::NotAuction)));

        game.next_phase().unwrap();
        assert_eq!(game.phase().kind(), PhaseKind::Auction);
        assert_eq!(game.auction_starter(), 1);
        assert_eq!(game.phase().active_player(), Some(1));
    }

    #[test]
    fn test_next_phase_after_winner_fails() {
        let config = GameConfig::new(2).with_columns(3);
        let mut game = Game::with_decks(config, vec![1], vec![0]).unwrap();
        game.auction().unwrap().pass_bid().unwrap();
        game.auction().unwrap().pass_bid().unwrap();
        // the only lot is gone, so the decks are exhausted
        assert_eq!(game.deck_len(), 0);
        assert_eq!(game.winner(), Some(0));
        assert_eq!(game.winner_player(), Some(Winner::King));
        assert_eq!(game.next_phase(), Err(GameError::GameOver { winner: 0 }));
    }

    #[test]
    fn test_buy_pops_both_decks() {
        let mut game = game_3p_5c();
        assert_eq!(game.hidden_area(), Ok(1));
        assert_eq!(game.hidden_ability(), Ok(0));
        game.buy(2).unwrap();
        assert!(game.has(2, 1, 0).unwrap());
        assert_eq!(game.hidden_area(), Ok(2));
        assert_eq!(game.hidden_ability(), Ok(1));
        assert_eq!(game.deck_len(), 3);
    }

    #[test]
    fn test_winner_player_decodes_row() {
        let config = GameConfig::new(2).with_columns(1);
        let mut game = Game::with_decks(config, vec![1, 1], vec![0, 0]).unwrap();
        // win amount 2: one flag in a lone column is weight 1
        game.set_for_player(1, 2, 0).unwrap();
        assert_eq!(game.winner(), None);
        game.set_for_player(0, 3, 0).unwrap();
        // column frequency 2, rows 4 and 5 both weigh 2, row 4 came first
        assert_eq!(game.winner(), Some(4));
        assert_eq!(game.winner_player(), Some(Winner::Player { player: 1, area: 2 }));
    }
}
