// ═══════════════════════════════════════════════════════════════════════
// Turn driver: how a front-end plays a whole game
//
//   let mut turns = game.turns();
//   while let Some(mut turn) = turns.next_turn()? {
//       if let Ok(mut auction) = turn.auction() { /* check, hide, bid… */ }
//   }
//   let winner = game.winner();
//
// Each `Turn` is one chance for one player to act in the current phase
// (for payday, nobody: the player is `None`). Asking for the next turn
// closes the previous one: a player who did nothing passes, and a
// finished phase is replaced by the next. The sequence ends once the
// game has a winner.
// ═══════════════════════════════════════════════════════════════════════

use log::info;

use crate::auction::Auction;
use crate::error::GameError;
use crate::game::Game;
use crate::phase::Phase;
use crate::types::{PhaseKind, PlayerId};

pub struct Turns<'g> {
    game: &'g mut Game,
    /// Player of the turn handed out last, still to be closed.
    open: Option<Option<PlayerId>>,
    finished: bool,
}

impl<'g> Turns<'g> {
    pub(crate) fn new(game: &'g mut Game) -> Self {
        Self { game, open: None, finished: false }
    }

    /// Close the previous turn and hand out the next one.
    /// `Ok(None)` once the game is over.
    pub fn next_turn(&mut self) -> Result<Option<Turn<'_>>, GameError> {
        if let Some(player) = self.open {
            self.game.finish_turn(player)?;
            self.open = None;
        }
        if let Some(row) = self.game.winner() {
            if !self.finished {
                self.finished = true;
                info!("game over: row {} wins ({:?})", row, self.game.winner_player());
            }
            return Ok(None);
        }

        let player = self.game.phase().active_player();
        self.open = Some(player);
        Ok(Some(Turn { game: &mut *self.game, player }))
    }

    pub fn game(&self) -> &Game {
        &*self.game
    }
}

/// One player's opportunity to act.
pub struct Turn<'t> {
    game: &'t mut Game,
    player: Option<PlayerId>,
}

impl Turn<'_> {
    /// Who may act; `None` during payday.
    pub fn player(&self) -> Option<PlayerId> {
        self.player
    }

    pub fn kind(&self) -> PhaseKind {
        self.game.phase().kind()
    }

    pub fn phase(&self) -> &Phase {
        self.game.phase()
    }

    pub fn game(&self) -> &Game {
        &*self.game
    }

    /// Act on the auction. Fails during payday.
    pub fn auction(&mut self) -> Result<Auction<'_>, GameError> {
        self.game.auction()
    }
}
