use serde::{Deserialize, Serialize};

use crate::auction::AuctionPhase;
use crate::error::GameError;
use crate::payday::PaydayPhase;
use crate::table::Table;
use crate::types::{PhaseKind, PlayerId};

/// The phase the game is currently in. Exactly one exists at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Auction(AuctionPhase),
    Payday(PaydayPhase),
}

impl Phase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            Phase::Auction(_) => PhaseKind::Auction,
            Phase::Payday(_) => PhaseKind::Payday,
        }
    }

    /// True while player actions are still expected.
    pub fn is_active(&self) -> bool {
        match self {
            Phase::Auction(a) => a.is_active(),
            Phase::Payday(p) => p.is_active(),
        }
    }

    pub fn active_player(&self) -> Option<PlayerId> {
        match self {
            Phase::Auction(a) => a.active_player(),
            Phase::Payday(_) => None,
        }
    }

    pub fn as_auction(&self) -> Option<&AuctionPhase> {
        match self {
            Phase::Auction(a) => Some(a),
            Phase::Payday(_) => None,
        }
    }

    /// Apply the default action for `player` if their turn is still open.
    pub fn finalize_for(&mut self, table: &mut Table, player: Option<PlayerId>) -> Result<(), GameError> {
        match self {
            Phase::Auction(a) => a.finalize_for(table, player),
            Phase::Payday(_) => Ok(()),
        }
    }
}
