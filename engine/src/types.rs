// ═══════════════════════════════════════════════════════════════════════
// Core types: identifiers, phase tags, auction history records
// ═══════════════════════════════════════════════════════════════════════

use serde::{Deserialize, Serialize};

// ── Identifiers ────────────────────────────────────────────────────────

/// Seat index of a player, `0..players`.
pub type PlayerId = usize;

/// Area code drawn from the area deck. `0` is the King, `1..=areas` are
/// the player-held areas.
pub type AreaCode = usize;

/// Ability code drawn from the ability deck; doubles as a board column.
pub type AbilityCode = usize;

/// Money. Signed so a misconfigured game can never wrap around silently.
pub type Funds = i64;

/// Area code reserved for the King.
pub const KING_AREA: AreaCode = 0;

/// Board row reserved for the King.
pub const KING_ROW: usize = 0;

// ── Phase tag ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseKind {
    Auction,
    Payday,
}

impl std::fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PhaseKind::Auction => write!(f, "auction"),
            PhaseKind::Payday => write!(f, "payday"),
        }
    }
}

// ── Auction step ───────────────────────────────────────────────────────

/// One player's turn inside a single auction round.
///
/// `bid` is `None` both while the turn is still open and after the player
/// passed; a settled round never leaves a step open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuctionStep {
    pub player: PlayerId,
    pub checked: bool,
    pub hid: bool,
    pub bid: Option<Funds>,
}

impl AuctionStep {
    /// A fresh step for `player`: nothing done yet.
    pub fn open(player: PlayerId) -> Self {
        Self { player, checked: false, hid: false, bid: None }
    }
}

impl std::fmt::Display for AuctionStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}, ", self.player)?;
        if self.checked {
            write!(f, "checked, ")?;
        }
        if self.hid {
            write!(f, "hid, ")?;
        }
        match self.bid {
            Some(amount) => write!(f, "bid: {}", amount),
            None => write!(f, "bid: pass"),
        }
    }
}

// ── Winner ─────────────────────────────────────────────────────────────

/// Owner of the winning board row, decoded from the raw row index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winner {
    King,
    Player { player: PlayerId, area: AreaCode },
}

impl std::fmt::Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Winner::King => write!(f, "the King"),
            Winner::Player { player, area } => write!(f, "player {} (area {})", player, area),
        }
    }
}
