use thiserror::Error;

use crate::config::ConfigError;
use crate::types::{AbilityCode, AreaCode, Funds, PlayerId};

/// Caller misuse. An operation that returns one of these has changed nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("player {player} needs {needed} but has {available}")]
    InsufficientFunds { player: PlayerId, needed: Funds, available: Funds },

    #[error("bid of {bid} is below the minimum of {minimum}")]
    BidTooLow { bid: Funds, minimum: Funds },

    #[error("the lot is already hidden")]
    AlreadyHidden,

    #[error("current phase is still active")]
    PhaseStillActive,

    #[error("game is over, row {winner} has won")]
    GameOver { winner: usize },

    #[error("current phase is not an auction")]
    NotAuction,

    #[error("auction has already been settled")]
    AuctionSettled,

    #[error("deck is empty")]
    EmptyDeck,

    #[error("no such player: {0}")]
    UnknownPlayer(PlayerId),

    #[error("no such area: {0}")]
    UnknownArea(AreaCode),

    #[error("no such ability: {0}")]
    UnknownAbility(AbilityCode),

    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),

    #[error("invalid deck: {0}")]
    InvalidDeck(String),
}
