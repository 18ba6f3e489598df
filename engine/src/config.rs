// ═══════════════════════════════════════════════════════════════════════
// Game configuration: table size, money, fees
// ═══════════════════════════════════════════════════════════════════════

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Funds;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("a game needs at least one player")]
    NoPlayers,
    #[error("a game needs at least one ability column")]
    NoColumns,
    #[error("a game needs at least one player area")]
    NoAreas,
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: Funds },
    #[error("malformed configuration: {0}")]
    Parse(String),
}

/// Everything that is fixed for the whole match.
///
/// Missing JSON fields fall back to the defaults, so a config file only
/// has to name what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub players: usize,
    pub columns: usize,
    pub areas: usize,
    pub start_funds: Funds,
    pub check_cost: Funds,
    pub hide_cost: Funds,
    /// Minimum raise over the current highest bid.
    pub bid_step: Funds,
    /// Flat stipend credited to every player on payday.
    pub payday: Funds,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            players: 3,
            columns: 9,
            areas: 3,
            start_funds: 10_000,
            check_cost: 1_000,
            hide_cost: 1_000,
            bid_step: 1_000,
            payday: 2_000,
        }
    }
}

impl GameConfig {
    pub fn new(players: usize) -> Self {
        Self { players, ..Self::default() }
    }

    #[must_use]
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    #[must_use]
    pub fn with_areas(mut self, areas: usize) -> Self {
        self.areas = areas;
        self
    }

    #[must_use]
    pub fn with_start_funds(mut self, funds: Funds) -> Self {
        self.start_funds = funds;
        self
    }

    #[must_use]
    pub fn with_costs(mut self, check_cost: Funds, hide_cost: Funds, bid_step: Funds) -> Self {
        self.check_cost = check_cost;
        self.hide_cost = hide_cost;
        self.bid_step = bid_step;
        self
    }

    #[must_use]
    pub fn with_payday(mut self, payday: Funds) -> Self {
        self.payday = payday;
        self
    }

    /// Parse a JSON config, then validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players == 0 {
            return Err(ConfigError::NoPlayers);
        }
        if self.columns == 0 {
            return Err(ConfigError::NoColumns);
        }
        if self.areas == 0 {
            return Err(ConfigError::NoAreas);
        }
        let money = [
            ("start_funds", self.start_funds),
            ("check_cost", self.check_cost),
            ("hide_cost", self.hide_cost),
            ("bid_step", self.bid_step),
            ("payday", self.payday),
        ];
        for (field, value) in money {
            if value < 0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        Ok(())
    }

    /// Board rows: one per (player, area) pair plus the King's row.
    pub fn rows(&self) -> usize {
        self.players * self.areas + 1
    }

    /// Row weight that ends the game immediately.
    pub fn win_amount(&self) -> u32 {
        let c = self.columns as u32;
        c + c / 2 + 1
    }
}
