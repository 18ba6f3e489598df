use log::info;
use serde::{Deserialize, Serialize};

use crate::table::Table;
use crate::types::Funds;

/// Between auctions every player is paid a flat stipend.
/// Nobody acts, so the phase is over as soon as it exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaydayPhase {
    payout: Funds,
}

impl PaydayPhase {
    /// Credit every player immediately.
    pub fn pay(table: &mut Table) -> Self {
        let payout = table.config().payday;
        table.credit_all(payout);
        info!("payday: every player receives {}", payout);
        Self { payout }
    }

    pub fn payout(&self) -> Funds {
        self.payout
    }

    pub fn is_active(&self) -> bool {
        false
    }
}
