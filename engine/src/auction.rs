// ═══════════════════════════════════════════════════════════════════════
// Auction phase: one lot, one bidding round
//
// The lot is the top card of each deck. Starting with the auction
// starter, every player gets exactly one turn: optionally check the
// lot's area and/or hide it, then bid or pass. Check and hide fees are
// paid on the spot; a bid only costs money if it is still the highest
// when the turn order wraps back to the starter and the round settles.
// ═══════════════════════════════════════════════════════════════════════

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::GameError;
use crate::table::Table;
use crate::types::*;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionPhase {
    starter: PlayerId,
    active_player: PlayerId,
    check_cost: Funds,
    hide_cost: Funds,
    bid_step: Funds,
    checked: BTreeSet<PlayerId>,
    hidden: bool,
    highest_bid: Funds,
    highest_bidder: Option<PlayerId>,
    item: AbilityCode,
    area: AreaCode,
    steps: Vec<AuctionStep>,
    winner: Option<PlayerId>,
    active: bool,
}

impl AuctionPhase {
    /// Open a round on the current top cards, `starter` to act first.
    pub fn open(table: &Table, starter: PlayerId) -> Result<Self, GameError> {
        if starter >= table.players() {
            return Err(GameError::UnknownPlayer(starter));
        }
        let config = table.config();
        Ok(Self {
            starter,
            active_player: starter,
            check_cost: config.check_cost,
            hide_cost: config.hide_cost,
            bid_step: config.bid_step,
            checked: BTreeSet::new(),
            hidden: false,
            highest_bid: 0,
            highest_bidder: None,
            item: table.hidden_ability()?,
            area: table.hidden_area()?,
            steps: vec![AuctionStep::open(starter)],
            winner: None,
            active: true,
        })
    }

    // ── Accessors ──────────────────────────────────────────────────────

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whose turn it is; `None` once the round has settled.
    pub fn active_player(&self) -> Option<PlayerId> {
        self.active.then_some(self.active_player)
    }

    pub fn starter(&self) -> PlayerId {
        self.starter
    }

    /// Ability up for sale. Always public.
    pub fn item(&self) -> AbilityCode {
        self.item
    }

    /// Area of the lot as it was when the round opened.
    pub fn area(&self) -> AreaCode {
        self.area
    }

    pub fn hidden(&self) -> bool {
        self.hidden
    }

    pub fn checked(&self) -> &BTreeSet<PlayerId> {
        &self.checked
    }

    pub fn has_checked(&self, player: PlayerId) -> bool {
        self.checked.contains(&player)
    }

    pub fn highest_bid(&self) -> Funds {
        self.highest_bid
    }

    pub fn highest_bidder(&self) -> Option<PlayerId> {
        self.highest_bidder
    }

    /// Smallest bid the next player may place.
    pub fn minimum_bid(&self) -> Funds {
        self.highest_bid + self.bid_step
    }

    pub fn steps(&self) -> &[AuctionStep] {
        &self.steps
    }

    /// Set at settlement; `None` if nobody bid.
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    pub fn check_cost(&self) -> Funds {
        self.check_cost
    }

    pub fn hide_cost(&self) -> Funds {
        self.hide_cost
    }

    pub fn bid_step(&self) -> Funds {
        self.bid_step
    }

    // ── Player actions ─────────────────────────────────────────────────

    pub fn can_check(&self, table: &Table) -> bool {
        self.active && !self.hidden && table.funds(self.active_player) >= self.check_cost
    }

    /// Pay to look at the lot's area. Does not end the turn.
    pub fn check(&mut self, table: &mut Table) -> Result<AreaCode, GameError> {
        let player = self.current()?;
        if self.hidden {
            return Err(GameError::AlreadyHidden);
        }
        afford(table, player, self.check_cost)?;
        let area = table.hidden_area()?;

        table.debit(player, self.check_cost);
        self.checked.insert(player);
        self.step_mut().checked = true;
        debug!("player {} checked the lot", player);
        Ok(area)
    }

    pub fn can_hide(&self, table: &Table) -> bool {
        self.active && !self.hidden && table.funds(self.active_player) >= self.hide_cost
    }

    /// Pay to stop anyone after this player from checking. Does not end the turn.
    pub fn hide(&mut self, table: &mut Table) -> Result<(), GameError> {
        let player = self.current()?;
        if self.hidden {
            return Err(GameError::AlreadyHidden);
        }
        afford(table, player, self.hide_cost)?;

        table.debit(player, self.hide_cost);
        self.hidden = true;
        self.step_mut().hid = true;
        debug!("player {} hid the lot", player);
        Ok(())
    }

    /// Raise the highest bid and end the turn. Nothing is paid yet.
    pub fn bid(&mut self, table: &mut Table, amount: Funds) -> Result<(), GameError> {
        let player = self.current()?;
        afford(table, player, amount)?;
        let minimum = self.minimum_bid();
        if amount < minimum {
            return Err(GameError::BidTooLow { bid: amount, minimum });
        }
        self.ensure_can_advance(table)?;

        self.highest_bid = amount;
        self.highest_bidder = Some(player);
        self.step_mut().bid = Some(amount);
        debug!("player {} bid {}", player, amount);
        self.advance(table)
    }

    /// End the turn without bidding.
    pub fn pass_bid(&mut self, table: &mut Table) -> Result<(), GameError> {
        let player = self.current()?;
        self.ensure_can_advance(table)?;

        self.step_mut().bid = None;
        debug!("player {} passed", player);
        self.advance(table)
    }

    /// Close `player`'s turn with a pass if they never bid or passed.
    pub fn finalize_for(&mut self, table: &mut Table, player: Option<PlayerId>) -> Result<(), GameError> {
        if player.is_some() && self.active_player() == player {
            debug!("player {:?} did not act, passing", player);
            self.pass_bid(table)?;
        }
        Ok(())
    }

    // ── Internals ──────────────────────────────────────────────────────

    fn current(&self) -> Result<PlayerId, GameError> {
        if self.active {
            Ok(self.active_player)
        } else {
            Err(GameError::AuctionSettled)
        }
    }

    fn step_mut(&mut self) -> &mut AuctionStep {
        self.steps.last_mut().expect("an open round always has a step")
    }

    fn next_seat(&self, table: &Table) -> PlayerId {
        (self.active_player + 1) % table.players()
    }

    /// Settling draws the lot, so the decks must still hold it.
    fn ensure_can_advance(&self, table: &Table) -> Result<(), GameError> {
        if self.next_seat(table) == self.starter && table.decks_exhausted() {
            return Err(GameError::EmptyDeck);
        }
        Ok(())
    }

    fn advance(&mut self, table: &mut Table) -> Result<(), GameError> {
        let next = self.next_seat(table);
        if next == self.starter {
            self.settle(table)
        } else {
            self.active_player = next;
            self.steps.push(AuctionStep::open(next));
            Ok(())
        }
    }

    fn settle(&mut self, table: &mut Table) -> Result<(), GameError> {
        let (area, ability) = table.pop_lot()?;
        self.active = false;
        self.active_player = self.starter;
        self.winner = self.highest_bidder;

        match self.highest_bidder {
            Some(bidder) => {
                table.debit(bidder, self.highest_bid);
                table.set_for_player(bidder, area, ability)?;
                info!(
                    "auction settled: player {} pays {} for ability {} in area {}",
                    bidder, self.highest_bid, ability, area
                );
            }
            None => info!("auction settled: no bids, ability {} in area {} discarded", ability, area),
        }
        Ok(())
    }
}

fn afford(table: &Table, player: PlayerId, needed: Funds) -> Result<(), GameError> {
    let available = table.funds(player);
    if available < needed {
        return Err(GameError::InsufficientFunds { player, needed, available });
    }
    Ok(())
}

// ── Auction handle ─────────────────────────────────────────────────────

/// An auction bound to the table it runs on, for the duration of a turn.
/// Reads fall through to `AuctionPhase`.
pub struct Auction<'a> {
    phase: &'a mut AuctionPhase,
    table: &'a mut Table,
}

impl<'a> Auction<'a> {
    pub(crate) fn new(phase: &'a mut AuctionPhase, table: &'a mut Table) -> Self {
        Self { phase, table }
    }

    pub fn table(&self) -> &Table {
        &*self.table
    }

    /// Money of the player whose turn it is.
    pub fn player_funds(&self) -> Option<Funds> {
        self.phase.active_player().map(|p| self.table.funds(p))
    }

    pub fn can_check(&self) -> bool {
        self.phase.can_check(&*self.table)
    }

    pub fn check(&mut self) -> Result<AreaCode, GameError> {
        self.phase.check(self.table)
    }

    pub fn can_hide(&self) -> bool {
        self.phase.can_hide(&*self.table)
    }

    pub fn hide(&mut self) -> Result<(), GameError> {
        self.phase.hide(self.table)
    }

    pub fn bid(&mut self, amount: Funds) -> Result<(), GameError> {
        self.phase.bid(self.table, amount)
    }

    pub fn pass_bid(&mut self) -> Result<(), GameError> {
        self.phase.pass_bid(self.table)
    }
}

impl std::ops::Deref for Auction<'_> {
    type Target = AuctionPhase;

    fn deref(&self) -> &AuctionPhase {
        &*self.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::deck::Deck;

    /// 3 players, 5 columns; lot on top is area 2 / ability 4.
    fn setup() -> (Table, AuctionPhase) {
        let config = GameConfig::new(3).with_columns(5);
        let table = Table::new(config, Deck::new(vec![2, 1, 0]), Deck::new(vec![4, 3, 2])).unwrap();
        let phase = AuctionPhase::open(&table, 0).unwrap();
        (table, phase)
    }

    #[test]
    fn test_open_snapshots_lot() {
        let (_, phase) = setup();
        assert!(phase.is_active());
        assert_eq!(phase.active_player(), Some(0));
        assert_eq!(phase.item(), 4);
        assert_eq!(phase.area(), 2);
        assert_eq!(phase.steps(), &[AuctionStep::open(0)]);
        assert_eq!(phase.minimum_bid(), 1_000);
    }

    #[test]
    fn test_all_pass_settles_without_winner() {
        let (mut table, mut phase) = setup();
        for _ in 0..3 {
            phase.pass_bid(&mut table).unwrap();
        }
        assert!(!phase.is_active());
        assert_eq!(phase.winner(), None);
        assert_eq!(phase.active_player(), None);
        assert_eq!(table.deck_len(), 2);
        assert_eq!(table.all_funds(), &[10_000, 10_000, 10_000]);
        assert_eq!(table.board().row_weights().iter().sum::<u32>(), 0);
    }

    #[test]
    fn test_check_and_hide_charge_immediately() {
        let (mut table, mut phase) = setup();
        assert!(phase.can_check(&table));
        assert_eq!(phase.check(&mut table), Ok(2));
        assert_eq!(table.funds(0), 9_000);
        assert!(phase.has_checked(0));

        phase.hide(&mut table).unwrap();
        assert_eq!(table.funds(0), 8_000);
        assert!(!phase.can_check(&table));
        assert!(!phase.can_hide(&table));
        assert_eq!(phase.check(&mut table), Err(GameError::AlreadyHidden));
        assert_eq!(phase.hide(&mut table), Err(GameError::AlreadyHidden));
        assert_eq!(table.funds(0), 8_000);
        assert_eq!(phase.steps()[0], AuctionStep { player: 0, checked: true, hid: true, bid: None });
    }

    #[test]
    fn test_bid_rules() {
        let (mut table, mut phase) = setup();
        assert_eq!(phase.bid(&mut table, 999), Err(GameError::BidTooLow { bid: 999, minimum: 1_000 }));
        assert_eq!(
            phase.bid(&mut table, 10_001),
            Err(GameError::InsufficientFunds { player: 0, needed: 10_001, available: 10_000 })
        );
        phase.bid(&mut table, 1_500).unwrap();
        // not charged until settlement
        assert_eq!(table.funds(0), 10_000);
        assert_eq!(phase.active_player(), Some(1));
        assert_eq!(phase.minimum_bid(), 2_500);
        assert!(matches!(phase.bid(&mut table, 2_000), Err(GameError::BidTooLow { .. })));
    }

    #[test]
    fn test_winner_pays_and_gets_lot() {
        let (mut table, mut phase) = setup();
        phase.bid(&mut table, 1_000).unwrap();
        phase.bid(&mut table, 2_000).unwrap();
        phase.pass_bid(&mut table).unwrap();

        assert_eq!(phase.winner(), Some(1));
        assert_eq!(table.all_funds(), &[10_000, 8_000, 10_000]);
        assert!(table.has(1, 2, 4).unwrap());
        assert_eq!(phase.bid(&mut table, 5_000), Err(GameError::AuctionSettled));
    }

    #[test]
    fn test_insufficient_funds_for_check() {
        let config = GameConfig::new(2).with_start_funds(500);
        let table_areas = Deck::new(vec![1]);
        let mut table = Table::new(config, table_areas, Deck::new(vec![0])).unwrap();
        let mut phase = AuctionPhase::open(&table, 1).unwrap();
        assert!(!phase.can_check(&table));
        assert!(!phase.can_hide(&table));
        assert_eq!(
            phase.check(&mut table),
            Err(GameError::InsufficientFunds { player: 1, needed: 1_000, available: 500 })
        );
        assert!(phase.checked().is_empty());
    }

    #[test]
    fn test_finalize_only_for_active_player() {
        let (mut table, mut phase) = setup();
        phase.finalize_for(&mut table, Some(2)).unwrap();
        assert_eq!(phase.active_player(), Some(0));
        phase.finalize_for(&mut table, Some(0)).unwrap();
        assert_eq!(phase.active_player(), Some(1));
        assert_eq!(phase.steps().len(), 2);
    }

    #[test]
    fn test_handle_reads_through() {
        let (mut table, mut phase) = setup();
        let mut auction = Auction::new(&mut phase, &mut table);
        assert_eq!(auction.player_funds(), Some(10_000));
        auction.check().unwrap();
        assert_eq!(auction.player_funds(), Some(9_000));
        assert!(auction.has_checked(0));
        auction.pass_bid().unwrap();
        assert_eq!(auction.active_player(), Some(1));
    }
}
