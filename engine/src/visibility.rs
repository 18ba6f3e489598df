// ═══════════════════════════════════════════════════════════════════════
// Visibility / Information Model
//
// At the table, information is split between:
//   PUBLIC  - visible to all players at all times
//   PRIVATE - known only to the player who paid for it
//   HIDDEN  - unknown to all players (deck order)
//
// This module produces a "player view" of the game: only what that
// player is allowed to know. Front-ends should render from a PlayerView
// rather than from the raw Game.
// ═══════════════════════════════════════════════════════════════════════

use serde::{Deserialize, Serialize};

use crate::game::Game;
use crate::phase::Phase;
use crate::types::*;

// ── What is PUBLIC ─────────────────────────────────────────────────────
//
// • Board: every ownership flag, row weights, column frequencies
// • Every player's money
// • Current phase and whose turn it is
// • The ability up for auction (the face-up half of the lot)
// • Highest bid and bidder, whether the lot is hidden, the step history
//   (including who checked and who hid)
// • How many lots are left
// • The lot's area once the auction has settled
//
// ── What is PRIVATE (per player) ───────────────────────────────────────
//
// • The lot's area, for a player who paid to check it this round
//
// ── What is HIDDEN (unknown to everyone) ───────────────────────────────
//
// • The order of both decks
// • The lot's area for anyone who did not check it, until settlement
//

/// The view of the game that a specific player is allowed to see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub viewer: PlayerId,
    pub phase: PhaseKind,
    pub active_player: Option<PlayerId>,
    pub auction_starter: PlayerId,
    pub funds: Vec<Funds>,
    pub rows: Vec<RowView>,
    pub column_frequency: Vec<u32>,
    pub win_amount: u32,
    pub lots_left: usize,
    pub auction: Option<AuctionView>,
    /// Raw winning row, once decided.
    pub winner: Option<usize>,
}

/// One board row with its owner decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowView {
    pub row: usize,
    /// `None` for the King.
    pub player: Option<PlayerId>,
    pub area: AreaCode,
    pub abilities: Vec<bool>,
    pub weight: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionView {
    pub active: bool,
    pub item: AbilityCode,
    /// Only for a viewer who checked, or after settlement.
    pub area: Option<AreaCode>,
    pub hidden: bool,
    pub highest_bid: Funds,
    pub highest_bidder: Option<PlayerId>,
    pub minimum_bid: Funds,
    pub checked: Vec<PlayerId>,
    pub steps: Vec<AuctionStep>,
    pub winner: Option<PlayerId>,
}

/// Build the PlayerView for `viewer`.
pub fn player_view(game: &Game, viewer: PlayerId) -> PlayerView {
    let board = game.board();
    let weights = board.row_weights();

    let rows = (0..board.rows())
        .map(|row| {
            let (player, area) = game.row_info(row);
            RowView {
                row,
                player,
                area,
                abilities: board.row(row).to_vec(),
                weight: weights[row],
            }
        })
        .collect();

    let auction = match game.phase() {
        Phase::Auction(a) => {
            let area_known = !a.is_active() || a.has_checked(viewer);
            Some(AuctionView {
                active: a.is_active(),
                item: a.item(),
                area: area_known.then_some(a.area()),
                hidden: a.hidden(),
                highest_bid: a.highest_bid(),
                highest_bidder: a.highest_bidder(),
                minimum_bid: a.minimum_bid(),
                checked: a.checked().iter().copied().collect(),
                steps: a.steps().to_vec(),
                winner: a.winner(),
            })
        }
        Phase::Payday(_) => None,
    };

    PlayerView {
        viewer,
        phase: game.phase().kind(),
        active_player: game.phase().active_player(),
        auction_starter: game.auction_starter(),
        funds: game.all_funds().to_vec(),
        rows,
        column_frequency: board.column_frequency(),
        win_amount: game.win_amount(),
        lots_left: game.deck_len(),
        auction,
        winner: game.winner(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn game() -> Game {
        let config = GameConfig::new(2).with_columns(4);
        Game::with_decks(config, vec![3, 1], vec![2, 0]).unwrap()
    }

    #[test]
    fn test_area_private_to_checker() {
        let mut game = game();
        game.auction().unwrap().check().unwrap();

        let mine = player_view(&game, 0);
        let theirs = player_view(&game, 1);
        assert_eq!(mine.auction.as_ref().unwrap().area, Some(3));
        assert_eq!(theirs.auction.as_ref().unwrap().area, None);
        // the fact that player 0 checked is public
        assert_eq!(theirs.auction.as_ref().unwrap().checked, vec![0]);
        assert_eq!(theirs.funds, vec![9_000, 10_000]);
        assert_eq!(theirs.auction.as_ref().unwrap().item, 2);
    }

    #[test]
    fn test_area_public_after_settlement() {
        let mut game = game();
        game.auction().unwrap().pass_bid().unwrap();
        game.auction().unwrap().bid(1_000).unwrap();

        let view = player_view(&game, 0);
        let auction = view.auction.unwrap();
        assert!(!auction.active);
        assert_eq!(auction.area, Some(3));
        assert_eq!(auction.winner, Some(1));
        assert_eq!(view.lots_left, 1);

        let row = game.find_row(1, 3);
        assert_eq!(view.rows[row].player, Some(1));
        assert_eq!(view.rows[row].area, 3);
        assert!(view.rows[row].abilities[2]);
        assert_eq!(view.rows[row].weight, 1);
    }

    #[test]
    fn test_view_serializes() {
        let mut game = game();
        game.auction().unwrap().pass_bid().unwrap();
        game.auction().unwrap().pass_bid().unwrap();
        game.next_phase().unwrap();

        let view = player_view(&game, 1);
        assert_eq!(view.phase, PhaseKind::Payday);
        assert!(view.auction.is_none());

        let json = serde_json::to_string(&view).unwrap();
        let back: PlayerView = serde_json::from_str(&json).unwrap();
        assert_eq!(back, view);
        assert!(!json.contains("deck"));
    }
}
