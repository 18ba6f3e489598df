// ═══════════════════════════════════════════════════════════════════════
// Text rendering of a PlayerView for the console
// ═══════════════════════════════════════════════════════════════════════

use std::fmt::Write;

use kingsbid_engine::visibility::{AuctionView, PlayerView};
use kingsbid_engine::{PhaseKind, Winner};

fn flags(abilities: &[bool]) -> String {
    let cells: Vec<&str> = abilities.iter().map(|&f| if f { "1" } else { "0" }).collect();
    format!("[ {} ]", cells.join("  "))
}

/// Board, money and phase, as the viewer sees them.
pub fn render(view: &PlayerView) -> String {
    let mut out = String::new();
    let header: Vec<String> = (0..view.column_frequency.len()).map(|c| c.to_string()).collect();

    let _ = writeln!(out, "Board (win at {})", view.win_amount);
    let _ = writeln!(out, "   \t[ {} ]\n", header.join("  "));
    for row in &view.rows {
        let label = match row.player {
            Some(p) => p.to_string(),
            None => "K".to_string(),
        };
        let _ = writeln!(out, "{}:\t{}    {}", label, flags(&row.abilities), row.weight);
    }
    let freq: Vec<String> = view.column_frequency.iter().map(|f| f.to_string()).collect();
    let _ = writeln!(out, "\nC:\t[ {} ]\n", freq.join("  "));

    let money: Vec<String> = view.funds.iter().enumerate().map(|(p, f)| format!("{}: {}$", p, f)).collect();
    let _ = writeln!(out, "{}", money.join(", "));
    let _ = writeln!(out, "Lots left: {}\n", view.lots_left);

    match (&view.phase, &view.auction) {
        (PhaseKind::Auction, Some(auction)) => render_auction(&mut out, view, auction),
        _ => {
            let _ = writeln!(out, "Phase: payday");
        }
    }
    out
}

fn render_auction(out: &mut String, view: &PlayerView, auction: &AuctionView) {
    let mut state = if auction.active { "active" } else { "inactive" }.to_string();
    if auction.hidden {
        state.push_str("/hidden");
    }
    let _ = writeln!(
        out,
        "Phase: auction is {}. For sale: {}. Highest bid is {}$.",
        state, auction.item, auction.highest_bid
    );

    let mut who = match (auction.winner, view.active_player) {
        (Some(w), _) => format!("winner: {}", w),
        (None, Some(p)) => format!("active: {}", p),
        (None, None) => "no bids".to_string(),
    };
    if let Some(area) = auction.area {
        who.push_str(&format!(", area {}", area));
    }
    let _ = writeln!(out, "\tPlayer {}", who);
    if auction.active {
        let _ = writeln!(out, "\tMinimum bid: {}$", auction.minimum_bid);
    }
    let _ = writeln!(out, "\tSteps:");
    for step in &auction.steps {
        let _ = writeln!(out, "\t{}", step);
    }
}

pub fn render_winner(row: usize, winner: Option<Winner>) -> String {
    match winner {
        Some(w) => format!("Winner is row {}: {}", row, w),
        None => format!("Winner is row {}", row),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kingsbid_engine::{player_view, Game, GameConfig};

    #[test]
    fn test_render_fresh_game() {
        let config = GameConfig::new(2).with_columns(3);
        let game = Game::with_decks(config, vec![2, 1], vec![1, 0]).unwrap();
        let text = render(&player_view(&game, 0));
        assert!(text.contains("K:\t[ 0  0  0 ]    0"));
        assert!(text.contains("0: 10000$, 1: 10000$"));
        assert!(text.contains("For sale: 1."));
        assert!(text.contains("Player active: 0"));
        // nobody has checked, so the area stays secret
        assert!(!text.contains("area 2"));
    }

    #[test]
    fn test_render_checked_area() {
        let config = GameConfig::new(2).with_columns(3);
        let mut game = Game::with_decks(config, vec![2, 1], vec![1, 0]).unwrap();
        game.auction().unwrap().check().unwrap();
        let text = render(&player_view(&game, 0));
        assert!(text.contains("Player active: 0, area 2"));
        assert!(text.contains("Player 0, checked, bid: pass"));
    }

    #[test]
    fn test_render_winner() {
        assert_eq!(render_winner(0, Some(Winner::King)), "Winner is row 0: the King");
    }
}
