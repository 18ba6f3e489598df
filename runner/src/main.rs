// ═══════════════════════════════════════════════════════════════════════
// Runner: console front-end: every seat shares one keyboard
// ═══════════════════════════════════════════════════════════════════════

mod render;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use kingsbid_engine::{player_view, Funds, Game, GameConfig, PlayerId, Turn};
use log::warn;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kingsbid", about = "King's Bid - auction board game")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game at the console
    Play {
        #[command(flatten)]
        table: TableArgs,
        /// Print each turn's player view as JSON instead of the board
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration as JSON
    Config {
        #[command(flatten)]
        table: TableArgs,
    },
}

#[derive(Args)]
struct TableArgs {
    /// JSON config file; missing fields use the defaults
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long)]
    players: Option<usize>,
    #[arg(long)]
    columns: Option<usize>,
    #[arg(long)]
    areas: Option<usize>,
    /// Deck shuffle seed
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
}

impl TableArgs {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                GameConfig::from_json(&json).with_context(|| format!("parsing {}", path.display()))?
            }
            None => GameConfig::default(),
        };
        if let Some(players) = self.players {
            config.players = players;
        }
        if let Some(columns) = self.columns {
            config.columns = columns;
        }
        if let Some(areas) = self.areas {
            config.areas = areas;
        }
        config.validate().context("invalid game configuration")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play { table, json } => cmd_play(table.game_config()?, table.seed, json),
        Commands::Config { table } => {
            println!("{}", serde_json::to_string_pretty(&table.game_config()?)?);
            Ok(())
        }
    }
}

fn cmd_play(config: GameConfig, seed: u64, json: bool) -> Result<()> {
    println!("=== King's Bid ===\n");
    println!("players={}, columns={}, areas={}, seed={}\n", config.players, config.columns, config.areas, seed);

    let mut game = Game::new(config, seed).context("setting up the game")?;
    let stdin = io::stdin();
    let mut input = stdin.lock();

    let mut turns = game.turns();
    while let Some(mut turn) = turns.next_turn()? {
        if let (Some(player), true) = (turn.player(), turn.phase().is_active()) {
            show(&turn, json)?;
            println!("Player {}, your turn.", player);
            auction_turn(&mut turn, player, &mut input, json)?;
        }
        // payday, or the auction that just settled
        if !turn.phase().is_active() {
            show(&turn, json)?;
            prompt(&mut input, "Press Enter to continue...")?;
        }
    }

    let view = player_view(&game, game.auction_starter());
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        println!("{}", render::render(&view));
    }
    if let Some(row) = game.winner() {
        println!("{}", render::render_winner(row, game.winner_player()));
    }
    Ok(())
}

fn show(turn: &Turn<'_>, json: bool) -> Result<()> {
    let game = turn.game();
    let viewer = turn.player().unwrap_or(game.auction_starter());
    let view = player_view(game, viewer);
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        println!("{}", render::render(&view));
    }
    Ok(())
}

/// `None` once stdin is closed.
fn prompt(input: &mut impl BufRead, text: &str) -> Result<Option<String>> {
    print!("{}", text);
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Read actions until the player bids or passes. Check and hide keep the
/// turn going; a rejected action is reported and asked again.
fn auction_turn(turn: &mut Turn<'_>, player: PlayerId, input: &mut impl BufRead, json: bool) -> Result<()> {
    loop {
        let Some(line) = prompt(input, "Action (c=check, h=hide, b ___ = bid ___, p=pass): ")? else {
            warn!("input closed, player {} passes", player);
            return Ok(());
        };
        let mut chars = line.chars();
        let command = chars.next().map(|c| c.to_ascii_lowercase());
        let rest = chars.as_str().trim();

        let mut auction = turn.auction()?;
        match command {
            Some('c') => match auction.check() {
                Ok(area) => {
                    println!("The lot is in area {}.", area);
                    show(turn, json)?;
                }
                Err(e) => eprintln!("Cannot check: {}", e),
            },
            Some('h') => match auction.hide() {
                Ok(()) => show(turn, json)?,
                Err(e) => eprintln!("Cannot hide: {}", e),
            },
            Some('b') => match rest.parse::<Funds>() {
                Ok(amount) => match auction.bid(amount) {
                    Ok(()) => return Ok(()),
                    Err(e) => eprintln!("Cannot bid: {}", e),
                },
                Err(_) => eprintln!("A bid needs an amount, e.g. `b 2000`."),
            },
            _ => {
                auction.pass_bid()?;
                return Ok(());
            }
        }
    }
}
