pub mod types;
pub mod config;
pub mod error;
pub mod deck;
pub mod board;
pub mod setup;
pub mod table;
pub mod auction;
pub mod payday;
pub mod phase;
pub mod game;
pub mod turns;
pub mod visibility;


pub use types::*;
pub use config::{ConfigError, GameConfig};
pub use error::GameError;
pub use auction::{Auction, AuctionPhase};
pub use payday::PaydayPhase;
pub use phase::Phase;
pub use game::Game;
pub use turns::{Turn, Turns};
pub use visibility::{player_view, PlayerView};
