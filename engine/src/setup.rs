// ═══════════════════════════════════════════════════════════════════════
// Game setup: deck composition and the opening shuffle
// ═══════════════════════════════════════════════════════════════════════

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::GameConfig;
use crate::deck::Deck;
use crate::types::{AbilityCode, AreaCode};

/// Every area code `0..=areas`, once per column.
pub fn area_cards(config: &GameConfig) -> Vec<AreaCode> {
    (0..config.columns).flat_map(|_| 0..=config.areas).collect()
}

/// Every ability code `0..columns`, once per area code (King included).
pub fn ability_cards(config: &GameConfig) -> Vec<AbilityCode> {
    (0..=config.areas).flat_map(|_| 0..config.columns).collect()
}

/// Build both decks and shuffle them once.
/// Seed controls the order for reproducibility.
pub fn shuffled_decks(config: &GameConfig, seed: u64) -> (Deck, Deck) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut areas = area_cards(config);
    let mut abilities = ability_cards(config);
    areas.shuffle(&mut rng);
    abilities.shuffle(&mut rng);

    (Deck::new(areas), Deck::new(abilities))
}
