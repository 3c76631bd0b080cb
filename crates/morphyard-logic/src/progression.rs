//! Player progression: level thresholds and reputation from sales.
//!
//! Reputation needed to leave a level grows geometrically from
//! [`BASE_LEVEL_REP`] by [`LEVEL_REP_GROWTH`] per level, and is rounded up
//! to a whole number. Levels stop at [`MAX_LEVEL`].

use crate::constants::progression::{
    BASE_LEVEL_REP, LEVEL_REP_GROWTH, MAX_LEVEL, REP_PER_GENE, REP_PER_PRICE,
};

/// Reputation required to advance from `level` to `level + 1`.
pub fn reputation_for_next_level(level: u32) -> u64 {
    let exponent = level.saturating_sub(1) as i32;
    (BASE_LEVEL_REP * LEVEL_REP_GROWTH.powi(exponent)).ceil() as u64
}

/// Whether a player at `level` with `reputation` may advance.
pub fn can_level_up(level: u32, reputation: f64) -> bool {
    level < MAX_LEVEL && reputation >= reputation_for_next_level(level) as f64
}

/// Reputation earned by selling an animal for `price` that carries `genes` genes.
pub fn sale_reputation(price: f64, genes: usize) -> f64 {
    price * REP_PER_PRICE + REP_PER_GENE * genes as f64
}
