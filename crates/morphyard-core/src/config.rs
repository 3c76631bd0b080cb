//! Game configuration
//!
//! Every field has a default taken from `morphyard_logic::constants`, so a
//! JSON config only needs the keys it wants to override.

use morphyard_logic::constants::{breeding, market, progression};
use serde::{Deserialize, Serialize};

/// Top-level settings for a game session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Player identity and save key
    pub username: String,
    pub starting_money: f64,
    /// Seed for the session RNG; `None` seeds from entropy
    pub seed: Option<u64>,
    pub market: MarketConfig,
    pub breeding: BreedingConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            username: "player".to_string(),
            starting_money: progression::STARTING_MONEY,
            seed: None,
            market: MarketConfig::default(),
            breeding: BreedingConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON, filling unspecified fields with defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Market behavior
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    /// Maximum trend change per update
    pub volatility: f64,
    /// Auction rounds, inclusive range
    pub min_bid_rounds: u32,
    pub max_bid_rounds: u32,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            volatility: market::VOLATILITY,
            min_bid_rounds: market::MIN_BID_ROUNDS,
            max_bid_rounds: market::MAX_BID_ROUNDS,
        }
    }
}

impl MarketConfig {
    /// Volatility as a usable magnitude (non-negative, finite)
    pub fn volatility(&self) -> f64 {
        if self.volatility.is_finite() {
            self.volatility.abs()
        } else {
            market::VOLATILITY
        }
    }

    /// Bid round bounds with `min <= max`
    pub fn bid_rounds(&self) -> (u32, u32) {
        let min = self.min_bid_rounds;
        (min, self.max_bid_rounds.max(min))
    }
}

/// Clutch and inheritance settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreedingConfig {
    /// Clutch size, inclusive range
    pub min_clutch: u32,
    pub max_clutch: u32,
    /// Chance per parent of passing an extra copy of one morph
    pub bonus_morph_chance: f64,
}

impl Default for BreedingConfig {
    fn default() -> Self {
        Self {
            min_clutch: breeding::MIN_CLUTCH,
            max_clutch: breeding::MAX_CLUTCH,
            bonus_morph_chance: breeding::BONUS_MORPH_CHANCE,
        }
    }
}

impl BreedingConfig {
    /// Clutch bounds with at least one egg and `min <= max`
    pub fn clutch_range(&self) -> (u32, u32) {
        let min = self.min_clutch.max(1);
        (min, self.max_clutch.max(min))
    }

    /// Bonus chance as a valid probability
    pub fn bonus_chance(&self) -> f64 {
        if self.bonus_morph_chance.is_nan() {
            breeding::BONUS_MORPH_CHANCE
        } else {
            self.bonus_morph_chance.clamp(0.0, 1.0)
        }
    }
}
