//! Game constants — prices, market bounds, clutch sizes, progression.
//!
//! Plain numeric constants shared by the pure rules in this crate and the
//! default configuration in `morphyard-core`.

pub mod pricing {
    /// Price of a normal (no morphs, no hets) animal, and the price floor.
    pub const BASE_PRICE: f64 = 50.0;
    /// Minimum value any organism can be worth.
    pub const PRICE_FLOOR: f64 = 50.0;
    /// Largest value any organism can be worth; keeps prices finite.
    pub const PRICE_CAP: f64 = 1.0e12;
    /// Multiplier applied once per dominant / co-dominant morph.
    pub const MORPH_MULTIPLIER: f64 = 1.5;
    /// Multiplier applied once per het.
    pub const HET_MULTIPLIER: f64 = 2.0;
    /// Lower bound of the per-valuation variance draw.
    pub const VARIANCE_MIN: f64 = 0.9;
    /// Upper bound of the per-valuation variance draw.
    pub const VARIANCE_MAX: f64 = 1.2;
}

pub mod market {
    /// Trend multiplier a fresh market starts from.
    pub const INITIAL_TREND: f64 = 1.0;
    pub const TREND_MIN: f64 = 0.5;
    pub const TREND_MAX: f64 = 2.0;
    /// Maximum swing of a single trend update.
    pub const VOLATILITY: f64 = 0.1;
    /// Auction bidding rounds, inclusive.
    pub const MIN_BID_ROUNDS: u32 = 3;
    pub const MAX_BID_ROUNDS: u32 = 11;
    /// Per-round bid increase as a fraction of the starting price.
    pub const BID_STEP_MIN: f64 = 0.05;
    pub const BID_STEP_MAX: f64 = 1.1;
}

pub mod breeding {
    /// Clutch size bounds, inclusive.
    pub const MIN_CLUTCH: u32 = 1;
    pub const MAX_CLUTCH: u32 = 13;
    /// Chance that each parent passes an extra copy of one of its morphs.
    pub const BONUS_MORPH_CHANCE: f64 = 0.5;
}

pub mod progression {
    pub const STARTING_MONEY: f64 = 700.0;
    pub const STARTING_LEVEL: u32 = 1;
    pub const MAX_LEVEL: u32 = 30;
    /// Reputation needed to leave level 1.
    pub const BASE_LEVEL_REP: f64 = 600.0;
    /// Growth of the reputation requirement per level.
    pub const LEVEL_REP_GROWTH: f64 = 1.25;
    /// Reputation earned per unit of sale price.
    pub const REP_PER_PRICE: f64 = 2.0;
    /// Reputation earned per gene carried by the sold animal.
    pub const REP_PER_GENE: f64 = 12.0;
}
