//! Pure market rules — trend clamping, expo outcomes, bid escalation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::market::{TREND_MAX, TREND_MIN};
use crate::pricing::round_cents;

/// Keep a trend multiplier within the market bounds.
pub fn clamp_trend(trend: f64) -> f64 {
    trend.clamp(TREND_MIN, TREND_MAX)
}

/// Apply a drift delta to the current trend and clamp the result.
pub fn drift_trend(trend: f64, delta: f64) -> f64 {
    clamp_trend(trend + delta)
}

/// Outcome of a reptile expo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpoOutcome {
    /// A rare morph was shown off; prices jump.
    RareDiscovery,
    /// A well-attended expo lifts the whole market.
    MarketBoost,
    /// A disappointing expo drags prices down.
    MarketDrop,
    /// Nothing of note happened.
    NoEffect,
}

impl ExpoOutcome {
    /// All outcomes, each equally likely when drawn.
    pub const ALL: [ExpoOutcome; 4] = [
        ExpoOutcome::RareDiscovery,
        ExpoOutcome::MarketBoost,
        ExpoOutcome::MarketDrop,
        ExpoOutcome::NoEffect,
    ];

    /// Factor applied to the trend multiplier.
    pub fn multiplier(self) -> f64 {
        match self {
            ExpoOutcome::RareDiscovery => 1.2,
            ExpoOutcome::MarketBoost => 1.1,
            ExpoOutcome::MarketDrop => 0.9,
            ExpoOutcome::NoEffect => 1.0,
        }
    }

    /// Player-facing description of the outcome.
    pub fn message(self) -> &'static str {
        match self {
            ExpoOutcome::RareDiscovery => "Rare morph discovery! Market prices have increased.",
            ExpoOutcome::MarketBoost => "Expo success! General market boost.",
            ExpoOutcome::MarketDrop => "Expo disappointment. Market prices dropped.",
            ExpoOutcome::NoEffect => "Expo held with no significant market effect.",
        }
    }

    /// Trend after this outcome, clamped.
    pub fn apply(self, trend: f64) -> f64 {
        clamp_trend(trend * self.multiplier())
    }
}

impl fmt::Display for ExpoOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Amount a single bidding round adds to the running bid.
///
/// `step` is the fraction of the starting price drawn for this round.
pub fn bid_increment(starting_price: f64, step: f64, trend: f64) -> f64 {
    step * starting_price * trend
}

/// Final auction price from a starting price and the drawn per-round steps.
///
/// Bids only ever escalate: each round adds a positive increment on top of
/// the running total.
pub fn settle_auction(starting_price: f64, steps: &[f64], trend: f64) -> f64 {
    let total = steps
        .iter()
        .fold(starting_price, |bid, &step| {
            bid + bid_increment(starting_price, step, trend)
        });
    round_cents(total)
}
