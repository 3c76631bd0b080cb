//! Market system - trend drift, expo events, and auction price prediction
//!
//! The market keeps one trend multiplier that scales every auction bid.
//! It drifts by a bounded random amount on each update and jumps on expo
//! events, always staying within the market bounds. Every change is
//! appended to the trend history.

use morphyard_logic::constants::market::{BID_STEP_MAX, BID_STEP_MIN, INITIAL_TREND};
use morphyard_logic::market::{clamp_trend, drift_trend, settle_auction, ExpoOutcome};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::components::Organism;
use crate::config::MarketConfig;

/// Session-wide market state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "MarketState")]
pub struct MarketSystem {
    /// Current trend multiplier, within the market bounds
    trend: f64,
    /// Every trend value after an update or expo, oldest first
    history: Vec<f64>,
    config: MarketConfig,
}

impl MarketSystem {
    /// Open a market at the initial trend and run its first update.
    pub fn open(config: MarketConfig, rng: &mut impl Rng) -> Self {
        let mut market = Self::from_state(INITIAL_TREND, Vec::new(), config);
        market.update_trend(rng);
        market
    }

    /// Restore a market from saved state. The trend and every history
    /// entry are clamped into bounds; non-finite history entries are dropped.
    pub fn from_state(trend: f64, history: Vec<f64>, config: MarketConfig) -> Self {
        let trend = if trend.is_finite() {
            clamp_trend(trend)
        } else {
            INITIAL_TREND
        };
        let history = history
            .into_iter()
            .filter(|t| t.is_finite())
            .map(clamp_trend)
            .collect();
        Self {
            trend,
            history,
            config,
        }
    }

    /// Drift the trend by up to the configured volatility in either direction.
    pub fn update_trend(&mut self, rng: &mut impl Rng) -> f64 {
        let volatility = self.config.volatility();
        let delta = rng.gen_range(-volatility..=volatility);
        self.trend = drift_trend(self.trend, delta);
        self.history.push(self.trend);
        log::debug!("Market trend {:+.3} -> {:.3}", delta, self.trend);
        self.trend
    }

    /// Hold an expo: one of four equally likely outcomes adjusts the trend.
    pub fn run_expo(&mut self, rng: &mut impl Rng) -> ExpoOutcome {
        let outcome = *ExpoOutcome::ALL
            .choose(rng)
            .unwrap_or(&ExpoOutcome::NoEffect);
        self.trend = outcome.apply(self.trend);
        self.history.push(self.trend);
        log::info!("{} (trend now {:.3})", outcome.message(), self.trend);
        outcome
    }

    /// Predict what an organism would fetch at auction right now.
    ///
    /// The starting price is a fresh appraisal, not the stored price. Each
    /// bidding round adds a random fraction of the starting price scaled by
    /// the current trend.
    pub fn predict_sale_price(&self, organism: &Organism, rng: &mut impl Rng) -> f64 {
        let starting_price = organism.compute_value(rng);
        let (min_rounds, max_rounds) = self.config.bid_rounds();
        let rounds = rng.gen_range(min_rounds..=max_rounds);
        let steps: Vec<f64> = (0..rounds)
            .map(|_| rng.gen_range(BID_STEP_MIN..=BID_STEP_MAX))
            .collect();
        settle_auction(starting_price, &steps, self.trend)
    }

    pub fn trend(&self) -> f64 {
        self.trend
    }

    pub fn history(&self) -> &[f64] {
        &self.history
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    /// Mean of the recorded trend values, or the current trend if none
    pub fn average_trend(&self) -> f64 {
        if self.history.is_empty() {
            self.trend
        } else {
            self.history.iter().sum::<f64>() / self.history.len() as f64
        }
    }
}

/// Raw deserialized fields, validated through [`MarketSystem::from_state`]
#[derive(Deserialize)]
struct MarketState {
    trend: f64,
    history: Vec<f64>,
    config: MarketConfig,
}

impl From<MarketState> for MarketSystem {
    fn from(state: MarketState) -> Self {
        MarketSystem::from_state(state.trend, state.history, state.config)
    }
}
