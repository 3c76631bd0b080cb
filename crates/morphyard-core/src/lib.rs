//! Morphyard Core - Reptile Breeding and Market Simulation
//!
//! A player keeps reptiles whose genetics ("morphs" and "hets") set their
//! value, pairs them to hatch clutches, and sells them into a market whose
//! price trend drifts over time and jumps at expos.
//!
//! # Architecture
//!
//! - **Components**: plain game data ([`components::Organism`],
//!   [`components::PlayerAccount`])
//! - **Systems**: randomized behavior (appraisal, breeding, market) taking an
//!   injected `&mut impl Rng`
//! - **Engine**: [`engine::GameSession`] owns the seeded RNG and wires the
//!   systems to one player's account
//! - **Persistence**: JSON player records in a [`persistence::SaveStore`] and
//!   bincode session snapshots
//!
//! # Example
//!
//! ```rust
//! use morphyard_core::prelude::*;
//!
//! let mut session = GameSession::new(GameConfig::default().with_seed(7));
//! session.hatch("Luna", Sex::Female, vec!["Pastel".into()], vec![]).unwrap();
//! session.hatch("Sol", Sex::Male, vec!["Clown".into()], vec![]).unwrap();
//!
//! let clutch = session.breed("Luna", "Sol").unwrap();
//! assert!((1..=13).contains(&clutch.len()));
//!
//! session.advance_market();
//! let report = session.sell_at_auction(&clutch[0].name).unwrap();
//! assert!(report.price > 0.0);
//! ```

pub mod components;
pub mod config;
pub mod engine;
pub mod persistence;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::config::{BreedingConfig, GameConfig, MarketConfig};
    pub use crate::engine::{GameSession, SaleReport, SessionError};
    pub use crate::persistence::{JsonFileStore, LoadOutcome, MemoryStore, SaveError, SaveStore};
    pub use crate::systems::{BreedError, BreedingSystem, ClutchPrediction, MarketSystem};
    pub use morphyard_logic::market::ExpoOutcome;
}
