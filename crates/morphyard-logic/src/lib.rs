//! Pure breeding and market rules for Morphyard.
//!
//! This crate contains the game rules that do not depend on randomness or
//! storage. Functions take plain data (trait lists, prices, levels, variance
//! samples) and return results, so the stateful `morphyard-core` crate can
//! draw the random numbers and this crate stays trivially testable.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`constants`] | Price, market, clutch and progression constants |
//! | [`genetics`] | Trait-list union and gene counting |
//! | [`market`] | Trend clamping, expo outcomes, bid escalation |
//! | [`pricing`] | Value formula, variance application, cent rounding |
//! | [`progression`] | Level thresholds and sale reputation |

pub mod constants;
pub mod genetics;
pub mod market;
pub mod pricing;
pub mod progression;
