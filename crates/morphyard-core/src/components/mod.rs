//! Game data: organisms and the player account.
//!
//! These types hold state; randomized behavior (appraisal, breeding,
//! market moves) lives in the systems module.

mod organism;
mod player;

pub use organism::*;
pub use player::*;
