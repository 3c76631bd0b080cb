//! Systems - randomized behavior over components

mod breeding;
mod market;
mod pricing;

pub use breeding::*;
pub use market::*;
pub use pricing::*;
