//! Breeding system - pairs a female and a male into a clutch of hatchlings
//!
//! Each hatchling is generated independently:
//! - morphs: union of both parents' morphs, plus a chance per parent of an
//!   extra copy of one of that parent's morphs
//! - hets: union of both parents' hets
//! - sex: coin flip
//! - price: standard appraisal of the resulting traits

use morphyard_logic::genetics::{combine_traits, inherited_from};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::components::{Organism, Sex};
use crate::config::BreedingConfig;

/// Expected outcome of a pairing before it happens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClutchPrediction {
    pub predicted_morphs: Vec<String>,
    pub predicted_value: f64,
}

/// Produces clutches according to a [`BreedingConfig`]
#[derive(Debug, Clone, Default)]
pub struct BreedingSystem {
    config: BreedingConfig,
}

impl BreedingSystem {
    pub fn new(config: BreedingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BreedingConfig {
        &self.config
    }

    /// Breed two organisms of opposite sex into a clutch numbered from 1.
    pub fn breed(
        &self,
        female: &Organism,
        male: &Organism,
        rng: &mut impl Rng,
    ) -> Result<Vec<Organism>, BreedError> {
        self.breed_numbered(female, male, 1, rng)
    }

    /// Breed a clutch whose hatchlings are numbered from `first_index` on,
    /// so repeat pairings can continue an earlier clutch's numbering.
    pub fn breed_numbered(
        &self,
        female: &Organism,
        male: &Organism,
        first_index: usize,
        rng: &mut impl Rng,
    ) -> Result<Vec<Organism>, BreedError> {
        if !female.can_breed_with(male) {
            return Err(BreedError::IncompatiblePair { sex: female.sex });
        }

        let (min_clutch, max_clutch) = self.config.clutch_range();
        let clutch_size = rng.gen_range(min_clutch..=max_clutch) as usize;
        let first_index = first_index.max(1);
        let clutch: Vec<Organism> = (first_index..first_index + clutch_size)
            .map(|index| self.create_offspring(female, male, index, rng))
            .collect();

        log::info!(
            "{} x {} produced a clutch of {}",
            female.name,
            male.name,
            clutch.len()
        );
        Ok(clutch)
    }

    /// Generate one hatchling. `index` is its number among the pair's offspring.
    pub fn create_offspring(
        &self,
        female: &Organism,
        male: &Organism,
        index: usize,
        rng: &mut impl Rng,
    ) -> Organism {
        let name = format!("{}{}", offspring_prefix(female, male), index);

        let mut morphs = combine_traits(&female.morphs, &male.morphs);
        let hets = combine_traits(&female.hets, &male.hets);

        let bonus_chance = self.config.bonus_chance();
        for parent in [female, male] {
            if rng.gen_bool(bonus_chance) {
                if let Some(extra) = parent.morphs.choose(rng) {
                    morphs.push(extra.clone());
                }
            }
        }
        debug_assert!(inherited_from(&morphs, &female.morphs, &male.morphs));

        let sex = Sex::random(rng);
        Organism::new(name, sex, morphs, hets, rng)
    }

    /// Preview a pairing: the union of parents' morphs and what a hatchling
    /// carrying exactly those morphs (and no hets) would be worth.
    pub fn predict_clutch_outcome(
        &self,
        female: &Organism,
        male: &Organism,
        rng: &mut impl Rng,
    ) -> ClutchPrediction {
        let predicted_morphs = combine_traits(&female.morphs, &male.morphs);
        let preview = Organism::new(
            format!("{} x {}", female.name, male.name),
            Sex::Female,
            predicted_morphs.clone(),
            Vec::new(),
            rng,
        );
        ClutchPrediction {
            predicted_morphs,
            predicted_value: self.hatchling_value(&preview, rng),
        }
    }

    /// Fresh market value of a hatchling
    pub fn hatchling_value(&self, offspring: &Organism, rng: &mut impl Rng) -> f64 {
        offspring.compute_value(rng)
    }

    /// One display line per hatchling
    pub fn display_clutch(offspring: &[Organism]) -> Vec<String> {
        offspring.iter().map(|child| child.to_string()).collect()
    }
}

/// Name shared by every hatchling of a pair, up to its number
pub fn offspring_prefix(female: &Organism, male: &Organism) -> String {
    format!("{} x {} Offspring #", female.name, male.name)
}

/// Reasons a breeding attempt can fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BreedError {
    /// Both parents share this sex
    IncompatiblePair { sex: Sex },
    /// A named parent is not in the player's collection
    ParentNotFound(String),
}

impl fmt::Display for BreedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BreedError::IncompatiblePair { sex } => {
                write!(f, "Cannot breed two {} reptiles", sex.as_str().to_lowercase())
            }
            BreedError::ParentNotFound(name) => write!(f, "Parent not found: {}", name),
        }
    }
}

impl std::error::Error for BreedError {}
