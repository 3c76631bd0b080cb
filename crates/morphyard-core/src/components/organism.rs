//! Organism - a single animal with its genetics and market value.

use morphyard_logic::genetics;
use morphyard_logic::pricing::enforce_floor;
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};
use std::fmt;

use crate::persistence::SaveError;
use crate::systems::appraise;

/// Biological sex of an organism
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Fair coin flip between male and female
    pub fn random(rng: &mut impl Rng) -> Self {
        if rng.gen_bool(0.5) {
            Sex::Male
        } else {
            Sex::Female
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reptile with visible morphs, carried hets, and a market price.
///
/// Morphs and hets are kept in the order they were given. Breeding unions
/// parents' traits without duplicates, but an inherited extra copy of a morph
/// is kept as a second entry and counts again toward value and gene count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organism {
    pub name: String,
    pub sex: Sex,
    /// Dominant, co-dominant and incomplete-dominant traits
    pub morphs: Vec<String>,
    /// Recessive traits carried but not expressed
    pub hets: Vec<String>,
    /// Market value; never below the price floor
    #[serde(deserialize_with = "deserialize_price")]
    pub price: f64,
}

impl Organism {
    /// Create an organism and appraise it from its traits.
    pub fn new(
        name: impl Into<String>,
        sex: Sex,
        morphs: Vec<String>,
        hets: Vec<String>,
        rng: &mut impl Rng,
    ) -> Self {
        let price = appraise(morphs.len(), hets.len(), rng);
        Self {
            name: name.into(),
            sex,
            morphs,
            hets,
            price,
        }
    }

    /// Create an organism with a known price (raised to the floor if needed).
    pub fn with_price(
        name: impl Into<String>,
        sex: Sex,
        morphs: Vec<String>,
        hets: Vec<String>,
        price: f64,
    ) -> Self {
        Self {
            name: name.into(),
            sex,
            morphs,
            hets,
            price: enforce_floor(price),
        }
    }

    /// Fresh appraisal of this organism's traits.
    ///
    /// Draws a new variance sample each call, so repeated calls differ; the
    /// stored `price` is not consulted or changed.
    pub fn compute_value(&self, rng: &mut impl Rng) -> f64 {
        appraise(self.morphs.len(), self.hets.len(), rng)
    }

    /// Total number of genes: every morph plus every het
    pub fn gene_count(&self) -> usize {
        genetics::gene_count(self.morphs.len(), self.hets.len())
    }

    /// Whether this organism and `other` can be paired for breeding
    pub fn can_breed_with(&self, other: &Organism) -> bool {
        self.sex != other.sex
    }

    /// Organism as a JSON object `{name, sex, morphs, hets, price}`
    pub fn to_value(&self) -> Value {
        json!({
            "name": self.name,
            "sex": self.sex.as_str(),
            "morphs": self.morphs,
            "hets": self.hets,
            "price": self.price,
        })
    }

    /// Rebuild an organism from a JSON object produced by [`Organism::to_value`].
    pub fn from_value(value: Value) -> Result<Self, SaveError> {
        serde_json::from_value(value).map_err(|e| SaveError::Malformed(e.to_string()))
    }
}

impl fmt::Display for Organism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let morphs = if self.morphs.is_empty() {
            "Normal".to_string()
        } else {
            self.morphs.join(", ")
        };
        write!(f, "{} ({}) - {}", self.name, self.sex, morphs)?;
        if !self.hets.is_empty() {
            write!(f, " (Het: {})", self.hets.join(", "))?;
        }
        write!(f, " - ${:.2}", self.price)
    }
}

fn deserialize_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let price = f64::deserialize(deserializer)?;
    if !price.is_finite() {
        return Err(serde::de::Error::custom("price must be a finite number"));
    }
    Ok(enforce_floor(price))
}

#[cfg(test)]
mod tests {
    use super::*;
    use morphyard_logic::constants::pricing::PRICE_CAP;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn traits(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_value_never_below_floor() {
        let mut rng = StdRng::seed_from_u64(7);
        let normal = Organism::new("Normal", Sex::Male, vec![], vec![], &mut rng);
        for _ in 0..500 {
            assert!(normal.compute_value(&mut rng) >= 50.0);
        }
        assert!(normal.price >= 50.0);
    }

    #[test]
    fn test_value_range_for_single_morph_and_het() {
        let mut rng = StdRng::seed_from_u64(11);
        let snake = Organism::new(
            "Banana",
            Sex::Female,
            traits(&["Banana"]),
            traits(&["Clown"]),
            &mut rng,
        );
        // base 150, variance 0.9..=1.2
        for _ in 0..200 {
            let value = snake.compute_value(&mut rng);
            assert!((135.0..=180.0).contains(&value), "value {value} out of range");
        }
    }

    #[test]
    fn test_gene_count() {
        let empty = Organism::with_price("A", Sex::Male, vec![], vec![], 50.0);
        assert_eq!(empty.gene_count(), 0);

        let loaded = Organism::with_price(
            "B",
            Sex::Female,
            traits(&["Pastel", "Yellowbelly"]),
            traits(&["Pied"]),
            200.0,
        );
        assert_eq!(loaded.gene_count(), 3);
    }

    #[test]
    fn test_explicit_price_respects_floor() {
        let cheap = Organism::with_price("Cheap", Sex::Male, vec![], vec![], 12.0);
        assert_eq!(cheap.price, 50.0);
    }

    #[test]
    fn test_value_roundtrip() {
        let mut rng = StdRng::seed_from_u64(3);
        let original = Organism::new(
            "Pastel Clown",
            Sex::Female,
            traits(&["Pastel"]),
            traits(&["Clown", "Pied"]),
            &mut rng,
        );

        let restored = Organism::from_value(original.to_value()).expect("roundtrip failed");
        assert_eq!(restored, original);
    }

    #[test]
    fn test_huge_trait_lists_keep_a_loadable_price() {
        let mut rng = StdRng::seed_from_u64(4);
        let morphs = vec!["Pastel".to_string(); 3_000];
        let hets = vec!["Pied".to_string(); 3_000];
        let giant = Organism::new("Giant", Sex::Male, morphs, hets, &mut rng);
        assert!(giant.price.is_finite());
        assert!(giant.price <= PRICE_CAP);
        assert!(giant.price >= 0.9 * PRICE_CAP - 1.0);

        let restored = Organism::from_value(giant.to_value()).expect("roundtrip failed");
        assert_eq!(restored, giant);
    }

    #[test]
    fn test_from_value_rejects_missing_keys() {
        let value = json!({
            "name": "Nameless",
            "sex": "Male",
            "morphs": [],
            "price": 75.0,
        });
        assert!(matches!(
            Organism::from_value(value),
            Err(SaveError::Malformed(_))
        ));
    }

    #[test]
    fn test_from_value_rejects_unknown_sex() {
        let value = json!({
            "name": "Odd",
            "sex": "Unknown",
            "morphs": [],
            "hets": [],
            "price": 75.0,
        });
        assert!(matches!(
            Organism::from_value(value),
            Err(SaveError::Malformed(_))
        ));
    }

    #[test]
    fn test_display_normal() {
        let snake = Organism::with_price("Rex", Sex::Male, vec![], vec![], 50.0);
        assert_eq!(snake.to_string(), "Rex (Male) - Normal - $50.00");
    }

    #[test]
    fn test_display_with_hets() {
        let snake = Organism::with_price(
            "Luna",
            Sex::Female,
            traits(&["Pastel", "Spider"]),
            traits(&["Clown", "Pied"]),
            337.5,
        );
        assert_eq!(
            snake.to_string(),
            "Luna (Female) - Pastel, Spider (Het: Clown, Pied) - $337.50"
        );
    }

    #[test]
    fn test_sex_helpers() {
        assert_eq!(Sex::Male.as_str(), "Male");
        let male = Organism::with_price("M", Sex::Male, vec![], vec![], 50.0);
        let female = Organism::with_price("F", Sex::Female, vec![], vec![], 50.0);
        assert!(male.can_breed_with(&female));
        assert!(!male.can_breed_with(&male));
    }
}
