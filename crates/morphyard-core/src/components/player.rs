//! Player account - money, reputation, level, animals and shop inventory.

use morphyard_logic::constants::progression::{MAX_LEVEL, STARTING_LEVEL, STARTING_MONEY};
use morphyard_logic::progression;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use super::organism::Organism;

/// A player's ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerAccount {
    /// Identity key; also names the save record
    pub username: String,
    pub money: f64,
    /// Cumulative reputation earned from sales
    pub reputation: f64,
    /// Current level (1..=30)
    pub level: u32,
    /// Owned animals in acquisition order
    pub organisms: Vec<Organism>,
    /// Shop items by name with counts
    pub inventory: BTreeMap<String, u32>,
    /// Externally assigned tournament placing
    pub tournament_rank: Option<u32>,
}

/// Result of a level-up check
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LevelCheck {
    /// Advanced to the contained level
    LeveledUp(u32),
    /// No change; `required` is the reputation needed to leave the current
    /// level (`None` once at the level cap)
    Unchanged { required: Option<u64> },
}

impl PlayerAccount {
    /// A fresh account with the standard starting balance
    pub fn new(username: impl Into<String>) -> Self {
        Self::with_starting_money(username, STARTING_MONEY)
    }

    pub fn with_starting_money(username: impl Into<String>, money: f64) -> Self {
        Self {
            username: username.into(),
            money,
            reputation: 0.0,
            level: STARTING_LEVEL,
            organisms: Vec::new(),
            inventory: BTreeMap::new(),
            tournament_rank: None,
        }
    }

    /// Buy an item from the shop if the player can afford it.
    pub fn buy_item(&mut self, item_name: &str, cost: f64) -> Result<(), LedgerError> {
        check_amount(cost)?;
        if self.money < cost {
            return Err(LedgerError::InsufficientFunds {
                cost,
                available: self.money,
            });
        }
        self.money -= cost;
        *self.inventory.entry(item_name.to_string()).or_insert(0) += 1;
        log::info!("{} purchased {} for ${:.2}", self.username, item_name, cost);
        Ok(())
    }

    /// Sell an owned organism for `price`.
    ///
    /// Credits the price to money and `price * 2 + 12 * genes` to reputation,
    /// and returns the organism that left the account.
    pub fn sell_organism(&mut self, organism: &Organism, price: f64) -> Result<Organism, LedgerError> {
        check_amount(price)?;
        let index = self
            .organisms
            .iter()
            .position(|o| o == organism)
            .ok_or_else(|| LedgerError::OrganismNotFound(organism.name.clone()))?;

        let sold = self.organisms.remove(index);
        self.money += price;
        self.reputation += progression::sale_reputation(price, sold.gene_count());
        log::info!("{} sold {} for ${:.2}", self.username, sold.name, price);
        Ok(sold)
    }

    /// Advance one level if reputation meets the next threshold.
    pub fn check_level_up(&mut self) -> LevelCheck {
        if progression::can_level_up(self.level, self.reputation) {
            self.level += 1;
            log::info!("{} leveled up to {}", self.username, self.level);
            return LevelCheck::LeveledUp(self.level);
        }
        LevelCheck::Unchanged {
            required: self.next_level_requirement(),
        }
    }

    /// Reputation required to leave the current level, if not at the cap
    pub fn next_level_requirement(&self) -> Option<u64> {
        (self.level < MAX_LEVEL).then(|| progression::reputation_for_next_level(self.level))
    }

    /// Reputation still missing before the next level (0 when already enough)
    pub fn reputation_to_next_level(&self) -> Option<f64> {
        self.next_level_requirement()
            .map(|required| (required as f64 - self.reputation).max(0.0))
    }

    /// Take ownership of an organism. Names are unique within a collection,
    /// so a second animal under an owned name is refused.
    pub fn add_organism(&mut self, organism: Organism) -> Result<(), LedgerError> {
        if self.organism_named(&organism.name).is_some() {
            return Err(LedgerError::AlreadyOwned(organism.name));
        }
        self.organisms.push(organism);
        Ok(())
    }

    /// Take ownership of a whole clutch, or of none of it if any name clashes
    /// with the collection or with a sibling.
    pub fn add_clutch(&mut self, clutch: Vec<Organism>) -> Result<(), LedgerError> {
        {
            let mut incoming = HashSet::new();
            for child in &clutch {
                if self.organism_named(&child.name).is_some() || !incoming.insert(child.name.as_str()) {
                    return Err(LedgerError::AlreadyOwned(child.name.clone()));
                }
            }
        }
        self.organisms.extend(clutch);
        Ok(())
    }

    pub fn owns(&self, organism: &Organism) -> bool {
        self.organisms.contains(organism)
    }

    /// Owned organism with the given name
    pub fn organism_named(&self, name: &str) -> Option<&Organism> {
        self.organisms.iter().find(|o| o.name == name)
    }

    pub fn item_count(&self, item_name: &str) -> u32 {
        self.inventory.get(item_name).copied().unwrap_or(0)
    }

    pub fn set_tournament_rank(&mut self, rank: Option<u32>) {
        self.tournament_rank = rank;
    }

    /// Combined stored price of every owned organism
    pub fn collection_value(&self) -> f64 {
        self.organisms.iter().map(|o| o.price).sum()
    }
}

fn check_amount(amount: f64) -> Result<(), LedgerError> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(())
    } else {
        Err(LedgerError::InvalidAmount(amount))
    }
}

/// Ledger operations that were declined
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerError {
    InsufficientFunds { cost: f64, available: f64 },
    OrganismNotFound(String),
    AlreadyOwned(String),
    InvalidAmount(f64),
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerError::InsufficientFunds { cost, available } => write!(
                f,
                "Not enough money: costs ${:.2}, have ${:.2}",
                cost, available
            ),
            LedgerError::OrganismNotFound(name) => write!(f, "Reptile not found: {}", name),
            LedgerError::AlreadyOwned(name) => write!(f, "Reptile already owned: {}", name),
            LedgerError::InvalidAmount(amount) => write!(f, "Invalid amount: {}", amount),
        }
    }
}

impl std::error::Error for LedgerError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Sex;

    fn snake(name: &str, morphs: &[&str], hets: &[&str], price: f64) -> Organism {
        Organism::with_price(
            name,
            Sex::Female,
            morphs.iter().map(|s| s.to_string()).collect(),
            hets.iter().map(|s| s.to_string()).collect(),
            price,
        )
    }

    #[test]
    fn test_new_account() {
        let player = PlayerAccount::new("keeper");
        assert_eq!(player.money, 700.0);
        assert_eq!(player.reputation, 0.0);
        assert_eq!(player.level, 1);
        assert!(player.organisms.is_empty());
        assert!(player.inventory.is_empty());
        assert_eq!(player.tournament_rank, None);
    }

    #[test]
    fn test_buy_item() {
        let mut player = PlayerAccount::new("keeper");
        player.buy_item("Heat Mat", 100.0).unwrap();
        player.buy_item("Heat Mat", 100.0).unwrap();
        assert_eq!(player.money, 500.0);
        assert_eq!(player.item_count("Heat Mat"), 2);
        assert_eq!(player.item_count("Hide"), 0);
    }

    #[test]
    fn test_buy_item_declined() {
        let mut player = PlayerAccount::new("keeper");
        let result = player.buy_item("Incubator", 900.0);
        assert_eq!(
            result,
            Err(LedgerError::InsufficientFunds {
                cost: 900.0,
                available: 700.0
            })
        );
        assert_eq!(player.money, 700.0);
        assert!(player.inventory.is_empty());
    }

    #[test]
    fn test_buy_item_exact_balance() {
        let mut player = PlayerAccount::new("keeper");
        assert!(player.buy_item("Rack", 700.0).is_ok());
        assert_eq!(player.money, 0.0);
    }

    #[test]
    fn test_negative_cost_rejected() {
        let mut player = PlayerAccount::new("keeper");
        assert_eq!(
            player.buy_item("Refund", -50.0),
            Err(LedgerError::InvalidAmount(-50.0))
        );
    }

    #[test]
    fn test_sell_reputation_formula() {
        let mut player = PlayerAccount::new("keeper");
        let animal = snake("Trio", &["Pastel", "Spider"], &["Clown"], 100.0);
        player.add_organism(animal.clone()).unwrap();

        let sold = player.sell_organism(&animal, 100.0).unwrap();
        assert_eq!(sold, animal);
        assert_eq!(player.reputation, 236.0);
        assert_eq!(player.money, 800.0);
        assert!(player.organisms.is_empty());
    }

    #[test]
    fn test_sell_unowned() {
        let mut player = PlayerAccount::new("keeper");
        let stranger = snake("Stranger", &[], &[], 50.0);
        assert_eq!(
            player.sell_organism(&stranger, 50.0),
            Err(LedgerError::OrganismNotFound("Stranger".to_string()))
        );
        assert_eq!(player.money, 700.0);
        assert_eq!(player.reputation, 0.0);
    }

    #[test]
    fn test_add_duplicate_refused() {
        let mut player = PlayerAccount::new("keeper");
        let animal = snake("Solo", &["Pastel"], &[], 75.0);
        player.add_organism(animal.clone()).unwrap();
        assert_eq!(
            player.add_organism(animal),
            Err(LedgerError::AlreadyOwned("Solo".to_string()))
        );
        assert_eq!(player.organisms.len(), 1);

        // Same name, different animal
        assert_eq!(
            player.add_organism(snake("Solo", &["Pastel"], &[], 90.0)),
            Err(LedgerError::AlreadyOwned("Solo".to_string()))
        );
        assert_eq!(player.organisms.len(), 1);
    }

    #[test]
    fn test_add_clutch_is_all_or_nothing() {
        let mut player = PlayerAccount::new("keeper");
        player.add_organism(snake("B", &[], &[], 50.0)).unwrap();

        let clashing = vec![
            snake("A", &[], &[], 50.0),
            snake("B", &["Pastel"], &[], 75.0),
            snake("C", &[], &[], 50.0),
        ];
        assert_eq!(
            player.add_clutch(clashing),
            Err(LedgerError::AlreadyOwned("B".to_string()))
        );
        assert_eq!(player.organisms.len(), 1);

        let twins = vec![snake("D", &[], &[], 50.0), snake("D", &[], &[], 50.0)];
        assert!(player.add_clutch(twins).is_err());
        assert_eq!(player.organisms.len(), 1);

        let fresh = vec![snake("A", &[], &[], 50.0), snake("C", &[], &[], 50.0)];
        player.add_clutch(fresh).unwrap();
        assert_eq!(player.organisms.len(), 3);
    }

    #[test]
    fn test_level_up_threshold() {
        let mut player = PlayerAccount::new("keeper");
        player.reputation = 599.0;
        assert_eq!(
            player.check_level_up(),
            LevelCheck::Unchanged { required: Some(600) }
        );
        assert_eq!(player.reputation_to_next_level(), Some(1.0));

        player.reputation = 600.0;
        assert_eq!(player.check_level_up(), LevelCheck::LeveledUp(2));
        assert_eq!(player.level, 2);

        // Level 2 needs 750
        assert_eq!(
            player.check_level_up(),
            LevelCheck::Unchanged { required: Some(750) }
        );
    }

    #[test]
    fn test_one_level_per_check() {
        let mut player = PlayerAccount::new("keeper");
        player.reputation = 1_000_000.0;
        assert_eq!(player.check_level_up(), LevelCheck::LeveledUp(2));
        assert_eq!(player.level, 2);
    }

    #[test]
    fn test_level_cap() {
        let mut player = PlayerAccount::new("keeper");
        player.reputation = f64::MAX;
        for _ in 0..100 {
            player.check_level_up();
        }
        assert_eq!(player.level, 30);
        assert_eq!(player.check_level_up(), LevelCheck::Unchanged { required: None });
        assert_eq!(player.reputation_to_next_level(), None);
    }

    #[test]
    fn test_lookup_helpers() {
        let mut player = PlayerAccount::new("keeper");
        player.add_organism(snake("A", &["Pastel"], &[], 80.0)).unwrap();
        player.add_organism(snake("B", &[], &["Pied"], 120.0)).unwrap();
        assert_eq!(player.organism_named("B").map(|o| o.price), Some(120.0));
        assert!(player.organism_named("C").is_none());
        assert_eq!(player.collection_value(), 200.0);

        player.set_tournament_rank(Some(3));
        assert_eq!(player.tournament_rank, Some(3));
    }
}
