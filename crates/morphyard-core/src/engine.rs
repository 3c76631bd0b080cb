//! Game session - main entry point for playing a breeding game

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;
use std::io::{Read, Write};

use morphyard_logic::market::ExpoOutcome;

use crate::components::*;
use crate::config::GameConfig;
use crate::persistence::{self, LoadOutcome, SaveError, SaveStore};
use crate::systems::*;

/// Everything one player's game needs, driven by a single seeded RNG
pub struct GameSession {
    /// Settings the session was created with
    pub config: GameConfig,
    /// The player's ledger
    pub player: PlayerAccount,
    /// Market trend shared by every sale
    pub market: MarketSystem,
    /// Clutch generation rules
    pub breeding: BreedingSystem,

    rng: StdRng,
}

/// Outcome of selling an animal at auction
#[derive(Debug, Clone, PartialEq)]
pub struct SaleReport {
    pub organism: Organism,
    pub price: f64,
    pub reputation_gained: f64,
    pub level: LevelCheck,
}

impl GameSession {
    /// Start a new game with a fresh account
    pub fn new(config: GameConfig) -> Self {
        let mut rng = seeded_rng(&config);
        let market = MarketSystem::open(config.market, &mut rng);
        let player = PlayerAccount::with_starting_money(config.username.clone(), config.starting_money);
        Self::assemble(config, player, market, rng)
    }

    /// Continue a saved game, or start fresh if the player has no save
    pub fn resume<S: SaveStore + ?Sized>(config: GameConfig, store: &S) -> Result<Self, SaveError> {
        let outcome = persistence::load_player_with(store, &config.username, || {
            PlayerAccount::with_starting_money(config.username.clone(), config.starting_money)
        })?;
        let mut session = Self::new(config);
        session.player = outcome.into_account();
        Ok(session)
    }

    fn assemble(config: GameConfig, player: PlayerAccount, market: MarketSystem, rng: StdRng) -> Self {
        Self {
            breeding: BreedingSystem::new(config.breeding),
            config,
            player,
            market,
            rng,
        }
    }

    /// Add an animal to the player's collection
    pub fn acquire(&mut self, organism: Organism) -> Result<(), LedgerError> {
        self.player.add_organism(organism)
    }

    /// Create an animal with a fresh appraisal and add it to the collection
    pub fn hatch(
        &mut self,
        name: &str,
        sex: Sex,
        morphs: Vec<String>,
        hets: Vec<String>,
    ) -> Result<Organism, LedgerError> {
        let organism = Organism::new(name, sex, morphs, hets, &mut self.rng);
        self.player.add_organism(organism.clone())?;
        Ok(organism)
    }

    /// Buy a shop item with the player's money
    pub fn buy_item(&mut self, item_name: &str, cost: f64) -> Result<(), LedgerError> {
        self.player.buy_item(item_name, cost)
    }

    /// Breed two owned animals; the clutch joins the player's collection.
    ///
    /// Hatchlings are numbered after the highest number the pair's offspring
    /// already use in the collection, so repeat pairings never reuse a name.
    pub fn breed(&mut self, female_name: &str, male_name: &str) -> Result<Vec<Organism>, SessionError> {
        let (female, male) = self.parents(female_name, male_name)?;
        let first_index = self.next_offspring_index(&offspring_prefix(&female, &male));
        let clutch = self
            .breeding
            .breed_numbered(&female, &male, first_index, &mut self.rng)?;
        self.player.add_clutch(clutch.clone())?;
        Ok(clutch)
    }

    /// Preview what a pairing of two owned animals would produce
    pub fn predict_clutch(
        &mut self,
        female_name: &str,
        male_name: &str,
    ) -> Result<ClutchPrediction, SessionError> {
        let (female, male) = self.parents(female_name, male_name)?;
        Ok(self.breeding.predict_clutch_outcome(&female, &male, &mut self.rng))
    }

    /// Predicted auction price for an owned animal at the current trend
    pub fn appraise(&mut self, name: &str) -> Result<f64, SessionError> {
        let organism = self.owned(name)?;
        Ok(self.market.predict_sale_price(&organism, &mut self.rng))
    }

    /// Sell an owned animal at auction, then check for a level-up
    pub fn sell_at_auction(&mut self, name: &str) -> Result<SaleReport, SessionError> {
        let organism = self.owned(name)?;
        let price = self.market.predict_sale_price(&organism, &mut self.rng);

        let reputation_before = self.player.reputation;
        let mut sold = self.player.sell_organism(&organism, price)?;
        sold.price = price;
        let reputation_gained = self.player.reputation - reputation_before;
        let level = self.player.check_level_up();

        Ok(SaleReport {
            organism: sold,
            price,
            reputation_gained,
            level,
        })
    }

    /// Let the market drift one step
    pub fn advance_market(&mut self) -> f64 {
        self.market.update_trend(&mut self.rng)
    }

    /// Hold an expo that may move the market
    pub fn hold_expo(&mut self) -> ExpoOutcome {
        self.market.run_expo(&mut self.rng)
    }

    /// Persist the player's progress
    pub fn save<S: SaveStore + ?Sized>(&self, store: &mut S) -> Result<(), SaveError> {
        persistence::save_player(store, &self.player)
    }

    /// Load the player's progress into this session, replacing the current
    /// account. Returns whether a save was found.
    pub fn load<S: SaveStore + ?Sized>(&mut self, store: &S) -> Result<bool, SaveError> {
        let outcome = persistence::load_player(store, &self.config.username)?;
        let restored = !outcome.is_fresh();
        if let LoadOutcome::Restored(account) = outcome {
            self.player = account;
        }
        Ok(restored)
    }

    /// Save the market and player to a writer
    pub fn save_snapshot<W: Write>(&self, writer: W) -> Result<(), SaveError> {
        persistence::save_session(writer, &self.market, &self.player)
    }

    /// Rebuild a session from a snapshot. The RNG is seeded from `config`.
    pub fn load_snapshot<R: Read>(config: GameConfig, reader: R) -> Result<Self, SaveError> {
        let (market, player) = persistence::load_session(reader)?;
        let rng = seeded_rng(&config);
        Ok(Self::assemble(config, player, market, rng))
    }

    pub fn player(&self) -> &PlayerAccount {
        &self.player
    }

    pub fn market(&self) -> &MarketSystem {
        &self.market
    }

    fn owned(&self, name: &str) -> Result<Organism, SessionError> {
        self.player
            .organism_named(name)
            .cloned()
            .ok_or_else(|| LedgerError::OrganismNotFound(name.to_string()).into())
    }

    fn next_offspring_index(&self, prefix: &str) -> usize {
        self.player
            .organisms
            .iter()
            .filter_map(|o| o.name.strip_prefix(prefix)?.parse::<usize>().ok())
            .max()
            .map_or(1, |highest| highest.saturating_add(1))
    }

    fn parents(&self, female_name: &str, male_name: &str) -> Result<(Organism, Organism), BreedError> {
        let find = |name: &str| {
            self.player
                .organism_named(name)
                .cloned()
                .ok_or_else(|| BreedError::ParentNotFound(name.to_string()))
        };
        Ok((find(female_name)?, find(male_name)?))
    }
}

fn seeded_rng(config: &GameConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Errors from session actions
#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    Breed(BreedError),
    Ledger(LedgerError),
}

impl From<BreedError> for SessionError {
    fn from(e: BreedError) -> Self {
        SessionError::Breed(e)
    }
}

impl From<LedgerError> for SessionError {
    fn from(e: LedgerError) -> Self {
        SessionError::Ledger(e)
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Breed(e) => write!(f, "{}", e),
            SessionError::Ledger(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Breed(e) => Some(e),
            SessionError::Ledger(e) => Some(e),
        }
    }
}
