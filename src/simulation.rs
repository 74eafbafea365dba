//! Deterministic factory-economy simulation.
//!
//! A small economy with steel, crystal and electricity factories. Steel and
//! crystal factories produce continuously but draw electricity; a purchase
//! is only allowed while production covers the new draw. Factory prices
//! double with every factory of the same kind.
//!
//! [`FactoryEpisode`] wraps a game in fixed-length episodes whose steps wait
//! until a chosen factory is affordable, and [`play_greedy`] runs a baseline
//! strategy that always goes for the soonest affordable factory.

use tracing::debug;

use crate::models::{Action, EpisodeSummary, FactoryKind, StepOutcome};

const STARTING_STOCK: f64 = 1000.0;
const STEEL_PER_FACTORY: f64 = 5.0;
const CRYSTAL_PER_FACTORY: f64 = 3.0;
const ELECTRICITY_PER_FACTORY: f64 = 20.0;

/// Upper bound on steps in [`play_greedy`]; float rounding can leave a
/// purchase a hair short of affordable and retrying forever.
const MAX_STEPS: usize = 100_000;

/// State of one factory-economy game.
#[derive(Debug, Clone, PartialEq)]
pub struct FactoryGame {
    pub steel: f64,
    pub crystals: f64,
    pub steel_factories: u32,
    pub crystal_factories: u32,
    pub electricity_factories: u32,
    /// Simulated seconds
    pub time_elapsed: f64,
}

impl Default for FactoryGame {
    fn default() -> Self {
        FactoryGame {
            steel: STARTING_STOCK,
            crystals: STARTING_STOCK,
            steel_factories: 1,
            crystal_factories: 1,
            electricity_factories: 1,
            time_elapsed: 0.0,
        }
    }
}

impl FactoryGame {
    /// A game with 1000 steel, 1000 crystals and one factory of each kind.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn factories(&self, kind: FactoryKind) -> u32 {
        match kind {
            FactoryKind::Steel => self.steel_factories,
            FactoryKind::Crystal => self.crystal_factories,
            FactoryKind::Electricity => self.electricity_factories,
        }
    }

    /// Steel produced per second.
    pub fn steel_production(&self) -> f64 {
        f64::from(self.steel_factories) * STEEL_PER_FACTORY
    }

    /// Crystals produced per second.
    pub fn crystal_production(&self) -> f64 {
        f64::from(self.crystal_factories) * CRYSTAL_PER_FACTORY
    }

    pub fn electricity_production(&self) -> f64 {
        f64::from(self.electricity_factories) * ELECTRICITY_PER_FACTORY
    }

    pub fn electricity_consumption(&self) -> f64 {
        f64::from(self.steel_factories) * FactoryKind::Steel.electricity_draw()
            + f64::from(self.crystal_factories) * FactoryKind::Crystal.electricity_draw()
    }

    /// Steel and crystal price of the next factory of `kind`.
    ///
    /// # Example
    ///
    /// ```
    /// use ogcalc::models::FactoryKind;
    /// use ogcalc::simulation::FactoryGame;
    ///
    /// let game = FactoryGame::new();
    /// assert_eq!(game.cost(FactoryKind::Steel), (200.0, 100.0));
    /// assert_eq!(game.cost(FactoryKind::Electricity), (400.0, 200.0));
    /// ```
    pub fn cost(&self, kind: FactoryKind) -> (f64, f64) {
        let (steel, crystals) = kind.base_cost();
        let doubling = 2.0_f64.powf(f64::from(self.factories(kind)));
        (steel * doubling, crystals * doubling)
    }

    /// Whether electricity production would cover one more factory of
    /// `kind`. Electricity factories are always allowed.
    pub fn has_power_for(&self, kind: FactoryKind) -> bool {
        kind == FactoryKind::Electricity
            || self.electricity_consumption() + kind.electricity_draw()
                <= self.electricity_production()
    }

    pub fn can_buy(&self, kind: FactoryKind) -> bool {
        let (steel, crystals) = self.cost(kind);
        if self.steel < steel || self.crystals < crystals {
            return false;
        }
        self.has_power_for(kind)
    }

    /// Buys the next factory of `kind`, returning `false` if it is not
    /// affordable or not powered.
    pub fn buy(&mut self, kind: FactoryKind) -> bool {
        if !self.can_buy(kind) {
            return false;
        }
        let (steel, crystals) = self.cost(kind);
        self.steel -= steel;
        self.crystals -= crystals;
        match kind {
            FactoryKind::Steel => self.steel_factories += 1,
            FactoryKind::Crystal => self.crystal_factories += 1,
            FactoryKind::Electricity => self.electricity_factories += 1,
        }
        true
    }

    /// Advances the clock, accumulating production.
    pub fn simulate_time(&mut self, seconds: f64) {
        self.steel += self.steel_production() * seconds;
        self.crystals += self.crystal_production() * seconds;
        self.time_elapsed += seconds;
    }

    /// Seconds until the next factory of `kind` is affordable, ignoring
    /// electricity. Infinite when a missing resource is not produced.
    pub fn time_to_afford(&self, kind: FactoryKind) -> f64 {
        let (steel, crystals) = self.cost(kind);
        let missing_steel = (steel - self.steel).max(0.0);
        let missing_crystals = (crystals - self.crystals).max(0.0);

        let wait = |missing: f64, rate: f64| {
            if rate > 0.0 {
                missing / rate
            } else {
                f64::INFINITY
            }
        };
        wait(missing_steel, self.steel_production())
            .max(wait(missing_crystals, self.crystal_production()))
    }

    /// Stock on hand plus everything paid for the factories owned,
    /// including the starting ones.
    ///
    /// # Example
    ///
    /// ```
    /// use ogcalc::simulation::FactoryGame;
    ///
    /// assert_eq!(FactoryGame::new().net_worth(), 2675.0);
    /// ```
    pub fn net_worth(&self) -> f64 {
        let mut factory_value = 0.0;
        for kind in FactoryKind::ALL {
            let (steel, crystals) = kind.base_cost();
            for owned in 0..self.factories(kind) {
                let doubling = 2.0_f64.powf(f64::from(owned));
                factory_value += steel * doubling + crystals * doubling;
            }
        }
        self.steel + self.crystals + factory_value
    }

    /// `[steel, crystals, steel factories, crystal factories,
    /// electricity factories, elapsed seconds]`
    pub fn state(&self) -> [f64; 6] {
        [
            self.steel,
            self.crystals,
            f64::from(self.steel_factories),
            f64::from(self.crystal_factories),
            f64::from(self.electricity_factories),
            self.time_elapsed,
        ]
    }
}

/// A game bounded by `max_time` seconds, rewarded by net worth growth.
#[derive(Debug, Clone)]
pub struct FactoryEpisode {
    game: FactoryGame,
    max_time: f64,
    last_net_worth: f64,
}

impl FactoryEpisode {
    pub fn new(max_time: f64) -> Self {
        FactoryEpisode {
            game: FactoryGame::new(),
            max_time,
            last_net_worth: 0.0,
        }
    }

    pub fn game(&self) -> &FactoryGame {
        &self.game
    }

    pub fn remaining_time(&self) -> f64 {
        self.max_time - self.game.time_elapsed
    }

    /// Restarts the episode. The first step's reward is the full net worth.
    pub fn reset(&mut self) -> [f64; 6] {
        self.last_net_worth = 0.0;
        self.game.reset();
        self.game.state()
    }

    /// Applies one action.
    ///
    /// [`Action::Build`] waits until the factory is affordable, capped at the
    /// remaining time, then tries to buy it; the purchase can still fail for
    /// lack of electricity or time. [`Action::Wait`] runs out the clock.
    pub fn step(&mut self, action: Action) -> StepOutcome {
        let bought = match action {
            Action::Wait => {
                let remaining = self.remaining_time();
                self.game.simulate_time(remaining);
                None
            }
            Action::Build(kind) => {
                let wait = self.game.time_to_afford(kind).min(self.remaining_time());
                if wait > 0.0 {
                    self.game.simulate_time(wait);
                }
                Some(self.game.buy(kind))
            }
        };

        let net_worth = self.game.net_worth();
        let reward = net_worth - self.last_net_worth;
        self.last_net_worth = net_worth;

        StepOutcome {
            state: self.game.state(),
            reward,
            done: self.game.time_elapsed >= self.max_time,
            bought,
        }
    }
}

/// Picks the powered factory that becomes affordable soonest, or waits if
/// none can be afforded within `remaining` seconds. Ties go to steel, then
/// crystal.
pub fn greedy_action(game: &FactoryGame, remaining: f64) -> Action {
    let mut best: Option<(FactoryKind, f64)> = None;
    for kind in FactoryKind::ALL {
        if !game.has_power_for(kind) {
            continue;
        }
        let wait = game.time_to_afford(kind);
        if best.map_or(true, |(_, best_wait)| wait < best_wait) {
            best = Some((kind, wait));
        }
    }
    match best {
        Some((kind, wait)) if wait <= remaining => Action::Build(kind),
        _ => Action::Wait,
    }
}

/// Plays one episode of `max_time` seconds with [`greedy_action`].
///
/// # Example
///
/// ```
/// use ogcalc::simulation::play_greedy;
///
/// let summary = play_greedy(300.0);
/// assert_eq!(summary.time_elapsed, 300.0);
/// assert!(summary.net_worth > 2675.0);
/// ```
pub fn play_greedy(max_time: f64) -> EpisodeSummary {
    let mut episode = FactoryEpisode::new(max_time);
    let mut steps = 0;
    let mut purchases = 0;
    let mut total_reward = 0.0;

    while steps < MAX_STEPS {
        let action = greedy_action(episode.game(), episode.remaining_time());
        let outcome = episode.step(action);
        steps += 1;
        total_reward += outcome.reward;
        if outcome.bought == Some(true) {
            purchases += 1;
        }
        debug!(?action, reward = outcome.reward, bought = ?outcome.bought, "simulation step");
        if outcome.done {
            break;
        }
    }

    let game = episode.game();
    EpisodeSummary {
        steps,
        purchases,
        total_reward,
        net_worth: game.net_worth(),
        steel_factories: game.steel_factories,
        crystal_factories: game.crystal_factories,
        electricity_factories: game.electricity_factories,
        time_elapsed: game.time_elapsed,
    }
}
