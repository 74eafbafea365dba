//! Data models and structures for ogcalc.
//!
//! This module contains the typed inputs and outputs shared by every formula
//! module: technology identifiers, per-technology data rows, resource
//! triples, and the parameter bundles for production and build time.

use std::collections::HashMap;
use std::fmt;
use std::ops::{Add, AddAssign, Mul};

use serde::{Deserialize, Serialize};

/// Identifies a building, research, ship or defense unit.
///
/// The numeric range encodes the category, see [`FormulaModel::kind_of`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TechId(pub u32);

impl TechId {
    pub const METAL_MINE: TechId = TechId(1);
    pub const CRYSTAL_MINE: TechId = TechId(2);
    pub const DEUTERIUM_SYNTHESIZER: TechId = TechId(3);
    pub const SOLAR_PLANT: TechId = TechId(4);
    pub const FUSION_REACTOR: TechId = TechId(12);
    pub const NANITE_FACTORY: TechId = TechId(15);
    pub const TERRAFORMER: TechId = TechId(33);
    pub const SPACE_DOCK: TechId = TechId(36);
    pub const LUNAR_BASE: TechId = TechId(41);
    pub const SENSOR_PHALANX: TechId = TechId(42);
    pub const JUMP_GATE: TechId = TechId(43);
    pub const ASTROPHYSICS: TechId = TechId(124);
    pub const GRAVITON: TechId = TechId(199);
    pub const SOLAR_SATELLITE: TechId = TechId(212);

    /// The identifier with its Lifeforms species namespace stripped.
    pub fn lifeform_local(self) -> u32 {
        self.0 % 1000
    }
}

impl fmt::Display for TechId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for TechId {
    fn from(id: u32) -> Self {
        TechId(id)
    }
}

/// Broad category of a technology, derived from its identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TechKind {
    Building,
    Research,
    Unit,
}

/// Which cost/time formula family a technology belongs to.
///
/// The two families read different data rows ([`ClassicTechData`] and
/// [`LifeformTechData`]) and have separate functions in [`crate::cost`],
/// [`crate::time`] and [`crate::lifeforms`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormulaModel {
    #[default]
    Classic,
    Lifeforms,
}

impl FormulaModel {
    /// Classifies an identifier under this model.
    ///
    /// Classic identifiers are classified by raw value, Lifeforms identifiers
    /// by their value modulo 1000.
    ///
    /// # Example
    ///
    /// ```
    /// use ogcalc::models::{FormulaModel, TechId, TechKind};
    ///
    /// assert_eq!(FormulaModel::Classic.kind_of(TechId(15)), TechKind::Building);
    /// assert_eq!(FormulaModel::Classic.kind_of(TechId(1101)), TechKind::Unit);
    /// assert_eq!(FormulaModel::Lifeforms.kind_of(TechId(11101)), TechKind::Research);
    /// ```
    pub fn kind_of(self, tech: TechId) -> TechKind {
        let id = match self {
            FormulaModel::Classic => tech.0,
            FormulaModel::Lifeforms => tech.lifeform_local(),
        };
        if id <= 100 {
            TechKind::Building
        } else if id <= 200 {
            TechKind::Research
        } else {
            TechKind::Unit
        }
    }
}

/// An ordered `[metal, crystal, deuterium]` amount.
///
/// Values are kept as `f64` so that flooring and rounding happen at exactly
/// the same points as the game's double-precision formulas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Resources {
    pub metal: f64,
    pub crystal: f64,
    pub deuterium: f64,
}

impl Resources {
    pub const ZERO: Resources = Resources {
        metal: 0.0,
        crystal: 0.0,
        deuterium: 0.0,
    };

    pub fn new(metal: f64, crystal: f64, deuterium: f64) -> Self {
        Resources {
            metal,
            crystal,
            deuterium,
        }
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.metal, self.crystal, self.deuterium]
    }

    /// Sum of all three resources.
    pub fn total(&self) -> f64 {
        self.metal + self.crystal + self.deuterium
    }

    pub fn is_zero(&self) -> bool {
        self.metal == 0.0 && self.crystal == 0.0 && self.deuterium == 0.0
    }
}

impl From<[f64; 3]> for Resources {
    fn from(values: [f64; 3]) -> Self {
        Resources::new(values[0], values[1], values[2])
    }
}

impl Add for Resources {
    type Output = Resources;

    fn add(self, rhs: Resources) -> Resources {
        Resources::new(
            self.metal + rhs.metal,
            self.crystal + rhs.crystal,
            self.deuterium + rhs.deuterium,
        )
    }
}

impl AddAssign for Resources {
    fn add_assign(&mut self, rhs: Resources) {
        self.metal += rhs.metal;
        self.crystal += rhs.crystal;
        self.deuterium += rhs.deuterium;
    }
}

impl Mul<f64> for Resources {
    type Output = Resources;

    fn mul(self, rhs: f64) -> Resources {
        Resources::new(self.metal * rhs, self.crystal * rhs, self.deuterium * rhs)
    }
}

/// Classic cost data for one technology: `[metal, crystal, deuterium, growth]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassicTechData {
    /// Level 1 cost per resource
    pub cost: [f64; 3],
    /// Geometric cost multiplier per level
    pub growth: f64,
}

impl ClassicTechData {
    pub fn new(metal: f64, crystal: f64, deuterium: f64, growth: f64) -> Self {
        ClassicTechData {
            cost: [metal, crystal, deuterium],
            growth,
        }
    }
}

/// Lifeforms cost and time data for one technology.
///
/// Slot order matches the published 10-value rows:
/// `[metal, crystal, deuterium, energy, duration, metal_growth,
/// crystal_growth, deuterium_growth, energy_growth, duration_growth]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LifeformTechData {
    /// Base cost per resource
    pub cost: [f64; 3],
    /// Base energy cost
    pub energy: f64,
    /// Base duration in seconds
    pub duration: f64,
    /// Per-resource cost growth exponent base
    pub cost_growth: [f64; 3],
    /// Energy cost growth
    pub energy_growth: f64,
    /// Duration growth
    pub duration_growth: f64,
}

impl From<[f64; 10]> for LifeformTechData {
    fn from(v: [f64; 10]) -> Self {
        LifeformTechData {
            cost: [v[0], v[1], v[2]],
            energy: v[3],
            duration: v[4],
            cost_growth: [v[5], v[6], v[7]],
            energy_growth: v[8],
            duration_growth: v[9],
        }
    }
}

pub type ClassicTechTable = HashMap<TechId, ClassicTechData>;
pub type LifeformTechTable = HashMap<TechId, LifeformTechData>;

/// Minimum Research Lab level per research identifier.
pub type ResearchRequirements = HashMap<TechId, i32>;

/// Player class. Only the Collector grants a mine production bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerClass {
    Collector,
    #[default]
    General,
    Explorer,
}

impl PlayerClass {
    /// Maps the game's numeric class code (0 Collector, 1 General, 2 Explorer).
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(PlayerClass::Collector),
            1 => Some(PlayerClass::General),
            2 => Some(PlayerClass::Explorer),
            _ => None,
        }
    }
}

/// Resource booster item tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoosterTier {
    #[default]
    None,
    Bronze,
    Silver,
    Gold,
}

impl BoosterTier {
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            0 => Some(BoosterTier::None),
            1 => Some(BoosterTier::Bronze),
            2 => Some(BoosterTier::Silver),
            3 => Some(BoosterTier::Gold),
            _ => None,
        }
    }

    /// Production bonus fraction: 10% per tier.
    pub fn factor(self) -> f64 {
        let tier = match self {
            BoosterTier::None => 0.0,
            BoosterTier::Bronze => 1.0,
            BoosterTier::Silver => 2.0,
            BoosterTier::Gold => 3.0,
        };
        tier * 0.1
    }
}

/// Everything the production formulas read for one producer.
///
/// # Example
///
/// ```
/// use ogcalc::models::{ProductionInput, TechId};
///
/// let input = ProductionInput {
///     geologist: true,
///     ..ProductionInput::new(TechId::METAL_MINE, 20)
/// };
/// assert_eq!(input.speed_factor, 1.0);
/// assert!(input.geologist);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductionInput {
    /// Mine, synthesizer, power plant or solar satellite
    pub tech: TechId,
    /// Building level, or number of satellites
    pub level: i32,
    pub energy_tech_level: i32,
    pub plasma_tech_level: i32,
    /// Maximum planet temperature
    pub max_temp: f64,
    /// Planet position in its solar system (1..15)
    pub position: u32,
    /// Universe economy speed
    pub speed_factor: f64,
    pub geologist: bool,
    /// Accepted for completeness; the engineer bonus is applied to the
    /// energy total by the caller, never to a row here.
    pub engineer: bool,
    /// System derating (0..1) when energy is insufficient
    pub production_factor: f64,
    /// User-set throttle (0..1)
    pub power_factor: f64,
    pub booster: BoosterTier,
    /// All five officers hired
    pub all_officers: bool,
    pub player_class: PlayerClass,
    /// Member of a Trader-class alliance
    pub trader_alliance: bool,
}

impl ProductionInput {
    /// A producer with no bonuses, full power and speed 1.
    pub fn new(tech: TechId, level: i32) -> Self {
        ProductionInput {
            tech,
            level,
            energy_tech_level: 0,
            plasma_tech_level: 0,
            max_temp: 0.0,
            position: 0,
            speed_factor: 1.0,
            geologist: false,
            engineer: false,
            production_factor: 1.0,
            power_factor: 1.0,
            booster: BoosterTier::None,
            all_officers: false,
            player_class: PlayerClass::General,
            trader_alliance: false,
        }
    }
}

impl Default for ProductionInput {
    fn default() -> Self {
        ProductionInput::new(TechId(0), 0)
    }
}

/// Per-source production for one producer, in units (or energy) per hour.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ProductionBreakdown {
    /// Natural planet production (metal and crystal only)
    pub natural: f64,
    /// The producer's own output
    pub base: f64,
    pub plasma: f64,
    pub booster: f64,
    pub geologist: f64,
    /// Always 0, the engineer bonus belongs to the energy total
    pub engineer: f64,
    pub all_officers: f64,
    pub class: f64,
    pub alliance_class: f64,
}

impl ProductionBreakdown {
    /// The nine slots in their canonical order.
    pub fn slots(&self) -> [f64; 9] {
        [
            self.natural,
            self.base,
            self.plasma,
            self.booster,
            self.geologist,
            self.engineer,
            self.all_officers,
            self.class,
            self.alliance_class,
        ]
    }

    pub fn total(&self) -> f64 {
        self.slots().iter().sum()
    }
}

/// Facility levels and multipliers that shorten construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildTimeModifiers {
    pub robotics_factory: i32,
    pub nanite_factory: i32,
    pub research_lab: i32,
    /// Research time multiplier, 1 when the Technocrat is absent
    pub technocrat_factor: f64,
    pub shipyard: i32,
    pub universe_speed: f64,
}

impl Default for BuildTimeModifiers {
    fn default() -> Self {
        BuildTimeModifiers {
            robotics_factory: 0,
            nanite_factory: 0,
            research_lab: 0,
            technocrat_factor: 1.0,
            shipyard: 0,
            universe_speed: 1.0,
        }
    }
}

/// Result of [`crate::cost::build_energy_cost`].
///
/// An identifier missing from the tech table yields a zero resource triple
/// instead of a scalar; callers relying on that shape can match on it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EnergyRequirement {
    Energy(f64),
    UnknownTech(Resources),
}

impl EnergyRequirement {
    /// The energy amount, 0 for an unknown technology.
    pub fn amount(&self) -> f64 {
        match self {
            EnergyRequirement::Energy(energy) => *energy,
            EnergyRequirement::UnknownTech(_) => 0.0,
        }
    }
}

// ============================================================================
// CSV Row Structures
// ============================================================================

/// CSV row structure for classic tech tables.
#[derive(Debug, Deserialize)]
pub struct ClassicTechRow {
    pub id: u32,
    pub name: String,
    pub metal: f64,
    pub crystal: f64,
    pub deuterium: f64,
    /// Cost growth per level
    pub growth: f64,
    /// Research Lab level required (researches only)
    pub lab_level: Option<i32>,
}

/// CSV row structure for Lifeforms tech tables.
#[derive(Debug, Deserialize)]
pub struct LifeformTechRow {
    pub id: u32,
    pub name: String,
    pub metal: f64,
    pub crystal: f64,
    pub deuterium: f64,
    pub energy: f64,
    /// Base duration in seconds
    pub duration: f64,
    pub metal_growth: f64,
    pub crystal_growth: f64,
    pub deuterium_growth: f64,
    pub energy_growth: f64,
    pub duration_growth: f64,
}

impl LifeformTechRow {
    pub fn to_data(&self) -> LifeformTechData {
        LifeformTechData {
            cost: [self.metal, self.crystal, self.deuterium],
            energy: self.energy,
            duration: self.duration,
            cost_growth: [self.metal_growth, self.crystal_growth, self.deuterium_growth],
            energy_growth: self.energy_growth,
            duration_growth: self.duration_growth,
        }
    }
}

// ============================================================================
// Factory Simulation
// ============================================================================

/// Factory types in the factory-economy simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactoryKind {
    Steel,
    Crystal,
    Electricity,
}

impl FactoryKind {
    pub const ALL: [FactoryKind; 3] = [
        FactoryKind::Steel,
        FactoryKind::Crystal,
        FactoryKind::Electricity,
    ];

    /// Steel and crystal price of a first factory of this kind; each one
    /// owned doubles it.
    pub fn base_cost(self) -> (f64, f64) {
        match self {
            FactoryKind::Steel => (100.0, 50.0),
            FactoryKind::Crystal => (150.0, 75.0),
            FactoryKind::Electricity => (200.0, 100.0),
        }
    }

    /// Electricity drawn by one factory of this kind.
    pub fn electricity_draw(self) -> f64 {
        match self {
            FactoryKind::Steel => 10.0,
            FactoryKind::Crystal => 15.0,
            FactoryKind::Electricity => 0.0,
        }
    }
}

/// One decision in a simulated episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Wait until the factory is affordable (or time runs out), then buy it
    Build(FactoryKind),
    /// Let the remaining time run out
    Wait,
}

/// Result of one episode step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StepOutcome {
    /// `[steel, crystals, steel factories, crystal factories,
    /// electricity factories, elapsed seconds]`
    pub state: [f64; 6],
    /// Net worth gained since the previous step
    pub reward: f64,
    pub done: bool,
    /// Whether the purchase went through; `None` for [`Action::Wait`]
    pub bought: Option<bool>,
}

/// Summary of a finished episode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpisodeSummary {
    pub steps: usize,
    pub purchases: usize,
    pub total_reward: f64,
    pub net_worth: f64,
    pub steel_factories: u32,
    pub crystal_factories: u32,
    pub electricity_factories: u32,
    pub time_elapsed: f64,
}
