//! Hourly production, consumption and storage.
//!
//! Covers mines, the deuterium synthesizer, the solar and fusion plants,
//! solar satellites, and resource storage buildings.

use crate::models::{PlayerClass, ProductionBreakdown, ProductionInput, TechId};
use crate::round_half_up;

const GEOLOGIST_BONUS: f64 = 0.1;
const ALL_OFFICERS_BONUS: f64 = 0.02;
const COLLECTOR_BONUS: f64 = 0.25;
const TRADER_ALLIANCE_BONUS: f64 = 0.05;

/// Calculates per-source hourly production for one producer.
///
/// Mines and the synthesizer fill every bonus slot; the solar plant, fusion
/// reactor and solar satellites fill only [`ProductionBreakdown::base`].
/// Unknown identifiers produce an all-zero breakdown.
///
/// # Example
///
/// ```
/// use ogcalc::models::{ProductionInput, TechId};
/// use ogcalc::production::production_rate_split;
///
/// let rows = production_rate_split(&ProductionInput::new(TechId::METAL_MINE, 10));
/// assert_eq!(rows.natural, 30.0);
/// assert_eq!(rows.base, 778.0);
/// assert_eq!(rows.plasma, 0.0);
/// ```
pub fn production_rate_split(input: &ProductionInput) -> ProductionBreakdown {
    let level = f64::from(input.level);
    let speed = input.speed_factor;
    let mut rows = ProductionBreakdown::default();

    let (natural, base, plasma_per_level) = match input.tech {
        TechId::METAL_MINE => {
            let position = match input.position {
                6 | 10 => 1.17,
                7 | 9 => 1.23,
                8 => 1.35,
                _ => 1.0,
            };
            let base = 30.0
                * level
                * 1.1_f64.powf(level)
                * input.production_factor
                * input.power_factor
                * position;
            ((30.0 * speed * position).floor(), base, 0.01)
        }
        TechId::CRYSTAL_MINE => {
            let position = match input.position {
                1 => 1.4,
                2 => 1.296,
                3 => 1.2,
                _ => 1.0,
            };
            let base = 20.0
                * level
                * 1.1_f64.powf(level)
                * input.production_factor
                * input.power_factor
                * position;
            ((15.0 * speed * position).floor(), base, 0.0066)
        }
        TechId::DEUTERIUM_SYNTHESIZER => {
            let base = 10.0
                * level
                * 1.1_f64.powf(level)
                * (1.44 - 0.004 * input.max_temp)
                * input.production_factor
                * input.power_factor;
            (0.0, base, 0.0033)
        }
        TechId::SOLAR_PLANT => {
            rows.base = (20.0 * level * 1.1_f64.powf(level) * input.power_factor).floor();
            return rows;
        }
        TechId::FUSION_REACTOR => {
            let growth = 1.05 + f64::from(input.energy_tech_level) * 0.01;
            rows.base = (30.0 * level * growth.powf(level) * input.power_factor).floor();
            return rows;
        }
        TechId::SOLAR_SATELLITE => {
            let energy = level * ((input.max_temp + 140.0) / 6.0).floor() * input.power_factor;
            rows.base = energy.max(0.0).floor();
            return rows;
        }
        _ => return rows,
    };

    let geologist = if input.geologist { GEOLOGIST_BONUS } else { 0.0 };
    let all_officers = if input.all_officers {
        ALL_OFFICERS_BONUS
    } else {
        0.0
    };
    let class = if input.player_class == PlayerClass::Collector {
        COLLECTOR_BONUS
    } else {
        0.0
    };
    let alliance_class = if input.trader_alliance {
        TRADER_ALLIANCE_BONUS
    } else {
        0.0
    };
    let bonus = |factor: f64| round_half_up(base * factor * speed);

    rows.natural = natural;
    rows.base = (base * speed).floor();
    rows.plasma =
        round_half_up(base * plasma_per_level * f64::from(input.plasma_tech_level) * speed);
    rows.booster = bonus(input.booster.factor());
    rows.geologist = bonus(geologist);
    rows.engineer = 0.0;
    rows.all_officers = bonus(all_officers);
    rows.class = bonus(class);
    rows.alliance_class = bonus(alliance_class);
    rows
}

/// Calculates hourly production of a resource or energy producer.
///
/// Mines and the synthesizer return the sum of all breakdown slots. Energy
/// producers return only their base output: officer, class and alliance
/// bonuses apply to the planet's energy total and are left to the caller.
///
/// # Example
///
/// ```
/// use ogcalc::models::{ProductionInput, TechId};
/// use ogcalc::production::production_rate;
///
/// assert_eq!(production_rate(&ProductionInput::new(TechId::METAL_MINE, 10)), 808.0);
/// assert_eq!(production_rate(&ProductionInput::new(TechId(99), 10)), 0.0);
/// ```
pub fn production_rate(input: &ProductionInput) -> f64 {
    match input.tech {
        TechId::METAL_MINE | TechId::CRYSTAL_MINE | TechId::DEUTERIUM_SYNTHESIZER => {
            production_rate_split(input).total()
        }
        TechId::SOLAR_PLANT | TechId::FUSION_REACTOR | TechId::SOLAR_SATELLITE => {
            production_rate_split(input).base
        }
        _ => 0.0,
    }
}

/// [`production_rate`] for callers that do not track officers, class or
/// alliance: those inputs are replaced by "none", General and non-Trader.
pub fn production_rate_basic(input: &ProductionInput) -> f64 {
    production_rate(&ProductionInput {
        all_officers: false,
        player_class: PlayerClass::General,
        trader_alliance: false,
        ..*input
    })
}

/// Calculates hourly energy use of a mine or synthesizer, or deuterium use
/// of the fusion reactor.
///
/// Returns 0 below level 1 and for any other technology.
pub fn hourly_consumption(tech: TechId, level: i32, speed_factor: f64, power_factor: f64) -> f64 {
    if level < 1 {
        return 0.0;
    }
    let level = f64::from(level);
    let growth = 1.1_f64.powf(level);
    match tech {
        TechId::METAL_MINE | TechId::CRYSTAL_MINE => {
            (10.0 * level * growth * power_factor).floor()
        }
        // speed is floored in before the power throttle
        TechId::FUSION_REACTOR => {
            ((10.0 * level * growth * speed_factor).floor() * power_factor).floor()
        }
        TechId::DEUTERIUM_SYNTHESIZER => (20.0 * level * growth * power_factor).floor(),
        _ => 0.0,
    }
}

/// Calculates the capacity of a metal storage, crystal storage or deuterium
/// tank at `level`.
///
/// # Example
///
/// ```
/// use ogcalc::production::storage_capacity;
///
/// assert_eq!(storage_capacity(0), 10000.0);
/// assert_eq!(storage_capacity(1), 20000.0);
/// assert_eq!(storage_capacity(-1), 0.0);
/// ```
pub fn storage_capacity(level: i32) -> f64 {
    if level < 0 {
        return 0.0;
    }
    if level == 0 {
        return 10000.0;
    }
    5000.0 * (2.5 * (20.0 * f64::from(level) / 33.0).exp()).floor()
}
