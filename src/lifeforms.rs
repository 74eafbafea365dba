//! Lifeforms costs, durations and energy.
//!
//! Lifeforms identifiers are namespaced per species (`11101`, `12201`, ...),
//! so buildings and researches are told apart by `id % 1000`. Each resource
//! has its own growth base and costs also grow linearly with the level.

use crate::models::{LifeformTechTable, Resources, TechId};

/// Calculates the cost of tearing a Lifeforms building down from
/// `level + 1` to `level`, reduced by 4% per Ion technology level.
pub fn deconstruct_cost_lf(
    tech: TechId,
    level: i32,
    table: &LifeformTechTable,
    ion_tech_level: i32,
) -> Resources {
    if level < 0 || tech.lifeform_local() > 100 {
        return Resources::ZERO;
    }
    let Some(data) = table.get(&tech) else {
        return Resources::ZERO;
    };
    let level_f = f64::from(level);
    let discount = 1.0 - 0.04 * f64::from(ion_tech_level);
    let mut cost = [0.0; 3];
    for (i, slot) in cost.iter_mut().enumerate() {
        let raw = data.cost[i] * level_f * data.cost_growth[i].powf(level_f - 1.0);
        *slot = (raw.floor() * discount).floor();
    }
    Resources::from(cost)
}

/// Calculates the cost of one Lifeforms level after a fractional cost
/// reduction, which is capped at 0.99.
///
/// # Example
///
/// ```
/// use ogcalc::lifeforms::build_cost_lf;
/// use ogcalc::models::{LifeformTechData, LifeformTechTable, Resources, TechId};
///
/// let mut table = LifeformTechTable::new();
/// table.insert(
///     TechId(11101),
///     LifeformTechData::from([7.0, 2.0, 0.0, 0.0, 40.0, 1.2, 1.2, 1.2, 1.0, 1.21]),
/// );
///
/// assert_eq!(build_cost_lf(TechId(11101), 1, &table, 0.0), Resources::new(7.0, 2.0, 0.0));
/// assert_eq!(build_cost_lf(TechId(11101), 2, &table, 0.5), Resources::new(8.0, 2.0, 0.0));
/// ```
pub fn build_cost_lf(
    tech: TechId,
    level: i32,
    table: &LifeformTechTable,
    cost_reduction: f64,
) -> Resources {
    if level < 1 {
        return Resources::ZERO;
    }
    let Some(data) = table.get(&tech) else {
        return Resources::ZERO;
    };
    let level_f = f64::from(level);
    let keep = 1.0 - cost_reduction.min(0.99);
    let mut cost = [0.0; 3];
    for (i, slot) in cost.iter_mut().enumerate() {
        let raw = data.cost[i] * level_f * data.cost_growth[i].powf(level_f - 1.0);
        *slot = (keep * raw.floor()).floor();
    }
    Resources::from(cost)
}

/// Calculates the total Lifeforms cost of going from `level_from` to
/// `level_to`.
///
/// Buildings (`id % 1000 < 100`) take `building_cost_reduction` as a
/// fraction (Megalith); researches take `research_cost_reduction` in
/// percent. Demolition never goes below level 0 and the step down to 0 is
/// priced like the step down to 1.
pub fn total_build_cost_lf(
    tech: TechId,
    level_from: i32,
    level_to: i32,
    table: &LifeformTechTable,
    ion_tech_level: i32,
    research_cost_reduction: f64,
    building_cost_reduction: f64,
) -> Resources {
    let reduction = if tech.lifeform_local() < 100 {
        building_cost_reduction
    } else {
        0.01 * research_cost_reduction
    };
    let mut total = Resources::ZERO;
    if level_from > level_to {
        for level in (level_to.max(0)..level_from).rev() {
            total += deconstruct_cost_lf(tech, level.max(1), table, ion_tech_level);
        }
    } else {
        for level in (level_from + 1)..=level_to {
            total += build_cost_lf(tech, level, table, reduction);
        }
    }
    total
}

/// Calculates the seconds needed to go from `level_from` to `level_to` for
/// a Lifeforms building or research.
///
/// Buildings sum per-level durations shortened by the Robotics and Nanite
/// factories, then apply `megalith_reduction` (a fraction) and the universe
/// speed once. Researches apply `research_time_reduction` (percent) and the
/// universe speed to each level; they cannot be downgraded.
///
/// The result is at least 1 second, or 0 for an unknown technology, a
/// negative `level_from`, or an empty research range.
#[allow(clippy::too_many_arguments)]
pub fn build_time_lf(
    tech: TechId,
    level_from: i32,
    level_to: i32,
    table: &LifeformTechTable,
    robotics_factory: i32,
    nanite_factory: i32,
    universe_speed: f64,
    research_time_reduction: f64,
    megalith_reduction: f64,
) -> f64 {
    if level_from < 0 {
        return 0.0;
    }
    let Some(data) = table.get(&tech) else {
        return 0.0;
    };
    let is_building = tech.lifeform_local() <= 100;
    if level_from >= level_to && !is_building {
        return 0.0;
    }

    let level_seconds =
        |level: f64| level * data.duration * data.duration_growth.powf(level);
    let mut seconds = 0.0;
    if is_building {
        let factories = (f64::from(robotics_factory) + 1.0)
            * 2.0_f64.powf(f64::from(nanite_factory));
        if level_from < level_to {
            for next in (level_from + 1)..=level_to {
                seconds += (level_seconds(f64::from(next)) / factories).floor();
            }
        } else {
            for next in (level_to.max(0)..level_from).rev() {
                // level 0 is timed like level 1
                seconds += (level_seconds(f64::from(next.max(1))) / factories).floor();
            }
        }
        seconds = (seconds * (1.0 - megalith_reduction)).floor();
        seconds = (seconds / universe_speed).floor();
    } else {
        for next in (level_from + 1)..=level_to {
            let duration = level_seconds(f64::from(next)).floor();
            let duration = (duration * (1.0 - 0.01 * research_time_reduction)).floor();
            seconds += (duration / universe_speed).floor();
        }
    }

    if seconds < 1.0 {
        seconds = 1.0;
    }
    seconds
}

/// Calculates the energy needed for `level` of a Lifeforms technology,
/// reduced by 4% per Ion technology level.
pub fn build_energy_cost_lf(
    tech: TechId,
    level: i32,
    table: &LifeformTechTable,
    ion_tech_level: i32,
) -> f64 {
    if level < 1 {
        return 0.0;
    }
    let Some(data) = table.get(&tech) else {
        return 0.0;
    };
    let level_f = f64::from(level);
    let raw = (data.energy * level_f * data.energy_growth.powf(level_f)).floor();
    (raw * (1.0 - 0.04 * f64::from(ion_tech_level))).floor()
}
