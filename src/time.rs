//! Classic construction and research durations.

use tracing::debug;

use crate::cost::{build_cost, total_build_cost};
use crate::models::{BuildTimeModifiers, ClassicTechTable, ResearchRequirements, TechId};

/// Returned by [`build_time`] when the Research Lab is below the level a
/// research requires.
pub const LAB_TOO_LOW: f64 = -1.0;

/// Buildings whose build time ignores the early-level reduction.
fn has_level_reduction(tech: TechId) -> bool {
    !matches!(
        tech,
        TechId::NANITE_FACTORY | TechId::LUNAR_BASE | TechId::SENSOR_PHALANX | TechId::JUMP_GATE
    )
}

fn building_level_seconds(
    tech: TechId,
    level: i32,
    metal_crystal: f64,
    modifiers: &BuildTimeModifiers,
) -> f64 {
    let reduction = if has_level_reduction(tech) {
        (4.0 - f64::from(level) / 2.0).max(1.0)
    } else {
        1.0
    };
    3600.0 * metal_crystal
        / (2500.0
            * reduction
            * (f64::from(modifiers.robotics_factory) + 1.0)
            * 2.0_f64.powf(f64::from(modifiers.nanite_factory)))
}

/// Calculates the seconds needed to go from `level_from` to `level_to`.
///
/// - Buildings (`tech <= 100`) are timed level by level from the Robotics
///   and Nanite factories; upgrades floor each level, demolitions round each
///   level up. The Terraformer and the Lunar Base cannot be demolished (0).
/// - Researches (`100 < tech <= 200`) are timed from the whole cost, the
///   Research Lab and the Technocrat factor. If the lab is below the level
///   listed in `requirements`, [`LAB_TOO_LOW`] is returned.
/// - Ships and defense (`tech > 200`) are timed per unit from the Shipyard
///   and the Nanite factory; `level_to` is the quantity.
///
/// The universe speed divides the result when above 1, and the result is
/// never below 1 second. Unknown technologies, a negative `level_from`, and
/// an empty range for researches and units yield 0.
///
/// # Example
///
/// ```
/// use ogcalc::models::{BuildTimeModifiers, ClassicTechData, ClassicTechTable, ResearchRequirements, TechId};
/// use ogcalc::time::{build_time, LAB_TOO_LOW};
///
/// let mut table = ClassicTechTable::new();
/// table.insert(TechId(150), ClassicTechData::new(1000.0, 1000.0, 0.0, 2.0));
/// let mut requirements = ResearchRequirements::new();
/// requirements.insert(TechId(150), 5);
///
/// let time = build_time(TechId(150), 0, 1, &table, &BuildTimeModifiers::default(), &requirements);
/// assert_eq!(time, LAB_TOO_LOW);
/// ```
pub fn build_time(
    tech: TechId,
    level_from: i32,
    level_to: i32,
    table: &ClassicTechTable,
    modifiers: &BuildTimeModifiers,
    requirements: &ResearchRequirements,
) -> f64 {
    if level_from < 0 || !table.contains_key(&tech) {
        return 0.0;
    }
    if level_from >= level_to && tech.0 > 100 {
        return 0.0;
    }

    let mut seconds = 0.0;
    if tech.0 <= 100 {
        if level_from < level_to {
            for next in (level_from + 1)..=level_to {
                let cost = total_build_cost(tech, next - 1, next, table, 0);
                seconds +=
                    building_level_seconds(tech, next, cost.metal + cost.crystal, modifiers)
                        .floor();
            }
        } else {
            if tech == TechId::TERRAFORMER || tech == TechId::LUNAR_BASE {
                return 0.0;
            }
            for next in (level_to..level_from).rev() {
                let cost = total_build_cost(tech, next + 1, next, table, 0);
                seconds +=
                    building_level_seconds(tech, next, cost.metal + cost.crystal, modifiers)
                        .ceil();
            }
        }
    } else if tech.0 <= 200 {
        if let Some(&required) = requirements.get(&tech) {
            if modifiers.research_lab < required {
                debug!(
                    tech = tech.0,
                    required,
                    lab = modifiers.research_lab,
                    "research lab level too low"
                );
                return LAB_TOO_LOW;
            }
        }
        let cost = total_build_cost(tech, level_from, level_to, table, 0);
        seconds = 3600.0 * (cost.metal + cost.crystal)
            / (1000.0 * (1.0 + f64::from(modifiers.research_lab)));
        seconds *= modifiers.technocrat_factor;
    } else {
        let cost = build_cost(tech, 1, table);
        seconds = 3600.0 * (cost.metal + cost.crystal) / 5000.0 * 2.0
            / (f64::from(modifiers.shipyard) + 1.0)
            * 0.5_f64.powf(f64::from(modifiers.nanite_factory));
        if seconds == 0.0 {
            seconds = 1.0;
        }
    }

    if modifiers.universe_speed > 1.0 {
        seconds /= modifiers.universe_speed;
    }
    if seconds < 1.0 {
        seconds = 1.0;
    }
    if tech.0 > 200 {
        seconds = f64::from(level_to) * seconds.floor();
    }
    seconds
}
