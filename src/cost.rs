//! Classic construction and research costs.
//!
//! All functions read a [`ClassicTechTable`]: per technology, the level 1
//! cost and a geometric growth coefficient.

use crate::models::{ClassicTechTable, EnergyRequirement, Resources, TechId};
use crate::round_half_up;

/// Calculates the energy needed to build `level` of the Terraformer, the
/// Space Dock, or to research Graviton technology.
///
/// Every other known technology needs no energy. A technology missing from
/// the table yields [`EnergyRequirement::UnknownTech`].
pub fn build_energy_cost(tech: TechId, level: i32, table: &ClassicTechTable) -> EnergyRequirement {
    if level < 1 {
        return EnergyRequirement::Energy(0.0);
    }
    let Some(data) = table.get(&tech) else {
        return EnergyRequirement::UnknownTech(Resources::ZERO);
    };
    let exponent = f64::from(level - 1);
    let energy = match tech {
        TechId::TERRAFORMER => 1000.0 * data.growth.powf(exponent),
        TechId::SPACE_DOCK => (50.0 * (data.growth / 2.0).powf(exponent)).floor(),
        TechId::GRAVITON => 300000.0 * data.growth.powf(exponent),
        _ => 0.0,
    };
    EnergyRequirement::Energy(energy)
}

/// Calculates the cost of tearing a building down from `level + 1` to
/// `level`, reduced by 4% per Ion technology level.
///
/// Researches, units, the Terraformer and the Lunar Base cannot be
/// demolished and cost nothing here.
pub fn deconstruct_cost(
    tech: TechId,
    level: i32,
    table: &ClassicTechTable,
    ion_tech_level: i32,
) -> Resources {
    if level < 0 {
        return Resources::ZERO;
    }
    if tech.0 > 100 || tech == TechId::TERRAFORMER || tech == TechId::LUNAR_BASE {
        return Resources::ZERO;
    }
    let Some(data) = table.get(&tech) else {
        return Resources::ZERO;
    };
    let discount = 1.0 - 0.04 * f64::from(ion_tech_level);
    let growth = data.growth.powf(f64::from(level - 1));
    Resources::from(data.cost.map(|base| ((base * growth).floor() * discount).floor()))
}

/// Calculates the cost of a single building or research level, or of one
/// ship or defense unit at `level` 1.
///
/// Astrophysics grows by 1.75 per level and its cost is rounded to the
/// nearest hundred.
///
/// # Example
///
/// ```
/// use ogcalc::cost::build_cost;
/// use ogcalc::models::{ClassicTechData, ClassicTechTable, Resources, TechId};
///
/// let mut table = ClassicTechTable::new();
/// table.insert(TechId::METAL_MINE, ClassicTechData::new(60.0, 15.0, 0.0, 1.5));
///
/// assert_eq!(build_cost(TechId::METAL_MINE, 3, &table), Resources::new(135.0, 33.0, 0.0));
/// assert_eq!(build_cost(TechId::METAL_MINE, 0, &table), Resources::ZERO);
/// ```
pub fn build_cost(tech: TechId, level: i32, table: &ClassicTechTable) -> Resources {
    if level < 1 {
        return Resources::ZERO;
    }
    let Some(data) = table.get(&tech) else {
        return Resources::ZERO;
    };
    let exponent = f64::from(level - 1);
    let cost = if tech == TechId::ASTROPHYSICS {
        let growth = 1.75_f64.powf(exponent);
        data.cost.map(|base| 100.0 * round_half_up(0.01 * (base * growth)))
    } else {
        let growth = data.growth.powf(exponent);
        data.cost.map(|base| (base * growth).floor())
    };
    Resources::from(cost)
}

/// Calculates the total cost of going from `level_from` to `level_to`.
///
/// Upgrades sum [`build_cost`] over every level gained; downgrades sum
/// [`deconstruct_cost`] over every level passed on the way down. For ships
/// and defense (`tech >= 200`) `level_to` is a quantity and the result is
/// that many single units; `level_from` is ignored.
///
/// # Example
///
/// ```
/// use ogcalc::cost::total_build_cost;
/// use ogcalc::models::{ClassicTechData, ClassicTechTable, Resources, TechId};
///
/// let mut table = ClassicTechTable::new();
/// table.insert(TechId(202), ClassicTechData::new(2000.0, 2000.0, 0.0, 1.0));
///
/// let cost = total_build_cost(TechId(202), 7, 10, &table, 0);
/// assert_eq!(cost, Resources::new(20000.0, 20000.0, 0.0));
/// ```
pub fn total_build_cost(
    tech: TechId,
    level_from: i32,
    level_to: i32,
    table: &ClassicTechTable,
    ion_tech_level: i32,
) -> Resources {
    let mut total = Resources::ZERO;
    if tech.0 < 200 {
        if level_from > level_to {
            for level in (level_to..level_from).rev() {
                total += deconstruct_cost(tech, level, table, ion_tech_level);
            }
        } else {
            for level in (level_from + 1)..=level_to {
                total += build_cost(tech, level, table);
            }
        }
    } else {
        total = build_cost(tech, 1, table) * f64::from(level_to);
    }
    total
}
