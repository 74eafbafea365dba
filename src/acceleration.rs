//! Dark Matter cost of halving a construction, research or shipyard order.

use crate::models::TechId;

/// Flat price for halving anything up to [`FLAT_THRESHOLD`] seconds.
pub const FLAT_COST: f64 = 750.0;
/// Longest duration, in seconds, that still pays [`FLAT_COST`].
pub const FLAT_THRESHOLD: f64 = 1800.0;
const BUILDING_CAP: f64 = 72000.0;
const RESEARCH_CAP: f64 = 108000.0;

/// Calculates the Dark Matter needed to halve `time_span` seconds of work.
///
/// Buildings and researches pay 750 per started 30 minutes, capped at
/// 72,000 and 108,000 respectively. Ships and defense pay 75 per started
/// 3 minutes, capped at 72,000.
///
/// # Example
///
/// ```
/// use ogcalc::acceleration::halving_cost;
/// use ogcalc::models::TechId;
///
/// assert_eq!(halving_cost(TechId(1), 0.0), 0.0);
/// assert_eq!(halving_cost(TechId(1), 1800.0), 750.0);
/// assert_eq!(halving_cost(TechId(1), 3600.0), 1500.0);
/// assert_eq!(halving_cost(TechId(250), 3600.0), 1500.0);
/// ```
pub fn halving_cost(tech: TechId, time_span: f64) -> f64 {
    if time_span == 0.0 {
        return 0.0;
    }
    if time_span <= FLAT_THRESHOLD {
        return FLAT_COST;
    }
    let id = tech.0;
    if id < 200 {
        let halves = ((time_span / 60.0).ceil() / 30.0).ceil();
        let cost = FLAT_COST * halves;
        if id < 100 {
            return cost.min(BUILDING_CAP);
        }
        if id > 100 {
            return cost.min(RESEARCH_CAP);
        }
        return cost;
    }
    if id > 200 {
        let halves = 0.1 * ((time_span / 60.0).floor() / 3.0).ceil();
        return (FLAT_COST * halves).floor().min(BUILDING_CAP);
    }
    FLAT_COST
}
