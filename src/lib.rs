//! # ogcalc
//!
//! A command-line tool and library implementing the OGame economy formulas
//! used by browser calculators.
//!
//! Given technology identifiers, levels and bonuses, this crate computes:
//!
//! - Hourly resource and energy production, with a per-bonus breakdown
//! - Energy and deuterium consumption
//! - Storage capacity
//! - Construction, research and demolition costs, classic and Lifeforms
//! - Construction, research and shipyard durations
//! - The Dark Matter price of halving a duration
//!
//! It also ships a small deterministic factory-economy game with a greedy
//! baseline player (see [`simulation`]).
//!
//! Every formula is a pure function. Per-technology cost data is supplied
//! as a tech table (see [`data`] for the embedded classic table).
//!
//! ## Modules
//!
//! - [`models`] - Identifiers, tech data rows and parameter bundles
//! - [`production`] - Production, consumption and storage
//! - [`cost`] - Classic costs
//! - [`time`] - Classic build durations
//! - [`lifeforms`] - Lifeforms costs, durations and energy
//! - [`acceleration`] - Halving costs
//! - [`data`] - CSV tech table loading
//! - [`simulation`] - Factory economy game and greedy player
//! - [`display`] - Output formatting and display utilities
//!
//! ## Example Usage
//!
//! ```
//! use ogcalc::{
//!     cost::total_build_cost,
//!     data::embedded_catalog,
//!     models::{BuildTimeModifiers, Resources, TechId},
//!     time::build_time,
//! };
//!
//! let catalog = embedded_catalog().unwrap();
//!
//! // Metal Mine from level 0 to 2
//! let cost = total_build_cost(TechId::METAL_MINE, 0, 2, &catalog.techs, 0);
//! assert_eq!(cost, Resources::new(150.0, 37.0, 0.0));
//!
//! let modifiers = BuildTimeModifiers { robotics_factory: 2, ..Default::default() };
//! let seconds = build_time(
//!     TechId::METAL_MINE, 0, 2, &catalog.techs, &modifiers, &catalog.research_requirements,
//! );
//! assert!(seconds >= 1.0);
//! ```

pub mod acceleration;
pub mod cost;
pub mod data;
pub mod display;
pub mod lifeforms;
pub mod models;
pub mod production;
pub mod simulation;
pub mod time;
pub mod wasm;

/// Rounds to the nearest integer with halves going up, the way the game's
/// formulas round (`-2.5` becomes `-2`).
pub(crate) fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}
