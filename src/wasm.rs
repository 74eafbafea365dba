//! WebAssembly bindings for ogcalc.
//!
//! This module provides JavaScript-accessible functions for the calculator.
//! Every function takes a JSON string and returns a JSON string; classic
//! calculations use the embedded tech table.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::acceleration::halving_cost;
use crate::cost::{build_energy_cost, total_build_cost};
use crate::data::{embedded_catalog, TechCatalog};
use crate::display::format_duration;
use crate::lifeforms::{build_energy_cost_lf, build_time_lf, total_build_cost_lf};
use crate::models::{
    BuildTimeModifiers, FormulaModel, LifeformTechData, LifeformTechTable, ProductionBreakdown,
    ProductionInput, Resources, TechId, TechKind,
};
use crate::production::{hourly_consumption, production_rate, production_rate_split};
use crate::simulation::play_greedy;
use crate::time::build_time;

/// JavaScript-friendly input for a classic cost or time request.
#[derive(Debug, Clone, Deserialize)]
pub struct JsBuildInput {
    pub tech: TechId,
    #[serde(default)]
    pub level_from: i32,
    pub level_to: i32,
    #[serde(default)]
    pub ion_tech_level: i32,
    #[serde(default)]
    pub modifiers: Option<BuildTimeModifiers>,
}

/// JavaScript-friendly input for a Lifeforms cost or time request.
#[derive(Debug, Clone, Deserialize)]
pub struct JsLifeformInput {
    pub tech: TechId,
    /// The ten-value data row of `tech`
    pub data: [f64; 10],
    #[serde(default)]
    pub level_from: i32,
    pub level_to: i32,
    #[serde(default)]
    pub ion_tech_level: i32,
    #[serde(default)]
    pub research_cost_reduction: f64,
    #[serde(default)]
    pub building_cost_reduction: f64,
    #[serde(default)]
    pub robotics_factory: i32,
    #[serde(default)]
    pub nanite_factory: i32,
    #[serde(default = "default_speed")]
    pub universe_speed: f64,
    #[serde(default)]
    pub research_time_reduction: f64,
    #[serde(default)]
    pub megalith_reduction: f64,
}

fn default_speed() -> f64 {
    1.0
}

/// JavaScript-friendly input for a halving request.
#[derive(Debug, Clone, Deserialize)]
pub struct JsHalvingInput {
    pub tech: TechId,
    pub seconds: f64,
}

/// JavaScript-friendly input for a factory simulation.
#[derive(Debug, Clone, Deserialize)]
pub struct JsSimulationInput {
    pub max_time: f64,
}

/// JavaScript-friendly production output.
#[derive(Debug, Clone, Serialize)]
pub struct JsProductionResult {
    pub rows: ProductionBreakdown,
    pub total: f64,
    pub consumption: f64,
}

/// JavaScript-friendly cost output.
#[derive(Debug, Clone, Serialize)]
pub struct JsCostResult {
    pub cost: Resources,
    pub energy: f64,
}

/// JavaScript-friendly duration output.
#[derive(Debug, Clone, Serialize)]
pub struct JsTimeResult {
    pub seconds: f64,
    pub formatted: String,
    pub halving_cost: f64,
    pub lab_too_low: bool,
}

/// Envelope shared by every response.
#[derive(Debug, Clone, Serialize)]
pub struct JsResponse<T: Serialize> {
    pub success: bool,
    pub error: Option<String>,
    pub result: Option<T>,
}

#[derive(Debug, Clone, Serialize)]
struct JsTechInfo {
    id: TechId,
    name: String,
    kind: TechKind,
    cost: Resources,
    growth: f64,
    lab_level: Option<i32>,
}

#[cfg(target_arch = "wasm32")]
fn log_warning(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}

#[cfg(not(target_arch = "wasm32"))]
fn log_warning(message: &str) {
    tracing::warn!("{}", message);
}

fn respond<T: Serialize>(result: Result<T, String>) -> String {
    let response = match result {
        Ok(value) => JsResponse {
            success: true,
            error: None,
            result: Some(value),
        },
        Err(error) => {
            log_warning(&error);
            JsResponse {
                success: false,
                error: Some(error),
                result: None,
            }
        }
    };
    serde_json::to_string(&response).unwrap_or_default()
}

fn parse<'a, T: Deserialize<'a>>(input_json: &'a str) -> Result<T, String> {
    serde_json::from_str(input_json).map_err(|e| format!("Invalid input: {}", e))
}

fn catalog() -> Result<TechCatalog, String> {
    embedded_catalog().map_err(|e| format!("Embedded tech table is invalid: {}", e))
}

/// Calculate hourly production and consumption of one producer.
///
/// Takes a JSON [`ProductionInput`] and returns a JSON string result.
#[wasm_bindgen]
pub fn calculate_production(input_json: &str) -> String {
    respond(parse::<ProductionInput>(input_json).map(|input| JsProductionResult {
        rows: production_rate_split(&input),
        total: production_rate(&input),
        consumption: hourly_consumption(
            input.tech,
            input.level,
            input.speed_factor,
            input.power_factor,
        ),
    }))
}

/// Calculate the classic cost of a level range or unit quantity.
///
/// Energy is only reported for upgrades; it is 0 for demolitions.
#[wasm_bindgen]
pub fn calculate_cost(input_json: &str) -> String {
    respond(parse::<JsBuildInput>(input_json).and_then(|input| {
        let catalog = catalog()?;
        Ok(JsCostResult {
            cost: total_build_cost(
                input.tech,
                input.level_from,
                input.level_to,
                &catalog.techs,
                input.ion_tech_level,
            ),
            energy: if input.level_to > input.level_from {
                build_energy_cost(input.tech, input.level_to, &catalog.techs).amount()
            } else {
                0.0
            },
        })
    }))
}

/// Calculate the classic duration of a level range or unit quantity.
#[wasm_bindgen]
pub fn calculate_build_time(input_json: &str) -> String {
    respond(parse::<JsBuildInput>(input_json).and_then(|input| {
        let catalog = catalog()?;
        let modifiers = input.modifiers.unwrap_or_default();
        let seconds = build_time(
            input.tech,
            input.level_from,
            input.level_to,
            &catalog.techs,
            &modifiers,
            &catalog.research_requirements,
        );
        Ok(time_result(input.tech, seconds))
    }))
}

/// Calculate the Dark Matter price of halving a duration.
#[wasm_bindgen]
pub fn calculate_halving_cost(input_json: &str) -> String {
    respond(
        parse::<JsHalvingInput>(input_json)
            .map(|input| halving_cost(input.tech, input.seconds)),
    )
}

fn lifeform_table(input: &JsLifeformInput) -> LifeformTechTable {
    let mut table = LifeformTechTable::new();
    table.insert(input.tech, LifeformTechData::from(input.data));
    table
}

/// Calculate the Lifeforms cost and energy of a level range.
#[wasm_bindgen]
pub fn calculate_lifeform_cost(input_json: &str) -> String {
    respond(parse::<JsLifeformInput>(input_json).map(|input| {
        let table = lifeform_table(&input);
        JsCostResult {
            cost: total_build_cost_lf(
                input.tech,
                input.level_from,
                input.level_to,
                &table,
                input.ion_tech_level,
                input.research_cost_reduction,
                input.building_cost_reduction,
            ),
            energy: if input.level_to > input.level_from {
                build_energy_cost_lf(input.tech, input.level_to, &table, input.ion_tech_level)
            } else {
                0.0
            },
        }
    }))
}

/// Calculate the Lifeforms duration of a level range.
#[wasm_bindgen]
pub fn calculate_lifeform_time(input_json: &str) -> String {
    respond(parse::<JsLifeformInput>(input_json).map(|input| {
        let table = lifeform_table(&input);
        let seconds = build_time_lf(
            input.tech,
            input.level_from,
            input.level_to,
            &table,
            input.robotics_factory,
            input.nanite_factory,
            input.universe_speed,
            input.research_time_reduction,
            input.megalith_reduction,
        );
        // halving is priced by building/research kind, not by the species id
        time_result(TechId(input.tech.lifeform_local()), seconds)
    }))
}

/// Builds a duration result; `halving_tech` selects the halving price band.
fn time_result(halving_tech: TechId, seconds: f64) -> JsTimeResult {
    let lab_too_low = seconds < 0.0;
    JsTimeResult {
        seconds,
        formatted: format_duration(seconds),
        halving_cost: if lab_too_low {
            0.0
        } else {
            halving_cost(halving_tech, seconds)
        },
        lab_too_low,
    }
}

/// Play one factory-economy episode with the greedy strategy.
///
/// Returns a JSON [`EpisodeSummary`](crate::models::EpisodeSummary).
#[wasm_bindgen]
pub fn simulate_factory_game(input_json: &str) -> String {
    respond(parse::<JsSimulationInput>(input_json).and_then(|input| {
        if !input.max_time.is_finite() || input.max_time < 0.0 {
            return Err(format!(
                "Episode length must be finite and non-negative, got {}",
                input.max_time
            ));
        }
        Ok(play_greedy(input.max_time))
    }))
}

/// Get the embedded classic tech table, sorted by identifier.
#[wasm_bindgen]
pub fn get_tech_catalog() -> String {
    respond(catalog().map(|catalog| {
        catalog
            .sorted_ids()
            .into_iter()
            .filter_map(|id| {
                catalog.techs.get(&id).map(|data| JsTechInfo {
                    id,
                    name: catalog.name(id),
                    kind: FormulaModel::Classic.kind_of(id),
                    cost: Resources::from(data.cost),
                    growth: data.growth,
                    lab_level: catalog.research_requirements.get(&id).copied(),
                })
            })
            .collect::<Vec<_>>()
    }))
}

/// Get the version of the calculator.
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
