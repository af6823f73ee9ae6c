use napi::Result as NapiResult;
use napi_derive::napi;

use mansion_core::advisory::AdviceContext;
use mansion_core::simulation::{self, InvestmentData, SimulationYear};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

#[napi]
pub fn run_simulation(input_json: String) -> NapiResult<String> {
    let input: InvestmentData = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = simulation::run_simulation(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn project_schedule(input_json: String) -> NapiResult<String> {
    let input: InvestmentData = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let schedule = simulation::project_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&schedule).map_err(to_napi_error)
}

#[napi]
pub fn summarise_kpis(input_json: String, schedule_json: String) -> NapiResult<String> {
    let input: InvestmentData = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let schedule: Vec<SimulationYear> =
        serde_json::from_str(&schedule_json).map_err(to_napi_error)?;
    let kpis = simulation::summarise_kpis(&input, &schedule).map_err(to_napi_error)?;
    serde_json::to_string(&kpis).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Advisory
// ---------------------------------------------------------------------------

#[napi]
pub fn advice_context(input_json: String) -> NapiResult<String> {
    let input: InvestmentData = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let context = AdviceContext::from(&input);
    serde_json::to_string(&context).map_err(to_napi_error)
}
