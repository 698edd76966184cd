use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use std::str::FromStr;

use savings_plan_core::display;
use savings_plan_core::format;
use savings_plan_core::input::RawProjectionInput;
use savings_plan_core::projection::{self, ProjectionInput};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

#[napi]
pub fn project_savings(input_json: String) -> NapiResult<String> {
    let input: ProjectionInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = projection::project_with_metadata(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn explain_first_year(input_json: String) -> NapiResult<String> {
    let input: ProjectionInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let trace = projection::explain_first_year(&input);
    serde_json::to_string(&trace).map_err(to_napi_error)
}

#[napi]
pub fn compare_modes(input_json: String) -> NapiResult<String> {
    let input: ProjectionInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = projection::compare_modes(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Form handling and display
// ---------------------------------------------------------------------------

/// Raw form text in, formatted summary, rows and trace out.
#[napi]
pub fn build_report(raw_input_json: String) -> NapiResult<String> {
    let raw: RawProjectionInput = serde_json::from_str(&raw_input_json).map_err(to_napi_error)?;
    let output = display::present_raw(&raw).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Amounts cross the boundary as decimal strings to keep full precision.
#[napi]
pub fn format_amount(value: String) -> NapiResult<String> {
    let amount = Decimal::from_str(value.trim()).map_err(to_napi_error)?;
    Ok(format::format_amount(amount))
}
