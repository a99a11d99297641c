use crate::config::{require_f64_in_range, MIN_GAIN_PERCENT};
use crate::models::ScenarioResult;
use crate::report::{self, OutputFormat};
use crate::scenarios::ScenarioProjector;
use anyhow::Result;
use log::info;
use std::io::Write;

/// Inputs for projecting the final take on its own, without replaying the
/// earlier takes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioRequest {
    pub initial_capital: f64,
    /// Percent of the original position still open before the final take.
    pub remaining_percent: f64,
    pub target_gain_percent: f64,
    pub accumulated_profit: f64,
}

pub fn run<W: Write>(
    request: &ScenarioRequest,
    format: OutputFormat,
    out: &mut W,
) -> Result<ScenarioResult> {
    info!(
        "Received scenarios command: capital={:.2}, remaining={:.2}%, target gain={:.2}%",
        request.initial_capital, request.remaining_percent, request.target_gain_percent
    );

    let initial_capital =
        require_f64_in_range("Initial capital", request.initial_capital, Some(0.0), None)?;
    let remaining_percent = require_f64_in_range(
        "Remaining percent",
        request.remaining_percent,
        Some(0.0),
        Some(100.0),
    )?;
    let target_gain_percent = require_f64_in_range(
        "Target gain percent",
        request.target_gain_percent,
        Some(MIN_GAIN_PERCENT),
        None,
    )?;
    let accumulated_profit =
        require_f64_in_range("Accumulated profit", request.accumulated_profit, None, None)?;

    let result = ScenarioProjector::project(
        initial_capital,
        remaining_percent / 100.0,
        target_gain_percent,
        accumulated_profit,
    );
    match format {
        OutputFormat::Json => report::write_json(out, &result)?,
        OutputFormat::Text => report::write_scenarios(out, &result)?,
    }

    info!("Projected {} scenario(s)", result.outcomes.len());
    Ok(result)
}
