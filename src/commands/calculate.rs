use crate::accumulator::ProfitAccumulator;
use crate::config::CalculatorInput;
use crate::models::{CalculationOutcome, Summary};
use crate::report::{self, OutputFormat};
use crate::scenarios::ScenarioProjector;
use anyhow::{Context, Result};
use log::info;
use std::io::Write;

/// Run the accumulator and the scenario projector over one validated input.
pub fn build_outcome(input: &CalculatorInput) -> Result<CalculationOutcome> {
    input.validate()?;
    let steps = input.steps();
    let accumulation = ProfitAccumulator::accumulate(input.initial_capital, &steps)
        .context("calculation aborted")?;
    let scenarios = ScenarioProjector::project_accumulation(
        input.initial_capital,
        &accumulation,
        input.final_gain_percent,
    );
    let summary = Summary::from_accumulation(input.initial_capital, &accumulation);

    Ok(CalculationOutcome {
        summary,
        accumulation,
        scenarios,
    })
}

pub fn run<W: Write>(
    input: &CalculatorInput,
    format: OutputFormat,
    out: &mut W,
) -> Result<CalculationOutcome> {
    info!(
        "Received calculate command: capital={:.2}, takes={}",
        input.initial_capital,
        input.num_steps()
    );

    let outcome = build_outcome(input)?;
    report::write_outcome(out, &outcome, format)?;

    info!(
        "Calculation completed: total profit {:.2} ({:.2}%)",
        outcome.summary.total_profit, outcome.summary.total_profit_percent
    );
    Ok(outcome)
}
