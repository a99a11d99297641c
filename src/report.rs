use crate::models::{Accumulation, CalculationOutcome, ScenarioResult, Summary};
use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonEnvelope<'a, T: Serialize> {
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    body: &'a T,
}

pub fn write_json<T: Serialize, W: Write>(out: &mut W, body: &T) -> Result<()> {
    let envelope = JsonEnvelope {
        generated_at: Utc::now(),
        body,
    };
    serde_json::to_writer_pretty(&mut *out, &envelope)?;
    writeln!(out)?;
    Ok(())
}

pub fn write_outcome<W: Write>(
    out: &mut W,
    outcome: &CalculationOutcome,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, outcome),
        OutputFormat::Text => {
            write_report(out, &outcome.accumulation)?;
            writeln!(out)?;
            write_summary(out, &outcome.summary)?;
            writeln!(out)?;
            write_cumulative_series(out, &outcome.accumulation)?;
            writeln!(out)?;
            write_scenarios(out, &outcome.scenarios)
        }
    }
}

pub fn write_report<W: Write>(out: &mut W, accumulation: &Accumulation) -> Result<()> {
    writeln!(out, "Detailed report")?;
    for entry in &accumulation.report {
        writeln!(
            out,
            "Take {}: closed {:.2}%, gain {:.2}%, profit ${:.2}, cumulative profit ${:.2}, remaining position {:.2}%",
            entry.step_index,
            entry.closed_percent,
            entry.gain_percent,
            entry.profit,
            entry.cumulative_profit,
            entry.remaining_percent_after
        )?;
    }
    Ok(())
}

pub fn write_summary<W: Write>(out: &mut W, summary: &Summary) -> Result<()> {
    writeln!(out, "Summary")?;
    writeln!(out, "Initial capital: ${:.2}", summary.initial_capital)?;
    writeln!(out, "Total profit: ${:.2}", summary.total_profit)?;
    writeln!(out, "Final capital: ${:.2}", summary.final_capital)?;
    writeln!(out, "Total return: {:.2}%", summary.total_profit_percent)?;
    Ok(())
}

pub fn write_cumulative_series<W: Write>(out: &mut W, accumulation: &Accumulation) -> Result<()> {
    writeln!(out, "Cumulative profit by take")?;
    for (step_index, cumulative) in accumulation.cumulative_profit_series() {
        writeln!(out, "{:>4}  {:>14.2}", step_index, cumulative)?;
    }
    Ok(())
}

pub fn write_scenarios<W: Write>(out: &mut W, scenarios: &ScenarioResult) -> Result<()> {
    writeln!(out, "Final take scenarios")?;
    writeln!(
        out,
        "{:<26} {:>10} {:>14} {:>12}",
        "Scenario", "Gain (%)", "Profit ($)", "Profit (%)"
    )?;
    for outcome in &scenarios.outcomes {
        let percent = outcome
            .percent_of_capital
            .map(|value| format!("{:.2}", value))
            .unwrap_or_else(|| "n/a".to_string());
        writeln!(
            out,
            "{:<26} {:>10.2} {:>14.2} {:>12}",
            outcome.label, outcome.gain_percent, outcome.profit, percent
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenarios::ScenarioProjector;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> Result<()>,
    {
        let mut buffer = Vec::new();
        f(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn scenario_table_marks_undefined_percentages() {
        let scenarios = ScenarioProjector::project(0.0, 0.5, 20.0, 0.0);
        let text = render(|out| write_scenarios(out, &scenarios));
        assert_eq!(text.lines().count(), 7);
        assert!(text.lines().skip(2).all(|line| line.trim_end().ends_with("n/a")));
    }

    #[test]
    fn json_envelope_carries_timestamp_and_body() {
        let scenarios = ScenarioProjector::project(1000.0, 0.5, 20.0, 50.0);
        let text = render(|out| write_json(out, &scenarios));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert!(value.get("generatedAt").is_some());
        assert_eq!(value["outcomes"][0]["kind"], "at_target");
        assert_eq!(value["outcomes"][4]["label"], "To Zero");
    }
}
