use crate::error::CalculationError;
use crate::models::{Accumulation, ReportEntry, Step};
use log::{debug, warn};

pub struct ProfitAccumulator;

impl ProfitAccumulator {
    /// Walk the exit sequence in order and accumulate realized profit.
    ///
    /// Every step but the last closes `close_percent` of the original position
    /// (measured against what is still open); the last step closes the rest.
    /// Fails without a partial report if any step closes more than remains.
    pub fn accumulate(
        initial_capital: f64,
        steps: &[Step],
    ) -> Result<Accumulation, CalculationError> {
        if !initial_capital.is_finite() || initial_capital <= 0.0 {
            return Err(CalculationError::InvalidCapital(initial_capital));
        }
        let (last_step, partial_steps) = steps.split_last().ok_or(CalculationError::NoSteps)?;

        let mut remaining = 1.0_f64;
        let mut total_profit = 0.0_f64;
        let mut cumulative = 0.0_f64;
        let mut report = Vec::with_capacity(steps.len());

        for (offset, step) in partial_steps.iter().enumerate() {
            let step_index = offset + 1;
            let close_frac = step.close_percent / 100.0;
            if close_frac > remaining {
                warn!(
                    "Take {} closes {:.2}% but only {:.2}% of the position remains",
                    step_index,
                    step.close_percent,
                    remaining * 100.0
                );
                return Err(CalculationError::OverclosePosition {
                    step: step_index,
                    close_percent: step.close_percent,
                    remaining_percent: remaining * 100.0,
                });
            }

            let profit = initial_capital * remaining * close_frac * (step.gain_percent / 100.0);
            total_profit += profit;
            cumulative += profit;

            // Measured from the position open before this take.
            let remaining_after = remaining - close_frac;
            report.push(ReportEntry {
                step_index,
                closed_percent: step.close_percent,
                gain_percent: step.gain_percent,
                profit,
                cumulative_profit: cumulative,
                remaining_percent_after: remaining_after * 100.0,
            });
            debug!(
                "Take {}: closed {:.2}% at {:.2}% gain, profit {:.4}, remaining {:.4}",
                step_index, step.close_percent, step.gain_percent, profit, remaining_after
            );

            remaining = remaining_after;
        }

        let pre_final_accumulated_profit = cumulative;
        let final_remaining_position = remaining;

        let final_profit = initial_capital * remaining * (last_step.gain_percent / 100.0);
        total_profit += final_profit;
        cumulative += final_profit;
        report.push(ReportEntry {
            step_index: steps.len(),
            closed_percent: remaining * 100.0,
            gain_percent: last_step.gain_percent,
            profit: final_profit,
            cumulative_profit: cumulative,
            remaining_percent_after: 0.0,
        });
        debug!(
            "Final take {}: closed {:.2}% at {:.2}% gain, profit {:.4}",
            steps.len(),
            remaining * 100.0,
            last_step.gain_percent,
            final_profit
        );

        Ok(Accumulation {
            total_profit,
            total_profit_percent: total_profit / initial_capital * 100.0,
            report,
            final_remaining_position,
            pre_final_accumulated_profit,
        })
    }
}
