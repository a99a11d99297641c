use crate::models::{Accumulation, ScenarioKind, ScenarioOutcome, ScenarioResult};

pub struct ScenarioProjector;

impl ScenarioProjector {
    /// Project total profit if the final take lands at fixed fractions of its
    /// target gain, holding every earlier take as realized.
    pub fn project(
        initial_capital: f64,
        final_remaining_position: f64,
        target_gain_percent: f64,
        pre_final_accumulated_profit: f64,
    ) -> ScenarioResult {
        let outcomes = ScenarioKind::ALL
            .iter()
            .map(|&kind| {
                let gain_percent = target_gain_percent * kind.multiplier();
                let profit = pre_final_accumulated_profit
                    + initial_capital * final_remaining_position * (gain_percent / 100.0);
                ScenarioOutcome {
                    kind,
                    label: kind.label().to_string(),
                    gain_percent,
                    profit,
                    percent_of_capital: percent_of_capital(profit, initial_capital),
                }
            })
            .collect();

        ScenarioResult { outcomes }
    }

    /// Convenience wrapper that reads the inputs straight off an accumulation.
    pub fn project_accumulation(
        initial_capital: f64,
        accumulation: &Accumulation,
        target_gain_percent: f64,
    ) -> ScenarioResult {
        Self::project(
            initial_capital,
            accumulation.final_remaining_position,
            target_gain_percent,
            accumulation.pre_final_accumulated_profit,
        )
    }
}

/// Profit as a percentage of capital, or `None` when capital is zero.
pub fn percent_of_capital(profit: f64, initial_capital: f64) -> Option<f64> {
    if initial_capital == 0.0 {
        return None;
    }
    Some(profit / initial_capital * 100.0)
}
