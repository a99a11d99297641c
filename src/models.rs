use serde::{Deserialize, Serialize};

/// One exit in the take-profit sequence.
///
/// `close_percent` is ignored for the final step, which always closes whatever
/// is left of the position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub close_percent: f64,
    pub gain_percent: f64,
}

impl Step {
    pub fn new(close_percent: f64, gain_percent: f64) -> Self {
        Self {
            close_percent,
            gain_percent,
        }
    }

    /// Final step of a sequence; the close percentage is implicit.
    pub fn final_take(gain_percent: f64) -> Self {
        Self::new(0.0, gain_percent)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEntry {
    pub step_index: usize,
    pub closed_percent: f64,
    pub gain_percent: f64,
    pub profit: f64,
    pub cumulative_profit: f64,
    pub remaining_percent_after: f64,
}

/// Output of a full pass over the step list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accumulation {
    pub total_profit: f64,
    pub total_profit_percent: f64,
    pub report: Vec<ReportEntry>,
    /// Position fraction still open when the final step executes.
    pub final_remaining_position: f64,
    /// Cumulative profit of every step except the final one.
    pub pre_final_accumulated_profit: f64,
}

impl Accumulation {
    /// `(step_index, cumulative_profit)` points for the cumulative profit chart.
    pub fn cumulative_profit_series(&self) -> Vec<(usize, f64)> {
        self.report
            .iter()
            .map(|entry| (entry.step_index, entry.cumulative_profit))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    AtTarget,
    ThreeQuartersOfTarget,
    HalfOfTarget,
    QuarterOfTarget,
    ToZero,
}

impl ScenarioKind {
    pub const ALL: [ScenarioKind; 5] = [
        ScenarioKind::AtTarget,
        ScenarioKind::ThreeQuartersOfTarget,
        ScenarioKind::HalfOfTarget,
        ScenarioKind::QuarterOfTarget,
        ScenarioKind::ToZero,
    ];

    pub fn multiplier(self) -> f64 {
        match self {
            Self::AtTarget => 1.0,
            Self::ThreeQuartersOfTarget => 0.75,
            Self::HalfOfTarget => 0.5,
            Self::QuarterOfTarget => 0.25,
            Self::ToZero => 0.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::AtTarget => "At Target",
            Self::ThreeQuartersOfTarget => "Three Quarters of Target",
            Self::HalfOfTarget => "Half of Target",
            Self::QuarterOfTarget => "Quarter of Target",
            Self::ToZero => "To Zero",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioOutcome {
    pub kind: ScenarioKind,
    pub label: String,
    pub gain_percent: f64,
    pub profit: f64,
    /// `None` when capital is zero and the percentage is undefined.
    pub percent_of_capital: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResult {
    pub outcomes: Vec<ScenarioOutcome>,
}

impl ScenarioResult {
    pub fn get(&self, kind: ScenarioKind) -> Option<&ScenarioOutcome> {
        self.outcomes.iter().find(|outcome| outcome.kind == kind)
    }

    pub fn profit(&self, kind: ScenarioKind) -> Option<f64> {
        self.get(kind).map(|outcome| outcome.profit)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub initial_capital: f64,
    pub total_profit: f64,
    pub final_capital: f64,
    pub total_profit_percent: f64,
}

impl Summary {
    pub fn from_accumulation(initial_capital: f64, accumulation: &Accumulation) -> Self {
        Self {
            initial_capital,
            total_profit: accumulation.total_profit,
            final_capital: initial_capital + accumulation.total_profit,
            total_profit_percent: accumulation.total_profit_percent,
        }
    }
}

/// Everything the display layer needs after a successful calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationOutcome {
    pub summary: Summary,
    pub accumulation: Accumulation,
    pub scenarios: ScenarioResult,
}
