use crate::models::Step;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

pub const DEFAULT_INITIAL_CAPITAL: f64 = 1000.0;
pub const DEFAULT_FINAL_GAIN_PERCENT: f64 = 10.0;
pub const MIN_GAIN_PERCENT: f64 = -100.0;
pub const MAX_CLOSE_PERCENT: f64 = 100.0;

/// A partial take: close part of the position at a realized gain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TakeInput {
    pub close_percent: f64,
    pub gain_percent: f64,
}

impl FromStr for TakeInput {
    type Err = anyhow::Error;

    /// Parses `CLOSE:GAIN`, e.g. `50:10` or `25:-5.5`.
    fn from_str(raw: &str) -> Result<Self> {
        let (close, gain) = raw
            .split_once(':')
            .ok_or_else(|| anyhow!("Take must be given as CLOSE:GAIN (value: {})", raw))?;
        let close_percent = parse_number("Take close percent", close)?;
        let gain_percent = parse_number("Take gain percent", gain)?;
        Ok(Self {
            close_percent,
            gain_percent,
        })
    }
}

/// Immutable input for one calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorInput {
    #[serde(default = "default_initial_capital")]
    pub initial_capital: f64,
    pub takes: Vec<TakeInput>,
    #[serde(default = "default_final_gain_percent")]
    pub final_gain_percent: f64,
}

fn default_initial_capital() -> f64 {
    DEFAULT_INITIAL_CAPITAL
}

fn default_final_gain_percent() -> f64 {
    DEFAULT_FINAL_GAIN_PERCENT
}

impl CalculatorInput {
    pub fn new(initial_capital: f64, takes: Vec<TakeInput>, final_gain_percent: f64) -> Self {
        Self {
            initial_capital,
            takes,
            final_gain_percent,
        }
    }

    /// Load a JSON plan such as
    /// `{"initialCapital": 1000, "takes": [{"closePercent": 50, "gainPercent": 10}], "finalGainPercent": 20}`.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read plan file {}", path.display()))?;
        let input: Self = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse plan file {}", path.display()))?;
        Ok(input)
    }

    /// Total number of takes including the final one.
    pub fn num_steps(&self) -> usize {
        self.takes.len() + 1
    }

    /// Check the same bounds the input form enforces.
    pub fn validate(&self) -> Result<()> {
        require_f64_in_range("Initial capital", self.initial_capital, Some(0.0), None)?;
        if self.takes.is_empty() {
            return Err(anyhow!(
                "At least one partial take is required before the final take (number of takes must be >= 2)"
            ));
        }
        for (idx, take) in self.takes.iter().enumerate() {
            let step = idx + 1;
            require_f64_in_range(
                &format!("Take {} close percent", step),
                take.close_percent,
                Some(0.0),
                Some(MAX_CLOSE_PERCENT),
            )?;
            require_f64_in_range(
                &format!("Take {} gain percent", step),
                take.gain_percent,
                Some(MIN_GAIN_PERCENT),
                None,
            )?;
        }
        require_f64_in_range(
            "Final take gain percent",
            self.final_gain_percent,
            Some(MIN_GAIN_PERCENT),
            None,
        )?;
        Ok(())
    }

    /// Expand into the ordered step list, final take last.
    pub fn steps(&self) -> Vec<Step> {
        self.takes
            .iter()
            .map(|take| Step::new(take.close_percent, take.gain_percent))
            .chain(std::iter::once(Step::final_take(self.final_gain_percent)))
            .collect()
    }
}

fn parse_number(field: &str, raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    trimmed
        .parse::<f64>()
        .map_err(|_| anyhow!("{} must be a number (value: {})", field, trimmed))
}

pub fn require_f64_in_range(
    field: &str,
    value: f64,
    min: Option<f64>,
    max: Option<f64>,
) -> Result<f64> {
    if !value.is_finite() {
        return Err(anyhow!("{} must be finite (value: {})", field, value));
    }
    if let Some(min_value) = min {
        if value < min_value {
            return Err(anyhow!(
                "{} must be >= {} (value: {})",
                field,
                min_value,
                value
            ));
        }
    }
    if let Some(max_value) = max {
        if value > max_value {
            return Err(anyhow!(
                "{} must be <= {} (value: {})",
                field,
                max_value,
                value
            ));
        }
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_close_and_gain_pairs() {
        let take: TakeInput = "50:10".parse().unwrap();
        assert_eq!(take.close_percent, 50.0);
        assert_eq!(take.gain_percent, 10.0);

        let take: TakeInput = " 25 : -5.5 ".parse().unwrap();
        assert_eq!(take.close_percent, 25.0);
        assert_eq!(take.gain_percent, -5.5);

        assert!("50".parse::<TakeInput>().is_err());
        assert!("abc:10".parse::<TakeInput>().is_err());
    }

    #[test]
    fn validate_enforces_form_bounds() {
        let valid = CalculatorInput::new(1000.0, vec!["50:10".parse().unwrap()], 20.0);
        assert!(valid.validate().is_ok());

        let no_takes = CalculatorInput::new(1000.0, Vec::new(), 20.0);
        assert!(no_takes.validate().is_err());

        let negative_capital = CalculatorInput::new(-1.0, valid.takes.clone(), 20.0);
        let err = negative_capital.validate().unwrap_err();
        assert_eq!(err.to_string(), "Initial capital must be >= 0 (value: -1)");

        let too_much = CalculatorInput::new(1000.0, vec!["120:10".parse().unwrap()], 20.0);
        let err = too_much.validate().unwrap_err();
        assert_eq!(err.to_string(), "Take 1 close percent must be <= 100 (value: 120)");

        let wipeout = CalculatorInput::new(1000.0, valid.takes.clone(), -150.0);
        assert!(wipeout.validate().is_err());

        let infinite = CalculatorInput::new(f64::INFINITY, valid.takes, 20.0);
        assert!(infinite.validate().is_err());
    }

    #[test]
    fn steps_end_with_the_final_take() {
        let input = CalculatorInput::new(
            1000.0,
            vec!["30:5".parse().unwrap(), "20:15".parse().unwrap()],
            40.0,
        );
        assert_eq!(input.num_steps(), 3);
        assert_eq!(
            input.steps(),
            vec![
                Step::new(30.0, 5.0),
                Step::new(20.0, 15.0),
                Step::final_take(40.0)
            ]
        );
    }

    #[test]
    fn loads_plan_file_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"takes": [{{"closePercent": 50, "gainPercent": 10}}], "finalGainPercent": 20}}"#
        )
        .unwrap();

        let input = CalculatorInput::load_from_file(file.path()).unwrap();
        assert_eq!(input.initial_capital, DEFAULT_INITIAL_CAPITAL);
        assert_eq!(input.takes.len(), 1);
        assert_eq!(input.final_gain_percent, 20.0);
    }

    #[test]
    fn missing_plan_file_reports_path() {
        let err = CalculatorInput::load_from_file(Path::new("/nonexistent/plan.json")).unwrap_err();
        assert!(err
            .to_string()
            .contains("failed to read plan file /nonexistent/plan.json"));
    }
}
