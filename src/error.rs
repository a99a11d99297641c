use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CalculationError {
    #[error(
        "take {step} closes {close_percent:.2}% of the position but only {remaining_percent:.2}% remains"
    )]
    OverclosePosition {
        step: usize,
        close_percent: f64,
        remaining_percent: f64,
    },

    #[error("initial capital must be a positive finite number (value: {0})")]
    InvalidCapital(f64),

    #[error("at least one take is required")]
    NoSteps,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overclose_message_names_the_take() {
        let err = CalculationError::OverclosePosition {
            step: 2,
            close_percent: 50.0,
            remaining_percent: 40.0,
        };
        assert_eq!(
            err.to_string(),
            "take 2 closes 50.00% of the position but only 40.00% remains"
        );
    }

    #[test]
    fn capital_and_empty_step_messages() {
        assert_eq!(
            CalculationError::InvalidCapital(-250.0).to_string(),
            "initial capital must be a positive finite number (value: -250)"
        );
        assert_eq!(
            CalculationError::NoSteps.to_string(),
            "at least one take is required"
        );
    }
}
