use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use log::info;
use std::io;
use std::path::PathBuf;
use takeprofit::{
    commands::{calculate, scenarios},
    config::{CalculatorInput, TakeInput, DEFAULT_FINAL_GAIN_PERCENT, DEFAULT_INITIAL_CAPITAL},
    report::OutputFormat,
};

#[derive(Parser)]
#[command(name = "takeprofit")]
#[command(about = "Partial take-profit calculator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute profit for a sequence of partial takes and project the final take
    Calculate {
        /// Initial capital in dollars
        #[arg(long, default_value_t = DEFAULT_INITIAL_CAPITAL)]
        capital: f64,
        /// Partial take as CLOSE:GAIN percentages (repeat for each take before the final one)
        #[arg(long = "take", value_name = "CLOSE:GAIN", allow_hyphen_values = true)]
        takes: Vec<TakeInput>,
        /// Gain percent reached by the final take
        #[arg(long, default_value_t = DEFAULT_FINAL_GAIN_PERCENT, allow_hyphen_values = true)]
        final_gain: f64,
        /// JSON plan file; replaces the capital, take and final gain flags
        #[arg(
            long,
            value_name = "PATH",
            conflicts_with_all = ["takes", "capital", "final_gain"]
        )]
        plan: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Project the final take at fixed fractions of its target gain
    Scenarios {
        /// Initial capital in dollars
        #[arg(long, default_value_t = DEFAULT_INITIAL_CAPITAL)]
        capital: f64,
        /// Percent of the original position still open before the final take
        #[arg(long)]
        remaining: f64,
        /// Target gain percent of the final take
        #[arg(long, allow_hyphen_values = true)]
        target_gain: f64,
        /// Profit already realized by earlier takes
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        accumulated: f64,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting takeprofit. Not financial advice.");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Calculate {
            capital,
            takes,
            final_gain,
            plan,
            format,
        } => {
            let input = match plan {
                Some(path) => CalculatorInput::load_from_file(&path)?,
                None => {
                    if takes.is_empty() {
                        return Err(anyhow!(
                            "Provide at least one --take CLOSE:GAIN or a --plan file"
                        ));
                    }
                    CalculatorInput::new(capital, takes, final_gain)
                }
            };
            calculate::run(&input, format, &mut out)?;
        }
        Commands::Scenarios {
            capital,
            remaining,
            target_gain,
            accumulated,
            format,
        } => {
            let request = scenarios::ScenarioRequest {
                initial_capital: capital,
                remaining_percent: remaining,
                target_gain_percent: target_gain,
                accumulated_profit: accumulated,
            };
            scenarios::run(&request, format, &mut out)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_file_rejects_inline_inputs() {
        for extra in [
            ["--capital", "5000"],
            ["--final-gain", "30"],
            ["--take", "50:10"],
        ] {
            let args = [
                "takeprofit",
                "calculate",
                "--plan",
                "plan.json",
                extra[0],
                extra[1],
            ];
            assert!(Cli::try_parse_from(args).is_err(), "{} was accepted", extra[0]);
        }
    }

    #[test]
    fn plan_file_alone_is_accepted() {
        let cli = Cli::try_parse_from(["takeprofit", "calculate", "--plan", "plan.json"]).unwrap();
        match cli.command {
            Commands::Calculate { plan, takes, .. } => {
                assert_eq!(plan, Some(PathBuf::from("plan.json")));
                assert!(takes.is_empty());
            }
            Commands::Scenarios { .. } => panic!("parsed the wrong subcommand"),
        }
    }
}
