use crate::engine;
use crate::Result;
use colored::Colorize;
use dialoguer::Input;

/// Print the calibration factor, prompting for any missing duration
pub fn run(actual: Option<f64>, estimated: Option<f64>) -> Result<()> {
    let actual = match actual {
        Some(v) => v,
        None => prompt("Actual duration (days)")?,
    };
    let estimated = match estimated {
        Some(v) => v,
        None => prompt("Estimated duration (days)")?,
    };

    match engine::calibration_factor(actual, estimated) {
        Some(factor) => {
            println!(
                "{} {}",
                "Calibration factor:".cyan().bold(),
                format!("{:.3}", factor).bold()
            );
            println!("Apply it as a multiplier to the base project size.");
        }
        None => {
            println!(
                "{}",
                "Both durations must be positive to calibrate.".yellow()
            );
        }
    }
    Ok(())
}

fn prompt(label: &str) -> Result<f64> {
    let value = Input::<f64>::new().with_prompt(label).interact_text()?;
    Ok(value)
}
