use chit_calc_core::limits::CalculatorLimits;

use super::CommandOutput;
use crate::input;

/// Load the limits the calculators are checked against.
///
/// `--no-limits` disables checking; `--limits <file.yaml>` replaces the
/// built-in defaults.
pub fn load_limits(
    path: Option<&str>,
    disabled: bool,
) -> Result<Option<CalculatorLimits>, Box<dyn std::error::Error>> {
    if disabled {
        log::debug!("input limits disabled");
        return Ok(None);
    }
    let limits = match path {
        Some(path) => {
            let yaml = input::file::read_text(path)?;
            let limits = CalculatorLimits::from_yaml_str(&yaml)
                .map_err(|e| format!("Invalid limits file '{}': {}", path, e))?;
            log::info!("loaded input limits from {}", path);
            limits
        }
        None => CalculatorLimits::default(),
    };
    Ok(Some(limits))
}

/// Show the effective limits.
pub fn run_limits(
    limits: Option<&CalculatorLimits>,
) -> Result<CommandOutput, Box<dyn std::error::Error>> {
    match limits {
        Some(limits) => Ok(CommandOutput::from_value(serde_json::to_value(limits)?)),
        None => Ok(CommandOutput::from_value(serde_json::json!({ "limits": "disabled" }))),
    }
}
