pub mod chit;
pub mod limits;
pub mod loans;

use chit_calc_core::{Report, ToReport};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::input;

/// What a command hands to the output layer: the raw JSON envelope and,
/// for calculators, the flattened report the exporters render.
pub struct CommandOutput {
    pub value: Value,
    pub report: Option<Report>,
}

impl CommandOutput {
    pub fn from_calculation<T: Serialize + ToReport>(
        output: &T,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            value: serde_json::to_value(output)?,
            report: Some(output.to_report()),
        })
    }

    pub fn from_value(value: Value) -> Self {
        Self {
            value,
            report: None,
        }
    }
}

/// Resolve a calculator input from, in order: `--input <file.json>`,
/// individual flags (when any was given), or JSON piped on stdin.
pub(crate) fn resolve_input<T, F>(
    path: &Option<String>,
    flags_given: bool,
    from_flags: F,
    what: &str,
) -> Result<T, Box<dyn std::error::Error>>
where
    T: DeserializeOwned,
    F: FnOnce() -> Result<T, Box<dyn std::error::Error>>,
{
    if let Some(path) = path {
        return input::file::read_json(path);
    }
    if flags_given {
        return from_flags();
    }
    match input::stdin::read_stdin()? {
        Some(value) => Ok(value),
        None => Err(format!("--input <file.json>, flags or stdin required for {what}").into()),
    }
}
