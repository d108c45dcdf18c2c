use serde_json::Value;
use std::io::Write;

/// Pretty-print JSON.
pub fn write_json(value: &Value, w: &mut dyn Write) -> Result<(), Box<dyn std::error::Error>> {
    let s = serde_json::to_string_pretty(value)?;
    writeln!(w, "{}", s)?;
    Ok(())
}
