pub mod csv_out;
pub mod html;
pub mod json;
pub mod minimal;
pub mod table;

use std::io::Write;

use crate::commands::CommandOutput;
use crate::OutputFormat;

/// Dispatch output to the appropriate formatter.
pub fn format_output(
    format: &OutputFormat,
    output: &CommandOutput,
    w: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => json::write_json(&output.value, w),
        OutputFormat::Table => table::write_table(output, w),
        OutputFormat::Csv => csv_out::write_csv(output, w),
        OutputFormat::Minimal => minimal::write_minimal(&output.value, w),
        OutputFormat::Html => html::write_html(output, w),
    }
}

/// Render a JSON value as a plain cell string.
pub(crate) fn format_value(value: &serde_json::Value) -> String {
    use serde_json::Value;
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
