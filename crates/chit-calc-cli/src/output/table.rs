use std::io::Write;

use chit_calc_core::{Report, ReportField};
use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::format_value;
use crate::commands::CommandOutput;

/// Format output as tables using the tabled crate.
pub fn write_table(output: &CommandOutput, w: &mut dyn Write) -> Result<(), Box<dyn std::error::Error>> {
    match &output.report {
        Some(report) => write_report(report, w),
        None => write_flat_value(&output.value, w),
    }
}

fn write_report(report: &Report, w: &mut dyn Write) -> Result<(), Box<dyn std::error::Error>> {
    writeln!(w, "{}", report.title)?;
    writeln!(w)?;

    writeln!(w, "{}", field_table("Input", &report.inputs))?;
    writeln!(w)?;
    writeln!(w, "{}", field_table("Result", &report.results))?;

    if let Some(rows) = &report.table {
        let mut builder = Builder::default();
        builder.push_record(rows.headers.iter().map(String::as_str));
        for row in &rows.rows {
            builder.push_record(row.iter().map(String::as_str));
        }
        writeln!(w)?;
        writeln!(w, "{}", Table::from(builder))?;
    }

    if !report.warnings.is_empty() {
        writeln!(w, "\nWarnings:")?;
        for warning in &report.warnings {
            writeln!(w, "  - {}", warning)?;
        }
    }
    Ok(())
}

fn field_table(heading: &str, fields: &[ReportField]) -> Table {
    let mut builder = Builder::default();
    builder.push_record([heading, "Value"]);
    for field in fields {
        builder.push_record([field.label.as_str(), field.value.as_str()]);
    }
    Table::from(builder)
}

/// Key/value table for outputs without a report, with nested objects
/// flattened to dotted keys.
fn write_flat_value(value: &Value, w: &mut dyn Write) -> Result<(), Box<dyn std::error::Error>> {
    let mut pairs = Vec::new();
    flatten("", value, &mut pairs);

    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in pairs {
        builder.push_record([key, val]);
    }
    writeln!(w, "{}", Table::from(builder))?;
    Ok(())
}

pub(crate) fn flatten(prefix: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&path, val, out);
            }
        }
        _ => out.push((prefix.to_string(), format_value(value))),
    }
}
