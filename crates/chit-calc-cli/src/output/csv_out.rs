use std::io::Write;

use chit_calc_core::Report;
use serde_json::Value;

use super::format_value;
use super::table::flatten;
use crate::commands::CommandOutput;

/// Write output as CSV.
///
/// Reports with a row table export the rows first, then a blank line and a
/// summary block of label/value pairs. Reports without a table export a
/// two-column field/value sheet.
pub fn write_csv(output: &CommandOutput, w: &mut dyn Write) -> Result<(), Box<dyn std::error::Error>> {
    match &output.report {
        Some(report) => write_report_csv(report, w),
        None => write_value_csv(&output.value, w),
    }
}

fn write_report_csv(report: &Report, w: &mut dyn Write) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(w);

    if let Some(table) = &report.table {
        wtr.write_record(&table.headers)?;
        for row in &table.rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
        // csv refuses to write an empty record
        let inner = wtr.into_inner().map_err(|e| e.into_error())?;
        inner.write_all(b"\n")?;
        wtr = csv::WriterBuilder::new().flexible(true).from_writer(inner);
        wtr.write_record(["Summary"])?;
    } else {
        wtr.write_record(["field", "value"])?;
    }

    for field in report.inputs.iter().chain(report.results.iter()) {
        wtr.write_record([field.label.as_str(), field.value.as_str()])?;
    }
    for warning in &report.warnings {
        wtr.write_record(["Warning", warning.as_str()])?;
    }

    wtr.flush()?;
    Ok(())
}

fn write_value_csv(value: &Value, w: &mut dyn Write) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_writer(w);

    match value {
        Value::Object(_) => {
            let mut pairs = Vec::new();
            flatten("", value, &mut pairs);
            wtr.write_record(["field", "value"])?;
            for (key, val) in pairs {
                wtr.write_record([key, val])?;
            }
        }
        _ => wtr.write_record([format_value(value)])?,
    }

    wtr.flush()?;
    Ok(())
}
