use serde_json::Value;
use std::io::Write;

use super::format_value;

/// Print just the key answer value from the output.
///
/// Heuristic: the chit bid answer depends on which side was solved; other
/// calculators are matched against well-known result fields, then the
/// first field of the result object.
pub fn write_minimal(value: &Value, w: &mut dyn Write) -> Result<(), Box<dyn std::error::Error>> {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let priority_keys = [
        "monthly_installment",
        "monthly_payable",
        "max_payable_to_winner",
    ];

    if let Value::Object(map) = result_obj {
        if let Some(Value::String(mode)) = map.get("mode") {
            let key = match mode.as_str() {
                "solve_bid_rate" => "bidding_rate_pct",
                _ => "bid_amount",
            };
            match map.get(key) {
                Some(Value::Null) | None => writeln!(w, "n/a")?,
                Some(val) => writeln!(w, "{}", format_value(val))?,
            }
            return Ok(());
        }

        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    writeln!(w, "{}", format_value(val))?;
                    return Ok(());
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            writeln!(w, "{}: {}", key, format_value(val))?;
            return Ok(());
        }
    }

    writeln!(w, "{}", format_value(result_obj))?;
    Ok(())
}
