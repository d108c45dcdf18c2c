//! Print-ready HTML document for a calculator report.
//!
//! Open the file in a browser and print it to get a PDF of the report.

use std::io::Write;

use chit_calc_core::{Report, ReportField};

use crate::commands::CommandOutput;

const STYLE: &str = "body{font-family:Arial,sans-serif;margin:20px;color:#333}\
h1{color:#2c5282;border-bottom:2px solid #2c5282;padding-bottom:8px}\
table{width:100%;border-collapse:collapse;margin:16px 0}\
th,td{border:1px solid #ddd;padding:8px;text-align:left}\
th{background:#2c5282;color:#fff}\
tr:nth-child(even){background:#f7fafc}\
.warnings{color:#9b2c2c}\
@media print{body{margin:0}}";

pub fn write_html(output: &CommandOutput, w: &mut dyn Write) -> Result<(), Box<dyn std::error::Error>> {
    let report = output
        .report
        .as_ref()
        .ok_or("html output is only available for calculator reports")?;
    w.write_all(render(report).as_bytes())?;
    Ok(())
}

fn render(report: &Report) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape(&report.title)));
    html.push_str(&format!("<style>{STYLE}</style>\n</head>\n<body>\n"));
    html.push_str(&format!("<h1>{}</h1>\n", escape(&report.title)));

    html.push_str("<h2>Input Details</h2>\n");
    push_fields(&mut html, &report.inputs);
    html.push_str("<h2>Results</h2>\n");
    push_fields(&mut html, &report.results);

    if let Some(table) = &report.table {
        html.push_str("<table>\n<tr>");
        for header in &table.headers {
            html.push_str(&format!("<th>{}</th>", escape(header)));
        }
        html.push_str("</tr>\n");
        for row in &table.rows {
            html.push_str("<tr>");
            for cell in row {
                html.push_str(&format!("<td>{}</td>", escape(cell)));
            }
            html.push_str("</tr>\n");
        }
        html.push_str("</table>\n");
    }

    if !report.warnings.is_empty() {
        html.push_str("<ul class=\"warnings\">\n");
        for warning in &report.warnings {
            html.push_str(&format!("<li>{}</li>\n", escape(warning)));
        }
        html.push_str("</ul>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn push_fields(html: &mut String, fields: &[ReportField]) {
    html.push_str("<table>\n");
    for field in fields {
        html.push_str(&format!(
            "<tr><th>{}</th><td>{}</td></tr>\n",
            escape(&field.label),
            escape(&field.value)
        ));
    }
    html.push_str("</table>\n");
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
