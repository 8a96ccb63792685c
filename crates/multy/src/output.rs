//! Output formatting: table, JSON, YAML.
//!
//! Router payloads are free-form JSON, so the table view flattens an object
//! into field/value rows; lists with a known shape get their own `Tabled`
//! row type in the command module.

use std::io::{self, Write};

use serde_json::Value;
use tabled::{Table, Tabled, settings::Style};

use crate::cli::OutputFormat;
use crate::error::CliError;

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Value")]
    value: String,
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of items in the chosen format, building table rows with
/// `to_row`.
pub fn render_list<'a, T, R>(
    format: OutputFormat,
    data: &'a [T],
    to_row: impl Fn(&'a T) -> R,
) -> Result<String, CliError>
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            Ok(render_table(&rows))
        }
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
    }
}

/// Render one router payload in the chosen format.
pub fn render_value(format: OutputFormat, data: &Value) -> Result<String, CliError> {
    match format {
        OutputFormat::Table => Ok(render_fields(data)),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

/// Render and print a payload in one step.
pub fn print_value(format: OutputFormat, data: &Value, quiet: bool) -> Result<(), CliError> {
    print_output(&render_value(format, data)?, quiet);
    Ok(())
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// One row per top-level field; nested values stay compact JSON.
fn render_fields(data: &Value) -> String {
    let rows: Vec<FieldRow> = match data {
        Value::Object(map) if !map.is_empty() => map
            .iter()
            .map(|(field, value)| FieldRow {
                field: field.clone(),
                value: scalar(value),
            })
            .collect(),
        Value::Object(_) | Value::Null => return String::new(),
        other => return scalar(other),
    };
    render_table(&rows)
}

/// Display form of a JSON value: strings unquoted, everything else as JSON.
pub fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> Result<String, CliError> {
    let out = if compact {
        serde_json::to_string(data)?
    } else {
        serde_json::to_string_pretty(data)?
    };
    Ok(out)
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    Ok(serde_yaml::to_string(data)?)
}
