use anyhow::Context;
use serde_json::{json, Value};
use std::io::Read;

use crate::cli::OutputFormat;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let Some(data_value) = data {
                response["data"] = data_value;
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output a single document: JSON as is, text as indented key/value lines
pub fn output_item(output_format: OutputFormat, item: &Value) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(item)?),
        OutputFormat::Text => print_text(item, 0),
    }
    Ok(())
}

/// Output a collection; `render` turns one element into a text row
pub fn output_rows<F>(
    output_format: OutputFormat,
    rows: &Value,
    empty_message: &str,
    render: F,
) -> anyhow::Result<()>
where
    F: Fn(&Value) -> String,
{
    let items = rows.as_array().map(Vec::as_slice).unwrap_or_default();
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(rows)?),
        OutputFormat::Text if items.is_empty() => println!("{}", empty_message),
        OutputFormat::Text => {
            for item in items {
                println!("{}", render(item));
            }
        }
    }
    Ok(())
}

fn print_text(value: &Value, depth: usize) {
    let pad = "  ".repeat(depth);
    match value {
        Value::Object(map) => {
            for (key, v) in map {
                if v.is_object() || v.is_array() {
                    println!("{}{}:", pad, key);
                    print_text(v, depth + 1);
                } else {
                    println!("{}{}: {}", pad, key, scalar(v));
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                if item.is_object() {
                    println!("{}-", pad);
                    print_text(item, depth + 1);
                } else {
                    println!("{}- {}", pad, scalar(item));
                }
            }
        }
        other => println!("{}{}", pad, scalar(other)),
    }
}

/// Render a scalar without JSON quoting
pub fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Parse a JSON argument. `-` reads stdin, `@path` reads a file.
pub fn read_json_arg(raw: &str) -> anyhow::Result<Value> {
    let text = if raw == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else if let Some(path) = raw.strip_prefix('@') {
        std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path))?
    } else {
        raw.to_string()
    };

    serde_json::from_str(&text).context("argument is not valid JSON")
}
