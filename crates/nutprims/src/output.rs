use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use serde_json::Value;

const PREVIEW_LIMIT: usize = 64;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// One decoded field and where it sat in the stream.
#[derive(Debug, Serialize)]
pub struct DecodedField {
    pub offset: u64,
    pub size: u64,
    pub kind: String,
    pub value: Value,
}

#[derive(Serialize)]
struct DecodeOutput<'a> {
    fields: &'a [DecodedField],
    position: u64,
    trailing_data: bool,
}

pub fn print_fields(
    fields: &[DecodedField],
    position: u64,
    trailing_data: bool,
    format: OutputFormat,
) {
    match format {
        OutputFormat::Json => {
            let out = DecodeOutput {
                fields,
                position,
                trailing_data,
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["OFFSET", "SIZE", "KIND", "VALUE"]);
            for field in fields {
                table.add_row(vec![
                    field.offset.to_string(),
                    field.size.to_string(),
                    field.kind.clone(),
                    value_preview(&field.value),
                ]);
            }
            println!("{table}");
            println!("position: {position}");
        }
        OutputFormat::Pretty => {
            for field in fields {
                println!(
                    "offset={} size={} kind={} value={}",
                    field.offset,
                    field.size,
                    field.kind,
                    value_preview(&field.value)
                );
            }
            println!("position={position} trailing_data={trailing_data}");
        }
    }
}

fn value_preview(value: &Value) -> String {
    let text = match value {
        Value::String(text) => text.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    };
    if text.chars().count() <= PREVIEW_LIMIT {
        return text;
    }
    let head: String = text.chars().take(PREVIEW_LIMIT).collect();
    format!("{head}...")
}
