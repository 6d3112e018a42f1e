use std::fs::{self, File};
use std::io::{self, BufWriter, Write};

use nutprims_codec::{CodecConfig, NutWriter};
use serde_json::Value;

use crate::cmd::EncodeArgs;
use crate::exit::{codec_error, io_error, CliError, CliResult, SUCCESS, USAGE};
use crate::layout::{encode_field, parse_layout};

pub fn run(args: EncodeArgs) -> CliResult<i32> {
    let layout = parse_layout(&args.layout)?;
    let values = resolve_values(&args)?;
    if values.len() != layout.len() {
        return Err(CliError::new(
            USAGE,
            format!(
                "layout has {} fields but {} values were given",
                layout.len(),
                values.len()
            ),
        ));
    }

    let sink: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(File::create(path).map_err(|err| {
            io_error(&format!("failed creating {}", path.display()), err)
        })?),
        None => Box::new(io::stdout().lock()),
    };
    let config = CodecConfig {
        max_field_len: args.max_field_len,
    };
    let mut writer = NutWriter::with_config(BufWriter::new(sink), config);

    for (kind, value) in layout.iter().zip(&values) {
        encode_field(&mut writer, *kind, value)?;
    }
    writer
        .flush()
        .map_err(|err| codec_error("flushing output", err))?;

    tracing::info!(
        bytes = writer.position(),
        fields = layout.len(),
        "encoded primitive stream"
    );
    Ok(SUCCESS)
}

fn resolve_values(args: &EncodeArgs) -> CliResult<Vec<Value>> {
    let text = match (&args.values, &args.values_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => fs::read_to_string(path).map_err(|err| {
            io_error(&format!("failed reading {}", path.display()), err)
        })?,
        (None, None) => {
            return Err(CliError::new(USAGE, "one of --values or --values-file is required"));
        }
    };

    match serde_json::from_str::<Value>(&text) {
        Ok(Value::Array(values)) => Ok(values),
        Ok(_) => Err(CliError::new(USAGE, "values must be a JSON array")),
        Err(err) => Err(CliError::new(USAGE, format!("values are not valid JSON: {err}"))),
    }
}
