use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use nutprims_codec::{CodecConfig, NutReader};

use crate::cmd::DecodeArgs;
use crate::exit::{codec_error, io_error, CliResult, SUCCESS};
use crate::layout::{decode_field, parse_layout};
use crate::output::{print_fields, DecodedField, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let layout = parse_layout(&args.layout)?;
    let source = open_input(&args.input)?;
    let config = CodecConfig {
        max_field_len: args.max_field_len,
    };
    let mut reader = NutReader::with_config(BufReader::new(source), config);

    let mut fields = Vec::new();
    loop {
        let pass_start = reader.position();
        for kind in &layout {
            let offset = reader.position();
            let value = decode_field(&mut reader, *kind).map_err(|err| {
                codec_error(&format!("decoding {kind} at offset {offset}"), err)
            })?;
            fields.push(DecodedField {
                offset,
                size: reader.position() - offset,
                kind: kind.to_string(),
                value,
            });
        }
        if !args.repeat || !more_data(&mut reader)? {
            break;
        }
        if reader.position() == pass_start {
            tracing::warn!(
                position = pass_start,
                "layout consumed no input, not repeating"
            );
            break;
        }
    }

    let trailing_data = more_data(&mut reader)?;
    if trailing_data {
        tracing::warn!(
            position = reader.position(),
            "input continues past the end of the layout"
        );
    }
    tracing::debug!(fields = fields.len(), position = reader.position(), "decoded");

    print_fields(&fields, reader.position(), trailing_data, format);
    Ok(SUCCESS)
}

fn open_input(path: &Path) -> CliResult<Box<dyn Read>> {
    if path == Path::new("-") {
        return Ok(Box::new(io::stdin().lock()));
    }
    let file = File::open(path)
        .map_err(|err| io_error(&format!("failed opening {}", path.display()), err))?;
    Ok(Box::new(file))
}

fn more_data<R: Read>(reader: &mut NutReader<R>) -> CliResult<bool> {
    let offset = reader.position();
    reader
        .has_more_data()
        .map_err(|err| codec_error(&format!("reading at offset {offset}"), err))
}
