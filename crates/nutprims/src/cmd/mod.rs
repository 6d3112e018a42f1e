use clap::{Args, Subcommand};
use std::path::PathBuf;

use nutprims_codec::DEFAULT_MAX_FIELD_LEN;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod decode;
pub mod encode;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode a primitive stream according to a field layout.
    Decode(DecodeArgs),
    /// Encode JSON values into a primitive stream.
    Encode(EncodeArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Decode(args) => decode::run(args, format),
        Command::Encode(args) => encode::run(args),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Input file, or '-' for stdin.
    pub input: PathBuf,
    /// Comma-separated field kinds (v,s,i64,i32,u8,raw:N,vbytes,cstr,vstr,ts:N,skip:N,crc).
    #[arg(long, short = 'l')]
    pub layout: String,
    /// Apply the layout repeatedly until the input is exhausted.
    #[arg(long)]
    pub repeat: bool,
    /// Maximum size of a length-delimited field in bytes.
    #[arg(long, env = "NUTPRIMS_MAX_FIELD_LEN", default_value_t = DEFAULT_MAX_FIELD_LEN)]
    pub max_field_len: usize,
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Comma-separated field kinds, one per value.
    #[arg(long, short = 'l')]
    pub layout: String,
    /// JSON array of values, one per layout field.
    #[arg(long, conflicts_with = "values_file")]
    pub values: Option<String>,
    /// Read the JSON array of values from a file.
    #[arg(long, conflicts_with = "values")]
    pub values_file: Option<PathBuf>,
    /// Output file. Default: stdout.
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
    /// Maximum size of a length-delimited field in bytes.
    #[arg(long, env = "NUTPRIMS_MAX_FIELD_LEN", default_value_t = DEFAULT_MAX_FIELD_LEN)]
    pub max_field_len: usize,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
