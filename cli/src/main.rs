use std::error::Error;
use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use bracket_qs::DecodeOptions;
use clap::Parser;
use serde::Serialize;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bqs", version, about = "Nested query-string decoder/encoder")]
struct Args {
    /// Input file path (query string or .json). Omit or use '-' to read from stdin.
    input: Option<String>,

    /// Output file path (prints to stdout if omitted).
    #[arg(short, long, value_name = "file")]
    output: Option<String>,

    /// Force encode mode: JSON object in, query string out.
    #[arg(short = 'e', long, conflicts_with = "decode")]
    encode: bool,

    /// Force decode mode: query string in, JSON out.
    #[arg(short = 'd', long)]
    decode: bool,

    /// Keep single values as one-element lists when decoding.
    #[arg(long = "always-arrays", alias = "alwaysArrays")]
    always_arrays: bool,

    /// JSON indentation size for decoded output, 0 for compact (default: 2).
    #[arg(long, value_name = "number", default_value_t = 2)]
    indent: usize,

    /// Log decoding details to stderr.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Encode,
    Decode,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("ERROR  {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let input_path = args
        .input
        .as_deref()
        .filter(|path| *path != "-")
        .map(PathBuf::from);
    let input_text = match &input_path {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let input = input_text.trim_end_matches(['\n', '\r']);
    let mode = resolve_mode(&args, input, input_path.as_deref());
    tracing::debug!(?mode, ?input_path, bytes = input.len(), "resolved mode");

    let mut out = open_output(args.output.as_deref())?;
    match mode {
        Mode::Encode => {
            let value: Value = serde_json::from_str(input)?;
            let query = bracket_qs::to_string(&value)?;
            out.write_all(query.as_bytes())?;
        }
        Mode::Decode => {
            let options = DecodeOptions::new().with_always_arrays(args.always_arrays);
            let value = bracket_qs::decode_to_value_with_options(input, &options)?;
            write_json(&mut out, &value, args.indent)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    // A subscriber may already be installed when embedded; keep the existing one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .try_init();
}

/// Explicit flags win, then a `.json` input file, then a leading `{`.
fn resolve_mode(args: &Args, input: &str, input_path: Option<&Path>) -> Mode {
    if args.encode {
        return Mode::Encode;
    }
    if args.decode {
        return Mode::Decode;
    }
    let json_file = input_path
        .and_then(Path::extension)
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if json_file || input.trim_start().starts_with('{') {
        Mode::Encode
    } else {
        Mode::Decode
    }
}

fn open_output(path: Option<&str>) -> io::Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) if path != "-" => Box::new(BufWriter::new(fs::File::create(path)?)),
        _ => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

fn write_json(out: &mut dyn Write, value: &Value, indent: usize) -> serde_json::Result<()> {
    if indent == 0 {
        return serde_json::to_writer(out, value);
    }
    let indent = " ".repeat(indent);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    value.serialize(&mut serde_json::Serializer::with_formatter(out, formatter))
}
