//! Command-line tool for checking and re-serializing JSON documents.
//!
//! Usage: wjson [OPTIONS] [FILE]
//!
//! Options:
//!   -o, --output <FILE>    Write output to specified file
//!   --check                Check if input is valid (exit 0 if valid, 1 if invalid)
//!   --plain                Write floats in plain decimal form
//!   --strict               Write non-finite floats as null
//!   --untrusted            Bound input size and nesting depth
//!   -h, --help             Print help
//!   -V, --version          Print version

use libwjson::{parse_source, to_json_with, Limits, NumberFormat, ReaderSource};
use std::fs;
use std::io::{self, BufRead, BufReader};
use std::process;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    let mut output_file: Option<&str> = None;
    let mut check_only = false;
    let mut format = NumberFormat::default();
    let mut limits = Limits::default();
    let mut input_path: Option<&str> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                return;
            }
            "-V" | "--version" => {
                println!("wjson {}", env!("CARGO_PKG_VERSION"));
                return;
            }
            "-o" | "--output" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --output requires an argument");
                    process::exit(1);
                }
                output_file = Some(&args[i]);
            }
            "--check" => {
                check_only = true;
            }
            "--plain" => {
                format = NumberFormat::Plain;
            }
            "--strict" => {
                format = NumberFormat::Strict;
            }
            "--untrusted" => {
                limits = Limits::untrusted();
            }
            "-" => {
                // Explicit stdin
            }
            arg if arg.starts_with('-') => {
                eprintln!("Error: Unknown option: {}", arg);
                process::exit(1);
            }
            path => {
                if input_path.is_some() {
                    eprintln!("Error: Multiple input paths not supported");
                    process::exit(1);
                }
                input_path = Some(path);
            }
        }
        i += 1;
    }

    if check_only && output_file.is_some() {
        eprintln!("Error: --check and --output are mutually exclusive");
        process::exit(1);
    }

    let reader: Box<dyn BufRead> = match input_path {
        Some(path) => match fs::File::open(path) {
            Ok(file) => Box::new(BufReader::new(file)),
            Err(e) => {
                eprintln!("Error reading {}: {}", path, e);
                process::exit(1);
            }
        },
        None => Box::new(BufReader::new(io::stdin())),
    };

    let label = input_path.unwrap_or("<stdin>");
    log::debug!("parsing {} with {:?}", label, limits);

    let value = match parse_source(ReaderSource::new(reader), limits) {
        Ok(value) => value,
        Err(e) => {
            eprintln!("{}: {}", label, e);
            process::exit(1);
        }
    };

    if check_only {
        println!("{}: ok", label);
        return;
    }

    let mut output = to_json_with(&value, format);
    output.push('\n');

    match output_file {
        Some(path) => {
            if let Err(e) = fs::write(path, &output) {
                eprintln!("Error writing {}: {}", path, e);
                process::exit(1);
            }
        }
        None => print!("{}", output),
    }
}

fn print_help() {
    println!(
        "wjson - JSON checking and re-serializing tool

USAGE:
    wjson [OPTIONS] [FILE]

ARGS:
    [FILE]    Input file (reads from stdin if not provided or '-')

OPTIONS:
    -o, --output <FILE>    Write output to specified file

    --check                Check if input is valid (exit 0 if valid, 1 if invalid)

    --plain                Write floats in plain decimal form (150.0 as 150).
                           Such floats read back as integers or decimals.

    --strict               Write NaN and Infinity as null, keeping the output
                           within standard JSON

    --untrusted            Reject input over 16Mi UTF-16 units or nested
                           deeper than 128 levels

    -h, --help             Print help

    -V, --version          Print version

EXAMPLES:
    # Compact a document
    wjson data.json

    # Validate a document
    wjson --check data.json

    # Read from stdin, write to a file
    cat data.json | wjson -o compact.json"
    );
}
