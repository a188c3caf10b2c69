//! `bjson` CLI: validate and re-serialize bjson documents from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Re-serialize compactly (stdin → stdout)
//! echo "{ 'name': 'Alice', 'scores': [95, 87] }" | bjson fmt
//!
//! # From file to file, with JSON escapes in strings
//! bjson fmt --escaped -i data.bjson -o data.min.bjson
//!
//! # Validate; prints the top-level kind or the error position
//! bjson check -i data.bjson
//!
//! # Re-emit as strict JSON (serde_json escaping), optionally pretty-printed
//! bjson json --pretty -i data.bjson
//! ```

use anyhow::{Context, Result};
use bjson_core::{Options, StringMode, Value};
use clap::{Args, Parser, Subcommand};
use std::io::{self, Read, Write};

#[derive(Parser)]
#[command(
    name = "bjson",
    version,
    about = "Validate and re-serialize JSON documents with BSON-style extensions"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and write back in compact form
    Fmt {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        #[command(flatten)]
        parse: ParseArgs,
    },
    /// Parse and report whether the input is well formed
    Check {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        #[command(flatten)]
        parse: ParseArgs,
    },
    /// Parse and write as strict JSON
    Json {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Indent the output
        #[arg(long)]
        pretty: bool,
        #[command(flatten)]
        parse: ParseArgs,
    },
}

#[derive(Args)]
struct ParseArgs {
    /// Decode and emit JSON escape sequences in strings
    #[arg(long)]
    escaped: bool,
    /// Maximum array/object nesting
    #[arg(long, default_value_t = Options::DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

impl ParseArgs {
    fn options(&self) -> Options {
        let strings = if self.escaped {
            StringMode::Escaped
        } else {
            StringMode::Legacy
        };
        Options::new()
            .with_strings(strings)
            .with_max_depth(self.max_depth)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fmt {
            input,
            output,
            parse,
        } => {
            let options = parse.options();
            let value = read_value(input.as_deref(), options)?;
            let text = bjson_core::to_vec_with(&value, options)
                .context("Failed to serialize document")?;
            write_output(output.as_deref(), &text)?;
        }
        Commands::Check { input, parse } => {
            let value = read_value(input.as_deref(), parse.options())?;
            println!("ok: {}", value.tag());
        }
        Commands::Json {
            input,
            output,
            pretty,
            parse,
        } => {
            let value = read_value(input.as_deref(), parse.options())?;
            let json = if pretty {
                serde_json::to_string_pretty(&value)
            } else {
                serde_json::to_string(&value)
            }
            .context("Failed to convert document to JSON")?;
            write_output(output.as_deref(), json.as_bytes())?;
        }
    }

    Ok(())
}

fn read_value(path: Option<&str>, options: Options) -> Result<Value> {
    let bytes = read_input(path)?;
    let source = path.unwrap_or("<stdin>");
    bjson_core::from_reader_with(bytes.as_slice(), options)
        .with_context(|| format!("Failed to parse {}", source))
}

fn read_input(path: Option<&str>) -> Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path).with_context(|| format!("Failed to read file: {}", path)),
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(content)
                .and_then(|()| stdout.flush())
                .context("Failed to write to stdout")?;
        }
    }
    Ok(())
}
