// SPDX-License-Identifier: MIT OR Apache-2.0
//! bealach CLI binary - dot-path queries over JSON documents and JSON lines

use anyhow::Context;
use bealach_cli::{OutputFormat, RenderOptions, Session};
use clap::Parser;
use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bealach")]
#[command(version, about, long_about = None)]
#[allow(clippy::struct_excessive_bools)]
struct Args {
    /// Input file, `-` for stdin
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Paths to look up
    #[arg(value_name = "PATH", required = true)]
    paths: Vec<String>,

    /// Print matched JSON text instead of the string view
    #[arg(short, long)]
    raw: bool,

    /// Query every line as a separate document
    #[arg(long)]
    jsonl: bool,

    /// Exit with status 1 when a path is missing
    #[arg(long)]
    require: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: &Args) -> anyhow::Result<()> {
    let input = read_input(&args.input)?;
    debug!(bytes = input.len(), paths = args.paths.len(), "input loaded");

    let options = RenderOptions {
        raw: args.raw,
        format: args.format,
    };
    let mut session = Session::new(&args.paths, options);
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if args.jsonl {
        session.run_lines(&input, &mut out)?;
    } else {
        session.run_document(&input, None, &mut out)?;
    }
    out.flush().context("failed to write output")?;

    if args.require {
        session.finish()?;
    }
    Ok(())
}

fn read_input(path: &Path) -> anyhow::Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut input = Vec::new();
        io::stdin()
            .read_to_end(&mut input)
            .context("failed to read stdin")?;
        Ok(input)
    } else {
        fs::read(path).with_context(|| format!("failed to read {}", path.display()))
    }
}
