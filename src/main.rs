use std::{
    fs,
    io::{self, Write},
};

use anyhow::{Context, Result, bail};
use clap::Parser;
use startrace::{descriptor::PatternDescriptor, pattern::Pattern};
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

/// startrace prints the strings generated by a pattern descriptor, one per
/// line, stepping the pattern like an odometer.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells startrace that CONTENTS is a path to a JSON descriptor file.
    #[arg(short, long)]
    file: bool,

    /// How many strings to print.
    #[arg(short, long, default_value_t = 1)]
    count: usize,

    /// Steps to move before the first string; negative steps move back.
    #[arg(short, long, default_value_t = 0, allow_hyphen_values = true)]
    shift: i64,

    /// Step backward instead of forward.
    #[arg(short, long)]
    reverse: bool,

    /// Print one full cycle of the pattern. Overrides --count.
    #[arg(short, long)]
    all: bool,

    /// Log what the library is doing to stderr.
    #[arg(short, long)]
    verbose: bool,

    /// A JSON pattern descriptor, or a path to one with --file.
    contents: String,
}

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder().with_max_level(level)
                                             .with_writer(io::stderr)
                                             .with_target(false)
                                             .compact()
                                             .finish();
    tracing::subscriber::set_global_default(subscriber).context("failed to install the log subscriber")
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose)?;

    let json = if args.file {
        fs::read_to_string(&args.contents).with_context(|| {
                                               format!("failed to read the descriptor file '{}'. \
                                                        Perhaps this file does not exist?",
                                                       args.contents)
                                           })?
    } else {
        args.contents.clone()
    };

    let descriptor = PatternDescriptor::from_json_str(&json).context("invalid pattern descriptor")?;
    let mut pattern = Pattern::from_descriptor(&descriptor).context("failed to build the pattern")?;

    let count = if args.all {
        let Some(positions) = pattern.positions() else {
            bail!("the pattern has too many positions to print them all");
        };
        usize::try_from(positions).context("the pattern has too many positions to print them all")?
    } else {
        args.count
    };
    debug!(count, shift = args.shift, reverse = args.reverse, "rendering");

    pattern.shift(args.shift);

    let mut out = io::stdout().lock();
    for _ in 0..count {
        let line = pattern.render().context("failed to render the pattern")?;
        writeln!(out, "{line}")?;
        if args.reverse {
            pattern.retreat();
        } else {
            pattern.advance();
        }
    }

    Ok(())
}
