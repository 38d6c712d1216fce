//! Terminal front end for the input engine.
//!
//! # Usage
//!
//! ```bash
//! # Replay presses given on the command line
//! calc-input 2 + 3 = '*' 4 =
//!
//! # Interactive: one or more whitespace-separated keys per line
//! calc-input
//!
//! # Show the keypad
//! calc-input --list-keys
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use calc_input::catalog::default_catalog_path;
use calc_input::view::render_keypad;
use calc_input::{ButtonCatalog, DisplayLines, InputEngine};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Calculator keypad driven from the terminal
#[derive(Parser, Debug)]
#[command(name = "calc-input")]
#[command(about = "Feed calculator button presses and print the displays")]
#[command(version)]
struct Args {
    /// Keys to press in order; reads stdin when omitted
    keys: Vec<String>,

    /// Button catalog (TOML); defaults to the user config file, then the built-in keypad
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Print the engine snapshot as JSON instead of display lines
    #[arg(long)]
    json: bool,

    /// Print the keypad and exit
    #[arg(long)]
    list_keys: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    let catalog =
        ButtonCatalog::load_or_default(args.catalog.as_deref(), default_catalog_path())
            .context("failed to load button catalog")?;
    let mut stdout = io::stdout().lock();

    if args.list_keys {
        writeln!(stdout, "{}", render_keypad(&catalog))?;
        return Ok(());
    }

    let mut engine = InputEngine::with_catalog(catalog);

    if !args.keys.is_empty() {
        engine.handle_presses(args.keys.iter().map(String::as_str));
        return print_state(&mut stdout, &engine, args.json);
    }

    print_state(&mut stdout, &engine, args.json)?;
    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        engine.handle_presses(line.split_whitespace());
        print_state(&mut stdout, &engine, args.json)?;
    }

    Ok(())
}

fn print_state(out: &mut impl Write, engine: &InputEngine, json: bool) -> Result<()> {
    if json {
        let text = serde_json::to_string(engine.snapshot()).context("failed to encode snapshot")?;
        writeln!(out, "{text}")?;
    } else {
        writeln!(out, "{}", DisplayLines::from_state(engine.snapshot()).render())?;
    }
    out.flush()?;
    Ok(())
}
