//! Terminal d20 roller.
//!
//! # Usage
//!
//! ```bash
//! # Interactive: Enter rolls, q quits
//! cargo run --features cli --bin d20
//!
//! # Roll three times and exit, reproducibly
//! cargo run --features cli --bin d20 -- --rolls 3 --seed 42
//!
//! # Custom texts and colours
//! cargo run --features cli --bin d20 -- --config d20.toml
//! ```

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use d20_core_view::render::render_screen;
use d20_core_view::{RenderConfig, RngDice, RollObserver, RollSequencer, RollState, RollerConfig, RollerDetails};

#[derive(Debug, Parser)]
#[command(name = "d20", about = "Roll a twenty-sided die in the terminal")]
struct Args {
    /// Roll this many times and exit instead of reading triggers from stdin
    #[arg(long)]
    rolls: Option<u32>,

    /// TOML file overriding messages, labels and colours
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for reproducible rolls
    #[arg(long)]
    seed: Option<u64>,

    /// Disable ANSI colours and in-place redraws
    #[arg(long)]
    plain: bool,

    /// Log every animation frame
    #[arg(short, long)]
    verbose: bool,
}

/// Redraws the roller line on every state change.
struct TerminalPresenter {
    render: RenderConfig,
    plain: bool,
}

impl RollObserver for TerminalPresenter {
    fn on_update(&self, state: &RollState) {
        let view = render_screen(state, &self.render);
        let mut out = std::io::stdout().lock();
        let written = if self.plain {
            writeln!(out, "{}", view.to_plain())
        } else if state.is_rolling() {
            write!(out, "\r\x1b[2K{}", view.to_ansi())
        } else {
            writeln!(out, "\r\x1b[2K{}", view.to_ansi())
        };
        if written.and_then(|_| out.flush()).is_err() {
            debug!("stdout closed, dropping frame");
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<RollerConfig> {
    let Some(path) = path else {
        return Ok(RollerConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let details = RollerDetails::from_toml_str(&text)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(details.resolve()?)
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "d20=debug,d20_core_view=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = load_config(args.config.as_ref())?;
    let source = match args.seed {
        Some(seed) => RngDice::seeded(seed),
        None => RngDice::from_os_rng(),
    };

    let sequencer = RollSequencer::with_parts(source, config.messages);
    info!(seed = ?args.seed, "session created");

    let presenter = TerminalPresenter {
        render: config.render,
        plain: args.plain,
    };
    println!("{} - {}", presenter.render.title, presenter.render.footer);
    presenter.on_update(&sequencer.state());
    sequencer.add_observer(presenter);
    info!("session ready");

    match args.rolls {
        Some(rolls) => {
            for _ in 0..rolls {
                sequencer.start_roll();
                sequencer.wait_idle().await;
            }
        }
        None => {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await? {
                if matches!(line.trim(), "q" | "quit") {
                    break;
                }
                if !sequencer.start_roll() {
                    info!("roll in progress, trigger ignored");
                }
            }
        }
    }

    drop(sequencer);
    info!("session torn down");
    Ok(())
}
