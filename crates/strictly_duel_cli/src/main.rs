//! Strictly Duel - terminal driver
//!
//! Plays matches on stdin/stdout against a friend or the computer.

#![warn(missing_docs)]

mod cli;
mod input;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use input::Input;
use std::io::Write;
use std::path::PathBuf;
use strictly_duel::{DuelConfig, DuelEvent, DuelSession, FirstPlayer, Mode};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so the board on stdout stays readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            mode,
            first,
            config,
        } => run_play(load_config(config)?, mode.into(), first.into()).await,
        Command::Config { config } => {
            print!("{}", load_config(config)?.to_toml()?);
            Ok(())
        }
    }
}

fn load_config(path: Option<PathBuf>) -> Result<DuelConfig> {
    match path {
        Some(path) => DuelConfig::from_file(&path)
            .with_context(|| format!("Loading {}", path.display())),
        None => Ok(DuelConfig::default()),
    }
}

/// Runs the interactive play loop until quit or end of input.
#[instrument(skip(config))]
async fn run_play(config: DuelConfig, mode: Mode, first: FirstPlayer) -> Result<()> {
    info!("Starting play loop");
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let mut session = DuelSession::new(config).with_events(event_tx);
    session.start_match(mode, first);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("{}", input::HELP);

    loop {
        while let Some(ticket) = session.pending_computer_turn() {
            show(&session, &mut event_rx);
            ticket.wait().await;
            session.resolve_computer_turn(ticket);
        }
        show(&session, &mut event_rx);
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            debug!("End of input");
            break;
        };

        let command = match input::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        // Rejections are also sent as events and rendered from there
        let result = match command {
            Input::Cell(pos) => session.act_on(pos),
            Input::Place(pos) => session.place_at(pos),
            Input::Select(pos) => session.select_cell(pos),
            Input::Move(pos) => session.move_selected_to(pos),
            Input::Undo => {
                if !session.undo() {
                    println!("Nothing to undo");
                }
                Ok(())
            }
            Input::Reset => {
                session.reset();
                Ok(())
            }
            Input::Mute => {
                let muted = !session.is_muted();
                session.set_muted(muted);
                println!("Sound {}", if muted { "off" } else { "on" });
                Ok(())
            }
            Input::Help => {
                println!("{}", input::HELP);
                Ok(())
            }
            Input::Quit => break,
        };
        if let Err(rejection) = result {
            debug!(%rejection, "Command rejected");
        }
    }

    info!("Play loop finished");
    Ok(())
}

/// Prints pending events, then the board and status.
fn show(session: &DuelSession, events: &mut mpsc::UnboundedReceiver<DuelEvent>) {
    while let Ok(event) = events.try_recv() {
        if let Some(line) = render::event(&event) {
            println!("{line}");
        }
    }
    let snapshot = session.snapshot();
    println!();
    println!("{}", render::board(&snapshot));
    println!("{}", render::status(&snapshot));
}
