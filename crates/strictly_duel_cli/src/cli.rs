//! Command-line interface for strictly_duel.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use strictly_duel::{Difficulty, FirstPlayer, Mode};

/// Strictly Duel - place three tokens, then slide them into a line
#[derive(Parser, Debug)]
#[command(name = "strictly_duel")]
#[command(about = "Two-phase 3x3 duel against a friend or the computer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a match in the terminal
    Play {
        /// Who plays the second seat
        #[arg(short, long, value_enum, default_value = "pvp")]
        mode: ModeArg,

        /// Who moves first
        #[arg(short, long, value_enum, default_value = "human")]
        first: FirstArg,

        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the effective configuration as TOML
    Config {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Opponent selection
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    /// Two humans at one keyboard
    Pvp,
    /// Computer plays randomly but never misses a win or block
    Easy,
    /// Computer prefers center and corners
    Medium,
    /// Computer searches ahead
    Hard,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Pvp => Mode::HumanVsHuman,
            ModeArg::Easy => Mode::VsComputer(Difficulty::Easy),
            ModeArg::Medium => Mode::VsComputer(Difficulty::Medium),
            ModeArg::Hard => Mode::VsComputer(Difficulty::Hard),
        }
    }
}

/// Opening seat
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirstArg {
    /// Player X opens
    Human,
    /// Player O or the computer opens
    Computer,
}

impl From<FirstArg> for FirstPlayer {
    fn from(arg: FirstArg) -> Self {
        match arg {
            FirstArg::Human => FirstPlayer::Human,
            FirstArg::Computer => FirstPlayer::Opponent,
        }
    }
}
