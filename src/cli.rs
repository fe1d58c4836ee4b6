//! Command line interface definition using clap.
//!
//! This module defines the [`Cli`] structure and its subcommands. The build
//! script includes this file directly to render the manual page, so it only
//! depends on `clap`, `camino` and the standard library.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};

/// Preview the transformations a behaviour-driven test runner applies to
/// step arguments.
#[derive(Debug, Parser)]
#[command(name = "steparg", author, version, about, long_about = None)]
pub struct Cli {
    /// JSON file mapping nasty string tokens or indices to their values.
    #[arg(short, long, value_name = "FILE", global = true)]
    pub catalogue: Option<Utf8PathBuf>,

    /// Enable verbose logging output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Transformation to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available top-level commands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Route each argument through the standard transformation registry.
    Route {
        /// Raw step arguments, one result is printed per line.
        #[arg(required = true, value_name = "ARG")]
        arguments: Vec<String>,
    },

    /// Replace escaped quote delimiters in an argument.
    Unescape {
        /// Raw step argument.
        argument: String,
    },

    /// Replace nasty string placeholders in an argument.
    Nasty {
        /// Raw step argument.
        argument: String,
    },

    /// Transform every cell of a JSON table (an array of string arrays).
    Table {
        /// File holding the table; `-` reads standard input.
        #[arg(value_name = "FILE", default_value = "-")]
        file: Utf8PathBuf,
    },
}
