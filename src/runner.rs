//! CLI execution and command dispatch logic.
//!
//! This module keeps `main` minimal by providing a single entry point that
//! loads the catalogue, runs the requested transformation and writes the
//! result to standard output.

use std::fs;
use std::io::{self, Read, Write};

use anyhow::{Context, Result};
use camino::Utf8Path;
use miette::{GraphicalReportHandler, GraphicalTheme};
use tracing::debug;

use crate::catalogue::NastyCatalogue;
use crate::cli::{Cli, Commands};
use crate::error::TransformError;
use crate::routing::{StepArgument, TransformRegistry};
use crate::table::StepTable;
use crate::transform::ArgumentTransformer;

/// Return `true` when `path` is the CLI sentinel for standard input.
#[must_use]
pub fn is_stdin_path(path: &Utf8Path) -> bool {
    path.as_str() == "-"
}

/// Execute the parsed [`Cli`] command.
///
/// # Errors
///
/// Returns an error if the catalogue or table cannot be loaded, a
/// transformation fails, or output cannot be written.
pub fn run(cli: &Cli) -> Result<()> {
    let catalogue = load_catalogue(cli.catalogue.as_deref())?;
    let transformer = ArgumentTransformer::new(&catalogue);
    let output = match &cli.command {
        Commands::Route { arguments } => route_all(&transformer, arguments)?,
        Commands::Unescape { argument } => transformer.arg_replace_slashes(argument),
        Commands::Nasty { argument } => transformer
            .arg_replace_nasty_strings(argument)
            .context("failed to substitute nasty strings")?,
        Commands::Table { file } => {
            let table = read_table(file)?;
            let transformed = transformer
                .transform_table(&table)
                .context("failed to transform table")?;
            serde_json::to_string(&transformed).context("failed to serialise table")?
        }
    };
    write_stdout(&output)
}

/// Render a failure from [`run`] for the terminal.
///
/// Context added while running leads the output. A [`TransformError`] in the
/// chain is then drawn by miette with its diagnostic code and help text.
#[must_use]
pub fn render_error(err: &anyhow::Error) -> String {
    let Some(diagnostic) = err.downcast_ref::<TransformError>() else {
        return format!("{err:#}");
    };
    let mut report = String::new();
    let handler =
        GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor()).with_links(false);
    if handler.render_report(&mut report, diagnostic).is_err() {
        return format!("{err:#}");
    }
    let context: Vec<String> = err
        .chain()
        .take_while(|cause| !cause.is::<TransformError>())
        .map(ToString::to_string)
        .collect();
    if context.is_empty() {
        report
    } else {
        format!("{}\n{report}", context.join(": "))
    }
}

fn load_catalogue(path: Option<&Utf8Path>) -> Result<NastyCatalogue> {
    let Some(catalogue_path) = path else {
        debug!("no catalogue supplied; placeholders will fail to resolve");
        return Ok(NastyCatalogue::new());
    };
    Ok(NastyCatalogue::from_path(catalogue_path)?)
}

fn route_all(transformer: &ArgumentTransformer<'_>, arguments: &[String]) -> Result<String> {
    let registry = TransformRegistry::standard();
    let mut lines = Vec::with_capacity(arguments.len());
    for raw in arguments {
        let routed = registry
            .transform(transformer, StepArgument::from(raw.as_str()))
            .with_context(|| format!("failed to transform argument {raw:?}"))?;
        let line = match routed {
            StepArgument::Text(text) => text,
            StepArgument::Table(table) => {
                serde_json::to_string(&table).context("failed to serialise table")?
            }
        };
        lines.push(line);
    }
    Ok(lines.join("\n"))
}

fn read_table(path: &Utf8Path) -> Result<StepTable> {
    let json = if is_stdin_path(path) {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read table from standard input")?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read table {path}"))?
    };
    serde_json::from_str(&json).with_context(|| format!("failed to parse table {path}"))
}

fn write_stdout(content: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    ignore_broken_pipe(writeln!(stdout, "{content}")).context("failed to write to stdout")?;
    ignore_broken_pipe(stdout.flush()).context("failed to flush stdout")?;
    Ok(())
}

fn ignore_broken_pipe(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
