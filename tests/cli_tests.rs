//! Integration tests for CLI execution using `assert_cmd`.
//!
//! These tests invoke the compiled binary and check what each subcommand
//! prints for a fixture catalogue.

use anyhow::{Context, Result};
use assert_cmd::Command;
use predicates::prelude::*;
use test_support::{TempInputs, fixture_catalogue, write_catalogue};

fn steparg() -> Result<Command> {
    Command::cargo_bin("steparg").context("locate steparg binary")
}

#[test]
fn unescape_prints_unescaped_argument() -> Result<()> {
    steparg()?
        .args(["unescape", r#"He said \"hi\""#])
        .assert()
        .success()
        .stdout("He said \"hi\"\n");
    Ok(())
}

#[test]
fn nasty_substitutes_from_catalogue_file() -> Result<()> {
    let inputs = TempInputs::new()?;
    let catalogue = write_catalogue(&inputs, &fixture_catalogue())?;
    steparg()?
        .args(["--catalogue", catalogue.as_str(), "nasty", "x $NASTYSTRING1"])
        .assert()
        .success()
        .stdout("x '; DROP TABLE users; --\n");
    Ok(())
}

#[test]
fn nasty_without_catalogue_fails() -> Result<()> {
    steparg()?
        .args(["nasty", "$NASTYSTRING1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("$NASTYSTRING1"));
    Ok(())
}

#[test]
fn failures_show_diagnostic_code_and_help() -> Result<()> {
    steparg()?
        .args(["nasty", "$NASTYSTRING1"])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("steparg::unknown_nasty_string")
                .and(predicate::str::contains("add the entry to the nasty string catalogue")),
        );
    Ok(())
}

#[test]
fn nasty_resolves_leading_zero_tokens_as_written() -> Result<()> {
    let inputs = TempInputs::new()?;
    let catalogue = inputs.write("zeros.json", r#"{"$NASTYSTRING01": "zero-one"}"#)?;
    steparg()?
        .args(["--catalogue", catalogue.as_str(), "nasty", "$NASTYSTRING01"])
        .assert()
        .success()
        .stdout("zero-one\n");
    steparg()?
        .args(["--catalogue", catalogue.as_str(), "nasty", "$NASTYSTRING1"])
        .assert()
        .failure();
    Ok(())
}

#[test]
fn route_prints_one_line_per_argument() -> Result<()> {
    let inputs = TempInputs::new()?;
    let catalogue = write_catalogue(&inputs, &fixture_catalogue())?;
    steparg()?
        .args([
            "route",
            "--catalogue",
            catalogue.as_str(),
            r#"\"quoted\""#,
            "$NASTYSTRING2",
            "plain",
        ])
        .assert()
        .success()
        .stdout("\"quoted\"\n<script>\nplain\n");
    Ok(())
}

#[test]
fn table_reads_json_from_stdin() -> Result<()> {
    let inputs = TempInputs::new()?;
    let catalogue = write_catalogue(&inputs, &fixture_catalogue())?;
    steparg()?
        .args(["--catalogue", catalogue.as_str(), "table"])
        .write_stdin(r#"[["a","b"],["say \\\"hi\\\"","$NASTYSTRING2"]]"#)
        .assert()
        .success()
        .stdout("[[\"a\",\"b\"],[\"say \\\"hi\\\"\",\"<script>\"]]\n");
    Ok(())
}

#[test]
fn table_rejects_ragged_rows() -> Result<()> {
    let inputs = TempInputs::new()?;
    let table = inputs.write("ragged.json", r#"[["a","b"],["c"]]"#)?;
    steparg()?
        .args(["table", table.as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse table"));
    Ok(())
}
