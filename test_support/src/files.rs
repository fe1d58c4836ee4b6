//! Temporary JSON inputs for CLI tests.

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use steparg::NastyCatalogue;
use tempfile::TempDir;

/// Temporary directory holding JSON inputs; removed on drop.
#[derive(Debug)]
pub struct TempInputs {
    dir: TempDir,
}

impl TempInputs {
    /// Create an empty temporary directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new() -> Result<Self> {
        let dir = TempDir::new().context("create temp dir for JSON inputs")?;
        Ok(Self { dir })
    }

    /// Path of the directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary path is not valid UTF-8.
    pub fn root(&self) -> Result<&Utf8Path> {
        Utf8Path::from_path(self.dir.path()).context("temp dir path is not UTF-8")
    }

    /// Write `contents` to `name` inside the directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write(&self, name: &str, contents: &str) -> Result<Utf8PathBuf> {
        let path = self.root()?.join(name);
        fs::write(&path, contents).with_context(|| format!("write {path}"))?;
        Ok(path)
    }
}

/// Serialise `catalogue` as a JSON object keyed by full token and write it
/// to `catalogue.json` inside `inputs`.
///
/// # Errors
///
/// Returns an error if serialisation or writing fails.
pub fn write_catalogue(inputs: &TempInputs, catalogue: &NastyCatalogue) -> Result<Utf8PathBuf> {
    let object: serde_json::Map<String, serde_json::Value> = catalogue
        .iter()
        .map(|(token, value)| (token.to_owned(), serde_json::Value::from(value)))
        .collect();
    let json = serde_json::to_string(&object).context("serialise catalogue")?;
    inputs.write("catalogue.json", &json)
}
