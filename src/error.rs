//! Error types shared by the transformation, routing and catalogue modules.
//!
//! Every failure here indicates a broken fixture or a broken route
//! declaration. None of them is retried; callers abort the current step.

// Scoped suppression for version-dependent lint false positives from
// miette/thiserror derive macros.
// FIXME(rust-lang/rust#130021): remove once upstream is fixed.
#![allow(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    unused_assignments
)]

use camino::Utf8PathBuf;
use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while transforming step arguments.
#[derive(Debug, Error, Diagnostic)]
pub enum TransformError {
    /// A placeholder referenced a token absent from the catalogue.
    #[error("unknown nasty string placeholder `{token}`")]
    #[diagnostic(
        code(steparg::unknown_nasty_string),
        help("add the entry to the nasty string catalogue or fix the placeholder index")
    )]
    UnknownNastyString {
        /// The full placeholder token, e.g. `$NASTYSTRING99`.
        token: String,
    },

    /// A table row did not have the same number of cells as the first row.
    #[error("table row {row} has {found} cells, expected {expected}")]
    #[diagnostic(code(steparg::ragged_table))]
    RaggedTable {
        /// Zero-based index of the offending row.
        row: usize,
        /// Cell count of the first row.
        expected: usize,
        /// Cell count of the offending row.
        found: usize,
    },

    /// A route pattern failed to compile.
    #[error("invalid route pattern `{pattern}`")]
    #[diagnostic(code(steparg::invalid_pattern))]
    InvalidPattern {
        /// The pattern as supplied.
        pattern: String,
        /// Underlying compilation error.
        #[source]
        source: regex::Error,
    },

    /// A catalogue key was neither a placeholder token nor a bare index.
    #[error("invalid catalogue key `{key}`")]
    #[diagnostic(
        code(steparg::invalid_catalogue_key),
        help("use either `$NASTYSTRING<n>` or a bare index such as `3`")
    )]
    InvalidCatalogueKey {
        /// The rejected key.
        key: String,
    },

    /// Two catalogue keys resolved to the same placeholder token.
    #[error("duplicate catalogue entry for `{token}`")]
    #[diagnostic(
        code(steparg::duplicate_catalogue_key),
        help("`3` and `$NASTYSTRING3` name the same entry; keep only one of them")
    )]
    DuplicateCatalogueKey {
        /// The token both keys resolved to.
        token: String,
    },

    /// The catalogue file could not be read.
    #[error("failed to read catalogue {path}")]
    #[diagnostic(code(steparg::catalogue_read))]
    CatalogueRead {
        /// Path of the catalogue file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The catalogue file was not a JSON object of strings.
    #[error("failed to parse catalogue {path}")]
    #[diagnostic(code(steparg::catalogue_parse))]
    CatalogueParse {
        /// Path of the catalogue file, or `<inline>` for in-memory input.
        path: Utf8PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience alias for results carrying a [`TransformError`].
pub type Result<T, E = TransformError> = std::result::Result<T, E>;
