//! Read-only catalogue of nasty strings keyed by placeholder token.
//!
//! Fixtures refer to adversarial inputs through tokens such as
//! `$NASTYSTRING3`. The catalogue maps each full token to its literal value
//! and is injected into [`crate::transform::ArgumentTransformer`] by
//! reference.
//!
//! # Examples
//!
//! ```
//! use steparg::catalogue::NastyCatalogue;
//!
//! let catalogue = NastyCatalogue::from_entries([(1, "'; DROP TABLE users; --")]);
//! assert_eq!(
//!     catalogue.lookup("$NASTYSTRING1").ok(),
//!     Some("'; DROP TABLE users; --")
//! );
//! assert!(catalogue.lookup("$NASTYSTRING2").is_err());
//! ```

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;

use crate::error::{Result, TransformError};

/// Literal prefix shared by every placeholder token.
pub const TOKEN_PREFIX: &str = "$NASTYSTRING";

/// Mapping from placeholder token to adversarial string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NastyCatalogue {
    entries: IndexMap<String, String>,
}

impl NastyCatalogue {
    /// Create an empty catalogue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Format the placeholder token for `index`.
    #[must_use]
    pub fn token(index: u32) -> String {
        format!("{TOKEN_PREFIX}{index}")
    }

    /// Build a catalogue from `(index, value)` pairs.
    ///
    /// Later pairs replace earlier ones with the same index.
    pub fn from_entries<I, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (u32, V)>,
        V: Into<String>,
    {
        let mut catalogue = Self::new();
        for (index, value) in entries {
            catalogue.insert(index, value);
        }
        catalogue
    }

    /// Register `value` under the token for `index`, returning any value it
    /// replaced.
    pub fn insert(&mut self, index: u32, value: impl Into<String>) -> Option<String> {
        self.entries.insert(Self::token(index), value.into())
    }

    /// Look up the string registered for the full placeholder `token`.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::UnknownNastyString`] when the token has no
    /// entry.
    pub fn lookup(&self, token: &str) -> Result<&str> {
        self.entries
            .get(token)
            .map(String::as_str)
            .ok_or_else(|| TransformError::UnknownNastyString {
                token: token.to_owned(),
            })
    }

    /// Number of registered entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalogue has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(token, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parse a catalogue from a JSON object.
    ///
    /// Keys may be full tokens (`"$NASTYSTRING3"`) or bare indices (`"3"`).
    /// Digits are kept as written, so `"03"` registers `$NASTYSTRING03` and
    /// not `$NASTYSTRING3`.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::CatalogueParse`] when the input is not a
    /// JSON object of strings, [`TransformError::InvalidCatalogueKey`] when a
    /// key has neither accepted form and
    /// [`TransformError::DuplicateCatalogueKey`] when two keys name the same
    /// token.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::parse_json(json, Utf8Path::new("<inline>"))
    }

    /// Load a catalogue from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::CatalogueRead`] when the file cannot be
    /// read, otherwise the same errors as [`Self::from_json_str`].
    pub fn from_path(path: &Utf8Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| TransformError::CatalogueRead {
            path: path.to_owned(),
            source,
        })?;
        let catalogue = Self::parse_json(&json, path)?;
        tracing::debug!(%path, entries = catalogue.len(), "loaded nasty string catalogue");
        Ok(catalogue)
    }

    fn parse_json(json: &str, origin: &Utf8Path) -> Result<Self> {
        let raw: IndexMap<String, String> =
            serde_json::from_str(json).map_err(|source| TransformError::CatalogueParse {
                path: Utf8PathBuf::from(origin),
                source,
            })?;
        let mut entries = IndexMap::with_capacity(raw.len());
        for (key, value) in raw {
            let token = token_for_key(&key)?;
            if entries.contains_key(&token) {
                return Err(TransformError::DuplicateCatalogueKey { token });
            }
            entries.insert(token, value);
        }
        Ok(Self { entries })
    }
}

/// Full token for a JSON key, keeping its digits exactly as written.
fn token_for_key(key: &str) -> Result<String> {
    let digits = key.strip_prefix(TOKEN_PREFIX).unwrap_or(key);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TransformError::InvalidCatalogueKey {
            key: key.to_owned(),
        });
    }
    Ok(format!("{TOKEN_PREFIX}{digits}"))
}
