//! Pattern-based routing of step arguments to transformations.
//!
//! A [`TransformRegistry`] holds an ordered list of [`TransformRoute`]s. Each
//! route pairs a [`TransformKind`] with a regular expression over the raw
//! argument text. The first route whose kind accepts the argument and whose
//! pattern matches wins; unmatched arguments pass through untouched.
//!
//! The standard registry declares, in order:
//!
//! 1. quote unescaping for text containing a `"`,
//! 2. placeholder substitution for text containing `$NASTYSTRING<n>`,
//! 3. the table pipeline for tables, matched against `table:<header,...>`.

use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, TransformError};
use crate::table::StepTable;
use crate::transform::ArgumentTransformer;

/// Route pattern for text containing a double quote.
pub const QUOTE_ROUTE_PATTERN: &str = r#"(?s)^((.*)"(.*))$"#;

/// Route pattern for text containing a nasty string placeholder.
pub const NASTY_ROUTE_PATTERN: &str = r"(?s)^((.*)\$NASTYSTRING([0-9]+)(.*))$";

/// Route pattern for table arguments.
pub const TABLE_ROUTE_PATTERN: &str = r"(?s)^table:(.*)";

#[expect(clippy::expect_used, reason = "standard patterns are valid literals")]
static STANDARD_ROUTES: LazyLock<Vec<TransformRoute>> = LazyLock::new(|| {
    [
        (TransformKind::UnescapeQuotes, QUOTE_ROUTE_PATTERN),
        (TransformKind::NastyStrings, NASTY_ROUTE_PATTERN),
        (TransformKind::Table, TABLE_ROUTE_PATTERN),
    ]
    .into_iter()
    .map(|(kind, pattern)| {
        TransformRoute::new(kind, pattern).expect("standard route pattern compiles")
    })
    .collect()
});

/// A step argument as handed over by the runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepArgument {
    /// Text captured from the step sentence.
    Text(String),
    /// Table attached to the step.
    Table(StepTable),
}

impl StepArgument {
    /// Text that route patterns are matched against.
    #[must_use]
    pub fn routing_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(text) => Cow::Borrowed(text),
            Self::Table(table) => Cow::Owned(table.routing_text()),
        }
    }

    /// The text value, if this is a text argument.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Table(_) => None,
        }
    }

    /// The table value, if this is a table argument.
    #[must_use]
    pub const fn as_table(&self) -> Option<&StepTable> {
        match self {
            Self::Table(table) => Some(table),
            Self::Text(_) => None,
        }
    }
}

impl From<String> for StepArgument {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for StepArgument {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<StepTable> for StepArgument {
    fn from(table: StepTable) -> Self {
        Self::Table(table)
    }
}

/// Transformation a route dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformKind {
    /// [`ArgumentTransformer::arg_replace_slashes`].
    UnescapeQuotes,
    /// [`ArgumentTransformer::arg_replace_nasty_strings`].
    NastyStrings,
    /// [`ArgumentTransformer::transform_table`].
    Table,
}

impl TransformKind {
    const fn accepts(self, argument: &StepArgument) -> bool {
        matches!(
            (self, argument),
            (Self::Table, StepArgument::Table(_))
                | (Self::UnescapeQuotes | Self::NastyStrings, StepArgument::Text(_))
        )
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::UnescapeQuotes => "unescape-quotes",
            Self::NastyStrings => "nasty-strings",
            Self::Table => "table",
        })
    }
}

/// A transformation paired with the pattern that selects it.
#[derive(Debug, Clone)]
pub struct TransformRoute {
    kind: TransformKind,
    pattern: Regex,
}

impl TransformRoute {
    /// Compile a route for `kind` selected by `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::InvalidPattern`] when `pattern` does not
    /// compile.
    pub fn new(kind: TransformKind, pattern: &str) -> Result<Self> {
        let compiled = Regex::new(pattern).map_err(|source| TransformError::InvalidPattern {
            pattern: pattern.to_owned(),
            source,
        })?;
        Ok(Self {
            kind,
            pattern: compiled,
        })
    }

    /// The transformation this route applies.
    #[must_use]
    pub const fn kind(&self) -> TransformKind {
        self.kind
    }

    /// The pattern source text.
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Whether this route applies to `argument`.
    #[must_use]
    pub fn matches(&self, argument: &StepArgument) -> bool {
        self.kind.accepts(argument) && self.pattern.is_match(&argument.routing_text())
    }

    /// Apply this route's transformation to `argument`.
    ///
    /// Arguments of the wrong shape for the route are returned unchanged.
    ///
    /// # Errors
    ///
    /// Fails when a placeholder has no catalogue entry.
    pub fn apply(
        &self,
        transformer: &ArgumentTransformer<'_>,
        argument: StepArgument,
    ) -> Result<StepArgument> {
        Ok(match (self.kind, argument) {
            (TransformKind::UnescapeQuotes, StepArgument::Text(text)) => {
                StepArgument::Text(transformer.arg_replace_slashes(&text))
            }
            (TransformKind::NastyStrings, StepArgument::Text(text)) => {
                StepArgument::Text(transformer.arg_replace_nasty_strings(&text)?)
            }
            (TransformKind::Table, StepArgument::Table(table)) => {
                StepArgument::Table(transformer.transform_table(&table)?)
            }
            (_, other) => other,
        })
    }
}

/// Ordered collection of routes; first match wins.
#[derive(Debug, Clone)]
pub struct TransformRegistry {
    routes: Vec<TransformRoute>,
}

impl Default for TransformRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl TransformRegistry {
    /// Registry with the three standard routes.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            routes: STANDARD_ROUTES.clone(),
        }
    }

    /// Registry with no routes.
    #[must_use]
    pub const fn empty() -> Self {
        Self { routes: Vec::new() }
    }

    /// Append `route` after the existing routes.
    pub fn push(&mut self, route: TransformRoute) {
        self.routes.push(route);
    }

    /// Builder form of [`Self::push`].
    #[must_use]
    pub fn with_route(mut self, route: TransformRoute) -> Self {
        self.push(route);
        self
    }

    /// Routes in evaluation order.
    #[must_use]
    pub fn routes(&self) -> &[TransformRoute] {
        &self.routes
    }

    /// First route matching `argument`.
    #[must_use]
    pub fn route_for(&self, argument: &StepArgument) -> Option<&TransformRoute> {
        self.routes.iter().find(|route| route.matches(argument))
    }

    /// Transform `argument` through the first matching route.
    ///
    /// # Errors
    ///
    /// Fails when the selected transformation fails.
    pub fn transform(
        &self,
        transformer: &ArgumentTransformer<'_>,
        argument: StepArgument,
    ) -> Result<StepArgument> {
        let Some(route) = self.route_for(&argument) else {
            return Ok(argument);
        };
        tracing::debug!(kind = %route.kind(), pattern = route.pattern(), "routing step argument");
        route.apply(transformer, argument)
    }
}
