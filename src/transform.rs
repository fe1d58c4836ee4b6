//! Argument transformations applied before step definitions run.
//!
//! Two string primitives do the actual rewriting:
//!
//! - [`unescape_quotes`] turns the escaped delimiter `\"` back into `"`.
//! - [`replace_nasty_strings`] swaps every `$NASTYSTRING<n>` placeholder for
//!   its catalogue entry.
//!
//! [`ArgumentTransformer`] wraps them into the entry points a runner calls
//! for scalar and tabular arguments.
//!
//! # Examples
//!
//! ```
//! use steparg::catalogue::NastyCatalogue;
//! use steparg::transform::ArgumentTransformer;
//!
//! let catalogue = NastyCatalogue::from_entries([(2, "<script>")]);
//! let transformer = ArgumentTransformer::new(&catalogue);
//! let cell = transformer.transform_cell(r#"say \"hi\" $NASTYSTRING2"#)?;
//! assert_eq!(cell, r#"say "hi" <script>"#);
//! # Ok::<(), steparg::TransformError>(())
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::catalogue::NastyCatalogue;
use crate::error::Result;
use crate::table::StepTable;

/// Placeholder grammar: the literal prefix followed by one or more ASCII
/// digits.
pub const NASTY_PLACEHOLDER_PATTERN: &str = r"\$NASTYSTRING[0-9]+";

#[expect(clippy::expect_used, reason = "pattern is a valid literal")]
static NASTY_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(NASTY_PLACEHOLDER_PATTERN).expect("placeholder pattern compiles")
});

/// Replace every escaped delimiter `\"` with a bare `"`.
///
/// Nothing else changes. Applying this twice unescapes twice, so callers
/// apply it exactly once per raw argument.
#[must_use]
pub fn unescape_quotes(input: &str) -> String {
    input.replace("\\\"", "\"")
}

/// Whether `input` contains at least one nasty string placeholder.
#[must_use]
pub fn contains_nasty_placeholder(input: &str) -> bool {
    NASTY_PLACEHOLDER.is_match(input)
}

/// Replace every nasty string placeholder in `input`, left to right.
///
/// Each placeholder is looked up by its full token text. Substituted values
/// are not rescanned.
///
/// # Errors
///
/// Returns [`crate::TransformError::UnknownNastyString`] for the first
/// placeholder without a catalogue entry.
#[expect(
    clippy::string_slice,
    reason = "regex match bounds always fall on char boundaries within input"
)]
pub fn replace_nasty_strings(input: &str, catalogue: &NastyCatalogue) -> Result<String> {
    let mut output = String::with_capacity(input.len());
    let mut last = 0;
    for found in NASTY_PLACEHOLDER.find_iter(input) {
        output.push_str(&input[last..found.start()]);
        let replacement = catalogue.lookup(found.as_str())?;
        tracing::trace!(token = found.as_str(), "substituted nasty string");
        output.push_str(replacement);
        last = found.end();
    }
    output.push_str(&input[last..]);
    Ok(output)
}

/// Applies argument transformations against an injected catalogue.
#[derive(Debug, Clone, Copy)]
pub struct ArgumentTransformer<'a> {
    catalogue: &'a NastyCatalogue,
}

impl<'a> ArgumentTransformer<'a> {
    /// Create a transformer that resolves placeholders through `catalogue`.
    #[must_use]
    pub const fn new(catalogue: &'a NastyCatalogue) -> Self {
        Self { catalogue }
    }

    /// The catalogue placeholders resolve against.
    #[must_use]
    pub const fn catalogue(&self) -> &'a NastyCatalogue {
        self.catalogue
    }

    /// Remove backslash escapes from quote delimiters in a scalar argument.
    #[must_use]
    pub fn arg_replace_slashes(&self, argument: &str) -> String {
        unescape_quotes(argument)
    }

    /// Substitute nasty string placeholders in a scalar argument.
    ///
    /// # Errors
    ///
    /// Fails when a placeholder has no catalogue entry.
    pub fn arg_replace_nasty_strings(&self, argument: &str) -> Result<String> {
        replace_nasty_strings(argument, self.catalogue)
    }

    /// Run the per-cell pipeline: unescape quotes, then substitute
    /// placeholders when any remain.
    ///
    /// # Errors
    ///
    /// Fails when a placeholder has no catalogue entry.
    pub fn transform_cell(&self, value: &str) -> Result<String> {
        let unescaped = unescape_quotes(value);
        if contains_nasty_placeholder(&unescaped) {
            replace_nasty_strings(&unescaped, self.catalogue)
        } else {
            Ok(unescaped)
        }
    }

    /// Transform every cell of `table`, header row included.
    ///
    /// The returned table has the same shape as the input.
    ///
    /// # Errors
    ///
    /// Fails on the first cell whose placeholder has no catalogue entry.
    pub fn transform_table(&self, table: &StepTable) -> Result<StepTable> {
        tracing::debug!(
            rows = table.row_count(),
            columns = table.column_count(),
            "transforming table argument"
        );
        table.try_map_cells(|cell| self.transform_cell(cell))
    }
}
