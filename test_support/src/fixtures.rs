//! Fixture data mirroring the catalogue and tables used in scenarios.

use steparg::{NastyCatalogue, StepTable};

/// Catalogue with a small set of well-known adversarial strings.
///
/// | token            | value                          |
/// |------------------|--------------------------------|
/// | `$NASTYSTRING1`  | `'; DROP TABLE users; --`      |
/// | `$NASTYSTRING2`  | `<script>`                     |
/// | `$NASTYSTRING3`  | a string with `"` and `\`      |
/// | `$NASTYSTRING4`  | NUL followed by an RTL mark    |
/// | `$NASTYSTRING10` | `ten`                          |
#[must_use]
pub fn fixture_catalogue() -> NastyCatalogue {
    NastyCatalogue::from_entries([
        (1, "'; DROP TABLE users; --"),
        (2, "<script>"),
        (3, r#"quote " and slash \"#),
        (4, "\u{0}\u{200f}"),
        (10, "ten"),
    ])
}

/// Build a [`StepTable`] from string slices.
///
/// # Panics
///
/// Panics when the rows are ragged; fixtures are expected to be rectangular.
#[must_use]
pub fn table(rows: &[&[&str]]) -> StepTable {
    match StepTable::new(rows.iter().map(|row| row.iter().copied())) {
        Ok(built) => built,
        Err(err) => panic!("fixture table must be rectangular: {err}"),
    }
}
