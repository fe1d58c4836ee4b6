//! Error formatting helpers for stable, deterministic test assertions.

use std::error::Error;

/// Join an error and its sources, outermost first, with `": "`.
///
/// # Examples
///
/// ```
/// use test_support::display_error_chain;
///
/// let err = std::io::Error::other("oops");
/// assert_eq!(display_error_chain(&err), "oops");
/// ```
#[must_use]
pub fn display_error_chain(err: &(dyn Error + 'static)) -> String {
    let mut parts = vec![err.to_string()];
    let mut cause = err.source();
    while let Some(inner) = cause {
        parts.push(inner.to_string());
        cause = inner.source();
    }
    parts.join(": ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use steparg::TransformError;

    #[test]
    fn includes_source_errors() {
        let err = TransformError::CatalogueRead {
            path: "missing.json".into(),
            source: std::io::Error::other("no such file"),
        };
        assert_eq!(
            display_error_chain(&err),
            "failed to read catalogue missing.json: no such file"
        );
    }
}
