//! Step-argument transformations for behaviour-driven test suites.
//!
//! Runners hand raw step arguments to a [`routing::TransformRegistry`], which
//! selects a transformation by pattern and applies it through an
//! [`transform::ArgumentTransformer`] bound to a [`catalogue::NastyCatalogue`].
//! Escaped quote delimiters are unescaped and `$NASTYSTRING<n>` placeholders
//! are replaced by adversarial strings before step definitions run.

pub mod catalogue;
pub mod cli;
pub mod error;
pub mod routing;
pub mod runner;
pub mod table;
pub mod transform;

pub use catalogue::NastyCatalogue;
pub use error::TransformError;
pub use routing::{StepArgument, TransformKind, TransformRegistry, TransformRoute};
pub use table::StepTable;
pub use transform::ArgumentTransformer;
