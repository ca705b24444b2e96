use snafu::Snafu;

use crate::glob::PatternError;
use crate::path::PathError;

/// Errors from operations that both parse paths and compile patterns.
#[derive(Clone, Debug, PartialEq, Snafu)]
pub enum Error {
    #[snafu(context(false), display("{}", source))]
    Path { source: PathError },

    #[snafu(context(false), display("{}", source))]
    Pattern { source: PatternError },
}
