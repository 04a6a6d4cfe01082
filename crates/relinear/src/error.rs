use crate::formlang::ParseError;
use thiserror::Error;

/// Errors reported by the compilation pipeline.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid pattern {pattern:?}")]
    Parse {
        pattern: String,
        #[source]
        source: ParseError,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
