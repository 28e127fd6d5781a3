use thiserror::Error;

/// Every failure mode the codec can surface, matching the error taxonomy the
/// reference implementation handles through out-parameters and sentinel
/// return codes.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unexpected end of buffer at offset {offset}, needed {needed} more byte(s)")]
    UnexpectedEof { offset: usize, needed: usize },

    #[error("unsupported world version: {0}")]
    UnsupportedVersion(i32),

    #[error("section {index} overran its offset: cursor at {at}, expected {expected}")]
    SectionOverrun {
        index: usize,
        at: usize,
        expected: usize,
    },

    #[error("section {index} underran its offset: cursor at {at}, expected {expected}")]
    SectionUnderrun {
        index: usize,
        at: usize,
        expected: usize,
    },

    #[error("allocation failure reserving {requested} byte(s)")]
    AllocationFailure { requested: usize },

    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    #[error("subfield unsupported at version {version}: {field}")]
    UnsupportedSubfield { version: i32, field: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;
