use thiserror::Error;

/// Failure modes of structural tree mutations.
///
/// Lookups (`get`, `get_from`, `find`) report absence with `Option` since
/// a missing value is an expected outcome. Mutations return `TreeError`
/// because a half-applied move or removal would corrupt the structure;
/// every fallible operation leaves the tree untouched on failure.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    #[error("no matching node: {0}")]
    NotFound(&'static str),

    #[error("operation not permitted on the root node")]
    InvalidOperation,

    #[error("destination lies inside the subtree being moved")]
    CycleRejected,
}

pub type TreeResult<T> = Result<T, TreeError>;
