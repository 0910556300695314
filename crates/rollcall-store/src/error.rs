/// Errors that can occur in the storage layer.
///
/// Lost races are not errors; they are reported as
/// [`Commit::Conflict`](crate::Commit::Conflict).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing store could not be reached.
    #[error("session store unavailable: {0}")]
    Unavailable(String),

    /// A stored record could not be read back.
    #[error("session record corrupted: {0}")]
    Corrupted(String),
}
