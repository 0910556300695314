//! Error types for the biometrics layer.

/// A failure inside the face matching backend.
///
/// A photo that simply doesn't match anyone is not an error: it is
/// `Ok(None)` from [`FaceMatcher::best_match`](crate::FaceMatcher::best_match).
/// Decoding the submitted bytes is the backend's job, so an undecodable
/// photo surfaces here as [`Decode`](Self::Decode) and is treated as bad
/// client input rather than a backend fault.
#[derive(Debug, thiserror::Error)]
pub enum MatcherError {
    /// The image bytes could not be decoded.
    #[error("image could not be decoded: {0}")]
    Decode(String),

    /// The backend failed (model not loaded, remote API down, ...).
    #[error("matcher backend failed: {0}")]
    Backend(String),
}

/// Why a submitted photo was not attributed to a member.
#[derive(Debug, thiserror::Error)]
pub enum AdjudicationError {
    /// The image contains no detectable face.
    #[error("no faces detected")]
    NoFaces,

    /// The image contains more than one face.
    #[error("{0} faces detected, expected exactly one")]
    MultipleFaces(usize),

    /// No registered member cleared the matcher's threshold.
    #[error("face does not match any member")]
    NoMatch,

    /// The matcher named a member that was not among the candidates.
    #[error("matcher returned unknown member {0}")]
    UnknownMember(String),

    /// The backend itself failed.
    #[error(transparent)]
    Matcher(#[from] MatcherError),
}
