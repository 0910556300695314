//! The validation policy applied on top of a [`FaceMatcher`].
//!
//! Split in two steps so callers can reject a bad image before doing any
//! other work, and only pay for extraction once the candidates are known.

use rollcall_model::Member;

use crate::{AdjudicationError, FaceImage, FaceMatch, FaceMatcher};

/// Rejects images that don't contain exactly one face.
///
/// This is a client-input check, not a biometric decision: it runs
/// before the session is even looked up.
pub fn require_single_face<M: FaceMatcher + ?Sized>(
    matcher: &M,
    image: &FaceImage,
) -> Result<(), AdjudicationError> {
    match matcher.face_count(image)? {
        0 => Err(AdjudicationError::NoFaces),
        1 => Ok(()),
        n => Err(AdjudicationError::MultipleFaces(n)),
    }
}

/// Decides which member, if any, a single-face photo belongs to.
///
/// 1. A descriptor is extracted and compared against every candidate.
/// 2. The matcher's verdict is final. A non-match is returned as
///    [`AdjudicationError::NoMatch`] and is never retried.
/// 3. A match naming someone outside `candidates` is rejected.
pub fn identify<M: FaceMatcher + ?Sized>(
    matcher: &M,
    image: &FaceImage,
    candidates: &[Member],
) -> Result<FaceMatch, AdjudicationError> {
    if candidates.is_empty() {
        return Err(AdjudicationError::NoMatch);
    }

    let probe = matcher.extract(image)?;
    let found = matcher
        .best_match(&probe, candidates)?
        .ok_or(AdjudicationError::NoMatch)?;

    if !candidates.iter().any(|c| c.name == found.member) {
        tracing::warn!(member = %found.member, "matcher returned a non-candidate");
        return Err(AdjudicationError::UnknownMember(found.member));
    }

    Ok(found)
}
