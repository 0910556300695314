//! The `FaceMatcher` trait and the values that cross it.

use rollcall_model::{FaceDescriptor, Member};
use serde::{Deserialize, Serialize};

use crate::MatcherError;

/// Raw image bytes as submitted by an attendee.
///
/// The format is whatever the backend accepts (usually JPEG). Rollcall
/// never decodes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceImage(Vec<u8>);

impl FaceImage {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The member a probe descriptor was attributed to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceMatch {
    pub member: String,
    /// Backend-defined score; higher is more similar.
    pub similarity: f32,
}

/// A biometric backend.
///
/// # Blocking
///
/// All three methods are synchronous and may be CPU-heavy. The engine
/// calls them from `tokio::task::spawn_blocking`, so implementations are
/// free to block. No timeout is applied by the engine.
///
/// # Trait bounds
///
/// - `Send + Sync` → one matcher is shared by every concurrent validation.
/// - `'static` → it is moved into blocking tasks.
///
/// # Example
///
/// ```rust
/// use rollcall_biometrics::{
///     FaceImage, FaceMatch, FaceMatcher, MatchThreshold, MatcherError, nearest_template,
/// };
/// use rollcall_model::{FaceDescriptor, Member};
///
/// /// Treats every byte of the image as one descriptor component.
/// struct ByteMatcher;
///
/// impl FaceMatcher for ByteMatcher {
///     fn face_count(&self, image: &FaceImage) -> Result<usize, MatcherError> {
///         Ok(usize::from(!image.is_empty()))
///     }
///
///     fn extract(&self, image: &FaceImage) -> Result<FaceDescriptor, MatcherError> {
///         Ok(FaceDescriptor::new(
///             image.as_bytes().iter().map(|b| f32::from(*b)).collect::<Vec<_>>(),
///         ))
///     }
///
///     fn best_match(
///         &self,
///         probe: &FaceDescriptor,
///         candidates: &[Member],
///     ) -> Result<Option<FaceMatch>, MatcherError> {
///         Ok(nearest_template(probe, candidates, MatchThreshold::default()))
///     }
/// }
/// ```
pub trait FaceMatcher: Send + Sync + 'static {
    /// Counts the detectable faces in `image`.
    fn face_count(&self, image: &FaceImage) -> Result<usize, MatcherError>;

    /// Produces a descriptor for the single face in `image`.
    fn extract(&self, image: &FaceImage) -> Result<FaceDescriptor, MatcherError>;

    /// Returns the best candidate above the backend's similarity
    /// threshold, or `None` if nobody clears it.
    fn best_match(
        &self,
        probe: &FaceDescriptor,
        candidates: &[Member],
    ) -> Result<Option<FaceMatch>, MatcherError>;
}
