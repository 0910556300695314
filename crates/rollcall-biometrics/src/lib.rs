//! Face matching contract and adjudication policy for Rollcall.
//!
//! Rollcall doesn't detect or compare faces itself. That's the job of a
//! biometric backend (dlib, a cloud API, an on-device model, ...).
//! Instead this crate defines:
//!
//! - [`FaceMatcher`]: the trait a backend implements: count faces,
//!   extract a descriptor, pick the best matching template.
//! - [`require_single_face`] and [`identify`]: the policy the engine
//!   applies on top: exactly one face, the matcher's verdict is final, the
//!   winner must be one of the candidates that were offered.
//! - [`nearest_template`]: a Euclidean nearest-neighbour helper backends
//!   can reuse for `best_match`.

mod adjudicate;
mod error;
mod matcher;
mod nearest;

pub use adjudicate::{identify, require_single_face};
pub use error::{AdjudicationError, MatcherError};
pub use matcher::{FaceImage, FaceMatch, FaceMatcher};
pub use nearest::{MatchThreshold, nearest_template};
