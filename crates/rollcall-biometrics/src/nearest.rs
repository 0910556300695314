//! Euclidean nearest-template search.

use rollcall_model::{FaceDescriptor, Member};
use serde::{Deserialize, Serialize};

use crate::FaceMatch;

/// Maximum Euclidean distance at which two descriptors count as the
/// same face.
///
/// Default: 0.6, the usual cut-off for 128-dimensional face embeddings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchThreshold(pub f32);

impl Default for MatchThreshold {
    fn default() -> Self {
        Self(0.6)
    }
}

/// Finds the candidate closest to `probe` within `threshold`.
///
/// Candidates whose descriptor length differs from the probe are skipped.
/// On equal distance the earlier candidate wins. The returned similarity
/// is `1 / (1 + distance)`.
pub fn nearest_template(
    probe: &FaceDescriptor,
    candidates: &[Member],
    threshold: MatchThreshold,
) -> Option<FaceMatch> {
    let mut best: Option<(&Member, f32)> = None;

    for candidate in candidates {
        let Some(distance) = euclidean(probe.as_slice(), candidate.descriptor.as_slice())
        else {
            continue;
        };
        if distance > threshold.0 {
            continue;
        }
        match best {
            Some((_, d)) if d <= distance => {}
            _ => best = Some((candidate, distance)),
        }
    }

    best.map(|(member, distance)| FaceMatch {
        member: member.name.clone(),
        similarity: 1.0 / (1.0 + distance),
    })
}

fn euclidean(a: &[f32], b: &[f32]) -> Option<f32> {
    if a.len() != b.len() || a.is_empty() {
        return None;
    }
    let sum: f32 = a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum();
    Some(sum.sqrt())
}
