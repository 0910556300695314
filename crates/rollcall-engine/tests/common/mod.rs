//! Shared fixtures for the engine integration tests.
//!
//! Photos are fake: byte 0 is the number of faces in the picture and
//! every following byte is one descriptor component. The matcher reads
//! them back and runs the Euclidean nearest-template helper.

#![allow(dead_code)]

use std::sync::Arc;

use rollcall_biometrics::{
    FaceImage, FaceMatch, FaceMatcher, MatchThreshold, MatcherError, nearest_template,
};
use rollcall_directory::MemoryDirectory;
use rollcall_engine::{AttendanceEngine, EngineConfig};
use rollcall_model::{FaceDescriptor, Member, OwnerId};
use rollcall_store::{MemorySessionStore, SessionStore};

pub const GROUP: &str = "turma-a";
pub const SESSION: &str = "aula-1";

pub const ALICE: [u8; 2] = [10, 0];
pub const BOB: [u8; 2] = [0, 10];
pub const CAROL: [u8; 2] = [10, 10];
pub const STRANGER: [u8; 2] = [200, 200];

// =========================================================================
// Mock matcher
// =========================================================================

#[derive(Debug, Default)]
pub struct TemplateMatcher {
    pub threshold: MatchThreshold,
}

impl FaceMatcher for TemplateMatcher {
    fn face_count(&self, image: &FaceImage) -> Result<usize, MatcherError> {
        image
            .as_bytes()
            .first()
            .map(|&n| n as usize)
            .ok_or_else(|| MatcherError::Decode("empty image".into()))
    }

    fn extract(&self, image: &FaceImage) -> Result<FaceDescriptor, MatcherError> {
        let values: Vec<f32> = image.as_bytes()[1..].iter().map(|&b| f32::from(b)).collect();
        Ok(FaceDescriptor::new(values))
    }

    fn best_match(
        &self,
        probe: &FaceDescriptor,
        candidates: &[Member],
    ) -> Result<Option<FaceMatch>, MatcherError> {
        Ok(nearest_template(probe, candidates, self.threshold))
    }
}

/// A photo with exactly one face.
pub fn photo(face: [u8; 2]) -> FaceImage {
    FaceImage::new(vec![1, face[0], face[1]])
}

/// A photo with `faces` faces in it.
pub fn crowd(faces: u8) -> FaceImage {
    FaceImage::new(vec![faces, 10, 0])
}

fn template(face: [u8; 2]) -> FaceDescriptor {
    FaceDescriptor::new(vec![f32::from(face[0]), f32::from(face[1])])
}

// =========================================================================
// Wiring
// =========================================================================

pub fn owner() -> OwnerId {
    OwnerId::from("prof")
}

/// Directory with "turma-a" = Alice, Bob, Carol.
pub async fn directory() -> Arc<MemoryDirectory> {
    let directory = Arc::new(MemoryDirectory::new());
    directory.create_group(GROUP, &owner()).await.unwrap();
    for (name, face) in [("Alice", ALICE), ("Bob", BOB), ("Carol", CAROL)] {
        directory
            .register_member(GROUP, &owner(), name, template(face))
            .await
            .unwrap();
    }
    directory
}

pub fn quick_config() -> EngineConfig {
    EngineConfig {
        max_commit_attempts: 32,
        retry_backoff_ms: 0,
        retry_jitter_ms: 1,
    }
}

pub type Engine<S> = AttendanceEngine<Arc<MemoryDirectory>, TemplateMatcher, S>;

pub async fn engine_with<S: SessionStore>(store: S) -> Engine<S> {
    AttendanceEngine::new(
        directory().await,
        TemplateMatcher::default(),
        store,
        quick_config(),
    )
}

pub async fn engine() -> (Engine<Arc<MemorySessionStore>>, Arc<MemorySessionStore>) {
    let store = Arc::new(MemorySessionStore::new());
    (engine_with(Arc::clone(&store)).await, store)
}
