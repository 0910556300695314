use rollcall::biometrics::nearest_template;
use rollcall::prelude::*;

// ---------------------------------------------------------------------------
// Toy matcher
// ---------------------------------------------------------------------------

/// Pretends every photo is `[faces, x, y]`: a face count followed by a
/// two-dimensional face descriptor.
struct PointMatcher;

impl FaceMatcher for PointMatcher {
    fn face_count(&self, image: &FaceImage) -> Result<usize, MatcherError> {
        image.as_bytes().first().map(|&n| n as usize)
            .ok_or_else(|| MatcherError::Decode("empty photo".into()))
    }

    fn extract(&self, image: &FaceImage) -> Result<FaceDescriptor, MatcherError> {
        match image.as_bytes() {
            [_, x, y] => Ok(FaceDescriptor::new(vec![f32::from(*x), f32::from(*y)])),
            other => Err(MatcherError::Decode(format!("expected 3 bytes, got {}", other.len()))),
        }
    }

    fn best_match(&self, probe: &FaceDescriptor, candidates: &[Member])
        -> Result<Option<FaceMatch>, MatcherError>
    {
        Ok(nearest_template(probe, candidates, MatchThreshold::default()))
    }
}

fn photo(x: u8, y: u8) -> FaceImage {
    FaceImage::new(vec![1, x, y])
}

fn report<T: std::fmt::Debug>(step: &str, result: &Result<T, AttendanceError>) {
    match result {
        Ok(_) => println!("{step:<40} ok"),
        Err(err) => println!("{step:<40} {:?}: {err}", err.kind()),
    }
}

// ---------------------------------------------------------------------------
// Scenario
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), RollcallError> {
    rollcall::telemetry::init();

    let prof = OwnerId::from("prof");
    let directory = Arc::new(MemoryDirectory::new());
    directory.create_group("turma-a", &prof).await?;
    directory.register_member("turma-a", &prof, "Alice", FaceDescriptor::new(vec![10.0, 0.0])).await?;
    directory.register_member("turma-a", &prof, "Bob", FaceDescriptor::new(vec![0.0, 10.0])).await?;

    let engine = Rollcall::builder()
        .build(Arc::clone(&directory), PointMatcher, MemorySessionStore::new());

    engine.start_session("turma-a", &prof, "aula-1", 1).await?;
    tracing::info!(groups = ?directory.groups_of(&prof).await, "classroom ready");

    let r = engine.validate_face("turma-a", "aula-1", &prof, photo(10, 0)).await;
    report("Alice checks in", &r);
    let r = engine.validate_face("turma-a", "aula-1", &prof, photo(10, 0)).await;
    report("Alice checks in again", &r);
    let r = engine.validate_face("turma-a", "aula-1", &prof, photo(200, 200)).await;
    report("Bob shows someone else's photo", &r);

    let r = engine.end_session("turma-a", "aula-1", &prof).await;
    report("end aula-1", &r);

    let r = engine.validate_face("turma-a", "aula-1", &prof, photo(10, 0)).await;
    report("Alice checks in late", &r);
    let r = engine.update_member_attendance("turma-a", "aula-1", &prof, "Alice", 1).await;
    report("correct Alice to 1", &r);
    let r = engine.update_member_attendance("turma-a", "aula-1", &prof, "Bob", 2).await;
    report("correct Bob to 2", &r);

    let roster = engine.session_report("turma-a", "aula-1", &prof).await?;
    println!("{}", serde_json::to_string_pretty(&roster).unwrap_or_default());
    Ok(())
}
