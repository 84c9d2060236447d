//! Project file round trip and backend snapshotting.

mod common;

use common::{geotagged_photo, photo, placement, plan};
use planpin::store::ProjectFile;
use uuid::Uuid;

#[test]
fn saves_and_reloads_every_record() {
    let project = Uuid::new_v4();
    let plan_a = plan(project, "ground-floor", true);
    let plan_b = plan(project, "first-floor", false);
    let tagged = geotagged_photo(project, "site-001");
    let untagged = photo(project, "site-002");
    let pinned = placement(tagged.id, plan_a.id, 12.5, 87.5);

    let file = ProjectFile {
        project_id: project,
        name: "Riverside build".to_string(),
        plans: vec![plan_a.clone(), plan_b],
        photos: vec![tagged.clone(), untagged],
        placements: vec![pinned.clone()],
    };

    let path = std::env::temp_dir().join(format!("planpin-test-{}.json", Uuid::new_v4()));
    file.save(&path).unwrap();
    let loaded = ProjectFile::load(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(loaded.project_id, project);
    assert_eq!(loaded.plans.len(), 2);
    assert_eq!(loaded.photos.len(), 2);
    assert_eq!(loaded.placements, vec![pinned]);
    let reloaded_tagged = loaded.photos.iter().find(|p| p.id == tagged.id).unwrap();
    assert_eq!(reloaded_tagged.location, tagged.location);
}

#[test]
fn backend_snapshot_matches_the_loaded_records() {
    let project = Uuid::new_v4();
    let plan_a = plan(project, "ground-floor", true);
    let photo_a = photo(project, "site-001");
    let pinned = placement(photo_a.id, plan_a.id, 40.0, 60.0);

    let file = ProjectFile {
        project_id: project,
        name: "Riverside build".to_string(),
        plans: vec![plan_a],
        photos: vec![photo_a],
        placements: vec![pinned],
    };
    let name = file.name.clone();

    let backend = file.clone().into_backend();
    let snapshot = ProjectFile::from_backend(&backend, project, &name);

    assert_eq!(snapshot.plans, file.plans);
    assert_eq!(snapshot.photos, file.photos);
    assert_eq!(snapshot.placements, file.placements);
}

#[test]
fn missing_file_reports_an_io_error() {
    let path = std::env::temp_dir().join(format!("planpin-missing-{}.json", Uuid::new_v4()));
    assert!(ProjectFile::load(&path).is_err());
}
