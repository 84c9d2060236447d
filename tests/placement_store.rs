//! Store-level invariants: upsert-per-photo, cascade invalidation on
//! active-plan switches, optimistic revert, and plan-deletion guards.

mod common;

use common::{FlakyBackend, photo, placement, plan};
use planpin::geometry::PercentPos;
use planpin::store::{MemoryBackend, PlacementMethod, PlacementStore, ProjectBackend, StoreError};
use uuid::Uuid;

fn pos(x: f32, y: f32) -> PercentPos {
    PercentPos { x, y }
}

#[test]
fn upsert_is_idempotent_per_photo() {
    let project = Uuid::new_v4();
    let plan_a = plan(project, "ground-floor", true);
    let photo_a = photo(project, "site-001");
    let backend = MemoryBackend::with_records(vec![plan_a.clone()], vec![photo_a.clone()], vec![]);
    let mut store = PlacementStore::new(backend);

    let first = store
        .upsert(photo_a.id, plan_a.id, pos(10.0, 20.0), PlacementMethod::Manual)
        .unwrap();
    let second = store
        .upsert(photo_a.id, plan_a.id, pos(70.0, 80.0), PlacementMethod::Manual)
        .unwrap();

    // Exactly one record, carrying the second call's values.
    let placements = store.list_for_project(project).unwrap();
    assert_eq!(placements.len(), 1);
    assert_eq!(placements[0].id, first.id);
    assert_eq!(placements[0].id, second.id);
    assert_eq!((placements[0].x, placements[0].y), (70.0, 80.0));
}

#[test]
fn upsert_clamps_out_of_range_coordinates() {
    let project = Uuid::new_v4();
    let plan_a = plan(project, "ground-floor", true);
    let photo_a = photo(project, "site-001");
    let backend = MemoryBackend::with_records(vec![plan_a.clone()], vec![photo_a.clone()], vec![]);
    let mut store = PlacementStore::new(backend);

    let record = store
        .upsert(
            photo_a.id,
            plan_a.id,
            pos(-12.0, 180.0),
            PlacementMethod::Manual,
        )
        .unwrap();
    assert_eq!((record.x, record.y), (0.0, 100.0));
}

#[test]
fn delete_is_idempotent() {
    let project = Uuid::new_v4();
    let plan_a = plan(project, "ground-floor", true);
    let photo_a = photo(project, "site-001");
    let existing = placement(photo_a.id, plan_a.id, 40.0, 40.0);
    let backend = MemoryBackend::with_records(vec![plan_a], vec![photo_a.clone()], vec![existing]);
    let mut store = PlacementStore::new(backend);

    assert!(store.delete(photo_a.id).unwrap());
    assert!(!store.delete(photo_a.id).unwrap());
    assert!(store.list_for_project(project).unwrap().is_empty());
}

#[test]
fn list_for_project_ignores_other_projects() {
    let project = Uuid::new_v4();
    let other = Uuid::new_v4();
    let plan_a = plan(project, "ground-floor", true);
    let plan_other = plan(other, "elsewhere", true);
    let photo_a = photo(project, "site-001");
    let photo_other = photo(other, "other-001");
    let backend = MemoryBackend::with_records(
        vec![plan_a.clone(), plan_other.clone()],
        vec![photo_a.clone(), photo_other.clone()],
        vec![
            placement(photo_a.id, plan_a.id, 10.0, 10.0),
            placement(photo_other.id, plan_other.id, 20.0, 20.0),
        ],
    );
    let store = PlacementStore::new(backend);

    let placements = store.list_for_project(project).unwrap();
    assert_eq!(placements.len(), 1);
    assert_eq!(placements[0].photo_id, photo_a.id);
}

#[test]
fn active_plan_switch_cascades_old_placements() {
    let project = Uuid::new_v4();
    let plan_a = plan(project, "ground-floor", true);
    let plan_b = plan(project, "first-floor", false);
    let photos: Vec<_> = (0..3).map(|i| photo(project, &format!("site-{i:03}"))).collect();
    let placements: Vec<_> = photos
        .iter()
        .enumerate()
        .map(|(i, p)| placement(p.id, plan_a.id, 10.0 * i as f32, 5.0))
        .collect();
    let old_ids: Vec<Uuid> = placements.iter().map(|p| p.id).collect();
    let backend = MemoryBackend::with_records(
        vec![plan_a.clone(), plan_b.clone()],
        photos,
        placements,
    );
    let mut store = PlacementStore::new(backend);

    let outcome = store.set_active_plan(project, plan_b.id).unwrap();
    assert_eq!(outcome.previous, Some(plan_a.id));
    assert_eq!(outcome.cascade.unwrap(), 3);

    let remaining = store.list_for_project(project).unwrap();
    assert!(remaining.iter().all(|p| !old_ids.contains(&p.id)));

    let plans = store.plans(project).unwrap();
    assert!(plans.iter().find(|p| p.id == plan_b.id).unwrap().is_active);
    assert!(!plans.iter().find(|p| p.id == plan_a.id).unwrap().is_active);
}

#[test]
fn switching_to_the_already_active_plan_is_a_noop() {
    let project = Uuid::new_v4();
    let plan_a = plan(project, "ground-floor", true);
    let photo_a = photo(project, "site-001");
    let backend = MemoryBackend::with_records(
        vec![plan_a.clone()],
        vec![photo_a.clone()],
        vec![placement(photo_a.id, plan_a.id, 30.0, 30.0)],
    );
    let mut store = PlacementStore::new(backend);

    let outcome = store.set_active_plan(project, plan_a.id).unwrap();
    assert_eq!(outcome.cascade.unwrap(), 0);
    assert_eq!(store.list_for_project(project).unwrap().len(), 1);
}

#[test]
fn failed_activation_reverts_the_flag_flip() {
    let project = Uuid::new_v4();
    let plan_a = plan(project, "ground-floor", true);
    let plan_b = plan(project, "first-floor", false);
    let photo_a = photo(project, "site-001");
    let inner = MemoryBackend::with_records(
        vec![plan_a.clone(), plan_b.clone()],
        vec![photo_a.clone()],
        vec![placement(photo_a.id, plan_a.id, 30.0, 30.0)],
    );
    let mut backend = FlakyBackend::new(inner);
    backend.fail_activation_of = Some(plan_b.id);
    let mut store = PlacementStore::new(backend);

    let err = store.set_active_plan(project, plan_b.id).unwrap_err();
    assert!(matches!(err, StoreError::Backend(_)));

    // The optimistic flip was rolled back and nothing was cascaded.
    let plans = store.plans(project).unwrap();
    assert!(plans.iter().find(|p| p.id == plan_a.id).unwrap().is_active);
    assert!(!plans.iter().find(|p| p.id == plan_b.id).unwrap().is_active);
    assert_eq!(store.list_for_project(project).unwrap().len(), 1);
}

#[test]
fn failed_cascade_does_not_roll_back_the_switch() {
    let project = Uuid::new_v4();
    let plan_a = plan(project, "ground-floor", true);
    let plan_b = plan(project, "first-floor", false);
    let photo_a = photo(project, "site-001");
    let inner = MemoryBackend::with_records(
        vec![plan_a.clone(), plan_b.clone()],
        vec![photo_a.clone()],
        vec![placement(photo_a.id, plan_a.id, 30.0, 30.0)],
    );
    let mut backend = FlakyBackend::new(inner);
    backend.fail_cascade = true;
    let mut store = PlacementStore::new(backend);

    let outcome = store.set_active_plan(project, plan_b.id).unwrap();
    assert!(outcome.cascade.is_err());

    // Non-fatal but inconsistent: the switch stands, the stale placement
    // survives.
    let plans = store.plans(project).unwrap();
    assert!(plans.iter().find(|p| p.id == plan_b.id).unwrap().is_active);
    assert_eq!(store.list_for_project(project).unwrap().len(), 1);
}

#[test]
fn plan_deletion_guards() {
    let project = Uuid::new_v4();
    let plan_a = plan(project, "ground-floor", true);
    let backend = MemoryBackend::with_records(vec![plan_a.clone()], vec![], vec![]);
    let mut store = PlacementStore::new(backend);

    // Only plan.
    assert!(matches!(
        store.delete_plan(project, plan_a.id),
        Err(StoreError::LastPlan(_))
    ));

    // Active plan, with a sibling present.
    let plan_b = plan(project, "first-floor", false);
    let photo_b = photo(project, "site-002");
    let backend = MemoryBackend::with_records(
        vec![plan_a.clone(), plan_b.clone()],
        vec![photo_b.clone()],
        vec![placement(photo_b.id, plan_b.id, 15.0, 15.0)],
    );
    let mut store = PlacementStore::new(backend);
    assert!(matches!(
        store.delete_plan(project, plan_a.id),
        Err(StoreError::PlanIsActive(_))
    ));

    // Inactive sibling deletes along with its placements.
    store.delete_plan(project, plan_b.id).unwrap();
    assert_eq!(store.plans(project).unwrap().len(), 1);
    assert!(store.list_for_project(project).unwrap().is_empty());
}

#[test]
fn deleting_an_unknown_plan_reports_not_found() {
    let project = Uuid::new_v4();
    let plan_a = plan(project, "ground-floor", true);
    let plan_b = plan(project, "first-floor", false);
    let backend = MemoryBackend::with_records(vec![plan_a, plan_b], vec![], vec![]);
    let mut store = PlacementStore::new(backend);

    assert!(matches!(
        store.delete_plan(project, Uuid::new_v4()),
        Err(StoreError::PlanNotFound(_))
    ));
}

#[test]
fn backend_photo_deletion_drops_placements() {
    let project = Uuid::new_v4();
    let plan_a = plan(project, "ground-floor", true);
    let photo_a = photo(project, "site-001");
    let mut backend = MemoryBackend::with_records(
        vec![plan_a.clone()],
        vec![photo_a.clone()],
        vec![placement(photo_a.id, plan_a.id, 30.0, 30.0)],
    );

    backend.delete_photos(&[photo_a.id]).unwrap();
    assert!(backend.photos(project).unwrap().is_empty());
    assert!(backend.placements_for_plans(&[plan_a.id]).unwrap().is_empty());
}
