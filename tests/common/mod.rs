//! Shared fixtures for the store and session suites.
#![allow(dead_code)]

use chrono::Utc;
use planpin::store::{
    GeoPoint, MemoryBackend, Photo, Placement, PlacementMethod, Plan, ProjectBackend, StoreError,
};
use uuid::Uuid;

pub fn plan(project_id: Uuid, name: &str, active: bool) -> Plan {
    Plan {
        id: Uuid::new_v4(),
        project_id,
        name: name.to_string(),
        image_url: format!("plans/{name}.png"),
        width_px: 2000.0,
        height_px: 1500.0,
        created_at: Utc::now(),
        is_active: active,
    }
}

pub fn photo(project_id: Uuid, name: &str) -> Photo {
    Photo {
        id: Uuid::new_v4(),
        project_id,
        name: name.to_string(),
        image_url: format!("photos/{name}.jpg"),
        pixel_size: Some((4000.0, 3000.0)),
        location: None,
        captured_at: None,
        detections: Vec::new(),
        created_at: Utc::now(),
    }
}

pub fn geotagged_photo(project_id: Uuid, name: &str) -> Photo {
    Photo {
        location: Some(GeoPoint {
            latitude: 52.52,
            longitude: 13.405,
        }),
        ..photo(project_id, name)
    }
}

pub fn placement(photo_id: Uuid, plan_id: Uuid, x: f32, y: f32) -> Placement {
    Placement {
        id: Uuid::new_v4(),
        photo_id,
        plan_id,
        x,
        y,
        method: PlacementMethod::Manual,
        created_at: Utc::now(),
    }
}

/// Delegates to a [`MemoryBackend`] but can be told to fail specific
/// operations, for exercising the optimistic-update error paths.
#[derive(Debug, Default)]
pub struct FlakyBackend {
    pub inner: MemoryBackend,
    /// Fail `set_plan_active(plan, true)` for this plan.
    pub fail_activation_of: Option<Uuid>,
    /// Fail every `delete_placements_for_plan` call.
    pub fail_cascade: bool,
    /// Fail every placement insert/update.
    pub fail_placement_writes: bool,
}

impl FlakyBackend {
    pub fn new(inner: MemoryBackend) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }
}

impl ProjectBackend for FlakyBackend {
    fn plans(&self, project_id: Uuid) -> Result<Vec<Plan>, StoreError> {
        self.inner.plans(project_id)
    }

    fn photos(&self, project_id: Uuid) -> Result<Vec<Photo>, StoreError> {
        self.inner.photos(project_id)
    }

    fn placements_for_plans(&self, plan_ids: &[Uuid]) -> Result<Vec<Placement>, StoreError> {
        self.inner.placements_for_plans(plan_ids)
    }

    fn placement_for_photo(&self, photo_id: Uuid) -> Result<Option<Placement>, StoreError> {
        self.inner.placement_for_photo(photo_id)
    }

    fn insert_placement(&mut self, placement: Placement) -> Result<Placement, StoreError> {
        if self.fail_placement_writes {
            return Err(StoreError::Backend("insert refused".into()));
        }
        self.inner.insert_placement(placement)
    }

    fn update_placement(&mut self, placement: Placement) -> Result<Placement, StoreError> {
        if self.fail_placement_writes {
            return Err(StoreError::Backend("update refused".into()));
        }
        self.inner.update_placement(placement)
    }

    fn delete_placement_for_photo(&mut self, photo_id: Uuid) -> Result<bool, StoreError> {
        self.inner.delete_placement_for_photo(photo_id)
    }

    fn delete_placements_for_plan(&mut self, plan_id: Uuid) -> Result<usize, StoreError> {
        if self.fail_cascade {
            return Err(StoreError::Backend("cascade delete refused".into()));
        }
        self.inner.delete_placements_for_plan(plan_id)
    }

    fn set_plan_active(&mut self, plan_id: Uuid, active: bool) -> Result<(), StoreError> {
        if active && self.fail_activation_of == Some(plan_id) {
            return Err(StoreError::Backend("activation refused".into()));
        }
        self.inner.set_plan_active(plan_id, active)
    }

    fn delete_plan(&mut self, plan_id: Uuid) -> Result<(), StoreError> {
        self.inner.delete_plan(plan_id)
    }

    fn delete_photos(&mut self, photo_ids: &[Uuid]) -> Result<(), StoreError> {
        self.inner.delete_photos(photo_ids)
    }
}
