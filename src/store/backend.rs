//! The persistence collaborator the viewer is built against.

use uuid::Uuid;

use super::error::StoreError;
use super::models::{Photo, Placement, Plan};

/// Record-level operations of the surrounding application's persistence
/// service. The store composes these into the user-facing operations and
/// owns every cross-record invariant; implementations only move records.
///
/// Every call is fallible so callers treat a local file store and a remote
/// service alike. Tests implement this trait with injected failures.
pub trait ProjectBackend {
    fn plans(&self, project_id: Uuid) -> Result<Vec<Plan>, StoreError>;
    fn photos(&self, project_id: Uuid) -> Result<Vec<Photo>, StoreError>;
    fn placements_for_plans(&self, plan_ids: &[Uuid]) -> Result<Vec<Placement>, StoreError>;
    fn placement_for_photo(&self, photo_id: Uuid) -> Result<Option<Placement>, StoreError>;

    fn insert_placement(&mut self, placement: Placement) -> Result<Placement, StoreError>;
    fn update_placement(&mut self, placement: Placement) -> Result<Placement, StoreError>;
    /// Returns whether a placement existed for the photo.
    fn delete_placement_for_photo(&mut self, photo_id: Uuid) -> Result<bool, StoreError>;
    /// Returns how many placements were removed.
    fn delete_placements_for_plan(&mut self, plan_id: Uuid) -> Result<usize, StoreError>;

    fn set_plan_active(&mut self, plan_id: Uuid, active: bool) -> Result<(), StoreError>;
    fn delete_plan(&mut self, plan_id: Uuid) -> Result<(), StoreError>;
    fn delete_photos(&mut self, photo_ids: &[Uuid]) -> Result<(), StoreError>;
}
