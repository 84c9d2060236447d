//! In-memory backend: the reference implementation of [`ProjectBackend`],
//! also the runtime store behind file-backed projects.

use uuid::Uuid;

use super::backend::ProjectBackend;
use super::error::StoreError;
use super::models::{Photo, Placement, Plan};

#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    plans: Vec<Plan>,
    photos: Vec<Photo>,
    placements: Vec<Placement>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(plans: Vec<Plan>, photos: Vec<Photo>, placements: Vec<Placement>) -> Self {
        Self {
            plans,
            photos,
            placements,
        }
    }

    pub fn all_plans(&self) -> &[Plan] {
        &self.plans
    }

    pub fn all_photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn all_placements(&self) -> &[Placement] {
        &self.placements
    }
}

impl ProjectBackend for MemoryBackend {
    fn plans(&self, project_id: Uuid) -> Result<Vec<Plan>, StoreError> {
        Ok(self
            .plans
            .iter()
            .filter(|p| p.project_id == project_id)
            .cloned()
            .collect())
    }

    fn photos(&self, project_id: Uuid) -> Result<Vec<Photo>, StoreError> {
        Ok(self
            .photos
            .iter()
            .filter(|p| p.project_id == project_id)
            .cloned()
            .collect())
    }

    fn placements_for_plans(&self, plan_ids: &[Uuid]) -> Result<Vec<Placement>, StoreError> {
        Ok(self
            .placements
            .iter()
            .filter(|p| plan_ids.contains(&p.plan_id))
            .cloned()
            .collect())
    }

    fn placement_for_photo(&self, photo_id: Uuid) -> Result<Option<Placement>, StoreError> {
        Ok(self
            .placements
            .iter()
            .find(|p| p.photo_id == photo_id)
            .cloned())
    }

    fn insert_placement(&mut self, placement: Placement) -> Result<Placement, StoreError> {
        self.placements.push(placement.clone());
        Ok(placement)
    }

    fn update_placement(&mut self, placement: Placement) -> Result<Placement, StoreError> {
        let slot = self
            .placements
            .iter_mut()
            .find(|p| p.id == placement.id)
            .ok_or(StoreError::PhotoNotFound(placement.photo_id))?;
        *slot = placement.clone();
        Ok(placement)
    }

    fn delete_placement_for_photo(&mut self, photo_id: Uuid) -> Result<bool, StoreError> {
        let before = self.placements.len();
        self.placements.retain(|p| p.photo_id != photo_id);
        Ok(self.placements.len() != before)
    }

    fn delete_placements_for_plan(&mut self, plan_id: Uuid) -> Result<usize, StoreError> {
        let before = self.placements.len();
        self.placements.retain(|p| p.plan_id != plan_id);
        Ok(before - self.placements.len())
    }

    fn set_plan_active(&mut self, plan_id: Uuid, active: bool) -> Result<(), StoreError> {
        let plan = self
            .plans
            .iter_mut()
            .find(|p| p.id == plan_id)
            .ok_or(StoreError::PlanNotFound(plan_id))?;
        plan.is_active = active;
        Ok(())
    }

    fn delete_plan(&mut self, plan_id: Uuid) -> Result<(), StoreError> {
        if !self.plans.iter().any(|p| p.id == plan_id) {
            return Err(StoreError::PlanNotFound(plan_id));
        }
        self.plans.retain(|p| p.id != plan_id);
        self.placements.retain(|p| p.plan_id != plan_id);
        Ok(())
    }

    fn delete_photos(&mut self, photo_ids: &[Uuid]) -> Result<(), StoreError> {
        self.photos.retain(|p| !photo_ids.contains(&p.id));
        self.placements.retain(|p| !photo_ids.contains(&p.photo_id));
        Ok(())
    }
}
