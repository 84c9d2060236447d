//! The placement store: user-facing persistence operations and the
//! invariants they guarantee at the write boundary.

use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::geometry::PercentPos;

use super::backend::ProjectBackend;
use super::error::StoreError;
use super::models::{Photo, Placement, PlacementMethod, Plan};

/// Result of an active-plan switch. The switch itself succeeded; the
/// cascade delete of the previous plan's placements may still have failed,
/// which is surfaced rather than rolled back.
#[derive(Debug)]
pub struct ActivePlanOutcome {
    pub previous: Option<Uuid>,
    pub cascade: Result<usize, StoreError>,
}

/// The active-plan flag flip as a command with an explicit revert, so the
/// optimistic update and its rollback are testable in isolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePlanSwitch {
    pub project_id: Uuid,
    pub target: Uuid,
    pub previous: Option<Uuid>,
}

impl ActivePlanSwitch {
    pub fn prepare<B: ProjectBackend>(
        backend: &B,
        project_id: Uuid,
        target: Uuid,
    ) -> Result<Self, StoreError> {
        let plans = backend.plans(project_id)?;
        if !plans.iter().any(|p| p.id == target) {
            return Err(StoreError::PlanNotFound(target));
        }
        Ok(Self {
            project_id,
            target,
            previous: plans.iter().find(|p| p.is_active).map(|p| p.id),
        })
    }

    pub fn is_noop(&self) -> bool {
        self.previous == Some(self.target)
    }

    /// Flip the flags: previous active plan off, target on. A failure
    /// reverts whatever already flipped before returning the error.
    pub fn apply<B: ProjectBackend>(&self, backend: &mut B) -> Result<(), StoreError> {
        if let Some(previous) = self.previous {
            backend.set_plan_active(previous, false)?;
        }
        if let Err(err) = backend.set_plan_active(self.target, true) {
            self.revert(backend);
            return Err(err);
        }
        Ok(())
    }

    /// Best-effort restoration of the pre-switch flags.
    pub fn revert<B: ProjectBackend>(&self, backend: &mut B) {
        if let Err(err) = backend.set_plan_active(self.target, false) {
            warn!(plan = %self.target, %err, "revert: could not clear target active flag");
        }
        if let Some(previous) = self.previous {
            if let Err(err) = backend.set_plan_active(previous, true) {
                warn!(plan = %previous, %err, "revert: could not restore previous active flag");
            }
        }
    }

    /// Delete every placement still referencing the previously active plan.
    pub fn cascade<B: ProjectBackend>(&self, backend: &mut B) -> Result<usize, StoreError> {
        match self.previous {
            Some(previous) if previous != self.target => {
                backend.delete_placements_for_plan(previous)
            }
            _ => Ok(0),
        }
    }
}

/// Wraps a [`ProjectBackend`] and owns the cross-record rules: one
/// placement per photo, clamped coordinates, one active plan per project,
/// and cascade invalidation on active-plan switches.
#[derive(Debug)]
pub struct PlacementStore<B: ProjectBackend> {
    backend: B,
}

impl<B: ProjectBackend> PlacementStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn plans(&self, project_id: Uuid) -> Result<Vec<Plan>, StoreError> {
        self.backend.plans(project_id)
    }

    pub fn photos(&self, project_id: Uuid) -> Result<Vec<Photo>, StoreError> {
        self.backend.photos(project_id)
    }

    pub fn active_plan(&self, project_id: Uuid) -> Result<Option<Plan>, StoreError> {
        Ok(self
            .backend
            .plans(project_id)?
            .into_iter()
            .find(|p| p.is_active))
    }

    /// All placements attached to any of the project's plans.
    pub fn list_for_project(&self, project_id: Uuid) -> Result<Vec<Placement>, StoreError> {
        let plan_ids: Vec<Uuid> = self
            .backend
            .plans(project_id)?
            .iter()
            .map(|p| p.id)
            .collect();
        self.backend.placements_for_plans(&plan_ids)
    }

    pub fn placement_for_photo(&self, photo_id: Uuid) -> Result<Option<Placement>, StoreError> {
        self.backend.placement_for_photo(photo_id)
    }

    /// Create or update the photo's single placement. Placing a photo that
    /// already has one overwrites it in place, never duplicates.
    pub fn upsert(
        &mut self,
        photo_id: Uuid,
        plan_id: Uuid,
        pos: PercentPos,
        method: PlacementMethod,
    ) -> Result<Placement, StoreError> {
        let pos = PercentPos::clamped(pos.x, pos.y);
        match self.backend.placement_for_photo(photo_id)? {
            Some(mut existing) => {
                existing.plan_id = plan_id;
                existing.x = pos.x;
                existing.y = pos.y;
                existing.method = method;
                debug!(photo = %photo_id, x = pos.x, y = pos.y, "placement updated");
                self.backend.update_placement(existing)
            }
            None => {
                let placement = Placement {
                    id: Uuid::new_v4(),
                    photo_id,
                    plan_id,
                    x: pos.x,
                    y: pos.y,
                    method,
                    created_at: Utc::now(),
                };
                debug!(photo = %photo_id, x = pos.x, y = pos.y, "placement created");
                self.backend.insert_placement(placement)
            }
        }
    }

    /// Unpin a photo. Idempotent; returns whether a placement existed.
    pub fn delete(&mut self, photo_id: Uuid) -> Result<bool, StoreError> {
        self.backend.delete_placement_for_photo(photo_id)
    }

    /// Make `plan_id` the project's active plan and invalidate every
    /// placement tied to the previously active one.
    ///
    /// The flag flip is optimistic with a revert on failure. A cascade
    /// failure after a successful flip does not roll the flip back; the
    /// inconsistency is logged and returned for the caller to surface.
    pub fn set_active_plan(
        &mut self,
        project_id: Uuid,
        plan_id: Uuid,
    ) -> Result<ActivePlanOutcome, StoreError> {
        let switch = ActivePlanSwitch::prepare(&self.backend, project_id, plan_id)?;
        if switch.is_noop() {
            return Ok(ActivePlanOutcome {
                previous: switch.previous,
                cascade: Ok(0),
            });
        }
        switch.apply(&mut self.backend)?;
        let cascade = switch.cascade(&mut self.backend);
        if let Err(err) = &cascade {
            warn!(
                project = %project_id,
                previous = ?switch.previous,
                %err,
                "active plan switched but stale placements were not cleared"
            );
        }
        Ok(ActivePlanOutcome {
            previous: switch.previous,
            cascade,
        })
    }

    /// Delete a plan and its placements. Refused for the project's only
    /// plan and for the active plan.
    pub fn delete_plan(&mut self, project_id: Uuid, plan_id: Uuid) -> Result<(), StoreError> {
        let plans = self.backend.plans(project_id)?;
        let plan = plans
            .iter()
            .find(|p| p.id == plan_id)
            .ok_or(StoreError::PlanNotFound(plan_id))?;
        if plans.len() <= 1 {
            return Err(StoreError::LastPlan(project_id));
        }
        if plan.is_active {
            return Err(StoreError::PlanIsActive(plan_id));
        }
        self.backend.delete_plan(plan_id)
    }
}
