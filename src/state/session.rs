//! The edit session: a staged, discardable batch of placement edits.

use std::collections::HashMap;

use uuid::Uuid;

use crate::geometry::PercentPos;
use crate::store::{Placement, PlacementMethod};

/// A placement as staged in the draft, without record bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DraftPlacement {
    pub plan_id: Uuid,
    pub x: f32,
    pub y: f32,
    pub method: PlacementMethod,
}

impl DraftPlacement {
    pub fn from_placement(placement: &Placement) -> Self {
        Self {
            plan_id: placement.plan_id,
            x: placement.x,
            y: placement.y,
            method: placement.method,
        }
    }

    /// Structural equality for diffing: position and plan only. Method is
    /// bookkeeping that rides along with a position change.
    fn same_position(&self, other: &Self) -> bool {
        self.plan_id == other.plan_id && self.x == other.x && self.y == other.y
    }
}

/// One persistence call owed after the session is saved.
#[derive(Debug, Clone, PartialEq)]
pub enum PlacementChange {
    Upsert {
        photo_id: Uuid,
        draft: DraftPlacement,
    },
    Remove {
        photo_id: Uuid,
    },
}

/// Staging area for "move pins" mode. `start` snapshots the committed
/// placements; every mutation touches only the draft; `changes` yields the
/// minimal set of persistence calls. While a session is open, all pin and
/// list reads are served from the draft so upstream refreshes cannot
/// clobber in-progress edits.
#[derive(Debug, Default)]
pub struct EditSession {
    snapshot: HashMap<Uuid, DraftPlacement>,
    draft: HashMap<Uuid, DraftPlacement>,
}

impl EditSession {
    pub fn start(placements: &[Placement]) -> Self {
        let snapshot: HashMap<Uuid, DraftPlacement> = placements
            .iter()
            .map(|p| (p.photo_id, DraftPlacement::from_placement(p)))
            .collect();
        Self {
            draft: snapshot.clone(),
            snapshot,
        }
    }

    pub fn draft_for(&self, photo_id: Uuid) -> Option<&DraftPlacement> {
        self.draft.get(&photo_id)
    }

    pub fn is_placed(&self, photo_id: Uuid) -> bool {
        self.draft.contains_key(&photo_id)
    }

    /// Iterate the draft's placements.
    pub fn drafts(&self) -> impl Iterator<Item = (&Uuid, &DraftPlacement)> {
        self.draft.iter()
    }

    /// Reposition an already-placed pin. A drag is a manual action, so the
    /// method flips to manual along with the position.
    pub fn move_pin(&mut self, photo_id: Uuid, pos: PercentPos) -> bool {
        let pos = PercentPos::clamped(pos.x, pos.y);
        match self.draft.get_mut(&photo_id) {
            Some(draft) => {
                draft.x = pos.x;
                draft.y = pos.y;
                draft.method = PlacementMethod::Manual;
                true
            }
            None => false,
        }
    }

    /// Place (or re-place) a photo on a plan.
    pub fn place(
        &mut self,
        photo_id: Uuid,
        plan_id: Uuid,
        pos: PercentPos,
        method: PlacementMethod,
    ) {
        let pos = PercentPos::clamped(pos.x, pos.y);
        self.draft.insert(
            photo_id,
            DraftPlacement {
                plan_id,
                x: pos.x,
                y: pos.y,
                method,
            },
        );
    }

    /// Remove a photo's placement from the draft.
    pub fn unpin(&mut self, photo_id: Uuid) -> bool {
        self.draft.remove(&photo_id).is_some()
    }

    pub fn is_dirty(&self) -> bool {
        !self.changes().is_empty()
    }

    /// Diff the draft against the snapshot. Entries equal by
    /// `(plan_id, x, y)` produce no change.
    pub fn changes(&self) -> Vec<PlacementChange> {
        let mut changes = Vec::new();
        for (photo_id, draft) in &self.draft {
            let unchanged = self
                .snapshot
                .get(photo_id)
                .is_some_and(|orig| orig.same_position(draft));
            if !unchanged {
                changes.push(PlacementChange::Upsert {
                    photo_id: *photo_id,
                    draft: *draft,
                });
            }
        }
        for photo_id in self.snapshot.keys() {
            if !self.draft.contains_key(photo_id) {
                changes.push(PlacementChange::Remove {
                    photo_id: *photo_id,
                });
            }
        }
        changes
    }
}
