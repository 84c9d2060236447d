//! Callback handlers for the viewer, organized by interaction family:
//! - `viewport` - zoom controls
//! - `canvas` - pointer gestures on the plan (pan, pin drag, click-place)
//! - `photos` - side-list selection, drag-to-place, auto-placement
//! - `plans` - active-plan switching and plan deletion
//! - `session` - edit mode lifecycle
//! - `confirm` - the shared confirmation overlay

pub mod canvas;
pub mod confirm;
pub mod photos;
pub mod plans;
pub mod session;
pub mod viewport;

use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;

use planpin::state::{EditSession, InteractionState, ViewState};
use planpin::store::{MemoryBackend, PlacementStore};
use uuid::Uuid;

/// Which destructive action the confirmation overlay is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingConfirm {
    /// Throw away the edit session's unsaved diffs.
    DiscardEdits,
    /// Discard unsaved diffs, then close the window.
    DiscardAndQuit,
    /// Switch the active plan (cascades placement deletion).
    SwitchPlan(Uuid),
    /// Delete an inactive plan and its placements.
    DeletePlan(Uuid),
}

/// The project currently open in the viewer.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    pub id: Uuid,
    pub name: String,
    pub path: Option<PathBuf>,
}

pub type SharedStore = Rc<RefCell<PlacementStore<MemoryBackend>>>;
pub type SharedProject = Rc<RefCell<ProjectContext>>;
pub type SharedView = Rc<RefCell<ViewState>>;
pub type SharedInteraction = Rc<RefCell<InteractionState>>;
pub type SharedSession = Rc<RefCell<Option<EditSession>>>;
/// Currently selected photo in the side list.
pub type SharedSelection = Rc<RefCell<Option<Uuid>>>;
/// Photo being dragged out of the side list, if any.
pub type SharedListDrag = Rc<RefCell<Option<Uuid>>>;
pub type SharedConfirm = Rc<RefCell<Option<PendingConfirm>>>;
/// Re-entrancy guard for persistence mutations.
pub type SharedBusy = Rc<Cell<bool>>;
/// Rebuilds every Slint model from the store (or the open draft).
pub type Refresh = Rc<dyn Fn()>;
