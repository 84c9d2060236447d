//! Persistence layer: records, the backend collaborator trait, and the
//! placement store that owns the write-boundary invariants.

mod backend;
mod error;
mod memory;
mod models;
mod project_file;
#[allow(clippy::module_inception)]
mod store;

pub use backend::ProjectBackend;
pub use error::StoreError;
pub use memory::MemoryBackend;
pub use models::{GeoPoint, Photo, Placement, PlacementMethod, Plan};
pub use project_file::ProjectFile;
pub use store::{ActivePlanOutcome, ActivePlanSwitch, PlacementStore};
