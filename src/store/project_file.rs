//! JSON project file: the local stand-in for the upload/CRUD service.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::StoreError;
use super::memory::MemoryBackend;
use super::models::{Photo, Placement, Plan};

/// On-disk shape of a project: everything the viewer needs in one file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectFile {
    pub project_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub plans: Vec<Plan>,
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde(default)]
    pub placements: Vec<Placement>,
}

impl ProjectFile {
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn into_backend(self) -> MemoryBackend {
        MemoryBackend::with_records(self.plans, self.photos, self.placements)
    }

    /// Snapshot the backend's records back into file shape.
    pub fn from_backend(backend: &MemoryBackend, project_id: Uuid, name: &str) -> Self {
        Self {
            project_id,
            name: name.to_string(),
            plans: backend.all_plans().to_vec(),
            photos: backend.all_photos().to_vec(),
            placements: backend.all_placements().to_vec(),
        }
    }
}
