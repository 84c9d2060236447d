//! Record types shared between the backend, the store, and the viewer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A floor-level reference image photos are pinned against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    /// Image location; a filesystem path for file-backed projects.
    pub image_url: String,
    pub width_px: f32,
    pub height_px: f32,
    pub created_at: DateTime<Utc>,
    /// At most one plan per project carries this flag. The store enforces
    /// it at the write boundary; the backend schema does not.
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// An uploaded site photo, optionally geotagged by the capture device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id: Uuid,
    pub project_id: Uuid,
    pub name: String,
    pub image_url: String,
    /// Natural pixel size, once known. Uploads report it; older records
    /// may lack it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pixel_size: Option<(f32, f32)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<DateTime<Utc>>,
    /// Detection bounding boxes `[x, y, w, h]` delivered by upstream
    /// analysis, in pixel or fractional units (see
    /// [`crate::geometry::classify_box_units`]).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub detections: Vec<[f32; 4]>,
    pub created_at: DateTime<Utc>,
}

/// How a placement's position came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementMethod {
    Manual,
    GpsSuggested,
    GpsExact,
}

impl PlacementMethod {
    pub fn is_gps_derived(&self) -> bool {
        matches!(self, Self::GpsSuggested | Self::GpsExact)
    }
}

/// The single current association of a photo to a position on a plan.
/// `x` and `y` are percentages of the plan's rendered bounds in `[0, 100]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub id: Uuid,
    pub photo_id: Uuid,
    pub plan_id: Uuid,
    pub x: f32,
    pub y: f32,
    pub method: PlacementMethod,
    pub created_at: DateTime<Utc>,
}
