//! Viewport state and the pointer interaction state machine.

use uuid::Uuid;

use crate::geometry::ImageRect;

/// Zoom stepping limits, sourced from the viewer config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomSteps {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl Default for ZoomSteps {
    fn default() -> Self {
        Self {
            min: 0.25,
            max: 4.0,
            step: 0.25,
        }
    }
}

/// Committed presentational state of the plan viewport. Purely visual:
/// never mixed into stored placement percentages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub zoom: f32,
    pub pan_x: f32,
    pub pan_y: f32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }
}

impl ViewState {
    pub fn zoom_in(&mut self, steps: &ZoomSteps) {
        self.zoom = (self.zoom + steps.step).min(steps.max);
    }

    pub fn zoom_out(&mut self, steps: &ZoomSteps) {
        self.zoom = (self.zoom - steps.step).max(steps.min);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Click-to-place is only allowed at the unzoomed view. Zoom is only
    /// ever assigned from the clamped step table, so equality is reliable.
    pub fn is_base_zoom(&self) -> bool {
        self.zoom == 1.0
    }

    /// Rendered bounds of a plan with the given natural pixel size under
    /// this view, in viewport coordinates.
    pub fn image_rect(&self, natural_w: f32, natural_h: f32) -> ImageRect {
        ImageRect::new(
            self.pan_x,
            self.pan_y,
            natural_w * self.zoom,
            natural_h * self.zoom,
        )
    }
}

/// What the pointer is currently doing. One variant at a time: panning,
/// dragging a pin, click-placing, and pin inspection are mutually
/// exclusive by construction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    /// Canvas pan gesture in progress.
    Panning {
        start_x: f32,
        start_y: f32,
        origin_pan_x: f32,
        origin_pan_y: f32,
    },
    /// An existing pin follows the pointer; only the transient overlay
    /// moves until pointer-up commits into the edit session.
    DraggingPin { photo_id: Uuid },
    /// Click-to-place armed for a specific unplaced photo.
    Placing { photo_id: Uuid },
    /// A placed pin's detail is open.
    ViewingPin { photo_id: Uuid },
}

impl InteractionState {
    /// Pointer-down on empty canvas. Does not fire while placing is armed
    /// or another gesture owns the pointer.
    pub fn begin_pan(&mut self, pointer: (f32, f32), view: &ViewState) -> bool {
        match self {
            Self::Idle | Self::ViewingPin { .. } => {
                *self = Self::Panning {
                    start_x: pointer.0,
                    start_y: pointer.1,
                    origin_pan_x: view.pan_x,
                    origin_pan_y: view.pan_y,
                };
                true
            }
            _ => false,
        }
    }

    /// Pointer-down on an existing pin during an edit session. Pin capture
    /// wins over canvas panning: a pan already started for this
    /// pointer-down is superseded.
    pub fn begin_pin_drag(&mut self, photo_id: Uuid, editing: bool) -> bool {
        if !editing {
            return false;
        }
        match self {
            Self::Idle | Self::Panning { .. } | Self::ViewingPin { .. } => {
                *self = Self::DraggingPin { photo_id };
                true
            }
            _ => false,
        }
    }

    /// Arm click-to-place for an unplaced photo. Requires an edit session
    /// with click-to-place enabled and the base zoom level; anything else
    /// is a disallowed gesture and a silent no-op.
    pub fn arm_placement(
        &mut self,
        photo_id: Uuid,
        editing: bool,
        click_to_place: bool,
        view: &ViewState,
    ) -> bool {
        if !editing || !click_to_place || !view.is_base_zoom() {
            return false;
        }
        match self {
            Self::Idle | Self::Placing { .. } | Self::ViewingPin { .. } => {
                *self = Self::Placing { photo_id };
                true
            }
            _ => false,
        }
    }

    /// Resolve an armed placement: returns the photo to place and returns
    /// to idle. The caller has already verified the click landed inside
    /// the plan image.
    pub fn resolve_placement(&mut self) -> Option<Uuid> {
        match *self {
            Self::Placing { photo_id } => {
                *self = Self::Idle;
                Some(photo_id)
            }
            _ => None,
        }
    }

    /// Open a placed pin's detail. Not available during an edit session,
    /// where pin clicks start drags instead.
    pub fn view_pin(&mut self, photo_id: Uuid, editing: bool) -> bool {
        if editing {
            return false;
        }
        match self {
            Self::Idle | Self::ViewingPin { .. } => {
                *self = Self::ViewingPin { photo_id };
                true
            }
            _ => false,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::Idle;
    }

    pub fn dragging_pin(&self) -> Option<Uuid> {
        match self {
            Self::DraggingPin { photo_id } => Some(*photo_id),
            _ => None,
        }
    }

    pub fn placing(&self) -> Option<Uuid> {
        match self {
            Self::Placing { photo_id } => Some(*photo_id),
            _ => None,
        }
    }

    pub fn is_panning(&self) -> bool {
        matches!(self, Self::Panning { .. })
    }
}
