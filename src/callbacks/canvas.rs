//! Pointer gestures on the plan canvas: panning, pin dragging, and
//! click-to-place resolution.
//!
//! Pointer-moves only touch the transient overlay/transform properties;
//! the committed view state, the edit draft, and the store see exactly one
//! write per gesture, at pointer-up.

use std::rc::Rc;

use planpin::config::PlacementConfig;
use planpin::geometry::{self, ImageRect, PercentPos};
use planpin::state::{InteractionState, ViewState};
use planpin::store::PlacementMethod;
use slint::{ComponentHandle, Model};
use uuid::Uuid;

use super::{
    Refresh, SharedInteraction, SharedProject, SharedSelection, SharedSession, SharedStore,
    SharedView,
};
use crate::utils::{method_label, pin_tint};
use crate::{AppWindow, PinMarker};

/// Pointer hit radius around a pin center, in viewport pixels.
const PIN_HIT_RADIUS: f32 = 12.0;
/// Press-to-release travel below this counts as a click, not a pan.
const CLICK_SLOP: f32 = 4.0;

/// Rendered bounds of the active plan under the committed view.
pub fn plan_rect(ui: &AppWindow, view: &ViewState) -> ImageRect {
    view.image_rect(ui.get_plan_width_px(), ui.get_plan_height_px())
}

/// Topmost pin under the pointer, if any.
fn hit_pin(pins: &slint::VecModel<PinMarker>, rect: &ImageRect, x: f32, y: f32) -> Option<Uuid> {
    for i in (0..pins.row_count()).rev() {
        if let Some(pin) = pins.row_data(i) {
            let (px, py) = geometry::to_pixels(&PercentPos { x: pin.x, y: pin.y }, rect);
            let dx = x - px;
            let dy = y - py;
            if (dx * dx + dy * dy).sqrt() < PIN_HIT_RADIUS {
                return Uuid::parse_str(pin.photo_id.as_str()).ok();
            }
        }
    }
    None
}

fn show_pin_detail(ui: &AppWindow, store: &SharedStore, project: &SharedProject, photo_id: Uuid) {
    let store = store.borrow();
    let photo = store
        .photos(project.borrow().id)
        .ok()
        .and_then(|photos| photos.into_iter().find(|p| p.id == photo_id));
    let name = photo
        .as_ref()
        .map(|p| p.name.clone())
        .unwrap_or_else(|| photo_id.to_string());
    let mut text = match store.placement_for_photo(photo_id) {
        Ok(Some(p)) => format!(
            "{name}\nplaced {} at ({:.1}, {:.1})",
            method_label(p.method),
            p.x,
            p.y
        ),
        _ => name,
    };
    if let Some(photo) = photo {
        if !photo.detections.is_empty() {
            // Boxes that cannot be normalized yet are hidden, not shown
            // mis-scaled.
            let renderable = photo
                .detections
                .iter()
                .filter_map(|b| geometry::normalize_box(b, photo.pixel_size))
                .count();
            let hidden = photo.detections.len() - renderable;
            text.push_str(&format!("\n{renderable} detection(s)"));
            if hidden > 0 {
                text.push_str(&format!(", {hidden} hidden (image size unknown)"));
            }
        }
    }
    ui.set_detail_photo_id(photo_id.to_string().into());
    ui.set_detail_text(text.into());
    ui.set_show_detail(true);
}

pub fn setup_canvas_callbacks(
    ui: &AppWindow,
    view: SharedView,
    interaction: SharedInteraction,
    session: SharedSession,
    store: SharedStore,
    project: SharedProject,
    selection: SharedSelection,
    pins: Rc<slint::VecModel<PinMarker>>,
    palette: PlacementConfig,
    refresh: Refresh,
) {
    setup_pointer_down(
        ui,
        view.clone(),
        interaction.clone(),
        session.clone(),
        store.clone(),
        project.clone(),
        selection.clone(),
        pins,
        palette,
        refresh.clone(),
    );
    setup_pointer_moved(ui, view.clone(), interaction.clone());
    setup_pointer_up(ui, view, interaction, session, store, project, selection, refresh);
}

fn setup_pointer_down(
    ui: &AppWindow,
    view: SharedView,
    interaction: SharedInteraction,
    session: SharedSession,
    store: SharedStore,
    project: SharedProject,
    selection: SharedSelection,
    pins: Rc<slint::VecModel<PinMarker>>,
    palette: PlacementConfig,
    refresh: Refresh,
) {
    let ui_weak = ui.as_weak();
    ui.on_canvas_down(move |x, y| {
        let Some(ui) = ui_weak.upgrade() else { return };
        let editing = session.borrow().is_some();
        let view_now = *view.borrow();
        let rect = plan_rect(&ui, &view_now);
        let hit = hit_pin(&pins, &rect, x, y);

        if editing {
            if let Some(photo_id) = hit {
                // Pin capture wins over canvas panning.
                let started = interaction.borrow_mut().begin_pin_drag(photo_id, true);
                if started {
                    let draft = session
                        .borrow()
                        .as_ref()
                        .and_then(|s| s.draft_for(photo_id).copied());
                    if let Some(draft) = draft {
                        ui.set_drag_pin_x(draft.x);
                        ui.set_drag_pin_y(draft.y);
                        ui.set_drag_pin_tint(pin_tint(draft.method, &palette));
                    }
                    ui.set_show_drag_pin(true);
                }
                return;
            }
        } else if let Some(photo_id) = hit {
            let opened = interaction.borrow_mut().view_pin(photo_id, false);
            if opened {
                *selection.borrow_mut() = Some(photo_id);
                show_pin_detail(&ui, &store, &project, photo_id);
                refresh();
            }
            return;
        }

        let mut state = interaction.borrow_mut();
        if state.placing().is_some() {
            // An armed placement resolves on the release; the press is inert.
            return;
        }
        state.begin_pan((x, y), &view_now);
    });
}

fn setup_pointer_moved(ui: &AppWindow, view: SharedView, interaction: SharedInteraction) {
    let ui_weak = ui.as_weak();
    ui.on_canvas_moved(move |x, y| {
        let Some(ui) = ui_weak.upgrade() else { return };
        match *interaction.borrow() {
            InteractionState::Panning {
                start_x,
                start_y,
                origin_pan_x,
                origin_pan_y,
            } => {
                // Transient tier: write the retained transform directly.
                ui.set_view_pan_x(origin_pan_x + (x - start_x));
                ui.set_view_pan_y(origin_pan_y + (y - start_y));
            }
            InteractionState::DraggingPin { .. } => {
                let rect = plan_rect(&ui, &view.borrow());
                let pos = geometry::to_percent(x, y, &rect);
                ui.set_drag_pin_x(pos.x);
                ui.set_drag_pin_y(pos.y);
            }
            _ => {}
        }
    });
}

#[allow(clippy::too_many_arguments)]
fn setup_pointer_up(
    ui: &AppWindow,
    view: SharedView,
    interaction: SharedInteraction,
    session: SharedSession,
    store: SharedStore,
    project: SharedProject,
    selection: SharedSelection,
    refresh: Refresh,
) {
    let ui_weak = ui.as_weak();
    ui.on_canvas_up(move |x, y| {
        let Some(ui) = ui_weak.upgrade() else { return };
        match *interaction.borrow() {
            InteractionState::Panning {
                start_x,
                start_y,
                origin_pan_x,
                origin_pan_y,
            } => {
                interaction.borrow_mut().reset();
                let dx = x - start_x;
                let dy = y - start_y;
                if dx.abs() < CLICK_SLOP && dy.abs() < CLICK_SLOP {
                    // A click on empty canvas clears selection and detail.
                    ui.set_view_pan_x(origin_pan_x);
                    ui.set_view_pan_y(origin_pan_y);
                    ui.set_show_detail(false);
                    *selection.borrow_mut() = None;
                    refresh();
                } else {
                    // Committed tier: one view-state write per gesture.
                    let mut committed = view.borrow_mut();
                    committed.pan_x = origin_pan_x + dx;
                    committed.pan_y = origin_pan_y + dy;
                    ui.set_view_pan_x(committed.pan_x);
                    ui.set_view_pan_y(committed.pan_y);
                }
            }
            InteractionState::DraggingPin { photo_id } => {
                interaction.borrow_mut().reset();
                ui.set_show_drag_pin(false);
                // A release outside the image clamps to the nearest edge.
                let rect = plan_rect(&ui, &view.borrow());
                let pos = geometry::to_percent(x, y, &rect);
                if let Some(session) = session.borrow_mut().as_mut() {
                    session.move_pin(photo_id, pos);
                }
                refresh();
            }
            InteractionState::Placing { photo_id } => {
                let rect = plan_rect(&ui, &view.borrow());
                if !rect.contains(x, y) {
                    // Clicks outside the plan leave the placement armed.
                    return;
                }
                interaction.borrow_mut().reset();
                ui.set_placing_armed(false);
                let pos = geometry::to_percent(x, y, &rect);
                let active = store.borrow().active_plan(project.borrow().id);
                match active {
                    Ok(Some(plan)) => {
                        if let Some(session) = session.borrow_mut().as_mut() {
                            session.place(photo_id, plan.id, pos, PlacementMethod::Manual);
                        }
                        refresh();
                    }
                    Ok(None) => ui.set_status_text("No active plan to place on".into()),
                    Err(err) => {
                        tracing::warn!(%err, "could not resolve active plan");
                        ui.set_status_text(format!("Placement failed: {err}").into());
                    }
                }
            }
            _ => {}
        }
    });
}
