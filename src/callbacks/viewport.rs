//! Zoom controls for the plan viewport.

use planpin::state::ZoomSteps;
use slint::ComponentHandle;

use super::{SharedInteraction, SharedView};
use crate::AppWindow;

pub fn setup_viewport_callbacks(
    ui: &AppWindow,
    view: SharedView,
    interaction: SharedInteraction,
    steps: ZoomSteps,
) {
    setup_zoom_in(ui, view.clone(), interaction.clone(), steps);
    setup_zoom_out(ui, view.clone(), interaction.clone(), steps);
    setup_zoom_reset(ui, view, interaction, steps);
}

/// Leaving the base zoom level disarms a pending click-to-place; targeting
/// above 1x is ambiguous and placement is not offered there.
fn disarm_placing_if_zoomed(
    ui: &AppWindow,
    view: &SharedView,
    interaction: &SharedInteraction,
) {
    if view.borrow().is_base_zoom() {
        return;
    }
    let armed = interaction.borrow().placing().is_some();
    if armed {
        interaction.borrow_mut().reset();
        ui.set_placing_armed(false);
    }
}

fn setup_zoom_in(
    ui: &AppWindow,
    view: SharedView,
    interaction: SharedInteraction,
    steps: ZoomSteps,
) {
    let ui_weak = ui.as_weak();
    ui.on_zoom_in(move || {
        let Some(ui) = ui_weak.upgrade() else { return };
        {
            let mut view = view.borrow_mut();
            view.zoom_in(&steps);
            ui.set_view_zoom(view.zoom);
        }
        disarm_placing_if_zoomed(&ui, &view, &interaction);
    });
}

fn setup_zoom_out(
    ui: &AppWindow,
    view: SharedView,
    interaction: SharedInteraction,
    steps: ZoomSteps,
) {
    let ui_weak = ui.as_weak();
    ui.on_zoom_out(move || {
        let Some(ui) = ui_weak.upgrade() else { return };
        {
            let mut view = view.borrow_mut();
            view.zoom_out(&steps);
            ui.set_view_zoom(view.zoom);
        }
        disarm_placing_if_zoomed(&ui, &view, &interaction);
    });
}

fn setup_zoom_reset(
    ui: &AppWindow,
    view: SharedView,
    _interaction: SharedInteraction,
    _steps: ZoomSteps,
) {
    let ui_weak = ui.as_weak();
    ui.on_zoom_reset(move || {
        let Some(ui) = ui_weak.upgrade() else { return };
        let mut view = view.borrow_mut();
        view.reset();
        ui.set_view_zoom(view.zoom);
        ui.set_view_pan_x(view.pan_x);
        ui.set_view_pan_y(view.pan_y);
    });
}
