//! Side-list interactions: selection, click-to-place arming, drag-out
//! placement, and best-effort auto-placement.

use std::collections::HashSet;
use std::rc::Rc;

use planpin::autoplace::auto_position;
use planpin::config::AppConfig;
use planpin::geometry;
use planpin::store::PlacementMethod;
use slint::{ComponentHandle, Model};
use uuid::Uuid;

use super::canvas::plan_rect;
use super::{
    Refresh, SharedBusy, SharedInteraction, SharedListDrag, SharedProject, SharedSelection,
    SharedSession, SharedStore, SharedView,
};
use crate::utils::pin_tint;
use crate::{AppWindow, PhotoEntry};

#[allow(clippy::too_many_arguments)]
pub fn setup_photo_callbacks(
    ui: &AppWindow,
    store: SharedStore,
    project: SharedProject,
    session: SharedSession,
    interaction: SharedInteraction,
    view: SharedView,
    selection: SharedSelection,
    list_drag: SharedListDrag,
    busy: SharedBusy,
    photos: Rc<slint::VecModel<PhotoEntry>>,
    config: AppConfig,
    refresh: Refresh,
) {
    setup_photo_clicked(
        ui,
        session.clone(),
        interaction.clone(),
        view.clone(),
        selection,
        photos.clone(),
        config.clone(),
        refresh.clone(),
    );
    setup_photo_drag(
        ui,
        store.clone(),
        project.clone(),
        session.clone(),
        view,
        list_drag,
        busy.clone(),
        photos,
        config.clone(),
        refresh.clone(),
    );
    setup_auto_place(ui, store, project, session, busy, config, refresh);
}

fn photo_id_of(entry: &PhotoEntry) -> Option<Uuid> {
    Uuid::parse_str(entry.id.as_str()).ok()
}

#[allow(clippy::too_many_arguments)]
fn setup_photo_clicked(
    ui: &AppWindow,
    session: SharedSession,
    interaction: SharedInteraction,
    view: SharedView,
    selection: SharedSelection,
    photos: Rc<slint::VecModel<PhotoEntry>>,
    config: AppConfig,
    refresh: Refresh,
) {
    let ui_weak = ui.as_weak();
    ui.on_photo_clicked(move |index| {
        let Some(ui) = ui_weak.upgrade() else { return };
        let Some(entry) = photos.row_data(index as usize) else { return };
        let Some(photo_id) = photo_id_of(&entry) else { return };

        *selection.borrow_mut() = Some(photo_id);

        let editing = session.borrow().is_some();
        let placed = session
            .borrow()
            .as_ref()
            .map(|s| s.is_placed(photo_id))
            .unwrap_or(entry.placed);

        if editing && !placed {
            let armed = interaction.borrow_mut().arm_placement(
                photo_id,
                true,
                config.viewer.click_to_place,
                &view.borrow(),
            );
            ui.set_placing_armed(armed);
        } else if interaction.borrow().placing().is_some() {
            // Selecting a placed photo stands down a pending placement.
            interaction.borrow_mut().reset();
            ui.set_placing_armed(false);
        }
        refresh();
    });
}

#[allow(clippy::too_many_arguments)]
fn setup_photo_drag(
    ui: &AppWindow,
    store: SharedStore,
    project: SharedProject,
    session: SharedSession,
    view: SharedView,
    list_drag: SharedListDrag,
    busy: SharedBusy,
    photos: Rc<slint::VecModel<PhotoEntry>>,
    config: AppConfig,
    refresh: Refresh,
) {
    {
        let list_drag = list_drag.clone();
        let session = session.clone();
        let photos = photos.clone();
        let palette = config.placement.clone();
        let ui_weak = ui.as_weak();
        ui.on_photo_drag_started(move |index| {
            let Some(ui) = ui_weak.upgrade() else { return };
            let Some(entry) = photos.row_data(index as usize) else { return };
            let Some(photo_id) = photo_id_of(&entry) else { return };
            let placed = session
                .borrow()
                .as_ref()
                .map(|s| s.is_placed(photo_id))
                .unwrap_or(entry.placed);
            if placed {
                // Placed photos are repositioned on the canvas, not re-dragged
                // from the list.
                return;
            }
            *list_drag.borrow_mut() = Some(photo_id);
            ui.set_drag_pin_tint(pin_tint(PlacementMethod::Manual, &palette));
        });
    }

    {
        let list_drag = list_drag.clone();
        let view = view.clone();
        let ui_weak = ui.as_weak();
        ui.on_photo_drag_moved(move |x, y| {
            let Some(ui) = ui_weak.upgrade() else { return };
            if list_drag.borrow().is_none() {
                return;
            }
            let rect = plan_rect(&ui, &view.borrow());
            if rect.contains(x, y) {
                let pos = geometry::to_percent(x, y, &rect);
                ui.set_drag_pin_x(pos.x);
                ui.set_drag_pin_y(pos.y);
                ui.set_show_drag_pin(true);
            } else {
                ui.set_show_drag_pin(false);
            }
        });
    }

    let ui_weak = ui.as_weak();
    ui.on_photo_drag_dropped(move |x, y| {
        let Some(ui) = ui_weak.upgrade() else { return };
        let Some(photo_id) = list_drag.borrow_mut().take() else { return };
        ui.set_show_drag_pin(false);

        let rect = plan_rect(&ui, &view.borrow());
        if !rect.contains(x, y) {
            // Dropped back onto the list: nothing happened.
            return;
        }
        let pos = geometry::to_percent(x, y, &rect);

        let active = store.borrow().active_plan(project.borrow().id);
        let plan = match active {
            Ok(Some(plan)) => plan,
            Ok(None) => {
                ui.set_status_text("No active plan to place on".into());
                return;
            }
            Err(err) => {
                tracing::warn!(%err, "could not resolve active plan");
                ui.set_status_text(format!("Placement failed: {err}").into());
                return;
            }
        };

        if session.borrow().is_some() {
            // With an edit session open, drops stage into the draft so the
            // draft stays the single source the viewer reads from.
            if let Some(session) = session.borrow_mut().as_mut() {
                session.place(photo_id, plan.id, pos, PlacementMethod::Manual);
            }
            refresh();
            return;
        }

        // Unstaged write-through path.
        if busy.get() {
            return;
        }
        busy.set(true);
        ui.set_busy(true);
        let result = store
            .borrow_mut()
            .upsert(photo_id, plan.id, pos, PlacementMethod::Manual);
        busy.set(false);
        ui.set_busy(false);

        match result {
            Ok(_) => ui.set_status_text("Photo placed".into()),
            Err(err) => {
                tracing::error!(%err, photo = %photo_id, "placement upsert failed");
                ui.set_status_text(format!("Placement failed: {err}").into());
            }
        }
        refresh();
    });
}

fn setup_auto_place(
    ui: &AppWindow,
    store: SharedStore,
    project: SharedProject,
    session: SharedSession,
    busy: SharedBusy,
    config: AppConfig,
    refresh: Refresh,
) {
    let ui_weak = ui.as_weak();
    ui.on_auto_place_clicked(move || {
        let Some(ui) = ui_weak.upgrade() else { return };
        if busy.get() {
            return;
        }
        let project_id = project.borrow().id;
        let editing = session.borrow().is_some();

        let (plan, targets) = {
            let store = store.borrow();
            let plan = match store.active_plan(project_id) {
                Ok(Some(plan)) => plan,
                Ok(None) => {
                    ui.set_status_text("No active plan to place on".into());
                    return;
                }
                Err(err) => {
                    ui.set_status_text(format!("Auto-place failed: {err}").into());
                    return;
                }
            };
            let photos = match store.photos(project_id) {
                Ok(photos) => photos,
                Err(err) => {
                    ui.set_status_text(format!("Auto-place failed: {err}").into());
                    return;
                }
            };
            let placed: HashSet<Uuid> = if editing {
                session
                    .borrow()
                    .as_ref()
                    .map(|s| s.drafts().map(|(id, _)| *id).collect())
                    .unwrap_or_default()
            } else {
                match store.list_for_project(project_id) {
                    Ok(placements) => placements.iter().map(|p| p.photo_id).collect(),
                    Err(err) => {
                        ui.set_status_text(format!("Auto-place failed: {err}").into());
                        return;
                    }
                }
            };
            let targets: Vec<Uuid> = photos
                .iter()
                .filter(|p| !placed.contains(&p.id))
                .map(|p| p.id)
                .collect();
            (plan, targets)
        };

        if targets.is_empty() {
            ui.set_status_text("Every photo is already placed".into());
            return;
        }

        busy.set(true);
        ui.set_busy(true);
        let mut rng = rand::thread_rng();
        let margin = config.placement.auto_margin_px;
        let mut placed_count = 0usize;
        let mut failed = 0usize;
        for photo_id in targets {
            let pos = auto_position(plan.width_px, plan.height_px, margin, &mut rng);
            if editing {
                if let Some(session) = session.borrow_mut().as_mut() {
                    session.place(photo_id, plan.id, pos, PlacementMethod::GpsSuggested);
                    placed_count += 1;
                }
            } else {
                match store
                    .borrow_mut()
                    .upsert(photo_id, plan.id, pos, PlacementMethod::GpsSuggested)
                {
                    Ok(_) => placed_count += 1,
                    Err(err) => {
                        failed += 1;
                        tracing::warn!(%err, photo = %photo_id, "auto-place upsert failed");
                    }
                }
            }
        }
        busy.set(false);
        ui.set_busy(false);

        let mut message = format!("Auto-placed {placed_count} photo(s)");
        if failed > 0 {
            message.push_str(&format!(", {failed} failed"));
        }
        ui.set_status_text(message.into());
        refresh();
    });
}
