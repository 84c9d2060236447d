//! Edit-session lifecycle: enter "move pins" mode, save the staged diffs,
//! or discard them.

use planpin::geometry::PercentPos;
use planpin::state::{EditSession, PlacementChange};
use slint::ComponentHandle;

use super::{
    PendingConfirm, Refresh, SharedBusy, SharedConfirm, SharedInteraction, SharedProject,
    SharedSession, SharedStore,
};
use crate::AppWindow;

pub fn setup_session_callbacks(
    ui: &AppWindow,
    store: SharedStore,
    project: SharedProject,
    session: SharedSession,
    interaction: SharedInteraction,
    confirm: SharedConfirm,
    busy: SharedBusy,
    refresh: Refresh,
) {
    setup_start_edit(
        ui,
        store.clone(),
        project.clone(),
        session.clone(),
        busy.clone(),
        refresh.clone(),
    );
    setup_save_edit(ui, store, session.clone(), interaction.clone(), busy, refresh.clone());
    setup_cancel_edit(ui, session, interaction, confirm, refresh);
}

fn setup_start_edit(
    ui: &AppWindow,
    store: SharedStore,
    project: SharedProject,
    session: SharedSession,
    busy: SharedBusy,
    refresh: Refresh,
) {
    let ui_weak = ui.as_weak();
    ui.on_start_edit(move || {
        let Some(ui) = ui_weak.upgrade() else { return };
        if busy.get() || session.borrow().is_some() {
            return;
        }
        let placements = match store.borrow().list_for_project(project.borrow().id) {
            Ok(placements) => placements,
            Err(err) => {
                tracing::error!(%err, "could not snapshot placements for editing");
                ui.set_status_text(format!("Could not start editing: {err}").into());
                return;
            }
        };
        *session.borrow_mut() = Some(EditSession::start(&placements));
        ui.set_status_text(
            "Move pins: drag a pin, or select an unplaced photo and click the plan".into(),
        );
        refresh();
    });
}

fn setup_save_edit(
    ui: &AppWindow,
    store: SharedStore,
    session: SharedSession,
    interaction: SharedInteraction,
    busy: SharedBusy,
    refresh: Refresh,
) {
    let ui_weak = ui.as_weak();
    ui.on_save_edit(move || {
        let Some(ui) = ui_weak.upgrade() else { return };
        if busy.get() {
            return;
        }
        let changes = match session.borrow().as_ref() {
            Some(session) => session.changes(),
            None => return,
        };

        let mut saved = 0usize;
        let mut failed = 0usize;
        if !changes.is_empty() {
            busy.set(true);
            ui.set_busy(true);
            // Every change is its own persistence call; one failure does
            // not roll back the others.
            let mut store = store.borrow_mut();
            for change in changes {
                let result = match change {
                    PlacementChange::Upsert { photo_id, draft } => store
                        .upsert(
                            photo_id,
                            draft.plan_id,
                            PercentPos {
                                x: draft.x,
                                y: draft.y,
                            },
                            draft.method,
                        )
                        .map(|_| ()),
                    PlacementChange::Remove { photo_id } => {
                        store.delete(photo_id).map(|_| ())
                    }
                };
                match result {
                    Ok(()) => saved += 1,
                    Err(err) => {
                        failed += 1;
                        tracing::error!(%err, "placement change failed to persist");
                    }
                }
            }
            busy.set(false);
            ui.set_busy(false);
        }

        *session.borrow_mut() = None;
        interaction.borrow_mut().reset();
        ui.set_placing_armed(false);

        let message = if failed > 0 {
            format!("Saved {saved} placement change(s); {failed} failed")
        } else if saved > 0 {
            format!("Saved {saved} placement change(s)")
        } else {
            "No placement changes".to_string()
        };
        ui.set_status_text(message.into());
        refresh();
    });
}

fn setup_cancel_edit(
    ui: &AppWindow,
    session: SharedSession,
    interaction: SharedInteraction,
    confirm: SharedConfirm,
    refresh: Refresh,
) {
    let ui_weak = ui.as_weak();
    ui.on_cancel_edit(move || {
        let Some(ui) = ui_weak.upgrade() else { return };
        let pending = match session.borrow().as_ref() {
            Some(session) => session.changes().len(),
            None => return,
        };
        if pending > 0 {
            *confirm.borrow_mut() = Some(PendingConfirm::DiscardEdits);
            ui.set_confirm_text(
                format!("Discard {pending} unsaved placement change(s)?").into(),
            );
            ui.set_show_confirm(true);
            return;
        }
        *session.borrow_mut() = None;
        interaction.borrow_mut().reset();
        ui.set_placing_armed(false);
        refresh();
    });
}
