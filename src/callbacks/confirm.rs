//! The shared confirmation overlay. Whatever destructive action is
//! pending, acceptance runs it here; rejection just closes the overlay.

use slint::ComponentHandle;
use uuid::Uuid;

use super::{
    PendingConfirm, Refresh, SharedBusy, SharedConfirm, SharedInteraction, SharedProject,
    SharedSession, SharedStore,
};
use crate::AppWindow;

pub fn setup_confirm_callbacks(
    ui: &AppWindow,
    store: SharedStore,
    project: SharedProject,
    session: SharedSession,
    interaction: SharedInteraction,
    confirm: SharedConfirm,
    busy: SharedBusy,
    refresh: Refresh,
) {
    setup_accepted(ui, store, project, session, interaction, confirm.clone(), busy, refresh);
    setup_rejected(ui, confirm);
}

#[allow(clippy::too_many_arguments)]
fn setup_accepted(
    ui: &AppWindow,
    store: SharedStore,
    project: SharedProject,
    session: SharedSession,
    interaction: SharedInteraction,
    confirm: SharedConfirm,
    busy: SharedBusy,
    refresh: Refresh,
) {
    let ui_weak = ui.as_weak();
    ui.on_confirm_accepted(move || {
        let Some(ui) = ui_weak.upgrade() else { return };
        ui.set_show_confirm(false);
        let Some(pending) = confirm.borrow_mut().take() else { return };
        match pending {
            PendingConfirm::DiscardEdits => {
                *session.borrow_mut() = None;
                interaction.borrow_mut().reset();
                ui.set_placing_armed(false);
                ui.set_status_text("Edits discarded".into());
                refresh();
            }
            PendingConfirm::DiscardAndQuit => {
                *session.borrow_mut() = None;
                let _ = slint::quit_event_loop();
            }
            PendingConfirm::SwitchPlan(plan_id) => {
                switch_active_plan(&ui, &store, &project, &busy, plan_id, &refresh);
            }
            PendingConfirm::DeletePlan(plan_id) => {
                delete_plan(&ui, &store, &project, &busy, plan_id, &refresh);
            }
        }
    });
}

fn setup_rejected(ui: &AppWindow, confirm: SharedConfirm) {
    let ui_weak = ui.as_weak();
    ui.on_confirm_rejected(move || {
        let Some(ui) = ui_weak.upgrade() else { return };
        confirm.borrow_mut().take();
        ui.set_show_confirm(false);
    });
}

fn switch_active_plan(
    ui: &AppWindow,
    store: &SharedStore,
    project: &SharedProject,
    busy: &SharedBusy,
    plan_id: Uuid,
    refresh: &Refresh,
) {
    if busy.get() {
        return;
    }
    busy.set(true);
    ui.set_busy(true);
    let result = store
        .borrow_mut()
        .set_active_plan(project.borrow().id, plan_id);
    busy.set(false);
    ui.set_busy(false);

    match result {
        Ok(outcome) => match outcome.cascade {
            Ok(cleared) => {
                tracing::info!(plan = %plan_id, cleared, "active plan switched");
                ui.set_status_text(
                    format!("Active plan switched; {cleared} stale placement(s) cleared").into(),
                );
            }
            // The switch stands; only the cleanup is in doubt.
            Err(err) => {
                ui.set_status_text(
                    format!(
                        "Active plan switched, but stale placements were not cleared: {err}"
                    )
                    .into(),
                );
            }
        },
        Err(err) => {
            tracing::error!(%err, plan = %plan_id, "active plan switch failed");
            ui.set_status_text(format!("Could not switch active plan: {err}").into());
        }
    }
    refresh();
}

fn delete_plan(
    ui: &AppWindow,
    store: &SharedStore,
    project: &SharedProject,
    busy: &SharedBusy,
    plan_id: Uuid,
    refresh: &Refresh,
) {
    if busy.get() {
        return;
    }
    busy.set(true);
    ui.set_busy(true);
    let result = store.borrow_mut().delete_plan(project.borrow().id, plan_id);
    busy.set(false);
    ui.set_busy(false);

    match result {
        Ok(()) => ui.set_status_text("Plan deleted".into()),
        Err(err) => {
            tracing::error!(%err, plan = %plan_id, "plan deletion failed");
            ui.set_status_text(format!("Could not delete plan: {err}").into());
        }
    }
    refresh();
}
