//! Plan-list interactions: active-plan switching and plan deletion. Both
//! are destructive enough to route through the confirmation overlay.

use std::rc::Rc;

use slint::{ComponentHandle, Model};
use uuid::Uuid;

use super::{PendingConfirm, SharedBusy, SharedConfirm, SharedSession};
use crate::{AppWindow, PlanEntry};

pub fn setup_plan_callbacks(
    ui: &AppWindow,
    session: SharedSession,
    confirm: SharedConfirm,
    busy: SharedBusy,
    plans: Rc<slint::VecModel<PlanEntry>>,
) {
    setup_plan_clicked(ui, session.clone(), confirm.clone(), busy.clone(), plans.clone());
    setup_delete_plan(ui, session, confirm, busy, plans);
}

fn setup_plan_clicked(
    ui: &AppWindow,
    session: SharedSession,
    confirm: SharedConfirm,
    busy: SharedBusy,
    plans: Rc<slint::VecModel<PlanEntry>>,
) {
    let ui_weak = ui.as_weak();
    ui.on_plan_clicked(move |index| {
        let Some(ui) = ui_weak.upgrade() else { return };
        if busy.get() {
            return;
        }
        let Some(entry) = plans.row_data(index as usize) else { return };
        if entry.active {
            return;
        }
        let Ok(plan_id) = Uuid::parse_str(entry.id.as_str()) else { return };
        if session.borrow().is_some() {
            ui.set_status_text("Finish the edit session before switching plans".into());
            return;
        }
        *confirm.borrow_mut() = Some(PendingConfirm::SwitchPlan(plan_id));
        ui.set_confirm_text(
            format!(
                "Make \"{}\" the active plan? Pins on the current active plan will be removed.",
                entry.name
            )
            .into(),
        );
        ui.set_show_confirm(true);
    });
}

fn setup_delete_plan(
    ui: &AppWindow,
    session: SharedSession,
    confirm: SharedConfirm,
    busy: SharedBusy,
    plans: Rc<slint::VecModel<PlanEntry>>,
) {
    let ui_weak = ui.as_weak();
    ui.on_delete_plan_clicked(move |index| {
        let Some(ui) = ui_weak.upgrade() else { return };
        if busy.get() {
            return;
        }
        let Some(entry) = plans.row_data(index as usize) else { return };
        let Ok(plan_id) = Uuid::parse_str(entry.id.as_str()) else { return };
        if session.borrow().is_some() {
            ui.set_status_text("Finish the edit session before deleting plans".into());
            return;
        }
        // The store enforces these too; checking here gives a message
        // instead of a failed confirm.
        if plans.row_count() <= 1 {
            ui.set_status_text("Cannot delete the project's only plan".into());
            return;
        }
        if entry.active {
            ui.set_status_text(
                "Cannot delete the active plan; designate another plan active first".into(),
            );
            return;
        }
        *confirm.borrow_mut() = Some(PendingConfirm::DeletePlan(plan_id));
        ui.set_confirm_text(
            format!("Delete plan \"{}\" and its placements?", entry.name).into(),
        );
        ui.set_show_confirm(true);
    });
}
