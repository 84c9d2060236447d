slint::include_modules!();

mod callbacks;
mod utils;

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use planpin::config;
use planpin::state::{InteractionState, ViewState, ZoomSteps};
use planpin::store::{MemoryBackend, PlacementStore, ProjectFile};
use slint::ComponentHandle;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use callbacks::{
    PendingConfirm, ProjectContext, Refresh, SharedBusy, SharedConfirm, SharedInteraction,
    SharedListDrag, SharedProject, SharedSelection, SharedSession, SharedStore, SharedView,
};
use utils::{pin_tint, placeholder_plan};

fn main() -> Result<(), slint::PlatformError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("PLANPIN_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = config::load_config();
    let ui = AppWindow::new()?;

    // Open the project file given on the command line, if any.
    let args: Vec<String> = std::env::args().collect();
    let (backend, context, status) = match args.get(1) {
        Some(path_str) => {
            let path = PathBuf::from(path_str);
            match ProjectFile::load(&path) {
                Ok(file) => {
                    let context = ProjectContext {
                        id: file.project_id,
                        name: file.name.clone(),
                        path: Some(path.clone()),
                    };
                    let status = format!("Loaded {}", path.display());
                    (file.into_backend(), context, status)
                }
                Err(err) => {
                    tracing::error!(%err, path = %path.display(), "project load failed");
                    let context = ProjectContext {
                        id: Uuid::new_v4(),
                        name: "untitled".to_string(),
                        path: Some(path),
                    };
                    (MemoryBackend::new(), context, format!("Project load error: {err}"))
                }
            }
        }
        None => (
            MemoryBackend::new(),
            ProjectContext {
                id: Uuid::new_v4(),
                name: "untitled".to_string(),
                path: None,
            },
            "No project provided (pass path as first arg)".to_string(),
        ),
    };
    ui.set_status_text(status.into());
    ui.set_project_name(context.name.clone().into());

    let store: SharedStore = Rc::new(RefCell::new(PlacementStore::new(backend)));
    let project: SharedProject = Rc::new(RefCell::new(context));
    let view: SharedView = Rc::new(RefCell::new(ViewState::default()));
    let interaction: SharedInteraction = Rc::new(RefCell::new(InteractionState::Idle));
    let session: SharedSession = Rc::new(RefCell::new(None));
    let selection: SharedSelection = Rc::new(RefCell::new(None));
    let list_drag: SharedListDrag = Rc::new(RefCell::new(None));
    let confirm: SharedConfirm = Rc::new(RefCell::new(None));
    let busy: SharedBusy = Rc::new(Cell::new(false));

    let pins_model = Rc::new(slint::VecModel::from(Vec::<PinMarker>::new()));
    let photos_model = Rc::new(slint::VecModel::from(Vec::<PhotoEntry>::new()));
    let plans_model = Rc::new(slint::VecModel::from(Vec::<PlanEntry>::new()));
    ui.set_pins(pins_model.clone().into());
    ui.set_photos(photos_model.clone().into());
    ui.set_plans(plans_model.clone().into());

    let placeholder = placeholder_plan();
    ui.set_plan_source(placeholder.clone());

    let steps = ZoomSteps {
        min: config.viewer.min_zoom,
        max: config.viewer.max_zoom,
        step: config.viewer.zoom_step,
    };

    // Rebuilds every model from the store, or from the draft while an edit
    // session is open. The only writer of committed UI state.
    let refresh: Refresh = {
        let ui_weak = ui.as_weak();
        let store = store.clone();
        let project = project.clone();
        let session = session.clone();
        let selection = selection.clone();
        let pins_model = pins_model.clone();
        let photos_model = photos_model.clone();
        let plans_model = plans_model.clone();
        let palette = config.placement.clone();
        let placeholder = placeholder.clone();
        let image_cache: RefCell<Option<(String, slint::Image)>> = RefCell::new(None);
        Rc::new(move || {
            let Some(ui) = ui_weak.upgrade() else { return };
            let project_id = project.borrow().id;
            let store_ref = store.borrow();

            let plans = match store_ref.plans(project_id) {
                Ok(plans) => plans,
                Err(err) => {
                    tracing::error!(%err, "plan list failed");
                    ui.set_status_text(format!("Could not load plans: {err}").into());
                    return;
                }
            };
            let active = plans.iter().find(|p| p.is_active).cloned();

            plans_model.set_vec(
                plans
                    .iter()
                    .map(|p| PlanEntry {
                        id: p.id.to_string().into(),
                        name: p.name.clone().into(),
                        active: p.is_active,
                    })
                    .collect::<Vec<_>>(),
            );

            match &active {
                Some(plan) => {
                    ui.set_plan_name(plan.name.clone().into());
                    ui.set_plan_width_px(plan.width_px);
                    ui.set_plan_height_px(plan.height_px);
                    let mut cache = image_cache.borrow_mut();
                    let cached = match cache.as_ref() {
                        Some((url, image)) if *url == plan.image_url => Some(image.clone()),
                        _ => None,
                    };
                    let image = match cached {
                        Some(image) => image,
                        None => {
                            let image = slint::Image::load_from_path(Path::new(&plan.image_url))
                                .unwrap_or_else(|_| {
                                    tracing::warn!(
                                        url = %plan.image_url,
                                        "plan image unreadable, showing placeholder"
                                    );
                                    placeholder.clone()
                                });
                            *cache = Some((plan.image_url.clone(), image.clone()));
                            image
                        }
                    };
                    ui.set_plan_source(image);
                }
                None => {
                    ui.set_plan_name("No active plan".into());
                    ui.set_plan_width_px(96.0);
                    ui.set_plan_height_px(96.0);
                    ui.set_plan_source(placeholder.clone());
                }
            }

            let session_ref = session.borrow();
            let selected = *selection.borrow();
            let mut placed_ids: HashSet<Uuid> = HashSet::new();
            let mut pin_rows: Vec<PinMarker> = Vec::new();
            if let Some(session) = session_ref.as_ref() {
                for (photo_id, draft) in session.drafts() {
                    placed_ids.insert(*photo_id);
                    if active.as_ref().is_some_and(|p| p.id == draft.plan_id) {
                        pin_rows.push(PinMarker {
                            photo_id: photo_id.to_string().into(),
                            x: draft.x,
                            y: draft.y,
                            tint: pin_tint(draft.method, &palette),
                            selected: selected == Some(*photo_id),
                        });
                    }
                }
            } else {
                match store_ref.list_for_project(project_id) {
                    Ok(placements) => {
                        for p in placements {
                            placed_ids.insert(p.photo_id);
                            if active.as_ref().is_some_and(|plan| plan.id == p.plan_id) {
                                pin_rows.push(PinMarker {
                                    photo_id: p.photo_id.to_string().into(),
                                    x: p.x,
                                    y: p.y,
                                    tint: pin_tint(p.method, &palette),
                                    selected: selected == Some(p.photo_id),
                                });
                            }
                        }
                    }
                    Err(err) => {
                        tracing::error!(%err, "placement list failed");
                        ui.set_status_text(format!("Could not load placements: {err}").into());
                    }
                }
            }
            // Stable z-order so topmost-first hit testing stays consistent
            // across refreshes.
            pin_rows.sort_by(|a, b| a.photo_id.as_str().cmp(b.photo_id.as_str()));
            pins_model.set_vec(pin_rows);

            match store_ref.photos(project_id) {
                Ok(photos) => {
                    photos_model.set_vec(
                        photos
                            .iter()
                            .map(|p| PhotoEntry {
                                id: p.id.to_string().into(),
                                name: p.name.clone().into(),
                                placed: placed_ids.contains(&p.id),
                                selected: selected == Some(p.id),
                                has_gps: p.location.is_some(),
                            })
                            .collect::<Vec<_>>(),
                    );
                }
                Err(err) => {
                    tracing::error!(%err, "photo list failed");
                    ui.set_status_text(format!("Could not load photos: {err}").into());
                }
            }

            ui.set_edit_mode(session_ref.is_some());
            ui.set_edit_dirty(session_ref.as_ref().is_some_and(|s| s.is_dirty()));
        })
    };
    refresh();

    callbacks::viewport::setup_viewport_callbacks(&ui, view.clone(), interaction.clone(), steps);
    callbacks::canvas::setup_canvas_callbacks(
        &ui,
        view.clone(),
        interaction.clone(),
        session.clone(),
        store.clone(),
        project.clone(),
        selection.clone(),
        pins_model.clone(),
        config.placement.clone(),
        refresh.clone(),
    );
    callbacks::photos::setup_photo_callbacks(
        &ui,
        store.clone(),
        project.clone(),
        session.clone(),
        interaction.clone(),
        view.clone(),
        selection.clone(),
        list_drag.clone(),
        busy.clone(),
        photos_model.clone(),
        config.clone(),
        refresh.clone(),
    );
    callbacks::session::setup_session_callbacks(
        &ui,
        store.clone(),
        project.clone(),
        session.clone(),
        interaction.clone(),
        confirm.clone(),
        busy.clone(),
        refresh.clone(),
    );
    callbacks::plans::setup_plan_callbacks(
        &ui,
        session.clone(),
        confirm.clone(),
        busy.clone(),
        plans_model.clone(),
    );
    callbacks::confirm::setup_confirm_callbacks(
        &ui,
        store.clone(),
        project.clone(),
        session.clone(),
        interaction.clone(),
        confirm.clone(),
        busy.clone(),
        refresh.clone(),
    );

    // Write the project snapshot back to its file.
    {
        let ui_weak = ui.as_weak();
        let store = store.clone();
        let project = project.clone();
        let busy = busy.clone();
        ui.on_save_project(move || {
            let Some(ui) = ui_weak.upgrade() else { return };
            if busy.get() {
                return;
            }
            let context = project.borrow().clone();
            let Some(path) = context.path else {
                ui.set_status_text("No project file to save to".into());
                return;
            };
            let file =
                ProjectFile::from_backend(store.borrow().backend(), context.id, &context.name);
            match file.save(&path) {
                Ok(()) => ui.set_status_text("Project saved".into()),
                Err(err) => {
                    tracing::error!(%err, "project save failed");
                    ui.set_status_text(format!("Save failed: {err}").into());
                }
            }
        });
    }

    {
        let ui_weak = ui.as_weak();
        ui.on_close_detail(move || {
            if let Some(ui) = ui_weak.upgrade() {
                ui.set_show_detail(false);
            }
        });
    }

    // Unpin from the detail panel: a direct, idempotent delete.
    {
        let ui_weak = ui.as_weak();
        let store = store.clone();
        let selection = selection.clone();
        let busy = busy.clone();
        let refresh = refresh.clone();
        ui.on_unpin_clicked(move || {
            let Some(ui) = ui_weak.upgrade() else { return };
            if busy.get() {
                return;
            }
            let Ok(photo_id) = Uuid::parse_str(ui.get_detail_photo_id().as_str()) else {
                return;
            };
            busy.set(true);
            ui.set_busy(true);
            let result = store.borrow_mut().delete(photo_id);
            busy.set(false);
            ui.set_busy(false);
            match result {
                Ok(existed) => {
                    ui.set_status_text(
                        if existed { "Photo unpinned" } else { "Photo was not pinned" }.into(),
                    );
                }
                Err(err) => {
                    tracing::error!(%err, photo = %photo_id, "unpin failed");
                    ui.set_status_text(format!("Unpin failed: {err}").into());
                }
            }
            ui.set_show_detail(false);
            *selection.borrow_mut() = None;
            refresh();
        });
    }

    // Dirty-state guard: closing the window with unsaved diffs asks first.
    {
        let ui_weak = ui.as_weak();
        let session = session.clone();
        let confirm = confirm.clone();
        ui.window().on_close_requested(move || {
            let dirty = session.borrow().as_ref().is_some_and(|s| s.is_dirty());
            if dirty {
                if let Some(ui) = ui_weak.upgrade() {
                    *confirm.borrow_mut() = Some(PendingConfirm::DiscardAndQuit);
                    ui.set_confirm_text("Discard unsaved placement changes and close?".into());
                    ui.set_show_confirm(true);
                }
                slint::CloseRequestResponse::KeepWindowShown
            } else {
                slint::CloseRequestResponse::HideWindow
            }
        });
    }

    ui.run()
}
