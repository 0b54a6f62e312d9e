//! Desktop window: profile list on the left, editor on the right.

use anyhow::Result;
use eframe::egui;

use crate::backend::HostsBackend;
use crate::editor::ContentEditor;
use crate::list::ProfileList;
use crate::profile::ProfileId;
use crate::state::HostStore;

/// Gestures collected while drawing the list, applied after the frame's borrows end.
enum ListEvent {
    Add,
    Select(ProfileId),
    BeginRename(ProfileId),
    RenameInput(ProfileId, String),
    CommitRename(ProfileId),
    Toggle(ProfileId),
}

enum EditorEvent {
    Edit(String),
    Save,
    Apply,
    Delete,
}

pub struct HostswapApp {
    store: HostStore,
    list: ProfileList,
    editor: ContentEditor,
    backend: Box<dyn HostsBackend>,
    focus_rename: Option<ProfileId>,
}

impl HostswapApp {
    pub fn new(backend: Box<dyn HostsBackend>) -> Self {
        Self {
            store: HostStore::new(),
            list: ProfileList::new(),
            editor: ContentEditor::new(),
            backend,
            focus_rename: None,
        }
    }

    fn modal_open(&self) -> bool {
        self.list.dialog().is_open() || self.editor.dialog().is_open()
    }

    /// Draw the list panel and return its rect (for outside-click detection).
    fn list_panel(&mut self, ctx: &egui::Context) -> egui::Rect {
        let mut events = Vec::new();
        let modal = self.modal_open();
        let focus = self.focus_rename.take();
        let selected_id = self.store.selected_profile().id;

        let panel = egui::SidePanel::left("profiles")
            .resizable(true)
            .default_width(240.0)
            .show(ctx, |ui| {
                if modal {
                    ui.disable();
                }
                ui.add_space(6.0);
                if ui.button("➕ Add").clicked() {
                    events.push(ListEvent::Add);
                }
                ui.separator();

                egui::ScrollArea::vertical().show(ui, |ui| {
                    for p in self.list.entries() {
                        ui.horizontal(|ui| {
                            if p.editing {
                                let mut name = p.name.clone();
                                let resp = ui.add(
                                    egui::TextEdit::singleline(&mut name)
                                        .desired_width(f32::INFINITY),
                                );
                                if focus == Some(p.id) {
                                    resp.request_focus();
                                }
                                if resp.changed() {
                                    events.push(ListEvent::RenameInput(p.id, name));
                                }
                                if resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter))
                                {
                                    events.push(ListEvent::CommitRename(p.id));
                                }
                                return;
                            }

                            let resp = ui.selectable_label(selected_id == p.id, p.name.as_str());
                            if resp.double_clicked() {
                                events.push(ListEvent::BeginRename(p.id));
                            } else if resp.clicked() {
                                events.push(ListEvent::Select(p.id));
                            }
                            if !p.is_sentinel() {
                                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                    let mut on = p.active;
                                    if ui.checkbox(&mut on, "").on_hover_text("Apply").changed() {
                                        events.push(ListEvent::Toggle(p.id));
                                    }
                                });
                            }
                        });
                    }
                });
            });

        for event in events {
            match event {
                ListEvent::Add => {
                    let id = self.list.add();
                    self.focus_rename = Some(id);
                }
                ListEvent::Select(id) => self.list.select(id, &mut self.store),
                ListEvent::BeginRename(id) => {
                    self.list.begin_rename(id);
                    self.focus_rename = Some(id);
                }
                ListEvent::RenameInput(id, name) => self.list.rename_input(id, name),
                ListEvent::CommitRename(id) => self.list.commit_rename(id, &mut self.store),
                ListEvent::Toggle(id) => self.list.request_activate(id),
            }
        }

        panel.response.rect
    }

    fn editor_panel(&mut self, ctx: &egui::Context) {
        let mut events = Vec::new();
        let modal = self.modal_open();
        let read_only = self.editor.is_read_only(&self.store);
        let can_save = self.editor.can_save();

        egui::CentralPanel::default().show(ctx, |ui| {
            if modal {
                ui.disable();
            }
            if !read_only {
                ui.horizontal(|ui| {
                    if ui.button("Apply").clicked() {
                        events.push(EditorEvent::Apply);
                    }
                    if ui.add_enabled(can_save, egui::Button::new("Save")).clicked() {
                        events.push(EditorEvent::Save);
                    }
                    if ui.button("Delete").clicked() {
                        events.push(EditorEvent::Delete);
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.weak(self.store.selected_profile().name.as_str());
                    });
                });
                ui.separator();
            }

            egui::ScrollArea::vertical().show(ui, |ui| {
                let mut text = self.editor.content().to_string();
                let resp = ui.add_enabled(
                    !read_only,
                    egui::TextEdit::multiline(&mut text)
                        .code_editor()
                        .desired_width(f32::INFINITY)
                        .desired_rows(30),
                );
                if resp.changed() {
                    events.push(EditorEvent::Edit(text));
                }
            });
        });

        if !modal && !read_only && ctx.input_mut(|i| i.consume_key(egui::Modifiers::COMMAND, egui::Key::S)) {
            events.push(EditorEvent::Save);
        }

        let backend = self.backend.as_ref();
        for event in events {
            match event {
                EditorEvent::Edit(text) => self.editor.edit(&self.store, text),
                EditorEvent::Save => {
                    if self.editor.save(&mut self.store, backend) {
                        self.list.mark_saved(self.store.selected_profile().id);
                    }
                }
                EditorEvent::Apply => self.editor.apply(&mut self.store, backend),
                EditorEvent::Delete => self.editor.request_delete(&self.store),
            }
        }
    }

    fn dialogs(&mut self, ctx: &egui::Context) {
        let backend = self.backend.as_ref();
        if let Some(choice) = self.list.dialog_mut().show(ctx, "list-dialog") {
            self.list.resolve_dialog(choice, &mut self.store, backend);
        }
        if let Some(choice) = self.editor.dialog_mut().show(ctx, "editor-dialog") {
            self.editor.resolve_dialog(choice, &mut self.store, backend);
        }
    }

    /// Load and reconcile state; cheap when nothing changed.
    fn sync(&mut self) {
        let backend = self.backend.as_ref();
        self.list.update(&mut self.store, backend);
        self.editor.update(&self.store, backend);
    }
}

impl eframe::App for HostswapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.sync();

        let list_rect = self.list_panel(ctx);
        self.sync();
        self.editor_panel(ctx);
        self.dialogs(ctx);

        let clicked_outside_list = ctx.input(|i| {
            i.pointer.primary_clicked()
                && i.pointer.interact_pos().is_some_and(|pos| !list_rect.contains(pos))
        });
        if clicked_outside_list {
            self.list.cancel_editing();
        }

        self.sync();
    }
}

/// Open the window and block until it is closed.
pub fn run(backend: Box<dyn HostsBackend>) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 640.0])
            .with_min_inner_size([480.0, 320.0])
            .with_title("hostswap"),
        ..Default::default()
    };

    tracing::info!("opening window");
    eframe::run_native(
        "hostswap",
        options,
        Box::new(move |_cc| Ok(Box::new(HostswapApp::new(backend)))),
    )
    .map_err(|e| anyhow::anyhow!("failed to open window: {e}"))
}
