use crate::statics;
use crate::{CampaignDraft, CatalogKind, Command, Field, Origin, Outcome, Session};
use eframe::egui;
use egui_extras::{Column, TableBuilder};
use serde_json::Value;
use std::path::PathBuf;

pub fn run_gui(session: Session) -> eframe::Result {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1400.0, 900.0]),
        ..Default::default()
    };
    let title = format!("{} {}", statics::EN_APP_TITLE, env!("CARGO_PKG_VERSION"));
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(LedgerApp::new(session)))),
    )
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
enum Tab {
    #[default]
    File,
    Added,
    History,
    Monsters,
    Items,
}

#[derive(Clone, Debug)]
struct EditWindow {
    origin: Origin,
    title: String,
    draft: CampaignDraft,
}

#[derive(Clone, Debug)]
struct DetailWindow {
    name: String,
    attributes: Vec<(String, String)>,
    json: String,
}

/// The main application state and GUI logic.
/// Owns the editing session; every store mutation goes through `Session::dispatch`.
struct LedgerApp {
    session: Session,
    dialog_dir: Option<PathBuf>,
    form: CampaignDraft,
    tab: Tab,
    selected_file: Option<String>,
    selected_added: Option<String>,
    selected_history: Option<String>,
    selected_monster: Option<String>,
    selected_item: Option<String>,
    edit: Option<EditWindow>,
    detail: Option<DetailWindow>,
    confirm_export_open: bool,
    confirm_delete: Option<(Origin, String)>,
    status: String,
    last_error: Option<String>,
    close_allowed: bool,
    history_failed: bool,
}

impl LedgerApp {
    fn new(session: Session) -> Self {
        let last_error = match session.startup_warnings() {
            [] => None,
            warnings => Some(warnings.join("; ")),
        };
        Self {
            session,
            dialog_dir: None,
            form: CampaignDraft::new(),
            tab: Tab::default(),
            selected_file: None,
            selected_added: None,
            selected_history: None,
            selected_monster: None,
            selected_item: None,
            edit: None,
            detail: None,
            confirm_export_open: false,
            confirm_delete: None,
            status: String::new(),
            last_error,
            close_allowed: false,
            history_failed: false,
        }
    }

    fn describe_outcome(outcome: &Outcome) -> String {
        match outcome {
            Outcome::SourceLoaded { path, campaigns } => {
                format!("Loaded {} ({campaigns} campaigns)", path.display())
            }
            Outcome::Added(title) => format!("Campaign '{title}' added"),
            Outcome::Edited(title) => format!("Campaign '{title}' updated"),
            Outcome::Deleted(title) => format!("Campaign '{title}' deleted"),
            Outcome::Exported(report) => {
                let name = report
                    .path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| report.path.display().to_string());
                if report.dropped.is_empty() {
                    format!("New file generated: {name}")
                } else {
                    format!(
                        "New file generated: {name} (skipped added: {})",
                        report.dropped.join(", ")
                    )
                }
            }
            Outcome::HistorySaved(path) => format!("History saved to {}", path.display()),
        }
    }

    /// Run one command; on failure the error bar shows why and nothing changed.
    fn run_command(&mut self, command: Command) -> Option<Outcome> {
        match self.session.dispatch(command) {
            Ok(outcome) => {
                self.status = Self::describe_outcome(&outcome);
                self.last_error = None;
                Some(outcome)
            }
            Err(e) => {
                self.last_error = Some(format!("{:#}", anyhow::Error::from(e)));
                None
            }
        }
    }

    fn selection(&self, origin: Origin) -> Option<&str> {
        match origin {
            Origin::File => self.selected_file.as_deref(),
            Origin::Added => self.selected_added.as_deref(),
            Origin::History => self.selected_history.as_deref(),
        }
    }

    fn selection_mut(&mut self, origin: Origin) -> &mut Option<String> {
        match origin {
            Origin::File => &mut self.selected_file,
            Origin::Added => &mut self.selected_added,
            Origin::History => &mut self.selected_history,
        }
    }

    fn catalog_selection(&self, kind: CatalogKind) -> Option<&str> {
        match kind {
            CatalogKind::Monsters => self.selected_monster.as_deref(),
            CatalogKind::Items => self.selected_item.as_deref(),
        }
    }

    fn select_source(&mut self) {
        let mut dlg = rfd::FileDialog::new().add_filter("JSON Files", &["json"]);
        if let Some(dir) = self.dialog_dir.clone() {
            dlg = dlg.set_directory(dir);
        }
        let Some(path) = dlg.pick_file() else {
            return;
        };

        self.dialog_dir = path.parent().map(PathBuf::from);
        if self.run_command(Command::SelectSource(path)).is_some() {
            self.selected_file = None;
            self.tab = Tab::File;
        }
    }

    fn add_campaign(&mut self) {
        if self.run_command(Command::Add(self.form.clone())).is_some() {
            self.form.clear();
        }
    }

    fn open_editor(&mut self, origin: Origin) {
        let Some(title) = self.selection(origin).map(str::to_string) else {
            self.last_error = Some(statics::EN_SELECT_CAMPAIGN.to_string());
            return;
        };
        let Some(record) = self.session.store(origin).get(&title) else {
            self.last_error = Some(statics::EN_SELECT_CAMPAIGN.to_string());
            return;
        };
        self.edit = Some(EditWindow {
            origin,
            draft: record.to_draft(),
            title,
        });
    }

    fn request_delete(&mut self, origin: Origin) {
        let Some(title) = self.selection(origin).map(str::to_string) else {
            self.last_error = Some(statics::EN_SELECT_CAMPAIGN.to_string());
            return;
        };
        self.confirm_delete = Some((origin, title));
    }

    fn import(&mut self, kind: CatalogKind, all: bool) {
        let field = kind.target_field();
        // A "none" field is imported into as if empty, and turned back on only on success.
        let current = if self.form.is_unset(field) {
            String::new()
        } else {
            self.form.text(field).to_string()
        };
        let imported = if all {
            Ok(self.session.import_all(kind, &current))
        } else {
            self.session
                .import(kind, self.catalog_selection(kind), &current)
        };
        match imported {
            Ok(text) => {
                self.form.set_unset(field, false);
                self.form.set_text(field, text);
                self.status = format!("Imported into {}", field.label());
                self.last_error = None;
            }
            Err(e) => self.last_error = Some(format!("{:#}", anyhow::Error::from(e))),
        }
    }

    fn open_detail(&mut self, kind: CatalogKind) {
        let Some(name) = self.catalog_selection(kind).map(str::to_string) else {
            return;
        };
        let catalog = self.session.catalog(kind);
        let Some(entity) = catalog.get(&name) else {
            return;
        };
        self.detail = Some(DetailWindow {
            attributes: entity
                .iter()
                .map(|(k, v)| (k.clone(), value_preview(v)))
                .collect(),
            json: catalog.detail(&name).unwrap_or_default(),
            name,
        });
    }

    /// The history file is written when the window is asked to close. Every close retries
    /// a failed write until it succeeds or the user discards the unsaved history.
    fn handle_close_request(&mut self, ctx: &egui::Context) {
        if ctx.input(|i| i.viewport().close_requested()) && self.save_history_before_close() {
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
        }
    }

    /// Returns true when the close has to be cancelled.
    fn save_history_before_close(&mut self) -> bool {
        if self.close_allowed {
            return false;
        }
        if self.run_command(Command::SaveHistory).is_some() {
            self.close_allowed = true;
            self.history_failed = false;
            return false;
        }
        tracing::error!(error = ?self.last_error, "history not saved; close cancelled");
        self.history_failed = true;
        true
    }

    fn discard_history(&mut self) {
        tracing::warn!(
            added = self.session.store(Origin::Added).len(),
            "closing without saving history"
        );
        self.close_allowed = true;
        self.history_failed = false;
    }

    fn selectable_row_left(
        ui: &mut egui::Ui,
        selected: bool,
        text: &str,
        row_h: f32,
    ) -> egui::Response {
        let w = ui.available_width();
        let (rect, response) = ui.allocate_exact_size(egui::vec2(w, row_h), egui::Sense::click());
        let response = response.on_hover_cursor(egui::CursorIcon::PointingHand);

        let visuals = ui.style().interact_selectable(&response, selected);
        if ui.is_rect_visible(rect) {
            ui.painter()
                .rect_filled(rect, visuals.corner_radius, visuals.bg_fill);
            ui.painter().rect_stroke(
                rect,
                visuals.corner_radius,
                visuals.bg_stroke,
                egui::StrokeKind::Inside,
            );

            let font_id = egui::TextStyle::Button.resolve(ui.style());
            let text_pos = rect.left_center() + egui::vec2(6.0, 0.0);
            ui.painter().text(
                text_pos,
                egui::Align2::LEFT_CENTER,
                text,
                font_id,
                visuals.text_color(),
            );
        }

        response
    }

    fn render_record_tab(&mut self, ui: &mut egui::Ui, origin: Origin) {
        let titles: Vec<String> = self
            .session
            .store(origin)
            .titles()
            .map(str::to_string)
            .collect();

        ui.horizontal(|ui| {
            let has_selection = self.selection(origin).is_some();
            if ui
                .add_enabled(has_selection, egui::Button::new(statics::EN_BTN_EDIT))
                .clicked()
            {
                self.open_editor(origin);
            }
            if ui.button(statics::EN_BTN_DELETE).clicked() {
                self.request_delete(origin);
            }
        });
        ui.separator();

        if titles.is_empty() {
            ui.label(statics::EN_EMPTY_LIST);
            return;
        }

        let row_h = ui.text_style_height(&egui::TextStyle::Body) + 4.0;
        let mut open_editor = false;
        ui.push_id(("records", origin as u8), |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for title in &titles {
                        let selected = self.selection(origin) == Some(title.as_str());
                        let dirty = origin == Origin::File && self.session.dirty().contains(title);
                        let label = if dirty {
                            format!("{title}  ({})", statics::EN_BADGE_DIRTY)
                        } else {
                            title.clone()
                        };
                        let resp = Self::selectable_row_left(ui, selected, &label, row_h);
                        if resp.clicked() || resp.double_clicked() {
                            *self.selection_mut(origin) = Some(title.clone());
                        }
                        if resp.double_clicked() {
                            open_editor = true;
                        }
                    }
                });
        });
        if open_editor {
            self.open_editor(origin);
        }
    }

    fn render_catalog_tab(&mut self, ui: &mut egui::Ui, kind: CatalogKind) {
        let names: Vec<String> = self
            .session
            .catalog(kind)
            .names()
            .map(str::to_string)
            .collect();

        ui.horizontal(|ui| {
            if ui.button(statics::EN_BTN_IMPORT).clicked() {
                self.import(kind, false);
            }
            if ui.button(statics::EN_BTN_IMPORT_ALL).clicked() {
                self.import(kind, true);
            }
            let has_selection = self.catalog_selection(kind).is_some();
            if ui
                .add_enabled(has_selection, egui::Button::new(statics::EN_BTN_DETAILS))
                .clicked()
            {
                self.open_detail(kind);
            }
        });
        ui.label(match kind {
            CatalogKind::Monsters => statics::EN_LABEL_TARGET_MONSTERS,
            CatalogKind::Items => statics::EN_LABEL_TARGET_REWARDS,
        });
        ui.separator();

        if names.is_empty() {
            ui.label(statics::EN_EMPTY_LIST);
            return;
        }

        let row_h = ui.text_style_height(&egui::TextStyle::Body) + 4.0;
        let mut open_detail = false;
        ui.push_id(("catalog", kind.target_field().key()), |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for name in &names {
                        let selected = self.catalog_selection(kind) == Some(name.as_str());
                        let resp = Self::selectable_row_left(ui, selected, name, row_h);
                        if resp.clicked() || resp.double_clicked() {
                            let slot = match kind {
                                CatalogKind::Monsters => &mut self.selected_monster,
                                CatalogKind::Items => &mut self.selected_item,
                            };
                            *slot = Some(name.clone());
                        }
                        if resp.double_clicked() {
                            open_detail = true;
                        }
                    }
                });
        });
        if open_detail {
            self.open_detail(kind);
        }
    }

    fn render_edit_window(&mut self, ctx: &egui::Context) {
        let Some(mut edit) = self.edit.take() else {
            return;
        };
        let mut open = true;
        let mut save = false;
        egui::Window::new(format!("{} - {}", statics::EN_WINDOW_EDIT, edit.title))
            .id(egui::Id::new("edit_window"))
            .collapsible(false)
            .default_size([600.0, 600.0])
            .open(&mut open)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    draft_editor(ui, "edit_form", &mut edit.draft);
                    ui.separator();
                    if ui.button(statics::EN_BTN_SAVE_CHANGES).clicked() {
                        save = true;
                    }
                });
            });

        if save {
            let command = Command::Edit {
                origin: edit.origin,
                title: Some(edit.title.clone()),
                draft: edit.draft.clone(),
            };
            if self.run_command(command).is_some() {
                return;
            }
        }
        if open {
            self.edit = Some(edit);
        }
    }

    fn render_detail_window(&mut self, ctx: &egui::Context) {
        let Some(detail) = self.detail.as_ref() else {
            return;
        };
        let mut open = true;
        egui::Window::new(format!("{} - {}", statics::EN_WINDOW_DETAILS, detail.name))
            .id(egui::Id::new("detail_window"))
            .collapsible(false)
            .default_size([480.0, 420.0])
            .open(&mut open)
            .show(ctx, |ui| {
                let row_h = ui.text_style_height(&egui::TextStyle::Body) + 6.0;
                ui.push_id("detail_table", |ui| {
                    TableBuilder::new(ui)
                        .striped(true)
                        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                        .column(Column::initial(160.0).resizable(true))
                        .column(Column::remainder())
                        .header(row_h, |mut header| {
                            header.col(|ui| {
                                ui.strong(statics::EN_COL_KEY);
                            });
                            header.col(|ui| {
                                ui.strong(statics::EN_COL_VALUE);
                            });
                        })
                        .body(|mut body| {
                            for (key, value) in &detail.attributes {
                                body.row(row_h, |mut row| {
                                    row.col(|ui| {
                                        ui.label(key.as_str());
                                    });
                                    row.col(|ui| {
                                        ui.label(value.as_str());
                                    });
                                });
                            }
                        });
                });
                ui.separator();
                egui::CollapsingHeader::new("JSON").show(ui, |ui| {
                    let mut json = detail.json.as_str();
                    ui.add(
                        egui::TextEdit::multiline(&mut json)
                            .code_editor()
                            .desired_width(f32::INFINITY),
                    );
                });
            });
        if !open {
            self.detail = None;
        }
    }

    fn render_confirm_export(&mut self, ctx: &egui::Context) {
        if !self.confirm_export_open {
            return;
        }
        let pending = self.session.pending_changes();
        let mut open = true;
        let mut confirmed = false;
        let mut cancelled = false;
        egui::Window::new(statics::EN_WINDOW_CONFIRM_EXPORT)
            .collapsible(false)
            .open(&mut open)
            .show(ctx, |ui| {
                if pending.is_empty() {
                    ui.label(statics::EN_SUMMARY_NONE);
                }
                if !pending.modified.is_empty() {
                    ui.strong(statics::EN_SUMMARY_MODIFIED);
                    for title in &pending.modified {
                        ui.label(format!(" - {title}"));
                    }
                }
                if !pending.added.is_empty() {
                    ui.strong(statics::EN_SUMMARY_ADDED);
                    for title in &pending.added {
                        ui.label(format!(" - {title}"));
                    }
                }
                ui.separator();
                ui.label(statics::EN_SUMMARY_NOTE);
                ui.horizontal(|ui| {
                    confirmed = ui.button(statics::EN_BTN_CONFIRM).clicked();
                    cancelled = ui.button(statics::EN_BTN_CANCEL).clicked();
                });
            });

        if confirmed {
            self.run_command(Command::Export);
        }
        self.confirm_export_open = open && !confirmed && !cancelled;
    }

    fn render_history_failed(&mut self, ctx: &egui::Context) {
        if !self.history_failed {
            return;
        }
        let mut retry = false;
        let mut discard = false;
        let mut cancelled = false;
        egui::Window::new(statics::EN_WINDOW_HISTORY_FAILED)
            .collapsible(false)
            .show(ctx, |ui| {
                ui.label(statics::EN_HISTORY_FAILED_NOTE);
                if let Some(err) = &self.last_error {
                    ui.colored_label(egui::Color32::RED, err.as_str());
                }
                ui.horizontal(|ui| {
                    retry = ui.button(statics::EN_BTN_RETRY_CLOSE).clicked();
                    discard = ui.button(statics::EN_BTN_DISCARD_CLOSE).clicked();
                    cancelled = ui.button(statics::EN_BTN_CANCEL).clicked();
                });
            });

        if retry && !self.save_history_before_close() {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        } else if discard {
            self.discard_history();
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        } else if cancelled {
            self.history_failed = false;
        }
    }

    fn render_confirm_delete(&mut self, ctx: &egui::Context) {
        let Some((origin, title)) = self.confirm_delete.clone() else {
            return;
        };
        let mut confirmed = false;
        let mut cancelled = false;
        egui::Window::new(statics::EN_WINDOW_CONFIRM_DELETE)
            .collapsible(false)
            .show(ctx, |ui| {
                ui.label(format!("Delete '{title}' from {}?", origin_label(origin)));
                ui.horizontal(|ui| {
                    confirmed = ui.button(statics::EN_BTN_DELETE).clicked();
                    cancelled = ui.button(statics::EN_BTN_CANCEL).clicked();
                });
            });

        if confirmed {
            let command = Command::Delete {
                origin,
                title: Some(title),
            };
            if self.run_command(command).is_some() {
                *self.selection_mut(origin) = None;
            }
        }
        if confirmed || cancelled {
            self.confirm_delete = None;
        }
    }
}

fn origin_label(origin: Origin) -> &'static str {
    match origin {
        Origin::File => statics::EN_TAB_FILE,
        Origin::Added => statics::EN_TAB_ADDED,
        Origin::History => statics::EN_TAB_HISTORY,
    }
}

/// One row per field: label, editor, "none" toggle. An unset field shows its sentinel, read-only.
fn draft_editor(ui: &mut egui::Ui, id_salt: &str, draft: &mut CampaignDraft) {
    egui::Grid::new(id_salt)
        .num_columns(3)
        .striped(true)
        .show(ui, |ui| {
            for field in Field::ALL {
                ui.label(field.label());

                let unset = draft.is_unset(field);
                let editor_width = 320.0;
                if unset {
                    let mut shown = field.sentinel();
                    ui.add_enabled(
                        false,
                        egui::TextEdit::singleline(&mut shown).desired_width(editor_width),
                    );
                } else if field.is_list() {
                    ui.add(
                        egui::TextEdit::multiline(draft.text_mut(field))
                            .desired_rows(3)
                            .desired_width(editor_width),
                    );
                } else {
                    ui.add(
                        egui::TextEdit::singleline(draft.text_mut(field))
                            .desired_width(editor_width),
                    );
                }

                let mut toggled = unset;
                if ui
                    .checkbox(&mut toggled, statics::EN_CHECKBOX_UNSET)
                    .changed()
                {
                    draft.set_unset(field, toggled);
                }
                ui.end_row();
            }
        });
}

fn value_preview(val: &Value) -> String {
    match val {
        Value::Null => "null".to_string(),
        Value::Bool(v) => v.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => {
            if s.chars().count() > 60 {
                let mut short: String = s.chars().take(57).collect();
                short.push_str("...");
                short
            } else {
                s.clone()
            }
        }
        Value::Array(values) => format!("[{}]", values.len()),
        Value::Object(map) => format!("{{{}}}", map.len()),
    }
}

impl eframe::App for LedgerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_close_request(ctx);

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                if ui.button(statics::EN_BTN_SELECT_SOURCE).clicked() {
                    self.select_source();
                }
                let source_label = self
                    .session
                    .source_path()
                    .and_then(|p| p.file_name())
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| statics::EN_NO_SOURCE.to_string());
                ui.label(source_label);

                ui.separator();
                let has_source = self.session.source_path().is_some();
                if ui
                    .add_enabled(has_source, egui::Button::new(statics::EN_BTN_GENERATE))
                    .clicked()
                {
                    self.confirm_export_open = true;
                }

                if !self.status.is_empty() {
                    ui.separator();
                    ui.label(self.status.as_str());
                }
            });
        });

        if let Some(err) = self.last_error.clone() {
            egui::TopBottomPanel::top("error_bar").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(egui::Color32::RED, err);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button(statics::EN_BTN_CLEAR).clicked() {
                            self.last_error = None;
                        }
                    });
                });
            });
        }

        self.render_edit_window(ctx);
        self.render_detail_window(ctx);
        self.render_confirm_export(ctx);
        self.render_confirm_delete(ctx);
        self.render_history_failed(ctx);

        // The bottom status bar must be shown before side/central panels so it reserves
        // space across the full window width.
        egui::TopBottomPanel::bottom("bottom_status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!(
                    "file: {}",
                    self.session.store(Origin::File).len()
                ));
                ui.separator();
                ui.label(format!("edited: {}", self.session.dirty().len()));
                ui.separator();
                ui.label(format!(
                    "added: {}",
                    self.session.store(Origin::Added).len()
                ));
                ui.separator();
                ui.label(format!(
                    "history: {}",
                    self.session.store(Origin::History).len()
                ));
                ui.separator();
                ui.label(self.session.config().data_dir.display().to_string());
            });
        });

        egui::SidePanel::left("form_panel")
            .resizable(true)
            .default_width(560.0)
            .show(ctx, |ui| {
                ui.heading(statics::EN_HEADING_FORM);
                ui.separator();
                ui.push_id("form_scroll", |ui| {
                    egui::ScrollArea::vertical()
                        .auto_shrink([false, false])
                        .max_height(ui.available_height() - 40.0)
                        .show(ui, |ui| {
                            draft_editor(ui, "add_form", &mut self.form);
                        });
                });
                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button(statics::EN_BTN_ADD_CAMPAIGN).clicked() {
                        self.add_campaign();
                    }
                    if ui.button(statics::EN_BTN_CLEAR_FORM).clicked() {
                        self.form.clear();
                    }
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.tab, Tab::File, statics::EN_TAB_FILE);
                ui.selectable_value(&mut self.tab, Tab::Added, statics::EN_TAB_ADDED);
                ui.selectable_value(&mut self.tab, Tab::History, statics::EN_TAB_HISTORY);
                ui.selectable_value(&mut self.tab, Tab::Monsters, statics::EN_TAB_MONSTERS);
                ui.selectable_value(&mut self.tab, Tab::Items, statics::EN_TAB_ITEMS);
            });
            ui.separator();

            match self.tab {
                Tab::File => self.render_record_tab(ui, Origin::File),
                Tab::Added => self.render_record_tab(ui, Origin::Added),
                Tab::History => self.render_record_tab(ui, Origin::History),
                Tab::Monsters => self.render_catalog_tab(ui, CatalogKind::Monsters),
                Tab::Items => self.render_catalog_tab(ui, CatalogKind::Items),
            }
        });
    }
}
