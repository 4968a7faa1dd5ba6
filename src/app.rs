use eframe::egui;
use egui::Color32;
use std::path::PathBuf;

use crate::cli::CliArgs;
use crate::color::rgb_to_hex;
use crate::draft::{
    RoleSlot, ARABLE_RESOURCES, CAPPED_RESOURCES, SPECIAL_RESOURCES, SUBSISTENCE_BUILDINGS,
};
use crate::editor::EditorState;
use crate::viewport::Viewport;
use crate::{io, log_err, log_info};

pub struct StatePainterApp {
    editor: EditorState,
    viewport: Viewport,
    /// Pre-selected export destination (from `--export`); reused for every
    /// export this session.
    export_path: Option<PathBuf>,
    status: String,
}

impl StatePainterApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, args: CliArgs) -> Self {
        let mut editor = EditorState::new();
        let mut viewport = Viewport::new();
        let mut status = String::from("Open a province map to begin.");

        if let Some(path) = &args.map {
            match io::load_map(path) {
                Ok(img) => {
                    log_info!("opened map {} ({}x{})", path.display(), img.width(), img.height());
                    status = format!("Loaded {}", path.display());
                    editor.load_map(img);
                    viewport.reset();
                }
                Err(e) => {
                    log_err!("failed to open {}: {}", path.display(), e);
                    status = e.to_string();
                }
            }
        }

        Self {
            editor,
            viewport,
            export_path: args.export,
            status,
        }
    }

    // ------------------------------------------------------------------
    // Toolbar actions
    // ------------------------------------------------------------------

    fn open_map(&mut self) {
        let Some(path) = io::pick_map_file() else {
            return;
        };
        match io::load_map(&path) {
            Ok(img) => {
                log_info!("opened map {} ({}x{})", path.display(), img.width(), img.height());
                self.status = format!("Loaded {}", path.display());
                self.editor.load_map(img);
                self.viewport.reset();
            }
            Err(e) => {
                log_err!("failed to open {}: {}", path.display(), e);
                self.status = e.to_string();
            }
        }
    }

    fn save_state(&mut self) {
        match self.editor.save_state() {
            Ok(id) => {
                log_info!("committed state {}", id);
                self.status = format!("State {} saved.", id);
            }
            Err(e) => {
                self.status = e.to_string();
            }
        }
    }

    fn export_all(&mut self) {
        let path = self.export_path.clone().or_else(io::pick_export_file);
        let Some(path) = path else {
            return;
        };
        match io::write_export(&path, &self.editor.registry.export_all()) {
            Ok(()) => {
                let n = self.editor.registry.records().len();
                log_info!("exported {} state(s) to {}", n, path.display());
                self.status = format!("Exported {} state(s) to {}", n, path.display());
            }
            Err(e) => {
                log_err!("export to {} failed: {}", path.display(), e);
                self.status = e.to_string();
            }
        }
    }

    // ------------------------------------------------------------------
    // Left panel: state form
    // ------------------------------------------------------------------

    fn form_ui(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Open Map…").clicked() {
                self.open_map();
            }
            if ui.button("Save State").clicked() {
                self.save_state();
            }
            if ui.button("Export All States").clicked() {
                self.export_all();
            }
        });
        ui.separator();

        let mut changed = false;

        egui::Grid::new("state_fields").num_columns(3).show(ui, |ui| {
            let draft = &mut self.editor.draft;

            ui.label("State ID:");
            changed |= ui.text_edit_singleline(&mut draft.id_text).changed();
            if ui.button("Suggest").clicked() {
                draft.id_text = self.editor.registry.suggest_id().to_string();
                changed = true;
            }
            ui.end_row();

            ui.label("State name:");
            changed |= ui.text_edit_singleline(&mut draft.name).changed();
            ui.end_row();

            ui.label("Arable land:");
            changed |= ui.text_edit_singleline(&mut draft.arable_land).changed();
            ui.end_row();
        });

        ui.horizontal(|ui| {
            ui.label("Draft color:");
            let (rect, _) = ui.allocate_exact_size(egui::vec2(40.0, 16.0), egui::Sense::hover());
            let c = self.editor.draft.color;
            ui.painter()
                .rect_filled(rect, 2.0, Color32::from_rgb(c[0], c[1], c[2]));
            ui.monospace(rgb_to_hex(c));
        });

        ui.separator();
        ui.label("Subsistence building:");
        for (i, tag) in SUBSISTENCE_BUILDINGS.iter().enumerate() {
            let mut checked = self.editor.draft.subsistence == Some(i);
            if ui.checkbox(&mut checked, *tag).changed() {
                self.editor.draft.subsistence = if checked { Some(i) } else { None };
                changed = true;
            }
        }

        ui.separator();
        ui.label("Arable resources:");
        egui::Grid::new("arable_resources").num_columns(2).show(ui, |ui| {
            let draft = &mut self.editor.draft;
            for (i, tag) in ARABLE_RESOURCES.iter().enumerate() {
                changed |= ui.checkbox(&mut draft.arable[i], *tag).changed();
                if i % 2 == 1 {
                    ui.end_row();
                }
            }
        });

        ui.separator();
        ui.label("Capped resources:");
        egui::Grid::new("capped_resources").num_columns(2).show(ui, |ui| {
            let draft = &mut self.editor.draft;
            for (i, tag) in CAPPED_RESOURCES.iter().enumerate() {
                changed |= ui.checkbox(&mut draft.capped_checked[i], *tag).changed();
                changed |= ui
                    .add(egui::TextEdit::singleline(&mut draft.capped_values[i]).desired_width(48.0))
                    .changed();
                ui.end_row();
            }
        });

        ui.label("Special resources:");
        egui::Grid::new("special_resources").num_columns(2).show(ui, |ui| {
            let draft = &mut self.editor.draft;
            for (i, tag) in SPECIAL_RESOURCES.iter().enumerate() {
                changed |= ui.checkbox(&mut draft.special_checked[i], *tag).changed();
                changed |= ui
                    .add(
                        egui::TextEdit::singleline(&mut draft.special_values[i]).desired_width(48.0),
                    )
                    .changed();
                ui.end_row();
            }
        });

        ui.separator();
        ui.label("Assign role (arm, then click a province):");
        ui.horizontal(|ui| {
            for slot in RoleSlot::ALL {
                let armed = self.editor.armed_role == Some(slot);
                if ui.selectable_label(armed, slot.tag()).clicked() {
                    self.editor.armed_role = if armed { None } else { Some(slot) };
                }
            }
        });
        for slot in RoleSlot::ALL {
            if let Some(key) = self.editor.draft.roles[slot.index()] {
                ui.monospace(format!("{} = {}", slot.tag(), key.hex()));
            }
        }

        if changed {
            self.editor.refresh_text();
        }

        ui.separator();
        ui.label("Current state configuration:");
        ui.add(
            egui::TextEdit::multiline(&mut self.editor.rendered.as_str())
                .font(egui::TextStyle::Monospace)
                .desired_rows(12)
                .desired_width(f32::INFINITY),
        );

        ui.separator();
        ui.label(&self.status);
    }
}

impl eframe::App for StatePainterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("state_form")
            .exact_width(400.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false; 2])
                    .show(ui, |ui| self.form_ui(ui));
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            let clicked = match self.editor.map.as_ref() {
                Some(map) => self.viewport.show(ui, map),
                None => {
                    ui.centered_and_justified(|ui| {
                        ui.label("No map loaded. Use \"Open Map…\" to pick a province image.");
                    });
                    None
                }
            };
            if let Some((x, y)) = clicked {
                if self.editor.handle_click(x, y) {
                    self.viewport.mark_dirty();
                }
            }
        });
    }
}
