use crate::settings::BRUSH_PRESETS;
use crate::tools::TEXT;
use crate::PaintApp;

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            // Collect tool names first to avoid borrowing issues
            let tool_names: Vec<&'static str> = app.engine.tool_names().to_vec();
            for tool_name in tool_names {
                let is_selected = app.settings.active_tool == tool_name;
                if ui.selectable_label(is_selected, tool_name).clicked() && !is_selected {
                    log::info!("Tool selected from UI: {}", tool_name);
                    app.settings.active_tool = tool_name.to_owned();
                }
            }
            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Color:");
                let mut color: egui::Color32 = app.settings.brush_color.into();
                if egui::color_picker::color_edit_button_srgba(
                    ui,
                    &mut color,
                    egui::color_picker::Alpha::Opaque,
                )
                .changed()
                {
                    app.settings.brush_color = color.into();
                }
                ui.monospace(app.settings.brush_color.to_hex_string());
            });

            ui.horizontal(|ui| {
                ui.label("Brush size:");
                egui::ComboBox::from_id_salt("brush_size")
                    .selected_text(format!("{} px", app.settings.brush_width))
                    .show_ui(ui, |ui| {
                        for size in BRUSH_PRESETS {
                            ui.selectable_value(&mut app.settings.brush_width, size, format!("{size} px"));
                        }
                    });
            });

            if app.settings.active_tool == TEXT {
                ui.horizontal(|ui| {
                    ui.label("Text:");
                    ui.text_edit_singleline(&mut app.settings.text);
                });
            }
            ui.separator();

            ui.horizontal(|ui| {
                if ui.button("New").clicked() {
                    app.new_surface();
                }
                if ui.button("Export PNG").clicked() {
                    app.export();
                }
            });
            ui.label("Drop an image file on the window to open it.");

            if !app.notices.is_empty() {
                ui.separator();
                ui.strong("Notices");
                for notice in &app.notices {
                    ui.label(notice);
                }
                if ui.button("Dismiss").clicked() {
                    app.notices.clear();
                }
            }
        });
}
