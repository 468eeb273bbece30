use crate::settings::DISPLAY_BORDER;
use crate::PaintApp;

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let [w, h] = app.document.surface().size();
        let border = egui::vec2(DISPLAY_BORDER, DISPLAY_BORDER);
        let framed_size = egui::vec2(w as f32, h as f32) + border * 2.0;

        let (response, painter) = ui.allocate_painter(framed_size, egui::Sense::drag());
        let canvas_rect = response.rect;

        // Tools map pointer positions through this box, so keep it current before input runs
        app.document.set_screen_rect(canvas_rect);
        app.input.set_canvas_rect(canvas_rect);
        app.sync_toolbar();
        app.run_input(ctx);

        painter.rect_filled(canvas_rect, 0.0, egui::Color32::DARK_GRAY);
        if let Some(texture) = app.refresh_texture(ctx) {
            let image_rect = canvas_rect.shrink(DISPLAY_BORDER);
            let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
            painter.image(texture, image_rect, uv, egui::Color32::WHITE);
        }

        if let Some(preview) = app.document.preview() {
            let color: egui::Color32 = app.document.context.color.into();
            painter.rect_filled(preview, 0.0, color.gamma_multiply(0.5));
        }
    });
}
