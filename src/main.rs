#![warn(clippy::all, rust_2018_idioms)]

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 640.0])
            .with_title("Raster Paint"),
        ..Default::default()
    };
    eframe::run_native(
        "raster_paint",
        native_options,
        Box::new(|cc| Ok(Box::new(raster_paint::PaintApp::new(cc)))),
    )
}
