/// Frame-rate readout in the top-left corner
pub fn fps_badge(ctx: &egui::Context, fps: f32) {
    egui::Window::new("FPS")
        .title_bar(false)
        .resizable(false)
        .fixed_pos(egui::pos2(10.0, 10.0))
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new(format!("{:.0}", fps))
                    .size(32.0)
                    .color(egui::Color32::from_rgb(74, 158, 255)),
            );
            ui.label(
                egui::RichText::new("FPS")
                    .size(12.0)
                    .color(egui::Color32::GRAY),
            );
        });
}

/// Key hint along the bottom edge
pub fn navigation_hint(ctx: &egui::Context, title: &str) {
    egui::Area::new(egui::Id::new("navigation_hint"))
        .anchor(egui::Align2::LEFT_BOTTOM, [10.0, -10.0])
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new(format!("{title}  |  1-7 / Tab: switch shape  |  Esc: quit"))
                    .size(12.0)
                    .color(egui::Color32::GRAY),
            );
        });
}
