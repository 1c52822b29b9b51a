/// Corner overlay showing the live bubble count and frame rate
pub fn draw(ctx: &egui::Context, count: usize, fps: f32) {
    egui::Window::new("HUD")
        .title_bar(false)
        .resizable(false)
        .fixed_pos(egui::pos2(10.0, 10.0))
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new(format!("{}", count))
                    .size(48.0)
                    .color(egui::Color32::from_rgb(74, 158, 255)),
            );
            ui.label(
                egui::RichText::new("BUBBLES")
                    .size(12.0)
                    .color(egui::Color32::GRAY),
            );
            ui.add_space(6.0);
            ui.label(
                egui::RichText::new(format!("{:.0}", fps))
                    .size(20.0)
                    .color(egui::Color32::from_rgb(74, 158, 255)),
            );
            ui.label(
                egui::RichText::new("FPS")
                    .size(12.0)
                    .color(egui::Color32::GRAY),
            );
        });
}
